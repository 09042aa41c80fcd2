//! Side-by-side layout of text cards.

use crate::rendering::card::render_card;
use crate::rendering::{Card, CardSink};
use crate::{Error, Result};
use std::io::Write;

const GUTTER: &str = "  ";

/// Lay `cards` out in rows of `columns`, each card `width` characters wide.
///
/// Shorter cards in a row are padded with blank lines so rows align.
pub fn layout_grid(cards: &[Card], columns: usize, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    for row in cards.chunks(columns.max(1)) {
        let rendered: Vec<Vec<String>> = row.iter().map(|c| render_card(c, width)).collect();
        let height = rendered.iter().map(Vec::len).max().unwrap_or(0);
        for i in 0..height {
            let line = rendered
                .iter()
                .map(|lines| match lines.get(i) {
                    Some(l) => l.clone(),
                    None => " ".repeat(lines[0].chars().count()),
                })
                .collect::<Vec<_>>()
                .join(GUTTER);
            out.push(line.trim_end().to_string());
        }
    }
    out
}

/// Writes grid rows to any `Write` as chunks arrive.
pub struct TextGrid<W: Write> {
    out: W,
    columns: usize,
    width: usize,
}

impl<W: Write> TextGrid<W> {
    pub fn new(out: W, columns: usize, width: usize) -> Self {
        Self {
            out,
            columns,
            width,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> CardSink for TextGrid<W> {
    fn append(&mut self, chunk: &[Card]) -> Result<()> {
        for line in layout_grid(chunk, self.columns, self.width) {
            writeln!(self.out, "{}", line)
                .map_err(|e| Error::Render(format!("Failed to write grid: {}", e)))?;
        }
        self.out
            .flush()
            .map_err(|e| Error::Render(format!("Failed to flush grid: {}", e)))
    }
}
