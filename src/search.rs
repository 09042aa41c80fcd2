//! Search filtering and input debouncing.

use crate::auction::AuctionEntry;
use std::time::Duration;
use tokio::sync::mpsc;

/// Entries whose serialized form contains `term`, ignoring case.
///
/// A blank term matches everything. Order is preserved.
pub fn filter_entries<'a>(entries: &'a [AuctionEntry], term: &str) -> Vec<&'a AuctionEntry> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return entries.iter().collect();
    }
    entries
        .iter()
        .filter(|e| e.serialized().to_lowercase().contains(&needle))
        .collect()
}

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Search(String),
    Refresh,
    Quit,
}

impl Input {
    /// `:refresh`/`:r` and `:quit`/`:q` are commands; anything else is a search term.
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            ":refresh" | ":r" => Input::Refresh,
            ":quit" | ":q" => Input::Quit,
            term => Input::Search(term.to_string()),
        }
    }
}

/// Collapses bursts of search input into the last term of each burst.
///
/// A term is released once no newer input has arrived for the quiet period.
/// Commands are never debounced: one arriving while a term is pending
/// releases that term first and is delivered on the following call.
/// When the sender side closes, the pending term is released immediately.
pub struct Debouncer {
    rx: mpsc::Receiver<Input>,
    quiet: Duration,
    held: Option<Input>,
}

impl Debouncer {
    pub fn new(rx: mpsc::Receiver<Input>, quiet: Duration) -> Self {
        Self {
            rx,
            quiet,
            held: None,
        }
    }

    /// Next settled input, or `None` once the input channel is closed and drained.
    pub async fn next(&mut self) -> Option<Input> {
        if let Some(command) = self.held.take() {
            return Some(command);
        }
        let mut pending = match self.rx.recv().await? {
            Input::Search(term) => term,
            command => return Some(command),
        };
        loop {
            match tokio::time::timeout(self.quiet, self.rx.recv()).await {
                Ok(Some(Input::Search(newer))) => pending = newer,
                Ok(Some(command)) => {
                    self.held = Some(command);
                    return Some(Input::Search(pending));
                }
                Ok(None) | Err(_) => return Some(Input::Search(pending)),
            }
        }
    }
}
