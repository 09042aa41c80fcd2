//! Text card primitives

use crate::rendering::Card;
use serde_json::Value;

const MIN_WIDTH: usize = 16;

/// Format a price value with thousands separators. Strings pass through.
pub fn format_price(price: Option<&Value>) -> String {
    match price {
        Some(Value::Number(n)) => {
            if let Some(i) = n.as_i64() {
                group_digits(i)
            } else if let Some(f) = n.as_f64() {
                let total = (f.abs() * 100.0).round() as i64;
                let sign = if f < 0.0 && total != 0 { "-" } else { "" };
                let (whole, cents) = (total / 100, total % 100);
                if cents == 0 && f.fract() == 0.0 {
                    format!("{}{}", sign, group_digits(whole))
                } else {
                    format!("{}{}.{:02}", sign, group_digits(whole), cents)
                }
            } else {
                n.to_string()
            }
        }
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        _ => "?".to_string(),
    }
}

fn group_digits(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if n < 0 {
        out.insert(0, '-');
    }
    out
}

/// Greedy word wrap to `width` characters; overlong words are cut.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut cur = String::new();
    for word in text.split_whitespace() {
        let word = truncate(word, width);
        let cur_len = cur.chars().count();
        if cur_len > 0 && cur_len + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut cur));
        }
        if !cur.is_empty() {
            cur.push(' ');
        }
        cur.push_str(&word);
    }
    if !cur.is_empty() {
        lines.push(cur);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let keep = width.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(&".".repeat(width.min(3)));
    out
}

fn boxed(content: &str, inner: usize) -> String {
    let pad = inner.saturating_sub(content.chars().count());
    format!("| {}{} |", content, " ".repeat(pad))
}

/// Render `card` as a bordered box exactly `width` characters wide.
///
/// Every returned line has the same character count.
pub fn render_card(card: &Card, width: usize) -> Vec<String> {
    let width = width.max(MIN_WIDTH);
    let inner = width - 4;
    let border = format!("+{}+", "-".repeat(width - 2));

    let mut lines = vec![border.clone()];
    for line in wrap(&card.title, inner) {
        lines.push(boxed(&line, inner));
    }
    lines.push(boxed(&truncate(&format!("Amount: {}", card.amount), inner), inner));
    lines.push(boxed(&truncate(&format!("Price: {}", card.price), inner), inner));
    lines.push(boxed(&truncate(&format!("Seller: {}", card.seller), inner), inner));
    lines.push(border);
    lines
}
