//! Static HTML page output.

use crate::rendering::Card;
use std::fmt::Write as _;

const STYLE: &str = "body{font-family:sans-serif;margin:16px;background:#f4f4f6}\
#status{color:#555;margin-bottom:12px}\
#grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(220px,1fr));gap:12px}\
.card{background:#fff;border-radius:8px;padding:12px;box-shadow:0 1px 3px rgba(0,0,0,.15)}\
.card h3{margin:0 0 8px;font-size:1.05em}\
.card p{margin:2px 0}";

/// Escape text for use in element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// A self-contained page with a status line and the card grid.
pub fn render_document(cards: &[Card], status: &str, term: &str) -> String {
    let mut page = String::new();
    let _ = write!(
        page,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Auctions</title>\n<style>{}</style>\n</head>\n<body>\n",
        STYLE
    );
    let _ = writeln!(
        page,
        "<input id=\"search\" type=\"search\" placeholder=\"Search auctions\" value=\"{}\">",
        escape(term)
    );
    let _ = writeln!(page, "<div id=\"status\">{}</div>", escape(status));
    page.push_str("<div id=\"grid\">\n");
    for card in cards {
        let uuid_attr = card
            .seller_uuid
            .as_deref()
            .map(|u| format!(" data-seller=\"{}\"", escape(u)))
            .unwrap_or_default();
        let _ = writeln!(
            page,
            "<div class=\"card\"{}><h3>{}</h3><p>Amount: {}</p><p>Price: {}</p><p>Seller: {}</p></div>",
            uuid_attr,
            escape(&card.title),
            card.amount,
            escape(&card.price),
            escape(&card.seller)
        );
    }
    page.push_str("</div>\n</body>\n</html>\n");
    page
}
