//! Card rendering: text grid for terminals, HTML for a static page.

pub mod card;
pub mod grid;
pub mod html;

use crate::auction::AuctionEntry;
use crate::Result;
use std::collections::HashMap;

pub use card::{format_price, render_card};
pub use grid::{layout_grid, TextGrid};
pub use html::render_document;

/// Display model for one auction card.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub title: String,
    pub amount: u64,
    pub price: String,
    pub seller: String,
    pub seller_uuid: Option<String>,
}

impl Card {
    /// Build a card, taking the seller's display name from `names` when resolved.
    pub fn from_entry(entry: &AuctionEntry, names: &HashMap<String, String>) -> Self {
        let seller_uuid = entry.owner_uuid();
        let seller = match &seller_uuid {
            Some(uuid) => names.get(uuid).cloned().unwrap_or_else(|| uuid.clone()),
            None => "Unknown seller".to_string(),
        };
        Self {
            title: entry.item_name(),
            amount: entry.amount(),
            price: format_price(entry.price()),
            seller,
            seller_uuid,
        }
    }
}

/// A display that receives cards one chunk at a time.
pub trait CardSink {
    fn append(&mut self, chunk: &[Card]) -> Result<()>;
}

/// Emit `cards` to `sink` in chunks of `chunk_size`, yielding to the runtime
/// between chunks so other tasks (input handling, lookups) keep running.
///
/// Returns the number of cards emitted.
pub async fn render_incremental<S: CardSink + ?Sized>(
    cards: &[Card],
    chunk_size: usize,
    sink: &mut S,
) -> Result<usize> {
    let mut emitted = 0;
    for chunk in cards.chunks(chunk_size.max(1)) {
        sink.append(chunk)?;
        emitted += chunk.len();
        tokio::task::yield_now().await;
    }
    Ok(emitted)
}
