//! Auction entries as returned by the marketplace API.
//!
//! The API does not commit to a schema, so an entry keeps the raw JSON object
//! and every accessor reads it defensively, trying a list of known field names
//! before falling back to a default.

use crate::ident::normalize_uuid;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const PRICE_KEYS: &[&str] = &["price", "startingBid", "starting_bid", "cost", "value"];
const ITEM_OBJECT_KEYS: &[&str] = &["displayName", "display_name", "name", "type", "material"];
const ITEM_NAME_KEYS: &[&str] = &["itemName", "item_name", "name"];
const OWNER_KEYS: &[&str] = &[
    "owner",
    "seller",
    "sellerUuid",
    "seller_uuid",
    "ownerUuid",
    "owner_uuid",
    "auctioneer",
];
const AMOUNT_KEYS: &[&str] = &["amount", "count", "quantity"];

/// One listing returned by the marketplace API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuctionEntry {
    fields: Map<String, Value>,
}

impl AuctionEntry {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Raw field access
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// The price value as sent by the API (number or string).
    pub fn price(&self) -> Option<&Value> {
        first_present(&self.fields, PRICE_KEYS)
    }

    /// Human-readable item descriptor, or `"Unknown item"`.
    pub fn item_name(&self) -> String {
        if let Some(item) = self.fields.get("item") {
            match item {
                Value::String(s) if !s.trim().is_empty() => return s.trim().to_string(),
                Value::Object(obj) => {
                    if let Some(name) = first_text(obj, ITEM_OBJECT_KEYS) {
                        return name;
                    }
                }
                _ => {}
            }
        }
        first_text(&self.fields, ITEM_NAME_KEYS).unwrap_or_else(|| "Unknown item".to_string())
    }

    /// Owner UUID in canonical form, if the entry names one.
    pub fn owner_uuid(&self) -> Option<String> {
        first_text(&self.fields, OWNER_KEYS)
            .map(|raw| normalize_uuid(&raw))
            .filter(|s| !s.is_empty())
    }

    /// Stack size; defaults to 1 when absent or unreadable.
    pub fn amount(&self) -> u64 {
        let top = first_present(&self.fields, AMOUNT_KEYS);
        let nested = match self.fields.get("item") {
            Some(Value::Object(obj)) => first_present(obj, &["amount", "count"]),
            _ => None,
        };
        top.or(nested).and_then(as_u64).unwrap_or(1)
    }

    /// Compact JSON form; this is what search matches against.
    pub fn serialized(&self) -> String {
        serde_json::to_string(&self.fields).unwrap_or_default()
    }
}

fn first_present<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| map.get(*k))
        .find(|v| !v.is_null())
}

fn first_text(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().filter_map(|k| map.get(*k)).find_map(|v| match v {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn as_u64(v: &Value) -> Option<u64> {
    match v {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Parse an auctions payload: either a bare array or `{ "auctions": [...] }`.
///
/// Elements that are not JSON objects are skipped.
pub fn parse_auctions(body: &str) -> Result<Vec<AuctionEntry>> {
    let value: Value = serde_json::from_str(body)?;
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut obj) => match obj.remove("auctions") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(Error::Payload(
                    "expected an array or an object with an `auctions` array".into(),
                ))
            }
        },
        _ => {
            return Err(Error::Payload(
                "expected an array or an object with an `auctions` array".into(),
            ))
        }
    };

    let total = items.len();
    let entries: Vec<AuctionEntry> = items
        .into_iter()
        .filter_map(|v| match v {
            Value::Object(fields) => Some(AuctionEntry::new(fields)),
            _ => None,
        })
        .collect();
    if entries.len() != total {
        log::debug!("skipped {} non-object auction entries", total - entries.len());
    }
    Ok(entries)
}

/// Owner UUIDs of `entries`, normalized and deduplicated in first-seen order.
pub fn unique_owners(entries: &[AuctionEntry]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    entries
        .iter()
        .filter_map(AuctionEntry::owner_uuid)
        .filter(|u| seen.insert(u.clone()))
        .collect()
}
