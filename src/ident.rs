//! Player identifier normalization.
//!
//! The auctions API and the profile API disagree on how UUIDs are written
//! (dashed, undashed, upper case). Every cache key goes through
//! [`normalize_uuid`] so one player maps to exactly one entry.

use uuid::Uuid;

/// Return the canonical lower-case dashed form of `raw`.
///
/// Input that does not parse as a UUID is returned trimmed but otherwise
/// unchanged, so the function is idempotent for any string.
pub fn normalize_uuid(raw: &str) -> String {
    let trimmed = raw.trim();
    match Uuid::parse_str(trimmed) {
        Ok(uuid) => uuid.hyphenated().to_string(),
        Err(_) => trimmed.to_string(),
    }
}

/// Undashed form, as used in profile lookup URLs. Non-UUID input passes through trimmed.
pub fn simple_uuid(raw: &str) -> String {
    let trimmed = raw.trim();
    match Uuid::parse_str(trimmed) {
        Ok(uuid) => uuid.simple().to_string(),
        Err(_) => trimmed.to_string(),
    }
}
