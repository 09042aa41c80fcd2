//! Auctionboard
//!
//! A dashboard for marketplace auctions. It fetches the active auctions from a
//! remote API, resolves the sellers' player UUIDs to display names through a
//! profile API, keeps those names in a persistent cache, and renders the
//! listings as a searchable grid of cards (text or HTML).
//!
//! # Example
//!
//! ```no_run
//! use auctionboard::{BoardConfig, Dashboard};
//!
//! # async fn run() -> auctionboard::Result<()> {
//! let config = BoardConfig {
//!     auctions_url: "https://market.example.com/api/auctions".to_string(),
//!     ..Default::default()
//! };
//!
//! let mut board = Dashboard::new(config)?;
//! board.refresh().await;
//! board.set_search("diamond");
//! println!("{}", board.status_line());
//! for card in board.visible_cards() {
//!     println!("{} - {}", card.title, card.seller);
//! }
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

pub mod error;
pub use error::{Error, Result};

pub mod auction;
pub mod client;
pub mod dashboard;
pub mod ident;
pub mod names;
pub mod rendering;
pub mod search;

pub use auction::{parse_auctions, AuctionEntry};
pub use dashboard::{Dashboard, Status};
pub use ident::normalize_uuid;
pub use names::{HttpProfileSource, NameCache, NameResolver, NameSource};
pub use rendering::Card;

/// Default number of concurrent profile lookups.
pub const DEFAULT_WORKER_LIMIT: usize = 5;

/// Configuration for the dashboard
///
/// Defaults point at a local auctions endpoint and the public Mojang profile
/// service, with the name cache stored in the user's cache directory.
///
/// # Examples
///
/// ```
/// let cfg = auctionboard::BoardConfig::default();
/// assert_eq!(cfg.worker_limit, 5);
/// assert!(cfg.profile_url.contains("{uuid}"));
/// ```
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// Endpoint returning the auctions array (or `{ "auctions": [...] }`)
    pub auctions_url: String,
    /// Profile lookup URL. `{uuid}` is replaced by the undashed UUID and
    /// `{uuid_dashed}` by the canonical dashed form.
    pub profile_url: String,
    /// User agent string to send with requests
    pub user_agent: String,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
    /// Number of lanes resolving names concurrently
    pub worker_limit: usize,
    /// Cards emitted per rendering step
    pub chunk_size: usize,
    /// Cards per grid row in text output
    pub columns: usize,
    /// Width of a text card in characters
    pub card_width: usize,
    /// Quiet period before a search input is applied
    pub debounce_ms: u64,
    /// Where resolved names are persisted; `None` keeps them in memory only
    pub cache_path: Option<PathBuf>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            auctions_url: "http://127.0.0.1:8080/api/auctions".to_string(),
            profile_url: "https://sessionserver.mojang.com/session/minecraft/profile/{uuid}"
                .to_string(),
            user_agent: concat!("auctionboard/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_ms: 10000,
            worker_limit: DEFAULT_WORKER_LIMIT,
            chunk_size: 24,
            columns: 3,
            card_width: 34,
            debounce_ms: 250,
            cache_path: default_cache_path(),
        }
    }
}

/// `<cache dir>/auctionboard/names.json`, when the platform has a cache directory.
pub fn default_cache_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("auctionboard").join("names.json"))
}
