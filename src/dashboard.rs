//! The dashboard state: fetched entries, resolved names, search term, status.

use crate::auction::{unique_owners, AuctionEntry};
use crate::client::{AuctionClient, HttpClient};
use crate::names::{HttpProfileSource, NameCache, NameResolver, NameSource};
use crate::rendering::{render_document, render_incremental, Card, CardSink};
use crate::search::filter_entries;
use crate::{BoardConfig, Result};
use std::collections::HashMap;

/// Single user-facing message for any auctions fetch failure.
pub const LOAD_FAILED: &str = "Failed to load auctions";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    Loading,
    Loaded,
    Failed,
}

pub struct Dashboard {
    config: BoardConfig,
    auctions: AuctionClient,
    resolver: NameResolver,
    entries: Vec<AuctionEntry>,
    names: HashMap<String, String>,
    search: String,
    status: Status,
}

impl Dashboard {
    /// Build a dashboard with HTTP-backed auctions and profile lookups.
    pub fn new(config: BoardConfig) -> Result<Self> {
        let http = HttpClient::new(&config)?;
        let source = HttpProfileSource::new(http.clone(), &config.profile_url)?;
        Self::with_source(config, http, Box::new(source))
    }

    /// Build a dashboard with a custom name source.
    pub fn with_source(
        config: BoardConfig,
        http: HttpClient,
        source: Box<dyn NameSource>,
    ) -> Result<Self> {
        let auctions = AuctionClient::new(http, &config.auctions_url)?;
        let cache = match &config.cache_path {
            Some(path) => NameCache::load(path),
            None => NameCache::in_memory(),
        };
        let resolver = NameResolver::new(source, cache, config.worker_limit);

        Ok(Self {
            config,
            auctions,
            resolver,
            entries: Vec::new(),
            names: HashMap::new(),
            search: String::new(),
            status: Status::Idle,
        })
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn entries(&self) -> &[AuctionEntry] {
        &self.entries
    }

    pub fn resolver(&self) -> &NameResolver {
        &self.resolver
    }

    /// Re-fetch auctions and resolve their owners.
    ///
    /// On failure the previous entries are kept and the status becomes
    /// [`Status::Failed`]; the underlying error is only logged.
    pub async fn refresh(&mut self) {
        self.refresh_reporting(|_| {}).await;
    }

    /// Like [`Dashboard::refresh`], handing the loading status line to
    /// `report` before any request is sent.
    pub async fn refresh_reporting<F: FnOnce(&str)>(&mut self, report: F) {
        self.status = Status::Loading;
        report(&self.status_line());
        let entries = match self.auctions.fetch_auctions().await {
            Ok(entries) => entries,
            Err(e) => {
                log::error!("refresh from {} failed: {}", self.auctions.url(), e);
                self.status = Status::Failed;
                return;
            }
        };

        let owners = unique_owners(&entries);
        log::debug!("{} auctions, {} distinct owners", entries.len(), owners.len());
        let resolved = self.resolver.resolve_all(&owners).await;

        self.names.extend(resolved);
        self.entries = entries;
        self.status = Status::Loaded;
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.trim().to_string();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Cards for the entries matching the current search term.
    pub fn visible_cards(&self) -> Vec<Card> {
        filter_entries(&self.entries, &self.search)
            .into_iter()
            .map(|e| Card::from_entry(e, &self.names))
            .collect()
    }

    pub fn status_line(&self) -> String {
        match self.status {
            Status::Idle => "No auctions loaded".to_string(),
            Status::Loading => "Loading auctions...".to_string(),
            Status::Failed => LOAD_FAILED.to_string(),
            Status::Loaded => format!(
                "Showing {} of {} auctions",
                filter_entries(&self.entries, &self.search).len(),
                self.entries.len()
            ),
        }
    }

    /// Stream the visible cards into `sink` chunk by chunk.
    pub async fn render_to<S: CardSink + ?Sized>(&self, sink: &mut S) -> Result<usize> {
        let cards = self.visible_cards();
        render_incremental(&cards, self.config.chunk_size, sink).await
    }

    pub fn render_html(&self) -> String {
        render_document(&self.visible_cards(), &self.status_line(), &self.search)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use async_trait::async_trait;

    struct Fixed;

    #[async_trait]
    impl NameSource for Fixed {
        async fn fetch_name(&self, uuid: &str) -> Result<String> {
            if uuid.starts_with("069a79f4") {
                Ok("Notch".to_string())
            } else {
                Err(Error::Network("no profile".into()))
            }
        }
    }

    fn board(url: String) -> Dashboard {
        let config = BoardConfig {
            auctions_url: url,
            cache_path: None,
            ..Default::default()
        };
        let http = HttpClient::new(&config).unwrap();
        Dashboard::with_source(config, http, Box::new(Fixed)).unwrap()
    }

    fn serve(responses: Vec<(u16, &'static str)>) -> String {
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr();
        std::thread::spawn(move || {
            for (status, body) in responses {
                if let Ok(request) = server.recv() {
                    let _ = request
                        .respond(tiny_http::Response::from_string(body).with_status_code(status));
                }
            }
        });
        format!("http://{}/auctions", addr)
    }

    const AUCTIONS: &str = r#"[
        {"item": "Diamond", "price": 1200, "seller": "069a79f444e94726a5befca90e38aaf5"},
        {"item": "Dirt", "price": 1, "seller": "853c80ef3c3749fdaa49938b674adae6"}
    ]"#;

    #[tokio::test]
    async fn refresh_loads_and_resolves() {
        let mut board = board(serve(vec![(200, AUCTIONS)]));
        assert_eq!(board.status(), Status::Idle);
        board.refresh().await;
        assert_eq!(board.status(), Status::Loaded);
        assert_eq!(board.status_line(), "Showing 2 of 2 auctions");

        let cards = board.visible_cards();
        assert_eq!(cards[0].seller, "Notch");
        assert_eq!(cards[1].seller, "853c80ef-3c37-49fd-aa49-938b674adae6");
    }

    #[tokio::test]
    async fn loading_line_is_reported_before_fetch() {
        let mut board = board(serve(vec![(200, AUCTIONS)]));
        let mut seen = None;
        board
            .refresh_reporting(|line| seen = Some(line.to_string()))
            .await;
        assert_eq!(seen.as_deref(), Some("Loading auctions..."));
        assert_eq!(board.status(), Status::Loaded);
    }

    #[tokio::test]
    async fn search_narrows_cards() {
        let mut board = board(serve(vec![(200, AUCTIONS)]));
        board.refresh().await;
        board.set_search("  DIAM ");
        assert_eq!(board.visible_cards().len(), 1);
        assert_eq!(board.status_line(), "Showing 1 of 2 auctions");
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_entries() {
        let mut board = board(serve(vec![(200, AUCTIONS), (500, "boom")]));
        board.refresh().await;
        board.refresh().await;
        assert_eq!(board.status(), Status::Failed);
        assert_eq!(board.status_line(), LOAD_FAILED);
        assert_eq!(board.entries().len(), 2);
    }

    #[tokio::test]
    async fn html_reflects_search_and_status() {
        let mut board = board(serve(vec![(200, AUCTIONS)]));
        board.refresh().await;
        board.set_search("dirt");
        let page = board.render_html();
        assert!(page.contains("Showing 1 of 2 auctions"));
        assert!(page.contains("<h3>Dirt</h3>"));
        assert!(!page.contains("<h3>Diamond</h3>"));
    }
}
