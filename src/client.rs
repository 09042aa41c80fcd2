//! HTTP plumbing shared by the auctions fetcher and the profile lookups.

use crate::auction::{parse_auctions, AuctionEntry};
use crate::{BoardConfig, Error, Result};
use std::time::Duration;
use url::Url;

/// A configured async HTTP client. Cloning is cheap and shares the connection pool.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    user_agent: String,
}

impl HttpClient {
    pub fn new(config: &BoardConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
        })
    }

    /// GET `url` and return the body text. Non-success statuses are errors.
    pub async fn get_text(&self, url: &str) -> Result<String> {
        let resp = self
            .client
            .get(url)
            .header("User-Agent", self.user_agent.clone())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| Error::Network(format!("GET {} failed: {}", url, e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        resp.text()
            .await
            .map_err(|e| Error::Network(format!("Failed to read response body: {}", e)))
    }
}

/// Validate an absolute http(s) endpoint.
pub fn parse_endpoint(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| Error::Config(format!("bad URL {:?}: {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::Config(format!(
            "unsupported scheme {:?} in {}",
            other, raw
        ))),
    }
}

/// Fetches the auctions list.
#[derive(Clone)]
pub struct AuctionClient {
    http: HttpClient,
    url: Url,
}

impl AuctionClient {
    pub fn new(http: HttpClient, auctions_url: &str) -> Result<Self> {
        Ok(Self {
            http,
            url: parse_endpoint(auctions_url)?,
        })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    pub async fn fetch_auctions(&self) -> Result<Vec<AuctionEntry>> {
        let body = self.http.get_text(self.url.as_str()).await?;
        let entries = parse_auctions(&body)?;
        log::info!("fetched {} auctions from {}", entries.len(), self.url);
        Ok(entries)
    }
}
