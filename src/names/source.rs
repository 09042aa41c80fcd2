//! Where display names come from when the cache misses.

use crate::client::{parse_endpoint, HttpClient};
use crate::ident::simple_uuid;
use crate::{Error, Result};
use async_trait::async_trait;
use serde::Deserialize;

/// Looks up the display name for a canonical UUID.
#[async_trait]
pub trait NameSource: Send + Sync {
    async fn fetch_name(&self, uuid: &str) -> Result<String>;
}

#[derive(Deserialize)]
struct Profile {
    name: Option<String>,
}

/// Profile API backed source: GETs the URL template and reads `{ "name": ... }`.
pub struct HttpProfileSource {
    http: HttpClient,
    template: String,
}

impl HttpProfileSource {
    /// `template` must contain `{uuid}` (undashed) or `{uuid_dashed}`.
    pub fn new(http: HttpClient, template: &str) -> Result<Self> {
        if !template.contains("{uuid}") && !template.contains("{uuid_dashed}") {
            return Err(Error::Config(format!(
                "profile URL {:?} has no {{uuid}} placeholder",
                template
            )));
        }
        parse_endpoint(&expand(template, "00000000-0000-0000-0000-000000000000"))?;

        Ok(Self {
            http,
            template: template.to_string(),
        })
    }

    pub fn url_for(&self, uuid: &str) -> String {
        expand(&self.template, uuid)
    }
}

fn expand(template: &str, uuid: &str) -> String {
    template
        .replace("{uuid_dashed}", uuid)
        .replace("{uuid}", &simple_uuid(uuid))
}

#[async_trait]
impl NameSource for HttpProfileSource {
    async fn fetch_name(&self, uuid: &str) -> Result<String> {
        let url = self.url_for(uuid);
        let body = self.http.get_text(&url).await?;
        let profile: Profile = serde_json::from_str(&body)?;
        profile
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| Error::Payload(format!("profile for {} has no name", uuid)))
    }
}
