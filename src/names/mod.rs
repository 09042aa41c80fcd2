//! UUID → display name resolution.
//!
//! Lookups go through the [`NameCache`] first; a miss asks the [`NameSource`].
//! A failed lookup is not retried: the UUID itself is cached as the name.

mod cache;
mod source;

pub use cache::NameCache;
pub use source::{HttpProfileSource, NameSource};

use crate::ident::normalize_uuid;
use crate::Result;
use futures::future::join_all;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

pub struct NameResolver {
    source: Box<dyn NameSource>,
    cache: Mutex<NameCache>,
    worker_limit: usize,
}

impl NameResolver {
    pub fn new(source: Box<dyn NameSource>, cache: NameCache, worker_limit: usize) -> Self {
        Self {
            source,
            cache: Mutex::new(cache),
            worker_limit: worker_limit.max(1),
        }
    }

    pub fn worker_limit(&self) -> usize {
        self.worker_limit
    }

    fn cache(&self) -> MutexGuard<'_, NameCache> {
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Cached name for `uuid`, without touching the network.
    pub fn cached(&self, uuid: &str) -> Option<String> {
        self.cache().get(&normalize_uuid(uuid)).map(str::to_string)
    }

    pub fn cached_count(&self) -> usize {
        self.cache().len()
    }

    /// Resolve one UUID. Never fails: an unreachable profile resolves to the UUID.
    pub async fn resolve(&self, raw: &str) -> String {
        let uuid = normalize_uuid(raw);
        if let Some(name) = self.cache().get(&uuid) {
            return name.to_string();
        }

        let name = match self.source.fetch_name(&uuid).await {
            Ok(name) => name,
            Err(e) => {
                log::debug!("name lookup for {} failed, using uuid: {}", uuid, e);
                uuid.clone()
            }
        };

        let mut cache = self.cache();
        cache.insert(uuid.clone(), name);
        // A concurrent lane may have cached first; report what the cache holds.
        cache.get(&uuid).map(str::to_string).unwrap_or(uuid)
    }

    /// Resolve every distinct UUID in `uuids` with `worker_limit` lanes.
    ///
    /// Each lane pulls the next index from a shared counter until the list is
    /// exhausted, so every distinct UUID is looked up exactly once. The cache
    /// is flushed once at the end.
    pub async fn resolve_all(&self, uuids: &[String]) -> HashMap<String, String> {
        let mut seen = HashSet::new();
        let unique: Vec<String> = uuids
            .iter()
            .map(|u| normalize_uuid(u))
            .filter(|u| !u.is_empty() && seen.insert(u.clone()))
            .collect();

        let next = AtomicUsize::new(0);
        let (next, unique) = (&next, &unique);
        let lanes = (0..self.worker_limit).map(move |_| async move {
            let mut resolved = Vec::new();
            loop {
                let idx = next.fetch_add(1, Ordering::SeqCst);
                let Some(uuid) = unique.get(idx) else { break };
                let name = self.resolve(uuid).await;
                resolved.push((uuid.clone(), name));
            }
            resolved
        });
        let names: HashMap<String, String> = join_all(lanes).await.into_iter().flatten().collect();

        log::info!(
            "resolved {} names ({} cached in total)",
            names.len(),
            self.cached_count()
        );
        if let Err(e) = self.flush() {
            log::warn!("{}", e);
        }
        names
    }

    /// Persist any names added since the last flush.
    pub fn flush(&self) -> Result<()> {
        self.cache().flush()
    }
}
