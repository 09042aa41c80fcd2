//! Persistent UUID → display name cache.
//!
//! Stored as a flat JSON object on disk. Entries are only ever added: the
//! first name recorded for a UUID wins and nothing expires.

use crate::ident::normalize_uuid;
use crate::{Error, Result};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct NameCache {
    path: Option<PathBuf>,
    names: BTreeMap<String, String>,
    dirty: bool,
}

impl NameCache {
    /// A cache that is never written to disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load the cache document at `path`.
    ///
    /// Keys are normalized as they are read; when two keys name the same
    /// player, the one earlier in the document wins.
    ///
    /// A missing file yields an empty cache. An unreadable or malformed file is
    /// logged and also yields an empty cache; it is overwritten on the next flush.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let names = match std::fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<Map<String, Value>>(&text) {
                Ok(raw) => {
                    let mut names = BTreeMap::new();
                    for (uuid, name) in raw {
                        match name {
                            Value::String(name) => {
                                names.entry(normalize_uuid(&uuid)).or_insert(name);
                            }
                            other => log::debug!("skipping cached {}: {}", uuid, other),
                        }
                    }
                    names
                }
                Err(e) => {
                    log::warn!("ignoring malformed name cache {}: {}", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                log::warn!("could not read name cache {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };
        log::debug!("loaded {} cached names from {}", names.len(), path.display());

        Self {
            path: Some(path),
            names,
            dirty: false,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get(&self, uuid: &str) -> Option<&str> {
        self.names.get(uuid).map(String::as_str)
    }

    pub fn contains(&self, uuid: &str) -> bool {
        self.names.contains_key(uuid)
    }

    /// Record `name` for `uuid` unless one is already cached. Returns whether it was added.
    pub fn insert(&mut self, uuid: impl Into<String>, name: impl Into<String>) -> bool {
        match self.names.entry(uuid.into()) {
            std::collections::btree_map::Entry::Occupied(_) => false,
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(name.into());
                self.dirty = true;
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write the document if anything was added since the last flush.
    pub fn flush(&mut self) -> Result<()> {
        let path = match (&self.path, self.dirty) {
            (Some(path), true) => path,
            _ => return Ok(()),
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    Error::Cache(format!("Failed to create {}: {}", parent.display(), e))
                })?;
            }
        }

        let json = serde_json::to_string_pretty(&self.names)
            .map_err(|e| Error::Cache(format!("Failed to serialize cache: {}", e)))?;
        std::fs::write(path, json)
            .map_err(|e| Error::Cache(format!("Failed to write {}: {}", path.display(), e)))?;

        log::debug!("persisted {} names to {}", self.names.len(), path.display());
        self.dirty = false;
        Ok(())
    }
}
