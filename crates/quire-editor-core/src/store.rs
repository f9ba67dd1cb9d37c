//! Durable storage for the document snapshot.
//!
//! A store holds at most one value per key. Saving overwrites whatever was
//! there; there is no versioning and no conflict detection.

use std::collections::HashMap;

use smol_str::{SmolStr, ToSmolStr};

use crate::error::StoreError;

/// Key/value storage for document snapshots.
///
/// Implementations must treat read failures as an absent value; only writes
/// can fail.
pub trait ContentStore {
    /// Read the snapshot stored under `key`, if any.
    fn load(&self, key: &str) -> Option<String>;

    /// Write `content` under `key`, replacing any previous snapshot.
    fn save(&mut self, key: &str, content: &str) -> Result<(), StoreError>;
}

impl<S: ContentStore + ?Sized> ContentStore for &mut S {
    fn load(&self, key: &str) -> Option<String> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, content: &str) -> Result<(), StoreError> {
        (**self).save(key, content)
    }
}

/// In-memory store, used natively and in tests.
///
/// An optional quota (total bytes across keys and values) reproduces the
/// failure mode of browser storage when a document grows too large.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<SmolStr, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that rejects writes once `quota` bytes would be used.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            entries: HashMap::new(),
            quota: Some(quota),
        }
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every snapshot, as clearing site data would.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn used_bytes_excluding(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl ContentStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, content: &str) -> Result<(), StoreError> {
        if let Some(quota) = self.quota {
            let needed = self.used_bytes_excluding(key) + key.len() + content.len();
            if needed > quota {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_smolstr(),
                    bytes: content.len(),
                });
            }
        }
        self.entries.insert(key.to_smolstr(), content.to_string());
        Ok(())
    }
}
