//! Query cache
//!
//! Read results are cached under a structured key instead of the ad hoc
//! credential-plus-path strings the remote API paths would suggest. An entry
//! stays fresh until a mutation invalidates it; there is no TTL and no
//! background refetch. The whole cache is dropped when the credential
//! changes.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Identity of a cached read, one variant per resource listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// All categories of the user
    Categories,
    /// A single category
    Category(i64),
    /// Every deck across categories
    AllDecks,
    /// The decks of one category
    Decks { category_id: i64 },
    /// The cards of one deck
    Cards { deck_id: i64 },
}

/// In-memory cache of the last successful read per key
#[derive(Default)]
pub struct QueryCache {
    entries: RwLock<HashMap<CacheKey, Value>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch and deserialize the cached value for a key, if present
    pub fn get<T: DeserializeOwned>(&self, key: CacheKey) -> Option<T> {
        let entries = self.entries.read();
        let value = entries.get(&key)?;
        match serde_json::from_value(value.clone()) {
            Ok(parsed) => {
                debug!("Cache hit for {:?}", key);
                Some(parsed)
            }
            Err(err) => {
                debug!("Dropping undeserializable cache entry {:?}: {}", key, err);
                None
            }
        }
    }

    /// Store the result of a successful read
    pub fn insert<T: Serialize>(&self, key: CacheKey, value: &T) {
        match serde_json::to_value(value) {
            Ok(value) => {
                self.entries.write().insert(key, value);
            }
            Err(err) => {
                debug!("Refusing to cache unserializable value {:?}: {}", key, err);
            }
        }
    }

    /// Drop every listed key
    pub fn invalidate(&self, keys: &[CacheKey]) {
        let mut entries = self.entries.write();
        for key in keys {
            if entries.remove(key).is_some() {
                debug!("Invalidated cache entry {:?}", key);
            }
        }
    }

    /// Drop every key matching a predicate
    pub fn invalidate_where(&self, predicate: impl Fn(&CacheKey) -> bool) {
        self.entries.write().retain(|key, _| !predicate(key));
    }

    /// Drop everything, used when the credential changes
    pub fn clear(&self) {
        self.entries.write().clear();
        debug!("Cache cleared");
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
