//! Persistent storage for the hub.
//!
//! The hub persists five values under fixed keys: the three entity
//! collections, the favorites set, and the saved username. Each value is
//! written whole on every mutation; there is no partial update.
//!
//! ## Architecture
//!
//! - [`StoreBackend`]: raw byte-level load/save, implemented by
//!   [`RocksStore`] for durable data and [`MemoryStore`] for tests and
//!   ephemeral runs
//! - [`HubStore`]: the typed layer that serializes collections as JSON and
//!   absorbs read failures
//!
//! Reads never fail upward: a missing, unreadable, or malformed value loads
//! as the empty collection with a logged warning, so one corrupt record
//! cannot take the application down. Writes do fail upward; the caller
//! decides how to surface that.

pub mod memory;
pub mod rocksdb;

pub use memory::MemoryStore;
pub use rocksdb::RocksStore;

use crate::error::{DevhubError, Result};
use crate::model::{Comment, EntityId, Message, Post};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// The fixed set of keys the hub stores data under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    /// The chat message collection.
    Messages,
    /// The code post collection.
    Posts,
    /// The comment collection.
    Comments,
    /// The set of favorited post ids.
    Favorites,
    /// The saved username.
    Username,
}

impl StoreKey {
    /// All keys, in load order.
    pub const ALL: [StoreKey; 5] = [
        StoreKey::Messages,
        StoreKey::Posts,
        StoreKey::Comments,
        StoreKey::Favorites,
        StoreKey::Username,
    ];

    /// Returns the key's stable on-disk name.
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKey::Messages => "messages",
            StoreKey::Posts => "posts",
            StoreKey::Comments => "comments",
            StoreKey::Favorites => "favorites",
            StoreKey::Username => "username",
        }
    }
}

/// Raw byte-level persistence.
///
/// Implementations store opaque byte values under [`StoreKey`]s. They do
/// not interpret the bytes; serialization lives in [`HubStore`].
pub trait StoreBackend {
    /// Loads the bytes stored under `key`, or `None` if nothing is stored.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the underlying medium fails.
    fn load(&self, key: StoreKey) -> Result<Option<Vec<u8>>>;

    /// Stores `bytes` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a storage error when the underlying medium fails.
    fn save(&mut self, key: StoreKey, bytes: &[u8]) -> Result<()>;
}

/// Typed persistence for the hub's collections.
///
/// Wraps a [`StoreBackend`] and handles JSON serialization. Collection
/// loads degrade to empty on any failure; saves propagate errors.
#[derive(Debug)]
pub struct HubStore<B> {
    backend: B,
}

impl<B: StoreBackend> HubStore<B> {
    /// Wraps a backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Loads the message collection, empty on any failure.
    pub fn load_messages(&self) -> Vec<Message> {
        self.load_collection(StoreKey::Messages)
    }

    /// Persists the message collection.
    ///
    /// # Errors
    ///
    /// Returns an error when serialization or the backend write fails.
    pub fn save_messages(&mut self, messages: &[Message]) -> Result<()> {
        self.save_collection(StoreKey::Messages, messages)
    }

    /// Loads the post collection, empty on any failure.
    pub fn load_posts(&self) -> Vec<Post> {
        self.load_collection(StoreKey::Posts)
    }

    /// Persists the post collection.
    ///
    /// # Errors
    ///
    /// Returns an error when serialization or the backend write fails.
    pub fn save_posts(&mut self, posts: &[Post]) -> Result<()> {
        self.save_collection(StoreKey::Posts, posts)
    }

    /// Loads the comment collection, empty on any failure.
    pub fn load_comments(&self) -> Vec<Comment> {
        self.load_collection(StoreKey::Comments)
    }

    /// Persists the comment collection.
    ///
    /// # Errors
    ///
    /// Returns an error when serialization or the backend write fails.
    pub fn save_comments(&mut self, comments: &[Comment]) -> Result<()> {
        self.save_collection(StoreKey::Comments, comments)
    }

    /// Loads the favorites set, empty on any failure.
    pub fn load_favorites(&self) -> BTreeSet<EntityId> {
        match self.load_value::<Vec<EntityId>>(StoreKey::Favorites) {
            Some(ids) => ids.into_iter().collect(),
            None => BTreeSet::new(),
        }
    }

    /// Persists the favorites set.
    ///
    /// # Errors
    ///
    /// Returns an error when serialization or the backend write fails.
    pub fn save_favorites(&mut self, favorites: &BTreeSet<EntityId>) -> Result<()> {
        let ids: Vec<&EntityId> = favorites.iter().collect();
        self.save_value(StoreKey::Favorites, &ids)
    }

    /// Loads the saved username, `None` if absent or unreadable.
    pub fn load_username(&self) -> Option<String> {
        let bytes = match self.backend.load(StoreKey::Username) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                warn!(key = StoreKey::Username.as_str(), error = %e, "load failed, treating as unset");
                return None;
            }
        };
        match String::from_utf8(bytes) {
            Ok(name) if !name.is_empty() => Some(name),
            Ok(_) => None,
            Err(e) => {
                warn!(key = StoreKey::Username.as_str(), error = %e, "stored username is not UTF-8, treating as unset");
                None
            }
        }
    }

    /// Persists the username.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend write fails.
    pub fn save_username(&mut self, name: &str) -> Result<()> {
        self.backend.save(StoreKey::Username, name.as_bytes())
    }

    fn load_collection<T: DeserializeOwned>(&self, key: StoreKey) -> Vec<T> {
        self.load_value::<Vec<T>>(key).unwrap_or_default()
    }

    fn save_collection<T: Serialize>(&mut self, key: StoreKey, items: &[T]) -> Result<()> {
        self.save_value(key, &items)
    }

    fn load_value<T: DeserializeOwned>(&self, key: StoreKey) -> Option<T> {
        let bytes = match self.backend.load(key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                warn!(key = key.as_str(), error = %e, "load failed, treating as empty");
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(value) => {
                debug!(key = key.as_str(), bytes = bytes.len(), "loaded collection");
                Some(value)
            }
            Err(e) => {
                warn!(key = key.as_str(), error = %e, "stored data is malformed, treating as empty");
                None
            }
        }
    }

    fn save_value<T: Serialize>(&mut self, key: StoreKey, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec(value).map_err(|e| {
            DevhubError::serialization(format!("Failed to serialize {}: {}", key.as_str(), e))
        })?;
        self.backend.save(key, &bytes)?;
        debug!(key = key.as_str(), bytes = bytes.len(), "saved collection");
        Ok(())
    }
}
