//! Entity identifiers and timestamps.
//!
//! Every entity carries an opaque string id. Ids are generated as
//! `{prefix}_{millis}_{seq}` where the sequence number disambiguates
//! entities created within the same millisecond; consumers must treat the
//! contents as opaque and only rely on uniqueness.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque unique identifier for a message, post, or comment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Wraps an existing id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Generates fresh entity ids for one application session.
///
/// The sequence counter lives for the process lifetime, so two entities
/// created in the same millisecond still get distinct ids.
#[derive(Debug, Default)]
pub struct IdGenerator {
    seq: u64,
}

impl IdGenerator {
    /// Creates a new generator starting at sequence zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates a fresh message id.
    pub fn message_id(&mut self) -> EntityId {
        self.next("msg")
    }

    /// Generates a fresh post id.
    pub fn post_id(&mut self) -> EntityId {
        self.next("post")
    }

    /// Generates a fresh comment id.
    pub fn comment_id(&mut self) -> EntityId {
        self.next("cmt")
    }

    fn next(&mut self, prefix: &str) -> EntityId {
        self.seq += 1;
        EntityId(format!("{}_{}_{}", prefix, now_millis(), self.seq))
    }
}

/// Returns the current time in milliseconds since the Unix epoch.
pub fn now_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let mut ids = IdGenerator::new();
        let a = ids.message_id();
        let b = ids.message_id();
        let c = ids.post_id();
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn test_id_prefixes() {
        let mut ids = IdGenerator::new();
        assert!(ids.message_id().as_str().starts_with("msg_"));
        assert!(ids.post_id().as_str().starts_with("post_"));
        assert!(ids.comment_id().as_str().starts_with("cmt_"));
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = EntityId::from("post_123_1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"post_123_1\"");
        let back: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_now_millis_is_monotonic_enough() {
        let a = now_millis();
        let b = now_millis();
        assert!(b >= a);
    }
}
