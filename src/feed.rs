//! Chatroom feed composition.
//!
//! The chatroom shows every entity in the hub as one chronological stream,
//! oldest first, with the newest item at the tail where the view scrolls
//! to. Composition is a pure function: it borrows the three entity
//! collections, applies the search query, tags each surviving item with
//! ownership, and sorts ascending by timestamp. Items with equal
//! timestamps keep a fixed kind order (messages, then posts, then
//! comments) and within a kind the collection's insertion order.

use crate::model::{Comment, EntityId, Message, Post};

/// A borrowed reference to any of the three entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedEntry<'a> {
    /// A chat message.
    Message(&'a Message),
    /// A code post.
    Post(&'a Post),
    /// A comment on a post.
    Comment(&'a Comment),
}

/// One item of the composed feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedItem<'a> {
    /// The underlying entity.
    pub entry: FeedEntry<'a>,
    /// Whether the entity's author is the current user.
    pub is_mine: bool,
}

impl<'a> FeedEntry<'a> {
    /// Returns the entity's id.
    pub fn id(&self) -> &'a EntityId {
        match self {
            FeedEntry::Message(m) => &m.id,
            FeedEntry::Post(p) => &p.id,
            FeedEntry::Comment(c) => &c.id,
        }
    }

    /// Returns the entity's author.
    pub fn author(&self) -> &'a str {
        match self {
            FeedEntry::Message(m) => &m.author,
            FeedEntry::Post(p) => &p.author,
            FeedEntry::Comment(c) => &c.author,
        }
    }

    /// Returns the entity's creation time.
    pub fn timestamp(&self) -> u64 {
        match self {
            FeedEntry::Message(m) => m.timestamp,
            FeedEntry::Post(p) => p.timestamp,
            FeedEntry::Comment(c) => c.timestamp,
        }
    }

    /// Returns a short label for the entity kind.
    pub fn kind(&self) -> &'static str {
        match self {
            FeedEntry::Message(_) => "message",
            FeedEntry::Post(_) => "post",
            FeedEntry::Comment(_) => "comment",
        }
    }

    fn matches(&self, needle: &str) -> bool {
        if self.author().to_lowercase().contains(needle) {
            return true;
        }
        match self {
            FeedEntry::Message(m) => m.text.to_lowercase().contains(needle),
            FeedEntry::Post(p) => {
                p.title.to_lowercase().contains(needle)
                    || p.description.to_lowercase().contains(needle)
            }
            FeedEntry::Comment(c) => c.text.to_lowercase().contains(needle),
        }
    }
}

/// Composes the chatroom feed from the three entity collections.
///
/// `query` is matched case-insensitively against each item's author and
/// text content; an empty query keeps everything. `current_user` marks
/// items as the session's own; with no user set nothing is marked. The
/// result is ascending by timestamp and stable on ties.
pub fn compose_feed<'a>(
    messages: &'a [Message],
    posts: &'a [Post],
    comments: &'a [Comment],
    query: &str,
    current_user: Option<&str>,
) -> Vec<FeedItem<'a>> {
    let needle = query.to_lowercase();
    let entries = messages
        .iter()
        .map(FeedEntry::Message)
        .chain(posts.iter().map(FeedEntry::Post))
        .chain(comments.iter().map(FeedEntry::Comment));
    let mut items: Vec<FeedItem<'a>> = entries
        .filter(|entry| needle.is_empty() || entry.matches(&needle))
        .map(|entry| FeedItem {
            is_mine: current_user == Some(entry.author()),
            entry,
        })
        .collect();
    items.sort_by_key(|item| item.entry.timestamp());
    items
}
