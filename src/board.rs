//! Coderoom board derivations.
//!
//! The board shows the post collection two ways: a subject list for
//! drilling into one topic, and a card grid filtered by search text and
//! subject and ordered by a sort key. Both are pure functions over the
//! post collection; callers re-run them after every mutation.

use crate::model::{EntityId, Post};
use std::collections::BTreeSet;

/// The pseudo-subject selecting favorited posts.
///
/// It always closes the subject list and is matched by label, so a post
/// whose stored subject happens to be this literal is only reachable
/// through the favorites filter.
pub const FAVORITES_SUBJECT: &str = "Favorites";

/// Ordering applied to the board's card grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Newest first, by creation time.
    #[default]
    Latest,
    /// Oldest first, by creation time.
    Oldest,
    /// Alphabetical by title, case-insensitive.
    Alphabetical,
}

/// One entry on the board's card grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostCard<'a> {
    /// The post itself.
    pub post: &'a Post,
    /// Whether the current session has favorited this post.
    pub is_favorite: bool,
}

/// Derives the subject list: each distinct stored subject once, in the
/// order it first appears in the collection, closed by
/// [`FAVORITES_SUBJECT`].
///
/// Posts without a stored subject contribute no entry, and neither do
/// blank labels or the reserved [`FAVORITES_SUBJECT`] literal, so the
/// closing entry appears exactly once. Untagged cards still display the
/// default label, but the only way to see them together is the unfiltered
/// board, which matches how the subject list is meant to be used: as
/// shortcuts to labels users actually typed.
pub fn subjects(posts: &[Post]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut labels = Vec::new();
    for post in posts {
        if let Some(subject) = post
            .subject
            .as_deref()
            .filter(|s| !s.is_empty() && *s != FAVORITES_SUBJECT)
        {
            if seen.insert(subject) {
                labels.push(subject.to_string());
            }
        }
    }
    labels.push(FAVORITES_SUBJECT.to_string());
    labels
}

/// Filters posts by subject and search text, then orders them by `sort`.
///
/// The subject filter is `None` for all posts, [`FAVORITES_SUBJECT`] for
/// the favorites set, or any other label for posts whose stored subject
/// matches it exactly. The search text is matched case-insensitively
/// against the title; an empty query matches everything. Sorting is
/// stable, so equal keys keep the collection's insertion order.
pub fn filter_and_sort<'a>(
    posts: &'a [Post],
    favorites: &BTreeSet<EntityId>,
    subject: Option<&str>,
    query: &str,
    sort: SortKey,
) -> Vec<PostCard<'a>> {
    let needle = query.to_lowercase();
    let mut cards: Vec<PostCard<'a>> = posts
        .iter()
        .filter(|post| match subject {
            None => true,
            Some(FAVORITES_SUBJECT) => favorites.contains(&post.id),
            Some(label) => post.subject.as_deref() == Some(label),
        })
        .filter(|post| needle.is_empty() || post.title.to_lowercase().contains(&needle))
        .map(|post| PostCard {
            post,
            is_favorite: favorites.contains(&post.id),
        })
        .collect();
    match sort {
        SortKey::Latest => cards.sort_by_key(|c| std::cmp::Reverse(c.post.timestamp)),
        SortKey::Oldest => cards.sort_by_key(|c| c.post.timestamp),
        SortKey::Alphabetical => cards.sort_by_key(|c| c.post.title.to_lowercase()),
    }
    cards
}
