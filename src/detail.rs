//! Single-post detail assembly.
//!
//! Opening a post gathers everything the detail view needs in one pass:
//! the post, its comments in ascending creation order, and the session's
//! relationship to it (favorite, ownership). Assembly is pure and total;
//! a vanished post yields `None` rather than an error so navigation can
//! degrade instead of failing.

use crate::model::{Comment, EntityId, Post};
use std::collections::BTreeSet;

/// Everything the single-post view renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDetail<'a> {
    /// The post being viewed.
    pub post: &'a Post,
    /// The post's comments, oldest first.
    pub comments: Vec<&'a Comment>,
    /// Whether the current session has favorited this post.
    pub is_favorite: bool,
    /// Whether the current user authored this post.
    pub is_mine: bool,
}

/// Assembles the detail view for `post_id`, or `None` if no such post
/// exists.
pub fn assemble_detail<'a>(
    post_id: &EntityId,
    posts: &'a [Post],
    comments: &'a [Comment],
    favorites: &BTreeSet<EntityId>,
    current_user: Option<&str>,
) -> Option<PostDetail<'a>> {
    let post = posts.iter().find(|p| &p.id == post_id)?;
    let mut post_comments: Vec<&'a Comment> =
        comments.iter().filter(|c| &c.post_id == post_id).collect();
    post_comments.sort_by_key(|c| c.timestamp);
    Some(PostDetail {
        post,
        comments: post_comments,
        is_favorite: favorites.contains(post_id),
        is_mine: current_user == Some(post.author.as_str()),
    })
}

/// Returns a copy of `favorites` with `post_id`'s membership flipped.
pub fn toggle_favorite(favorites: &BTreeSet<EntityId>, post_id: &EntityId) -> BTreeSet<EntityId> {
    let mut next = favorites.clone();
    if !next.remove(post_id) {
        next.insert(post_id.clone());
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PostDraft;

    fn create_test_post(id: &str, author: &str) -> Post {
        let draft = PostDraft {
            title: "t".to_string(),
            ..PostDraft::default()
        };
        Post::from_draft(EntityId::from(id), author, draft, 10)
    }

    fn create_test_comment(id: &str, post_id: &str, timestamp: u64) -> Comment {
        Comment::new(
            EntityId::from(id),
            EntityId::from(post_id),
            "bob",
            "hi",
            timestamp,
        )
    }

    #[test]
    fn test_missing_post_yields_none() {
        let detail = assemble_detail(
            &EntityId::from("post_9_9"),
            &[],
            &[],
            &BTreeSet::new(),
            None,
        );
        assert!(detail.is_none());
    }

    #[test]
    fn test_comments_filtered_and_oldest_first() {
        let posts = vec![create_test_post("post_1_1", "alice")];
        let comments = vec![
            create_test_comment("cmt_1_2", "post_1_1", 30),
            create_test_comment("cmt_1_3", "post_2_2", 20),
            create_test_comment("cmt_1_1", "post_1_1", 10),
        ];
        let detail = assemble_detail(
            &EntityId::from("post_1_1"),
            &posts,
            &comments,
            &BTreeSet::new(),
            None,
        )
        .unwrap();
        let ids: Vec<&str> = detail.comments.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["cmt_1_1", "cmt_1_2"]);
    }

    #[test]
    fn test_favorite_and_ownership_flags() {
        let posts = vec![create_test_post("post_1_1", "alice")];
        let favorites: BTreeSet<EntityId> = [EntityId::from("post_1_1")].into_iter().collect();
        let detail = assemble_detail(
            &EntityId::from("post_1_1"),
            &posts,
            &[],
            &favorites,
            Some("alice"),
        )
        .unwrap();
        assert!(detail.is_favorite);
        assert!(detail.is_mine);
    }

    #[test]
    fn test_toggle_is_an_involution() {
        let favorites = BTreeSet::new();
        let id = EntityId::from("post_1_1");
        let once = toggle_favorite(&favorites, &id);
        assert!(once.contains(&id));
        let twice = toggle_favorite(&once, &id);
        assert_eq!(twice, favorites);
    }
}
