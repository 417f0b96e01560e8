//! Comments attached to posts.

use crate::error::{DevhubError, Result};
use crate::model::id::EntityId;
use crate::model::message::{validate_author, MAX_MESSAGE_LENGTH};
use serde::{Deserialize, Serialize};

/// A comment on a post.
///
/// Comments reference their parent post by id and share the message size
/// limits. Deleting a post deletes all of its comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Unique comment identifier.
    pub id: EntityId,
    /// Id of the post this comment belongs to.
    pub post_id: EntityId,
    /// Name of the author.
    pub author: String,
    /// Comment body.
    pub text: String,
    /// Creation time, milliseconds since the Unix epoch.
    pub timestamp: u64,
}

impl Comment {
    /// Creates a new comment.
    pub fn new(
        id: EntityId,
        post_id: EntityId,
        author: impl Into<String>,
        text: impl Into<String>,
        timestamp: u64,
    ) -> Self {
        Self {
            id,
            post_id,
            author: author.into(),
            text: text.into(),
            timestamp,
        }
    }

    /// Validates the comment fields.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the author or body is empty or the body
    /// exceeds the size limit.
    pub fn validate(&self) -> Result<()> {
        validate_author(&self.author)?;
        if self.text.trim().is_empty() {
            return Err(DevhubError::validation("Comment text cannot be empty"));
        }
        if self.text.len() > MAX_MESSAGE_LENGTH {
            return Err(DevhubError::validation(format!(
                "Comment text exceeds {} bytes",
                MAX_MESSAGE_LENGTH
            )));
        }
        Ok(())
    }
}
