//! Chat messages.
//!
//! A message is the lightweight entity of the hub: a line of text from one
//! author, shown in the chatroom feed alongside posts and comments.

use crate::error::{DevhubError, Result};
use crate::model::id::EntityId;
use serde::{Deserialize, Serialize};

/// Maximum length of an author name in characters.
pub const MAX_AUTHOR_LENGTH: usize = 64;

/// Maximum length of a message body in bytes.
pub const MAX_MESSAGE_LENGTH: usize = 8 * 1024;

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique message identifier.
    pub id: EntityId,
    /// Name of the author.
    pub author: String,
    /// Message body.
    pub text: String,
    /// Creation time, milliseconds since the Unix epoch.
    pub timestamp: u64,
}

impl Message {
    /// Creates a new message.
    pub fn new(
        id: EntityId,
        author: impl Into<String>,
        text: impl Into<String>,
        timestamp: u64,
    ) -> Self {
        Self {
            id,
            author: author.into(),
            text: text.into(),
            timestamp,
        }
    }

    /// Validates the message fields.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the author or body is empty or exceeds
    /// the size limits.
    pub fn validate(&self) -> Result<()> {
        validate_author(&self.author)?;
        if self.text.trim().is_empty() {
            return Err(DevhubError::validation("Message text cannot be empty"));
        }
        if self.text.len() > MAX_MESSAGE_LENGTH {
            return Err(DevhubError::validation(format!(
                "Message text exceeds {} bytes",
                MAX_MESSAGE_LENGTH
            )));
        }
        Ok(())
    }
}

/// Validates an author name.
///
/// # Errors
///
/// Returns a validation error if the name is empty or too long.
pub fn validate_author(author: &str) -> Result<()> {
    if author.trim().is_empty() {
        return Err(DevhubError::validation("Author name cannot be empty"));
    }
    if author.chars().count() > MAX_AUTHOR_LENGTH {
        return Err(DevhubError::validation(format!(
            "Author name exceeds {} characters",
            MAX_AUTHOR_LENGTH
        )));
    }
    Ok(())
}
