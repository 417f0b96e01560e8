//! Code posts.
//!
//! A post is the heavyweight entity of the hub: a titled snippet with a
//! description, optional code, optional subject and language tags, and an
//! optional attached image. Posts are browsed on the coderoom board,
//! opened in a detail view, and may be edited in place or deleted.

use crate::error::{DevhubError, Result};
use crate::model::id::EntityId;
use crate::model::message::validate_author;
use serde::{Deserialize, Serialize};

/// Maximum length of a post title in characters.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length of a description or code body in bytes.
pub const MAX_BODY_LENGTH: usize = 64 * 1024;

/// Maximum length of a subject or language tag in characters.
pub const MAX_TAG_LENGTH: usize = 64;

/// Subject shown for posts that were created without one.
pub const DEFAULT_SUBJECT: &str = "General";

/// Language shown for posts that were created without one.
pub const DEFAULT_LANGUAGE: &str = "text";

/// A code post.
///
/// Optional fields are stored exactly as submitted; an absent or blank
/// subject and language fall back to [`DEFAULT_SUBJECT`] and
/// [`DEFAULT_LANGUAGE`] at read time via [`Post::subject_label`] and
/// [`Post::language_label`], so stored data stays faithful to user input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Unique post identifier.
    pub id: EntityId,
    /// Name of the author.
    pub author: String,
    /// Post title.
    pub title: String,
    /// Free-text description, possibly empty.
    pub description: String,
    /// The code snippet, if one was submitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Language tag, if one was submitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Subject tag, if one was submitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Opaque data reference for an attached image, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Creation time, milliseconds since the Unix epoch.
    pub timestamp: u64,
    /// Time of the most recent edit, if the post was ever edited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edited: Option<u64>,
}

/// The editable content of a post, as submitted through a compose or edit
/// form.
///
/// A draft carries no identity: the hub turns it into a [`Post`] on create,
/// or folds it into an existing post on edit. `image` is `None` when no new
/// image was chosen; on edit that keeps the existing image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    /// Post title.
    pub title: String,
    /// Free-text description, possibly empty.
    pub description: String,
    /// The code snippet, if one was entered.
    pub code: Option<String>,
    /// Language tag, if one was entered.
    pub language: Option<String>,
    /// Subject tag, if one was entered.
    pub subject: Option<String>,
    /// New image data reference, if one was attached.
    pub image: Option<String>,
}

impl Post {
    /// Creates a new post from a draft.
    pub fn from_draft(
        id: EntityId,
        author: impl Into<String>,
        draft: PostDraft,
        timestamp: u64,
    ) -> Self {
        Self {
            id,
            author: author.into(),
            title: draft.title,
            description: draft.description,
            code: draft.code,
            language: draft.language,
            subject: draft.subject,
            image: draft.image,
            timestamp,
            last_edited: None,
        }
    }

    /// Replaces the editable fields with the contents of `draft` and records
    /// the edit time.
    ///
    /// The image is only replaced when the draft carries a new one; author,
    /// id, and creation timestamp never change, so edits do not reorder any
    /// view.
    pub fn apply_draft(&mut self, draft: PostDraft, edited_at: u64) {
        self.title = draft.title;
        self.description = draft.description;
        self.code = draft.code;
        self.language = draft.language;
        self.subject = draft.subject;
        if let Some(image) = draft.image {
            self.image = Some(image);
        }
        self.last_edited = Some(edited_at);
    }

    /// Returns the subject to display, falling back to [`DEFAULT_SUBJECT`]
    /// when none is stored or the stored tag is blank.
    pub fn subject_label(&self) -> &str {
        self.subject
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SUBJECT)
    }

    /// Returns the language to display, falling back to [`DEFAULT_LANGUAGE`]
    /// when none is stored or the stored tag is blank.
    pub fn language_label(&self) -> &str {
        self.language
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_LANGUAGE)
    }

    /// Whether the post has been edited since creation.
    pub fn is_edited(&self) -> bool {
        self.last_edited.is_some()
    }

    /// Validates the post fields.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the author or title is empty or any
    /// field exceeds its size limit.
    pub fn validate(&self) -> Result<()> {
        validate_author(&self.author)?;
        validate_draft_fields(
            &self.title,
            &self.description,
            self.code.as_deref(),
            self.language.as_deref(),
            self.subject.as_deref(),
        )
    }
}

impl PostDraft {
    /// Normalizes form input: trims the title, and drops optional fields
    /// that are empty after trimming so they fall back to their defaults.
    ///
    /// Code is kept verbatim when non-blank since its whitespace is
    /// meaningful.
    pub fn normalize(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.code = self.code.filter(|c| !c.trim().is_empty());
        self.language = self
            .language
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());
        self.subject = self
            .subject
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        self
    }

    /// Validates the draft fields.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the title is empty or any field
    /// exceeds its size limit.
    pub fn validate(&self) -> Result<()> {
        validate_draft_fields(
            &self.title,
            &self.description,
            self.code.as_deref(),
            self.language.as_deref(),
            self.subject.as_deref(),
        )
    }
}

fn validate_draft_fields(
    title: &str,
    description: &str,
    code: Option<&str>,
    language: Option<&str>,
    subject: Option<&str>,
) -> Result<()> {
    if title.trim().is_empty() {
        return Err(DevhubError::validation("Post title cannot be empty"));
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(DevhubError::validation(format!(
            "Post title exceeds {} characters",
            MAX_TITLE_LENGTH
        )));
    }
    if description.len() > MAX_BODY_LENGTH {
        return Err(DevhubError::validation(format!(
            "Post description exceeds {} bytes",
            MAX_BODY_LENGTH
        )));
    }
    if let Some(code) = code {
        if code.len() > MAX_BODY_LENGTH {
            return Err(DevhubError::validation(format!(
                "Post code exceeds {} bytes",
                MAX_BODY_LENGTH
            )));
        }
    }
    for (name, value) in [("language", language), ("subject", subject)] {
        if let Some(value) = value {
            if value.chars().count() > MAX_TAG_LENGTH {
                return Err(DevhubError::validation(format!(
                    "Post {} exceeds {} characters",
                    name, MAX_TAG_LENGTH
                )));
            }
        }
    }
    Ok(())
}
