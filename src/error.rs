//! Error types for devhub operations.

use thiserror::Error;

/// Result type alias for devhub operations.
pub type Result<T> = std::result::Result<T, DevhubError>;

/// Main error type for devhub operations.
///
/// Nothing in the core is fatal: every variant is handled at its call site
/// and degrades to a visible, recoverable state (an empty view, a
/// notification, a re-prompt).
#[derive(Error, Debug)]
pub enum DevhubError {
    /// A referenced post, message, or comment no longer exists.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A required field was empty or a limit was exceeded; the mutation was
    /// rejected before touching any state.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An action requiring a display name was attempted with none set.
    /// The caller should prompt for a name and retry the action.
    #[error("Identity required: {0}")]
    Identity(String),

    /// The persistence backend failed. In-memory state stays authoritative.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A post submission is already waiting on an image read; further
    /// submissions are rejected until the pending read resolves.
    #[error("Submission pending: {0}")]
    Pending(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DevhubError {
    /// Creates a new not-found error.
    pub fn not_found<T: ToString>(msg: T) -> Self {
        Self::NotFound(msg.to_string())
    }

    /// Creates a new validation error.
    pub fn validation<T: ToString>(msg: T) -> Self {
        Self::Validation(msg.to_string())
    }

    /// Creates a new identity-required error.
    pub fn identity<T: ToString>(msg: T) -> Self {
        Self::Identity(msg.to_string())
    }

    /// Creates a new storage error.
    pub fn storage<T: ToString>(msg: T) -> Self {
        Self::Storage(msg.to_string())
    }

    /// Creates a new serialization error.
    pub fn serialization<T: ToString>(msg: T) -> Self {
        Self::Serialization(msg.to_string())
    }

    /// Creates a new pending-submission error.
    pub fn pending<T: ToString>(msg: T) -> Self {
        Self::Pending(msg.to_string())
    }
}
