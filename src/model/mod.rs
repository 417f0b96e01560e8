//! Core data model for the hub.
//!
//! The hub stores three entity kinds plus a favorites set:
//!
//! - [`Message`]: a chat line shown in the chatroom feed
//! - [`Post`]: a titled code snippet browsed on the coderoom board
//! - [`Comment`]: a reply attached to a single post
//!
//! All entities are identified by an opaque [`EntityId`] and carry their
//! author and a creation timestamp. Validation lives next to each type;
//! construction is cheap and infallible so callers validate explicitly
//! before persisting.

pub mod comment;
pub mod id;
pub mod message;
pub mod post;

pub use comment::Comment;
pub use id::{now_millis, EntityId, IdGenerator};
pub use message::{validate_author, Message, MAX_AUTHOR_LENGTH, MAX_MESSAGE_LENGTH};
pub use post::{
    Post, PostDraft, DEFAULT_LANGUAGE, DEFAULT_SUBJECT, MAX_BODY_LENGTH, MAX_TAG_LENGTH,
    MAX_TITLE_LENGTH,
};
