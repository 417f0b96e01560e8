//! # devhub - local developer hub
//!
//! A local-first developer hub: one chat stream interleaved with code posts
//! and their comments, persisted on disk and re-derived into three views
//! (chatroom feed, coderoom board, single-post detail).
//!
//! ## Features
//!
//! - **Unified feed**: messages, posts, and comments merged into one
//!   chronological, searchable timeline
//! - **Coderoom board**: posts grouped by subject, filterable and sortable,
//!   with a favorites star
//! - **Durable local storage**: every mutation persists synchronously to an
//!   embedded database; loads degrade to empty instead of failing
//! - **Consistent by construction**: views are pure derivations re-run
//!   after every mutation, and deleting a post cascades to its comments and
//!   favorite membership
//!
//! ## Examples
//!
//! ### Posting and reading the feed
//!
//! ```rust
//! use devhub::hub::{Hub, ViewState};
//! use devhub::store::MemoryStore;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut hub = Hub::open(MemoryStore::new());
//! hub.set_username("alice")?;
//! hub.post_message("shipping tonight")?;
//! if let ViewState::Chatroom { items } = hub.view() {
//!     assert_eq!(items.len(), 1);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### Browsing posts by subject
//!
//! ```rust
//! use devhub::hub::{Hub, ViewState};
//! use devhub::model::PostDraft;
//! use devhub::store::MemoryStore;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut hub = Hub::open(MemoryStore::new());
//! hub.set_username("alice")?;
//! hub.submit_post(PostDraft {
//!     title: "Two-pointer tricks".to_string(),
//!     subject: Some("Algorithms".to_string()),
//!     ..PostDraft::default()
//! })?;
//! hub.go_coderoom(Some("Algorithms".to_string()));
//! if let ViewState::Coderoom { cards, .. } = hub.view() {
//!     assert_eq!(cards.len(), 1);
//! }
//! # Ok(())
//! # }
//! ```

pub mod board;
pub mod cli;
pub mod detail;
pub mod error;
pub mod feed;
pub mod hub;
pub mod model;
pub mod render;
pub mod session;
pub mod store;

pub use error::{DevhubError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
