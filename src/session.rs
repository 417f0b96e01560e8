//! Session and navigation state.
//!
//! A [`Session`] tracks everything about the running UI that is not entity
//! data: which of the three views is showing, which post is open, the
//! search queries and sort key, the subject filter, whether an edit is in
//! progress, and who the current user is. All transitions are total; they
//! normalize state instead of failing, so navigation can never leave the
//! session broken. In particular no transition checks that its target
//! still exists; the derivations resolve ids and render an explicit
//! missing state when they don't.

use crate::board::SortKey;
use crate::model::EntityId;

/// The three top-level views of the hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// The unified feed of messages, posts, and comments.
    #[default]
    Chatroom,
    /// The post board with subject list and card grid.
    Coderoom,
    /// One post with its comments.
    SinglePost,
}

/// Per-run UI state.
///
/// The current user is set at most once per session; later attempts are
/// ignored. The active post only exists in the single-post view, the
/// subject filter only in the coderoom, and the editing flag only ever
/// accompanies an active post.
#[derive(Debug, Clone, Default)]
pub struct Session {
    current_user: Option<String>,
    view: View,
    active_post: Option<EntityId>,
    selected_subject: Option<String>,
    editing: bool,
    /// Search text applied to the chatroom feed.
    pub chat_query: String,
    /// Search text applied to the coderoom board.
    pub post_query: String,
    /// Ordering of the coderoom board.
    pub sort: SortKey,
}

impl Session {
    /// Creates a fresh session showing the chatroom.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current user, if one has been set.
    pub fn current_user(&self) -> Option<&str> {
        self.current_user.as_deref()
    }

    /// Sets the current user if none is set yet.
    ///
    /// Returns `true` if the name was adopted, `false` if a user was
    /// already set and the call was ignored.
    pub fn set_user(&mut self, name: impl Into<String>) -> bool {
        if self.current_user.is_some() {
            return false;
        }
        self.current_user = Some(name.into());
        true
    }

    /// Returns the view currently showing.
    pub fn view(&self) -> View {
        self.view
    }

    /// Returns the id of the open post, if the single-post view is active.
    pub fn active_post(&self) -> Option<&EntityId> {
        self.active_post.as_ref()
    }

    /// Returns the coderoom's subject filter, `None` for all subjects.
    pub fn selected_subject(&self) -> Option<&str> {
        self.selected_subject.as_deref()
    }

    /// Whether an edit of the active post is in progress.
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Switches to the chatroom, clearing the open post, the subject
    /// filter, and any in-progress edit.
    pub fn go_chatroom(&mut self) {
        self.view = View::Chatroom;
        self.selected_subject = None;
        self.close_post();
    }

    /// Switches to the coderoom with `subject` as the filter, `None` for
    /// all subjects. Clears the open post and any in-progress edit.
    pub fn go_coderoom(&mut self, subject: Option<String>) {
        self.view = View::Coderoom;
        self.selected_subject = subject;
        self.close_post();
    }

    /// Opens `post_id` in the single-post view, clearing the subject
    /// filter.
    ///
    /// The id is not checked for existence here; a stale id renders as a
    /// missing-post state.
    pub fn go_single_post(&mut self, post_id: EntityId) {
        self.view = View::SinglePost;
        self.selected_subject = None;
        self.active_post = Some(post_id);
        self.editing = false;
    }

    /// Marks the active post as being edited.
    ///
    /// Does nothing when no post is open; the flag can never exist without
    /// an active post.
    pub fn begin_edit(&mut self) {
        if self.active_post.is_some() {
            self.editing = true;
        }
    }

    /// Clears the editing flag.
    pub fn end_edit(&mut self) {
        self.editing = false;
    }

    fn close_post(&mut self) {
        self.active_post = None;
        self.editing = false;
    }
}
