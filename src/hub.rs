//! Application core.
//!
//! [`Hub`] owns the four entity collections, the session, and the store,
//! and funnels every mutation through one discipline: validate, mutate the
//! in-memory state, persist the affected collections, and let the caller
//! re-derive the active view. In-memory state is the source of truth for
//! the whole run; persistence is best-effort durability, so a failed save
//! is recorded and surfaced but never rolls a mutation back.
//!
//! ## Identity
//!
//! Creating content stamps the current user as author, so creation with no
//! user set fails with an identity error; the caller is expected to prompt
//! for a name, set it, and retry. Edits, deletes, and favorite toggles do
//! not need a name. No mutation checks ownership: this is a single-user
//! hub and authorship is presentation, not access control.
//!
//! ## Deferred submissions
//!
//! Attaching an image makes a post submission asynchronous: the draft is
//! parked until [`Hub::image_ready`] delivers the data reference, and only
//! then does the create or edit commit. At most one submission can be
//! parked; further post submissions are refused until the pending one
//! resolves. There is no cancellation.

use crate::board::{self, PostCard, SortKey};
use crate::detail::{self, PostDetail};
use crate::error::{DevhubError, Result};
use crate::feed::{self, FeedItem};
use crate::model::{
    now_millis, validate_author, Comment, EntityId, IdGenerator, Message, Post, PostDraft,
};
use crate::session::{Session, View};
use crate::store::{HubStore, StoreBackend};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// What the active view renders, derived fresh from the current state.
#[derive(Debug)]
pub enum ViewState<'a> {
    /// The chatroom feed.
    Chatroom {
        /// Matching feed items, oldest first.
        items: Vec<FeedItem<'a>>,
    },
    /// The coderoom board.
    Coderoom {
        /// Subject labels for the sidebar, ending with the favorites
        /// pseudo-subject.
        subjects: Vec<String>,
        /// Matching post cards in the selected order.
        cards: Vec<PostCard<'a>>,
    },
    /// One post with its comments.
    SinglePost {
        /// The assembled detail.
        detail: PostDetail<'a>,
    },
    /// The open post no longer exists.
    PostMissing {
        /// The id that failed to resolve.
        post_id: &'a EntityId,
    },
}

/// A post submission parked until its image data reference arrives.
#[derive(Debug, Clone)]
struct PendingSubmission {
    draft: PostDraft,
    mode: SubmitMode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SubmitMode {
    Create,
    Edit(EntityId),
}

/// The application core: entity collections, session, and store.
#[derive(Debug)]
pub struct Hub<B> {
    store: HubStore<B>,
    messages: Vec<Message>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
    favorites: BTreeSet<EntityId>,
    session: Session,
    ids: IdGenerator,
    pending: Option<PendingSubmission>,
    last_save_error: Option<String>,
}

impl<B: StoreBackend> Hub<B> {
    /// Opens the hub over a backend, loading all persisted state.
    ///
    /// Loads degrade to empty collections, so opening never fails even
    /// over a corrupt store. Favorites pointing at posts that no longer
    /// exist are pruned on the spot. A previously saved username becomes
    /// the session's user.
    pub fn open(backend: B) -> Self {
        let store = HubStore::new(backend);
        let messages = store.load_messages();
        let posts = store.load_posts();
        let comments = store.load_comments();
        let mut favorites = store.load_favorites();

        let live: BTreeSet<&EntityId> = posts.iter().map(|p| &p.id).collect();
        let dangling = favorites.len();
        favorites.retain(|id| live.contains(id));
        let dangling = dangling - favorites.len();
        if dangling > 0 {
            warn!(pruned = dangling, "dropped favorites pointing at missing posts");
        }

        let mut session = Session::new();
        if let Some(name) = store.load_username() {
            session.set_user(name);
        }

        info!(
            messages = messages.len(),
            posts = posts.len(),
            comments = comments.len(),
            favorites = favorites.len(),
            "hub opened"
        );

        Self {
            store,
            messages,
            posts,
            comments,
            favorites,
            session,
            ids: IdGenerator::new(),
            pending: None,
            last_save_error: None,
        }
    }

    /// Returns the session state.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Returns all messages in insertion order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns all posts in insertion order.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Returns all comments in insertion order.
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Returns the favorited post ids.
    pub fn favorites(&self) -> &BTreeSet<EntityId> {
        &self.favorites
    }

    /// Looks up a post by id.
    pub fn post(&self, id: &EntityId) -> Option<&Post> {
        self.posts.iter().find(|p| &p.id == id)
    }

    /// Whether a post submission is parked waiting for its image.
    pub fn is_submission_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Takes the most recent save failure, if one happened since the last
    /// call. In-memory state is unaffected by save failures.
    pub fn take_save_error(&mut self) -> Option<String> {
        self.last_save_error.take()
    }

    /// Sets the display name for this session and persists it.
    ///
    /// The first successful call wins; once a user is set, further calls
    /// are ignored. The username is saved on its own, outside the
    /// mutation-triggered save path.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty or oversized name.
    pub fn set_username(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        validate_author(name)?;
        if !self.session.set_user(name) {
            debug!("username already set, ignoring");
            return Ok(());
        }
        if let Err(e) = self.store.save_username(name) {
            self.note_save_failure(e);
        }
        info!(user = name, "username set");
        Ok(())
    }

    /// Creates a chat message authored by the current user. The text is
    /// stored exactly as typed; only an all-whitespace body is rejected.
    ///
    /// # Errors
    ///
    /// Returns an identity error when no user is set, or a validation
    /// error for empty or oversized text. Nothing is stored on failure.
    pub fn post_message(&mut self, text: &str) -> Result<EntityId> {
        let author = self.require_user()?;
        let message = Message::new(self.ids.message_id(), author, text, now_millis());
        message.validate()?;
        let id = message.id.clone();
        self.messages.push(message);
        self.persist_messages();
        debug!(id = %id, "message posted");
        Ok(id)
    }

    /// Deletes a message by id.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when no such message exists.
    pub fn delete_message(&mut self, id: &EntityId) -> Result<()> {
        let before = self.messages.len();
        self.messages.retain(|m| &m.id != id);
        if self.messages.len() == before {
            return Err(DevhubError::not_found(format!("No message {}", id)));
        }
        self.persist_messages();
        debug!(id = %id, "message deleted");
        Ok(())
    }

    /// Creates a comment on an existing post, authored by the current
    /// user. Like messages, the text is stored exactly as typed.
    ///
    /// # Errors
    ///
    /// Returns an identity error when no user is set, a not-found error
    /// when the post does not exist, or a validation error for empty or
    /// oversized text.
    pub fn add_comment(&mut self, post_id: &EntityId, text: &str) -> Result<EntityId> {
        let author = self.require_user()?;
        if self.post(post_id).is_none() {
            return Err(DevhubError::not_found(format!("No post {}", post_id)));
        }
        let comment = Comment::new(
            self.ids.comment_id(),
            post_id.clone(),
            author,
            text,
            now_millis(),
        );
        comment.validate()?;
        let id = comment.id.clone();
        self.comments.push(comment);
        self.persist_comments();
        debug!(id = %id, post = %post_id, "comment added");
        Ok(id)
    }

    /// Deletes a comment by id.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when no such comment exists.
    pub fn delete_comment(&mut self, id: &EntityId) -> Result<()> {
        let before = self.comments.len();
        self.comments.retain(|c| &c.id != id);
        if self.comments.len() == before {
            return Err(DevhubError::not_found(format!("No comment {}", id)));
        }
        self.persist_comments();
        debug!(id = %id, "comment deleted");
        Ok(())
    }

    /// Submits a post draft without an image attachment.
    ///
    /// With an edit in progress the draft replaces the active post's
    /// content; otherwise a new post is created by the current user.
    /// Returns the affected post's id.
    ///
    /// # Errors
    ///
    /// Returns a pending error while an image submission is parked, an
    /// identity error when creating with no user set, a validation error
    /// for a bad draft, or a not-found error when the post being edited
    /// vanished.
    pub fn submit_post(&mut self, draft: PostDraft) -> Result<EntityId> {
        self.refuse_while_pending()?;
        let mode = self.submit_mode();
        self.commit_post(draft, mode)
    }

    /// Parks a post draft until its image arrives via
    /// [`Hub::image_ready`].
    ///
    /// Whether the submission creates or edits is decided now, from the
    /// session's edit state; the parked draft is neither persisted nor
    /// visible in any derived view until it commits.
    ///
    /// # Errors
    ///
    /// Returns a pending error when a submission is already parked, an
    /// identity error when creating with no user set, or a validation
    /// error for a bad draft. Nothing is parked on failure.
    pub fn submit_post_with_image(&mut self, draft: PostDraft) -> Result<()> {
        self.refuse_while_pending()?;
        let mode = self.submit_mode();
        if mode == SubmitMode::Create {
            self.require_user()?;
        }
        let draft = draft.normalize();
        draft.validate()?;
        self.pending = Some(PendingSubmission { draft, mode });
        debug!("post submission parked until image is ready");
        Ok(())
    }

    /// Delivers the image data reference for the parked submission and
    /// commits it. Returns the affected post's id.
    ///
    /// # Errors
    ///
    /// Returns a pending error when nothing is parked, or a not-found
    /// error when the post being edited was deleted in the meantime. The
    /// parked submission is consumed either way.
    pub fn image_ready(&mut self, reference: String) -> Result<EntityId> {
        let PendingSubmission { mut draft, mode } = self
            .pending
            .take()
            .ok_or_else(|| DevhubError::pending("No submission is waiting for an image"))?;
        draft.image = Some(reference);
        self.commit_post(draft, mode)
    }

    /// Deletes a post together with its comments and favorite membership.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when no such post exists.
    pub fn delete_post(&mut self, id: &EntityId) -> Result<()> {
        let before = self.posts.len();
        self.posts.retain(|p| &p.id != id);
        if self.posts.len() == before {
            return Err(DevhubError::not_found(format!("No post {}", id)));
        }
        let comments_before = self.comments.len();
        self.comments.retain(|c| &c.post_id != id);
        let cascaded = comments_before - self.comments.len();
        let was_favorite = self.favorites.remove(id);

        self.persist_posts();
        if cascaded > 0 {
            self.persist_comments();
        }
        if was_favorite {
            self.persist_favorites();
        }
        info!(id = %id, comments = cascaded, "post deleted with cascade");
        Ok(())
    }

    /// Flips a post's membership in the favorites set. Returns `true` when
    /// the post is a favorite afterwards.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when no such post exists, keeping the
    /// favorites set a subset of the live posts.
    pub fn toggle_favorite(&mut self, post_id: &EntityId) -> Result<bool> {
        if self.post(post_id).is_none() {
            return Err(DevhubError::not_found(format!("No post {}", post_id)));
        }
        self.favorites = detail::toggle_favorite(&self.favorites, post_id);
        let now_favorite = self.favorites.contains(post_id);
        self.persist_favorites();
        debug!(id = %post_id, favorite = now_favorite, "favorite toggled");
        Ok(now_favorite)
    }

    /// Switches to the chatroom.
    pub fn go_chatroom(&mut self) {
        self.session.go_chatroom();
    }

    /// Switches to the coderoom, filtered to `subject` if given.
    pub fn go_coderoom(&mut self, subject: Option<String>) {
        self.session.go_coderoom(subject);
    }

    /// Opens a post in the single-post view.
    pub fn go_single_post(&mut self, post_id: EntityId) {
        self.session.go_single_post(post_id);
    }

    /// Marks the open post as being edited, so the next submission updates
    /// it instead of creating.
    pub fn begin_edit(&mut self) {
        self.session.begin_edit();
    }

    /// Sets the chatroom search query.
    pub fn set_chat_query(&mut self, query: impl Into<String>) {
        self.session.chat_query = query.into();
    }

    /// Sets the coderoom search query.
    pub fn set_post_query(&mut self, query: impl Into<String>) {
        self.session.post_query = query.into();
    }

    /// Sets the coderoom sort key.
    pub fn set_sort(&mut self, sort: SortKey) {
        self.session.sort = sort;
    }

    /// Derives what the active view shows right now.
    ///
    /// Always total: an open post that no longer resolves renders as
    /// [`ViewState::PostMissing`] rather than a stale detail.
    pub fn view(&self) -> ViewState<'_> {
        match self.session.view() {
            View::Chatroom => ViewState::Chatroom {
                items: self.feed_items(),
            },
            View::Coderoom => ViewState::Coderoom {
                subjects: board::subjects(&self.posts),
                cards: board::filter_and_sort(
                    &self.posts,
                    &self.favorites,
                    self.session.selected_subject(),
                    &self.session.post_query,
                    self.session.sort,
                ),
            },
            View::SinglePost => match self.session.active_post() {
                Some(id) => match detail::assemble_detail(
                    id,
                    &self.posts,
                    &self.comments,
                    &self.favorites,
                    self.session.current_user(),
                ) {
                    Some(detail) => ViewState::SinglePost { detail },
                    None => ViewState::PostMissing { post_id: id },
                },
                // The session always pairs this view with a post id.
                None => ViewState::Chatroom {
                    items: self.feed_items(),
                },
            },
        }
    }

    fn feed_items(&self) -> Vec<FeedItem<'_>> {
        feed::compose_feed(
            &self.messages,
            &self.posts,
            &self.comments,
            &self.session.chat_query,
            self.session.current_user(),
        )
    }

    fn submit_mode(&self) -> SubmitMode {
        match (self.session.is_editing(), self.session.active_post()) {
            (true, Some(id)) => SubmitMode::Edit(id.clone()),
            _ => SubmitMode::Create,
        }
    }

    fn commit_post(&mut self, draft: PostDraft, mode: SubmitMode) -> Result<EntityId> {
        let draft = draft.normalize();
        draft.validate()?;
        match mode {
            SubmitMode::Create => {
                let author = self.require_user()?;
                let post = Post::from_draft(self.ids.post_id(), author, draft, now_millis());
                let id = post.id.clone();
                self.posts.push(post);
                self.persist_posts();
                debug!(id = %id, "post created");
                Ok(id)
            }
            SubmitMode::Edit(id) => {
                let post = self
                    .posts
                    .iter_mut()
                    .find(|p| p.id == id)
                    .ok_or_else(|| DevhubError::not_found(format!("No post {}", id)))?;
                post.apply_draft(draft, now_millis());
                self.session.end_edit();
                self.persist_posts();
                debug!(id = %id, "post edited");
                Ok(id)
            }
        }
    }

    fn refuse_while_pending(&self) -> Result<()> {
        if self.pending.is_some() {
            return Err(DevhubError::pending(
                "A submission is already waiting for its image",
            ));
        }
        Ok(())
    }

    fn require_user(&self) -> Result<String> {
        self.session
            .current_user()
            .map(str::to_string)
            .ok_or_else(|| DevhubError::identity("A display name is required for this action"))
    }

    fn persist_messages(&mut self) {
        let result = self.store.save_messages(&self.messages);
        self.note_save_result(result);
    }

    fn persist_posts(&mut self) {
        let result = self.store.save_posts(&self.posts);
        self.note_save_result(result);
    }

    fn persist_comments(&mut self) {
        let result = self.store.save_comments(&self.comments);
        self.note_save_result(result);
    }

    fn persist_favorites(&mut self) {
        let result = self.store.save_favorites(&self.favorites);
        self.note_save_result(result);
    }

    fn note_save_result(&mut self, result: Result<()>) {
        if let Err(e) = result {
            self.note_save_failure(e);
        }
    }

    fn note_save_failure(&mut self, e: DevhubError) {
        warn!(error = %e, "save failed, keeping in-memory state");
        self.last_save_error = Some(e.to_string());
    }
}
