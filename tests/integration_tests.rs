//! Integration tests for devhub
//!
//! These tests verify end-to-end functionality across the hub: identity,
//! chatting, browsing, editing, cascade deletion, deferred image
//! submissions, and durable storage.

use devhub::board::{filter_and_sort, SortKey, FAVORITES_SUBJECT};
use devhub::error::DevhubError;
use devhub::feed::compose_feed;
use devhub::hub::{Hub, ViewState};
use devhub::model::{EntityId, Message, PostDraft};
use devhub::store::{MemoryStore, RocksStore, StoreBackend, StoreKey};
use devhub::Result;
use std::collections::BTreeSet;
use tempfile::TempDir;

fn open_hub() -> Hub<MemoryStore> {
    let mut hub = Hub::open(MemoryStore::new());
    hub.set_username("alice").expect("Failed to set username");
    hub
}

fn create_test_draft(title: &str, subject: Option<&str>) -> PostDraft {
    PostDraft {
        title: title.to_string(),
        description: format!("notes on {}", title),
        code: Some("fn main() {}".to_string()),
        language: Some("rust".to_string()),
        subject: subject.map(str::to_string),
        image: None,
    }
}

/// A backend whose writes always fail, for exercising best-effort saves.
struct FailingStore;

impl StoreBackend for FailingStore {
    fn load(&self, _key: StoreKey) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }

    fn save(&mut self, _key: StoreKey, _bytes: &[u8]) -> Result<()> {
        Err(DevhubError::storage("disk unplugged"))
    }
}

/// Test the complete chat workflow: send, search, ownership tagging
#[test]
fn test_end_to_end_chat_flow() {
    let mut hub = open_hub();

    hub.post_message("deploy finished").expect("Failed to send message");
    hub.post_message("lunch anyone?").expect("Failed to send message");

    // The full feed shows both, oldest first
    hub.go_chatroom();
    match hub.view() {
        ViewState::Chatroom { items } => {
            assert_eq!(items.len(), 2);
            assert!(items.iter().all(|i| i.is_mine));
        }
        other => panic!("expected chatroom, got {:?}", other),
    }

    // Searching narrows to matching messages
    hub.set_chat_query("deploy");
    match hub.view() {
        ViewState::Chatroom { items } => {
            assert_eq!(items.len(), 1);
            assert_eq!(items[0].entry.author(), "alice");
        }
        other => panic!("expected chatroom, got {:?}", other),
    }
}

/// Test browsing posts by subject and commenting on a detail view
#[test]
fn test_post_browse_and_comment_flow() {
    let mut hub = open_hub();

    let first = hub
        .submit_post(create_test_draft("Closure scope", Some("JS")))
        .expect("Failed to create post");
    hub.submit_post(create_test_draft("Event loop", Some("JS")))
        .expect("Failed to create post");
    hub.submit_post(create_test_draft("Untagged", None))
        .expect("Failed to create post");

    // The board lists typed subjects first-seen, then the favorites entry
    hub.go_coderoom(None);
    match hub.view() {
        ViewState::Coderoom { subjects, cards } => {
            assert_eq!(subjects, vec!["JS", FAVORITES_SUBJECT]);
            assert_eq!(cards.len(), 3);
        }
        other => panic!("expected coderoom, got {:?}", other),
    }

    // Filtering by subject narrows the grid
    hub.go_coderoom(Some("JS".to_string()));
    match hub.view() {
        ViewState::Coderoom { cards, .. } => assert_eq!(cards.len(), 2),
        other => panic!("expected coderoom, got {:?}", other),
    }

    // Opening a post and commenting shows the thread oldest-first
    hub.go_single_post(first.clone());
    hub.add_comment(&first, "first!").expect("Failed to comment");
    hub.add_comment(&first, "seconded").expect("Failed to comment");
    match hub.view() {
        ViewState::SinglePost { detail } => {
            assert_eq!(detail.post.id, first);
            let texts: Vec<&str> = detail.comments.iter().map(|c| c.text.as_str()).collect();
            assert_eq!(texts, vec!["first!", "seconded"]);
            assert!(detail.is_mine);
        }
        other => panic!("expected single post, got {:?}", other),
    }
}

/// Test that the feed interleaves all three entity kinds chronologically
#[test]
fn test_feed_interleaves_all_kinds() {
    let mut hub = open_hub();

    hub.post_message("starting a thread").expect("Failed to send");
    let post = hub
        .submit_post(create_test_draft("Threading", None))
        .expect("Failed to create post");
    hub.add_comment(&post, "replying").expect("Failed to comment");

    hub.go_chatroom();
    match hub.view() {
        ViewState::Chatroom { items } => {
            let kinds: Vec<&str> = items.iter().map(|i| i.entry.kind()).collect();
            assert_eq!(kinds, vec!["message", "post", "comment"]);
            assert!(items.windows(2).all(|w| {
                w[0].entry.timestamp() <= w[1].entry.timestamp()
            }));
        }
        other => panic!("expected chatroom, got {:?}", other),
    }
}

/// Test that editing changes content but never identity or ordering
#[test]
fn test_edit_preserves_identity_and_ordering() {
    let mut hub = open_hub();

    let first = hub
        .submit_post(create_test_draft("Original", Some("JS")))
        .expect("Failed to create post");
    hub.submit_post(create_test_draft("Later", Some("JS")))
        .expect("Failed to create post");
    let created_at = hub.post(&first).expect("post missing").timestamp;

    hub.go_single_post(first.clone());
    hub.begin_edit();
    let edited = hub
        .submit_post(create_test_draft("Rewritten", Some("JS")))
        .expect("Failed to edit post");

    assert_eq!(edited, first);
    let post = hub.post(&first).expect("post missing");
    assert_eq!(post.title, "Rewritten");
    assert_eq!(post.timestamp, created_at);
    assert!(post.is_edited());

    // Oldest-first ordering still puts the edited post before the later one
    hub.go_coderoom(None);
    hub.set_sort(SortKey::Oldest);
    match hub.view() {
        ViewState::Coderoom { cards, .. } => {
            assert_eq!(cards[0].post.id, first);
        }
        other => panic!("expected coderoom, got {:?}", other),
    }
}

/// Scenario: favorite a post, delete it, and the favorites view empties
#[test]
fn test_favorite_then_delete_scenario() {
    let mut hub = open_hub();

    let id = hub
        .submit_post(create_test_draft("Ephemeral", Some("JS")))
        .expect("Failed to create post");
    hub.toggle_favorite(&id).expect("Failed to favorite");
    assert!(hub.favorites().contains(&id));

    hub.delete_post(&id).expect("Failed to delete post");

    assert!(!hub.favorites().contains(&id));
    hub.go_coderoom(Some(FAVORITES_SUBJECT.to_string()));
    match hub.view() {
        ViewState::Coderoom { cards, .. } => assert!(cards.is_empty()),
        other => panic!("expected coderoom, got {:?}", other),
    }
}

/// Scenario: asking for a nonexistent post yields a missing state, never
/// someone else's post
#[test]
fn test_detail_for_missing_post_scenario() {
    let mut hub = open_hub();

    let real = hub
        .submit_post(create_test_draft("Real", None))
        .expect("Failed to create post");
    hub.add_comment(&real, "attached here").expect("Failed to comment");

    let missing = EntityId::from("post_0_404");
    hub.go_single_post(missing.clone());
    match hub.view() {
        ViewState::PostMissing { post_id } => assert_eq!(post_id, &missing),
        other => panic!("expected missing post, got {:?}", other),
    }
}

/// Scenario: two messages with equal timestamps keep insertion order
#[test]
fn test_equal_timestamp_scenario() {
    let messages = vec![
        Message::new(EntityId::from("msg_0_1"), "amy", "hi", 1_000),
        Message::new(EntityId::from("msg_0_2"), "bob", "hello", 1_000),
    ];
    let feed = compose_feed(&messages, &[], &[], "", None);
    let authors: Vec<&str> = feed.iter().map(|i| i.entry.author()).collect();
    assert_eq!(authors, vec!["amy", "bob"]);
}

/// Scenario: alphabetical sort orders by title regardless of creation
#[test]
fn test_alphabetical_sort_scenario() {
    let mut hub = open_hub();
    hub.submit_post(create_test_draft("B-post", Some("JS")))
        .expect("Failed to create post");
    hub.submit_post(create_test_draft("A-post", Some("JS")))
        .expect("Failed to create post");

    let favorites = BTreeSet::new();
    let cards = filter_and_sort(hub.posts(), &favorites, None, "", SortKey::Alphabetical);
    let titles: Vec<&str> = cards.iter().map(|c| c.post.title.as_str()).collect();
    assert_eq!(titles, vec!["A-post", "B-post"]);
}

/// Scenario: composing over empty collections yields an empty feed
#[test]
fn test_empty_collections_scenario() {
    let feed = compose_feed(&[], &[], &[], "", None);
    assert!(feed.is_empty());
}

/// Test that creation is gated on identity and resumes after naming
#[test]
fn test_identity_gate_and_resume() {
    let mut hub = Hub::open(MemoryStore::new());

    // Without a name, creation is refused and nothing is stored
    assert!(matches!(
        hub.post_message("hello?"),
        Err(DevhubError::Identity(_))
    ));
    assert!(hub.messages().is_empty());

    // Naming and retrying succeeds; the name is fixed afterwards
    hub.set_username("carol").expect("Failed to set username");
    hub.post_message("hello?").expect("Failed to send after naming");
    hub.set_username("mallory").expect("Renaming should be ignored, not fail");
    assert_eq!(hub.session().current_user(), Some("carol"));
    assert_eq!(hub.messages()[0].author, "carol");
}

/// Test the deferred image submission lifecycle
#[test]
fn test_deferred_image_submission_flow() {
    let mut hub = open_hub();

    hub.submit_post_with_image(create_test_draft("Screenshot", None))
        .expect("Failed to park submission");

    // Parked, not committed: nothing visible, further submissions refused
    assert!(hub.posts().is_empty());
    assert!(matches!(
        hub.submit_post(create_test_draft("Other", None)),
        Err(DevhubError::Pending(_))
    ));

    let id = hub
        .image_ready("data:image/png;base64,QUJD".to_string())
        .expect("Failed to finish submission");
    let post = hub.post(&id).expect("post missing");
    assert_eq!(post.image.as_deref(), Some("data:image/png;base64,QUJD"));

    // The board sees the committed post
    hub.go_coderoom(None);
    match hub.view() {
        ViewState::Coderoom { cards, .. } => assert_eq!(cards.len(), 1),
        other => panic!("expected coderoom, got {:?}", other),
    }
}

/// Test that all collections and the username survive a database reopen
#[test]
fn test_state_survives_reopen() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("hub_db");
    let post_id;

    {
        let store = RocksStore::open(&db_path).expect("Failed to open store");
        let mut hub = Hub::open(store);
        hub.set_username("alice").expect("Failed to set username");
        hub.post_message("persisted").expect("Failed to send");
        post_id = hub
            .submit_post(create_test_draft("Durable", Some("JS")))
            .expect("Failed to create post");
        hub.add_comment(&post_id, "still here").expect("Failed to comment");
        hub.toggle_favorite(&post_id).expect("Failed to favorite");
    }

    let store = RocksStore::open(&db_path).expect("Failed to reopen store");
    let hub = Hub::open(store);
    assert_eq!(hub.session().current_user(), Some("alice"));
    assert_eq!(hub.messages().len(), 1);
    assert_eq!(hub.messages()[0].text, "persisted");
    assert_eq!(hub.post(&post_id).expect("post missing").title, "Durable");
    assert_eq!(hub.comments().len(), 1);
    assert!(hub.favorites().contains(&post_id));
}

/// Test that corrupt stored data degrades to empty instead of failing
#[test]
fn test_corrupt_store_degrades_to_empty() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("hub_db");

    {
        let mut store = RocksStore::open(&db_path).expect("Failed to open store");
        store
            .save(StoreKey::Messages, b"\x00\x01 definitely not json")
            .expect("Failed to write garbage");
        store
            .save(StoreKey::Posts, b"{\"wrong\": \"shape\"}")
            .expect("Failed to write garbage");
    }

    let store = RocksStore::open(&db_path).expect("Failed to reopen store");
    let mut hub = Hub::open(store);
    assert!(hub.messages().is_empty());
    assert!(hub.posts().is_empty());

    // The hub is fully usable afterwards
    hub.set_username("alice").expect("Failed to set username");
    hub.post_message("fresh start").expect("Failed to send");
    assert_eq!(hub.messages().len(), 1);
}

/// Test that a comment whose post vanished is tolerated, not fatal
#[test]
fn test_dangling_comment_is_tolerated() {
    let mut backend = MemoryStore::new();
    backend.insert(
        StoreKey::Comments,
        r#"[{"id":"cmt_0_1","post_id":"post_0_9","author":"bob","text":"orphaned","timestamp":5}]"#,
    );

    let hub = Hub::open(backend);
    assert_eq!(hub.comments().len(), 1);
    match hub.view() {
        ViewState::Chatroom { items } => {
            assert_eq!(items.len(), 1);
            assert_eq!(items[0].entry.kind(), "comment");
        }
        other => panic!("expected chatroom, got {:?}", other),
    }
}

/// Test that failed saves keep the in-memory state and are reported once
#[test]
fn test_save_failure_keeps_memory_state() {
    let mut hub = Hub::open(FailingStore);
    hub.set_username("alice").expect("Failed to set username");
    assert!(hub.take_save_error().is_some());

    hub.post_message("lives in memory").expect("Mutation should succeed");
    assert_eq!(hub.messages().len(), 1);

    let report = hub.take_save_error();
    assert!(report.is_some());
    assert!(report.unwrap().contains("disk unplugged"));
    assert!(hub.take_save_error().is_none());
}
