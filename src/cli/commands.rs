//! Command implementations for the devhub CLI.

use crate::board::{PostCard, SortKey};
use crate::cli::utils::{format_timestamp, guess_mime, prompt_line, read_file};
use crate::detail::PostDetail;
use crate::error::{DevhubError, Result};
use crate::feed::{FeedEntry, FeedItem};
use crate::hub::{Hub, ViewState};
use crate::model::{EntityId, PostDraft};
use crate::render::{
    avatar_initial, avatar_rgb, file_to_data_reference, CodeHighlighter, MarkupRenderer,
    NoHighlight, PlainText,
};
use crate::store::StoreBackend;
use std::path::Path;
use tracing::info;

/// Execute name command
pub fn name<B: StoreBackend>(hub: &mut Hub<B>, display_name: &str) -> Result<()> {
    if let Some(existing) = hub.session().current_user() {
        println!("Display name is already set to '{}'", existing);
        return Ok(());
    }
    hub.set_username(display_name)?;
    info!(user = display_name.trim(), "✅ Display name set");
    println!("Hello, {}!", display_name.trim());
    report_save_warning(hub);
    Ok(())
}

/// Execute send command
pub fn send<B: StoreBackend>(hub: &mut Hub<B>, text: &str) -> Result<()> {
    if let Some(id) = with_identity(hub, |hub| hub.post_message(text))? {
        info!(id = %id, "✅ Message sent");
        println!("Sent {}", id);
    }
    report_save_warning(hub);
    Ok(())
}

/// Execute chat command
pub fn chat<B: StoreBackend>(hub: &mut Hub<B>, query: Option<&str>) -> Result<()> {
    if let Some(query) = query {
        hub.set_chat_query(query);
    }
    hub.go_chatroom();
    render_view(hub);
    Ok(())
}

/// Execute post command
#[allow(clippy::too_many_arguments)]
pub fn post<B: StoreBackend>(
    hub: &mut Hub<B>,
    title: &str,
    description: Option<&str>,
    code_file: Option<&Path>,
    language: Option<&str>,
    subject: Option<&str>,
    image_file: Option<&Path>,
) -> Result<()> {
    let draft = PostDraft {
        title: title.to_string(),
        description: description.unwrap_or_default().to_string(),
        code: read_code_file(code_file)?,
        language: language.map(str::to_string),
        subject: subject.map(str::to_string),
        image: None,
    };
    let created = match image_file {
        Some(path) => submit_with_image(hub, draft, path)?,
        None => with_identity(hub, |hub| hub.submit_post(draft.clone()))?,
    };
    if let Some(id) = created {
        info!(id = %id, "✅ Post created");
        println!("Created {}", id);
    }
    report_save_warning(hub);
    Ok(())
}

/// Execute posts command
pub fn posts<B: StoreBackend>(
    hub: &mut Hub<B>,
    subject: Option<&str>,
    query: Option<&str>,
    sort: SortKey,
) -> Result<()> {
    if let Some(query) = query {
        hub.set_post_query(query);
    }
    hub.set_sort(sort);
    hub.go_coderoom(subject.map(str::to_string));
    render_view(hub);
    Ok(())
}

/// Execute subjects command
pub fn subjects<B: StoreBackend>(hub: &mut Hub<B>) -> Result<()> {
    hub.go_coderoom(None);
    if let ViewState::Coderoom { subjects, .. } = hub.view() {
        for subject in subjects {
            println!("{}", subject);
        }
    }
    Ok(())
}

/// Execute show command
pub fn show<B: StoreBackend>(hub: &mut Hub<B>, post_id: &EntityId) -> Result<()> {
    hub.go_single_post(post_id.clone());
    render_view(hub);
    Ok(())
}

/// Execute comment command
pub fn comment<B: StoreBackend>(hub: &mut Hub<B>, post_id: &EntityId, text: &str) -> Result<()> {
    if let Some(id) = with_identity(hub, |hub| hub.add_comment(post_id, text))? {
        info!(id = %id, post = %post_id, "✅ Comment added");
        println!("Commented {}", id);
    }
    report_save_warning(hub);
    Ok(())
}

/// Execute edit command
#[allow(clippy::too_many_arguments)]
pub fn edit<B: StoreBackend>(
    hub: &mut Hub<B>,
    post_id: &EntityId,
    title: Option<&str>,
    description: Option<&str>,
    code_file: Option<&Path>,
    language: Option<&str>,
    subject: Option<&str>,
    image_file: Option<&Path>,
) -> Result<()> {
    // Start from the stored values, as an edit form would, and overlay
    // whatever was passed.
    let existing = hub
        .post(post_id)
        .ok_or_else(|| DevhubError::not_found(format!("No post {}", post_id)))?;
    let draft = PostDraft {
        title: title.map(str::to_string).unwrap_or_else(|| existing.title.clone()),
        description: description
            .map(str::to_string)
            .unwrap_or_else(|| existing.description.clone()),
        code: match read_code_file(code_file)? {
            Some(code) => Some(code),
            None => existing.code.clone(),
        },
        language: language.map(str::to_string).or_else(|| existing.language.clone()),
        subject: subject.map(str::to_string).or_else(|| existing.subject.clone()),
        image: None,
    };

    hub.go_single_post(post_id.clone());
    hub.begin_edit();
    let edited = match image_file {
        Some(path) => submit_with_image(hub, draft, path)?,
        None => Some(hub.submit_post(draft)?),
    };
    if let Some(id) = edited {
        info!(id = %id, "✅ Post edited");
        println!("Edited {}", id);
    }
    report_save_warning(hub);
    Ok(())
}

/// Execute favorite command
pub fn favorite<B: StoreBackend>(hub: &mut Hub<B>, post_id: &EntityId) -> Result<()> {
    if hub.toggle_favorite(post_id)? {
        println!("Added {} to favorites", post_id);
    } else {
        println!("Removed {} from favorites", post_id);
    }
    report_save_warning(hub);
    Ok(())
}

/// Execute delete-message command
pub fn delete_message<B: StoreBackend>(hub: &mut Hub<B>, id: &EntityId) -> Result<()> {
    hub.delete_message(id)?;
    println!("Deleted message {}", id);
    report_save_warning(hub);
    Ok(())
}

/// Execute delete-post command
pub fn delete_post<B: StoreBackend>(hub: &mut Hub<B>, id: &EntityId) -> Result<()> {
    hub.delete_post(id)?;
    println!("Deleted post {} and its comments", id);
    report_save_warning(hub);
    Ok(())
}

/// Execute delete-comment command
pub fn delete_comment<B: StoreBackend>(hub: &mut Hub<B>, id: &EntityId) -> Result<()> {
    hub.delete_comment(id)?;
    println!("Deleted comment {}", id);
    report_save_warning(hub);
    Ok(())
}

/// Run an action that may need a display name, prompting for one on demand.
///
/// Returns `Ok(None)` when the user declines the prompt; the action is
/// abandoned without an error.
fn with_identity<B: StoreBackend, T>(
    hub: &mut Hub<B>,
    action: impl Fn(&mut Hub<B>) -> Result<T>,
) -> Result<Option<T>> {
    match action(hub) {
        Ok(value) => Ok(Some(value)),
        Err(DevhubError::Identity(_)) => {
            let name = match prompt_line("Choose a display name")? {
                Some(name) => name,
                None => return Ok(None),
            };
            hub.set_username(&name)?;
            action(hub).map(Some)
        }
        Err(e) => Err(e),
    }
}

/// Park the submission, then read the image and deliver it.
///
/// The draft is not committed until the file bytes arrive, mirroring the
/// asynchronous image path of the interactive views.
fn submit_with_image<B: StoreBackend>(
    hub: &mut Hub<B>,
    draft: PostDraft,
    path: &Path,
) -> Result<Option<EntityId>> {
    let parked = with_identity(hub, |hub| hub.submit_post_with_image(draft.clone()))?;
    if parked.is_none() {
        return Ok(None);
    }
    let bytes = read_file(path)?;
    let reference = file_to_data_reference(guess_mime(path), &bytes);
    hub.image_ready(reference).map(Some)
}

fn read_code_file(path: Option<&Path>) -> Result<Option<String>> {
    match path {
        Some(path) => {
            let bytes = read_file(path)?;
            Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
        }
        None => Ok(None),
    }
}

fn report_save_warning<B: StoreBackend>(hub: &mut Hub<B>) {
    if let Some(error) = hub.take_save_error() {
        eprintln!(
            "Warning: the change is live for this session but could not be saved: {}",
            error
        );
    }
}

fn render_view<B: StoreBackend>(hub: &Hub<B>) {
    match hub.view() {
        ViewState::Chatroom { items } => render_feed(hub, &items),
        ViewState::Coderoom { subjects, cards } => render_board(&subjects, &cards),
        ViewState::SinglePost { detail } => render_detail(&detail),
        ViewState::PostMissing { post_id } => println!("Post {} no longer exists", post_id),
    }
}

fn render_feed<B: StoreBackend>(hub: &Hub<B>, items: &[FeedItem<'_>]) {
    if items.is_empty() {
        println!("No activity yet");
        return;
    }
    let markup = PlainText;
    for item in items {
        let author = item.entry.author();
        let marker = if item.is_mine { " (you)" } else { "" };
        let when = format_timestamp(item.entry.timestamp());
        let initial = colored_initial(author);
        match item.entry {
            FeedEntry::Message(message) => {
                println!("{} {}{} at {}", initial, author, marker, when);
                println!("    {}", markup.render(&message.text));
            }
            FeedEntry::Post(post) => {
                println!(
                    "{} {}{} posted '{}' [{}] at {}",
                    initial, author, marker, post.title, post.subject_label(), when
                );
                if !post.description.is_empty() {
                    println!("    {}", markup.render(&post.description));
                }
                println!("    ({})", post.id);
            }
            FeedEntry::Comment(comment) => {
                // A comment can outlive its post in a corrupt store; fall
                // back to a generic label instead of failing.
                let target = match hub.post(&comment.post_id) {
                    Some(post) => format!("'{}'", post.title),
                    None => "a post".to_string(),
                };
                println!("{} {}{} commented on {} at {}", initial, author, marker, target, when);
                println!("    {}", markup.render(&comment.text));
            }
        }
    }
}

fn render_board(subjects: &[String], cards: &[PostCard<'_>]) {
    println!("Subjects: {}", subjects.join(", "));
    println!();
    if cards.is_empty() {
        println!("No posts match");
        return;
    }
    for card in cards {
        let star = if card.is_favorite { "*" } else { " " };
        let edited = if card.post.is_edited() { " (edited)" } else { "" };
        println!(
            "{} {} [{} / {}] by {} at {}{}",
            star,
            card.post.title,
            card.post.subject_label(),
            card.post.language_label(),
            card.post.author,
            format_timestamp(card.post.timestamp),
            edited
        );
        println!("    {}", card.post.id);
    }
}

fn render_detail(detail: &PostDetail<'_>) {
    let post = detail.post;
    let markup = PlainText;
    let highlighter = NoHighlight;
    let star = if detail.is_favorite { " *" } else { "" };
    let yours = if detail.is_mine { " (you)" } else { "" };

    println!("{}{}", post.title, star);
    println!(
        "by {}{} [{} / {}] at {}",
        post.author,
        yours,
        post.subject_label(),
        post.language_label(),
        format_timestamp(post.timestamp)
    );
    if let Some(edited) = post.last_edited {
        println!("edited at {}", format_timestamp(edited));
    }
    if !post.description.is_empty() {
        println!();
        println!("{}", markup.render(&post.description));
    }
    if let Some(code) = post.code.as_deref() {
        println!();
        println!("```{}", post.language_label());
        println!("{}", highlighter.highlight(code, post.language_label()));
        println!("```");
    }
    if post.image.is_some() {
        println!();
        println!("[image attached]");
    }
    println!();
    if detail.comments.is_empty() {
        println!("No comments yet");
    } else {
        println!("Comments:");
        for comment in &detail.comments {
            println!(
                "  {} {} at {}",
                colored_initial(&comment.author),
                comment.author,
                format_timestamp(comment.timestamp)
            );
            println!("      {}  ({})", markup.render(&comment.text), comment.id);
        }
    }
}

fn colored_initial(name: &str) -> String {
    let (r, g, b) = avatar_rgb(name);
    format!("\x1b[38;2;{};{};{}m{}\x1b[0m", r, g, b, avatar_initial(name))
}
