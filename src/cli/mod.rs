//! Command-line interface for devhub.
//!
//! This module provides a complete CLI for the devhub library: chatting,
//! browsing and composing posts, commenting, favorites, and deletion. Each
//! invocation opens the hub over the local database, runs one command, and
//! exits.

pub mod args;
pub mod commands;
pub mod utils;

use crate::error::Result;
use crate::hub::Hub;
use crate::store::RocksStore;
use std::process;

pub use args::Command;
pub use commands::*;
pub use utils::*;

/// Main entry point for the CLI application
pub fn run() -> Result<()> {
    // Parse command line arguments
    let command = args::parse_args();

    // Open the hub over the local database
    let data_dir = utils::get_data_dir()?;
    let store = RocksStore::open(data_dir.join("hub_db"))?;
    let mut hub = Hub::open(store);

    // Execute command
    let result = match command {
        Command::Name { display_name } => commands::name(&mut hub, &display_name),
        Command::Send { text } => commands::send(&mut hub, &text),
        Command::Chat { query } => commands::chat(&mut hub, query.as_deref()),
        Command::Post {
            title,
            description,
            code_file,
            language,
            subject,
            image_file,
        } => commands::post(
            &mut hub,
            &title,
            description.as_deref(),
            code_file.as_deref(),
            language.as_deref(),
            subject.as_deref(),
            image_file.as_deref(),
        ),
        Command::Posts {
            subject,
            query,
            sort,
        } => commands::posts(&mut hub, subject.as_deref(), query.as_deref(), sort),
        Command::Subjects => commands::subjects(&mut hub),
        Command::Show { post_id } => commands::show(&mut hub, &post_id),
        Command::Comment { post_id, text } => commands::comment(&mut hub, &post_id, &text),
        Command::Edit {
            post_id,
            title,
            description,
            code_file,
            language,
            subject,
            image_file,
        } => commands::edit(
            &mut hub,
            &post_id,
            title.as_deref(),
            description.as_deref(),
            code_file.as_deref(),
            language.as_deref(),
            subject.as_deref(),
            image_file.as_deref(),
        ),
        Command::Favorite { post_id } => commands::favorite(&mut hub, &post_id),
        Command::DeleteMessage { id } => commands::delete_message(&mut hub, &id),
        Command::DeletePost { id } => commands::delete_post(&mut hub, &id),
        Command::DeleteComment { id } => commands::delete_comment(&mut hub, &id),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    Ok(())
}
