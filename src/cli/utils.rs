//! Utility functions for CLI operations.

use crate::error::{DevhubError, Result};
use std::env;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, UNIX_EPOCH};

/// Get the data directory, honoring `DEVHUB_DATA` and falling back to
/// `~/.devhub`.
pub fn get_data_dir() -> Result<PathBuf> {
    let data_dir = match env::var("DEVHUB_DATA") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = env::var("HOME")
                .map_err(|_| DevhubError::storage("HOME environment variable not set"))?;
            Path::new(&home).join(".devhub")
        }
    };

    // Create directory if it doesn't exist
    if !data_dir.exists() {
        fs::create_dir_all(&data_dir)?;
    }

    Ok(data_dir)
}

/// Read file contents
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    let mut file = fs::File::open(path)?;
    let mut contents = Vec::new();
    file.read_to_end(&mut contents)?;
    Ok(contents)
}

/// Format a millisecond Unix timestamp as a human-readable string
pub fn format_timestamp(millis: u64) -> String {
    let datetime = UNIX_EPOCH + Duration::from_millis(millis);

    // Basic timestamp formatting for CLI display
    format!("{:?}", datetime)
}

/// Guess an image MIME type from a file extension
pub fn guess_mime(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Prompt on stdout and read one trimmed line from stdin.
///
/// Returns `None` when the user submits an empty line, which callers treat
/// as declining.
pub fn prompt_line(prompt: &str) -> Result<Option<String>> {
    print!("{}: ", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let line = line.trim();
    if line.is_empty() {
        Ok(None)
    } else {
        Ok(Some(line.to_string()))
    }
}
