//! Rendering seams and display helpers.
//!
//! The hub itself never interprets markup or colors code; it hands text to
//! two collaborator traits and displays whatever comes back. The defaults
//! here are deliberately inert so the core stays safe without any renderer
//! wired in: [`PlainText`] strips control characters, [`NoHighlight`]
//! returns code untouched.
//!
//! Avatar derivation is deterministic from the author name alone, so every
//! view of the same author shows the same color and initial without
//! storing anything.

use base64::{engine::general_purpose, Engine as _};

/// Turns user-entered markup into display text.
pub trait MarkupRenderer {
    /// Renders `text` for display.
    fn render(&self, text: &str) -> String;
}

/// Colors a code snippet for display.
pub trait CodeHighlighter {
    /// Highlights `code` written in `language`.
    fn highlight(&self, code: &str, language: &str) -> String;
}

/// Default renderer: passes text through with control characters removed.
///
/// Newlines and tabs survive; everything else below U+0020 is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainText;

impl MarkupRenderer for PlainText {
    fn render(&self, text: &str) -> String {
        text.chars()
            .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
            .collect()
    }
}

/// Default highlighter: returns the code unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHighlight;

impl CodeHighlighter for NoHighlight {
    fn highlight(&self, code: &str, _language: &str) -> String {
        code.to_string()
    }
}

/// Derives a stable avatar color for an author name.
///
/// The color is a function of the first character and the name length, so
/// it never changes between sessions.
pub fn avatar_rgb(name: &str) -> (u8, u8, u8) {
    let first = match name.chars().next() {
        Some(c) => c as u64,
        None => return (0, 0, 0),
    };
    let value = (first * name.chars().count() as u64) % 0xFF_FFFF;
    ((value >> 16) as u8, (value >> 8) as u8, value as u8)
}

/// Returns the avatar color as a `#rrggbb` string.
pub fn avatar_color(name: &str) -> String {
    let (r, g, b) = avatar_rgb(name);
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Returns the uppercased first character of a name, or `?` for an empty
/// name.
pub fn avatar_initial(name: &str) -> char {
    name.chars()
        .next()
        .and_then(|c| c.to_uppercase().next())
        .unwrap_or('?')
}

/// Encodes file bytes as an opaque data reference.
///
/// The reference embeds the MIME type and the base64 payload in one
/// self-describing string, suitable for storing inline with a post.
pub fn file_to_data_reference(mime: &str, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        mime,
        general_purpose::STANDARD.encode(bytes)
    )
}
