//! User-text sanitization rules.
//!
//! # Responsibility
//! - Strip control characters, trim, and clamp user-entered text.
//! - Decide whether sanitized text qualifies as a title or a note.
//!
//! # Invariants
//! - Newline and tab survive sanitization; every other `\p{C}` character is
//!   removed.
//! - Clamping counts characters, not bytes.

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum title length in characters, applied after trimming.
pub const TITLE_MAX_CHARS: usize = 200;
/// Maximum note length in characters, applied after trimming.
pub const NOTE_MAX_CHARS: usize = 2000;

// `\p{C}` covers control, format, surrogate and unassigned code points.
static CONTROL_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\p{C}--[\n\t]]").expect("control-char class must compile"));

/// Removes disallowed control characters, trims, and clamps to `max_chars`.
pub fn sanitize_text(input: &str, max_chars: usize) -> String {
    let cleaned = CONTROL_CHARS.replace_all(input, "");
    cleaned.trim().chars().take(max_chars).collect()
}

/// Sanitizes a candidate title.
///
/// Returns `None` when nothing usable remains, which callers must treat as
/// "reject the operation", never as an empty title.
pub fn sanitize_title(input: &str) -> Option<String> {
    let title = sanitize_text(input, TITLE_MAX_CHARS);
    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

/// Sanitizes a candidate note.
///
/// Returns `None` when nothing usable remains; an absent note is stored as
/// `None`, never as an empty string.
pub fn sanitize_note(input: &str) -> Option<String> {
    let note = sanitize_text(input, NOTE_MAX_CHARS);
    if note.is_empty() {
        None
    } else {
        Some(note)
    }
}
