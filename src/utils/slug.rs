//! URL slugification for post file names.
//!
//! Converts notebook file stems to names the site generator can serve.

use crate::config::SlugMode;

/// Characters forbidden in file names
const FORBIDDEN_CHARS: &[char] = &[
    '<', '>', ':', '|', '?', '*', '#', '\\', '/', '(', ')', '[', ']', '\t', '\r', '\n',
];

// ============================================================================
// Slugification
// ============================================================================

/// Convert a file stem to a post slug based on config
pub fn slugify_stem(stem: &str, mode: SlugMode) -> String {
    match mode {
        SlugMode::Safe => sanitize_text(stem),
        SlugMode::On => slug::slugify(stem),
        SlugMode::No => stem.to_owned(),
    }
}

/// Remove forbidden characters and replace whitespace with underscores
fn sanitize_text(text: &str) -> String {
    text.trim()
        .chars()
        .filter(|c| !FORBIDDEN_CHARS.contains(c))
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}
