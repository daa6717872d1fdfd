// Output formatting — terminal display and JSON.

pub mod terminal;

use anyhow::{Context, Result};

use crate::analysis::RankedResult;

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Unlike byte slicing (`&text[..120]`), this respects UTF-8 character boundaries
/// and will never panic on multi-byte characters like accented letters in names.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

/// Render a result as pretty-printed JSON.
pub fn to_json(result: &RankedResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("Failed to serialize result")
}
