//! Raw text to normalized lines.

use super::patterns::{LINE_BREAK, MULTI_SPACE};

/// Split raw text into trimmed, whitespace-collapsed, non-empty lines.
///
/// Accepts CR, LF and CRLF line endings. Order is preserved.
pub fn normalize_lines(raw: &str) -> Vec<String> {
    LINE_BREAK
        .split(raw)
        .map(|line| line.replace('\u{00a0}', " "))
        .map(|line| MULTI_SPACE.replace_all(line.trim(), " ").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}
