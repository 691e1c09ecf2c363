// Output formatting: CSV reports, batch statistics, terminal display.

pub mod csv_report;
pub mod summary;
pub mod terminal;

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Counts characters, not bytes, so abstracts with CJK text or Greek unit
/// symbols are never split inside a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}
