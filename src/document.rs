// Document: one input item (an abstract or a PDF's full text) plus the
// metadata carried through to reports.
//
// Metadata never influences classification. Text is normalized once on
// construction so every matcher sees the same lower-cased, whitespace-
// collapsed string.

use serde::{Deserialize, Serialize};

/// Placeholder used when a record has no publication year.
pub const UNKNOWN_YEAR: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// 1-based position in the input
    pub index: usize,
    pub year: String,
    pub title: String,
    pub authors: String,
    /// Normalized text; `None` when the source could not be read at all
    text: Option<String>,
}

impl Document {
    /// Build a document from raw text, normalizing it.
    pub fn new(index: usize, raw_text: Option<&str>) -> Self {
        Self {
            index,
            year: UNKNOWN_YEAR.to_string(),
            title: String::new(),
            authors: String::new(),
            text: raw_text.map(normalize_text),
        }
    }

    /// A document whose source could not be read.
    pub fn unreadable(index: usize) -> Self {
        Self::new(index, None)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_authors(mut self, authors: impl Into<String>) -> Self {
        self.authors = authors.into();
        self
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = year.into();
        self
    }

    /// The normalized text, or `None` for unreadable sources.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// True when there is nothing to classify (unreadable or empty).
    pub fn is_blank(&self) -> bool {
        self.text.as_deref().map_or(true, str::is_empty)
    }
}

/// Lower-case and collapse all whitespace runs to single spaces.
pub fn normalize_text(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_and_lowercases() {
        assert_eq!(
            normalize_text("  Sediment\n\tCORE   Samples "),
            "sediment core samples"
        );
    }

    #[test]
    fn test_normalize_keeps_cjk() {
        assert_eq!(normalize_text("沉积物  浓度"), "沉积物 浓度");
    }

    #[test]
    fn test_blank_documents() {
        assert!(Document::unreadable(1).is_blank());
        assert!(Document::new(2, Some("   \n ")).is_blank());
        assert!(!Document::new(3, Some("fish")).is_blank());
    }

    #[test]
    fn test_default_year_is_placeholder() {
        let doc = Document::new(1, Some("text"));
        assert_eq!(doc.year, UNKNOWN_YEAR);
    }
}
