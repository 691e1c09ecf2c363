// Web of Science "full record" export parsing.
//
// An export (saved as HTML or plain text) is a sequence of records, each
// introduced by a "Record <n> of <m>" marker and carrying labelled fields:
//
//   Record 1 of 250
//   Title: ...
//   By: Smith, J (Smith, John); ...
//   Author Identifiers: ...
//   Source: ...
//   Published: MAR 2021
//   Abstract: ...
//   Times Cited in Web of Science Core Collection: ...
//
// The file is treated as flat text; markup between the labels is harmless
// because every field is located by its label, not by document structure.

use anyhow::Result;
use regex::Regex;
use tracing::{debug, info};

use crate::document::{Document, UNKNOWN_YEAR};

/// Precompiled field extractors for one export.
pub struct RecordParser {
    record_marker: Regex,
    title: Regex,
    title_fallback: Regex,
    abstract_text: Regex,
    published: Regex,
    authors: Regex,
    parenthesized: Regex,
}

impl RecordParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            record_marker: Regex::new(r"Record \d+ of \d+")?,
            title: Regex::new(r"(?s)Title:\s*(.+?)\s*Source:")?,
            title_fallback: Regex::new(r"(?s)Title:\s*(.+?)\s*Author\s+Identifiers:")?,
            abstract_text: Regex::new(
                r"(?s)Abstract:\s*(.+?)\s*(?:Conference Title:|Times Cited in|$)",
            )?,
            published: Regex::new(r"Published:\s*[A-Z]{3,4}\s+(\d{4})")?,
            authors: Regex::new(r"(?s)By:\s*(.+?)\s*Author\s+Identifiers:")?,
            parenthesized: Regex::new(r"\([^)]*\)")?,
        })
    }

    /// Split an export into records and extract one Document per record.
    ///
    /// Text before the first record marker (page header, query summary) is
    /// discarded. Missing fields never drop a record; they fall back to
    /// placeholders so every record yields exactly one document.
    pub fn parse(&self, content: &str) -> Vec<Document> {
        let documents: Vec<Document> = self
            .record_marker
            .split(content)
            .skip(1)
            .enumerate()
            .map(|(i, record)| self.parse_record(i + 1, record))
            .collect();

        info!(records = documents.len(), "Parsed WoS export");
        documents
    }

    fn parse_record(&self, index: usize, record: &str) -> Document {
        let title = self
            .capture(&self.title, record)
            .or_else(|| self.capture(&self.title_fallback, record))
            .map(|t| collapse_whitespace(&t))
            .unwrap_or_else(|| format!("Record #{index}"));

        let abstract_text = self
            .capture(&self.abstract_text, record)
            .unwrap_or_default();

        let year = self
            .capture(&self.published, record)
            .unwrap_or_else(|| UNKNOWN_YEAR.to_string());

        let authors = self
            .capture(&self.authors, record)
            .map(|a| collapse_whitespace(&self.parenthesized.replace_all(&a, "")))
            .unwrap_or_default();

        if abstract_text.is_empty() {
            debug!(index, "Record has no abstract");
        }

        Document::new(index, Some(abstract_text.as_str()))
            .with_title(title)
            .with_authors(authors)
            .with_year(year)
    }

    fn capture(&self, re: &Regex, record: &str) -> Option<String> {
        re.captures(record)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
    }
}

/// Convenience wrapper: compile a parser and parse `content`.
pub fn parse_records(content: &str) -> Result<Vec<Document>> {
    Ok(RecordParser::new()?.parse(content))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
