// WoS export pipeline: one export file in, one CSV report out.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::{classify_documents, ReportSettings, RunReport};
use crate::classify::DocumentClassifier;
use crate::ingest::{read_text_lossy, wos::RecordParser};
use crate::output::csv_report::{self, ReportLayout};
use crate::output::summary::Summary;
use crate::patterns::PatternTable;

/// Analyze every record in a Web of Science export.
///
/// Fails if the file can't be read or contains no record markers; records
/// with missing fields are kept and classified as-is.
pub fn run(
    export_path: &Path,
    classifier: &dyn DocumentClassifier,
    table: &PatternTable,
    settings: &ReportSettings,
) -> Result<RunReport> {
    let content = read_text_lossy(export_path)?;

    let parser = RecordParser::new().context("failed to build record parser")?;
    let documents = parser.parse(&content);
    if documents.is_empty() {
        anyhow::bail!(
            "No records found in {}. Expected a Web of Science full-record export \
             with \"Record N of M\" markers.",
            export_path.display()
        );
    }
    info!(path = %export_path.display(), records = documents.len(), "Loaded export");

    let rows = classify_documents(classifier, documents);
    let results: Vec<_> = rows.iter().map(|r| r.result.clone()).collect();
    let summary = Summary::compute(table, &results);

    let layout = ReportLayout::from_table(table);
    let csv_path =
        csv_report::write_report(&settings.output_dir, &layout, &rows, settings.preview_chars)?;

    Ok(RunReport {
        rows,
        summary,
        csv_path,
    })
}
