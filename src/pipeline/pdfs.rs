// PDF folder pipeline: extract full text from every PDF in a folder,
// classify, and write one CSV report.
//
// Unreadable PDFs stay in the report with all flags 0 so the row count
// always matches the file count.

use std::path::Path;

use anyhow::Result;
use tracing::{info, warn};

use super::{classify_documents, ReportSettings, RunReport};
use crate::classify::DocumentClassifier;
use crate::ingest::pdf;
use crate::output::csv_report::{self, ReportLayout};
use crate::output::summary::Summary;
use crate::patterns::PatternTable;

/// Scan `dir` for PDFs, extracting up to `concurrency` files at a time.
pub async fn run(
    dir: &Path,
    classifier: &dyn DocumentClassifier,
    table: &PatternTable,
    settings: &ReportSettings,
    concurrency: usize,
) -> Result<RunReport> {
    if !dir.is_dir() {
        anyhow::bail!("{} is not a directory", dir.display());
    }

    let documents = pdf::load_documents(dir, concurrency).await?;
    if documents.is_empty() {
        warn!(dir = %dir.display(), "No PDF files found");
    }
    let unreadable = documents.iter().filter(|d| d.text().is_none()).count();
    info!(files = documents.len(), unreadable, "PDF extraction finished");

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
