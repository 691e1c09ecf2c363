// Pipelines: ingest -> classify -> report, one per input kind.
//
// Each run reads its input, classifies every document with the shared
// classifier, writes the CSV report, and hands back the rows and summary
// for terminal display.

pub mod pdfs;
pub mod records;

use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::classify::{ClassificationResult, DocumentClassifier};
use crate::document::Document;
use crate::output::summary::Summary;

/// A document together with its classification.
#[derive(Debug, Clone)]
pub struct AnalyzedDocument {
    pub document: Document,
    pub result: ClassificationResult,
}

/// Where and how reports are written.
#[derive(Debug, Clone)]
pub struct ReportSettings {
    pub output_dir: PathBuf,
    /// Maximum characters of document text kept in the Abstract column
    pub preview_chars: usize,
}

/// Everything a finished run produced.
#[derive(Debug)]
pub struct RunReport {
    pub rows: Vec<AnalyzedDocument>,
    pub summary: Summary,
    pub csv_path: PathBuf,
}

/// Classify every document, preserving input order.
pub fn classify_documents(
    classifier: &dyn DocumentClassifier,
    documents: Vec<Document>,
) -> Vec<AnalyzedDocument> {
    let pb = ProgressBar::new(documents.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Classifying [{bar:30}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let rows: Vec<AnalyzedDocument> = documents
        .into_iter()
        .map(|document| {
            let result = classifier.classify(&document);
            pb.inc(1);
            AnalyzedDocument { document, result }
        })
        .collect();
    pb.finish_and_clear();

    let negative = rows.iter().filter(|r| r.result.is_negative()).count();
    info!(documents = rows.len(), negative, "Classified documents");
    rows
}
