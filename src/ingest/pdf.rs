// PDF folder ingest: one Document per PDF, text from pdf-extract.
//
// Extraction is CPU-bound and the PDF library can panic on malformed files,
// so each file is extracted inside `spawn_blocking`. A panic surfaces as a
// JoinError and is handled like any other extraction failure: the document
// is kept, with no text, and classifies as all-negative.
//
// `buffered` (not `buffer_unordered`) keeps documents in folder order.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::document::Document;

/// List `*.pdf` files (extension matched case-insensitively) in `dir`,
/// sorted by file name. Subdirectories are not searched.
pub fn list_pdfs(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory {}", dir.display()))?;

    let mut pdfs = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && has_pdf_extension(&path) {
            pdfs.push(path);
        }
    }
    pdfs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(pdfs)
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

/// Extract the full text of one PDF.
pub fn extract_text(path: &Path) -> Result<String> {
    pdf_extract::extract_text(path)
        .map_err(|e| anyhow::anyhow!("{e:?}"))
        .with_context(|| format!("failed to extract text from {}", path.display()))
}

/// Display name used as the document title.
pub fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Extract every PDF in `dir` into a Document, `concurrency` files at a time.
///
/// Never fails on a single bad file; only an unreadable directory is an error.
pub async fn load_documents(dir: &Path, concurrency: usize) -> Result<Vec<Document>> {
    let pdfs = list_pdfs(dir)?;
    info!(dir = %dir.display(), count = pdfs.len(), "Found PDF files");

    let pb = ProgressBar::new(pdfs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Extracting [{bar:30}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let documents: Vec<Document> = stream::iter(pdfs.into_iter().enumerate().map(|(i, path)| {
        let pb = pb.clone();
        async move {
            let label = file_label(&path);
            let extracted = {
                let path = path.clone();
                tokio::task::spawn_blocking(move || extract_text(&path)).await
            };

            let text = match extracted {
                Ok(Ok(text)) => Some(text),
                Ok(Err(e)) => {
                    let error = format!("{e:#}");
                    warn!(file = %label, %error, "PDF extraction failed");
                    None
                }
                Err(e) => {
                    warn!(file = %label, error = %e, "PDF extraction panicked");
                    None
                }
            };
            pb.inc(1);

            Document::new(i + 1, text.as_deref()).with_title(label)
        }
    }))
    .buffered(concurrency.max(1))
    .collect()
    .await;

    pb.finish_and_clear();
    Ok(documents)
}
