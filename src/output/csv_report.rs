// CSV report: one row per document, flags as 0/1.
//
// Column order is fixed by the pattern table:
//
//   Index, Year, Title, Authors,
//   <category>...,                      (every category, table order)
//   <category>_Concentration...,        (concentration-aware ones only)
//   Abstract
//
// With the built-in table that is PPD, Sediment, Water, Biological, then
// Sediment_/Water_/Biological_Concentration.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use tracing::info;

use crate::patterns::PatternTable;
use crate::pipeline::AnalyzedDocument;

/// Column layout derived from a pattern table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLayout {
    categories: Vec<String>,
    concentration: Vec<String>,
}

impl ReportLayout {
    pub fn from_table(table: &PatternTable) -> Self {
        Self {
            categories: table.categories.iter().map(|c| c.name.clone()).collect(),
            concentration: table
                .concentration_categories()
                .map(|c| c.name.clone())
                .collect(),
        }
    }

    pub fn header(&self) -> Vec<String> {
        let mut header: Vec<String> = ["Index", "Year", "Title", "Authors"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        header.extend(self.categories.iter().cloned());
        header.extend(
            self.concentration
                .iter()
                .map(|name| format!("{name}_Concentration")),
        );
        header.push("Abstract".to_string());
        header
    }

    pub fn row(&self, analyzed: &AnalyzedDocument, preview_chars: usize) -> Vec<String> {
        let doc = &analyzed.document;
        let result = &analyzed.result;

        let mut row = vec![
            doc.index.to_string(),
            doc.year.clone(),
            doc.title.clone(),
            doc.authors.clone(),
        ];
        row.extend(
            self.categories
                .iter()
                .map(|name| flag(result.is_present(name))),
        );
        row.extend(
            self.concentration
                .iter()
                .map(|name| flag(result.has_concentration(name))),
        );
        row.push(super::truncate_chars(doc.text().unwrap_or(""), preview_chars));
        row
    }
}

fn flag(value: bool) -> String {
    let s = if value { "1" } else { "0" };
    s.to_string()
}

/// `literature_analysis_<YYYYmmdd_HHMMSS>.csv`
pub fn report_file_name(at: DateTime<Local>) -> String {
    format!("literature_analysis_{}.csv", at.format("%Y%m%d_%H%M%S"))
}

/// Write the report to any writer.
pub fn write_report_to<W: io::Write>(
    writer: W,
    layout: &ReportLayout,
    rows: &[AnalyzedDocument],
    preview_chars: usize,
) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(layout.header())?;
    for analyzed in rows {
        csv.write_record(layout.row(analyzed, preview_chars))?;
    }
    csv.flush()?;
    Ok(())
}

/// Write a timestamped report into `output_dir` (created if missing) and
/// return its path.
pub fn write_report(
    output_dir: &Path,
    layout: &ReportLayout,
    rows: &[AnalyzedDocument],
    preview_chars: usize,
) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory {}", output_dir.display()))?;

    let path = output_dir.join(report_file_name(Local::now()));
    let file = std::fs::File::create(&path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    write_report_to(file, layout, rows, preview_chars)
        .with_context(|| format!("failed to write report {}", path.display()))?;

    info!(path = %path.display(), rows = rows.len(), "Wrote CSV report");
    Ok(path)
}
