// PatternTable: category definitions as data.
//
// A table is an ordered list of categories (each a name, a flag saying
// whether concentration co-occurrence applies, and its regex patterns) plus
// one shared list of concentration patterns. Category order is column order
// in every report.
//
// The built-in table is embedded from default_patterns.json; a replacement
// can be loaded from any JSON file with the same shape.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

const DEFAULT_TABLE_JSON: &str = include_str!("default_patterns.json");

/// One topical category and the patterns that detect it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDef {
    /// Column name in reports (e.g. "Sediment")
    pub name: String,
    /// Whether a `<name>_Concentration` flag is computed for this category
    #[serde(default)]
    pub concentration_aware: bool,
    /// Case-insensitive regex patterns; any match marks the category present
    pub patterns: Vec<String>,
}

/// The complete, immutable set of pattern definitions for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternTable {
    pub categories: Vec<CategoryDef>,
    pub concentration_patterns: Vec<String>,
}

impl PatternTable {
    /// The table shipped with the binary: PPD plus sediment, water and
    /// biological matrices.
    pub fn builtin() -> Result<Self> {
        Self::from_json(DEFAULT_TABLE_JSON).context("built-in pattern table is malformed")
    }

    /// Parse and validate a table from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let table: PatternTable =
            serde_json::from_str(json).context("failed to parse pattern table JSON")?;
        table.validate()?;
        Ok(table)
    }

    /// Load a table from a JSON file on disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read pattern table {}", path.display()))?;
        let table = Self::from_json(&json)
            .with_context(|| format!("invalid pattern table {}", path.display()))?;
        info!(
            path = %path.display(),
            categories = table.categories.len(),
            "Loaded pattern table"
        );
        Ok(table)
    }

    /// Load from `path` when given, otherwise fall back to the built-in table.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Self::builtin(),
        }
    }

    /// Structural checks. Regex syntax is checked later, when the
    /// classifier compiles the table.
    pub fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            anyhow::bail!("pattern table defines no categories");
        }

        let mut seen = HashSet::new();
        for category in &self.categories {
            if category.name.trim().is_empty() {
                anyhow::bail!("pattern table has a category with an empty name");
            }
            if !seen.insert(category.name.as_str()) {
                anyhow::bail!("duplicate category name '{}' in pattern table", category.name);
            }
            if category.patterns.is_empty() {
                warn!(category = %category.name, "Category has no patterns and will never match");
            }
        }

        if self.concentration_patterns.is_empty()
            && self.categories.iter().any(|c| c.concentration_aware)
        {
            warn!("No concentration patterns defined; concentration flags will always be 0");
        }

        Ok(())
    }

    /// The concentration-aware categories, in column order.
    pub fn concentration_categories(&self) -> impl Iterator<Item = &CategoryDef> {
        self.categories.iter().filter(|c| c.concentration_aware)
    }

    /// Total number of category patterns (excluding concentration patterns).
    pub fn pattern_count(&self) -> usize {
        self.categories.iter().map(|c| c.patterns.len()).sum()
    }
}
