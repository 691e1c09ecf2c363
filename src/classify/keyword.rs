// Keyword classifier: compiles a PatternTable once and classifies documents
// against it.
//
// For each category: presence first; then, for concentration-aware
// categories that are present, the windowed co-occurrence check. Absent
// categories skip co-occurrence entirely and report false.

use anyhow::Result;
use tracing::debug;

use super::matcher::{ConcentrationContext, ConcentrationPatternSet, KeywordSet, MatchOptions};
use super::result::{CategoryFlags, ClassificationResult};
use super::traits::DocumentClassifier;
use crate::document::Document;
use crate::patterns::PatternTable;

struct CompiledCategory {
    keywords: KeywordSet,
    concentration: Option<ConcentrationContext>,
}

/// Regex keyword classifier built from a pattern table.
///
/// Immutable once built, so a single instance can be shared across threads.
pub struct KeywordClassifier {
    categories: Vec<CompiledCategory>,
    options: MatchOptions,
}

impl KeywordClassifier {
    /// Compile every pattern in `table`. Any malformed pattern fails the
    /// whole build.
    pub fn new(table: &PatternTable, options: MatchOptions) -> Result<Self> {
        table.validate()?;

        let concentration = ConcentrationPatternSet::compile(&table.concentration_patterns)?;

        let mut categories = Vec::with_capacity(table.categories.len());
        for def in &table.categories {
            let keywords = KeywordSet::compile(&def.name, &def.patterns, &options)?;
            let context = if def.concentration_aware {
                Some(ConcentrationContext::compile(
                    &keywords,
                    &concentration,
                    options.window,
                )?)
            } else {
                None
            };
            categories.push(CompiledCategory {
                keywords,
                concentration: context,
            });
        }

        debug!(
            categories = categories.len(),
            patterns = table.pattern_count(),
            window = options.window,
            anchor_presence = options.anchor_presence,
            "Compiled keyword classifier"
        );

        Ok(Self {
            categories,
            options,
        })
    }

    /// The options the classifier was compiled with.
    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Category names in column order.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.keywords.name())
    }

    /// Classify a bare (already normalized) text. `None` and `""` both
    /// produce an all-negative result.
    pub fn classify_text(&self, text: Option<&str>) -> ClassificationResult {
        let text = text.unwrap_or("");

        let flags = self
            .categories
            .iter()
            .map(|category| {
                let present = category.keywords.present(text);
                let concentration = category
                    .concentration
                    .as_ref()
                    .map(|ctx| present && ctx.matches(text));
                CategoryFlags::new(category.keywords.name(), present, concentration)
            })
            .collect();

        ClassificationResult::new(flags)
    }
}

impl DocumentClassifier for KeywordClassifier {
    fn classify(&self, document: &Document) -> ClassificationResult {
        self.classify_text(document.text())
    }
}
