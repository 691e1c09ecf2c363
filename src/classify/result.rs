// Classification results: purely boolean flags per category.

use serde::Serialize;

/// Flags for one category in one document.
///
/// `concentration` is `None` for categories that don't track concentration
/// context. When present it can only be true if `present` is true; the
/// constructor enforces that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryFlags {
    name: String,
    present: bool,
    concentration: Option<bool>,
}

impl CategoryFlags {
    pub fn new(name: impl Into<String>, present: bool, concentration: Option<bool>) -> Self {
        Self {
            name: name.into(),
            present,
            concentration: concentration.map(|c| c && present),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn present(&self) -> bool {
        self.present
    }

    pub fn concentration(&self) -> Option<bool> {
        self.concentration
    }
}

/// The outcome of classifying one document, in category (column) order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    flags: Vec<CategoryFlags>,
}

impl ClassificationResult {
    pub fn new(flags: Vec<CategoryFlags>) -> Self {
        Self { flags }
    }

    pub fn flags(&self) -> &[CategoryFlags] {
        &self.flags
    }

    pub fn get(&self, name: &str) -> Option<&CategoryFlags> {
        self.flags.iter().find(|f| f.name == name)
    }

    /// Presence flag for `name`; unknown categories read as absent.
    pub fn is_present(&self, name: &str) -> bool {
        self.get(name).is_some_and(CategoryFlags::present)
    }

    /// Concentration flag for `name`; unknown or non-tracking categories
    /// read as false.
    pub fn has_concentration(&self, name: &str) -> bool {
        self.get(name)
            .and_then(CategoryFlags::concentration)
            .unwrap_or(false)
    }

    /// True when no category matched at all.
    pub fn is_negative(&self) -> bool {
        self.flags.iter().all(|f| !f.present)
    }
}
