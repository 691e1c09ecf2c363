// Batch statistics over classification results.
//
// Per-category presence counts, per-category concentration counts, and two
// kinds of combination counts: each "primary" category (one that doesn't
// track concentration, i.e. the target compound) paired with every
// concentration-aware category, and documents matching all aware
// categories at once.

use serde::Serialize;

use crate::classify::ClassificationResult;
use crate::patterns::PatternTable;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairCount {
    pub first: String,
    pub second: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub presence: Vec<CategoryCount>,
    pub concentration: Vec<CategoryCount>,
    pub pairs: Vec<PairCount>,
    /// Documents in which every concentration-aware category is present
    pub all_matrices: usize,
}

impl Summary {
    pub fn compute(table: &PatternTable, results: &[ClassificationResult]) -> Self {
        let presence = table
            .categories
            .iter()
            .map(|c| CategoryCount {
                name: c.name.clone(),
                count: count_where(results, |r| r.is_present(&c.name)),
            })
            .collect();

        let concentration = table
            .concentration_categories()
            .map(|c| CategoryCount {
                name: c.name.clone(),
                count: count_where(results, |r| r.has_concentration(&c.name)),
            })
            .collect();

        let mut pairs = Vec::new();
        for primary in table.categories.iter().filter(|c| !c.concentration_aware) {
            for matrix in table.concentration_categories() {
                pairs.push(PairCount {
                    first: primary.name.clone(),
                    second: matrix.name.clone(),
                    count: count_where(results, |r| {
                        r.is_present(&primary.name) && r.is_present(&matrix.name)
                    }),
                });
            }
        }

        let aware: Vec<&str> = table
            .concentration_categories()
            .map(|c| c.name.as_str())
            .collect();
        let all_matrices = if aware.is_empty() {
            0
        } else {
            count_where(results, |r| aware.iter().all(|name| r.is_present(name)))
        };

        Self {
            total: results.len(),
            presence,
            concentration,
            pairs,
            all_matrices,
        }
    }
}

fn count_where(
    results: &[ClassificationResult],
    pred: impl Fn(&ClassificationResult) -> bool,
) -> usize {
    results.iter().filter(|r| pred(*r)).count()
}
