// Classifier trait: the seam between document ingest and reporting.
//
// Pipelines only need "document in, flags out". The keyword classifier is
// the implementation in use; anything producing the same flags can replace
// it without touching ingest or output code.

use super::result::ClassificationResult;
use crate::document::Document;

/// Trait for assigning category flags to a document.
///
/// Implementations must be pure: no I/O, no state carried between calls.
pub trait DocumentClassifier: Send + Sync {
    /// Classify one document. Unreadable or empty documents get all flags false.
    fn classify(&self, document: &Document) -> ClassificationResult;

    /// Classify a batch, one result per document, in input order.
    fn classify_all(&self, documents: &[Document]) -> Vec<ClassificationResult> {
        documents.iter().map(|d| self.classify(d)).collect()
    }
}
