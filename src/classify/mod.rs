// Keyword/co-occurrence classification of documents into topical categories.

pub mod keyword;
pub mod matcher;
pub mod result;
pub mod traits;

pub use keyword::KeywordClassifier;
pub use matcher::MatchOptions;
pub use result::{CategoryFlags, ClassificationResult};
pub use traits::DocumentClassifier;
