// Pattern tables: the category definitions the classifier runs on.

pub mod table;

pub use table::{CategoryDef, PatternTable};
