// litscan: keyword and concentration-context screening for literature reviews
//
// This is the library root. `classify` and `patterns` are the core; the
// other modules get documents in and reports out.

pub mod classify;
pub mod config;
pub mod document;
pub mod doi;
pub mod ingest;
pub mod output;
pub mod patterns;
pub mod pipeline;
