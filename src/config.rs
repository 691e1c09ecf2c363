use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::classify::MatchOptions;
use crate::pipeline::ReportSettings;

/// Central configuration loaded from environment variables.
///
/// Nothing is required; every setting has a default. The .env file is
/// loaded automatically at startup via dotenvy, and CLI flags override
/// whatever is loaded here.
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON pattern table to use instead of the built-in one (LITSCAN_PATTERNS)
    pub patterns_path: Option<PathBuf>,
    /// Directory for CSV reports (LITSCAN_OUTPUT_DIR, default ./results)
    pub output_dir: PathBuf,
    /// Characters of document text kept in the Abstract column
    /// (LITSCAN_ABSTRACT_PREVIEW, default 300)
    pub abstract_preview: usize,
    /// Max words between a category term and a concentration term
    /// (LITSCAN_WINDOW, default 5)
    pub window: usize,
    /// Word-boundary anchoring for presence patterns (LITSCAN_ANCHOR_PRESENCE)
    pub anchor_presence: bool,
    /// PDFs extracted in parallel (LITSCAN_CONCURRENCY, default 4)
    pub concurrency: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset variables take their defaults; set-but-malformed numeric
    /// variables are an error rather than being silently ignored.
    pub fn load() -> Result<Self> {
        let defaults = MatchOptions::default();

        Ok(Self {
            patterns_path: env::var("LITSCAN_PATTERNS")
                .ok()
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
            output_dir: env::var("LITSCAN_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./results")),
            abstract_preview: parse_var("LITSCAN_ABSTRACT_PREVIEW", 300)?,
            window: parse_var("LITSCAN_WINDOW", defaults.window)?,
            anchor_presence: parse_flag(
                "LITSCAN_ANCHOR_PRESENCE",
                env::var("LITSCAN_ANCHOR_PRESENCE").ok().as_deref(),
            )?,
            concurrency: parse_var("LITSCAN_CONCURRENCY", 4)?,
        })
    }

    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            window: self.window,
            anchor_presence: self.anchor_presence,
        }
    }

    pub fn report_settings(&self) -> ReportSettings {
        ReportSettings {
            output_dir: self.output_dir.clone(),
            preview_chars: self.abstract_preview,
        }
    }
}

fn parse_var(name: &str, default: usize) -> Result<usize> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .with_context(|| format!("{name} must be a non-negative integer, got '{value}'")),
        _ => Ok(default),
    }
}

/// Interpret an on/off variable. Unset or empty means off; anything other
/// than the usual spellings is an error, not a silent "off".
fn parse_flag(name: &str, value: Option<&str>) -> Result<bool> {
    let value = value.map(str::trim).unwrap_or("");
    match value.to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" | "off" => Ok(false),
        "1" | "true" | "yes" | "on" => Ok(true),
        _ => anyhow::bail!("{name} must be true/false (or 1/0, yes/no, on/off), got '{value}'"),
    }
}
