// DOI extraction from saved HTML pages (search result lists, reference pages).
//
// Matches the Crossref-recommended DOI shape anywhere in the raw text,
// de-duplicates, and sorts. Resolution and PDF download are not done here;
// the output is a plain list, one DOI per line, for downstream tools.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};
use tracing::info;

const DOI_PATTERN: &str = r"\b10\.\d{4,9}/[-._;()/:A-Z0-9]+\b";

/// Default file name for saved DOI lists.
pub const DEFAULT_DOI_FILE: &str = "dois.txt";

fn doi_regex() -> Result<Regex> {
    Ok(RegexBuilder::new(DOI_PATTERN).case_insensitive(true).build()?)
}

/// Every distinct DOI in `html`, sorted ascending.
pub fn extract_dois(html: &str) -> Result<Vec<String>> {
    let re = doi_regex()?;
    let unique: BTreeSet<&str> = re.find_iter(html).map(|m| m.as_str()).collect();
    Ok(unique.into_iter().map(str::to_string).collect())
}

/// Keep the first `n` DOIs; `None` keeps them all.
pub fn select_first(dois: Vec<String>, n: Option<usize>) -> Vec<String> {
    match n {
        Some(n) => dois.into_iter().take(n).collect(),
        None => dois,
    }
}

/// Where DOI lists go when no path is given: the desktop if the platform
/// has one, otherwise the current directory.
pub fn default_output_path() -> PathBuf {
    dirs::desktop_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DOI_FILE)
}

/// Write one DOI per line, creating parent directories as needed.
pub fn write_doi_list(path: &Path, dois: &[String]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let mut body = dois.join("\n");
    if !body.is_empty() {
        body.push('\n');
    }
    std::fs::write(path, body).with_context(|| format!("failed to write {}", path.display()))?;

    info!(path = %path.display(), count = dois.len(), "Saved DOI list");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_dedupes_and_sorts() {
        let html = r#"
            <a href="https://doi.org/10.1016/j.watres.2020.115678">link</a>
            <span>doi:10.1021/acs.est.0c05321</span>
            <a href="https://doi.org/10.1016/j.watres.2020.115678">again</a>
        "#;
        let dois = extract_dois(html).unwrap();
        assert_eq!(
            dois,
            vec!["10.1016/j.watres.2020.115678", "10.1021/acs.est.0c05321"]
        );
    }

    #[test]
    fn test_short_registrant_ignored() {
        assert!(extract_dois("10.123/abc").unwrap().is_empty());
    }

    #[test]
    fn test_select_first() {
        let dois = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert_eq!(select_first(dois.clone(), Some(2)), vec!["a", "b"]);
        assert_eq!(select_first(dois.clone(), Some(10)).len(), 3);
        assert_eq!(select_first(dois, None).len(), 3);
    }
}
