// Compiled matchers for category presence and concentration co-occurrence.
//
// Presence: does any category pattern occur anywhere in the text?
//
// Co-occurrence: does a category term appear, followed within a short window
// of words by a concentration term? For each context pattern W and
// concentration pattern C the check is
//
//   \b W \W+ (?:\w+\W+){0,window}? C \b
//
// The regex crate's `\w` leaves out "other number" characters such as `³`,
// so a plain trailing `\b` after `ng/m³` would demand a letter next. Patterns
// ending in such a character close with "non-alphanumeric or end of text"
// instead.
//
// Rather than compiling |W| x |C| separate regexes, both sides are folded
// into alternations. `is_match` on the combined regex holds exactly when some
// (W, C) pair matches, since concatenation distributes over alternation.
//
// Every pattern is compiled on its own first so a syntax error can name the
// pattern and its category. A bad pattern is a configuration error, never a
// per-document one.

use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};

/// Word windows and anchoring get large with Unicode \w; give the compiler room.
const REGEX_SIZE_LIMIT: usize = 64 * 1024 * 1024;

/// Tuning knobs shared by all matchers in a classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    /// Maximum number of intervening words between a context term and a
    /// concentration term
    pub window: usize,
    /// Require word boundaries around presence patterns. Off by default, so
    /// `bio` matches inside `biodegradable`.
    pub anchor_presence: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            window: 5,
            anchor_presence: false,
        }
    }
}

/// A compiled category keyword set.
#[derive(Debug, Clone)]
pub struct KeywordSet {
    name: String,
    patterns: Vec<String>,
    presence: Option<Regex>,
}

impl KeywordSet {
    /// Validate and compile `patterns` for the category `name`.
    pub fn compile(name: &str, patterns: &[String], options: &MatchOptions) -> Result<Self> {
        check_patterns(name, patterns)?;

        let presence = if patterns.is_empty() {
            None
        } else {
            let source = if options.anchor_presence {
                format!(r"\b(?:{})", closed_alternation(patterns))
            } else {
                alternation(patterns)
            };
            Some(build(&source).with_context(|| format!("failed to compile category '{name}'"))?)
        };

        Ok(Self {
            name: name.to_string(),
            patterns: patterns.to_vec(),
            presence,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// True iff any pattern occurs in `text`. Empty text never matches.
    pub fn present(&self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        self.presence.as_ref().is_some_and(|re| re.is_match(text))
    }
}

/// The shared measurement/quantification vocabulary.
#[derive(Debug, Clone)]
pub struct ConcentrationPatternSet {
    patterns: Vec<String>,
}

impl ConcentrationPatternSet {
    pub fn compile(patterns: &[String]) -> Result<Self> {
        check_patterns("concentration_patterns", patterns)?;
        Ok(Self {
            patterns: patterns.to_vec(),
        })
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Directional, windowed co-occurrence of one category's terms with the
/// concentration vocabulary.
#[derive(Debug, Clone)]
pub struct ConcentrationContext {
    regex: Option<Regex>,
}

impl ConcentrationContext {
    pub fn compile(
        context: &KeywordSet,
        concentration: &ConcentrationPatternSet,
        window: usize,
    ) -> Result<Self> {
        if context.patterns().is_empty() || concentration.is_empty() {
            return Ok(Self { regex: None });
        }

        let source = format!(
            r"\b(?:{})\W+(?:\w+\W+){{0,{window}}}?(?:{})",
            alternation(context.patterns()),
            closed_alternation(concentration.patterns()),
        );
        let regex = build(&source).with_context(|| {
            format!(
                "failed to compile concentration context for category '{}'",
                context.name()
            )
        })?;

        Ok(Self { regex: Some(regex) })
    }

    /// True iff a context term is followed, within the window, by a
    /// concentration term. Empty text never matches.
    pub fn matches(&self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        self.regex.as_ref().is_some_and(|re| re.is_match(text))
    }
}

/// Compile each pattern alone so errors point at the offending entry.
fn check_patterns(owner: &str, patterns: &[String]) -> Result<()> {
    for pattern in patterns {
        build(pattern).with_context(|| format!("invalid pattern '{pattern}' in '{owner}'"))?;
    }
    Ok(())
}

/// Builds `(?:p1)|(?:p2)|...`, grouping each pattern so embedded alternations stay local.
fn alternation(patterns: &[String]) -> String {
    patterns
        .iter()
        .map(|p| format!("(?:{p})"))
        .collect::<Vec<_>>()
        .join("|")
}

/// Like [`alternation`], but every branch must end at a word boundary.
fn closed_alternation(patterns: &[String]) -> String {
    let (symbol_end, word_end): (Vec<String>, Vec<String>) =
        patterns.iter().cloned().partition(|p| ends_in_number_symbol(p));

    let mut branches = Vec::with_capacity(2);
    if !word_end.is_empty() {
        branches.push(format!(r"(?:{})\b", alternation(&word_end)));
    }
    if !symbol_end.is_empty() {
        branches.push(format!(
            r"(?:{})(?:[^\p{{L}}\p{{N}}_]|$)",
            alternation(&symbol_end)
        ));
    }
    branches.join("|")
}

/// True when the pattern's last character is a number sign outside `\w`
/// (superscripts, fractions, circled digits).
fn ends_in_number_symbol(pattern: &str) -> bool {
    pattern
        .chars()
        .last()
        .is_some_and(|c| c.is_numeric() && !c.is_alphabetic() && !c.is_ascii_digit())
}

fn build(source: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(source)
        .case_insensitive(true)
        .size_limit(REGEX_SIZE_LIMIT)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_presence_is_case_insensitive() {
        let set =
            KeywordSet::compile("Sediment", &strings(&["sediment"]), &MatchOptions::default())
                .unwrap();
        assert!(set.present("SEDIMENT sample"));
        assert!(set.present("sediment sample"));
    }

    #[test]
    fn test_presence_empty_text() {
        let set = KeywordSet::compile("Any", &strings(&[".*"]), &MatchOptions::default()).unwrap();
        assert!(!set.present(""));
    }

    #[test]
    fn test_anchored_presence() {
        let loose =
            KeywordSet::compile("Bio", &strings(&["bio"]), &MatchOptions::default()).unwrap();
        let strict = KeywordSet::compile(
            "Bio",
            &strings(&["bio"]),
            &MatchOptions {
                anchor_presence: true,
                ..MatchOptions::default()
            },
        )
        .unwrap();
        assert!(loose.present("biodegradable"));
        assert!(!strict.present("biodegradable"));
        assert!(strict.present("bio indicators"));
    }

    #[test]
    fn test_invalid_pattern_names_offender() {
        let patterns = strings(&["water", "aque(ous"]);
        let err = KeywordSet::compile("Water", &patterns, &MatchOptions::default()).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("aque(ous"), "got: {message}");
        assert!(message.contains("Water"), "got: {message}");
    }

    #[test]
    fn test_window_bounds() {
        let opts = MatchOptions::default();
        let ctx = KeywordSet::compile("Water", &strings(&["water"]), &opts).unwrap();
        let conc = ConcentrationPatternSet::compile(&strings(&["level"])).unwrap();
        let matcher = ConcentrationContext::compile(&ctx, &conc, opts.window).unwrap();

        assert!(matcher.matches("water level"));
        assert!(matcher.matches("water one two three four five level"));
        assert!(!matcher.matches("water one two three four five six level"));
    }

    #[test]
    fn test_superscript_unit_closes_at_punctuation() {
        let opts = MatchOptions::default();
        let ctx = KeywordSet::compile("Air", &strings(&["air"]), &opts).unwrap();
        let conc = ConcentrationPatternSet::compile(&strings(&["ng/m³", "level"])).unwrap();
        let matcher = ConcentrationContext::compile(&ctx, &conc, opts.window).unwrap();

        assert!(matcher.matches("air contained 5 ng/m³."));
        assert!(matcher.matches("air contained 5 ng/m³"));
        assert!(matcher.matches("air contained 5 ng/m³ overall"));
        assert!(!matcher.matches("air contained 5 ng/m³x"));
        assert!(matcher.matches("air level"));
        assert!(!matcher.matches("air levels"));
    }

    #[test]
    fn test_anchored_presence_with_superscript() {
        let strict = MatchOptions {
            anchor_presence: true,
            ..MatchOptions::default()
        };
        let set = KeywordSet::compile("Volume", &strings(&["m³"]), &strict).unwrap();
        assert!(set.present("5 m³ of water"));
        assert!(!set.present("5 m³x"));
    }

    #[test]
    fn test_number_symbol_endings() {
        assert!(ends_in_number_symbol("μg/m³"));
        assert!(!ends_in_number_symbol("mg/l"));
        assert!(!ends_in_number_symbol("浓度"));
        assert!(!ends_in_number_symbol("pm2"));
        assert!(!ends_in_number_symbol("sediment[\\s-]*core"));
    }

    #[test]
    fn test_empty_concentration_set_never_matches() {
        let opts = MatchOptions::default();
        let ctx = KeywordSet::compile("Water", &strings(&["water"]), &opts).unwrap();
        let conc = ConcentrationPatternSet::compile(&[]).unwrap();
        let matcher = ConcentrationContext::compile(&ctx, &conc, opts.window).unwrap();
        assert!(!matcher.matches("water level"));
    }
}
