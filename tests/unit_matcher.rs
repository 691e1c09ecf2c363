// Unit tests for the keyword classifier against the built-in pattern table.
//
// Covers presence (case, boundaries, CJK), the co-occurrence window
// (distance, direction), gating, determinism, and configuration errors.

use litscan::classify::{DocumentClassifier, KeywordClassifier, MatchOptions};
use litscan::document::Document;
use litscan::patterns::PatternTable;

fn builtin() -> KeywordClassifier {
    KeywordClassifier::new(&PatternTable::builtin().unwrap(), MatchOptions::default()).unwrap()
}

fn strict() -> KeywordClassifier {
    let options = MatchOptions {
        anchor_presence: true,
        ..MatchOptions::default()
    };
    KeywordClassifier::new(&PatternTable::builtin().unwrap(), options).unwrap()
}

const FILLER_20: &str = "one two three four five six seven eight nine ten \
                         eleven twelve thirteen fourteen fifteen sixteen \
                         seventeen eighteen nineteen twenty";

// ============================================================
// Empty input
// ============================================================

#[test]
fn empty_text_all_flags_false() {
    let classifier = builtin();
    for result in [classifier.classify_text(Some("")), classifier.classify_text(None)] {
        assert!(result.is_negative());
        for flags in result.flags() {
            assert!(!flags.present());
            assert_ne!(flags.concentration(), Some(true));
        }
    }
}

#[test]
fn unreadable_document_all_flags_false() {
    let result = builtin().classify(&Document::unreadable(7));
    assert!(result.is_negative());
    assert_eq!(result.flags().len(), 4);
}

// ============================================================
// Presence
// ============================================================

#[test]
fn presence_case_insensitive() {
    let classifier = builtin();
    let upper = classifier.classify_text(Some("SEDIMENT sample"));
    let lower = classifier.classify_text(Some("sediment sample"));
    assert!(upper.is_present("Sediment"));
    assert_eq!(upper, lower);
}

#[test]
fn presence_is_substring_level_by_default() {
    // `bio` is deliberately loose in the presence check
    let result = builtin().classify_text(Some("biodegradable polymers"));
    assert!(result.is_present("Biological"));
}

#[test]
fn strict_boundaries_reject_substrings() {
    let result = strict().classify_text(Some("biodegradable polymers"));
    assert!(!result.is_present("Biological"));

    let result = strict().classify_text(Some("fish and bio samples"));
    assert!(result.is_present("Biological"));
}

#[test]
fn presence_matches_chemical_name_variants() {
    let classifier = builtin();
    for text in [
        "p-phenylenediamine in hair",
        "p phenylenediamine",
        "1,4-diaminobenzene",
        "n,n-dimethyl-p-phenylenediamine",
        "permanent hair dye users",
    ] {
        assert!(
            classifier.classify_text(Some(text)).is_present("PPD"),
            "expected PPD in: {text}"
        );
    }
}

#[test]
fn presence_matches_cjk_terms() {
    let result = builtin().classify_text(Some("沉积物中对苯二胺的分布"));
    assert!(result.is_present("PPD"));
    assert!(result.is_present("Sediment"));
    assert!(!result.is_present("Water"));
}

// ============================================================
// Co-occurrence window
// ============================================================

#[test]
fn concentration_within_window() {
    let result = builtin().classify_text(Some(
        "sediment core collected; concentration of the compound was 5 mg/kg",
    ));
    assert!(result.is_present("Sediment"));
    assert!(result.has_concentration("Sediment"));
}

#[test]
fn concentration_beyond_window() {
    let text = format!("sediment {FILLER_20} concentration");
    let result = builtin().classify_text(Some(text.as_str()));
    assert!(result.is_present("Sediment"));
    assert!(!result.has_concentration("Sediment"));
}

#[test]
fn concentration_before_context_term() {
    let result =
        builtin().classify_text(Some("concentration of the compound was high in the sediment"));
    assert!(result.is_present("Sediment"));
    assert!(!result.has_concentration("Sediment"));
}

#[test]
fn concentration_requires_separator_after_context_term() {
    // "sediments" is not "sediment" followed by a non-word character
    let result = builtin().classify_text(Some("sediments concentration"));
    assert!(result.is_present("Sediment"));
    assert!(!result.has_concentration("Sediment"));
}

#[test]
fn concentration_with_unit_symbol() {
    let result = builtin().classify_text(Some("water samples contained 3 μg/l"));
    assert!(result.has_concentration("Water"));
}

#[test]
fn concentration_with_cubic_metre_units() {
    let classifier = builtin();
    for text in [
        "water contained 5 ng/m³.",
        "water contained 5 ng/m³ overall",
        "water contained 5 μg/m³",
    ] {
        assert!(
            classifier.classify_text(Some(text)).has_concentration("Water"),
            "expected Water concentration in: {text}"
        );
    }
}

#[test]
fn concentration_with_cjk_terms() {
    let result = builtin().classify_text(Some("沉积物 浓度 较高"));
    assert!(result.has_concentration("Sediment"));
}

#[test]
fn custom_window_size() {
    let table = PatternTable::from_json(
        r#"{
            "categories": [{"name": "Water", "concentration_aware": true, "patterns": ["water"]}],
            "concentration_patterns": ["level"]
        }"#,
    )
    .unwrap();
    let tight = KeywordClassifier::new(
        &table,
        MatchOptions {
            window: 0,
            ..MatchOptions::default()
        },
    )
    .unwrap();

    assert!(tight.classify_text(Some("water level")).has_concentration("Water"));
    assert!(!tight.classify_text(Some("water the level")).has_concentration("Water"));
}

// ============================================================
// Invariants
// ============================================================

#[test]
fn concentration_implies_presence() {
    let classifier = builtin();
    let texts = [
        "sediment concentration",
        "concentration sediment",
        "fish tissue levels were measured",
        "water quality analysis",
        "ppd exposure",
        "",
        "levels measured detected quantified",
    ];
    for text in texts {
        let result = classifier.classify_text(Some(text));
        for flags in result.flags() {
            if flags.concentration() == Some(true) {
                assert!(flags.present(), "{} concentration without presence in: {text}", flags.name());
            }
        }
    }
}

#[test]
fn primary_category_never_has_concentration_flag() {
    let result = builtin().classify_text(Some("ppd concentration of 5 mg/l"));
    assert!(result.is_present("PPD"));
    assert_eq!(result.get("PPD").unwrap().concentration(), None);
}

#[test]
fn classification_is_deterministic() {
    let classifier = builtin();
    let text = "zebrafish liver tissue concentration of ppd after wastewater effluent exposure";
    let first = classifier.classify_text(Some(text));
    for _ in 0..5 {
        assert_eq!(classifier.classify_text(Some(text)), first);
    }
}

// ============================================================
// Configuration errors
// ============================================================

#[test]
fn malformed_pattern_aborts_construction() {
    let table = PatternTable::from_json(
        r#"{
            "categories": [{"name": "Soil", "patterns": ["soil", "(unclosed"]}],
            "concentration_patterns": ["level"]
        }"#,
    )
    .unwrap();
    let err = match KeywordClassifier::new(&table, MatchOptions::default()) {
        Ok(_) => panic!("malformed pattern should be rejected"),
        Err(e) => e,
    };
    let message = format!("{err:#}");
    assert!(message.contains("(unclosed"), "got: {message}");
}

#[test]
fn malformed_json_is_rejected() {
    assert!(PatternTable::from_json("{ not json").is_err());
}
