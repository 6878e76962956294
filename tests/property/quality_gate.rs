//! Property-based tests for quality gate invariants

use autoblog::quality::{
    confidence_for, count_sections, count_words, validate, QualityThresholds, StrictnessProfile,
    TOO_SHORT_ISSUE,
};
use proptest::prelude::*;

fn thresholds() -> impl Strategy<Value = QualityThresholds> {
    (0usize..6, 0usize..600, 1usize..300).prop_map(|(min_sections, min_words, min_chars)| {
        QualityThresholds {
            min_sections,
            min_words,
            min_chars,
        }
    })
}

/// Valid exactly when no issues are reported, with confidence tracking the issue count
#[test]
fn test_verdict_matches_issues() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(any::<String>(), thresholds()), |(text, thresholds)| {
            let result = validate(&text, &thresholds);

            prop_assert_eq!(result.valid, result.issues.is_empty());
            prop_assert!(result.issues.len() <= 3);
            prop_assert!((0.0..=1.0).contains(&result.confidence));
            prop_assert_eq!(result.confidence, confidence_for(result.issues.len()));

            Ok(())
        })
        .unwrap();
}

/// Text under the character floor reports exactly one issue and zero counts
#[test]
fn test_short_text_single_issue() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&"[a-z #\n]{0,99}", |text| {
            let result = validate(&text, &QualityThresholds::default());

            prop_assert_eq!(result.issues, vec![TOO_SHORT_ISSUE.to_string()]);
            prop_assert_eq!(result.word_count, 0);
            prop_assert_eq!(result.section_count, 0);
            prop_assert!(!result.valid);

            Ok(())
        })
        .unwrap();
}

/// Counts reported by the gate agree with the standalone counters
#[test]
fn test_counts_agree_with_counters() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&"(## [a-z]{1,8}\n|[a-z]{1,12} |\n){20,120}", |text| {
            let thresholds = QualityThresholds {
                min_sections: 0,
                min_words: 0,
                min_chars: 1,
            };
            let result = validate(&text, &thresholds);
            prop_assume!(!text.trim().is_empty());

            prop_assert_eq!(result.word_count, count_words(&text));
            prop_assert_eq!(result.section_count, count_sections(&text));

            Ok(())
        })
        .unwrap();
}

/// A text that passes a stricter profile passes every looser one
#[test]
fn test_profiles_are_ordered() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(0usize..6, 150usize..500), |(sections, filler)| {
            let mut text = String::new();
            for i in 0..sections {
                text.push_str(&format!("## Section {}\n\n", i));
            }
            text.push_str(&vec!["tide"; filler].join(" "));
            text.push_str("\n\nIn conclusion, that is all.");

            let strict = validate(&text, &StrictnessProfile::Strict.thresholds()).valid;
            let standard = validate(&text, &StrictnessProfile::Standard.thresholds()).valid;
            let lenient = validate(&text, &StrictnessProfile::Lenient.thresholds()).valid;

            prop_assert!(!strict || standard);
            prop_assert!(!standard || lenient);

            Ok(())
        })
        .unwrap();
}
