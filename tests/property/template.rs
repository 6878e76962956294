//! Property-based tests for template synthesis

use autoblog::quality::{validate, StrictnessProfile};
use autoblog::synthesis::synthesize;
use autoblog::topic::{ContentType, TopicRequest};
use proptest::prelude::*;

fn topic_strategy() -> impl Strategy<Value = TopicRequest> {
    (
        "[A-Za-z][A-Za-z0-9 '-]{0,40}",
        prop::sample::select(ContentType::ALL.to_vec()),
        "[a-z ]{1,20}",
        "[a-z ]{1,40}",
        prop::collection::vec("[a-z]{1,12}", 1..5),
        1u32..5000,
    )
        .prop_map(
            |(subject, content_type, tone, angle, keywords, estimated_words)| TopicRequest {
                subject,
                content_type,
                tone,
                angle,
                keywords,
                estimated_words,
                category: None,
                target_audience: None,
                reasoning: None,
            },
        )
}

/// Every synthesized article clears every built-in profile
#[test]
fn test_template_passes_every_profile() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&topic_strategy(), |topic| {
            let body = synthesize(&topic);
            for profile in StrictnessProfile::ALL {
                let result = validate(&body, &profile.thresholds());
                prop_assert!(
                    result.valid,
                    "{} / {}: {:?}",
                    topic.content_type,
                    profile,
                    result.issues
                );
            }

            Ok(())
        })
        .unwrap();
}

/// Same topic in, same article out
#[test]
fn test_template_is_deterministic() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&topic_strategy(), |topic| {
            let first = synthesize(&topic);
            let second = synthesize(&topic.clone());
            prop_assert_eq!(&first, &second);
            let title = format!("# {}", topic.subject.trim());
            prop_assert!(first.starts_with(&title));

            Ok(())
        })
        .unwrap();
}
