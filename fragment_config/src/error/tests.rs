//! Unit tests for error construction and aggregation behaviour.

use std::sync::Arc;

use rstest::rstest;

use super::FragmentError;
use crate::{Environment, FragmentId, FragmentName};

fn invalid_auth() -> Arc<FragmentError> {
    let name = FragmentName::new("auth").expect("valid fragment name");
    FragmentError::invalid(
        FragmentId::new(name, Environment::Base),
        "memory/auth.json",
        "expected value at line 1 column 1",
    )
}

fn collect(errors: Vec<Arc<FragmentError>>) -> FragmentError {
    FragmentError::try_aggregate(errors).expect("at least one error")
}

#[test]
fn try_aggregate_returns_none_for_no_errors() {
    assert!(FragmentError::try_aggregate(Vec::<Arc<FragmentError>>::new()).is_none());
}

#[test]
fn single_owned_error_is_unwrapped() {
    let outcome = FragmentError::try_aggregate(vec![invalid_auth()]);
    assert!(matches!(outcome, Some(FragmentError::Invalid { .. })));
}

#[test]
fn single_shared_error_stays_aggregated() {
    let shared = invalid_auth();
    let outcome = FragmentError::try_aggregate(vec![Arc::clone(&shared)]);
    match outcome {
        Some(FragmentError::Aggregate(errors)) => assert_eq!(errors.len(), 1),
        other => panic!("expected Aggregate, got {other:?}"),
    }
}

#[test]
fn aggregate_display_numbers_entries() {
    let outcome = FragmentError::try_aggregate(vec![
        invalid_auth(),
        Arc::new(FragmentError::DuplicateFragment("http".into())),
    ])
    .expect("two errors");
    let rendered = outcome.to_string();
    assert!(rendered.starts_with("multiple fragment errors:\n1: fragment 'auth'"));
    assert!(rendered.contains("2: fragment 'http' appears more than once"));
}

#[rstest]
#[case(FragmentError::Invalid {
    id: FragmentId::new(FragmentName::new("auth").expect("valid name"), Environment::Base),
    location: "auth.json".into(),
    reason: "bad".into(),
}, true)]
#[case(FragmentError::DuplicateFragment("auth".into()), false)]
#[case(collect(vec![invalid_auth(), invalid_auth()]), true)]
#[case(collect(vec![
    invalid_auth(),
    Arc::new(FragmentError::InvalidSelection("x".into())),
]), false)]
fn classifies_invalid_fragments(#[case] error: FragmentError, #[case] expected: bool) {
    assert_eq!(error.is_invalid_fragment(), expected);
}
