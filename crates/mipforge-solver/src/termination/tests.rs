//! Tests for termination conditions.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::*;
use crate::test_utils::create_test_scope;

#[test]
fn test_node_count_termination() {
    let mut scope = create_test_scope();
    let term = NodeCountTermination::new(3);

    assert!(!term.is_terminated(&scope));
    scope.increment_node_count();
    scope.increment_node_count();
    assert!(!term.is_terminated(&scope));
    scope.increment_node_count();
    assert!(term.is_terminated(&scope));
}

#[test]
fn test_solution_count_termination() {
    let mut scope = create_test_scope();
    let term = SolutionCountTermination::new(2);

    scope.commit_incumbent(vec![0.0, 0.0], 0.0);
    assert!(!term.is_terminated(&scope));
    scope.commit_incumbent(vec![1.0, 0.0], 3.0);
    assert!(term.is_terminated(&scope));
}

#[test]
fn test_time_termination() {
    let scope = create_test_scope();

    assert!(TimeTermination::new(Duration::ZERO).is_terminated(&scope));
    assert!(!TimeTermination::seconds(3600).is_terminated(&scope));
}

#[test]
fn test_external_termination() {
    let scope = create_test_scope();
    let flag = Arc::new(AtomicBool::new(false));
    let term = ExternalTermination::new(flag.clone());

    assert!(!term.is_terminated(&scope));
    flag.store(true, Ordering::SeqCst);
    assert!(term.is_terminated(&scope));
}

#[test]
fn test_absent_limit_never_terminates() {
    let scope = create_test_scope();
    let term: Option<NodeCountTermination> = None;

    assert!(!term.is_terminated(&scope));
    assert!(Some(NodeCountTermination::new(0)).is_terminated(&scope));
}

#[test]
fn test_or_termination() {
    let mut scope = create_test_scope();
    let term = OrTermination((
        NodeCountTermination::new(2),
        SolutionCountTermination::new(1),
    ));

    assert!(!term.is_terminated(&scope));
    scope.commit_incumbent(vec![0.0, 0.0], 0.0);
    assert!(term.is_terminated(&scope));
}

#[test]
fn test_scope_stop_request_terminates() {
    let mut scope = create_test_scope();

    assert!(!scope.is_terminated());
    scope.request_stop();
    assert!(scope.is_terminated());
}
