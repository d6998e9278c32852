//! Level 4: Validation Tests
//!
//! Disconnection and cycle findings as they surface in the report, the
//! status bar and the error panel model.

mod common;

use common::harness::CanvasHarness;
use workflow_canvas::{CanvasConfig, EdgePolicy, ValidationIssue};

#[test]
fn test_two_loose_nodes_are_flagged() {
    let harness = CanvasHarness::new();
    harness.place("database", 0.0, 0.0);
    harness.place("display", 200.0, 0.0);

    assert_eq!(harness.error_messages(), vec!["2 component(s) are not connected"]);
    assert_eq!(harness.error_rows(), harness.error_messages());
    assert_eq!(harness.ctrl.status().error_count, 1);
}

#[test]
fn test_one_loose_node_among_three() {
    let harness = CanvasHarness::new();
    let a = harness.place("database", 0.0, 0.0);
    let b = harness.place("filter", 200.0, 0.0);
    harness.place("display", 400.0, 0.0);
    harness.connect(a, 0, b, 0).unwrap();

    assert_eq!(
        harness.ctrl.session().report().issues(),
        &[ValidationIssue::Disconnected { count: 1 }]
    );
}

#[test]
fn test_single_node_is_valid() {
    let harness = CanvasHarness::new();
    harness.place("camera", 0.0, 0.0);
    assert!(harness.ctrl.session().is_valid());
    assert!(harness.error_rows().is_empty());
}

#[test]
fn test_chain_is_valid_and_loop_is_not() {
    let harness = CanvasHarness::new();
    let a = harness.place("filter", 0.0, 0.0);
    let b = harness.place("transformer", 200.0, 0.0);
    let c = harness.place("ai-model", 400.0, 0.0);
    harness.connect(a, 0, b, 0).unwrap();
    harness.connect(b, 0, c, 0).unwrap();
    assert!(harness.ctrl.session().is_valid());

    harness.connect(c, 0, a, 0).unwrap();
    assert_eq!(harness.error_messages(), vec!["Circular dependency detected in workflow"]);
    assert!(!harness.ctrl.validate());
}

#[test]
fn test_breaking_the_loop_clears_the_error() {
    let harness = CanvasHarness::new();
    let a = harness.place("filter", 0.0, 0.0);
    let b = harness.place("filter", 200.0, 0.0);
    harness.connect(a, 0, b, 0).unwrap();
    let back = harness.connect(b, 0, a, 0).unwrap();
    assert!(!harness.ctrl.session().is_valid());

    harness.ctrl.update(|s| s.delete_edge(back)).unwrap();
    assert!(harness.ctrl.session().is_valid());
}

#[test]
fn test_disconnection_listed_before_cycle() {
    let harness = CanvasHarness::new();
    let a = harness.place("filter", 0.0, 0.0);
    let b = harness.place("filter", 200.0, 0.0);
    harness.place("export", 400.0, 0.0);
    harness.connect(a, 0, b, 0).unwrap();
    harness.connect(b, 0, a, 0).unwrap();

    assert_eq!(
        harness.error_rows(),
        vec![
            "1 component(s) are not connected".to_string(),
            "Circular dependency detected in workflow".to_string(),
        ]
    );
}

#[test]
fn test_self_loop_counts_as_cycle() {
    let config = CanvasConfig::default().with_edge_policy(EdgePolicy::Permissive);
    let harness = CanvasHarness::with_config(config);
    let a = harness.place("filter", 0.0, 0.0);
    harness.connect(a, 0, a, 0).unwrap();
    assert_eq!(
        harness.ctrl.session().report().issues(),
        &[ValidationIssue::CircularDependency]
    );
}

#[test]
fn test_manual_validation_mode() {
    let harness = CanvasHarness::with_config(CanvasConfig::default().with_auto_validate(false));
    harness.place("database", 0.0, 0.0);
    harness.place("display", 200.0, 0.0);
    assert!(harness.error_rows().is_empty());

    assert!(!harness.ctrl.validate());
    assert_eq!(harness.error_rows(), vec!["2 component(s) are not connected"]);
}
