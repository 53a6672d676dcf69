//! Tests for solver configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        presolve = false
        log_output = true

        [termination]
        seconds_spent_limit = 30
        node_count_limit = 5000

        [callback]
        failure_policy = "stop_search"
    "#;

    let config = SolverConfig::from_toml_str(toml).unwrap();
    assert!(!config.presolve);
    assert!(config.log_output);
    assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
    assert_eq!(config.node_limit(), Some(5000));
    assert_eq!(config.solution_limit(), None);
    assert_eq!(
        config.callback.failure_policy,
        CallbackFailurePolicy::StopSearch
    );
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        presolve: true
        termination:
          millis_spent_limit: 250
          solution_count_limit: 3
        callback:
          failure_policy: continue
    "#;

    let config = SolverConfig::from_yaml_str(yaml).unwrap();
    assert!(config.presolve);
    assert_eq!(config.time_limit(), Some(Duration::from_millis(250)));
    assert_eq!(config.solution_limit(), Some(3));
    assert_eq!(config.callback.failure_policy, CallbackFailurePolicy::Continue);
}

#[test]
fn test_empty_toml_uses_defaults() {
    let config = SolverConfig::from_toml_str("").unwrap();
    assert!(config.presolve);
    assert!(!config.log_output);
    assert_eq!(config.time_limit(), None);
    assert_eq!(config.callback.failure_policy, CallbackFailurePolicy::Continue);
}

#[test]
fn test_seconds_and_millis_are_summed() {
    let termination = TerminationConfig {
        seconds_spent_limit: Some(2),
        millis_spent_limit: Some(500),
        ..TerminationConfig::default()
    };
    assert_eq!(termination.time_limit(), Some(Duration::from_millis(2500)));
    assert_eq!(TerminationConfig::default().time_limit(), None);
}

#[test]
fn test_huge_time_limit_saturates() {
    let termination = TerminationConfig {
        seconds_spent_limit: Some(u64::MAX),
        millis_spent_limit: Some(500),
        ..TerminationConfig::default()
    };

    assert_eq!(termination.time_limit(), Some(Duration::from_millis(u64::MAX)));
}

#[test]
fn test_zero_solution_limit_rejected() {
    let toml = r#"
        [termination]
        solution_count_limit = 0
    "#;

    let err = SolverConfig::from_toml_str(toml).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn test_unknown_policy_rejected() {
    let toml = r#"
        [callback]
        failure_policy = "retry"
    "#;

    assert!(matches!(
        SolverConfig::from_toml_str(toml),
        Err(ConfigError::Toml(_))
    ));
}

#[test]
fn test_builder() {
    let config = SolverConfig::new()
        .with_termination_seconds(60)
        .with_node_limit(10)
        .with_solution_limit(2)
        .with_presolve(false)
        .with_log_output(true)
        .with_callback_failure_policy(CallbackFailurePolicy::StopSearch);

    assert_eq!(config.time_limit(), Some(Duration::from_secs(60)));
    assert_eq!(config.node_limit(), Some(10));
    assert_eq!(config.solution_limit(), Some(2));
    assert!(!config.presolve);
    assert!(config.log_output);
    assert_eq!(
        config.callback.failure_policy,
        CallbackFailurePolicy::StopSearch
    );
}

#[test]
fn test_missing_file_falls_back_to_default() {
    let config = SolverConfig::load("/nonexistent/mipforge/solver.toml").unwrap_or_default();
    assert!(config.presolve);
}

#[test]
fn test_load_picks_format_by_extension() {
    let path = std::env::temp_dir().join(format!("mipforge-config-{}.yaml", std::process::id()));
    std::fs::write(&path, "presolve: false\ntermination:\n  node_count_limit: 7\n").unwrap();

    let config = SolverConfig::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert!(!config.presolve);
    assert_eq!(config.node_limit(), Some(7));
}
