//! Tests for search configuration.

use super::*;

#[test]
fn test_toml_parsing() {
    let toml = r#"
        regularization = 0.02
        queue_policy = "lower_bound"
        equivalence = "none"
        size_tracking = true
        verbosity = "loud"
        trace_frequency = 1000

        [ablation]
        support_bounds = false
        equivalent_points = false
    "#;

    let config = SearchConfig::from_toml_str(toml).unwrap();
    assert_eq!(config.regularization, 0.02);
    assert_eq!(config.queue_policy, QueuePolicy::LowerBound);
    assert_eq!(config.equivalence, EquivalenceVariant::None);
    assert!(config.size_tracking);
    assert_eq!(config.trace_frequency, Some(1000));
    assert!(!config.ablation.support_bounds);
    assert!(config.ablation.lookahead_bound);
    assert!(!config.ablation.equivalent_points);
    assert_eq!(config.max_num_nodes, DEFAULT_MAX_NUM_NODES);
}

#[test]
fn test_yaml_parsing() {
    let yaml = r#"
        regularization: 0.001
        queue_policy: dfs
        equivalence: captured_bitvector
        ablation:
          lookahead_bound: false
        max_num_nodes: 250
    "#;

    let config = SearchConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.queue_policy, QueuePolicy::Dfs);
    assert_eq!(config.equivalence, EquivalenceVariant::CapturedBitvector);
    assert!(!config.ablation.lookahead_bound);
    assert_eq!(config.max_num_nodes, 250);
}

#[test]
fn test_empty_toml_is_default() {
    let config = SearchConfig::from_toml_str("").unwrap();
    assert_eq!(config.regularization, DEFAULT_REGULARIZATION);
    assert_eq!(config.queue_policy, QueuePolicy::Bfs);
    assert_eq!(config.equivalence, EquivalenceVariant::PrefixSignature);
    assert_eq!(config.ablation, Ablation::default());
}

#[test]
fn test_unknown_policy_rejected() {
    assert!(SearchConfig::from_toml_str(r#"queue_policy = "random""#).is_err());
}

#[test]
fn test_builder() {
    let config = SearchConfig::new()
        .with_regularization(0.05)
        .with_queue_policy(QueuePolicy::Objective)
        .with_equivalence(EquivalenceVariant::None)
        .with_ablation(Ablation::none())
        .with_verbosity("progress")
        .with_size_tracking(true)
        .with_max_num_nodes(10)
        .with_trace_frequency(5);

    assert_eq!(config.regularization, 0.05);
    assert_eq!(config.queue_policy, QueuePolicy::Objective);
    assert_eq!(config.ablation, Ablation::none());
    assert_eq!(config.max_num_nodes, 10);
    assert!(config.validate().unwrap().progress);
}

#[test]
fn test_validate_regularization() {
    for c in [0.0, -0.01, f64::NAN] {
        let err = SearchConfig::new().with_regularization(c).validate();
        assert!(matches!(err, Err(ConfigError::NonPositiveRegularization(_))));
    }
}

#[test]
fn test_validate_verbosity() {
    let err = SearchConfig::new().with_verbosity("rule,nope").validate();
    assert!(matches!(err, Err(ConfigError::UnknownVerbosity(_))));
}

#[test]
fn test_validate_trace_frequency() {
    let err = SearchConfig::new().with_trace_frequency(0).validate();
    assert!(matches!(err, Err(ConfigError::Invalid(_))));
}

#[test]
fn test_into_core_error() {
    let err: RuleForgeError = ConfigError::NonPositiveRegularization(0.0).into();
    assert!(err.to_string().contains("regularization must be positive"));
}

#[test]
fn test_display_names() {
    assert_eq!(QueuePolicy::LowerBound.to_string(), "LOWER BOUND");
    assert_eq!(EquivalenceVariant::PrefixSignature.to_string(), "Prefix Map");
}
