//! End-to-end searches through the facade.

use ruleforge::prelude::*;
use ruleforge::{solve, SearchStatus};
use ruleforge_test::{assert_objective_eq, brute_force, datasets, random_dataset};

#[test]
fn test_solve_matches_brute_force() {
    for seed in 60..66 {
        let dataset = random_dataset(seed, 18, 5, 0.3);
        let config = SearchConfig::new().with_queue_policy(QueuePolicy::Curious);
        let outcome = solve(&dataset, &config, TraceSink::None).unwrap();

        assert!(outcome.exhausted);
        assert!(outcome.retained.is_none());
        assert_objective_eq(
            outcome.rule_list.objective(),
            brute_force(&dataset, config.regularization).objective(),
        );
    }
}

#[test]
fn test_node_cap_ends_early() {
    let dataset = datasets::singletons();
    let config = SearchConfig::new().with_max_num_nodes(4);
    let outcome = solve(&dataset, &config, TraceSink::None).unwrap();

    assert!(!outcome.exhausted);
    assert_eq!(outcome.num_nodes, 4);
    let retained = outcome.retained.expect("capped search is retained");
    assert_eq!(retained.queue.len(), 3);

    // the cap does not change the answer once it is large enough
    let full = solve(&dataset, &SearchConfig::default(), TraceSink::None).unwrap();
    assert!(full.exhausted);
    assert_objective_eq(full.rule_list.objective(), 0.03);
}

#[test]
fn test_zero_cap_only_builds_root() {
    let dataset = datasets::singletons();
    let config = SearchConfig::new().with_max_num_nodes(0);
    let outcome = solve(&dataset, &config, TraceSink::None).unwrap();

    assert_eq!(outcome.num_nodes, 1);
    assert_eq!(outcome.stats.nodes_popped, 0);
    assert!(outcome.rule_list.is_empty());
    assert_objective_eq(outcome.rule_list.objective(), 0.25);
}

#[test]
fn test_invalid_config() {
    let dataset = datasets::singletons();
    let config = SearchConfig::new().with_verbosity("progress,,rule");
    assert!(solve(&dataset, &config, TraceSink::None).is_err());
}

#[test]
fn test_config_from_toml() {
    let config = SearchConfig::from_toml_str(
        r#"
        regularization = 0.01
        queue_policy = "objective"
        equivalence = "captured_bitvector"
        verbosity = "progress"
        "#,
    )
    .unwrap();

    ruleforge::init_tracing();
    ruleforge::init_tracing();

    let dataset = datasets::overlapping();
    let outcome = solve(&dataset, &config, TraceSink::None).unwrap();
    assert_eq!(outcome.num_nodes, 8);
    assert_objective_eq(outcome.rule_list.objective(), 1.0 / 6.0 + 0.03);
}

#[test]
fn test_stepwise_matches_solve() {
    let dataset = random_dataset(70, 16, 5, 0.35);
    let config = SearchConfig::new().with_queue_policy(QueuePolicy::LowerBound);

    let mut search = BranchAndBound::begin(&dataset, &config, TraceSink::None).unwrap();
    while search.step(3) {
        assert_eq!(search.status(), SearchStatus::Suspended);
    }
    assert_eq!(search.status(), SearchStatus::Terminated);
    let stepped = search.end(false);

    let solved = solve(&dataset, &config, TraceSink::None).unwrap();
    assert_eq!(stepped.rule_list, solved.rule_list);
    assert_eq!(stepped.num_nodes, solved.num_nodes);
}
