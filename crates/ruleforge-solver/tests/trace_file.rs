//! Trace files written during a search.

use ruleforge_config::{EquivalenceVariant, QueuePolicy, SearchConfig};
use ruleforge_core::RuleForgeError;
use ruleforge_solver::{BranchAndBound, TraceSink};
use ruleforge_test::{assert_objective_eq, datasets};

#[test]
fn test_trace_file_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("search.jsonl");

    let dataset = datasets::singletons();
    let config = SearchConfig::new()
        .with_equivalence(EquivalenceVariant::None)
        .with_size_tracking(true);
    let trace = TraceSink::file(&path).unwrap();
    match &trace {
        TraceSink::File(file) => assert_eq!(file.path(), path.as_path()),
        other => panic!("expected a file sink, got {other:?}"),
    }

    let mut search = BranchAndBound::begin(&dataset, &config, trace).unwrap();
    while search.step(10) {}
    let outcome = search.end(false);
    assert!(outcome.trace_error.is_none());

    let contents = std::fs::read_to_string(&path).unwrap();
    let records: Vec<serde_json::Value> = contents
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["kind"], "improvement");
    assert_eq!(records[1]["kind"], "summary");
    assert_eq!(records[1]["num_nodes"], 10);
    assert_eq!(records[1]["num_evaluated"], 10);
    assert!(records[1]["elapsed_secs"].as_f64().unwrap() >= 0.0);
    assert_eq!(records[1]["prefix_lengths"], serde_json::json!([0, 0, 0]));
}

#[test]
fn test_unwritable_trace_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("search.jsonl");
    let err = TraceSink::file(path).unwrap_err();
    assert!(matches!(err, RuleForgeError::Io(_)));
}

#[cfg(target_os = "linux")]
#[test]
fn test_full_device_keeps_result() {
    let dataset = datasets::singletons();
    let config = SearchConfig::new()
        .with_queue_policy(QueuePolicy::Bfs)
        .with_equivalence(EquivalenceVariant::None);
    let trace = TraceSink::file("/dev/full").unwrap();

    let mut search = BranchAndBound::begin(&dataset, &config, trace).unwrap();
    while search.step(10) {}
    let outcome = search.end(true);

    let error = outcome.trace_error.expect("writes to /dev/full fail");
    assert_eq!(error.raw_os_error(), Some(28));

    assert!(outcome.exhausted);
    assert_eq!(outcome.rule_list.rules(), &[0, 1, 2]);
    assert_objective_eq(outcome.rule_list.objective(), 0.03);
    let retained = outcome.retained.expect("early end keeps the search");
    assert_eq!(retained.arena.num_nodes(), 10);
}
