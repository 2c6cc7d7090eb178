//! Brute-force reference for the optimal objective.
//!
//! Enumerates every ordered list of distinct rules, each predicting the
//! majority label of what it captures, followed by a majority default.
//! Exponential; meant for a handful of rules.

use ruleforge_core::{Dataset, RuleId, RuleList, SampleSet};

/// Objectives closer than this are treated as equal.
pub const OBJECTIVE_TOLERANCE: f64 = 1e-9;

/// Asserts two objectives agree within [`OBJECTIVE_TOLERANCE`].
#[track_caller]
pub fn assert_objective_eq(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < OBJECTIVE_TOLERANCE,
        "objective {actual} differs from expected {expected}"
    );
}

/// Majority label (ties to positive) and its count among `samples`.
fn majority(samples: &SampleSet, positives: &SampleSet) -> (bool, usize) {
    let total = samples.count();
    let positive = samples.and_count(positives);
    let negative = total - positive;
    (positive >= negative, positive.max(negative))
}

/// Returns an optimal rule list for regularization `c`.
///
/// Among lists with equal objective, the first one in enumeration order
/// (shorter first, then lexicographic rule ids) is returned.
pub fn brute_force(dataset: &Dataset, c: f64) -> RuleList {
    let n = dataset.nsamples() as f64;
    let all = SampleSet::full(dataset.nsamples());
    let (default, correct) = majority(&all, dataset.positives());
    let mut best = RuleList::default_only(default, (dataset.nsamples() - correct) as f64 / n);

    let max_len = dataset.nrules();
    for len in 1..=max_len {
        let mut prefix = Vec::with_capacity(len);
        let mut predictions = Vec::with_capacity(len + 1);
        search(dataset, c, len, &all, 0.0, &mut prefix, &mut predictions, &mut best);
    }
    best
}

#[allow(clippy::too_many_arguments)]
fn search(
    dataset: &Dataset,
    c: f64,
    len: usize,
    not_captured: &SampleSet,
    cost: f64,
    prefix: &mut Vec<RuleId>,
    predictions: &mut Vec<bool>,
    best: &mut RuleList,
) {
    let n = dataset.nsamples() as f64;
    if prefix.len() == len {
        let (default, correct) = majority(not_captured, dataset.positives());
        let objective = cost + (not_captured.count() - correct) as f64 / n;
        if objective < best.objective() - OBJECTIVE_TOLERANCE {
            let mut all_predictions = predictions.clone();
            all_predictions.push(default);
            *best = RuleList::new(prefix.clone(), all_predictions, objective);
        }
        return;
    }

    for rule in 0..dataset.nrules() {
        if prefix.contains(&rule) {
            continue;
        }
        let captured = not_captured.and(dataset.rule(rule).truth_table());
        let (prediction, correct) = majority(&captured, dataset.positives());
        let rule_cost = (captured.count() - correct) as f64 / n + c;

        prefix.push(rule);
        predictions.push(prediction);
        search(
            dataset,
            c,
            len,
            &not_captured.and_not(&captured),
            cost + rule_cost,
            prefix,
            predictions,
            best,
        );
        prefix.pop();
        predictions.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets;

    #[test]
    fn test_singletons_optimum() {
        let best = brute_force(&datasets::singletons(), 0.01);
        assert_eq!(best.rules(), &[0, 1, 2]);
        assert_eq!(best.predictions(), &[true, true, true, false]);
        assert_objective_eq(best.objective(), 0.03);
    }

    #[test]
    fn test_heavy_regularization_prefers_default() {
        let best = brute_force(&datasets::singletons(), 0.5);
        assert!(best.is_empty());
        assert!(best.default_prediction());
        assert_objective_eq(best.objective(), 0.25);
    }

    #[test]
    fn test_overlapping_optimum() {
        let best = brute_force(&datasets::overlapping(), 0.01);
        assert_eq!(best.len(), 3);
        assert_objective_eq(best.objective(), 1.0 / 6.0 + 0.03);
        let accuracy = best.training_accuracy(&datasets::overlapping());
        assert_objective_eq(accuracy, 5.0 / 6.0);
    }

    #[test]
    fn test_no_rules() {
        let best = brute_force(&datasets::no_rules("1101"), 0.01);
        assert!(best.is_empty());
        assert_objective_eq(best.objective(), 0.25);
    }

    #[test]
    #[should_panic(expected = "differs from expected")]
    fn test_assert_objective_eq_panics() {
        assert_objective_eq(0.1, 0.2);
    }
}
