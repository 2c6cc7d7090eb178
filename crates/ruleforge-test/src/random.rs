//! Seeded random datasets.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use ruleforge_core::{Dataset, Rule, RuleId, SampleSet};

/// Generates a dataset whose rules match each sample with probability
/// `density` and whose labels are fair coin flips.
///
/// The same seed always yields the same dataset. The minority vector is
/// computed.
///
/// # Panics
///
/// Panics if `nsamples` is zero or `density` is outside `[0, 1]`.
pub fn random_dataset(seed: u64, nsamples: usize, nrules: usize, density: f64) -> Dataset {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let rules = (0..nrules)
        .map(|id| {
            let flags: Vec<bool> = (0..nsamples).map(|_| rng.random_bool(density)).collect();
            Rule::new(format!("r{id}"), SampleSet::from_bools(&flags))
        })
        .collect();
    let labels: Vec<bool> = (0..nsamples).map(|_| rng.random_bool(0.5)).collect();

    Dataset::new(rules, SampleSet::from_bools(&labels))
        .unwrap_or_else(|e| panic!("bad random dataset: {e}"))
        .with_computed_minority()
}

/// Appends a copy of each listed rule to `dataset`.
///
/// Copies are named `<name>_copy`. The minority vector is recomputed.
///
/// # Panics
///
/// Panics if an id is out of range.
pub fn with_duplicate_rules(dataset: &Dataset, ids: &[RuleId]) -> Dataset {
    let mut rules = dataset.rules().to_vec();
    for &id in ids {
        let rule = dataset.rule(id);
        rules.push(Rule::new(format!("{}_copy", rule.name()), rule.truth_table().clone()));
    }

    Dataset::new(rules, dataset.positives().clone())
        .unwrap_or_else(|e| panic!("bad duplicated dataset: {e}"))
        .with_computed_minority()
}
