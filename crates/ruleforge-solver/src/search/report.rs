//! Input dumps requested through verbosity flags.

use ruleforge_config::Verbosity;
use ruleforge_core::Dataset;
use tracing::debug;

pub(super) fn dump_inputs(dataset: &Dataset, verbosity: &Verbosity) {
    if verbosity.rule {
        for (id, rule) in dataset.rules().iter().enumerate() {
            if verbosity.samples {
                debug!(
                    event = "rule",
                    id,
                    name = rule.name(),
                    support = rule.support(),
                    samples = %rule.truth_table(),
                );
            } else {
                debug!(event = "rule", id, name = rule.name(), support = rule.support());
            }
        }
    }

    if verbosity.label {
        for label in [false, true] {
            let samples = dataset.label(label);
            if verbosity.samples {
                debug!(
                    event = "label",
                    label = label as u8,
                    count = samples.count(),
                    samples = %samples,
                );
            } else {
                debug!(event = "label", label = label as u8, count = samples.count());
            }
        }
    }

    if verbosity.minor {
        match dataset.minority() {
            Some(minority) if verbosity.samples => {
                debug!(event = "minority", count = minority.count(), samples = %minority);
            }
            Some(minority) => debug!(event = "minority", count = minority.count()),
            None => debug!(event = "minority", count = 0usize, computed = false),
        }
    }
}
