//! Ordered rule lists: the output of a search.

use std::fmt;

use crate::dataset::{Dataset, RuleId};
use crate::sample_set::SampleSet;

/// An if-then-else chain of rules ending in a default prediction.
///
/// `predictions` has one entry per rule followed by the default prediction,
/// so `predictions.len() == rules.len() + 1`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleList {
    rules: Vec<RuleId>,
    predictions: Vec<bool>,
    objective: f64,
}

impl RuleList {
    /// Creates a rule list.
    ///
    /// # Panics
    ///
    /// Panics unless `predictions.len() == rules.len() + 1`.
    pub fn new(rules: Vec<RuleId>, predictions: Vec<bool>, objective: f64) -> Self {
        assert_eq!(
            predictions.len(),
            rules.len() + 1,
            "a rule list needs one prediction per rule plus a default"
        );
        Self {
            rules,
            predictions,
            objective,
        }
    }

    /// A list with no rules, predicting `default` everywhere.
    pub fn default_only(default: bool, objective: f64) -> Self {
        Self::new(Vec::new(), vec![default], objective)
    }

    /// Rule ids in evaluation order.
    pub fn rules(&self) -> &[RuleId] {
        &self.rules
    }

    /// Per-rule predictions followed by the default prediction.
    pub fn predictions(&self) -> &[bool] {
        &self.predictions
    }

    pub fn default_prediction(&self) -> bool {
        self.predictions[self.rules.len()]
    }

    /// Regularized objective this list achieved on the training data.
    pub fn objective(&self) -> f64 {
        self.objective
    }

    /// Number of rules, excluding the default.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Training accuracy implied by the objective: `1 - objective + c * len`.
    pub fn accuracy(&self, c: f64) -> f64 {
        1.0 - self.objective + c * self.rules.len() as f64
    }

    /// Samples this list predicts positive.
    ///
    /// Each sample is decided by the first rule that matches it, or by the
    /// default prediction when none does.
    pub fn predict(&self, dataset: &Dataset) -> SampleSet {
        let mut remaining = SampleSet::full(dataset.nsamples());
        let mut positive = SampleSet::empty(dataset.nsamples());

        for (&rule, &prediction) in self.rules.iter().zip(&self.predictions) {
            let captured = remaining.and(dataset.rule(rule).truth_table());
            if prediction {
                positive.or_assign(&captured);
            }
            remaining.and_not_assign(&captured);
        }
        if self.default_prediction() {
            positive.or_assign(&remaining);
        }
        positive
    }

    /// Fraction of samples classified correctly, computed directly from data.
    pub fn training_accuracy(&self, dataset: &Dataset) -> f64 {
        let predicted = self.predict(dataset);
        let true_positives = predicted.and_count(dataset.label(true));
        let true_negatives = predicted.complement().and_count(dataset.label(false));
        (true_positives + true_negatives) as f64 / dataset.nsamples() as f64
    }

    /// Renders this list with the dataset's rule names.
    pub fn display<'a>(&'a self, dataset: &'a Dataset) -> RuleListDisplay<'a> {
        RuleListDisplay {
            list: self,
            dataset,
        }
    }
}

/// [`fmt::Display`] adapter returned by [`RuleList::display`].
pub struct RuleListDisplay<'a> {
    list: &'a RuleList,
    dataset: &'a Dataset,
}

impl fmt::Display for RuleListDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (&rule, &prediction)) in self
            .list
            .rules
            .iter()
            .zip(&self.list.predictions)
            .enumerate()
        {
            let keyword = if i == 0 { "if" } else { "else if" };
            writeln!(
                f,
                "{} ({}) then ({})",
                keyword,
                self.dataset.rule(rule).name(),
                prediction as u8
            )?;
        }
        if self.list.is_empty() {
            write!(f, "({})", self.list.default_prediction() as u8)
        } else {
            write!(f, "else ({})", self.list.default_prediction() as u8)
        }
    }
}
