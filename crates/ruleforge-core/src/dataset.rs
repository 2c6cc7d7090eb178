//! Candidate rules and labeled samples.
//!
//! A [`Dataset`] is the fixed input of one search: `nrules` candidate
//! antecedents, each given by the set of samples it matches, and the
//! binary label of every sample. Rule mining happens upstream; this module
//! only validates and stores the result.

use fxhash::FxHashMap;

use crate::error::{Result, RuleForgeError};
use crate::sample_set::SampleSet;

/// Index of a candidate rule within its [`Dataset`].
pub type RuleId = usize;

/// A candidate antecedent and the samples it matches.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rule {
    name: String,
    truth_table: SampleSet,
}

impl Rule {
    /// Creates a rule from its display name and truth table.
    pub fn new(name: impl Into<String>, truth_table: SampleSet) -> Self {
        Self {
            name: name.into(),
            truth_table,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Samples matched by this rule.
    #[inline]
    pub fn truth_table(&self) -> &SampleSet {
        &self.truth_table
    }

    /// Number of samples matched by this rule.
    pub fn support(&self) -> usize {
        self.truth_table.count()
    }
}

/// Candidate rules, binary labels and an optional equivalent-points vector.
///
/// # Example
///
/// ```
/// use ruleforge_core::{Dataset, Rule, SampleSet};
///
/// let rules = vec![
///     Rule::new("age>30", SampleSet::from_bit_str("1100").unwrap()),
///     Rule::new("smoker", SampleSet::from_bit_str("1010").unwrap()),
/// ];
/// let positives = SampleSet::from_bit_str("1000").unwrap();
///
/// let dataset = Dataset::new(rules, positives).unwrap();
/// assert_eq!(dataset.nsamples(), 4);
/// assert_eq!(dataset.nrules(), 2);
/// assert_eq!(dataset.label(false).count(), 3);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dataset {
    nsamples: usize,
    rules: Vec<Rule>,
    /// `labels[0]` holds negatives, `labels[1]` positives.
    labels: [SampleSet; 2],
    minority: Option<SampleSet>,
}

impl Dataset {
    /// Creates a dataset from candidate rules and the set of positive samples.
    ///
    /// The sample count is taken from `positives`; every rule must be drawn
    /// from the same universe.
    ///
    /// # Errors
    ///
    /// Returns [`RuleForgeError::Dataset`] for an empty sample universe or a
    /// rule whose truth table has a different width.
    pub fn new(rules: Vec<Rule>, positives: SampleSet) -> Result<Self> {
        let nsamples = positives.universe();
        if nsamples == 0 {
            return Err(RuleForgeError::Dataset(
                "dataset must contain at least one sample".into(),
            ));
        }

        for (id, rule) in rules.iter().enumerate() {
            if rule.truth_table().universe() != nsamples {
                return Err(RuleForgeError::Dataset(format!(
                    "rule {} ({}) covers {} samples, expected {}",
                    id,
                    rule.name(),
                    rule.truth_table().universe(),
                    nsamples
                )));
            }
        }

        let negatives = positives.complement();
        Ok(Self {
            nsamples,
            rules,
            labels: [negatives, positives],
            minority: None,
        })
    }

    /// Creates a dataset from per-rule boolean columns and per-sample labels.
    pub fn from_columns<N: Into<String>>(
        columns: impl IntoIterator<Item = (N, Vec<bool>)>,
        labels: &[bool],
    ) -> Result<Self> {
        let rules = columns
            .into_iter()
            .map(|(name, column)| Rule::new(name, SampleSet::from_bools(&column)))
            .collect();
        Self::new(rules, SampleSet::from_bools(labels))
    }

    /// Attaches an externally computed equivalent-points (minority) vector.
    pub fn with_minority(mut self, minority: SampleSet) -> Result<Self> {
        if minority.universe() != self.nsamples {
            return Err(RuleForgeError::Dataset(format!(
                "minority vector covers {} samples, expected {}",
                minority.universe(),
                self.nsamples
            )));
        }
        self.minority = Some(minority);
        Ok(self)
    }

    /// Attaches the minority vector derived by [`Dataset::compute_minority`].
    pub fn with_computed_minority(mut self) -> Self {
        self.minority = Some(self.compute_minority());
        self
    }

    /// Marks samples that no rule list over these rules can classify correctly.
    ///
    /// Samples matched by exactly the same rules are indistinguishable to any
    /// rule list and always receive the same prediction. Within each such
    /// group, the samples carrying the group's minority label are marked.
    pub fn compute_minority(&self) -> SampleSet {
        // pattern -> (negatives, positives)
        let mut groups: FxHashMap<SampleSet, (Vec<usize>, Vec<usize>)> = FxHashMap::default();

        for sample in 0..self.nsamples {
            let pattern = SampleSet::from_indices(
                self.rules.len(),
                self.rules
                    .iter()
                    .enumerate()
                    .filter(|(_, r)| r.truth_table().contains(sample))
                    .map(|(id, _)| id),
            );
            let entry = groups.entry(pattern).or_default();
            if self.labels[1].contains(sample) {
                entry.1.push(sample);
            } else {
                entry.0.push(sample);
            }
        }

        let mut minority = SampleSet::empty(self.nsamples);
        for (negatives, positives) in groups.values() {
            // Ties resolve to a positive majority, matching rule predictions.
            let losers = if negatives.len() > positives.len() {
                positives
            } else {
                negatives
            };
            for &sample in losers {
                minority.insert(sample);
            }
        }
        minority
    }

    #[inline]
    pub fn nsamples(&self) -> usize {
        self.nsamples
    }

    #[inline]
    pub fn nrules(&self) -> usize {
        self.rules.len()
    }

    /// Returns the rule with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id >= nrules()`.
    #[inline]
    pub fn rule(&self, id: RuleId) -> &Rule {
        &self.rules[id]
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Samples carrying the given label.
    #[inline]
    pub fn label(&self, label: bool) -> &SampleSet {
        &self.labels[label as usize]
    }

    pub fn positives(&self) -> &SampleSet {
        &self.labels[1]
    }

    pub fn minority(&self) -> Option<&SampleSet> {
        self.minority.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(s: &str) -> SampleSet {
        SampleSet::from_bit_str(s).unwrap()
    }

    #[test]
    fn test_rejects_mismatched_rule_width() {
        let rules = vec![Rule::new("short", bits("101"))];
        let err = Dataset::new(rules, bits("1010")).unwrap_err();
        assert!(err.to_string().contains("rule 0 (short)"));
    }

    #[test]
    fn test_rejects_empty_universe() {
        assert!(Dataset::new(Vec::new(), SampleSet::empty(0)).is_err());
    }

    #[test]
    fn test_from_columns() {
        let dataset = Dataset::from_columns(
            vec![("a", vec![true, false, true]), ("b", vec![false, false, true])],
            &[true, false, false],
        )
        .unwrap();

        assert_eq!(dataset.nrules(), 2);
        assert_eq!(dataset.rule(1).name(), "b");
        assert_eq!(dataset.rule(0).support(), 2);
        assert_eq!(dataset.positives().to_string(), "100");
        assert_eq!(dataset.label(false).to_string(), "011");
    }

    #[test]
    fn test_compute_minority() {
        // Samples 0,1,2 share pattern {r0}; sample 3 matches nothing.
        // Labels 1,1,0 within the group -> sample 2 is the minority.
        let rules = vec![Rule::new("r0", bits("1110"))];
        let dataset = Dataset::new(rules, bits("1100")).unwrap();

        assert_eq!(dataset.compute_minority().to_string(), "0010");
    }

    #[test]
    fn test_compute_minority_tie_marks_negatives() {
        let rules = vec![Rule::new("r0", bits("0011"))];
        let dataset = Dataset::new(rules, bits("1010")).unwrap();

        // {0,1}: labels 1,0 ; {2,3}: labels 1,0
        assert_eq!(dataset.compute_minority().to_string(), "0101");
    }

    #[test]
    fn test_with_minority_width_checked() {
        let dataset = Dataset::new(Vec::new(), bits("10")).unwrap();
        assert!(dataset.clone().with_minority(bits("000")).is_err());
        let dataset = dataset.with_minority(bits("00")).unwrap();
        assert_eq!(dataset.minority().map(|m| m.count()), Some(0));
    }
}
