//! Hand-built datasets.
//!
//! Each fixture is small enough to check by hand. Bit strings list samples
//! left to right, so `"1100"` marks samples 0 and 1.

use ruleforge_core::{Dataset, Rule, SampleSet};

/// Parses a bit string into a sample set.
///
/// # Panics
///
/// Panics on characters other than `0` and `1`.
pub fn bits(s: &str) -> SampleSet {
    SampleSet::from_bit_str(s).unwrap_or_else(|| panic!("not a bit string: {s:?}"))
}

/// Builds a dataset from `(name, truth table)` pairs and a label string.
///
/// # Panics
///
/// Panics if the widths disagree.
pub fn dataset(rules: &[(&str, &str)], labels: &str) -> Dataset {
    let rules = rules
        .iter()
        .map(|&(name, truth)| Rule::new(name, bits(truth)))
        .collect();
    Dataset::new(rules, bits(labels)).unwrap_or_else(|e| panic!("bad fixture: {e}"))
}

/// Three rules each capturing one positive sample, four samples.
///
/// The only perfect list uses all three rules in any order; the optimum is
/// `if a then 1 else if b then 1 else if c then 1 else 0` at `3c`.
pub fn singletons() -> Dataset {
    dataset(&[("a", "1000"), ("b", "0100"), ("c", "0010")], "1110")
}

/// Four overlapping rules over six samples.
///
/// Distinct rule sets here often capture the same samples, so the
/// captured-set deduplication merges more prefixes than the rule-set one.
/// With `c = 0.01` the optimum makes one mistake with three rules.
pub fn overlapping() -> Dataset {
    dataset(
        &[
            ("last", "000001"),
            ("front", "110010"),
            ("back", "001011"),
            ("first", "100000"),
        ],
        "100111",
    )
}

/// Samples 0 and 1 match the same rules but carry different labels.
///
/// No list can classify both, so sample 1 is a minority sample.
pub fn indistinguishable() -> Dataset {
    dataset(&[("a", "1100"), ("b", "0010")], "1011").with_computed_minority()
}

/// No candidate rules at all.
pub fn no_rules(labels: &str) -> Dataset {
    Dataset::new(Vec::new(), bits(labels)).unwrap_or_else(|e| panic!("bad fixture: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_shapes() {
        let d = singletons();
        assert_eq!((d.nrules(), d.nsamples()), (3, 4));

        let d = overlapping();
        assert_eq!((d.nrules(), d.nsamples()), (4, 6));
        assert_eq!(d.rule(1).name(), "front");

        let d = indistinguishable();
        assert_eq!(d.minority(), Some(&bits("0100")));

        let d = no_rules("110");
        assert_eq!(d.nrules(), 0);
        assert_eq!(d.positives().count(), 2);
    }

    #[test]
    #[should_panic(expected = "not a bit string")]
    fn test_bad_bits() {
        bits("01x");
    }
}
