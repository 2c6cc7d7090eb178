//! Symmetry deduplication of prefixes.
//!
//! Two prefixes in the same equivalence class leave exactly the same samples
//! to every possible continuation, so only the one with the smaller lower
//! bound needs to be explored. The map remembers, per class, the best lower
//! bound seen and the node holding it.

use fxhash::FxHashMap;
use ruleforge_config::EquivalenceVariant;
use ruleforge_core::{RuleId, SampleSet};
use smallvec::SmallVec;

use crate::arena::{Arena, NodeId};

/// Identifies an equivalence class of prefixes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EquivalenceKey {
    /// Sorted rule ids: every permutation of the same rules.
    Rules(SmallVec<[RuleId; 8]>),
    /// Samples left uncaptured: every prefix capturing the same samples.
    Uncaptured(SampleSet),
}

#[derive(Debug, Clone, Copy)]
struct ClassEntry {
    lower_bound: f64,
    holder: NodeId,
}

/// Map from equivalence class to the best prefix found in it.
#[derive(Debug)]
pub struct EquivalenceMap {
    variant: EquivalenceVariant,
    entries: FxHashMap<EquivalenceKey, ClassEntry>,
}

impl EquivalenceMap {
    pub fn new(variant: EquivalenceVariant) -> Self {
        Self {
            variant,
            entries: FxHashMap::default(),
        }
    }

    pub fn variant(&self) -> EquivalenceVariant {
        self.variant
    }

    /// Number of classes recorded.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Class of the prefix `prefix + [rule]`, whose uncaptured samples are
    /// `not_captured`. Returns None when deduplication is off.
    pub fn signature(
        &self,
        prefix: &[RuleId],
        rule: RuleId,
        not_captured: &SampleSet,
    ) -> Option<EquivalenceKey> {
        match self.variant {
            EquivalenceVariant::None => None,
            EquivalenceVariant::PrefixSignature => {
                let mut rules: SmallVec<[RuleId; 8]> = SmallVec::with_capacity(prefix.len() + 1);
                rules.extend_from_slice(prefix);
                rules.push(rule);
                rules.sort_unstable();
                Some(EquivalenceKey::Rules(rules))
            }
            // The captured set is the complement of the uncaptured one, so
            // either identifies the class.
            EquivalenceVariant::CapturedBitvector => {
                Some(EquivalenceKey::Uncaptured(not_captured.clone()))
            }
        }
    }

    /// True if a live member of `key`'s class already has a lower bound no
    /// greater than `lower_bound`.
    ///
    /// A retired holder does not count: its class may be re-entered.
    pub fn dominates(&self, key: &EquivalenceKey, lower_bound: f64, arena: &Arena<'_>) -> bool {
        match self.entries.get(key) {
            Some(entry) => {
                entry.lower_bound <= lower_bound && !arena.node(entry.holder).is_retired()
            }
            None => false,
        }
    }

    /// Records `holder` as the best member of `key`'s class.
    ///
    /// Returns the previous holder, which the caller must retire.
    pub fn update(
        &mut self,
        key: EquivalenceKey,
        lower_bound: f64,
        holder: NodeId,
    ) -> Option<NodeId> {
        self.entries
            .insert(key, ClassEntry { lower_bound, holder })
            .map(|previous| previous.holder)
    }

    /// Best recorded lower bound and holder for `key`.
    pub fn get(&self, key: &EquivalenceKey) -> Option<(f64, NodeId)> {
        self.entries
            .get(key)
            .map(|entry| (entry.lower_bound, entry.holder))
    }
}

#[cfg(test)]
mod tests {
    use ruleforge_config::Ablation;
    use ruleforge_core::{Dataset, Rule};

    use super::*;
    use crate::arena::Evaluation;

    fn bits(s: &str) -> SampleSet {
        SampleSet::from_bit_str(s).unwrap()
    }

    #[test]
    fn test_no_variant_has_no_signature() {
        let map = EquivalenceMap::new(EquivalenceVariant::None);
        assert!(map.signature(&[2, 0], 1, &bits("01")).is_none());
        assert!(map.is_empty());
    }

    #[test]
    fn test_prefix_signature_ignores_order() {
        let map = EquivalenceMap::new(EquivalenceVariant::PrefixSignature);
        let a = map.signature(&[2, 0], 1, &bits("01"));
        let b = map.signature(&[1, 2], 0, &bits("10"));
        assert_eq!(a, b);
        assert_ne!(a, map.signature(&[1, 3], 0, &bits("10")));
    }

    #[test]
    fn test_captured_signature_ignores_rules() {
        let map = EquivalenceMap::new(EquivalenceVariant::CapturedBitvector);
        let a = map.signature(&[2, 0], 1, &bits("0110"));
        let b = map.signature(&[4], 3, &bits("0110"));
        assert_eq!(a, b);
        assert_ne!(a, map.signature(&[4], 3, &bits("0111")));
    }

    #[test]
    fn test_dominance_and_replacement() {
        let rules = vec![Rule::new("a", bits("10")), Rule::new("b", bits("01"))];
        let dataset = Dataset::new(rules, bits("10")).unwrap();
        let mut arena = Arena::new(&dataset, 0.01, Ablation::none());
        let root = arena.create_root();
        let full = SampleSet::full(2);
        let child = match arena.evaluate_child(root, &[], &full, 0) {
            Evaluation::Candidate(child) => child,
            Evaluation::Pruned(reason) => panic!("pruned: {reason:?}"),
        };
        let first = arena.insert(root, &child);
        let second = arena.insert(root, &child);

        let mut map = EquivalenceMap::new(EquivalenceVariant::PrefixSignature);
        let key = map.signature(&[], 0, &child.not_captured).unwrap();
        assert!(!map.dominates(&key, 0.5, &arena));
        assert_eq!(map.update(key.clone(), 0.3, first), None);

        // ties are dominated
        assert!(map.dominates(&key, 0.3, &arena));
        assert!(map.dominates(&key, 0.4, &arena));
        assert!(!map.dominates(&key, 0.2, &arena));

        assert_eq!(map.update(key.clone(), 0.2, second), Some(first));
        assert_eq!(map.get(&key), Some((0.2, second)));
        assert_eq!(map.len(), 1);

        // a retired holder no longer dominates
        arena.retire_subtree(second);
        assert!(!map.dominates(&key, 0.4, &arena));
    }
}
