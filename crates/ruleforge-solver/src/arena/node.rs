//! Prefix node representation.
//!
//! Each node is one explored prefix: an ordered list of rules followed by a
//! default prediction. Nodes live in the [`Arena`](super::Arena) and refer to
//! each other by [`NodeId`].

use std::fmt;

use ruleforge_core::{RuleId, SampleSet};
use smallvec::SmallVec;

/// Stable handle to a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in creation order (the root is 0).
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node in the prefix trie.
///
/// Each node represents a prefix, containing:
/// - The rule appended to its parent's prefix (none for the root)
/// - The lower bound on any list that starts with this prefix
/// - The objective if the list ends here with a default prediction
/// - The equivalent-points bound (lower bound plus unavoidable mistakes)
#[derive(Debug, Clone)]
pub struct Node {
    /// Rule appended to the parent's prefix (None for root).
    rule: Option<RuleId>,

    /// Parent node (None for root). Used only to rebuild prefixes.
    parent: Option<NodeId>,

    /// Number of rules in the prefix.
    depth: usize,

    /// Majority label of the samples this node's rule captures.
    prediction: bool,

    /// Majority label of the samples no rule of the prefix captures.
    default_prediction: bool,

    /// Mistakes on captured samples plus regularization, over all samples.
    lower_bound: f64,

    /// `lower_bound` plus mistakes of the default prediction.
    objective: f64,

    /// `lower_bound` plus uncaptured minority samples.
    equivalent_points_bound: f64,

    /// Samples captured by some rule of the prefix.
    num_captured: usize,

    /// Child nodes, in creation order.
    children: SmallVec<[NodeId; 4]>,

    /// Set when a better permutation of this prefix (or of an ancestor)
    /// superseded it.
    retired: bool,
}

impl Node {
    /// Creates the root node (empty prefix).
    pub(crate) fn root(
        default_prediction: bool,
        objective: f64,
        equivalent_points_bound: f64,
    ) -> Self {
        Self {
            rule: None,
            parent: None,
            depth: 0,
            prediction: default_prediction,
            default_prediction,
            lower_bound: 0.0,
            objective,
            equivalent_points_bound,
            num_captured: 0,
            children: SmallVec::new(),
            retired: false,
        }
    }

    /// Creates a child node from an evaluated candidate.
    pub(crate) fn child(parent: NodeId, depth: usize, candidate: &ChildCandidate) -> Self {
        Self {
            rule: Some(candidate.rule),
            parent: Some(parent),
            depth,
            prediction: candidate.prediction,
            default_prediction: candidate.default_prediction,
            lower_bound: candidate.lower_bound,
            objective: candidate.objective,
            equivalent_points_bound: candidate.equivalent_points_bound,
            num_captured: candidate.num_captured,
            children: SmallVec::new(),
            retired: false,
        }
    }

    #[inline]
    pub fn rule(&self) -> Option<RuleId> {
        self.rule
    }

    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[inline]
    pub fn prediction(&self) -> bool {
        self.prediction
    }

    #[inline]
    pub fn default_prediction(&self) -> bool {
        self.default_prediction
    }

    #[inline]
    pub fn lower_bound(&self) -> f64 {
        self.lower_bound
    }

    #[inline]
    pub fn objective(&self) -> f64 {
        self.objective
    }

    #[inline]
    pub fn equivalent_points_bound(&self) -> f64 {
        self.equivalent_points_bound
    }

    #[inline]
    pub fn num_captured(&self) -> usize {
        self.num_captured
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    #[inline]
    pub fn is_retired(&self) -> bool {
        self.retired
    }

    /// Mistakes per captured sample, with one rule's regularization added.
    ///
    /// Small values mark prefixes whose rules classify what they capture
    /// well. The root captures nothing and sorts last.
    pub fn curiosity(&self, c: f64, nsamples: usize) -> f64 {
        if self.num_captured == 0 {
            return f64::INFINITY;
        }
        (self.lower_bound - c * self.depth as f64 + c) * nsamples as f64
            / self.num_captured as f64
    }

    pub(crate) fn push_child(&mut self, child: NodeId) {
        self.children.push(child);
    }

    pub(crate) fn retire(&mut self) {
        self.retired = true;
    }
}

/// A fully evaluated child that has not been inserted into the arena yet.
///
/// The driver inspects a candidate (lookahead, symmetry) before deciding
/// whether it becomes a [`Node`].
#[derive(Debug, Clone)]
pub struct ChildCandidate {
    pub rule: RuleId,
    pub prediction: bool,
    pub default_prediction: bool,
    pub lower_bound: f64,
    pub objective: f64,
    pub equivalent_points_bound: f64,
    /// Samples captured by the whole prefix including `rule`.
    pub num_captured: usize,
    /// Samples still uncaptured after `rule`.
    pub not_captured: SampleSet,
}

/// Why a child was discarded before evaluation completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prune {
    /// The rule captures none of the remaining samples.
    EmptyCapture,
    /// The rule's (accurate) support is below `c * nsamples`.
    Support,
    /// The lower bound already reaches the best objective.
    LowerBound,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(lower_bound: f64, num_captured: usize) -> ChildCandidate {
        ChildCandidate {
            rule: 2,
            prediction: true,
            default_prediction: false,
            lower_bound,
            objective: lower_bound + 0.25,
            equivalent_points_bound: lower_bound,
            num_captured,
            not_captured: SampleSet::empty(4),
        }
    }

    #[test]
    fn test_root_node() {
        let node = Node::root(true, 0.5, 0.25);

        assert!(node.is_root());
        assert_eq!(node.depth(), 0);
        assert_eq!(node.rule(), None);
        assert_eq!(node.lower_bound(), 0.0);
        assert_eq!(node.objective(), 0.5);
        assert_eq!(node.equivalent_points_bound(), 0.25);
        assert!(node.default_prediction());
        assert!(!node.is_retired());
    }

    #[test]
    fn test_child_node() {
        let node = Node::child(NodeId(0), 1, &candidate(0.26, 2));

        assert_eq!(node.parent(), Some(NodeId(0)));
        assert_eq!(node.rule(), Some(2));
        assert_eq!(node.depth(), 1);
        assert_eq!(node.objective(), 0.51);
        assert_eq!(node.num_captured(), 2);
    }

    #[test]
    fn test_curiosity() {
        // one mistake among 2 captured of 4 samples, c = 0.01
        let node = Node::child(NodeId(0), 1, &candidate(0.26, 2));
        let curiosity = node.curiosity(0.01, 4);
        assert!((curiosity - 0.52).abs() < 1e-12);

        let root = Node::root(false, 0.5, 0.0);
        assert_eq!(root.curiosity(0.01, 4), f64::INFINITY);
    }

    #[test]
    fn test_retire() {
        let mut node = Node::root(false, 0.5, 0.0);
        node.retire();
        assert!(node.is_retired());
    }

    #[test]
    fn test_node_id_display() {
        assert_eq!(NodeId(7).to_string(), "#7");
        assert_eq!(NodeId(7).index(), 7);
    }
}
