//! Node arena: the trie of explored prefixes and the best list found so far.
//!
//! The arena owns every node. Nodes never move or disappear while a search
//! runs, so a [`NodeId`] handed to the frontier or the equivalence map stays
//! valid. Superseded subtrees are tombstoned instead of freed and the whole
//! arena is released at once when the search ends.
//!
//! Evaluation of a child happens in two stages. [`Arena::evaluate_child`]
//! computes every bound without touching the trie, and
//! [`Arena::insert`] turns a surviving [`ChildCandidate`] into a node. The
//! driver decides in between whether the candidate is worth keeping.

mod node;


pub use node::{ChildCandidate, Node, NodeId, Prune};

use ruleforge_config::Ablation;
use ruleforge_core::{Dataset, RuleId, RuleList, SampleSet};
use smallvec::SmallVec;

/// Rule ids of a prefix in evaluation order.
pub type Prefix = SmallVec<[RuleId; 8]>;

/// Outcome of [`Arena::evaluate_child`].
#[derive(Debug, Clone)]
pub enum Evaluation {
    Pruned(Prune),
    Candidate(ChildCandidate),
}

/// Arena of prefix nodes over one dataset.
#[derive(Debug)]
pub struct Arena<'a> {
    dataset: &'a Dataset,
    regularization: f64,
    ablation: Ablation,
    nodes: Vec<Node>,
    best: RuleList,
    num_evaluated: u64,
}

impl<'a> Arena<'a> {
    /// Creates an empty arena. Call [`create_root`](Self::create_root) next.
    pub fn new(dataset: &'a Dataset, regularization: f64, ablation: Ablation) -> Self {
        Self {
            dataset,
            regularization,
            ablation,
            nodes: Vec::new(),
            // replaced by create_root
            best: RuleList::default_only(true, f64::INFINITY),
            num_evaluated: 0,
        }
    }

    /// Creates the root (empty prefix) and seeds the best list with the
    /// majority-label default.
    ///
    /// # Panics
    ///
    /// Panics if the arena already has a root.
    pub fn create_root(&mut self) -> NodeId {
        assert!(self.nodes.is_empty(), "the arena already has a root");

        let n = self.dataset.nsamples() as f64;
        let positives = self.dataset.positives().count();
        let negatives = self.dataset.nsamples() - positives;
        let default_prediction = positives >= negatives;
        let objective = positives.min(negatives) as f64 / n;

        let equivalent_points_bound = match self.minority() {
            Some(minority) => minority.count() as f64 / n,
            None => 0.0,
        };

        self.nodes
            .push(Node::root(default_prediction, objective, equivalent_points_bound));
        self.best = RuleList::default_only(default_prediction, objective);
        NodeId(0)
    }

    /// The root node id.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Looks up a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this arena.
    pub fn node(&self, id: NodeId) -> &Node {
        match self.nodes.get(id.0) {
            Some(node) => node,
            None => panic!("node {id} is not in the arena ({} nodes)", self.nodes.len()),
        }
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        let len = self.nodes.len();
        match self.nodes.get_mut(id.0) {
            Some(node) => node,
            None => panic!("node {id} is not in the arena ({len} nodes)"),
        }
    }

    /// Number of nodes ever created, including retired ones.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of children whose objective was computed.
    pub fn num_evaluated(&self) -> u64 {
        self.num_evaluated
    }

    /// Best rule list found so far.
    pub fn best(&self) -> &RuleList {
        &self.best
    }

    /// Objective of the best rule list found so far.
    pub fn min_objective(&self) -> f64 {
        self.best.objective()
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    pub fn regularization(&self) -> f64 {
        self.regularization
    }

    /// Rule ids from the root down to `id`.
    pub fn prefix(&self, id: NodeId) -> Prefix {
        let mut prefix = Prefix::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node(node_id);
            if let Some(rule) = node.rule() {
                prefix.push(rule);
            }
            current = node.parent();
        }
        prefix.reverse();
        prefix
    }

    /// Per-rule predictions from the root down to `id`.
    fn path_predictions(&self, id: NodeId) -> Vec<bool> {
        let mut predictions = Vec::with_capacity(self.node(id).depth() + 2);
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node(node_id);
            if !node.is_root() {
                predictions.push(node.prediction());
            }
            current = node.parent();
        }
        predictions.reverse();
        predictions
    }

    /// Samples no rule of `prefix` matches.
    pub fn not_captured(&self, prefix: &[RuleId]) -> SampleSet {
        let mut remaining = SampleSet::full(self.dataset.nsamples());
        for &rule in prefix {
            remaining.and_not_assign(self.dataset.rule(rule).truth_table());
        }
        remaining
    }

    /// Samples some rule of the prefix ending at `id` matches.
    pub fn captured(&self, id: NodeId) -> SampleSet {
        self.not_captured(&self.prefix(id)).complement()
    }

    /// Finds the node for `prefix` by walking the trie from the root.
    pub fn find_prefix(&self, prefix: &[RuleId]) -> Option<NodeId> {
        if self.nodes.is_empty() {
            return None;
        }
        let mut current = self.root();
        for &rule in prefix {
            current = self
                .node(current)
                .children()
                .iter()
                .copied()
                .find(|&child| self.node(child).rule() == Some(rule))?;
        }
        Some(current)
    }

    fn minority(&self) -> Option<&'a SampleSet> {
        if self.ablation.equivalent_points {
            self.dataset.minority()
        } else {
            None
        }
    }

    /// Evaluates appending `rule` to the prefix ending at `parent`.
    ///
    /// `prefix` and `not_captured` must describe `parent`. The child's
    /// objective is counted as evaluated only when it gets past the support
    /// and lower-bound checks.
    ///
    /// # Panics
    ///
    /// Panics if `rule` is already in `prefix`.
    pub fn evaluate_child(
        &mut self,
        parent: NodeId,
        prefix: &[RuleId],
        not_captured: &SampleSet,
        rule: RuleId,
    ) -> Evaluation {
        assert!(
            !prefix.contains(&rule),
            "rule {rule} is already in prefix {prefix:?}"
        );

        let dataset = self.dataset;
        let n = dataset.nsamples() as f64;
        let c = self.regularization;
        let threshold = c * n;
        let positives = dataset.positives();
        let parent_node = self.node(parent);
        let parent_lower_bound = parent_node.lower_bound();
        let parent_captured = parent_node.num_captured();

        let captured = not_captured.and(dataset.rule(rule).truth_table());
        let num_captured = captured.count();
        if num_captured == 0 {
            return Evaluation::Pruned(Prune::EmptyCapture);
        }
        if self.ablation.support_bounds && (num_captured as f64) < threshold {
            return Evaluation::Pruned(Prune::Support);
        }

        let captured_positive = captured.and_count(positives);
        let captured_negative = num_captured - captured_positive;
        let prediction = captured_positive >= captured_negative;
        let captured_correct = captured_positive.max(captured_negative);
        if self.ablation.support_bounds && (captured_correct as f64) < threshold {
            return Evaluation::Pruned(Prune::Support);
        }

        let lower_bound =
            parent_lower_bound + (num_captured - captured_correct) as f64 / n + c;
        if lower_bound >= self.min_objective() {
            return Evaluation::Pruned(Prune::LowerBound);
        }

        let remaining = not_captured.and_not(&captured);
        let num_remaining = remaining.count();
        let default_positive = remaining.and_count(positives);
        let default_negative = num_remaining - default_positive;
        let default_prediction = default_positive >= default_negative;
        let default_correct = default_positive.max(default_negative);
        let objective = lower_bound + (num_remaining - default_correct) as f64 / n;
        self.num_evaluated += 1;

        let equivalent_points_bound = match self.minority() {
            Some(minority) => lower_bound + remaining.and_count(minority) as f64 / n,
            None => lower_bound,
        };

        Evaluation::Candidate(ChildCandidate {
            rule,
            prediction,
            default_prediction,
            lower_bound,
            objective,
            equivalent_points_bound,
            num_captured: parent_captured + num_captured,
            not_captured: remaining,
        })
    }

    /// Replaces the best list if `candidate` (a child of `parent`) beats it.
    ///
    /// Returns true on improvement.
    pub fn record_if_better(&mut self, parent: NodeId, candidate: &ChildCandidate) -> bool {
        let previous = self.min_objective();
        if candidate.objective >= previous {
            return false;
        }

        let mut rules = self.prefix(parent).into_vec();
        rules.push(candidate.rule);
        let mut predictions = self.path_predictions(parent);
        predictions.push(candidate.prediction);
        predictions.push(candidate.default_prediction);

        self.best = RuleList::new(rules, predictions, candidate.objective);
        assert!(
            self.best.objective() < previous,
            "best objective went from {previous} to {}",
            self.best.objective()
        );
        true
    }

    /// Inserts `candidate` as a child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if the candidate's bounds are inconsistent with its parent's.
    pub fn insert(&mut self, parent: NodeId, candidate: &ChildCandidate) -> NodeId {
        let parent_node = self.node(parent);
        assert!(
            candidate.lower_bound >= parent_node.lower_bound(),
            "child lower bound {} is below its parent's {}",
            candidate.lower_bound,
            parent_node.lower_bound()
        );
        assert!(
            candidate.lower_bound <= candidate.objective,
            "lower bound {} exceeds objective {}",
            candidate.lower_bound,
            candidate.objective
        );

        let depth = parent_node.depth() + 1;
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::child(parent, depth, candidate));
        self.node_mut(parent).push_child(id);
        id
    }

    /// Tombstones `id` and all its descendants. Returns how many nodes were
    /// newly retired.
    pub fn retire_subtree(&mut self, id: NodeId) -> usize {
        let mut retired = 0;
        let mut stack = vec![id];
        while let Some(node_id) = stack.pop() {
            let node = self.node_mut(node_id);
            if !node.is_retired() {
                node.retire();
                retired += 1;
            }
            stack.extend_from_slice(node.children());
        }
        retired
    }
}
