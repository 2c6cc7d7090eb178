//! Branch-and-bound driver.
//!
//! [`BranchAndBound`] owns the arena, the frontier and the equivalence map
//! of one search and runs it in caller-sized chunks:
//!
//! ```text
//! begin ──► Running ──step──► Suspended ──step──► ... ──► Terminated
//!                                  │                         ▲
//!                                  └──────── end ────────────┘
//! ```
//!
//! Each popped node is expanded against every rule not already in its
//! prefix. A child is discarded if it fails a support bound, if its lower
//! bound reaches the best objective, if it cannot beat the best objective
//! even with one more rule, or if a permutation-equivalent prefix with a
//! lower bound at least as good is already known. Survivors enter the arena
//! and the frontier.

mod report;


use ruleforge_config::{SearchConfig, Verbosity};
use ruleforge_core::{Dataset, Result, RuleList};
use tracing::{debug, info, warn};

use crate::arena::{Arena, Evaluation, NodeId};
use crate::equivalence::EquivalenceMap;
use crate::outcome::{RetainedSearch, SearchOutcome};
use crate::queue::FrontierQueue;
use crate::stats::SearchStats;
use crate::trace::{TraceKind, TraceRecord, TraceSink};

/// Popped nodes between progress lines when verbosity is `loud`.
pub const LOUD_PROGRESS_INTERVAL: u64 = 10_000;

/// Where a search stands between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// Started, no step has returned yet.
    Running,
    /// The last step hit its node budget with work left.
    Suspended,
    /// The frontier is empty or the search was ended.
    Terminated,
}

/// One exact rule-list search over a dataset.
///
/// # Example
///
/// ```
/// use ruleforge_config::SearchConfig;
/// use ruleforge_core::{Dataset, Rule, SampleSet};
/// use ruleforge_solver::{BranchAndBound, TraceSink};
///
/// let rules = vec![
///     Rule::new("a", SampleSet::from_bit_str("1100").unwrap()),
///     Rule::new("b", SampleSet::from_bit_str("0011").unwrap()),
/// ];
/// let dataset = Dataset::new(rules, SampleSet::from_bit_str("1101").unwrap()).unwrap();
///
/// let mut search = BranchAndBound::begin(&dataset, &SearchConfig::default(), TraceSink::None).unwrap();
/// while search.step(1_000) {}
/// let outcome = search.end(false);
///
/// assert!(outcome.exhausted);
/// assert!(outcome.retained.is_none());
/// assert!((outcome.rule_list.objective() - 0.25).abs() < 1e-12);
/// ```
#[derive(Debug)]
pub struct BranchAndBound<'a> {
    dataset: &'a Dataset,
    config: SearchConfig,
    verbosity: Verbosity,
    arena: Arena<'a>,
    queue: FrontierQueue,
    map: EquivalenceMap,
    stats: SearchStats,
    trace: TraceSink,
    status: SearchStatus,
}

impl<'a> BranchAndBound<'a> {
    /// Validates `config` and sets up a search with only the root queued.
    ///
    /// The root is the empty rule list predicting the majority label; it
    /// seeds the best solution. With no rules the frontier starts empty.
    ///
    /// # Errors
    ///
    /// Returns [`RuleForgeError::Config`](ruleforge_core::RuleForgeError::Config)
    /// if the configuration is invalid.
    pub fn begin(dataset: &'a Dataset, config: &SearchConfig, trace: TraceSink) -> Result<Self> {
        let verbosity = config.validate()?;
        let c = config.regularization;

        report::dump_inputs(dataset, &verbosity);

        let mut arena = Arena::new(dataset, c, config.ablation);
        let root = arena.create_root();
        let mut queue = FrontierQueue::new(config.queue_policy, c, dataset.nsamples());
        let mut stats = SearchStats::with_size_tracking(config.size_tracking);
        stats.start();

        if dataset.nrules() > 0 {
            queue.push(root, arena.node(root));
            stats.record_push(0);
        }

        if verbosity.progress {
            info!(
                event = "search_start",
                queue_policy = %config.queue_policy,
                equivalence = %config.equivalence,
                rule_count = dataset.nrules(),
                sample_count = dataset.nsamples(),
                regularization = c,
                objective = arena.min_objective(),
            );
        }

        Ok(Self {
            dataset,
            map: EquivalenceMap::new(config.equivalence),
            config: config.clone(),
            verbosity,
            arena,
            queue,
            stats,
            trace,
            status: SearchStatus::Running,
        })
    }

    /// Expands frontier nodes until `node_budget` new nodes were created
    /// during this call or the frontier is empty.
    ///
    /// Returns true if work remains. A budget of 0 does nothing.
    pub fn step(&mut self, node_budget: usize) -> bool {
        if self.status == SearchStatus::Terminated {
            return false;
        }

        let target = self.arena.num_nodes().saturating_add(node_budget);
        while self.arena.num_nodes() < target {
            let Some(id) = self.queue.pop() else {
                break;
            };
            let depth = self.arena.node(id).depth();
            self.stats.record_pop(depth);
            self.expand(id);
            self.after_pop();
        }

        if self.queue.is_empty() {
            self.status = SearchStatus::Terminated;
            false
        } else {
            self.status = SearchStatus::Suspended;
            true
        }
    }

    /// True if a node whose equivalent-points bound is `bound` cannot lead
    /// to a list better than the best one.
    fn cannot_improve(&self, bound: f64) -> bool {
        let bound = if self.config.ablation.lookahead_bound {
            bound + self.config.regularization
        } else {
            bound
        };
        bound >= self.arena.min_objective()
    }

    fn expand(&mut self, id: NodeId) {
        let node = self.arena.node(id);
        if node.is_retired() || self.cannot_improve(node.equivalent_points_bound()) {
            self.stats.discarded_at_pop += 1;
            return;
        }

        let prefix = self.arena.prefix(id);
        let not_captured = self.arena.not_captured(&prefix);

        for rule in 0..self.dataset.nrules() {
            if prefix.contains(&rule) {
                continue;
            }

            let candidate = match self.arena.evaluate_child(id, &prefix, &not_captured, rule) {
                Evaluation::Pruned(reason) => {
                    self.stats.record_prune(reason);
                    continue;
                }
                Evaluation::Candidate(candidate) => candidate,
            };

            if self.arena.record_if_better(id, &candidate) {
                self.on_improvement();
            }

            if self.cannot_improve(candidate.equivalent_points_bound) {
                self.stats.pruned_lookahead += 1;
                continue;
            }

            let key = self.map.signature(&prefix, rule, &candidate.not_captured);
            if let Some(key) = &key {
                if self.map.dominates(key, candidate.lower_bound, &self.arena) {
                    self.stats.pruned_equivalence += 1;
                    continue;
                }
            }

            let child = self.arena.insert(id, &candidate);
            if let Some(key) = key {
                if let Some(previous) = self.map.update(key, candidate.lower_bound, child) {
                    let retired = self.arena.retire_subtree(previous);
                    self.stats.record_replacement(retired);
                }
            }

            let child_node = self.arena.node(child);
            self.queue.push(child, child_node);
            self.stats.record_push(child_node.depth());
        }
    }

    fn on_improvement(&mut self) {
        self.stats.improvements += 1;
        if self.verbosity.progress {
            let best = self.arena.best();
            info!(
                event = "improvement",
                objective = best.objective(),
                rule_count = best.len(),
                num_nodes = self.arena.num_nodes(),
                num_evaluated = self.arena.num_evaluated(),
            );
        }
        self.emit(TraceKind::Improvement);
    }

    fn after_pop(&mut self) {
        let popped = self.stats.nodes_popped;
        if let Some(every) = self.config.trace_frequency {
            if popped % every == 0 {
                self.emit(TraceKind::Periodic);
            }
        }
        if self.verbosity.loud && popped % LOUD_PROGRESS_INTERVAL == 0 {
            debug!(
                event = "progress",
                nodes_popped = popped,
                num_nodes = self.arena.num_nodes(),
                queue_len = self.queue.len(),
                objective = self.arena.min_objective(),
                max_prefix_length = ?self.stats.max_queued_prefix_length(),
            );
        }
    }

    fn emit(&mut self, kind: TraceKind) {
        if self.trace.is_none() {
            return;
        }
        let record = TraceRecord {
            kind,
            elapsed_secs: self.stats.elapsed().as_secs_f64(),
            num_nodes: self.arena.num_nodes(),
            num_evaluated: self.arena.num_evaluated(),
            objective: self.arena.min_objective(),
            queue_len: self.queue.len(),
            prefix_lengths: self.stats.prefix_lengths().map(<[usize]>::to_vec),
        };
        self.trace.record(&record);
    }

    /// Finishes the search and extracts the best rule list.
    ///
    /// With `early` set, the arena, frontier and map are handed back in
    /// [`SearchOutcome::retained`] instead of being dropped. A trace file
    /// that could not be written does not affect the result; the error is
    /// reported in [`SearchOutcome::trace_error`].
    pub fn end(mut self, early: bool) -> SearchOutcome<'a> {
        self.status = SearchStatus::Terminated;
        let rule_list = self.arena.best().clone();
        let accuracy = rule_list.accuracy(self.config.regularization);
        let exhausted = self.queue.is_empty();

        if self.verbosity.progress {
            info!(
                event = "search_end",
                early,
                exhausted,
                num_nodes = self.arena.num_nodes(),
                num_evaluated = self.arena.num_evaluated(),
                objective = rule_list.objective(),
                accuracy,
                nodes_per_second = self.stats.nodes_per_second(),
                duration_ms = self.stats.elapsed().as_millis() as u64,
            );
            info!(
                event = "rule_list",
                rule_list = %rule_list.display(self.dataset),
            );
        }

        self.emit(TraceKind::Summary);
        let trace_error = self.trace.finish().err();
        if let Some(e) = &trace_error {
            warn!(event = "trace_failed", trace = ?self.trace, error = %e);
        }

        let Self {
            arena,
            queue,
            map,
            stats,
            ..
        } = self;
        let num_nodes = arena.num_nodes();
        let num_evaluated = arena.num_evaluated();
        let retained = early.then(|| RetainedSearch { arena, queue, map });

        SearchOutcome {
            rule_list,
            accuracy,
            num_nodes,
            num_evaluated,
            stats,
            exhausted,
            retained,
            trace_error,
        }
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    pub fn arena(&self) -> &Arena<'a> {
        &self.arena
    }

    pub fn queue(&self) -> &FrontierQueue {
        &self.queue
    }

    pub fn map(&self) -> &EquivalenceMap {
        &self.map
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Best rule list found so far.
    pub fn best(&self) -> &RuleList {
        self.arena.best()
    }

    pub fn min_objective(&self) -> f64 {
        self.arena.min_objective()
    }

    pub fn num_nodes(&self) -> usize {
        self.arena.num_nodes()
    }

    pub fn num_evaluated(&self) -> u64 {
        self.arena.num_evaluated()
    }
}
