//! Search statistics.
//!
//! Counters for each pruning rule plus an optional histogram of queued
//! prefix lengths.

use std::time::{Duration, Instant};

use crate::arena::Prune;

/// Search-level statistics.
///
/// # Example
///
/// ```
/// use ruleforge_solver::stats::SearchStats;
///
/// let mut stats = SearchStats::with_size_tracking(true);
/// stats.start();
/// stats.record_push(0);
/// stats.record_push(1);
/// stats.record_pop(0);
///
/// assert_eq!(stats.nodes_popped, 1);
/// assert_eq!(stats.prefix_lengths(), Some(&[0, 1][..]));
/// assert_eq!(stats.max_queued_prefix_length(), Some(1));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SearchStats {
    start_time: Option<Instant>,
    /// Nodes taken from the frontier.
    pub nodes_popped: u64,
    /// Popped nodes skipped because they were retired or outgrown.
    pub discarded_at_pop: u64,
    /// Children capturing none of the remaining samples.
    pub pruned_empty_capture: u64,
    /// Children failing a support bound.
    pub pruned_support: u64,
    /// Children whose lower bound reached the best objective.
    pub pruned_lower_bound: u64,
    /// Children failing the lookahead bound.
    pub pruned_lookahead: u64,
    /// Children dominated by an equivalent prefix.
    pub pruned_equivalence: u64,
    /// Equivalence classes taken over by a better prefix.
    pub equivalence_replacements: u64,
    /// Nodes tombstoned by replacements.
    pub nodes_retired: u64,
    /// Times the best objective improved.
    pub improvements: u64,
    prefix_lengths: Option<Vec<usize>>,
}

impl SearchStats {
    /// Creates empty statistics, optionally tracking queued prefix lengths.
    pub fn with_size_tracking(enabled: bool) -> Self {
        Self {
            prefix_lengths: enabled.then(Vec::new),
            ..Self::default()
        }
    }

    /// Marks the start of the search.
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Returns the elapsed time since the search started.
    pub fn elapsed(&self) -> Duration {
        self.start_time.map(|t| t.elapsed()).unwrap_or_default()
    }

    /// Records a node of `depth` entering the frontier.
    pub fn record_push(&mut self, depth: usize) {
        if let Some(lengths) = &mut self.prefix_lengths {
            if lengths.len() <= depth {
                lengths.resize(depth + 1, 0);
            }
            lengths[depth] += 1;
        }
    }

    /// Records a node of `depth` leaving the frontier.
    pub fn record_pop(&mut self, depth: usize) {
        self.nodes_popped += 1;
        if let Some(lengths) = &mut self.prefix_lengths {
            assert!(
                lengths.get(depth).is_some_and(|&count| count > 0),
                "popped a prefix of length {depth} that was never queued"
            );
            lengths[depth] -= 1;
        }
    }

    /// Records a child discarded during evaluation.
    pub fn record_prune(&mut self, reason: Prune) {
        match reason {
            Prune::EmptyCapture => self.pruned_empty_capture += 1,
            Prune::Support => self.pruned_support += 1,
            Prune::LowerBound => self.pruned_lower_bound += 1,
        }
    }

    /// Records an equivalence class changing holder.
    pub fn record_replacement(&mut self, retired: usize) {
        self.equivalence_replacements += 1;
        self.nodes_retired += retired as u64;
    }

    /// Queued node count per prefix length, if size tracking is on.
    pub fn prefix_lengths(&self) -> Option<&[usize]> {
        self.prefix_lengths.as_deref()
    }

    /// Longest prefix currently queued, if size tracking is on.
    pub fn max_queued_prefix_length(&self) -> Option<usize> {
        self.prefix_lengths
            .as_ref()
            .map(|lengths| lengths.iter().rposition(|&count| count > 0).unwrap_or(0))
    }

    /// Returns the popped nodes per second rate.
    pub fn nodes_per_second(&self) -> f64 {
        let secs = self.elapsed().as_secs_f64();
        if secs > 0.0 {
            self.nodes_popped as f64 / secs
        } else {
            0.0
        }
    }
}
