//! Result of a finished search.

use std::io;

use ruleforge_core::{Dataset, RuleList};

use crate::arena::Arena;
use crate::equivalence::EquivalenceMap;
use crate::queue::FrontierQueue;
use crate::stats::SearchStats;

/// What a search produced.
#[derive(Debug)]
pub struct SearchOutcome<'a> {
    /// Best rule list found.
    pub rule_list: RuleList,
    /// `1 - objective + c * len`: training accuracy of `rule_list`.
    pub accuracy: f64,
    /// Nodes created, including retired ones.
    pub num_nodes: usize,
    /// Children whose objective was computed.
    pub num_evaluated: u64,
    pub stats: SearchStats,
    /// True if the frontier was empty, so `rule_list` is provably optimal.
    pub exhausted: bool,
    /// Search structures handed back by an early end.
    pub retained: Option<RetainedSearch<'a>>,
    /// First error writing the trace file, if any. The search itself is
    /// unaffected.
    pub trace_error: Option<io::Error>,
}

impl SearchOutcome<'_> {
    /// Renders the rule list with the dataset's rule names.
    pub fn display<'d>(&'d self, dataset: &'d Dataset) -> ruleforge_core::RuleListDisplay<'d> {
        self.rule_list.display(dataset)
    }
}

/// Search structures kept alive after an early end, for inspection.
#[derive(Debug)]
pub struct RetainedSearch<'a> {
    pub arena: Arena<'a>,
    pub queue: FrontierQueue,
    pub map: EquivalenceMap,
}
