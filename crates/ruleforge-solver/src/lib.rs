//! ruleforge Solver Engine
//!
//! This crate provides the exact rule list search, including:
//! - Node arena (trie of explored prefixes, best-solution record)
//! - Frontier queue with selectable expansion order
//! - Equivalence map collapsing permutation-equivalent prefixes
//! - Branch-and-bound driver (begin/step/end)
//! - Search statistics and trace output

pub mod arena;
pub mod equivalence;
pub mod outcome;
pub mod queue;
pub mod search;
pub mod stats;
pub mod trace;

pub use arena::{Arena, ChildCandidate, Evaluation, Node, NodeId, Prefix, Prune};
pub use equivalence::{EquivalenceKey, EquivalenceMap};
pub use outcome::{RetainedSearch, SearchOutcome};
pub use queue::FrontierQueue;
pub use search::{BranchAndBound, SearchStatus, LOUD_PROGRESS_INTERVAL};
pub use stats::SearchStats;
pub use trace::{FileTrace, TraceKind, TraceRecord, TraceSink};
