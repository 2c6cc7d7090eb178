//! ruleforge - Certifiably Optimal Rule Lists in Rust
//!
//! Finds the rule list minimizing misclassification error plus a fixed
//! penalty per rule, and proves no better list exists.
//!
//! # Example
//!
//! ```rust
//! use ruleforge::prelude::*;
//!
//! let dataset = Dataset::from_columns(
//!     [
//!         ("fever", vec![true, true, false, false]),
//!         ("cough", vec![false, false, true, false]),
//!     ],
//!     &[true, true, false, true],
//! )
//! .unwrap();
//!
//! let outcome = ruleforge::solve(&dataset, &SearchConfig::default(), TraceSink::None).unwrap();
//! assert!(outcome.exhausted);
//! assert_eq!(outcome.rule_list.rules(), &[1]);
//! assert_eq!(outcome.display(&dataset).to_string(), "if (cough) then (0)\nelse (1)");
//! ```

mod solve;

pub use solve::{init_tracing, solve, SOLVE_CHUNK};

// Data model
pub use ruleforge_core::{
    Dataset, Result, Rule, RuleForgeError, RuleId, RuleList, RuleListDisplay, SampleSet,
};

// Configuration
pub use ruleforge_config::{
    Ablation, ConfigError, EquivalenceVariant, QueuePolicy, SearchConfig, Verbosity,
};

// Engine
pub use ruleforge_solver::{
    BranchAndBound, RetainedSearch, SearchOutcome, SearchStats, SearchStatus, TraceKind,
    TraceRecord, TraceSink,
};

/// Lower-level engine pieces: the arena, frontier and equivalence map.
pub mod engine {
    pub use ruleforge_solver::{
        Arena, ChildCandidate, EquivalenceKey, EquivalenceMap, Evaluation, FrontierQueue, Node,
        NodeId, Prefix, Prune,
    };
}

pub mod prelude {
    pub use super::{Dataset, Rule, RuleList, SampleSet};
    pub use super::{Ablation, EquivalenceVariant, QueuePolicy, SearchConfig};
    pub use super::{BranchAndBound, SearchOutcome, TraceSink};
}
