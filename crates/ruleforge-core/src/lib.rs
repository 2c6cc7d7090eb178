//! ruleforge Core - data types shared by every ruleforge crate
//!
//! This crate provides the fundamental abstractions for rule list search:
//! - Sample bit-vectors used for rule truth tables and labels
//! - The dataset of candidate rules and labeled samples
//! - Equivalent-points (minority) computation
//! - The rule list produced by a search

pub mod dataset;
pub mod error;
pub mod rule_list;
pub mod sample_set;

pub use dataset::{Dataset, Rule, RuleId};
pub use error::{Result, RuleForgeError};
pub use rule_list::{RuleList, RuleListDisplay};
pub use sample_set::SampleSet;
