//! Configuration system for ruleforge.
//!
//! Load search configuration from TOML or YAML to control the objective's
//! regularization, the frontier ordering, symmetry deduplication and the
//! active pruning bounds without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use ruleforge_config::{EquivalenceVariant, QueuePolicy, SearchConfig};
//!
//! let config = SearchConfig::from_toml_str(r#"
//!     regularization = 0.005
//!     queue_policy = "curious"
//!     equivalence = "captured_bitvector"
//!     verbosity = "progress,rule"
//!     max_num_nodes = 50000
//!
//!     [ablation]
//!     lookahead_bound = false
//! "#).unwrap();
//!
//! assert_eq!(config.queue_policy, QueuePolicy::Curious);
//! assert_eq!(config.equivalence, EquivalenceVariant::CapturedBitvector);
//! assert!(!config.ablation.lookahead_bound);
//! assert!(config.ablation.support_bounds);
//!
//! let verbosity = config.validate().unwrap();
//! assert!(verbosity.progress && verbosity.rule && !verbosity.label);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use ruleforge_config::SearchConfig;
//!
//! let config = SearchConfig::load("ruleforge.toml").unwrap_or_default();
//! assert_eq!(config.regularization, 0.01);
//! ```

mod verbosity;

use std::fmt;
use std::path::Path;

use ruleforge_core::RuleForgeError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use verbosity::Verbosity;

/// Default regularization weight per rule.
pub const DEFAULT_REGULARIZATION: f64 = 0.01;

/// Default global node cap used by the convenience solve loop.
pub const DEFAULT_MAX_NUM_NODES: usize = 100_000;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("verbosity options must be one or more of (rule|label|minor|samples|progress|loud), got {0:?}")]
    UnknownVerbosity(String),

    #[error("regularization must be positive, got {0}")]
    NonPositiveRegularization(f64),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for RuleForgeError {
    fn from(err: ConfigError) -> Self {
        RuleForgeError::Config(err.to_string())
    }
}

/// Main search configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchConfig {
    /// Regularization weight `c` charged per rule in the list.
    #[serde(default = "default_regularization")]
    pub regularization: f64,

    /// Order in which the frontier is expanded.
    #[serde(default)]
    pub queue_policy: QueuePolicy,

    /// Symmetry-deduplication variant.
    #[serde(default)]
    pub equivalence: EquivalenceVariant,

    /// Which pruning bounds are active.
    #[serde(default)]
    pub ablation: Ablation,

    /// Track the distribution of queued prefix lengths.
    #[serde(default)]
    pub size_tracking: bool,

    /// Comma-separated verbosity tokens, e.g. `"progress,rule"`.
    #[serde(default)]
    pub verbosity: String,

    /// Global cap on explored nodes for the convenience solve loop.
    #[serde(default = "default_max_num_nodes")]
    pub max_num_nodes: usize,

    /// Also write a trace record every this many popped nodes.
    #[serde(default)]
    pub trace_frequency: Option<u64>,
}

fn default_regularization() -> f64 {
    DEFAULT_REGULARIZATION
}

fn default_max_num_nodes() -> usize {
    DEFAULT_MAX_NUM_NODES
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            regularization: DEFAULT_REGULARIZATION,
            queue_policy: QueuePolicy::default(),
            equivalence: EquivalenceVariant::default(),
            ablation: Ablation::default(),
            size_tracking: false,
            verbosity: String::new(),
            max_num_nodes: DEFAULT_MAX_NUM_NODES,
            trace_frequency: None,
        }
    }
}

impl SearchConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the regularization weight.
    pub fn with_regularization(mut self, c: f64) -> Self {
        self.regularization = c;
        self
    }

    /// Sets the frontier ordering.
    pub fn with_queue_policy(mut self, policy: QueuePolicy) -> Self {
        self.queue_policy = policy;
        self
    }

    /// Sets the symmetry-deduplication variant.
    pub fn with_equivalence(mut self, variant: EquivalenceVariant) -> Self {
        self.equivalence = variant;
        self
    }

    /// Sets the active pruning bounds.
    pub fn with_ablation(mut self, ablation: Ablation) -> Self {
        self.ablation = ablation;
        self
    }

    /// Sets the verbosity token string.
    pub fn with_verbosity(mut self, verbosity: impl Into<String>) -> Self {
        self.verbosity = verbosity.into();
        self
    }

    /// Enables or disables prefix-length tracking.
    pub fn with_size_tracking(mut self, enabled: bool) -> Self {
        self.size_tracking = enabled;
        self
    }

    /// Sets the global node cap.
    pub fn with_max_num_nodes(mut self, max_num_nodes: usize) -> Self {
        self.max_num_nodes = max_num_nodes;
        self
    }

    /// Sets the periodic trace frequency.
    pub fn with_trace_frequency(mut self, every: u64) -> Self {
        self.trace_frequency = Some(every);
        self
    }

    /// Checks every field and returns the parsed verbosity flags.
    ///
    /// # Errors
    ///
    /// Rejects a non-positive (or NaN) regularization, an unrecognized
    /// verbosity token, and a zero trace frequency.
    pub fn validate(&self) -> Result<Verbosity, ConfigError> {
        if self.regularization.is_nan() || self.regularization <= 0.0 {
            return Err(ConfigError::NonPositiveRegularization(self.regularization));
        }
        if self.trace_frequency == Some(0) {
            return Err(ConfigError::Invalid(
                "trace_frequency must be at least 1".into(),
            ));
        }
        self.verbosity.parse()
    }
}

/// Frontier ordering policy.
///
/// Every policy breaks ties by insertion order, so a run is deterministic
/// for a fixed configuration and input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueuePolicy {
    /// Ascending depth (breadth-first).
    #[default]
    Bfs,

    /// Ascending curiosity: misclassification per captured sample.
    Curious,

    /// Ascending lower bound.
    LowerBound,

    /// Ascending objective.
    Objective,

    /// Descending depth, most recently pushed first.
    Dfs,
}

impl fmt::Display for QueuePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueuePolicy::Bfs => write!(f, "BFS"),
            QueuePolicy::Curious => write!(f, "CURIOUS"),
            QueuePolicy::LowerBound => write!(f, "LOWER BOUND"),
            QueuePolicy::Objective => write!(f, "OBJECTIVE"),
            QueuePolicy::Dfs => write!(f, "DFS"),
        }
    }
}

/// Symmetry-deduplication variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EquivalenceVariant {
    /// No deduplication.
    None,

    /// Keyed on the sorted set of rule ids in the prefix.
    #[default]
    PrefixSignature,

    /// Keyed on the set of samples the prefix captures.
    CapturedBitvector,
}

impl fmt::Display for EquivalenceVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EquivalenceVariant::None => write!(f, "No Permutation Map"),
            EquivalenceVariant::PrefixSignature => write!(f, "Prefix Map"),
            EquivalenceVariant::CapturedBitvector => write!(f, "Captured Symmetry Map"),
        }
    }
}

/// Pruning bounds that may be switched off for benchmarking and validation.
///
/// Disabling a bound never changes the optimum, only how much of the space
/// is visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct Ablation {
    /// Minimum (accurate) support of every rule: `c * nsamples` samples.
    pub support_bounds: bool,

    /// One-step lookahead: a child is kept only if one more rule could still win.
    pub lookahead_bound: bool,

    /// Add unavoidable minority mistakes to the lower bound.
    pub equivalent_points: bool,
}

impl Default for Ablation {
    fn default() -> Self {
        Self {
            support_bounds: true,
            lookahead_bound: true,
            equivalent_points: true,
        }
    }
}

impl Ablation {
    /// Every bound disabled.
    pub fn none() -> Self {
        Self {
            support_bounds: false,
            lookahead_bound: false,
            equivalent_points: false,
        }
    }
}

#[cfg(test)]
mod tests;
