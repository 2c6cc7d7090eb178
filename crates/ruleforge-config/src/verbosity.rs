//! Verbosity flags.

use std::str::FromStr;

use crate::ConfigError;

/// Independent output switches parsed from a comma-separated token list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Verbosity {
    /// Dump every rule at begin.
    pub rule: bool,
    /// Dump both label vectors at begin.
    pub label: bool,
    /// Dump the minority vector at begin.
    pub minor: bool,
    /// Include per-sample bit patterns in dumps.
    pub samples: bool,
    /// Report begin, each improvement and the final summary.
    pub progress: bool,
    /// Everything above plus periodic progress lines.
    pub loud: bool,
}

impl Verbosity {
    /// True if nothing is switched on.
    pub fn is_silent(&self) -> bool {
        *self == Self::default()
    }
}

impl FromStr for Verbosity {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut v = Verbosity::default();
        if s.trim().is_empty() {
            return Ok(v);
        }

        for token in s.split(',').map(str::trim) {
            match token {
                "rule" => v.rule = true,
                "label" => v.label = true,
                "minor" => v.minor = true,
                "samples" => v.samples = true,
                "progress" => v.progress = true,
                "loud" => v.loud = true,
                other => return Err(ConfigError::UnknownVerbosity(other.to_string())),
            }
        }

        if v.loud {
            v.progress = true;
            v.label = true;
            v.rule = true;
            v.minor = true;
        }
        Ok(v)
    }
}
