//! Error types for ruleforge

use thiserror::Error;

/// Main error type for ruleforge operations
#[derive(Debug, Error)]
pub enum RuleForgeError {
    /// Error in search configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed rule or label data
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Failure creating a side output such as a trace file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for ruleforge operations
pub type Result<T> = std::result::Result<T, RuleForgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = RuleForgeError::Dataset("rule 3 has 5 samples, expected 4".into());
        assert_eq!(
            err.to_string(),
            "Dataset error: rule 3 has 5 samples, expected 4"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "trace.jsonl");
        let err: RuleForgeError = io.into();
        assert!(matches!(err, RuleForgeError::Io(_)));
    }

    #[test]
    fn test_variants_name_their_source() {
        let errors = [
            RuleForgeError::Config("c".into()),
            RuleForgeError::Dataset("d".into()),
            RuleForgeError::Io(std::io::Error::other("full")),
        ];
        for err in errors {
            let prefix = match &err {
                RuleForgeError::Config(_) => "Configuration error",
                RuleForgeError::Dataset(_) => "Dataset error",
                RuleForgeError::Io(_) => "IO error",
            };
            assert!(err.to_string().starts_with(prefix));
        }
    }
}
