use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    // Configuration errors - fatal, no run is ever started
    #[error("Invalid configuration: {0}")]
    Config(String),

    // Per-cycle errors - contained at the cycle boundary
    #[error("Submitting {op} failed: {reason}")]
    Submission { op: &'static str, reason: String },

    #[error("Confirming {op} failed: {reason}")]
    Confirmation { op: &'static str, reason: String },

    #[error("Cannot derive {op} input: {reason}")]
    Dependency { op: &'static str, reason: String },

    // System errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BotError {
    /// Check if error is fatal (aborts before any cycle runs)
    pub fn is_fatal(&self) -> bool {
        matches!(self, BotError::Config(_) | BotError::Io(_))
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            BotError::Config(_) => "config",
            BotError::Submission { .. } => "submission",
            BotError::Confirmation { .. } => "confirmation",
            BotError::Dependency { .. } => "dependency",
            BotError::Io(_) => "io",
        }
    }
}

// Result type alias for convenience
pub type BotResult<T> = Result<T, BotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_startup_errors_are_fatal() {
        assert!(BotError::Config("bad".into()).is_fatal());
        assert!(
            !BotError::Submission {
                op: "wrap",
                reason: "nonce too low".into()
            }
            .is_fatal()
        );
        assert!(
            !BotError::Confirmation {
                op: "unwrap",
                reason: "reverted".into()
            }
            .is_fatal()
        );
        assert!(
            !BotError::Dependency {
                op: "unstake",
                reason: "no mint log".into()
            }
            .is_fatal()
        );
    }

    #[test]
    fn categories_match_variants() {
        assert_eq!(BotError::Config("x".into()).category(), "config");
        assert_eq!(
            BotError::Dependency {
                op: "unstake",
                reason: "x".into()
            }
            .category(),
            "dependency"
        );
    }
}
