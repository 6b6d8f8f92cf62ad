//! Session error types

use std::path::PathBuf;
use stratcmp_engine::{CompareError, MutationError};
use stratcmp_history::HistoryError;

/// Main session error type
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Supplied text contained no strategy block
    #[error("no strategy blocks found in {source_name}")]
    EmptyInput { source_name: String },

    /// More strategies selected than the session allows
    #[error("{selected} strategies selected, at most {max} can be compared")]
    SelectionTooLarge { selected: usize, max: usize },

    /// Save requested with no edit since the last snapshot
    #[error("nothing to save: no value changed since the comparison snapshot")]
    NothingToSave,

    /// Edit or save requested before any comparison ran
    #[error("no active comparison")]
    NoComparison,

    #[error("comparison failed: {0}")]
    Compare(#[from] CompareError),

    #[error("edit failed: {0}")]
    Mutation(#[from] MutationError),

    #[error("history error: {0}")]
    History(#[from] HistoryError),
}

/// Errors loading a [`crate::SessionConfig`]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Parsed but unusable
    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_error_display() {
        let err = SessionError::EmptyInput {
            source_name: "a.txt".to_string(),
        };
        assert_eq!(err.to_string(), "no strategy blocks found in a.txt");

        let err = SessionError::SelectionTooLarge { selected: 11, max: 10 };
        assert_eq!(
            err.to_string(),
            "11 strategies selected, at most 10 can be compared"
        );

        let err: SessionError = CompareError::EmptySelection.into();
        assert_eq!(
            err.to_string(),
            "comparison failed: no strategies selected for comparison"
        );
    }
}
