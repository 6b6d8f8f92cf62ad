//! Error types for comparison and editing

/// Errors from [`crate::compare`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompareError {
    /// Nothing selected
    #[error("no strategies selected for comparison")]
    EmptySelection,

    /// Baseline or selection refers past the strategy list
    #[error("strategy index {index} out of range (have {len})")]
    StrategyOutOfRange { index: usize, len: usize },
}

/// Errors from [`crate::set_value`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MutationError {
    /// Target strategy does not exist
    #[error("strategy index {index} out of range (have {len})")]
    StrategyOutOfRange { index: usize, len: usize },

    /// Key that would not survive a write/parse round trip: empty, padded
    /// with whitespace, containing `=` or spanning lines
    #[error("invalid parameter key: {key:?}")]
    InvalidParameter { key: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_error_display() {
        assert_eq!(
            CompareError::EmptySelection.to_string(),
            "no strategies selected for comparison"
        );
        let err = CompareError::StrategyOutOfRange { index: 4, len: 2 };
        assert_eq!(err.to_string(), "strategy index 4 out of range (have 2)");
    }

    #[test]
    fn mutation_error_display() {
        let err = MutationError::InvalidParameter { key: "a=b".to_string() };
        assert_eq!(err.to_string(), "invalid parameter key: \"a=b\"");
    }
}
