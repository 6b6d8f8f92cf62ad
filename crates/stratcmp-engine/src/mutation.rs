//! Live cell editing
//!
//! Edits land in the strategy list first (parameter map plus source lines)
//! and are then patched into the active comparison. The comparison is never
//! recomputed on edit: row membership and order stay fixed for the lifetime
//! of a comparison, only values and equality flags move.

use crate::compare::ComparisonResult;
use crate::error::MutationError;
use stratcmp_model::{ParameterEdit, Strategy};

/// Record of one applied edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueChange {
    pub strategy_index: usize,
    pub parameter: String,
    /// Value before the edit, `None` if the key did not exist
    pub previous: Option<String>,
    pub value: String,
    /// How the source lines were touched
    pub edit: ParameterEdit,
    /// Whether a comparison cell was updated
    pub patched_cell: bool,
}

impl ValueChange {
    /// True when the edit changed nothing
    #[inline]
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.previous.as_deref() == Some(self.value.as_str())
    }
}

impl ComparisonResult {
    /// Patch one cell after an edit
    ///
    /// Editing the baseline column moves `baseline_value` and re-evaluates
    /// every cell in the row; editing any other column only re-evaluates that
    /// cell. `all_equal` follows in both cases. Returns `false` when the
    /// strategy is not a column or the parameter has no row (for example a
    /// row filtered out by `only_differences`, or a newly added key).
    pub fn apply_edit(&mut self, strategy_index: usize, parameter: &str, value: &str) -> bool {
        let Some(column) = self.column_of(strategy_index) else {
            return false;
        };
        let Some(row) = self.row_mut(parameter) else {
            return false;
        };

        row.cells[column].value = value.to_string();
        if column == 0 {
            row.refresh();
        } else {
            let equal = row.baseline_value == value;
            row.cells[column].equals_baseline = equal;
            row.all_equal = row.cells.iter().all(|c| c.equals_baseline);
        }
        true
    }
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty() && key.trim() == key && !key.contains(['=', '\n', '\r'])
}

/// Set one parameter on one strategy and patch the live comparison
///
/// Existing keys are rewritten in place in the source lines; unknown keys are
/// appended as new lines and recorded as synthetic. The parse-time snapshot
/// is never touched. Applying the same edit twice yields the same state as
/// applying it once.
///
/// # Errors
/// - `MutationError::StrategyOutOfRange` if `strategy_index` is past the end
/// - `MutationError::InvalidParameter` if a new key could not be written as
///   a `key=value` line and read back unchanged
pub fn set_value(
    strategies: &mut [Strategy],
    strategy_index: usize,
    parameter: &str,
    value: &str,
    comparison: Option<&mut ComparisonResult>,
) -> Result<ValueChange, MutationError> {
    let len = strategies.len();
    let strategy = strategies
        .get_mut(strategy_index)
        .ok_or(MutationError::StrategyOutOfRange {
            index: strategy_index,
            len,
        })?;

    let previous = strategy.parameter(parameter).map(str::to_string);
    if previous.is_none() && !is_valid_key(parameter) {
        return Err(MutationError::InvalidParameter {
            key: parameter.to_string(),
        });
    }

    let edit = strategy.set_parameter(parameter, value);
    let patched_cell = comparison
        .map(|result| result.apply_edit(strategy_index, parameter, value))
        .unwrap_or(false);

    tracing::debug!(
        strategy = strategy.name(),
        parameter,
        ?previous,
        value,
        patched_cell,
        "parameter set"
    );

    Ok(ValueChange {
        strategy_index,
        parameter: parameter.to_string(),
        previous,
        value: value.to_string(),
        edit,
        patched_cell,
    })
}
