//! Change-script builder

use crate::block::{Change, HistoryBlock};
use crate::command::set_param;
use stratcmp_engine::{ComparisonResult, ValueSnapshot};

/// Build a history block from the edits made since `snapshot`
///
/// Walks every cell of `comparison` in row then column order and emits one
/// [`Change`] where the live value differs from the snapshot value. A cell
/// missing from the snapshot is compared against the empty string.
///
/// Returns `None` when nothing differs, meaning there is nothing to save.
#[must_use]
pub fn build_history_entry(
    comparison: &ComparisonResult,
    snapshot: &ValueSnapshot,
    saved_at: impl Into<String>,
) -> Option<HistoryBlock> {
    let mut changes = Vec::new();

    for row in comparison.rows() {
        for cell in &row.cells {
            let old_value = snapshot
                .get(cell.strategy_index, &row.parameter)
                .unwrap_or("");
            if cell.value == old_value {
                continue;
            }

            let name = comparison.name_of(cell.strategy_index).unwrap_or_default();
            changes.push(Change {
                forward_command: set_param(name, &row.parameter, &cell.value),
                revert_command: set_param(name, &row.parameter, old_value),
                old_value: old_value.to_string(),
                new_value: cell.value.clone(),
                parameter_name: row.parameter.clone(),
                target_strategy_name: name.to_string(),
            });
        }
    }

    if changes.is_empty() {
        tracing::debug!("no live value differs from snapshot");
        return None;
    }

    tracing::debug!(changes = changes.len(), "history entry built");
    Some(HistoryBlock::new(saved_at, changes))
}
