//! History blocks

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// One reversible parameter change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Change {
    pub forward_command: String,
    pub revert_command: String,
    pub old_value: String,
    pub new_value: String,
    pub parameter_name: String,
    pub target_strategy_name: String,
}

/// One saved batch of changes
///
/// Immutable once written; the log only ever appends or deletes whole blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryBlock {
    /// Human-readable save time
    pub saved_at: String,
    pub changes: Vec<Change>,
}

impl HistoryBlock {
    /// Create block
    #[inline]
    #[must_use]
    pub fn new(saved_at: impl Into<String>, changes: Vec<Change>) -> Self {
        Self {
            saved_at: saved_at.into(),
            changes,
        }
    }

    /// Number of changes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// True when the block carries no changes
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Forward commands in change order, one per line
    #[must_use]
    pub fn forward_script(&self) -> String {
        self.changes
            .iter()
            .map(|c| c.forward_command.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Revert commands, last change first, one per line
    #[must_use]
    pub fn revert_script(&self) -> String {
        self.changes
            .iter()
            .rev()
            .map(|c| c.revert_command.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Format a save timestamp with a chrono format string
///
/// # Examples
/// ```
/// # use chrono::{TimeZone, Utc};
/// # use stratcmp_history::format_saved_at;
/// let at = Utc.with_ymd_and_hms(2024, 3, 1, 14, 5, 0).unwrap();
/// assert_eq!(format_saved_at(&at, "%Y-%m-%d %H:%M:%S"), "2024-03-01 14:05:00");
/// ```
#[must_use]
pub fn format_saved_at<Tz>(at: &DateTime<Tz>, format: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format(format).to_string()
}
