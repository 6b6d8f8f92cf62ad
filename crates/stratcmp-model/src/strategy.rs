//! Strategy records
//!
//! A [`Strategy`] keeps three views of one configuration block in sync:
//! the live parameter map, the raw source lines, and the index from each
//! parameter to the line it lives on.

use crate::line::{format_parameter, parameter_key, rewrite_value, split_parameter};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Insertion-ordered parameter map (key -> value)
///
/// Iteration order is the order in which keys were first seen in the source
/// lines; re-inserting an existing key keeps its position.
pub type ParameterMap = IndexMap<String, String>;

/// One strategy configuration block
///
/// # Invariants
/// - every key in `parameters` has an entry in `line_index_by_parameter`
/// - keys in `synthetic_parameters` were appended by an edit, not parsed
/// - `original_parameters` is never mutated after construction
/// - `name` never changes after construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    /// Display identifier
    name: String,

    /// Live parameter values
    parameters: ParameterMap,

    /// Snapshot of `parameters` as first parsed
    original_parameters: ParameterMap,

    /// Raw lines of the block, markers excluded
    source_lines: Vec<String>,

    /// Parameter key -> index of its first line in `source_lines`
    line_index_by_parameter: IndexMap<String, usize>,

    /// Keys added by edits that did not exist in the source
    synthetic_parameters: IndexSet<String>,
}

/// Outcome of [`Strategy::set_parameter`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterEdit {
    /// An existing line was rewritten in place
    Rewritten { line: usize },

    /// A new `key=value` line was appended
    Appended { line: usize },
}

impl ParameterEdit {
    /// Index of the line that now carries the value
    #[inline]
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            Self::Rewritten { line } | Self::Appended { line } => *line,
        }
    }
}

impl Strategy {
    /// Build a strategy from the body lines of a block
    ///
    /// Every line is kept verbatim. For duplicate keys the last value wins in
    /// the parameter map while the line index points at the first occurrence.
    #[must_use]
    pub fn from_lines(name: impl Into<String>, source_lines: Vec<String>) -> Self {
        let mut parameters = ParameterMap::new();
        let mut line_index_by_parameter = IndexMap::new();

        for (index, line) in source_lines.iter().enumerate() {
            if let Some((key, value)) = split_parameter(line) {
                parameters.insert(key.to_string(), value.to_string());
                line_index_by_parameter
                    .entry(key.to_string())
                    .or_insert(index);
            }
        }

        Self {
            name: name.into(),
            original_parameters: parameters.clone(),
            parameters,
            source_lines,
            line_index_by_parameter,
            synthetic_parameters: IndexSet::new(),
        }
    }

    /// Display name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Live parameters
    #[inline]
    #[must_use]
    pub fn parameters(&self) -> &ParameterMap {
        &self.parameters
    }

    /// Parse-time snapshot
    #[inline]
    #[must_use]
    pub fn original_parameters(&self) -> &ParameterMap {
        &self.original_parameters
    }

    /// Live value of one parameter
    #[inline]
    #[must_use]
    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.parameters.get(key).map(String::as_str)
    }

    /// Value of one parameter as first parsed
    #[inline]
    #[must_use]
    pub fn original_parameter(&self, key: &str) -> Option<&str> {
        self.original_parameters.get(key).map(String::as_str)
    }

    /// Live value, or the empty string when absent
    #[inline]
    #[must_use]
    pub fn value_or_empty(&self, key: &str) -> &str {
        self.parameter(key).unwrap_or("")
    }

    /// Raw lines of the block
    #[inline]
    #[must_use]
    pub fn source_lines(&self) -> &[String] {
        &self.source_lines
    }

    /// Line index of a parameter
    #[inline]
    #[must_use]
    pub fn line_of(&self, key: &str) -> Option<usize> {
        self.line_index_by_parameter.get(key).copied()
    }

    /// Keys added by edits
    #[inline]
    #[must_use]
    pub fn synthetic_parameters(&self) -> &IndexSet<String> {
        &self.synthetic_parameters
    }

    /// Whether `key` was added by an edit
    #[inline]
    #[must_use]
    pub fn is_synthetic(&self, key: &str) -> bool {
        self.synthetic_parameters.contains(key)
    }

    /// Parameter keys in source line order, first occurrence only
    pub fn keys_in_line_order(&self) -> impl Iterator<Item = &str> + '_ {
        let mut seen = IndexSet::new();
        self.source_lines
            .iter()
            .filter_map(|line| parameter_key(line))
            .filter(move |key| seen.insert(*key))
    }

    /// Keys whose live value differs from the parse-time snapshot
    ///
    /// Synthetic keys count as modified.
    #[must_use]
    pub fn modified_parameters(&self) -> Vec<&str> {
        self.parameters
            .iter()
            .filter(|(key, value)| self.original_parameters.get(*key) != Some(*value))
            .map(|(key, _)| key.as_str())
            .collect()
    }

    /// Set a parameter, keeping lines and map consistent
    ///
    /// An existing key has its line rewritten in place: the first occurrence
    /// and any later duplicate lines of the same key all receive the new
    /// value, so re-parsing the lines yields `value`. An unknown key gets a
    /// fresh `key=value` line appended and is recorded as synthetic.
    ///
    /// Setting the same value twice leaves the strategy unchanged.
    pub fn set_parameter(&mut self, key: &str, value: &str) -> ParameterEdit {
        let edit = match self.line_of(key) {
            Some(first) => {
                for line in self.source_lines.iter_mut().skip(first) {
                    if parameter_key(line) == Some(key) {
                        *line = rewrite_value(line, value);
                    }
                }
                ParameterEdit::Rewritten { line: first }
            }
            None => {
                let index = self.source_lines.len();
                self.source_lines.push(format_parameter(key, value));
                self.line_index_by_parameter.insert(key.to_string(), index);
                self.synthetic_parameters.insert(key.to_string());
                ParameterEdit::Appended { line: index }
            }
        };

        self.parameters.insert(key.to_string(), value.to_string());
        edit
    }
}
