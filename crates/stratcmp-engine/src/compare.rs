//! Baseline-relative comparison
//!
//! Row order is the first-seen order of parameter keys when scanning the
//! strategies in comparison order, each one top to bottom through its source
//! lines. The baseline's natural ordering comes first; keys unique to later
//! strategies follow in their own source order.

use crate::error::CompareError;
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use stratcmp_model::Strategy;

/// One cell of the diff table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    /// Current value (empty when the strategy lacks the key)
    pub value: String,
    /// `value == baseline_value`
    pub equals_baseline: bool,
    /// Index into the flat strategy list
    pub strategy_index: usize,
}

/// One parameter row
///
/// `cells[0]` is always the baseline and always equals itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub parameter: String,
    pub baseline_value: String,
    /// Every cell string-equals `baseline_value`
    pub all_equal: bool,
    pub cells: Vec<Cell>,
}

impl Row {
    fn build(parameter: &str, order: &[usize], strategies: &[Strategy]) -> Self {
        let values: Vec<&str> = order
            .iter()
            .map(|&i| strategies[i].value_or_empty(parameter))
            .collect();
        let baseline_value = values[0].to_string();

        let cells: Vec<Cell> = values
            .iter()
            .zip(order)
            .map(|(value, &strategy_index)| Cell {
                value: (*value).to_string(),
                equals_baseline: *value == baseline_value,
                strategy_index,
            })
            .collect();

        Self {
            parameter: parameter.to_string(),
            all_equal: cells.iter().all(|c| c.equals_baseline),
            baseline_value,
            cells,
        }
    }

    /// Re-derive `equals_baseline` and `all_equal` from the cell values
    pub(crate) fn refresh(&mut self) {
        if let Some(first) = self.cells.first() {
            self.baseline_value.clone_from(&first.value);
        }
        for cell in &mut self.cells {
            cell.equals_baseline = cell.value == self.baseline_value;
        }
        self.all_equal = self.cells.iter().all(|c| c.equals_baseline);
    }

    /// Number of cells differing from the baseline
    #[inline]
    #[must_use]
    pub fn difference_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.equals_baseline).count()
    }
}

/// Product of one comparison run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    /// Strategy indices, baseline first
    order: Vec<usize>,
    /// Strategy names parallel to `order`
    names: Vec<String>,
    rows: Vec<Row>,
    only_differences: bool,
}

impl ComparisonResult {
    /// Strategy indices in column order, baseline first
    #[inline]
    #[must_use]
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Baseline strategy index
    #[inline]
    #[must_use]
    pub fn baseline_index(&self) -> usize {
        self.order[0]
    }

    /// Rows in first-seen order
    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Whether all-equal rows were filtered out
    #[inline]
    #[must_use]
    pub fn only_differences(&self) -> bool {
        self.only_differences
    }

    /// `(strategy_index, name)` per column
    pub fn columns(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.order
            .iter()
            .copied()
            .zip(self.names.iter().map(String::as_str))
    }

    /// Name of the strategy shown in a column, by strategy index
    #[must_use]
    pub fn name_of(&self, strategy_index: usize) -> Option<&str> {
        self.column_of(strategy_index)
            .map(|col| self.names[col].as_str())
    }

    /// Column position of a strategy
    #[inline]
    #[must_use]
    pub fn column_of(&self, strategy_index: usize) -> Option<usize> {
        self.order.iter().position(|&i| i == strategy_index)
    }

    /// Row for a parameter
    #[must_use]
    pub fn row(&self, parameter: &str) -> Option<&Row> {
        self.rows.iter().find(|r| r.parameter == parameter)
    }

    pub(crate) fn row_mut(&mut self, parameter: &str) -> Option<&mut Row> {
        self.rows.iter_mut().find(|r| r.parameter == parameter)
    }

    /// Number of rows where some cell differs from the baseline
    #[must_use]
    pub fn difference_count(&self) -> usize {
        self.rows.iter().filter(|r| !r.all_equal).count()
    }

    /// True when no rows survived
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Current value of every cell
    #[must_use]
    pub fn snapshot(&self) -> ValueSnapshot {
        let mut values = IndexMap::new();
        for row in &self.rows {
            for cell in &row.cells {
                values.insert((cell.strategy_index, row.parameter.clone()), cell.value.clone());
            }
        }
        ValueSnapshot { values }
    }
}

/// Cell values keyed by `(strategy_index, parameter)`
///
/// Captured when a comparison runs; the history builder diffs live values
/// against it. Reflects state at comparison time, which may already include
/// edits from earlier rounds, unlike the parse-time snapshot on each strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueSnapshot {
    values: IndexMap<(usize, String), String>,
}

impl ValueSnapshot {
    /// Value recorded for a cell
    #[must_use]
    pub fn get(&self, strategy_index: usize, parameter: &str) -> Option<&str> {
        self.values
            .get(&(strategy_index, parameter.to_string()))
            .map(String::as_str)
    }

    /// Number of recorded cells
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when nothing was recorded
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Recorded cells in row/column order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str, &str)> + '_ {
        self.values
            .iter()
            .map(|((index, parameter), value)| (*index, parameter.as_str(), value.as_str()))
    }
}

/// Comparison result together with its value snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub result: ComparisonResult,
    pub snapshot: ValueSnapshot,
}

/// Compare a selection of strategies against a baseline
///
/// The baseline always takes column 0, whether or not it is part of
/// `selected`; the remaining selected strategies follow in iteration order,
/// duplicates dropped. A strategy lacking a key contributes an empty cell.
/// With `only_differences`, rows where every cell equals the baseline are
/// removed after the full key union has been computed.
///
/// # Errors
/// - `CompareError::EmptySelection` if `selected` yields nothing
/// - `CompareError::StrategyOutOfRange` if the baseline or a selected index
///   is past the end of `strategies`
pub fn compare<I>(
    strategies: &[Strategy],
    baseline: usize,
    selected: I,
    only_differences: bool,
) -> Result<Comparison, CompareError>
where
    I: IntoIterator<Item = usize>,
{
    let selected: IndexSet<usize> = selected.into_iter().collect();
    if selected.is_empty() {
        return Err(CompareError::EmptySelection);
    }

    let len = strategies.len();
    if let Some(&index) = std::iter::once(&baseline)
        .chain(selected.iter())
        .find(|&&i| i >= len)
    {
        return Err(CompareError::StrategyOutOfRange { index, len });
    }

    let order: Vec<usize> = std::iter::once(baseline)
        .chain(selected.into_iter().filter(|&i| i != baseline))
        .collect();

    let mut parameters: IndexSet<&str> = IndexSet::new();
    for &index in &order {
        parameters.extend(strategies[index].keys_in_line_order());
    }

    let total = parameters.len();
    let rows: Vec<Row> = parameters
        .into_iter()
        .map(|parameter| Row::build(parameter, &order, strategies))
        .filter(|row| !(only_differences && row.all_equal))
        .collect();

    let result = ComparisonResult {
        names: order
            .iter()
            .map(|&i| strategies[i].name().to_string())
            .collect(),
        order,
        rows,
        only_differences,
    };
    let snapshot = result.snapshot();

    tracing::debug!(
        baseline,
        columns = result.order.len(),
        parameters = total,
        rows = result.rows.len(),
        only_differences,
        "comparison computed"
    );

    Ok(Comparison { result, snapshot })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use stratcmp_parser::parse;
    use stratcmp_test_utils::{SCENARIO_TWO_STRATEGIES, THREE_STRATEGIES};

    fn summary(result: &ComparisonResult) -> Vec<(String, Vec<String>, bool)> {
        result
            .rows()
            .iter()
            .map(|r| {
                (
                    r.parameter.clone(),
                    r.cells.iter().map(|c| c.value.clone()).collect(),
                    r.all_equal,
                )
            })
            .collect()
    }

    fn row(p: &str, values: &[&str], all_equal: bool) -> (String, Vec<String>, bool) {
        (
            p.to_string(),
            values.iter().map(|v| (*v).to_string()).collect(),
            all_equal,
        )
    }

    #[test]
    fn scenario_full_table() {
        let strategies = parse(SCENARIO_TWO_STRATEGIES).strategies;
        let run = compare(&strategies, 0, [0, 1], false).unwrap();

        assert_eq!(
            summary(&run.result),
            vec![
                row("StrategyName", &["A", "B"], false),
                row("Risk", &["5", "7"], false),
                row("Active", &["0", "0"], true),
                row("FVersion", &["12", "12"], true),
                row("Extra", &["", "1"], false),
            ]
        );
        assert_eq!(run.result.difference_count(), 3);
    }

    #[test]
    fn scenario_only_differences() {
        let strategies = parse(SCENARIO_TWO_STRATEGIES).strategies;
        let run = compare(&strategies, 0, [0, 1], true).unwrap();

        let params: Vec<_> = run.result.rows().iter().map(|r| r.parameter.as_str()).collect();
        assert_eq!(params, vec!["StrategyName", "Risk", "Extra"]);
        assert!(run.result.only_differences());
    }

    #[test]
    fn baseline_forced_first() {
        let strategies = parse(THREE_STRATEGIES).strategies;
        let run = compare(&strategies, 2, [0, 2, 1], false).unwrap();

        assert_eq!(run.result.order(), &[2, 0, 1]);
        assert_eq!(run.result.baseline_index(), 2);
        let names: Vec<_> = run.result.columns().map(|(_, n)| n).collect();
        assert_eq!(names, vec!["Gamma", "Alpha", "Beta"]);
    }

    #[test]
    fn baseline_outside_selection_still_included() {
        let strategies = parse(THREE_STRATEGIES).strategies;
        let run = compare(&strategies, 0, [2], false).unwrap();
        assert_eq!(run.result.order(), &[0, 2]);
    }

    #[test]
    fn duplicate_selection_ignored() {
        let strategies = parse(THREE_STRATEGIES).strategies;
        let run = compare(&strategies, 0, [1, 1, 0, 1], false).unwrap();
        assert_eq!(run.result.order(), &[0, 1]);
    }

    #[test]
    fn baseline_cell_always_equal() {
        let strategies = parse(THREE_STRATEGIES).strategies;
        let run = compare(&strategies, 1, [0, 1, 2], false).unwrap();
        for r in run.result.rows() {
            assert!(r.cells[0].equals_baseline);
            assert_eq!(r.cells[0].strategy_index, 1);
            assert_eq!(r.cells[0].value, r.baseline_value);
        }
    }

    #[test]
    fn missing_baseline_key_is_empty_baseline() {
        let strategies = parse(SCENARIO_TWO_STRATEGIES).strategies;
        let run = compare(&strategies, 0, [1], false).unwrap();
        let extra = run.result.row("Extra").unwrap();
        assert_eq!(extra.baseline_value, "");
        assert!(!extra.cells[1].equals_baseline);
    }

    #[test]
    fn empty_selection_rejected() {
        let strategies = parse(SCENARIO_TWO_STRATEGIES).strategies;
        let err = compare(&strategies, 0, Vec::new(), false).unwrap_err();
        assert_eq!(err, CompareError::EmptySelection);
    }

    #[test]
    fn out_of_range_rejected() {
        let strategies = parse(SCENARIO_TWO_STRATEGIES).strategies;
        assert_eq!(
            compare(&strategies, 5, [0], false).unwrap_err(),
            CompareError::StrategyOutOfRange { index: 5, len: 2 }
        );
        assert_eq!(
            compare(&strategies, 0, [0, 9], false).unwrap_err(),
            CompareError::StrategyOutOfRange { index: 9, len: 2 }
        );
    }

    #[test]
    fn single_column_comparison() {
        let strategies = parse(SCENARIO_TWO_STRATEGIES).strategies;
        let run = compare(&strategies, 1, [1], true).unwrap();
        assert!(run.result.is_empty());
        assert!(run.snapshot.is_empty());
    }

    #[test]
    fn snapshot_covers_produced_cells() {
        let strategies = parse(SCENARIO_TWO_STRATEGIES).strategies;
        let run = compare(&strategies, 0, [0, 1], true).unwrap();

        assert_eq!(run.snapshot.len(), 6);
        assert_eq!(run.snapshot.get(1, "Risk"), Some("7"));
        assert_eq!(run.snapshot.get(0, "Extra"), Some(""));
        assert_eq!(run.snapshot.get(0, "Active"), None);
    }

    #[test]
    fn serializes_camel_case() {
        let strategies = parse(SCENARIO_TWO_STRATEGIES).strategies;
        let run = compare(&strategies, 0, [1], false).unwrap();
        let json = serde_json::to_string(&run.result).unwrap();
        assert!(json.contains("\"baselineValue\""));
        assert!(json.contains("\"equalsBaseline\""));
        assert!(json.contains("\"onlyDifferences\""));
    }
}
