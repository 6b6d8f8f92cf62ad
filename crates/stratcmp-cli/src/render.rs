//! Plain-text rendering

use std::fmt::Write as _;
use stratcmp_core::Workspace;
use stratcmp_engine::ComparisonResult;
use stratcmp_history::HistoryBlock;
use stratcmp_model::Node;

/// Folder tree of every document, strategies tagged with global indices
#[must_use]
pub fn tree(ws: &Workspace) -> String {
    let mut out = String::new();
    for document in ws.documents() {
        let range = document.strategy_range();
        let _ = writeln!(out, "{} ({} strategies)", document.source(), range.len());

        let mut pending: Vec<(usize, &Node)> =
            document.tree().iter().rev().map(|n| (1, n)).collect();
        while let Some((depth, node)) = pending.pop() {
            let indent = "  ".repeat(depth);
            match node {
                Node::Folder { name, children } => {
                    let _ = writeln!(out, "{indent}{name}/");
                    pending.extend(children.iter().rev().map(|c| (depth + 1, c)));
                }
                Node::Strategy { index } => {
                    let name = ws.strategy(*index).map_or("?", |s| s.name());
                    let _ = writeln!(out, "{indent}[{index}] {name}");
                }
            }
        }
    }
    out
}

/// Diff table, differing rows marked with `*`
#[must_use]
pub fn table(result: &ComparisonResult) -> String {
    let mut header = vec!["Parameter".to_string()];
    header.extend(result.columns().enumerate().map(|(column, (index, name))| {
        if column == 0 {
            format!("[{index}] {name} (baseline)")
        } else {
            format!("[{index}] {name}")
        }
    }));

    let lines: Vec<Vec<&str>> = result
        .rows()
        .iter()
        .map(|row| {
            std::iter::once(row.parameter.as_str())
                .chain(row.cells.iter().map(|c| c.value.as_str()))
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for line in &lines {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, ' ', header.iter().map(String::as_str), &widths);
    for (row, line) in result.rows().iter().zip(&lines) {
        let marker = if row.all_equal { ' ' } else { '*' };
        push_line(&mut out, marker, line.iter().copied(), &widths);
    }
    let _ = writeln!(
        out,
        "{} of {} rows differ{}",
        result.difference_count(),
        result.rows().len(),
        if result.only_differences() {
            " (equal rows hidden)"
        } else {
            ""
        }
    );
    out
}

fn push_line<'a>(
    out: &mut String,
    marker: char,
    cells: impl Iterator<Item = &'a str>,
    widths: &[usize],
) {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    let _ = writeln!(out, "{marker} {}", padded.join(" | ").trim_end());
}

/// One history block with both scripts
#[must_use]
pub fn history_block(position: usize, block: &HistoryBlock) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "#{position} saved {} ({} changes)",
        block.saved_at,
        block.len()
    );
    let _ = writeln!(out, "  forward:");
    for line in block.forward_script().lines() {
        let _ = writeln!(out, "    {line}");
    }
    let _ = writeln!(out, "  revert:");
    for line in block.revert_script().lines() {
        let _ = writeln!(out, "    {line}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use stratcmp_test_utils::{SCENARIO_TWO_STRATEGIES, THREE_STRATEGIES};

    #[test]
    fn tree_lists_folders_and_indices() {
        let mut ws = Workspace::default();
        ws.add_document("desk.txt", THREE_STRATEGIES).unwrap();

        assert_eq!(
            tree(&ws),
            "desk.txt (3 strategies)\n  Trend/\n    [0] Alpha\n    Breakout/\n      [1] Beta\n  [2] Gamma\n"
        );
    }

    #[test]
    fn table_marks_differing_rows() {
        let mut ws = Workspace::default();
        ws.add_document("s", SCENARIO_TWO_STRATEGIES).unwrap();
        let result = ws.compare(0, &[0, 1], false).unwrap();

        let text = table(result);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "  Parameter    | [0] A (baseline) | [1] B");
        assert_eq!(lines[1], "* StrategyName | A                | B");
        assert_eq!(lines[3], "  Active       | 0                | 0");
        assert_eq!(lines[5], "* Extra        |                  | 1");
        assert_eq!(lines[6], "3 of 5 rows differ");
    }

    #[test]
    fn history_block_shows_both_scripts() {
        let mut ws = Workspace::default();
        ws.add_document("s", SCENARIO_TWO_STRATEGIES).unwrap();
        ws.compare(0, &[0, 1], false).unwrap();
        ws.set_value(1, "Risk", "9").unwrap();
        let block = ws.pending_history().unwrap();

        let text = history_block(0, &block);
        assert!(text.contains("  forward:\n    SetParam \"B\" Risk 9\n"));
        assert!(text.contains("  revert:\n    SetParam \"B\" Risk 7\n"));
    }
}
