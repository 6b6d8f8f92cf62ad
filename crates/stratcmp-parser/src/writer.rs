//! Document writer
//!
//! Emits strategies and folder trees in the export grammar. Source lines are
//! written verbatim, so untouched lines keep their original formatting.

use crate::markers::{BEGIN_FOLDER, BEGIN_STRATEGY, END_FOLDER, END_STRATEGY};
use stratcmp_model::{Node, Strategy};

/// Serialize one strategy block
///
/// # Examples
/// ```
/// # use stratcmp_model::Strategy;
/// # use stratcmp_parser::write_strategy;
/// let s = Strategy::from_lines("A", vec!["Risk=5".to_string()]);
/// assert_eq!(write_strategy(&s), "##Begin_Strategy\nRisk=5\n##End_Strategy");
/// ```
#[must_use]
pub fn write_strategy(strategy: &Strategy) -> String {
    let mut out = String::from(BEGIN_STRATEGY);
    for line in strategy.source_lines() {
        out.push('\n');
        out.push_str(line);
    }
    out.push('\n');
    out.push_str(END_STRATEGY);
    out
}

/// Serialize a folder tree with the strategies it references
///
/// References outside `strategies` are skipped.
#[must_use]
pub fn write_document(tree: &[Node], strategies: &[Strategy]) -> String {
    // Explicit work list: Enter(node) or Close for a folder end marker.
    enum Step<'a> {
        Enter(&'a Node),
        Close,
    }

    let mut out: Vec<String> = Vec::new();
    let mut pending: Vec<Step<'_>> = tree.iter().rev().map(Step::Enter).collect();

    while let Some(step) = pending.pop() {
        match step {
            Step::Close => out.push(END_FOLDER.to_string()),
            Step::Enter(Node::Strategy { index }) => match strategies.get(*index) {
                Some(strategy) => out.push(write_strategy(strategy)),
                None => tracing::debug!(index, "tree references missing strategy"),
            },
            Step::Enter(Node::Folder { name, children }) => {
                if name.is_empty() {
                    out.push(BEGIN_FOLDER.to_string());
                } else {
                    out.push(format!("{BEGIN_FOLDER} {name}"));
                }
                pending.push(Step::Close);
                pending.extend(children.iter().rev().map(Step::Enter));
            }
        }
    }

    out.join("\n")
}
