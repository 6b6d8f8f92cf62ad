//! Comparison workspace
//!
//! Holds every loaded document, the flat strategy list they feed, and at
//! most one active comparison with its value snapshot. Strategy indices are
//! global: the first document's strategies come first, each later document
//! appends behind them.

use crate::config::SessionConfig;
use crate::error::SessionError;
use chrono::Local;
use indexmap::IndexSet;
use std::ops::Range;
use stratcmp_engine::{compare, set_value, ComparisonResult, ValueChange, ValueSnapshot};
use stratcmp_history::{
    build_history_entry, format_saved_at, HistoryBlock, HistoryLog, KeyValueStore,
};
use stratcmp_model::{Node, Strategy};
use stratcmp_parser::{write_document, write_strategy, ParseWarning, StrategyParser};

/// One loaded text
#[derive(Debug, Clone)]
pub struct Document {
    source: String,
    tree: Vec<Node>,
    strategies: Range<usize>,
    warnings: Vec<ParseWarning>,
}

impl Document {
    /// Label the text was loaded under (file name, "paste", ...)
    #[inline]
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Navigation tree; strategy references use global indices
    #[inline]
    #[must_use]
    pub fn tree(&self) -> &[Node] {
        &self.tree
    }

    /// Global indices of this document's strategies
    #[inline]
    #[must_use]
    pub fn strategy_range(&self) -> Range<usize> {
        self.strategies.clone()
    }

    /// Structural problems the parser recovered from
    #[inline]
    #[must_use]
    pub fn warnings(&self) -> &[ParseWarning] {
        &self.warnings
    }
}

#[derive(Debug)]
struct ActiveComparison {
    result: ComparisonResult,
    snapshot: ValueSnapshot,
}

/// Session state for one user
#[derive(Debug)]
pub struct Workspace {
    config: SessionConfig,
    parser: StrategyParser,
    documents: Vec<Document>,
    strategies: Vec<Strategy>,
    active: Option<ActiveComparison>,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl Workspace {
    /// Create empty workspace
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        let parser = StrategyParser::with_options(config.parser_options());
        Self {
            config,
            parser,
            documents: Vec::new(),
            strategies: Vec::new(),
            active: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// All strategies across documents, in global index order
    #[inline]
    #[must_use]
    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    #[inline]
    #[must_use]
    pub fn strategy(&self, index: usize) -> Option<&Strategy> {
        self.strategies.get(index)
    }

    /// Active comparison, if any
    #[inline]
    #[must_use]
    pub fn comparison(&self) -> Option<&ComparisonResult> {
        self.active.as_ref().map(|a| &a.result)
    }

    /// Values the next history save diffs against
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> Option<&ValueSnapshot> {
        self.active.as_ref().map(|a| &a.snapshot)
    }

    /// Parse `text` and append its strategies to the workspace
    ///
    /// An active comparison survives: existing indices do not move.
    ///
    /// # Errors
    /// Returns `SessionError::EmptyInput` if the text holds no strategy block;
    /// the workspace is left unchanged.
    pub fn add_document(
        &mut self,
        source: impl Into<String>,
        text: &str,
    ) -> Result<&Document, SessionError> {
        let source = source.into();
        let parsed = self.parser.parse(text);
        if parsed.is_empty() {
            return Err(SessionError::EmptyInput {
                source_name: source,
            });
        }

        let start = self.strategies.len();
        let tree = parsed.tree.into_iter().map(|n| n.offset(start)).collect();
        self.strategies.extend(parsed.strategies);

        tracing::info!(
            source = %source,
            strategies = self.strategies.len() - start,
            warnings = parsed.warnings.len(),
            "document loaded"
        );

        self.documents.push(Document {
            source,
            tree,
            strategies: start..self.strategies.len(),
            warnings: parsed.warnings,
        });
        let index = self.documents.len() - 1;
        Ok(&self.documents[index])
    }

    /// Drop every document, strategy and the active comparison
    pub fn clear(&mut self) {
        self.documents.clear();
        self.strategies.clear();
        self.active = None;
        tracing::info!("workspace cleared");
    }

    /// Run a comparison and make it the active one
    ///
    /// Replaces any previous comparison and takes a fresh snapshot of the
    /// values it shows, including edits made under earlier comparisons.
    ///
    /// # Errors
    /// - `SessionError::SelectionTooLarge` if the comparison would show more
    ///   strategies than `max_selection` allows; the baseline counts even
    ///   when it is not selected
    /// - `SessionError::Compare` for an empty selection or a bad index
    pub fn compare(
        &mut self,
        baseline: usize,
        selection: &[usize],
        only_differences: bool,
    ) -> Result<&ComparisonResult, SessionError> {
        let distinct: IndexSet<usize> = selection.iter().copied().collect();
        let shown = distinct.len() + usize::from(!distinct.contains(&baseline));
        if shown > self.config.max_selection {
            return Err(SessionError::SelectionTooLarge {
                selected: shown,
                max: self.config.max_selection,
            });
        }

        let run = compare(&self.strategies, baseline, distinct, only_differences)?;
        tracing::info!(
            baseline,
            columns = run.result.order().len(),
            rows = run.result.rows().len(),
            differences = run.result.difference_count(),
            "comparison run"
        );

        let active = self.active.insert(ActiveComparison {
            result: run.result,
            snapshot: run.snapshot,
        });
        Ok(&active.result)
    }

    /// Edit one parameter and patch the active comparison
    ///
    /// Works without an active comparison too; the edit then only reaches
    /// the strategy.
    ///
    /// # Errors
    /// Returns `SessionError::Mutation` for a bad index or an unusable new key.
    pub fn set_value(
        &mut self,
        strategy_index: usize,
        parameter: &str,
        value: &str,
    ) -> Result<ValueChange, SessionError> {
        let comparison = self.active.as_mut().map(|a| &mut a.result);
        Ok(set_value(
            &mut self.strategies,
            strategy_index,
            parameter,
            value,
            comparison,
        )?)
    }

    /// Changes a save would record right now, stamped with the current time
    #[must_use]
    pub fn pending_history(&self) -> Option<HistoryBlock> {
        let active = self.active.as_ref()?;
        build_history_entry(&active.result, &active.snapshot, self.timestamp())
    }

    /// Append the pending changes to `log`
    ///
    /// Returns the block with its position in the log. On success the
    /// snapshot moves to the live values, so the next save only records edits
    /// made after this one.
    ///
    /// # Errors
    /// - `SessionError::NoComparison` without an active comparison
    /// - `SessionError::NothingToSave` when no value changed
    /// - `SessionError::History` if the log cannot be written
    pub fn save_history<S: KeyValueStore>(
        &mut self,
        log: &HistoryLog<S>,
    ) -> Result<(usize, HistoryBlock), SessionError> {
        let saved_at = self.timestamp();
        let active = self.active.as_mut().ok_or(SessionError::NoComparison)?;
        let block = build_history_entry(&active.result, &active.snapshot, saved_at)
            .ok_or(SessionError::NothingToSave)?;

        let count = log.append(block.clone())?;
        active.snapshot = active.result.snapshot();
        Ok((count - 1, block))
    }

    /// History log over `store` at the configured slot
    #[must_use]
    pub fn history_log<S: KeyValueStore>(&self, store: S) -> HistoryLog<S> {
        HistoryLog::new(store, self.config.history_slot.clone())
    }

    /// Serialize one strategy as a standalone block
    #[must_use]
    pub fn export_strategy(&self, index: usize) -> Option<String> {
        self.strategies.get(index).map(write_strategy)
    }

    /// Serialize one document with its folders and current values
    #[must_use]
    pub fn export_document(&self, position: usize) -> Option<String> {
        let document = self.documents.get(position)?;
        Some(write_document(&document.tree, &self.strategies))
    }

    fn timestamp(&self) -> String {
        format_saved_at(&Local::now(), &self.config.timestamp_format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stratcmp_history::MemoryStore;
    use stratcmp_test_utils::{numbered_document, SCENARIO_TWO_STRATEGIES, THREE_STRATEGIES};

    #[test]
    fn empty_input_rejected() {
        let mut ws = Workspace::default();
        let err = ws.add_document("notes.txt", "just some text\nA=1").unwrap_err();
        assert!(matches!(err, SessionError::EmptyInput { ref source_name } if source_name == "notes.txt"));
        assert!(ws.documents().is_empty());
        assert!(ws.strategies().is_empty());
    }

    #[test]
    fn documents_get_global_indices() {
        let mut ws = Workspace::default();
        ws.add_document("three", THREE_STRATEGIES).unwrap();
        let doc = ws.add_document("two", SCENARIO_TWO_STRATEGIES).unwrap();

        assert_eq!(doc.strategy_range(), 3..5);
        let indices: Vec<usize> = doc.tree().iter().flat_map(Node::strategy_indices).collect();
        assert_eq!(indices, vec![3, 4]);
        assert_eq!(ws.strategy(3).map(Strategy::name), Some("A"));
    }

    #[test]
    fn selection_limit_counts_distinct_indices() {
        let mut ws = Workspace::new(SessionConfig::default().with_max_selection(3));
        ws.add_document("many", &numbered_document(12)).unwrap();

        assert!(ws.compare(0, &[0, 1, 2, 2, 1], false).is_ok());
        let err = ws.compare(0, &[0, 1, 2, 3], false).unwrap_err();
        assert!(matches!(err, SessionError::SelectionTooLarge { selected: 4, max: 3 }));
    }

    #[test]
    fn selection_limit_counts_unselected_baseline() {
        let mut ws = Workspace::new(SessionConfig::default().with_max_selection(3));
        ws.add_document("many", &numbered_document(12)).unwrap();

        assert_eq!(ws.compare(5, &[0, 1], false).unwrap().order(), &[5, 0, 1]);
        let err = ws.compare(5, &[0, 1, 2], false).unwrap_err();
        assert!(matches!(err, SessionError::SelectionTooLarge { selected: 4, max: 3 }));
        assert_eq!(ws.comparison().unwrap().order(), &[5, 0, 1]);
    }

    #[test]
    fn save_without_comparison_or_edits() {
        let mut ws = Workspace::default();
        ws.add_document("s", SCENARIO_TWO_STRATEGIES).unwrap();
        let log = ws.history_log(MemoryStore::new());

        assert!(matches!(ws.save_history(&log), Err(SessionError::NoComparison)));

        ws.compare(0, &[0, 1], false).unwrap();
        assert!(matches!(ws.save_history(&log), Err(SessionError::NothingToSave)));
        assert!(log.is_empty());
    }

    #[test]
    fn save_rebases_snapshot() {
        let mut ws = Workspace::default();
        ws.add_document("s", SCENARIO_TWO_STRATEGIES).unwrap();
        ws.compare(0, &[0, 1], false).unwrap();
        let log = ws.history_log(MemoryStore::new());

        ws.set_value(1, "Risk", "9").unwrap();
        let (position, first) = ws.save_history(&log).unwrap();
        assert_eq!((position, first.len()), (0, 1));
        assert!(ws.pending_history().is_none());
        assert!(matches!(ws.save_history(&log), Err(SessionError::NothingToSave)));

        ws.set_value(1, "Risk", "11").unwrap();
        let (position, second) = ws.save_history(&log).unwrap();
        assert_eq!(position, 1);
        assert_eq!(second.changes[0].old_value, "9");
        assert_eq!(second.changes[0].new_value, "11");
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn clear_drops_everything() {
        let mut ws = Workspace::default();
        ws.add_document("s", SCENARIO_TWO_STRATEGIES).unwrap();
        ws.compare(0, &[0, 1], false).unwrap();

        ws.clear();
        assert!(ws.documents().is_empty());
        assert!(ws.strategies().is_empty());
        assert!(ws.comparison().is_none());
        assert!(ws.snapshot().is_none());
    }

    #[test]
    fn configured_placeholder_and_defaults() {
        let config = SessionConfig {
            default_parameters: vec![("Magic".to_string(), "42".to_string())],
            ..SessionConfig::default().with_placeholder_name("(none)")
        };
        let mut ws = Workspace::new(config);
        ws.add_document("s", "##Begin_Strategy\nRisk=1\n##End_Strategy").unwrap();

        let strategy = &ws.strategies()[0];
        assert_eq!(strategy.name(), "(none)");
        assert_eq!(strategy.parameter("Magic"), Some("42"));
        assert_eq!(strategy.parameter("Active"), None);
    }
}
