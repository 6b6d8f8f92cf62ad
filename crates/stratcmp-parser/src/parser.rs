//! Document parser
//!
//! Two passes over the input:
//! 1. `tokenize` walks the lines once and returns folder markers, complete
//!    strategy blocks and anomalies.
//! 2. [`StrategyParser::parse`] folds the tokens into a tree with an explicit
//!    stack of open folders, so nesting depth is bounded by memory rather than
//!    by the call stack.

use crate::markers::{self, Marker};
use crate::options::ParserOptions;
use stratcmp_model::line::split_parameter;
use stratcmp_model::{Node, Strategy};

/// Result of parsing one document
///
/// An empty `strategies` list means nothing recognizable was found; the
/// caller decides whether that is an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDocument {
    /// Root-level nodes in document order
    pub tree: Vec<Node>,
    /// Strategies in document order; tree references index into this list
    pub strategies: Vec<Strategy>,
    /// Recoverable anomalies seen while parsing
    pub warnings: Vec<ParseWarning>,
}

impl ParsedDocument {
    /// True when no strategy block was found
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

/// Recoverable anomaly, with the 1-based line it was found on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    pub line: usize,
    pub kind: WarningKind,
}

/// Kinds of parse anomaly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// `##Begin_Strategy` without a matching end; the block is dropped
    UnterminatedStrategy,
    /// `##End_Strategy` outside any block; ignored
    StrayEndStrategy,
    /// `#End_Folder` with no open folder; ignored
    StrayEndFolder,
    /// Folder still open at end of input; closed implicitly
    UnclosedFolder,
}

/// Token produced by the line scanner
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token<'a> {
    BeginFolder { name: &'a str },
    EndFolder { line: usize },
    Block { body: Vec<&'a str> },
    Warning(ParseWarning),
}

/// Scan lines into tokens
///
/// Each step consumes from `cursor` and yields the next cursor; no state is
/// shared between steps beyond the returned position.
fn tokenize<'a>(lines: &[&'a str]) -> Vec<Token<'a>> {
    let mut tokens = Vec::new();
    let mut cursor = 0;
    while cursor < lines.len() {
        let (token, next) = next_token(lines, cursor);
        if let Some(token) = token {
            tokens.push(token);
        }
        cursor = next;
    }
    tokens
}

fn next_token<'a>(lines: &[&'a str], cursor: usize) -> (Option<Token<'a>>, usize) {
    match markers::classify(lines[cursor]) {
        Some(Marker::BeginStrategy) => {
            let start = cursor + 1;
            match lines[start..].iter().position(|l| markers::is_end_strategy(l)) {
                Some(len) => {
                    let body = lines[start..start + len].to_vec();
                    (Some(Token::Block { body }), start + len + 1)
                }
                None => (
                    Some(Token::Warning(ParseWarning {
                        line: cursor + 1,
                        kind: WarningKind::UnterminatedStrategy,
                    })),
                    lines.len(),
                ),
            }
        }
        Some(Marker::EndStrategy) => (
            Some(Token::Warning(ParseWarning {
                line: cursor + 1,
                kind: WarningKind::StrayEndStrategy,
            })),
            cursor + 1,
        ),
        Some(Marker::BeginFolder(name)) => (Some(Token::BeginFolder { name }), cursor + 1),
        Some(Marker::EndFolder) => (Some(Token::EndFolder { line: cursor + 1 }), cursor + 1),
        None => (None, cursor + 1),
    }
}

/// Strategy document parser
///
/// Never fails: malformed regions are skipped and reported through
/// [`ParsedDocument::warnings`].
#[derive(Debug, Clone, Default)]
pub struct StrategyParser {
    options: ParserOptions,
}

impl StrategyParser {
    /// Create parser with default options
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create parser with explicit options
    #[inline]
    #[must_use]
    pub fn with_options(options: ParserOptions) -> Self {
        Self { options }
    }

    /// Options in use
    #[inline]
    #[must_use]
    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parse a document into a tree and a flat strategy list
    #[must_use]
    pub fn parse(&self, text: &str) -> ParsedDocument {
        let lines: Vec<&str> = text.lines().collect();
        let mut doc = ParsedDocument::default();

        // Open folders; the root level lives in `doc.tree`.
        let mut stack: Vec<(String, Vec<Node>)> = Vec::new();

        for token in tokenize(&lines) {
            match token {
                Token::Block { body } => {
                    let index = doc.strategies.len();
                    doc.strategies.push(self.build_strategy(&body));
                    push_node(&mut stack, &mut doc.tree, Node::strategy(index));
                }
                Token::BeginFolder { name } => stack.push((name.to_string(), Vec::new())),
                Token::EndFolder { line } => match stack.pop() {
                    Some((name, children)) => {
                        push_node(&mut stack, &mut doc.tree, Node::folder(name, children));
                    }
                    None => {
                        tracing::warn!("stray #End_Folder at line {}", line);
                        doc.warnings.push(ParseWarning {
                            line,
                            kind: WarningKind::StrayEndFolder,
                        });
                    }
                },
                Token::Warning(warning) => {
                    tracing::warn!("{:?} at line {}", warning.kind, warning.line);
                    doc.warnings.push(warning);
                }
            }
        }

        if !stack.is_empty() {
            tracing::warn!("{} folder(s) still open at end of input", stack.len());
        }
        while let Some((name, children)) = stack.pop() {
            doc.warnings.push(ParseWarning {
                line: lines.len(),
                kind: WarningKind::UnclosedFolder,
            });
            push_node(&mut stack, &mut doc.tree, Node::folder(name, children));
        }

        tracing::debug!(
            strategies = doc.strategies.len(),
            roots = doc.tree.len(),
            warnings = doc.warnings.len(),
            "parsed document"
        );
        doc
    }

    /// Build one strategy from its body lines
    ///
    /// Required defaults missing from the body are appended as new lines.
    /// This normalizes exports to the platform's required-field contract.
    fn build_strategy(&self, body: &[&str]) -> Strategy {
        let mut lines: Vec<String> = body.iter().map(|l| (*l).to_string()).collect();

        let has_key = |key: &str| {
            body.iter()
                .any(|l| split_parameter(l).is_some_and(|(k, _)| k == key))
        };
        for (key, value) in &self.options.default_parameters {
            if !has_key(key) {
                lines.push(stratcmp_model::line::format_parameter(key, value));
            }
        }

        let mut name = None;
        for line in body {
            if let Some((key, value)) = split_parameter(line) {
                if key == self.options.name_key {
                    name = Some(value);
                }
            }
        }

        let name = name
            .filter(|n| !n.is_empty())
            .unwrap_or(self.options.placeholder_name.as_str());

        tracing::debug!(name, lines = lines.len(), "parsed strategy block");
        Strategy::from_lines(name, lines)
    }
}

fn push_node(stack: &mut [(String, Vec<Node>)], root: &mut Vec<Node>, node: Node) {
    match stack.last_mut() {
        Some((_, children)) => children.push(node),
        None => root.push(node),
    }
}
