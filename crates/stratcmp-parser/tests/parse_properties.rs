//! Property tests for the document parser.
//!
//! Documents are generated from a small grammar of folders, strategy blocks
//! and free text, so every generated input has a known number of complete
//! strategy blocks.

use proptest::prelude::*;
use stratcmp_model::{keys, Strategy as StrategyRecord};
use stratcmp_parser::{write_document, StrategyParser};

#[derive(Debug, Clone)]
enum Piece {
    Block(Vec<String>),
    OpenFolder(String),
    CloseFolder,
    Text(String),
}

fn body_line() -> impl Strategy<Value = String> {
    prop_oneof![
        ("[A-Za-z]{1,6}", "[a-z0-9=]{0,5}").prop_map(|(k, v)| format!("{k}={v}")),
        "[a-z ]{0,8}",
    ]
}

fn piece() -> impl Strategy<Value = Piece> {
    prop_oneof![
        4 => prop::collection::vec(body_line(), 0..8).prop_map(Piece::Block),
        1 => "[A-Za-z]{0,6}".prop_map(Piece::OpenFolder),
        1 => Just(Piece::CloseFolder),
        1 => "[a-z ]{0,8}".prop_map(Piece::Text),
    ]
}

fn render(pieces: &[Piece]) -> String {
    let mut lines = Vec::new();
    for piece in pieces {
        match piece {
            Piece::Block(body) => {
                lines.push("##BEGIN_STRATEGY".to_string());
                lines.extend(body.iter().cloned());
                lines.push("##end_strategy".to_string());
            }
            Piece::OpenFolder(name) => lines.push(format!("#Begin_Folder {name}")),
            Piece::CloseFolder => lines.push("#End_Folder".to_string()),
            Piece::Text(text) => lines.push(text.clone()),
        }
    }
    lines.join("\n")
}

fn block_count(pieces: &[Piece]) -> usize {
    pieces.iter().filter(|p| matches!(p, Piece::Block(_))).count()
}

proptest! {
    #[test]
    fn strategy_count_matches_block_pairs(pieces in prop::collection::vec(piece(), 0..20)) {
        let doc = StrategyParser::new().parse(&render(&pieces));
        prop_assert_eq!(doc.strategies.len(), block_count(&pieces));

        let mut referenced: Vec<usize> = doc.tree.iter().flat_map(|n| n.strategy_indices()).collect();
        referenced.sort_unstable();
        prop_assert_eq!(referenced, (0..doc.strategies.len()).collect::<Vec<_>>());
    }

    #[test]
    fn required_defaults_always_present(pieces in prop::collection::vec(piece(), 0..20)) {
        let doc = StrategyParser::new().parse(&render(&pieces));
        for strategy in &doc.strategies {
            prop_assert!(strategy.parameter(keys::ACTIVE_KEY).is_some());
            prop_assert!(strategy.parameter(keys::FVERSION_KEY).is_some());
        }
    }

    #[test]
    fn written_document_reparses_identically(pieces in prop::collection::vec(piece(), 0..20)) {
        let parser = StrategyParser::new();
        let doc = parser.parse(&render(&pieces));
        let again = parser.parse(&write_document(&doc.tree, &doc.strategies));

        prop_assert_eq!(&again.tree, &doc.tree);
        let names = |s: &[StrategyRecord]| s.iter().map(|x| x.name().to_string()).collect::<Vec<_>>();
        prop_assert_eq!(names(&again.strategies), names(&doc.strategies));
        for (a, b) in again.strategies.iter().zip(&doc.strategies) {
            prop_assert_eq!(a.parameters(), b.parameters());
            prop_assert_eq!(a.source_lines(), b.source_lines());
        }
    }
}
