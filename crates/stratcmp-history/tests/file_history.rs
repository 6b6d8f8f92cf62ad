//! History saved through a `FileStore` survives reopening.

use pretty_assertions::assert_eq;
use stratcmp_engine::{compare, set_value};
use stratcmp_history::{build_history_entry, FileStore, HistoryLog};
use stratcmp_test_utils::scenario_strategies;

const SLOT: &str = "strategy_comparison_history";

#[test]
fn saved_block_is_reloaded() {
    let dir = tempfile::tempdir().unwrap();

    let mut strategies = scenario_strategies();
    let mut run = compare(&strategies, 0, [0, 1], false).unwrap();
    set_value(&mut strategies, 1, "Risk", "9", Some(&mut run.result)).unwrap();
    let block = build_history_entry(&run.result, &run.snapshot, "2024-05-01 10:00:00").unwrap();

    HistoryLog::new(FileStore::new(dir.path()), SLOT)
        .append(block.clone())
        .unwrap();

    let reopened = HistoryLog::new(FileStore::new(dir.path()), SLOT);
    let blocks = reopened.load();
    assert_eq!(blocks, vec![block]);
    assert_eq!(blocks[0].forward_script(), "SetParam \"B\" Risk 9");
    assert_eq!(blocks[0].revert_script(), "SetParam \"B\" Risk 7");
}

#[test]
fn stored_json_uses_camel_case() {
    let dir = tempfile::tempdir().unwrap();

    let mut strategies = scenario_strategies();
    let mut run = compare(&strategies, 0, [0, 1], false).unwrap();
    set_value(&mut strategies, 0, "Risk", "3", Some(&mut run.result)).unwrap();
    let block = build_history_entry(&run.result, &run.snapshot, "t").unwrap();

    let log = HistoryLog::new(FileStore::new(dir.path()), SLOT);
    log.append(block).unwrap();

    let raw = std::fs::read_to_string(dir.path().join(format!("{SLOT}.json"))).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json[0]["changes"][0]["targetStrategyName"], "A");
    assert_eq!(json[0]["changes"][0]["oldValue"], "5");
    assert_eq!(json[0]["changes"][0]["newValue"], "3");
}

#[test]
fn corrupt_file_reads_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(format!("{SLOT}.json")), "garbage").unwrap();

    let log = HistoryLog::new(FileStore::new(dir.path()), SLOT);
    assert!(log.load().is_empty());
}
