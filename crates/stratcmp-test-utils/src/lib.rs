//! Testing utilities for the stratcmp workspace
//!
//! Shared documents, fixtures, and builders.

#![allow(missing_docs)]

use stratcmp_model::Strategy;
use stratcmp_parser::parse;

/// Two strategies differing in name, risk and one extra key
pub const SCENARIO_TWO_STRATEGIES: &str = "##Begin_Strategy\nStrategyName=A\nRisk=5\n##End_Strategy\n##Begin_Strategy\nStrategyName=B\nRisk=7\nExtra=1\n##End_Strategy";

/// Three strategies in nested folders; Beta and Gamma share `Lots=2`
pub const THREE_STRATEGIES: &str = "\
#Begin_Folder Trend
##Begin_Strategy
StrategyName=Alpha
Symbol=EURUSD
Lots=1
Active=1
##End_Strategy
#Begin_Folder Breakout
##Begin_Strategy
StrategyName=Beta
Symbol=EURUSD
Lots=2
StopLoss=40
##End_Strategy
#End_Folder
#End_Folder
##Begin_Strategy
StrategyName=Gamma
// imported from desk B
Symbol=GBPUSD
Lots=2
##End_Strategy";

pub fn scenario_strategies() -> Vec<Strategy> {
    parse(SCENARIO_TWO_STRATEGIES).strategies
}

pub fn three_strategies() -> Vec<Strategy> {
    parse(THREE_STRATEGIES).strategies
}

/// Render one strategy block from `(key, value)` pairs
pub fn strategy_block(params: &[(&str, &str)]) -> String {
    let mut lines = vec!["##Begin_Strategy".to_string()];
    lines.extend(params.iter().map(|(k, v)| format!("{k}={v}")));
    lines.push("##End_Strategy".to_string());
    lines.join("\n")
}

/// Render `count` strategies named `S0..` with `Risk` equal to the index
pub fn numbered_document(count: usize) -> String {
    (0..count)
        .map(|i| {
            let name = format!("S{i}");
            let risk = i.to_string();
            strategy_block(&[("StrategyName", &name), ("Risk", &risk)])
        })
        .collect::<Vec<_>>()
        .join("\n")
}
