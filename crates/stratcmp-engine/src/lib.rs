//! Strategy Comparison Engine
//!
//! Diffs a selection of strategies against a baseline and keeps the diff
//! table consistent while individual cells are edited.
//!
//! # Core Operations
//!
//! - **Compare**: [`compare`] builds a [`ComparisonResult`] over the union of
//!   parameter keys, in first-seen order, plus a [`ValueSnapshot`] of every
//!   produced cell
//! - **Edit**: [`set_value`] writes one parameter into a strategy (map and
//!   source lines) and patches the live comparison in place
//!
//! # Example
//!
//! ```rust
//! use stratcmp_engine::{compare, set_value};
//! use stratcmp_parser::parse;
//!
//! let text = concat!(
//!     "##Begin_Strategy\nStrategyName=A\nRisk=5\n##End_Strategy\n",
//!     "##Begin_Strategy\nStrategyName=B\nRisk=7\n##End_Strategy",
//! );
//! let mut strategies = parse(text).strategies;
//!
//! let mut run = compare(&strategies, 0, [0, 1], false).unwrap();
//! assert!(!run.result.row("Risk").unwrap().all_equal);
//!
//! set_value(&mut strategies, 1, "Risk", "5", Some(&mut run.result)).unwrap();
//! assert!(run.result.row("Risk").unwrap().all_equal);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod compare;
mod error;
mod mutation;

pub use compare::{compare, Cell, Comparison, ComparisonResult, Row, ValueSnapshot};
pub use error::{CompareError, MutationError};
pub use mutation::{set_value, ValueChange};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
