//! Strategy Model
//!
//! In-memory representation of strategy documents exported from the
//! trading platform.
//!
//! # Core Concepts
//!
//! - [`Strategy`]: One configuration block with its parameters, the raw lines
//!   it was parsed from, and the immutable snapshot taken at parse time
//! - [`ParameterMap`]: Insertion-ordered key/value map (first-seen order)
//! - [`Node`]: Folder/strategy tree used for navigation only
//! - [`line`]: Helpers for reading and rewriting `key=value` lines
//!
//! # Example
//!
//! ```rust
//! use stratcmp_model::{ParameterEdit, Strategy};
//!
//! let lines = vec!["StrategyName=Alpha".to_string(), "Risk=5".to_string()];
//! let mut strategy = Strategy::from_lines("Alpha", lines);
//!
//! assert_eq!(strategy.parameter("Risk"), Some("5"));
//! assert!(matches!(strategy.set_parameter("Risk", "9"), ParameterEdit::Rewritten { line: 1 }));
//! assert_eq!(strategy.source_lines()[1], "Risk=9");
//! assert_eq!(strategy.original_parameter("Risk"), Some("5"));
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod keys;
pub mod line;
mod strategy;
mod tree;

pub use strategy::{ParameterEdit, ParameterMap, Strategy};
pub use tree::Node;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
