//! Strategy Document Parser
//!
//! Turns exported strategy text into a flat strategy list plus a folder tree,
//! and writes strategies back out.
//!
//! # Grammar
//!
//! Line oriented, markers matched case-insensitively:
//!
//! ```text
//! #Begin_Folder Outer          <- folder, optional name
//! ##Begin_Strategy             <- block start (line contains marker)
//! StrategyName=Alpha           <- parameter line (contains '=')
//! free text                    <- kept verbatim, no parameter
//! ##End_Strategy               <- block end
//! #End_Folder                  <- closes nearest open folder
//! ```
//!
//! # Example
//!
//! ```rust
//! use stratcmp_parser::StrategyParser;
//!
//! let doc = StrategyParser::new().parse("##Begin_Strategy\nStrategyName=A\n##End_Strategy");
//! assert_eq!(doc.strategies.len(), 1);
//! assert_eq!(doc.strategies[0].name(), "A");
//! assert_eq!(doc.strategies[0].parameter("Active"), Some("0"));
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod markers;
mod options;
mod parser;
mod writer;

pub use options::ParserOptions;
pub use parser::{ParseWarning, ParsedDocument, StrategyParser, WarningKind};
pub use writer::{write_document, write_strategy};

/// Parse text with default options
///
/// Shorthand for `StrategyParser::new().parse(text)`.
#[inline]
#[must_use]
pub fn parse(text: &str) -> ParsedDocument {
    StrategyParser::new().parse(text)
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
