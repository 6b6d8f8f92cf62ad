//! Strategy Change History
//!
//! Turns edits made during a comparison into reversible platform commands
//! and keeps them in an append-only, persisted log.
//!
//! # Core Concepts
//!
//! - [`build_history_entry`]: diff live cell values against the comparison's
//!   [`ValueSnapshot`](stratcmp_engine::ValueSnapshot) and emit one
//!   [`Change`] per differing cell
//! - [`HistoryBlock`]: one saved batch of changes with its timestamp
//! - [`KeyValueStore`]: injected get/set/remove collaborator
//! - [`HistoryLog`]: the block list stored under a single slot
//!
//! # Command format
//!
//! ```text
//! SetParam "<strategyName>" <parameterKey> <value>
//! ```
//!
//! The name is always double-quoted; key and value are emitted as-is,
//! unescaped.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod block;
mod builder;
pub mod command;
mod error;
mod log;
mod store;

pub use block::{format_saved_at, Change, HistoryBlock};
pub use builder::build_history_entry;
pub use error::{HistoryError, StoreError};
pub use log::HistoryLog;
pub use store::{FileStore, KeyValueStore, MemoryStore};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
