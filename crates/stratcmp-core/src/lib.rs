//! Strategy Comparison Session
//!
//! Orchestrates the full flow over one or more loaded documents:
//!
//! ```text
//! text ──parse──▶ Document + Strategy list ──compare──▶ ComparisonResult
//!                                                         │ set_value
//!                                                         ▼
//!                          HistoryLog ◀──save_history── live values vs snapshot
//! ```
//!
//! # Example
//! ```
//! use stratcmp_core::{SessionConfig, Workspace};
//! use stratcmp_history::{HistoryLog, MemoryStore};
//!
//! let mut ws = Workspace::new(SessionConfig::default());
//! ws.add_document("a.txt", "##Begin_Strategy\nStrategyName=A\nRisk=5\n##End_Strategy")?;
//! ws.add_document("b.txt", "##Begin_Strategy\nStrategyName=B\nRisk=7\n##End_Strategy")?;
//!
//! ws.compare(0, &[0, 1], true)?;
//! ws.set_value(1, "Risk", "5")?;
//!
//! let log = HistoryLog::new(MemoryStore::new(), ws.config().history_slot.clone());
//! let (position, block) = ws.save_history(&log)?;
//! assert_eq!(position, 0);
//! assert_eq!(block.forward_script(), r#"SetParam "B" Risk 5"#);
//! # Ok::<(), stratcmp_core::SessionError>(())
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod config;
mod error;
mod workspace;

pub use config::SessionConfig;
pub use error::{ConfigError, SessionError};
pub use workspace::{Document, Workspace};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
