//! `stratcmp` command-line front end
//!
//! Thin layer over [`stratcmp_core::Workspace`]: argument definitions live in
//! [`args`], text output in [`render`], dispatch in [`run()`].

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod args;
pub mod render;
mod run;

pub use args::{command, parse_assignment, Assignment};
pub use run::{config_path, load_config, run};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Install the stderr tracing subscriber
///
/// `RUST_LOG` wins over the configured `level`.
pub fn init_tracing(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
