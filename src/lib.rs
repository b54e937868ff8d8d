//! Blockfall (workspace facade crate).
//!
//! Re-exports the member crates as `blockfall::{core, input, term, types}` and
//! hosts the pieces only the terminal binary needs: environment configuration
//! and the JSON-lines event log.

pub mod config;
pub mod event_log;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub use config::AppConfig;
pub use event_log::{EventLog, LogRecord};
