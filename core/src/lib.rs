//! portsweep core library
//!
//! Finds processes listening on TCP ports and terminates them.
//! Provides functionality to:
//! - Discover listening sockets with `lsof` and group them per process
//! - Turn raw command lines into short, readable labels
//! - Drive an interactive session (selection, search, confirmation, batch kills)
//! - Load user settings
//!
//! # Architecture
//! This library follows hexagonal architecture (ports & adapters):
//! - `domain`: Pure data models and filters
//! - `ports`: Trait definitions (interfaces)
//! - `adapters`: External system implementations (`lsof`, `ps`, `kill(2)`)
//! - `formatter`: Command humanization
//! - `application`: Session state machine and effect dispatch
//!
//! # Platform Support
//! Unix only (macOS, Linux, BSDs): discovery relies on `lsof`, termination on
//! POSIX signals.

#[cfg(not(unix))]
compile_error!("portsweep only supports Unix platforms");

// Hexagonal architecture layers
pub mod domain;
pub mod ports;
pub mod adapters;
pub mod application;

pub mod config;
pub mod error;
pub mod formatter;

// Re-export domain types (primary API)
pub use domain::{InitialFilter, ProcessFilter, ProcessRecord};

// Re-export other commonly used types
pub use adapters::{LsofScanner, PsCommandLookup, SignalKiller};
pub use application::{Action, AppState, Dispatcher, Effect, Mode, Msg};
pub use config::{ConfigStore, Settings};
pub use error::{Error, Result};
pub use formatter::FormatterChain;
