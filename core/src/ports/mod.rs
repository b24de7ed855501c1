//! Ports layer - Trait definitions (interfaces).
//!
//! This module defines the interfaces that the application layer uses
//! to interact with external systems. Implementations live in `adapters`.

mod killer;
mod lookup;
mod scanner;

pub use killer::ProcessKillerPort;
pub use lookup::CommandLookup;
pub use scanner::PortScannerPort;
