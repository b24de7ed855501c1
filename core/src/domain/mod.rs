//! Domain layer - Pure business logic and data models.
//!
//! This module contains domain entities that represent core business concepts.
//! These types have no I/O dependencies and can be tested in isolation.

mod filter;
mod process;

// Re-export all domain types
pub use filter::{InitialFilter, ProcessFilter};
pub use process::{sort_snapshot, ProcessRecord, FIRST_USER_PORT};
