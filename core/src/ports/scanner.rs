//! Port scanner port (interface).

use crate::domain::ProcessRecord;
use crate::error::Result;

/// Port for discovering processes bound to listening TCP ports.
///
/// Implementations handle platform-specific details (lsof invocation, parsing).
pub trait PortScannerPort: Send + Sync {
    /// Discover all processes with at least one listening TCP socket.
    ///
    /// "No results" is an empty list, not an error.
    fn discover(&self) -> impl std::future::Future<Output = Result<Vec<ProcessRecord>>> + Send;
}
