//! Process killer port (interface).

use crate::error::Result;

/// Port for terminating processes.
///
/// Implementations deliver a single graceful termination signal. They do not
/// retry and do not wait for the process to exit.
pub trait ProcessKillerPort: Send + Sync {
    /// Send a termination signal to `pid`.
    fn terminate(&self, pid: u32) -> impl std::future::Future<Output = Result<()>> + Send;
}
