//! Command-line lookup port (interface).

/// Port for resolving the full command line of a process.
///
/// Failures are not errors: an unknown or vanished process yields an empty
/// string.
pub trait CommandLookup: Send + Sync {
    /// Full command line of `pid`, trimmed, or `""`.
    fn command_line(&self, pid: u32) -> impl std::future::Future<Output = String> + Send;
}
