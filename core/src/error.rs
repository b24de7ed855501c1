//! Error types for the portsweep-core library.

use thiserror::Error;

/// Result type alias for portsweep operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during port discovery and process termination.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to execute a system command.
    #[error("Command execution failed: {0}")]
    CommandFailed(String),

    /// The target process does not exist (anymore).
    #[error("Process {0} not found")]
    ProcessNotFound(u32),

    /// Permission denied for an operation.
    #[error("Permission denied to signal process {0}")]
    PermissionDenied(u32),

    /// Failed to kill a process.
    #[error("Failed to kill process {pid}: {reason}")]
    KillFailed { pid: u32, reason: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}
