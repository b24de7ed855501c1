//! Full command-line lookup using ps.

use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::ports::CommandLookup;

/// Resolves command lines with `ps -p PID -o command=`.
#[derive(Debug, Clone, Default)]
pub struct PsCommandLookup;

impl PsCommandLookup {
    /// Create a new ps-backed lookup.
    pub fn new() -> Self {
        Self
    }
}

impl CommandLookup for PsCommandLookup {
    async fn command_line(&self, pid: u32) -> String {
        let pid_arg = pid.to_string();
        let output = match Command::new("ps")
            .args(["-p", &pid_arg, "-o", "command="])
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .await
        {
            Ok(output) if output.status.success() => output,
            Ok(output) => {
                debug!(pid, status = %output.status, "ps returned no command line");
                return String::new();
            }
            Err(e) => {
                debug!(pid, error = %e, "Failed to run ps");
                return String::new();
            }
        };

        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_nonexistent_pid_is_empty() {
        let lookup = PsCommandLookup::new();
        // Far beyond any pid_max; ps either fails or prints nothing
        assert_eq!(lookup.command_line(999_999_999).await, "");
    }
}
