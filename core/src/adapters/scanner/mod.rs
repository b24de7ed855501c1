//! Port scanner adapter.
//!
//! Discovers listening TCP sockets with `lsof` and resolves full command
//! lines through a [`CommandLookup`].

mod lookup;
mod parser;

use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, warn};

use crate::domain::ProcessRecord;
use crate::error::{Error, Result};
use crate::ports::{CommandLookup, PortScannerPort};

pub use lookup::PsCommandLookup;
pub use parser::{parse_line, parse_lsof_output, parse_port, ListenEntry};

/// Default listing program.
pub const DEFAULT_LSOF: &str = "lsof";

/// lsof exits with 1 when nothing matched the selection.
const NO_RESULTS_EXIT_CODE: i32 = 1;

/// Flags explained:
/// - -iTCP: Show only TCP connections
/// - -sTCP:LISTEN: Show only listening sockets
/// - -n: Show IP addresses (don't resolve to hostnames)
/// - -P: Show port numbers (don't resolve to service names)
const LSOF_ARGS: [&str; 4] = ["-iTCP", "-sTCP:LISTEN", "-n", "-P"];

/// Port scanner backed by `lsof`.
pub struct LsofScanner<L = PsCommandLookup> {
    program: String,
    args: Vec<String>,
    lookup: L,
}

impl LsofScanner<PsCommandLookup> {
    /// Create a scanner using `lsof` from `PATH` and `ps` for command lines.
    pub fn new() -> Self {
        Self::with_lookup(PsCommandLookup::new())
    }
}

impl Default for LsofScanner<PsCommandLookup> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: CommandLookup> LsofScanner<L> {
    /// Create a scanner with a custom command-line lookup.
    pub fn with_lookup(lookup: L) -> Self {
        Self {
            program: DEFAULT_LSOF.to_string(),
            args: LSOF_ARGS.iter().map(|a| a.to_string()).collect(),
            lookup,
        }
    }

    /// Use a different lsof binary (keeps the standard flags).
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Replace both the program and its arguments.
    pub fn with_command(
        mut self,
        program: impl Into<String>,
        args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.program = program.into();
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Run the listing program. `None` means it reported no results.
    async fn run_listing(&self) -> Result<Option<String>> {
        debug!(program = %self.program, args = ?self.args, "Running listing command");

        let output = Command::new(&self.program)
            .args(&self.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .await
            .map_err(|e| Error::CommandFailed(format!("Failed to run {}: {}", self.program, e)))?;

        if !output.status.success() {
            if output.status.code() == Some(NO_RESULTS_EXIT_CODE) {
                debug!("No listening sockets reported");
                return Ok(None);
            }
            warn!(status = %output.status, "Listing command failed");
            return Err(Error::CommandFailed(format!(
                "{} exited with {}",
                self.program, output.status
            )));
        }

        // Raw process names may carry any bytes
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        Ok(Some(stdout))
    }
}

impl<L: CommandLookup> PortScannerPort for LsofScanner<L> {
    async fn discover(&self) -> Result<Vec<ProcessRecord>> {
        let Some(stdout) = self.run_listing().await? else {
            return Ok(Vec::new());
        };

        let records = parse_lsof_output(&stdout, &self.lookup).await;
        debug!(count = records.len(), "Discovered listening processes");
        Ok(records)
    }
}
