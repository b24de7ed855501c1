//! Signal-based process killer.
//!
//! Uses `kill(2)` through nix. The default signal is SIGTERM, which asks the
//! process to shut down; nothing here escalates to SIGKILL.

use nix::errno::Errno;
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::ports::ProcessKillerPort;

/// Process killer that sends one signal per call.
#[derive(Debug, Clone, Copy)]
pub struct SignalKiller {
    signal: Signal,
}

impl SignalKiller {
    /// Create a killer that sends SIGTERM.
    pub fn new() -> Self {
        Self::with_signal(Signal::SIGTERM)
    }

    /// Create a killer that sends a custom signal.
    pub fn with_signal(signal: Signal) -> Self {
        Self { signal }
    }

    /// The signal this killer sends.
    pub fn signal(&self) -> Signal {
        self.signal
    }
}

impl Default for SignalKiller {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessKillerPort for SignalKiller {
    async fn terminate(&self, pid: u32) -> Result<()> {
        // 0 and negative values address process groups
        let raw = i32::try_from(pid)
            .ok()
            .filter(|&p| p > 0)
            .ok_or_else(|| Error::KillFailed {
                pid,
                reason: "invalid pid".to_string(),
            })?;

        debug!(pid, signal = self.signal.as_str(), "Sending signal to process");

        match kill(Pid::from_raw(raw), self.signal) {
            Ok(()) => {
                debug!(pid, "Signal sent successfully");
                Ok(())
            }
            Err(Errno::ESRCH) => {
                debug!(pid, "Process not found");
                Err(Error::ProcessNotFound(pid))
            }
            Err(Errno::EPERM) => {
                warn!(pid, "Permission denied to signal process");
                Err(Error::PermissionDenied(pid))
            }
            Err(e) => {
                warn!(pid, error = %e, "Failed to signal process");
                Err(Error::KillFailed {
                    pid,
                    reason: e.desc().to_string(),
                })
            }
        }
    }
}
