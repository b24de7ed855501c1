//! Process record domain model.

use serde::{Deserialize, Serialize};

/// Ports below this are considered system ports.
pub const FIRST_USER_PORT: u16 = 1024;

// ============================================================================
// ProcessRecord
// ============================================================================

/// A process listening on one or more TCP ports.
///
/// Records are rebuilt from scratch on every discovery cycle. The pid is the
/// only identity that carries over between cycles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProcessRecord {
    /// Process ID.
    pub pid: u32,
    /// Listening ports, strictly ascending.
    pub ports: Vec<u16>,
    /// Process name as reported by the listing tool (may be truncated).
    pub name: String,
    /// Username of the process owner.
    pub user: String,
    /// Full command line, unformatted. Empty when the lookup failed.
    pub command: String,
}

impl ProcessRecord {
    /// Create a record with its ports normalized (sorted, deduplicated).
    pub fn new(
        pid: u32,
        ports: impl IntoIterator<Item = u16>,
        name: impl Into<String>,
        user: impl Into<String>,
        command: impl Into<String>,
    ) -> Self {
        let mut ports: Vec<u16> = ports.into_iter().collect();
        ports.sort_unstable();
        ports.dedup();
        Self {
            pid,
            ports,
            name: name.into(),
            user: user.into(),
            command: command.into(),
        }
    }

    /// Lowest listening port, or 0 if the record has none.
    pub fn lowest_port(&self) -> u16 {
        self.ports.first().copied().unwrap_or(0)
    }

    /// Whether at least one port is outside the system range.
    pub fn has_user_port(&self) -> bool {
        self.ports.iter().any(|&p| p >= FIRST_USER_PORT)
    }

    /// Check if this record matches a search query.
    ///
    /// Name and command are compared case-insensitively; ports match when
    /// their decimal text contains the query.
    pub fn matches_search(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let query_lower = query.to_lowercase();
        self.name.to_lowercase().contains(&query_lower)
            || self.command.to_lowercase().contains(&query_lower)
            || self.ports.iter().any(|p| p.to_string().contains(&query_lower))
    }
}

impl std::fmt::Display for ProcessRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ports = self
            .ports
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{} (PID: {}, ports: {})", self.name, self.pid, ports)
    }
}

/// Sort a snapshot by lowest port, then pid.
pub fn sort_snapshot(records: &mut [ProcessRecord]) {
    records.sort_by_key(|r| (r.lowest_port(), r.pid));
}
