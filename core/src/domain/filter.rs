//! Visibility filters over a snapshot.

use super::ProcessRecord;

// ============================================================================
// ProcessFilter
// ============================================================================

/// Filter state that decides which records are visible.
///
/// Only visibility is affected; the snapshot itself is never touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessFilter {
    /// Current search query (possibly empty).
    pub query: String,
    /// Whether the search input is active.
    pub searching: bool,
    /// Include records whose ports are all below 1024.
    pub show_system_ports: bool,
}

impl ProcessFilter {
    /// Create a new filter with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether system ports are shown.
    pub fn with_system_ports(mut self, enabled: bool) -> Self {
        self.show_system_ports = enabled;
        self
    }

    /// Set the search query.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Whether a search query is currently narrowing the list.
    pub fn has_query(&self) -> bool {
        !self.query.is_empty()
    }

    /// Check if a record is visible under this filter.
    pub fn is_visible(&self, record: &ProcessRecord) -> bool {
        (self.show_system_ports || record.has_user_port()) && record.matches_search(&self.query)
    }

    /// Apply the filter to a snapshot, preserving order.
    pub fn apply<'a>(&self, records: &'a [ProcessRecord]) -> Vec<&'a ProcessRecord> {
        records.iter().filter(|r| self.is_visible(r)).collect()
    }
}

// ============================================================================
// InitialFilter
// ============================================================================

/// Pre-selection filter given on the command line.
///
/// An argument made only of digits that fits a port number is read as an
/// exact port; anything else is a case-insensitive substring on name or
/// command. A process literally named "8080" is therefore treated as a port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitialFilter {
    /// Exact port match.
    Port(u16),
    /// Case-insensitive substring on name or command (stored lowercased).
    Text(String),
}

impl InitialFilter {
    /// Interpret a command-line argument. Returns `None` for a blank argument.
    pub fn parse(arg: &str) -> Option<Self> {
        let arg = arg.trim();
        if arg.is_empty() {
            return None;
        }
        if arg.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(port) = arg.parse::<u16>() {
                return Some(InitialFilter::Port(port));
            }
        }
        Some(InitialFilter::Text(arg.to_lowercase()))
    }

    /// Check if a record matches.
    pub fn matches(&self, record: &ProcessRecord) -> bool {
        match self {
            InitialFilter::Port(port) => record.ports.contains(port),
            InitialFilter::Text(text) => {
                record.name.to_lowercase().contains(text)
                    || record.command.to_lowercase().contains(text)
            }
        }
    }
}
