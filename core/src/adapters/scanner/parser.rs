//! lsof output parsing.
//!
//! Expected lsof output format:
//! ```text
//! COMMAND    PID  USER   FD   TYPE             DEVICE SIZE/OFF NODE NAME
//! node     34805  code   19u  IPv6 0x3d8015e195af1f3f      0t0  TCP [::1]:3000 (LISTEN)
//! ```

use std::collections::{HashMap, HashSet};

use tracing::trace;

use crate::domain::{sort_snapshot, ProcessRecord};
use crate::ports::CommandLookup;

/// Minimum number of columns in a data line.
const MIN_FIELDS: usize = 9;

/// Trailing state token printed after the NAME column.
const LISTEN_SUFFIX: &str = "(LISTEN)";

/// One listening socket from a single lsof line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenEntry {
    pub pid: u32,
    pub port: u16,
    pub name: String,
    pub user: String,
}

/// Parse lsof output into process records, grouping ports by PID.
///
/// A port seen once is never recorded again in the same cycle, even under a
/// different PID; the first line wins. The lookup is awaited once per PID,
/// when the PID first gets a record.
pub async fn parse_lsof_output<L: CommandLookup>(output: &str, lookup: &L) -> Vec<ProcessRecord> {
    let mut records: Vec<ProcessRecord> = Vec::new();
    let mut by_pid: HashMap<u32, usize> = HashMap::new();
    let mut seen_ports: HashSet<u16> = HashSet::new();

    // Skip header line
    for line in output.lines().skip(1) {
        let Some(entry) = parse_line(line) else {
            continue;
        };

        // Same socket on several interfaces (IPv4 and IPv6)
        if !seen_ports.insert(entry.port) {
            trace!(pid = entry.pid, port = entry.port, "Dropping duplicate port");
            continue;
        }

        match by_pid.get(&entry.pid) {
            Some(&index) => records[index].ports.push(entry.port),
            None => {
                let command = lookup.command_line(entry.pid).await;
                by_pid.insert(entry.pid, records.len());
                records.push(ProcessRecord {
                    pid: entry.pid,
                    ports: vec![entry.port],
                    name: entry.name,
                    user: entry.user,
                    command,
                });
            }
        }
    }

    for record in &mut records {
        record.ports.sort_unstable();
    }
    sort_snapshot(&mut records);
    records
}

/// Parse a single lsof data line.
///
/// Columns: COMMAND PID USER FD TYPE DEVICE SIZE/OFF NODE NAME [(LISTEN)]
pub fn parse_line(line: &str) -> Option<ListenEntry> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < MIN_FIELDS {
        if !line.trim().is_empty() {
            trace!(line, "Skipping short lsof line");
        }
        return None;
    }

    let mut name_field = fields[fields.len() - 1];
    if name_field == LISTEN_SUFFIX && fields.len() > MIN_FIELDS {
        name_field = fields[fields.len() - 2];
    }

    let pid: u32 = fields[1].parse().ok()?;
    let port = parse_port(name_field)?;

    Some(ListenEntry {
        pid,
        port,
        name: unescape_name(fields[0]),
        user: fields[2].to_string(),
    })
}

/// Extract the port from an lsof NAME field.
///
/// Handles "*:3000", "127.0.0.1:8080" and "[::1]:3000". The segment after the
/// last colon must be a non-zero port number.
pub fn parse_port(name_field: &str) -> Option<u16> {
    let (_, port) = name_field.rsplit_once(':')?;
    port.parse::<u16>().ok().filter(|&p| p != 0)
}

/// lsof escapes spaces and slashes in command names.
fn unescape_name(raw: &str) -> String {
    raw.replace("\\x20", " ").replace("\\x2f", "/")
}
