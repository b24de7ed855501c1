//! List command - one-shot table of listening processes.

use anyhow::{Context, Result};
use portsweep_core::ports::PortScannerPort;
use portsweep_core::{FormatterChain, InitialFilter, ProcessFilter, ProcessRecord};
use serde::Serialize;

use crate::text::{format_ports, truncate};

/// Listing options.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub filter: Option<InitialFilter>,
    pub show_system_ports: bool,
    pub json: bool,
}

/// A record with its humanized command, as printed by `--json`.
#[derive(Debug, Serialize)]
struct JsonRecord<'a> {
    #[serde(flatten)]
    record: &'a ProcessRecord,
    label: String,
}

pub async fn run<S: PortScannerPort>(scanner: &S, options: &ListOptions) -> Result<()> {
    let records = scanner
        .discover()
        .await
        .context("Failed to list listening ports")?;

    let formatter = FormatterChain::new();
    let visible = select(&records, options);

    if options.json {
        let entries: Vec<JsonRecord> = visible
            .iter()
            .map(|&record| JsonRecord {
                record,
                label: formatter.format(&record.command),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if visible.is_empty() {
        println!("No listening ports found.");
        return Ok(());
    }

    // Table header
    println!(
        "{:<18} {:<8} {:<15} {:<12} COMMAND",
        "PORT", "PID", "PROCESS", "USER"
    );
    println!("{}", "-".repeat(80));

    for record in &visible {
        println!(
            "{:<18} {:<8} {:<15} {:<12} {}",
            format_ports(&record.ports, 18),
            record.pid,
            truncate(&record.name, 15),
            truncate(&record.user, 12),
            formatter.format(&record.command)
        );
    }

    println!("\nTotal: {} processes", visible.len());
    Ok(())
}

/// Records to print: the system-port rule first, then the optional filter.
fn select<'a>(records: &'a [ProcessRecord], options: &ListOptions) -> Vec<&'a ProcessRecord> {
    let mut visible = ProcessFilter::new()
        .with_system_ports(options.show_system_ports)
        .apply(records);
    if let Some(filter) = &options.filter {
        visible.retain(|r| filter.matches(r));
    }
    visible
}
