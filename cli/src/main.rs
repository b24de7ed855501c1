//! portsweep - find and kill processes listening on TCP ports
//!
//! Starts an interactive TUI by default. With `--no-tui`, `--json` or when
//! stdout is not a terminal, prints a one-shot listing instead.

mod commands;
mod logging;
mod text;
mod tui;

use clap::{ArgAction, Parser};
use portsweep_core::{ConfigStore, InitialFilter, LsofScanner, Settings, SignalKiller};
use tracing::{debug, warn};

use commands::list::ListOptions;

const KEYBINDINGS: &str = "\
Keybindings:
  ↑/k          Move up
  ↓/j          Move down
  space/tab    Select/deselect process
  a            Select all
  enter/d      Kill selected process(es)
  /            Search
  esc          Clear search filter
  r            Refresh
  s            Toggle system ports (<1024)
  q            Quit

Environment:
  PORTSWEEP_LOG  Log filter (e.g. debug); logs go to ~/.portsweep/portsweep.log";

#[derive(Parser)]
#[command(name = "portsweep")]
#[command(author, version, about = "TUI for managing processes listening on ports")]
#[command(disable_version_flag = true, after_help = KEYBINDINGS)]
struct Cli {
    /// Pre-select processes by port number or by name/command substring
    filter: Option<String>,

    /// Print a one-shot listing instead of the interactive TUI
    #[arg(long)]
    no_tui: bool,

    /// Print the listing as JSON (implies --no-tui)
    #[arg(long)]
    json: bool,

    /// Include system ports (<1024)
    #[arg(long)]
    all: bool,

    /// Show version
    #[arg(short = 'v', long, action = ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init();

    let settings = load_settings().await;
    let scanner = LsofScanner::new().with_program(settings.lsof_path.clone());
    let show_system_ports = cli.all || settings.show_system_ports;
    let filter = cli.filter.as_deref().and_then(InitialFilter::parse);

    if cli.no_tui || cli.json || !atty::is(atty::Stream::Stdout) {
        let options = ListOptions {
            filter,
            show_system_ports,
            json: cli.json,
        };
        return commands::list::run(&scanner, &options).await;
    }

    let options = tui::Options {
        refresh: settings.refresh_period(),
        status_ttl: settings.status_ttl(),
        show_system_ports,
        initial_filter: filter,
    };
    tui::run(scanner, SignalKiller::new(), options).await
}

/// Settings from disk; problems are logged and defaults used.
async fn load_settings() -> Settings {
    let store = match ConfigStore::new() {
        Ok(store) => store,
        Err(e) => {
            warn!(error = %e, "Config store unavailable, using defaults");
            return Settings::default();
        }
    };

    match store.load().await {
        Ok(settings) => {
            debug!(?settings, "Loaded settings");
            settings
        }
        Err(e) => {
            warn!(error = %e, path = %store.path().display(), "Ignoring invalid config");
            Settings::default()
        }
    }
}
