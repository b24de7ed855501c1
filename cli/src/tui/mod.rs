//! Interactive terminal UI.
//!
//! One loop owns the [`AppState`]. It waits on three sources: terminal input
//! (read on a dedicated thread), results of background work, and the refresh
//! ticker. Every wake-up redraws the screen.

mod keys;
mod theme;
mod ui;

use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use portsweep_core::application::{AppState, Dispatcher, Effect, Msg};
use portsweep_core::ports::{PortScannerPort, ProcessKillerPort};
use portsweep_core::{FormatterChain, InitialFilter};
use ratatui::DefaultTerminal;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, warn};

use keys::KeyMap;
use theme::Theme;

/// How long the input thread blocks before checking for shutdown.
const INPUT_POLL: Duration = Duration::from_millis(100);

/// Redraw period, so status messages disappear on time.
const REDRAW_INTERVAL: Duration = Duration::from_millis(250);

/// Session options resolved from settings and flags.
#[derive(Debug, Clone)]
pub struct Options {
    pub refresh: Duration,
    pub status_ttl: Duration,
    pub show_system_ports: bool,
    pub initial_filter: Option<InitialFilter>,
}

/// Everything the renderer needs.
pub struct App {
    pub state: AppState,
    pub formatter: FormatterChain,
    pub keys: KeyMap,
    pub theme: Theme,
}

impl App {
    pub fn new(options: &Options) -> Self {
        let state = AppState::new()
            .with_system_ports(options.show_system_ports)
            .with_initial_filter(options.initial_filter.clone())
            .with_status_ttl(options.status_ttl);

        Self {
            state,
            formatter: FormatterChain::new(),
            keys: KeyMap::default(),
            theme: Theme::default(),
        }
    }
}

/// Run the TUI until the user quits.
///
/// The terminal is restored before any error is returned.
pub async fn run<S, K>(scanner: S, killer: K, options: Options) -> Result<()>
where
    S: PortScannerPort + 'static,
    K: ProcessKillerPort + 'static,
{
    let mut terminal = ratatui::try_init().context("Failed to initialize terminal")?;
    let result = run_loop(&mut terminal, scanner, killer, &options).await;
    ratatui::restore();
    result
}

async fn run_loop<S, K>(
    terminal: &mut DefaultTerminal,
    scanner: S,
    killer: K,
    options: &Options,
) -> Result<()>
where
    S: PortScannerPort + 'static,
    K: ProcessKillerPort + 'static,
{
    let (input_tx, mut input_rx) = mpsc::unbounded_channel();
    spawn_input_thread(input_tx);

    let (tx, mut rx) = mpsc::unbounded_channel();
    let dispatcher = Dispatcher::new(scanner, killer, tx);
    let mut app = App::new(options);

    dispatcher.dispatch(Effect::Discover);

    let mut ticker = time::interval(options.refresh);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first tick completes immediately; discovery is already running
    ticker.tick().await;

    let mut redraw = time::interval(REDRAW_INTERVAL);
    redraw.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        terminal
            .draw(|f| ui::draw(f, &app))
            .context("Failed to draw frame")?;

        tokio::select! {
            input = input_rx.recv() => {
                let Some(event) = input else {
                    anyhow::bail!("Terminal input closed");
                };
                if let Event::Key(key) = event {
                    if let Some(action) = app.keys.action(app.state.mode(), key) {
                        step(&mut app.state, &dispatcher, Msg::Action(action));
                    }
                }
            }
            Some(msg) = rx.recv() => step(&mut app.state, &dispatcher, msg),
            _ = ticker.tick() => step(&mut app.state, &dispatcher, Msg::Tick),
            _ = redraw.tick() => {}
        }

        if app.state.should_quit() {
            debug!("Quit requested");
            return Ok(());
        }
    }
}

fn step<S, K>(state: &mut AppState, dispatcher: &Dispatcher<S, K>, msg: Msg)
where
    S: PortScannerPort + 'static,
    K: ProcessKillerPort + 'static,
{
    if let Some(effect) = state.update(msg) {
        dispatcher.dispatch(effect);
    }
}

/// Forward terminal events until the receiving side goes away.
fn spawn_input_thread(tx: UnboundedSender<Event>) {
    thread::spawn(move || {
        while !tx.is_closed() {
            match event::poll(INPUT_POLL) {
                Ok(true) => match event::read() {
                    Ok(event) => {
                        if tx.send(event).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to read terminal event");
                        break;
                    }
                },
                Ok(false) => {}
                Err(e) => {
                    warn!(error = %e, "Failed to poll terminal events");
                    break;
                }
            }
        }
    });
}
