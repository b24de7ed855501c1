//! Effect execution.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use super::app_state::{Effect, KillOutcome, Msg};
use crate::ports::{PortScannerPort, ProcessKillerPort};

/// Runs effects as background tasks and reports results as messages.
///
/// Each effect gets its own tokio task; the state step that produced it never
/// waits on it.
pub struct Dispatcher<S, K> {
    scanner: Arc<S>,
    killer: Arc<K>,
    tx: UnboundedSender<Msg>,
}

impl<S, K> Dispatcher<S, K>
where
    S: PortScannerPort + 'static,
    K: ProcessKillerPort + 'static,
{
    /// Create a dispatcher feeding results into `tx`.
    pub fn new(scanner: S, killer: K, tx: UnboundedSender<Msg>) -> Self {
        Self {
            scanner: Arc::new(scanner),
            killer: Arc::new(killer),
            tx,
        }
    }

    /// Start the work described by `effect`.
    ///
    /// Results sent after the receiver is gone are dropped.
    pub fn dispatch(&self, effect: Effect) {
        let tx = self.tx.clone();
        match effect {
            Effect::Discover => {
                let scanner = Arc::clone(&self.scanner);
                tokio::spawn(async move {
                    let result = scanner.discover().await;
                    let _ = tx.send(Msg::Discovered(result));
                });
            }
            Effect::Terminate { pid, port } => {
                let killer = Arc::clone(&self.killer);
                debug!(pid, port, "Dispatching termination");
                tokio::spawn(async move {
                    let result = killer.terminate(pid).await;
                    let _ = tx.send(Msg::Killed(KillOutcome { pid, port, result }));
                });
            }
        }
    }
}
