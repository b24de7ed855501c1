//! Application layer - Session state machine and effect execution.
//!
//! [`AppState`] decides what should happen; [`Dispatcher`] makes it happen
//! through the port traits and reports back as [`Msg`]s.

mod app_state;
mod dispatcher;

pub use app_state::{
    Action, AppState, BatchKillPlan, Effect, KillOutcome, KillTarget, Mode, Msg, StatusLevel,
    StatusMessage, DEFAULT_STATUS_TTL,
};
pub use dispatcher::Dispatcher;
