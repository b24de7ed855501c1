//! Interactive session state.
//!
//! [`AppState`] is a pure state machine: it consumes [`Msg`]s and answers with
//! at most one [`Effect`] to run. It never performs I/O itself, which keeps
//! batch kills strictly sequential: the next `Terminate` is only produced by
//! the `Killed` message of the previous one.

use std::collections::HashSet;
use std::time::{Duration, Instant, SystemTime};

use tracing::{debug, warn};

use crate::domain::{sort_snapshot, InitialFilter, ProcessFilter, ProcessRecord};
use crate::error::{Error, Result};

/// Default time a status message stays visible.
pub const DEFAULT_STATUS_TTL: Duration = Duration::from_secs(3);

// ============================================================================
// Messages and effects
// ============================================================================

/// Interaction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    Searching,
    Confirming,
}

/// Abstract user action, decoupled from key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveUp,
    MoveDown,
    ToggleSelection,
    SelectAll,
    RequestKill,
    RequestSearch,
    Confirm,
    Cancel,
    Char(char),
    Backspace,
    Refresh,
    ToggleSystemPorts,
    Quit,
}

/// Result of one termination attempt.
#[derive(Debug)]
pub struct KillOutcome {
    pub pid: u32,
    pub port: u16,
    pub result: Result<()>,
}

/// Input to [`AppState::update`].
#[derive(Debug)]
pub enum Msg {
    Action(Action),
    Tick,
    Discovered(Result<Vec<ProcessRecord>>),
    Killed(KillOutcome),
}

/// Work requested by the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Discover,
    Terminate { pid: u32, port: u16 },
}

// ============================================================================
// Status and kill plan
// ============================================================================

/// Severity of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Error,
}

/// Transient one-line feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    pub created: Instant,
}

impl StatusMessage {
    fn new(text: impl Into<String>, level: StatusLevel) -> Self {
        Self {
            text: text.into(),
            level,
            created: Instant::now(),
        }
    }

    /// Whether the message has outlived `ttl` at `now`.
    pub fn is_expired(&self, ttl: Duration, now: Instant) -> bool {
        now.saturating_duration_since(self.created) >= ttl
    }
}

/// A process chosen for termination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KillTarget {
    pub pid: u32,
    /// Lowest port, used for messages.
    pub port: u16,
    pub name: String,
}

impl KillTarget {
    fn from_record(record: &ProcessRecord) -> Self {
        Self {
            pid: record.pid,
            port: record.lowest_port(),
            name: record.name.clone(),
        }
    }
}

/// Ordered targets of an in-flight batch kill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchKillPlan {
    targets: Vec<KillTarget>,
    cursor: usize,
    failed: usize,
    last_error: Option<String>,
}

impl BatchKillPlan {
    fn new(targets: Vec<KillTarget>) -> Self {
        Self {
            targets,
            cursor: 0,
            failed: 0,
            last_error: None,
        }
    }

    /// Target whose termination is in flight.
    pub fn current(&self) -> Option<&KillTarget> {
        self.targets.get(self.cursor)
    }

    /// Number of targets in the plan.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Number of terminations already answered.
    pub fn completed(&self) -> usize {
        self.cursor
    }

    fn effect(&self) -> Option<Effect> {
        self.current().map(|t| Effect::Terminate {
            pid: t.pid,
            port: t.port,
        })
    }

    fn summary(&self) -> StatusMessage {
        let total = self.targets.len();
        let ok = total - self.failed;

        if total == 1 {
            let target = &self.targets[0];
            return if self.failed == 0 {
                StatusMessage::new(
                    format!("Killed process on port {}", target.port),
                    StatusLevel::Success,
                )
            } else {
                let reason = self.last_error.as_deref().unwrap_or("unknown error");
                StatusMessage::new(
                    format!("Failed to kill process {}: {}", target.pid, reason),
                    StatusLevel::Error,
                )
            };
        }

        if self.failed == 0 {
            StatusMessage::new(format!("Killed {} processes", total), StatusLevel::Success)
        } else {
            StatusMessage::new(
                format!(
                    "Killed {} of {} processes ({} failed)",
                    ok, total, self.failed
                ),
                StatusLevel::Error,
            )
        }
    }
}

/// Short reason for a failed termination, without the pid prefix.
fn kill_reason(err: &Error) -> String {
    match err {
        Error::ProcessNotFound(_) => "process not found".to_string(),
        Error::PermissionDenied(_) => "permission denied".to_string(),
        Error::KillFailed { reason, .. } => reason.clone(),
        other => other.to_string(),
    }
}

// ============================================================================
// AppState
// ============================================================================

/// Session state: snapshot, selection, filters, confirmation and batch kills.
#[derive(Debug)]
pub struct AppState {
    snapshot: Vec<ProcessRecord>,
    selected: HashSet<u32>,
    filter: ProcessFilter,
    mode: Mode,
    cursor: usize,
    pending: Vec<KillTarget>,
    plan: Option<BatchKillPlan>,
    status: Option<StatusMessage>,
    status_ttl: Duration,
    last_error: Option<String>,
    last_refresh: Option<SystemTime>,
    initial_filter: Option<InitialFilter>,
    should_quit: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Create an empty session in `Normal` mode.
    pub fn new() -> Self {
        Self {
            snapshot: Vec::new(),
            selected: HashSet::new(),
            filter: ProcessFilter::new(),
            mode: Mode::Normal,
            cursor: 0,
            pending: Vec::new(),
            plan: None,
            status: None,
            status_ttl: DEFAULT_STATUS_TTL,
            last_error: None,
            last_refresh: None,
            initial_filter: None,
            should_quit: false,
        }
    }

    /// Start with system ports visible.
    pub fn with_system_ports(mut self, enabled: bool) -> Self {
        self.filter.show_system_ports = enabled;
        self
    }

    /// Pre-select records matching `filter` after the first successful discovery.
    pub fn with_initial_filter(mut self, filter: Option<InitialFilter>) -> Self {
        self.initial_filter = filter;
        self
    }

    /// How long status messages stay visible.
    pub fn with_status_ttl(mut self, ttl: Duration) -> Self {
        self.status_ttl = ttl;
        self
    }

    // ------------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------------

    /// Apply one message and return the effect to run, if any.
    pub fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::Action(action) => self.on_action(action),
            Msg::Tick => (self.mode != Mode::Confirming).then_some(Effect::Discover),
            Msg::Discovered(result) => {
                self.on_discovered(result);
                None
            }
            Msg::Killed(outcome) => self.on_killed(outcome),
        }
    }

    fn on_action(&mut self, action: Action) -> Option<Effect> {
        if action == Action::Quit {
            self.should_quit = true;
            return None;
        }

        match self.mode {
            Mode::Searching => {
                self.on_search_action(action);
                None
            }
            Mode::Confirming => self.on_confirm_action(action),
            Mode::Normal => self.on_normal_action(action),
        }
    }

    fn on_search_action(&mut self, action: Action) {
        match action {
            Action::Char(c) => {
                self.filter.query.push(c);
                self.cursor = 0;
            }
            Action::Backspace => {
                self.filter.query.pop();
                self.clamp_cursor();
            }
            Action::Cancel => {
                self.filter.query.clear();
                self.set_mode(Mode::Normal);
                self.clamp_cursor();
            }
            Action::Confirm => self.set_mode(Mode::Normal),
            _ => {}
        }
    }

    fn on_confirm_action(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::Confirm => {
                self.set_mode(Mode::Normal);
                let targets = std::mem::take(&mut self.pending);
                if targets.is_empty() {
                    return None;
                }
                if self.plan.is_some() {
                    self.set_status("Kill in progress", StatusLevel::Info);
                    return None;
                }
                debug!(count = targets.len(), "Starting batch kill");
                let plan = BatchKillPlan::new(targets);
                let effect = plan.effect();
                self.plan = Some(plan);
                effect
            }
            Action::Cancel => {
                self.pending.clear();
                self.set_mode(Mode::Normal);
                self.set_status("Cancelled", StatusLevel::Info);
                None
            }
            _ => None,
        }
    }

    fn on_normal_action(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::MoveUp => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            Action::MoveDown => {
                if self.cursor + 1 < self.visible_count() {
                    self.cursor += 1;
                }
            }
            Action::ToggleSelection => {
                if let Some(pid) = self.focused().map(|r| r.pid) {
                    if !self.selected.remove(&pid) {
                        self.selected.insert(pid);
                    }
                }
            }
            Action::SelectAll => {
                let visible: Vec<u32> = self.visible().iter().map(|r| r.pid).collect();
                if visible.iter().all(|pid| self.selected.contains(pid)) {
                    for pid in &visible {
                        self.selected.remove(pid);
                    }
                } else {
                    self.selected.extend(visible);
                }
            }
            Action::RequestKill => {
                if self.plan.is_some() {
                    self.set_status("Kill in progress", StatusLevel::Info);
                    return None;
                }
                let targets: Vec<KillTarget> = {
                    let visible = self.visible();
                    let selected: Vec<KillTarget> = visible
                        .iter()
                        .filter(|r| self.selected.contains(&r.pid))
                        .map(|r| KillTarget::from_record(r))
                        .collect();
                    if selected.is_empty() {
                        visible
                            .get(self.cursor)
                            .map(|r| vec![KillTarget::from_record(r)])
                            .unwrap_or_default()
                    } else {
                        selected
                    }
                };
                if !targets.is_empty() {
                    self.pending = targets;
                    self.set_mode(Mode::Confirming);
                }
            }
            Action::RequestSearch => self.set_mode(Mode::Searching),
            Action::Cancel => {
                if self.filter.has_query() {
                    self.filter.query.clear();
                    self.cursor = 0;
                }
            }
            Action::Refresh => {
                self.set_status("Refreshing...", StatusLevel::Info);
                return Some(Effect::Discover);
            }
            Action::ToggleSystemPorts => {
                self.filter.show_system_ports = !self.filter.show_system_ports;
                self.clamp_cursor();
                let text = if self.filter.show_system_ports {
                    "Showing all ports"
                } else {
                    "Showing user ports only (>=1024)"
                };
                self.set_status(text, StatusLevel::Info);
            }
            Action::Confirm | Action::Char(_) | Action::Backspace | Action::Quit => {}
        }
        None
    }

    fn on_discovered(&mut self, result: Result<Vec<ProcessRecord>>) {
        match result {
            Ok(mut records) => {
                sort_snapshot(&mut records);
                self.snapshot = records;
                self.last_error = None;
                self.last_refresh = Some(SystemTime::now());

                let live: HashSet<u32> = self.snapshot.iter().map(|r| r.pid).collect();
                self.selected.retain(|pid| live.contains(pid));

                if let Some(filter) = self.initial_filter.take() {
                    self.apply_initial_filter(&filter);
                }
                self.clamp_cursor();
            }
            Err(e) => {
                warn!(error = %e, "Discovery failed");
                let text = format!("Refresh failed: {}", e);
                self.last_error = Some(e.to_string());
                self.set_status(text, StatusLevel::Error);
            }
        }
    }

    fn apply_initial_filter(&mut self, filter: &InitialFilter) {
        let matching: Vec<u32> = self
            .snapshot
            .iter()
            .filter(|r| filter.matches(r))
            .map(|r| r.pid)
            .collect();
        debug!(?filter, matched = matching.len(), "Applying initial filter");

        let first_visible = matching
            .first()
            .and_then(|first| self.visible().iter().position(|r| r.pid == *first));
        if let Some(index) = first_visible {
            self.cursor = index;
        }
        self.selected.extend(matching);
    }

    fn on_killed(&mut self, outcome: KillOutcome) -> Option<Effect> {
        let Some(plan) = self.plan.as_mut() else {
            warn!(pid = outcome.pid, "Kill result without an active plan");
            return None;
        };
        if plan.current().map(|t| t.pid) != Some(outcome.pid) {
            warn!(pid = outcome.pid, "Kill result does not match the current target");
            return None;
        }

        match &outcome.result {
            Ok(()) => {
                self.selected.remove(&outcome.pid);
            }
            Err(e) => {
                plan.failed += 1;
                plan.last_error = Some(kill_reason(e));
            }
        }
        plan.cursor += 1;

        if let Some(next) = plan.effect() {
            return Some(next);
        }

        let summary = plan.summary();
        self.plan = None;
        self.status = Some(summary);
        Some(Effect::Discover)
    }

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.filter.searching = mode == Mode::Searching;
    }

    fn set_status(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.status = Some(StatusMessage::new(text, level));
    }

    fn visible_count(&self) -> usize {
        self.snapshot
            .iter()
            .filter(|r| self.filter.is_visible(r))
            .count()
    }

    fn clamp_cursor(&mut self) {
        let count = self.visible_count();
        if self.cursor >= count {
            self.cursor = count.saturating_sub(1);
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// Records that pass the current filter, in snapshot order.
    pub fn visible(&self) -> Vec<&ProcessRecord> {
        self.filter.apply(&self.snapshot)
    }

    /// Record under the cursor.
    pub fn focused(&self) -> Option<&ProcessRecord> {
        self.visible().get(self.cursor).copied()
    }

    pub fn snapshot(&self) -> &[ProcessRecord] {
        &self.snapshot
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn filter(&self) -> &ProcessFilter {
        &self.filter
    }

    pub fn is_selected(&self, pid: u32) -> bool {
        self.selected.contains(&pid)
    }

    /// Number of selected records that pass the current filter.
    pub fn selected_count(&self) -> usize {
        self.visible()
            .iter()
            .filter(|r| self.selected.contains(&r.pid))
            .count()
    }

    /// Targets awaiting confirmation.
    pub fn pending_targets(&self) -> &[KillTarget] {
        &self.pending
    }

    /// Batch kill in progress, if any.
    pub fn plan(&self) -> Option<&BatchKillPlan> {
        self.plan.as_ref()
    }

    /// Current status message, unless it has expired.
    pub fn status(&self) -> Option<&StatusMessage> {
        self.status_at(Instant::now())
    }

    /// Status message as seen at `now`.
    pub fn status_at(&self, now: Instant) -> Option<&StatusMessage> {
        self.status
            .as_ref()
            .filter(|s| !s.is_expired(self.status_ttl, now))
    }

    /// Error of the last failed discovery, cleared by the next success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Wall-clock time of the last successful discovery.
    pub fn last_refresh(&self) -> Option<SystemTime> {
        self.last_refresh
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pid: u32, ports: &[u16], name: &str) -> ProcessRecord {
        ProcessRecord::new(
            pid,
            ports.iter().copied(),
            name,
            "me",
            format!("{} --serve", name),
        )
    }

    fn sample() -> Vec<ProcessRecord> {
        vec![
            record(10, &[3000], "node"),
            record(20, &[5432], "postgres"),
            record(30, &[8080, 80], "nginx"),
            record(40, &[22], "sshd"),
        ]
    }

    fn loaded() -> AppState {
        let mut state = AppState::new();
        state.update(Msg::Discovered(Ok(sample())));
        state
    }

    fn act(state: &mut AppState, action: Action) -> Option<Effect> {
        state.update(Msg::Action(action))
    }

    fn typed(state: &mut AppState, text: &str) {
        for c in text.chars() {
            act(state, Action::Char(c));
        }
    }

    fn killed(state: &mut AppState, pid: u32, port: u16, result: Result<()>) -> Option<Effect> {
        state.update(Msg::Killed(KillOutcome { pid, port, result }))
    }

    fn visible_pids(state: &AppState) -> Vec<u32> {
        state.visible().iter().map(|r| r.pid).collect()
    }

    fn status_text(state: &AppState) -> &str {
        state.status().map(|s| s.text.as_str()).unwrap_or("")
    }

    #[test]
    fn test_initial_state() {
        let state = AppState::new();
        assert_eq!(state.mode(), Mode::Normal);
        assert!(state.snapshot().is_empty());
        assert_eq!(state.cursor(), 0);
        assert!(state.focused().is_none());
    }

    #[test]
    fn test_discovery_sorts_and_hides_system_ports() {
        let state = loaded();
        // nginx's lowest port is 80, sshd is system-only
        assert_eq!(visible_pids(&state), vec![30, 10, 20]);
        assert!(state.last_refresh().is_some());
    }

    #[test]
    fn test_tick_requests_discovery_unless_confirming() {
        let mut state = loaded();
        assert_eq!(state.update(Msg::Tick), Some(Effect::Discover));

        act(&mut state, Action::RequestKill);
        assert_eq!(state.mode(), Mode::Confirming);
        assert_eq!(state.update(Msg::Tick), None);
    }

    #[test]
    fn test_cursor_movement_is_bounded() {
        let mut state = loaded();
        act(&mut state, Action::MoveUp);
        assert_eq!(state.cursor(), 0);

        for _ in 0..10 {
            act(&mut state, Action::MoveDown);
        }
        assert_eq!(state.cursor(), 2);
    }

    #[test]
    fn test_search_flow() {
        let mut state = loaded();
        act(&mut state, Action::MoveDown);
        act(&mut state, Action::RequestSearch);
        assert_eq!(state.mode(), Mode::Searching);
        assert!(state.filter().searching);

        typed(&mut state, "post");
        assert_eq!(state.cursor(), 0);
        assert_eq!(visible_pids(&state), vec![20]);

        act(&mut state, Action::Confirm);
        assert_eq!(state.mode(), Mode::Normal);
        assert!(!state.filter().searching);
        assert_eq!(state.filter().query, "post");

        // Esc in normal mode clears the kept filter
        act(&mut state, Action::Cancel);
        assert_eq!(state.filter().query, "");
        assert_eq!(visible_pids(&state).len(), 3);

        // Esc again is a no-op
        act(&mut state, Action::Cancel);
        assert_eq!(state.mode(), Mode::Normal);
    }

    #[test]
    fn test_search_matches_port_text() {
        let mut state = loaded();
        act(&mut state, Action::RequestSearch);
        typed(&mut state, "808");
        assert_eq!(visible_pids(&state), vec![30]);
    }

    #[test]
    fn test_search_cancel_clears_query() {
        let mut state = loaded();
        act(&mut state, Action::RequestSearch);
        typed(&mut state, "zzz");
        assert!(state.visible().is_empty());
        assert_eq!(state.cursor(), 0);

        act(&mut state, Action::Cancel);
        assert_eq!(state.mode(), Mode::Normal);
        assert_eq!(state.filter().query, "");
        assert_eq!(visible_pids(&state).len(), 3);
    }

    #[test]
    fn test_search_backspace_clamps() {
        let mut state = loaded();
        act(&mut state, Action::RequestSearch);
        typed(&mut state, "no");
        act(&mut state, Action::Backspace);
        assert_eq!(state.filter().query, "n");
        // Normal-mode actions are ignored while typing
        act(&mut state, Action::SelectAll);
        assert_eq!(state.selected_count(), 0);
        act(&mut state, Action::Backspace);
        act(&mut state, Action::Backspace);
        assert_eq!(state.filter().query, "");
    }

    #[test]
    fn test_toggle_selection() {
        let mut state = loaded();
        act(&mut state, Action::ToggleSelection);
        assert!(state.is_selected(30));
        act(&mut state, Action::ToggleSelection);
        assert!(!state.is_selected(30));
    }

    #[test]
    fn test_select_all_twice_restores() {
        let mut state = loaded();
        act(&mut state, Action::SelectAll);
        assert_eq!(state.selected_count(), 3);
        act(&mut state, Action::SelectAll);
        assert_eq!(state.selected_count(), 0);
    }

    #[test]
    fn test_select_all_completes_partial_selection() {
        let mut state = loaded();
        act(&mut state, Action::ToggleSelection);
        act(&mut state, Action::SelectAll);
        assert_eq!(state.selected_count(), 3);
    }

    #[test]
    fn test_select_all_only_touches_visible() {
        let mut state = loaded();
        act(&mut state, Action::ToggleSystemPorts);
        // sshd comes first once system ports are shown
        assert_eq!(state.focused().map(|r| r.pid), Some(40));
        act(&mut state, Action::ToggleSelection);
        act(&mut state, Action::ToggleSystemPorts);

        act(&mut state, Action::SelectAll);
        act(&mut state, Action::SelectAll);
        // hidden sshd keeps its selection but is not counted
        assert!(state.is_selected(40));
        assert_eq!(state.selected_count(), 0);
    }

    #[test]
    fn test_selected_count_follows_search() {
        let mut state = loaded();
        act(&mut state, Action::SelectAll);
        assert_eq!(state.selected_count(), 3);

        act(&mut state, Action::RequestSearch);
        typed(&mut state, "node");
        assert_eq!(visible_pids(&state), vec![10]);
        assert_eq!(state.selected_count(), 1);

        act(&mut state, Action::Cancel);
        assert_eq!(state.selected_count(), 3);
    }

    #[test]
    fn test_selection_purged_after_discovery() {
        let mut state = loaded();
        act(&mut state, Action::SelectAll);

        let remaining = vec![record(10, &[3000], "node")];
        state.update(Msg::Discovered(Ok(remaining)));
        assert!(state.is_selected(10));
        assert_eq!(state.selected_count(), 1);
    }

    #[test]
    fn test_discovery_error_keeps_snapshot() {
        let mut state = loaded();
        state.update(Msg::Discovered(Err(Error::CommandFailed("boom".into()))));
        assert_eq!(state.snapshot().len(), 4);
        assert!(state.last_error().unwrap().contains("boom"));
        assert_eq!(state.status().unwrap().level, StatusLevel::Error);

        state.update(Msg::Discovered(Ok(sample())));
        assert!(state.last_error().is_none());
    }

    #[test]
    fn test_cursor_clamped_when_list_shrinks() {
        let mut state = loaded();
        act(&mut state, Action::MoveDown);
        act(&mut state, Action::MoveDown);
        assert_eq!(state.cursor(), 2);

        state.update(Msg::Discovered(Ok(vec![record(10, &[3000], "node")])));
        assert_eq!(state.cursor(), 0);

        state.update(Msg::Discovered(Ok(Vec::new())));
        assert_eq!(state.cursor(), 0);
        assert!(state.focused().is_none());
    }

    #[test]
    fn test_cursor_stays_in_range_across_sequences() {
        let mut state = loaded();
        let steps = [
            Action::MoveDown,
            Action::MoveDown,
            Action::ToggleSystemPorts,
            Action::MoveDown,
            Action::MoveDown,
            Action::ToggleSystemPorts,
            Action::RequestSearch,
            Action::Char('n'),
            Action::Backspace,
            Action::Confirm,
            Action::MoveDown,
        ];
        for step in steps {
            act(&mut state, step);
            let count = state.visible().len();
            assert!(count == 0 && state.cursor() == 0 || state.cursor() < count);
        }
    }

    #[test]
    fn test_toggle_system_ports_status() {
        let mut state = loaded();
        act(&mut state, Action::ToggleSystemPorts);
        assert_eq!(status_text(&state), "Showing all ports");
        assert_eq!(visible_pids(&state), vec![40, 30, 10, 20]);

        act(&mut state, Action::ToggleSystemPorts);
        assert_eq!(status_text(&state), "Showing user ports only (>=1024)");
    }

    #[test]
    fn test_refresh() {
        let mut state = loaded();
        assert_eq!(act(&mut state, Action::Refresh), Some(Effect::Discover));
        assert_eq!(status_text(&state), "Refreshing...");
    }

    #[test]
    fn test_request_kill_with_nothing_visible() {
        let mut state = AppState::new();
        assert_eq!(act(&mut state, Action::RequestKill), None);
        assert_eq!(state.mode(), Mode::Normal);
    }

    #[test]
    fn test_kill_focused_record() {
        let mut state = loaded();
        act(&mut state, Action::MoveDown);
        act(&mut state, Action::RequestKill);
        assert_eq!(state.mode(), Mode::Confirming);
        assert_eq!(state.pending_targets().len(), 1);
        assert_eq!(state.pending_targets()[0].pid, 10);

        let effect = act(&mut state, Action::Confirm);
        assert_eq!(effect, Some(Effect::Terminate { pid: 10, port: 3000 }));
        assert_eq!(state.mode(), Mode::Normal);

        let effect = killed(&mut state, 10, 3000, Ok(()));
        assert_eq!(effect, Some(Effect::Discover));
        assert!(state.plan().is_none());
        assert_eq!(status_text(&state), "Killed process on port 3000");
    }

    #[test]
    fn test_single_kill_failure_reports_reason() {
        let mut state = loaded();
        act(&mut state, Action::RequestKill);
        act(&mut state, Action::Confirm);

        killed(&mut state, 30, 80, Err(Error::PermissionDenied(30)));
        let status = state.status().unwrap();
        assert_eq!(status.text, "Failed to kill process 30: permission denied");
        assert_eq!(status.level, StatusLevel::Error);
    }

    #[test]
    fn test_confirm_cancel() {
        let mut state = loaded();
        act(&mut state, Action::RequestKill);
        assert_eq!(act(&mut state, Action::Cancel), None);
        assert_eq!(state.mode(), Mode::Normal);
        assert!(state.pending_targets().is_empty());
        assert_eq!(status_text(&state), "Cancelled");
    }

    #[test]
    fn test_confirming_ignores_other_actions() {
        let mut state = loaded();
        act(&mut state, Action::RequestKill);
        assert_eq!(act(&mut state, Action::Refresh), None);
        act(&mut state, Action::MoveDown);
        assert_eq!(state.cursor(), 0);
        assert_eq!(state.mode(), Mode::Confirming);
    }

    #[test]
    fn test_batch_kill_is_sequential() {
        let mut state = loaded();
        act(&mut state, Action::SelectAll);
        act(&mut state, Action::RequestKill);
        assert_eq!(state.pending_targets().len(), 3);

        let mut effect = act(&mut state, Action::Confirm);
        let mut terminated = Vec::new();
        while let Some(Effect::Terminate { pid, port }) = effect {
            terminated.push(pid);
            effect = killed(&mut state, pid, port, Ok(()));
        }

        assert_eq!(terminated, vec![30, 10, 20]);
        assert_eq!(effect, Some(Effect::Discover));
        assert_eq!(status_text(&state), "Killed 3 processes");
        assert_eq!(state.selected_count(), 0);
    }

    #[test]
    fn test_batch_kill_partial_failure() {
        let mut state = loaded();
        act(&mut state, Action::SelectAll);
        act(&mut state, Action::RequestKill);

        act(&mut state, Action::Confirm);
        killed(&mut state, 30, 80, Ok(()));
        killed(&mut state, 10, 3000, Err(Error::ProcessNotFound(10)));
        let effect = killed(&mut state, 20, 5432, Ok(()));

        assert_eq!(effect, Some(Effect::Discover));
        let status = state.status().unwrap();
        assert_eq!(status.text, "Killed 2 of 3 processes (1 failed)");
        assert_eq!(status.level, StatusLevel::Error);
        // failed pid keeps its selection
        assert!(state.is_selected(10));
        assert_eq!(state.selected_count(), 1);
    }

    #[test]
    fn test_kill_targets_only_selected_visible() {
        let mut state = loaded();
        act(&mut state, Action::SelectAll);
        act(&mut state, Action::RequestSearch);
        typed(&mut state, "node");
        act(&mut state, Action::Confirm);

        act(&mut state, Action::RequestKill);
        let pids: Vec<u32> = state.pending_targets().iter().map(|t| t.pid).collect();
        assert_eq!(pids, vec![10]);
    }

    #[test]
    fn test_second_kill_refused_while_batch_running() {
        let mut state = loaded();
        act(&mut state, Action::SelectAll);
        act(&mut state, Action::RequestKill);
        let first = act(&mut state, Action::Confirm);
        assert_eq!(first, Some(Effect::Terminate { pid: 30, port: 80 }));

        assert_eq!(act(&mut state, Action::RequestKill), None);
        assert_eq!(state.mode(), Mode::Normal);
        assert_eq!(status_text(&state), "Kill in progress");
        assert_eq!(act(&mut state, Action::Confirm), None);

        let mut effect = killed(&mut state, 30, 80, Ok(()));
        let mut terminated = vec![30];
        while let Some(Effect::Terminate { pid, port }) = effect {
            terminated.push(pid);
            effect = killed(&mut state, pid, port, Ok(()));
        }
        assert_eq!(terminated, vec![30, 10, 20]);
        assert_eq!(status_text(&state), "Killed 3 processes");
    }

    #[test]
    fn test_confirm_refused_when_plan_started_meanwhile() {
        let mut state = loaded();
        act(&mut state, Action::RequestKill);
        act(&mut state, Action::Confirm);
        assert!(state.plan().is_some());

        // a confirmation already pending cannot start a second plan
        state.mode = Mode::Confirming;
        state.pending = vec![KillTarget::from_record(&record(10, &[3000], "node"))];
        assert_eq!(act(&mut state, Action::Confirm), None);
        assert_eq!(state.plan().map(|p| p.len()), Some(1));
        assert_eq!(status_text(&state), "Kill in progress");
    }

    #[test]
    fn test_stray_kill_result_ignored() {
        let mut state = loaded();
        assert_eq!(killed(&mut state, 10, 3000, Ok(())), None);
        assert!(state.status().is_none());
    }

    #[test]
    fn test_initial_filter_by_port_applied_once() {
        let mut state = AppState::new().with_initial_filter(InitialFilter::parse("5432"));
        state.update(Msg::Discovered(Ok(sample())));
        assert!(state.is_selected(20));
        assert_eq!(state.selected_count(), 1);
        assert_eq!(state.focused().map(|r| r.pid), Some(20));

        act(&mut state, Action::ToggleSelection);
        state.update(Msg::Discovered(Ok(sample())));
        assert_eq!(state.selected_count(), 0);
    }

    #[test]
    fn test_initial_filter_waits_for_success() {
        let mut state = AppState::new().with_initial_filter(InitialFilter::parse("NGINX"));
        state.update(Msg::Discovered(Err(Error::CommandFailed("lsof".into()))));
        state.update(Msg::Discovered(Ok(sample())));
        assert!(state.is_selected(30));
    }

    #[test]
    fn test_with_system_ports() {
        let mut state = AppState::new().with_system_ports(true);
        state.update(Msg::Discovered(Ok(sample())));
        assert_eq!(state.visible().len(), 4);
    }

    #[test]
    fn test_status_expires() {
        let mut state = loaded().with_status_ttl(Duration::from_secs(3));
        act(&mut state, Action::Refresh);

        let created = state.status().unwrap().created;
        assert!(state.status_at(created + Duration::from_secs(2)).is_some());
        assert!(state.status_at(created + Duration::from_secs(3)).is_none());
    }

    #[test]
    fn test_quit_from_any_mode() {
        let mut state = loaded();
        act(&mut state, Action::RequestSearch);
        act(&mut state, Action::Quit);
        assert!(state.should_quit());
    }
}
