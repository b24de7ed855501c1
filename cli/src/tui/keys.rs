//! Key bindings.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use portsweep_core::{Action, Mode};

/// A set of keys bound to one action, with its help text.
#[derive(Debug, Clone)]
pub struct Binding {
    keys: Vec<KeyCode>,
    pub help_key: &'static str,
    pub help: &'static str,
}

impl Binding {
    fn new(keys: impl Into<Vec<KeyCode>>, help_key: &'static str, help: &'static str) -> Self {
        Self {
            keys: keys.into(),
            help_key,
            help,
        }
    }

    pub fn matches(&self, code: KeyCode) -> bool {
        self.keys.contains(&code)
    }

    fn hint(&self) -> String {
        format!("{} {}", self.help_key, self.help)
    }
}

/// All keyboard bindings of the TUI.
#[derive(Debug, Clone)]
pub struct KeyMap {
    pub up: Binding,
    pub down: Binding,
    pub select: Binding,
    pub select_all: Binding,
    pub kill: Binding,
    pub search: Binding,
    pub refresh: Binding,
    pub toggle_system: Binding,
    pub quit: Binding,
    pub confirm: Binding,
    pub cancel: Binding,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            up: Binding::new([KeyCode::Up, KeyCode::Char('k')], "↑/k", "up"),
            down: Binding::new([KeyCode::Down, KeyCode::Char('j')], "↓/j", "down"),
            select: Binding::new([KeyCode::Char(' '), KeyCode::Tab], "space/tab", "select"),
            select_all: Binding::new([KeyCode::Char('a')], "a", "select all"),
            kill: Binding::new([KeyCode::Enter, KeyCode::Char('d')], "enter/d", "kill"),
            search: Binding::new([KeyCode::Char('/')], "/", "search"),
            refresh: Binding::new([KeyCode::Char('r')], "r", "refresh"),
            toggle_system: Binding::new([KeyCode::Char('s')], "s", "system ports"),
            quit: Binding::new([KeyCode::Char('q')], "q", "quit"),
            confirm: Binding::new([KeyCode::Char('y')], "y", "confirm"),
            cancel: Binding::new([KeyCode::Char('n'), KeyCode::Esc], "n/esc", "cancel"),
        }
    }
}

impl KeyMap {
    /// Translate a key event into an action for the given mode.
    pub fn action(&self, mode: Mode, key: KeyEvent) -> Option<Action> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
                .then_some(Action::Quit);
        }

        match mode {
            Mode::Searching => match key.code {
                KeyCode::Esc => Some(Action::Cancel),
                KeyCode::Enter => Some(Action::Confirm),
                KeyCode::Backspace => Some(Action::Backspace),
                KeyCode::Char(c) => Some(Action::Char(c)),
                _ => None,
            },
            Mode::Confirming => {
                if self.confirm.matches(key.code) {
                    Some(Action::Confirm)
                } else if self.cancel.matches(key.code) {
                    Some(Action::Cancel)
                } else {
                    None
                }
            }
            Mode::Normal => self.normal_action(key.code),
        }
    }

    fn normal_action(&self, code: KeyCode) -> Option<Action> {
        let table = [
            (&self.quit, Action::Quit),
            (&self.search, Action::RequestSearch),
            (&self.cancel, Action::Cancel),
            (&self.up, Action::MoveUp),
            (&self.down, Action::MoveDown),
            (&self.select, Action::ToggleSelection),
            (&self.select_all, Action::SelectAll),
            (&self.kill, Action::RequestKill),
            (&self.refresh, Action::Refresh),
            (&self.toggle_system, Action::ToggleSystemPorts),
        ];
        table
            .into_iter()
            .find(|(binding, _)| binding.matches(code))
            .map(|(_, action)| action)
    }

    /// One-line help for normal mode.
    ///
    /// With an active filter the list is shortened and `esc` clears it.
    pub fn help_line(&self, filtered: bool) -> String {
        let bindings: Vec<String> = if filtered {
            vec![
                self.up.hint(),
                self.down.hint(),
                self.select.hint(),
                self.kill.hint(),
                self.search.hint(),
                "esc clear".to_string(),
                self.quit.hint(),
            ]
        } else {
            vec![
                self.up.hint(),
                self.down.hint(),
                self.select.hint(),
                self.select_all.hint(),
                self.kill.hint(),
                self.search.hint(),
                self.refresh.hint(),
                self.toggle_system.hint(),
                self.quit.hint(),
            ]
        };
        bindings.join(" • ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_normal_mode_bindings() {
        let keys = KeyMap::default();
        let cases = [
            (KeyCode::Char('k'), Action::MoveUp),
            (KeyCode::Down, Action::MoveDown),
            (KeyCode::Char(' '), Action::ToggleSelection),
            (KeyCode::Tab, Action::ToggleSelection),
            (KeyCode::Char('a'), Action::SelectAll),
            (KeyCode::Enter, Action::RequestKill),
            (KeyCode::Char('d'), Action::RequestKill),
            (KeyCode::Char('/'), Action::RequestSearch),
            (KeyCode::Char('r'), Action::Refresh),
            (KeyCode::Char('s'), Action::ToggleSystemPorts),
            (KeyCode::Esc, Action::Cancel),
            (KeyCode::Char('q'), Action::Quit),
        ];
        for (code, action) in cases {
            assert_eq!(keys.action(Mode::Normal, press(code)), Some(action), "{:?}", code);
        }
        assert_eq!(keys.action(Mode::Normal, press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_search_mode_types_letters() {
        let keys = KeyMap::default();
        assert_eq!(
            keys.action(Mode::Searching, press(KeyCode::Char('q'))),
            Some(Action::Char('q'))
        );
        assert_eq!(
            keys.action(Mode::Searching, press(KeyCode::Enter)),
            Some(Action::Confirm)
        );
        assert_eq!(
            keys.action(Mode::Searching, press(KeyCode::Backspace)),
            Some(Action::Backspace)
        );
        assert_eq!(
            keys.action(Mode::Searching, press(KeyCode::Esc)),
            Some(Action::Cancel)
        );
    }

    #[test]
    fn test_confirm_mode() {
        let keys = KeyMap::default();
        assert_eq!(
            keys.action(Mode::Confirming, press(KeyCode::Char('y'))),
            Some(Action::Confirm)
        );
        assert_eq!(
            keys.action(Mode::Confirming, press(KeyCode::Char('n'))),
            Some(Action::Cancel)
        );
        assert_eq!(keys.action(Mode::Confirming, press(KeyCode::Enter)), None);
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let keys = KeyMap::default();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        for mode in [Mode::Normal, Mode::Searching, Mode::Confirming] {
            assert_eq!(keys.action(mode, ctrl_c), Some(Action::Quit));
        }
    }

    #[test]
    fn test_release_events_ignored() {
        let keys = KeyMap::default();
        let mut event = press(KeyCode::Char('q'));
        event.kind = KeyEventKind::Release;
        assert_eq!(keys.action(Mode::Normal, event), None);
    }

    #[test]
    fn test_help_line() {
        let keys = KeyMap::default();
        let help = keys.help_line(false);
        assert!(help.starts_with("↑/k up • ↓/j down"));
        assert!(help.ends_with("q quit"));
        assert!(help.contains("space/tab select"));
        assert!(keys.help_line(true).contains("esc clear"));
    }
}
