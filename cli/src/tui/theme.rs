//! Colors and styles.

use portsweep_core::application::StatusLevel;
use ratatui::style::{Color, Modifier, Style};

/// Styles used by the renderer.
#[derive(Debug, Clone)]
pub struct Theme {
    pub title: Style,
    pub selected_count: Style,
    pub border: Style,
    pub header: Style,
    pub port: Style,
    pub pid: Style,
    pub name: Style,
    pub user: Style,
    pub command: Style,
    pub cursor_row: Style,
    pub checked_row: Style,
    pub empty: Style,
    pub detail: Style,
    pub confirm: Style,
    pub search: Style,
    pub filter: Style,
    pub help: Style,
    pub info: Style,
    pub success: Style,
    pub error: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected_count: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            border: Style::default().fg(Color::DarkGray),
            header: Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            port: Style::default().fg(Color::Cyan),
            pid: Style::default().fg(Color::Magenta),
            name: Style::default().fg(Color::White),
            user: Style::default().fg(Color::Blue),
            command: Style::default().fg(Color::Gray),
            cursor_row: Style::default().bg(Color::DarkGray).fg(Color::White),
            checked_row: Style::default().fg(Color::Green),
            empty: Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            detail: Style::default().fg(Color::DarkGray),
            confirm: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            search: Style::default().fg(Color::Yellow),
            filter: Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
            help: Style::default().fg(Color::DarkGray),
            info: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Green),
            error: Style::default().fg(Color::Red),
        }
    }
}

impl Theme {
    pub fn status(&self, level: StatusLevel) -> Style {
        match level {
            StatusLevel::Info => self.info,
            StatusLevel::Success => self.success,
            StatusLevel::Error => self.error,
        }
    }
}
