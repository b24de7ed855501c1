//! TUI rendering.

use chrono::{DateTime, Local};
use portsweep_core::Mode;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

use super::App;
use crate::text::{format_ports, truncate};

const PORTS_WIDTH: usize = 18;
const NAME_WIDTH: usize = 15;
const USER_WIDTH: usize = 12;

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Table
            Constraint::Length(6), // Footer
        ])
        .split(f.area());

    draw_header(f, app, chunks[0]);
    draw_table(f, app, chunks[1]);
    draw_footer(f, app, chunks[2]);
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let state = &app.state;

    let mode = if state.filter().show_system_ports {
        "all ports"
    } else {
        "user ports"
    };
    let mut spans = vec![Span::styled(format!("portsweep ({})", mode), theme.title)];

    let selected = state.selected_count();
    if selected > 0 {
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            format!("[{} selected]", selected),
            theme.selected_count,
        ));
    }

    let refreshed = match state.last_refresh() {
        Some(at) => format!("updated {}", DateTime::<Local>::from(at).format("%H:%M:%S")),
        None => "scanning...".to_string(),
    };

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border)
            .title_top(Line::from(format!(" {} ", refreshed)).right_aligned()),
    );

    f.render_widget(header, area);
}

fn draw_table(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let state = &app.state;
    let visible = state.visible();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(format!(" Listening processes ({}) ", visible.len()));

    if visible.is_empty() {
        let query = &state.filter().query;
        let text = if state.last_refresh().is_none() {
            "Scanning...".to_string()
        } else if !query.is_empty() {
            format!("No processes match '{}'", query)
        } else {
            "No listening ports found".to_string()
        };
        f.render_widget(Paragraph::new(text).style(theme.empty).block(block), area);
        return;
    }

    let header_cells = ["", "PORT", "PID", "PROCESS", "USER", "COMMAND"]
        .iter()
        .map(|h| Cell::from(*h).style(theme.header));
    let header = Row::new(header_cells).height(1).bottom_margin(1);

    let rows = visible.iter().map(|record| {
        let checked = state.is_selected(record.pid);

        let cells = vec![
            Cell::from(if checked { "[x]" } else { "[ ]" }),
            Cell::from(format_ports(&record.ports, PORTS_WIDTH)).style(theme.port),
            Cell::from(record.pid.to_string()).style(theme.pid),
            Cell::from(truncate(&record.name, NAME_WIDTH)).style(theme.name),
            Cell::from(truncate(&record.user, USER_WIDTH)).style(theme.user),
            Cell::from(app.formatter.format(&record.command)).style(theme.command),
        ];

        let row = Row::new(cells);
        if checked {
            row.style(theme.checked_row)
        } else {
            row
        }
    });

    let widths = [
        Constraint::Length(3),
        Constraint::Length(PORTS_WIDTH as u16),
        Constraint::Length(8),
        Constraint::Length(NAME_WIDTH as u16),
        Constraint::Length(USER_WIDTH as u16),
        Constraint::Min(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(theme.cursor_row);

    let mut table_state = TableState::default();
    table_state.select(Some(state.cursor()));

    f.render_stateful_widget(table, area, &mut table_state);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let state = &app.state;
    let width = area.width.saturating_sub(4) as usize;
    let mut lines: Vec<Line> = Vec::with_capacity(4);

    // Confirmation prompt replaces the detail line
    if state.mode() == Mode::Confirming {
        lines.push(Line::styled(confirm_prompt(app), theme.confirm));
    } else if let Some(record) = state.focused() {
        let detail = format!("> {}", record.command);
        lines.push(Line::styled(truncate(&detail, width), theme.detail));
    } else {
        lines.push(Line::raw(""));
    }

    match state.status() {
        Some(status) => lines.push(Line::styled(status.text.clone(), theme.status(status.level))),
        None => lines.push(Line::raw("")),
    }

    let query = &state.filter().query;
    if state.mode() == Mode::Searching {
        lines.push(Line::styled(format!("/{}▌", query), theme.search));
        lines.push(Line::styled(
            "type to search • enter done • esc cancel",
            theme.help,
        ));
    } else if !query.is_empty() {
        lines.push(Line::styled(format!("filter: {}", query), theme.filter));
        lines.push(Line::styled(app.keys.help_line(true), theme.help));
    } else {
        lines.push(Line::raw(""));
        lines.push(Line::styled(app.keys.help_line(false), theme.help));
    }

    let footer = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border),
    );

    f.render_widget(footer, area);
}

fn confirm_prompt(app: &App) -> String {
    let targets = app.state.pending_targets();
    match targets {
        [target] => {
            let ports = app
                .state
                .snapshot()
                .iter()
                .find(|r| r.pid == target.pid)
                .map(|r| r.ports.clone())
                .unwrap_or_else(|| vec![target.port]);
            let noun = if ports.len() == 1 { "port" } else { "ports" };
            format!(
                "Kill process {} ({}) on {} {}? (y/n)",
                target.pid,
                target.name,
                noun,
                format_ports(&ports, 40)
            )
        }
        _ => format!("Kill {} selected processes? (y/n)", targets.len()),
    }
}
