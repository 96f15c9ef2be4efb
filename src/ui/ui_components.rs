/*
 * This file is part of Envdash.
 *
 * Copyright (C) 2025 Envdash contributors
 *
 * Envdash is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Envdash is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Envdash. If not, see <https://www.gnu.org/licenses/>.
 */

use crate::app::{App, RegistrationField};
use crate::history::{HistoryRow, NO_HISTORY_TEXT};
use crate::menu::MENU_ITEMS;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, Wrap},
    Frame,
};

/// Helper function to create a centered rectangle for popups
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Render the sidebar menu over the left edge of `area`
pub fn render_sidebar(f: &mut Frame, app: &App, area: Rect) {
    let width = area.width.min(28);
    let sidebar = Rect { x: area.x, y: area.y, width, height: area.height };
    f.render_widget(Clear, sidebar);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(" Menu ")
        .border_style(Style::default().fg(Color::Cyan));

    let items: Vec<ListItem> = MENU_ITEMS
        .iter()
        .map(|(section, label, key)| {
            let marker = if app.is_active(*section) { "•" } else { " " };
            ListItem::new(format!("{} {:<14} [{}]", marker, label, key))
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(app.menu.selected()));

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White));
    f.render_stateful_widget(list, sidebar, &mut state);
}

/// Render the confirmation popup raised by the registration actions
pub fn render_notice_popup(f: &mut Frame, app: &App, size: Rect) {
    let Some(notice) = &app.notice else { return };
    let area = centered_rect(50, 30, size);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(format!(" {} ", notice.title))
        .border_style(Style::default().fg(Color::Green));
    let inner = block.inner(area);
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(2), Constraint::Length(1)])
        .split(inner);

    let message = Paragraph::new(notice.message.as_str())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(message, chunks[0]);

    let help = Paragraph::new("Enter/Esc close")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    f.render_widget(help, chunks[1]);
}

/// Render the registration form
pub fn render_registration(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(" Create account ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let form = &app.registration;
    let masked = "*".repeat(form.password.chars().count());
    let fields = [
        (RegistrationField::Name, "Name", form.name.as_str()),
        (RegistrationField::Email, "Email", form.email.as_str()),
        (RegistrationField::Password, "Password", masked.as_str()),
    ];

    let mut lines: Vec<Line> = Vec::new();
    for (field, label, value) in fields {
        let focused = form.focus == field;
        let style = if focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let cursor = if focused { "_" } else { "" };
        lines.push(Line::from(vec![
            Span::styled(format!("{:>10}: ", label), style),
            Span::raw(format!("{}{}", value, cursor)),
        ]));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "[ Enter ] Register        [ F3 ] Sign in with an external account",
        Style::default().fg(Color::Yellow),
    )));

    f.render_widget(Paragraph::new(lines), inner);
}

/// Render the read-only history table
pub fn render_history(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(format!(" Sensor history ({}) ", app.history_rows.iter().filter(|r| **r != HistoryRow::NoData).count()));

    let header = Row::new(vec!["Time", "Temperature (°C)", "Humidity (%)", "Light (lux)"])
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD | Modifier::UNDERLINED));

    let rows: Vec<Row> = app
        .history_rows
        .iter()
        .map(|row| match row {
            HistoryRow::Record(record) => Row::new(record.cells().to_vec()),
            HistoryRow::NoData => Row::new(vec![Cell::from(NO_HISTORY_TEXT)])
                .style(Style::default().fg(Color::DarkGray)),
        })
        .collect();

    let widths = [
        Constraint::Length(22),
        Constraint::Length(18),
        Constraint::Length(14),
        Constraint::Length(12),
    ];
    let table = Table::new(rows, widths).header(header).block(block);
    f.render_widget(table, area);
}
