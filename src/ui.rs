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

mod ui_components;
mod ui_main;

use crate::app::{App, ConnectivityStatus, Section};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph};

use ui_components::{render_history, render_notice_popup, render_registration, render_sidebar};
use ui_main::{render_dashboard, render_landing};

pub fn ui(f: &mut Frame, app: &App) {
    let size = f.area();

    let Some(section) = app.section else {
        render_landing(f, app, size);
        if app.notice.is_some() {
            render_notice_popup(f, app, size);
        }
        return;
    };

    // Layout: header | connectivity | body | help
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(size);

    render_header(f, app, section, chunks[0]);
    render_connectivity(f, app, chunks[1]);

    match section {
        Section::Dashboard => render_dashboard(f, app, chunks[2]),
        Section::Registration => render_registration(f, app, chunks[2]),
        Section::History => render_history(f, app, chunks[2]),
    }

    if app.menu.is_open() {
        // Dim everything behind the sidebar
        f.render_widget(Block::default().style(Style::default().fg(Color::DarkGray)), chunks[2]);
        render_sidebar(f, app, chunks[2]);
    }

    let help = Paragraph::new(app.help.as_str()).style(Style::default().fg(Color::Gray));
    f.render_widget(help, chunks[3]);

    if app.notice.is_some() {
        render_notice_popup(f, app, size);
    }
}

fn render_header(f: &mut Frame, app: &App, section: Section, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let toggle = if !app.menu_toggle_visible {
        "  "
    } else if app.menu.is_open() {
        "✕ "
    } else {
        "≡ "
    };
    let title = Paragraph::new(format!(" {}{}", toggle, section.title()))
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    f.render_widget(title, cols[0]);

    let source = Paragraph::new(format!("source: {} ", app.source_label))
        .alignment(Alignment::Right)
        .style(Style::default().fg(Color::Gray));
    f.render_widget(source, cols[1]);
}

fn status_style(status: &ConnectivityStatus) -> (Color, &'static str) {
    match status {
        ConnectivityStatus::Connecting(_) => (Color::Yellow, "◌"),
        ConnectivityStatus::Connected(_) => (Color::Green, "●"),
        ConnectivityStatus::Error(_) => (Color::Red, "●"),
    }
}

fn render_connectivity(f: &mut Frame, app: &App, area: Rect) {
    let (color, glyph) = status_style(&app.status);
    let mut spans = vec![
        Span::styled(format!(" {} ", glyph), Style::default().fg(color)),
        Span::raw(app.status.message().to_string()),
    ];
    if let Some(since) = &app.connected_since {
        spans.push(Span::styled(
            format!("   connected since {}", since),
            Style::default().fg(Color::Gray),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{history_rows, NO_HISTORY_TEXT};
    use crate::poller::PollOutcome;
    use crate::test_utils::test_utils::connected_snapshot;
    use chrono::Local;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render_to_string(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for row in buffer.content.chunks(buffer.area.width as usize) {
            for cell in row {
                out.push_str(cell.symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_landing_page() {
        let app = App::new("http://sensor.local/data.php");
        let screen = render_to_string(&app);
        assert!(screen.contains("Press Enter"));
    }

    #[test]
    fn test_dashboard_shows_values_and_warning() {
        let mut app = App::new("test");
        app.section = Some(Section::Dashboard);
        app.apply_outcome(
            &PollOutcome::Snapshot(connected_snapshot(30.2, 50.0, 300.0, "12:00:00")),
            Local::now(),
        );
        let screen = render_to_string(&app);
        assert!(screen.contains("30.2"));
        assert!(screen.contains("too hot"));
        assert!(!screen.contains("too high"));
        assert!(screen.contains("connected to sensor"));
    }

    #[test]
    fn test_history_without_data() {
        let mut app = App::new("test");
        app.section = Some(Section::History);
        app.history_rows = history_rows(&[]);
        let screen = render_to_string(&app);
        assert_eq!(screen.matches(NO_HISTORY_TEXT).count(), 1);
    }

    #[test]
    fn test_open_menu_lists_sections() {
        let mut app = App::new("test");
        app.section = Some(Section::Dashboard);
        app.menu_toggle_visible = true;
        app.menu.toggle();
        let screen = render_to_string(&app);
        assert!(screen.contains("Registration"));
        assert!(screen.contains("History"));
        assert!(screen.contains("✕"));
    }
}
