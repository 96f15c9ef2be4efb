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

use crate::app::{App, MetricPanel, PLACEHOLDER};
use crate::thresholds::Metric;
use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

use super::ui_components::centered_rect;

/// Render the landing page shown before the dashboard is entered
pub fn render_landing(f: &mut Frame, app: &App, size: Rect) {
    let area = centered_rect(60, 50, size);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(" envdash ");

    let lines = vec![
        Line::from(Span::styled(
            "Environment Monitor",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Live temperature, humidity and light readings"),
        Line::from("with warnings when a value leaves its comfort band."),
        Line::from(""),
        Line::from(Span::styled(
            format!("source: {}", app.source_label),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to open the dashboard",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

/// Render the three metric cards
pub fn render_dashboard(f: &mut Frame, app: &App, area: Rect) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(34),
            Constraint::Percentage(33),
        ])
        .split(area);

    for (panel, col) in app.panels.iter().zip(cols.iter()) {
        render_metric_card(f, panel, *col);
    }
}

fn band_text(metric: Metric) -> String {
    let (low, high) = metric.band();
    format!("normal range {}–{}{}", low, high, metric.unit())
}

fn render_metric_card(f: &mut Frame, panel: &MetricPanel, area: Rect) {
    let warning = panel.warning_message();
    let border = if warning.is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(format!(" {} ", panel.metric.label()))
        .border_style(border);

    let value = if panel.value_text == PLACEHOLDER {
        PLACEHOLDER.to_string()
    } else {
        format!("{}{}", panel.value_text, panel.metric.unit())
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(value, Style::default().add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(panel.updated_label.clone(), Style::default().fg(Color::Gray))),
        Line::from(Span::styled(band_text(panel.metric), Style::default().fg(Color::DarkGray))),
        Line::from(""),
    ];
    // Hidden banner means no line at all
    if let Some(msg) = warning {
        lines.push(Line::from(Span::styled(
            msg,
            Style::default().fg(Color::White).bg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
