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

//! Dashboard state and the reducer that folds poll outcomes into it.
//!
//! Nothing here talks to the network or the terminal; the controller feeds
//! outcomes in and the renderer reads the fields back out.

use chrono::{DateTime, Local};

use crate::history::HistoryRow;
use crate::menu::MenuController;
use crate::poller::PollOutcome;
use crate::source::SensorSnapshot;
use crate::thresholds::{classify, Metric, WarningState};

pub const PLACEHOLDER: &str = "--";

pub const STATUS_CONNECTING: &str = "fetching sensor data…";
pub const STATUS_CONNECTED: &str = "connected to sensor — real-time data active";
pub const STATUS_NOT_CONNECTED: &str = "sensor not connected — waiting for sensor";
pub const STATUS_CONNECTION_ERROR: &str = "connection error — recheck sensor";

pub const REGISTRATION_DONE: &str =
    "Registration successful! Your account has been created. (Demo only, no backend is attached.)";
pub const ALTERNATE_SIGN_IN: &str =
    "External sign-in (demo). A real build would redirect to the provider's login page.";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    Dashboard,
    Registration,
    History,
}

impl Section {
    pub fn title(self) -> &'static str {
        match self {
            Section::Dashboard => "Sensor Dashboard",
            Section::Registration => "Registration",
            Section::History => "History",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConnectivityStatus {
    Connecting(String),
    Connected(String),
    Error(String),
}

impl ConnectivityStatus {
    pub fn message(&self) -> &str {
        match self {
            ConnectivityStatus::Connecting(m)
            | ConnectivityStatus::Connected(m)
            | ConnectivityStatus::Error(m) => m,
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectivityStatus::Connected(_))
    }
}

/// What one metric card shows
#[derive(Clone, Debug, PartialEq)]
pub struct MetricPanel {
    pub metric: Metric,
    pub value_text: String,
    pub updated_label: String,
    pub warning: WarningState,
}

impl MetricPanel {
    fn new(metric: Metric) -> Self {
        Self {
            metric,
            value_text: PLACEHOLDER.to_string(),
            updated_label: String::new(),
            warning: WarningState::None,
        }
    }

    fn blank(&mut self) {
        self.value_text = PLACEHOLDER.to_string();
        self.updated_label.clear();
        self.warning = WarningState::None;
    }

    fn show(&mut self, raw: Option<f64>, time: &str) {
        match raw.and_then(|v| self.metric.round_for_display(v)) {
            Some((text, rounded)) => {
                self.value_text = text;
                self.warning = classify(self.metric, Some(rounded));
            }
            None => {
                self.value_text = PLACEHOLDER.to_string();
                self.warning = WarningState::None;
            }
        }
        self.updated_label = if time.trim().is_empty() {
            String::new()
        } else {
            format!("last updated: {}", time)
        };
    }

    pub fn warning_message(&self) -> Option<String> {
        self.warning.message(self.metric)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum RegistrationField {
    #[default]
    Name,
    Email,
    Password,
}

impl RegistrationField {
    pub fn next(self) -> Self {
        match self {
            RegistrationField::Name => RegistrationField::Email,
            RegistrationField::Email => RegistrationField::Password,
            RegistrationField::Password => RegistrationField::Name,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub focus: RegistrationField,
}

impl RegistrationForm {
    pub fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            RegistrationField::Name => &mut self.name,
            RegistrationField::Email => &mut self.email,
            RegistrationField::Password => &mut self.password,
        }
    }
}

pub struct App {
    /// `None` while the landing page is shown
    pub section: Option<Section>,
    pub status: ConnectivityStatus,
    pub panels: [MetricPanel; 3],
    pub connected_since: Option<String>,
    pub menu: MenuController,
    pub menu_toggle_visible: bool,
    pub history_rows: Vec<HistoryRow>,
    pub registration: RegistrationForm,
    pub notice: Option<Notice>,
    pub source_label: String,
    pub help: String,
}

impl App {
    pub fn new(source_label: impl Into<String>) -> Self {
        Self {
            section: None,
            status: ConnectivityStatus::Connecting(STATUS_CONNECTING.to_string()),
            panels: Metric::ALL.map(MetricPanel::new),
            connected_since: None,
            menu: MenuController::default(),
            menu_toggle_visible: false,
            history_rows: Vec::new(),
            registration: RegistrationForm::default(),
            notice: None,
            source_label: source_label.into(),
            help: String::from("Enter: open dashboard | q: quit"),
        }
    }

    pub fn panel(&self, metric: Metric) -> &MetricPanel {
        &self.panels[Metric::ALL.iter().position(|m| *m == metric).unwrap_or(0)]
    }

    pub fn is_active(&self, section: Section) -> bool {
        self.section == Some(section)
    }

    pub fn any_warning(&self) -> bool {
        self.panels.iter().any(|p| p.warning.is_active())
    }

    fn clear_warnings(&mut self) {
        for panel in &mut self.panels {
            panel.warning = WarningState::None;
        }
    }

    fn set_error(&mut self, message: &str) {
        self.status = ConnectivityStatus::Error(message.to_string());
        self.connected_since = None;
    }

    fn apply_snapshot(&mut self, snapshot: &SensorSnapshot, now: DateTime<Local>) {
        if !snapshot.connected {
            for panel in &mut self.panels {
                panel.blank();
            }
            self.set_error(STATUS_NOT_CONNECTED);
            return;
        }
        for panel in &mut self.panels {
            panel.show(snapshot.reading(panel.metric), &snapshot.time);
        }
        if self.connected_since.is_none() {
            self.connected_since = Some(now.format("%H:%M:%S").to_string());
        }
        self.status = ConnectivityStatus::Connected(STATUS_CONNECTED.to_string());
    }

    /// Fold one poll outcome into the state
    pub fn apply_outcome(&mut self, outcome: &PollOutcome, now: DateTime<Local>) {
        match outcome {
            PollOutcome::Connecting => {
                self.status = ConnectivityStatus::Connecting(STATUS_CONNECTING.to_string());
            }
            PollOutcome::Snapshot(snapshot) => self.apply_snapshot(snapshot, now),
            // Values stay as they were; only an explicit disconnect blanks them
            PollOutcome::Failed(_) => {
                self.clear_warnings();
                self.set_error(STATUS_CONNECTION_ERROR);
            }
        }
    }

    pub fn show_notice(&mut self, title: &str, message: &str) {
        self.notice = Some(Notice { title: title.to_string(), message: message.to_string() });
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn refresh_help(&mut self) {
        self.help = match self.section {
            None => "Enter: open dashboard | q: quit",
            Some(Section::Dashboard) => "m/F2: menu | r: registration | h: history | q: quit",
            Some(Section::Registration) => {
                "Tab: next field | Enter: submit | F3: external sign-in | F2: menu | Esc: back to dashboard"
            }
            Some(Section::History) => "m/F2: menu | d/Esc: dashboard | r: registration | q: quit",
        }
        .to_string();
        if self.menu.is_open() {
            self.help = "↑/↓: select | Enter: open | d/r/h: jump | Esc: close menu".to_string();
        }
    }
}
