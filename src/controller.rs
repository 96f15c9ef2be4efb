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

//! Section state machine.
//!
//! The landing page (`section == None`) is left once through
//! `enter_dashboard` and never returned to. Polling runs exactly while the
//! dashboard is the active section.

use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use serde_json::json;

use crate::app::{App, Section, ALTERNATE_SIGN_IN, REGISTRATION_DONE};
use crate::config::{validate_config, DashConfig};
use crate::error::{DashError, Result};
use crate::handlers;
use crate::history::{history_rows, sample_history, HistoryRecord};
use crate::logger::log_event;
use crate::poller::{PollOutcome, SensorPoller};
use crate::source::{HttpSensorSource, SensorSource};

pub struct ViewController {
    app: App,
    poller: SensorPoller,
    history: Vec<HistoryRecord>,
}

impl ViewController {
    /// Validate the configuration once and wire up the HTTP source
    pub fn new(cfg: &DashConfig) -> Result<Self> {
        validate_config(cfg)?;
        let source = HttpSensorSource::new(cfg.api_url.trim())?;
        Ok(Self::with_source(Arc::new(source), cfg.poll_interval()))
    }

    pub fn with_source(source: Arc<dyn SensorSource>, interval: Duration) -> Self {
        let app = App::new(source.describe());
        Self {
            app,
            poller: SensorPoller::new(source, interval),
            history: sample_history(),
        }
    }

    /// Replace the dataset shown by the history section
    pub fn with_history(mut self, records: Vec<HistoryRecord>) -> Self {
        self.history = records;
        self
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn is_polling(&self) -> bool {
        self.poller.is_running()
    }

    pub fn live_poll_loops(&self) -> usize {
        self.poller.live_loops()
    }

    pub fn enter_dashboard(&mut self) -> Result<()> {
        if self.app.section.is_none() {
            log_event("dashboard_entered", json!({ "source": self.app.source_label }));
        }
        self.app.menu_toggle_visible = true;
        self.navigate_unchecked(Section::Dashboard)
    }

    pub fn navigate(&mut self, target: Section) -> Result<()> {
        if self.app.section.is_none() {
            return Err(DashError::NotEntered);
        }
        self.navigate_unchecked(target)
    }

    fn navigate_unchecked(&mut self, target: Section) -> Result<()> {
        let previous = self.app.section;
        if previous == Some(Section::Dashboard) && target != Section::Dashboard {
            self.poller.stop();
        }

        self.app.section = Some(target);
        let started = match target {
            Section::Dashboard => self.poller.start(),
            Section::History => {
                self.app.history_rows = history_rows(&self.history);
                Ok(())
            }
            Section::Registration => Ok(()),
        };

        self.app.menu.close();
        self.app.refresh_help();
        log_event("section_changed", json!({
            "from": previous.map(|s| format!("{:?}", s)),
            "to": format!("{:?}", target),
        }));
        started
    }

    pub fn toggle_menu(&mut self) {
        if !self.app.menu_toggle_visible {
            return;
        }
        self.app.menu.toggle();
        self.app.refresh_help();
    }

    pub fn close_menu(&mut self) {
        self.app.menu.close();
        self.app.refresh_help();
    }

    pub fn submit_registration(&mut self) {
        log_event("registration_submitted", json!({}));
        self.app.show_notice("Registration", REGISTRATION_DONE);
    }

    pub fn alternate_sign_in(&mut self) {
        self.app.show_notice("External sign-in", ALTERNATE_SIGN_IN);
    }

    pub fn dismiss_notice(&mut self) {
        self.app.dismiss_notice();
    }

    pub fn menu_up(&mut self) {
        handlers::menu_up(&mut self.app);
    }

    pub fn menu_down(&mut self) {
        handlers::menu_down(&mut self.app);
    }

    pub fn registration_input(&mut self, c: char) {
        handlers::registration_input(&mut self.app, c);
    }

    pub fn registration_backspace(&mut self) {
        handlers::registration_backspace(&mut self.app);
    }

    pub fn registration_next_field(&mut self) {
        handlers::registration_next_field(&mut self.app);
    }

    pub fn registration_prev_field(&mut self) {
        handlers::registration_prev_field(&mut self.app);
    }

    /// Apply whatever the live poll loop reported since the last call.
    /// Returns the number of outcomes applied.
    pub fn pump(&mut self) -> usize {
        let outcomes = self.poller.drain();
        if !self.app.is_active(Section::Dashboard) {
            return 0;
        }
        let now = Local::now();
        for outcome in &outcomes {
            match outcome {
                PollOutcome::Failed(err) => log_event("poll_failed", json!({ "error": err })),
                PollOutcome::Snapshot(s) if !s.connected => {
                    log_event("sensor_disconnected", json!({ "time": s.time }))
                }
                _ => {}
            }
            self.app.apply_outcome(outcome, now);
        }
        outcomes.len()
    }

    pub fn shutdown(&mut self) {
        self.poller.stop();
    }
}

impl Drop for ViewController {
    fn drop(&mut self) {
        self.shutdown();
    }
}
