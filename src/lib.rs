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

//! Envdash - terminal dashboard for environmental sensors
//!
//! This library polls an HTTP endpoint for temperature, humidity and light
//! readings, classifies them against fixed comfort bands and keeps the state
//! the TUI renders: active section, connectivity and per-metric warnings.

pub mod error;
pub mod thresholds;
pub mod source;
pub mod poller;
pub mod history;
pub mod menu;
pub mod app;
pub mod controller;
pub mod config;
pub mod logger;
pub mod handlers;
pub mod events;
pub mod ui;
pub mod cli;

#[cfg(test)]
pub mod test_utils;
