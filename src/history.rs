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

//! Read-only history table. The dataset is illustrative and fixed; nothing
//! is recorded or persisted.

pub const NO_HISTORY_TEXT: &str = "No history data.";

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRecord {
    pub time: String,
    pub temperature: f64,
    pub humidity: f64,
    pub light: f64,
}

impl HistoryRecord {
    pub fn new(time: &str, temperature: f64, humidity: f64, light: f64) -> Self {
        Self { time: time.to_string(), temperature, humidity, light }
    }

    /// Cells in column order: time, temperature, humidity, light
    pub fn cells(&self) -> [String; 4] {
        [
            self.time.clone(),
            self.temperature.to_string(),
            self.humidity.to_string(),
            self.light.to_string(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HistoryRow {
    Record(HistoryRecord),
    /// Placeholder spanning the whole table
    NoData,
}

pub fn sample_history() -> Vec<HistoryRecord> {
    vec![
        HistoryRecord::new("2025-01-15 10:00:00", 22.5, 55.2, 300.0),
        HistoryRecord::new("2025-01-15 10:03:00", 23.1, 56.0, 310.0),
        HistoryRecord::new("2025-01-15 10:06:00", 21.8, 54.5, 290.0),
    ]
}

/// One row per record in the given order, or a single `NoData` row.
pub fn history_rows(records: &[HistoryRecord]) -> Vec<HistoryRow> {
    if records.is_empty() {
        return vec![HistoryRow::NoData];
    }
    records.iter().cloned().map(HistoryRow::Record).collect()
}
