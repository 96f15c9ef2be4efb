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

//! Warning bands for the three dashboard metrics.
//!
//! Every metric has a fixed comfort band. Readings strictly below the lower
//! bound or strictly above the upper bound raise a warning; the bounds
//! themselves are normal.

pub const TEMPERATURE_MIN_C: f64 = 18.0;
pub const TEMPERATURE_MAX_C: f64 = 25.0;
pub const HUMIDITY_MIN_PCT: f64 = 40.0;
pub const HUMIDITY_MAX_PCT: f64 = 60.0;
pub const LIGHT_MIN_LUX: f64 = 50.0;
pub const LIGHT_MAX_LUX: f64 = 500.0;

const _: () = assert!(TEMPERATURE_MIN_C < TEMPERATURE_MAX_C);
const _: () = assert!(HUMIDITY_MIN_PCT < HUMIDITY_MAX_PCT);
const _: () = assert!(LIGHT_MIN_LUX < LIGHT_MAX_LUX);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Metric {
    Temperature,
    Humidity,
    Light,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Temperature, Metric::Humidity, Metric::Light];

    /// (lower, upper) comfort band
    pub fn band(self) -> (f64, f64) {
        match self {
            Metric::Temperature => (TEMPERATURE_MIN_C, TEMPERATURE_MAX_C),
            Metric::Humidity => (HUMIDITY_MIN_PCT, HUMIDITY_MAX_PCT),
            Metric::Light => (LIGHT_MIN_LUX, LIGHT_MAX_LUX),
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Metric::Temperature => "°C",
            Metric::Humidity => "%",
            Metric::Light => " lux",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::Temperature => "Temperature",
            Metric::Humidity => "Humidity",
            Metric::Light => "Light",
        }
    }

    fn decimals(self) -> usize {
        match self {
            Metric::Temperature | Metric::Humidity => 1,
            Metric::Light => 0,
        }
    }

    /// Round a raw reading the way it is shown on screen.
    ///
    /// Returns the display text and the value parsed back from it, so the
    /// warning band is decided on exactly what the user sees.
    pub fn round_for_display(self, raw: f64) -> Option<(String, f64)> {
        if !raw.is_finite() {
            return None;
        }
        let text = format!("{:.*}", self.decimals(), raw);
        let rounded = text.parse::<f64>().unwrap_or(raw);
        Some((text, rounded))
    }

    fn low_word(self) -> &'static str {
        match self {
            Metric::Temperature => "too cold",
            Metric::Humidity => "too low",
            Metric::Light => "too dark",
        }
    }

    fn high_word(self) -> &'static str {
        match self {
            Metric::Temperature => "too hot",
            Metric::Humidity => "too high",
            Metric::Light => "too bright",
        }
    }
}

/// Outcome of classifying one reading against its band.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub enum WarningState {
    #[default]
    None,
    Below(f64),
    Above(f64),
}

impl WarningState {
    pub fn is_active(&self) -> bool {
        !matches!(self, WarningState::None)
    }

    /// Banner text, `None` when there is nothing to warn about
    pub fn message(&self, metric: Metric) -> Option<String> {
        let (word, value) = match *self {
            WarningState::None => return None,
            WarningState::Below(v) => (metric.low_word(), v),
            WarningState::Above(v) => (metric.high_word(), v),
        };
        Some(format!(
            "WARNING: {} {} ({}{})!",
            metric.label().to_lowercase(),
            word,
            value,
            metric.unit()
        ))
    }
}

/// Classify a reading. Missing or non-finite values are never classified.
pub fn classify(metric: Metric, value: Option<f64>) -> WarningState {
    let v = match value {
        Some(v) if v.is_finite() => v,
        _ => return WarningState::None,
    };
    let (low, high) = metric.band();
    if v < low {
        WarningState::Below(v)
    } else if v > high {
        WarningState::Above(v)
    } else {
        WarningState::None
    }
}
