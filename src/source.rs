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

//! Sensor snapshot wire format and the sources that produce it.

use serde::{Deserialize, Deserializer};

use crate::error::{DashError, Result};
use crate::thresholds::Metric;

/// One reading of all three metrics as reported by the sensor endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SensorSnapshot {
    #[serde(default)]
    pub connected: bool,
    #[serde(default, deserialize_with = "lenient_number")]
    pub temperature: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub humidity: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub light: Option<f64>,
    #[serde(default)]
    pub time: String,
}

impl SensorSnapshot {
    pub fn reading(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Temperature => self.temperature,
            Metric::Humidity => self.humidity,
            Metric::Light => self.light,
        }
    }

    pub fn disconnected() -> Self {
        Self::default()
    }
}

// A garbage reading must not poison the rest of the snapshot
fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_f64)
        .filter(|v| v.is_finite()))
}

pub fn parse_snapshot(body: &str) -> Result<SensorSnapshot> {
    serde_json::from_str(body).map_err(|e| DashError::Decode(e.to_string()))
}

/// Anything that can hand out one snapshot per call.
#[cfg_attr(test, mockall::automock)]
pub trait SensorSource: Send + Sync {
    fn fetch(&self) -> Result<SensorSnapshot>;

    /// Human readable origin, used in logs and the header
    fn describe(&self) -> String;
}

/// Plain HTTP GET against a fixed URL.
pub struct HttpSensorSource {
    url: String,
    client: reqwest::blocking::Client,
}

impl HttpSensorSource {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("envdash/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { url: url.into(), client })
    }
}

impl SensorSource for HttpSensorSource {
    fn fetch(&self) -> Result<SensorSnapshot> {
        let response = self.client.get(&self.url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(DashError::Status { status: status.as_u16() });
        }
        let body = response.text()?;
        parse_snapshot(&body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}
