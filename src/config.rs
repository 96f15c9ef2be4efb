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

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DashError, Result};
use crate::poller::DEFAULT_POLL_INTERVAL;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/data.php";
const MIN_POLL_INTERVAL_MS: u64 = 100;
const MAX_POLL_INTERVAL_MS: u64 = 3_600_000;

fn default_api_url() -> String { DEFAULT_API_URL.to_string() }
fn default_poll_interval_ms() -> u64 { DEFAULT_POLL_INTERVAL.as_millis() as u64 }

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DashConfig {
    /// Endpoint returning the sensor snapshot JSON
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl DashConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

pub fn config_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("envdash").join("config.json");
    }
    if let Ok(home) = env::var("HOME") {
        return Path::new(&home)
            .join(".config")
            .join("envdash")
            .join("config.json");
    }
    PathBuf::from("/etc/envdash/config.json")
}

pub fn load_config(path: &Path) -> Result<DashConfig> {
    let data = fs::read_to_string(path).map_err(|source| DashError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let cfg: DashConfig = serde_json::from_str(&data)?;
    validate_config(&cfg)?;
    Ok(cfg)
}

/// Missing file means defaults; a broken file is still an error
pub fn load_config_or_default(path: &Path) -> Result<DashConfig> {
    if !path.exists() {
        return Ok(DashConfig::default());
    }
    load_config(path)
}

pub fn save_config(path: &Path, cfg: &DashConfig) -> Result<()> {
    validate_config(cfg)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(cfg)?;
    fs::write(path, json)?;
    Ok(())
}

pub fn validate_config(cfg: &DashConfig) -> Result<()> {
    let url = cfg.api_url.trim();
    if url.is_empty() {
        return Err(DashError::invalid_config("api_url", "must not be empty"));
    }
    if url.len() > 2048 {
        return Err(DashError::invalid_config("api_url", "longer than 2048 characters"));
    }
    if url.chars().any(char::is_whitespace) {
        return Err(DashError::invalid_config("api_url", "must not contain whitespace"));
    }
    let rest = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
        .ok_or_else(|| DashError::invalid_config("api_url", "scheme must be http or https"))?;
    if rest.is_empty() || rest.starts_with('/') {
        return Err(DashError::invalid_config("api_url", "missing host"));
    }
    if !(MIN_POLL_INTERVAL_MS..=MAX_POLL_INTERVAL_MS).contains(&cfg.poll_interval_ms) {
        return Err(DashError::invalid_config(
            "poll_interval_ms",
            format!("must be between {} and {}", MIN_POLL_INTERVAL_MS, MAX_POLL_INTERVAL_MS),
        ));
    }
    Ok(())
}
