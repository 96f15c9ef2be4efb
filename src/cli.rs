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

//! Command Line Interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::app::PLACEHOLDER;
use crate::config::{config_path, load_config_or_default, validate_config, DashConfig};
use crate::error::Result;
use crate::source::SensorSnapshot;
use crate::thresholds::{classify, Metric};

#[derive(Parser, Debug)]
#[command(name = "envdash")]
#[command(version)]
#[command(about = "Envdash - terminal dashboard for temperature, humidity and light sensors")]
#[command(long_about = "Envdash - terminal dashboard for temperature, humidity and light sensors

Polls a sensor endpoint every few seconds and flags readings outside
their comfort band.

EXAMPLES:
    envdash                                      Launch the dashboard
    envdash --url http://10.0.0.5/data.php       Use another endpoint
    envdash fetch                                Print one classified reading
    envdash init-config                          Write the default config file

FILES:
    ~/.config/envdash/config.json        Endpoint and poll interval
    ~/.local/state/envdash/logs.json     Event log (with --logging)")]
pub struct Cli {
    /// Sensor endpoint URL (overrides the config file)
    #[arg(long)]
    pub url: Option<String>,

    /// Poll interval in milliseconds (overrides the config file)
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Config file to read instead of the default location
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Append JSON-lines events to the log file
    #[arg(long)]
    pub logging: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Fetch one snapshot, classify it and exit
    Fetch,
    /// Write the effective configuration to the config file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    pub fn config_file(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(config_path)
    }

    /// Config file values with command line overrides applied on top
    pub fn resolve_config(&self) -> Result<DashConfig> {
        let mut cfg = load_config_or_default(&self.config_file())?;
        if let Some(url) = &self.url {
            cfg.api_url = url.clone();
        }
        if let Some(ms) = self.interval_ms {
            cfg.poll_interval_ms = ms;
        }
        validate_config(&cfg)?;
        Ok(cfg)
    }
}

/// One line per metric, as printed by `envdash fetch`
pub fn describe_snapshot(snapshot: &SensorSnapshot) -> Vec<String> {
    if !snapshot.connected {
        return vec!["sensor not connected".to_string()];
    }
    Metric::ALL
        .iter()
        .map(|&metric| {
            let shown = snapshot
                .reading(metric)
                .and_then(|v| metric.round_for_display(v));
            let (text, note) = match shown {
                Some((text, rounded)) => (
                    format!("{}{}", text, metric.unit()),
                    classify(metric, Some(rounded))
                        .message(metric)
                        .unwrap_or_else(|| "ok".to_string()),
                ),
                None => (PLACEHOLDER.to_string(), "no reading".to_string()),
            };
            format!("{:<12} {:>10}  {}", metric.label(), text, note)
        })
        .chain(std::iter::once(format!("{:<12} {:>10}", "Time", snapshot.time)))
        .collect()
}
