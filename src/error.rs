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

//! Unified error handling for Envdash
//!
//! A single error type shared by the sensor source, the configuration layer
//! and the view controller.

use std::io;
use std::path::PathBuf;

/// Result type alias using DashError
pub type Result<T> = std::result::Result<T, DashError>;

#[derive(thiserror::Error, Debug)]
pub enum DashError {
    // ============================================================================
    // Sensor source errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Sensor endpoint returned status {status}")]
    Status {
        status: u16,
    },

    #[error("Malformed sensor payload: {0}")]
    Decode(String),

    // ============================================================================
    // Configuration errors
    // ============================================================================
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: io::Error,
    },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid configuration value for {field}: {reason}")]
    InvalidConfig {
        field: String,
        reason: String,
    },

    // ============================================================================
    // View state errors
    // ============================================================================
    #[error("Dashboard has not been entered yet")]
    NotEntered,
}

impl DashError {
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
