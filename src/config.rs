// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Controller configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Directory created under the platform data directory.
const APP_DIR: &str = "casectl";

/// File name of the data file.
const DATA_FILE: &str = "state.json";

/// Data file used when the platform has no data directory.
const FALLBACK_DATA_FILE: &str = "casectl-state.json";

/// Default interval between transport polls.
pub const DEFAULT_TRANSMIT_INTERVAL: Duration = Duration::from_millis(30);

/// Default input prompt.
pub const DEFAULT_PROMPT: &str = "> ";

/// Configuration for a [`Controller`](crate::Controller).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use casectl::ControllerConfig;
///
/// let config = ControllerConfig::new("/dev/ttyACM0")
///     .with_data_file("/tmp/casectl.json")
///     .with_transmit_interval(Duration::from_millis(50));
///
/// assert_eq!(config.serial_port(), "/dev/ttyACM0");
/// assert_eq!(config.transmit_interval(), Duration::from_millis(50));
/// ```
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    serial_port: String,
    data_file: PathBuf,
    transmit_interval: Duration,
    prompt: String,
}

impl ControllerConfig {
    /// Creates a configuration for the given serial port with defaults for
    /// everything else.
    #[must_use]
    pub fn new(serial_port: impl Into<String>) -> Self {
        Self {
            serial_port: serial_port.into(),
            data_file: default_data_file(),
            transmit_interval: DEFAULT_TRANSMIT_INTERVAL,
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }

    /// Sets the data file path.
    #[must_use]
    pub fn with_data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = path.into();
        self
    }

    /// Sets the interval between transport polls.
    ///
    /// A zero interval is raised to one millisecond.
    #[must_use]
    pub fn with_transmit_interval(mut self, interval: Duration) -> Self {
        self.transmit_interval = interval.max(Duration::from_millis(1));
        self
    }

    /// Sets the input prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Returns the serial port name.
    #[must_use]
    pub fn serial_port(&self) -> &str {
        &self.serial_port
    }

    /// Returns the data file path.
    #[must_use]
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Returns the interval between transport polls.
    #[must_use]
    pub fn transmit_interval(&self) -> Duration {
        self.transmit_interval
    }

    /// Returns the input prompt.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

/// Returns `<data dir>/casectl/state.json`, or `./casectl-state.json` if
/// the platform has no data directory.
#[must_use]
pub fn default_data_file() -> PathBuf {
    dirs::data_dir().map_or_else(
        || PathBuf::from(FALLBACK_DATA_FILE),
        |mut path| {
            path.push(APP_DIR);
            path.push(DATA_FILE);
            path
        },
    )
}
