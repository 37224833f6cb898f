// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Launchmark configuration.
//!
//! Represents the structure of a `launchmark.toml` file:
//!
//! ```toml
//! [timer]
//! unit = "us"
//! clock = "monotonic-raw"
//! prefix = "[PERF]"
//! sinks = ["stderr"]
//!
//! [[phases]]
//! name = "launch"
//! start = { label = "launch begin", occurrence = "first" }
//! end = { label = "launch end", occurrence = "last" }
//! ```

use crate::phases::{Marker, PhaseSpec};
use crate::report::DEFAULT_PREFIX;
use anyhow::{Context, Result};
use launchmark_core::{ClockKind, TimeUnit};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

/// Where a timer writes its report lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// Standard error.
    Stderr,
    /// The `log` facade.
    Log,
}

/// The `[timer]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimerConfig {
    /// Unit deltas are reported in.
    pub unit: TimeUnit,
    /// Which monotonic clock to read.
    pub clock: ClockKind,
    /// Prefix of every report line.
    pub prefix: String,
    /// Report destinations.
    pub sinks: Vec<SinkKind>,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            unit: TimeUnit::Microseconds,
            clock: ClockKind::MonotonicRaw,
            prefix: DEFAULT_PREFIX.to_string(),
            sinks: vec![SinkKind::Stderr],
        }
    }
}

/// The whole configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LaunchmarkConfig {
    /// Timer settings.
    pub timer: TimerConfig,
    /// Phases measured by the analyzer.
    pub phases: Vec<PhaseSpec>,
}

impl Default for LaunchmarkConfig {
    /// Provides a default configuration if no config file is found.
    ///
    /// The default measures a single `launch` phase from the first
    /// `launch begin` checkpoint to the last `launch end` checkpoint.
    fn default() -> Self {
        Self {
            timer: TimerConfig::default(),
            phases: vec![PhaseSpec::new(
                "launch",
                Marker::first("launch begin"),
                Marker::last("launch end"),
            )],
        }
    }
}

impl LaunchmarkConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("Invalid launchmark configuration")
    }

    /// Loads the configuration at `path`, or the default if the file does not exist.
    ///
    /// Any other read failure (permissions, a directory in place of a file) is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!(
                    "No configuration at {}, using defaults",
                    path.display()
                );
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()));
            }
        };
        let config = Self::from_toml_str(&text)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        log::debug!(
            "Loaded {} with {} phase(s)",
            path.display(),
            config.phases.len()
        );
        Ok(config)
    }

    /// Serializes the configuration back to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize launchmark configuration")
    }
}
