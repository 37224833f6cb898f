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

//! Post-hoc analysis of recorded checkpoint histories.
//!
//! A phase is the interval between two markers. Each marker names a checkpoint
//! label and says whether its first or last occurrence counts, so a phase such as
//! "runtime init" can span from the first `main` checkpoint to the last
//! `initialize` checkpoint of a run.

use crate::report::ReportFormatter;
use anyhow::{bail, Context, Result};
use launchmark_core::time::whole_millis;
use launchmark_core::{Checkpoint, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Which occurrence of a matching checkpoint a marker refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Occurrence {
    /// The earliest matching checkpoint.
    #[default]
    First,
    /// The latest matching checkpoint.
    Last,
}

/// How a marker label is compared to checkpoint labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// The labels must be equal.
    #[default]
    Exact,
    /// The checkpoint label must contain the marker label.
    Contains,
}

/// One end of a phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Marker {
    /// The label to look for.
    pub label: String,
    /// Which occurrence counts.
    #[serde(default)]
    pub occurrence: Occurrence,
    /// How labels are compared.
    #[serde(default, rename = "match")]
    pub match_mode: MatchMode,
}

impl Marker {
    /// A marker on the first checkpoint labelled exactly `label`.
    pub fn first(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            occurrence: Occurrence::First,
            match_mode: MatchMode::Exact,
        }
    }

    /// A marker on the last checkpoint labelled exactly `label`.
    pub fn last(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            occurrence: Occurrence::Last,
            match_mode: MatchMode::Exact,
        }
    }

    /// Switches the marker to substring matching.
    pub fn containing(mut self) -> Self {
        self.match_mode = MatchMode::Contains;
        self
    }

    fn matches(&self, checkpoint: &Checkpoint) -> bool {
        match self.match_mode {
            MatchMode::Exact => checkpoint.label() == self.label,
            MatchMode::Contains => checkpoint.label().contains(self.label.as_str()),
        }
    }

    /// Finds the timestamp this marker points at, in recording order.
    pub fn resolve(&self, checkpoints: &[Checkpoint]) -> Option<Timestamp> {
        let mut matching = checkpoints.iter().filter(|c| self.matches(c));
        let found = match self.occurrence {
            Occurrence::First => matching.next(),
            Occurrence::Last => matching.last(),
        };
        found.map(Checkpoint::timestamp)
    }
}

/// A named interval between two markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhaseSpec {
    /// The phase name, used as the output key.
    pub name: String,
    /// Where the phase begins.
    pub start: Marker,
    /// Where the phase ends.
    pub end: Marker,
}

impl PhaseSpec {
    /// Creates a phase spec.
    pub fn new(name: impl Into<String>, start: Marker, end: Marker) -> Self {
        Self {
            name: name.into(),
            start,
            end,
        }
    }

    /// Measures this phase in `checkpoints`.
    ///
    /// Returns `None` if a marker is missing or the end precedes the start.
    pub fn measure(&self, checkpoints: &[Checkpoint]) -> Option<Duration> {
        let start = self.start.resolve(checkpoints)?;
        let end = self.end.resolve(checkpoints)?;
        end.checked_since(start)
    }
}

/// The measured duration of one phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseResult {
    /// The phase name.
    pub name: String,
    /// The duration, or `None` when the phase could not be measured.
    pub duration: Option<Duration>,
}

/// Renders as `<name>_ms=<whole milliseconds>` or `<name>_ms=N/A`.
impl Display for PhaseResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.duration {
            Some(duration) => write!(f, "{}_ms={}", self.name, whole_millis(duration)),
            None => write!(f, "{}_ms=N/A", self.name),
        }
    }
}

/// Measures every phase against the same history.
pub fn analyze(phases: &[PhaseSpec], checkpoints: &[Checkpoint]) -> Vec<PhaseResult> {
    phases
        .iter()
        .map(|phase| {
            let duration = phase.measure(checkpoints);
            if duration.is_none() {
                log::debug!("Phase '{}' could not be measured", phase.name);
            }
            PhaseResult {
                name: phase.name.clone(),
                duration,
            }
        })
        .collect()
}

/// Reads a checkpoint history from text.
///
/// Accepts either a JSON array of checkpoints (as written by a timer's history
/// export) or a captured report log, in which case lines are parsed with
/// `formatter` and everything that is not a checkpoint line is skipped.
pub fn read_history(text: &str, formatter: &ReportFormatter) -> Result<Vec<Checkpoint>> {
    let json_error = match serde_json::from_str::<Vec<Checkpoint>>(text) {
        Ok(checkpoints) => return Ok(checkpoints),
        Err(err) => err,
    };

    let checkpoints: Vec<_> = text
        .lines()
        .filter_map(|line| formatter.parse_line(line))
        .collect();
    if checkpoints.is_empty() && !text.trim().is_empty() {
        bail!(
            "input is neither a JSON checkpoint history ({json_error}) nor a '{}' report log",
            formatter.prefix()
        );
    }
    Ok(checkpoints)
}

/// Serializes a history in the format accepted by [`read_history`].
pub fn write_history(checkpoints: &[Checkpoint]) -> Result<String> {
    serde_json::to_string_pretty(checkpoints).context("Failed to serialize checkpoint history")
}
