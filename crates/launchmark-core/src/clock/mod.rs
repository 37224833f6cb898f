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

//! The platform clock contract.
//!
//! Launch timing needs a time source that never goes backwards and is immune to
//! wall-clock adjustments. This module defines that contract as a trait so the
//! timer logic stays portable: `launchmark-infra` implements it once per target
//! platform, and tests drive the timer with a [`ManualClock`].

pub mod manual;

pub use manual::ManualClock;

use crate::error::TimerResult;
use crate::time::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};
use std::str::FromStr;

/// A source of monotonically non-decreasing timestamps.
pub trait MonotonicClock: Send + Sync + Debug {
    /// Reads the current time.
    ///
    /// Returns [`TimerError::ClockUnavailable`](crate::TimerError::ClockUnavailable)
    /// if the underlying OS call reports an error.
    fn now(&self) -> TimerResult<Timestamp>;

    /// A short, stable name used in diagnostics (e.g. "monotonic-raw").
    fn name(&self) -> &'static str;
}

/// Selects which kind of monotonic clock backs a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClockKind {
    /// `CLOCK_MONOTONIC`: slewed by NTP, never stepped.
    Monotonic,
    /// `CLOCK_MONOTONIC_RAW`: hardware-based, not subject to NTP slewing.
    #[default]
    MonotonicRaw,
    /// The standard library's `Instant`, available on every platform.
    Instant,
}

impl ClockKind {
    /// Every supported kind, in order of preference.
    pub const ALL: [ClockKind; 3] = [
        ClockKind::MonotonicRaw,
        ClockKind::Monotonic,
        ClockKind::Instant,
    ];

    /// The name used in configuration files and on the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            ClockKind::Monotonic => "monotonic",
            ClockKind::MonotonicRaw => "monotonic-raw",
            ClockKind::Instant => "instant",
        }
    }
}

impl Display for ClockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClockKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClockKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                format!("unknown clock '{s}' (expected monotonic, monotonic-raw or instant)")
            })
    }
}
