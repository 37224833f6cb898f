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

//! Monotonic timestamps and the units they are reported in.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::time::Duration;

const NANOS_PER_SEC: u64 = 1_000_000_000;
const NANOS_PER_MICRO: u64 = 1_000;
const NANOS_PER_MILLI: u64 = 1_000_000;

/// A point on a monotonic timeline, stored as nanoseconds since an arbitrary epoch.
///
/// The epoch depends on the clock that produced the reading (boot time for
/// `CLOCK_MONOTONIC`, construction time for an `Instant`-anchored clock), so two
/// timestamps are only comparable when they come from the same clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The epoch of the clock.
    pub const ZERO: Timestamp = Timestamp(0);

    /// Creates a timestamp from a raw nanosecond count.
    #[inline]
    pub const fn from_nanos(nanos: u64) -> Self {
        Self(nanos)
    }

    /// Creates a timestamp from a microsecond count.
    #[inline]
    pub const fn from_micros(micros: u64) -> Self {
        Self(micros.saturating_mul(NANOS_PER_MICRO))
    }

    /// Creates a timestamp from a `timespec`-style pair.
    ///
    /// Negative components, which a conforming clock never returns, clamp to zero.
    pub fn from_timespec(secs: i64, nanos: i64) -> Self {
        let secs = u64::try_from(secs).unwrap_or(0);
        let nanos = u64::try_from(nanos).unwrap_or(0);
        Self(secs.saturating_mul(NANOS_PER_SEC).saturating_add(nanos))
    }

    /// Returns the raw nanosecond count.
    #[inline]
    pub const fn as_nanos(self) -> u64 {
        self.0
    }

    /// Returns the whole seconds part of the timestamp.
    #[inline]
    pub const fn secs(self) -> u64 {
        self.0 / NANOS_PER_SEC
    }

    /// Returns the sub-second nanoseconds part of the timestamp.
    #[inline]
    pub const fn subsec_nanos(self) -> u32 {
        (self.0 % NANOS_PER_SEC) as u32
    }

    /// Elapsed time from `earlier` to `self`, saturating at zero if `earlier` is later.
    #[inline]
    pub fn saturating_since(self, earlier: Timestamp) -> Duration {
        Duration::from_nanos(self.0.saturating_sub(earlier.0))
    }

    /// Elapsed time from `earlier` to `self`, or `None` if `earlier` is later.
    #[inline]
    pub fn checked_since(self, earlier: Timestamp) -> Option<Duration> {
        self.0.checked_sub(earlier.0).map(Duration::from_nanos)
    }

    /// Returns this timestamp moved forward by `delta`.
    pub fn saturating_add(self, delta: Duration) -> Self {
        let nanos = u64::try_from(delta.as_nanos()).unwrap_or(u64::MAX);
        Self(self.0.saturating_add(nanos))
    }
}

/// Displays as `<seconds>.<nanoseconds:09>`, the layout of a raw `timespec` dump.
impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{:09}", self.secs(), self.subsec_nanos())
    }
}

/// The unit used when rendering deltas in report lines.
///
/// Configuration files and [`FromStr`] accept the same spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeUnit {
    /// Microseconds, rendered as `us`.
    #[default]
    #[serde(rename = "us", alias = "micros", alias = "microseconds")]
    Microseconds,
    /// Nanoseconds, rendered as `ns`.
    #[serde(rename = "ns", alias = "nanos", alias = "nanoseconds")]
    Nanoseconds,
}

impl TimeUnit {
    /// The suffix printed after a value in this unit.
    pub const fn suffix(self) -> &'static str {
        match self {
            TimeUnit::Microseconds => "us",
            TimeUnit::Nanoseconds => "ns",
        }
    }

    /// Converts a duration into a whole count of this unit, truncating.
    pub fn count(self, duration: Duration) -> u64 {
        let nanos = duration.as_nanos();
        let count = match self {
            TimeUnit::Microseconds => nanos / u128::from(NANOS_PER_MICRO),
            TimeUnit::Nanoseconds => nanos,
        };
        u64::try_from(count).unwrap_or(u64::MAX)
    }

    /// Converts a whole count of this unit back into a duration.
    pub fn duration(self, count: u64) -> Duration {
        match self {
            TimeUnit::Microseconds => Duration::from_micros(count),
            TimeUnit::Nanoseconds => Duration::from_nanos(count),
        }
    }
}

impl Display for TimeUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for TimeUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "us" | "micros" | "microseconds" => Ok(TimeUnit::Microseconds),
            "ns" | "nanos" | "nanoseconds" => Ok(TimeUnit::Nanoseconds),
            other => Err(format!("unknown time unit '{other}' (expected 'us' or 'ns')")),
        }
    }
}

/// Whole milliseconds in `duration`, truncating.
pub fn whole_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_nanos() / u128::from(NANOS_PER_MILLI)).unwrap_or(u64::MAX)
}
