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

//! Checkpoint reports and their one-line textual form.

use launchmark_core::{Checkpoint, TimeUnit, TimerError, Timestamp};
use std::borrow::Cow;
use std::time::Duration;

/// The default prefix of every report line.
pub const DEFAULT_PREFIX: &str = "[PERF]";

const TOTAL_SEPARATOR: &str = " Total: ";

/// The outcome of one successfully recorded checkpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckpointReport {
    /// The checkpoint label.
    pub label: String,
    /// The monotonic reading taken for this checkpoint.
    pub at: Timestamp,
    /// Time elapsed since the previous checkpoint (zero for the first one).
    pub since_last: Duration,
    /// Time elapsed since the first checkpoint (zero for the first one).
    pub since_start: Duration,
}

/// What a timer hands to its sinks for every checkpoint attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    /// The checkpoint was recorded.
    Checkpoint(CheckpointReport),
    /// The checkpoint could not be recorded; timer state is unchanged.
    Failure {
        /// The label the caller passed, possibly empty.
        label: String,
        /// Why recording failed.
        error: TimerError,
    },
}

impl ReportEvent {
    /// Returns the checkpoint report, if this event is a success.
    pub fn as_report(&self) -> Option<&CheckpointReport> {
        match self {
            ReportEvent::Checkpoint(report) => Some(report),
            ReportEvent::Failure { .. } => None,
        }
    }
}

// Rejected labels still reach the report, so keep the line on one line.
fn escape_controls(label: &str) -> Cow<'_, str> {
    if !label.chars().any(char::is_control) {
        return Cow::Borrowed(label);
    }
    Cow::Owned(
        label
            .chars()
            .map(|c| {
                if c.is_control() {
                    c.escape_default().to_string()
                } else {
                    c.to_string()
                }
            })
            .collect(),
    )
}

/// Renders report events as lines and reads them back.
///
/// A checkpoint renders as `<prefix> <label>: <since_last> <unit> Total: <since_start> <unit>`,
/// a failure as `<prefix> <label>: <error>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFormatter {
    prefix: String,
    unit: TimeUnit,
}

impl ReportFormatter {
    /// Creates a formatter with the given line prefix and unit.
    pub fn new(prefix: impl Into<String>, unit: TimeUnit) -> Self {
        Self {
            prefix: prefix.into(),
            unit,
        }
    }

    /// The line prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The unit deltas are rendered in.
    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// Renders one event.
    pub fn format(&self, event: &ReportEvent) -> String {
        match event {
            ReportEvent::Checkpoint(report) => {
                let unit = self.unit;
                format!(
                    "{} {}: {} {unit}{TOTAL_SEPARATOR}{} {unit}",
                    self.prefix,
                    report.label,
                    unit.count(report.since_last),
                    unit.count(report.since_start),
                )
            }
            ReportEvent::Failure { label, error } => {
                let label = if label.trim().is_empty() {
                    Cow::Borrowed("<empty label>")
                } else {
                    escape_controls(label)
                };
                format!("{} {label}: {error}", self.prefix)
            }
        }
    }

    /// Rebuilds a checkpoint from a line produced by [`ReportFormatter::format`].
    ///
    /// The line may carry leading text (a log header, for instance) before the
    /// prefix. The returned timestamp is the `Total` value, i.e. relative to the
    /// first checkpoint of the run. Failure lines and unrelated text yield `None`.
    pub fn parse_line(&self, line: &str) -> Option<Checkpoint> {
        let start = line.find(&self.prefix)?;
        let body = line[start + self.prefix.len()..].strip_prefix(' ')?;
        let (head, total) = body.rsplit_once(TOTAL_SEPARATOR)?;
        let (label, since_last) = head.rsplit_once(": ")?;

        self.parse_quantity(since_last)?;
        let total = self.parse_quantity(total)?;
        Checkpoint::new(label, Timestamp::ZERO.saturating_add(self.unit.duration(total))).ok()
    }

    fn parse_quantity(&self, text: &str) -> Option<u64> {
        let value = text.trim_end().strip_suffix(self.unit.suffix())?;
        value.trim_end().parse().ok()
    }
}

impl Default for ReportFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX, TimeUnit::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(label: &str, since_last_us: u64, since_start_us: u64) -> ReportEvent {
        ReportEvent::Checkpoint(CheckpointReport {
            label: label.to_string(),
            at: Timestamp::from_micros(1000 + since_start_us),
            since_last: Duration::from_micros(since_last_us),
            since_start: Duration::from_micros(since_start_us),
        })
    }

    #[test]
    fn test_checkpoint_line_format() {
        let formatter = ReportFormatter::default();
        assert_eq!(
            formatter.format(&report("mid", 500, 500)),
            "[PERF] mid: 500 us Total: 500 us"
        );

        let ns = ReportFormatter::new("[BOOT]", TimeUnit::Nanoseconds);
        assert_eq!(
            ns.format(&report("end", 2700, 3200)),
            "[BOOT] end: 2700000 ns Total: 3200000 ns"
        );
    }

    #[test]
    fn test_failure_line_format() {
        let formatter = ReportFormatter::default();
        let event = ReportEvent::Failure {
            label: "launch end".into(),
            error: TimerError::ClockUnavailable {
                clock: "monotonic",
                code: 22,
            },
        };
        assert_eq!(
            formatter.format(&event),
            "[PERF] launch end: clock 'monotonic' unavailable (error code 22)"
        );

        let event = ReportEvent::Failure {
            label: String::new(),
            error: TimerError::InvalidArgument("checkpoint label must not be empty".into()),
        };
        assert_eq!(
            formatter.format(&event),
            "[PERF] <empty label>: invalid argument: checkpoint label must not be empty"
        );

        let event = ReportEvent::Failure {
            label: "mid\nsecond\r".into(),
            error: TimerError::InvalidArgument("bad label".into()),
        };
        assert_eq!(
            formatter.format(&event),
            "[PERF] mid\\nsecond\\r: invalid argument: bad label"
        );
    }

    #[test]
    fn test_parse_line_reads_back_formatted_reports() {
        let formatter = ReportFormatter::default();
        let label = "RuntimeInit - didFinishLaunchingWithOptions: END";
        let line = formatter.format(&report(label, 2700, 3200));

        let checkpoint = formatter.parse_line(&line).expect("line should parse");
        assert_eq!(checkpoint.label(), label);
        assert_eq!(checkpoint.timestamp(), Timestamp::from_micros(3200));
    }

    #[test]
    fn test_parse_line_skips_log_headers_and_noise() {
        let formatter = ReportFormatter::default();
        let logged = "[2026-10-18T09:00:00Z INFO  launchmark::perf] [PERF] begin: 0 us Total: 0 us";
        let checkpoint = formatter.parse_line(logged).unwrap();
        assert_eq!(checkpoint.label(), "begin");
        assert_eq!(checkpoint.timestamp(), Timestamp::ZERO);

        assert!(formatter.parse_line("unrelated output").is_none());
        assert!(formatter
            .parse_line("[PERF] end: clock 'monotonic' unavailable (error code 22)")
            .is_none());
        // Unit mismatch: a nanosecond log read with a microsecond formatter.
        assert!(formatter.parse_line("[PERF] end: 5 ns Total: 9 ns").is_none());
    }
}
