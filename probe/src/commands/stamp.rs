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

use anyhow::Result;
use launchmark_core::{ClockKind, MonotonicClock, TimerError};
use launchmark_infra::clock_for;
use launchmark_telemetry::LaunchmarkConfig;
use std::io::Write;

/// Prints one absolute reading of `clock` (or the configured clock).
///
/// A failed read still prints a line with the error code; it is not an error
/// for the command.
pub fn run(
    config: &LaunchmarkConfig,
    label: &str,
    clock: Option<ClockKind>,
    out: &mut impl Write,
) -> Result<()> {
    let clock = clock_for(clock.unwrap_or(config.timer.clock));
    writeln!(out, "{}", stamp_line(&config.timer.prefix, label, clock.as_ref()))?;
    Ok(())
}

fn stamp_line(prefix: &str, label: &str, clock: &dyn MonotonicClock) -> String {
    let name = clock.name();
    match clock.now() {
        Ok(now) => format!("{prefix} {label} - clock={name} return=0, at {now}"),
        Err(TimerError::ClockUnavailable { code, .. }) => {
            format!("{prefix} {label} - clock={name} return={code}, at N/A")
        }
        Err(err) => format!("{prefix} {label} - clock={name} {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use launchmark_core::{ManualClock, Timestamp};

    #[test]
    fn test_stamp_line_formats_reading() {
        let clock = ManualClock::new();
        clock.set(Timestamp::from_timespec(42, 1_500));
        assert_eq!(
            stamp_line("[PERF]", "didFinishLaunching: END", &clock),
            "[PERF] didFinishLaunching: END - clock=manual return=0, at 42.000001500"
        );
    }

    #[test]
    fn test_stamp_line_reports_failure_code() {
        let clock = ManualClock::new();
        clock.fail_next(22);
        assert_eq!(
            stamp_line("[PERF]", "end", &clock),
            "[PERF] end - clock=manual return=22, at N/A"
        );
    }

    #[test]
    fn test_run_uses_requested_clock() -> Result<()> {
        let mut out = Vec::new();
        run(
            &LaunchmarkConfig::default(),
            "now",
            Some(ClockKind::Instant),
            &mut out,
        )?;
        let line = String::from_utf8(out)?;
        assert!(line.starts_with("[PERF] now - clock=instant return=0, at "));
        Ok(())
    }
}
