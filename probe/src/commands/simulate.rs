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

use anyhow::{Context, Result};
use launchmark_infra::clock_for;
use launchmark_telemetry::phases::write_history;
use launchmark_telemetry::{analyze, LaunchTimer, LaunchmarkConfig};
use std::io::Write;
use std::path::Path;
use std::thread;
use std::time::Duration;

/// Plays the role of an application lifecycle host.
///
/// Marks `launch begin`, runs a bracketed `framework init` phase made of
/// `steps` sleeps of `step_ms` each, marks `launch end`, then prints the
/// configured phases.
pub fn run(
    config: &LaunchmarkConfig,
    steps: u32,
    step_ms: u64,
    history: Option<&Path>,
    out: &mut impl Write,
) -> Result<()> {
    let timer = LaunchTimer::from_config(&config.timer, clock_for(config.timer.clock));
    log::debug!(
        "Simulating launch with {steps} step(s) of {step_ms} ms on clock '{}'",
        timer.clock_name()
    );
    simulate_launch(&timer, steps, Duration::from_millis(step_ms));

    let checkpoints = timer.history();
    if let Some(path) = history {
        std::fs::write(path, write_history(&checkpoints)?)
            .with_context(|| format!("Failed to write history to '{}'", path.display()))?;
        log::info!(
            "Wrote {} checkpoint(s) to {}",
            checkpoints.len(),
            path.display()
        );
    }

    for result in analyze(&config.phases, &checkpoints) {
        writeln!(out, "{result}")?;
    }
    Ok(())
}

fn simulate_launch(timer: &LaunchTimer, steps: u32, step: Duration) {
    timer.checkpoint("launch begin");
    {
        let _init = timer.scope("framework init");
        for i in 1..=steps {
            thread::sleep(step);
            timer.checkpoint(&format!("framework init step {i}"));
        }
    }
    timer.checkpoint("launch end");
}

#[cfg(test)]
mod tests {
    use super::*;
    use launchmark_telemetry::read_history;
    use tempfile::tempdir;

    #[test]
    fn test_simulate_writes_history_and_phases() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("history.json");
        let config = LaunchmarkConfig::default();

        let mut out = Vec::new();
        run(&config, 2, 5, Some(&path), &mut out)?;

        let text = String::from_utf8(out)?;
        let line = text.lines().next().expect("one phase line");
        let ms: u64 = line
            .strip_prefix("launch_ms=")
            .expect("launch phase")
            .parse()?;
        assert!(ms >= 10, "two 5 ms steps should take at least 10 ms, got {ms}");

        let history = read_history(&std::fs::read_to_string(&path)?, &Default::default())?;
        let labels: Vec<_> = history.iter().map(|c| c.label()).collect();
        assert_eq!(
            labels,
            vec![
                "launch begin",
                "framework init: BEGIN",
                "framework init step 1",
                "framework init step 2",
                "framework init: END",
                "launch end",
            ]
        );
        Ok(())
    }
}
