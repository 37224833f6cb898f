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
use launchmark_telemetry::{analyze, read_history, LaunchmarkConfig, ReportFormatter};
use std::io::Write;
use std::path::Path;

/// Prints one `<phase>_ms=<value>` line per configured phase, as simple
/// key=value pairs for shell scripts.
pub fn run(config: &LaunchmarkConfig, input: &Path, out: &mut impl Write) -> Result<()> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read '{}'", input.display()))?;
    let formatter = ReportFormatter::new(config.timer.prefix.clone(), config.timer.unit);
    let checkpoints = read_history(&text, &formatter)
        .with_context(|| format!("Failed to load checkpoints from '{}'", input.display()))?;
    log::debug!(
        "Loaded {} checkpoint(s) from {}",
        checkpoints.len(),
        input.display()
    );

    for result in analyze(&config.phases, &checkpoints) {
        writeln!(out, "{result}")?;
    }
    Ok(())
}
