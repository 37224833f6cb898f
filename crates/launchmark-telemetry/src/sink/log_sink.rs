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

use super::ReportSink;
use crate::report::ReportEvent;

/// The `log` target used for report lines.
pub const PERF_TARGET: &str = "launchmark::perf";

/// Forwards report lines to the `log` facade.
///
/// Checkpoints are logged at `info`, failures at `warn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl ReportSink for LogSink {
    fn emit(&self, line: &str, event: &ReportEvent) {
        match event {
            ReportEvent::Checkpoint(_) => log::info!(target: PERF_TARGET, "{line}"),
            ReportEvent::Failure { .. } => log::warn!(target: PERF_TARGET, "{line}"),
        }
    }
}
