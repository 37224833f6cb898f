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

//! Destinations for formatted report lines.

mod log_sink;
mod memory;
mod stderr;

pub use log_sink::{LogSink, PERF_TARGET};
pub use memory::MemorySink;
pub use stderr::StderrSink;

use crate::report::ReportEvent;
use std::fmt::Debug;

/// Trait defining where a launch timer writes its reports.
///
/// Sinks are pure instrumentation: an implementation must swallow its own I/O
/// errors and must never panic.
pub trait ReportSink: Send + Sync + Debug {
    /// Writes one report. `line` is the rendered form of `event`.
    fn emit(&self, line: &str, event: &ReportEvent);
}
