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

//! # Launchmark Telemetry
//!
//! The launch timer and everything around it: formatted checkpoint reports, the
//! sinks they are written to, post-hoc phase analysis of recorded histories, and
//! the TOML configuration that wires a timer together.

#![warn(missing_docs)]

pub mod config;
pub mod phases;
pub mod report;
pub mod sink;
pub mod timer;

pub use config::{LaunchmarkConfig, SinkKind, TimerConfig};
pub use phases::{analyze, read_history, Marker, MatchMode, Occurrence, PhaseResult, PhaseSpec};
pub use report::{CheckpointReport, ReportEvent, ReportFormatter};
pub use sink::{LogSink, MemorySink, ReportSink, StderrSink};
pub use timer::{LaunchTimer, LaunchTimerBuilder, PhaseGuard, TimerState};
