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

//! # Launchmark Core
//!
//! Foundational crate containing the traits, core types, and error contracts
//! shared by every launch-timing component.
//!
//! This crate defines the abstract "what" of launch timing: what a timestamp is,
//! what a checkpoint records, and what a monotonic clock must provide.
//! `launchmark-infra` supplies concrete platform clocks and
//! `launchmark-telemetry` builds the launch timer on top of both.

#![warn(missing_docs)]

pub mod checkpoint;
pub mod clock;
pub mod error;
pub mod time;

pub use checkpoint::Checkpoint;
pub use clock::{ClockKind, ManualClock, MonotonicClock};
pub use error::{TimerError, TimerResult};
pub use time::{TimeUnit, Timestamp};
