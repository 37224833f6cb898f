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

//! # Launchmark Infra
//!
//! Concrete implementations of the contracts defined in `launchmark-core`.
//! Each platform gets its own [`MonotonicClock`](launchmark_core::MonotonicClock)
//! implementation; [`clock::clock_for`] picks the right one at runtime.

#![warn(missing_docs)]

pub mod clock;

pub use clock::{clock_for, default_clock, try_clock, InstantClock};

#[cfg(unix)]
pub use clock::PosixClock;
