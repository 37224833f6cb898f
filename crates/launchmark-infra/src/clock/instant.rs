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

use launchmark_core::{MonotonicClock, TimerResult, Timestamp};
use std::time::Instant;

/// A portable monotonic clock built on [`std::time::Instant`].
///
/// Its epoch is the moment the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct InstantClock {
    anchor: Instant,
}

impl InstantClock {
    /// Creates a clock whose epoch is now.
    #[inline]
    pub fn new() -> Self {
        Self {
            anchor: Instant::now(),
        }
    }
}

impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock for InstantClock {
    fn now(&self) -> TimerResult<Timestamp> {
        let nanos = u64::try_from(self.anchor.elapsed().as_nanos()).unwrap_or(u64::MAX);
        Ok(Timestamp::from_nanos(nanos))
    }

    fn name(&self) -> &'static str {
        "instant"
    }
}
