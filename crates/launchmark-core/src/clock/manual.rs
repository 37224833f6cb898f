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

//! A hand-driven clock for tests and replays.

use super::MonotonicClock;
use crate::error::{TimerError, TimerResult};
use crate::time::Timestamp;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

#[derive(Debug, Default)]
struct ManualState {
    current: Timestamp,
    script: VecDeque<TimerResult<Timestamp>>,
}

/// A clock whose readings are set explicitly.
///
/// Readings come from a scripted queue first (see [`ManualClock::push`] and
/// [`ManualClock::fail_next`]); once the queue is drained, every read returns
/// the current value set with [`ManualClock::set`] or [`ManualClock::advance`].
/// Clones share the same state, so a test can keep a handle while the timer owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    state: Arc<Mutex<ManualState>>,
}

impl ManualClock {
    /// The name reported by [`MonotonicClock::name`].
    pub const NAME: &'static str = "manual";

    /// Creates a clock reading [`Timestamp::ZERO`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a clock that returns `readings` in order, then holds the last one.
    pub fn with_readings(readings: impl IntoIterator<Item = Timestamp>) -> Self {
        let clock = Self::new();
        for reading in readings {
            clock.push(reading);
        }
        clock
    }

    /// Sets the value returned once the script is drained.
    pub fn set(&self, now: Timestamp) {
        self.lock().current = now;
    }

    /// Moves the current value forward.
    pub fn advance(&self, delta: Duration) {
        let mut state = self.lock();
        state.current = state.current.saturating_add(delta);
    }

    /// Queues a successful reading.
    pub fn push(&self, reading: Timestamp) {
        self.lock().script.push_back(Ok(reading));
    }

    /// Queues a failed reading carrying `code`.
    pub fn fail_next(&self, code: i32) {
        self.lock().script.push_back(Err(TimerError::ClockUnavailable {
            clock: Self::NAME,
            code,
        }));
    }

    fn lock(&self) -> MutexGuard<'_, ManualState> {
        // Test clock: a panic in another holder leaves the state usable.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl MonotonicClock for ManualClock {
    fn now(&self) -> TimerResult<Timestamp> {
        let mut state = self.lock();
        match state.script.pop_front() {
            Some(Ok(reading)) => {
                state.current = reading;
                Ok(reading)
            }
            Some(Err(err)) => Err(err),
            None => Ok(state.current),
        }
    }

    fn name(&self) -> &'static str {
        Self::NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_readings_then_hold() {
        let clock = ManualClock::with_readings([
            Timestamp::from_micros(1000),
            Timestamp::from_micros(1500),
        ]);
        assert_eq!(clock.now(), Ok(Timestamp::from_micros(1000)));
        assert_eq!(clock.now(), Ok(Timestamp::from_micros(1500)));
        assert_eq!(clock.now(), Ok(Timestamp::from_micros(1500)));
    }

    #[test]
    fn test_failure_does_not_move_current() {
        let clock = ManualClock::new();
        clock.set(Timestamp::from_micros(5));
        clock.fail_next(5);
        assert_eq!(
            clock.now(),
            Err(TimerError::ClockUnavailable {
                clock: "manual",
                code: 5
            })
        );
        assert_eq!(clock.now(), Ok(Timestamp::from_micros(5)));
    }

    #[test]
    fn test_clones_share_state() {
        let clock = ManualClock::new();
        let handle = clock.clone();
        handle.advance(Duration::from_micros(250));
        assert_eq!(clock.now(), Ok(Timestamp::from_micros(250)));
    }
}
