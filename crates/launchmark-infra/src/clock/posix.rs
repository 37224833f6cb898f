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

//! `clock_gettime`-based implementation of the MonotonicClock trait.

use launchmark_core::{MonotonicClock, TimerError, TimerResult, Timestamp};
use std::mem::MaybeUninit;

/// A monotonic clock backed by POSIX `clock_gettime`.
#[derive(Debug, Clone, Copy)]
pub struct PosixClock {
    id: libc::clockid_t,
    name: &'static str,
}

impl PosixClock {
    /// `CLOCK_MONOTONIC`, present on every unix target.
    pub fn monotonic() -> Self {
        Self {
            id: libc::CLOCK_MONOTONIC,
            name: "monotonic",
        }
    }

    /// `CLOCK_MONOTONIC_RAW`, or `None` on targets that do not define it.
    pub fn monotonic_raw() -> Option<Self> {
        #[cfg(any(target_os = "linux", target_os = "android", target_vendor = "apple"))]
        {
            Some(Self {
                id: libc::CLOCK_MONOTONIC_RAW,
                name: "monotonic-raw",
            })
        }
        #[cfg(not(any(target_os = "linux", target_os = "android", target_vendor = "apple")))]
        {
            None
        }
    }

    /// Reads the clock, returning the raw `timespec` pair and the call's return code.
    ///
    /// On failure the code is the `errno` value rather than `-1`.
    pub fn read_raw(&self) -> (i32, i64, i64) {
        let mut ts = MaybeUninit::<libc::timespec>::zeroed();
        // SAFETY: `ts` is a valid, writable, zero-initialized timespec.
        let ret = unsafe { libc::clock_gettime(self.id, ts.as_mut_ptr()) };
        // SAFETY: an all-zero timespec is a valid value and the call only writes fields.
        let ts = unsafe { ts.assume_init() };
        let code = if ret == 0 {
            0
        } else {
            std::io::Error::last_os_error()
                .raw_os_error()
                .unwrap_or(ret)
        };
        (code, i64::from(ts.tv_sec), i64::from(ts.tv_nsec))
    }
}

impl MonotonicClock for PosixClock {
    fn now(&self) -> TimerResult<Timestamp> {
        match self.read_raw() {
            (0, secs, nanos) => Ok(Timestamp::from_timespec(secs, nanos)),
            (code, _, _) => {
                log::debug!("clock_gettime({}) failed with code {code}", self.name);
                Err(TimerError::ClockUnavailable {
                    clock: self.name,
                    code,
                })
            }
        }
    }

    fn name(&self) -> &'static str {
        self.name
    }
}
