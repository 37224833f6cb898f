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

//! Platform clocks and clock selection.

mod instant;
#[cfg(unix)]
mod posix;

pub use instant::InstantClock;
#[cfg(unix)]
pub use posix::PosixClock;

use launchmark_core::{ClockKind, MonotonicClock};
use std::sync::Arc;

/// Returns the clock for `kind`, or `None` if the target has no such clock.
pub fn try_clock(kind: ClockKind) -> Option<Arc<dyn MonotonicClock>> {
    match kind {
        ClockKind::Instant => Some(Arc::new(InstantClock::new())),
        #[cfg(unix)]
        ClockKind::Monotonic => Some(Arc::new(PosixClock::monotonic())),
        #[cfg(unix)]
        ClockKind::MonotonicRaw => PosixClock::monotonic_raw()
            .map(|clock| Arc::new(clock) as Arc<dyn MonotonicClock>),
        #[cfg(not(unix))]
        ClockKind::Monotonic | ClockKind::MonotonicRaw => None,
    }
}

/// Returns the clock for `kind`, falling back to [`InstantClock`] where the
/// requested source does not exist on this target.
pub fn clock_for(kind: ClockKind) -> Arc<dyn MonotonicClock> {
    try_clock(kind).unwrap_or_else(|| {
        log::warn!("Clock '{kind}' is not available on this platform, falling back to 'instant'");
        Arc::new(InstantClock::new())
    })
}

/// Returns the finest-grained monotonic clock available on this platform.
pub fn default_clock() -> Arc<dyn MonotonicClock> {
    ClockKind::ALL
        .into_iter()
        .find_map(try_clock)
        .unwrap_or_else(|| Arc::new(InstantClock::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instant_is_always_available() {
        let clock = try_clock(ClockKind::Instant).expect("instant clock exists everywhere");
        assert_eq!(clock.name(), "instant");
    }

    #[test]
    fn test_clock_for_never_fails() {
        for kind in ClockKind::ALL {
            let clock = clock_for(kind);
            assert!(clock.now().is_ok(), "clock '{}' should read", clock.name());
        }
    }

    #[cfg(any(target_os = "linux", target_os = "android", target_vendor = "apple"))]
    #[test]
    fn test_default_clock_prefers_raw() {
        assert_eq!(default_clock().name(), "monotonic-raw");
    }
}
