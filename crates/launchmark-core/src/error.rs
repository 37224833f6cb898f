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

//! Error types for clock reads and checkpoint recording.

use thiserror::Error;

/// A specialized `Result` type for timer operations.
pub type TimerResult<T> = Result<T, TimerError>;

/// An error raised while recording a checkpoint.
///
/// Both variants are non-fatal: a launch timer reports them on its diagnostic
/// stream and leaves its state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    /// The monotonic clock could not be read.
    #[error("clock '{clock}' unavailable (error code {code})")]
    ClockUnavailable {
        /// Name of the clock that failed.
        clock: &'static str,
        /// The OS error code returned by the clock call.
        code: i32,
    },
    /// The caller passed an unusable argument, such as an empty label.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl TimerError {
    /// Returns `true` for [`TimerError::ClockUnavailable`].
    pub fn is_clock_failure(&self) -> bool {
        matches!(self, TimerError::ClockUnavailable { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = TimerError::ClockUnavailable {
            clock: "monotonic-raw",
            code: 22,
        };
        assert_eq!(
            err.to_string(),
            "clock 'monotonic-raw' unavailable (error code 22)"
        );
        assert!(err.is_clock_failure());

        let err = TimerError::InvalidArgument("checkpoint label must not be empty".into());
        assert_eq!(
            err.to_string(),
            "invalid argument: checkpoint label must not be empty"
        );
        assert!(!err.is_clock_failure());
    }
}
