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

//! Named, timestamped startup events.

use crate::error::{TimerError, TimerResult};
use crate::time::Timestamp;
use serde::{Deserialize, Serialize};

/// An immutable record of a named point in application startup.
///
/// Deserialized checkpoints go through the same label validation as
/// [`Checkpoint::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCheckpoint")]
pub struct Checkpoint {
    label: String,
    #[serde(rename = "timestamp_ns")]
    timestamp: Timestamp,
}

impl Checkpoint {
    /// Creates a checkpoint after validating its label.
    ///
    /// Returns [`TimerError::InvalidArgument`] if the label is empty, blank or
    /// contains control characters.
    pub fn new(label: impl Into<String>, timestamp: Timestamp) -> TimerResult<Self> {
        let label = label.into();
        validate_label(&label)?;
        Ok(Self { label, timestamp })
    }

    /// The descriptive label, e.g. "launch begin".
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The monotonic reading taken when the checkpoint was recorded.
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

#[derive(Deserialize)]
struct RawCheckpoint {
    label: String,
    #[serde(rename = "timestamp_ns")]
    timestamp: Timestamp,
}

impl TryFrom<RawCheckpoint> for Checkpoint {
    type Error = TimerError;

    fn try_from(raw: RawCheckpoint) -> TimerResult<Self> {
        Checkpoint::new(raw.label, raw.timestamp)
    }
}

/// Rejects labels that would produce an unreadable report line.
///
/// A report is exactly one line, so line breaks and other control characters
/// are refused along with empty labels.
pub fn validate_label(label: &str) -> TimerResult<()> {
    if label.trim().is_empty() {
        return Err(TimerError::InvalidArgument(
            "checkpoint label must not be empty".to_string(),
        ));
    }
    if label.chars().any(char::is_control) {
        return Err(TimerError::InvalidArgument(format!(
            "checkpoint label must not contain control characters: {}",
            label.escape_debug()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkpoint_rejects_blank_labels() {
        assert!(matches!(
            Checkpoint::new("", Timestamp::ZERO),
            Err(TimerError::InvalidArgument(_))
        ));
        assert!(Checkpoint::new("   ", Timestamp::ZERO).is_err());

        let cp = Checkpoint::new("launch begin", Timestamp::from_micros(7)).unwrap();
        assert_eq!(cp.label(), "launch begin");
        assert_eq!(cp.timestamp(), Timestamp::from_micros(7));
    }

    #[test]
    fn test_checkpoint_json_shape() {
        let cp = Checkpoint::new("mid", Timestamp::from_nanos(1_500)).unwrap();
        let json = serde_json::to_string(&cp).unwrap();
        assert_eq!(json, r#"{"label":"mid","timestamp_ns":1500}"#);

        let back: Checkpoint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cp);
    }

    #[test]
    fn test_checkpoint_rejects_control_characters() {
        for label in ["mid\nsecond", "mid\r", "tab\there", "\u{1b}[31mred"] {
            assert!(
                matches!(
                    Checkpoint::new(label, Timestamp::ZERO),
                    Err(TimerError::InvalidArgument(_))
                ),
                "{label:?} should be rejected"
            );
        }
        assert!(Checkpoint::new("framework init: BEGIN", Timestamp::ZERO).is_ok());
    }

    #[test]
    fn test_deserialize_validates_labels() {
        let blank = serde_json::from_str::<Vec<Checkpoint>>(r#"[{"label":"","timestamp_ns":5}]"#);
        assert!(blank.is_err());

        let spaces = serde_json::from_str::<Checkpoint>(r#"{"label":"   ","timestamp_ns":9}"#);
        let err = spaces.unwrap_err().to_string();
        assert!(err.contains("must not be empty"), "unexpected error: {err}");

        let multi_line = serde_json::from_str::<Checkpoint>(r#"{"label":"a\nb","timestamp_ns":9}"#);
        assert!(multi_line.is_err());
    }
}
