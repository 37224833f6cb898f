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

//! In-memory report sink.

use super::ReportSink;
use crate::report::{CheckpointReport, ReportEvent};
use std::sync::{Arc, RwLock};

/// A thread-safe sink that keeps every line and event it receives.
///
/// Clones share the same buffer, so a caller can keep one handle and give
/// another to a timer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    entries: Arc<RwLock<Vec<(String, ReportEvent)>>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All lines received so far, in order.
    pub fn lines(&self) -> Vec<String> {
        self.entries
            .read()
            .map(|entries| entries.iter().map(|(line, _)| line.clone()).collect())
            .unwrap_or_default()
    }

    /// All events received so far, in order.
    pub fn events(&self) -> Vec<ReportEvent> {
        self.entries
            .read()
            .map(|entries| entries.iter().map(|(_, event)| event.clone()).collect())
            .unwrap_or_default()
    }

    /// Only the successful checkpoint reports, in order.
    pub fn reports(&self) -> Vec<CheckpointReport> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                ReportEvent::Checkpoint(report) => Some(report),
                ReportEvent::Failure { .. } => None,
            })
            .collect()
    }

    /// Number of entries received.
    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    /// Returns `true` if nothing has been received.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ReportSink for MemorySink {
    fn emit(&self, line: &str, event: &ReportEvent) {
        if let Ok(mut entries) = self.entries.write() {
            entries.push((line.to_string(), event.clone()));
        }
    }
}
