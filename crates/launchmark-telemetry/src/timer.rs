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

//! The launch-phase timer.
//!
//! A [`LaunchTimer`] is created once at process start and passed by reference to
//! whatever lifecycle code wants to mark a checkpoint. Each checkpoint reads the
//! monotonic clock, computes the delta since the previous checkpoint and since
//! the first one, and writes one line to every configured sink.

use crate::config::{SinkKind, TimerConfig};
use crate::report::{CheckpointReport, ReportEvent, ReportFormatter, DEFAULT_PREFIX};
use crate::sink::{LogSink, ReportSink, StderrSink};
use launchmark_core::checkpoint::validate_label;
use launchmark_core::{Checkpoint, MonotonicClock, TimeUnit, TimerResult, Timestamp};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// The start and last readings of a timer.
///
/// Uninitialized until the first successful checkpoint; never reset afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimerState {
    anchors: Option<(Timestamp, Timestamp)>,
}

impl TimerState {
    /// The reading of the first checkpoint.
    pub fn start(&self) -> Option<Timestamp> {
        self.anchors.map(|(start, _)| start)
    }

    /// The reading of the most recent checkpoint.
    pub fn last(&self) -> Option<Timestamp> {
        self.anchors.map(|(_, last)| last)
    }

    /// Returns `true` once a checkpoint has been recorded.
    pub fn is_initialized(&self) -> bool {
        self.anchors.is_some()
    }

    /// Moves the state to `now`, returning `(since_last, since_start)`.
    pub fn advance(&mut self, now: Timestamp) -> (Duration, Duration) {
        match self.anchors {
            None => {
                self.anchors = Some((now, now));
                (Duration::ZERO, Duration::ZERO)
            }
            Some((start, last)) => {
                if now < last {
                    log::warn!("Monotonic clock went backwards: {now} < {last}");
                }
                self.anchors = Some((start, now.max(last)));
                (now.saturating_since(last), now.saturating_since(start))
            }
        }
    }
}

#[derive(Debug, Default)]
struct TimerInner {
    state: TimerState,
    history: Vec<Checkpoint>,
}

/// Records named checkpoints during startup and reports the elapsed time between them.
#[derive(Debug)]
pub struct LaunchTimer {
    clock: Arc<dyn MonotonicClock>,
    formatter: ReportFormatter,
    sinks: Vec<Arc<dyn ReportSink>>,
    inner: Mutex<TimerInner>,
}

impl LaunchTimer {
    /// Creates a timer reporting microseconds to standard error.
    pub fn new(clock: Arc<dyn MonotonicClock>) -> Self {
        Self::builder(clock).build()
    }

    /// Starts configuring a timer around `clock`.
    pub fn builder(clock: Arc<dyn MonotonicClock>) -> LaunchTimerBuilder {
        LaunchTimerBuilder {
            clock,
            unit: TimeUnit::default(),
            prefix: DEFAULT_PREFIX.to_string(),
            sinks: Vec::new(),
        }
    }

    /// Creates a timer from the `[timer]` configuration section.
    pub fn from_config(config: &TimerConfig, clock: Arc<dyn MonotonicClock>) -> Self {
        let mut builder = Self::builder(clock)
            .unit(config.unit)
            .prefix(config.prefix.clone());
        for kind in &config.sinks {
            builder = match kind {
                SinkKind::Stderr => builder.sink(Arc::new(StderrSink)),
                SinkKind::Log => builder.sink(Arc::new(LogSink)),
            };
        }
        builder.build()
    }

    /// Records a checkpoint named `label`.
    ///
    /// The first successful call sets the baseline and reports zero deltas. Every
    /// call, successful or not, writes exactly one line to each sink. On error the
    /// timer state is left exactly as it was.
    pub fn record_checkpoint(&self, label: &str) -> TimerResult<CheckpointReport> {
        // Held across the clock read so readings are taken in lock order.
        let mut inner = self.lock();

        let outcome = validate_label(label)
            .and_then(|()| self.clock.now())
            .and_then(|now| {
                let checkpoint = Checkpoint::new(label, now)?;
                let (since_last, since_start) = inner.state.advance(now);
                inner.history.push(checkpoint);
                Ok(CheckpointReport {
                    label: label.to_string(),
                    at: now,
                    since_last,
                    since_start,
                })
            });

        let event = match &outcome {
            Ok(report) => ReportEvent::Checkpoint(report.clone()),
            Err(error) => {
                if error.is_clock_failure() {
                    log::warn!("Checkpoint '{label}' was not recorded: {error}");
                } else {
                    log::debug!("Checkpoint '{}' was not recorded: {error}", label.escape_debug());
                }
                ReportEvent::Failure {
                    label: label.to_string(),
                    error: error.clone(),
                }
            }
        };
        let line = self.formatter.format(&event);
        for sink in &self.sinks {
            sink.emit(&line, &event);
        }

        outcome
    }

    /// Records a checkpoint, discarding the outcome.
    ///
    /// Failures have already been written to the sinks; this is the form to use
    /// from lifecycle callbacks that must not branch on instrumentation.
    pub fn checkpoint(&self, label: &str) {
        let _ = self.record_checkpoint(label);
    }

    /// Records `<label>: BEGIN` now and `<label>: END` when the guard is dropped.
    pub fn scope(&self, label: impl Into<String>) -> PhaseGuard<'_> {
        PhaseGuard::new(self, label.into())
    }

    /// The reading of the first checkpoint, once one has been recorded.
    pub fn start(&self) -> Option<Timestamp> {
        self.lock().state.start()
    }

    /// The reading of the most recent checkpoint.
    pub fn last(&self) -> Option<Timestamp> {
        self.lock().state.last()
    }

    /// Returns `true` once a checkpoint has been recorded.
    pub fn is_initialized(&self) -> bool {
        self.lock().state.is_initialized()
    }

    /// A snapshot of the timer state.
    pub fn state(&self) -> TimerState {
        self.lock().state
    }

    /// Every successfully recorded checkpoint, in recording order.
    pub fn history(&self) -> Vec<Checkpoint> {
        self.lock().history.clone()
    }

    /// The formatter used for report lines.
    pub fn formatter(&self) -> &ReportFormatter {
        &self.formatter
    }

    /// The name of the underlying clock.
    pub fn clock_name(&self) -> &'static str {
        self.clock.name()
    }

    fn lock(&self) -> MutexGuard<'_, TimerInner> {
        // A panicking sink must not disable instrumentation for the rest of the process.
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Builder for [`LaunchTimer`].
#[derive(Debug)]
pub struct LaunchTimerBuilder {
    clock: Arc<dyn MonotonicClock>,
    unit: TimeUnit,
    prefix: String,
    sinks: Vec<Arc<dyn ReportSink>>,
}

impl LaunchTimerBuilder {
    /// Sets the unit deltas are reported in.
    pub fn unit(mut self, unit: TimeUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Sets the prefix of every report line.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Adds a sink. Without any sink, the timer writes to standard error.
    pub fn sink(mut self, sink: Arc<dyn ReportSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Builds the timer.
    pub fn build(self) -> LaunchTimer {
        let sinks = if self.sinks.is_empty() {
            vec![Arc::new(StderrSink) as Arc<dyn ReportSink>]
        } else {
            self.sinks
        };
        LaunchTimer {
            clock: self.clock,
            formatter: ReportFormatter::new(self.prefix, self.unit),
            sinks,
            inner: Mutex::new(TimerInner::default()),
        }
    }
}

/// Brackets a phase with `BEGIN` and `END` checkpoints.
///
/// The `END` checkpoint is recorded when the guard goes out of scope, including
/// on early returns and unwinding.
#[must_use = "the END checkpoint is recorded when the guard is dropped"]
#[derive(Debug)]
pub struct PhaseGuard<'a> {
    timer: &'a LaunchTimer,
    label: String,
}

impl<'a> PhaseGuard<'a> {
    fn new(timer: &'a LaunchTimer, label: String) -> Self {
        timer.checkpoint(&format!("{label}: BEGIN"));
        Self { timer, label }
    }

    /// The phase label, without the `BEGIN`/`END` suffix.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Drop for PhaseGuard<'_> {
    fn drop(&mut self) {
        self.timer.checkpoint(&format!("{}: END", self.label));
    }
}
