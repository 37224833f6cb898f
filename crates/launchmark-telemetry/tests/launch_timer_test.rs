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

use anyhow::Result;
use launchmark_core::{ClockKind, ManualClock, TimeUnit, Timestamp};
use launchmark_infra::clock_for;
use launchmark_telemetry::phases::write_history;
use launchmark_telemetry::{
    analyze, read_history, LaunchTimer, LaunchmarkConfig, MemorySink, ReportEvent,
};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tempfile::tempdir;

const THREADS: u64 = 8;
const CHECKPOINTS_PER_THREAD: u64 = 50;

#[test]
fn test_concurrent_checkpoints_do_not_lose_updates() -> Result<()> {
    let total = THREADS * CHECKPOINTS_PER_THREAD;
    let clock = ManualClock::with_readings((1..=total).map(|i| Timestamp::from_micros(i * 10)));
    let sink = MemorySink::new();
    let timer = Arc::new(
        LaunchTimer::builder(Arc::new(clock))
            .sink(Arc::new(sink.clone()))
            .build(),
    );

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let timer = Arc::clone(&timer);
            thread::spawn(move || {
                for i in 0..CHECKPOINTS_PER_THREAD {
                    timer.checkpoint(&format!("thread {t} step {i}"));
                }
            })
        })
        .collect();
    for handle in handles {
        handle
            .join()
            .map_err(|_| anyhow::anyhow!("checkpoint thread panicked"))?;
    }

    let reports = sink.reports();
    assert_eq!(reports.len() as u64, total);
    assert_eq!(timer.start(), Some(Timestamp::from_micros(10)));
    assert_eq!(timer.last(), Some(Timestamp::from_micros(total * 10)));

    // Emission happens under the timer lock, so sinks see readings in order.
    for pair in reports.windows(2) {
        assert!(pair[0].since_start <= pair[1].since_start);
        assert_eq!(pair[1].since_last, Duration::from_micros(10));
    }
    Ok(())
}

#[test]
fn test_real_clock_session_feeds_phase_analysis() -> Result<()> {
    let sink = MemorySink::new();
    let timer = LaunchTimer::builder(clock_for(ClockKind::MonotonicRaw))
        .unit(TimeUnit::Nanoseconds)
        .sink(Arc::new(sink.clone()))
        .build();

    timer.checkpoint("launch begin");
    {
        let _init = timer.scope("framework init");
        thread::sleep(Duration::from_millis(15));
    }
    timer.checkpoint("launch end");

    let reports = sink.reports();
    assert_eq!(reports.len(), 4);
    assert!(reports[2].since_last >= Duration::from_millis(15));
    assert!(reports
        .windows(2)
        .all(|pair| pair[0].since_start <= pair[1].since_start));

    // Both the JSON export and the captured log reproduce the same phase.
    let config = LaunchmarkConfig::default();
    let from_history = analyze(&config.phases, &timer.history());
    let from_log = analyze(
        &config.phases,
        &read_history(&sink.lines().join("\n"), timer.formatter())?,
    );
    assert_eq!(from_history, from_log);
    assert!(from_history[0].duration.unwrap() >= Duration::from_millis(15));

    let exported = write_history(&timer.history())?;
    assert_eq!(read_history(&exported, timer.formatter())?, timer.history());
    Ok(())
}

#[test]
fn test_failures_reach_sinks_without_panicking() -> Result<()> {
    let clock = ManualClock::new();
    clock.fail_next(5);
    let sink = MemorySink::new();
    let timer = LaunchTimer::builder(Arc::new(clock))
        .sink(Arc::new(sink.clone()))
        .build();

    timer.checkpoint("launch begin");
    timer.checkpoint("");

    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert!(events
        .iter()
        .all(|event| matches!(event, ReportEvent::Failure { .. })));
    assert!(!timer.is_initialized());
    Ok(())
}

#[test]
fn test_config_file_loading() -> Result<()> {
    let dir = tempdir()?;

    let missing = dir.path().join("absent.toml");
    assert_eq!(LaunchmarkConfig::load(&missing)?, LaunchmarkConfig::default());

    let path = dir.path().join("launchmark.toml");
    std::fs::write(
        &path,
        "[timer]\nunit = \"ns\"\n\n[[phases]]\nname = \"boot\"\nstart = { label = \"a\" }\nend = { label = \"b\", occurrence = \"last\" }\n",
    )?;
    let config = LaunchmarkConfig::load(&path)?;
    assert_eq!(config.timer.unit, TimeUnit::Nanoseconds);
    assert_eq!(config.phases[0].name, "boot");

    std::fs::write(&path, "[timer]\nunit = \"ms\"\n")?;
    let err = LaunchmarkConfig::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("launchmark.toml"));
    Ok(())
}
