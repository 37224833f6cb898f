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

// Launch timing probe: records, stamps and analyses startup checkpoints.
// Run with: launchmark <command>

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use launchmark_core::ClockKind;
use launchmark_telemetry::LaunchmarkConfig;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "launchmark")]
#[command(version)]
#[command(about = "Monotonic launch-phase timing: record checkpoints and measure phases")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "launchmark.toml")]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulated application launch and report its checkpoints
    Simulate {
        /// Number of framework initialization steps
        #[arg(short, long, default_value = "3")]
        steps: u32,

        /// Duration of each step in milliseconds
        #[arg(long, default_value = "10")]
        step_ms: u64,

        /// Write the recorded checkpoint history (JSON) to this file
        #[arg(long)]
        history: Option<PathBuf>,
    },

    /// Print a single absolute clock reading
    Stamp {
        /// Label printed with the reading
        label: String,

        /// Clock to read (defaults to the configured clock)
        #[arg(long)]
        clock: Option<ClockKind>,
    },

    /// Measure the configured phases in a history file or captured report log
    Phases {
        /// JSON history or text log to analyse
        input: PathBuf,
    },

    /// Show example configuration
    Example,
}

fn setup_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_micros()
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Simulate {
            steps,
            step_ms,
            history,
        } => {
            let config = LaunchmarkConfig::load(&cli.config)?;
            commands::simulate::run(&config, steps, step_ms, history.as_deref(), &mut out)
        }
        Commands::Stamp { label, clock } => {
            let config = LaunchmarkConfig::load(&cli.config)?;
            commands::stamp::run(&config, &label, clock, &mut out)
        }
        Commands::Phases { input } => {
            let config = LaunchmarkConfig::load(&cli.config)?;
            commands::phases::run(&config, &input, &mut out)
        }
        Commands::Example => {
            writeln!(out, "{}", commands::EXAMPLE_CONFIG)?;
            Ok(())
        }
    }
}
