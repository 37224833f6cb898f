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

pub mod phases;
pub mod simulate;
pub mod stamp;

pub const EXAMPLE_CONFIG: &str = r#"# launchmark configuration file

[timer]
# Unit of reported deltas: "us" or "ns"
unit = "us"
# Clock source: "monotonic", "monotonic-raw" or "instant"
clock = "monotonic-raw"
prefix = "[PERF]"
# Report destinations: "stderr" and/or "log" (RUST_LOG=launchmark::perf=info)
sinks = ["stderr"]

# Phases measured by `launchmark phases` and at the end of `launchmark simulate`.
# `occurrence` picks the first or last matching checkpoint; `match = "contains"`
# compares by substring instead of equality.
[[phases]]
name = "launch"
start = { label = "launch begin", occurrence = "first" }
end = { label = "launch end", occurrence = "last" }

[[phases]]
name = "framework_init"
start = { label = "framework init: BEGIN" }
end = { label = "framework init: END", occurrence = "last" }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use launchmark_telemetry::LaunchmarkConfig;

    #[test]
    fn test_example_config_parses() {
        let config = LaunchmarkConfig::from_toml_str(EXAMPLE_CONFIG).unwrap();
        assert_eq!(config.phases.len(), 2);
        assert_eq!(config.phases[1].name, "framework_init");
    }
}
