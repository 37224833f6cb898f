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

use super::ReportSink;
use crate::report::ReportEvent;
use std::io::Write;

/// Writes each report line to standard error.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl ReportSink for StderrSink {
    fn emit(&self, line: &str, _event: &ReportEvent) {
        // `eprintln!` panics on a closed stream; a lost line is acceptable here.
        let _ = writeln!(std::io::stderr().lock(), "{line}");
    }
}
