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

//! RAII timers logging how long a pipeline stage took.

use std::time::{Duration, Instant};

/// Logs the time spent in a scope at `debug` level when dropped.
///
/// ```ignore
/// let _timer = ScopedTimer::new("weld crate");
/// // ... work ...
/// // logs "weld crate took 1.27 ms"
/// ```
#[must_use = "the timer logs when dropped; bind it to a variable"]
pub struct ScopedTimer {
    label: String,
    start: Instant,
}

impl ScopedTimer {
    /// Starts a timer for the stage named `label`.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            start: Instant::now(),
        }
    }

    /// Time elapsed since the timer started.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// The stage label.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed().as_secs_f64() * 1000.0;
        log::debug!("{} took {:.2} ms", self.label, elapsed_ms);
    }
}
