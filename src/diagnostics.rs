//! Diagnostic text buffer and runtime metrics.
//!
//! [`DiagnosticBuffer`] is an in-memory [`DiagnosticSink`]: one growing
//! block of text, the same shape as the panel a player reads on the
//! host.  [`RuntimeMetrics`] accumulates counters across ticks and keeps
//! the 8 most recent unit failures in a fixed-capacity ring.

use serde::Serialize;

use crate::app::events::TickReport;
use crate::app::ports::DiagnosticSink;
use crate::device::DeviceId;
use crate::error::DeviceError;

const FAILURE_HISTORY: usize = 8;
const UNIT_NAME_CAP: usize = 32;

/// Plain-text diagnostic buffer.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticBuffer {
    text: String,
}

impl DiagnosticBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> &str {
        &self.text
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }
}

impl DiagnosticSink for DiagnosticBuffer {
    fn append_line(&mut self, line: &str) {
        self.text.push_str(line);
        self.text.push('\n');
    }

    fn clear(&mut self) {
        self.text.clear();
    }
}

/// One unit failure, as remembered by the metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureRecord {
    pub tick: u64,
    pub index: u32,
    /// Unit name, truncated on a char boundary.
    pub unit: heapless::String<UNIT_NAME_CAP>,
    pub device: DeviceId,
}

impl FailureRecord {
    pub fn new(tick: u64, index: usize, unit: &str, error: DeviceError) -> Self {
        let mut name = heapless::String::new();
        for c in unit.chars() {
            if name.push(c).is_err() {
                break;
            }
        }
        Self {
            tick,
            index: index as u32,
            unit: name,
            device: error.device(),
        }
    }
}

/// Counters accumulated since the controller was created.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RuntimeMetrics {
    pub ticks: u64,
    pub evaluations: u64,
    pub failures: u64,
    pub rescans: u32,
    /// Oldest first.
    pub recent_failures: heapless::Vec<FailureRecord, FAILURE_HISTORY>,
}

impl RuntimeMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_tick(&mut self, report: &TickReport) {
        self.ticks += 1;
        self.evaluations += report.evaluated as u64;
        self.failures += report.failed as u64;
    }

    pub fn record_failure(&mut self, record: FailureRecord) {
        if self.recent_failures.is_full() {
            self.recent_failures.remove(0);
        }
        // Cannot fail: a slot was just freed.
        let _ = self.recent_failures.push(record);
    }

    pub fn record_rescan(&mut self) {
        self.rescans += 1;
    }
}
