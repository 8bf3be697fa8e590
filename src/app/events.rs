//! Outbound application events.
//!
//! The [`AirlockController`](super::service::AirlockController) emits
//! these through the [`EventSink`](super::ports::EventSink) port.
//! Adapters on the other side decide what to do with them.

use serde::Serialize;

use crate::error::DeviceError;
use crate::interlock::InterlockState;

/// Structured events emitted by the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// A new registry was swapped in.
    RegistryBuilt { units: usize, devices: usize },

    /// Evaluating one unit failed; later units still ran.
    UnitFailed {
        index: usize,
        name: String,
        error: DeviceError,
    },

    /// A full pass over the registry finished.
    TickCompleted(TickReport),
}

/// Outcome of one tick, tallied fresh from this tick's assessments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TickReport {
    pub tick: u64,
    pub evaluated: usize,
    pub failed: usize,
    pub sealed: usize,
    pub interior_breached: usize,
    pub exterior_breached: usize,
}

impl TickReport {
    pub(crate) fn new(tick: u64) -> Self {
        Self {
            tick,
            ..Self::default()
        }
    }

    pub(crate) fn record(&mut self, state: InterlockState) {
        self.evaluated += 1;
        match state {
            InterlockState::Sealed => self.sealed += 1,
            InterlockState::InteriorBreached => self.interior_breached += 1,
            InterlockState::ExteriorBreached => self.exterior_breached += 1,
        }
    }

    pub(crate) fn record_failure(&mut self) {
        self.evaluated += 1;
        self.failed += 1;
    }
}
