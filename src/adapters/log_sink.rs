//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured controller events to
//! the `log` facade.  Tick summaries go out at `debug` so a 6 Hz loop
//! does not flood the console; failures are `warn`.

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::RegistryBuilt { units, devices } => {
                info!("SETUP | airlocks={} devices={}", units, devices);
            }
            AppEvent::UnitFailed { index, name, error } => {
                warn!("FAULT | airlock {} '{}': {}", index, name, error);
            }
            AppEvent::TickCompleted(r) => {
                debug!(
                    "TICK  | #{} | evaluated={} failed={} | sealed={} interior_breach={} exterior_breach={}",
                    r.tick, r.evaluated, r.failed, r.sealed, r.interior_breached, r.exterior_breached,
                );
            }
        }
    }
}
