//! Controller loop: the application core.
//!
//! [`AirlockController`] owns the registry and the metrics.  It exposes
//! two phases that never overlap: **setup/rescan** (build a fresh
//! registry, then swap it in whole) and **tick** (evaluate every unit
//! once, in registry order).
//!
//! ```text
//!  DeviceInventory ──▶ ┌──────────────────────────┐ ──▶ DiagnosticSink
//!                      │    AirlockController      │
//!      DevicePort ◀──▶ │ Registry · AirlockUnit[]  │ ──▶ EventSink
//!                      └──────────────────────────┘
//! ```
//!
//! A failing unit never stops the tick: the error is reported and the
//! loop moves on to the next unit.

use log::{info, warn};

use crate::config::AirlockConfig;
use crate::diagnostics::{FailureRecord, RuntimeMetrics};
use crate::error::Result;
use crate::registry::{Registry, RegistryBuilder};
use crate::tags::TagScheme;

use super::events::{AppEvent, TickReport};
use super::ports::{DeviceInventory, DevicePort, DiagnosticSink, EventSink};

/// Owns the airlock registry and drives it once per host tick.
pub struct AirlockController {
    config: AirlockConfig,
    scheme: TagScheme,
    registry: Registry,
    metrics: RuntimeMetrics,
}

impl AirlockController {
    /// Validate `config` and create a controller with an empty registry.
    ///
    /// Call [`setup`](Self::setup) before the first tick.
    pub fn new(config: AirlockConfig) -> Result<Self> {
        config.validate()?;
        let scheme = TagScheme::new(&config);
        Ok(Self {
            config,
            scheme,
            registry: Registry::empty(),
            metrics: RuntimeMetrics::new(),
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Clear the diagnostic text and build the registry from the host
    /// inventory.
    pub fn setup(
        &mut self,
        station: &(impl DeviceInventory + DevicePort),
        diag: &mut impl DiagnosticSink,
        sink: &mut impl EventSink,
    ) {
        diag.clear();
        let registry =
            RegistryBuilder::new(&self.scheme, self.config.membership).build(station, diag);

        info!(
            "Registry ready: {} airlocks, {} devices",
            registry.len(),
            registry.device_count()
        );
        sink.emit(&AppEvent::RegistryBuilt {
            units: registry.len(),
            devices: registry.device_count(),
        });

        self.registry = registry;
    }

    /// Rebuild the registry between ticks, e.g. after devices were
    /// renamed, built or removed.
    pub fn rescan(
        &mut self,
        station: &(impl DeviceInventory + DevicePort),
        diag: &mut impl DiagnosticSink,
        sink: &mut impl EventSink,
    ) {
        self.metrics.record_rescan();
        info!("Rescanning airlock devices");
        self.setup(station, diag, sink);
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Evaluate every unit once, in registry order.
    pub fn tick(
        &mut self,
        station: &mut impl DevicePort,
        diag: &mut impl DiagnosticSink,
        sink: &mut impl EventSink,
    ) -> TickReport {
        let mut report = TickReport::new(self.metrics.ticks + 1);

        for (index, unit) in self.registry.units().iter().enumerate() {
            match unit.update(station) {
                Ok(state) => report.record(state),
                Err(error) => {
                    report.record_failure();
                    warn!("Airlock {} '{}' failed: {}", index, unit.name(), error);
                    diag.append_line(&format!(
                        "Error with airlock {index} '{}': {error}",
                        unit.name()
                    ));
                    self.metrics
                        .record_failure(FailureRecord::new(report.tick, index, unit.name(), error));
                    sink.emit(&AppEvent::UnitFailed {
                        index,
                        name: unit.name().to_string(),
                        error,
                    });
                }
            }
        }

        self.metrics.record_tick(&report);
        sink.emit(&AppEvent::TickCompleted(report));
        report
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn metrics(&self) -> &RuntimeMetrics {
        &self.metrics
    }

    pub fn config(&self) -> &AirlockConfig {
        &self.config
    }

    /// Ticks executed since construction.
    pub fn tick_count(&self) -> u64 {
        self.metrics.ticks
    }
}
