//! Fuzz target: registry construction
//!
//! Splits the input into device names (one per line, first byte picks
//! the kind) and builds a registry from them, verifying:
//! - No panics for any set of names
//! - Rebuilding from the same station yields the same registry
//! - A sealed tick issues exactly one command per device slot
//!
//! cargo fuzz run fuzz_registry

#![no_main]

use airlock::adapters::sim::SimulatedStation;
use airlock::app::events::AppEvent;
use airlock::app::ports::EventSink;
use airlock::app::service::AirlockController;
use airlock::config::AirlockConfig;
use airlock::device::DeviceKind;
use airlock::diagnostics::DiagnosticBuffer;
use libfuzzer_sys::fuzz_target;

struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };

    let mut station = SimulatedStation::new();
    for line in text.lines().take(64) {
        let kind = match line.bytes().next().map(|b| b % 3) {
            Some(0) => DeviceKind::Door,
            Some(1) => DeviceKind::Vent,
            _ => DeviceKind::Other,
        };
        station.add(line, kind);
    }

    let Ok(mut ctl) = AirlockController::new(AirlockConfig::default()) else {
        return;
    };
    let mut diag = DiagnosticBuffer::new();
    ctl.setup(&station, &mut diag, &mut Discard);
    let first = ctl.registry().clone();
    ctl.rescan(&station, &mut diag, &mut Discard);
    assert_eq!(&first, ctl.registry());

    let report = ctl.tick(&mut station, &mut diag, &mut Discard);
    assert_eq!(report.failed, 0);
    if report.sealed == report.evaluated {
        assert_eq!(station.actions().len(), ctl.registry().device_count());
    }
});
