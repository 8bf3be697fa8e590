//! Integration tests for the setup → tick → device command pipeline.

use super::mock_station::{EventLog, Lines, MockStation};

use airlock::adapters::sim::{DoorPosition, SimulatedStation};
use airlock::app::events::AppEvent;
use airlock::app::service::AirlockController;
use airlock::config::AirlockConfig;
use airlock::device::{DeviceAction, DeviceId, DeviceKind, DoorStatus};
use airlock::error::DeviceError;

fn controller() -> AirlockController {
    AirlockController::new(AirlockConfig::default()).unwrap()
}

struct Bay {
    inner: DeviceId,
    outer: DeviceId,
    vent: DeviceId,
}

fn add_bay(st: &mut MockStation, group: &str) -> Bay {
    Bay {
        inner: st.add(&format!("Inner [Airlock] [I] {group}"), DeviceKind::Door),
        outer: st.add(&format!("Outer [Airlock] [E] {group}"), DeviceKind::Door),
        vent: st.add(&format!("Vent [Airlock] {group}"), DeviceKind::Vent),
    }
}

// ── Interlock through the controller ─────────────────────────

#[test]
fn sealed_unit_enables_all_devices() {
    let mut st = MockStation::new();
    let bay = add_bay(&mut st, "[Bay1]");
    let (mut diag, mut events) = (Lines::default(), EventLog::default());

    let mut ctl = controller();
    ctl.setup(&st, &mut diag, &mut events);
    let report = ctl.tick(&mut st, &mut diag, &mut events);

    assert_eq!(report.sealed, 1);
    assert_eq!(
        st.calls,
        [
            (bay.inner, DeviceAction::Enable),
            (bay.outer, DeviceAction::Enable),
            (bay.vent, DeviceAction::Enable),
        ]
    );
}

#[test]
fn both_doors_open_seals_exterior_first() {
    let mut st = MockStation::new();
    let bay = add_bay(&mut st, "[Bay1]");
    st.set_status(bay.inner, DoorStatus::NotClosed);
    st.set_status(bay.outer, DoorStatus::NotClosed);
    let (mut diag, mut events) = (Lines::default(), EventLog::default());

    let mut ctl = controller();
    ctl.setup(&st, &mut diag, &mut events);
    let report = ctl.tick(&mut st, &mut diag, &mut events);

    assert_eq!(report.interior_breached, 1);
    assert_eq!(st.last_action(bay.outer), Some(DeviceAction::Disable));
    assert_eq!(st.last_action(bay.vent), Some(DeviceAction::Disable));
    assert_eq!(st.actions_for(bay.inner), 0, "interior doors are left alone");
}

#[test]
fn exterior_open_locks_interior() {
    let mut st = MockStation::new();
    let bay = add_bay(&mut st, "[Bay1]");
    st.set_status(bay.outer, DoorStatus::NotClosed);
    let (mut diag, mut events) = (Lines::default(), EventLog::default());

    let mut ctl = controller();
    ctl.setup(&st, &mut diag, &mut events);
    let report = ctl.tick(&mut st, &mut diag, &mut events);

    assert_eq!(report.exterior_breached, 1);
    assert_eq!(st.last_action(bay.inner), Some(DeviceAction::Disable));
    assert_eq!(st.actions_for(bay.outer), 0);
}

// ── Failure isolation ────────────────────────────────────────

#[test]
fn failing_unit_does_not_stop_the_others() {
    let mut st = MockStation::new();
    let a = add_bay(&mut st, "[A]");
    let b = add_bay(&mut st, "[B]");
    let c = add_bay(&mut st, "[C]");
    let (mut diag, mut events) = (Lines::default(), EventLog::default());

    let mut ctl = controller();
    ctl.setup(&st, &mut diag, &mut events);
    st.remove(b.inner);
    events.events.clear();

    let report = ctl.tick(&mut st, &mut diag, &mut events);

    assert_eq!(report.evaluated, 3);
    assert_eq!(report.failed, 1);
    for bay in [&a, &c] {
        assert_eq!(st.last_action(bay.inner), Some(DeviceAction::Enable));
        assert_eq!(st.last_action(bay.outer), Some(DeviceAction::Enable));
        assert_eq!(st.last_action(bay.vent), Some(DeviceAction::Enable));
    }
    assert_eq!(st.actions_for(b.outer), 0);
    assert_eq!(st.actions_for(b.vent), 0);

    assert_eq!(
        diag.lines.last().map(String::as_str),
        Some("Error with airlock 1 '[B]': device #3 no longer exists")
    );
    assert!(events.events.contains(&AppEvent::UnitFailed {
        index: 1,
        name: "[B]".into(),
        error: DeviceError::Stale(b.inner),
    }));

    let metrics = ctl.metrics();
    assert_eq!(metrics.failures, 1);
    assert_eq!(metrics.recent_failures.len(), 1);
    assert_eq!(metrics.recent_failures[0].index, 1);
    assert_eq!(metrics.recent_failures[0].device, b.inner);
}

#[test]
fn rejected_door_command_still_disables_vents() {
    let mut st = MockStation::new();
    let a = add_bay(&mut st, "[A]");
    let b = add_bay(&mut st, "[B]");
    let (mut diag, mut events) = (Lines::default(), EventLog::default());

    let mut ctl = controller();
    ctl.setup(&st, &mut diag, &mut events);
    ctl.tick(&mut st, &mut diag, &mut events);
    assert_eq!(st.last_action(a.vent), Some(DeviceAction::Enable));

    st.set_status(a.inner, DoorStatus::NotClosed);
    st.reject(a.outer);
    let report = ctl.tick(&mut st, &mut diag, &mut events);

    assert_eq!(report.failed, 1);
    assert_eq!(st.last_action(a.vent), Some(DeviceAction::Disable));
    assert_eq!(st.last_action(b.vent), Some(DeviceAction::Enable));
    assert!(events.events.contains(&AppEvent::UnitFailed {
        index: 0,
        name: "[A]".into(),
        error: DeviceError::Rejected(a.outer),
    }));
}

#[test]
fn removed_door_still_lets_vents_follow_the_breach() {
    let mut st = MockStation::new();
    let a = add_bay(&mut st, "[A]");
    let (mut diag, mut events) = (Lines::default(), EventLog::default());

    let mut ctl = controller();
    ctl.setup(&st, &mut diag, &mut events);
    ctl.tick(&mut st, &mut diag, &mut events);

    st.set_status(a.inner, DoorStatus::NotClosed);
    st.remove(a.outer);
    let report = ctl.tick(&mut st, &mut diag, &mut events);

    assert_eq!(report.failed, 1);
    assert_eq!(st.last_action(a.vent), Some(DeviceAction::Disable));
    assert_eq!(
        diag.lines.last().map(String::as_str),
        Some("Error with airlock 0 '[A]': device #1 no longer exists")
    );
}

#[test]
fn ticks_keep_running_after_failures() {
    let mut st = MockStation::new();
    let a = add_bay(&mut st, "[A]");
    let (mut diag, mut events) = (Lines::default(), EventLog::default());

    let mut ctl = controller();
    ctl.setup(&st, &mut diag, &mut events);
    st.remove(a.vent);

    for _ in 0..3 {
        let report = ctl.tick(&mut st, &mut diag, &mut events);
        assert_eq!(report.failed, 1);
    }
    assert_eq!(ctl.tick_count(), 3);
    assert_eq!(ctl.metrics().failures, 3);
    let completed = events
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::TickCompleted(_)))
        .count();
    assert_eq!(completed, 3);
}

// ── Lifecycle ────────────────────────────────────────────────

#[test]
fn setup_clears_diagnostics_and_reports_registry() {
    let mut st = MockStation::new();
    add_bay(&mut st, "[Bay1]");
    let mut diag = Lines::default();
    diag.lines.push("stale line".into());
    let mut events = EventLog::default();

    let mut ctl = controller();
    ctl.setup(&st, &mut diag, &mut events);

    assert_eq!(diag.clears, 1);
    assert_eq!(diag.lines[0], "Creating airlock group '[Bay1]'");
    assert_eq!(
        events.events,
        [AppEvent::RegistryBuilt { units: 1, devices: 3 }]
    );
}

#[test]
fn rescan_swaps_in_a_new_registry() {
    let mut st = SimulatedStation::new();
    let door = st.add_door("Door [Airlock] [Bay1]");
    st.add_vent("Vent [Airlock] [Bay1]");
    let (mut diag, mut events) = (Lines::default(), EventLog::default());

    let mut ctl = controller();
    ctl.setup(&st, &mut diag, &mut events);
    assert_eq!(ctl.registry().len(), 1);

    st.rename(door, "Door [Airlock] [Bay2]");
    ctl.rescan(&st, &mut diag, &mut events);

    let names: Vec<&str> = ctl.registry().units().iter().map(|u| u.name()).collect();
    assert_eq!(names, ["[Bay2]", "[Bay1]"]);
    assert_eq!(ctl.registry().find("[Bay2]").unwrap().interior_doors(), [door]);
    assert!(ctl.registry().find("[Bay1]").unwrap().interior_doors().is_empty());
    assert_eq!(ctl.metrics().rescans, 1);
}

// ── Self-healing against manual overrides ────────────────────

#[test]
fn manual_override_is_corrected_next_tick() {
    let mut st = SimulatedStation::new();
    let inner = st.add_door("Inner [Airlock] [I] [Bay1]");
    let outer = st.add_door("Outer [Airlock] [E] [Bay1]");
    let vent = st.add_vent("Vent [Airlock] [Bay1]");
    let (mut diag, mut events) = (Lines::default(), EventLog::default());

    let mut ctl = controller();
    ctl.setup(&st, &mut diag, &mut events);

    st.set_door(inner, DoorPosition::Open);
    ctl.tick(&mut st, &mut diag, &mut events);
    assert_eq!(st.is_enabled(outer), Some(false));
    assert_eq!(st.is_enabled(vent), Some(false));

    // Someone re-enables the outer door by hand while the inner is open.
    st.set_enabled(outer, true);
    ctl.tick(&mut st, &mut diag, &mut events);
    assert_eq!(st.is_enabled(outer), Some(false));

    st.set_door(inner, DoorPosition::Closed);
    ctl.tick(&mut st, &mut diag, &mut events);
    assert_eq!(st.is_enabled(inner), Some(true));
    assert_eq!(st.is_enabled(outer), Some(true));
    assert_eq!(st.is_enabled(vent), Some(true));
}

#[test]
fn transitioning_door_counts_as_breach() {
    let mut st = SimulatedStation::new();
    let inner = st.add_door("Inner [Airlock] [I] [Bay1]");
    let outer = st.add_door("Outer [Airlock] [E] [Bay1]");
    let (mut diag, mut events) = (Lines::default(), EventLog::default());

    let mut ctl = controller();
    ctl.setup(&st, &mut diag, &mut events);

    st.set_door(outer, DoorPosition::Closing);
    let report = ctl.tick(&mut st, &mut diag, &mut events);
    assert_eq!(report.exterior_breached, 1);
    assert_eq!(st.is_enabled(inner), Some(false));
}
