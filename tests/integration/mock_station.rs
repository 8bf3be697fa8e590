//! Mock station adapter for integration tests.
//!
//! Records every door read and actuator call so tests can assert on the
//! full command history.  Individual devices can be told to reject
//! commands.

use airlock::app::events::AppEvent;
use airlock::app::ports::{DeviceInventory, DevicePort, DiagnosticSink, EventSink};
use airlock::device::{DeviceAction, DeviceId, DeviceKind, DoorStatus};
use airlock::error::DeviceError;
use std::collections::HashSet;

// ── MockStation ───────────────────────────────────────────────

struct MockDevice {
    name: String,
    kind: DeviceKind,
    status: DoorStatus,
}

pub struct MockStation {
    devices: Vec<Option<MockDevice>>,
    rejecting: HashSet<DeviceId>,
    pub calls: Vec<(DeviceId, DeviceAction)>,
}

#[allow(dead_code)]
impl MockStation {
    pub fn new() -> Self {
        Self {
            devices: Vec::new(),
            rejecting: HashSet::new(),
            calls: Vec::new(),
        }
    }

    pub fn add(&mut self, name: &str, kind: DeviceKind) -> DeviceId {
        let id = DeviceId(self.devices.len() as u32);
        self.devices.push(Some(MockDevice {
            name: name.to_string(),
            kind,
            status: DoorStatus::Closed,
        }));
        id
    }

    pub fn set_status(&mut self, id: DeviceId, status: DoorStatus) {
        if let Some(Some(d)) = self.devices.get_mut(id.0 as usize) {
            d.status = status;
        }
    }

    pub fn remove(&mut self, id: DeviceId) {
        self.devices[id.0 as usize] = None;
    }

    pub fn reject(&mut self, id: DeviceId) {
        self.rejecting.insert(id);
    }

    /// Last action received by `id`, if any.
    pub fn last_action(&self, id: DeviceId) -> Option<DeviceAction> {
        self.calls
            .iter()
            .rev()
            .find(|(d, _)| *d == id)
            .map(|(_, a)| *a)
    }

    pub fn actions_for(&self, id: DeviceId) -> usize {
        self.calls.iter().filter(|(d, _)| *d == id).count()
    }

    fn get(&self, id: DeviceId) -> Option<&MockDevice> {
        self.devices.get(id.0 as usize).and_then(Option::as_ref)
    }
}

impl Default for MockStation {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceInventory for MockStation {
    fn discover(&self, name_filter: &str) -> Vec<DeviceId> {
        self.devices
            .iter()
            .enumerate()
            .filter(|(_, d)| d.as_ref().is_some_and(|d| d.name.contains(name_filter)))
            .map(|(i, _)| DeviceId(i as u32))
            .collect()
    }
}

impl DevicePort for MockStation {
    fn name(&self, id: DeviceId) -> Result<String, DeviceError> {
        self.get(id).map(|d| d.name.clone()).ok_or(DeviceError::Stale(id))
    }

    fn kind(&self, id: DeviceId) -> DeviceKind {
        self.get(id).map_or(DeviceKind::Other, |d| d.kind)
    }

    fn door_status(&self, id: DeviceId) -> Result<DoorStatus, DeviceError> {
        self.get(id).map(|d| d.status).ok_or(DeviceError::Stale(id))
    }

    fn apply_action(&mut self, id: DeviceId, action: DeviceAction) -> Result<(), DeviceError> {
        if self.get(id).is_none() {
            return Err(DeviceError::Stale(id));
        }
        if self.rejecting.contains(&id) {
            return Err(DeviceError::Rejected(id));
        }
        self.calls.push((id, action));
        Ok(())
    }
}

// ── Sinks ─────────────────────────────────────────────────────

#[derive(Default)]
pub struct Lines {
    pub lines: Vec<String>,
    pub clears: usize,
}

impl DiagnosticSink for Lines {
    fn append_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.lines.clear();
    }
}

#[derive(Default)]
pub struct EventLog {
    pub events: Vec<AppEvent>,
}

impl EventSink for EventLog {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
