//! Simulated station: an in-memory host for the controller.
//!
//! Implements [`DeviceInventory`] and [`DevicePort`] over a list of
//! named devices.  Door positions can be changed from outside (a player
//! walking through), devices can be removed to leave stale handles
//! behind, and every command is recorded in an action log.
//!
//! A [`StationLayout`] is the JSON description used by `airlock-sim`.

use serde::{Deserialize, Serialize};

use crate::app::ports::{DeviceInventory, DevicePort};
use crate::device::{DeviceAction, DeviceId, DeviceKind, DoorStatus};
use crate::error::DeviceError;

/// Physical door position.  Anything but `Closed` reads as not closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoorPosition {
    Open,
    #[default]
    Closed,
    Opening,
    Closing,
}

impl DoorPosition {
    pub fn status(self) -> DoorStatus {
        match self {
            Self::Closed => DoorStatus::Closed,
            Self::Open | Self::Opening | Self::Closing => DoorStatus::NotClosed,
        }
    }
}

#[derive(Debug, Clone)]
struct SimDevice {
    name: String,
    kind: DeviceKind,
    position: DoorPosition,
    enabled: bool,
}

/// In-memory station.  Handles are indices into the device table;
/// removed devices leave a hole so old handles turn stale.
#[derive(Debug, Clone, Default)]
pub struct SimulatedStation {
    devices: Vec<Option<SimDevice>>,
    actions: Vec<(DeviceId, DeviceAction)>,
}

impl SimulatedStation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_layout(layout: &StationLayout) -> Self {
        let mut station = Self::new();
        for spec in &layout.devices {
            let id = station.add(&spec.name, spec.kind);
            if let Some(dev) = station.get_mut(id) {
                dev.position = spec.status;
                dev.enabled = spec.enabled;
            }
        }
        station
    }

    pub fn add(&mut self, name: &str, kind: DeviceKind) -> DeviceId {
        let id = DeviceId(self.devices.len() as u32);
        self.devices.push(Some(SimDevice {
            name: name.to_string(),
            kind,
            position: DoorPosition::Closed,
            enabled: true,
        }));
        id
    }

    pub fn add_door(&mut self, name: &str) -> DeviceId {
        self.add(name, DeviceKind::Door)
    }

    pub fn add_vent(&mut self, name: &str) -> DeviceId {
        self.add(name, DeviceKind::Vent)
    }

    /// Destroy a device.  Its handle becomes stale.
    pub fn remove(&mut self, id: DeviceId) {
        if let Some(slot) = self.devices.get_mut(id.0 as usize) {
            *slot = None;
        }
    }

    pub fn rename(&mut self, id: DeviceId, name: &str) {
        if let Some(dev) = self.get_mut(id) {
            dev.name = name.to_string();
        }
    }

    /// Move a door regardless of whether it is enabled (manual override).
    pub fn set_door(&mut self, id: DeviceId, position: DoorPosition) {
        if let Some(dev) = self.get_mut(id) {
            dev.position = position;
        }
    }

    /// Toggle a device's enabled flag by hand, bypassing the controller.
    pub fn set_enabled(&mut self, id: DeviceId, enabled: bool) {
        if let Some(dev) = self.get_mut(id) {
            dev.enabled = enabled;
        }
    }

    pub fn find(&self, name: &str) -> Option<DeviceId> {
        self.devices
            .iter()
            .position(|d| d.as_ref().is_some_and(|d| d.name == name))
            .map(|i| DeviceId(i as u32))
    }

    pub fn is_enabled(&self, id: DeviceId) -> Option<bool> {
        self.get(id).map(|d| d.enabled)
    }

    pub fn position(&self, id: DeviceId) -> Option<DoorPosition> {
        self.get(id).map(|d| d.position)
    }

    /// Every command received, oldest first.
    pub fn actions(&self) -> &[(DeviceId, DeviceAction)] {
        &self.actions
    }

    pub fn clear_actions(&mut self) {
        self.actions.clear();
    }

    /// Live devices as `(handle, name, enabled)`.
    pub fn devices(&self) -> impl Iterator<Item = (DeviceId, &str, bool)> {
        self.devices.iter().enumerate().filter_map(|(i, d)| {
            d.as_ref()
                .map(|d| (DeviceId(i as u32), d.name.as_str(), d.enabled))
        })
    }

    fn get(&self, id: DeviceId) -> Option<&SimDevice> {
        self.devices.get(id.0 as usize).and_then(Option::as_ref)
    }

    fn get_mut(&mut self, id: DeviceId) -> Option<&mut SimDevice> {
        self.devices.get_mut(id.0 as usize).and_then(Option::as_mut)
    }
}

impl DeviceInventory for SimulatedStation {
    fn discover(&self, name_filter: &str) -> Vec<DeviceId> {
        self.devices()
            .filter(|(_, name, _)| name.contains(name_filter))
            .map(|(id, _, _)| id)
            .collect()
    }
}

impl DevicePort for SimulatedStation {
    fn name(&self, id: DeviceId) -> Result<String, DeviceError> {
        self.get(id)
            .map(|d| d.name.clone())
            .ok_or(DeviceError::Stale(id))
    }

    fn kind(&self, id: DeviceId) -> DeviceKind {
        self.get(id).map_or(DeviceKind::Other, |d| d.kind)
    }

    fn door_status(&self, id: DeviceId) -> Result<DoorStatus, DeviceError> {
        match self.get(id) {
            Some(d) if d.kind == DeviceKind::Door => Ok(d.position.status()),
            Some(_) => Err(DeviceError::Rejected(id)),
            None => Err(DeviceError::Stale(id)),
        }
    }

    fn apply_action(&mut self, id: DeviceId, action: DeviceAction) -> Result<(), DeviceError> {
        let dev = self.get_mut(id).ok_or(DeviceError::Stale(id))?;
        dev.enabled = action == DeviceAction::Enable;
        self.actions.push((id, action));
        Ok(())
    }
}

// ───────────────────────────────────────────────────────────────
// Layout file
// ───────────────────────────────────────────────────────────────

/// JSON station description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationLayout {
    pub devices: Vec<DeviceSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceSpec {
    pub name: String,
    pub kind: DeviceKind,
    #[serde(default)]
    pub status: DoorPosition,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

impl StationLayout {
    /// Two airlocks and some unrelated clutter.
    pub fn demo() -> Self {
        let spec = |name: &str, kind| DeviceSpec {
            name: name.to_string(),
            kind,
            status: DoorPosition::Closed,
            enabled: true,
        };
        Self {
            devices: vec![
                spec("Hangar Inner Door [Airlock] [I] [Hangar]", DeviceKind::Door),
                spec("Hangar Outer Door [Airlock] [E] [Hangar]", DeviceKind::Door),
                spec("Hangar Vent [Airlock] [Hangar]", DeviceKind::Vent),
                spec("Bridge Hatch [Airlock] [Bridge]", DeviceKind::Door),
                spec("Bridge Hull Door [Airlock] [E] [Bridge]", DeviceKind::Door),
                spec("Bridge Vent A [Airlock] [Bridge]", DeviceKind::Vent),
                spec("Bridge Vent B [Airlock] [Bridge]", DeviceKind::Vent),
                spec("Bridge Light [Airlock] [Bridge]", DeviceKind::Other),
                spec("Cargo Door [I]", DeviceKind::Door),
            ],
        }
    }
}
