//! Airlock unit and its interlock policy.
//!
//! The interlock state is **derived every tick** from the door sensors;
//! nothing about the previous tick is remembered.  A door or vent that
//! someone toggled by hand is therefore corrected on the next pass.
//!
//! ## Policy (first match wins)
//!
//! | State              | Condition                 | Interior | Exterior | Vents   |
//! |--------------------|---------------------------|----------|----------|---------|
//! | `InteriorBreached` | any interior door open    | -        | disable  | disable |
//! | `ExteriorBreached` | any exterior door open    | disable  | -        | disable |
//! | `Sealed`           | otherwise                 | enable   | enable   | enable  |
//!
//! With both sides open the interior rule wins: the exterior is sealed
//! first.

use crate::app::ports::DevicePort;
use crate::device::{DeviceAction, DeviceId};
use crate::error::DeviceError;
use crate::tags::Tag;

/// Interlock state of one unit for the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterlockState {
    Sealed,
    InteriorBreached,
    ExteriorBreached,
}

impl InterlockState {
    /// Pure policy over the two breach conditions.
    pub fn assess(interior_open: bool, exterior_open: bool) -> Self {
        if interior_open {
            Self::InteriorBreached
        } else if exterior_open {
            Self::ExteriorBreached
        } else {
            Self::Sealed
        }
    }

    /// Commands this state calls for.
    pub fn plan(self) -> InterlockPlan {
        match self {
            Self::InteriorBreached => InterlockPlan {
                interior: None,
                exterior: Some(DeviceAction::Disable),
                vents: DeviceAction::Disable,
            },
            Self::ExteriorBreached => InterlockPlan {
                interior: Some(DeviceAction::Disable),
                exterior: None,
                vents: DeviceAction::Disable,
            },
            Self::Sealed => InterlockPlan {
                interior: Some(DeviceAction::Enable),
                exterior: Some(DeviceAction::Enable),
                vents: DeviceAction::Enable,
            },
        }
    }
}

/// Per-collection commands for one tick.  `None` leaves the doors as
/// they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterlockPlan {
    pub interior: Option<DeviceAction>,
    pub exterior: Option<DeviceAction>,
    pub vents: DeviceAction,
}

/// One logical airlock: a group name and the devices tagged into it.
///
/// Membership is fixed once the registry is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirlockUnit {
    name: Tag,
    vents: Vec<DeviceId>,
    interior_doors: Vec<DeviceId>,
    exterior_doors: Vec<DeviceId>,
}

impl AirlockUnit {
    pub(crate) fn new(name: Tag) -> Self {
        Self {
            name,
            vents: Vec::new(),
            interior_doors: Vec::new(),
            exterior_doors: Vec::new(),
        }
    }

    pub(crate) fn add_vent(&mut self, id: DeviceId) {
        self.vents.push(id);
    }

    pub(crate) fn add_interior_door(&mut self, id: DeviceId) {
        self.interior_doors.push(id);
    }

    pub(crate) fn add_exterior_door(&mut self, id: DeviceId) {
        self.exterior_doors.push(id);
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn vents(&self) -> &[DeviceId] {
        &self.vents
    }

    pub fn interior_doors(&self) -> &[DeviceId] {
        &self.interior_doors
    }

    pub fn exterior_doors(&self) -> &[DeviceId] {
        &self.exterior_doors
    }

    pub fn device_count(&self) -> usize {
        self.vents.len() + self.interior_doors.len() + self.exterior_doors.len()
    }

    /// Read the door sensors and derive the current state.
    ///
    /// Exterior doors are only read when every interior door is closed.
    pub fn assess(&self, dev: &impl DevicePort) -> Result<InterlockState, DeviceError> {
        let interior_open = any_open(&self.interior_doors, dev)?;
        let exterior_open = !interior_open && any_open(&self.exterior_doors, dev)?;
        Ok(InterlockState::assess(interior_open, exterior_open))
    }

    /// Assess and enforce the interlock for this tick.
    ///
    /// Commands go out interior, exterior, vents.  A failed read sends
    /// nothing; once the state is known every planned command is sent and
    /// the first command error is returned afterwards.
    pub fn update(&self, dev: &mut impl DevicePort) -> Result<InterlockState, DeviceError> {
        let state = self.assess(&*dev)?;
        let plan = state.plan();

        let mut first_err = None;
        if let Some(action) = plan.interior {
            apply_all(&self.interior_doors, action, dev, &mut first_err);
        }
        if let Some(action) = plan.exterior {
            apply_all(&self.exterior_doors, action, dev, &mut first_err);
        }
        apply_all(&self.vents, plan.vents, dev, &mut first_err);

        match first_err {
            Some(e) => Err(e),
            None => Ok(state),
        }
    }
}

fn any_open(doors: &[DeviceId], dev: &impl DevicePort) -> Result<bool, DeviceError> {
    for &door in doors {
        if !dev.door_status(door)?.is_closed() {
            return Ok(true);
        }
    }
    Ok(false)
}

fn apply_all(
    ids: &[DeviceId],
    action: DeviceAction,
    dev: &mut impl DevicePort,
    first_err: &mut Option<DeviceError>,
) {
    for &id in ids {
        if let Err(e) = dev.apply_action(id, action) {
            first_err.get_or_insert(e);
        }
    }
}
