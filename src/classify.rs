//! Device classification.
//!
//! The base kind comes from the host's capability query, never from
//! tags.  Tags only refine a door into an interior or exterior role.

use crate::device::DeviceKind;
use crate::tags::{DeviceLabels, DoorRole};

/// Where a grouped device ends up inside its airlock unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Vent,
    InteriorDoor,
    ExteriorDoor,
    /// A door with no role tag.  Treated as interior-facing.
    UnlabeledDoor,
    /// Neither a door nor a vent; not controlled.
    Unrecognized,
}

/// Combine the host-reported kind with the tag-declared role.
pub fn classify(kind: DeviceKind, labels: &DeviceLabels) -> Placement {
    match kind {
        DeviceKind::Vent => Placement::Vent,
        DeviceKind::Door => match labels.role {
            DoorRole::Interior => Placement::InteriorDoor,
            DoorRole::Exterior => Placement::ExteriorDoor,
            DoorRole::Unspecified => Placement::UnlabeledDoor,
        },
        DeviceKind::Other => Placement::Unrecognized,
    }
}
