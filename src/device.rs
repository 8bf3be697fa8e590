//! Device handles and the small value types exchanged with the host.
//!
//! The controller never owns a device.  It holds a [`DeviceId`] handed
//! out by the inventory and asks the [`DevicePort`](crate::app::ports::DevicePort)
//! about it each time it needs a reading or wants to issue a command.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Opaque handle to a device discovered in the host inventory.
///
/// Valid for one registry generation.  A handle whose device has since
/// been removed reads back as [`DeviceError::Stale`](crate::error::DeviceError::Stale).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeviceId(pub u32);

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Structural kind of a device as reported by the host.
///
/// Anything the host cannot answer cleanly is [`DeviceKind::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Door,
    Vent,
    Other,
}

/// Door sensor reading.  Only `Closed` counts as sealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DoorStatus {
    Closed,
    NotClosed,
}

impl DoorStatus {
    pub fn is_closed(self) -> bool {
        self == Self::Closed
    }
}

/// Command issued to a door or vent.
///
/// `Disable` on a door locks it; on a vent it stops pressurisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceAction {
    Enable,
    Disable,
}

impl fmt::Display for DeviceAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enable => write!(f, "enable"),
            Self::Disable => write!(f, "disable"),
        }
    }
}
