//! Unified error types for the airlock controller.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! controller loop's error handling uniform.  All variants are `Copy` so
//! they can be stored in the failure history without allocation.

use core::fmt;

use crate::config::ConfigError;
use crate::device::DeviceId;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A device read or command failed.
    Device(DeviceError),
    /// Configuration is invalid or could not be loaded.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Device(e) => write!(f, "device: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Device errors
// ---------------------------------------------------------------------------

/// Failure reported by the host for a single device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceError {
    /// The handle no longer resolves to a device (removed or destroyed).
    Stale(DeviceId),
    /// The device refused the command.
    Rejected(DeviceId),
}

impl DeviceError {
    pub fn device(self) -> DeviceId {
        match self {
            Self::Stale(id) | Self::Rejected(id) => id,
        }
    }
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stale(id) => write!(f, "device {id} no longer exists"),
            Self::Rejected(id) => write!(f, "device {id} rejected the command"),
        }
    }
}

impl std::error::Error for DeviceError {}

impl From<DeviceError> for Error {
    fn from(e: DeviceError) -> Self {
        Self::Device(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
