//! Port traits: the boundary between the interlock logic and the host.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AirlockController (domain)
//! ```
//!
//! The host game/station implements these traits.  The
//! [`AirlockController`](super::service::AirlockController) consumes them
//! via generics, so the domain core never touches a real device.
//!
//! All calls are synchronous and expected not to block.

use crate::config::{AirlockConfig, ConfigError};
use crate::device::{DeviceAction, DeviceId, DeviceKind, DoorStatus};
use crate::error::DeviceError;

// ───────────────────────────────────────────────────────────────
// Inventory port (host → domain, setup only)
// ───────────────────────────────────────────────────────────────

/// Source of device handles.  Queried once per registry build.
pub trait DeviceInventory {
    /// Every device whose name contains `name_filter`, in host order.
    fn discover(&self, name_filter: &str) -> Vec<DeviceId>;
}

// ───────────────────────────────────────────────────────────────
// Device port (sensor reads and actuator commands)
// ───────────────────────────────────────────────────────────────

/// Per-device introspection, door sensing and actuation.
pub trait DevicePort {
    /// Current display name.
    fn name(&self, id: DeviceId) -> Result<String, DeviceError>;

    /// Capability query.  Never fails: anything ambiguous or unknown,
    /// including a stale handle, is [`DeviceKind::Other`].
    fn kind(&self, id: DeviceId) -> DeviceKind;

    /// Door sensor reading.
    fn door_status(&self, id: DeviceId) -> Result<DoorStatus, DeviceError>;

    /// Fire-and-forget command.  Idempotent from the caller's view.
    fn apply_action(&mut self, id: DeviceId, action: DeviceAction) -> Result<(), DeviceError>;
}

// ───────────────────────────────────────────────────────────────
// Diagnostic sink (domain → host text buffer)
// ───────────────────────────────────────────────────────────────

/// A single growing block of human-readable trace text.
///
/// Written by the controller, never read back by it.
pub trait DiagnosticSink {
    fn append_line(&mut self, line: &str);

    fn clear(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The controller emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port
// ───────────────────────────────────────────────────────────────

/// Loads controller configuration.
///
/// Implementations MUST validate before returning; invalid values are
/// rejected with [`ConfigError::ValidationFailed`], not clamped.
pub trait ConfigPort {
    fn load(&self) -> Result<AirlockConfig, ConfigError>;
}
