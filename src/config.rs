//! Controller configuration parameters
//!
//! Reserved tags, tag delimiters, the tick cadence and the group
//! membership policy.  Values can be overridden from a JSON file via
//! [`ConfigPort`](crate::app::ports::ConfigPort).

use core::fmt;

use serde::{Deserialize, Serialize};

/// How a device is matched against a unit's group name at setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MembershipPolicy {
    /// A device joins every unit whose group tag appears anywhere in its
    /// name, so one device may sit in more than one unit.
    #[default]
    Permissive,
    /// A device joins only the unit named by its resolved group tag.
    Strict,
}

/// Core controller configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirlockConfig {
    // --- Reserved tags ---
    /// Marks a device as taking part in some airlock.  Also the discovery filter.
    pub marker_tag: String,
    /// Marks a door as facing the pressurised interior.
    pub interior_tag: String,
    /// Marks a door as facing the exterior.
    pub exterior_tag: String,

    // --- Tag syntax ---
    pub tag_start: char,
    pub tag_end: char,

    // --- Grouping ---
    pub membership: MembershipPolicy,

    // --- Timing ---
    /// Period between controller ticks (milliseconds)
    pub tick_interval_ms: u32,
}

impl Default for AirlockConfig {
    fn default() -> Self {
        Self {
            marker_tag: "[Airlock]".into(),
            interior_tag: "[I]".into(),
            exterior_tag: "[E]".into(),

            tag_start: '[',
            tag_end: ']',

            membership: MembershipPolicy::Permissive,

            // Every tenth frame of a 60 Hz host.
            tick_interval_ms: 166,
        }
    }
}

impl AirlockConfig {
    /// Range- and consistency-check every field.
    ///
    /// Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tag_start == self.tag_end {
            return Err(ConfigError::ValidationFailed(
                "tag_start and tag_end must differ",
            ));
        }
        for (tag, what) in [
            (&self.marker_tag, "marker_tag must be a single delimited tag"),
            (&self.interior_tag, "interior_tag must be a single delimited tag"),
            (&self.exterior_tag, "exterior_tag must be a single delimited tag"),
        ] {
            if !self.is_single_tag(tag) {
                return Err(ConfigError::ValidationFailed(what));
            }
        }
        if self.marker_tag == self.interior_tag
            || self.marker_tag == self.exterior_tag
            || self.interior_tag == self.exterior_tag
        {
            return Err(ConfigError::ValidationFailed("reserved tags must be distinct"));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("tick_interval_ms must be > 0"));
        }
        Ok(())
    }

    /// `[body]` with no delimiter inside `body`.
    fn is_single_tag(&self, tag: &str) -> bool {
        let Some(body) = tag
            .strip_prefix(self.tag_start)
            .and_then(|rest| rest.strip_suffix(self.tag_end))
        else {
            return false;
        };
        !body.contains(self.tag_start) && !body.contains(self.tag_end)
    }
}

/// Errors from loading or validating configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// No configuration source exists.
    NotFound,
    /// The stored configuration could not be decoded.
    Corrupted,
    /// A field failed validation.  The message names the field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the configuration backend.
    IoError,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for ConfigError {}
