//! Airlock registry and the builder that derives it from device names.
//!
//! ```text
//!   discover(marker) ──▶ labels + placement ──▶ group names (first-seen order)
//!                                                   │
//!                          for each group ◀─────────┘
//!                            place members ──▶ AirlockUnit
//! ```
//!
//! The builder runs at setup (and on rescan), never per tick.  The
//! resulting [`Registry`] is immutable; replacing it is a whole-value
//! swap done by the controller.

use log::{debug, info, warn};

use crate::app::ports::{DeviceInventory, DevicePort, DiagnosticSink};
use crate::classify::{Placement, classify};
use crate::config::MembershipPolicy;
use crate::device::DeviceId;
use crate::interlock::AirlockUnit;
use crate::tags::{DeviceLabels, Tag, TagScheme};

/// The complete set of airlock units for one registry generation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    units: Vec<AirlockUnit>,
}

impl Registry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Units in construction order (first-seen group order).
    pub fn units(&self) -> &[AirlockUnit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn find(&self, group: &str) -> Option<&AirlockUnit> {
        self.units.iter().find(|u| u.name() == group)
    }

    /// Total device slots across all units.  A device placed in two
    /// units counts twice.
    pub fn device_count(&self) -> usize {
        self.units.iter().map(AirlockUnit::device_count).sum()
    }
}

/// A discovered device with its name already interpreted.
struct Candidate {
    id: DeviceId,
    name: String,
    labels: DeviceLabels,
    placement: Placement,
}

/// Builds a [`Registry`] from the host inventory.
pub struct RegistryBuilder<'a> {
    scheme: &'a TagScheme,
    membership: MembershipPolicy,
}

impl<'a> RegistryBuilder<'a> {
    pub fn new(scheme: &'a TagScheme, membership: MembershipPolicy) -> Self {
        Self { scheme, membership }
    }

    /// Discover every marker-tagged device and group it into units.
    pub fn build(
        &self,
        station: &(impl DeviceInventory + DevicePort),
        diag: &mut impl DiagnosticSink,
    ) -> Registry {
        let ids = station.discover(self.scheme.marker());
        debug!("Registry: {} marker-tagged devices discovered", ids.len());

        let candidates: Vec<Candidate> = ids
            .into_iter()
            .filter_map(|id| match station.name(id) {
                Ok(name) => {
                    let labels = self.scheme.labels(&name);
                    let placement = classify(station.kind(id), &labels);
                    Some(Candidate {
                        id,
                        name,
                        labels,
                        placement,
                    })
                }
                Err(e) => {
                    warn!("Registry: skipping device {id}: {e}");
                    diag.append_line(&format!("Skipping device {id}: {e}"));
                    None
                }
            })
            .collect();

        let mut units = Vec::new();
        for group in group_names(&candidates) {
            diag.append_line(&format!("Creating airlock group '{group}'"));
            let mut unit = AirlockUnit::new(group.clone());

            for c in candidates.iter().filter(|c| self.is_member(c, &group)) {
                let line = match c.placement {
                    Placement::Vent => {
                        unit.add_vent(c.id);
                        format!("Found vent '{}' for airlock '{group}'", c.name)
                    }
                    Placement::InteriorDoor => {
                        unit.add_interior_door(c.id);
                        format!("Found interior door '{}' for airlock '{group}'", c.name)
                    }
                    Placement::ExteriorDoor => {
                        unit.add_exterior_door(c.id);
                        format!("Found exterior door '{}' for airlock '{group}'", c.name)
                    }
                    Placement::UnlabeledDoor => {
                        unit.add_interior_door(c.id);
                        format!(
                            "Found unknown door, assuming interior '{}' for airlock '{group}'",
                            c.name
                        )
                    }
                    Placement::Unrecognized => {
                        warn!("Registry: '{}' is neither door nor vent", c.name);
                        format!("Found unknown block '{}' for airlock '{group}'", c.name)
                    }
                };
                debug!("Registry: {line}");
                diag.append_line(&line);
            }

            info!(
                "Airlock '{}': {} interior, {} exterior, {} vents",
                unit.name(),
                unit.interior_doors().len(),
                unit.exterior_doors().len(),
                unit.vents().len()
            );
            units.push(unit);
        }

        Registry { units }
    }

    fn is_member(&self, candidate: &Candidate, group: &Tag) -> bool {
        match self.membership {
            MembershipPolicy::Permissive => candidate.labels.has_tag(group),
            MembershipPolicy::Strict => candidate.labels.group.as_ref() == Some(group),
        }
    }
}

/// Distinct resolved group names, first-seen order.
fn group_names(candidates: &[Candidate]) -> Vec<Tag> {
    let mut names: Vec<Tag> = Vec::new();
    for group in candidates.iter().filter_map(|c| c.labels.group.as_ref()) {
        if !names.contains(group) {
            names.push(group.clone());
        }
    }
    names
}
