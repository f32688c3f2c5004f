use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::domain::VehicleId;

pub const DEFAULT_MIN_SERVICE_TRAINS: usize = 14;
pub const DEFAULT_MIN_STANDBY_TRAINS: usize = 3;
/// Extra service slots allowed above the minimum outside emergency mode.
pub const SERVICE_HEADROOM: usize = 2;
/// Fixed operational ceiling on service vehicles in emergency mode.
pub const EMERGENCY_SERVICE_CEILING: usize = 18;
/// Fixed operational ceiling on standby vehicles outside emergency mode.
pub const STANDBY_CEILING: usize = 4;

/// Operator input for one planning run. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_service_trains: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_standby_trains: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_mode: Option<bool>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub excluded_trains: BTreeSet<VehicleId>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub emergency_maintenance: BTreeSet<VehicleId>,
}

impl ConstraintSet {
    pub fn resolve(&self) -> ResolvedConstraints<'_> {
        ResolvedConstraints {
            min_service_trains: self
                .min_service_trains
                .unwrap_or(DEFAULT_MIN_SERVICE_TRAINS),
            min_standby_trains: self
                .min_standby_trains
                .unwrap_or(DEFAULT_MIN_STANDBY_TRAINS),
            emergency_mode: self.emergency_mode.unwrap_or(false),
            excluded_trains: &self.excluded_trains,
            emergency_maintenance: &self.emergency_maintenance,
        }
    }
}

/// Constraint set with defaults filled in, borrowed for the length of one allocation.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedConstraints<'a> {
    pub min_service_trains: usize,
    pub min_standby_trains: usize,
    pub emergency_mode: bool,
    pub excluded_trains: &'a BTreeSet<VehicleId>,
    pub emergency_maintenance: &'a BTreeSet<VehicleId>,
}

impl ResolvedConstraints<'_> {
    pub fn service_capacity(&self) -> usize {
        self.min_service_trains.saturating_add(SERVICE_HEADROOM)
    }

    pub fn standby_capacity(&self) -> usize {
        if self.emergency_mode {
            self.min_standby_trains
        } else {
            STANDBY_CEILING
        }
    }
}
