use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::constraints::ConstraintSet;
use super::domain::{
    BrandingCategory, CleaningStatus, FitnessStatus, JobCardStatus, VehicleId, VehicleRecord,
    EXCLUDED_AVAILABILITY,
};

/// Hypothetical change to the fleet snapshot used to probe allocation sensitivity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    #[serde(default)]
    pub excluded_trains: BTreeSet<VehicleId>,
    #[serde(default)]
    pub emergency_maintenance: BTreeSet<VehicleId>,
    #[serde(default)]
    pub modified_trains: Vec<VehicleModification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_constraints: Option<ConstraintSet>,
}

/// Field overrides for one vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleModification {
    #[serde(alias = "id")]
    pub train_id: VehicleId,
    #[serde(default)]
    pub changes: VehicleOverrides,
}

/// Each present field replaces the vehicle's value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitness_status: Option<FitnessStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_card_status: Option<JobCardStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branding_category: Option<BrandingCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleaning_status: Option<CleaningStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mileage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
}

impl VehicleOverrides {
    pub fn apply_to(&self, record: &mut VehicleRecord) {
        if let Some(status) = &self.fitness_status {
            record.fitness_status = status.clone();
        }
        if let Some(status) = &self.job_card_status {
            record.job_card_status = status.clone();
        }
        if let Some(category) = &self.branding_category {
            record.branding_category = category.clone();
        }
        if let Some(status) = &self.cleaning_status {
            record.cleaning_status = status.clone();
        }
        if let Some(mileage) = self.mileage {
            record.mileage = Some(mileage);
        }
        if let Some(availability) = &self.availability {
            record.availability = Some(availability.clone());
        }
    }
}

impl Scenario {
    pub fn constraints(&self) -> Option<&ConstraintSet> {
        self.additional_constraints.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.excluded_trains.is_empty()
            && self.emergency_maintenance.is_empty()
            && self.modified_trains.is_empty()
            && self.additional_constraints.is_none()
    }

    /// Returns the transformed fleet; the source is left untouched.
    ///
    /// Per vehicle only the first applicable transform runs: exclusion, then forced
    /// emergency maintenance, then the first matching field override.
    pub fn apply(&self, fleet: &[VehicleRecord]) -> Vec<VehicleRecord> {
        fleet
            .iter()
            .map(|vehicle| {
                let mut transformed = vehicle.clone();
                if self.excluded_trains.contains(&vehicle.id) {
                    transformed.availability = Some(EXCLUDED_AVAILABILITY.to_string());
                } else if self.emergency_maintenance.contains(&vehicle.id) {
                    transformed.fitness_status = FitnessStatus::EmergencyMaintenanceRequired;
                } else if let Some(modification) = self
                    .modified_trains
                    .iter()
                    .find(|modification| modification.train_id == vehicle.id)
                {
                    modification.changes.apply_to(&mut transformed);
                }
                transformed
            })
            .collect()
    }
}
