use serde::Serialize;

use super::domain::{Bucket, VehicleId};
use super::rules::RuleKind;

/// Placement of one vehicle in a plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: VehicleId,
    pub bucket: Bucket,
    pub priority_score: f64,
    pub reasoning: String,
    pub rule: RuleKind,
}

/// Bucket sizes of a plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BucketCounts {
    pub service: usize,
    pub standby: usize,
    pub maintenance: usize,
}

impl BucketCounts {
    pub fn get(&self, bucket: Bucket) -> usize {
        match bucket {
            Bucket::Service => self.service,
            Bucket::Standby => self.standby,
            Bucket::Maintenance => self.maintenance,
        }
    }

    /// Vehicles able to run today: service plus standby.
    pub fn available(&self) -> usize {
        self.service + self.standby
    }
}

/// Outcome of one allocation. Built once and never changed afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Plan {
    service: Vec<Assignment>,
    standby: Vec<Assignment>,
    maintenance: Vec<Assignment>,
    /// Every assignment in overall rank order.
    all: Vec<Assignment>,
}

impl Plan {
    pub(crate) fn push(&mut self, assignment: Assignment) {
        match assignment.bucket {
            Bucket::Service => self.service.push(assignment.clone()),
            Bucket::Standby => self.standby.push(assignment.clone()),
            Bucket::Maintenance => self.maintenance.push(assignment.clone()),
        }
        self.all.push(assignment);
    }

    pub fn service(&self) -> &[Assignment] {
        &self.service
    }

    pub fn standby(&self) -> &[Assignment] {
        &self.standby
    }

    pub fn maintenance(&self) -> &[Assignment] {
        &self.maintenance
    }

    pub fn all(&self) -> &[Assignment] {
        &self.all
    }

    pub fn bucket(&self, bucket: Bucket) -> &[Assignment] {
        match bucket {
            Bucket::Service => &self.service,
            Bucket::Standby => &self.standby,
            Bucket::Maintenance => &self.maintenance,
        }
    }

    pub fn counts(&self) -> BucketCounts {
        BucketCounts {
            service: self.service.len(),
            standby: self.standby.len(),
            maintenance: self.maintenance.len(),
        }
    }

    pub fn assignment_for(&self, id: &VehicleId) -> Option<&Assignment> {
        self.all.iter().find(|assignment| &assignment.id == id)
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}
