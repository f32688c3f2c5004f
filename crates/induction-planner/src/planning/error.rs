use super::domain::VehicleId;

/// Caller contract violations. Data-quality problems never surface here; they fail
/// closed inside the allocator instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanningError {
    #[error("vehicle at position {position} has an empty id")]
    MissingVehicleId { position: usize },
    #[error("vehicle {0} appears more than once in the fleet snapshot")]
    DuplicateVehicle(VehicleId),
    #[error("vehicle {id} has invalid mileage {value}; mileage must be a finite, non-negative number")]
    InvalidMileage { id: VehicleId, value: f64 },
    #[error("unknown bucket '{0}'; expected service, standby, or maintenance")]
    UnknownBucket(String),
}
