//! Allocation engine and the service surface around it.
//!
//! Data flows one way: fleet snapshot → [`Scorer`] → ranked candidates → [`Allocator`]
//! → [`Plan`]. Scenario comparison runs the same pipeline twice and diffs bucket sizes.

mod allocator;
mod comparison;
mod constraints;
pub mod domain;
mod error;
pub mod insights;
mod plan;
mod reasoning;
pub mod router;
pub mod rules;
pub mod scenario;
pub mod scoring;
pub mod service;
pub mod source;

#[cfg(test)]
mod tests;

pub use allocator::Allocator;
pub use comparison::{BucketDelta, ComparisonResult, ScenarioComparison};
pub use constraints::{
    ConstraintSet, ResolvedConstraints, DEFAULT_MIN_SERVICE_TRAINS, DEFAULT_MIN_STANDBY_TRAINS,
    EMERGENCY_SERVICE_CEILING, SERVICE_HEADROOM, STANDBY_CEILING,
};
pub use domain::{
    BrandingCategory, Bucket, CleaningStatus, FitnessStatus, JobCardStatus, ScoredVehicle,
    VehicleId, VehicleRecord, EXCLUDED_AVAILABILITY,
};
pub use error::PlanningError;
pub use insights::{FleetStatistics, OptimizationReport, OptimizationSuggestion};
pub use plan::{Assignment, BucketCounts, Plan};
pub use router::planning_router;
pub use rules::{RuleKind, RuleSet};
pub use scenario::{Scenario, VehicleModification, VehicleOverrides};
pub use scoring::{ScoreBreakdown, ScoreComponent, ScoreFactor, Scorer, ScoringConfig};
pub use service::{PlanningService, PlanningServiceError};
pub use source::{FleetSnapshotSource, SnapshotError};
