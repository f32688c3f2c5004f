use std::collections::HashSet;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use super::allocator::Allocator;
use super::comparison::ScenarioComparison;
use super::constraints::ConstraintSet;
use super::domain::{FitnessStatus, VehicleId, VehicleRecord};
use super::error::PlanningError;
use super::insights::{suggestions, FleetStatistics, OptimizationReport};
use super::plan::Plan;
use super::scenario::Scenario;
use super::scoring::ScoringConfig;
use super::source::{FleetSnapshotSource, SnapshotError};

/// Facade composing the allocator, the tie-break seed policy, and the fleet snapshot.
pub struct PlanningService<S> {
    allocator: Allocator,
    seed: Option<u64>,
    fleet: Arc<S>,
}

impl<S> PlanningService<S>
where
    S: FleetSnapshotSource + 'static,
{
    pub fn new(fleet: Arc<S>, config: ScoringConfig) -> Self {
        Self {
            allocator: Allocator::new(config),
            seed: None,
            fleet,
        }
    }

    /// Pins every run to one tie-break seed so repeated calls give identical plans.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn allocator(&self) -> &Allocator {
        &self.allocator
    }

    pub fn fleet_snapshot(&self) -> Result<Vec<VehicleRecord>, PlanningServiceError> {
        Ok(self.fleet.snapshot()?)
    }

    /// Looks a single vehicle up in the current snapshot.
    pub fn vehicle(&self, id: &VehicleId) -> Result<Option<VehicleRecord>, PlanningServiceError> {
        Ok(self
            .fleet_snapshot()?
            .into_iter()
            .find(|vehicle| &vehicle.id == id))
    }

    /// Allocate a fleet under the given constraints (defaults when `None`).
    pub fn generate_plan(
        &self,
        vehicles: &[VehicleRecord],
        constraints: Option<&ConstraintSet>,
    ) -> Result<Plan, PlanningServiceError> {
        validate_fleet(vehicles)?;
        let defaults = ConstraintSet::default();
        let constraints = constraints.unwrap_or(&defaults);

        let seed = self.next_seed();
        let plan = self
            .allocator
            .allocate(vehicles, constraints, &mut StdRng::seed_from_u64(seed));

        let counts = plan.counts();
        info!(
            vehicles = vehicles.len(),
            service = counts.service,
            standby = counts.standby,
            maintenance = counts.maintenance,
            seed,
            "induction plan generated"
        );
        Ok(plan)
    }

    /// Allocate baseline and scenario fleets and diff their bucket sizes.
    pub fn compare_scenario(
        &self,
        baseline: &[VehicleRecord],
        scenario: &[VehicleRecord],
        scenario_constraints: Option<&ConstraintSet>,
    ) -> Result<ScenarioComparison, PlanningServiceError> {
        validate_fleet(baseline)?;
        validate_fleet(scenario)?;

        let seed = self.next_seed();
        let result = self
            .allocator
            .compare(baseline, scenario, scenario_constraints, seed);

        info!(
            service_delta = result.comparison.service.delta,
            standby_delta = result.comparison.standby.delta,
            maintenance_delta = result.comparison.maintenance.delta,
            available_delta = result.comparison.total_available.delta,
            seed,
            "scenario compared"
        );
        Ok(result)
    }

    /// Apply a scenario to `fleet` and compare the result against the untouched fleet.
    pub fn simulate(
        &self,
        fleet: &[VehicleRecord],
        scenario: &Scenario,
    ) -> Result<ScenarioComparison, PlanningServiceError> {
        let transformed = scenario.apply(fleet);
        debug!(
            excluded = scenario.excluded_trains.len(),
            emergency = scenario.emergency_maintenance.len(),
            modified = scenario.modified_trains.len(),
            "scenario applied"
        );
        self.compare_scenario(fleet, &transformed, scenario.constraints())
    }

    pub fn optimize(
        &self,
        fleet: &[VehicleRecord],
    ) -> Result<OptimizationReport, PlanningServiceError> {
        let plan = self.generate_plan(fleet, None)?;
        Ok(OptimizationReport {
            current_plan: plan.counts(),
            suggestions: suggestions(fleet),
        })
    }

    pub fn statistics(&self, fleet: &[VehicleRecord]) -> FleetStatistics {
        FleetStatistics::from_fleet(fleet)
    }

    fn next_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

/// Rejects caller contract violations and logs records that will fail closed.
pub fn validate_fleet(vehicles: &[VehicleRecord]) -> Result<(), PlanningError> {
    let mut seen = HashSet::with_capacity(vehicles.len());

    for (position, vehicle) in vehicles.iter().enumerate() {
        if vehicle.id.as_str().trim().is_empty() {
            return Err(PlanningError::MissingVehicleId { position });
        }
        if !seen.insert(&vehicle.id) {
            return Err(PlanningError::DuplicateVehicle(vehicle.id.clone()));
        }
        match vehicle.mileage {
            Some(value) if !value.is_finite() || value < 0.0 => {
                return Err(PlanningError::InvalidMileage {
                    id: vehicle.id.clone(),
                    value,
                });
            }
            Some(_) => {}
            None => warn!(vehicle = %vehicle.id, "mileage missing; vehicle held in maintenance"),
        }
        if let FitnessStatus::Unrecognized(raw) = &vehicle.fitness_status {
            warn!(
                vehicle = %vehicle.id,
                fitness_status = %raw,
                "unrecognized fitness status treated as ineligible"
            );
        }
    }

    Ok(())
}

/// Error raised by the planning service.
#[derive(Debug, thiserror::Error)]
pub enum PlanningServiceError {
    #[error(transparent)]
    Planning(#[from] PlanningError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}
