use induction_planner::config::PlannerConfig;
use induction_planner::error::AppError;
use induction_planner::fleet::{load_fleet, FleetError};
use induction_planner::planning::{
    FleetSnapshotSource, ScoringConfig, SnapshotError, VehicleRecord,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

use crate::demo::{synthetic_fleet, DEFAULT_DEMO_FLEET_SIZE};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Snapshot loaded once at startup and served unchanged for the lifetime of the process.
#[derive(Default, Clone)]
pub(crate) struct InMemoryFleetSource {
    vehicles: Arc<Vec<VehicleRecord>>,
}

impl InMemoryFleetSource {
    pub(crate) fn new(vehicles: Vec<VehicleRecord>) -> Self {
        Self {
            vehicles: Arc::new(vehicles),
        }
    }
}

impl FleetSnapshotSource for InMemoryFleetSource {
    fn snapshot(&self) -> Result<Vec<VehicleRecord>, SnapshotError> {
        Ok(self.vehicles.as_ref().clone())
    }
}

pub(crate) fn scoring_config_from(planner: &PlannerConfig) -> ScoringConfig {
    ScoringConfig {
        fleet_average_mileage: planner.fleet_average_mileage,
        ..ScoringConfig::default()
    }
}

/// Reads the configured snapshot file, or generates a demo fleet when none is set.
pub(crate) fn load_configured_fleet(planner: &PlannerConfig) -> Result<Vec<VehicleRecord>, AppError> {
    match &planner.fleet_snapshot {
        Some(path) => {
            let fleet = load_fleet(path)?;
            info!(path = %path.display(), vehicles = fleet.len(), "fleet snapshot loaded");
            Ok(fleet)
        }
        None => {
            let seed = planner.tie_break_seed.unwrap_or_else(rand::random);
            let fleet = synthetic_fleet(DEFAULT_DEMO_FLEET_SIZE, seed);
            info!(vehicles = fleet.len(), seed, "no fleet snapshot configured; serving generated demo fleet");
            Ok(fleet)
        }
    }
}

pub(crate) fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, FleetError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
