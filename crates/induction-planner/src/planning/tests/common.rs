use std::sync::{Arc, Mutex};

use axum::response::Response;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;

use crate::planning::domain::{
    BrandingCategory, CleaningStatus, FitnessStatus, JobCardStatus, VehicleRecord,
};
use crate::planning::source::{FleetSnapshotSource, SnapshotError};
use crate::planning::{planning_router, Allocator, PlanningService, ScoringConfig};

pub(super) fn deterministic_config() -> ScoringConfig {
    ScoringConfig {
        tie_break_span: 0.0,
        ..ScoringConfig::default()
    }
}

pub(super) fn deterministic_allocator() -> Allocator {
    Allocator::new(deterministic_config())
}

pub(super) fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Valid, closed, clean, standard livery at the reference mileage: scores 110.
pub(super) fn ready(id: &str) -> VehicleRecord {
    VehicleRecord::new(id, 42_000.0)
}

pub(super) fn open_card(id: &str) -> VehicleRecord {
    let mut vehicle = ready(id);
    vehicle.job_card_status = JobCardStatus::Open;
    vehicle
}

pub(super) fn expired(id: &str) -> VehicleRecord {
    let mut vehicle = ready(id);
    vehicle.fitness_status = FitnessStatus::Expired;
    vehicle
}

pub(super) fn numbered(prefix: &str, count: usize, build: fn(&str) -> VehicleRecord) -> Vec<VehicleRecord> {
    (1..=count)
        .map(|index| build(&format!("{prefix}-{index:02}")))
        .collect()
}

/// T1 strong, T2 expired, T3 penalised on every axis.
pub(super) fn three_vehicle_fleet() -> Vec<VehicleRecord> {
    let mut t1 = VehicleRecord::new("T1", 40_000.0);
    t1.branding_category = BrandingCategory::Premium;

    let t2 = {
        let mut vehicle = expired("T2");
        vehicle.mileage = Some(38_000.0);
        vehicle
    };

    let mut t3 = VehicleRecord::new("T3", 90_000.0);
    t3.job_card_status = JobCardStatus::Open;
    t3.cleaning_status = CleaningStatus::Pending;
    t3.branding_category = BrandingCategory::Basic;

    vec![t1, t2, t3]
}

#[derive(Default)]
pub(super) struct MemoryFleet {
    vehicles: Mutex<Vec<VehicleRecord>>,
}

impl MemoryFleet {
    pub(super) fn with(vehicles: Vec<VehicleRecord>) -> Self {
        Self {
            vehicles: Mutex::new(vehicles),
        }
    }
}

impl FleetSnapshotSource for MemoryFleet {
    fn snapshot(&self) -> Result<Vec<VehicleRecord>, SnapshotError> {
        Ok(self.vehicles.lock().expect("fleet mutex poisoned").clone())
    }
}

pub(super) struct OfflineFleet;

impl FleetSnapshotSource for OfflineFleet {
    fn snapshot(&self) -> Result<Vec<VehicleRecord>, SnapshotError> {
        Err(SnapshotError::Unavailable("depot feed offline".to_string()))
    }
}

pub(super) fn service_with(vehicles: Vec<VehicleRecord>) -> PlanningService<MemoryFleet> {
    PlanningService::new(Arc::new(MemoryFleet::with(vehicles)), ScoringConfig::default())
        .with_seed(Some(11))
}

pub(super) fn router_with(vehicles: Vec<VehicleRecord>) -> axum::Router {
    planning_router(Arc::new(service_with(vehicles)))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
