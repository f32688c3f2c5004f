use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use super::comparison::ComparisonResult;
use super::constraints::ConstraintSet;
use super::domain::{VehicleId, VehicleRecord};
use super::insights::{available_vehicles, FleetStatistics, OptimizationReport};
use super::plan::Plan;
use super::scenario::Scenario;
use super::service::{PlanningService, PlanningServiceError};
use super::source::FleetSnapshotSource;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePlanRequest {
    #[serde(default)]
    pub trains: Option<Vec<VehicleRecord>>,
    #[serde(default)]
    pub constraints: Option<ConstraintSet>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePlanResponse {
    #[serde(flatten)]
    pub plan: Plan,
    pub generated_at: DateTime<Utc>,
    pub total_trains: usize,
    pub constraints: ConstraintSet,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRequest {
    #[serde(default)]
    pub base_trains: Option<Vec<VehicleRecord>>,
    #[serde(default)]
    pub scenario: Scenario,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResponse {
    pub original_plan: Plan,
    pub simulated_plan: Plan,
    pub comparison: ComparisonResult,
    pub scenario: Scenario,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeResponse {
    #[serde(flatten)]
    pub report: OptimizationReport,
    pub generated_at: DateTime<Utc>,
}

/// Router builder exposing fleet and planning endpoints.
pub fn planning_router<S>(service: Arc<PlanningService<S>>) -> Router
where
    S: FleetSnapshotSource + 'static,
{
    Router::new()
        .route("/api/v1/fleet", get(fleet_handler::<S>))
        .route("/api/v1/fleet/available", get(available_handler::<S>))
        .route("/api/v1/fleet/statistics", get(statistics_handler::<S>))
        .route("/api/v1/fleet/:vehicle_id", get(vehicle_handler::<S>))
        .route("/api/v1/planning/generate", post(generate_handler::<S>))
        .route("/api/v1/planning/simulate", post(simulate_handler::<S>))
        .route("/api/v1/planning/optimize", get(optimize_handler::<S>))
        .with_state(service)
}

pub(crate) async fn fleet_handler<S>(State(service): State<Arc<PlanningService<S>>>) -> Response
where
    S: FleetSnapshotSource + 'static,
{
    match service.fleet_snapshot() {
        Ok(fleet) => (StatusCode::OK, Json(fleet)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn vehicle_handler<S>(
    State(service): State<Arc<PlanningService<S>>>,
    Path(vehicle_id): Path<String>,
) -> Response
where
    S: FleetSnapshotSource + 'static,
{
    let id = VehicleId(vehicle_id);
    match service.vehicle(&id) {
        Ok(Some(vehicle)) => (StatusCode::OK, Json(vehicle)).into_response(),
        Ok(None) => {
            let payload = json!({
                "error": "Train not found",
                "id": id,
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn available_handler<S>(
    State(service): State<Arc<PlanningService<S>>>,
) -> Response
where
    S: FleetSnapshotSource + 'static,
{
    match service.fleet_snapshot() {
        Ok(fleet) => {
            let available: Vec<&VehicleRecord> = available_vehicles(&fleet);
            (StatusCode::OK, Json(available)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn statistics_handler<S>(
    State(service): State<Arc<PlanningService<S>>>,
) -> Response
where
    S: FleetSnapshotSource + 'static,
{
    match service.fleet_snapshot() {
        Ok(fleet) => {
            let statistics: FleetStatistics = service.statistics(&fleet);
            (StatusCode::OK, Json(statistics)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn generate_handler<S>(
    State(service): State<Arc<PlanningService<S>>>,
    Json(request): Json<GeneratePlanRequest>,
) -> Response
where
    S: FleetSnapshotSource + 'static,
{
    let GeneratePlanRequest {
        trains,
        constraints,
    } = request;

    let result = resolve_fleet(&service, trains).and_then(|fleet| {
        let plan = service.generate_plan(&fleet, constraints.as_ref())?;
        Ok(GeneratePlanResponse {
            plan,
            generated_at: Utc::now(),
            total_trains: fleet.len(),
            constraints: constraints.unwrap_or_default(),
        })
    });

    match result {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn simulate_handler<S>(
    State(service): State<Arc<PlanningService<S>>>,
    Json(request): Json<SimulationRequest>,
) -> Response
where
    S: FleetSnapshotSource + 'static,
{
    let SimulationRequest {
        base_trains,
        scenario,
    } = request;

    let result = resolve_fleet(&service, base_trains)
        .and_then(|fleet| service.simulate(&fleet, &scenario));

    match result {
        Ok(outcome) => {
            let body = SimulationResponse {
                original_plan: outcome.baseline_plan,
                simulated_plan: outcome.scenario_plan,
                comparison: outcome.comparison,
                scenario,
                generated_at: Utc::now(),
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn optimize_handler<S>(
    State(service): State<Arc<PlanningService<S>>>,
) -> Response
where
    S: FleetSnapshotSource + 'static,
{
    let result = service
        .fleet_snapshot()
        .and_then(|fleet| service.optimize(&fleet));

    match result {
        Ok(report) => {
            let body = OptimizeResponse {
                report,
                generated_at: Utc::now(),
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(err) => error_response(err),
    }
}

fn resolve_fleet<S>(
    service: &PlanningService<S>,
    provided: Option<Vec<VehicleRecord>>,
) -> Result<Vec<VehicleRecord>, PlanningServiceError>
where
    S: FleetSnapshotSource + 'static,
{
    match provided {
        Some(fleet) => Ok(fleet),
        None => service.fleet_snapshot(),
    }
}

fn error_response(err: PlanningServiceError) -> Response {
    let status = match err {
        PlanningServiceError::Planning(_) => StatusCode::UNPROCESSABLE_ENTITY,
        PlanningServiceError::Snapshot(_) => StatusCode::SERVICE_UNAVAILABLE,
    };
    warn!(%status, error = %err, "planning request rejected");

    let payload = json!({ "error": err.to_string() });
    (status, Json(payload)).into_response()
}
