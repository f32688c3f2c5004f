use crate::cli::ServeArgs;
use crate::infra::{load_configured_fleet, scoring_config_from, AppState, InMemoryFleetSource};
use crate::routes::with_planning_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use induction_planner::config::AppConfig;
use induction_planner::error::AppError;
use induction_planner::planning::PlanningService;
use induction_planner::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let fleet = load_configured_fleet(&config.planner)?;
    let source = Arc::new(InMemoryFleetSource::new(fleet));
    let planning_service = Arc::new(
        PlanningService::new(source, scoring_config_from(&config.planner))
            .with_seed(config.planner.tie_break_seed),
    );

    let app = with_planning_routes(planning_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "induction planner ready");

    axum::serve(listener, app).await?;
    Ok(())
}
