use crate::infra::{read_json_file, scoring_config_from, InMemoryFleetSource};
use chrono::Local;
use clap::Args;
use induction_planner::config::{AppConfig, PlannerConfig};
use induction_planner::error::AppError;
use induction_planner::fleet::{load_fleet, write_plan_csv};
use induction_planner::planning::{
    BrandingCategory, Bucket, CleaningStatus, ComparisonResult, ConstraintSet, FitnessStatus,
    JobCardStatus, OptimizationReport, Plan, PlanningService, Scenario, VehicleId,
    VehicleRecord,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::sync::Arc;

pub(crate) const DEFAULT_DEMO_FLEET_SIZE: usize = 25;

#[derive(Args, Debug)]
pub(crate) struct PlanArgs {
    /// Fleet snapshot (.json or .csv)
    #[arg(long)]
    pub(crate) fleet: PathBuf,
    /// Constraint set as JSON (defaults apply when omitted)
    #[arg(long)]
    pub(crate) constraints: Option<PathBuf>,
    /// Tie-break seed for a reproducible plan
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Write the plan as CSV to this path
    #[arg(long)]
    pub(crate) csv_out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct SimulateArgs {
    /// Fleet snapshot (.json or .csv)
    #[arg(long)]
    pub(crate) fleet: PathBuf,
    /// Scenario as JSON
    #[arg(long)]
    pub(crate) scenario: PathBuf,
    /// Tie-break seed shared by the baseline and scenario allocations
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Seed for the generated fleet and tie-breaks (random when omitted)
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Number of vehicles to generate
    #[arg(long, default_value_t = DEFAULT_DEMO_FLEET_SIZE)]
    pub(crate) size: usize,
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), AppError> {
    let PlanArgs {
        fleet,
        constraints,
        seed,
        csv_out,
    } = args;

    let planner = AppConfig::load()?.planner;
    let vehicles = load_fleet(&fleet)?;
    let constraints: Option<ConstraintSet> =
        constraints.map(|path| read_json_file(&path)).transpose()?;

    let service = planning_service(&planner, vehicles.clone(), seed);
    let plan = service.generate_plan(&vehicles, constraints.as_ref())?;

    println!(
        "Induction plan for {} ({} vehicles from {})",
        Local::now().format("%Y-%m-%d"),
        vehicles.len(),
        fleet.display()
    );
    render_plan(&plan);

    if let Some(path) = csv_out {
        let writer = BufWriter::new(File::create(&path)?);
        write_plan_csv(&plan, writer)?;
        println!("\nPlan written to {}", path.display());
    }

    Ok(())
}

pub(crate) fn run_simulate(args: SimulateArgs) -> Result<(), AppError> {
    let SimulateArgs {
        fleet,
        scenario,
        seed,
    } = args;

    let planner = AppConfig::load()?.planner;
    let vehicles = load_fleet(&fleet)?;
    let scenario: Scenario = read_json_file(&scenario)?;

    let service = planning_service(&planner, vehicles.clone(), seed);
    let outcome = service.simulate(&vehicles, &scenario)?;

    println!("Baseline plan");
    render_plan(&outcome.baseline_plan);
    println!("\nScenario plan");
    render_plan(&outcome.scenario_plan);
    render_comparison(&outcome.comparison);

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { seed, size } = args;
    let seed = seed.unwrap_or_else(rand::random);

    let planner = AppConfig::load()?.planner;
    let fleet = synthetic_fleet(size, seed);
    let service = planning_service(&planner, fleet.clone(), Some(seed));

    println!("Fleet induction demo (seed {seed})");
    let statistics = service.statistics(&fleet);
    println!(
        "- {} vehicles | {} ready | {} open job cards | {} cleaning pending | {} expired certificates",
        statistics.total_trains,
        statistics.ready_trains,
        statistics.open_job_cards,
        statistics.cleaning_pending,
        statistics.expired_certificates
    );
    if let Some(average) = statistics.average_mileage {
        println!("- Average mileage {:.0} km", average);
    }

    let plan = service.generate_plan(&fleet, None)?;
    println!("\nBaseline plan");
    render_plan(&plan);

    let scenario = sample_scenario(&plan);
    if scenario.is_empty() {
        println!("\nNo vehicles available for the sample scenario");
    } else {
        println!(
            "\nScenario: exclude {} and force emergency repair on {}",
            join_ids(scenario.excluded_trains.iter()),
            join_ids(scenario.emergency_maintenance.iter())
        );
        let outcome = service.simulate(&fleet, &scenario)?;
        render_comparison(&outcome.comparison);
    }

    let report = service.optimize(&fleet)?;
    render_suggestions(&report);

    Ok(())
}

/// Generates a depot snapshot with a realistic mix of condition signals.
pub(crate) fn synthetic_fleet(size: usize, seed: u64) -> Vec<VehicleRecord> {
    let mut rng = StdRng::seed_from_u64(seed);

    (1..=size)
        .map(|index| {
            let fitness_roll: f64 = rng.random();
            let fitness_status = if fitness_roll < 0.08 {
                FitnessStatus::Expired
            } else if fitness_roll < 0.12 {
                FitnessStatus::EmergencyMaintenanceRequired
            } else {
                FitnessStatus::Valid
            };
            let job_card_status = if rng.random_bool(0.25) {
                JobCardStatus::Open
            } else {
                JobCardStatus::Closed
            };
            let branding_roll: f64 = rng.random();
            let branding_category = if branding_roll < 0.3 {
                BrandingCategory::Premium
            } else if branding_roll < 0.75 {
                BrandingCategory::Standard
            } else {
                BrandingCategory::Basic
            };
            let cleaning_status = if rng.random_bool(0.2) {
                CleaningStatus::Pending
            } else {
                CleaningStatus::Completed
            };
            let mileage = rng.random_range(30_000.0..60_000.0_f64).round();

            VehicleRecord {
                id: VehicleId(format!("KMRL-TS-{index:02}")),
                fitness_status,
                job_card_status,
                branding_category,
                cleaning_status,
                mileage: Some(mileage),
                availability: None,
            }
        })
        .collect()
}

fn planning_service(
    planner: &PlannerConfig,
    fleet: Vec<VehicleRecord>,
    seed: Option<u64>,
) -> PlanningService<InMemoryFleetSource> {
    PlanningService::new(
        Arc::new(InMemoryFleetSource::new(fleet)),
        scoring_config_from(planner),
    )
    .with_seed(seed.or(planner.tie_break_seed))
}

/// Pulls the top service vehicle and forces the runner-up into emergency repair.
fn sample_scenario(plan: &Plan) -> Scenario {
    let mut service = plan.service().iter();
    let mut scenario = Scenario::default();

    if let Some(first) = service.next() {
        scenario.excluded_trains.insert(first.id.clone());
    }
    if let Some(second) = service.next() {
        scenario.emergency_maintenance.insert(second.id.clone());
    }

    scenario
}

fn render_plan(plan: &Plan) {
    let counts = plan.counts();
    println!(
        "  {} service | {} standby | {} maintenance",
        counts.service, counts.standby, counts.maintenance
    );

    for bucket in Bucket::ordered() {
        let assignments = plan.bucket(bucket);
        if assignments.is_empty() {
            continue;
        }
        println!("  {bucket}:");
        for assignment in assignments {
            println!(
                "    - {} ({:.1}) {}",
                assignment.id, assignment.priority_score, assignment.reasoning
            );
        }
    }
}

fn render_comparison(comparison: &ComparisonResult) {
    println!("\nScenario impact (scenario - baseline)");
    for (label, entry) in [
        ("Service", comparison.service),
        ("Standby", comparison.standby),
        ("Maintenance", comparison.maintenance),
        ("Available", comparison.total_available),
    ] {
        println!(
            "  - {label}: {} -> {} ({:+})",
            entry.baseline_count, entry.scenario_count, entry.delta
        );
    }
}

fn render_suggestions(report: &OptimizationReport) {
    println!("\nOptimization suggestions");
    for suggestion in &report.suggestions {
        if suggestion.trains.is_empty() {
            println!("  - {}: no vehicles flagged", suggestion.title);
        } else {
            println!(
                "  - {} [{:?}]: {} ({})",
                suggestion.title,
                suggestion.impact,
                suggestion.description,
                join_ids(suggestion.trains.iter())
            );
        }
    }
}

fn join_ids<'a>(ids: impl Iterator<Item = &'a VehicleId>) -> String {
    let ids: Vec<&str> = ids.map(VehicleId::as_str).collect();
    if ids.is_empty() {
        "none".to_string()
    } else {
        ids.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_fleet_is_reproducible_per_seed() {
        let first = synthetic_fleet(25, 99);
        let second = synthetic_fleet(25, 99);

        assert_eq!(first, second);
        assert_eq!(first[0].id.as_str(), "KMRL-TS-01");
        assert_eq!(first[24].id.as_str(), "KMRL-TS-25");
        assert!(first.iter().all(|vehicle| {
            vehicle
                .mileage
                .map(|mileage| (30_000.0..=60_000.0).contains(&mileage))
                .unwrap_or(false)
        }));
    }

    #[test]
    fn sample_scenario_targets_top_service_vehicles() {
        let fleet: Vec<VehicleRecord> = (1..=5)
            .map(|index| VehicleRecord::new(format!("V{index}"), 40_000.0))
            .collect();
        let service = planning_service(&PlannerConfig::default(), fleet.clone(), Some(1));
        let plan = service.generate_plan(&fleet, None).expect("plan");

        let scenario = sample_scenario(&plan);

        assert!(scenario.excluded_trains.contains(&plan.service()[0].id));
        assert!(scenario.emergency_maintenance.contains(&plan.service()[1].id));
    }

    #[test]
    fn sample_scenario_is_empty_without_service_vehicles() {
        assert!(sample_scenario(&Plan::default()).is_empty());
    }

    #[test]
    fn ids_are_joined_for_display() {
        let ids = [VehicleId::from("A"), VehicleId::from("B")];

        assert_eq!(join_ids(ids.iter()), "A, B");
        assert_eq!(join_ids(std::iter::empty()), "none");
    }
}
