//! Property checks over randomly generated fleets: every vehicle is placed once, hard
//! exclusions always hold, a higher score never lands in a worse bucket than a lower
//! score with the same eligibility, capacities hold, and self-comparison is unchanged.

use std::collections::HashSet;

use induction_planner::planning::{
    Allocator, BrandingCategory, Bucket, CleaningStatus, ConstraintSet, FitnessStatus,
    JobCardStatus, ScoringConfig, VehicleId, VehicleRecord, EMERGENCY_SERVICE_CEILING,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn fitness() -> impl Strategy<Value = FitnessStatus> {
    prop_oneof![
        4 => Just(FitnessStatus::Valid),
        1 => Just(FitnessStatus::Expired),
        1 => Just(FitnessStatus::EmergencyMaintenanceRequired),
        1 => Just(FitnessStatus::Unrecognized("Under Review".to_string())),
    ]
}

fn job_card() -> impl Strategy<Value = JobCardStatus> {
    prop_oneof![
        3 => Just(JobCardStatus::Closed),
        1 => Just(JobCardStatus::Open),
    ]
}

fn branding() -> impl Strategy<Value = BrandingCategory> {
    prop_oneof![
        Just(BrandingCategory::Premium),
        Just(BrandingCategory::Standard),
        Just(BrandingCategory::Basic),
    ]
}

fn cleaning() -> impl Strategy<Value = CleaningStatus> {
    prop_oneof![
        3 => Just(CleaningStatus::Completed),
        1 => Just(CleaningStatus::Pending),
    ]
}

fn vehicle(index: usize) -> impl Strategy<Value = VehicleRecord> {
    (
        fitness(),
        job_card(),
        branding(),
        cleaning(),
        prop::option::weighted(0.95, 0.0f64..120_000.0),
    )
        .prop_map(move |(fitness, job_card, branding, cleaning, mileage)| VehicleRecord {
            id: VehicleId(format!("KMRL-{index:03}")),
            fitness_status: fitness,
            job_card_status: job_card,
            branding_category: branding,
            cleaning_status: cleaning,
            mileage,
            availability: None,
        })
}

fn fleet() -> impl Strategy<Value = Vec<VehicleRecord>> {
    (0usize..40).prop_flat_map(|size| (0..size).map(vehicle).collect::<Vec<_>>())
}

fn constraints() -> impl Strategy<Value = ConstraintSet> {
    (
        prop::option::of(0usize..20),
        prop::option::of(0usize..6),
        prop::option::of(any::<bool>()),
    )
        .prop_map(|(min_service, min_standby, emergency)| ConstraintSet {
            min_service_trains: min_service,
            min_standby_trains: min_standby,
            emergency_mode: emergency,
            ..ConstraintSet::default()
        })
}

proptest! {
    #[test]
    fn every_vehicle_is_placed_exactly_once(
        fleet in fleet(),
        constraints in constraints(),
        seed in any::<u64>(),
    ) {
        let plan = Allocator::default().allocate(&fleet, &constraints, &mut StdRng::seed_from_u64(seed));

        let placed: HashSet<&VehicleId> = plan.all().iter().map(|assignment| &assignment.id).collect();
        prop_assert_eq!(plan.len(), fleet.len());
        prop_assert_eq!(placed.len(), fleet.len());

        let counts = plan.counts();
        prop_assert_eq!(counts.service + counts.standby + counts.maintenance, fleet.len());
        for bucket in Bucket::ordered() {
            prop_assert!(plan.bucket(bucket).iter().all(|assignment| assignment.bucket == bucket));
        }
    }

    #[test]
    fn ineligible_vehicles_never_run(
        fleet in fleet(),
        constraints in constraints(),
        seed in any::<u64>(),
    ) {
        let plan = Allocator::default().allocate(&fleet, &constraints, &mut StdRng::seed_from_u64(seed));

        for vehicle in &fleet {
            let assignment = plan.assignment_for(&vehicle.id).expect("vehicle placed");
            if !vehicle.fitness_status.is_valid() || vehicle.mileage.is_none() {
                prop_assert_eq!(assignment.bucket, Bucket::Maintenance);
            }
            if vehicle.fitness_status.is_expired() {
                prop_assert_eq!(
                    assignment.reasoning.as_str(),
                    "Excluded due to expired fitness certificate."
                );
            }
            if !constraints.emergency_mode.unwrap_or(false) && !vehicle.job_card_status.is_closed() {
                prop_assert_ne!(assignment.bucket, Bucket::Service);
            }
        }
    }

    #[test]
    fn higher_scores_never_land_in_a_lower_bucket(
        fleet in fleet(),
        constraints in constraints(),
        seed in any::<u64>(),
    ) {
        let plan = Allocator::default().allocate(&fleet, &constraints, &mut StdRng::seed_from_u64(seed));
        let placed: Vec<_> = fleet
            .iter()
            .filter(|vehicle| !vehicle.fitness_status.is_expired() && vehicle.is_complete() && !vehicle.is_excluded())
            .map(|vehicle| (vehicle, plan.assignment_for(&vehicle.id).expect("vehicle placed")))
            .collect();

        for (a, higher) in &placed {
            for (b, lower) in &placed {
                let same_eligibility = a.fitness_status == b.fitness_status
                    && a.job_card_status.is_closed() == b.job_card_status.is_closed();
                if same_eligibility && higher.priority_score > lower.priority_score {
                    prop_assert!(
                        higher.bucket.rank() >= lower.bucket.rank(),
                        "{} ({:.2}, {}) ranked below {} ({:.2}, {})",
                        higher.id,
                        higher.priority_score,
                        higher.bucket,
                        lower.id,
                        lower.priority_score,
                        lower.bucket
                    );
                }
            }
        }
    }

    #[test]
    fn bucket_capacities_are_respected(
        fleet in fleet(),
        constraints in constraints(),
        seed in any::<u64>(),
    ) {
        let plan = Allocator::default().allocate(&fleet, &constraints, &mut StdRng::seed_from_u64(seed));
        let resolved = constraints.resolve();
        let counts = plan.counts();

        let service_cap = if resolved.emergency_mode {
            EMERGENCY_SERVICE_CEILING.max(resolved.service_capacity())
        } else {
            resolved.service_capacity()
        };
        prop_assert!(counts.service <= service_cap);
        prop_assert!(counts.standby <= resolved.standby_capacity());
    }

    #[test]
    fn fleet_compared_with_itself_is_unchanged(fleet in fleet(), seed in any::<u64>()) {
        let allocator = Allocator::new(ScoringConfig::default());

        let result = allocator.compare(&fleet, &fleet, None, seed);

        prop_assert!(result.comparison.is_unchanged());
        prop_assert_eq!(result.baseline_plan, result.scenario_plan);
    }

    #[test]
    fn scores_are_never_negative(fleet in fleet(), seed in any::<u64>()) {
        let ranked = Allocator::default().rank(&fleet, &mut StdRng::seed_from_u64(seed));

        prop_assert!(ranked.iter().all(|vehicle| vehicle.priority_score >= 0.0));
        prop_assert!(ranked
            .windows(2)
            .all(|pair| pair[0].priority_score >= pair[1].priority_score));
    }
}
