use super::common::*;
use crate::planning::domain::{BrandingCategory, CleaningStatus, FitnessStatus, JobCardStatus};
use crate::planning::{ScoreFactor, Scorer, ScoringConfig, VehicleRecord};

#[test]
fn scorer_applies_every_adjustment() {
    let scorer = Scorer::new(deterministic_config());
    let fleet = three_vehicle_fleet();
    let mut rng = seeded_rng(1);

    assert!((scorer.score(&fleet[0], &mut rng) - 122.0).abs() < 1e-9);
    assert!((scorer.score(&fleet[1], &mut rng) - 64.0).abs() < 1e-9);
    assert!((scorer.score(&fleet[2], &mut rng) - 7.0).abs() < 1e-9);
}

#[test]
fn expired_certificate_outweighs_premium_branding() {
    let scorer = Scorer::new(deterministic_config());
    let mut rng = seeded_rng(1);

    let mut expired_premium = expired("E1");
    expired_premium.branding_category = BrandingCategory::Premium;
    let mut valid_basic = ready("V1");
    valid_basic.branding_category = BrandingCategory::Basic;

    assert!(scorer.score(&expired_premium, &mut rng) < scorer.score(&valid_basic, &mut rng));
}

#[test]
fn score_is_clamped_at_zero() {
    let scorer = Scorer::new(deterministic_config());
    let mut vehicle = expired("Z1");
    vehicle.job_card_status = JobCardStatus::Open;
    vehicle.cleaning_status = CleaningStatus::Pending;
    vehicle.branding_category = BrandingCategory::Basic;
    vehicle.mileage = Some(250_000.0);

    assert_eq!(scorer.score(&vehicle, &mut seeded_rng(1)), 0.0);
}

#[test]
fn unrecognized_values_take_least_favorable_reading() {
    let scorer = Scorer::new(deterministic_config());
    let mut vehicle = ready("U1");
    vehicle.fitness_status = FitnessStatus::Unrecognized("Under Review".to_string());
    vehicle.job_card_status = JobCardStatus::Unrecognized("Deferred".to_string());
    vehicle.branding_category = BrandingCategory::Unrecognized("Gold".to_string());
    vehicle.cleaning_status = CleaningStatus::Unrecognized(String::new());

    // Not expired, card counted as open, no branding bonus, cleaning counted as pending.
    let score = scorer.score(&vehicle, &mut seeded_rng(1));

    assert!((score - 55.0).abs() < 1e-9);
}

#[test]
fn tie_break_stays_within_span() {
    let scorer = Scorer::new(ScoringConfig::default());
    let mut rng = seeded_rng(42);
    let vehicle = ready("R1");

    for _ in 0..500 {
        let score = scorer.score(&vehicle, &mut rng);
        assert!((110.0..115.0).contains(&score), "score {score} out of range");
    }
}

#[test]
fn identical_seeds_reproduce_scores() {
    let scorer = Scorer::new(ScoringConfig::default());
    let vehicle = ready("R2");

    let first = scorer.score(&vehicle, &mut seeded_rng(9));
    let second = scorer.score(&vehicle, &mut seeded_rng(9));

    assert_eq!(first, second);
}

#[test]
fn breakdown_matches_score_for_same_draw() {
    let scorer = Scorer::new(ScoringConfig::default());
    let fleet = three_vehicle_fleet();

    for vehicle in &fleet {
        let score = scorer.score(vehicle, &mut seeded_rng(5));
        let breakdown = scorer.breakdown(vehicle, &mut seeded_rng(5));
        assert_eq!(breakdown.total, score);
    }

    let breakdown = scorer.breakdown(&fleet[2], &mut seeded_rng(5));
    let factors: Vec<ScoreFactor> = breakdown
        .components
        .iter()
        .map(|component| component.factor)
        .collect();
    assert_eq!(
        factors,
        vec![
            ScoreFactor::Base,
            ScoreFactor::JobCard,
            ScoreFactor::Mileage,
            ScoreFactor::Cleaning,
            ScoreFactor::TieBreak,
        ]
    );
}

#[test]
fn missing_mileage_contributes_nothing() {
    let scorer = Scorer::new(deterministic_config());
    let mut vehicle: VehicleRecord = ready("M1");
    vehicle.mileage = None;

    let breakdown = scorer.breakdown(&vehicle, &mut seeded_rng(1));

    assert!(breakdown
        .components
        .iter()
        .all(|component| component.factor != ScoreFactor::Mileage));
    assert!((breakdown.total - 110.0).abs() < 1e-9);
}

#[test]
fn average_mileage_is_a_parameter() {
    let scorer = Scorer::new(ScoringConfig {
        fleet_average_mileage: 30_000.0,
        ..deterministic_config()
    });

    let score = scorer.score(&ready("P1"), &mut seeded_rng(1));

    assert!((score - 98.0).abs() < 1e-9);
}
