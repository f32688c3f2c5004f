use rand::Rng;
use serde::{Deserialize, Serialize};

use super::domain::{
    BrandingCategory, CleaningStatus, FitnessStatus, JobCardStatus, VehicleRecord,
};

pub const EXPIRED_FITNESS_PENALTY: f64 = 50.0;
pub const OPEN_JOB_CARD_PENALTY: f64 = 30.0;
pub const PREMIUM_BRANDING_BONUS: f64 = 20.0;
pub const STANDARD_BRANDING_BONUS: f64 = 10.0;
pub const PENDING_CLEANING_PENALTY: f64 = 15.0;

/// Operating context for the scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringConfig {
    pub base_score: f64,
    /// Fixed reference for the operating context, not an average of the current batch.
    pub fleet_average_mileage: f64,
    pub mileage_coefficient: f64,
    /// Width of the uniform tie-break draw; zero makes scoring fully deterministic.
    pub tie_break_span: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_score: 100.0,
            fleet_average_mileage: 42_000.0,
            mileage_coefficient: 0.001,
            tie_break_span: 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    Base,
    FitnessCertificate,
    JobCard,
    Branding,
    Mileage,
    Cleaning,
    TieBreak,
}

/// Discrete contribution to a priority score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub points: f64,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub components: Vec<ScoreComponent>,
    /// Sum of the components clamped at zero.
    pub total: f64,
}

/// Pure vehicle scorer. Never logs and never fails; unknown values take the
/// least favorable reading.
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    config: ScoringConfig,
}

impl Scorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn score<R: Rng + ?Sized>(&self, vehicle: &VehicleRecord, rng: &mut R) -> f64 {
        let raw = self.deterministic_points(vehicle) + self.tie_break(rng);
        raw.max(0.0)
    }

    /// Same result as [`Scorer::score`] for the same draw, itemised per factor.
    pub fn breakdown<R: Rng + ?Sized>(&self, vehicle: &VehicleRecord, rng: &mut R) -> ScoreBreakdown {
        let mut components = vec![ScoreComponent {
            factor: ScoreFactor::Base,
            points: self.config.base_score,
            notes: "base score".to_string(),
        }];

        let fitness = fitness_points(&vehicle.fitness_status);
        if fitness != 0.0 {
            components.push(ScoreComponent {
                factor: ScoreFactor::FitnessCertificate,
                points: fitness,
                notes: "fitness certificate expired".to_string(),
            });
        }

        let job_card = job_card_points(&vehicle.job_card_status);
        if job_card != 0.0 {
            components.push(ScoreComponent {
                factor: ScoreFactor::JobCard,
                points: job_card,
                notes: match &vehicle.job_card_status {
                    JobCardStatus::Open => "open job card".to_string(),
                    other => format!("job card status '{}' treated as open", other.label()),
                },
            });
        }

        let branding = branding_points(&vehicle.branding_category);
        if branding != 0.0 {
            components.push(ScoreComponent {
                factor: ScoreFactor::Branding,
                points: branding,
                notes: format!("{} branding", vehicle.branding_category.label()),
            });
        }

        if let Some(mileage) = vehicle.mileage {
            components.push(ScoreComponent {
                factor: ScoreFactor::Mileage,
                points: self.mileage_points(mileage),
                notes: format!(
                    "mileage {:.0} against reference {:.0}",
                    mileage, self.config.fleet_average_mileage
                ),
            });
        }

        let cleaning = cleaning_points(&vehicle.cleaning_status);
        if cleaning != 0.0 {
            components.push(ScoreComponent {
                factor: ScoreFactor::Cleaning,
                points: cleaning,
                notes: "cleaning pending".to_string(),
            });
        }

        let tie_break = self.tie_break(rng);
        components.push(ScoreComponent {
            factor: ScoreFactor::TieBreak,
            points: tie_break,
            notes: format!("random tie-break within [0, {})", self.config.tie_break_span),
        });

        let total = components
            .iter()
            .map(|component| component.points)
            .sum::<f64>()
            .max(0.0);

        ScoreBreakdown { components, total }
    }

    fn deterministic_points(&self, vehicle: &VehicleRecord) -> f64 {
        self.config.base_score
            + fitness_points(&vehicle.fitness_status)
            + job_card_points(&vehicle.job_card_status)
            + branding_points(&vehicle.branding_category)
            + vehicle
                .mileage
                .map(|mileage| self.mileage_points(mileage))
                .unwrap_or(0.0)
            + cleaning_points(&vehicle.cleaning_status)
    }

    fn mileage_points(&self, mileage: f64) -> f64 {
        -self.config.mileage_coefficient * (mileage - self.config.fleet_average_mileage)
    }

    fn tie_break<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.config.tie_break_span > 0.0 {
            rng.random::<f64>() * self.config.tie_break_span
        } else {
            0.0
        }
    }
}

// Unrecognized certificates are not penalised here; the rule table refuses them instead.
fn fitness_points(status: &FitnessStatus) -> f64 {
    if status.is_expired() {
        -EXPIRED_FITNESS_PENALTY
    } else {
        0.0
    }
}

fn job_card_points(status: &JobCardStatus) -> f64 {
    if status.is_closed() {
        0.0
    } else {
        -OPEN_JOB_CARD_PENALTY
    }
}

fn branding_points(category: &BrandingCategory) -> f64 {
    match category {
        BrandingCategory::Premium => PREMIUM_BRANDING_BONUS,
        BrandingCategory::Standard => STANDARD_BRANDING_BONUS,
        BrandingCategory::Basic | BrandingCategory::Unrecognized(_) => 0.0,
    }
}

fn cleaning_points(status: &CleaningStatus) -> f64 {
    if status.is_completed() {
        0.0
    } else {
        -PENDING_CLEANING_PENALTY
    }
}
