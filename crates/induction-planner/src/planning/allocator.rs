use rand::Rng;

use super::constraints::ConstraintSet;
use super::domain::{ScoredVehicle, VehicleRecord};
use super::plan::{Assignment, Plan};
use super::reasoning::explain;
use super::rules::{RuleContext, RuleSet};
use super::scoring::{Scorer, ScoringConfig};

/// Single-pass allocator: score, rank, then walk the ranked fleet through the rule table.
#[derive(Debug, Clone, Default)]
pub struct Allocator {
    scorer: Scorer,
    rules: RuleSet,
}

impl Allocator {
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            scorer: Scorer::new(config),
            rules: RuleSet::standard(),
        }
    }

    pub fn scorer(&self) -> &Scorer {
        &self.scorer
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Scores every vehicle (one draw each, in input order) and stable-sorts descending.
    pub fn rank<R: Rng + ?Sized>(&self, vehicles: &[VehicleRecord], rng: &mut R) -> Vec<ScoredVehicle> {
        let mut ranked: Vec<ScoredVehicle> = vehicles
            .iter()
            .map(|record| ScoredVehicle {
                priority_score: self.scorer.score(record, rng),
                record: record.clone(),
            })
            .collect();

        ranked.sort_by(|a, b| b.priority_score.total_cmp(&a.priority_score));
        ranked
    }

    /// Builds a plan covering every input vehicle exactly once. Buckets are never
    /// rebalanced after a vehicle is placed; under-filled buckets are a valid outcome.
    pub fn allocate<R: Rng + ?Sized>(
        &self,
        vehicles: &[VehicleRecord],
        constraints: &ConstraintSet,
        rng: &mut R,
    ) -> Plan {
        let resolved = constraints.resolve();
        let mut plan = Plan::default();

        for vehicle in self.rank(vehicles, rng) {
            let counts = plan.counts();
            let context = RuleContext {
                vehicle: &vehicle,
                constraints: &resolved,
                service_len: counts.service,
                standby_len: counts.standby,
            };
            let (rule, bucket) = self.rules.evaluate(&context);

            plan.push(Assignment {
                reasoning: explain(&vehicle.record, rule, bucket),
                id: vehicle.record.id,
                bucket,
                priority_score: vehicle.priority_score,
                rule,
            });
        }

        plan
    }
}
