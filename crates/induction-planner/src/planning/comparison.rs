use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use super::allocator::Allocator;
use super::constraints::ConstraintSet;
use super::domain::VehicleRecord;
use super::plan::{BucketCounts, Plan};

/// Baseline vs scenario size of one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketDelta {
    pub baseline_count: usize,
    pub scenario_count: usize,
    pub delta: i64,
}

impl BucketDelta {
    fn between(baseline_count: usize, scenario_count: usize) -> Self {
        Self {
            baseline_count,
            scenario_count,
            delta: scenario_count as i64 - baseline_count as i64,
        }
    }
}

/// Structural diff of two plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub service: BucketDelta,
    pub standby: BucketDelta,
    pub maintenance: BucketDelta,
    pub total_available: BucketDelta,
}

impl ComparisonResult {
    pub fn between(baseline: &Plan, scenario: &Plan) -> Self {
        Self::from_counts(baseline.counts(), scenario.counts())
    }

    pub fn from_counts(baseline: BucketCounts, scenario: BucketCounts) -> Self {
        Self {
            service: BucketDelta::between(baseline.service, scenario.service),
            standby: BucketDelta::between(baseline.standby, scenario.standby),
            maintenance: BucketDelta::between(baseline.maintenance, scenario.maintenance),
            total_available: BucketDelta::between(baseline.available(), scenario.available()),
        }
    }

    pub fn is_unchanged(&self) -> bool {
        [self.service, self.standby, self.maintenance, self.total_available]
            .iter()
            .all(|entry| entry.delta == 0)
    }
}

/// Both plans of a what-if run together with their diff.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioComparison {
    pub baseline_plan: Plan,
    pub scenario_plan: Plan,
    pub comparison: ComparisonResult,
}

impl Allocator {
    /// Allocates the baseline under default constraints and the scenario under
    /// `scenario_constraints`, then diffs bucket sizes.
    ///
    /// Both sides draw tie-breaks from generators seeded with `seed`, so identical
    /// fleets always compare as unchanged.
    pub fn compare(
        &self,
        baseline: &[VehicleRecord],
        scenario: &[VehicleRecord],
        scenario_constraints: Option<&ConstraintSet>,
        seed: u64,
    ) -> ScenarioComparison {
        let defaults = ConstraintSet::default();
        let baseline_plan =
            self.allocate(baseline, &defaults, &mut StdRng::seed_from_u64(seed));
        let scenario_plan = self.allocate(
            scenario,
            scenario_constraints.unwrap_or(&defaults),
            &mut StdRng::seed_from_u64(seed),
        );
        let comparison = ComparisonResult::between(&baseline_plan, &scenario_plan);

        ScenarioComparison {
            baseline_plan,
            scenario_plan,
            comparison,
        }
    }
}
