use std::fmt;

use serde::{Deserialize, Serialize};

use super::constraints::{ResolvedConstraints, EMERGENCY_SERVICE_CEILING};
use super::domain::{Bucket, ScoredVehicle};

pub const SERVICE_SCORE_THRESHOLD: f64 = 85.0;
pub const STANDBY_SCORE_THRESHOLD: f64 = 60.0;

/// Identifies which entry of the rule table placed a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    ExplicitExclusion,
    EmergencyMaintenance,
    ExpiredFitness,
    IncompleteRecord,
    EmergencyCapacity,
    HighPriorityService,
    StandbyReserve,
    MaintenanceFallback,
}

impl RuleKind {
    pub fn label(self) -> &'static str {
        match self {
            RuleKind::ExplicitExclusion => "explicit exclusion",
            RuleKind::EmergencyMaintenance => "forced emergency repair",
            RuleKind::ExpiredFitness => "expired fitness certificate",
            RuleKind::IncompleteRecord => "incomplete vehicle record",
            RuleKind::EmergencyCapacity => "emergency service capacity",
            RuleKind::HighPriorityService => "high-priority service",
            RuleKind::StandbyReserve => "standby reserve",
            RuleKind::MaintenanceFallback => "maintenance fallback",
        }
    }
}

/// State visible to a rule while the allocator walks the ranked fleet.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub vehicle: &'a ScoredVehicle,
    pub constraints: &'a ResolvedConstraints<'a>,
    pub service_len: usize,
    pub standby_len: usize,
}

/// One predicate → outcome entry of the rule table.
#[derive(Clone, Copy)]
pub struct AllocationRule {
    pub kind: RuleKind,
    pub outcome: Bucket,
    predicate: fn(&RuleContext<'_>) -> bool,
}

impl AllocationRule {
    pub fn applies(&self, context: &RuleContext<'_>) -> bool {
        (self.predicate)(context)
    }
}

impl fmt::Debug for AllocationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AllocationRule")
            .field("kind", &self.kind)
            .field("outcome", &self.outcome)
            .finish()
    }
}

// Order is part of the contract: the first matching rule wins and none is revisited.
const STANDARD_RULES: [AllocationRule; 8] = [
    AllocationRule {
        kind: RuleKind::ExplicitExclusion,
        outcome: Bucket::Maintenance,
        predicate: explicitly_excluded,
    },
    AllocationRule {
        kind: RuleKind::EmergencyMaintenance,
        outcome: Bucket::Maintenance,
        predicate: forced_emergency_repair,
    },
    AllocationRule {
        kind: RuleKind::ExpiredFitness,
        outcome: Bucket::Maintenance,
        predicate: fitness_expired,
    },
    AllocationRule {
        kind: RuleKind::IncompleteRecord,
        outcome: Bucket::Maintenance,
        predicate: record_incomplete,
    },
    AllocationRule {
        kind: RuleKind::EmergencyCapacity,
        outcome: Bucket::Service,
        predicate: emergency_capacity_available,
    },
    AllocationRule {
        kind: RuleKind::HighPriorityService,
        outcome: Bucket::Service,
        predicate: qualifies_for_service,
    },
    AllocationRule {
        kind: RuleKind::StandbyReserve,
        outcome: Bucket::Standby,
        predicate: qualifies_for_standby,
    },
    AllocationRule {
        kind: RuleKind::MaintenanceFallback,
        outcome: Bucket::Maintenance,
        predicate: always,
    },
];

/// Ordered rule table evaluated once per vehicle.
#[derive(Debug, Clone, Copy)]
pub struct RuleSet {
    rules: &'static [AllocationRule],
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl RuleSet {
    pub fn standard() -> Self {
        Self {
            rules: &STANDARD_RULES,
        }
    }

    pub fn rules(&self) -> &[AllocationRule] {
        self.rules
    }

    pub fn order(&self) -> Vec<RuleKind> {
        self.rules.iter().map(|rule| rule.kind).collect()
    }

    /// First matching rule; a table without a match falls back to maintenance.
    pub fn evaluate(&self, context: &RuleContext<'_>) -> (RuleKind, Bucket) {
        self.rules
            .iter()
            .find(|rule| rule.applies(context))
            .map(|rule| (rule.kind, rule.outcome))
            .unwrap_or((RuleKind::MaintenanceFallback, Bucket::Maintenance))
    }
}

fn explicitly_excluded(context: &RuleContext<'_>) -> bool {
    let record = &context.vehicle.record;
    context.constraints.excluded_trains.contains(&record.id) || record.is_excluded()
}

fn forced_emergency_repair(context: &RuleContext<'_>) -> bool {
    context
        .constraints
        .emergency_maintenance
        .contains(&context.vehicle.record.id)
}

fn fitness_expired(context: &RuleContext<'_>) -> bool {
    context.vehicle.record.fitness_status.is_expired()
}

fn record_incomplete(context: &RuleContext<'_>) -> bool {
    !context.vehicle.record.is_complete()
}

fn emergency_capacity_available(context: &RuleContext<'_>) -> bool {
    context.constraints.emergency_mode
        && context.vehicle.record.fitness_status.is_valid()
        && context.service_len < EMERGENCY_SERVICE_CEILING
}

fn qualifies_for_service(context: &RuleContext<'_>) -> bool {
    let vehicle = context.vehicle;
    vehicle.priority_score >= SERVICE_SCORE_THRESHOLD
        && vehicle.record.fitness_status.is_valid()
        && vehicle.record.job_card_status.is_closed()
        && context.service_len < context.constraints.service_capacity()
}

fn qualifies_for_standby(context: &RuleContext<'_>) -> bool {
    let vehicle = context.vehicle;
    vehicle.priority_score >= STANDBY_SCORE_THRESHOLD
        && vehicle.record.fitness_status.is_valid()
        && context.standby_len < context.constraints.standby_capacity()
}

fn always(_: &RuleContext<'_>) -> bool {
    true
}
