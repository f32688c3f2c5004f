use serde::Serialize;

use super::domain::{BrandingCategory, VehicleId, VehicleRecord};
use super::plan::BucketCounts;

/// Vehicles above this mileage are suggested for rotation into maintenance.
pub const HIGH_MILEAGE_THRESHOLD: f64 = 45_000.0;

/// Headline numbers for a fleet snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetStatistics {
    pub total_trains: usize,
    pub ready_trains: usize,
    pub open_job_cards: usize,
    pub cleaning_pending: usize,
    pub expired_certificates: usize,
    pub premium_branded: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_mileage: Option<f64>,
}

impl FleetStatistics {
    pub fn from_fleet(fleet: &[VehicleRecord]) -> Self {
        let mileages: Vec<f64> = fleet.iter().filter_map(|vehicle| vehicle.mileage).collect();
        let average_mileage = if mileages.is_empty() {
            None
        } else {
            Some(mileages.iter().sum::<f64>() / mileages.len() as f64)
        };

        Self {
            total_trains: fleet.len(),
            ready_trains: available_vehicles(fleet).len(),
            open_job_cards: fleet
                .iter()
                .filter(|vehicle| vehicle.job_card_status.is_open())
                .count(),
            cleaning_pending: fleet
                .iter()
                .filter(|vehicle| !vehicle.cleaning_status.is_completed())
                .count(),
            expired_certificates: fleet
                .iter()
                .filter(|vehicle| vehicle.fitness_status.is_expired())
                .count(),
            premium_branded: fleet
                .iter()
                .filter(|vehicle| vehicle.branding_category == BrandingCategory::Premium)
                .count(),
            average_mileage,
        }
    }
}

/// Vehicles with a valid certificate and no outstanding job card.
pub fn available_vehicles(fleet: &[VehicleRecord]) -> Vec<&VehicleRecord> {
    fleet
        .iter()
        .filter(|vehicle| {
            vehicle.fitness_status.is_valid() && vehicle.job_card_status.is_closed()
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    Efficiency,
    Capacity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Impact {
    Low,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationSuggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub title: String,
    pub description: String,
    pub impact: Impact,
    pub trains: Vec<VehicleId>,
}

/// Current plan shape plus advisory suggestions for the operator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationReport {
    pub current_plan: BucketCounts,
    pub suggestions: Vec<OptimizationSuggestion>,
}

pub fn suggestions(fleet: &[VehicleRecord]) -> Vec<OptimizationSuggestion> {
    let high_mileage = fleet
        .iter()
        .filter(|vehicle| {
            vehicle
                .mileage
                .map(|mileage| mileage > HIGH_MILEAGE_THRESHOLD)
                .unwrap_or(false)
        })
        .map(|vehicle| vehicle.id.clone())
        .collect();

    let premium = fleet
        .iter()
        .filter(|vehicle| vehicle.branding_category == BrandingCategory::Premium)
        .map(|vehicle| vehicle.id.clone())
        .collect();

    vec![
        OptimizationSuggestion {
            kind: SuggestionKind::Efficiency,
            title: "Mileage Optimization".to_string(),
            description: "Consider rotating high-mileage trains to maintenance for better fleet longevity".to_string(),
            impact: Impact::Medium,
            trains: high_mileage,
        },
        OptimizationSuggestion {
            kind: SuggestionKind::Capacity,
            title: "Branding Exposure".to_string(),
            description: "Prioritize premium-branded trains for high-visibility routes".to_string(),
            impact: Impact::Low,
            trains: premium,
        },
    ]
}
