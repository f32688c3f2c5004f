use super::domain::{Bucket, BrandingCategory, CleaningStatus, VehicleRecord};
use super::rules::RuleKind;

/// Human-readable justification for one assignment. First matching line wins; the
/// rule that placed the vehicle is carried on the assignment separately.
pub(crate) fn explain(vehicle: &VehicleRecord, rule: RuleKind, bucket: Bucket) -> String {
    if vehicle.fitness_status.is_expired() {
        return "Excluded due to expired fitness certificate.".to_string();
    }

    if vehicle.job_card_status.is_open() {
        match bucket {
            Bucket::Maintenance => {
                return "Assigned to maintenance due to open job card requiring attention."
                    .to_string()
            }
            Bucket::Standby => {
                return "Limited to standby role due to pending maintenance (open job card)."
                    .to_string()
            }
            Bucket::Service => {}
        }
    }

    match bucket {
        Bucket::Service => service_reasoning(vehicle),
        Bucket::Standby => {
            "Assigned to standby for operational flexibility and backup capacity.".to_string()
        }
        Bucket::Maintenance if vehicle.cleaning_status == CleaningStatus::Pending => {
            "Scheduled for maintenance including pending cleaning.".to_string()
        }
        Bucket::Maintenance if rule == RuleKind::IncompleteRecord => {
            "Held in maintenance until the vehicle record is complete.".to_string()
        }
        Bucket::Maintenance => "Scheduled for routine maintenance.".to_string(),
    }
}

fn service_reasoning(vehicle: &VehicleRecord) -> String {
    let mut factors = Vec::new();
    if vehicle.branding_category == BrandingCategory::Premium {
        factors.push("premium branding priority");
    }
    if vehicle.cleaning_status.is_completed() {
        factors.push("cleaning completed");
    }
    if vehicle.fitness_status.is_valid() {
        factors.push("valid fitness certificate");
    }

    if factors.is_empty() {
        "Selected for service to meet operational demand.".to_string()
    } else {
        format!("Selected for service due to {}.", factors.join(", "))
    }
}
