use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::PlanningError;

/// Availability marker written by scenario exclusions.
pub const EXCLUDED_AVAILABILITY: &str = "Excluded";

/// Stable vehicle identifier, unique within one planning run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(pub String);

impl VehicleId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VehicleId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

fn normalized(raw: &Option<String>) -> String {
    raw.as_deref()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Certification state of a vehicle.
///
/// Anything that is not one of the known states is kept verbatim so it can be reported,
/// and never satisfies a rule that requires a valid certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum FitnessStatus {
    Valid,
    Expired,
    EmergencyMaintenanceRequired,
    Unrecognized(String),
}

impl FitnessStatus {
    pub fn label(&self) -> &str {
        match self {
            FitnessStatus::Valid => "Valid",
            FitnessStatus::Expired => "Expired",
            FitnessStatus::EmergencyMaintenanceRequired => "Emergency Maintenance Required",
            FitnessStatus::Unrecognized(raw) => raw,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, FitnessStatus::Valid)
    }

    pub fn is_expired(&self) -> bool {
        matches!(self, FitnessStatus::Expired)
    }
}

impl Default for FitnessStatus {
    fn default() -> Self {
        FitnessStatus::Unrecognized(String::new())
    }
}

impl From<Option<String>> for FitnessStatus {
    fn from(raw: Option<String>) -> Self {
        match normalized(&raw).as_str() {
            "valid" => FitnessStatus::Valid,
            "expired" => FitnessStatus::Expired,
            "emergency maintenance required" => FitnessStatus::EmergencyMaintenanceRequired,
            _ => FitnessStatus::Unrecognized(raw.unwrap_or_default()),
        }
    }
}

impl From<FitnessStatus> for String {
    fn from(value: FitnessStatus) -> Self {
        value.label().to_string()
    }
}

/// Whether an outstanding repair order exists against the vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum JobCardStatus {
    Open,
    Closed,
    Unrecognized(String),
}

impl JobCardStatus {
    pub fn label(&self) -> &str {
        match self {
            JobCardStatus::Open => "Open",
            JobCardStatus::Closed => "Closed",
            JobCardStatus::Unrecognized(raw) => raw,
        }
    }

    /// Only an explicitly closed card counts as closed.
    pub fn is_closed(&self) -> bool {
        matches!(self, JobCardStatus::Closed)
    }

    pub fn is_open(&self) -> bool {
        matches!(self, JobCardStatus::Open)
    }
}

impl Default for JobCardStatus {
    fn default() -> Self {
        JobCardStatus::Unrecognized(String::new())
    }
}

impl From<Option<String>> for JobCardStatus {
    fn from(raw: Option<String>) -> Self {
        match normalized(&raw).as_str() {
            "open" => JobCardStatus::Open,
            "closed" => JobCardStatus::Closed,
            _ => JobCardStatus::Unrecognized(raw.unwrap_or_default()),
        }
    }
}

impl From<JobCardStatus> for String {
    fn from(value: JobCardStatus) -> Self {
        value.label().to_string()
    }
}

/// Commercial livery tier. Affects priority only, never eligibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum BrandingCategory {
    Premium,
    Standard,
    Basic,
    Unrecognized(String),
}

impl BrandingCategory {
    pub fn label(&self) -> &str {
        match self {
            BrandingCategory::Premium => "Premium",
            BrandingCategory::Standard => "Standard",
            BrandingCategory::Basic => "Basic",
            BrandingCategory::Unrecognized(raw) => raw,
        }
    }
}

impl Default for BrandingCategory {
    fn default() -> Self {
        BrandingCategory::Unrecognized(String::new())
    }
}

impl From<Option<String>> for BrandingCategory {
    fn from(raw: Option<String>) -> Self {
        match normalized(&raw).as_str() {
            "premium" => BrandingCategory::Premium,
            "standard" => BrandingCategory::Standard,
            "basic" => BrandingCategory::Basic,
            _ => BrandingCategory::Unrecognized(raw.unwrap_or_default()),
        }
    }
}

impl From<BrandingCategory> for String {
    fn from(value: BrandingCategory) -> Self {
        value.label().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum CleaningStatus {
    Completed,
    Pending,
    Unrecognized(String),
}

impl CleaningStatus {
    pub fn label(&self) -> &str {
        match self {
            CleaningStatus::Completed => "Completed",
            CleaningStatus::Pending => "Pending",
            CleaningStatus::Unrecognized(raw) => raw,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, CleaningStatus::Completed)
    }
}

impl Default for CleaningStatus {
    fn default() -> Self {
        CleaningStatus::Unrecognized(String::new())
    }
}

impl From<Option<String>> for CleaningStatus {
    fn from(raw: Option<String>) -> Self {
        match normalized(&raw).as_str() {
            "completed" => CleaningStatus::Completed,
            "pending" => CleaningStatus::Pending,
            _ => CleaningStatus::Unrecognized(raw.unwrap_or_default()),
        }
    }
}

impl From<CleaningStatus> for String {
    fn from(value: CleaningStatus) -> Self {
        value.label().to_string()
    }
}

/// One vehicle's condition signals for a single planning cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    #[serde(alias = "trainId")]
    pub id: VehicleId,
    #[serde(default)]
    pub fitness_status: FitnessStatus,
    #[serde(default)]
    pub job_card_status: JobCardStatus,
    #[serde(default)]
    pub branding_category: BrandingCategory,
    #[serde(default)]
    pub cleaning_status: CleaningStatus,
    #[serde(default)]
    pub mileage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability: Option<String>,
}

impl VehicleRecord {
    /// Vehicle in good standing: valid certificate, closed card, clean, standard livery.
    pub fn new(id: impl Into<String>, mileage: f64) -> Self {
        Self {
            id: VehicleId(id.into()),
            fitness_status: FitnessStatus::Valid,
            job_card_status: JobCardStatus::Closed,
            branding_category: BrandingCategory::Standard,
            cleaning_status: CleaningStatus::Completed,
            mileage: Some(mileage),
            availability: None,
        }
    }

    pub fn is_excluded(&self) -> bool {
        self.availability
            .as_deref()
            .map(|value| value.trim().eq_ignore_ascii_case(EXCLUDED_AVAILABILITY))
            .unwrap_or(false)
    }

    /// Mileage is the only numeric signal; without it the record cannot be ranked fairly.
    pub fn is_complete(&self) -> bool {
        self.mileage.is_some()
    }
}

/// Vehicle record paired with its priority score for one planning run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredVehicle {
    #[serde(flatten)]
    pub record: VehicleRecord,
    pub priority_score: f64,
}

/// Daily duty category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bucket {
    Service,
    Standby,
    Maintenance,
}

impl Bucket {
    pub fn ordered() -> [Bucket; 3] {
        [Bucket::Service, Bucket::Standby, Bucket::Maintenance]
    }

    pub fn label(self) -> &'static str {
        match self {
            Bucket::Service => "Service",
            Bucket::Standby => "Standby",
            Bucket::Maintenance => "Maintenance",
        }
    }

    /// Higher is better: service outranks standby outranks maintenance.
    pub fn rank(self) -> u8 {
        match self {
            Bucket::Service => 2,
            Bucket::Standby => 1,
            Bucket::Maintenance => 0,
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Bucket {
    type Err = PlanningError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "service" => Ok(Bucket::Service),
            "standby" => Ok(Bucket::Standby),
            "maintenance" => Ok(Bucket::Maintenance),
            _ => Err(PlanningError::UnknownBucket(value.to_string())),
        }
    }
}
