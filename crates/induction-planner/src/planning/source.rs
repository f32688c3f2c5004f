use super::domain::VehicleRecord;

/// Supplies the merged fleet snapshot used when a request carries no fleet of its own.
pub trait FleetSnapshotSource: Send + Sync {
    fn snapshot(&self) -> Result<Vec<VehicleRecord>, SnapshotError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("fleet snapshot unavailable: {0}")]
    Unavailable(String),
}
