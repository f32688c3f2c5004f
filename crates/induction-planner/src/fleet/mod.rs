//! Fleet snapshot import and plan export for the command line and file-backed
//! snapshot sources. The engine never touches files; callers load here and hand
//! records over.

mod export;
mod import;

pub use export::write_plan_csv;
pub use import::{load_fleet, read_fleet_csv, read_fleet_json};

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum FleetError {
    #[error("failed to read fleet snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid fleet JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid fleet CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("unsupported fleet snapshot format for {0}; expected .json or .csv")]
    UnsupportedFormat(PathBuf),
}
