use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Deserializer};

use super::FleetError;
use crate::planning::{
    BrandingCategory, CleaningStatus, FitnessStatus, JobCardStatus, VehicleId, VehicleRecord,
};

/// Loads a snapshot, picking the format from the file extension.
pub fn load_fleet(path: &Path) -> Result<Vec<VehicleRecord>, FleetError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("json") => read_fleet_json(BufReader::new(File::open(path)?)),
        Some("csv") => read_fleet_csv(BufReader::new(File::open(path)?)),
        _ => Err(FleetError::UnsupportedFormat(path.to_path_buf())),
    }
}

pub fn read_fleet_json<R: Read>(reader: R) -> Result<Vec<VehicleRecord>, FleetError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Reads a header-row CSV using the JSON field names. Empty cells count as missing.
pub fn read_fleet_csv<R: Read>(reader: R) -> Result<Vec<VehicleRecord>, FleetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut fleet = Vec::new();

    for row in csv_reader.deserialize::<FleetRow>() {
        fleet.push(row?.into_record());
    }

    Ok(fleet)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FleetRow {
    #[serde(alias = "trainId")]
    id: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    fitness_status: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    job_card_status: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    branding_category: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    cleaning_status: Option<String>,
    #[serde(default)]
    mileage: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    availability: Option<String>,
}

impl FleetRow {
    fn into_record(self) -> VehicleRecord {
        VehicleRecord {
            id: VehicleId(self.id),
            fitness_status: FitnessStatus::from(self.fitness_status),
            job_card_status: JobCardStatus::from(self.job_card_status),
            branding_category: BrandingCategory::from(self.branding_category),
            cleaning_status: CleaningStatus::from(self.cleaning_status),
            mileage: self.mileage,
            availability: self.availability,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn csv_rows_with_blank_cells_fail_closed() {
        let csv = "trainId,fitnessStatus,jobCardStatus,brandingCategory,cleaningStatus,mileage\n\
                   KMRL-TS-01,Valid,Closed,Premium,Completed,40000\n\
                   KMRL-TS-02,,Open,,Pending,\n";

        let fleet = read_fleet_csv(Cursor::new(csv)).expect("csv parses");

        assert_eq!(fleet.len(), 2);
        assert_eq!(fleet[0].branding_category, BrandingCategory::Premium);
        assert_eq!(fleet[0].mileage, Some(40_000.0));
        assert_eq!(fleet[1].fitness_status, FitnessStatus::Unrecognized(String::new()));
        assert_eq!(fleet[1].mileage, None);
        assert!(!fleet[1].is_complete());
    }

    #[test]
    fn csv_rejects_non_numeric_mileage() {
        let csv = "id,mileage\nT1,lots\n";

        let err = read_fleet_csv(Cursor::new(csv)).expect_err("mileage must be numeric");

        assert!(matches!(err, FleetError::Csv(_)));
    }

    #[test]
    fn load_rejects_unknown_extension() {
        let err = load_fleet(Path::new("fleet.xlsx")).expect_err("xlsx unsupported");

        assert!(matches!(err, FleetError::UnsupportedFormat(_)));
    }
}
