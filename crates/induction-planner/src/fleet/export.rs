use std::io::Write;

use serde::Serialize;

use super::FleetError;
use crate::planning::Plan;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanRow<'a> {
    rank: usize,
    id: &'a str,
    bucket: &'static str,
    priority_score: String,
    reasoning: &'a str,
}

/// Writes the plan in rank order, one row per vehicle.
pub fn write_plan_csv<W: Write>(plan: &Plan, writer: W) -> Result<(), FleetError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for (index, assignment) in plan.all().iter().enumerate() {
        csv_writer.serialize(PlanRow {
            rank: index + 1,
            id: assignment.id.as_str(),
            bucket: assignment.bucket.label(),
            priority_score: format!("{:.2}", assignment.priority_score),
            reasoning: &assignment.reasoning,
        })?;
    }

    csv_writer.flush()?;
    Ok(())
}
