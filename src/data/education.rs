//! Education dataset decoding.

use crate::domain::AttainmentRecord;
use crate::error::AppError;

/// Decode the education records and reject rows that cannot be colored.
pub fn parse_records(raw: &str) -> Result<Vec<AttainmentRecord>, AppError> {
    let records: Vec<AttainmentRecord> = serde_json::from_str(raw)
        .map_err(|e| AppError::fetch(format!("Invalid education JSON: {e}")))?;

    if let Some(bad) = records.iter().find(|r| !r.bachelors_or_higher.is_finite()) {
        return Err(AppError::input(format!(
            "Non-finite attainment value for FIPS {}.",
            bad.fips
        )));
    }

    Ok(records)
}
