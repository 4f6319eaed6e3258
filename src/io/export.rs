//! Export the joined county table to CSV.
//!
//! One row per rendered region, for spreadsheets or downstream scripts.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::UNMATCHED_FILL;
use crate::error::AppError;
use crate::join::Joined;
use crate::render::format_percent;
use crate::scale::ColorScale;

/// Write `fips,state,area_name,bachelors_or_higher,color,matched` rows.
pub fn write_joined_csv(path: &Path, joined: &Joined<'_>, scale: &ColorScale) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::input(format!("Failed to create export CSV '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);

    writeln!(out, "fips,state,area_name,bachelors_or_higher,color,matched")
        .map_err(|e| AppError::input(format!("Failed to write export CSV header: {e}")))?;

    for r in &joined.regions {
        let line = match r.record {
            Some(rec) => format!(
                "{},{},{},{},{},true",
                rec.fips,
                csv_field(&rec.state),
                csv_field(&rec.area_name),
                format_percent(rec.bachelors_or_higher),
                csv_field(scale.resolve(rec.bachelors_or_higher)),
            ),
            None => format!(
                "{},,,,{},false",
                r.region.id.map(|id| id.to_string()).unwrap_or_default(),
                UNMATCHED_FILL
            ),
        };
        writeln!(out, "{line}").map_err(|e| AppError::input(format!("Failed to write export CSV row: {e}")))?;
    }

    out.flush()
        .map_err(|e| AppError::input(format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

/// Quote a field when it contains a delimiter, quote or newline.
fn csv_field(raw: &str) -> String {
    if raw.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}
