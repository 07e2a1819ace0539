//! Climb list import from CSV.
//!
//! Expects a header row with `grade` and `tut_sec` columns. Extra columns
//! (names, notes) are ignored. Rows keep file order since attempt order
//! drives the fatigue weighting.

use crate::{Climb, Result};
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CsvRow {
    grade: f64,
    tut_sec: f64,
}

/// Load an ordered climb list from a CSV file
///
/// A malformed row fails the whole load; skipping it would silently shift
/// the position of every later climb.
pub fn load_climbs(path: &Path) -> Result<Vec<Climb>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_path(path)?;

    let mut climbs = Vec::new();
    for row in reader.deserialize::<CsvRow>() {
        let row = row?;
        climbs.push(Climb {
            grade: row.grade,
            tut_sec: row.tut_sec,
        });
    }

    tracing::info!("Loaded {} climbs from {:?}", climbs.len(), path);
    Ok(climbs)
}
