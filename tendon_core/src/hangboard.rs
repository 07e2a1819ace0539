//! Hangboard load.
//!
//! Capacity is estimated on a 20mm half-crimp reference and scaled to the
//! actual edge and grip before comparing it with the hanging load.

use crate::formulas::density_factor;
use crate::{HangboardRow, HangboardSetResult};

/// Reference edge depth for MVC calibration
const REFERENCE_EDGE_MM: f64 = 20.0;
/// Added to bodyweight when no calibrated MVC is supplied
const DEFAULT_MVC_MARGIN_KG: f64 = 20.0;
const RI_CAP: f64 = 1.2;

impl HangboardRow {
    /// Max load on the 20mm reference edge, calibrated or estimated
    pub fn mvc20(&self) -> f64 {
        self.mvc20_kg.unwrap_or(self.body_kg + DEFAULT_MVC_MARGIN_KG)
    }

    /// Max load scaled to this row's edge depth and grip
    ///
    /// `edge_mm` must be positive; other values give a meaningless result.
    pub fn mvc_edge(&self) -> f64 {
        let edge_scale = (REFERENCE_EDGE_MM / self.edge_mm).powf(self.k_edge_exp);
        self.mvc20() * edge_scale * self.grip.multiplier()
    }
}

/// Compute the TLI of one set of this hangboard protocol
pub fn compute_hangboard_set_tli(row: &HangboardRow) -> HangboardSetResult {
    let mvc_edge = row.mvc_edge();
    let ri = ((row.body_kg + row.added_kg) / mvc_edge).clamp(0.0, RI_CAP);

    let reps = row.reps as f64;
    let work_seconds = row.duration_sec * reps;
    let rest_seconds = row.rest_between_reps_sec.max(0.0) * row.reps.saturating_sub(1) as f64;

    let df = density_factor(work_seconds, rest_seconds, row.density_exp_hb);
    let per_set = ri * work_seconds * df;

    tracing::debug!(
        mvc_edge,
        ri,
        work_seconds,
        rest_seconds,
        df,
        "Hangboard set TLI: {:.2}",
        per_set
    );

    HangboardSetResult {
        per_set,
        work_seconds,
        rest_seconds,
        density_factor: df,
        relative_intensity: ri,
        mvc_edge_kg: mvc_edge,
    }
}

/// Compute the TLI of every set of this protocol
pub fn compute_hangboard_tli(row: &HangboardRow) -> f64 {
    compute_hangboard_set_tli(row).per_set * row.sets as f64
}

/// Sum the TLI of several protocols done in one session
pub fn compute_hangboard_total(rows: &[HangboardRow]) -> f64 {
    rows.iter().map(compute_hangboard_tli).sum()
}
