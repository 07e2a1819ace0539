//! Bouldering load.
//!
//! Two input modes are supported and kept separate:
//! - Climb list: per-climb intensity weighted by fatigue in attempt order
//! - Grade mix: grade fractions spread over a timed session with a
//!   work:rest ratio, no per-climb fatigue

use crate::formulas::{climb_weight, density_factor, freshness_factor, relative_intensity};
use crate::{BoulderingInput, BoulderingParams, BoulderingResult, GradeMixParams};

/// Density exponent applied in grade-mix mode
const GRADE_MIX_DENSITY_EXP: f64 = 0.5;

/// Compute the bouldering TLI from an ordered climb list
pub fn compute_bouldering_tli(params: &BoulderingParams) -> BoulderingResult {
    let total_tut: f64 = params.climbs.iter().map(|c| c.tut_sec.max(0.0)).sum();

    let gaps = params.climbs.len().saturating_sub(1) as f64;
    let total_rest_within = (gaps * params.avg_rest_between_climbs_sec.max(0.0)).max(0.0);

    let fr = freshness_factor(params.rest_days);
    let df = if params.use_density {
        density_factor(total_tut, total_rest_within, params.density_exp)
    } else {
        1.0
    };

    let raw: f64 = params
        .climbs
        .iter()
        .enumerate()
        .map(|(idx, climb)| {
            let ri = relative_intensity(params.v_max - climb.grade);
            ri * climb.tut_sec.max(0.0) * climb_weight(idx + 1, params.fatigue_rate)
        })
        .sum();

    let total = fr * df * raw;

    tracing::debug!(
        climbs = params.climbs.len(),
        total_tut,
        total_rest_within,
        fr,
        df,
        raw,
        "Bouldering TLI: {:.2}",
        total
    );

    BoulderingResult {
        total,
        total_tut,
        total_rest_within,
        freshness_factor: fr,
        density_factor: df,
    }
}

/// Compute the bouldering TLI from a grade distribution
///
/// Fractions are clamped to zero and renormalized to sum to one, so they
/// may be entered as percentages or raw counts.
pub fn compute_grade_mix_tli(params: &GradeMixParams) -> BoulderingResult {
    let ratio = params.work_rest_ratio.max(0.0);
    let work_share = ratio / (1.0 + ratio);
    let session_sec = params.total_minutes.max(0.0) * 60.0;
    let work_sec = session_sec * work_share;
    let rest_sec = session_sec - work_sec;

    let fr = freshness_factor(params.rest_days);
    let df = work_share.powf(GRADE_MIX_DENSITY_EXP);

    let fraction_sum: f64 = params.grades.iter().map(|g| g.fraction.max(0.0)).sum();
    let raw = if fraction_sum > 0.0 {
        params
            .grades
            .iter()
            .map(|g| {
                let share = g.fraction.max(0.0) / fraction_sum;
                relative_intensity(params.v_max - g.grade) * share * work_sec
            })
            .sum()
    } else {
        if !params.grades.is_empty() {
            tracing::warn!("Grade mix fractions sum to zero, no bouldering load credited");
        }
        0.0
    };

    let total = fr * df * raw;

    tracing::debug!(
        work_sec,
        rest_sec,
        fr,
        df,
        raw,
        "Grade-mix TLI: {:.2}",
        total
    );

    BoulderingResult {
        total,
        total_tut: work_sec,
        total_rest_within: rest_sec,
        freshness_factor: fr,
        density_factor: df,
    }
}

impl BoulderingInput {
    /// Compute the TLI with the formula matching this input's mode
    pub fn compute(&self) -> BoulderingResult {
        match self {
            BoulderingInput::Climbs(params) => compute_bouldering_tli(params),
            BoulderingInput::GradeMix(params) => compute_grade_mix_tli(params),
        }
    }
}
