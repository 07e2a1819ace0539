//! Shared load formulas.
//!
//! Every function here is total over finite inputs: guards and clamps
//! replace errors.

/// Floor of the relative intensity curve (climbs far below max)
const RI_FLOOR: f64 = 0.35;
/// Height of the logistic step above the floor
const RI_SPAN: f64 = 0.75;
/// Grade headroom at the logistic midpoint
const RI_MIDPOINT: f64 = 1.5;
const RI_CAP: f64 = 1.15;

const FR_BASE: f64 = 0.85;
const FR_PER_DAY: f64 = 0.02;
const FR_MAX_DAYS: f64 = 10.0;
const FR_MIN: f64 = 0.75;
const FR_MAX: f64 = 1.1;

/// Relative intensity of a climb given `delta = v_max - grade`.
///
/// Non-increasing in `delta`, always within `[0, 1.15]`.
pub fn relative_intensity(delta: f64) -> f64 {
    let ri = RI_FLOOR + RI_SPAN / (1.0 + (delta - RI_MIDPOINT).exp());
    ri.clamp(0.0, RI_CAP)
}

/// Capacity modifier from days of rest, flat beyond ten days.
pub fn freshness_factor(rest_days: f64) -> f64 {
    let days = rest_days.max(0.0).min(FR_MAX_DAYS);
    (FR_BASE + FR_PER_DAY * days).clamp(FR_MIN, FR_MAX)
}

/// Share of elapsed time spent working, raised to `exponent`.
///
/// The denominator never drops below one second.
pub fn density_factor(total_work: f64, total_rest: f64, exponent: f64) -> f64 {
    (total_work / (total_work + total_rest).max(1.0)).powf(exponent)
}

/// Fatigue weight of the climb at 1-indexed `position`.
pub fn climb_weight(position: usize, fatigue_rate: f64) -> f64 {
    if fatigue_rate <= 0.0 {
        return 1.0;
    }
    let earlier = position.saturating_sub(1) as f64;
    (-fatigue_rate * earlier).exp()
}
