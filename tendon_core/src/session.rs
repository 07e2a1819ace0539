//! Session aggregation and rest-day recommendation.
//!
//! Recommendation rules (thresholds on `total / historical_average`):
//! - below 0.8 → 0-1 days
//! - 0.8 up to 1.2 → 1 day
//! - 1.2 up to 1.6 → 1-2 days
//! - 1.6 and above → 2-3 days
//!
//! A session under 500 TLI never requires a rest day, whatever the ratio.

use crate::hangboard::{compute_hangboard_set_tli, compute_hangboard_total};
use crate::{BoulderingResult, ResolvedSession, RestDays, SessionReport, SessionResult};

/// Total above this multiple of the average raises a spike warning
const SPIKE_MULTIPLE: f64 = 1.4;
/// Sessions below this total are always "light"
const LIGHT_SESSION_TLI: f64 = 500.0;

/// Combine module results and compare against the rolling average
///
/// A non-positive `historical_average` means no history: the ratio reads
/// 1.0 and no spike is reported.
pub fn compute_session(
    boulder: &BoulderingResult,
    hangboard_total: f64,
    historical_average: f64,
) -> SessionResult {
    let total = boulder.total + hangboard_total;

    let has_history = historical_average > 0.0;
    let ratio_to_average = if has_history {
        total / historical_average
    } else {
        1.0
    };
    let spike_warning = has_history && total > SPIKE_MULTIPLE * historical_average;

    if spike_warning {
        tracing::info!(
            "Session TLI {:.0} is {:.2}x the average ({:.0})",
            total,
            ratio_to_average,
            historical_average
        );
    }

    SessionResult {
        total,
        ratio_to_average,
        spike_warning,
        recommended_rest_days: recommend_rest_days(ratio_to_average, total),
    }
}

/// Rest-day range for a session
pub fn recommend_rest_days(ratio_to_average: f64, total: f64) -> RestDays {
    let (min, max) = if ratio_to_average < 0.8 {
        (0, 1)
    } else if ratio_to_average < 1.2 {
        (1, 1)
    } else if ratio_to_average < 1.6 {
        (1, 2)
    } else {
        (2, 3)
    };

    let min = if total < LIGHT_SESSION_TLI { 0 } else { min };

    RestDays { min, max }
}

/// Run every module over a resolved session
///
/// Call [`ResolvedSession::validate`] first; this does not check inputs.
pub fn evaluate_session(resolved: &ResolvedSession) -> SessionReport {
    let bouldering = resolved.bouldering.as_ref().map(|b| b.compute());
    let hangboard_sets = resolved
        .hangboard
        .iter()
        .map(compute_hangboard_set_tli)
        .collect();
    let hangboard_total = compute_hangboard_total(&resolved.hangboard);

    let session = compute_session(
        &bouldering.unwrap_or_default(),
        hangboard_total,
        resolved.historical_average,
    );

    SessionReport {
        bouldering,
        hangboard_sets,
        hangboard_total,
        session,
    }
}
