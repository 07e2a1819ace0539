//! Core domain types for the Tendon Load Index.
//!
//! This module defines the immutable input snapshots and the derived
//! result structures:
//! - Bouldering inputs (climb list or grade mix)
//! - Hangboard protocol rows and grips
//! - Per-module and whole-session results

use serde::{Deserialize, Serialize};

// ============================================================================
// Bouldering Types
// ============================================================================

/// A single logged climb
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Climb {
    /// V-scale grade, may be fractional
    pub grade: f64,
    /// Time under tension in seconds
    pub tut_sec: f64,
}

/// Share of a session spent at one grade (grade-mix mode)
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct GradeFraction {
    pub grade: f64,
    pub fraction: f64,
}

/// Per-climb bouldering parameters
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BoulderingParams {
    /// Recent best grade
    pub v_max: f64,
    /// Days since the last hard climbing day
    pub rest_days: f64,
    pub avg_rest_between_climbs_sec: f64,
    pub density_exp: f64,
    pub use_density: bool,
    pub fatigue_rate: f64,
    /// Climbs in the order they were attempted
    pub climbs: Vec<Climb>,
}

/// Grade-mix bouldering parameters
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GradeMixParams {
    pub v_max: f64,
    pub rest_days: f64,
    pub total_minutes: f64,
    /// Work seconds per rest second
    pub work_rest_ratio: f64,
    pub grades: Vec<GradeFraction>,
}

/// Bouldering input in one of the two supported modes
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum BoulderingInput {
    Climbs(BoulderingParams),
    GradeMix(GradeMixParams),
}

/// Bouldering TLI with the intermediate metrics used to build it
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct BoulderingResult {
    pub total: f64,
    pub total_tut: f64,
    pub total_rest_within: f64,
    pub freshness_factor: f64,
    pub density_factor: f64,
}

// ============================================================================
// Hangboard Types
// ============================================================================

/// Hand position on the edge
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Grip {
    Open,
    Half,
    Full,
}

impl Grip {
    /// Capacity multiplier relative to half crimp
    pub fn multiplier(self) -> f64 {
        match self {
            Grip::Open => 0.85,
            Grip::Half => 1.0,
            Grip::Full => 1.1,
        }
    }
}

/// One hangboard protocol (a set of repeated hangs)
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HangboardRow {
    pub body_kg: f64,
    /// Negative values mean assistance (pulley, feet)
    pub added_kg: f64,
    pub edge_mm: f64,
    pub grip: Grip,
    pub duration_sec: f64,
    pub reps: u32,
    pub rest_between_reps_sec: f64,
    /// Calibrated max load on a 20mm edge, half crimp
    pub mvc20_kg: Option<f64>,
    pub density_exp_hb: f64,
    pub k_edge_exp: f64,
    pub sets: u32,
}

/// Result for a single hangboard set
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct HangboardSetResult {
    pub per_set: f64,
    pub work_seconds: f64,
    pub rest_seconds: f64,
    pub density_factor: f64,
    pub relative_intensity: f64,
    pub mvc_edge_kg: f64,
}

// ============================================================================
// Session Types
// ============================================================================

/// Recommended range of rest days
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RestDays {
    pub min: u32,
    pub max: u32,
}

/// Whole-session TLI compared against the rolling average
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionResult {
    pub total: f64,
    pub ratio_to_average: f64,
    pub spike_warning: bool,
    pub recommended_rest_days: RestDays,
}

/// Everything computed for one session file
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionReport {
    pub bouldering: Option<BoulderingResult>,
    pub hangboard_sets: Vec<HangboardSetResult>,
    pub hangboard_total: f64,
    pub session: SessionResult,
}
