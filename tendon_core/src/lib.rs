#![forbid(unsafe_code)]

//! Core formulas and input handling for the Tendon Load Index (TLI).
//!
//! This crate provides:
//! - Domain types (climbs, hangboard rows, results)
//! - Load formulas (relative intensity, freshness, density, fatigue)
//! - Bouldering and hangboard load calculation
//! - Session aggregation and rest-day recommendation
//! - Session file loading, config defaults and validation

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod formulas;
pub mod bouldering;
pub mod hangboard;
pub mod session;
pub mod input;
pub mod climb_log;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use bouldering::{compute_bouldering_tli, compute_grade_mix_tli};
pub use hangboard::{compute_hangboard_set_tli, compute_hangboard_tli, compute_hangboard_total};
pub use session::{compute_session, evaluate_session, recommend_rest_days};
pub use input::{ResolvedSession, SessionInput};
pub use climb_log::load_climbs;
