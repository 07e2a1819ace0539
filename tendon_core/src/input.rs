//! Session input files.
//!
//! A session file is the full input snapshot for one evaluation. Tunables
//! it leaves out are filled from [`Config`] by [`SessionInput::resolve`],
//! and [`ResolvedSession::validate`] enforces the input constraints the
//! numeric core relies on callers to check.

use crate::{
    BoulderingInput, BoulderingParams, Climb, Config, Error, GradeFraction, GradeMixParams, Grip,
    HangboardRow, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// File Format
// ============================================================================

/// Session file as written by the user
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct SessionInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub historical_average: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bouldering: Option<BoulderingSection>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hangboard: Vec<HangboardSection>,
}

/// `[bouldering]` section, tagged by `mode`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum BoulderingSection {
    Climbs {
        v_max: f64,
        #[serde(default)]
        rest_days: f64,
        #[serde(default)]
        avg_rest_between_climbs_sec: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        density_exp: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        use_density: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fatigue_rate: Option<f64>,
        #[serde(default)]
        climbs: Vec<Climb>,
    },
    GradeMix {
        v_max: f64,
        #[serde(default)]
        rest_days: f64,
        total_minutes: f64,
        work_rest_ratio: f64,
        #[serde(default)]
        grades: Vec<GradeFraction>,
    },
}

/// One `[[hangboard]]` entry
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HangboardSection {
    pub body_kg: f64,
    #[serde(default)]
    pub added_kg: f64,
    pub edge_mm: f64,
    pub grip: Grip,
    pub duration_sec: f64,
    pub reps: u32,
    #[serde(default)]
    pub rest_between_reps_sec: f64,
    #[serde(default = "default_sets")]
    pub sets: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mvc20_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density_exp_hb: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k_edge_exp: Option<f64>,
}

fn default_sets() -> u32 {
    1
}

/// Fully specified session ready for evaluation
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ResolvedSession {
    pub bouldering: Option<BoulderingInput>,
    pub hangboard: Vec<HangboardRow>,
    pub historical_average: f64,
}

// ============================================================================
// Loading and Resolution
// ============================================================================

impl SessionInput {
    /// Load a session file, choosing the parser from the extension
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        let input: SessionInput = match extension.as_deref() {
            Some("json") => serde_json::from_str(&contents)?,
            Some("toml") => toml::from_str(&contents)?,
            other => {
                return Err(Error::Input(format!(
                    "Unsupported session file extension {:?} (expected .toml or .json)",
                    other.unwrap_or("")
                )))
            }
        };

        tracing::info!("Loaded session input from {:?}", path);
        Ok(input)
    }

    /// Replace the climb list, e.g. with one imported from CSV
    pub fn with_climbs(mut self, new_climbs: Vec<Climb>) -> Result<Self> {
        match self.bouldering {
            Some(BoulderingSection::Climbs { ref mut climbs, .. }) => *climbs = new_climbs,
            Some(BoulderingSection::GradeMix { .. }) => {
                return Err(Error::Input(
                    "A climb list cannot be used with a grade_mix bouldering section".into(),
                ))
            }
            None => {
                return Err(Error::Input(
                    "A climb list needs a [bouldering] section with mode = \"climbs\"".into(),
                ))
            }
        }
        Ok(self)
    }

    /// Fill unset tunables from configuration
    pub fn resolve(&self, config: &Config) -> ResolvedSession {
        let bouldering = self.bouldering.as_ref().map(|section| match section {
            BoulderingSection::Climbs {
                v_max,
                rest_days,
                avg_rest_between_climbs_sec,
                density_exp,
                use_density,
                fatigue_rate,
                climbs,
            } => BoulderingInput::Climbs(BoulderingParams {
                v_max: *v_max,
                rest_days: *rest_days,
                avg_rest_between_climbs_sec: *avg_rest_between_climbs_sec,
                density_exp: density_exp.unwrap_or(config.bouldering.density_exp),
                use_density: use_density.unwrap_or(config.bouldering.use_density),
                fatigue_rate: fatigue_rate.unwrap_or(config.bouldering.fatigue_rate),
                climbs: climbs.clone(),
            }),
            BoulderingSection::GradeMix {
                v_max,
                rest_days,
                total_minutes,
                work_rest_ratio,
                grades,
            } => BoulderingInput::GradeMix(GradeMixParams {
                v_max: *v_max,
                rest_days: *rest_days,
                total_minutes: *total_minutes,
                work_rest_ratio: *work_rest_ratio,
                grades: grades.clone(),
            }),
        });

        let hangboard = self
            .hangboard
            .iter()
            .map(|h| HangboardRow {
                body_kg: h.body_kg,
                added_kg: h.added_kg,
                edge_mm: h.edge_mm,
                grip: h.grip,
                duration_sec: h.duration_sec,
                reps: h.reps,
                rest_between_reps_sec: h.rest_between_reps_sec,
                mvc20_kg: h.mvc20_kg,
                density_exp_hb: h.density_exp_hb.unwrap_or(config.hangboard.density_exp),
                k_edge_exp: h.k_edge_exp.unwrap_or(config.hangboard.k_edge_exp),
                sets: h.sets,
            })
            .collect();

        ResolvedSession {
            bouldering,
            hangboard,
            historical_average: self
                .historical_average
                .unwrap_or(config.session.historical_average),
        }
    }
}

// ============================================================================
// Validation
// ============================================================================

fn require_finite(name: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::Validation(format!("{} must be a finite number", name)))
    }
}

fn require_positive(name: &str, value: f64) -> Result<()> {
    require_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(Error::Validation(format!("{} must be positive", name)))
    }
}

fn require_non_negative(name: &str, value: f64) -> Result<()> {
    require_finite(name, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(Error::Validation(format!("{} must not be negative", name)))
    }
}

impl ResolvedSession {
    /// Check the constraints the formulas assume across the whole session
    pub fn validate(&self) -> Result<()> {
        require_finite("historical_average", self.historical_average)?;
        self.validate_bouldering()?;
        self.validate_hangboard()
    }

    /// Check the `[bouldering]` section only
    ///
    /// Negative climb TUT and rest between climbs are allowed: the
    /// bouldering formulas clamp them to zero.
    pub fn validate_bouldering(&self) -> Result<()> {
        match &self.bouldering {
            Some(BoulderingInput::Climbs(p)) => {
                require_finite("bouldering.v_max", p.v_max)?;
                require_finite("bouldering.rest_days", p.rest_days)?;
                require_finite(
                    "bouldering.avg_rest_between_climbs_sec",
                    p.avg_rest_between_climbs_sec,
                )?;
                require_finite("bouldering.density_exp", p.density_exp)?;
                require_finite("bouldering.fatigue_rate", p.fatigue_rate)?;
                for (i, climb) in p.climbs.iter().enumerate() {
                    require_finite(&format!("bouldering.climbs[{}].grade", i), climb.grade)?;
                    require_finite(&format!("bouldering.climbs[{}].tut_sec", i), climb.tut_sec)?;
                }
            }
            Some(BoulderingInput::GradeMix(p)) => {
                require_finite("bouldering.v_max", p.v_max)?;
                require_finite("bouldering.rest_days", p.rest_days)?;
                require_finite("bouldering.total_minutes", p.total_minutes)?;
                require_finite("bouldering.work_rest_ratio", p.work_rest_ratio)?;
                for (i, g) in p.grades.iter().enumerate() {
                    require_finite(&format!("bouldering.grades[{}].grade", i), g.grade)?;
                    require_finite(&format!("bouldering.grades[{}].fraction", i), g.fraction)?;
                }
            }
            None => {}
        }

        Ok(())
    }

    /// Check the `[[hangboard]]` rows only
    ///
    /// Negative rest between reps is allowed since it is clamped; hang
    /// duration is not clamped and must not be negative.
    pub fn validate_hangboard(&self) -> Result<()> {
        for (i, row) in self.hangboard.iter().enumerate() {
            let field = |name: &str| format!("hangboard[{}].{}", i, name);

            require_positive(&field("body_kg"), row.body_kg)?;
            require_finite(&field("added_kg"), row.added_kg)?;
            require_positive(&field("edge_mm"), row.edge_mm)?;
            require_non_negative(&field("duration_sec"), row.duration_sec)?;
            require_finite(&field("rest_between_reps_sec"), row.rest_between_reps_sec)?;
            require_finite(&field("density_exp_hb"), row.density_exp_hb)?;
            require_finite(&field("k_edge_exp"), row.k_edge_exp)?;
            if let Some(mvc) = row.mvc20_kg {
                require_positive(&field("mvc20_kg"), mvc)?;
            }
            if row.reps < 1 {
                return Err(Error::Validation(format!("{} must be at least 1", field("reps"))));
            }
            if row.sets < 1 {
                return Err(Error::Validation(format!("{} must be at least 1", field("sets"))));
            }
        }

        Ok(())
    }
}
