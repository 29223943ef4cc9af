//! Fermentation tracking math.

use serde::{Deserialize, Serialize};

use crate::error::*;
use crate::formulas::require_finite;
use crate::projection::DEFAULT_GRAVITY_DROP;

/// Hydrometer calibration temperature (°C).
pub const CALIBRATION_TEMP_C: f64 = 20.0;

/// A hydrometer reading, optionally with the sample temperature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GravityReading {
    pub gravity: f64,
    #[serde(default)]
    pub temperature_c: Option<f64>,
}

impl GravityReading {
    pub fn new(gravity: f64) -> Self {
        Self { gravity, temperature_c: None }
    }

    pub fn at_temperature(gravity: f64, temperature_c: f64) -> Self {
        Self { gravity, temperature_c: Some(temperature_c) }
    }

    /// Gravity corrected to the calibration temperature
    /// (+0.0001 per °C above 20 °C).
    pub fn corrected_gravity(&self) -> f64 {
        match self.temperature_c {
            Some(t) if t != CALIBRATION_TEMP_C => self.gravity + (t - CALIBRATION_TEMP_C) * 0.0001,
            _ => self.gravity,
        }
    }
}

/// Target FG to use when the recipe has none recorded.
pub fn default_target_fg(actual_og: f64) -> f64 {
    actual_og - DEFAULT_GRAVITY_DROP
}

/// How far fermentation has progressed towards `target_fg` (0–100 %).
///
/// Fails with [`BrewError::InvalidGravity`] when `actual_og` is 1.000.
/// A target at or above the OG gives 0.
pub fn fermentation_progress(actual_og: f64, current_gravity: f64, target_fg: f64) -> Result<f64> {
    require_finite("original gravity", actual_og)?;
    require_finite("current gravity", current_gravity)?;
    require_finite("target final gravity", target_fg)?;

    let points = actual_og - 1.0;
    if points == 0.0 {
        return Err(BrewError::InvalidGravity(actual_og));
    }
    let current = (actual_og - current_gravity) / points * 100.0;
    let target = (actual_og - target_fg) / points * 100.0;

    if target > 0.0 {
        Ok((current / target * 100.0).min(100.0))
    } else {
        Ok(0.0)
    }
}

/// Rough fermentation time in days for a style and starting gravity.
pub fn estimate_fermentation_days(style_name: &str, starting_gravity: f64) -> u32 {
    let style = style_name.to_lowercase();
    let mut days: i32 = 7;

    if style.contains("lager") {
        days += 14;
    } else if style.contains("wheat") {
        days -= 1;
    } else if style.contains("stout") || style.contains("porter") {
        days += 3;
    }

    if starting_gravity > 1.065 {
        days += 3;
    } else if starting_gravity < 1.045 {
        days -= 2;
    }

    days.max(5) as u32
}

/// Days from pitching until fermentation is expected to finish.
pub fn estimated_fermentation_end_days(style_name: &str) -> u32 {
    if style_name.to_lowercase().contains("ale") { 14 } else { 21 }
}

/// Alcohol tolerance (% ABV) of common yeast strains; 10 % when unknown.
pub fn alcohol_tolerance(yeast_strain: &str) -> f64 {
    match yeast_strain.trim() {
        "US-05"   => 11.0,
        "S-04"    => 9.5,
        "WB-06"   => 8.0,
        "S-23"    => 10.0,
        "W-34/70" => 10.0,
        "1056"    => 11.0,
        "WLP001"  => 11.0,
        _         => 10.0,
    }
}
