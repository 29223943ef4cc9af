//! Simplified water treatment.

use serde::{Deserialize, Serialize};

use crate::error::*;
use crate::formulas::require_positive;

/// Ion concentrations in ppm.  Missing values fall back to typical tap
/// water (Ca 50, SO₄ 50) or a hoppy target (SO₄ 150).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WaterProfile {
    pub calcium: Option<f64>,
    pub sulfate: Option<f64>,
}

/// Salt additions in grams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SaltAdditions {
    pub calcium_chloride_g: Option<f64>,
    pub gypsum_g: Option<f64>,
}

/// Calcium chloride and gypsum to move `water` towards `target`.
///
/// Only increases are handled; a salt is omitted when the water already
/// meets the target.
pub fn salt_additions(volume_liters: f64, water: &WaterProfile, target: &WaterProfile) -> Result<SaltAdditions> {
    let volume = require_positive("water volume", volume_liters)?;
    let mut additions = SaltAdditions::default();

    let ca_diff = target.calcium.unwrap_or(50.0) - water.calcium.unwrap_or(50.0);
    if ca_diff > 0.0 {
        additions.calcium_chloride_g = Some(ca_diff * volume * 0.00368);
    }

    let so4_diff = target.sulfate.unwrap_or(150.0) - water.sulfate.unwrap_or(50.0);
    if so4_diff > 0.0 {
        additions.gypsum_g = Some(so4_diff * volume * 0.00430);
    }

    Ok(additions)
}
