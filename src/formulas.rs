//! Closed-form brewing formulas.
//!
//! All gravities are specific gravities (e.g. `1.050`).  Weights are in
//! kg unless a name says otherwise, volumes in L, temperatures in °C.
//!
//! | Function              | Result                         |
//! |-----------------------|--------------------------------|
//! | [`sg_to_plato`]       | °P                             |
//! | [`abv`]               | % alcohol by volume            |
//! | [`attenuation`]       | % apparent attenuation         |
//! | [`strike_water_temp`] | °C                             |
//! | [`grain_absorption`]  | L absorbed by the grain        |
//! | [`boil_off`]          | % of volume lost in the boil   |
//! | [`extract_points`]    | gravity points × L             |
//! | [`ibu_tinseth`]       | IBU                            |
//! | [`srm_color`]         | SRM                            |

use crate::error::*;

// ── Constants ───────────────────────────────────────────────────────

/// Liters of wort retained per kg of grain (BIAB).
pub const GRAIN_ABSORPTION_L_PER_KG: f64 = 0.96;

/// Default boil-off rate in % per hour.
pub const DEFAULT_BOIL_OFF_RATE: f64 = 4.0;

/// Default mash thickness in L/kg.
pub const DEFAULT_MASH_RATIO: f64 = 3.0;

/// ABV multiplier of the standard `(OG − FG) × 131.25` approximation.
pub const ABV_FACTOR: f64 = 131.25;

/// Exponential base used by the Tinseth boil-time factor.
///
/// Stored projections were computed with this truncated value of *e*;
/// keep it so recomputed IBUs match them.
pub const TINSETH_EXP_BASE: f64 = 2.718;

const LB_PER_KG: f64 = 2.2;
const GAL_PER_L: f64 = 0.264;

// ── Argument guards ─────────────────────────────────────────────────

pub(crate) fn require_finite(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(BrewError::InvalidInput(format!("{name} must be a finite number, got {value}")))
    }
}

pub(crate) fn require_positive(name: &str, value: f64) -> Result<f64> {
    require_finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(BrewError::InvalidInput(format!("{name} must be > 0, got {value}")))
    }
}

pub(crate) fn require_non_negative(name: &str, value: f64) -> Result<f64> {
    require_finite(name, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(BrewError::InvalidInput(format!("{name} must be >= 0, got {value}")))
    }
}

// ── Gravity ─────────────────────────────────────────────────────────

/// Specific gravity → degrees Plato.
pub fn sg_to_plato(sg: f64) -> f64 {
    (sg - 1.0) * 1000.0 / 4.0
}

/// Degrees Plato → specific gravity.
pub fn plato_to_sg(plato: f64) -> f64 {
    plato * 4.0 / 1000.0 + 1.0
}

/// Alcohol by volume (%).
///
/// A final gravity above the original gravity gives a negative result;
/// that is reported as-is since it flags a stuck or mis-measured
/// fermentation.
pub fn abv(og: f64, fg: f64) -> f64 {
    (og - fg) * ABV_FACTOR
}

/// Apparent attenuation (%).
///
/// Fails with [`BrewError::InvalidGravity`] when `og` is exactly 1.000.
pub fn attenuation(og: f64, fg: f64) -> Result<f64> {
    require_finite("original gravity", og)?;
    require_finite("final gravity", fg)?;
    let points = og - 1.0;
    if points == 0.0 {
        return Err(BrewError::InvalidGravity(og));
    }
    Ok((og - fg) / points * 100.0)
}

// ── Mash & water ────────────────────────────────────────────────────

/// Strike water temperature (°C) for a BIAB mash.
///
/// * `grain_temp_c` – temperature of the dry grain
/// * `mash_temp_c` – target mash temperature
/// * `water_to_grain_ratio` – L of water per kg of grain
pub fn strike_water_temp(grain_temp_c: f64, mash_temp_c: f64, water_to_grain_ratio: f64) -> Result<f64> {
    require_finite("grain temperature", grain_temp_c)?;
    require_finite("mash temperature", mash_temp_c)?;
    let ratio = require_positive("water-to-grain ratio", water_to_grain_ratio)?;
    Ok((0.2 / ratio) * (mash_temp_c - grain_temp_c) + mash_temp_c)
}

/// Liters of water absorbed by the grain bill.
pub fn grain_absorption(grain_weight_kg: f64) -> Result<f64> {
    let kg = require_non_negative("grain weight", grain_weight_kg)?;
    Ok(kg * GRAIN_ABSORPTION_L_PER_KG)
}

/// Boil-off (% of volume) for a boil of `boil_time_min` at `rate_pct_per_hour`.
pub fn boil_off(boil_time_min: f64, rate_pct_per_hour: f64) -> Result<f64> {
    let minutes = require_non_negative("boil time", boil_time_min)?;
    let rate = require_non_negative("boil-off rate", rate_pct_per_hour)?;
    Ok(minutes / 60.0 * rate)
}

/// Mash water volume (L) for a grain bill at the given thickness.
pub fn mash_water(grain_weight_kg: f64, ratio_l_per_kg: f64) -> Result<f64> {
    let kg = require_non_negative("grain weight", grain_weight_kg)?;
    let ratio = require_positive("water-to-grain ratio", ratio_l_per_kg)?;
    Ok(kg * ratio)
}

/// Sparge water volume (L) for a traditional mash.
///
/// The grain weight is inferred from the mash water at 3 L/kg and a
/// flat 15 % of the batch is allowed for boil-off.
pub fn sparge_water(batch_size_l: f64, mash_water_l: f64, absorption_l_per_kg: f64) -> Result<f64> {
    let batch = require_positive("batch size", batch_size_l)?;
    let mash = require_non_negative("mash water", mash_water_l)?;
    let absorption = require_non_negative("grain absorption", absorption_l_per_kg)?;

    let grain_weight = mash / DEFAULT_MASH_RATIO;
    let absorbed = grain_weight * absorption;
    let boiled_off = batch * 0.15;
    Ok(batch + absorbed + boiled_off - mash)
}

/// Pre-boil volume (L) needed to finish the boil with `batch_size_l`.
pub fn preboil_volume(batch_size_l: f64, boil_time_min: f64, rate_pct_per_hour: f64) -> Result<f64> {
    let batch = require_positive("batch size", batch_size_l)?;
    let fraction = boil_off(boil_time_min, rate_pct_per_hour)? / 100.0;
    if fraction >= 1.0 {
        return Err(BrewError::InvalidInput(format!(
            "boil-off of {:.1} % leaves no wort", fraction * 100.0
        )));
    }
    Ok(batch / (1.0 - fraction))
}

// ── Extract ─────────────────────────────────────────────────────────

/// Gravity points × liters contributed by one grain addition.
///
/// The potential is in points per pound per gallon (PPG); the weight
/// is converted at 2.2 lb/kg and the volume basis at 0.264 gal/L.
/// `efficiency` is a fraction (0.75 for 75 %).
pub fn extract_points(grain_weight_kg: f64, extract_potential_ppg: f64, efficiency: f64) -> Result<f64> {
    let kg = require_non_negative("grain weight", grain_weight_kg)?;
    let ppg = require_positive("extract potential", extract_potential_ppg)?;
    let eff = require_positive("efficiency", efficiency)?;
    if eff > 1.0 {
        return Err(BrewError::InvalidInput(format!(
            "efficiency must be a fraction in (0, 1], got {eff}"
        )));
    }
    Ok(kg * LB_PER_KG * ppg * eff / GAL_PER_L)
}

/// Grain weight (kg) that yields `points` (gravity points × L); inverse
/// of [`extract_points`].
pub fn grain_weight_for_points(points: f64, extract_potential_ppg: f64, efficiency: f64) -> Result<f64> {
    let points = require_non_negative("gravity points", points)?;
    let per_kg = extract_points(1.0, extract_potential_ppg, efficiency)?;
    Ok(points / per_kg)
}

// ── Bitterness ──────────────────────────────────────────────────────

/// Tinseth hop utilization for a boil of `boil_time_min` at gravity `og`.
fn tinseth_utilization(boil_time_min: f64, og: f64) -> f64 {
    let bigness = 1.65 * 0.000125_f64.powf(og - 1.0);
    let boil_factor = (1.0 - TINSETH_EXP_BASE.powf(-0.04 * boil_time_min)) / 4.15;
    bigness * boil_factor
}

/// IBU contributed by one hop addition (Tinseth).
///
/// * `alpha_acid_pct` – alpha acid in percent (e.g. `5.5`)
/// * `hop_weight_g` – hop weight in **grams**
pub fn ibu_tinseth(
    alpha_acid_pct: f64,
    hop_weight_g: f64,
    boil_time_min: f64,
    batch_size_l: f64,
    og: f64,
) -> Result<f64> {
    let alpha = require_positive("alpha acid", alpha_acid_pct)?;
    let grams = require_non_negative("hop weight", hop_weight_g)?;
    let minutes = require_non_negative("boil time", boil_time_min)?;
    let batch = require_positive("batch size", batch_size_l)?;
    let og = require_finite("original gravity", og)?;

    let utilization = tinseth_utilization(minutes, og);
    Ok(alpha * grams * utilization * 1000.0 / (batch * 100.0))
}

/// Hop weight in **grams** needed to reach `target_ibu` (inverse Tinseth).
pub fn hop_weight_for_ibu(
    target_ibu: f64,
    alpha_acid_pct: f64,
    boil_time_min: f64,
    batch_size_l: f64,
    og: f64,
) -> Result<f64> {
    let ibu = require_non_negative("target IBU", target_ibu)?;
    let alpha = require_positive("alpha acid", alpha_acid_pct)?;
    let minutes = require_non_negative("boil time", boil_time_min)?;
    let batch = require_positive("batch size", batch_size_l)?;
    let og = require_finite("original gravity", og)?;

    let utilization = tinseth_utilization(minutes, og);
    if utilization <= 0.0 {
        return Err(BrewError::InvalidInput(format!(
            "no hop utilization after a {minutes} min boil"
        )));
    }
    Ok(ibu * batch * 100.0 / (alpha * utilization * 1000.0))
}

// ── Color ───────────────────────────────────────────────────────────

/// Beer color (SRM) from `(weight_kg, color_srm)` pairs, Morey equation.
///
/// Malt color units are taken as Σ kg × SRM without converting to the
/// lb/gal basis.  An empty bill has no color.
pub fn srm_color(contributions: &[(f64, f64)]) -> Result<f64> {
    if contributions.is_empty() {
        return Ok(0.0);
    }
    let mut total_mcu = 0.0;
    for &(weight_kg, color_srm) in contributions {
        let kg = require_non_negative("grain weight", weight_kg)?;
        let color = require_non_negative("grain color", color_srm)?;
        total_mcu += kg * color;
    }
    Ok(1.4922 * total_mcu.powf(0.6859))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn utilization_vanishes_without_boil() {
        assert_eq!(tinseth_utilization(0.0, 1.050), 0.0);
    }

    #[test]
    fn utilization_grows_with_boil_time() {
        let u15 = tinseth_utilization(15.0, 1.050);
        let u60 = tinseth_utilization(60.0, 1.050);
        assert!(u60 > u15 && u15 > 0.0);
    }

    #[test]
    fn utilization_uses_truncated_e() {
        // 2.718 rather than std::f64::consts::E
        let expected = 1.65 * 0.000125_f64.powf(0.05) * (1.0 - 2.718_f64.powf(-2.4)) / 4.15;
        assert_abs_diff_eq!(tinseth_utilization(60.0, 1.050), expected);
    }

    #[test]
    fn guards_name_the_argument() {
        let err = require_positive("batch size", 0.0).unwrap_err();
        assert!(err.to_string().contains("batch size"));
        let err = require_non_negative("grain weight", -1.0).unwrap_err();
        assert!(err.to_string().contains("grain weight"));
        assert!(require_finite("og", f64::NAN).is_err());
    }
}
