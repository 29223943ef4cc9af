//! Scaling a recipe to a new batch size.

use serde::{Deserialize, Serialize};

use crate::error::*;
use crate::ingredients::{GrainAddition, HopAddition, Recipe, RecipeTargets, YeastAddition};

/// Fewest yeast packets a scaled recipe will pitch.
pub const MIN_YEAST_AMOUNT: f64 = 1.0;

/// Additions of a recipe after scaling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaledRecipe {
    pub scale_factor: f64,
    pub batch_size_liters: f64,
    pub grains: Vec<GrainAddition>,
    pub hops: Vec<HopAddition>,
    pub yeasts: Vec<YeastAddition>,
}

impl ScaledRecipe {
    /// Rebuild a full recipe, keeping the name, style, efficiency and
    /// notes of `original`.
    pub fn into_recipe(self, original: &Recipe) -> Recipe {
        Recipe {
            name: original.name.clone(),
            style: original.style.clone(),
            targets: RecipeTargets {
                batch_size_liters: self.batch_size_liters,
                efficiency_pct: original.targets.efficiency_pct,
            },
            grains: self.grains,
            hops: self.hops,
            yeasts: self.yeasts,
            notes: original.notes.clone(),
        }
    }
}

/// Scale `recipe` to `new_batch_size_liters`.
///
/// Grains scale linearly and keep their bill percentage.  Hops scale
/// linearly only when `scale_hops` is set.  Yeast scales with the
/// square root of the factor and never drops below
/// [`MIN_YEAST_AMOUNT`].
pub fn scale(recipe: &Recipe, new_batch_size_liters: f64, scale_hops: bool) -> Result<ScaledRecipe> {
    let old = recipe.targets.batch_size_liters;
    if !old.is_finite() || old <= 0.0 {
        return Err(BrewError::InvalidScale(format!("original batch size must be > 0 L, got {old}")));
    }
    if !new_batch_size_liters.is_finite() || new_batch_size_liters <= 0.0 {
        return Err(BrewError::InvalidScale(format!(
            "new batch size must be > 0 L, got {new_batch_size_liters}"
        )));
    }

    let factor = new_batch_size_liters / old;
    let hop_factor = if scale_hops { factor } else { 1.0 };
    let yeast_factor = factor.sqrt();

    let grains = recipe
        .grains
        .iter()
        .map(|a| {
            let mut scaled = a.clone();
            scaled.grain.weight_kg *= factor;
            scaled
        })
        .collect();

    let hops = recipe
        .hops
        .iter()
        .map(|a| {
            let mut scaled = a.clone();
            scaled.hop.weight_kg *= hop_factor;
            scaled
        })
        .collect();

    let yeasts = recipe
        .yeasts
        .iter()
        .map(|a| {
            let mut scaled = a.clone();
            scaled.amount = (a.amount * yeast_factor).max(MIN_YEAST_AMOUNT);
            scaled
        })
        .collect();

    Ok(ScaledRecipe {
        scale_factor: factor,
        batch_size_liters: new_batch_size_liters,
        grains,
        hops,
        yeasts,
    })
}
