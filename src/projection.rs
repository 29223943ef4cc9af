//! Recipe projection.

use serde::{Deserialize, Serialize};

use crate::error::*;
use crate::formulas;
use crate::ingredients::{GrainContribution, HopContribution, Ingredient, IngredientBill, RecipeTargets, YeastContribution};

/// Gravity drop assumed when a recipe has no yeast yet.
pub const DEFAULT_GRAVITY_DROP: f64 = 0.010;

/// Projected statistics of a recipe.
///
/// | Field            | Unit            |
/// |------------------|-----------------|
/// | original_gravity | SG              |
/// | final_gravity    | SG              |
/// | abv_pct          | % vol           |
/// | ibu              | IBU             |
/// | srm_color        | SRM             |
///
/// All five values come from one call to [`project`]; there is no way
/// to update a single field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecipeProjection {
    pub original_gravity: f64,
    pub final_gravity: f64,
    pub abv_pct: f64,
    pub ibu: f64,
    pub srm_color: f64,
}

impl std::fmt::Display for RecipeProjection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "OG  = {:.3} ({:.1} °P)", self.original_gravity, formulas::sg_to_plato(self.original_gravity))?;
        writeln!(f, "FG  = {:.3} ({:.1} °P)", self.final_gravity, formulas::sg_to_plato(self.final_gravity))?;
        writeln!(f, "ABV = {:.2} %", self.abv_pct)?;
        writeln!(f, "IBU = {:.1}", self.ibu)?;
        write!(f, "SRM = {:.1}", self.srm_color)
    }
}

/// Project a recipe's OG, FG, ABV, IBU and SRM from its ingredients.
///
/// 1. OG from the summed extract points over the batch volume
///    (exactly 1.000 without grains).
/// 2. FG from the mean yeast attenuation, or OG − 0.010 without yeast.
/// 3. ABV from OG and FG.
/// 4. IBU summed over every hop with the OG computed in step 1.
/// 5. SRM from the grain colors (0 without grains).
///
/// Any invalid contribution fails the whole projection.
pub fn project(
    grains: &[GrainContribution],
    hops: &[HopContribution],
    yeasts: &[YeastContribution],
    targets: &RecipeTargets,
) -> Result<RecipeProjection> {
    targets.validate()?;
    let batch = targets.batch_size_liters;
    let efficiency = targets.efficiency_pct / 100.0;

    // 1. Original gravity
    let mut total_points = 0.0;
    for grain in grains {
        total_points += formulas::extract_points(grain.weight_kg, grain.extract_potential_ppg, efficiency)?;
    }
    let og = if grains.is_empty() { 1.0 } else { 1.0 + total_points / (batch * 1000.0) };

    // 2. Final gravity
    let fg = if yeasts.is_empty() {
        og - DEFAULT_GRAVITY_DROP
    } else {
        let mut total_attenuation = 0.0;
        for yeast in yeasts {
            yeast.validate()?;
            total_attenuation += yeast.attenuation_pct;
        }
        let mean_attenuation = total_attenuation / yeasts.len() as f64;
        og - (og - 1.0) * mean_attenuation / 100.0
    };

    // 3. ABV
    let abv_pct = formulas::abv(og, fg);

    // 4. Bitterness
    let mut ibu = 0.0;
    for hop in hops {
        ibu += formulas::ibu_tinseth(
            hop.alpha_acid_pct,
            hop.weight_kg * 1000.0,
            f64::from(hop.boil_time_min),
            batch,
            og,
        )?;
    }

    // 5. Color
    let colors: Vec<(f64, f64)> = grains.iter().map(|g| (g.weight_kg, g.color_srm)).collect();
    let srm_color = formulas::srm_color(&colors)?;

    Ok(RecipeProjection {
        original_gravity: og,
        final_gravity: fg,
        abv_pct,
        ibu,
        srm_color,
    })
}

/// [`project`] over an unsorted ingredient list.
pub fn project_ingredients(ingredients: &[Ingredient], targets: &RecipeTargets) -> Result<RecipeProjection> {
    let bill: IngredientBill = ingredients.iter().copied().collect();
    bill.project(targets)
}
