//! Ingredient contributions and recipe records.
//!
//! Contributions carry only what the formulas need.  Additions wrap a
//! contribution with the recipe-level details (name, bill percentage,
//! yeast packet count).

use serde::{Deserialize, Serialize};

use crate::error::*;
use crate::formulas::{require_finite, require_non_negative, require_positive};
use crate::projection::{self, RecipeProjection};

// ── Contributions ───────────────────────────────────────────────────

/// One grain addition as seen by the formulas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrainContribution {
    pub weight_kg: f64,
    /// Points per pound per gallon.
    pub extract_potential_ppg: f64,
    pub color_srm: f64,
}

impl GrainContribution {
    pub fn new(weight_kg: f64, extract_potential_ppg: f64, color_srm: f64) -> Result<Self> {
        let grain = Self { weight_kg, extract_potential_ppg, color_srm };
        grain.validate()?;
        Ok(grain)
    }

    pub fn validate(&self) -> Result<()> {
        require_non_negative("grain weight", self.weight_kg)?;
        require_positive("extract potential", self.extract_potential_ppg)?;
        require_non_negative("grain color", self.color_srm)?;
        Ok(())
    }
}

/// How a hop addition is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HopUse {
    #[default]
    Boil,
    Flameout,
    DryHop,
    Whirlpool,
}

impl HopUse {
    /// Label as written in BeerXML (`Boil`, `Dry Hop`, …).
    pub fn label(self) -> &'static str {
        match self {
            Self::Boil      => "Boil",
            Self::Flameout  => "Flameout",
            Self::DryHop    => "Dry Hop",
            Self::Whirlpool => "Whirlpool",
        }
    }
}

/// One hop addition as seen by the formulas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HopContribution {
    pub weight_kg: f64,
    pub alpha_acid_pct: f64,
    pub boil_time_min: u32,
    #[serde(rename = "use", default)]
    pub use_: HopUse,
}

impl HopContribution {
    pub fn new(weight_kg: f64, alpha_acid_pct: f64, boil_time_min: u32, use_: HopUse) -> Result<Self> {
        let hop = Self { weight_kg, alpha_acid_pct, boil_time_min, use_ };
        hop.validate()?;
        Ok(hop)
    }

    pub fn validate(&self) -> Result<()> {
        require_non_negative("hop weight", self.weight_kg)?;
        require_positive("alpha acid", self.alpha_acid_pct)?;
        Ok(())
    }
}

/// One yeast addition as seen by the formulas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YeastContribution {
    pub attenuation_pct: f64,
}

impl YeastContribution {
    pub fn new(attenuation_pct: f64) -> Result<Self> {
        let yeast = Self { attenuation_pct };
        yeast.validate()?;
        Ok(yeast)
    }

    pub fn validate(&self) -> Result<()> {
        let pct = require_positive("yeast attenuation", self.attenuation_pct)?;
        if pct > 100.0 {
            return Err(BrewError::InvalidInput(format!(
                "yeast attenuation must be in (0, 100], got {pct}"
            )));
        }
        Ok(())
    }
}

/// Batch size and brewhouse efficiency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecipeTargets {
    pub batch_size_liters: f64,
    pub efficiency_pct: f64,
}

impl RecipeTargets {
    pub fn new(batch_size_liters: f64, efficiency_pct: f64) -> Self {
        Self { batch_size_liters, efficiency_pct }
    }

    /// Checks that the batch size is positive and the efficiency lies in (0, 100].
    pub fn validate(&self) -> Result<()> {
        let batch = self.batch_size_liters;
        if !batch.is_finite() || batch <= 0.0 {
            return Err(BrewError::InvalidTargets(format!(
                "batch size must be > 0 L, got {batch}"
            )));
        }
        let eff = self.efficiency_pct;
        if !eff.is_finite() || eff <= 0.0 || eff > 100.0 {
            return Err(BrewError::InvalidTargets(format!(
                "efficiency must be in (0, 100] %, got {eff}"
            )));
        }
        Ok(())
    }
}

impl Default for RecipeTargets {
    fn default() -> Self {
        Self { batch_size_liters: 20.0, efficiency_pct: 75.0 }
    }
}

// ── Tagged ingredient ───────────────────────────────────────────────

/// Any ingredient of a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Ingredient {
    Grain(GrainContribution),
    Hop(HopContribution),
    Yeast(YeastContribution),
}

impl From<GrainContribution> for Ingredient {
    fn from(g: GrainContribution) -> Self { Self::Grain(g) }
}

impl From<HopContribution> for Ingredient {
    fn from(h: HopContribution) -> Self { Self::Hop(h) }
}

impl From<YeastContribution> for Ingredient {
    fn from(y: YeastContribution) -> Self { Self::Yeast(y) }
}

/// Ingredients sorted by kind, ready for [`projection::project`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngredientBill {
    pub grains: Vec<GrainContribution>,
    pub hops: Vec<HopContribution>,
    pub yeasts: Vec<YeastContribution>,
}

impl IngredientBill {
    pub fn new() -> Self { Self::default() }

    pub fn push(&mut self, ingredient: Ingredient) {
        match ingredient {
            Ingredient::Grain(g) => self.grains.push(g),
            Ingredient::Hop(h) => self.hops.push(h),
            Ingredient::Yeast(y) => self.yeasts.push(y),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.grains.is_empty() && self.hops.is_empty() && self.yeasts.is_empty()
    }

    pub fn project(&self, targets: &RecipeTargets) -> Result<RecipeProjection> {
        projection::project(&self.grains, &self.hops, &self.yeasts, targets)
    }
}

impl FromIterator<Ingredient> for IngredientBill {
    fn from_iter<I: IntoIterator<Item = Ingredient>>(iter: I) -> Self {
        let mut bill = Self::new();
        for ingredient in iter {
            bill.push(ingredient);
        }
        bill
    }
}

// ── Recipe additions ────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrainAddition {
    pub name: String,
    #[serde(flatten)]
    pub grain: GrainContribution,
    /// Share of the grain bill, as entered by the brewer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HopAddition {
    pub name: String,
    #[serde(flatten)]
    pub hop: HopContribution,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YeastAddition {
    pub name: String,
    #[serde(flatten)]
    pub yeast: YeastContribution,
    /// Packets or vials.
    pub amount: f64,
}

/// A complete recipe: targets plus named additions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    pub targets: RecipeTargets,
    #[serde(default)]
    pub grains: Vec<GrainAddition>,
    #[serde(default)]
    pub hops: Vec<HopAddition>,
    #[serde(default)]
    pub yeasts: Vec<YeastAddition>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

impl Recipe {
    pub fn new(name: impl Into<String>, targets: RecipeTargets) -> Self {
        Self {
            name: name.into(),
            style: None,
            targets,
            grains: Vec::new(),
            hops: Vec::new(),
            yeasts: Vec::new(),
            notes: String::new(),
        }
    }

    /// Contributions of every addition, sorted by kind.
    pub fn bill(&self) -> IngredientBill {
        IngredientBill {
            grains: self.grains.iter().map(|a| a.grain).collect(),
            hops: self.hops.iter().map(|a| a.hop).collect(),
            yeasts: self.yeasts.iter().map(|a| a.yeast).collect(),
        }
    }

    /// Recompute OG, FG, ABV, IBU and SRM from the current additions.
    pub fn projection(&self) -> Result<RecipeProjection> {
        self.bill().project(&self.targets)
    }

    pub fn total_grain_weight(&self) -> f64 {
        self.grains.iter().map(|a| a.grain.weight_kg).sum()
    }

    /// Fill in each grain's share of the bill by weight.
    ///
    /// Leaves the percentages untouched when the bill weighs nothing.
    pub fn fill_grain_percentages(&mut self) -> Result<()> {
        let total = self.total_grain_weight();
        require_finite("total grain weight", total)?;
        if total <= 0.0 {
            return Ok(());
        }
        for addition in &mut self.grains {
            addition.percentage = Some(addition.grain.weight_kg / total * 100.0);
        }
        Ok(())
    }
}
