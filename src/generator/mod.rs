//! Recipe generation.
//!
//! [`FormulaGenerator`] builds a recipe for a style from brewing
//! formulas and a catalog of available ingredients.  Candidate picks go
//! through a seedable RNG, so a fixed seed reproduces a recipe.
//!
//! [`AiRecipeGenerator`] asks an injected [`CompletionService`] for a
//! recipe and falls back to the formula generator when the service is
//! unavailable or answers with something unusable.

mod ai;
mod formula;

pub use ai::{AiRecipeGenerator, CompletionService};
pub use formula::FormulaGenerator;

use serde::{Deserialize, Serialize};

use crate::error::*;
use crate::ingredients::Recipe;
use crate::projection::RecipeProjection;
use crate::style::BeerStyle;

// ── Catalog ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrainKind {
    Base,
    Crystal,
    Roasted,
    Specialty,
    Adjunct,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HopKind {
    Bittering,
    Aroma,
    Dual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YeastKind {
    Ale,
    Lager,
    Wheat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogGrain {
    pub name: String,
    pub kind: GrainKind,
    pub color_srm: f64,
    pub extract_potential_ppg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogHop {
    pub name: String,
    pub kind: HopKind,
    pub alpha_acid_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogYeast {
    pub name: String,
    pub kind: YeastKind,
    pub attenuation_pct: f64,
}

/// Ingredients a generator may choose from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngredientCatalog {
    #[serde(default)]
    pub grains: Vec<CatalogGrain>,
    #[serde(default)]
    pub hops: Vec<CatalogHop>,
    #[serde(default)]
    pub yeasts: Vec<CatalogYeast>,
}

impl IngredientCatalog {
    pub fn grain(&self, name: &str) -> Option<&CatalogGrain> {
        self.grains.iter().find(|g| g.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn hop(&self, name: &str) -> Option<&CatalogHop> {
        self.hops.iter().find(|h| h.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn yeast(&self, name: &str) -> Option<&CatalogYeast> {
        self.yeasts.iter().find(|y| y.name.eq_ignore_ascii_case(name.trim()))
    }
}

// ── Output ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationSource {
    Formula,
    Ai,
}

/// A generated recipe together with its projected statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedRecipe {
    pub recipe: Recipe,
    pub expected: RecipeProjection,
    pub source: GenerationSource,
}

pub trait RecipeGenerator {
    fn generate(
        &mut self,
        style: &BeerStyle,
        batch_size_liters: f64,
        constraints: Option<&str>,
    ) -> Result<GeneratedRecipe>;
}
