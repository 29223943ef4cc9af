//! # brewcalc
//!
//! Brewing calculations for homebrewers: gravity, alcohol, bitterness
//! and color formulas, recipe projection and batch scaling.
//!
//! ## Highlights
//!
//! * **Formulas**: `abv(1.050, 1.010)`, `ibu_tinseth(…)`, `srm_color(…)`
//! * **Recipe projection**: OG, FG, ABV, IBU and SRM recomputed together
//! * **Scaling**: linear grains and hops, square-root yeast
//! * **Configurable units**: work in kg + L + °C or lb + gal + °F
//! * **Inventory**: stock in any unit, expiry, recipe cost per liter
//! * **Analytics**: efficiency, gravity and cost over brew sessions
//! * **Generation**: seedable formula generator, optional AI service
//!
//! ## Quick example
//!
//! ```
//! use brewcalc::{project, GrainContribution, RecipeTargets};
//!
//! let pale = GrainContribution::new(5.0, 37.0, 2.0)?;
//! let p = project(&[pale], &[], &[], &RecipeTargets::new(20.0, 75.0))?;
//! println!("OG = {:.3}", p.original_gravity);
//! # Ok::<(), brewcalc::BrewError>(())
//! ```
//!
//! ## Units
//!
//! ```
//! use brewcalc::{Converter, UnitSystem};
//!
//! let conv = Converter::new(UnitSystem::imperial());
//! let kg = conv.weight_to_kg(11.0); // lb → kg
//! ```

// ── Modules ─────────────────────────────────────────────────────────
pub mod analytics;
pub mod beerxml;
pub mod config;
pub mod error;
pub mod fermentation;
pub mod formulas;
pub mod generator;
pub mod ingredients;
pub mod inventory;
pub mod parse;
pub mod projection;
pub mod scaling;
pub mod style;
pub mod validate;
pub mod water;

// ── Public re-exports ────────────────────────────────────────────────
pub use analytics::{BrewSession, BrewingStats, SessionStatus};
pub use config::BrewConfig;
pub use error::{BrewError, Result};
pub use ingredients::{
    GrainAddition, GrainContribution, HopAddition, HopContribution, HopUse, Ingredient, IngredientBill,
    Recipe, RecipeTargets, YeastAddition, YeastContribution,
};
pub use inventory::{IngredientKind, Inventory, InventoryItem, TransactionKind};
pub use projection::{project, project_ingredients, RecipeProjection};
pub use scaling::{scale, ScaledRecipe};
pub use style::{BeerStyle, StyleRange};

pub use brew_converter::{
    Converter, UnitSystem,
    TempScale, VolumeUnit, WeightUnit, UnknownUnitError,
};

/// String-keyed unit conversion (`"kg"`, `"gal"`, `"F"`, …).
pub mod units {
    pub use brew_converter::{temperature, volume, weight};
}
