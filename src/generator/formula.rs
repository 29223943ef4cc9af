use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::*;
use crate::config::BrewConfig;
use crate::formulas;
use crate::ingredients::{
    GrainAddition, GrainContribution, HopAddition, HopContribution, HopUse, RecipeTargets, YeastAddition,
    YeastContribution,
};

/// Yeast used when the catalog has nothing suitable.
const GENERIC_YEAST: (&str, f64) = ("Generic Ale Yeast", 75.0);

/// Share of the grain bill's gravity points per role (%).
const BASE_SHARE: f64 = 80.0;
const SPECIALTY_SHARE: f64 = 20.0;
const DARK_SHARE: f64 = 5.0;
const CRYSTAL_MAX_SHARE: f64 = 15.0;

/// `(share of IBU, boil time)` for bittering, flavor and aroma additions.
const BITTERING: (f64, u32) = (0.7, 60);
const FLAVOR: (f64, u32) = (0.2, 15);
const AROMA: (f64, u32) = (0.1, 5);

/// Builds recipes from style targets and brewing formulas.
pub struct FormulaGenerator {
    catalog: IngredientCatalog,
    config: BrewConfig,
    rng: StdRng,
}

impl FormulaGenerator {
    /// Seeded from `config.seed`, or from OS entropy when unset.
    pub fn new(catalog: IngredientCatalog, config: BrewConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { catalog, config, rng }
    }

    pub fn with_seed(catalog: IngredientCatalog, config: BrewConfig, seed: u64) -> Self {
        Self { catalog, config, rng: StdRng::seed_from_u64(seed) }
    }

    pub fn catalog(&self) -> &IngredientCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &BrewConfig {
        &self.config
    }

    // ── Grain bill ───────────────────────────────────────────────────

    fn grain_bill(&mut self, total_points: f64, target_srm: f64, efficiency: f64) -> Result<Vec<GrainAddition>> {
        let mut bill = Vec::new();

        let base: Vec<&CatalogGrain> = self
            .catalog
            .grains
            .iter()
            .filter(|g| g.kind == GrainKind::Base && g.color_srm <= 10.0)
            .collect();
        if let Some(grain) = base.choose(&mut self.rng) {
            bill.push(grain_addition(grain, total_points, BASE_SHARE, efficiency)?);
        }

        let mut remaining_share = SPECIALTY_SHARE;

        if target_srm > 20.0 {
            let dark: Vec<&CatalogGrain> = self
                .catalog
                .grains
                .iter()
                .filter(|g| matches!(g.kind, GrainKind::Roasted | GrainKind::Crystal) && g.color_srm >= 100.0)
                .collect();
            if let Some(grain) = dark.choose(&mut self.rng) {
                bill.push(grain_addition(grain, total_points, DARK_SHARE, efficiency)?);
                remaining_share -= DARK_SHARE;
            }
        }

        if target_srm > 5.0 {
            let crystal: Vec<&CatalogGrain> = self
                .catalog
                .grains
                .iter()
                .filter(|g| g.kind == GrainKind::Crystal && (30.0..=100.0).contains(&g.color_srm))
                .collect();
            if let Some(grain) = crystal.choose(&mut self.rng) {
                let share = CRYSTAL_MAX_SHARE.min(remaining_share);
                bill.push(grain_addition(grain, total_points, share, efficiency)?);
            }
        }

        Ok(bill)
    }

    // ── Hop schedule ─────────────────────────────────────────────────

    fn hop_schedule(&mut self, target_ibu: f64, batch: f64, og: f64) -> Result<Vec<HopAddition>> {
        let mut schedule = Vec::new();

        let bittering = self
            .catalog
            .hops
            .iter()
            .filter(|h| matches!(h.kind, HopKind::Bittering | HopKind::Dual))
            .max_by(|a, b| a.alpha_acid_pct.total_cmp(&b.alpha_acid_pct));
        if let Some(hop) = bittering {
            schedule.push(hop_addition(hop, target_ibu, BITTERING, batch, og)?);
        }

        let flavor: Vec<&CatalogHop> = self
            .catalog
            .hops
            .iter()
            .filter(|h| matches!(h.kind, HopKind::Aroma | HopKind::Dual))
            .collect();
        if let Some(hop) = flavor.choose(&mut self.rng) {
            schedule.push(hop_addition(hop, target_ibu, FLAVOR, batch, og)?);
        }

        let aroma: Vec<&CatalogHop> = self.catalog.hops.iter().filter(|h| h.kind == HopKind::Aroma).collect();
        if let Some(hop) = aroma.choose(&mut self.rng) {
            schedule.push(hop_addition(hop, target_ibu, AROMA, batch, og)?);
        }

        Ok(schedule)
    }

    // ── Yeast ────────────────────────────────────────────────────────

    fn select_yeast(&mut self, style: &BeerStyle) -> YeastAddition {
        let wanted: &[YeastKind] = if style.is_lager() {
            &[YeastKind::Lager]
        } else if style.is_wheat() {
            &[YeastKind::Wheat, YeastKind::Ale]
        } else {
            &[YeastKind::Ale]
        };

        let candidates: Vec<&CatalogYeast> =
            self.catalog.yeasts.iter().filter(|y| wanted.contains(&y.kind)).collect();

        let (name, attenuation_pct) = match candidates.choose(&mut self.rng) {
            Some(y) => (y.name.clone(), y.attenuation_pct),
            None => {
                tracing::debug!(style = %style.name, "no matching yeast in catalog, using generic ale yeast");
                (GENERIC_YEAST.0.to_string(), GENERIC_YEAST.1)
            }
        };

        YeastAddition {
            name,
            yeast: YeastContribution { attenuation_pct },
            amount: 1.0,
        }
    }

    // ── Notes ────────────────────────────────────────────────────────

    pub(crate) fn brewing_notes(&self, batch: f64, grains: &[GrainAddition]) -> Result<String> {
        let grain_kg: f64 = grains.iter().map(|g| g.grain.weight_kg).sum();
        let water = batch + formulas::grain_absorption(grain_kg)?;
        let mash = self.config.mash_temp_c;

        let mut notes = format!("BIAB brewing instructions for a {batch} L batch:\n\n");
        if grain_kg > 0.0 {
            let strike = formulas::strike_water_temp(self.config.grain_temp_c, mash, water / grain_kg)?;
            notes.push_str(&format!("1. Heat {water:.1} L of water to {strike:.1} °C (strike temperature)\n"));
        } else {
            notes.push_str(&format!("1. Heat {water:.1} L of water\n"));
        }
        notes.push_str(&format!("2. Add the grain bag with {grain_kg:.2} kg of grain\n"));
        notes.push_str(&format!("3. Mash at {mash:.0} °C for 60 minutes\n"));
        notes.push_str("4. Raise to 76 °C for a 10 minute mash out\n");
        notes.push_str("5. Remove the grain bag and let it drain\n");
        notes.push_str("6. Bring the wort to a rolling boil and follow the hop schedule\n");
        notes.push_str("7. Chill to 20 °C, transfer to the fermenter and pitch the yeast\n\n");
        notes.push_str(&format!("Expected pre-boil volume: {water:.1} L\n"));
        notes.push_str(&format!("Expected post-boil volume: {batch} L"));
        Ok(notes)
    }
}

impl RecipeGenerator for FormulaGenerator {
    fn generate(
        &mut self,
        style: &BeerStyle,
        batch_size_liters: f64,
        constraints: Option<&str>,
    ) -> Result<GeneratedRecipe> {
        let targets = RecipeTargets::new(batch_size_liters, self.config.efficiency_pct);
        targets.validate()?;

        let aim = style.targets();
        let efficiency = targets.efficiency_pct / 100.0;
        let total_points = (aim.og - 1.0) * batch_size_liters * 1000.0;
        if let Some(c) = constraints {
            tracing::debug!(constraints = c, "formula generator ignores free-text constraints");
        }

        let grains = self.grain_bill(total_points, aim.srm, efficiency)?;
        let hops = self.hop_schedule(aim.ibu, batch_size_liters, aim.og)?;
        let yeast = self.select_yeast(style);
        let notes = self.brewing_notes(batch_size_liters, &grains)?;

        let recipe = Recipe {
            name: format!("Generated {}", style.name),
            style: Some(style.name.clone()),
            targets,
            grains,
            hops,
            yeasts: vec![yeast],
            notes,
        };
        let expected = recipe.projection()?;
        tracing::info!(
            style = %style.name,
            grains = recipe.grains.len(),
            hops = recipe.hops.len(),
            og = expected.original_gravity,
            ibu = expected.ibu,
            "generated recipe from formulas"
        );

        Ok(GeneratedRecipe { recipe, expected, source: GenerationSource::Formula })
    }
}

fn round_grams(kg: f64) -> f64 {
    (kg * 1000.0).round() / 1000.0
}

fn grain_addition(grain: &CatalogGrain, total_points: f64, share_pct: f64, efficiency: f64) -> Result<GrainAddition> {
    let points = total_points * share_pct / 100.0;
    let weight = formulas::grain_weight_for_points(points, grain.extract_potential_ppg, efficiency)?;
    Ok(GrainAddition {
        name: grain.name.clone(),
        grain: GrainContribution::new(round_grams(weight), grain.extract_potential_ppg, grain.color_srm)?,
        percentage: Some(share_pct),
    })
}

fn hop_addition(hop: &CatalogHop, target_ibu: f64, (share, minutes): (f64, u32), batch: f64, og: f64) -> Result<HopAddition> {
    let grams = formulas::hop_weight_for_ibu(target_ibu * share, hop.alpha_acid_pct, f64::from(minutes), batch, og)?;
    Ok(HopAddition {
        name: hop.name.clone(),
        hop: HopContribution::new(round_grams(grams / 1000.0), hop.alpha_acid_pct, minutes, HopUse::Boil)?,
    })
}
