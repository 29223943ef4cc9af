use serde::Deserialize;

use super::*;
use crate::ingredients::{
    GrainAddition, GrainContribution, HopAddition, HopContribution, HopUse, RecipeTargets, YeastAddition,
    YeastContribution,
};

/// A text-completion backend, e.g. a hosted language model.
///
/// Implementations own their transport, credentials and timeouts.
pub trait CompletionService {
    fn complete(&self, prompt: &str) -> Result<String>;
}

impl<S: CompletionService + ?Sized> CompletionService for &S {
    fn complete(&self, prompt: &str) -> Result<String> {
        (**self).complete(prompt)
    }
}

impl<S: CompletionService + ?Sized> CompletionService for Box<S> {
    fn complete(&self, prompt: &str) -> Result<String> {
        (**self).complete(prompt)
    }
}

// ── Response shape ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct AiResponse {
    recipe_name: String,
    #[serde(default)]
    grain_bill: Vec<AiGrain>,
    #[serde(default)]
    hop_schedule: Vec<AiHop>,
    yeast: Option<AiYeast>,
    #[serde(default)]
    brewing_notes: String,
}

#[derive(Debug, Deserialize)]
struct AiGrain {
    grain_name: String,
    weight_kg: f64,
    percentage: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct AiHop {
    hop_name: String,
    weight_kg: f64,
    #[serde(default)]
    boil_time_minutes: u32,
    #[serde(rename = "use", default)]
    use_: HopUse,
}

#[derive(Debug, Deserialize)]
struct AiYeast {
    yeast_name: String,
    #[serde(default = "one")]
    amount: f64,
}

fn one() -> f64 {
    1.0
}

// ── Generator ───────────────────────────────────────────────────────

/// Asks a [`CompletionService`] for a recipe; falls back to the
/// formula generator on any failure.
pub struct AiRecipeGenerator<S> {
    service: S,
    fallback: FormulaGenerator,
}

impl<S: CompletionService> AiRecipeGenerator<S> {
    pub fn new(service: S, fallback: FormulaGenerator) -> Self {
        Self { service, fallback }
    }

    fn prompt(&self, style: &BeerStyle, batch_size_liters: f64, constraints: Option<&str>) -> String {
        let catalog = self.fallback.catalog();
        let grains = join_names(catalog.grains.iter().take(10).map(|g| g.name.as_str()));
        let hops = join_names(catalog.hops.iter().take(10).map(|h| h.name.as_str()));
        let yeasts = join_names(catalog.yeasts.iter().take(5).map(|y| y.name.as_str()));
        let efficiency = self.fallback.config().efficiency_pct;

        format!(
            "You are an expert brewer. Create a BIAB (brew-in-a-bag) recipe for {batch_size_liters} L of {name}.\n\
             \n\
             Style requirements:\n\
             - Original gravity: {og_min:.3}-{og_max:.3}\n\
             - Final gravity: {fg_min:.3}-{fg_max:.3}\n\
             - IBU: {ibu_min}-{ibu_max}\n\
             - Color: {srm_min}-{srm_max} SRM\n\
             - ABV: {abv_min}-{abv_max} %\n\
             \n\
             Available grains: {grains}\n\
             Available hops: {hops}\n\
             Available yeasts: {yeasts}\n\
             \n\
             Additional constraints: {constraints}\n\
             \n\
             Respond with JSON only, in exactly this shape:\n\
             {{\"recipe_name\": \"...\", \
             \"grain_bill\": [{{\"grain_name\": \"...\", \"weight_kg\": 4.5, \"percentage\": 85.0}}], \
             \"hop_schedule\": [{{\"hop_name\": \"...\", \"weight_kg\": 0.025, \"boil_time_minutes\": 60, \"use\": \"boil\"}}], \
             \"yeast\": {{\"yeast_name\": \"...\", \"amount\": 1.0}}, \
             \"brewing_notes\": \"...\"}}\n\
             \n\
             Calculate weights to hit the target OG for {batch_size_liters} L at {efficiency} % efficiency.",
            name = style.name,
            og_min = style.og.min,
            og_max = style.og.max,
            fg_min = style.fg.min,
            fg_max = style.fg.max,
            ibu_min = style.ibu.min,
            ibu_max = style.ibu.max,
            srm_min = style.srm.min,
            srm_max = style.srm.max,
            abv_min = style.abv.min,
            abv_max = style.abv.max,
            constraints = constraints.unwrap_or("None"),
        )
    }

    fn generate_with_service(
        &self,
        style: &BeerStyle,
        batch_size_liters: f64,
        constraints: Option<&str>,
    ) -> Result<GeneratedRecipe> {
        let targets = RecipeTargets::new(batch_size_liters, self.fallback.config().efficiency_pct);
        targets.validate()?;

        let prompt = self.prompt(style, batch_size_liters, constraints);
        let answer = self.service.complete(&prompt)?;
        let response: AiResponse = serde_json::from_str(extract_json(&answer))?;

        let recipe = self.resolve(response, style, targets)?;
        let expected = recipe.projection()?;
        tracing::info!(style = %style.name, og = expected.original_gravity, "generated recipe with completion service");
        Ok(GeneratedRecipe { recipe, expected, source: GenerationSource::Ai })
    }

    /// Turn the service's answer into a recipe using catalog data.
    fn resolve(&self, response: AiResponse, style: &BeerStyle, targets: RecipeTargets) -> Result<Recipe> {
        let catalog = self.fallback.catalog();
        let mut recipe = Recipe::new(response.recipe_name, targets);
        recipe.style = Some(style.name.clone());
        recipe.notes = response.brewing_notes;

        for g in response.grain_bill {
            let Some(entry) = catalog.grain(&g.grain_name) else {
                tracing::warn!(grain = %g.grain_name, "grain not in catalog, skipping");
                continue;
            };
            recipe.grains.push(GrainAddition {
                name: entry.name.clone(),
                grain: GrainContribution::new(g.weight_kg, entry.extract_potential_ppg, entry.color_srm)?,
                percentage: g.percentage,
            });
        }

        for h in response.hop_schedule {
            let Some(entry) = catalog.hop(&h.hop_name) else {
                tracing::warn!(hop = %h.hop_name, "hop not in catalog, skipping");
                continue;
            };
            recipe.hops.push(HopAddition {
                name: entry.name.clone(),
                hop: HopContribution::new(h.weight_kg, entry.alpha_acid_pct, h.boil_time_minutes, h.use_)?,
            });
        }

        if let Some(y) = response.yeast {
            match catalog.yeast(&y.yeast_name) {
                Some(entry) => recipe.yeasts.push(YeastAddition {
                    name: entry.name.clone(),
                    yeast: YeastContribution::new(entry.attenuation_pct)?,
                    amount: y.amount,
                }),
                None => tracing::warn!(yeast = %y.yeast_name, "yeast not in catalog, skipping"),
            }
        }

        if recipe.grains.is_empty() {
            return Err(BrewError::Generation("answer named no known grains".into()));
        }
        if recipe.notes.is_empty() {
            recipe.notes = self.fallback.brewing_notes(targets.batch_size_liters, &recipe.grains)?;
        }
        Ok(recipe)
    }
}

impl<S: CompletionService> RecipeGenerator for AiRecipeGenerator<S> {
    fn generate(
        &mut self,
        style: &BeerStyle,
        batch_size_liters: f64,
        constraints: Option<&str>,
    ) -> Result<GeneratedRecipe> {
        match self.generate_with_service(style, batch_size_liters, constraints) {
            Ok(generated) => Ok(generated),
            Err(e @ BrewError::InvalidTargets(_)) => Err(e),
            Err(e) => {
                tracing::warn!(error = %e, "completion service failed, falling back to formulas");
                self.fallback.generate(style, batch_size_liters, constraints)
            }
        }
    }
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}

/// The outermost `{ … }` of an answer, so surrounding prose or code
/// fences do not break parsing.
fn extract_json(answer: &str) -> &str {
    match (answer.find('{'), answer.rfind('}')) {
        (Some(start), Some(end)) if start < end => &answer[start..=end],
        _ => answer,
    }
}
