use std::cell::RefCell;

use approx::assert_relative_eq;
use brewcalc::generator::*;
use brewcalc::style::StyleRange;
use brewcalc::{BeerStyle, BrewConfig, BrewError};

// ═══════════════════════════════════════════════════════════════════
//  Fixtures
// ═══════════════════════════════════════════════════════════════════

fn style(name: &str, og: (f64, f64), ibu: (f64, f64), srm: (f64, f64)) -> BeerStyle {
    BeerStyle {
        name: name.into(),
        code: "X".into(),
        og: StyleRange::new(og.0, og.1),
        fg: StyleRange::new(1.008, 1.016),
        ibu: StyleRange::new(ibu.0, ibu.1),
        srm: StyleRange::new(srm.0, srm.1),
        abv: StyleRange::new(4.0, 7.0),
    }
}

fn pale_ale() -> BeerStyle {
    style("American Pale Ale", (1.045, 1.060), (30.0, 50.0), (5.0, 10.0))
}

fn catalog() -> IngredientCatalog {
    let grain = |name: &str, kind, color_srm, extract_potential_ppg| CatalogGrain {
        name: name.into(),
        kind,
        color_srm,
        extract_potential_ppg,
    };
    let hop = |name: &str, kind, alpha_acid_pct| CatalogHop { name: name.into(), kind, alpha_acid_pct };
    let yeast = |name: &str, kind, attenuation_pct| CatalogYeast { name: name.into(), kind, attenuation_pct };

    IngredientCatalog {
        grains: vec![
            grain("Pale Ale Malt", GrainKind::Base, 3.0, 37.0),
            grain("Pilsner Malt", GrainKind::Base, 1.6, 37.0),
            grain("Crystal 60", GrainKind::Crystal, 60.0, 34.0),
            grain("Roasted Barley", GrainKind::Roasted, 300.0, 25.0),
        ],
        hops: vec![
            hop("Magnum", HopKind::Bittering, 12.0),
            hop("Centennial", HopKind::Dual, 10.0),
            hop("Cascade", HopKind::Aroma, 5.5),
        ],
        yeasts: vec![
            yeast("US-05", YeastKind::Ale, 78.0),
            yeast("W-34/70", YeastKind::Lager, 80.0),
            yeast("WB-06", YeastKind::Wheat, 86.0),
        ],
    }
}

fn formula(seed: u64) -> FormulaGenerator {
    FormulaGenerator::with_seed(catalog(), BrewConfig::default(), seed)
}

// ═══════════════════════════════════════════════════════════════════
//  Formula generator
// ═══════════════════════════════════════════════════════════════════

#[test]
fn same_seed_same_recipe() {
    let a = formula(7).generate(&pale_ale(), 20.0, None).unwrap();
    let b = formula(7).generate(&pale_ale(), 20.0, None).unwrap();
    assert_eq!(a, b);
}

#[test]
fn seed_from_config() {
    let config = BrewConfig { seed: Some(11), ..BrewConfig::default() };
    let a = FormulaGenerator::new(catalog(), config.clone()).generate(&pale_ale(), 20.0, None).unwrap();
    let b = FormulaGenerator::new(catalog(), config).generate(&pale_ale(), 20.0, None).unwrap();
    assert_eq!(a.recipe, b.recipe);
}

#[test]
fn pale_ale_hits_its_gravity() {
    let generated = formula(1).generate(&pale_ale(), 20.0, None).unwrap();
    assert_eq!(generated.source, GenerationSource::Formula);

    // 80 % base + 15 % crystal of the mid-range points
    let expected_og = 1.0 + 0.95 * 0.0525;
    let og = generated.expected.original_gravity;
    assert!((og - expected_og).abs() < 0.0005, "OG {og:.4}, expected ≈ {expected_og:.4}");
}

#[test]
fn pale_ale_hits_its_bitterness() {
    let generated = formula(1).generate(&pale_ale(), 20.0, None).unwrap();
    let ibu = generated.expected.ibu;
    assert!((ibu - 40.0).abs() < 4.0, "IBU {ibu:.1}, expected ≈ 40");
}

#[test]
fn pale_ale_bill_and_schedule() {
    let recipe = formula(3).generate(&pale_ale(), 20.0, None).unwrap().recipe;

    assert_eq!(recipe.grains.len(), 2);
    assert_eq!(recipe.grains[0].percentage, Some(80.0));
    assert_eq!(recipe.grains[1].name, "Crystal 60");
    assert_eq!(recipe.grains[1].percentage, Some(15.0));

    let times: Vec<u32> = recipe.hops.iter().map(|h| h.hop.boil_time_min).collect();
    assert_eq!(times, vec![60, 15, 5]);
    assert_eq!(recipe.hops[0].name, "Magnum");
    assert_eq!(recipe.hops[2].name, "Cascade");

    assert_eq!(recipe.yeasts.len(), 1);
    assert_eq!(recipe.yeasts[0].name, "US-05");
    assert_eq!(recipe.style.as_deref(), Some("American Pale Ale"));
    assert!(recipe.notes.contains("BIAB"));
}

#[test]
fn weights_are_whole_grams() {
    let recipe = formula(5).generate(&pale_ale(), 23.0, None).unwrap().recipe;
    for w in recipe.grains.iter().map(|g| g.grain.weight_kg).chain(recipe.hops.iter().map(|h| h.hop.weight_kg)) {
        let grams = w * 1000.0;
        assert!((grams - grams.round()).abs() < 1e-6, "{w} kg is not whole grams");
    }
}

#[test]
fn expected_matches_recipe_projection() {
    let generated = formula(9).generate(&pale_ale(), 20.0, None).unwrap();
    assert_eq!(generated.expected, generated.recipe.projection().unwrap());
}

#[test]
fn dark_style_gets_roasted_grain() {
    let stout = style("Dry Irish Stout", (1.036, 1.044), (25.0, 45.0), (25.0, 40.0));
    let recipe = formula(2).generate(&stout, 20.0, None).unwrap().recipe;

    let names: Vec<&str> = recipe.grains.iter().map(|g| g.name.as_str()).collect();
    assert!(names.contains(&"Roasted Barley"), "grains: {names:?}");
    assert!(names.contains(&"Crystal 60"), "grains: {names:?}");
    let total: f64 = recipe.grains.iter().filter_map(|g| g.percentage).sum();
    assert_relative_eq!(total, 100.0);
}

#[test]
fn pale_style_skips_specialty_grain() {
    let pils = style("German Pils", (1.044, 1.050), (22.0, 40.0), (2.0, 4.0));
    let recipe = formula(4).generate(&pils, 20.0, None).unwrap().recipe;
    assert_eq!(recipe.grains.len(), 1);
}

#[test]
fn yeast_follows_style_family() {
    let lager = style("Munich Helles Lager", (1.044, 1.048), (16.0, 22.0), (3.0, 5.0));
    let recipe = formula(6).generate(&lager, 20.0, None).unwrap().recipe;
    assert_eq!(recipe.yeasts[0].name, "W-34/70");

    let wheat = style("American Wheat Beer", (1.040, 1.055), (15.0, 30.0), (3.0, 6.0));
    let recipe = formula(6).generate(&wheat, 20.0, None).unwrap().recipe;
    assert!(["WB-06", "US-05"].contains(&recipe.yeasts[0].name.as_str()));
}

#[test]
fn empty_catalog_uses_generic_yeast() {
    let mut generator = FormulaGenerator::with_seed(IngredientCatalog::default(), BrewConfig::default(), 0);
    let recipe = generator.generate(&pale_ale(), 20.0, None).unwrap().recipe;
    assert!(recipe.grains.is_empty());
    assert!(recipe.hops.is_empty());
    assert_eq!(recipe.yeasts[0].name, "Generic Ale Yeast");
    assert_eq!(recipe.yeasts[0].yeast.attenuation_pct, 75.0);
}

#[test]
fn zero_batch_is_rejected() {
    let err = formula(0).generate(&pale_ale(), 0.0, None).unwrap_err();
    assert!(matches!(err, BrewError::InvalidTargets(_)), "got {err:?}");
}

// ═══════════════════════════════════════════════════════════════════
//  Completion-service generator
// ═══════════════════════════════════════════════════════════════════

struct Answer(&'static str);

impl CompletionService for Answer {
    fn complete(&self, _prompt: &str) -> brewcalc::Result<String> {
        Ok(self.0.to_string())
    }
}

struct Offline;

impl CompletionService for Offline {
    fn complete(&self, _prompt: &str) -> brewcalc::Result<String> {
        Err(BrewError::Generation("service unreachable".into()))
    }
}

#[derive(Default)]
struct Recording {
    prompt: RefCell<String>,
}

impl CompletionService for Recording {
    fn complete(&self, prompt: &str) -> brewcalc::Result<String> {
        *self.prompt.borrow_mut() = prompt.to_string();
        Err(BrewError::Generation("recording only".into()))
    }
}

const CITRA_PALE: &str = r#"Here is your recipe:
```json
{
  "recipe_name": "Citra Pale",
  "grain_bill": [
    {"grain_name": "pale ale malt", "weight_kg": 4.5, "percentage": 90.0},
    {"grain_name": "Crystal 60", "weight_kg": 0.5, "percentage": 10.0}
  ],
  "hop_schedule": [
    {"hop_name": "Magnum", "weight_kg": 0.015, "boil_time_minutes": 60, "use": "boil"},
    {"hop_name": "Citra", "weight_kg": 0.030, "boil_time_minutes": 0, "use": "dry_hop"}
  ],
  "yeast": {"yeast_name": "US-05", "amount": 1.0},
  "brewing_notes": "Keep it simple."
}
```"#;

#[test]
fn service_answer_becomes_recipe() {
    let mut generator = AiRecipeGenerator::new(Answer(CITRA_PALE), formula(0));
    let generated = generator.generate(&pale_ale(), 20.0, None).unwrap();
    assert_eq!(generated.source, GenerationSource::Ai);

    let recipe = &generated.recipe;
    assert_eq!(recipe.name, "Citra Pale");
    assert_eq!(recipe.grains[0].name, "Pale Ale Malt");
    assert_eq!(recipe.grains[0].grain.extract_potential_ppg, 37.0);
    assert_eq!(recipe.grains[1].percentage, Some(10.0));
    // Citra is not in the catalog
    assert_eq!(recipe.hops.len(), 1);
    assert_eq!(recipe.hops[0].hop.alpha_acid_pct, 12.0);
    assert_eq!(recipe.yeasts[0].yeast.attenuation_pct, 78.0);
    assert_eq!(recipe.notes, "Keep it simple.");
    assert_eq!(generated.expected, recipe.projection().unwrap());
}

#[test]
fn missing_notes_are_filled_in() {
    let answer = r#"{"recipe_name": "Plain", "grain_bill": [{"grain_name": "Pilsner Malt", "weight_kg": 4.0}]}"#;
    let mut generator = AiRecipeGenerator::new(Answer(answer), formula(0));
    let recipe = generator.generate(&pale_ale(), 20.0, None).unwrap().recipe;
    assert!(recipe.notes.contains("Mash at 67 °C"));
    assert!(recipe.yeasts.is_empty());
}

#[test]
fn unreachable_service_falls_back() {
    let mut generator = AiRecipeGenerator::new(Offline, formula(0));
    let generated = generator.generate(&pale_ale(), 20.0, None).unwrap();
    assert_eq!(generated.source, GenerationSource::Formula);
}

#[test]
fn unparsable_answer_falls_back() {
    let mut generator = AiRecipeGenerator::new(Answer("Sorry, I can't help with that."), formula(0));
    let generated = generator.generate(&pale_ale(), 20.0, None).unwrap();
    assert_eq!(generated.source, GenerationSource::Formula);
}

#[test]
fn unknown_grains_fall_back() {
    let answer = r#"{"recipe_name": "Mystery", "grain_bill": [{"grain_name": "Unobtainium Malt", "weight_kg": 4.0}]}"#;
    let mut generator = AiRecipeGenerator::new(Answer(answer), formula(0));
    let generated = generator.generate(&pale_ale(), 20.0, None).unwrap();
    assert_eq!(generated.source, GenerationSource::Formula);
}

#[test]
fn invalid_targets_do_not_fall_back() {
    let mut generator = AiRecipeGenerator::new(Answer(CITRA_PALE), formula(0));
    let err = generator.generate(&pale_ale(), -5.0, None).unwrap_err();
    assert!(matches!(err, BrewError::InvalidTargets(_)), "got {err:?}");
}

#[test]
fn prompt_describes_style_and_catalog() {
    let service = Recording::default();
    let mut generator = AiRecipeGenerator::new(&service, formula(0));
    generator.generate(&pale_ale(), 20.0, Some("No crystal malt")).unwrap();

    let prompt = service.prompt.borrow();
    assert!(prompt.contains("20 L of American Pale Ale"), "{prompt}");
    assert!(prompt.contains("1.045-1.060"));
    assert!(prompt.contains("Cascade"));
    assert!(prompt.contains("W-34/70"));
    assert!(prompt.contains("No crystal malt"));
}
