use approx::assert_relative_eq;
use brewcalc::*;

fn twenty_liter_batch() -> Recipe {
    let mut recipe = Recipe::new("Pale Ale", RecipeTargets::new(20.0, 75.0));
    recipe.style = Some("American Pale Ale".into());
    recipe.grains.push(GrainAddition {
        name: "Pale Ale Malt".into(),
        grain: GrainContribution::new(5.0, 37.0, 3.0).unwrap(),
        percentage: Some(100.0),
    });
    recipe.hops.push(HopAddition {
        name: "Cascade".into(),
        hop: HopContribution::new(0.030, 5.5, 60, HopUse::Boil).unwrap(),
    });
    recipe.yeasts.push(YeastAddition {
        name: "US-05".into(),
        yeast: YeastContribution::new(78.0).unwrap(),
        amount: 1.0,
    });
    recipe
}

// ═══════════════════════════════════════════════════════════════════
//  Scale factor
// ═══════════════════════════════════════════════════════════════════

#[test]
fn doubling_a_batch() {
    let scaled = scale(&twenty_liter_batch(), 40.0, true).unwrap();

    assert_relative_eq!(scaled.scale_factor, 2.0);
    assert_relative_eq!(scaled.batch_size_liters, 40.0);
    assert_relative_eq!(scaled.grains[0].grain.weight_kg, 10.0, epsilon = 1e-12);
    assert_relative_eq!(scaled.hops[0].hop.weight_kg, 0.060, epsilon = 1e-12);
    assert_relative_eq!(scaled.yeasts[0].amount, 2.0_f64.sqrt(), epsilon = 1e-12);
}

#[test]
fn percentages_and_names_are_kept() {
    let scaled = scale(&twenty_liter_batch(), 33.0, true).unwrap();
    assert_eq!(scaled.grains[0].name, "Pale Ale Malt");
    assert_eq!(scaled.grains[0].percentage, Some(100.0));
    assert_eq!(scaled.hops[0].hop.boil_time_min, 60);
}

#[test]
fn hops_can_stay_fixed() {
    let scaled = scale(&twenty_liter_batch(), 40.0, false).unwrap();
    assert_relative_eq!(scaled.grains[0].grain.weight_kg, 10.0, epsilon = 1e-12);
    assert_relative_eq!(scaled.hops[0].hop.weight_kg, 0.030, epsilon = 1e-12);
}

#[test]
fn yeast_never_drops_below_one_packet() {
    let scaled = scale(&twenty_liter_batch(), 10.0, true).unwrap();
    assert_relative_eq!(scaled.grains[0].grain.weight_kg, 2.5, epsilon = 1e-12);
    assert_eq!(scaled.yeasts[0].amount, 1.0);
}

#[test]
fn same_size_is_identity() {
    let recipe = twenty_liter_batch();
    let scaled = scale(&recipe, 20.0, true).unwrap();
    assert_eq!(scaled.grains, recipe.grains);
    assert_eq!(scaled.hops, recipe.hops);
    assert_eq!(scaled.yeasts, recipe.yeasts);
}

// ═══════════════════════════════════════════════════════════════════
//  Errors
// ═══════════════════════════════════════════════════════════════════

#[test]
fn zero_new_batch_is_rejected() {
    let err = scale(&twenty_liter_batch(), 0.0, true).unwrap_err();
    assert!(matches!(err, BrewError::InvalidScale(_)), "got {err:?}");
}

#[test]
fn zero_original_batch_is_rejected() {
    let mut recipe = twenty_liter_batch();
    recipe.targets.batch_size_liters = 0.0;
    let err = scale(&recipe, 20.0, true).unwrap_err();
    assert!(matches!(err, BrewError::InvalidScale(_)), "got {err:?}");
}

// ═══════════════════════════════════════════════════════════════════
//  Scaled recipes
// ═══════════════════════════════════════════════════════════════════

#[test]
fn scaled_recipe_keeps_gravity_and_bitterness() {
    let original = twenty_liter_batch();
    let scaled = scale(&original, 40.0, true).unwrap().into_recipe(&original);

    assert_eq!(scaled.name, original.name);
    assert_eq!(scaled.style, original.style);
    assert_relative_eq!(scaled.targets.batch_size_liters, 40.0);
    assert_relative_eq!(scaled.targets.efficiency_pct, 75.0);

    let before = original.projection().unwrap();
    let after = scaled.projection().unwrap();
    assert_relative_eq!(after.original_gravity, before.original_gravity, epsilon = 1e-12);
    assert_relative_eq!(after.ibu, before.ibu, epsilon = 1e-9);
    // color is not normalised by volume
    assert!(after.srm_color > before.srm_color);
}
