use brewcalc::beerxml::export_beerxml;
use brewcalc::*;

fn recipe() -> Recipe {
    let mut recipe = Recipe::new("Bitter & Twisted", RecipeTargets::new(20.0, 72.0));
    recipe.style = Some("Best Bitter".into());
    recipe.grains.push(GrainAddition {
        name: "Maris Otter".into(),
        grain: GrainContribution::new(4.5, 37.0, 3.0).unwrap(),
        percentage: Some(90.0),
    });
    recipe.grains.push(GrainAddition {
        name: "Crystal 60".into(),
        grain: GrainContribution::new(0.5, 34.0, 60.0).unwrap(),
        percentage: Some(10.0),
    });
    recipe.hops.push(HopAddition {
        name: "East Kent Goldings".into(),
        hop: HopContribution::new(0.035, 5.0, 60, HopUse::Boil).unwrap(),
    });
    recipe.hops.push(HopAddition {
        name: "Fuggle".into(),
        hop: HopContribution::new(0.02, 4.5, 0, HopUse::DryHop).unwrap(),
    });
    recipe.yeasts.push(YeastAddition {
        name: "S-04".into(),
        yeast: YeastContribution::new(75.0).unwrap(),
        amount: 1.0,
    });
    recipe.notes = "Mash at 66 °C".into();
    recipe
}

#[test]
fn document_structure() {
    let xml = export_beerxml(&recipe(), "Sam").unwrap();

    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains("<RECIPES>"));
    assert!(xml.trim_end().ends_with("</RECIPES>"));
    assert_eq!(xml.matches("<FERMENTABLE>").count(), 2);
    assert_eq!(xml.matches("<HOP>").count(), 2);
    assert_eq!(xml.matches("<YEAST>").count(), 1);
}

#[test]
fn recipe_fields() {
    let xml = export_beerxml(&recipe(), "Sam").unwrap();

    assert!(xml.contains("<BREWER>Sam</BREWER>"));
    assert!(xml.contains("<BATCH_SIZE>20</BATCH_SIZE>"));
    assert!(xml.contains("<EFFICIENCY>72</EFFICIENCY>"));
    assert!(xml.contains("<BOIL_TIME>60</BOIL_TIME>"));
    assert!(xml.contains("<NAME>Best Bitter</NAME>"));
    assert!(xml.contains("<NOTES>Mash at 66 °C</NOTES>"));
}

#[test]
fn ingredient_fields() {
    let xml = export_beerxml(&recipe(), "Sam").unwrap();

    assert!(xml.contains("<NAME>Maris Otter</NAME>"));
    assert!(xml.contains("<AMOUNT>4.5</AMOUNT>"));
    assert!(xml.contains("<COLOR>60</COLOR>"));
    assert!(xml.contains("<ALPHA>5</ALPHA>"));
    assert!(xml.contains("<USE>Boil</USE>"));
    assert!(xml.contains("<USE>Dry Hop</USE>"));
    assert!(xml.contains("<ATTENUATION>75</ATTENUATION>"));
    assert!(xml.contains("<TYPE>Ale</TYPE>"));
}

#[test]
fn text_is_escaped() {
    let xml = export_beerxml(&recipe(), "Sam").unwrap();
    assert!(xml.contains("<NAME>Bitter &amp; Twisted</NAME>"));
    assert!(!xml.contains("Bitter & Twisted"));
}

#[test]
fn unnamed_style_is_custom() {
    let mut r = recipe();
    r.style = None;
    let xml = export_beerxml(&r, "Sam").unwrap();
    assert!(xml.contains("<NAME>Custom</NAME>"));
}

#[test]
fn empty_recipe_exports() {
    let r = Recipe::new("Water", RecipeTargets::default());
    let xml = export_beerxml(&r, "Sam").unwrap();
    assert_eq!(xml.matches("<FERMENTABLE>").count(), 0);
    assert!(xml.contains("<FERMENTABLES>"));
}
