//! BeerXML 1.0 export.

use std::io::Cursor;

use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use crate::error::*;
use crate::ingredients::Recipe;

type XmlWriter = Writer<Cursor<Vec<u8>>>;

/// Boil volume written for a recipe, relative to the batch size.
const BOIL_SIZE_FACTOR: f64 = 1.2;
const BOIL_TIME_MIN: u32 = 60;

/// Render `recipe` as a BeerXML document.
///
/// Weights are written in kg and volumes in L, as BeerXML expects.
pub fn export_beerxml(recipe: &Recipe, brewer: &str) -> Result<String> {
    let mut w = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_err)?;

    write_start(&mut w, "RECIPES")?;
    write_start(&mut w, "RECIPE")?;

    write_text_elem(&mut w, "NAME", &recipe.name)?;
    write_text_elem(&mut w, "VERSION", "1")?;
    write_text_elem(&mut w, "TYPE", "All Grain")?;

    write_start(&mut w, "STYLE")?;
    write_text_elem(&mut w, "NAME", recipe.style.as_deref().unwrap_or("Custom"))?;
    write_text_elem(&mut w, "VERSION", "1")?;
    write_text_elem(&mut w, "CATEGORY", "Custom")?;
    write_text_elem(&mut w, "CATEGORY_NUMBER", "1")?;
    write_text_elem(&mut w, "STYLE_LETTER", "A")?;
    write_text_elem(&mut w, "STYLE_GUIDE", "Custom")?;
    write_end(&mut w, "STYLE")?;

    let batch = recipe.targets.batch_size_liters;
    write_text_elem(&mut w, "BREWER", brewer)?;
    write_text_elem(&mut w, "BATCH_SIZE", &batch.to_string())?;
    write_text_elem(&mut w, "BOIL_SIZE", &(batch * BOIL_SIZE_FACTOR).to_string())?;
    write_text_elem(&mut w, "BOIL_TIME", &BOIL_TIME_MIN.to_string())?;
    write_text_elem(&mut w, "EFFICIENCY", &recipe.targets.efficiency_pct.to_string())?;

    write_start(&mut w, "FERMENTABLES")?;
    for addition in &recipe.grains {
        write_start(&mut w, "FERMENTABLE")?;
        write_text_elem(&mut w, "NAME", &addition.name)?;
        write_text_elem(&mut w, "VERSION", "1")?;
        write_text_elem(&mut w, "TYPE", "Grain")?;
        write_text_elem(&mut w, "AMOUNT", &addition.grain.weight_kg.to_string())?;
        write_text_elem(&mut w, "YIELD", &addition.grain.extract_potential_ppg.to_string())?;
        write_text_elem(&mut w, "COLOR", &addition.grain.color_srm.to_string())?;
        write_end(&mut w, "FERMENTABLE")?;
    }
    write_end(&mut w, "FERMENTABLES")?;

    write_start(&mut w, "HOPS")?;
    for addition in &recipe.hops {
        write_start(&mut w, "HOP")?;
        write_text_elem(&mut w, "NAME", &addition.name)?;
        write_text_elem(&mut w, "VERSION", "1")?;
        write_text_elem(&mut w, "ALPHA", &addition.hop.alpha_acid_pct.to_string())?;
        write_text_elem(&mut w, "AMOUNT", &addition.hop.weight_kg.to_string())?;
        write_text_elem(&mut w, "USE", addition.hop.use_.label())?;
        write_text_elem(&mut w, "TIME", &addition.hop.boil_time_min.to_string())?;
        write_end(&mut w, "HOP")?;
    }
    write_end(&mut w, "HOPS")?;

    write_start(&mut w, "YEASTS")?;
    for addition in &recipe.yeasts {
        write_start(&mut w, "YEAST")?;
        write_text_elem(&mut w, "NAME", &addition.name)?;
        write_text_elem(&mut w, "VERSION", "1")?;
        write_text_elem(&mut w, "TYPE", "Ale")?;
        write_text_elem(&mut w, "FORM", "Liquid")?;
        write_text_elem(&mut w, "AMOUNT", &addition.amount.to_string())?;
        write_text_elem(&mut w, "ATTENUATION", &addition.yeast.attenuation_pct.to_string())?;
        write_end(&mut w, "YEAST")?;
    }
    write_end(&mut w, "YEASTS")?;

    write_text_elem(&mut w, "NOTES", &recipe.notes)?;

    write_end(&mut w, "RECIPE")?;
    write_end(&mut w, "RECIPES")?;

    let bytes = w.into_inner().into_inner();
    tracing::debug!(recipe = %recipe.name, bytes = bytes.len(), "exported BeerXML");
    String::from_utf8(bytes).map_err(xml_err)
}

fn xml_err(e: impl std::fmt::Display) -> BrewError {
    BrewError::Xml(e.to_string())
}

fn write_start(w: &mut XmlWriter, tag: &str) -> Result<()> {
    w.write_event(Event::Start(BytesStart::new(tag))).map_err(xml_err)
}

fn write_end(w: &mut XmlWriter, tag: &str) -> Result<()> {
    w.write_event(Event::End(BytesEnd::new(tag))).map_err(xml_err)
}

fn write_text_elem(w: &mut XmlWriter, tag: &str, text: &str) -> Result<()> {
    write_start(w, tag)?;
    w.write_event(Event::Text(BytesText::new(text))).map_err(xml_err)?;
    write_end(w, tag)
}
