//! brewcalc command-line calculator.
//!
//! Quick brewing calculations and recipe tools working on JSON recipe
//! files.  Defaults come from `BREWCALC_*` variables (or `.env`).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use brewcalc::generator::{
    CatalogGrain, CatalogHop, CatalogYeast, FormulaGenerator, GrainKind, HopKind, IngredientCatalog,
    RecipeGenerator, YeastKind,
};
use brewcalc::analytics::{self, BrewSession};
use brewcalc::{
    beerxml, fermentation, formulas, parse, units, validate, BeerStyle, BrewConfig, Converter, Inventory, Recipe,
    StyleRange, UnitSystem,
};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "brewcalc", version)]
#[command(about = "Brewing calculator: gravity, ABV, IBU, color, recipe projection and scaling")]
struct Cli {
    /// Units for quantities on the command line and in the output
    #[arg(short, long, value_enum, default_value_t = Units::Metric, global = true)]
    units: Units,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Units {
    Metric,
    Imperial,
}

impl From<Units> for UnitSystem {
    fn from(u: Units) -> Self {
        match u {
            Units::Metric => UnitSystem::metric(),
            Units::Imperial => UnitSystem::imperial(),
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Quantity {
    Weight,
    Volume,
    Temperature,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a quantity between units (e.g. `convert weight 10 lb kg`)
    Convert {
        #[arg(value_enum)]
        quantity: Quantity,
        value: f64,
        from: String,
        to: String,
    },

    /// Alcohol by volume from original and final gravity
    Abv { og: f64, fg: f64 },

    /// Apparent attenuation from original and final gravity
    Attenuation { og: f64, fg: f64 },

    /// Convert a specific gravity to degrees Plato
    Plato { sg: f64 },

    /// Strike water temperature for a BIAB mash
    Strike {
        /// Grain temperature (defaults to BREWCALC_GRAIN_TEMP_C)
        #[arg(long)]
        grain_temp: Option<f64>,

        /// Target mash temperature (defaults to BREWCALC_MASH_TEMP_C)
        #[arg(long)]
        mash_temp: Option<f64>,

        /// Water-to-grain ratio in L/kg (defaults to BREWCALC_MASH_RATIO)
        #[arg(long)]
        ratio: Option<f64>,
    },

    /// Mash, sparge and pre-boil water volumes
    Water {
        /// Grain weight in the selected weight unit
        grain: f64,

        /// Batch size in the selected volume unit (defaults to BREWCALC_BATCH_SIZE_L)
        #[arg(short, long)]
        batch: Option<f64>,

        /// Boil time in minutes
        #[arg(long, default_value_t = 60.0)]
        boil_time: f64,
    },

    /// IBU of a single hop addition (Tinseth)
    Ibu {
        /// Alpha acid in %
        alpha: f64,
        /// Hop weight in grams
        grams: f64,
        /// Boil time in minutes
        minutes: f64,
        /// Batch size in the selected volume unit
        batch: f64,
        /// Original gravity
        #[arg(default_value = "1.050")]
        og: f64,
    },

    /// Fermentation progress towards the target final gravity
    Progress {
        og: f64,
        current: f64,
        /// Target final gravity (defaults to OG − 0.010)
        #[arg(long)]
        target_fg: Option<f64>,
    },

    /// Project OG, FG, ABV, IBU and SRM of a JSON recipe
    Project { recipe: PathBuf },

    /// Scale a JSON recipe to a new batch size
    Scale {
        recipe: PathBuf,

        /// New batch size in the selected volume unit
        #[arg(short, long)]
        batch: f64,

        /// Keep hop weights unchanged
        #[arg(long)]
        keep_hops: bool,
    },

    /// Export a JSON recipe as BeerXML
    Export {
        recipe: PathBuf,

        #[arg(long, default_value = "brewcalc")]
        brewer: String,
    },

    /// Extract grain and hop lines from a text file
    Parse { file: PathBuf },

    /// Ingredient cost of a JSON recipe at inventory prices
    Cost { recipe: PathBuf, inventory: PathBuf },

    /// List low-stock and expired inventory items
    Stock { inventory: PathBuf },

    /// Brewing statistics over a JSON list of brew sessions
    Stats {
        sessions: PathBuf,

        /// Inventory used to price recipes
        #[arg(long)]
        inventory: Option<PathBuf>,

        /// Recipes to include in the cost figures
        #[arg(long = "recipe")]
        recipes: Vec<PathBuf>,
    },

    /// Generate a recipe for a style from brewing formulas
    Generate {
        /// Style definition (JSON); a sample American Pale Ale otherwise
        #[arg(long)]
        style: Option<PathBuf>,

        /// Ingredient catalog (JSON); a small sample catalog otherwise
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Batch size in the selected volume unit (defaults to BREWCALC_BATCH_SIZE_L)
        #[arg(short, long)]
        batch: Option<f64>,

        /// Seed for reproducible ingredient picks
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let conv = Converter::new(cli.units.into());
    let config = BrewConfig::from_env()?;

    match cli.command {
        Commands::Convert { quantity, value, from, to } => {
            let out = match quantity {
                Quantity::Weight => units::weight(value, &from, &to)?,
                Quantity::Volume => units::volume(value, &from, &to)?,
                Quantity::Temperature => units::temperature(value, &from, &to)?,
            };
            println!("{value} {from} = {out:.4} {to}");
        }

        Commands::Abv { og, fg } => {
            validate::validate_gravity(og, "original gravity")?;
            validate::validate_gravity(fg, "final gravity")?;
            println!("ABV = {:.2} %", formulas::abv(og, fg));
        }

        Commands::Attenuation { og, fg } => {
            validate::validate_gravity(og, "original gravity")?;
            validate::validate_gravity(fg, "final gravity")?;
            println!("Attenuation = {:.1} %", formulas::attenuation(og, fg)?);
        }

        Commands::Plato { sg } => {
            println!("{sg:.3} SG = {:.2} °P", formulas::sg_to_plato(sg));
        }

        Commands::Strike { grain_temp, mash_temp, ratio } => {
            let grain = grain_temp.map_or(config.grain_temp_c, |t| conv.temp_to_c(t));
            let mash = mash_temp.map_or(config.mash_temp_c, |t| conv.temp_to_c(t));
            let ratio = ratio.unwrap_or(config.mash_ratio);
            let strike = formulas::strike_water_temp(grain, mash, ratio)?;
            println!(
                "Strike water = {:.1} °{}",
                conv.temp_from_c(strike),
                conv.units.temperature
            );
        }

        Commands::Water { grain, batch, boil_time } => {
            let grain_kg = conv.weight_to_kg(grain);
            let batch = batch.map_or(config.batch_size_liters, |b| conv.volume_to_l(b));
            let mash = formulas::mash_water(grain_kg, config.mash_ratio)?;
            let sparge = formulas::sparge_water(batch, mash, formulas::GRAIN_ABSORPTION_L_PER_KG)?;
            let preboil = formulas::preboil_volume(batch, boil_time, config.boil_off_rate)?;
            let unit = conv.units.volume;
            println!("Mash water     = {:.1} {unit}", conv.volume_from_l(mash));
            println!("Sparge water   = {:.1} {unit}", conv.volume_from_l(sparge));
            println!("Absorbed       = {:.1} {unit}", conv.volume_from_l(formulas::grain_absorption(grain_kg)?));
            println!("Pre-boil       = {:.1} {unit}", conv.volume_from_l(preboil));
            println!("Boil-off       = {:.1} %", formulas::boil_off(boil_time, config.boil_off_rate)?);
        }

        Commands::Ibu { alpha, grams, minutes, batch, og } => {
            let ibu = formulas::ibu_tinseth(alpha, grams, minutes, conv.volume_to_l(batch), og)?;
            println!("IBU = {ibu:.1}");
        }

        Commands::Progress { og, current, target_fg } => {
            validate::validate_gravity(og, "original gravity")?;
            validate::validate_gravity(current, "current gravity")?;
            let target = target_fg.unwrap_or_else(|| fermentation::default_target_fg(og));
            let progress = fermentation::fermentation_progress(og, current, target)?;
            println!("Fermentation progress = {progress:.0} %");
        }

        Commands::Project { recipe } => {
            let recipe = read_recipe(&recipe)?;
            let projection = recipe.projection()?;
            println!("{}\n", recipe.name);
            println!("{projection}");
        }

        Commands::Scale { recipe, batch, keep_hops } => {
            let original = read_recipe(&recipe)?;
            let scaled = brewcalc::scale(&original, conv.volume_to_l(batch), !keep_hops)?;
            tracing::info!(factor = scaled.scale_factor, "scaled recipe");
            let scaled = scaled.into_recipe(&original);
            println!("{}", serde_json::to_string_pretty(&scaled)?);
        }

        Commands::Export { recipe, brewer } => {
            let recipe = read_recipe(&recipe)?;
            println!("{}", beerxml::export_beerxml(&recipe, &brewer)?);
        }

        Commands::Parse { file } => {
            let text = fs::read_to_string(&file).with_context(|| format!("reading {}", file.display()))?;
            let parsed = parse::parse_recipe_text(&text);
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }

        Commands::Cost { recipe, inventory } => {
            let recipe = read_recipe(&recipe)?;
            let inventory: Inventory = read_json(&inventory)?;
            println!("{}", recipe.name);
            for g in &recipe.grains {
                println!("  {:<24} {:>8.2}", g.name, g.cost(&inventory));
            }
            for h in &recipe.hops {
                println!("  {:<24} {:>8.2}", h.name, h.cost(&inventory));
            }
            for y in &recipe.yeasts {
                println!("  {:<24} {:>8.2}", y.name, y.cost(&inventory));
            }
            println!("Total          = {:.2}", recipe.total_cost(&inventory));
            if let Some(per_l) = recipe.cost_per_liter(&inventory) {
                println!("Per liter      = {per_l:.2}");
            }
        }

        Commands::Stock { inventory } => {
            let inventory: Inventory = read_json(&inventory)?;
            let today = chrono::Local::now().date_naive();
            for item in inventory.low_stock() {
                println!("low      {:<24} {} {}", item.name, item.current_stock, item.unit.symbol());
            }
            for item in inventory.expired(today) {
                println!("expired  {:<24} {}", item.name, item.expiry_date.map_or_else(String::new, |d| d.to_string()));
            }
            println!("Stock value    = {:.2}", inventory.total_value());
        }

        Commands::Stats { sessions, inventory, recipes } => {
            let sessions: Vec<BrewSession> = read_json(&sessions)?;
            let inventory: Inventory = match inventory {
                Some(path) => read_json(&path)?,
                None => Inventory::default(),
            };
            let recipes = recipes.iter().map(|p| read_recipe(p)).collect::<Result<Vec<_>>>()?;
            let report = serde_json::json!({
                "stats": analytics::brewing_stats(&sessions, &recipes, &inventory),
                "efficiency_by_style": analytics::efficiency_by_style(&sessions),
                "og_vs_target": analytics::og_vs_target(&sessions),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        Commands::Generate { style, catalog, batch, seed } => {
            let style: BeerStyle = match style {
                Some(path) => read_json(&path)?,
                None => sample_style(),
            };
            let catalog: IngredientCatalog = match catalog {
                Some(path) => read_json(&path)?,
                None => sample_catalog(),
            };
            let batch = batch.map_or(config.batch_size_liters, |b| conv.volume_to_l(b));
            let mut generator = match seed {
                Some(seed) => FormulaGenerator::with_seed(catalog, config, seed),
                None => FormulaGenerator::new(catalog, config),
            };
            let generated = generator.generate(&style, batch, None)?;
            println!("{}", serde_json::to_string_pretty(&generated.recipe)?);
            eprintln!("\n{}", generated.expected);
        }
    }

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

fn read_recipe(path: &Path) -> Result<Recipe> {
    read_json(path)
}

/// American Pale Ale, BJCP 18B.
fn sample_style() -> BeerStyle {
    BeerStyle {
        name: "American Pale Ale".to_string(),
        code: "18B".to_string(),
        og: StyleRange::new(1.045, 1.060),
        fg: StyleRange::new(1.010, 1.015),
        ibu: StyleRange::new(30.0, 50.0),
        srm: StyleRange::new(5.0, 10.0),
        abv: StyleRange::new(4.5, 6.2),
    }
}

fn sample_catalog() -> IngredientCatalog {
    let grain = |name: &str, kind, color_srm, extract_potential_ppg| CatalogGrain {
        name: name.to_string(),
        kind,
        color_srm,
        extract_potential_ppg,
    };
    let hop = |name: &str, kind, alpha_acid_pct| CatalogHop { name: name.to_string(), kind, alpha_acid_pct };
    let yeast = |name: &str, kind, attenuation_pct| CatalogYeast { name: name.to_string(), kind, attenuation_pct };

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
