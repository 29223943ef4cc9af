//! Pull grain and hop lines out of free-form recipe text.
//!
//! Recognised shapes:
//!
//! ```text
//! 4.5 kg Pale Ale Malt
//! 250g Crystal 60
//! 28g Cascade @ 60 min
//! 15 Saaz 5 min
//! 10 lbs Maris Otter
//! ```
//!
//! A line must start with its amount, so prose such as
//! "Mash at 67 C for 60 minutes" is not taken for an ingredient.

use std::sync::LazyLock;

use brew_converter::WeightUnit;
use regex::Regex;
use serde::Serialize;

use crate::error::*;

static GRAIN_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(\d+(?:\.\d+)?)\s*(kilograms?|kg|grams?|g|pounds?|lbs?|ounces?|oz)\s+(.+?)\s*$")
        .expect("valid grain regex")
});

static HOP_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(\d+(?:\.\d+)?)\s*g?\s+(.+?)\s+@?\s*(\d+)\s*min").expect("valid hop regex")
});

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedGrain {
    pub amount: f64,
    /// Unit symbol (`kg`, `g`, `lb` or `oz`); `lbs`, `pounds`, … are normalised.
    pub unit: String,
    pub ingredient: String,
}

impl ParsedGrain {
    pub fn weight_kg(&self) -> Result<f64> {
        Ok(brew_converter::weight(self.amount, &self.unit, "kg")?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedHop {
    /// Grams.
    pub amount: f64,
    pub ingredient: String,
    pub boil_time_min: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedRecipe {
    pub grains: Vec<ParsedGrain>,
    pub hops: Vec<ParsedHop>,
}

/// Parse recipe text line by line.
///
/// A line with a boil time is a hop addition; otherwise a line with a
/// weight unit is a grain.  Anything else is ignored.
pub fn parse_recipe_text(text: &str) -> ParsedRecipe {
    let mut parsed = ParsedRecipe::default();

    for line in text.lines() {
        if let Some(caps) = HOP_LINE.captures(line) {
            let (Ok(amount), Ok(time)) = (caps[1].parse::<f64>(), caps[3].parse::<u32>()) else {
                continue;
            };
            parsed.hops.push(ParsedHop {
                amount,
                ingredient: caps[2].trim().to_string(),
                boil_time_min: time,
            });
        } else if let Some(caps) = GRAIN_LINE.captures(line) {
            let (Ok(amount), Ok(unit)) = (caps[1].parse::<f64>(), caps[2].parse::<WeightUnit>()) else {
                continue;
            };
            parsed.grains.push(ParsedGrain {
                amount,
                unit: unit.symbol().to_string(),
                ingredient: caps[3].trim().to_string(),
            });
        }
    }

    parsed
}
