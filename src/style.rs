//! Beer style guidelines.

use serde::{Deserialize, Serialize};

use crate::projection::RecipeProjection;

/// Inclusive `[min, max]` range of a style statistic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleRange {
    pub min: f64,
    pub max: f64,
}

impl StyleRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// A style definition (BJCP-like).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeerStyle {
    pub name: String,
    pub code: String,
    pub og: StyleRange,
    pub fg: StyleRange,
    pub ibu: StyleRange,
    pub srm: StyleRange,
    pub abv: StyleRange,
}

/// Mid-range values a generated recipe aims for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleTargets {
    pub og: f64,
    pub ibu: f64,
    pub srm: f64,
}

/// Which projected statistics fall inside the style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleCheck {
    pub og: bool,
    pub fg: bool,
    pub ibu: bool,
    pub srm: bool,
    pub abv: bool,
}

impl StyleCheck {
    pub fn all(&self) -> bool {
        self.og && self.fg && self.ibu && self.srm && self.abv
    }
}

impl BeerStyle {
    pub fn targets(&self) -> StyleTargets {
        StyleTargets {
            og: self.og.midpoint(),
            ibu: self.ibu.midpoint(),
            srm: self.srm.midpoint(),
        }
    }

    pub fn check(&self, projection: &RecipeProjection) -> StyleCheck {
        StyleCheck {
            og: self.og.contains(projection.original_gravity),
            fg: self.fg.contains(projection.final_gravity),
            ibu: self.ibu.contains(projection.ibu),
            srm: self.srm.contains(projection.srm_color),
            abv: self.abv.contains(projection.abv_pct),
        }
    }

    pub fn is_lager(&self) -> bool {
        self.name.to_lowercase().contains("lager")
    }

    pub fn is_wheat(&self) -> bool {
        self.name.to_lowercase().contains("wheat")
    }
}
