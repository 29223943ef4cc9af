//! Ingredient stock, prices and expiry.
//!
//! Stock is held in the unit it was bought in (kg, g, lb, oz or
//! packets).  Recipe quantities are in kg, so using an ingredient
//! converts kg into the stock unit first:
//!
//! | Stock unit | Per kg   |
//! |------------|----------|
//! | kg, unit   | 1        |
//! | g          | 1000     |
//! | lb         | 2.20462  |
//! | oz         | 35.274   |

use std::collections::BTreeMap;

use brew_converter::{convert_weight, WeightUnit};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::*;
use crate::formulas::{require_finite, require_non_negative};
use crate::ingredients::{GrainAddition, HopAddition, Recipe, YeastAddition};

// ── Kinds ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngredientKind {
    Grain,
    Hop,
    Yeast,
    Other,
}

impl IngredientKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Grain => "Grain/Malt",
            Self::Hop   => "Hop",
            Self::Yeast => "Yeast",
            Self::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Purchase,
    Use,
    Waste,
    Adjustment,
}

/// One recorded stock change.  `quantity` is the absolute change in
/// the item's stock unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryTransaction {
    pub kind: TransactionKind,
    pub quantity: f64,
    #[serde(with = "unit_symbol")]
    pub unit: WeightUnit,
}

// ── Items ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub name: String,
    pub kind: IngredientKind,
    /// Quantity on hand, in `unit`.
    pub current_stock: f64,
    #[serde(with = "unit_symbol", default = "kilogram")]
    pub unit: WeightUnit,
    /// Price per stock unit.
    #[serde(default)]
    pub cost_per_unit: f64,
    #[serde(default)]
    pub cost_per_kg: f64,
    /// Stock level at or below which the item needs restocking.
    #[serde(default)]
    pub minimum_stock: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
}

impl InventoryItem {
    pub fn new(name: impl Into<String>, kind: IngredientKind, current_stock: f64, unit: WeightUnit) -> Self {
        Self {
            name: name.into(),
            kind,
            current_stock,
            unit,
            cost_per_unit: 0.0,
            cost_per_kg: 0.0,
            minimum_stock: 0.0,
            expiry_date: None,
        }
    }

    pub fn is_low_stock(&self) -> bool {
        self.current_stock <= self.minimum_stock
    }

    /// Expired when the expiry date lies strictly before `today`.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiry_date.is_some_and(|d| d < today)
    }

    /// Days left until expiry; negative once expired.
    pub fn days_until_expiry(&self, today: NaiveDate) -> Option<i64> {
        self.expiry_date.map(|d| (d - today).num_days())
    }

    /// Stock on hand in kg.  A packet counts as 1 kg.
    pub fn convert_to_kg(&self) -> f64 {
        convert_weight(self.current_stock, self.unit, WeightUnit::Kilogram)
    }

    /// Value of the stock on hand.
    pub fn stock_value(&self) -> f64 {
        self.current_stock * self.cost_per_unit
    }

    /// Take `quantity` (in `unit`) out of stock; the stock never goes
    /// below zero.  Returns the new stock level.
    pub fn update_stock(&mut self, quantity: f64, unit: WeightUnit) -> Result<f64> {
        let quantity = require_non_negative("quantity used", quantity)?;
        let used = if unit == self.unit {
            quantity
        } else {
            kg_to_stock_unit(convert_weight(quantity, unit, WeightUnit::Kilogram), self.unit)
        };
        self.current_stock = (self.current_stock - used).max(0.0);
        Ok(self.current_stock)
    }

    /// Apply a stock change given in the item's own unit.
    ///
    /// Purchases add, uses and waste subtract (floored at zero) and an
    /// adjustment sets the stock to `quantity`.
    pub fn apply(&mut self, kind: TransactionKind, quantity: f64) -> Result<InventoryTransaction> {
        let quantity = require_non_negative("quantity", quantity)?;
        let before = self.current_stock;
        self.current_stock = match kind {
            TransactionKind::Purchase => before + quantity,
            TransactionKind::Use | TransactionKind::Waste => (before - quantity).max(0.0),
            TransactionKind::Adjustment => quantity,
        };
        let change = match kind {
            TransactionKind::Adjustment => (quantity - before).abs(),
            _ => quantity,
        };
        Ok(InventoryTransaction { kind, quantity: change, unit: self.unit })
    }
}

fn kg_to_stock_unit(kg: f64, unit: WeightUnit) -> f64 {
    match unit {
        WeightUnit::Kilogram | WeightUnit::Unit => kg,
        WeightUnit::Gram  => kg * 1000.0,
        WeightUnit::Pound => kg * 2.20462,
        WeightUnit::Ounce => kg * 35.274,
    }
}

fn kilogram() -> WeightUnit {
    WeightUnit::Kilogram
}

/// `WeightUnit` as its symbol (`"kg"`, `"lb"`, …).
mod unit_symbol {
    use brew_converter::WeightUnit;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(unit: &WeightUnit, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(unit.symbol())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<WeightUnit, D::Error> {
        let raw = String::deserialize(d)?;
        raw.parse().map_err(de::Error::custom)
    }
}

// ── Inventory ───────────────────────────────────────────────────────

/// A brewer's stock of ingredients.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    #[serde(default)]
    pub items: Vec<InventoryItem>,
}

impl Inventory {
    pub fn new(items: Vec<InventoryItem>) -> Self {
        Self { items }
    }

    /// Look an item up by kind and case-insensitive name.
    pub fn find(&self, kind: IngredientKind, name: &str) -> Option<&InventoryItem> {
        let name = name.trim();
        self.items.iter().find(|i| i.kind == kind && i.name.eq_ignore_ascii_case(name))
    }

    pub fn find_mut(&mut self, kind: IngredientKind, name: &str) -> Option<&mut InventoryItem> {
        let name = name.trim();
        self.items.iter_mut().find(|i| i.kind == kind && i.name.eq_ignore_ascii_case(name))
    }

    /// Σ stock × price per unit.
    pub fn total_value(&self) -> f64 {
        self.items.iter().map(InventoryItem::stock_value).sum()
    }

    pub fn value_by_kind(&self) -> BTreeMap<IngredientKind, f64> {
        let mut values = BTreeMap::new();
        for item in &self.items {
            *values.entry(item.kind).or_insert(0.0) += item.stock_value();
        }
        values
    }

    pub fn low_stock(&self) -> impl Iterator<Item = &InventoryItem> {
        self.items.iter().filter(|i| i.is_low_stock())
    }

    pub fn expired(&self, today: NaiveDate) -> impl Iterator<Item = &InventoryItem> {
        self.items.iter().filter(move |i| i.is_expired(today))
    }

    /// Items expiring within `days` of `today` that have not expired yet.
    pub fn expiring_within(&self, today: NaiveDate, days: i64) -> impl Iterator<Item = &InventoryItem> {
        self.items
            .iter()
            .filter(move |i| i.days_until_expiry(today).is_some_and(|left| (0..=days).contains(&left)))
    }
}

// ── Recipe cost ─────────────────────────────────────────────────────
//
// Ingredients missing from the inventory cost nothing.

impl GrainAddition {
    /// Weight × the inventory's price per kg.
    pub fn cost(&self, inventory: &Inventory) -> f64 {
        inventory
            .find(IngredientKind::Grain, &self.name)
            .map_or(0.0, |item| self.grain.weight_kg * item.cost_per_kg)
    }
}

impl HopAddition {
    pub fn cost(&self, inventory: &Inventory) -> f64 {
        inventory
            .find(IngredientKind::Hop, &self.name)
            .map_or(0.0, |item| self.hop.weight_kg * item.cost_per_kg)
    }
}

impl YeastAddition {
    /// Packets × the inventory's price per packet.
    pub fn cost(&self, inventory: &Inventory) -> f64 {
        inventory
            .find(IngredientKind::Yeast, &self.name)
            .map_or(0.0, |item| self.amount * item.cost_per_unit)
    }
}

impl Recipe {
    pub fn total_cost(&self, inventory: &Inventory) -> f64 {
        let grains: f64 = self.grains.iter().map(|a| a.cost(inventory)).sum();
        let hops: f64 = self.hops.iter().map(|a| a.cost(inventory)).sum();
        let yeasts: f64 = self.yeasts.iter().map(|a| a.cost(inventory)).sum();
        grains + hops + yeasts
    }

    /// Total cost over the batch size; `None` for an empty batch.
    pub fn cost_per_liter(&self, inventory: &Inventory) -> Option<f64> {
        let batch = self.targets.batch_size_liters;
        (batch > 0.0).then(|| self.total_cost(inventory) / batch)
    }
}

// ── Shopping list ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub name: String,
    pub kind: IngredientKind,
    pub quantity_needed: f64,
    #[serde(with = "unit_symbol", default = "kilogram")]
    pub unit: WeightUnit,
    /// Price per `unit`; unpriced items cost nothing.
    #[serde(default)]
    pub estimated_price: Option<f64>,
}

impl ShoppingItem {
    pub fn estimated_cost(&self) -> f64 {
        self.estimated_price.map_or(0.0, |p| p * self.quantity_needed)
    }
}

pub fn shopping_list_cost(items: &[ShoppingItem]) -> Result<f64> {
    let mut total = 0.0;
    for item in items {
        total += require_finite("estimated cost", item.estimated_cost())?;
    }
    Ok(total)
}
