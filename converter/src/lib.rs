//! Unit conversion for brewing quantities.
//!
//! The brewing formulas work in **kg, L and °C**.  This crate lets you
//! work in whatever units you prefer (lb, oz, gal, °F, …) and handles the
//! conversion transparently.
//!
//! # Presets
//!
//! | Preset       | Weight | Volume | Temperature |
//! |--------------|--------|--------|-------------|
//! | `metric()`   | kg     | L      | °C          |
//! | `imperial()` | lb     | gal    | °F          |
//!
//! # Builder
//!
//! ```
//! use brew_converter::{UnitSystem, WeightUnit, VolumeUnit};
//!
//! let units = UnitSystem::new()
//!     .weight(WeightUnit::Pound)
//!     .volume(VolumeUnit::Gallon);
//! ```
//!
//! # String-keyed conversion
//!
//! ```
//! let kg = brew_converter::weight(10.0, "lb", "kg")?;
//! assert!((kg - 4.53592).abs() < 1e-9);
//! # Ok::<(), brew_converter::UnknownUnitError>(())
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

// ────────────────────────────────────────────────────────────────────
//  Error
// ────────────────────────────────────────────────────────────────────

/// A unit symbol that is not in the supported set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnknownUnitError {
    #[error("Unknown weight unit: {0}")]
    Weight(String),

    #[error("Unknown volume unit: {0}")]
    Volume(String),

    #[error("Unknown temperature scale: {0}")]
    Temperature(String),
}

impl UnknownUnitError {
    /// The offending unit symbol, as given by the caller.
    pub fn unit(&self) -> &str {
        match self {
            Self::Weight(u) | Self::Volume(u) | Self::Temperature(u) => u,
        }
    }
}

// ────────────────────────────────────────────────────────────────────
//  Unit enums
// ────────────────────────────────────────────────────────────────────

/// Weight unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeightUnit {
    /// Kilogram (base unit)
    Kilogram,
    /// Gram
    Gram,
    /// Avoirdupois pound (0.453592 kg)
    Pound,
    /// Avoirdupois ounce (0.0283495 kg)
    Ounce,
    /// Generic unit, e.g. a yeast packet.  Counted as 1 kg.
    Unit,
}

/// Volume unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VolumeUnit {
    /// Liter (base unit)
    Liter,
    /// Milliliter
    Milliliter,
    /// US gallon (3.78541 L)
    Gallon,
    /// US quart (0.946353 L)
    Quart,
    /// US pint (0.473176 L)
    Pint,
    /// US fluid ounce (0.0295735 L)
    FluidOunce,
}

/// Temperature scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TempScale {
    /// Degrees Celsius (base unit)
    Celsius,
    /// Degrees Fahrenheit
    Fahrenheit,
}

impl WeightUnit {
    /// Kilograms per one of this unit.
    pub fn to_kg_factor(self) -> f64 {
        match self {
            Self::Kilogram => 1.0,
            Self::Gram     => 0.001,
            Self::Pound    => 0.453592,
            Self::Ounce    => 0.0283495,
            Self::Unit     => 1.0,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Kilogram => "kg",
            Self::Gram     => "g",
            Self::Pound    => "lb",
            Self::Ounce    => "oz",
            Self::Unit     => "unit",
        }
    }
}

impl VolumeUnit {
    /// Liters per one of this unit.
    pub fn to_liter_factor(self) -> f64 {
        match self {
            Self::Liter      => 1.0,
            Self::Milliliter => 0.001,
            Self::Gallon     => 3.78541,
            Self::Quart      => 0.946353,
            Self::Pint       => 0.473176,
            Self::FluidOunce => 0.0295735,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Liter      => "L",
            Self::Milliliter => "ml",
            Self::Gallon     => "gal",
            Self::Quart      => "qt",
            Self::Pint       => "pt",
            Self::FluidOunce => "fl_oz",
        }
    }
}

impl TempScale {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Celsius    => "C",
            Self::Fahrenheit => "F",
        }
    }
}

// ── Parsing ─────────────────────────────────────────────────────────

impl FromStr for WeightUnit {
    type Err = UnknownUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kg" | "kilogram" | "kilograms"        => Ok(Self::Kilogram),
            "g" | "gram" | "grams"                 => Ok(Self::Gram),
            "lb" | "lbs" | "pound" | "pounds"      => Ok(Self::Pound),
            "oz" | "ounce" | "ounces"              => Ok(Self::Ounce),
            "unit" | "units" | "pkg" | "packet"    => Ok(Self::Unit),
            _ => Err(UnknownUnitError::Weight(s.to_string())),
        }
    }
}

impl FromStr for VolumeUnit {
    type Err = UnknownUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "l" | "liter" | "liters" | "litre" | "litres" => Ok(Self::Liter),
            "ml" | "milliliter" | "milliliters"           => Ok(Self::Milliliter),
            "gal" | "gallon" | "gallons"                  => Ok(Self::Gallon),
            "qt" | "quart" | "quarts"                     => Ok(Self::Quart),
            "pt" | "pint" | "pints"                       => Ok(Self::Pint),
            "fl_oz" | "floz" | "fl oz" | "fluid_ounce"    => Ok(Self::FluidOunce),
            _ => Err(UnknownUnitError::Volume(s.to_string())),
        }
    }
}

impl FromStr for TempScale {
    type Err = UnknownUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "c" | "°c" | "celsius"    => Ok(Self::Celsius),
            "f" | "°f" | "fahrenheit" => Ok(Self::Fahrenheit),
            _ => Err(UnknownUnitError::Temperature(s.to_string())),
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.symbol()) }
}

impl fmt::Display for VolumeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.symbol()) }
}

impl fmt::Display for TempScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.symbol()) }
}

// ────────────────────────────────────────────────────────────────────
//  Typed conversion
// ────────────────────────────────────────────────────────────────────

/// Convert a weight between two units, going through kilograms.
pub fn convert_weight(value: f64, from: WeightUnit, to: WeightUnit) -> f64 {
    value * from.to_kg_factor() / to.to_kg_factor()
}

/// Convert a volume between two units, going through liters.
pub fn convert_volume(value: f64, from: VolumeUnit, to: VolumeUnit) -> f64 {
    value * from.to_liter_factor() / to.to_liter_factor()
}

/// Convert a temperature between Celsius and Fahrenheit.
pub fn convert_temperature(value: f64, from: TempScale, to: TempScale) -> f64 {
    match (from, to) {
        (TempScale::Celsius, TempScale::Fahrenheit) => value * 9.0 / 5.0 + 32.0,
        (TempScale::Fahrenheit, TempScale::Celsius) => (value - 32.0) * 5.0 / 9.0,
        _ => value,
    }
}

// ── String-keyed conversion ─────────────────────────────────────────

/// Convert a weight given unit symbols such as `"kg"`, `"lb"`, `"oz"`.
///
/// Both symbols are checked before anything is computed; the error
/// names the first unknown one.
pub fn weight(value: f64, from_unit: &str, to_unit: &str) -> Result<f64, UnknownUnitError> {
    let from: WeightUnit = from_unit.parse()?;
    let to: WeightUnit = to_unit.parse()?;
    Ok(convert_weight(value, from, to))
}

/// Convert a volume given unit symbols such as `"L"`, `"gal"`, `"fl_oz"`.
pub fn volume(value: f64, from_unit: &str, to_unit: &str) -> Result<f64, UnknownUnitError> {
    let from: VolumeUnit = from_unit.parse()?;
    let to: VolumeUnit = to_unit.parse()?;
    Ok(convert_volume(value, from, to))
}

/// Convert a temperature given scale symbols (`"C"` / `"F"`).
pub fn temperature(value: f64, from_scale: &str, to_scale: &str) -> Result<f64, UnknownUnitError> {
    let from: TempScale = from_scale.parse()?;
    let to: TempScale = to_scale.parse()?;
    Ok(convert_temperature(value, from, to))
}

// ────────────────────────────────────────────────────────────────────
//  UnitSystem: user preferences
// ────────────────────────────────────────────────────────────────────

/// Describes the set of units the user wants to work in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitSystem {
    pub weight:      WeightUnit,
    pub volume:      VolumeUnit,
    pub temperature: TempScale,
}

impl UnitSystem {
    /// Start from metric units.  Use the builder methods to change
    /// individual quantities.
    pub fn new() -> Self { Self::metric() }

    // ── Presets ──────────────────────────────────────────────────────

    /// kg, L, °C.
    pub fn metric() -> Self {
        Self {
            weight:      WeightUnit::Kilogram,
            volume:      VolumeUnit::Liter,
            temperature: TempScale::Celsius,
        }
    }

    /// lb, US gal, °F.
    pub fn imperial() -> Self {
        Self {
            weight:      WeightUnit::Pound,
            volume:      VolumeUnit::Gallon,
            temperature: TempScale::Fahrenheit,
        }
    }

    // ── Builder methods ─────────────────────────────────────────────

    pub fn weight(mut self, u: WeightUnit) -> Self { self.weight = u; self }
    pub fn volume(mut self, u: VolumeUnit) -> Self { self.volume = u; self }
    pub fn temperature(mut self, u: TempScale) -> Self { self.temperature = u; self }
}

impl Default for UnitSystem {
    fn default() -> Self { Self::metric() }
}

// ────────────────────────────────────────────────────────────────────
//  Converter: user units ↔ base units
// ────────────────────────────────────────────────────────────────────

/// Performs conversions between user units and the base units the
/// brewing formulas expect (kg, L, °C).
#[derive(Debug, Clone, Copy, Default)]
pub struct Converter {
    pub units: UnitSystem,
}

impl Converter {
    pub fn new(units: UnitSystem) -> Self {
        Self { units }
    }

    // ── Weight ──────────────────────────────────────────────────────

    /// User → kg
    pub fn weight_to_kg(&self, w: f64) -> f64 {
        convert_weight(w, self.units.weight, WeightUnit::Kilogram)
    }

    /// kg → User
    pub fn weight_from_kg(&self, w: f64) -> f64 {
        convert_weight(w, WeightUnit::Kilogram, self.units.weight)
    }

    // ── Volume ──────────────────────────────────────────────────────

    /// User → L
    pub fn volume_to_l(&self, v: f64) -> f64 {
        convert_volume(v, self.units.volume, VolumeUnit::Liter)
    }

    /// L → User
    pub fn volume_from_l(&self, v: f64) -> f64 {
        convert_volume(v, VolumeUnit::Liter, self.units.volume)
    }

    // ── Temperature ─────────────────────────────────────────────────

    /// User → °C
    pub fn temp_to_c(&self, t: f64) -> f64 {
        convert_temperature(t, self.units.temperature, TempScale::Celsius)
    }

    /// °C → User
    pub fn temp_from_c(&self, t: f64) -> f64 {
        convert_temperature(t, TempScale::Celsius, self.units.temperature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn pound_to_kilogram() {
        assert_abs_diff_eq!(convert_weight(1.0, WeightUnit::Pound, WeightUnit::Kilogram), 0.453592);
    }

    #[test]
    fn ounces_in_a_pound() {
        let oz = convert_weight(1.0, WeightUnit::Pound, WeightUnit::Ounce);
        assert_abs_diff_eq!(oz, 16.0, epsilon = 1e-3);
    }

    #[test]
    fn gallon_to_quarts() {
        let qt = convert_volume(1.0, VolumeUnit::Gallon, VolumeUnit::Quart);
        assert_abs_diff_eq!(qt, 4.0, epsilon = 1e-4);
    }

    #[test]
    fn boiling_point_in_fahrenheit() {
        assert_abs_diff_eq!(convert_temperature(100.0, TempScale::Celsius, TempScale::Fahrenheit), 212.0);
        assert_abs_diff_eq!(convert_temperature(212.0, TempScale::Fahrenheit, TempScale::Celsius), 100.0);
    }

    #[test]
    fn unit_is_one_kilogram() {
        assert_abs_diff_eq!(convert_weight(3.0, WeightUnit::Unit, WeightUnit::Kilogram), 3.0);
    }

    #[test]
    fn unknown_unit_is_named() {
        let err = weight(1.0, "kg", "stone").unwrap_err();
        assert_eq!(err.unit(), "stone");
        assert!(err.to_string().contains("stone"));

        let err = volume(1.0, "barrel", "L").unwrap_err();
        assert_eq!(err, UnknownUnitError::Volume("barrel".into()));

        let err = temperature(1.0, "K", "C").unwrap_err();
        assert_eq!(err.unit(), "K");
    }

    #[test]
    fn error_message_names_the_quantity() {
        assert_eq!(weight(1.0, "stone", "kg").unwrap_err().to_string(), "Unknown weight unit: stone");
        assert_eq!(volume(1.0, "barrel", "L").unwrap_err().to_string(), "Unknown volume unit: barrel");
        assert_eq!(temperature(1.0, "K", "C").unwrap_err().to_string(), "Unknown temperature scale: K");
    }

    #[test]
    fn symbols_are_case_insensitive() {
        assert_eq!("L".parse::<VolumeUnit>().unwrap(), VolumeUnit::Liter);
        assert_eq!("l".parse::<VolumeUnit>().unwrap(), VolumeUnit::Liter);
        assert_eq!("KG".parse::<WeightUnit>().unwrap(), WeightUnit::Kilogram);
        assert_eq!("Fahrenheit".parse::<TempScale>().unwrap(), TempScale::Fahrenheit);
    }

    #[test]
    fn imperial_converter_round_trip() {
        let conv = Converter::new(UnitSystem::imperial());
        let kg = conv.weight_to_kg(11.0);
        assert_abs_diff_eq!(conv.weight_from_kg(kg), 11.0, epsilon = 1e-12);
        assert_abs_diff_eq!(conv.volume_to_l(5.0), 18.92705, epsilon = 1e-9);
        assert_abs_diff_eq!(conv.temp_to_c(152.0), 66.666_666_666, epsilon = 1e-6);
    }
}
