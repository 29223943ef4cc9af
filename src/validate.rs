//! Range checks for values entered by a brewer.

use brew_converter::TempScale;

use crate::error::*;

pub const GRAVITY_RANGE: (f64, f64) = (0.990, 1.200);

/// Gravity readings must lie in 0.990–1.200.
pub fn validate_gravity(value: f64, field_name: &str) -> Result<f64> {
    let (min, max) = GRAVITY_RANGE;
    if !(min..=max).contains(&value) {
        return Err(BrewError::InvalidInput(format!(
            "{field_name} must be between {min:.3} and {max:.3}, got {value}"
        )));
    }
    Ok(value)
}

pub fn validate_percentage(value: f64, field_name: &str) -> Result<f64> {
    if !(0.0..=100.0).contains(&value) {
        return Err(BrewError::InvalidInput(format!(
            "{field_name} must be between 0 and 100, got {value}"
        )));
    }
    Ok(value)
}

/// Brewing temperatures: −10–110 °C, or 14–230 °F.
pub fn validate_temperature(value: f64, scale: TempScale) -> Result<f64> {
    let (min, max) = match scale {
        TempScale::Celsius => (-10.0, 110.0),
        TempScale::Fahrenheit => (14.0, 230.0),
    };
    if !(min..=max).contains(&value) {
        return Err(BrewError::InvalidInput(format!(
            "temperature must be between {min}°{scale} and {max}°{scale}, got {value}"
        )));
    }
    Ok(value)
}
