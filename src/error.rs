use brew_converter::UnknownUnitError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BrewError {
    /// A numeric argument violates a domain constraint (non-positive
    /// weight, ratio or batch size, out-of-range percentage, …).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A gravity of exactly 1.000 where it would be a divisor.
    #[error("Invalid gravity {0:.3}: original gravity must differ from 1.000")]
    InvalidGravity(f64),

    /// Unrecognised unit symbol passed to a conversion.
    #[error(transparent)]
    UnknownUnit(#[from] UnknownUnitError),

    /// Recipe aggregation invoked with unusable batch targets.
    #[error("Invalid recipe targets: {0}")]
    InvalidTargets(String),

    /// Scaling invoked with a non-positive batch size.
    #[error("Invalid scale: {0}")]
    InvalidScale(String),

    /// An environment variable could not be parsed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Recipe generation could not produce a recipe.
    #[error("Recipe generation failed: {0}")]
    Generation(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML error: {0}")]
    Xml(String),
}

pub type Result<T> = std::result::Result<T, BrewError>;
