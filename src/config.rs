use std::env;
use std::str::FromStr;
use std::sync::Once;

use crate::error::*;
use crate::formulas::{require_finite, require_non_negative, require_positive, DEFAULT_BOIL_OFF_RATE, DEFAULT_MASH_RATIO};
use crate::ingredients::RecipeTargets;

/// Brewing defaults for a brewhouse.
///
/// Read from `BREWCALC_*` environment variables, with a `.env` file
/// loaded once beforehand:
///
/// | Variable                  | Default |
/// |---------------------------|---------|
/// | `BREWCALC_BATCH_SIZE_L`   | 20.0    |
/// | `BREWCALC_EFFICIENCY_PCT` | 75.0    |
/// | `BREWCALC_BOIL_OFF_RATE`  | 4.0     |
/// | `BREWCALC_MASH_RATIO`     | 3.0     |
/// | `BREWCALC_GRAIN_TEMP_C`   | 20.0    |
/// | `BREWCALC_MASH_TEMP_C`    | 67.0    |
/// | `BREWCALC_SEED`           | unset   |
#[derive(Debug, Clone, PartialEq)]
pub struct BrewConfig {
    pub batch_size_liters: f64,
    pub efficiency_pct: f64,
    /// % per hour
    pub boil_off_rate: f64,
    /// L of strike water per kg of grain
    pub mash_ratio: f64,
    pub grain_temp_c: f64,
    pub mash_temp_c: f64,
    /// Seed for recipe generation; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for BrewConfig {
    fn default() -> Self {
        Self {
            batch_size_liters: 20.0,
            efficiency_pct: 75.0,
            boil_off_rate: DEFAULT_BOIL_OFF_RATE,
            mash_ratio: DEFAULT_MASH_RATIO,
            grain_temp_c: 20.0,
            mash_temp_c: 67.0,
            seed: None,
        }
    }
}

impl BrewConfig {
    /// Load `.env`, then read the environment over the defaults.
    pub fn from_env() -> Result<Self> {
        Self::load_dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key → value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(v) = parse_var(&lookup, "BREWCALC_BATCH_SIZE_L")? { config.batch_size_liters = v; }
        if let Some(v) = parse_var(&lookup, "BREWCALC_EFFICIENCY_PCT")? { config.efficiency_pct = v; }
        if let Some(v) = parse_var(&lookup, "BREWCALC_BOIL_OFF_RATE")? { config.boil_off_rate = v; }
        if let Some(v) = parse_var(&lookup, "BREWCALC_MASH_RATIO")? { config.mash_ratio = v; }
        if let Some(v) = parse_var(&lookup, "BREWCALC_GRAIN_TEMP_C")? { config.grain_temp_c = v; }
        if let Some(v) = parse_var(&lookup, "BREWCALC_MASH_TEMP_C")? { config.mash_temp_c = v; }
        config.seed = parse_var(&lookup, "BREWCALC_SEED")?;

        config.validate()?;
        tracing::debug!(?config, "brewing configuration loaded");
        Ok(config)
    }

    /// Every field must be usable by the formulas; errors name the variable.
    pub fn validate(&self) -> Result<()> {
        type Check = fn(&str, f64) -> Result<f64>;
        let fields: [(&str, Check, f64); 6] = [
            ("BREWCALC_BATCH_SIZE_L", require_positive, self.batch_size_liters),
            ("BREWCALC_EFFICIENCY_PCT", require_positive, self.efficiency_pct),
            ("BREWCALC_BOIL_OFF_RATE", require_non_negative, self.boil_off_rate),
            ("BREWCALC_MASH_RATIO", require_positive, self.mash_ratio),
            ("BREWCALC_GRAIN_TEMP_C", require_finite, self.grain_temp_c),
            ("BREWCALC_MASH_TEMP_C", require_finite, self.mash_temp_c),
        ];
        for (key, check, value) in fields {
            check(key, value).map_err(config_err)?;
        }
        if self.efficiency_pct > 100.0 {
            return Err(BrewError::InvalidConfig(format!(
                "BREWCALC_EFFICIENCY_PCT must be <= 100, got {}", self.efficiency_pct
            )));
        }
        if self.boil_off_rate >= 100.0 {
            return Err(BrewError::InvalidConfig(format!(
                "BREWCALC_BOIL_OFF_RATE must be < 100 %/h, got {}", self.boil_off_rate
            )));
        }
        Ok(())
    }

    pub fn targets(&self) -> RecipeTargets {
        RecipeTargets::new(self.batch_size_liters, self.efficiency_pct)
    }

    // ── .env loading (once) ──────────────────────────────────────────

    fn load_dotenv() {
        static DOTENV_INIT: Once = Once::new();
        DOTENV_INIT.call_once(|| {
            if let Ok(path) = dotenvy::dotenv() {
                tracing::debug!(path = %path.display(), "loaded .env");
                return;
            }
            if let Ok(dir) = env::var("CARGO_MANIFEST_DIR") {
                let p = std::path::PathBuf::from(dir).join(".env");
                if p.exists() { let _ = dotenvy::from_path(&p); return; }
            }
            if let Ok(exe) = env::current_exe() {
                if let Some(dir) = exe.parent() {
                    let p = dir.join(".env");
                    if p.exists() { let _ = dotenvy::from_path(&p); }
                }
            }
        });
    }
}

fn config_err(e: BrewError) -> BrewError {
    match e {
        BrewError::InvalidInput(msg) => BrewError::InvalidConfig(msg),
        other => other,
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| BrewError::InvalidConfig(format!("{key}={raw}: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_variables() {
        let config = BrewConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, BrewConfig::default());
    }

    #[test]
    fn overrides_are_parsed() {
        let config = BrewConfig::from_lookup(lookup(&[
            ("BREWCALC_BATCH_SIZE_L", "23"),
            ("BREWCALC_EFFICIENCY_PCT", " 68.5 "),
            ("BREWCALC_SEED", "42"),
        ]))
        .unwrap();
        assert_eq!(config.batch_size_liters, 23.0);
        assert_eq!(config.efficiency_pct, 68.5);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn bad_value_names_the_variable() {
        let err = BrewConfig::from_lookup(lookup(&[("BREWCALC_MASH_RATIO", "thick")])).unwrap_err();
        assert!(matches!(err, BrewError::InvalidConfig(_)));
        assert!(err.to_string().contains("BREWCALC_MASH_RATIO"));
    }

    #[test]
    fn nan_mash_ratio_is_rejected() {
        let err = BrewConfig::from_lookup(lookup(&[("BREWCALC_MASH_RATIO", "NaN")])).unwrap_err();
        assert!(matches!(err, BrewError::InvalidConfig(_)), "got {err:?}");
        assert!(err.to_string().contains("BREWCALC_MASH_RATIO"));
    }

    #[test]
    fn negative_boil_off_rate_is_rejected() {
        let err = BrewConfig::from_lookup(lookup(&[("BREWCALC_BOIL_OFF_RATE", "-4")])).unwrap_err();
        assert!(matches!(err, BrewError::InvalidConfig(_)), "got {err:?}");
        assert!(err.to_string().contains("BREWCALC_BOIL_OFF_RATE"));
    }

    #[test]
    fn every_temperature_must_be_finite() {
        for key in ["BREWCALC_GRAIN_TEMP_C", "BREWCALC_MASH_TEMP_C"] {
            let err = BrewConfig::from_lookup(lookup(&[(key, "inf")])).unwrap_err();
            assert!(matches!(err, BrewError::InvalidConfig(_)), "{key}: got {err:?}");
            assert!(err.to_string().contains(key));
        }
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let err = BrewConfig::from_lookup(lookup(&[("BREWCALC_BATCH_SIZE_L", "0")])).unwrap_err();
        assert!(matches!(err, BrewError::InvalidConfig(_)), "got {err:?}");
    }

    #[test]
    fn out_of_range_efficiency_is_rejected() {
        let err = BrewConfig::from_lookup(lookup(&[("BREWCALC_EFFICIENCY_PCT", "120")])).unwrap_err();
        assert!(matches!(err, BrewError::InvalidConfig(_)));
    }
}
