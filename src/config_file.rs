//! Calculator configuration file
//!
//! Tax rates, defaults for new rows and the display language. Only settings
//! live here; income rows are never written to disk.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::calculations::{FREELANCER_TAX_RATE, PERMANENT_TAX_RATE, TaxRates};
use crate::form::RowDefaults;
use crate::income::{DEFAULT_DAYS_PER_YEAR, DEFAULT_HOURS_PER_DAY, DEFAULT_YEAR};
use crate::types::Language;
use crate::validation::{MAX_YEAR, MIN_YEAR};

/// Settings that can be saved/loaded as JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Rate applied to salaried income (0.0 - 1.0)
    pub permanent_tax_rate: f64,
    /// Rate applied to freelance income (0.0 - 1.0)
    pub freelancer_tax_rate: f64,
    /// Year pre-filled in new rows
    pub default_year: i32,
    pub freelance_hours_per_day: f64,
    pub freelance_days_per_year: f64,
    pub language: Language,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            permanent_tax_rate: PERMANENT_TAX_RATE,
            freelancer_tax_rate: FREELANCER_TAX_RATE,
            default_year: DEFAULT_YEAR,
            freelance_hours_per_day: DEFAULT_HOURS_PER_DAY,
            freelance_days_per_year: DEFAULT_DAYS_PER_YEAR,
            language: Language::default(),
        }
    }
}

impl CalculatorConfig {
    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        for (name, rate) in [
            ("permanent_tax_rate", self.permanent_tax_rate),
            ("freelancer_tax_rate", self.freelancer_tax_rate),
        ] {
            if !rate.is_finite() || !(0.0..=1.0).contains(&rate) {
                anyhow::bail!("{} must be between 0 and 1, got {}", name, rate);
            }
        }

        let year = f64::from(self.default_year);
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            anyhow::bail!(
                "default_year must be between {} and {}, got {}",
                MIN_YEAR,
                MAX_YEAR,
                self.default_year
            );
        }

        if !(1.0..=24.0).contains(&self.freelance_hours_per_day) {
            anyhow::bail!(
                "freelance_hours_per_day must be between 1 and 24, got {}",
                self.freelance_hours_per_day
            );
        }

        if !(1.0..=365.0).contains(&self.freelance_days_per_year) {
            anyhow::bail!(
                "freelance_days_per_year must be between 1 and 365, got {}",
                self.freelance_days_per_year
            );
        }

        Ok(())
    }

    pub fn tax_rates(&self) -> TaxRates {
        TaxRates {
            permanent: self.permanent_tax_rate,
            freelancer: self.freelancer_tax_rate,
        }
    }

    pub fn row_defaults(&self) -> RowDefaults {
        RowDefaults {
            year: self.default_year,
            hours_per_day: self.freelance_hours_per_day,
            days_per_year: self.freelance_days_per_year,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        let config = CalculatorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_year, 2020);
        assert_eq!(config.tax_rates(), TaxRates::default());
    }

    #[test]
    fn test_save_and_load() {
        let file = NamedTempFile::new().unwrap();
        let config = CalculatorConfig {
            permanent_tax_rate: 0.25,
            language: Language::Fr,
            ..CalculatorConfig::default()
        };

        config.save_to_file(file.path()).unwrap();
        let loaded = CalculatorConfig::load_from_file(file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: CalculatorConfig =
            serde_json::from_str(r#"{"freelancer_tax_rate": 0.3}"#).unwrap();
        assert_eq!(config.freelancer_tax_rate, 0.3);
        assert_eq!(config.permanent_tax_rate, PERMANENT_TAX_RATE);
        assert_eq!(config.freelance_days_per_year, 220.0);
    }

    #[test]
    fn test_invalid_rate_rejected() {
        let config = CalculatorConfig {
            permanent_tax_rate: 1.5,
            ..CalculatorConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("permanent_tax_rate"));
    }

    #[test]
    fn test_invalid_year_rejected() {
        let config = CalculatorConfig {
            default_year: 1800,
            ..CalculatorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_freelance_defaults_rejected() {
        let config = CalculatorConfig {
            freelance_hours_per_day: 0.0,
            ..CalculatorConfig::default()
        };
        assert!(config.validate().is_err());

        let config = CalculatorConfig {
            freelance_days_per_year: 400.0,
            ..CalculatorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let result = CalculatorConfig::load_from_file("/nonexistent/taxcalc.json");
        assert!(result.is_err());
    }
}
