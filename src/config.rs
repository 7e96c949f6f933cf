//! Calculator configuration
//!
//! Every field has a serde default so a partial JSON file only overrides what it names.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{LoanError, Result};

/// Tunables for the schedule builder and input validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Remaining balance at or below this amount is snapped to zero
    /// Absorbs floating-point drift on the final payment
    #[serde(default = "default_balance_epsilon")]
    pub balance_epsilon: f64,

    /// Longest tenure accepted in installment mode, in years
    #[serde(default = "default_max_tenure_years")]
    pub max_tenure_years: u32,

    /// Longest schedule the builder will generate, in months
    #[serde(default = "default_max_schedule_months")]
    pub max_schedule_months: u32,
}

fn default_balance_epsilon() -> f64 { 0.01 }
fn default_max_tenure_years() -> u32 { 40 }
fn default_max_schedule_months() -> u32 { 12_000 }

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            balance_epsilon: 0.01,
            max_tenure_years: 40,
            max_schedule_months: 12_000,
        }
    }
}

impl CalculatorConfig {
    /// Parse from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file on disk
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            LoanError::invalid("config", format!("could not read {}: {}", path.display(), e))
        })?;
        Self::from_json(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.balance_epsilon.is_finite() || self.balance_epsilon < 0.0 {
            return Err(LoanError::invalid("balance_epsilon", "must be a non-negative number"));
        }
        if self.max_tenure_years == 0 {
            return Err(LoanError::invalid("max_tenure_years", "must be at least 1"));
        }
        if self.max_schedule_months == 0 {
            return Err(LoanError::invalid("max_schedule_months", "must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = CalculatorConfig::from_json(r#"{"max_tenure_years": 30}"#).unwrap();
        assert_eq!(config.max_tenure_years, 30);
        assert_eq!(config.balance_epsilon, 0.01);

        let empty = CalculatorConfig::from_json("{}").unwrap();
        assert_eq!(empty, CalculatorConfig::default());
    }

    #[test]
    fn test_rejects_negative_epsilon() {
        let result = CalculatorConfig::from_json(r#"{"balance_epsilon": -1.0}"#);
        assert!(matches!(result, Err(LoanError::InvalidInput { field: "balance_epsilon", .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = CalculatorConfig::from_json_file("/nonexistent/emi_config.json");
        assert!(matches!(result, Err(LoanError::InvalidInput { field: "config", .. })));
    }
}
