//! Loan terms and annual-to-monthly rate conversion

use serde::{Deserialize, Serialize};

use crate::error::{LoanError, Result};

/// Repayment periods per year (monthly installments)
pub const PERIODS_PER_YEAR: u32 = 12;

/// Convert an annual percentage rate (8.5 = 8.5%) to the monthly rate
pub fn periodic_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / PERIODS_PER_YEAR as f64
}

/// Validated principal and annual rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Original loan amount
    pub principal: f64,
    /// Annual interest rate as a percentage
    pub annual_rate_percent: f64,
}

impl LoanTerms {
    /// Build terms, rejecting non-finite values, principal <= 0 and negative rates
    pub fn new(principal: f64, annual_rate_percent: f64) -> Result<Self> {
        ensure_finite("principal", principal)?;
        ensure_finite("annual_rate_percent", annual_rate_percent)?;
        if principal <= 0.0 {
            return Err(LoanError::invalid("principal", "must be greater than zero"));
        }
        if annual_rate_percent < 0.0 {
            return Err(LoanError::invalid("annual_rate_percent", "must not be negative"));
        }
        Ok(Self { principal, annual_rate_percent })
    }

    pub fn periodic_rate(&self) -> f64 {
        periodic_rate(self.annual_rate_percent)
    }

    /// Interest accrued in the first month on the full principal
    pub fn first_period_interest(&self) -> f64 {
        self.principal * self.periodic_rate()
    }
}

pub(crate) fn ensure_finite(field: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(LoanError::NumericFailure(format!("{} is not a finite number ({})", field, value)))
    }
}

/// Payment must be a finite, strictly positive amount
pub(crate) fn ensure_payment(payment: f64) -> Result<()> {
    ensure_finite("payment", payment)?;
    if payment <= 0.0 {
        return Err(LoanError::invalid("payment", "must be greater than zero"));
    }
    Ok(())
}
