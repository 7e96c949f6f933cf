use log::debug;

use crate::error::{LoanError, Result};
use crate::terms::LoanTerms;

/// Fixed monthly installment that repays `principal` in `months` payments
///
/// # Arguments
/// * `principal` - Loan amount
/// * `annual_rate_percent` - Annual rate as a percentage (8.5 for 8.5%)
/// * `months` - Number of monthly payments; callers convert years to months
///
/// A zero rate falls back to straight-line division.
pub fn solve_installment(principal: f64, annual_rate_percent: f64, months: u32) -> Result<f64> {
    let terms = LoanTerms::new(principal, annual_rate_percent)?;
    if months == 0 {
        return Err(LoanError::invalid("tenure", "must be at least one month"));
    }
    // powi takes an i32 exponent
    if months > i32::MAX as u32 {
        return Err(LoanError::invalid("tenure", format!("must not exceed {} months", i32::MAX)));
    }

    let rate = terms.periodic_rate();
    let payment = if rate > 0.0 {
        let growth = (1.0 + rate).powi(months as i32);
        terms.principal * rate * growth / (growth - 1.0)
    } else {
        terms.principal / months as f64
    };

    if !payment.is_finite() || payment <= 0.0 {
        return Err(LoanError::NumericFailure(format!(
            "installment is not a positive amount for {} months at {}%",
            months, annual_rate_percent
        )));
    }

    debug!("installment: P={} rate={}% n={} -> {:.4}", principal, annual_rate_percent, months, payment);
    Ok(payment)
}
