use log::debug;

use crate::error::{LoanError, Result};
use crate::terms::{ensure_payment, LoanTerms};

/// Number of months a fixed `payment` takes to repay `principal`
///
/// Derived from the annuity formula solved for n:
/// `n = ln(E / (E - P·r)) / ln(1 + r)`
///
/// The result is generally fractional; schedule generation rounds it up.
/// Fails with `InsufficientPayment` when the payment does not exceed the first
/// month's interest, before the logarithm is attempted.
pub fn solve_tenure(principal: f64, annual_rate_percent: f64, payment: f64) -> Result<f64> {
    let terms = LoanTerms::new(principal, annual_rate_percent)?;
    ensure_payment(payment)?;

    let rate = terms.periodic_rate();
    let months = if rate > 0.0 {
        let first_interest = terms.first_period_interest();
        if payment <= first_interest {
            return Err(LoanError::InsufficientPayment { payment, first_interest });
        }
        (payment / (payment - first_interest)).ln() / (1.0 + rate).ln()
    } else {
        terms.principal / payment
    };

    if !months.is_finite() {
        return Err(LoanError::NumericFailure(format!(
            "tenure is not finite for payment {} at {}%",
            payment, annual_rate_percent
        )));
    }

    debug!("tenure: P={} rate={}% E={} -> {:.4} months", principal, annual_rate_percent, payment, months);
    Ok(months)
}
