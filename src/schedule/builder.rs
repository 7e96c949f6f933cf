//! Month-by-month amortization walk
//!
//! The builder never solves for the payment or the tenure itself: it takes both as
//! given and re-derives the interest/principal split each month from the opening balance.

use log::{debug, warn};

use super::{ScheduleResult, ScheduleRow};
use crate::config::CalculatorConfig;
use crate::error::{LoanError, Result};
use crate::terms::{ensure_finite, ensure_payment, LoanTerms};

/// Builds amortization schedules
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleBuilder {
    /// Balance at or below this is treated as fully repaid
    balance_epsilon: f64,
    /// Upper limit on generated rows
    max_months: u32,
}

impl Default for ScheduleBuilder {
    fn default() -> Self {
        Self::from_config(&CalculatorConfig::default())
    }
}

impl ScheduleBuilder {
    pub fn new(balance_epsilon: f64) -> Self {
        Self { balance_epsilon, ..Self::default() }
    }

    pub fn from_config(config: &CalculatorConfig) -> Self {
        Self {
            balance_epsilon: config.balance_epsilon,
            max_months: config.max_schedule_months,
        }
    }

    pub fn with_max_months(self, max_months: u32) -> Self {
        Self { max_months, ..self }
    }

    pub fn balance_epsilon(&self) -> f64 {
        self.balance_epsilon
    }

    /// Generate the schedule for a fixed `payment`
    ///
    /// # Arguments
    /// * `principal` - Opening balance
    /// * `annual_rate_percent` - Annual rate as a percentage
    /// * `payment` - Nominal monthly installment
    /// * `period_count` - Months to payoff, possibly fractional; rounded up to bound the loop
    ///
    /// # Returns
    /// Rows up to and including the month the balance reaches zero, plus total interest
    pub fn build(
        &self,
        principal: f64,
        annual_rate_percent: f64,
        payment: f64,
        period_count: f64,
    ) -> Result<ScheduleResult> {
        let terms = LoanTerms::new(principal, annual_rate_percent)?;
        ensure_payment(payment)?;
        ensure_finite("period_count", period_count)?;
        if period_count <= 0.0 {
            return Err(LoanError::invalid("period_count", "must be greater than zero"));
        }

        let rate = terms.periodic_rate();
        let upper_bound = period_count.ceil();
        if upper_bound > self.max_months as f64 {
            return Err(LoanError::NumericFailure(format!(
                "schedule of {} months exceeds the limit of {} months",
                upper_bound, self.max_months
            )));
        }
        let upper_bound = upper_bound as u32;

        let mut rows = Vec::with_capacity(upper_bound.min(1200) as usize);
        let mut balance = terms.principal;
        let mut total_interest = 0.0;

        for period_index in 1..=upper_bound {
            let interest_portion = balance * rate;
            let mut principal_portion = (payment - interest_portion).min(balance);

            // Payment below the month's interest; unreachable when the tenure came
            // from the tenure solver. Never let the balance grow.
            if principal_portion < 0.0 {
                principal_portion = payment;
            }

            balance -= principal_portion;

            if balance <= self.balance_epsilon {
                balance = 0.0;
            } else if period_index == upper_bound {
                warn!(
                    "schedule bound of {} months reached with {:.2} outstanding; settling in final month",
                    upper_bound, balance
                );
                principal_portion += balance;
                balance = 0.0;
            }

            rows.push(ScheduleRow {
                period_index,
                payment,
                principal_portion,
                interest_portion,
                remaining_balance: balance,
            });
            total_interest += interest_portion;

            if balance == 0.0 {
                break;
            }
        }

        debug!(
            "schedule: {} rows (bound {}), total interest {:.2}",
            rows.len(), upper_bound, total_interest
        );

        Ok(ScheduleResult { rows, total_interest })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{solve_installment, solve_tenure};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_installment_schedule_runs_full_tenure() {
        let emi = solve_installment(500_000.0, 8.5, 60).unwrap();
        let schedule = ScheduleBuilder::default().build(500_000.0, 8.5, emi, 60.0).unwrap();

        assert_eq!(schedule.period_count(), 60);
        assert_eq!(schedule.last().unwrap().remaining_balance, 0.0);
        assert_abs_diff_eq!(schedule.total_principal(), 500_000.0, epsilon = 0.01);
        // Interest = total paid - principal
        assert_abs_diff_eq!(schedule.total_interest, emi * 60.0 - 500_000.0, epsilon = 0.02);
    }

    #[test]
    fn test_first_row_split() {
        let schedule = ScheduleBuilder::default().build(10_000.0, 12.0, 1_000.0, 11.0).unwrap();
        let first = schedule.rows[0];

        assert_eq!(first.period_index, 1);
        assert_abs_diff_eq!(first.interest_portion, 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(first.principal_portion, 900.0, epsilon = 1e-9);
        assert_abs_diff_eq!(first.remaining_balance, 9_100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_fractional_tenure_ends_with_short_payment() {
        let months = solve_tenure(10_000.0, 10.0, 1_000.0).unwrap();
        assert!(months.fract() > 0.0);

        let schedule = ScheduleBuilder::default().build(10_000.0, 10.0, 1_000.0, months).unwrap();
        assert_eq!(schedule.period_count(), months.ceil() as usize);

        let last = schedule.last().unwrap();
        assert_eq!(last.remaining_balance, 0.0);
        assert!(last.amount_paid() < last.payment);

        // Every earlier row pays exactly the installment
        for row in &schedule.rows[..schedule.rows.len() - 1] {
            assert_abs_diff_eq!(row.amount_paid(), row.payment, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_stops_early_when_balance_clears() {
        // Bound of 24 months, but 1,000/month clears 10,000 well before that
        let schedule = ScheduleBuilder::default().build(10_000.0, 10.0, 1_000.0, 24.0).unwrap();
        assert!(schedule.period_count() < 12);
        assert_eq!(schedule.last().unwrap().remaining_balance, 0.0);
    }

    #[test]
    fn test_zero_rate_schedule() {
        let schedule = ScheduleBuilder::default().build(12_000.0, 0.0, 1_000.0, 12.0).unwrap();

        assert_eq!(schedule.period_count(), 12);
        assert_eq!(schedule.total_interest, 0.0);
        assert!(schedule.rows.iter().all(|r| r.principal_portion == 1_000.0));
        assert_eq!(schedule.last().unwrap().remaining_balance, 0.0);
    }

    #[test]
    fn test_payment_below_interest_is_clamped() {
        // 50/month against 83.33 of interest: principal portion clamps to the payment
        let schedule = ScheduleBuilder::default().build(10_000.0, 10.0, 50.0, 3.0).unwrap();

        assert_eq!(schedule.period_count(), 3);
        assert_eq!(schedule.rows[0].principal_portion, 50.0);
        assert_abs_diff_eq!(schedule.rows[0].remaining_balance, 9_950.0, epsilon = 1e-9);
        assert!(schedule.rows.iter().all(|r| r.principal_portion >= 0.0 && r.remaining_balance >= 0.0));
        // Bound reached: remainder settled in the final month
        assert_eq!(schedule.last().unwrap().remaining_balance, 0.0);
    }

    #[test]
    fn test_epsilon_snaps_residual() {
        // 1,000.005 repaid at 1,000/month leaves 0.005, below the default epsilon
        let schedule = ScheduleBuilder::default().build(1_000.005, 0.0, 1_000.0, 2.0).unwrap();
        assert_eq!(schedule.period_count(), 1);
        assert_eq!(schedule.rows[0].remaining_balance, 0.0);

        // With a zero epsilon the residual needs a second month
        let strict = ScheduleBuilder::new(0.0).build(1_000.005, 0.0, 1_000.0, 2.0).unwrap();
        assert_eq!(strict.period_count(), 2);
        assert_abs_diff_eq!(strict.rows[1].principal_portion, 0.005, epsilon = 1e-9);
    }

    #[test]
    fn test_default_matches_config() {
        let builder = ScheduleBuilder::default();
        assert_eq!(builder, ScheduleBuilder::from_config(&CalculatorConfig::default()));
        assert_eq!(builder.balance_epsilon(), CalculatorConfig::default().balance_epsilon);
    }

    #[test]
    fn test_rejects_schedule_beyond_month_limit() {
        // Interest-free 1e12 at 0.01/month would take 1e14 months
        let months = solve_tenure(1e12, 0.0, 0.01).unwrap();
        let result = ScheduleBuilder::default().build(1e12, 0.0, 0.01, months);
        assert!(matches!(result, Err(LoanError::NumericFailure(_))));

        let capped = ScheduleBuilder::default().with_max_months(12);
        assert!(capped.build(12_000.0, 0.0, 1_000.0, 12.0).is_ok());
        assert!(matches!(
            capped.build(12_000.0, 0.0, 1_000.0, 12.5),
            Err(LoanError::NumericFailure(_))
        ));
    }

    #[test]
    fn test_rejects_bad_period_count() {
        let builder = ScheduleBuilder::default();
        assert!(matches!(
            builder.build(1_000.0, 5.0, 100.0, 0.0),
            Err(LoanError::InvalidInput { field: "period_count", .. })
        ));
        assert!(matches!(builder.build(1_000.0, 5.0, 100.0, f64::NAN), Err(LoanError::NumericFailure(_))));
        assert!(matches!(
            builder.build(1_000.0, 5.0, 0.0, 12.0),
            Err(LoanError::InvalidInput { field: "payment", .. })
        ));
    }
}
