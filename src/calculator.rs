//! Mode dispatch: solve for the installment or for the tenure, then build the schedule
//!
//! `Calculator::calculate` propagates `LoanError`; `Calculator::report` never fails and
//! turns every error into a message with an empty schedule.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::config::CalculatorConfig;
use crate::error::{LoanError, Result};
use crate::format;
use crate::schedule::{ScheduleBuilder, ScheduleResult};
use crate::solver::{solve_installment, solve_tenure};
use crate::terms::PERIODS_PER_YEAR;

/// Which quantity to solve for
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CalculationMode {
    /// Known tenure, solve for the monthly installment
    Installment { tenure_years: u32 },
    /// Known monthly installment, solve for the tenure
    Tenure { payment: f64 },
}

/// Inputs collected from the user
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    pub principal: f64,
    pub annual_rate_percent: f64,
    #[serde(flatten)]
    pub mode: CalculationMode,
}

/// Solved loan with its schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calculation {
    pub mode: CalculationMode,
    /// Monthly installment (solved or supplied)
    pub payment: f64,
    /// Months to payoff, fractional in tenure mode
    pub period_count: f64,
    pub schedule: ScheduleResult,
}

impl Calculation {
    /// Months rounded for display
    pub fn months(&self) -> f64 {
        self.period_count.round()
    }

    pub fn years(&self) -> f64 {
        self.period_count / PERIODS_PER_YEAR as f64
    }

    /// Human-readable summary
    pub fn summary(&self) -> String {
        let headline = match self.mode {
            CalculationMode::Installment { .. } => {
                format!("Your Monthly EMI: {}", format::money(self.payment))
            }
            CalculationMode::Tenure { .. } => format!(
                "Your loan will be closed in: {} months ({} years)",
                format::whole(self.period_count),
                format::years(self.period_count)
            ),
        };
        format!(
            "{}\nTotal Interest Payment is : {}",
            headline,
            format::whole(self.schedule.total_interest)
        )
    }
}

/// Message plus schedule; the schedule is empty when the calculation failed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationReport {
    pub message: String,
    pub failed: bool,
    pub schedule: ScheduleResult,
}

impl CalculationReport {
    pub fn from_error(err: &LoanError) -> Self {
        Self {
            message: err.user_message(),
            failed: true,
            schedule: ScheduleResult::empty(),
        }
    }
}

impl From<Calculation> for CalculationReport {
    fn from(calc: Calculation) -> Self {
        Self {
            message: calc.summary(),
            failed: false,
            schedule: calc.schedule,
        }
    }
}

/// Loan calculator
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    config: CalculatorConfig,
    builder: ScheduleBuilder,
}

impl Calculator {
    pub fn new(config: CalculatorConfig) -> Self {
        let builder = ScheduleBuilder::from_config(&config);
        Self { config, builder }
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Solve the request and build its schedule
    pub fn calculate(&self, request: &CalculationRequest) -> Result<Calculation> {
        let (payment, period_count) = match request.mode {
            CalculationMode::Installment { tenure_years } => {
                if tenure_years == 0 {
                    return Err(LoanError::invalid("tenure", "must be at least one year"));
                }
                if tenure_years > self.config.max_tenure_years {
                    return Err(LoanError::invalid(
                        "tenure",
                        format!("must not exceed {} years", self.config.max_tenure_years),
                    ));
                }
                let months = tenure_years.checked_mul(PERIODS_PER_YEAR).ok_or_else(|| {
                    LoanError::invalid("tenure", format!("{} years is too long to express in months", tenure_years))
                })?;
                let payment = solve_installment(request.principal, request.annual_rate_percent, months)?;
                (payment, months as f64)
            }
            CalculationMode::Tenure { payment } => {
                let months = solve_tenure(request.principal, request.annual_rate_percent, payment)?;
                (payment, months)
            }
        };

        let schedule = self.builder.build(
            request.principal,
            request.annual_rate_percent,
            payment,
            period_count,
        )?;

        Ok(Calculation {
            mode: request.mode,
            payment,
            period_count,
            schedule,
        })
    }

    /// Like `calculate`, but every failure becomes a report with an empty schedule
    pub fn report(&self, request: &CalculationRequest) -> CalculationReport {
        match self.calculate(request) {
            Ok(calc) => calc.into(),
            Err(err) => {
                warn!("calculation failed for {:?}: {}", request, err);
                CalculationReport::from_error(&err)
            }
        }
    }
}
