//! EMI Calculator - loan repayment engine
//!
//! This library provides:
//! - Fixed monthly installment (EMI) from principal, rate and tenure
//! - Tenure from a fixed installment (logarithmic inverse of the annuity formula)
//! - Month-by-month amortization schedules with total interest
//! - A mode-dispatching calculator that turns every failure into a readable report

pub mod error;
pub mod config;
pub mod terms;
pub mod solver;
pub mod schedule;
pub mod calculator;
pub mod format;

// Re-export commonly used types
pub use error::{LoanError, Result};
pub use config::CalculatorConfig;
pub use terms::{LoanTerms, periodic_rate, PERIODS_PER_YEAR};
pub use solver::{solve_installment, solve_tenure};
pub use schedule::{ScheduleBuilder, ScheduleResult, ScheduleRow};
pub use calculator::{Calculation, CalculationMode, CalculationReport, CalculationRequest, Calculator};
