//! Schedule row and result structures

use serde::{Deserialize, Serialize};

/// One month of the amortization schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Month number, starting at 1
    pub period_index: u32,
    /// Nominal installment for the loan
    pub payment: f64,
    /// Part of the payment that reduces the balance
    pub principal_portion: f64,
    /// Interest accrued on the opening balance
    pub interest_portion: f64,
    /// Balance after this month's payment
    pub remaining_balance: f64,
}

impl ScheduleRow {
    /// Amount actually paid this month
    /// Smaller than `payment` on a short final month
    pub fn amount_paid(&self) -> f64 {
        self.principal_portion + self.interest_portion
    }
}

/// Complete schedule for a loan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    /// Rows in chronological order
    pub rows: Vec<ScheduleRow>,
    /// Sum of interest over all rows
    pub total_interest: f64,
}

impl ScheduleResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of monthly payments in the schedule
    pub fn period_count(&self) -> usize {
        self.rows.len()
    }

    pub fn total_principal(&self) -> f64 {
        self.rows.iter().map(|r| r.principal_portion).sum()
    }

    /// Principal plus interest over the life of the loan
    pub fn total_paid(&self) -> f64 {
        self.rows.iter().map(|r| r.amount_paid()).sum()
    }

    pub fn last(&self) -> Option<&ScheduleRow> {
        self.rows.last()
    }
}
