//! Error taxonomy for loan calculations

use thiserror::Error;

/// Failures raised by the solvers and the schedule builder
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoanError {
    /// Well-typed but out-of-range input (non-positive principal, negative rate, ...)
    #[error("{field} {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// Payment does not cover the first period's interest, so the balance never falls
    #[error("payment {payment:.2} does not exceed the first month's interest of {first_interest:.2}")]
    InsufficientPayment { payment: f64, first_interest: f64 },

    /// NaN, infinite or unparseable numbers
    #[error("{0}")]
    NumericFailure(String),
}

pub type Result<T> = std::result::Result<T, LoanError>;

impl LoanError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        LoanError::InvalidInput { field, reason: reason.into() }
    }

    /// Message shown to the person using the calculator
    pub fn user_message(&self) -> String {
        match self {
            LoanError::InvalidInput { field: "payment", .. } => {
                "Please enter a valid EMI amount to calculate tenure.".to_string()
            }
            LoanError::InvalidInput { field, reason } => format!("Error: {} {}", field, reason),
            LoanError::InsufficientPayment { .. } => {
                "The entered EMI is too low to cover the monthly interest. Please increase the EMI."
                    .to_string()
            }
            LoanError::NumericFailure(detail) => {
                format!("Error: Please enter valid numerical values. {}", detail)
            }
        }
    }
}

impl From<serde_json::Error> for LoanError {
    fn from(e: serde_json::Error) -> Self {
        LoanError::NumericFailure(e.to_string())
    }
}

impl From<std::num::ParseFloatError> for LoanError {
    fn from(e: std::num::ParseFloatError) -> Self {
        LoanError::NumericFailure(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let err = LoanError::invalid("payment", "must be positive");
        assert_eq!(err.user_message(), "Please enter a valid EMI amount to calculate tenure.");

        let err = LoanError::invalid("principal", "must be positive");
        assert_eq!(err.user_message(), "Error: principal must be positive");

        let err = LoanError::InsufficientPayment { payment: 50.0, first_interest: 83.33 };
        assert!(err.user_message().starts_with("The entered EMI is too low"));
    }

    #[test]
    fn test_parse_error_is_numeric_failure() {
        let err: LoanError = "abc".parse::<f64>().unwrap_err().into();
        assert!(matches!(err, LoanError::NumericFailure(_)));
        assert!(err.user_message().starts_with("Error: Please enter valid numerical values."));
    }
}
