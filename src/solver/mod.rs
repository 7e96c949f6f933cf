//! Closed-form solvers for the amortizing annuity
//!
//! Both solvers are the same formula, `E = P·r·(1+r)^n / ((1+r)^n - 1)`,
//! solved for the installment E or for the number of months n.

mod installment;
mod tenure;

pub use installment::solve_installment;
pub use tenure::solve_tenure;
