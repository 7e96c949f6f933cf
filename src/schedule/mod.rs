//! Amortization schedule generation

mod rows;
mod builder;

pub use rows::{ScheduleRow, ScheduleResult};
pub use builder::ScheduleBuilder;
