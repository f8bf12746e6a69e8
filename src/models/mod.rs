//! Core data models for the salary normalizer.
//!
//! This module contains the domain models used throughout the engine.

mod amount;
mod converted_salary;
mod currency;
mod employment;
mod month;

pub use amount::Amount;
pub use converted_salary::{ConvertedSalary, MonthlySeries, MonthlyTable};
pub use currency::Currency;
pub use employment::{EmploymentPeriod, Salary};
pub use month::MonthKey;
