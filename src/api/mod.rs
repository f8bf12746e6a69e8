//! HTTP API module for the salary normalizer.
//!
//! This module exposes the salary calculator to downstream reporting as
//! JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ConversionRequest, PeriodRequest, SalaryRequest, YearlyStatsRequest};
pub use response::{ApiError, YearlyStatsResponse};
pub use state::AppState;
