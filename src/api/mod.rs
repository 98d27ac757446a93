//! HTTP API module for the payroll engine.
//!
//! This module exposes forward calculation, net-to-gross solving, pay period
//! processing and rule listing as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, NetToGrossRequest, ProcessRunRequest};
pub use response::{ApiError, ApiErrorResponse, RuleListResponse};
pub use state::AppState;
