//! HTTP API module for the evaluation engine.
//!
//! This module provides the REST endpoints for catalogs, the employee
//! directory, the evidence journal, and the evaluation workflow.

mod actor;
mod handlers;
mod request;
mod response;
mod state;
mod transfer;

pub use actor::{ACTOR_HEADER, Actor};
pub use handlers::{DashboardResponse, PrefillResponse, create_router};
pub use request::{
    BeginReviewRequest, EvidenceRequest, ItemRatingRequest, RatingsUpdateRequest,
    StartCycleRequest,
};
pub use response::{ApiError, ApiErrorResponse, ImportSummary};
pub use state::AppState;
pub use transfer::{kpis_from_csv, kpis_to_csv, values_from_csv, values_to_csv};
