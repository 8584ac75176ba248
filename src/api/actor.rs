//! Actor resolution for API requests.
//!
//! The original system resolved the acting employee from the PHP session.
//! Sessions are out of scope here, so the actor arrives as an
//! `x-actor-id` header and is resolved to an employee record by a custom
//! extractor, keeping role checks out of individual handler bodies.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tracing::debug;

use crate::models::Employee;

use super::response::ApiErrorResponse;
use super::state::AppState;

/// The HTTP header carrying the acting employee's id.
pub const ACTOR_HEADER: &str = "x-actor-id";

/// The employee making the request.
///
/// Extracted from the `x-actor-id` header; rejects with 401 when the
/// header is missing or names no known employee.
pub struct Actor(pub Employee);

#[async_trait]
impl FromRequestParts<AppState> for Actor {
    type Rejection = ApiErrorResponse;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let actor_id = parts
            .headers
            .get(ACTOR_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                ApiErrorResponse::unauthorized(format!("the {ACTOR_HEADER} header is required"))
            })?;

        let employee = state.store().get_employee(actor_id).await.map_err(|_| {
            debug!(actor_id, "Unknown actor header");
            ApiErrorResponse::unauthorized(format!("no employee with id '{actor_id}'"))
        })?;

        Ok(Actor(employee))
    }
}
