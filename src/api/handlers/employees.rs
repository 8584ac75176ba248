//! Employee directory handlers.
//!
//! The directory is readable by any resolved actor; writes are admin-only.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::info;

use crate::api::actor::Actor;
use crate::api::response::ApiErrorResponse;
use crate::api::state::AppState;
use crate::models::Employee;
use crate::workflow::require_admin;

type ApiResult<T> = Result<T, ApiErrorResponse>;

pub async fn list_employees(
    State(state): State<AppState>,
    _actor: Actor,
) -> ApiResult<Json<Vec<Employee>>> {
    Ok(Json(state.store().list_employees().await))
}

pub async fn create_employee(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Json(employee): Json<Employee>,
) -> ApiResult<impl IntoResponse> {
    require_admin(&actor, "manage the employee directory")?;
    let created = state.store().create_employee(employee).await?;
    info!(actor_id = %actor.id, employee_id = %created.id, "Employee created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_employee(
    State(state): State<AppState>,
    _actor: Actor,
    Path(id): Path<String>,
) -> ApiResult<Json<Employee>> {
    Ok(Json(state.store().get_employee(&id).await?))
}

pub async fn update_employee(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<String>,
    Json(mut employee): Json<Employee>,
) -> ApiResult<Json<Employee>> {
    require_admin(&actor, "manage the employee directory")?;
    employee.id = id;
    Ok(Json(state.store().update_employee(employee).await?))
}

pub async fn delete_employee(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    require_admin(&actor, "manage the employee directory")?;
    state.store().delete_employee(&id).await?;
    info!(actor_id = %actor.id, employee_id = %id, "Employee deleted");
    Ok(StatusCode::NO_CONTENT)
}
