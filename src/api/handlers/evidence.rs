//! Growth evidence journal handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::info;

use crate::api::actor::Actor;
use crate::api::request::EvidenceRequest;
use crate::api::response::ApiErrorResponse;
use crate::api::state::AppState;
use crate::error::EngineError;
use crate::models::EvidenceEntry;
use crate::workflow::{require_access, require_manager_or_admin};

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Lists the evidence journal of an employee. Visible to the subject,
/// their manager, and admins.
pub async fn list_evidence(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(employee_id): Path<String>,
) -> ApiResult<Json<Vec<EvidenceEntry>>> {
    let subject = state.store().get_employee(&employee_id).await?;
    require_access(&actor, &subject, "read this evidence journal")?;
    Ok(Json(state.store().evidence_for(&employee_id).await))
}

/// Records an evidence entry about an employee. Manager or admin only;
/// the entry must reference a line item on the employee's job template.
pub async fn add_evidence(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(employee_id): Path<String>,
    Json(request): Json<EvidenceRequest>,
) -> ApiResult<impl IntoResponse> {
    let subject = state.store().get_employee(&employee_id).await?;
    require_manager_or_admin(&actor, &subject, "record evidence")?;

    let template_id =
        subject
            .job_template_id
            .as_deref()
            .ok_or_else(|| EngineError::ValidationError {
                field: "job_template_id".to_string(),
                message: format!("employee '{}' has no job template assigned", subject.id),
            })?;
    let template = state.store().get_template(template_id).await?;
    if !template.contains_item(request.section, &request.item_id) {
        return Err(EngineError::ValidationError {
            field: "item_id".to_string(),
            message: format!(
                "template '{}' has no {} item '{}'",
                template.id, request.section, request.item_id
            ),
        }
        .into());
    }

    let entry = request.into_entry(&employee_id, &actor.id);
    let entry = state.store().add_evidence(entry).await?;
    info!(
        author_id = %actor.id,
        employee_id = %employee_id,
        item_id = %entry.item_id,
        stars = entry.stars,
        "Evidence entry recorded"
    );
    Ok((StatusCode::CREATED, Json(entry)))
}
