//! Catalog CRUD handlers: departments, categories, competencies, KPIs,
//! values, job templates, and evaluation periods.
//!
//! Reads are open to any resolved actor; writes are admin-only. The KPI
//! and value catalogs additionally support CSV import/export.

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use tracing::info;

use crate::api::actor::Actor;
use crate::api::response::{ApiErrorResponse, ImportSummary};
use crate::api::state::AppState;
use crate::api::transfer;
use crate::models::{
    CompanyKpi, CompanyValue, Competency, CompetencyCategory, Department, EvaluationPeriod,
    JobTemplate,
};
use crate::workflow::require_admin;

type ApiResult<T> = Result<T, ApiErrorResponse>;

// ---- departments ------------------------------------------------------

pub async fn list_departments(
    State(state): State<AppState>,
    _actor: Actor,
) -> ApiResult<Json<Vec<Department>>> {
    Ok(Json(state.store().list_departments().await))
}

pub async fn create_department(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Json(department): Json<Department>,
) -> ApiResult<impl IntoResponse> {
    require_admin(&actor, "manage departments")?;
    let created = state.store().create_department(department).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_department(
    State(state): State<AppState>,
    _actor: Actor,
    Path(id): Path<String>,
) -> ApiResult<Json<Department>> {
    Ok(Json(state.store().get_department(&id).await?))
}

pub async fn update_department(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<String>,
    Json(mut department): Json<Department>,
) -> ApiResult<Json<Department>> {
    require_admin(&actor, "manage departments")?;
    department.id = id;
    Ok(Json(state.store().update_department(department).await?))
}

pub async fn delete_department(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    require_admin(&actor, "manage departments")?;
    state.store().delete_department(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---- competency categories --------------------------------------------

pub async fn list_categories(
    State(state): State<AppState>,
    _actor: Actor,
) -> ApiResult<Json<Vec<CompetencyCategory>>> {
    Ok(Json(state.store().list_categories().await))
}

pub async fn create_category(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Json(category): Json<CompetencyCategory>,
) -> ApiResult<impl IntoResponse> {
    require_admin(&actor, "manage competency categories")?;
    let created = state.store().create_category(category).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

// ---- competencies -----------------------------------------------------

pub async fn list_competencies(
    State(state): State<AppState>,
    _actor: Actor,
) -> ApiResult<Json<Vec<Competency>>> {
    Ok(Json(state.store().list_competencies().await))
}

pub async fn create_competency(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Json(competency): Json<Competency>,
) -> ApiResult<impl IntoResponse> {
    require_admin(&actor, "manage competencies")?;
    let created = state.store().create_competency(competency).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_competency(
    State(state): State<AppState>,
    _actor: Actor,
    Path(id): Path<String>,
) -> ApiResult<Json<Competency>> {
    Ok(Json(state.store().get_competency(&id).await?))
}

pub async fn update_competency(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<String>,
    Json(mut competency): Json<Competency>,
) -> ApiResult<Json<Competency>> {
    require_admin(&actor, "manage competencies")?;
    competency.id = id;
    Ok(Json(state.store().update_competency(competency).await?))
}

pub async fn delete_competency(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    require_admin(&actor, "manage competencies")?;
    state.store().delete_competency(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---- KPIs -------------------------------------------------------------

pub async fn list_kpis(
    State(state): State<AppState>,
    _actor: Actor,
) -> ApiResult<Json<Vec<CompanyKpi>>> {
    Ok(Json(state.store().list_kpis().await))
}

pub async fn create_kpi(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Json(kpi): Json<CompanyKpi>,
) -> ApiResult<impl IntoResponse> {
    require_admin(&actor, "manage KPIs")?;
    let created = state.store().create_kpi(kpi).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_kpi(
    State(state): State<AppState>,
    _actor: Actor,
    Path(id): Path<String>,
) -> ApiResult<Json<CompanyKpi>> {
    Ok(Json(state.store().get_kpi(&id).await?))
}

pub async fn update_kpi(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<String>,
    Json(mut kpi): Json<CompanyKpi>,
) -> ApiResult<Json<CompanyKpi>> {
    require_admin(&actor, "manage KPIs")?;
    kpi.id = id;
    Ok(Json(state.store().update_kpi(kpi).await?))
}

pub async fn delete_kpi(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    require_admin(&actor, "manage KPIs")?;
    state.store().delete_kpi(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Exports the KPI catalog as CSV.
pub async fn export_kpis(
    State(state): State<AppState>,
    _actor: Actor,
) -> ApiResult<impl IntoResponse> {
    let csv = transfer::kpis_to_csv(&state.store().list_kpis().await)?;
    Ok(([(header::CONTENT_TYPE, "text/csv")], csv))
}

/// Imports KPIs from a CSV payload (idempotent upsert keyed on id).
pub async fn import_kpis(
    State(state): State<AppState>,
    Actor(actor): Actor,
    body: String,
) -> ApiResult<Json<ImportSummary>> {
    require_admin(&actor, "import KPIs")?;
    let records = transfer::kpis_from_csv(&body)?;
    let count = records.len();
    let (inserted, updated) = state.store().upsert_kpis(records).await;
    info!(actor_id = %actor.id, count, inserted, updated, "KPI catalog imported");
    Ok(Json(ImportSummary { inserted, updated }))
}

// ---- company values ---------------------------------------------------

pub async fn list_values(
    State(state): State<AppState>,
    _actor: Actor,
) -> ApiResult<Json<Vec<CompanyValue>>> {
    Ok(Json(state.store().list_values().await))
}

pub async fn create_value(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Json(value): Json<CompanyValue>,
) -> ApiResult<impl IntoResponse> {
    require_admin(&actor, "manage company values")?;
    let created = state.store().create_value(value).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_value(
    State(state): State<AppState>,
    _actor: Actor,
    Path(id): Path<String>,
) -> ApiResult<Json<CompanyValue>> {
    Ok(Json(state.store().get_value(&id).await?))
}

pub async fn update_value(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<String>,
    Json(mut value): Json<CompanyValue>,
) -> ApiResult<Json<CompanyValue>> {
    require_admin(&actor, "manage company values")?;
    value.id = id;
    Ok(Json(state.store().update_value(value).await?))
}

pub async fn delete_value(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    require_admin(&actor, "manage company values")?;
    state.store().delete_value(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Exports the company value catalog as CSV.
pub async fn export_values(
    State(state): State<AppState>,
    _actor: Actor,
) -> ApiResult<impl IntoResponse> {
    let csv = transfer::values_to_csv(&state.store().list_values().await)?;
    Ok(([(header::CONTENT_TYPE, "text/csv")], csv))
}

/// Imports company values from a CSV payload.
pub async fn import_values(
    State(state): State<AppState>,
    Actor(actor): Actor,
    body: String,
) -> ApiResult<Json<ImportSummary>> {
    require_admin(&actor, "import company values")?;
    let records = transfer::values_from_csv(&body)?;
    let count = records.len();
    let (inserted, updated) = state.store().upsert_values(records).await;
    info!(actor_id = %actor.id, count, inserted, updated, "Value catalog imported");
    Ok(Json(ImportSummary { inserted, updated }))
}

// ---- job templates ----------------------------------------------------

pub async fn list_templates(
    State(state): State<AppState>,
    _actor: Actor,
) -> ApiResult<Json<Vec<JobTemplate>>> {
    Ok(Json(state.store().list_templates().await))
}

pub async fn create_template(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Json(template): Json<JobTemplate>,
) -> ApiResult<impl IntoResponse> {
    require_admin(&actor, "manage job templates")?;
    let created = state.store().create_template(template).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_template(
    State(state): State<AppState>,
    _actor: Actor,
    Path(id): Path<String>,
) -> ApiResult<Json<JobTemplate>> {
    Ok(Json(state.store().get_template(&id).await?))
}

pub async fn update_template(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<String>,
    Json(mut template): Json<JobTemplate>,
) -> ApiResult<Json<JobTemplate>> {
    require_admin(&actor, "manage job templates")?;
    template.id = id;
    Ok(Json(state.store().update_template(template).await?))
}

pub async fn delete_template(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    require_admin(&actor, "manage job templates")?;
    state.store().delete_template(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---- evaluation periods -----------------------------------------------

pub async fn list_periods(
    State(state): State<AppState>,
    _actor: Actor,
) -> ApiResult<Json<Vec<EvaluationPeriod>>> {
    Ok(Json(state.store().list_periods().await))
}

pub async fn create_period(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Json(period): Json<EvaluationPeriod>,
) -> ApiResult<impl IntoResponse> {
    require_admin(&actor, "manage evaluation periods")?;
    let created = state.store().create_period(period).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_period(
    State(state): State<AppState>,
    _actor: Actor,
    Path(id): Path<String>,
) -> ApiResult<Json<EvaluationPeriod>> {
    Ok(Json(state.store().get_period(&id).await?))
}
