//! Review cycle and workflow handlers.
//!
//! These endpoints drive the evaluation lifecycle: starting cycles,
//! editing and submitting both evaluations, rejection, final delivery,
//! score summaries, and evidence-based prefill.

use std::time::Instant;

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::actor::Actor;
use crate::api::request::{
    BeginReviewRequest, ItemRatingRequest, RatingsUpdateRequest, StartCycleRequest,
};
use crate::api::response::{ApiError, ApiErrorResponse};
use crate::api::state::AppState;
use crate::config::ScoringConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Employee, Evaluation, EvaluationType, ItemRating, JobTemplate, ReviewCycle, ScoreStep,
    ScoreSummary, ScoreTotals, ScoreTrace, ScoreWarning, WorkflowState,
};
use crate::scoring::{PrefillSuggestion, blend_final, prefill_from_evidence, score_evaluation};
use crate::workflow;

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Query filters for the cycle listing.
#[derive(Debug, Default, Deserialize)]
pub struct CycleFilter {
    /// Restrict to one evaluation period.
    pub period_id: Option<String>,
    /// Restrict to one employee.
    pub employee_id: Option<String>,
}

/// Response body for the prefill endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct PrefillResponse {
    /// Suggested ratings derived from the evidence journal.
    pub suggestions: Vec<PrefillSuggestion>,
    /// The audit step explaining the derivation.
    pub audit_step: ScoreStep,
}

/// Converts a JSON extraction rejection into the API error shape.
fn parse_json<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiErrorResponse> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(error = %body_text, "JSON data error");
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(error = %err, "JSON syntax error");
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => ApiError::new(
                    "MISSING_CONTENT_TYPE",
                    "Content-Type must be application/json",
                ),
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            Err(ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error,
            })
        }
    }
}

/// Handler for POST /api/cycles.
///
/// Starts a review cycle for an employee and period, creating the draft
/// self-evaluation. Allowed for the subject, their manager, or an admin.
pub async fn start_cycle(
    State(state): State<AppState>,
    Actor(actor): Actor,
    payload: Result<Json<StartCycleRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let request = parse_json(payload)?;
    let correlation_id = Uuid::new_v4();

    let subject = state.store().get_employee(&request.employee_id).await?;
    workflow::require_access(&actor, &subject, "start a review cycle")?;

    let (cycle, _self_eval) = state
        .store()
        .start_cycle(&request.employee_id, &request.period_id)
        .await?;
    info!(
        correlation_id = %correlation_id,
        cycle_id = %cycle.id,
        employee_id = %cycle.employee_id,
        period_id = %cycle.period_id,
        "Review cycle started"
    );
    Ok((StatusCode::CREATED, Json(cycle)))
}

/// Handler for GET /api/cycles.
///
/// Lists the cycles the actor may access, optionally filtered by period
/// or employee.
pub async fn list_cycles(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Query(filter): Query<CycleFilter>,
) -> ApiResult<Json<Vec<ReviewCycle>>> {
    let mut visible = Vec::new();
    for cycle in state.store().list_cycles().await {
        if let Some(period_id) = &filter.period_id {
            if cycle.period_id != *period_id {
                continue;
            }
        }
        if let Some(employee_id) = &filter.employee_id {
            if cycle.employee_id != *employee_id {
                continue;
            }
        }
        let Ok(subject) = state.store().get_employee(&cycle.employee_id).await else {
            continue;
        };
        if workflow::can_access_evaluation(&actor, &subject) {
            visible.push(cycle);
        }
    }
    Ok(Json(visible))
}

/// Handler for GET /api/cycles/:id.
pub async fn get_cycle(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ReviewCycle>> {
    let cycle = state.store().get_cycle(id).await?;
    let subject = state.store().get_employee(&cycle.employee_id).await?;
    workflow::require_access(&actor, &subject, "read this review cycle")?;
    Ok(Json(cycle))
}

/// Handler for GET /api/cycles/:id/self.
pub async fn get_self_evaluation(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Evaluation>> {
    let cycle = state.store().get_cycle(id).await?;
    let subject = state.store().get_employee(&cycle.employee_id).await?;
    workflow::require_access(&actor, &subject, "read this evaluation")?;
    Ok(Json(state.store().get_evaluation(cycle.self_evaluation_id).await?))
}

/// Handler for PUT /api/cycles/:id/self.
///
/// Replaces the self-evaluation's ratings. Subject only, while the cycle
/// is `pending_self`.
pub async fn update_self_ratings(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<Uuid>,
    payload: Result<Json<RatingsUpdateRequest>, JsonRejection>,
) -> ApiResult<Json<Evaluation>> {
    let request = parse_json(payload)?;
    apply_ratings(&state, &actor, id, EvaluationType::SelfReview, request).await
}

/// Handler for POST /api/cycles/:id/self/submit.
pub async fn submit_self_evaluation(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ReviewCycle>> {
    let mut cycle = state.store().get_cycle(id).await?;
    let mut self_eval = state.store().get_evaluation(cycle.self_evaluation_id).await?;
    let template = state.store().get_template(&cycle.template_id).await?;

    workflow::submit_self(&mut cycle, &mut self_eval, &template, &actor)?;

    state.store().put_evaluation(self_eval).await;
    state.store().put_cycle(cycle.clone()).await;
    Ok(Json(cycle))
}

/// Handler for POST /api/cycles/:id/review/begin.
///
/// Starts the manager review, optionally pre-populating it from the
/// evidence journal.
pub async fn begin_review(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<Uuid>,
    payload: Option<Json<BeginReviewRequest>>,
) -> ApiResult<impl IntoResponse> {
    let request = payload.map(|Json(r)| r).unwrap_or_default();

    let mut cycle = state.store().get_cycle(id).await?;
    let subject = state.store().get_employee(&cycle.employee_id).await?;

    let mut manager_eval = workflow::begin_manager_review(&mut cycle, &subject, &actor)?;

    if request.prefill {
        let template = state.store().get_template(&cycle.template_id).await?;
        let period = state.store().get_period(&cycle.period_id).await?;
        let entries = state.store().evidence_for(&cycle.employee_id).await;
        let scale = state.store().scoring().rating_scale;

        let prefill = prefill_from_evidence(&template, &entries, &period, &scale, 1);
        manager_eval.ratings = prefill
            .suggestions
            .into_iter()
            .map(|s| ItemRating {
                section: s.section,
                item_id: s.item_id,
                rating: s.suggested_rating,
                comment: Some(format!(
                    "Pre-filled from {} evidence entries",
                    s.evidence_count
                )),
            })
            .collect();
        info!(
            cycle_id = %cycle.id,
            prefilled = manager_eval.ratings.len(),
            "Manager review pre-populated from evidence journal"
        );
    }

    state.store().put_evaluation(manager_eval.clone()).await;
    state.store().put_cycle(cycle).await;
    Ok((StatusCode::CREATED, Json(manager_eval)))
}

/// Handler for GET /api/cycles/:id/review.
pub async fn get_review(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Evaluation>> {
    let cycle = state.store().get_cycle(id).await?;
    let subject = state.store().get_employee(&cycle.employee_id).await?;
    workflow::require_access(&actor, &subject, "read this evaluation")?;
    let review_id = cycle
        .manager_evaluation_id
        .ok_or_else(|| EngineError::EvaluationNotFound {
            id: format!("manager review of cycle {}", cycle.id),
        })?;
    Ok(Json(state.store().get_evaluation(review_id).await?))
}

/// Handler for PUT /api/cycles/:id/review.
pub async fn update_review_ratings(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<Uuid>,
    payload: Result<Json<RatingsUpdateRequest>, JsonRejection>,
) -> ApiResult<Json<Evaluation>> {
    let request = parse_json(payload)?;
    apply_ratings(&state, &actor, id, EvaluationType::ManagerReview, request).await
}

/// Handler for POST /api/cycles/:id/review/submit.
pub async fn submit_review(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ReviewCycle>> {
    let mut cycle = state.store().get_cycle(id).await?;
    let subject = state.store().get_employee(&cycle.employee_id).await?;
    let review_id = require_review_id(&cycle)?;
    let mut manager_eval = state.store().get_evaluation(review_id).await?;
    let mut self_eval = state.store().get_evaluation(cycle.self_evaluation_id).await?;
    let template = state.store().get_template(&cycle.template_id).await?;

    workflow::submit_manager(
        &mut cycle,
        &mut manager_eval,
        &mut self_eval,
        &template,
        &subject,
        &actor,
    )?;

    state.store().put_evaluation(manager_eval).await;
    state.store().put_evaluation(self_eval).await;
    state.store().put_cycle(cycle.clone()).await;
    Ok(Json(cycle))
}

/// Handler for POST /api/cycles/:id/review/reject.
///
/// Sends a submitted self-evaluation back to the employee.
pub async fn reject_review(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ReviewCycle>> {
    let mut cycle = state.store().get_cycle(id).await?;
    let subject = state.store().get_employee(&cycle.employee_id).await?;
    let mut self_eval = state.store().get_evaluation(cycle.self_evaluation_id).await?;

    workflow::reject_self(&mut cycle, &mut self_eval, &subject, &actor)?;

    state.store().put_evaluation(self_eval).await;
    state.store().put_cycle(cycle.clone()).await;
    Ok(Json(cycle))
}

/// Handler for POST /api/cycles/:id/deliver.
///
/// Computes the blended score summary and closes the cycle.
pub async fn deliver_final(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ScoreSummary>> {
    let correlation_id = Uuid::new_v4();
    let mut cycle = state.store().get_cycle(id).await?;
    if cycle.workflow_state != WorkflowState::ManagerSubmitted {
        return Err(EngineError::InvalidTransition {
            action: "deliver_final",
            state: cycle.workflow_state,
        }
        .into());
    }
    let subject = state.store().get_employee(&cycle.employee_id).await?;
    let review_id = require_review_id(&cycle)?;
    let mut manager_eval = state.store().get_evaluation(review_id).await?;
    let mut self_eval = state.store().get_evaluation(cycle.self_evaluation_id).await?;
    let template = state.store().get_template(&cycle.template_id).await?;

    let summary = compute_summary(
        &cycle,
        &self_eval,
        &manager_eval,
        &template,
        state.store().scoring(),
    )?;

    workflow::deliver_final(
        &mut cycle,
        &mut self_eval,
        &mut manager_eval,
        summary.clone(),
        &subject,
        &actor,
    )?;

    state.store().put_evaluation(self_eval).await;
    state.store().put_evaluation(manager_eval).await;
    state.store().put_cycle(cycle).await;

    info!(
        correlation_id = %correlation_id,
        cycle_id = %id,
        final_score = %summary.totals.final_score,
        "Final evaluation delivered"
    );
    Ok(Json(summary))
}

/// Handler for GET /api/cycles/:id/summary.
///
/// Returns the delivered summary, or a live one once the manager review
/// is submitted.
pub async fn get_summary(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ScoreSummary>> {
    let cycle = state.store().get_cycle(id).await?;
    let subject = state.store().get_employee(&cycle.employee_id).await?;
    workflow::require_access(&actor, &subject, "read this score summary")?;

    if let Some(summary) = &cycle.delivered_summary {
        return Ok(Json(summary.clone()));
    }
    if cycle.workflow_state != WorkflowState::ManagerSubmitted {
        return Err(EngineError::InvalidTransition {
            action: "summarize",
            state: cycle.workflow_state,
        }
        .into());
    }

    let review_id = require_review_id(&cycle)?;
    let manager_eval = state.store().get_evaluation(review_id).await?;
    let self_eval = state.store().get_evaluation(cycle.self_evaluation_id).await?;
    let template = state.store().get_template(&cycle.template_id).await?;

    let summary = compute_summary(
        &cycle,
        &self_eval,
        &manager_eval,
        &template,
        state.store().scoring(),
    )?;
    Ok(Json(summary))
}

/// Handler for GET /api/cycles/:id/prefill.
///
/// Returns evidence-based rating suggestions for the manager review.
pub async fn get_prefill(
    State(state): State<AppState>,
    Actor(actor): Actor,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<PrefillResponse>> {
    let cycle = state.store().get_cycle(id).await?;
    let subject = state.store().get_employee(&cycle.employee_id).await?;
    workflow::require_manager_or_admin(&actor, &subject, "read prefill suggestions")?;

    let template = state.store().get_template(&cycle.template_id).await?;
    let period = state.store().get_period(&cycle.period_id).await?;
    let entries = state.store().evidence_for(&cycle.employee_id).await;
    let scale = state.store().scoring().rating_scale;

    let result = prefill_from_evidence(&template, &entries, &period, &scale, 1);
    Ok(Json(PrefillResponse {
        suggestions: result.suggestions,
        audit_step: result.audit_step,
    }))
}

/// Replaces an evaluation's rating set after access and bounds checks.
async fn apply_ratings(
    state: &AppState,
    actor: &Employee,
    cycle_id: Uuid,
    evaluation_type: EvaluationType,
    request: RatingsUpdateRequest,
) -> ApiResult<Json<Evaluation>> {
    let cycle = state.store().get_cycle(cycle_id).await?;
    let subject = state.store().get_employee(&cycle.employee_id).await?;

    if !workflow::can_edit_evaluation(actor, &subject, &cycle, evaluation_type) {
        return Err(EngineError::AccessDenied {
            actor: actor.id.clone(),
            action: match evaluation_type {
                EvaluationType::SelfReview => "edit this self-evaluation".to_string(),
                EvaluationType::ManagerReview => "edit this manager review".to_string(),
            },
        }
        .into());
    }

    let template = state.store().get_template(&cycle.template_id).await?;
    validate_ratings(&template, state.store().scoring(), &request.ratings)?;

    let evaluation_id = match evaluation_type {
        EvaluationType::SelfReview => cycle.self_evaluation_id,
        EvaluationType::ManagerReview => require_review_id(&cycle)?,
    };
    let mut evaluation = state.store().get_evaluation(evaluation_id).await?;
    evaluation.ratings = request.ratings.into_iter().map(Into::into).collect();
    evaluation.overall_comment = request.overall_comment;
    evaluation.updated_at = Utc::now();

    state.store().put_evaluation(evaluation.clone()).await;
    Ok(Json(evaluation))
}

fn validate_ratings(
    template: &JobTemplate,
    scoring: &ScoringConfig,
    ratings: &[ItemRatingRequest],
) -> EngineResult<()> {
    for rating in ratings {
        if !template.contains_item(rating.section, &rating.item_id) {
            return Err(EngineError::ValidationError {
                field: "item_id".to_string(),
                message: format!(
                    "template '{}' has no {} item '{}'",
                    template.id, rating.section, rating.item_id
                ),
            });
        }
        scoring.rating_scale.validate(&rating.item_id, rating.rating)?;
    }
    Ok(())
}

fn require_review_id(cycle: &ReviewCycle) -> EngineResult<Uuid> {
    cycle
        .manager_evaluation_id
        .ok_or_else(|| EngineError::EvaluationNotFound {
            id: format!("manager review of cycle {}", cycle.id),
        })
}

/// Scores both evaluations and blends them into the cycle's summary.
///
/// The large-gap warning flags cycles where self and manager overall
/// scores differ by 1.5 points or more.
pub(crate) fn compute_summary(
    cycle: &ReviewCycle,
    self_eval: &Evaluation,
    manager_eval: &Evaluation,
    template: &JobTemplate,
    scoring: &ScoringConfig,
) -> EngineResult<ScoreSummary> {
    let start_time = Instant::now();
    let scale = scoring.rating_scale;

    let self_result =
        score_evaluation(EvaluationType::SelfReview, template, self_eval, &scale, 1)?;
    let next_step = 1 + self_result.audit_steps.len() as u32;
    let manager_result = score_evaluation(
        EvaluationType::ManagerReview,
        template,
        manager_eval,
        &scale,
        next_step,
    )?;
    let blend_step = next_step + manager_result.audit_steps.len() as u32;
    let blend = blend_final(
        self_result.overall,
        manager_result.overall,
        &scoring.final_blend,
        blend_step,
    )?;

    let mut warnings = Vec::new();
    let gap = (self_result.overall - manager_result.overall).abs();
    if gap >= rust_decimal::Decimal::new(15, 1) {
        warnings.push(ScoreWarning {
            code: "SELF_MANAGER_GAP".to_string(),
            message: format!(
                "Self and manager overall scores differ by {} points",
                gap
            ),
            severity: "medium".to_string(),
        });
    }

    let mut steps = self_result.audit_steps;
    steps.extend(manager_result.audit_steps);
    steps.push(blend.audit_step);

    let mut lines = self_result.lines;
    lines.extend(manager_result.lines);
    let mut sections = self_result.sections;
    sections.extend(manager_result.sections);

    Ok(ScoreSummary {
        summary_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        cycle_id: cycle.id,
        employee_id: cycle.employee_id.clone(),
        period_id: cycle.period_id.clone(),
        template_id: cycle.template_id.clone(),
        lines,
        sections,
        totals: ScoreTotals {
            self_overall: self_result.overall,
            manager_overall: manager_result.overall,
            final_score: blend.final_score,
        },
        trace: ScoreTrace {
            steps,
            warnings,
            duration_us: start_time.elapsed().as_micros() as u64,
        },
    })
}
