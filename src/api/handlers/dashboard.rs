//! Dashboard handler.
//!
//! The original dashboard widgets, reduced to their data: cycle counts by
//! workflow state and period, plus the average delivered final score over
//! the cycles the actor may access.

use std::collections::BTreeMap;

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::api::actor::Actor;
use crate::api::response::ApiErrorResponse;
use crate::api::state::AppState;
use crate::models::WorkflowState;
use crate::workflow::can_access_evaluation;

/// Dashboard counters.
#[derive(Debug, Serialize, Deserialize)]
pub struct DashboardResponse {
    /// Total cycles visible to the actor.
    pub total_cycles: usize,
    /// Cycle counts per workflow state (every state present, zero-filled).
    pub by_state: BTreeMap<String, usize>,
    /// Cycle counts per evaluation period.
    pub by_period: BTreeMap<String, usize>,
    /// Average delivered final score, if any cycle has been delivered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_final_score: Option<Decimal>,
}

/// Handler for GET /api/dashboard.
pub async fn get_dashboard(
    State(state): State<AppState>,
    Actor(actor): Actor,
) -> Result<Json<DashboardResponse>, ApiErrorResponse> {
    let mut by_state: BTreeMap<String, usize> = WorkflowState::ALL
        .iter()
        .map(|s| (s.to_string(), 0))
        .collect();
    let mut by_period: BTreeMap<String, usize> = BTreeMap::new();
    let mut total_cycles = 0;
    let mut delivered_scores: Vec<Decimal> = Vec::new();

    for cycle in state.store().list_cycles().await {
        let Ok(subject) = state.store().get_employee(&cycle.employee_id).await else {
            continue;
        };
        if !can_access_evaluation(&actor, &subject) {
            continue;
        }

        total_cycles += 1;
        *by_state.entry(cycle.workflow_state.to_string()).or_default() += 1;
        *by_period.entry(cycle.period_id.clone()).or_default() += 1;
        if let Some(summary) = &cycle.delivered_summary {
            delivered_scores.push(summary.totals.final_score);
        }
    }

    let average_final_score = if delivered_scores.is_empty() {
        None
    } else {
        let sum: Decimal = delivered_scores.iter().copied().sum();
        Some((sum / Decimal::from(delivered_scores.len() as u64)).round_dp(2))
    };

    Ok(Json(DashboardResponse {
        total_cycles,
        by_state,
        by_period,
        average_final_score,
    }))
}
