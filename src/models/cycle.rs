//! Review cycle model and workflow state.
//!
//! A review cycle tracks one employee's evaluation for one period through
//! the lifecycle: pending_self → self_submitted → pending_manager →
//! manager_submitted → final_delivered.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::score_summary::ScoreSummary;

/// The lifecycle stage of a review cycle.
///
/// Transitions are linear; the single non-forward edge is a manager
/// rejecting a submitted self-evaluation, which returns the cycle to
/// [`WorkflowState::PendingSelf`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    /// Waiting for the employee's self-evaluation.
    PendingSelf,
    /// Self-evaluation submitted, waiting for the manager to pick it up.
    SelfSubmitted,
    /// Manager review in progress.
    PendingManager,
    /// Manager review submitted, ready for final delivery.
    ManagerSubmitted,
    /// Final score delivered. Terminal.
    FinalDelivered,
}

impl WorkflowState {
    /// All states in lifecycle order.
    pub const ALL: [WorkflowState; 5] = [
        WorkflowState::PendingSelf,
        WorkflowState::SelfSubmitted,
        WorkflowState::PendingManager,
        WorkflowState::ManagerSubmitted,
        WorkflowState::FinalDelivered,
    ];

    /// The snake_case name used on the wire and in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowState::PendingSelf => "pending_self",
            WorkflowState::SelfSubmitted => "self_submitted",
            WorkflowState::PendingManager => "pending_manager",
            WorkflowState::ManagerSubmitted => "manager_submitted",
            WorkflowState::FinalDelivered => "final_delivered",
        }
    }

    /// Returns true once the cycle can no longer change.
    pub fn is_terminal(&self) -> bool {
        matches!(self, WorkflowState::FinalDelivered)
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recorded workflow state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTransition {
    /// The state the cycle left.
    pub old_state: WorkflowState,
    /// The state the cycle entered.
    pub new_state: WorkflowState,
    /// The employee who triggered the transition.
    pub actor_id: String,
    /// When the transition happened.
    pub transitioned_at: DateTime<Utc>,
}

/// One employee's evaluation lifecycle for one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewCycle {
    /// Unique identifier for the cycle.
    pub id: Uuid,
    /// The employee under review.
    pub employee_id: String,
    /// The evaluation period the cycle covers.
    pub period_id: String,
    /// The job template the cycle scores against.
    pub template_id: String,
    /// Current lifecycle stage.
    pub workflow_state: WorkflowState,
    /// The self-evaluation, created with the cycle.
    pub self_evaluation_id: Uuid,
    /// The manager evaluation, created when the review begins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_evaluation_id: Option<Uuid>,
    /// The delivered score summary, set on final delivery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivered_summary: Option<ScoreSummary>,
    /// Every state change the cycle has gone through.
    #[serde(default)]
    pub history: Vec<StateTransition>,
    /// When the cycle was created.
    pub created_at: DateTime<Utc>,
    /// When the cycle last changed.
    pub updated_at: DateTime<Utc>,
}

impl ReviewCycle {
    /// Creates a new cycle in `pending_self`.
    pub fn new(
        employee_id: &str,
        period_id: &str,
        template_id: &str,
        self_evaluation_id: Uuid,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            employee_id: employee_id.to_string(),
            period_id: period_id.to_string(),
            template_id: template_id.to_string(),
            workflow_state: WorkflowState::PendingSelf,
            self_evaluation_id,
            manager_evaluation_id: None,
            delivered_summary: None,
            history: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Moves the cycle to a new state, recording the transition.
    ///
    /// Callers are expected to have validated the transition; this method
    /// only records it.
    pub fn transition_to(&mut self, new_state: WorkflowState, actor_id: &str) {
        let transition = StateTransition {
            old_state: self.workflow_state,
            new_state,
            actor_id: actor_id.to_string(),
            transitioned_at: Utc::now(),
        };
        self.workflow_state = new_state;
        self.updated_at = transition.transitioned_at;
        self.history.push(transition);
    }
}
