//! Workflow state transitions.
//!
//! The evaluation lifecycle is linear:
//! `pending_self → self_submitted → pending_manager → manager_submitted →
//! final_delivered`. Every transition validates the current state, the
//! actor's role, and, where ratings are involved, completeness against the
//! job template. The single non-forward edge is [`reject_self`].

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    Employee, Evaluation, EvaluationStatus, EvaluationType, JobTemplate, ReviewCycle,
    ScoreSummary, WorkflowState,
};

use super::access::{require_manager_or_admin, require_subject};

/// Submits the employee's self-evaluation.
///
/// Requires the actor to be the subject, the cycle to be in
/// `pending_self`, and every template line item to be rated. On success
/// the cycle moves to `self_submitted` and the evaluation to `submitted`.
pub fn submit_self(
    cycle: &mut ReviewCycle,
    self_eval: &mut Evaluation,
    template: &JobTemplate,
    actor: &Employee,
) -> EngineResult<()> {
    require_subject(actor, &cycle.employee_id, "submit this self-evaluation")?;
    require_state(cycle, WorkflowState::PendingSelf, "submit_self")?;
    require_complete(self_eval, template)?;

    set_status(self_eval, EvaluationStatus::Submitted);
    cycle.transition_to(WorkflowState::SelfSubmitted, &actor.id);
    info!(
        cycle_id = %cycle.id,
        employee_id = %cycle.employee_id,
        "Self-evaluation submitted"
    );
    Ok(())
}

/// Starts the manager review.
///
/// Requires the actor to be the subject's manager (or an admin) and the
/// cycle to be in `self_submitted`. Creates and returns the draft manager
/// evaluation; the cycle moves to `pending_manager`.
pub fn begin_manager_review(
    cycle: &mut ReviewCycle,
    subject: &Employee,
    actor: &Employee,
) -> EngineResult<Evaluation> {
    require_manager_or_admin(actor, subject, "begin the manager review")?;
    require_state(cycle, WorkflowState::SelfSubmitted, "begin_manager_review")?;

    let manager_eval = Evaluation::new_draft(
        cycle.id,
        &cycle.employee_id,
        &cycle.period_id,
        &cycle.template_id,
        EvaluationType::ManagerReview,
    );
    cycle.manager_evaluation_id = Some(manager_eval.id);
    cycle.transition_to(WorkflowState::PendingManager, &actor.id);
    info!(
        cycle_id = %cycle.id,
        reviewer_id = %actor.id,
        "Manager review started"
    );
    Ok(manager_eval)
}

/// Returns a submitted self-evaluation to the employee for revision.
///
/// The one non-forward edge: `self_submitted → pending_self`. The
/// self-evaluation becomes `rejected` and is editable again.
pub fn reject_self(
    cycle: &mut ReviewCycle,
    self_eval: &mut Evaluation,
    subject: &Employee,
    actor: &Employee,
) -> EngineResult<()> {
    require_manager_or_admin(actor, subject, "reject this self-evaluation")?;
    require_state(cycle, WorkflowState::SelfSubmitted, "reject_self")?;

    set_status(self_eval, EvaluationStatus::Rejected);
    cycle.transition_to(WorkflowState::PendingSelf, &actor.id);
    info!(
        cycle_id = %cycle.id,
        reviewer_id = %actor.id,
        "Self-evaluation rejected for revision"
    );
    Ok(())
}

/// Submits the manager review.
///
/// Requires the actor to be the subject's manager (or an admin), the cycle
/// to be in `pending_manager`, and every template line item to be rated.
/// The manager evaluation becomes `submitted`, the self-evaluation
/// `reviewed`, and the cycle moves to `manager_submitted`.
pub fn submit_manager(
    cycle: &mut ReviewCycle,
    manager_eval: &mut Evaluation,
    self_eval: &mut Evaluation,
    template: &JobTemplate,
    subject: &Employee,
    actor: &Employee,
) -> EngineResult<()> {
    require_manager_or_admin(actor, subject, "submit the manager review")?;
    require_state(cycle, WorkflowState::PendingManager, "submit_manager")?;
    require_complete(manager_eval, template)?;

    set_status(manager_eval, EvaluationStatus::Submitted);
    set_status(self_eval, EvaluationStatus::Reviewed);
    cycle.transition_to(WorkflowState::ManagerSubmitted, &actor.id);
    info!(
        cycle_id = %cycle.id,
        reviewer_id = %actor.id,
        "Manager review submitted"
    );
    Ok(())
}

/// Delivers the final result.
///
/// Requires the actor to be the subject's manager (or an admin) and the
/// cycle to be in `manager_submitted`. Stores the blended score summary,
/// approves both evaluations, and moves the cycle to its terminal
/// `final_delivered` state.
pub fn deliver_final(
    cycle: &mut ReviewCycle,
    self_eval: &mut Evaluation,
    manager_eval: &mut Evaluation,
    summary: ScoreSummary,
    subject: &Employee,
    actor: &Employee,
) -> EngineResult<()> {
    require_manager_or_admin(actor, subject, "deliver the final evaluation")?;
    require_state(cycle, WorkflowState::ManagerSubmitted, "deliver_final")?;

    set_status(self_eval, EvaluationStatus::Approved);
    set_status(manager_eval, EvaluationStatus::Approved);
    cycle.delivered_summary = Some(summary);
    cycle.transition_to(WorkflowState::FinalDelivered, &actor.id);
    info!(
        cycle_id = %cycle.id,
        employee_id = %cycle.employee_id,
        "Final evaluation delivered"
    );
    Ok(())
}

fn require_state(
    cycle: &ReviewCycle,
    expected: WorkflowState,
    action: &'static str,
) -> EngineResult<()> {
    if cycle.workflow_state != expected {
        return Err(EngineError::InvalidTransition {
            action,
            state: cycle.workflow_state,
        });
    }
    Ok(())
}

fn require_complete(evaluation: &Evaluation, template: &JobTemplate) -> EngineResult<()> {
    if let Some((section, item_id)) = evaluation.unrated_items(template).first() {
        return Err(EngineError::MissingRating {
            section: section.to_string(),
            item_id: (*item_id).to_string(),
        });
    }
    Ok(())
}

fn set_status(evaluation: &mut Evaluation, status: EvaluationStatus) {
    evaluation.status = status;
    evaluation.updated_at = chrono::Utc::now();
}
