//! Role-based access checks for the evaluation workflow.
//!
//! These are the pure predicates the page controllers of the original
//! system gated everything on: who may see an evaluation, and who may edit
//! which side of it in which workflow state.

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, EvaluationType, ReviewCycle, WorkflowState};

/// Returns true if the actor may read the subject's evaluations.
///
/// Admins see everything; otherwise only the subject and the subject's
/// manager have access.
pub fn can_access_evaluation(actor: &Employee, subject: &Employee) -> bool {
    actor.is_admin() || actor.id == subject.id || actor.manages(subject)
}

/// Returns true if the actor may edit the given side of a cycle's
/// evaluation in its current workflow state.
///
/// Self-evaluations are editable only by the subject while the cycle is
/// `pending_self`. Manager reviews are editable by the subject's manager
/// (or an admin) while the cycle is `pending_manager`. Self ratings stay
/// first-person: admins cannot edit another employee's self-evaluation.
pub fn can_edit_evaluation(
    actor: &Employee,
    subject: &Employee,
    cycle: &ReviewCycle,
    evaluation_type: EvaluationType,
) -> bool {
    match evaluation_type {
        EvaluationType::SelfReview => {
            cycle.workflow_state == WorkflowState::PendingSelf && actor.id == subject.id
        }
        EvaluationType::ManagerReview => {
            cycle.workflow_state == WorkflowState::PendingManager
                && (actor.manages(subject) || actor.is_admin())
        }
    }
}

/// Errors with `AccessDenied` unless [`can_access_evaluation`] holds.
pub fn require_access(actor: &Employee, subject: &Employee, action: &str) -> EngineResult<()> {
    if can_access_evaluation(actor, subject) {
        Ok(())
    } else {
        Err(denied(actor, action))
    }
}

/// Errors with `AccessDenied` unless the actor is the subject's manager or
/// an admin.
pub fn require_manager_or_admin(
    actor: &Employee,
    subject: &Employee,
    action: &str,
) -> EngineResult<()> {
    if actor.manages(subject) || actor.is_admin() {
        Ok(())
    } else {
        Err(denied(actor, action))
    }
}

/// Errors with `AccessDenied` unless the actor is the subject themselves.
pub fn require_subject(actor: &Employee, subject_id: &str, action: &str) -> EngineResult<()> {
    if actor.id == subject_id {
        Ok(())
    } else {
        Err(denied(actor, action))
    }
}

/// Errors with `AccessDenied` unless the actor is an admin.
pub fn require_admin(actor: &Employee, action: &str) -> EngineResult<()> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(denied(actor, action))
    }
}

fn denied(actor: &Employee, action: &str) -> EngineError {
    EngineError::AccessDenied {
        actor: actor.id.clone(),
        action: action.to_string(),
    }
}
