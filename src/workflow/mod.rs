//! Evaluation workflow logic.
//!
//! This module contains the workflow state machine and the role-based
//! access checks that gate it: submitting self-evaluations, starting and
//! submitting manager reviews, rejections, and final delivery.

mod access;
mod transitions;

pub use access::{
    can_access_evaluation, can_edit_evaluation, require_access, require_admin,
    require_manager_or_admin, require_subject,
};
pub use transitions::{
    begin_manager_review, deliver_final, reject_self, submit_manager, submit_self,
};
