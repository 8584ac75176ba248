//! Evaluation model and related types.
//!
//! An evaluation is one party's rating sheet for a review cycle: either the
//! employee's self-evaluation or the manager's review. Ratings cover every
//! line item of the employee's job template.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::template::{JobTemplate, SectionKind};

/// Which party an evaluation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationType {
    /// Written by the employee about themselves.
    SelfReview,
    /// Written by the employee's manager.
    ManagerReview,
}

/// The lifecycle status of a single evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationStatus {
    /// Being edited by its author.
    Draft,
    /// Submitted and awaiting the next workflow step.
    Submitted,
    /// A self-evaluation the manager has reviewed.
    Reviewed,
    /// Finalized as part of a delivered cycle.
    Approved,
    /// Sent back to the author for revision.
    Rejected,
}

impl EvaluationStatus {
    /// Returns true if the author may still change ratings.
    pub fn is_editable(&self) -> bool {
        matches!(self, EvaluationStatus::Draft | EvaluationStatus::Rejected)
    }
}

/// A rating given to a single template line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRating {
    /// The section the rated item belongs to.
    pub section: SectionKind,
    /// The template line item id.
    pub item_id: String,
    /// The rating on the configured scale.
    pub rating: Decimal,
    /// An optional comment justifying the rating.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// One party's rating sheet for a review cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Unique identifier for the evaluation.
    pub id: Uuid,
    /// The review cycle this evaluation belongs to.
    pub cycle_id: Uuid,
    /// The employee the evaluation is about.
    pub employee_id: String,
    /// The evaluation period the cycle covers.
    pub period_id: String,
    /// The job template the ratings are scored against.
    pub template_id: String,
    /// Which party wrote this evaluation.
    pub evaluation_type: EvaluationType,
    /// The lifecycle status of the evaluation.
    pub status: EvaluationStatus,
    /// Ratings per template line item.
    #[serde(default)]
    pub ratings: Vec<ItemRating>,
    /// A free-form overall comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_comment: Option<String>,
    /// When the evaluation was created.
    pub created_at: DateTime<Utc>,
    /// When the evaluation was last changed.
    pub updated_at: DateTime<Utc>,
}

impl Evaluation {
    /// Creates a new draft evaluation for a cycle.
    pub fn new_draft(
        cycle_id: Uuid,
        employee_id: &str,
        period_id: &str,
        template_id: &str,
        evaluation_type: EvaluationType,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            cycle_id,
            employee_id: employee_id.to_string(),
            period_id: period_id.to_string(),
            template_id: template_id.to_string(),
            evaluation_type,
            status: EvaluationStatus::Draft,
            ratings: Vec::new(),
            overall_comment: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Looks up the rating for a template line item.
    pub fn rating_for(&self, section: SectionKind, item_id: &str) -> Option<&ItemRating> {
        self.ratings
            .iter()
            .find(|r| r.section == section && r.item_id == item_id)
    }

    /// Returns the template items that have no rating yet.
    ///
    /// Used by the submit guards: an evaluation is complete when this is
    /// empty.
    pub fn unrated_items<'a>(
        &self,
        template: &'a JobTemplate,
    ) -> Vec<(SectionKind, &'a str)> {
        let mut missing = Vec::new();
        for section in SectionKind::ALL {
            for (item_id, _) in template.items_for(section) {
                if self.rating_for(section, item_id).is_none() {
                    missing.push((section, item_id));
                }
            }
        }
        missing
    }
}
