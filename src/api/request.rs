//! Request types for the evaluation engine API.
//!
//! This module defines the JSON request structures for the workflow and
//! evidence endpoints. Catalog CRUD endpoints accept the catalog models
//! directly.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{EvidenceEntry, ItemRating, SectionKind};

/// Request body for starting a review cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartCycleRequest {
    /// The employee to review.
    pub employee_id: String,
    /// The period the cycle covers.
    pub period_id: String,
}

/// A single rating in a ratings update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRatingRequest {
    /// The section the rated item belongs to.
    pub section: SectionKind,
    /// The template line item id.
    pub item_id: String,
    /// The rating on the configured scale.
    pub rating: Decimal,
    /// An optional comment justifying the rating.
    #[serde(default)]
    pub comment: Option<String>,
}

/// Request body for updating an evaluation's ratings.
///
/// The ratings replace the evaluation's current rating set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingsUpdateRequest {
    /// The full set of ratings.
    pub ratings: Vec<ItemRatingRequest>,
    /// An optional overall comment.
    #[serde(default)]
    pub overall_comment: Option<String>,
}

/// Request body for starting the manager review.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BeginReviewRequest {
    /// When true, the draft review is pre-populated from the evidence
    /// journal.
    #[serde(default)]
    pub prefill: bool,
}

/// Request body for recording an evidence journal entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceRequest {
    /// The section of the observed line item.
    pub section: SectionKind,
    /// The template line item the evidence relates to.
    pub item_id: String,
    /// Star rating from 1 to 5.
    pub stars: u8,
    /// The written feedback.
    pub note: String,
    /// The date the observed behavior happened.
    pub recorded_on: NaiveDate,
}

impl From<ItemRatingRequest> for ItemRating {
    fn from(req: ItemRatingRequest) -> Self {
        ItemRating {
            section: req.section,
            item_id: req.item_id,
            rating: req.rating,
            comment: req.comment,
        }
    }
}

impl EvidenceRequest {
    /// Builds an evidence entry authored by the given manager about the
    /// given employee.
    pub fn into_entry(self, employee_id: &str, author_id: &str) -> EvidenceEntry {
        EvidenceEntry {
            id: uuid::Uuid::new_v4(),
            employee_id: employee_id.to_string(),
            author_id: author_id.to_string(),
            section: self.section,
            item_id: self.item_id,
            stars: self.stars,
            note: self.note,
            recorded_on: self.recorded_on,
        }
    }
}
