//! Evaluation period model.
//!
//! This module contains the [`EvaluationPeriod`] type that defines the
//! review window evaluation cycles and evidence entries are anchored to.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Represents an evaluation period with its date range.
///
/// A period defines the time window a review cycle covers. Evidence journal
/// entries recorded inside the window feed the evidence-based scoring path.
///
/// # Example
///
/// ```
/// use evaluation_engine::models::EvaluationPeriod;
/// use chrono::NaiveDate;
///
/// let period = EvaluationPeriod {
///     id: "2026_h1".to_string(),
///     name: "2026 First Half".to_string(),
///     start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2026, 6, 30).unwrap(),
/// };
///
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()));
/// assert!(!period.contains_date(NaiveDate::from_ymd_opt(2026, 7, 1).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationPeriod {
    /// Unique identifier for the period (e.g. "2026_h1").
    pub id: String,
    /// The human-readable name of the period.
    pub name: String,
    /// The start date of the period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the period (inclusive).
    pub end_date: NaiveDate,
}

impl EvaluationPeriod {
    /// Checks if a given date falls within this period.
    ///
    /// The check is inclusive of both start and end dates.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Checks whether the period's dates are ordered.
    pub fn is_valid(&self) -> bool {
        self.start_date <= self.end_date
    }
}
