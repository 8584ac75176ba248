//! Growth evidence journal model.
//!
//! Evidence entries are manager-submitted feedback with a star rating,
//! tagged to a template line item. Entries recorded inside an evaluation
//! period pre-populate the manager review for that period.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::template::SectionKind;

/// The smallest allowed star rating.
pub const MIN_STARS: u8 = 1;

/// The largest allowed star rating.
pub const MAX_STARS: u8 = 5;

/// A single growth evidence journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceEntry {
    /// Unique identifier for the entry.
    pub id: Uuid,
    /// The employee the evidence is about.
    pub employee_id: String,
    /// The manager who recorded the evidence.
    pub author_id: String,
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

impl EvidenceEntry {
    /// Returns true if the star rating is on the 1–5 scale.
    pub fn has_valid_stars(&self) -> bool {
        (MIN_STARS..=MAX_STARS).contains(&self.stars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_entry(stars: u8) -> EvidenceEntry {
        EvidenceEntry {
            id: Uuid::new_v4(),
            employee_id: "emp_001".to_string(),
            author_id: "emp_mgr".to_string(),
            section: SectionKind::Competencies,
            item_id: "communication".to_string(),
            stars,
            note: "Ran the incident bridge calmly".to_string(),
            recorded_on: NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
        }
    }

    #[test]
    fn test_valid_star_range() {
        for stars in MIN_STARS..=MAX_STARS {
            assert!(create_test_entry(stars).has_valid_stars());
        }
    }

    #[test]
    fn test_invalid_star_values() {
        assert!(!create_test_entry(0).has_valid_stars());
        assert!(!create_test_entry(6).has_valid_stars());
    }

    #[test]
    fn test_entry_serialization_round_trip() {
        let entry = create_test_entry(4);
        let json = serde_json::to_string(&entry).unwrap();
        let deserialized: EvidenceEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, deserialized);
    }
}
