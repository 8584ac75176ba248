//! Job template model.
//!
//! A job template is a reusable definition of a position's evaluation
//! criteria: weighted KPI, competency, responsibility, and value line items,
//! plus the weight each section contributes to the overall score.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{EngineError, EngineResult};

/// The four sections a job template scores an employee on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// Company KPI line items.
    Kpis,
    /// Competency line items.
    Competencies,
    /// Position-specific responsibility line items.
    Responsibilities,
    /// Company value line items.
    Values,
}

impl SectionKind {
    /// All sections in scoring order.
    pub const ALL: [SectionKind; 4] = [
        SectionKind::Kpis,
        SectionKind::Competencies,
        SectionKind::Responsibilities,
        SectionKind::Values,
    ];

    /// The snake_case name used on the wire and in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Kpis => "kpis",
            SectionKind::Competencies => "competencies",
            SectionKind::Responsibilities => "responsibilities",
            SectionKind::Values => "values",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A weighted line item referencing a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateItem {
    /// The catalog id this item references (KPI, competency, or value id).
    pub item_id: String,
    /// The weight of this item within its section, as a percentage.
    pub weight: Decimal,
}

/// A weighted responsibility line item with inline text.
///
/// Responsibilities are position-specific and have no catalog; the text
/// lives on the template itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsibilityItem {
    /// Unique identifier of the responsibility within the template.
    pub id: String,
    /// The responsibility statement.
    pub text: String,
    /// The weight of this item within the section, as a percentage.
    pub weight: Decimal,
}

/// The weight each section contributes to the overall score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionWeights {
    /// Weight of the KPI section, as a percentage.
    pub kpis: Decimal,
    /// Weight of the competency section, as a percentage.
    pub competencies: Decimal,
    /// Weight of the responsibility section, as a percentage.
    pub responsibilities: Decimal,
    /// Weight of the value section, as a percentage.
    pub values: Decimal,
}

impl SectionWeights {
    /// Returns the weight for a section.
    pub fn weight_for(&self, section: SectionKind) -> Decimal {
        match section {
            SectionKind::Kpis => self.kpis,
            SectionKind::Competencies => self.competencies,
            SectionKind::Responsibilities => self.responsibilities,
            SectionKind::Values => self.values,
        }
    }

    /// Sum of all four section weights.
    pub fn total(&self) -> Decimal {
        self.kpis + self.competencies + self.responsibilities + self.values
    }
}

/// A reusable definition of a position's evaluation criteria.
///
/// # Example
///
/// ```
/// use evaluation_engine::models::{JobTemplate, SectionWeights, TemplateItem};
/// use rust_decimal::Decimal;
///
/// let template = JobTemplate {
///     id: "software_engineer".to_string(),
///     title: "Software Engineer".to_string(),
///     description: "Builds and maintains product software".to_string(),
///     section_weights: SectionWeights {
///         kpis: Decimal::from(40),
///         competencies: Decimal::from(30),
///         responsibilities: Decimal::from(20),
///         values: Decimal::from(10),
///     },
///     kpis: vec![TemplateItem {
///         item_id: "delivery_throughput".to_string(),
///         weight: Decimal::from(100),
///     }],
///     competencies: vec![TemplateItem {
///         item_id: "communication".to_string(),
///         weight: Decimal::from(100),
///     }],
///     responsibilities: vec![],
///     values: vec![],
/// };
/// // responsibilities/values are empty, so their weights must be zero
/// assert!(template.validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobTemplate {
    /// Unique identifier for the template (e.g. "software_engineer").
    pub id: String,
    /// The position title.
    pub title: String,
    /// A description of the position.
    pub description: String,
    /// The weight each section contributes to the overall score.
    pub section_weights: SectionWeights,
    /// KPI line items.
    #[serde(default)]
    pub kpis: Vec<TemplateItem>,
    /// Competency line items.
    #[serde(default)]
    pub competencies: Vec<TemplateItem>,
    /// Responsibility line items.
    #[serde(default)]
    pub responsibilities: Vec<ResponsibilityItem>,
    /// Company value line items.
    #[serde(default)]
    pub values: Vec<TemplateItem>,
}

impl JobTemplate {
    /// Returns the `(item_id, weight)` pairs for a section.
    pub fn items_for(&self, section: SectionKind) -> Vec<(&str, Decimal)> {
        match section {
            SectionKind::Kpis => item_pairs(&self.kpis),
            SectionKind::Competencies => item_pairs(&self.competencies),
            SectionKind::Values => item_pairs(&self.values),
            SectionKind::Responsibilities => self
                .responsibilities
                .iter()
                .map(|r| (r.id.as_str(), r.weight))
                .collect(),
        }
    }

    /// Returns true if the section contains an item with the given id.
    pub fn contains_item(&self, section: SectionKind, item_id: &str) -> bool {
        self.items_for(section).iter().any(|(id, _)| *id == item_id)
    }

    /// Total number of line items across all sections.
    pub fn item_count(&self) -> usize {
        SectionKind::ALL
            .iter()
            .map(|s| self.items_for(*s).len())
            .sum()
    }

    /// Validates the template's weight invariants.
    ///
    /// Section weights must sum to 100. Item weights within each non-empty
    /// section must sum to 100. A section with no items must carry a weight
    /// of zero.
    pub fn validate(&self) -> EngineResult<()> {
        let total = self.section_weights.total();
        if total != Decimal::ONE_HUNDRED {
            return Err(EngineError::InvalidWeights {
                scope: format!("template '{}' section weights", self.id),
                actual: total.to_string(),
                expected: Decimal::ONE_HUNDRED.to_string(),
            });
        }

        for section in SectionKind::ALL {
            let items = self.items_for(section);
            let weight = self.section_weights.weight_for(section);

            if items.is_empty() {
                if weight != Decimal::ZERO {
                    return Err(EngineError::InvalidWeights {
                        scope: format!(
                            "template '{}' {} section (no items)",
                            self.id, section
                        ),
                        actual: weight.to_string(),
                        expected: Decimal::ZERO.to_string(),
                    });
                }
                continue;
            }

            let item_total: Decimal = items.iter().map(|(_, w)| *w).sum();
            if item_total != Decimal::ONE_HUNDRED {
                return Err(EngineError::InvalidWeights {
                    scope: format!("template '{}' {} section", self.id, section),
                    actual: item_total.to_string(),
                    expected: Decimal::ONE_HUNDRED.to_string(),
                });
            }
        }

        Ok(())
    }
}

fn item_pairs(items: &[TemplateItem]) -> Vec<(&str, Decimal)> {
    items
        .iter()
        .map(|i| (i.item_id.as_str(), i.weight))
        .collect()
}
