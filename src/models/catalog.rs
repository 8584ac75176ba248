//! Catalog models: departments, competencies, KPIs, and company values.
//!
//! Catalog items are the reusable building blocks job templates reference
//! by id. They are seeded from YAML configuration and editable through the
//! admin API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A department employees belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Unique identifier for the department (e.g. "engineering").
    pub id: String,
    /// The human-readable name of the department.
    pub name: String,
}

/// A grouping of related competencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetencyCategory {
    /// Unique identifier for the category (e.g. "leadership").
    pub id: String,
    /// The human-readable name of the category.
    pub name: String,
}

/// A competency employees are evaluated against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competency {
    /// Unique identifier for the competency (e.g. "communication").
    pub id: String,
    /// The human-readable name of the competency.
    pub name: String,
    /// A description of what the competency covers.
    pub description: String,
    /// The category this competency belongs to.
    pub category_id: String,
}

/// A company-wide key performance indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyKpi {
    /// Unique identifier for the KPI (e.g. "revenue_growth").
    pub id: String,
    /// The human-readable name of the KPI.
    pub name: String,
    /// A description of what the KPI measures.
    pub description: String,
    /// The unit the KPI is measured in (e.g. "%", "count").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// The target value for the KPI, if one is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Decimal>,
}

/// A company value employees are evaluated against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyValue {
    /// Unique identifier for the value (e.g. "customer_first").
    pub id: String,
    /// The human-readable name of the value.
    pub name: String,
    /// A description of the behavior the value describes.
    pub description: String,
}
