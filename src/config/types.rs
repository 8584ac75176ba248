//! Configuration types for the evaluation engine.
//!
//! This module contains the strongly-typed structures that are
//! deserialized from the YAML catalog files, plus the aggregated
//! [`HrConfig`] the loader assembles from them.

use serde::Deserialize;

use crate::models::{
    CompanyKpi, CompanyValue, Competency, CompetencyCategory, Department, Employee,
    EvaluationPeriod, JobTemplate,
};
use crate::scoring::{FinalBlend, RatingScale};

/// Metadata about the company, from `company.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyMetadata {
    /// The company name.
    pub name: String,
    /// How often review cycles run (e.g. "semi-annual").
    pub review_cadence: String,
    /// The version of the catalog configuration.
    pub version: String,
}

/// Departments configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct DepartmentsConfig {
    /// All departments.
    pub departments: Vec<Department>,
}

/// Competencies configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct CompetenciesConfig {
    /// Competency categories.
    pub categories: Vec<CompetencyCategory>,
    /// All competencies.
    pub competencies: Vec<Competency>,
}

/// KPIs configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct KpisConfig {
    /// All company KPIs.
    pub kpis: Vec<CompanyKpi>,
}

/// Company values configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ValuesConfig {
    /// All company values.
    pub values: Vec<CompanyValue>,
}

/// Evaluation periods configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct PeriodsConfig {
    /// All evaluation periods.
    pub periods: Vec<EvaluationPeriod>,
}

/// Employee directory configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeesConfig {
    /// All employees.
    pub employees: Vec<Employee>,
}

/// Scoring configuration from `scoring.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    /// The rating scale every rating must fall within.
    pub rating_scale: RatingScale,
    /// The weights blending self and manager overall scores.
    pub final_blend: FinalBlend,
}

/// The complete catalog configuration loaded from YAML files.
///
/// This struct aggregates all configuration loaded from the files in a
/// catalog configuration directory.
#[derive(Debug, Clone)]
pub struct HrConfig {
    /// Company metadata.
    metadata: CompanyMetadata,
    /// All departments.
    departments: Vec<Department>,
    /// Competency categories.
    categories: Vec<CompetencyCategory>,
    /// All competencies.
    competencies: Vec<Competency>,
    /// All company KPIs.
    kpis: Vec<CompanyKpi>,
    /// All company values.
    values: Vec<CompanyValue>,
    /// All evaluation periods.
    periods: Vec<EvaluationPeriod>,
    /// Seed employee directory.
    employees: Vec<Employee>,
    /// Job templates by id (sorted by id).
    templates: Vec<JobTemplate>,
    /// Scoring configuration.
    scoring: ScoringConfig,
}

impl HrConfig {
    /// Creates a new HrConfig from its component parts.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        metadata: CompanyMetadata,
        departments: Vec<Department>,
        categories: Vec<CompetencyCategory>,
        competencies: Vec<Competency>,
        kpis: Vec<CompanyKpi>,
        values: Vec<CompanyValue>,
        periods: Vec<EvaluationPeriod>,
        employees: Vec<Employee>,
        templates: Vec<JobTemplate>,
        scoring: ScoringConfig,
    ) -> Self {
        let mut sorted_templates = templates;
        sorted_templates.sort_by(|a, b| a.id.cmp(&b.id));
        Self {
            metadata,
            departments,
            categories,
            competencies,
            kpis,
            values,
            periods,
            employees,
            templates: sorted_templates,
            scoring,
        }
    }

    /// Returns the company metadata.
    pub fn company(&self) -> &CompanyMetadata {
        &self.metadata
    }

    /// Returns all departments.
    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    /// Returns all competency categories.
    pub fn categories(&self) -> &[CompetencyCategory] {
        &self.categories
    }

    /// Returns all competencies.
    pub fn competencies(&self) -> &[Competency] {
        &self.competencies
    }

    /// Returns all company KPIs.
    pub fn kpis(&self) -> &[CompanyKpi] {
        &self.kpis
    }

    /// Returns all company values.
    pub fn values(&self) -> &[CompanyValue] {
        &self.values
    }

    /// Returns all evaluation periods.
    pub fn periods(&self) -> &[EvaluationPeriod] {
        &self.periods
    }

    /// Returns the seed employee directory.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Returns all job templates.
    pub fn templates(&self) -> &[JobTemplate] {
        &self.templates
    }

    /// Returns the scoring configuration.
    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }
}
