//! Configuration loading functionality.
//!
//! This module provides the [`CatalogLoader`] type for loading the HR
//! catalogs from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::{Competency, EvaluationPeriod, JobTemplate};

use super::types::{
    CompanyMetadata, CompetenciesConfig, DepartmentsConfig, EmployeesConfig, HrConfig,
    KpisConfig, PeriodsConfig, ScoringConfig, ValuesConfig,
};

/// Loads and provides access to the HR catalog configuration.
///
/// The `CatalogLoader` reads YAML configuration files from a directory
/// and provides methods to query templates, competencies, and periods.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/hr/
/// ├── company.yaml       # Company metadata
/// ├── departments.yaml
/// ├── competencies.yaml  # Categories + competencies
/// ├── kpis.yaml
/// ├── values.yaml
/// ├── periods.yaml
/// ├── employees.yaml     # Seed employee directory
/// ├── scoring.yaml       # Rating scale and final blend weights
/// └── templates/
///     └── software_engineer.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use evaluation_engine::config::CatalogLoader;
///
/// let loader = CatalogLoader::load("./config/hr").unwrap();
///
/// let template = loader.get_template("software_engineer").unwrap();
/// println!("Template: {}", template.title);
/// ```
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    config: HrConfig,
}

impl CatalogLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g. "./config/hr")
    ///
    /// # Returns
    ///
    /// Returns a `CatalogLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any job template violates the weight invariants
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<CompanyMetadata>(&path.join("company.yaml"))?;
        let departments =
            Self::load_yaml::<DepartmentsConfig>(&path.join("departments.yaml"))?;
        let competencies =
            Self::load_yaml::<CompetenciesConfig>(&path.join("competencies.yaml"))?;
        let kpis = Self::load_yaml::<KpisConfig>(&path.join("kpis.yaml"))?;
        let values = Self::load_yaml::<ValuesConfig>(&path.join("values.yaml"))?;
        let periods = Self::load_yaml::<PeriodsConfig>(&path.join("periods.yaml"))?;
        let employees = Self::load_yaml::<EmployeesConfig>(&path.join("employees.yaml"))?;
        let scoring = Self::load_yaml::<ScoringConfig>(&path.join("scoring.yaml"))?;
        scoring.final_blend.validate()?;

        let templates = Self::load_templates(&path.join("templates"))?;

        let config = HrConfig::new(
            metadata,
            departments.departments,
            competencies.categories,
            competencies.competencies,
            kpis.kpis,
            values.values,
            periods.periods,
            employees.employees,
            templates,
            scoring,
        );

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all template files from the templates directory.
    fn load_templates(templates_dir: &Path) -> EngineResult<Vec<JobTemplate>> {
        let templates_dir_str = templates_dir.display().to_string();

        if !templates_dir.exists() {
            return Err(EngineError::ConfigNotFound {
                path: templates_dir_str,
            });
        }

        let entries = fs::read_dir(templates_dir).map_err(|_| EngineError::ConfigNotFound {
            path: templates_dir_str.clone(),
        })?;

        let mut templates = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: templates_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let template = Self::load_yaml::<JobTemplate>(&path)?;
                template.validate()?;
                templates.push(template);
            }
        }

        if templates.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no template files found)", templates_dir_str),
            });
        }

        Ok(templates)
    }

    /// Returns the underlying catalog configuration.
    pub fn config(&self) -> &HrConfig {
        &self.config
    }

    /// Returns the company metadata.
    pub fn company(&self) -> &CompanyMetadata {
        self.config.company()
    }

    /// Gets a job template by its id.
    pub fn get_template(&self, id: &str) -> EngineResult<&JobTemplate> {
        self.config
            .templates()
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| EngineError::TemplateNotFound { id: id.to_string() })
    }

    /// Gets a competency by its id.
    pub fn get_competency(&self, id: &str) -> EngineResult<&Competency> {
        self.config
            .competencies()
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| EngineError::CatalogItemNotFound {
                kind: "Competency",
                id: id.to_string(),
            })
    }

    /// Gets an evaluation period by its id.
    pub fn get_period(&self, id: &str) -> EngineResult<&EvaluationPeriod> {
        self.config
            .periods()
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| EngineError::PeriodNotFound { id: id.to_string() })
    }
}
