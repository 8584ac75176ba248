//! In-process entity store.
//!
//! Per-entity maps behind `tokio::sync::RwLock`, seeded from the YAML
//! catalogs at startup. The original system kept these tables in a
//! relational database behind routine CRUD; nothing here needs more
//! coordination than last-write-wins under a per-map lock.

use std::collections::HashMap;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::{CatalogLoader, ScoringConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    CompanyKpi, CompanyValue, Competency, CompetencyCategory, Department, Employee, Evaluation,
    EvaluationType, EvidenceEntry, EvaluationPeriod, JobTemplate, ReviewCycle, SectionKind,
};

/// Shared entity store for all request handlers.
pub struct Store {
    employees: RwLock<HashMap<String, Employee>>,
    departments: RwLock<HashMap<String, Department>>,
    categories: RwLock<HashMap<String, CompetencyCategory>>,
    competencies: RwLock<HashMap<String, Competency>>,
    kpis: RwLock<HashMap<String, CompanyKpi>>,
    values: RwLock<HashMap<String, CompanyValue>>,
    templates: RwLock<HashMap<String, JobTemplate>>,
    periods: RwLock<HashMap<String, EvaluationPeriod>>,
    cycles: RwLock<HashMap<Uuid, ReviewCycle>>,
    evaluations: RwLock<HashMap<Uuid, Evaluation>>,
    evidence: RwLock<Vec<EvidenceEntry>>,
    scoring: ScoringConfig,
}

fn keyed<T, F: Fn(&T) -> String>(items: &[T], key: F) -> HashMap<String, T>
where
    T: Clone,
{
    items.iter().map(|i| (key(i), i.clone())).collect()
}

impl Store {
    /// Builds a store seeded from a loaded catalog.
    pub fn from_catalog(loader: &CatalogLoader) -> Self {
        let config = loader.config();
        Self {
            employees: RwLock::new(keyed(config.employees(), |e| e.id.clone())),
            departments: RwLock::new(keyed(config.departments(), |d| d.id.clone())),
            categories: RwLock::new(keyed(config.categories(), |c| c.id.clone())),
            competencies: RwLock::new(keyed(config.competencies(), |c| c.id.clone())),
            kpis: RwLock::new(keyed(config.kpis(), |k| k.id.clone())),
            values: RwLock::new(keyed(config.values(), |v| v.id.clone())),
            templates: RwLock::new(keyed(config.templates(), |t| t.id.clone())),
            periods: RwLock::new(keyed(config.periods(), |p| p.id.clone())),
            cycles: RwLock::new(HashMap::new()),
            evaluations: RwLock::new(HashMap::new()),
            evidence: RwLock::new(Vec::new()),
            scoring: loader.config().scoring().clone(),
        }
    }

    /// The scoring configuration the store was seeded with.
    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    // ---- employees ----------------------------------------------------

    /// Lists all employees, sorted by id.
    pub async fn list_employees(&self) -> Vec<Employee> {
        sorted_by_id(self.employees.read().await.values().cloned(), |e| {
            e.id.clone()
        })
    }

    /// Gets an employee by id.
    pub async fn get_employee(&self, id: &str) -> EngineResult<Employee> {
        self.employees
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| EngineError::EmployeeNotFound { id: id.to_string() })
    }

    /// Creates an employee after checking its references.
    pub async fn create_employee(&self, employee: Employee) -> EngineResult<Employee> {
        self.check_employee_refs(&employee).await?;
        let mut employees = self.employees.write().await;
        if employees.contains_key(&employee.id) {
            return Err(EngineError::DuplicateId {
                kind: "Employee",
                id: employee.id,
            });
        }
        employees.insert(employee.id.clone(), employee.clone());
        Ok(employee)
    }

    /// Replaces an existing employee record.
    pub async fn update_employee(&self, employee: Employee) -> EngineResult<Employee> {
        self.check_employee_refs(&employee).await?;
        let mut employees = self.employees.write().await;
        if !employees.contains_key(&employee.id) {
            return Err(EngineError::EmployeeNotFound { id: employee.id });
        }
        employees.insert(employee.id.clone(), employee.clone());
        Ok(employee)
    }

    /// Deletes an employee unless they still manage someone.
    pub async fn delete_employee(&self, id: &str) -> EngineResult<()> {
        let mut employees = self.employees.write().await;
        if !employees.contains_key(id) {
            return Err(EngineError::EmployeeNotFound { id: id.to_string() });
        }
        if let Some(report) = employees
            .values()
            .find(|e| e.manager_id.as_deref() == Some(id))
        {
            return Err(EngineError::CatalogItemInUse {
                kind: "Employee",
                id: id.to_string(),
                referenced_by: report.id.clone(),
            });
        }
        employees.remove(id);
        Ok(())
    }

    async fn check_employee_refs(&self, employee: &Employee) -> EngineResult<()> {
        if !self
            .departments
            .read()
            .await
            .contains_key(&employee.department_id)
        {
            return Err(EngineError::CatalogItemNotFound {
                kind: "Department",
                id: employee.department_id.clone(),
            });
        }
        if let Some(template_id) = &employee.job_template_id {
            if !self.templates.read().await.contains_key(template_id) {
                return Err(EngineError::TemplateNotFound {
                    id: template_id.clone(),
                });
            }
        }
        if let Some(manager_id) = &employee.manager_id {
            if !self.employees.read().await.contains_key(manager_id) {
                return Err(EngineError::EmployeeNotFound {
                    id: manager_id.clone(),
                });
            }
        }
        Ok(())
    }

    // ---- catalogs -----------------------------------------------------

    /// Lists all departments, sorted by id.
    pub async fn list_departments(&self) -> Vec<Department> {
        sorted_by_id(self.departments.read().await.values().cloned(), |d| {
            d.id.clone()
        })
    }

    /// Gets a department by id.
    pub async fn get_department(&self, id: &str) -> EngineResult<Department> {
        self.departments.read().await.get(id).cloned().ok_or_else(|| {
            EngineError::CatalogItemNotFound {
                kind: "Department",
                id: id.to_string(),
            }
        })
    }

    /// Creates a department.
    pub async fn create_department(&self, department: Department) -> EngineResult<Department> {
        let mut departments = self.departments.write().await;
        if departments.contains_key(&department.id) {
            return Err(EngineError::DuplicateId {
                kind: "Department",
                id: department.id,
            });
        }
        departments.insert(department.id.clone(), department.clone());
        Ok(department)
    }

    /// Replaces an existing department.
    pub async fn update_department(&self, department: Department) -> EngineResult<Department> {
        let mut departments = self.departments.write().await;
        if !departments.contains_key(&department.id) {
            return Err(EngineError::CatalogItemNotFound {
                kind: "Department",
                id: department.id,
            });
        }
        departments.insert(department.id.clone(), department.clone());
        Ok(department)
    }

    /// Deletes a department unless an employee still belongs to it.
    pub async fn delete_department(&self, id: &str) -> EngineResult<()> {
        if let Some(employee) = self
            .employees
            .read()
            .await
            .values()
            .find(|e| e.department_id == id)
        {
            return Err(EngineError::CatalogItemInUse {
                kind: "Department",
                id: id.to_string(),
                referenced_by: employee.id.clone(),
            });
        }
        let mut departments = self.departments.write().await;
        departments
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| EngineError::CatalogItemNotFound {
                kind: "Department",
                id: id.to_string(),
            })
    }

    /// Lists all competency categories, sorted by id.
    pub async fn list_categories(&self) -> Vec<CompetencyCategory> {
        sorted_by_id(self.categories.read().await.values().cloned(), |c| {
            c.id.clone()
        })
    }

    /// Creates a competency category.
    pub async fn create_category(
        &self,
        category: CompetencyCategory,
    ) -> EngineResult<CompetencyCategory> {
        let mut categories = self.categories.write().await;
        if categories.contains_key(&category.id) {
            return Err(EngineError::DuplicateId {
                kind: "CompetencyCategory",
                id: category.id,
            });
        }
        categories.insert(category.id.clone(), category.clone());
        Ok(category)
    }

    /// Lists all competencies, sorted by id.
    pub async fn list_competencies(&self) -> Vec<Competency> {
        sorted_by_id(self.competencies.read().await.values().cloned(), |c| {
            c.id.clone()
        })
    }

    /// Gets a competency by id.
    pub async fn get_competency(&self, id: &str) -> EngineResult<Competency> {
        self.competencies.read().await.get(id).cloned().ok_or_else(|| {
            EngineError::CatalogItemNotFound {
                kind: "Competency",
                id: id.to_string(),
            }
        })
    }

    /// Creates a competency; its category must exist.
    pub async fn create_competency(&self, competency: Competency) -> EngineResult<Competency> {
        if !self
            .categories
            .read()
            .await
            .contains_key(&competency.category_id)
        {
            return Err(EngineError::CatalogItemNotFound {
                kind: "CompetencyCategory",
                id: competency.category_id,
            });
        }
        let mut competencies = self.competencies.write().await;
        if competencies.contains_key(&competency.id) {
            return Err(EngineError::DuplicateId {
                kind: "Competency",
                id: competency.id,
            });
        }
        competencies.insert(competency.id.clone(), competency.clone());
        Ok(competency)
    }

    /// Replaces an existing competency.
    pub async fn update_competency(&self, competency: Competency) -> EngineResult<Competency> {
        if !self
            .categories
            .read()
            .await
            .contains_key(&competency.category_id)
        {
            return Err(EngineError::CatalogItemNotFound {
                kind: "CompetencyCategory",
                id: competency.category_id,
            });
        }
        let mut competencies = self.competencies.write().await;
        if !competencies.contains_key(&competency.id) {
            return Err(EngineError::CatalogItemNotFound {
                kind: "Competency",
                id: competency.id,
            });
        }
        competencies.insert(competency.id.clone(), competency.clone());
        Ok(competency)
    }

    /// Deletes a competency unless a template still references it.
    pub async fn delete_competency(&self, id: &str) -> EngineResult<()> {
        self.ensure_unreferenced(SectionKind::Competencies, "Competency", id)
            .await?;
        let mut competencies = self.competencies.write().await;
        competencies
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| EngineError::CatalogItemNotFound {
                kind: "Competency",
                id: id.to_string(),
            })
    }

    /// Lists all KPIs, sorted by id.
    pub async fn list_kpis(&self) -> Vec<CompanyKpi> {
        sorted_by_id(self.kpis.read().await.values().cloned(), |k| k.id.clone())
    }

    /// Gets a KPI by id.
    pub async fn get_kpi(&self, id: &str) -> EngineResult<CompanyKpi> {
        self.kpis.read().await.get(id).cloned().ok_or_else(|| {
            EngineError::CatalogItemNotFound {
                kind: "KPI",
                id: id.to_string(),
            }
        })
    }

    /// Creates a KPI.
    pub async fn create_kpi(&self, kpi: CompanyKpi) -> EngineResult<CompanyKpi> {
        let mut kpis = self.kpis.write().await;
        if kpis.contains_key(&kpi.id) {
            return Err(EngineError::DuplicateId {
                kind: "KPI",
                id: kpi.id,
            });
        }
        kpis.insert(kpi.id.clone(), kpi.clone());
        Ok(kpi)
    }

    /// Replaces an existing KPI.
    pub async fn update_kpi(&self, kpi: CompanyKpi) -> EngineResult<CompanyKpi> {
        let mut kpis = self.kpis.write().await;
        if !kpis.contains_key(&kpi.id) {
            return Err(EngineError::CatalogItemNotFound {
                kind: "KPI",
                id: kpi.id,
            });
        }
        kpis.insert(kpi.id.clone(), kpi.clone());
        Ok(kpi)
    }

    /// Deletes a KPI unless a template still references it.
    pub async fn delete_kpi(&self, id: &str) -> EngineResult<()> {
        self.ensure_unreferenced(SectionKind::Kpis, "KPI", id).await?;
        let mut kpis = self.kpis.write().await;
        kpis.remove(id)
            .map(|_| ())
            .ok_or_else(|| EngineError::CatalogItemNotFound {
                kind: "KPI",
                id: id.to_string(),
            })
    }

    /// Inserts or replaces KPIs in bulk (CSV import). Returns how many
    /// records were inserted vs. updated.
    pub async fn upsert_kpis(&self, records: Vec<CompanyKpi>) -> (usize, usize) {
        let mut kpis = self.kpis.write().await;
        let mut inserted = 0;
        let mut updated = 0;
        for kpi in records {
            if kpis.insert(kpi.id.clone(), kpi).is_some() {
                updated += 1;
            } else {
                inserted += 1;
            }
        }
        (inserted, updated)
    }

    /// Lists all company values, sorted by id.
    pub async fn list_values(&self) -> Vec<CompanyValue> {
        sorted_by_id(self.values.read().await.values().cloned(), |v| v.id.clone())
    }

    /// Gets a company value by id.
    pub async fn get_value(&self, id: &str) -> EngineResult<CompanyValue> {
        self.values.read().await.get(id).cloned().ok_or_else(|| {
            EngineError::CatalogItemNotFound {
                kind: "CompanyValue",
                id: id.to_string(),
            }
        })
    }

    /// Creates a company value.
    pub async fn create_value(&self, value: CompanyValue) -> EngineResult<CompanyValue> {
        let mut values = self.values.write().await;
        if values.contains_key(&value.id) {
            return Err(EngineError::DuplicateId {
                kind: "CompanyValue",
                id: value.id,
            });
        }
        values.insert(value.id.clone(), value.clone());
        Ok(value)
    }

    /// Replaces an existing company value.
    pub async fn update_value(&self, value: CompanyValue) -> EngineResult<CompanyValue> {
        let mut values = self.values.write().await;
        if !values.contains_key(&value.id) {
            return Err(EngineError::CatalogItemNotFound {
                kind: "CompanyValue",
                id: value.id,
            });
        }
        values.insert(value.id.clone(), value.clone());
        Ok(value)
    }

    /// Deletes a company value unless a template still references it.
    pub async fn delete_value(&self, id: &str) -> EngineResult<()> {
        self.ensure_unreferenced(SectionKind::Values, "CompanyValue", id)
            .await?;
        let mut values = self.values.write().await;
        values
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| EngineError::CatalogItemNotFound {
                kind: "CompanyValue",
                id: id.to_string(),
            })
    }

    /// Inserts or replaces company values in bulk (CSV import).
    pub async fn upsert_values(&self, records: Vec<CompanyValue>) -> (usize, usize) {
        let mut values = self.values.write().await;
        let mut inserted = 0;
        let mut updated = 0;
        for value in records {
            if values.insert(value.id.clone(), value).is_some() {
                updated += 1;
            } else {
                inserted += 1;
            }
        }
        (inserted, updated)
    }

    async fn ensure_unreferenced(
        &self,
        section: SectionKind,
        kind: &'static str,
        id: &str,
    ) -> EngineResult<()> {
        if let Some(template) = self
            .templates
            .read()
            .await
            .values()
            .find(|t| t.contains_item(section, id))
        {
            return Err(EngineError::CatalogItemInUse {
                kind,
                id: id.to_string(),
                referenced_by: template.id.clone(),
            });
        }
        Ok(())
    }

    // ---- job templates ------------------------------------------------

    /// Lists all job templates, sorted by id.
    pub async fn list_templates(&self) -> Vec<JobTemplate> {
        sorted_by_id(self.templates.read().await.values().cloned(), |t| {
            t.id.clone()
        })
    }

    /// Gets a job template by id.
    pub async fn get_template(&self, id: &str) -> EngineResult<JobTemplate> {
        self.templates
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| EngineError::TemplateNotFound { id: id.to_string() })
    }

    /// Creates a job template after validating weights and catalog
    /// references.
    pub async fn create_template(&self, template: JobTemplate) -> EngineResult<JobTemplate> {
        template.validate()?;
        self.check_template_refs(&template).await?;
        let mut templates = self.templates.write().await;
        if templates.contains_key(&template.id) {
            return Err(EngineError::DuplicateId {
                kind: "JobTemplate",
                id: template.id,
            });
        }
        templates.insert(template.id.clone(), template.clone());
        Ok(template)
    }

    /// Replaces an existing job template.
    pub async fn update_template(&self, template: JobTemplate) -> EngineResult<JobTemplate> {
        template.validate()?;
        self.check_template_refs(&template).await?;
        let mut templates = self.templates.write().await;
        if !templates.contains_key(&template.id) {
            return Err(EngineError::TemplateNotFound { id: template.id });
        }
        templates.insert(template.id.clone(), template.clone());
        Ok(template)
    }

    /// Deletes a job template unless an employee is still assigned to it.
    pub async fn delete_template(&self, id: &str) -> EngineResult<()> {
        if let Some(employee) = self
            .employees
            .read()
            .await
            .values()
            .find(|e| e.job_template_id.as_deref() == Some(id))
        {
            return Err(EngineError::CatalogItemInUse {
                kind: "JobTemplate",
                id: id.to_string(),
                referenced_by: employee.id.clone(),
            });
        }
        let mut templates = self.templates.write().await;
        templates
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| EngineError::TemplateNotFound { id: id.to_string() })
    }

    async fn check_template_refs(&self, template: &JobTemplate) -> EngineResult<()> {
        let kpis = self.kpis.read().await;
        for item in &template.kpis {
            if !kpis.contains_key(&item.item_id) {
                return Err(EngineError::CatalogItemNotFound {
                    kind: "KPI",
                    id: item.item_id.clone(),
                });
            }
        }
        drop(kpis);

        let competencies = self.competencies.read().await;
        for item in &template.competencies {
            if !competencies.contains_key(&item.item_id) {
                return Err(EngineError::CatalogItemNotFound {
                    kind: "Competency",
                    id: item.item_id.clone(),
                });
            }
        }
        drop(competencies);

        let values = self.values.read().await;
        for item in &template.values {
            if !values.contains_key(&item.item_id) {
                return Err(EngineError::CatalogItemNotFound {
                    kind: "CompanyValue",
                    id: item.item_id.clone(),
                });
            }
        }
        Ok(())
    }

    // ---- evaluation periods -------------------------------------------

    /// Lists all evaluation periods, sorted by id.
    pub async fn list_periods(&self) -> Vec<EvaluationPeriod> {
        sorted_by_id(self.periods.read().await.values().cloned(), |p| {
            p.id.clone()
        })
    }

    /// Gets an evaluation period by id.
    pub async fn get_period(&self, id: &str) -> EngineResult<EvaluationPeriod> {
        self.periods
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| EngineError::PeriodNotFound { id: id.to_string() })
    }

    /// Creates an evaluation period.
    pub async fn create_period(&self, period: EvaluationPeriod) -> EngineResult<EvaluationPeriod> {
        if !period.is_valid() {
            return Err(EngineError::ValidationError {
                field: "period dates".to_string(),
                message: format!(
                    "start_date {} is after end_date {}",
                    period.start_date, period.end_date
                ),
            });
        }
        let mut periods = self.periods.write().await;
        if periods.contains_key(&period.id) {
            return Err(EngineError::DuplicateId {
                kind: "EvaluationPeriod",
                id: period.id,
            });
        }
        periods.insert(period.id.clone(), period.clone());
        Ok(period)
    }

    // ---- review cycles and evaluations --------------------------------

    /// Starts a review cycle: creates the cycle and its draft
    /// self-evaluation.
    ///
    /// Rejected when a cycle already exists for the (employee, period)
    /// pair or when the employee has no job template assigned.
    pub async fn start_cycle(
        &self,
        employee_id: &str,
        period_id: &str,
    ) -> EngineResult<(ReviewCycle, Evaluation)> {
        let employee = self.get_employee(employee_id).await?;
        let period = self.get_period(period_id).await?;
        let template_id =
            employee
                .job_template_id
                .clone()
                .ok_or_else(|| EngineError::ValidationError {
                    field: "job_template_id".to_string(),
                    message: format!("employee '{}' has no job template assigned", employee.id),
                })?;
        // the template must still exist
        let _ = self.get_template(&template_id).await?;

        let mut cycles = self.cycles.write().await;
        if let Some(existing) = cycles
            .values()
            .find(|c| c.employee_id == employee_id && c.period_id == period.id)
        {
            return Err(EngineError::DuplicateId {
                kind: "ReviewCycle",
                id: existing.id.to_string(),
            });
        }

        let self_eval = Evaluation::new_draft(
            Uuid::nil(), // patched below once the cycle id exists
            employee_id,
            &period.id,
            &template_id,
            EvaluationType::SelfReview,
        );
        let cycle = ReviewCycle::new(employee_id, &period.id, &template_id, self_eval.id);
        let mut self_eval = self_eval;
        self_eval.cycle_id = cycle.id;

        cycles.insert(cycle.id, cycle.clone());
        self.evaluations
            .write()
            .await
            .insert(self_eval.id, self_eval.clone());
        Ok((cycle, self_eval))
    }

    /// Lists all review cycles, newest first.
    pub async fn list_cycles(&self) -> Vec<ReviewCycle> {
        let mut cycles: Vec<ReviewCycle> = self.cycles.read().await.values().cloned().collect();
        cycles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        cycles
    }

    /// Gets a review cycle by id.
    pub async fn get_cycle(&self, id: Uuid) -> EngineResult<ReviewCycle> {
        self.cycles
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| EngineError::EvaluationNotFound { id: id.to_string() })
    }

    /// Writes back a review cycle.
    pub async fn put_cycle(&self, cycle: ReviewCycle) {
        self.cycles.write().await.insert(cycle.id, cycle);
    }

    /// Gets an evaluation by id.
    pub async fn get_evaluation(&self, id: Uuid) -> EngineResult<Evaluation> {
        self.evaluations
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| EngineError::EvaluationNotFound { id: id.to_string() })
    }

    /// Writes back an evaluation.
    pub async fn put_evaluation(&self, evaluation: Evaluation) {
        self.evaluations
            .write()
            .await
            .insert(evaluation.id, evaluation);
    }

    // ---- evidence journal ---------------------------------------------

    /// Appends an evidence journal entry.
    pub async fn add_evidence(&self, entry: EvidenceEntry) -> EngineResult<EvidenceEntry> {
        if !entry.has_valid_stars() {
            return Err(EngineError::InvalidRating {
                item_id: entry.item_id.clone(),
                rating: entry.stars.to_string(),
                min: crate::models::MIN_STARS.to_string(),
                max: crate::models::MAX_STARS.to_string(),
            });
        }
        let _ = self.get_employee(&entry.employee_id).await?;
        self.evidence.write().await.push(entry.clone());
        Ok(entry)
    }

    /// All evidence entries about an employee, oldest first.
    pub async fn evidence_for(&self, employee_id: &str) -> Vec<EvidenceEntry> {
        let mut entries: Vec<EvidenceEntry> = self
            .evidence
            .read()
            .await
            .iter()
            .filter(|e| e.employee_id == employee_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| a.recorded_on.cmp(&b.recorded_on));
        entries
    }
}

fn sorted_by_id<T, F: Fn(&T) -> String>(items: impl Iterator<Item = T>, key: F) -> Vec<T> {
    let mut items: Vec<T> = items.collect();
    items.sort_by_key(key);
    items
}
