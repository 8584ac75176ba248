//! Employee model and related types.
//!
//! This module defines the Employee struct and EmployeeRole enum
//! for representing the people in the evaluation system.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Represents the role an employee holds in the evaluation workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeRole {
    /// Full administrative access to catalogs and all cycles.
    Admin,
    /// Reviews the evaluations of direct reports.
    Manager,
    /// Regular employee; writes self-evaluations only.
    Staff,
}

/// Represents an employee subject to performance evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// The employee's display name.
    pub name: String,
    /// The employee's work email address.
    pub email: String,
    /// The role this employee holds.
    pub role: EmployeeRole,
    /// The department the employee belongs to.
    pub department_id: String,
    /// The job template that drives this employee's evaluation criteria.
    pub job_template_id: Option<String>,
    /// The id of the employee's manager, if any.
    pub manager_id: Option<String>,
    /// The date the employee started employment.
    pub hire_date: NaiveDate,
    /// Whether the employee is currently active.
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Employee {
    /// Returns true if the employee has administrative access.
    ///
    /// # Examples
    ///
    /// ```
    /// use evaluation_engine::models::{Employee, EmployeeRole};
    /// use chrono::NaiveDate;
    ///
    /// let admin = Employee {
    ///     id: "emp_001".to_string(),
    ///     name: "Dana Reyes".to_string(),
    ///     email: "dana@example.com".to_string(),
    ///     role: EmployeeRole::Admin,
    ///     department_id: "people_ops".to_string(),
    ///     job_template_id: None,
    ///     manager_id: None,
    ///     hire_date: NaiveDate::from_ymd_opt(2021, 3, 1).unwrap(),
    ///     active: true,
    /// };
    /// assert!(admin.is_admin());
    /// ```
    pub fn is_admin(&self) -> bool {
        self.role == EmployeeRole::Admin
    }

    /// Returns true if this employee manages the given employee.
    pub fn manages(&self, other: &Employee) -> bool {
        other.manager_id.as_deref() == Some(self.id.as_str())
    }
}
