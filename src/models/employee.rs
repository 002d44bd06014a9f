use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::department::Department;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Employee {
    pub id: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub birth_place: String,
    pub date_of_birth: NaiveDate,
    pub title: String,
    /// Non-owning relation: holds only the id until enrichment replaces
    /// it with the fully loaded record.
    pub department: Department,
    pub created_time: DateTime<Utc>,
    pub updated_time: DateTime<Utc>,
}

#[derive(Deserialize, Validate, Debug, Clone)]
pub struct NewEmployee {
    pub id: Option<String>,
    #[validate(length(min = 1, max = 64))]
    pub first_name: String,
    pub last_name: Option<String>,
    #[serde(default)]
    pub birth_place: String,
    pub date_of_birth: NaiveDate,
    #[serde(default)]
    pub title: String,
    #[validate(length(min = 1))]
    pub department_id: String,
}

#[derive(Deserialize, Validate, Debug, Clone)]
pub struct UpdateEmployee {
    #[validate(length(min = 1, max = 64))]
    pub first_name: String,
    pub last_name: Option<String>,
    #[serde(default)]
    pub birth_place: String,
    pub date_of_birth: NaiveDate,
    #[serde(default)]
    pub title: String,
    #[validate(length(min = 1))]
    pub department_id: String,
}

/// Query filter for employee fetch, same mode rules as the department
/// filter. Keyword matches against `first_name`.
#[derive(Debug, Clone, Default)]
pub struct EmployeeFilter {
    pub ids: Vec<String>,
    pub keyword: String,
    pub num: i64,
    pub cursor: String,
}
