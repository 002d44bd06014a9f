use std::collections::HashMap;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::models::department::{Department, DepartmentFilter, NewDepartment, UpdateDepartment};
use crate::models::employee::{Employee, EmployeeFilter, NewEmployee, UpdateEmployee};
use crate::models::Page;
use crate::utils::cursor;

#[cfg(test)]
pub mod memory;
pub mod postgres;

#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    async fn create(&self, new: NewDepartment) -> Result<Department, AppError>;
    async fn fetch(&self, filter: DepartmentFilter) -> Result<Page<Department>, AppError>;
    async fn get(&self, id: &str) -> Result<Department, AppError>;
    async fn update(&self, id: &str, update: UpdateDepartment) -> Result<Department, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn create(&self, new: NewEmployee) -> Result<Employee, AppError>;
    async fn fetch(&self, filter: EmployeeFilter) -> Result<Page<Employee>, AppError>;
    async fn get(&self, id: &str) -> Result<Employee, AppError>;
    async fn update(&self, id: &str, update: UpdateEmployee) -> Result<Employee, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
    async fn count_by_department(&self, department_id: &str) -> Result<i64, AppError>;
}

/// Next-page token rule shared by every fetch implementation: an empty
/// page hands the caller's cursor back unchanged, a non-empty page
/// points at its last row.
pub(crate) fn next_cursor(last_id: Option<&str>, input_cursor: &str) -> String {
    match last_id {
        Some(id) => cursor::encode(id),
        None => input_cursor.to_string(),
    }
}

/// Reorder rows fetched in ID-set mode to the sequence the caller gave.
/// Ids with no matching row are skipped.
pub(crate) fn order_by_ids<T>(
    items: Vec<T>,
    ids: &[String],
    id_of: impl Fn(&T) -> String,
) -> Vec<T> {
    let mut by_id: HashMap<String, T> = items.into_iter().map(|t| (id_of(&t), t)).collect();
    ids.iter().filter_map(|id| by_id.remove(id)).collect()
}
