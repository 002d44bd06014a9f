use std::sync::Arc;

use crate::errors::AppError;
use crate::models::department::{Department, DepartmentFilter, NewDepartment, UpdateDepartment};
use crate::models::Page;
use crate::repository::{DepartmentRepository, EmployeeRepository};

/// Department use cases. Mostly thin delegation to the repository; the
/// delete path additionally refuses to remove a department that still
/// has employees referencing it.
#[derive(Clone)]
pub struct DepartmentService {
    repo: Arc<dyn DepartmentRepository>,
    employee_repo: Arc<dyn EmployeeRepository>,
}

impl DepartmentService {
    pub fn new(
        repo: Arc<dyn DepartmentRepository>,
        employee_repo: Arc<dyn EmployeeRepository>,
    ) -> Self {
        Self {
            repo,
            employee_repo,
        }
    }

    pub async fn create(&self, new: NewDepartment) -> Result<Department, AppError> {
        self.repo.create(new).await
    }

    pub async fn fetch(&self, filter: DepartmentFilter) -> Result<Page<Department>, AppError> {
        self.repo.fetch(filter).await
    }

    pub async fn get(&self, id: &str) -> Result<Department, AppError> {
        self.repo.get(id).await
    }

    pub async fn update(&self, id: &str, update: UpdateDepartment) -> Result<Department, AppError> {
        self.repo.update(id, update).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let occupants = self.employee_repo.count_by_department(id).await?;
        if occupants > 0 {
            return Err(AppError::Conflict(
                "department still contains employees".to_string(),
            ));
        }
        self.repo.delete(id).await
    }
}
