use std::collections::HashMap;
use std::sync::Arc;

use futures_util::future::try_join_all;

use crate::errors::AppError;
use crate::models::department::Department;
use crate::models::employee::{Employee, EmployeeFilter, NewEmployee, UpdateEmployee};
use crate::models::Page;
use crate::repository::{DepartmentRepository, EmployeeRepository};

/// Employee use cases. Listings and single gets come back with the
/// referenced department resolved to its full record.
#[derive(Clone)]
pub struct EmployeeService {
    employee_repo: Arc<dyn EmployeeRepository>,
    department_repo: Arc<dyn DepartmentRepository>,
}

impl EmployeeService {
    pub fn new(
        employee_repo: Arc<dyn EmployeeRepository>,
        department_repo: Arc<dyn DepartmentRepository>,
    ) -> Self {
        Self {
            employee_repo,
            department_repo,
        }
    }

    pub async fn create(&self, new: NewEmployee) -> Result<Employee, AppError> {
        let mut employee = self.employee_repo.create(new).await?;
        employee.department = self.department_repo.get(&employee.department.id).await?;
        Ok(employee)
    }

    pub async fn fetch(&self, filter: EmployeeFilter) -> Result<Page<Employee>, AppError> {
        let page = self.employee_repo.fetch(filter).await?;
        let items = self.enrich(page.items).await?;
        Ok(Page {
            items,
            next_cursor: page.next_cursor,
        })
    }

    pub async fn get(&self, id: &str) -> Result<Employee, AppError> {
        let mut employee = self.employee_repo.get(id).await?;
        employee.department = self.department_repo.get(&employee.department.id).await?;
        Ok(employee)
    }

    pub async fn update(&self, id: &str, update: UpdateEmployee) -> Result<Employee, AppError> {
        let mut employee = self.employee_repo.update(id, update).await?;
        employee.department = self.department_repo.get(&employee.department.id).await?;
        Ok(employee)
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.employee_repo.delete(id).await
    }

    /// Resolve every referenced department with one concurrent lookup
    /// per distinct id, then merge by id. All-or-nothing: a single
    /// failed lookup fails the whole batch.
    async fn enrich(&self, mut employees: Vec<Employee>) -> Result<Vec<Employee>, AppError> {
        if employees.is_empty() {
            return Ok(employees);
        }

        let mut dept_ids: Vec<String> = employees
            .iter()
            .map(|e| e.department.id.clone())
            .collect();
        dept_ids.sort();
        dept_ids.dedup();

        let lookups = dept_ids.into_iter().map(|id| {
            let repo = Arc::clone(&self.department_repo);
            async move {
                let department = repo.get(&id).await?;
                Ok::<(String, Department), AppError>((id, department))
            }
        });

        // Fan-in point: the id -> record map exists only after every
        // lookup has resolved, so completion order is irrelevant.
        let resolved = try_join_all(lookups).await?;
        let by_id: HashMap<String, Department> = resolved.into_iter().collect();

        for employee in &mut employees {
            match by_id.get(&employee.department.id) {
                Some(found) => employee.department = found.clone(),
                None => {
                    return Err(AppError::Internal(format!(
                        "department {} missing from lookup results",
                        employee.department.id
                    )))
                }
            }
        }

        Ok(employees)
    }
}
