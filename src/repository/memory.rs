//! In-memory repositories used by the service and handler tests. They
//! honor the same fetch contract as the Postgres implementations so the
//! pagination and enrichment semantics can be exercised without a
//! database, and the department side counts lookups so fan-out dedup is
//! observable.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::department::{Department, DepartmentFilter, NewDepartment, UpdateDepartment};
use crate::models::employee::{Employee, EmployeeFilter, NewEmployee, UpdateEmployee};
use crate::models::Page;
use crate::repository::{next_cursor, order_by_ids, DepartmentRepository, EmployeeRepository};
use crate::utils::{cursor, time};

pub fn department(id: &str, name: &str) -> Department {
    let now = time::now_utc();
    Department {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        created_time: now,
        updated_time: now,
    }
}

pub fn employee(id: &str, first_name: &str, dept_id: &str) -> Employee {
    let now = time::now_utc();
    Employee {
        id: id.to_string(),
        first_name: first_name.to_string(),
        last_name: None,
        birth_place: "Jakarta".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        title: "Engineer".to_string(),
        department: Department::reference(dept_id),
        created_time: now,
        updated_time: now,
    }
}

#[derive(Default)]
pub struct InMemoryDepartmentRepository {
    rows: RwLock<Vec<Department>>,
    get_calls: AtomicUsize,
    fail_ids: Vec<String>,
}

impl InMemoryDepartmentRepository {
    pub fn with_rows(rows: Vec<Department>) -> Self {
        Self {
            rows: RwLock::new(rows),
            ..Default::default()
        }
    }

    /// Make `get` fail for the given id, for fail-fast tests.
    pub fn failing_on(mut self, id: &str) -> Self {
        self.fail_ids.push(id.to_string());
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DepartmentRepository for InMemoryDepartmentRepository {
    async fn create(&self, new: NewDepartment) -> Result<Department, AppError> {
        let id = match new.id {
            Some(id) if !id.is_empty() => id,
            _ => Uuid::now_v7().to_string(),
        };
        let now = time::now_utc();
        let department = Department {
            id,
            name: new.name,
            description: new.description,
            created_time: now,
            updated_time: now,
        };
        self.rows.write().await.push(department.clone());
        Ok(department)
    }

    async fn fetch(&self, filter: DepartmentFilter) -> Result<Page<Department>, AppError> {
        let rows = self.rows.read().await.clone();

        if !filter.ids.is_empty() {
            return Ok(Page {
                items: order_by_ids(rows, &filter.ids, |d| d.id.clone()),
                next_cursor: String::new(),
            });
        }

        let mut items: Vec<Department> = rows
            .into_iter()
            .filter(|d| filter.keyword.is_empty() || d.name.contains(&filter.keyword))
            .collect();
        items.sort_by(|a, b| b.id.cmp(&a.id));
        if !filter.cursor.is_empty() {
            let boundary = cursor::decode(&filter.cursor)?;
            items.retain(|d| d.id < boundary);
        }
        if filter.num > 0 {
            items.truncate(filter.num as usize);
        }

        let next = next_cursor(items.last().map(|d| d.id.as_str()), &filter.cursor);
        Ok(Page {
            items,
            next_cursor: next,
        })
    }

    async fn get(&self, id: &str) -> Result<Department, AppError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_ids.iter().any(|f| f == id) {
            return Err(AppError::Database("department lookup failed".to_string()));
        }
        self.rows
            .read()
            .await
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("department is not found".to_string()))
    }

    async fn update(&self, id: &str, update: UpdateDepartment) -> Result<Department, AppError> {
        let mut rows = self.rows.write().await;
        let department = rows
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| AppError::NotFound("department is not found".to_string()))?;
        department.name = update.name;
        department.description = update.description;
        department.updated_time = time::now_utc();
        Ok(department.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|d| d.id != id);
        if rows.len() == before {
            return Err(AppError::NotFound("department is not found".to_string()));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryEmployeeRepository {
    rows: RwLock<Vec<Employee>>,
}

impl InMemoryEmployeeRepository {
    pub fn with_rows(rows: Vec<Employee>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn create(&self, new: NewEmployee) -> Result<Employee, AppError> {
        let id = match new.id {
            Some(id) if !id.is_empty() => id,
            _ => Uuid::now_v7().to_string(),
        };
        let now = time::now_utc();
        let employee = Employee {
            id,
            first_name: new.first_name,
            last_name: new.last_name,
            birth_place: new.birth_place,
            date_of_birth: new.date_of_birth,
            title: new.title,
            department: Department::reference(new.department_id),
            created_time: now,
            updated_time: now,
        };
        self.rows.write().await.push(employee.clone());
        Ok(employee)
    }

    async fn fetch(&self, filter: EmployeeFilter) -> Result<Page<Employee>, AppError> {
        let rows = self.rows.read().await.clone();

        if !filter.ids.is_empty() {
            return Ok(Page {
                items: order_by_ids(rows, &filter.ids, |e| e.id.clone()),
                next_cursor: String::new(),
            });
        }

        let mut items: Vec<Employee> = rows
            .into_iter()
            .filter(|e| filter.keyword.is_empty() || e.first_name.contains(&filter.keyword))
            .collect();
        items.sort_by(|a, b| b.id.cmp(&a.id));
        if !filter.cursor.is_empty() {
            let boundary = cursor::decode(&filter.cursor)?;
            items.retain(|e| e.id < boundary);
        }
        if filter.num > 0 {
            items.truncate(filter.num as usize);
        }

        let next = next_cursor(items.last().map(|e| e.id.as_str()), &filter.cursor);
        Ok(Page {
            items,
            next_cursor: next,
        })
    }

    async fn get(&self, id: &str) -> Result<Employee, AppError> {
        self.rows
            .read()
            .await
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound("employee is not found".to_string()))
    }

    async fn update(&self, id: &str, update: UpdateEmployee) -> Result<Employee, AppError> {
        let mut rows = self.rows.write().await;
        let employee = rows
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| AppError::NotFound("employee is not found".to_string()))?;
        employee.first_name = update.first_name;
        employee.last_name = update.last_name;
        employee.birth_place = update.birth_place;
        employee.date_of_birth = update.date_of_birth;
        employee.title = update.title;
        employee.department = Department::reference(update.department_id);
        employee.updated_time = time::now_utc();
        Ok(employee.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|e| e.id != id);
        if rows.len() == before {
            return Err(AppError::NotFound("employee is not found".to_string()));
        }
        Ok(())
    }

    async fn count_by_department(&self, department_id: &str) -> Result<i64, AppError> {
        let count = self
            .rows
            .read()
            .await
            .iter()
            .filter(|e| e.department.id == department_id)
            .count();
        Ok(count as i64)
    }
}
