use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::department::Department;
use crate::models::employee::{Employee, EmployeeFilter, NewEmployee, UpdateEmployee};
use crate::models::Page;
use crate::repository::{next_cursor, order_by_ids, EmployeeRepository};
use crate::utils::{cursor, time};

const COLUMNS: &str =
    "id, first_name, last_name, birth_place, date_of_birth, title, dept_id, \
     created_time, updated_time";

/// Flat row shape; the embedded department reference is rebuilt from
/// `dept_id` when mapping to the domain type.
#[derive(sqlx::FromRow)]
struct EmployeeRow {
    id: String,
    first_name: String,
    last_name: Option<String>,
    birth_place: String,
    date_of_birth: NaiveDate,
    title: String,
    dept_id: String,
    created_time: DateTime<Utc>,
    updated_time: DateTime<Utc>,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Employee {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            birth_place: row.birth_place,
            date_of_birth: row.date_of_birth,
            title: row.title,
            department: Department::reference(row.dept_id),
            created_time: row.created_time,
            updated_time: row.updated_time,
        }
    }
}

pub struct PgEmployeeRepository {
    pool: PgPool,
}

impl PgEmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeRepository for PgEmployeeRepository {
    async fn create(&self, new: NewEmployee) -> Result<Employee, AppError> {
        let id = match new.id {
            Some(id) if !id.is_empty() => id,
            _ => Uuid::now_v7().to_string(),
        };
        let now = time::now_utc();

        let mut tx = self.pool.begin().await?;
        sqlx::query(
            "INSERT INTO employees \
             (id, first_name, last_name, birth_place, date_of_birth, title, dept_id, \
              created_time, updated_time) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(&id)
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.birth_place)
        .bind(new.date_of_birth)
        .bind(&new.title)
        .bind(&new.department_id)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        self.get(&id).await
    }

    async fn fetch(&self, filter: EmployeeFilter) -> Result<Page<Employee>, AppError> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {} FROM employees", COLUMNS));

        if !filter.ids.is_empty() {
            qb.push(" WHERE id = ANY(");
            qb.push_bind(filter.ids.clone());
            qb.push(")");
        } else {
            let mut has_where = false;
            if !filter.keyword.is_empty() {
                qb.push(" WHERE first_name LIKE ");
                qb.push_bind(format!("%{}%", filter.keyword));
                has_where = true;
            }
            if !filter.cursor.is_empty() {
                let boundary = cursor::decode(&filter.cursor)?;
                qb.push(if has_where { " AND id < " } else { " WHERE id < " });
                qb.push_bind(boundary);
            }
            qb.push(" ORDER BY id DESC");
            if filter.num > 0 {
                qb.push(" LIMIT ");
                qb.push_bind(filter.num);
            }
        }

        let rows: Vec<Employee> = qb
            .build_query_as::<EmployeeRow>()
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Employee::from)
            .collect();

        if !filter.ids.is_empty() {
            let items = order_by_ids(rows, &filter.ids, |e| e.id.clone());
            return Ok(Page {
                items,
                next_cursor: String::new(),
            });
        }

        let next = next_cursor(rows.last().map(|e| e.id.as_str()), &filter.cursor);
        Ok(Page {
            items: rows,
            next_cursor: next,
        })
    }

    async fn get(&self, id: &str) -> Result<Employee, AppError> {
        sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {} FROM employees WHERE id = $1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(Employee::from)
        .ok_or_else(|| AppError::NotFound("employee is not found".to_string()))
    }

    async fn update(&self, id: &str, update: UpdateEmployee) -> Result<Employee, AppError> {
        let now = time::now_utc();

        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(
            "UPDATE employees SET first_name = $1, last_name = $2, birth_place = $3, \
             date_of_birth = $4, title = $5, dept_id = $6, updated_time = $7 WHERE id = $8",
        )
        .bind(&update.first_name)
        .bind(&update.last_name)
        .bind(&update.birth_place)
        .bind(update.date_of_birth)
        .bind(&update.title)
        .bind(&update.department_id)
        .bind(now)
        .bind(id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("employee is not found".to_string()));
        }

        self.get(id).await
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("employee is not found".to_string()));
        }

        Ok(())
    }

    async fn count_by_department(&self, department_id: &str) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees WHERE dept_id = $1")
            .bind(department_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
