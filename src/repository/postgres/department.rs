use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::department::{Department, DepartmentFilter, NewDepartment, UpdateDepartment};
use crate::models::Page;
use crate::repository::{next_cursor, order_by_ids, DepartmentRepository};
use crate::utils::{cursor, time};

const COLUMNS: &str = "id, name, description, created_time, updated_time";

pub struct PgDepartmentRepository {
    pool: PgPool,
}

impl PgDepartmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DepartmentRepository for PgDepartmentRepository {
    async fn create(&self, new: NewDepartment) -> Result<Department, AppError> {
        let id = match new.id {
            Some(id) if !id.is_empty() => id,
            _ => Uuid::now_v7().to_string(),
        };
        let now = time::now_utc();

        let mut tx = self.pool.begin().await?;
        sqlx::query(
            "INSERT INTO departments (id, name, description, created_time, updated_time) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&id)
        .bind(&new.name)
        .bind(&new.description)
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        self.get(&id).await
    }

    async fn fetch(&self, filter: DepartmentFilter) -> Result<Page<Department>, AppError> {
        let mut qb: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {} FROM departments", COLUMNS));

        if !filter.ids.is_empty() {
            qb.push(" WHERE id = ANY(");
            qb.push_bind(filter.ids.clone());
            qb.push(")");
        } else {
            let mut has_where = false;
            if !filter.keyword.is_empty() {
                qb.push(" WHERE name LIKE ");
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

        let rows = qb
            .build_query_as::<Department>()
            .fetch_all(&self.pool)
            .await?;

        // ID-set mode: order comes from the request, not from storage,
        // and the id set is the complete request (no further pages).
        if !filter.ids.is_empty() {
            let items = order_by_ids(rows, &filter.ids, |d| d.id.clone());
            return Ok(Page {
                items,
                next_cursor: String::new(),
            });
        }

        let next = next_cursor(rows.last().map(|d| d.id.as_str()), &filter.cursor);
        Ok(Page {
            items: rows,
            next_cursor: next,
        })
    }

    async fn get(&self, id: &str) -> Result<Department, AppError> {
        sqlx::query_as::<_, Department>(&format!(
            "SELECT {} FROM departments WHERE id = $1",
            COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("department is not found".to_string()))
    }

    async fn update(&self, id: &str, update: UpdateDepartment) -> Result<Department, AppError> {
        let now = time::now_utc();

        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(
            "UPDATE departments SET name = $1, description = $2, updated_time = $3 WHERE id = $4",
        )
        .bind(&update.name)
        .bind(&update.description)
        .bind(now)
        .bind(id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("department is not found".to_string()));
        }

        self.get(id).await
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("DELETE FROM departments WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("department is not found".to_string()));
        }

        Ok(())
    }
}
