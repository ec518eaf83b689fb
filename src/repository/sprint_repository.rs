use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::{
    domain::{CreateSprintRequest, Sprint, UpdateSprintRequest},
    error::{AppError, Result},
    repository::{map_write_error, SprintRepository},
};

const DUPLICATE_CODE: &str = "A sprint with this code already exists.";
const STILL_REFERENCED: &str = "Sprint is referenced by existing announcements.";

pub struct SqliteSprintRepository {
    pool: SqlitePool,
}

impl SqliteSprintRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SprintRepository for SqliteSprintRepository {
    async fn list(&self) -> Result<Vec<Sprint>> {
        sqlx::query_as::<_, Sprint>("SELECT id, code, title FROM sprints ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Sprint>> {
        sqlx::query_as::<_, Sprint>("SELECT id, code, title FROM sprints WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Sprint>> {
        sqlx::query_as::<_, Sprint>("SELECT id, code, title FROM sprints WHERE code = ?")
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn create(&self, request: CreateSprintRequest) -> Result<Sprint> {
        sqlx::query_as::<_, Sprint>(
            r#"
            INSERT INTO sprints (code, title)
            VALUES (?, ?)
            RETURNING id, code, title
            "#,
        )
        .bind(&request.code)
        .bind(&request.title)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, DUPLICATE_CODE, STILL_REFERENCED))
    }

    async fn update(&self, id: i64, request: UpdateSprintRequest) -> Result<Option<Sprint>> {
        if request.is_empty() {
            return self.find_by_id(id).await;
        }

        sqlx::query_as::<_, Sprint>(
            r#"
            UPDATE sprints
            SET code = COALESCE(?, code), title = COALESCE(?, title)
            WHERE id = ?
            RETURNING id, code, title
            "#,
        )
        .bind(&request.code)
        .bind(&request.title)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, DUPLICATE_CODE, STILL_REFERENCED))
    }

    async fn delete(&self, id: i64) -> Result<Option<Sprint>> {
        sqlx::query_as::<_, Sprint>("DELETE FROM sprints WHERE id = ? RETURNING id, code, title")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(e, DUPLICATE_CODE, STILL_REFERENCED))
    }
}
