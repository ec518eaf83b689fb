use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::{
    domain::{CreateTemplateRequest, Template, UpdateTemplateRequest},
    error::{AppError, Result},
    repository::{map_write_error, TemplateRepository},
};

const DUPLICATE_CONTENT: &str = "A template with this content already exists.";
const STILL_REFERENCED: &str = "Template is referenced by existing announcements.";

pub struct SqliteTemplateRepository {
    pool: SqlitePool,
}

impl SqliteTemplateRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TemplateRepository for SqliteTemplateRepository {
    async fn list(&self) -> Result<Vec<Template>> {
        sqlx::query_as::<_, Template>("SELECT id, content FROM templates ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Template>> {
        sqlx::query_as::<_, Template>("SELECT id, content FROM templates WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn create(&self, request: CreateTemplateRequest) -> Result<Template> {
        sqlx::query_as::<_, Template>(
            "INSERT INTO templates (content) VALUES (?) RETURNING id, content",
        )
        .bind(&request.content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, DUPLICATE_CONTENT, STILL_REFERENCED))
    }

    async fn update(&self, id: i64, request: UpdateTemplateRequest) -> Result<Option<Template>> {
        let Some(content) = request.content else {
            return self.find_by_id(id).await;
        };

        sqlx::query_as::<_, Template>(
            "UPDATE templates SET content = ? WHERE id = ? RETURNING id, content",
        )
        .bind(&content)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, DUPLICATE_CONTENT, STILL_REFERENCED))
    }

    async fn delete(&self, id: i64) -> Result<Option<Template>> {
        sqlx::query_as::<_, Template>("DELETE FROM templates WHERE id = ? RETURNING id, content")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(e, DUPLICATE_CONTENT, STILL_REFERENCED))
    }
}
