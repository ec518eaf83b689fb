use async_trait::async_trait;
use crate::domain::*;
use crate::error::{AppError, Result};

pub mod sprint_repository;
pub mod template_repository;
pub mod announcement_repository;

pub use sprint_repository::SqliteSprintRepository;
pub use template_repository::SqliteTemplateRepository;
pub use announcement_repository::SqliteAnnouncementRepository;

#[async_trait]
pub trait SprintRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Sprint>>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Sprint>>;
    async fn find_by_code(&self, code: &str) -> Result<Option<Sprint>>;
    async fn create(&self, request: CreateSprintRequest) -> Result<Sprint>;
    /// Returns `None` when no sprint has this id. An empty patch returns the current record.
    async fn update(&self, id: i64, request: UpdateSprintRequest) -> Result<Option<Sprint>>;
    /// Returns the removed sprint, or `None` when it did not exist.
    async fn delete(&self, id: i64) -> Result<Option<Sprint>>;
}

#[async_trait]
pub trait TemplateRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Template>>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Template>>;
    async fn create(&self, request: CreateTemplateRequest) -> Result<Template>;
    async fn update(&self, id: i64, request: UpdateTemplateRequest) -> Result<Option<Template>>;
    async fn delete(&self, id: i64) -> Result<Option<Template>>;
}

/// Append-only store of completed sprints. There is deliberately no update or delete.
#[async_trait]
pub trait AnnouncementRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Announcement>>;
    async fn list_by_username(&self, username: &str) -> Result<Vec<Announcement>>;
    async fn list_by_sprint(&self, sprint_id: i64) -> Result<Vec<Announcement>>;
    async fn find_by_username_and_sprint(&self, username: &str, sprint_id: i64) -> Result<Option<Announcement>>;
    /// Fails with `AppError::Conflict` when the (username, sprint) pair is already recorded.
    async fn create(&self, announcement: NewAnnouncement) -> Result<Announcement>;
}

/// Maps SQLite constraint failures on writes to client-facing conflicts.
pub(crate) fn map_write_error(err: sqlx::Error, unique_message: &str, reference_message: &str) -> AppError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_unique_violation() {
            return AppError::Conflict(unique_message.to_string());
        }
        if db_err.is_foreign_key_violation() {
            return AppError::Conflict(reference_message.to_string());
        }
    }
    AppError::Database(err.to_string())
}
