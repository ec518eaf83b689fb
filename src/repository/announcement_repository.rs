use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::{
    domain::{Announcement, NewAnnouncement},
    error::{AppError, Result},
    repository::{map_write_error, AnnouncementRepository},
};

pub const ALREADY_FINISHED: &str = "User has already finished this sprint.";
const UNKNOWN_REFERENCE: &str = "Sprint or template no longer exists.";

#[derive(FromRow)]
struct AnnouncementRow {
    id: i64,
    username: String,
    sprint_id: i64,
    template_id: i64,
    created_at: NaiveDateTime,
}

impl From<AnnouncementRow> for Announcement {
    fn from(row: AnnouncementRow) -> Self {
        Announcement {
            id: row.id,
            username: row.username,
            sprint_id: row.sprint_id,
            template_id: row.template_id,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
        }
    }
}

pub struct SqliteAnnouncementRepository {
    pool: SqlitePool,
}

impl SqliteAnnouncementRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnnouncementRepository for SqliteAnnouncementRepository {
    async fn list(&self) -> Result<Vec<Announcement>> {
        let rows = sqlx::query_as::<_, AnnouncementRow>(
            r#"
            SELECT id, username, sprint_id, template_id, created_at
            FROM announcements
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(Announcement::from).collect())
    }

    async fn list_by_username(&self, username: &str) -> Result<Vec<Announcement>> {
        let rows = sqlx::query_as::<_, AnnouncementRow>(
            r#"
            SELECT id, username, sprint_id, template_id, created_at
            FROM announcements
            WHERE username = ?
            ORDER BY id ASC
            "#,
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(Announcement::from).collect())
    }

    async fn list_by_sprint(&self, sprint_id: i64) -> Result<Vec<Announcement>> {
        let rows = sqlx::query_as::<_, AnnouncementRow>(
            r#"
            SELECT id, username, sprint_id, template_id, created_at
            FROM announcements
            WHERE sprint_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(sprint_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(Announcement::from).collect())
    }

    async fn find_by_username_and_sprint(&self, username: &str, sprint_id: i64) -> Result<Option<Announcement>> {
        let row = sqlx::query_as::<_, AnnouncementRow>(
            r#"
            SELECT id, username, sprint_id, template_id, created_at
            FROM announcements
            WHERE username = ? AND sprint_id = ?
            "#,
        )
        .bind(username)
        .bind(sprint_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(row.map(Announcement::from))
    }

    async fn create(&self, announcement: NewAnnouncement) -> Result<Announcement> {
        let row = sqlx::query_as::<_, AnnouncementRow>(
            r#"
            INSERT INTO announcements (username, sprint_id, template_id)
            VALUES (?, ?, ?)
            RETURNING id, username, sprint_id, template_id, created_at
            "#,
        )
        .bind(&announcement.username)
        .bind(announcement.sprint_id)
        .bind(announcement.template_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, ALREADY_FINISHED, UNKNOWN_REFERENCE))?;

        Ok(row.into())
    }
}
