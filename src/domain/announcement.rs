use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::{Sprint, Template};
use crate::error::{AppError, Result};

/// The persisted fact that a user completed a sprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: i64,
    pub username: String,
    pub sprint_id: i64,
    pub template_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Fields written by the orchestrator; `id` and `created_at` come from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAnnouncement {
    pub username: String,
    pub sprint_id: i64,
    pub template_id: i64,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordAnnouncementRequest {
    #[validate(length(min = 2, max = 32, message = "username must be between 2 and 32 characters"))]
    pub username: String,
    #[validate(length(equal = 6, message = "sprintCode must be exactly 6 characters"))]
    pub sprint_code: String,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AnnouncementQuery {
    /// Only announcements for this username
    pub username: Option<String>,
    /// Only announcements for the sprint with this code
    pub sprint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnouncementFilter {
    All,
    Username(String),
    SprintCode(String),
}

impl TryFrom<AnnouncementQuery> for AnnouncementFilter {
    type Error = AppError;

    // username is checked first and wins when both are present; only the
    // chosen value is validated and empty values count as absent
    fn try_from(query: AnnouncementQuery) -> Result<Self> {
        let username = query.username.filter(|value| !value.is_empty());
        let sprint = query.sprint.filter(|value| !value.is_empty());

        match (username, sprint) {
            (Some(username), _) => {
                let len = username.chars().count();
                if !(2..=32).contains(&len) {
                    return Err(AppError::Validation(
                        "username must be between 2 and 32 characters".to_string(),
                    ));
                }
                Ok(AnnouncementFilter::Username(username))
            }
            (None, Some(code)) => {
                if code.chars().count() != 6 {
                    return Err(AppError::Validation(
                        "sprint must be exactly 6 characters".to_string(),
                    ));
                }
                Ok(AnnouncementFilter::SprintCode(code))
            }
            (None, None) => Ok(AnnouncementFilter::All),
        }
    }
}

/// Builds the chat message posted for a completed sprint.
pub fn celebration_text(mention: &str, sprint: &Sprint, template: &Template) -> String {
    format!("{} has just completed {}!\n{}", mention, sprint.title, template.content)
}
