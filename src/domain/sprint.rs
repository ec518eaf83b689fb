use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Sprint {
    pub id: i64,
    pub code: String,
    pub title: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateSprintRequest {
    #[validate(length(equal = 6, message = "code must be exactly 6 characters"))]
    pub code: String,
    #[validate(length(min = 6, max = 60, message = "title must be between 6 and 60 characters"))]
    pub title: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateSprintRequest {
    #[validate(length(equal = 6, message = "code must be exactly 6 characters"))]
    pub code: Option<String>,
    #[validate(length(min = 6, max = 60, message = "title must be between 6 and 60 characters"))]
    pub title: Option<String>,
}

impl UpdateSprintRequest {
    /// True when the patch carries no fields, which makes an update a no-op.
    pub fn is_empty(&self) -> bool {
        self.code.is_none() && self.title.is_none()
    }
}

/// Default sprints to seed (code, title)
pub fn default_sprints() -> Vec<(&'static str, &'static str)> {
    vec![
        ("WD-1.1", "First Steps Into Programming with Python"),
        ("WD-1.2", "Intermediate Programming with Python"),
        ("WD-1.3", "Object Oriented Programming"),
        ("WD-1.4", "Computer Science Fundamentals"),
        ("WD-2.1", "HTML and CSS - the Foundation of Web Pages"),
        ("WD-2.2", "Improving Websites with Javascript"),
        ("WD-2.3", "Learning Your First Framework - Vue.js"),
        ("WD-2.4", "Typescript Fundamentals"),
        ("WD-3.1", "Node.js and Relational Databases"),
        ("WD-3.2", "Intermediate Back-End Development with Typescript"),
        ("WD-3.3", "Advanced Back-End Development"),
        ("WD-3.4", "Front-End and Back-End Integration"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_validation() {
        let valid = CreateSprintRequest {
            code: "WD-1.1".to_string(),
            title: "First Steps Into Programming".to_string(),
        };
        assert!(valid.validate().is_ok());

        let short_code = CreateSprintRequest {
            code: "WD-1".to_string(),
            ..valid.clone()
        };
        assert!(short_code.validate().is_err());

        let short_title = CreateSprintRequest {
            title: "Intro".to_string(),
            ..valid
        };
        assert!(short_title.validate().is_err());
    }

    #[test]
    fn test_update_request_is_empty() {
        assert!(UpdateSprintRequest::default().is_empty());

        let patch = UpdateSprintRequest {
            title: Some("Renamed sprint".to_string()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
        assert!(patch.validate().is_ok());
    }

    #[test]
    fn test_default_sprint_codes_are_valid() {
        for (code, title) in default_sprints() {
            let request = CreateSprintRequest {
                code: code.to_string(),
                title: title.to_string(),
            };
            assert!(request.validate().is_ok(), "invalid default sprint {}", code);
        }
    }
}
