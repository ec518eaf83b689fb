use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A reusable congratulatory message body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Template {
    pub id: i64,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTemplateRequest {
    #[validate(length(min = 5, max = 500, message = "content must be between 5 and 500 characters"))]
    pub content: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateTemplateRequest {
    #[validate(length(min = 5, max = 500, message = "content must be between 5 and 500 characters"))]
    pub content: Option<String>,
}

impl UpdateTemplateRequest {
    pub fn is_empty(&self) -> bool {
        self.content.is_none()
    }
}

/// Default congratulatory templates to seed
pub fn default_templates() -> Vec<&'static str> {
    vec![
        "Well done! Keep up the great work! 🎉",
        "You did it! This is a huge milestone. 🚀",
        "Congratulations! Your hard work is paying off. 💪",
        "Amazing effort! On to the next challenge. 🏆",
        "Bravo! Another sprint conquered. 🌟",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_length_bounds() {
        let too_short = CreateTemplateRequest { content: "Yay!".to_string() };
        assert!(too_short.validate().is_err());

        let just_right = CreateTemplateRequest { content: "Well done".to_string() };
        assert!(just_right.validate().is_ok());

        let too_long = CreateTemplateRequest { content: "a".repeat(501) };
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn test_empty_patch() {
        assert!(UpdateTemplateRequest::default().is_empty());
        assert!(UpdateTemplateRequest::default().validate().is_ok());
    }
}
