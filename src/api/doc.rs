use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::{
    api::handlers,
    domain::{
        Announcement, CreateSprintRequest, CreateTemplateRequest, RecordAnnouncementRequest,
        Sprint, Template, UpdateSprintRequest, UpdateTemplateRequest,
    },
};

/// Shape of every error response.
#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorMessage,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorMessage {
    pub message: String,
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Kudos API", description = "Sprint completion announcements"),
    paths(
        handlers::root::health_check,
        handlers::sprints::list,
        handlers::sprints::get,
        handlers::sprints::create,
        handlers::sprints::update,
        handlers::sprints::delete,
        handlers::templates::list,
        handlers::templates::get,
        handlers::templates::create,
        handlers::templates::update,
        handlers::templates::delete,
        handlers::messages::list,
        handlers::messages::create,
    ),
    components(schemas(
        Sprint,
        CreateSprintRequest,
        UpdateSprintRequest,
        Template,
        CreateTemplateRequest,
        UpdateTemplateRequest,
        Announcement,
        RecordAnnouncementRequest,
        ErrorBody,
        ErrorMessage,
    )),
    tags(
        (name = "sprints", description = "Training sprints"),
        (name = "templates", description = "Congratulatory message templates"),
        (name = "messages", description = "Recorded sprint completions"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;
