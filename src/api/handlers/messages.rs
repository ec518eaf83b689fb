use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    api::{doc::ErrorBody, extract::ValidatedJson, state::AppState},
    domain::{Announcement, AnnouncementFilter, AnnouncementQuery, RecordAnnouncementRequest},
    error::Result,
};

/// List recorded completions. `username` wins when both filters are given.
#[utoipa::path(
    get,
    path = "/messages",
    tag = "messages",
    params(AnnouncementQuery),
    responses(
        (status = 200, description = "Matching completions in insertion order", body = [Announcement]),
        (status = 400, body = ErrorBody),
        (status = 404, description = "Unknown user or sprint", body = ErrorBody)
    )
)]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<AnnouncementQuery>,
) -> Result<Json<Vec<Announcement>>> {
    let filter = AnnouncementFilter::try_from(query)?;

    let announcements = state.service_context.announcement_service
        .list(filter)
        .await?;

    Ok(Json(announcements))
}

#[utoipa::path(
    post,
    path = "/messages",
    tag = "messages",
    request_body = RecordAnnouncementRequest,
    responses(
        (status = 201, description = "Completion recorded", body = Announcement),
        (status = 400, body = ErrorBody),
        (status = 404, description = "Unknown user, unknown sprint or no templates", body = ErrorBody),
        (status = 409, description = "User has already finished this sprint", body = ErrorBody)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RecordAnnouncementRequest>,
) -> Result<(StatusCode, Json<Announcement>)> {
    let recorded = state.service_context.announcement_service
        .record(&request.username, &request.sprint_code)
        .await?;

    if !recorded.delivery.degradations.is_empty() {
        tracing::debug!(
            "Announcement {} recorded with degraded delivery: {:?}",
            recorded.announcement.id,
            recorded.delivery.degradations
        );
    }

    Ok((StatusCode::CREATED, Json(recorded.announcement)))
}
