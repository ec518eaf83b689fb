use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use crate::{
    api::{doc::ErrorBody, extract::{PathParam, ValidatedJson}, state::AppState},
    domain::{CreateSprintRequest, Sprint, UpdateSprintRequest},
    error::{AppError, Result},
};

fn not_found() -> AppError {
    AppError::NotFound("Sprint not found.".to_string())
}

#[utoipa::path(
    get,
    path = "/sprints",
    tag = "sprints",
    responses((status = 200, description = "All sprints", body = [Sprint]))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Sprint>>> {
    let sprints = state.service_context.sprint_repo.list().await?;
    Ok(Json(sprints))
}

#[utoipa::path(
    get,
    path = "/sprints/{id}",
    tag = "sprints",
    params(("id" = i64, Path, description = "Sprint id")),
    responses(
        (status = 200, body = Sprint),
        (status = 404, body = ErrorBody)
    )
)]
pub async fn get(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<Sprint>> {
    let sprint = state.service_context.sprint_repo
        .find_by_id(id)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(sprint))
}

#[utoipa::path(
    post,
    path = "/sprints",
    tag = "sprints",
    request_body = CreateSprintRequest,
    responses(
        (status = 201, body = Sprint),
        (status = 400, body = ErrorBody),
        (status = 409, description = "Code already in use", body = ErrorBody)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateSprintRequest>,
) -> Result<(StatusCode, Json<Sprint>)> {
    let sprint = state.service_context.sprint_repo.create(request).await?;
    Ok((StatusCode::CREATED, Json(sprint)))
}

#[utoipa::path(
    patch,
    path = "/sprints/{id}",
    tag = "sprints",
    params(("id" = i64, Path, description = "Sprint id")),
    request_body = UpdateSprintRequest,
    responses(
        (status = 200, description = "Updated sprint; an empty patch returns it unchanged", body = Sprint),
        (status = 400, body = ErrorBody),
        (status = 404, body = ErrorBody)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
    ValidatedJson(request): ValidatedJson<UpdateSprintRequest>,
) -> Result<Json<Sprint>> {
    let sprint = state.service_context.sprint_repo
        .update(id, request)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(sprint))
}

#[utoipa::path(
    delete,
    path = "/sprints/{id}",
    tag = "sprints",
    params(("id" = i64, Path, description = "Sprint id")),
    responses(
        (status = 200, description = "The removed sprint", body = Sprint),
        (status = 404, body = ErrorBody),
        (status = 409, description = "Sprint has recorded completions", body = ErrorBody)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<Sprint>> {
    let sprint = state.service_context.sprint_repo
        .delete(id)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(sprint))
}
