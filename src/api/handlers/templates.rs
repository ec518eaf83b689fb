use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use crate::{
    api::{doc::ErrorBody, extract::{PathParam, ValidatedJson}, state::AppState},
    domain::{CreateTemplateRequest, Template, UpdateTemplateRequest},
    error::{AppError, Result},
};

fn not_found() -> AppError {
    AppError::NotFound("Template not found.".to_string())
}

#[utoipa::path(
    get,
    path = "/templates",
    tag = "templates",
    responses((status = 200, description = "All templates", body = [Template]))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Template>>> {
    let templates = state.service_context.template_repo.list().await?;
    Ok(Json(templates))
}

#[utoipa::path(
    get,
    path = "/templates/{id}",
    tag = "templates",
    params(("id" = i64, Path, description = "Template id")),
    responses(
        (status = 200, body = Template),
        (status = 404, body = ErrorBody)
    )
)]
pub async fn get(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<Template>> {
    let template = state.service_context.template_repo
        .find_by_id(id)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(template))
}

#[utoipa::path(
    post,
    path = "/templates",
    tag = "templates",
    request_body = CreateTemplateRequest,
    responses(
        (status = 201, body = Template),
        (status = 400, body = ErrorBody),
        (status = 409, description = "Duplicate content", body = ErrorBody)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateTemplateRequest>,
) -> Result<(StatusCode, Json<Template>)> {
    let template = state.service_context.template_repo.create(request).await?;
    Ok((StatusCode::CREATED, Json(template)))
}

#[utoipa::path(
    patch,
    path = "/templates/{id}",
    tag = "templates",
    params(("id" = i64, Path, description = "Template id")),
    request_body = UpdateTemplateRequest,
    responses(
        (status = 200, body = Template),
        (status = 400, body = ErrorBody),
        (status = 404, body = ErrorBody)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
    ValidatedJson(request): ValidatedJson<UpdateTemplateRequest>,
) -> Result<Json<Template>> {
    let template = state.service_context.template_repo
        .update(id, request)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(template))
}

#[utoipa::path(
    delete,
    path = "/templates/{id}",
    tag = "templates",
    params(("id" = i64, Path, description = "Template id")),
    responses(
        (status = 200, description = "The removed template", body = Template),
        (status = 404, body = ErrorBody),
        (status = 409, description = "Template was used by a recorded completion", body = ErrorBody)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<Template>> {
    let template = state.service_context.template_repo
        .delete(id)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(template))
}
