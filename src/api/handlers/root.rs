use axum::{extract::State, http::StatusCode, Json, response::IntoResponse};
use serde_json::json;

use crate::api::state::AppState;

pub async fn root(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "name": "Kudos API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Records finished sprints and celebrates them on Discord",
        "status": "operational",
        "base_url": state.settings.server.base_url,
        "endpoints": {
            "health": "/health",
            "sprints": "/sprints",
            "templates": "/templates",
            "messages": "/messages",
            "docs": "/docs"
        }
    }))
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service and database are reachable"),
        (status = 503, description = "Database is unreachable")
    )
)]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database = sqlx::query("SELECT 1")
        .execute(&state.service_context.db_pool)
        .await;

    let (status, label) = match database {
        Ok(_) => (StatusCode::OK, "healthy"),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
        }
    };

    (status, Json(json!({
        "status": label,
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}
