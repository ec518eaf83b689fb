pub mod doc;
pub mod extract;
pub mod handlers;
pub mod state;

use axum::{
    Router,
    routing::get,
};
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::TraceLayer,
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::Settings,
    service::ServiceContext,
};
use doc::ApiDoc;
use state::AppState;

pub fn create_app(
    service_context: Arc<ServiceContext>,
    settings: Arc<Settings>,
) -> Router {
    let app_state = AppState::new(service_context, settings);

    Router::new()
        // Root and health endpoints
        .route("/", get(handlers::root::root))
        .route("/health", get(handlers::root::health_check))

        // Resource routes
        .nest("/sprints", sprint_routes())
        .nest("/templates", template_routes())
        .nest("/messages", message_routes())

        // OpenAPI document and Swagger UI
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))

        // Add state to the router
        .with_state(app_state)

        // Middleware
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn sprint_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::sprints::list).post(handlers::sprints::create))
        .route(
            "/:id",
            get(handlers::sprints::get)
                .patch(handlers::sprints::update)
                .delete(handlers::sprints::delete),
        )
}

fn template_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::templates::list).post(handlers::templates::create))
        .route(
            "/:id",
            get(handlers::templates::get)
                .patch(handlers::templates::update)
                .delete(handlers::templates::delete),
        )
}

fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::messages::list).post(handlers::messages::create))
}
