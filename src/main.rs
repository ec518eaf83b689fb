use std::sync::Arc;
use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kudos::{
    api,
    config::Settings,
    integrations::{DiscordGateway, GiphyClient, ImageSupplier, NotificationGateway},
    service::ServiceContext,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kudos=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let settings = Settings::new().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config: {}. Using defaults.", e);
        Settings::default()
    });

    tracing::info!("Starting Kudos server on {}:{}", settings.server.host, settings.server.port);

    // Initialize database
    let db_pool = SqlitePoolOptions::new()
        .max_connections(settings.database.max_connections)
        .connect(&settings.database.url)
        .await?;

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await?;

    // Outbound clients; both are required to run the service
    let timeout = settings.integrations.timeout();
    let gateway: Arc<dyn NotificationGateway> = Arc::new(
        DiscordGateway::new(settings.integrations.discord.clone(), timeout)?,
    );
    let images: Arc<dyn ImageSupplier> = Arc::new(
        GiphyClient::new(settings.integrations.giphy.clone(), timeout)?,
    );

    match gateway.health_check().await {
        Ok(_) => tracing::info!("Integration {} is healthy", gateway.name()),
        Err(e) => tracing::warn!("Integration {} health check failed: {:?}", gateway.name(), e),
    }

    let service_context = Arc::new(ServiceContext::new(db_pool, gateway, images, timeout));

    let app = api::create_app(service_context, Arc::new(settings.clone()));

    let listener = tokio::net::TcpListener::bind(
        format!("{}:{}", settings.server.host, settings.server.port)
    ).await?;

    tracing::info!("Server listening on http://{}:{}", settings.server.host, settings.server.port);

    axum::serve(listener, app).await?;

    Ok(())
}
