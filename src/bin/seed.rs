use clap::Parser;
use kudos::{
    config::Settings,
    domain::{default_sprints, default_templates, CreateSprintRequest, CreateTemplateRequest},
    error::AppError,
    repository::{SprintRepository, SqliteSprintRepository, SqliteTemplateRepository, TemplateRepository},
};
use sqlx::sqlite::SqlitePoolOptions;

/// Populate the database with the default sprints and congratulatory templates.
#[derive(Parser, Debug)]
#[command(name = "seed", version)]
struct Args {
    /// Database URL; defaults to the configured `database.url`
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Delete all announcements, templates and sprints before seeding
    #[arg(long)]
    reset: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let database_url = match args.database_url {
        Some(url) => url,
        None => Settings::new().unwrap_or_default().database.url,
    };

    println!("🌱 Seeding {}", database_url);

    let db_pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await?;

    println!("📋 Running migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await?;

    if args.reset {
        println!("🧹 Clearing existing data...");
        sqlx::query("DELETE FROM announcements").execute(&db_pool).await?;
        sqlx::query("DELETE FROM templates").execute(&db_pool).await?;
        sqlx::query("DELETE FROM sprints").execute(&db_pool).await?;
    }

    let sprint_repo = SqliteSprintRepository::new(db_pool.clone());
    let template_repo = SqliteTemplateRepository::new(db_pool.clone());

    println!("🏃 Creating sprints...");
    for (code, title) in default_sprints() {
        let request = CreateSprintRequest {
            code: code.to_string(),
            title: title.to_string(),
        };
        match sprint_repo.create(request).await {
            Ok(sprint) => println!("  ✅ {} {}", sprint.code, sprint.title),
            Err(AppError::Conflict(_)) => println!("  ⏭️  {} already exists", code),
            Err(e) => return Err(e.into()),
        }
    }

    println!("💬 Creating templates...");
    for content in default_templates() {
        let request = CreateTemplateRequest {
            content: content.to_string(),
        };
        match template_repo.create(request).await {
            Ok(template) => println!("  ✅ #{} {}", template.id, template.content),
            Err(AppError::Conflict(_)) => println!("  ⏭️  template already exists"),
            Err(e) => return Err(e.into()),
        }
    }

    println!("🎉 Done");
    Ok(())
}
