#![allow(dead_code)]

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use kudos::{
    domain::{CreateSprintRequest, CreateTemplateRequest, Sprint, Template},
    error::{AppError, Result},
    integrations::{ChatIdentity, ImageSupplier, NotificationGateway},
    repository::{SprintRepository, SqliteSprintRepository, SqliteTemplateRepository, TemplateRepository},
    service::TemplateSelector,
};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

pub const GIF_URL: &str = "https://media.giphy.com/media/congrats/giphy.gif";
pub const SHORT_TIMEOUT: Duration = Duration::from_millis(100);

/// Fresh in-memory database with all migrations applied.
pub async fn test_pool() -> anyhow::Result<SqlitePool> {
    // one connection, kept alive, so every query sees the same in-memory database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

/// Two sprints (`wd-1.1`, `wd-1.2`) and two templates.
pub async fn seed(pool: &SqlitePool) -> anyhow::Result<(Vec<Sprint>, Vec<Template>)> {
    let sprint_repo = SqliteSprintRepository::new(pool.clone());
    let template_repo = SqliteTemplateRepository::new(pool.clone());

    let sprints = vec![
        sprint_repo
            .create(CreateSprintRequest {
                code: "wd-1.1".to_string(),
                title: "First Steps Into Programming with Python".to_string(),
            })
            .await?,
        sprint_repo
            .create(CreateSprintRequest {
                code: "wd-1.2".to_string(),
                title: "Intermediate Programming with Python".to_string(),
            })
            .await?,
    ];

    let templates = vec![
        template_repo
            .create(CreateTemplateRequest {
                content: "Well done! Keep it up!".to_string(),
            })
            .await?,
        template_repo
            .create(CreateTemplateRequest {
                content: "You are unstoppable!".to_string(),
            })
            .await?,
    ];

    Ok((sprints, templates))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub text: String,
    pub image_url: Option<String>,
}

/// In-process chat platform. Users listed in `users` exist; everyone else does not.
#[derive(Default)]
pub struct FakeGateway {
    pub users: Vec<String>,
    pub fail_lookup: bool,
    pub hang_lookup: bool,
    pub fail_announce: bool,
    pub hang_announce: bool,
    pub lookups: AtomicUsize,
    pub sent: Mutex<Vec<SentMessage>>,
}

impl FakeGateway {
    pub fn with_users(users: &[&str]) -> Self {
        Self {
            users: users.iter().map(|u| u.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }
}

pub fn identity_for(username: &str) -> ChatIdentity {
    ChatIdentity {
        id: format!("id-{}", username),
        username: username.to_string(),
    }
}

#[async_trait]
impl NotificationGateway for FakeGateway {
    fn name(&self) -> &str {
        "FakeChat"
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    async fn resolve_identity(&self, username: &str) -> Result<Option<ChatIdentity>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.hang_lookup {
            std::future::pending::<()>().await;
        }
        if self.fail_lookup {
            return Err(AppError::External("chat platform is down".to_string()));
        }

        Ok(self
            .users
            .iter()
            .any(|u| u == username)
            .then(|| identity_for(username)))
    }

    async fn announce(&self, text: &str, image_url: Option<&str>) -> Result<()> {
        if self.hang_announce {
            std::future::pending::<()>().await;
        }
        if self.fail_announce {
            return Err(AppError::External("channel unavailable".to_string()));
        }

        self.sent.lock().unwrap().push(SentMessage {
            text: text.to_string(),
            image_url: image_url.map(str::to_string),
        });
        Ok(())
    }
}

/// Image search that either returns `GIF_URL`, fails, or never answers.
#[derive(Default)]
pub struct FakeImages {
    pub fail: bool,
    pub hang: bool,
    pub calls: AtomicUsize,
    pub keywords: Mutex<Vec<String>>,
}

impl FakeImages {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn hanging() -> Self {
        Self {
            hang: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageSupplier for FakeImages {
    fn name(&self) -> &str {
        "FakeImages"
    }

    async fn random_image(&self, keyword: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.keywords.lock().unwrap().push(keyword.to_string());
        if self.hang {
            std::future::pending::<()>().await;
        }
        if self.fail {
            return Err(AppError::External("GIPHY quota exceeded".to_string()));
        }
        Ok(GIF_URL.to_string())
    }
}

/// Always picks the template at a fixed position.
pub struct FixedSelector(pub usize);

impl TemplateSelector for FixedSelector {
    fn select(&self, _count: usize) -> usize {
        self.0
    }
}
