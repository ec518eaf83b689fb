use std::{future::Future, sync::Arc, time::Duration};

use rand::Rng;

use crate::{
    domain::{celebration_text, Announcement, AnnouncementFilter, NewAnnouncement, Sprint, Template},
    error::{AppError, Result},
    integrations::{ChatIdentity, ImageSupplier, NotificationGateway},
    repository::{
        announcement_repository::ALREADY_FINISHED, AnnouncementRepository, SprintRepository,
        TemplateRepository,
    },
};

/// Search keyword used for the reaction image.
pub const CELEBRATION_KEYWORD: &str = "congratulations";

const USER_NOT_FOUND: &str = "User not found.";
const SPRINT_NOT_FOUND: &str = "Sprint not found.";
const NO_TEMPLATES: &str = "No templates found.";

/// Chooses which template celebrates a completion. `count` is never zero.
pub trait TemplateSelector: Send + Sync {
    fn select(&self, count: usize) -> usize;
}

/// Uniform choice using the thread-local RNG.
pub struct RandomTemplateSelector;

impl TemplateSelector for RandomTemplateSelector {
    fn select(&self, count: usize) -> usize {
        rand::thread_rng().gen_range(0..count)
    }
}

/// A best-effort step that did not happen. Never surfaced to the HTTP caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Degradation {
    ImageUnavailable(String),
    NotificationFailed(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub image_url: Option<String>,
    pub announced: bool,
    pub degradations: Vec<Degradation>,
}

#[derive(Debug, Clone)]
pub struct RecordedAnnouncement {
    pub announcement: Announcement,
    pub delivery: DeliveryReport,
}

pub struct AnnouncementService {
    sprint_repo: Arc<dyn SprintRepository>,
    template_repo: Arc<dyn TemplateRepository>,
    announcement_repo: Arc<dyn AnnouncementRepository>,
    gateway: Arc<dyn NotificationGateway>,
    images: Arc<dyn ImageSupplier>,
    selector: Arc<dyn TemplateSelector>,
    call_timeout: Duration,
}

impl AnnouncementService {
    pub fn new(
        sprint_repo: Arc<dyn SprintRepository>,
        template_repo: Arc<dyn TemplateRepository>,
        announcement_repo: Arc<dyn AnnouncementRepository>,
        gateway: Arc<dyn NotificationGateway>,
        images: Arc<dyn ImageSupplier>,
        call_timeout: Duration,
    ) -> Self {
        Self {
            sprint_repo,
            template_repo,
            announcement_repo,
            gateway,
            images,
            selector: Arc::new(RandomTemplateSelector),
            call_timeout,
        }
    }

    pub fn with_selector(mut self, selector: Arc<dyn TemplateSelector>) -> Self {
        self.selector = selector;
        self
    }

    /// List recorded completions, optionally narrowed to one user or one sprint.
    pub async fn list(&self, filter: AnnouncementFilter) -> Result<Vec<Announcement>> {
        match filter {
            AnnouncementFilter::All => self.announcement_repo.list().await,
            AnnouncementFilter::Username(username) => {
                let records = self.announcement_repo.list_by_username(&username).await?;
                if records.is_empty() {
                    return Err(AppError::NotFound(USER_NOT_FOUND.to_string()));
                }
                Ok(records)
            }
            AnnouncementFilter::SprintCode(code) => {
                let sprint = self.find_sprint(&code).await?;
                self.announcement_repo.list_by_sprint(sprint.id).await
            }
        }
    }

    /// Record that `username` finished the sprint `sprint_code` and celebrate it in chat.
    ///
    /// Identity lookup, sprint lookup, the duplicate check and template selection
    /// all run before anything is written. Once the record is stored the call
    /// succeeds; image lookup and the chat post only contribute to the
    /// returned [`DeliveryReport`].
    pub async fn record(&self, username: &str, sprint_code: &str) -> Result<RecordedAnnouncement> {
        let identity = self.resolve_identity(username).await?;
        let sprint = self.find_sprint(sprint_code).await?;

        if self
            .announcement_repo
            .find_by_username_and_sprint(username, sprint.id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(ALREADY_FINISHED.to_string()));
        }

        let template = self.pick_template().await?;

        // The unique index turns a lost race into the same Conflict as above.
        let announcement = self
            .announcement_repo
            .create(NewAnnouncement {
                username: username.to_string(),
                sprint_id: sprint.id,
                template_id: template.id,
            })
            .await?;

        tracing::info!(
            "Recorded completion of sprint {} by {} (announcement {}, template {})",
            sprint.code,
            username,
            announcement.id,
            template.id
        );

        let delivery = self.celebrate(&identity, &sprint, &template).await;

        Ok(RecordedAnnouncement { announcement, delivery })
    }

    async fn resolve_identity(&self, username: &str) -> Result<ChatIdentity> {
        self.bounded(self.gateway.resolve_identity(username))
            .await?
            .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.to_string()))
    }

    async fn find_sprint(&self, code: &str) -> Result<Sprint> {
        self.sprint_repo
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::NotFound(SPRINT_NOT_FOUND.to_string()))
    }

    async fn pick_template(&self) -> Result<Template> {
        let mut templates = self.template_repo.list().await?;
        if templates.is_empty() {
            return Err(AppError::NotFound(NO_TEMPLATES.to_string()));
        }

        let index = self.selector.select(templates.len());
        if index >= templates.len() {
            return Err(AppError::Internal(format!(
                "Template selector returned {} for {} templates",
                index,
                templates.len()
            )));
        }

        Ok(templates.swap_remove(index))
    }

    async fn celebrate(&self, identity: &ChatIdentity, sprint: &Sprint, template: &Template) -> DeliveryReport {
        let mut report = DeliveryReport::default();

        match self.fetch_image().await {
            Ok(url) => report.image_url = Some(url),
            Err(degradation) => report.degradations.push(degradation),
        }

        let text = celebration_text(&identity.mention(), sprint, template);
        match self.push(&text, report.image_url.as_deref()).await {
            Ok(()) => report.announced = true,
            Err(degradation) => report.degradations.push(degradation),
        }

        report
    }

    async fn fetch_image(&self) -> std::result::Result<String, Degradation> {
        self.bounded(self.images.random_image(CELEBRATION_KEYWORD))
            .await
            .map_err(|e| {
                tracing::warn!("Could not retrieve an image from {}: {}", self.images.name(), e);
                Degradation::ImageUnavailable(e.to_string())
            })
    }

    async fn push(&self, text: &str, image_url: Option<&str>) -> std::result::Result<(), Degradation> {
        self.bounded(self.gateway.announce(text, image_url))
            .await
            .map_err(|e| {
                tracing::warn!("Could not send {} message: {}", self.gateway.name(), e);
                Degradation::NotificationFailed(e.to_string())
            })
    }

    async fn bounded<T>(&self, call: impl Future<Output = Result<T>>) -> Result<T> {
        tokio::time::timeout(self.call_timeout, call)
            .await
            .unwrap_or_else(|_| {
                Err(AppError::Integration(format!(
                    "External call timed out after {}ms",
                    self.call_timeout.as_millis()
                )))
            })
    }
}
