pub mod announcement_service;

use std::{sync::Arc, time::Duration};
use sqlx::SqlitePool;
use crate::repository::*;
use crate::integrations::{ImageSupplier, NotificationGateway};
use announcement_service::AnnouncementService;

pub use announcement_service::{
    Degradation, DeliveryReport, RandomTemplateSelector, RecordedAnnouncement, TemplateSelector,
};

pub struct ServiceContext {
    pub sprint_repo: Arc<dyn SprintRepository>,
    pub template_repo: Arc<dyn TemplateRepository>,
    pub announcement_service: Arc<AnnouncementService>,
    pub db_pool: SqlitePool,
}

impl ServiceContext {
    pub fn new(
        db_pool: SqlitePool,
        gateway: Arc<dyn NotificationGateway>,
        images: Arc<dyn ImageSupplier>,
        call_timeout: Duration,
    ) -> Self {
        let sprint_repo: Arc<dyn SprintRepository> = Arc::new(SqliteSprintRepository::new(db_pool.clone()));
        let template_repo: Arc<dyn TemplateRepository> = Arc::new(SqliteTemplateRepository::new(db_pool.clone()));
        let announcement_repo: Arc<dyn AnnouncementRepository> =
            Arc::new(SqliteAnnouncementRepository::new(db_pool.clone()));

        let announcement_service = Arc::new(AnnouncementService::new(
            sprint_repo.clone(),
            template_repo.clone(),
            announcement_repo,
            gateway,
            images,
            call_timeout,
        ));

        Self {
            sprint_repo,
            template_repo,
            announcement_service,
            db_pool,
        }
    }
}
