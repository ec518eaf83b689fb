use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;

pub mod discord;
pub mod giphy;

pub use discord::DiscordGateway;
pub use giphy::GiphyClient;

/// A chat-platform user that can be mentioned in an announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatIdentity {
    pub id: String,
    pub username: String,
}

impl ChatIdentity {
    pub fn mention(&self) -> String {
        format!("<@{}>", self.id)
    }
}

/// Chat platform used to verify users and post accomplishment messages.
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    fn name(&self) -> &str;
    async fn health_check(&self) -> Result<()>;
    /// `Ok(None)` means the platform answered and has no such user.
    async fn resolve_identity(&self, username: &str) -> Result<Option<ChatIdentity>>;
    async fn announce(&self, text: &str, image_url: Option<&str>) -> Result<()>;
}

/// Keyword-based image search returning one randomly chosen result.
#[async_trait]
pub trait ImageSupplier: Send + Sync {
    fn name(&self) -> &str;
    async fn random_image(&self, keyword: &str) -> Result<String>;
}
