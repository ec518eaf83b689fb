use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};
use tokio::sync::OnceCell;

use crate::{
    config::DiscordConfig,
    error::{AppError, Result},
    integrations::{ChatIdentity, NotificationGateway},
};

// Discord channel types that accept plain messages
const GUILD_TEXT: u8 = 0;
const GUILD_ANNOUNCEMENT: u8 = 5;
const MEMBER_SEARCH_LIMIT: &str = "100";

#[derive(Debug, Deserialize)]
struct GuildMember {
    user: DiscordUser,
}

#[derive(Debug, Deserialize)]
struct DiscordUser {
    id: String,
    username: String,
}

#[derive(Debug, Deserialize)]
struct GuildChannel {
    id: String,
    #[serde(rename = "type")]
    kind: u8,
    name: Option<String>,
}

/// Discord REST client posting to one channel of one guild.
pub struct DiscordGateway {
    client: Client,
    config: DiscordConfig,
    channel_id: OnceCell<String>,
}

impl DiscordGateway {
    pub fn new(config: DiscordConfig, timeout: Duration) -> Result<Self> {
        if config.bot_token.is_empty() {
            return Err(AppError::Integration("Discord bot token not configured".to_string()));
        }
        if config.guild_id.is_empty() {
            return Err(AppError::Integration("Discord guild id not configured".to_string()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Integration(e.to_string()))?;

        Ok(Self {
            client,
            config,
            channel_id: OnceCell::new(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base.trim_end_matches('/'), path)
    }

    fn authorization(&self) -> String {
        format!("Bot {}", self.config.bot_token)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let response = self
            .client
            .get(self.url(path))
            .header(AUTHORIZATION, self.authorization())
            .query(query)
            .send()
            .await
            .map_err(|e| AppError::External(format!("Discord request failed: {}", e)))?
            .error_for_status()
            .map_err(|e| AppError::External(format!("Discord returned an error: {}", e)))?;

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::External(format!("Invalid Discord response: {}", e)))
    }

    /// Resolves the configured channel name once and caches its id.
    async fn channel_id(&self) -> Result<&str> {
        let id = self
            .channel_id
            .get_or_try_init(|| async {
                let path = format!("/guilds/{}/channels", self.config.guild_id);
                let channels: Vec<GuildChannel> = self.get_json(&path, &[]).await?;

                find_text_channel(&channels, &self.config.channel_name).ok_or_else(|| {
                    AppError::Integration(format!(
                        "Discord channel '{}' not found in guild",
                        self.config.channel_name
                    ))
                })
            })
            .await?;

        Ok(id.as_str())
    }
}

fn find_member(members: Vec<GuildMember>, username: &str) -> Option<ChatIdentity> {
    members
        .into_iter()
        .find(|member| member.user.username == username)
        .map(|member| ChatIdentity {
            id: member.user.id,
            username: member.user.username,
        })
}

fn find_text_channel(channels: &[GuildChannel], name: &str) -> Option<String> {
    channels
        .iter()
        .filter(|channel| channel.kind == GUILD_TEXT || channel.kind == GUILD_ANNOUNCEMENT)
        .find(|channel| channel.name.as_deref() == Some(name))
        .map(|channel| channel.id.clone())
}

fn message_payload(text: &str, image_url: Option<&str>) -> Value {
    match image_url {
        Some(url) => json!({
            "content": text,
            "embeds": [{ "image": { "url": url } }],
        }),
        None => json!({ "content": text }),
    }
}

#[async_trait]
impl NotificationGateway for DiscordGateway {
    fn name(&self) -> &str {
        "Discord"
    }

    async fn health_check(&self) -> Result<()> {
        let _me: DiscordUser = self.get_json("/users/@me", &[]).await?;
        self.channel_id().await?;
        Ok(())
    }

    async fn resolve_identity(&self, username: &str) -> Result<Option<ChatIdentity>> {
        let path = format!("/guilds/{}/members/search", self.config.guild_id);
        let members: Vec<GuildMember> = self
            .get_json(&path, &[("query", username), ("limit", MEMBER_SEARCH_LIMIT)])
            .await?;

        // search is a prefix match, so only an exact username counts
        Ok(find_member(members, username))
    }

    async fn announce(&self, text: &str, image_url: Option<&str>) -> Result<()> {
        let channel_id = self.channel_id().await?;
        let url = self.url(&format!("/channels/{}/messages", channel_id));

        self.client
            .post(url)
            .header(AUTHORIZATION, self.authorization())
            .json(&message_payload(text, image_url))
            .send()
            .await
            .map_err(|e| AppError::External(format!("Discord request failed: {}", e)))?
            .error_for_status()
            .map_err(|e| AppError::External(format!("Discord rejected the message: {}", e)))?;

        tracing::debug!("Posted accomplishment to Discord channel {}", channel_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: &str, username: &str) -> GuildMember {
        GuildMember {
            user: DiscordUser {
                id: id.to_string(),
                username: username.to_string(),
            },
        }
    }

    #[test]
    fn test_find_member_requires_exact_username() {
        let members = vec![member("1", "johnny"), member("2", "john")];
        let identity = find_member(members, "john").unwrap();
        assert_eq!(identity.id, "2");

        assert!(find_member(vec![member("1", "johnny")], "john").is_none());
    }

    #[test]
    fn test_find_text_channel_skips_voice_channels() {
        let channels: Vec<GuildChannel> = serde_json::from_value(json!([
            { "id": "10", "type": 2, "name": "accomplishments" },
            { "id": "11", "type": 0, "name": "general" },
            { "id": "12", "type": 0, "name": "accomplishments" },
            { "id": "13", "type": 4 }
        ]))
        .unwrap();

        assert_eq!(find_text_channel(&channels, "accomplishments"), Some("12".to_string()));
        assert_eq!(find_text_channel(&channels, "missing"), None);
    }

    #[test]
    fn test_message_payload_embeds_image_only_when_present() {
        let with_image = message_payload("hi", Some("https://media.giphy.com/a.gif"));
        assert_eq!(with_image["embeds"][0]["image"]["url"], "https://media.giphy.com/a.gif");

        let without_image = message_payload("hi", None);
        assert_eq!(without_image, json!({ "content": "hi" }));
    }

    #[test]
    fn test_new_requires_token_and_guild() {
        let missing_token = DiscordGateway::new(DiscordConfig::default(), Duration::from_secs(1));
        assert!(matches!(missing_token, Err(AppError::Integration(_))));

        let missing_guild = DiscordGateway::new(
            DiscordConfig {
                bot_token: "token".to_string(),
                ..Default::default()
            },
            Duration::from_secs(1),
        );
        assert!(matches!(missing_guild, Err(AppError::Integration(_))));
    }
}
