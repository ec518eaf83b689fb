use std::time::Duration;

use serde::Deserialize;
use config::{Config, ConfigError, Environment, File};

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub integrations: IntegrationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct IntegrationConfig {
    /// Upper bound for every outbound call to Discord or GIPHY.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub discord: DiscordConfig,
    #[serde(default)]
    pub giphy: GiphyConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DiscordConfig {
    #[serde(default)]
    pub bot_token: String,
    #[serde(default)]
    pub guild_id: String,
    #[serde(default = "default_channel_name")]
    pub channel_name: String,
    #[serde(default = "default_discord_api_base")]
    pub api_base: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GiphyConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_giphy_api_base")]
    pub api_base: String,
    /// Search results are sampled from `0..max_offset`.
    #[serde(default = "default_giphy_max_offset")]
    pub max_offset: u32,
    #[serde(default = "default_giphy_rating")]
    pub rating: String,
    #[serde(default = "default_giphy_lang")]
    pub lang: String,
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_channel_name() -> String {
    "accomplishments".to_string()
}

fn default_discord_api_base() -> String {
    "https://discord.com/api/v10".to_string()
}

fn default_giphy_api_base() -> String {
    "https://api.giphy.com/v1".to_string()
}

fn default_giphy_max_offset() -> u32 {
    5000
}

fn default_giphy_rating() -> String {
    "g".to_string()
}

fn default_giphy_lang() -> String {
    "en".to_string()
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.base_url", "http://localhost:3000")?
            .set_default("database.url", "sqlite://kudos.db?mode=rwc")?
            .set_default("database.max_connections", 10)?
            .set_default("integrations.timeout_secs", 5)?

            // Add config file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))

            // Add environment variables (with KUDOS__ prefix, double underscore separates levels)
            .add_source(Environment::with_prefix("KUDOS").separator("__"))

            .build()?;

        config.try_deserialize()
    }
}

impl IntegrationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
                base_url: "http://localhost:3000".to_string(),
            },
            database: DatabaseConfig {
                url: "sqlite://kudos.db?mode=rwc".to_string(),
                max_connections: 10,
            },
            integrations: IntegrationConfig::default(),
        }
    }
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            discord: DiscordConfig::default(),
            giphy: GiphyConfig::default(),
        }
    }
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            guild_id: String::new(),
            channel_name: default_channel_name(),
            api_base: default_discord_api_base(),
        }
    }
}

impl Default for GiphyConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: default_giphy_api_base(),
            max_offset: default_giphy_max_offset(),
            rating: default_giphy_rating(),
            lang: default_giphy_lang(),
        }
    }
}
