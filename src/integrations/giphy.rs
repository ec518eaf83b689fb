use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    config::GiphyConfig,
    error::{AppError, Result},
    integrations::ImageSupplier,
};

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<Gif>,
}

#[derive(Debug, Deserialize)]
struct Gif {
    images: GifImages,
}

#[derive(Debug, Deserialize)]
struct GifImages {
    original: GifRendition,
}

#[derive(Debug, Deserialize)]
struct GifRendition {
    url: String,
}

/// GIPHY search client. Picks a random result by requesting one item at a random offset.
pub struct GiphyClient {
    client: Client,
    config: GiphyConfig,
}

impl GiphyClient {
    pub fn new(config: GiphyConfig, timeout: Duration) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(AppError::Integration("GIPHY api key not configured".to_string()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Integration(e.to_string()))?;

        Ok(Self { client, config })
    }
}

fn first_original_url(response: SearchResponse) -> Option<String> {
    response
        .data
        .into_iter()
        .next()
        .map(|gif| gif.images.original.url)
}

#[async_trait]
impl ImageSupplier for GiphyClient {
    fn name(&self) -> &str {
        "GIPHY"
    }

    async fn random_image(&self, keyword: &str) -> Result<String> {
        let offset = rand::thread_rng().gen_range(0..self.config.max_offset.max(1)).to_string();
        let url = format!("{}/gifs/search", self.config.api_base.trim_end_matches('/'));

        let response = self
            .client
            .get(url)
            .query(&[
                ("api_key", self.config.api_key.as_str()),
                ("q", keyword),
                ("limit", "1"),
                ("offset", offset.as_str()),
                ("rating", self.config.rating.as_str()),
                ("lang", self.config.lang.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::External(format!("GIPHY request failed: {}", e)))?
            .error_for_status()
            .map_err(|e| AppError::External(format!("GIPHY returned an error: {}", e)))?
            .json::<SearchResponse>()
            .await
            .map_err(|e| AppError::External(format!("Invalid GIPHY response: {}", e)))?;

        first_original_url(response)
            .ok_or_else(|| AppError::External(format!("GIPHY has no results for '{}'", keyword)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_original_url() {
        let response: SearchResponse = serde_json::from_str(
            r#"{
                "data": [
                    { "id": "abc", "images": { "original": { "url": "https://media.giphy.com/abc.gif", "width": "480" } } }
                ],
                "pagination": { "total_count": 4000, "count": 1, "offset": 17 }
            }"#,
        )
        .unwrap();

        assert_eq!(
            first_original_url(response),
            Some("https://media.giphy.com/abc.gif".to_string())
        );
    }

    #[test]
    fn test_empty_result_set() {
        let response: SearchResponse = serde_json::from_str(r#"{ "data": [] }"#).unwrap();
        assert_eq!(first_original_url(response), None);
    }

    #[test]
    fn test_new_requires_api_key() {
        let client = GiphyClient::new(GiphyConfig::default(), Duration::from_secs(1));
        assert!(matches!(client, Err(AppError::Integration(_))));
    }
}
