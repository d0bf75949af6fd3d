// Pachube feed repository implementation
use crate::application::feed_repository::{FeedError, FeedRepository, FeedSnapshot};
use crate::domain::sample::RawDatapoint;
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Clone)]
pub struct PachubeRepository {
    client: reqwest::Client,
    api_base: String,
    resource: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct DatastreamResponse {
    #[serde(default)]
    datapoints: Vec<RawDatapoint>,
}

impl PachubeRepository {
    pub fn new(api_base: String, resource: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            resource: resource.trim_matches('/').to_string(),
            api_key,
        }
    }

    fn build_url(&self, duration: &str) -> String {
        format!(
            "{}/{}.json?duration={}&key={}",
            self.api_base,
            self.resource,
            urlencoding::encode(duration),
            urlencoding::encode(&self.api_key)
        )
    }
}

/// Decode a datastream JSON body. A body without datapoints is an empty delivery.
pub fn decode_datastream(body: &str) -> Result<FeedSnapshot, FeedError> {
    let response: DatastreamResponse =
        serde_json::from_str(body).map_err(|e| FeedError::Decode(e.to_string()))?;
    Ok(FeedSnapshot::new(response.datapoints))
}

#[async_trait]
impl FeedRepository for PachubeRepository {
    async fn fetch_datapoints(&self, duration: &str) -> Result<FeedSnapshot, FeedError> {
        tracing::debug!("Requesting {} datapoints for {}", duration, self.resource);

        let response = self
            .client
            .get(self.build_url(duration))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| FeedError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Status { status, body });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FeedError::Transport(e.to_string()))?;
        decode_datastream(&body)
    }
}
