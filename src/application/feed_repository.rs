// Repository trait for sensor feed access
use crate::domain::sample::RawDatapoint;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed request failed: {0}")]
    Transport(String),
    #[error("feed responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("feed payload could not be decoded: {0}")]
    Decode(String),
}

/// One successful delivery from the feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedSnapshot {
    pub datapoints: Vec<RawDatapoint>,
}

impl FeedSnapshot {
    pub fn new(datapoints: Vec<RawDatapoint>) -> Self {
        Self { datapoints }
    }
}

#[async_trait]
pub trait FeedRepository: Send + Sync {
    /// Fetch the datapoints covering `duration` (an API duration such as `24hour`).
    async fn fetch_datapoints(&self, duration: &str) -> Result<FeedSnapshot, FeedError>;
}
