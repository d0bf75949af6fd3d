// Feed repository backed by a datastream JSON file
use crate::application::feed_repository::{FeedError, FeedRepository, FeedSnapshot};
use crate::infrastructure::pachube_repository::decode_datastream;
use async_trait::async_trait;
use std::path::PathBuf;

/// Serves the same recorded datastream on every poll, whatever duration is asked for.
#[derive(Debug, Clone)]
pub struct FixtureRepository {
    path: PathBuf,
}

impl FixtureRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FeedRepository for FixtureRepository {
    async fn fetch_datapoints(&self, _duration: &str) -> Result<FeedSnapshot, FeedError> {
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| FeedError::Transport(format!("{}: {}", self.path.display(), e)))?;
        decode_datastream(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::feed_poller::FeedPoller;
    use crate::application::radial_graph::{GraphPhase, RadialGraph};
    use crate::domain::arc_path::half_ranges;
    use crate::domain::canvas::recording::RecordingCanvas;
    use crate::domain::settings::{RenderSettings, TimeSpan};
    use crate::infrastructure::config::parse_options;
    use chrono::NaiveDate;
    use std::sync::Arc;
    use tokio::sync::watch;

    const SAMPLE_FEED: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/sample_feed.json");

    #[tokio::test]
    async fn test_reads_sample_feed() {
        let snapshot = FixtureRepository::new(SAMPLE_FEED)
            .fetch_datapoints("24hour")
            .await
            .unwrap();

        assert_eq!(snapshot.datapoints.len(), 96);
        assert_eq!(snapshot.datapoints[0].value, "15");
    }

    #[tokio::test]
    async fn test_missing_file_is_a_feed_error() {
        let result = FixtureRepository::new("does/not/exist.json")
            .fetch_datapoints("24hour")
            .await;
        assert!(matches!(result, Err(FeedError::Transport(_))));
    }

    #[tokio::test]
    async fn test_sample_feed_end_to_end() {
        let options = parse_options("timespan:24 hours;showclock:yes;");
        let settings = RenderSettings::resolve(&options, 220, 220, "9pt Arial");
        let poller = FeedPoller::new(Arc::new(FixtureRepository::new(SAMPLE_FEED)), TimeSpan::default());
        let (tx, rx) = watch::channel(None);

        assert_eq!(poller.poll_once(&tx).await.unwrap(), 96);
        let update = rx.borrow().clone().unwrap();
        assert_eq!(half_ranges(update.window.len()), (0..48, 48..96));

        let mut graph = RadialGraph::new(settings);
        graph.apply_update(update);
        assert_eq!(graph.phase(), GraphPhase::Plotting);

        let now = NaiveDate::from_ymd_opt(2011, 4, 8)
            .unwrap()
            .and_hms_opt(16, 40, 0)
            .unwrap();
        let mut canvas = RecordingCanvas::new();
        graph.draw(&mut canvas, &now);
        assert!(!canvas.calls.is_empty());
    }
}
