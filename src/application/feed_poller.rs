// Feed poller - Periodically refreshes the series window from the feed
use crate::application::feed_repository::{FeedError, FeedRepository};
use crate::application::radial_graph::FeedUpdate;
use crate::application::task::TaskHandle;
use crate::domain::sample::SeriesWindow;
use crate::domain::settings::TimeSpan;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

pub type FeedReceiver = watch::Receiver<Option<FeedUpdate>>;

#[derive(Clone)]
pub struct FeedPoller {
    repository: Arc<dyn FeedRepository>,
    time_span: TimeSpan,
    interval: Duration,
}

impl FeedPoller {
    pub fn new(repository: Arc<dyn FeedRepository>, time_span: TimeSpan) -> Self {
        Self {
            repository,
            time_span,
            interval: time_span.poll_interval(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Fetch once and publish the new window. On failure nothing is published.
    pub async fn poll_once(
        &self,
        tx: &watch::Sender<Option<FeedUpdate>>,
    ) -> Result<usize, FeedError> {
        let snapshot = self
            .repository
            .fetch_datapoints(self.time_span.api_duration())
            .await?;

        let (window, issues) = SeriesWindow::ingest(&snapshot.datapoints);
        for issue in &issues {
            tracing::warn!("{}", issue);
        }

        let samples = window.len();
        tx.send_replace(Some(FeedUpdate {
            window: Arc::new(window),
            label: self.time_span.label().to_string(),
        }));
        Ok(samples)
    }

    /// Poll now and then every interval until the returned handle is cancelled or dropped.
    pub fn spawn(self) -> (TaskHandle, FeedReceiver) {
        let (tx, rx) = watch::channel(None);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                tracing::info!(
                    "Updating feed data ({}) - next in {}s",
                    self.time_span.api_duration(),
                    self.interval.as_secs()
                );

                match self.poll_once(&tx).await {
                    Ok(samples) => tracing::debug!("Feed delivered {} samples", samples),
                    Err(e) => tracing::warn!("Feed update failed, keeping last data: {}", e),
                }
            }
        });

        (TaskHandle::new("feed poll", handle), rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::feed_repository::FeedSnapshot;
    use crate::domain::sample::RawDatapoint;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Repository replaying canned responses; repeats the last one when exhausted.
    pub struct ScriptedRepository {
        responses: Mutex<VecDeque<Result<FeedSnapshot, String>>>,
        pub requested: Mutex<Vec<String>>,
    }

    impl ScriptedRepository {
        pub fn new(responses: Vec<Result<FeedSnapshot, String>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl FeedRepository for ScriptedRepository {
        async fn fetch_datapoints(&self, duration: &str) -> Result<FeedSnapshot, FeedError> {
            self.requested.lock().unwrap().push(duration.to_string());
            let mut responses = self.responses.lock().unwrap();
            let next = if responses.len() > 1 {
                responses.pop_front()
            } else {
                responses.front().cloned()
            };
            match next {
                Some(Ok(snapshot)) => Ok(snapshot),
                Some(Err(reason)) => Err(FeedError::Transport(reason)),
                None => Err(FeedError::Transport("no response scripted".to_string())),
            }
        }
    }

    fn snapshot(values: &[&str]) -> FeedSnapshot {
        FeedSnapshot::new(
            values
                .iter()
                .enumerate()
                .map(|(i, v)| RawDatapoint::new(*v, format!("2011-04-08T0{}:15:00.000Z", i)))
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_poll_once_publishes_window() {
        let repo = Arc::new(ScriptedRepository::new(vec![Ok(snapshot(&["14", "15"]))]));
        let poller = FeedPoller::new(repo.clone(), TimeSpan::FourDays);
        let (tx, rx) = watch::channel(None);

        let samples = poller.poll_once(&tx).await.unwrap();

        assert_eq!(samples, 2);
        let update = rx.borrow().clone().unwrap();
        assert_eq!(update.window.len(), 2);
        assert_eq!(update.label, "4 days");
        assert_eq!(*repo.requested.lock().unwrap(), vec!["4day".to_string()]);
    }

    #[tokio::test]
    async fn test_failed_poll_keeps_previous_window() {
        let repo = Arc::new(ScriptedRepository::new(vec![
            Ok(snapshot(&["14"])),
            Err("connection reset".to_string()),
        ]));
        let poller = FeedPoller::new(repo, TimeSpan::default());
        let (tx, rx) = watch::channel(None);

        poller.poll_once(&tx).await.unwrap();
        let first = rx.borrow().clone().unwrap().window;

        assert!(poller.poll_once(&tx).await.is_err());
        let current = rx.borrow().clone().unwrap().window;
        assert!(Arc::ptr_eq(&first, &current));
    }

    #[tokio::test]
    async fn test_spawned_poller_repeats_until_cancelled() {
        let repo = Arc::new(ScriptedRepository::new(vec![Ok(snapshot(&["1", "2", "3"]))]));
        let poller =
            FeedPoller::new(repo.clone(), TimeSpan::LastHour).with_interval(Duration::from_millis(10));

        let (handle, mut rx) = poller.spawn();
        rx.changed().await.unwrap();
        rx.changed().await.unwrap();
        handle.cancel();
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert!(handle.is_finished());
        assert!(repo.requested.lock().unwrap().len() >= 2);
        assert_eq!(rx.borrow().as_ref().unwrap().window.len(), 3);
    }
}
