// Repaint loop - Fixed 1 Hz redraw of the radial graph
use crate::application::feed_poller::FeedReceiver;
use crate::application::radial_graph::RadialGraph;
use crate::application::task::TaskHandle;
use crate::infrastructure::svg_canvas::SvgCanvas;
use chrono::{Local, NaiveDateTime};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

pub const REPAINT_PERIOD: Duration = Duration::from_secs(1);

pub type FrameReceiver = watch::Receiver<Arc<str>>;

pub struct RepaintLoop {
    graph: RadialGraph,
    feed: FeedReceiver,
    period: Duration,
}

impl RepaintLoop {
    pub fn new(graph: RadialGraph, feed: FeedReceiver) -> Self {
        Self {
            graph,
            feed,
            period: REPAINT_PERIOD,
        }
    }

    pub fn with_period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    /// Pick up the newest delivery, if any, and paint one SVG frame.
    pub fn tick(&mut self, now: &NaiveDateTime) -> String {
        // a closed feed channel just means no new data
        if self.feed.has_changed().unwrap_or(false) {
            let update = self.feed.borrow_and_update().clone();
            if let Some(update) = update {
                self.graph.apply_update(update);
            }
        }

        let settings = self.graph.settings();
        let mut canvas = SvgCanvas::new(settings.width, settings.height);
        self.graph.draw(&mut canvas, now);
        canvas.finish()
    }

    /// Paint the first frame right away, then keep repainting until cancelled.
    pub fn spawn(mut self) -> (TaskHandle, FrameReceiver) {
        let first = self.tick(&Local::now().naive_local());
        let (tx, rx) = watch::channel(Arc::<str>::from(first));

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // the first tick completes immediately and that frame already exists
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let frame = self.tick(&Local::now().naive_local());
                tx.send_replace(Arc::from(frame));
            }
        });

        (TaskHandle::new("repaint", handle), rx)
    }
}
