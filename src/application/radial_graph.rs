// Radial graph - One rendering instance: settings, current series, and the frame painter
use crate::domain::arc_path::{half_ranges, ArcPath};
use crate::domain::canvas::{Canvas, Point, RadialGradient};
use crate::domain::clock::ClockState;
use crate::domain::color::Rgba;
use crate::domain::normalizer::NormalizationCache;
use crate::domain::polar::{polar_offset, project};
use crate::domain::sample::SeriesWindow;
use crate::domain::settings::RenderSettings;
use chrono::NaiveDateTime;
use std::f64::consts::TAU;
use std::sync::Arc;

pub const SYNCHRONIZING_MESSAGE: &str = "( synchronizing )";

const FACE_LINE_WIDTH: f64 = 3.0;
const DATA_LINE_WIDTH: f64 = 1.0;
const HAND_COLOR: Rgba = Rgba::rgba(0, 0, 0, 0.3);
const HOUR_HAND_LENGTH: f64 = 0.9;
const SECONDS_ARC_RADIUS: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphPhase {
    AwaitingData,
    Plotting,
}

/// A series delivery as published by the feed poller.
#[derive(Debug, Clone)]
pub struct FeedUpdate {
    pub window: Arc<SeriesWindow>,
    pub label: String,
}

pub struct RadialGraph {
    settings: RenderSettings,
    window: Option<Arc<SeriesWindow>>,
    message: String,
    cache: NormalizationCache,
    first_half_fill: RadialGradient,
    second_half_fill: RadialGradient,
}

impl RadialGraph {
    pub fn new(settings: RenderSettings) -> Self {
        let inner = settings.inner_color;
        let outer = settings.outer_color;
        // the second half is the fainter of the two
        let first_half_fill = RadialGradient::new(Point::ORIGIN, 0.0, settings.radius)
            .with_stop(0.0, inner.with_alpha(1.0))
            .with_stop(1.0, outer.with_alpha(0.5));
        let second_half_fill = RadialGradient::new(Point::ORIGIN, 0.0, settings.radius)
            .with_stop(0.0, inner.with_alpha(0.5))
            .with_stop(1.0, outer.with_alpha(0.6));

        Self {
            settings,
            window: None,
            message: SYNCHRONIZING_MESSAGE.to_string(),
            cache: NormalizationCache::new(),
            first_half_fill,
            second_half_fill,
        }
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn phase(&self) -> GraphPhase {
        match self.window {
            Some(_) => GraphPhase::Plotting,
            None => GraphPhase::AwaitingData,
        }
    }

    /// Replace the series wholesale. An empty delivery returns the graph to awaiting data.
    pub fn apply_update(&mut self, update: FeedUpdate) {
        self.cache.invalidate();
        if update.window.is_empty() {
            if self.window.is_some() {
                tracing::warn!("Feed delivered no datapoints, waiting for data again");
            }
            self.window = None;
            self.message = SYNCHRONIZING_MESSAGE.to_string();
            return;
        }

        tracing::debug!("Plotting {} samples", update.window.len());
        self.window = Some(update.window);
        self.message = update.label;
    }

    /// Paint one complete frame.
    pub fn draw(&mut self, canvas: &mut dyn Canvas, now: &NaiveDateTime) {
        canvas.clear();
        self.plot_clock_face(canvas);
        if self.settings.show_clock {
            self.plot_clock_hands(canvas, now);
        }
        self.plot_data_points(canvas);
    }

    fn plot_clock_face(&self, canvas: &mut dyn Canvas) {
        let radius = self.settings.radius;
        canvas.save();
        canvas.translate(self.settings.center.x, self.settings.center.y);

        canvas.set_stroke(self.settings.face_color, FACE_LINE_WIDTH);
        canvas.set_fill_color(self.settings.background_color);
        canvas.begin_path();
        canvas.arc(Point::ORIGIN, radius, 0.0, TAU);
        canvas.stroke_path();
        canvas.fill_path();

        // rough centering: about 3px per character
        let offset = self.message.chars().count() as f64 * 3.0;
        canvas.set_fill_color(self.settings.face_color);
        canvas.fill_text(
            &self.message,
            Point::new(-offset, -radius - 8.0),
            &self.settings.font,
        );

        canvas.restore();
    }

    fn plot_clock_hands(&self, canvas: &mut dyn Canvas, now: &NaiveDateTime) {
        let radius = self.settings.radius;
        let clock = ClockState::at(now);

        canvas.save();
        canvas.translate(self.settings.center.x, self.settings.center.y);
        canvas.set_stroke(HAND_COLOR, radius / 10.0);

        canvas.begin_path();
        canvas.move_to(Point::ORIGIN);
        canvas.line_to(polar_offset(HOUR_HAND_LENGTH * radius, clock.hour_fraction));
        canvas.stroke_path();

        canvas.begin_path();
        canvas.move_to(Point::ORIGIN);
        canvas.line_to(polar_offset(radius, clock.minute_fraction));
        canvas.stroke_path();

        let (start, end) = clock.seconds_arc();
        canvas.begin_path();
        canvas.arc(Point::ORIGIN, SECONDS_ARC_RADIUS * radius, start, end);
        canvas.stroke_path();

        canvas.restore();
    }

    fn plot_data_points(&mut self, canvas: &mut dyn Canvas) {
        let Some(window) = &self.window else {
            return;
        };
        let series = self.cache.get(window, self.settings.radius);
        let projected: Vec<Point> = series
            .points
            .iter()
            .map(|p| project(p.amount, &p.timestamp))
            .collect();
        let (first, second) = half_ranges(projected.len());

        canvas.save();
        canvas.translate(self.settings.center.x, self.settings.center.y);
        canvas.set_gradient(&self.first_half_fill);
        canvas.set_stroke(self.settings.line_color, DATA_LINE_WIDTH);

        // first half is filled only
        canvas.begin_path();
        ArcPath::closed(&projected[first]).trace(canvas);
        canvas.fill_path();

        canvas.begin_path();
        canvas.set_gradient(&self.second_half_fill);
        ArcPath::closed(&projected[second]).trace(canvas);
        canvas.stroke_path();
        canvas.fill_path();

        canvas.restore();
    }
}
