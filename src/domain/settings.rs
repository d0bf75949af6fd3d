// Per-instance render settings
use super::canvas::Point;
use super::color::Rgba;
use std::time::Duration;

pub const DEFAULT_TEXT_COLOR: &str = "#555555";
pub const DEFAULT_LINE_COLOR: &str = "#0000ff";
pub const DEFAULT_INNER_COLOR: &str = "#03030b";
pub const DEFAULT_OUTER_COLOR: &str = "#a000ff";
pub const DEFAULT_BACKGROUND_COLOR: &str = "#ffffff";
pub const DEFAULT_FONT: &str = "9pt Arial";
pub const DEFAULT_SIZE: u32 = 100;

/// Time span of the requested history; also decides how often the feed is polled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeSpan {
    ThreeMonths,
    FourDays,
    LastHour,
    #[default]
    TwentyFourHours,
}

impl TimeSpan {
    /// Unknown labels fall back to 24 hours.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "3 months" => TimeSpan::ThreeMonths,
            "4 days" => TimeSpan::FourDays,
            "last hour" => TimeSpan::LastHour,
            _ => TimeSpan::TwentyFourHours,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeSpan::ThreeMonths => "3 months",
            TimeSpan::FourDays => "4 days",
            TimeSpan::LastHour => "last hour",
            TimeSpan::TwentyFourHours => "24 hours",
        }
    }

    /// `duration` query parameter understood by the feed API.
    pub fn api_duration(&self) -> &'static str {
        match self {
            TimeSpan::ThreeMonths => "3month",
            TimeSpan::FourDays => "4day",
            TimeSpan::LastHour => "1hour",
            TimeSpan::TwentyFourHours => "24hour",
        }
    }

    pub fn poll_interval(&self) -> Duration {
        let base_ms: u64 = match self {
            TimeSpan::ThreeMonths => 86_400,
            TimeSpan::FourDays => 6_000,
            TimeSpan::LastHour => 500,
            TimeSpan::TwentyFourHours => 2_000,
        };
        Duration::from_millis(base_ms * 60)
    }
}

/// Option values as written in the widget's option string, before resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub text_color: String,
    pub line_color: String,
    pub inner_color: String,
    pub outer_color: String,
    pub background_color: String,
    pub time_span: TimeSpan,
    pub show_clock: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            text_color: DEFAULT_TEXT_COLOR.to_string(),
            line_color: DEFAULT_LINE_COLOR.to_string(),
            inner_color: DEFAULT_INNER_COLOR.to_string(),
            outer_color: DEFAULT_OUTER_COLOR.to_string(),
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            time_span: TimeSpan::default(),
            show_clock: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub face_color: Rgba,
    pub line_color: Rgba,
    pub inner_color: Rgba,
    pub outer_color: Rgba,
    pub background_color: Rgba,
    pub font: String,
    pub time_span: TimeSpan,
    pub show_clock: bool,
    pub width: u32,
    pub height: u32,
    pub center: Point,
    pub radius: f64,
}

impl RenderSettings {
    pub fn resolve(options: &RenderOptions, width: u32, height: u32, font: &str) -> Self {
        let width = if width == 0 { DEFAULT_SIZE } else { width };
        let height = if height == 0 { DEFAULT_SIZE } else { height };
        let font = if font.trim().is_empty() {
            DEFAULT_FONT
        } else {
            font.trim()
        };

        Self {
            face_color: resolve_color("text-color", &options.text_color, DEFAULT_TEXT_COLOR),
            line_color: resolve_color("line-color", &options.line_color, DEFAULT_LINE_COLOR),
            inner_color: resolve_color("grid-color", &options.inner_color, DEFAULT_INNER_COLOR),
            outer_color: resolve_color("border-color", &options.outer_color, DEFAULT_OUTER_COLOR),
            background_color: resolve_color(
                "background-color",
                &options.background_color,
                DEFAULT_BACKGROUND_COLOR,
            ),
            font: font.to_string(),
            time_span: options.time_span,
            show_clock: options.show_clock,
            width,
            height,
            center: Point::new(f64::from(width) / 2.0, f64::from(height) / 2.0),
            radius: f64::from(width) / 2.2,
        }
    }
}

fn resolve_color(key: &str, value: &str, fallback: &str) -> Rgba {
    match Rgba::parse(value) {
        Ok(color) => color,
        Err(e) => {
            tracing::warn!("Option {}: {}, using {}", key, e, fallback);
            Rgba::parse(fallback).unwrap_or(Rgba::rgb(0, 0, 0))
        }
    }
}
