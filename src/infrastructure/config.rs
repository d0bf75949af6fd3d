use crate::domain::settings::{
    RenderOptions, TimeSpan, DEFAULT_BACKGROUND_COLOR, DEFAULT_FONT, DEFAULT_INNER_COLOR,
    DEFAULT_LINE_COLOR, DEFAULT_OUTER_COLOR, DEFAULT_SIZE, DEFAULT_TEXT_COLOR,
};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub feed: FeedSettings,
    #[serde(default)]
    pub widget: WidgetSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FeedSettings {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default)]
    pub resource: String,
    #[serde(default)]
    pub api_key: String,
    /// Read datapoints from this JSON file instead of the remote API.
    #[serde(default)]
    pub fixture: Option<String>,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            resource: String::new(),
            api_key: String::new(),
            fixture: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct WidgetSettings {
    /// Option string in `key:value;` form.
    #[serde(default)]
    pub options: String,
    #[serde(default = "default_size")]
    pub width: u32,
    #[serde(default = "default_size")]
    pub height: u32,
    #[serde(default = "default_font")]
    pub font: String,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            options: String::new(),
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            font: default_font(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_api_base() -> String {
    "https://api.pachube.com/v2".to_string()
}

fn default_size() -> u32 {
    DEFAULT_SIZE
}

fn default_font() -> String {
    DEFAULT_FONT.to_string()
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

/// Load `config/radial.*` (optional) with `RADIAL__SECTION__KEY` environment overrides.
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/radial").required(false))
        .add_source(config::Environment::with_prefix("RADIAL").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Split an option string into its `key:value;` pairs.
///
/// Keys and values are trimmed; a trailing pair without `;` is ignored.
pub fn split_options(options: &str) -> HashMap<String, String> {
    let mut pairs = HashMap::new();
    let mut rest = options;

    while let Some(colon) = rest.find(':') {
        let after = &rest[colon + 1..];
        let Some(semi) = after.find(';') else {
            break;
        };
        pairs.insert(
            rest[..colon].trim().to_string(),
            after[..semi].trim().to_string(),
        );
        rest = &after[semi + 1..];
    }

    pairs
}

/// Resolve an option string against the documented defaults.
pub fn parse_options(options: &str) -> RenderOptions {
    let pairs = split_options(options);
    let get = |key: &str, default: &str| -> String {
        pairs
            .get(key)
            .filter(|v| !v.is_empty())
            .cloned()
            .unwrap_or_else(|| default.to_string())
    };

    let time_span = TimeSpan::from_label(&get("timespan", TimeSpan::default().label()));

    RenderOptions {
        text_color: get("text-color", DEFAULT_TEXT_COLOR),
        line_color: get("line-color", DEFAULT_LINE_COLOR),
        inner_color: get("grid-color", DEFAULT_INNER_COLOR),
        outer_color: get("border-color", DEFAULT_OUTER_COLOR),
        background_color: get("background-color", DEFAULT_BACKGROUND_COLOR),
        time_span,
        show_clock: pairs.get("showclock").map(String::as_str) != Some("no"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options_overrides() {
        let options = parse_options("line-color:#ff0000;showclock:no;");

        assert_eq!(options.line_color, "#ff0000");
        assert!(!options.show_clock);
        assert_eq!(
            options,
            RenderOptions {
                line_color: "#ff0000".to_string(),
                show_clock: false,
                ..RenderOptions::default()
            }
        );
    }

    #[test]
    fn test_parse_options_empty_means_defaults() {
        assert_eq!(parse_options(""), RenderOptions::default());
        assert_eq!(parse_options("garbage without pairs"), RenderOptions::default());
        assert_eq!(parse_options("text-color:;"), RenderOptions::default());
    }

    #[test]
    fn test_parse_options_trims_and_needs_terminator() {
        let options = parse_options(" timespan : 4 days ; border-color:#123456");

        assert_eq!(options.time_span, TimeSpan::FourDays);
        // no trailing ';', so the pair is not recognized
        assert_eq!(options.outer_color, DEFAULT_OUTER_COLOR);
    }

    #[test]
    fn test_parse_options_unknown_timespan() {
        let options = parse_options("timespan:1 week;showclock:yes;");
        assert_eq!(options.time_span, TimeSpan::TwentyFourHours);
        assert!(options.show_clock);
    }

    #[test]
    fn test_split_options_keeps_colons_in_values() {
        let pairs = split_options("a:b:c;d:e;");
        assert_eq!(pairs.get("a").map(String::as_str), Some("b:c"));
        assert_eq!(pairs.get("d").map(String::as_str), Some("e"));
    }

    #[test]
    fn test_config_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.widget.width, 100);
        assert_eq!(config.widget.font, "9pt Arial");
        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert!(config.feed.fixture.is_none());
    }
}
