// Sample and series window domain models
use chrono::{DateTime, Local, NaiveDateTime};
use serde::Deserialize;
use thiserror::Error;

/// A datapoint exactly as the feed delivers it.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RawDatapoint {
    #[serde(deserialize_with = "text_or_number")]
    pub value: String,
    pub at: String,
}

// Feeds send values as strings, but a bare JSON number is accepted as well.
fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Text(String),
        Number(f64),
    }

    Ok(match Loose::deserialize(deserializer)? {
        Loose::Text(text) => text,
        Loose::Number(number) => number.to_string(),
    })
}

impl RawDatapoint {
    pub fn new(value: impl Into<String>, at: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            at: at.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub value: f64,
    pub timestamp: NaiveDateTime,
}

impl Sample {
    pub fn new(value: f64, timestamp: NaiveDateTime) -> Self {
        Self { value, timestamp }
    }
}

/// Problems found while ingesting a feed delivery. None of them are fatal.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum IngestIssue {
    #[error("datapoint {index}: value {raw:?} is not a number, kept as NaN")]
    InvalidValue { index: usize, raw: String },
    #[error("datapoint {index}: timestamp {raw:?} could not be parsed, dropped")]
    InvalidTimestamp { index: usize, raw: String },
}

/// All samples currently known, in the order the feed delivered them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesWindow {
    samples: Vec<Sample>,
}

impl SeriesWindow {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Build a window from raw feed datapoints, collecting every issue encountered.
    pub fn ingest(raw: &[RawDatapoint]) -> (Self, Vec<IngestIssue>) {
        let mut samples = Vec::with_capacity(raw.len());
        let mut issues = Vec::new();

        for (index, point) in raw.iter().enumerate() {
            let Some(timestamp) = parse_timestamp(&point.at) else {
                issues.push(IngestIssue::InvalidTimestamp {
                    index,
                    raw: point.at.clone(),
                });
                continue;
            };

            let value = match point.value.trim().parse::<f64>() {
                Ok(v) => v,
                Err(_) => {
                    issues.push(IngestIssue::InvalidValue {
                        index,
                        raw: point.value.clone(),
                    });
                    f64::NAN
                }
            };

            samples.push(Sample::new(value, timestamp));
        }

        (Self::new(samples), issues)
    }
}

/// Parse a feed timestamp as a local wall-clock time.
///
/// Everything from the first `.` onwards is discarded, fractional seconds and zone
/// suffix alike, and the rest is read as local time. A prefix that still carries an
/// explicit offset (no fraction was present) is honoured and converted to local time.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    let prefix = match trimmed.find('.').filter(|&idx| idx > 0) {
        Some(idx) => &trimmed[..idx],
        None => trimmed,
    };

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(prefix, format) {
            return Some(parsed);
        }
    }

    DateTime::parse_from_rfc3339(prefix)
        .ok()
        .map(|dt| dt.with_timezone(&Local).naive_local())
}
