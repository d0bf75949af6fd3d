// Scaling of a series window onto the plot radius
use super::sample::SeriesWindow;
use chrono::NaiveDateTime;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedPoint {
    /// Distance from the center, `NaN` when the sample value was not a number.
    pub amount: f64,
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSeries {
    pub scale: f64,
    pub min: f64,
    pub max: f64,
    pub points: Vec<NormalizedPoint>,
}

impl NormalizedSeries {
    pub fn empty() -> Self {
        Self {
            scale: 0.0,
            min: 0.0,
            max: 0.0,
            points: Vec::new(),
        }
    }

    /// Map every sample to `(value - min) * scale` with `scale = radius / (max - min)`.
    ///
    /// Non-finite values take no part in the range and come out as `NaN` amounts.
    /// When the range is degenerate (`max == min`, or nothing finite) the scale is 0
    /// and every amount collapses onto the center.
    pub fn from_window(window: &SeriesWindow, radius: f64) -> Self {
        let mut range: Option<(f64, f64)> = None;
        for sample in window.samples() {
            if !sample.value.is_finite() {
                continue;
            }
            range = Some(match range {
                None => (sample.value, sample.value),
                Some((min, max)) => (min.min(sample.value), max.max(sample.value)),
            });
        }

        let Some((min, max)) = range else {
            let mut series = Self::empty();
            series.points = window
                .samples()
                .iter()
                .map(|s| NormalizedPoint {
                    amount: f64::NAN,
                    timestamp: s.timestamp,
                })
                .collect();
            return series;
        };

        let spread = max - min;
        let scale = if spread > 0.0 && (radius / spread).is_finite() {
            radius / spread
        } else {
            0.0
        };

        let points = window
            .samples()
            .iter()
            .map(|s| NormalizedPoint {
                amount: if s.value.is_finite() {
                    // rounding in `scale` can overshoot the rim by an ulp
                    ((s.value - min) * scale).min(radius).max(0.0)
                } else {
                    f64::NAN
                },
                timestamp: s.timestamp,
            })
            .collect();

        Self {
            scale,
            min,
            max,
            points,
        }
    }
}

/// Keeps the normalized form of the last window seen, keyed on the window's identity.
#[derive(Debug, Default)]
pub struct NormalizationCache {
    source: Option<Arc<SeriesWindow>>,
    series: Option<Arc<NormalizedSeries>>,
}

impl NormalizationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalized series for `window`, recomputed only when a different window is passed.
    pub fn get(&mut self, window: &Arc<SeriesWindow>, radius: f64) -> Arc<NormalizedSeries> {
        if let (Some(source), Some(series)) = (&self.source, &self.series) {
            if Arc::ptr_eq(source, window) {
                return series.clone();
            }
        }

        tracing::debug!("Normalizing series window of {} samples", window.len());
        let series = Arc::new(NormalizedSeries::from_window(window, radius));
        self.source = Some(window.clone());
        self.series = Some(series.clone());
        series
    }

    pub fn invalidate(&mut self) {
        self.source = None;
        self.series = None;
    }
}
