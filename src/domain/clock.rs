// Clock face geometry derived from the wall clock
use chrono::{NaiveDateTime, Timelike};
use std::f64::consts::{FRAC_PI_2, TAU};

/// Hand positions for one frame, each as a fraction of a turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockState {
    pub second_fraction: f64,
    pub minute_fraction: f64,
    pub hour_fraction: f64,
}

impl ClockState {
    pub fn at(now: &NaiveDateTime) -> Self {
        let second_fraction = f64::from(now.second()) / 60.0;
        let minute_fraction = (f64::from(now.minute()) + second_fraction) / 60.0;
        let hour_fraction = (f64::from(now.hour() % 12) + minute_fraction) / 12.0;
        Self {
            second_fraction,
            minute_fraction,
            hour_fraction,
        }
    }

    /// Start and end angle of the seconds arc, starting at twelve o'clock.
    ///
    /// On the full minute the arc is drawn as a whole circle, not an empty one.
    pub fn seconds_arc(&self) -> (f64, f64) {
        let start = -FRAC_PI_2;
        let sweep = if self.second_fraction == 0.0 {
            1.0
        } else {
            self.second_fraction
        };
        (start, start + TAU * sweep)
    }
}
