// Placement of normalized samples on the clock disc
use super::canvas::Point;
use chrono::{NaiveDateTime, Timelike};
use std::f64::consts::TAU;

/// Position of `timestamp` within a 12-hour cycle, in `[0, 1)`.
///
/// Times exactly twelve hours apart share an angle, as they do on a clock face.
/// Only this clock-relative placement is used; spacing points evenly by series
/// index (a "sweep" layout) was never reachable and is not provided.
pub fn clock_angle_fraction(timestamp: &NaiveDateTime) -> f64 {
    let hours = f64::from(timestamp.hour() % 12)
        + f64::from(timestamp.minute()) / 60.0
        + f64::from(timestamp.second()) / 3600.0;
    hours / 12.0
}

/// Offset from the center for a turn fraction; zero points up, angles grow clockwise.
pub fn polar_offset(length: f64, fraction: f64) -> Point {
    let angle = TAU * fraction;
    Point::new(length * angle.sin(), length * -angle.cos())
}

/// Project an already scaled amount at `timestamp` to a point relative to the center.
pub fn project(amount: f64, timestamp: &NaiveDateTime) -> Point {
    polar_offset(amount, clock_angle_fraction(timestamp))
}
