// Drawing capability the renderer paints through
use super::color::Rgba;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Rgba,
}

/// Gradient between two concentric circles, like a 2D canvas radial gradient.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    pub center: Point,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub stops: Vec<ColorStop>,
}

impl RadialGradient {
    pub fn new(center: Point, inner_radius: f64, outer_radius: f64) -> Self {
        Self {
            center,
            inner_radius,
            outer_radius,
            stops: Vec::new(),
        }
    }

    pub fn with_stop(mut self, offset: f64, color: Rgba) -> Self {
        self.stops.push(ColorStop {
            offset: offset.clamp(0.0, 1.0),
            color,
        });
        self
    }
}

/// Immediate-mode drawing surface.
///
/// Angles are in radians, measured clockwise from the positive x axis, and
/// `arc` always sweeps clockwise from `start_angle` to `end_angle`.
pub trait Canvas {
    fn clear(&mut self);
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f64, dy: f64);

    fn begin_path(&mut self);
    fn move_to(&mut self, to: Point);
    fn line_to(&mut self, to: Point);
    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64);

    fn set_fill_color(&mut self, color: Rgba);
    fn set_gradient(&mut self, gradient: &RadialGradient);
    fn set_stroke(&mut self, color: Rgba, width: f64);

    fn fill_path(&mut self);
    fn stroke_path(&mut self);
    fn fill_text(&mut self, text: &str, at: Point, font: &str);
}

#[cfg(test)]
pub mod recording {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawCall {
        Clear,
        Save,
        Restore,
        Translate(f64, f64),
        BeginPath,
        MoveTo(Point),
        LineTo(Point),
        Arc {
            center: Point,
            radius: f64,
            start_angle: f64,
            end_angle: f64,
        },
        FillColor(Rgba),
        Gradient(RadialGradient),
        Stroke(Rgba, f64),
        FillPath,
        StrokePath,
        Text(String, Point, String),
    }

    /// Canvas that only remembers what it was asked to do.
    #[derive(Debug, Default)]
    pub struct RecordingCanvas {
        pub calls: Vec<DrawCall>,
    }

    impl RecordingCanvas {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn count(&self, pred: impl Fn(&DrawCall) -> bool) -> usize {
            self.calls.iter().filter(|c| pred(*c)).count()
        }
    }

    impl Canvas for RecordingCanvas {
        fn clear(&mut self) {
            self.calls.push(DrawCall::Clear);
        }
        fn save(&mut self) {
            self.calls.push(DrawCall::Save);
        }
        fn restore(&mut self) {
            self.calls.push(DrawCall::Restore);
        }
        fn translate(&mut self, dx: f64, dy: f64) {
            self.calls.push(DrawCall::Translate(dx, dy));
        }
        fn begin_path(&mut self) {
            self.calls.push(DrawCall::BeginPath);
        }
        fn move_to(&mut self, to: Point) {
            self.calls.push(DrawCall::MoveTo(to));
        }
        fn line_to(&mut self, to: Point) {
            self.calls.push(DrawCall::LineTo(to));
        }
        fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64) {
            self.calls.push(DrawCall::Arc {
                center,
                radius,
                start_angle,
                end_angle,
            });
        }
        fn set_fill_color(&mut self, color: Rgba) {
            self.calls.push(DrawCall::FillColor(color));
        }
        fn set_gradient(&mut self, gradient: &RadialGradient) {
            self.calls.push(DrawCall::Gradient(gradient.clone()));
        }
        fn set_stroke(&mut self, color: Rgba, width: f64) {
            self.calls.push(DrawCall::Stroke(color, width));
        }
        fn fill_path(&mut self) {
            self.calls.push(DrawCall::FillPath);
        }
        fn stroke_path(&mut self) {
            self.calls.push(DrawCall::StrokePath);
        }
        fn fill_text(&mut self, text: &str, at: Point, font: &str) {
            self.calls
                .push(DrawCall::Text(text.to_string(), at, font.to_string()));
        }
    }
}
