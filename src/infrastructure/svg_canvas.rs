// SVG backend for the canvas capability
use crate::domain::canvas::{Canvas, Point, RadialGradient};
use crate::domain::color::Rgba;
use std::f64::consts::{PI, TAU};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Fill {
    Color(Rgba),
    Gradient(usize),
}

#[derive(Debug, Clone, Copy)]
struct DrawState {
    offset: Point,
    fill: Fill,
    stroke: Rgba,
    line_width: f64,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            offset: Point::ORIGIN,
            fill: Fill::Color(Rgba::rgb(0, 0, 0)),
            stroke: Rgba::rgb(0, 0, 0),
            line_width: 1.0,
        }
    }
}

/// Renders canvas calls into a standalone SVG document.
pub struct SvgCanvas {
    width: u32,
    height: u32,
    state: DrawState,
    saved: Vec<DrawState>,
    path: String,
    has_current_point: bool,
    gradients: Vec<RadialGradient>,
    body: String,
}

impl SvgCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            state: DrawState::default(),
            saved: Vec::new(),
            path: String::new(),
            has_current_point: false,
            gradients: Vec::new(),
            body: String::new(),
        }
    }

    pub fn finish(self) -> String {
        let mut doc = String::with_capacity(self.body.len() + 512);
        let _ = write!(
            doc,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );

        if !self.gradients.is_empty() {
            doc.push_str("<defs>");
            for (id, gradient) in self.gradients.iter().enumerate() {
                let _ = write!(
                    doc,
                    r#"<radialGradient id="g{}" gradientUnits="userSpaceOnUse" cx="{}" cy="{}" r="{}""#,
                    id,
                    num(gradient.center.x),
                    num(gradient.center.y),
                    num(gradient.outer_radius)
                );
                if gradient.inner_radius > 0.0 {
                    let _ = write!(doc, r#" fr="{}""#, num(gradient.inner_radius));
                }
                doc.push('>');
                for stop in &gradient.stops {
                    let _ = write!(
                        doc,
                        r#"<stop offset="{}" stop-color="{}" stop-opacity="{}"/>"#,
                        num(stop.offset),
                        stop.color.with_alpha(1.0).to_css(),
                        num(stop.color.a)
                    );
                }
                doc.push_str("</radialGradient>");
            }
            doc.push_str("</defs>");
        }

        doc.push_str(&self.body);
        doc.push_str("</svg>");
        doc
    }

    fn absolute(&self, p: Point) -> Point {
        Point::new(p.x + self.state.offset.x, p.y + self.state.offset.y)
    }

    fn push_point(&mut self, command: char, p: Point) {
        let p = self.absolute(p);
        let _ = write!(self.path, "{}{} {} ", command, num(p.x), num(p.y));
        self.has_current_point = true;
    }

    fn push_arc_segment(&mut self, radius: f64, large: bool, to: Point) {
        let to = self.absolute(to);
        let _ = write!(
            self.path,
            "A{r} {r} 0 {} 1 {} {} ",
            u8::from(large),
            num(to.x),
            num(to.y),
            r = num(radius)
        );
    }
}

impl Canvas for SvgCanvas {
    fn clear(&mut self) {
        self.body.clear();
        self.path.clear();
        self.has_current_point = false;
    }

    fn save(&mut self) {
        self.saved.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.state.offset = Point::new(self.state.offset.x + dx, self.state.offset.y + dy);
    }

    fn begin_path(&mut self) {
        self.path.clear();
        self.has_current_point = false;
    }

    fn move_to(&mut self, to: Point) {
        self.push_point('M', to);
    }

    fn line_to(&mut self, to: Point) {
        let command = if self.has_current_point { 'L' } else { 'M' };
        self.push_point(command, to);
    }

    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64) {
        let at = |angle: f64| {
            Point::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            )
        };
        self.line_to(at(start_angle));

        let sweep = end_angle - start_angle;
        if sweep <= 0.0 || radius <= 0.0 {
            return;
        }
        if sweep >= TAU - 1e-9 {
            // SVG cannot draw a closed circle with one arc command
            self.push_arc_segment(radius, false, at(start_angle + PI));
            self.push_arc_segment(radius, false, at(start_angle));
        } else {
            self.push_arc_segment(radius, sweep > PI, at(end_angle));
        }
    }

    fn set_fill_color(&mut self, color: Rgba) {
        self.state.fill = Fill::Color(color);
    }

    fn set_gradient(&mut self, gradient: &RadialGradient) {
        let mut placed = gradient.clone();
        placed.center = self.absolute(gradient.center);

        let id = match self.gradients.iter().position(|g| *g == placed) {
            Some(id) => id,
            None => {
                self.gradients.push(placed);
                self.gradients.len() - 1
            }
        };
        self.state.fill = Fill::Gradient(id);
    }

    fn set_stroke(&mut self, color: Rgba, width: f64) {
        self.state.stroke = color;
        self.state.line_width = width;
    }

    fn fill_path(&mut self) {
        if self.path.is_empty() {
            return;
        }
        let fill = match self.state.fill {
            Fill::Color(color) => format!(
                r#"fill="{}" fill-opacity="{}""#,
                color.with_alpha(1.0).to_css(),
                num(color.a)
            ),
            Fill::Gradient(id) => format!(r#"fill="url(#g{})""#, id),
        };
        let _ = write!(self.body, r#"<path d="{}" {}/>"#, self.path.trim_end(), fill);
    }

    fn stroke_path(&mut self) {
        if self.path.is_empty() {
            return;
        }
        let stroke = self.state.stroke;
        let _ = write!(
            self.body,
            r#"<path d="{}" fill="none" stroke="{}" stroke-opacity="{}" stroke-width="{}"/>"#,
            self.path.trim_end(),
            stroke.with_alpha(1.0).to_css(),
            num(stroke.a),
            num(self.state.line_width)
        );
    }

    fn fill_text(&mut self, text: &str, at: Point, font: &str) {
        let at = self.absolute(at);
        let color = match self.state.fill {
            Fill::Color(color) => color,
            Fill::Gradient(_) => Rgba::rgb(0, 0, 0),
        };
        let _ = write!(
            self.body,
            r#"<text x="{}" y="{}" style="font: {}" fill="{}" fill-opacity="{}">{}</text>"#,
            num(at.x),
            num(at.y),
            escape(font),
            color.with_alpha(1.0).to_css(),
            num(color.a),
            escape(text)
        );
    }
}

/// Two decimals, without a trailing `.00` or a negative zero.
fn num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{}", rounded)
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
