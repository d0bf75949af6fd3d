// Closed polygon paths over contiguous slices of the series
use super::canvas::{Canvas, Point};
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArcPath {
    pub commands: Vec<PathCommand>,
}

impl ArcPath {
    /// Move to the first point, line through the rest and back to the first.
    ///
    /// Points with non-finite coordinates are left out. An empty slice gives an
    /// empty path; a single point gives a zero-length closed path.
    pub fn closed(points: &[Point]) -> Self {
        let mut commands = Vec::with_capacity(points.len() + 1);
        let mut first: Option<Point> = None;

        for point in points.iter().filter(|p| p.is_finite()) {
            match first {
                None => {
                    first = Some(*point);
                    commands.push(PathCommand::MoveTo(*point));
                }
                Some(_) => commands.push(PathCommand::LineTo(*point)),
            }
        }
        if let Some(start) = first {
            commands.push(PathCommand::LineTo(start));
        }

        Self { commands }
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn first_point(&self) -> Option<Point> {
        self.commands.first().map(PathCommand::point)
    }

    pub fn last_point(&self) -> Option<Point> {
        self.commands.last().map(PathCommand::point)
    }

    /// Replay the commands onto the current canvas path.
    pub fn trace(&self, canvas: &mut dyn Canvas) {
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) => canvas.move_to(p),
                PathCommand::LineTo(p) => canvas.line_to(p),
            }
        }
    }
}

impl PathCommand {
    pub fn point(&self) -> Point {
        match *self {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => p,
        }
    }
}

/// Index ranges of the two half-arcs: `[0, floor(n/2))` and `[ceil(n/2), n)`.
///
/// For odd `n` the middle sample belongs to neither half.
pub fn half_ranges(len: usize) -> (Range<usize>, Range<usize>) {
    (0..len / 2, len.div_ceil(2)..len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(n: usize) -> Vec<Point> {
        (0..n).map(|i| Point::new(i as f64, -(i as f64))).collect()
    }

    #[test]
    fn test_half_ranges() {
        assert_eq!(half_ranges(90), (0..45, 45..90));
        assert_eq!(half_ranges(96), (0..48, 48..96));
        assert_eq!(half_ranges(0), (0..0, 0..0));
        assert_eq!(half_ranges(1), (0..0, 1..1));

        for n in [3usize, 7, 91] {
            let (first, second) = half_ranges(n);
            let orphans: Vec<usize> = (0..n)
                .filter(|i| !first.contains(i) && !second.contains(i))
                .collect();
            assert_eq!(orphans, vec![n / 2]);
        }
    }

    #[test]
    fn test_closed_path_returns_to_start() {
        for n in 1..6 {
            let path = ArcPath::closed(&points(n));
            assert_eq!(path.commands.len(), n + 1);
            assert_eq!(path.first_point(), path.last_point());
            assert!(matches!(path.commands[0], PathCommand::MoveTo(_)));
        }
    }

    #[test]
    fn test_empty_slice_is_noop() {
        let path = ArcPath::closed(&[]);
        assert!(path.is_empty());
        assert_eq!(path.first_point(), None);
    }

    #[test]
    fn test_non_finite_points_skipped() {
        let pts = vec![
            Point::new(f64::NAN, f64::NAN),
            Point::new(1.0, 1.0),
            Point::new(f64::NAN, 0.0),
            Point::new(2.0, 3.0),
        ];
        let path = ArcPath::closed(&pts);
        assert_eq!(
            path.commands,
            vec![
                PathCommand::MoveTo(Point::new(1.0, 1.0)),
                PathCommand::LineTo(Point::new(2.0, 3.0)),
                PathCommand::LineTo(Point::new(1.0, 1.0)),
            ]
        );
    }
}
