//! The filler (C8): flattens a path's curves and feeds the resulting
//! line segments into a [`Polygon`].

use crate::flatten::flatten_cubic;
use crate::polygon::Polygon;
use vgcore_geom::Point;
use vgcore_path::{Direction, Path, PathSink};

/// Tessellates `path` into a polygon, flattening curves to `tolerance`
/// (user space) and replaying sub-paths in `direction`.
pub fn fill_path(path: &Path, tolerance: f64, direction: Direction) -> Polygon {
    let mut sink = FillSink {
        polygon: Polygon::new(),
        subpath_start: None,
        last: None,
        tolerance,
    };
    path.interpret(direction, &mut sink);
    // An open sub-path is implicitly closed by the filler: every
    // sub-path contributes a closing edge even without an explicit
    // `ClosePath`, since a fill only cares about the enclosed area.
    sink.close_subpath();
    sink.polygon
}

struct FillSink {
    polygon: Polygon,
    subpath_start: Option<Point>,
    last: Option<Point>,
    tolerance: f64,
}

impl FillSink {
    fn close_subpath(&mut self) {
        if let (Some(start), Some(last)) = (self.subpath_start, self.last) {
            if start != last {
                self.polygon.add_edge(last, start);
            }
        }
    }
}

impl PathSink for FillSink {
    fn move_to(&mut self, p: Point) {
        self.close_subpath();
        self.subpath_start = Some(p);
        self.last = Some(p);
    }

    fn line_to(&mut self, p: Point) {
        if let Some(last) = self.last {
            self.polygon.add_edge(last, p);
        }
        self.last = Some(p);
    }

    fn curve_to(&mut self, p1: Point, p2: Point, p3: Point) {
        let a = match self.last {
            Some(p) => p,
            None => return,
        };
        let mut prev = a;
        flatten_cubic(a, p1, p2, p3, self.tolerance, |p| {
            self.polygon.add_edge(prev, p);
            prev = p;
        });
        self.last = Some(prev);
    }

    fn close_path(&mut self) {
        self.close_subpath();
        self.last = self.subpath_start;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::from_f64(x, y)
    }

    #[test]
    fn a_rectangle_fills_into_four_edges() {
        let mut path = Path::new();
        path.move_to(p(0.0, 0.0));
        path.line_to(p(10.0, 0.0));
        path.line_to(p(10.0, 10.0));
        path.line_to(p(0.0, 10.0));
        path.close_path();
        let polygon = fill_path(&path, 0.1, Direction::Forward);
        // One of the four sides is horizontal and gets dropped.
        assert_eq!(polygon.edges().len(), 3);
    }

    #[test]
    fn an_unclosed_subpath_still_gets_an_implicit_closing_edge() {
        let mut path = Path::new();
        path.move_to(p(0.0, 0.0));
        path.line_to(p(10.0, 0.0));
        path.line_to(p(5.0, 10.0));
        let polygon = fill_path(&path, 0.1, Direction::Forward);
        assert_eq!(polygon.edges().len(), 3);
    }
}
