//! The polygon edge buffer (C7), the common input format for both
//! sweep tessellators (C10, C11).
//!
//! Grounded on `cairo-polygon.c`: edges are appended one at a time and,
//! when `limits` is set, clipped to the union of the caller's clip
//! boxes on insertion so the sweep never has to deal with geometry
//! outside the area that will end up visible.

use alloc::vec::Vec;
use vgcore_geom::{Fixed, FixedBox, Line, Point};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum WindingDir {
    Up = -1,
    Down = 1,
}

impl WindingDir {
    #[inline]
    pub fn value(self) -> i32 {
        self as i32
    }
}

/// How a running winding count at a given `x` decides inside/outside.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum FillRule {
    NonZero,
    EvenOdd,
}

impl FillRule {
    #[inline]
    pub fn is_inside(self, winding: i32) -> bool {
        match self {
            FillRule::NonZero => winding != 0,
            FillRule::EvenOdd => winding % 2 != 0,
        }
    }
}

#[derive(Copy, Clone, Debug)]
pub struct Edge {
    pub line: Line,
    pub top: Fixed,
    pub bottom: Fixed,
    pub dir: WindingDir,
}

#[derive(Clone, Debug, Default)]
pub struct Polygon {
    edges: Vec<Edge>,
    extents: FixedBox,
    limits: Option<FixedBox>,
}

impl Polygon {
    pub fn new() -> Self {
        Polygon {
            edges: Vec::new(),
            extents: FixedBox::EMPTY,
            limits: None,
        }
    }

    /// Sets the clip-box union every future `add_edge` call is clipped
    /// against. Existing edges are unaffected.
    pub fn set_limits(&mut self, limits: &[FixedBox]) {
        let mut union = FixedBox::EMPTY;
        for b in limits {
            union = union.union(*b);
        }
        self.limits = if limits.is_empty() { None } else { Some(union) };
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn extents(&self) -> FixedBox {
        self.extents
    }

    /// Adds the edge `p1 -> p2`. Horizontal edges are dropped; edges are
    /// clipped to `limits` (when set) so that the portion outside the
    /// clip box's x-extent along its own projection is cut away, leaving
    /// up to the interior segment plus the vertical wall segments at the
    /// box edges that a rasterizer needs to preserve winding.
    pub fn add_edge(&mut self, p1: Point, p2: Point) {
        if p1.y == p2.y {
            return;
        }
        let (dir, top_pt, bottom_pt) = if p1.y < p2.y {
            (WindingDir::Down, p1, p2)
        } else {
            (WindingDir::Up, p2, p1)
        };
        let line = Line::new(p1, p2);

        let (top, bottom) = match self.limits {
            Some(limits) => (top_pt.y.max(limits.p1.y), bottom_pt.y.min(limits.p2.y)),
            None => (top_pt.y, bottom_pt.y),
        };
        if top >= bottom {
            return;
        }

        self.push_clipped_x(line, top, bottom, dir);
    }

    /// Splits `line` (restricted to `[top, bottom]`) into up to three
    /// edges so each piece's x-extent lies entirely inside the clip
    /// box: a vertical wall along the left limit, the interior segment,
    /// and a vertical wall along the right limit.
    fn push_clipped_x(&mut self, line: Line, top: Fixed, bottom: Fixed, dir: WindingDir) {
        let limits = match self.limits {
            Some(l) => l,
            None => {
                self.push_edge(line, top, bottom, dir);
                return;
            }
        };

        if line.is_vertical() {
            let x = line.p1.x.max(limits.p1.x).min(limits.p2.x);
            self.push_edge(Line::new(Point::new(x, top), Point::new(x, bottom)), top, bottom, dir);
            return;
        }

        let x_top = line.x_at_y(top);
        let x_bottom = line.x_at_y(bottom);
        let (x_lo, x_hi) = (x_top.min(x_bottom), x_top.max(x_bottom));

        if x_hi <= limits.p1.x {
            self.push_edge(
                Line::new(Point::new(limits.p1.x, top), Point::new(limits.p1.x, bottom)),
                top,
                bottom,
                dir,
            );
            return;
        }
        if x_lo >= limits.p2.x {
            self.push_edge(
                Line::new(Point::new(limits.p2.x, top), Point::new(limits.p2.x, bottom)),
                top,
                bottom,
                dir,
            );
            return;
        }

        // Straddling case: the edge's x-projection crosses one or both
        // clip box sides somewhere within [top, bottom]. Split at each
        // crossing so every piece's x lies entirely on one side of the
        // box: a vertical wall wherever the line ran outside it, the
        // line itself wherever it ran inside.
        let mut ys = alloc::vec![top, bottom];
        if x_lo < limits.p1.x {
            ys.push(line.y_at_x(limits.p1.x));
        }
        if x_hi > limits.p2.x {
            ys.push(line.y_at_x(limits.p2.x));
        }
        ys.sort();

        for w in ys.windows(2) {
            let (y_a, y_b) = (w[0], w[1]);
            if y_a >= y_b {
                continue;
            }
            let x_mid = line.x_at_y(y_a.lerp_half(y_b));
            if x_mid <= limits.p1.x {
                self.push_edge(
                    Line::new(Point::new(limits.p1.x, y_a), Point::new(limits.p1.x, y_b)),
                    y_a,
                    y_b,
                    dir,
                );
            } else if x_mid >= limits.p2.x {
                self.push_edge(
                    Line::new(Point::new(limits.p2.x, y_a), Point::new(limits.p2.x, y_b)),
                    y_a,
                    y_b,
                    dir,
                );
            } else {
                self.push_edge(line, y_a, y_b, dir);
            }
        }
    }

    fn push_edge(&mut self, line: Line, top: Fixed, bottom: Fixed, dir: WindingDir) {
        self.extents = self.extents.union(FixedBox::new(
            Point::new(line.p1.x.min(line.p2.x), top),
            Point::new(line.p1.x.max(line.p2.x), bottom),
        ));
        self.edges.push(Edge {
            line,
            top,
            bottom,
            dir,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_edges_are_dropped() {
        let mut poly = Polygon::new();
        poly.add_edge(Point::from_f64(0.0, 5.0), Point::from_f64(10.0, 5.0));
        assert!(poly.is_empty());
    }

    #[test]
    fn downward_edge_gets_down_direction_and_correct_top_bottom() {
        let mut poly = Polygon::new();
        poly.add_edge(Point::from_f64(0.0, 0.0), Point::from_f64(0.0, 10.0));
        let e = &poly.edges()[0];
        assert_eq!(e.dir, WindingDir::Down);
        assert_eq!(e.top.to_f64(), 0.0);
        assert_eq!(e.bottom.to_f64(), 10.0);
    }

    #[test]
    fn edges_outside_the_limits_are_dropped_entirely() {
        let mut poly = Polygon::new();
        poly.set_limits(&[FixedBox::new(
            Point::from_f64(0.0, 0.0),
            Point::from_f64(10.0, 10.0),
        )]);
        poly.add_edge(Point::from_f64(0.0, 20.0), Point::from_f64(0.0, 30.0));
        assert!(poly.is_empty());
    }

    #[test]
    fn an_edge_straddling_a_limit_is_clamped_not_passed_through() {
        let mut poly = Polygon::new();
        poly.set_limits(&[FixedBox::new(
            Point::from_f64(0.0, 0.0),
            Point::from_f64(10.0, 10.0),
        )]);
        // Runs from x=-10 at y=0 to x=10 at y=10: crosses the left limit
        // partway down, so one piece must wall off at x=0 and the other
        // must stay on the line, never exceeding the [0, 10] x-range.
        poly.add_edge(Point::from_f64(-10.0, 0.0), Point::from_f64(10.0, 10.0));
        for e in poly.edges() {
            let (x1, _) = e.line.p1.to_f64();
            let (x2, _) = e.line.p2.to_f64();
            assert!(x1 >= -0.001 && x2 >= -0.001, "edge x escaped the clip box: {:?}", e.line);
        }
    }
}
