//! The path store (C3): an ordered sequence of path operations with
//! current-point tracking, equality, transform and replay.

use crate::commands::{CommandsIter, PathCommands, PathEvent, Verb};
use vgcore_geom::error::{CoreError, CoreResult};
use vgcore_geom::{FixedBox, IntRect, Matrix, Point};

/// Direction a path is replayed in by [`Path::interpret`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Direction {
    Forward,
    Reverse,
}

/// Callback sink driven by [`Path::interpret`].
pub trait PathSink {
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    fn curve_to(&mut self, p1: Point, p2: Point, p3: Point);
    fn close_path(&mut self);
}

/// A fixed-point path: `MoveTo`/`LineTo`/`CurveTo`/`ClosePath` ops over a
/// dense point buffer.
#[derive(Clone, Debug, Default)]
pub struct Path {
    commands: PathCommands,
    current_point: Option<Point>,
    subpath_start: Option<Point>,
    is_rectilinear: bool,
    has_curves: bool,
}

impl Path {
    pub fn new() -> Self {
        Path {
            commands: PathCommands::new(),
            current_point: None,
            subpath_start: None,
            is_rectilinear: true,
            has_curves: false,
        }
    }

    #[inline]
    pub fn get_current_point(&self) -> Option<Point> {
        self.current_point
    }

    #[inline]
    pub fn is_rectilinear(&self) -> bool {
        self.is_rectilinear
    }

    #[inline]
    pub fn has_curves(&self) -> bool {
        self.has_curves
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Starts a new subpath at `p`. Two consecutive `move_to` calls
    /// collapse: the second overwrites the first.
    pub fn move_to(&mut self, p: Point) {
        if self.commands.last_verb() == Some(Verb::MoveTo) {
            self.commands.pop_move_to();
        }
        self.commands.push_move_to(p);
        self.current_point = Some(p);
        self.subpath_start = Some(p);
    }

    pub fn line_to(&mut self, p: Point) {
        let from = self.ensure_current_point(p);
        if from.x != p.x && from.y != p.y {
            self.is_rectilinear = false;
        }
        self.commands.push_line_to(p);
        self.current_point = Some(p);
    }

    pub fn curve_to(&mut self, p1: Point, p2: Point, p3: Point) {
        self.ensure_current_point(p1);
        self.has_curves = true;
        self.is_rectilinear = false;
        self.commands.push_curve_to(p1, p2, p3);
        self.current_point = Some(p3);
    }

    pub fn close_path(&mut self) {
        if self.current_point.is_none() {
            return;
        }
        self.commands.push_close();
        self.current_point = self.subpath_start;
    }

    pub fn rel_line_to(&mut self, dx: vgcore_geom::Fixed, dy: vgcore_geom::Fixed) -> CoreResult<()> {
        let from = self.current_point.ok_or(CoreError::InvalidPathData)?;
        self.line_to(Point::new(from.x + dx, from.y + dy));
        Ok(())
    }

    pub fn rel_curve_to(
        &mut self,
        d1: (vgcore_geom::Fixed, vgcore_geom::Fixed),
        d2: (vgcore_geom::Fixed, vgcore_geom::Fixed),
        d3: (vgcore_geom::Fixed, vgcore_geom::Fixed),
    ) -> CoreResult<()> {
        let from = self.current_point.ok_or(CoreError::InvalidPathData)?;
        self.curve_to(
            Point::new(from.x + d1.0, from.y + d1.1),
            Point::new(from.x + d2.0, from.y + d2.1),
            Point::new(from.x + d3.0, from.y + d3.1),
        );
        Ok(())
    }

    /// A no-current-point `line_to`/`curve_to` is treated as if preceded
    /// by an implicit `move_to` to the origin of the current subpath.
    fn ensure_current_point(&mut self, fallback: Point) -> Point {
        if let Some(p) = self.current_point {
            return p;
        }
        let start = self.subpath_start.unwrap_or(fallback);
        self.move_to(start);
        start
    }

    pub fn iter(&self) -> CommandsIter<'_> {
        CommandsIter::new(&self.commands)
    }

    /// Applies `m` to every point in the path.
    ///
    /// When `m` is an integer translation, `translate` is used instead:
    /// it shifts coordinates without the general matrix multiply and
    /// without invalidating anything that doesn't depend on absolute
    /// position.
    pub fn transform(&mut self, m: &Matrix) {
        if m.is_identity() {
            return;
        }
        if m.is_integer_translation() {
            self.translate(
                vgcore_geom::Fixed::from_f64(m.x0),
                vgcore_geom::Fixed::from_f64(m.y0),
            );
            return;
        }
        for p in self.commands.points_mut() {
            *p = m.transform_point(*p);
        }
        self.current_point = self.current_point.map(|p| m.transform_point(p));
        self.subpath_start = self.subpath_start.map(|p| m.transform_point(p));
    }

    pub fn translate(&mut self, tx: vgcore_geom::Fixed, ty: vgcore_geom::Fixed) {
        let delta = Point::new(tx, ty);
        for p in self.commands.points_mut() {
            *p = *p + delta;
        }
        self.current_point = self.current_point.map(|p| p + delta);
        self.subpath_start = self.subpath_start.map(|p| p + delta);
    }

    /// Sequential op-by-op equality, used by clip deduplication to avoid
    /// re-rendering an unchanged clip path.
    pub fn equal(a: &Path, b: &Path) -> bool {
        a.commands.verbs() == b.commands.verbs() && a.commands.points() == b.commands.points()
    }

    /// Replays the path through `sink`, optionally reversing each
    /// subpath so the filler can force a consistent winding direction.
    pub fn interpret(&self, direction: Direction, sink: &mut dyn PathSink) {
        match direction {
            Direction::Forward => self.interpret_forward(sink),
            Direction::Reverse => self.interpret_reverse(sink),
        }
    }

    fn interpret_forward(&self, sink: &mut dyn PathSink) {
        for event in self.iter() {
            match event {
                PathEvent::MoveTo(p) => sink.move_to(p),
                PathEvent::LineTo(p) => sink.line_to(p),
                PathEvent::CurveTo(p1, p2, p3) => sink.curve_to(p1, p2, p3),
                PathEvent::Close => sink.close_path(),
            }
        }
    }

    fn interpret_reverse(&self, sink: &mut dyn PathSink) {
        for subpath in self.subpaths() {
            let mut events: alloc::vec::Vec<PathEvent> = alloc::vec::Vec::new();
            let mut closed = false;
            for event in subpath {
                match event {
                    PathEvent::Close => closed = true,
                    other => events.push(other),
                }
            }
            if events.is_empty() {
                continue;
            }
            let last_point = |e: &PathEvent| -> Point {
                match *e {
                    PathEvent::MoveTo(p) | PathEvent::LineTo(p) => p,
                    PathEvent::CurveTo(_, _, p) => p,
                    PathEvent::Close => unreachable!(),
                }
            };
            let final_point = last_point(events.last().unwrap());
            sink.move_to(final_point);
            for i in (1..events.len()).rev() {
                let to = last_point(&events[i - 1]);
                match events[i] {
                    PathEvent::LineTo(_) => sink.line_to(to),
                    PathEvent::CurveTo(p1, p2, _) => sink.curve_to(p2, p1, to),
                    PathEvent::MoveTo(_) | PathEvent::Close => unreachable!(),
                }
            }
            if closed {
                sink.close_path();
            }
        }
    }

    fn subpaths(&self) -> alloc::vec::Vec<alloc::vec::Vec<PathEvent>> {
        let mut subpaths: alloc::vec::Vec<alloc::vec::Vec<PathEvent>> = alloc::vec::Vec::new();
        for event in self.iter() {
            if matches!(event, PathEvent::MoveTo(_)) {
                subpaths.push(alloc::vec::Vec::new());
            }
            if let Some(last) = subpaths.last_mut() {
                last.push(event);
            }
        }
        subpaths
    }

    /// Recognises a closed rectilinear four-edge axis-aligned rectangle.
    pub fn is_box(&self) -> Option<FixedBox> {
        let events: alloc::vec::Vec<PathEvent> = self.iter().collect();
        let (a, b, c, d) = match events.as_slice() {
            [PathEvent::MoveTo(a), PathEvent::LineTo(b), PathEvent::LineTo(c), PathEvent::LineTo(d), PathEvent::Close] => {
                (*a, *b, *c, *d)
            }
            _ => return None,
        };
        let axis_aligned = |p: Point, q: Point| p.x == q.x || p.y == q.y;
        if !axis_aligned(a, b) || !axis_aligned(b, c) || !axis_aligned(c, d) || !axis_aligned(d, a)
        {
            return None;
        }
        if a.x == b.x && b.y == c.y && c.x == d.x && d.y == a.y {
            Some(FixedBox::new(a, c))
        } else if a.y == b.y && b.x == c.x && c.y == d.y && d.x == a.x {
            Some(FixedBox::new(a, c))
        } else {
            None
        }
    }

    /// True iff every subpath has fewer than three non-coincident
    /// vertices, i.e. nothing in the path can produce ink when filled.
    pub fn fill_is_empty(&self) -> bool {
        for subpath in self.subpaths() {
            let mut distinct: alloc::vec::Vec<Point> = alloc::vec::Vec::new();
            for event in &subpath {
                let p = match *event {
                    PathEvent::MoveTo(p) | PathEvent::LineTo(p) => p,
                    PathEvent::CurveTo(_, _, p) => p,
                    PathEvent::Close => continue,
                };
                if !distinct.contains(&p) {
                    distinct.push(p);
                }
            }
            if distinct.len() >= 3 {
                return false;
            }
        }
        true
    }

    /// A cheap superset of the true ink extents, from the raw point
    /// buffer without flattening curves.
    pub fn approximate_clip_extents(&self) -> IntRect {
        let mut bbox = FixedBox::EMPTY;
        for p in self.commands.points() {
            bbox = bbox.union(FixedBox::new(*p, *p));
        }
        bbox.to_integer_rect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vgcore_geom::Fixed;

    fn p(x: f64, y: f64) -> Point {
        Point::from_f64(x, y)
    }

    #[test]
    fn consecutive_move_tos_collapse() {
        let mut path = Path::new();
        path.move_to(p(0.0, 0.0));
        path.move_to(p(5.0, 5.0));
        path.line_to(p(10.0, 5.0));
        let events: alloc::vec::Vec<_> = path.iter().collect();
        assert_eq!(events[0], PathEvent::MoveTo(p(5.0, 5.0)));
    }

    #[test]
    fn rectilinear_flag_tracks_axis_aligned_edges() {
        let mut path = Path::new();
        path.move_to(p(0.0, 0.0));
        path.line_to(p(10.0, 0.0));
        path.line_to(p(10.0, 10.0));
        path.close_path();
        assert!(path.is_rectilinear());

        let mut path2 = Path::new();
        path2.move_to(p(0.0, 0.0));
        path2.line_to(p(10.0, 5.0));
        assert!(!path2.is_rectilinear());
    }

    #[test]
    fn is_box_recognises_a_closed_rectangle() {
        let mut path = Path::new();
        path.move_to(p(0.0, 0.0));
        path.line_to(p(10.0, 0.0));
        path.line_to(p(10.0, 10.0));
        path.line_to(p(0.0, 10.0));
        path.close_path();
        let b = path.is_box().unwrap();
        assert_eq!(b.p1, p(0.0, 0.0));
        assert_eq!(b.p2, p(10.0, 10.0));
    }

    #[test]
    fn fill_is_empty_for_degenerate_subpaths() {
        let mut path = Path::new();
        path.move_to(p(0.0, 0.0));
        path.line_to(p(10.0, 0.0));
        assert!(path.fill_is_empty());
    }

    #[test]
    fn translate_shifts_every_point_and_the_current_point() {
        let mut path = Path::new();
        path.move_to(p(0.0, 0.0));
        path.line_to(p(10.0, 0.0));
        path.translate(Fixed::from_i32(3), Fixed::from_i32(4));
        assert_eq!(path.get_current_point(), Some(p(13.0, 4.0)));
    }

    #[test]
    fn equal_compares_verbs_and_points() {
        let mut a = Path::new();
        a.move_to(p(0.0, 0.0));
        a.line_to(p(1.0, 1.0));
        let mut b = a.clone();
        assert!(Path::equal(&a, &b));
        b.line_to(p(2.0, 2.0));
        assert!(!Path::equal(&a, &b));
    }
}
