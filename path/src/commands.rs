//! The verb buffer underlying [`Path`](crate::Path).
//!
//! The compact verb encoding (one `u8` per op rather than a tagged enum
//! per op) is narrowed to the four ops the path store needs and paired
//! with a parallel `Point` buffer instead of id-indirected endpoints: a
//! buffer of points and a parallel buffer of op codes.

use crate::growvec::GrowVec;
use vgcore_geom::Point;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum Verb {
    MoveTo = 0,
    LineTo = 1,
    CurveTo = 2,
    Close = 3,
}

/// The two parallel buffers a path is made of: one verb per op, and one
/// point per `MoveTo`/`LineTo` plus three per `CurveTo`; `Close` consumes
/// no points.
#[derive(Clone, Debug, Default)]
pub struct PathCommands {
    verbs: GrowVec<Verb>,
    points: GrowVec<Point>,
}

impl PathCommands {
    pub fn new() -> Self {
        PathCommands {
            verbs: GrowVec::new(),
            points: GrowVec::new(),
        }
    }

    #[inline]
    pub fn verbs(&self) -> &[Verb] {
        &self.verbs
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn points_mut(&mut self) -> &mut [Point] {
        self.points.as_mut_slice()
    }

    #[inline]
    pub fn last_verb(&self) -> Option<Verb> {
        self.verbs.as_slice().last().copied()
    }

    pub fn push_move_to(&mut self, p: Point) {
        self.verbs.push(Verb::MoveTo);
        self.points.push(p);
    }

    pub fn push_line_to(&mut self, p: Point) {
        self.verbs.push(Verb::LineTo);
        self.points.push(p);
    }

    pub fn push_curve_to(&mut self, p1: Point, p2: Point, p3: Point) {
        self.verbs.push(Verb::CurveTo);
        self.points.push(p1);
        self.points.push(p2);
        self.points.push(p3);
    }

    pub fn push_close(&mut self) {
        self.verbs.push(Verb::Close);
    }

    /// Drops the most recently pushed `MoveTo`, used when a second
    /// `begin` overwrites a subpath that never got an edge added to it.
    pub fn pop_move_to(&mut self) {
        debug_assert_eq!(self.last_verb(), Some(Verb::MoveTo));
        self.verbs.truncate(self.verbs.len() - 1);
        self.points.truncate(self.points.len() - 1);
    }

    pub fn clear(&mut self) {
        self.verbs.clear();
        self.points.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }
}

/// One decoded path event, as produced by iterating a [`PathCommands`]
/// buffer alongside its point buffer.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PathEvent {
    MoveTo(Point),
    LineTo(Point),
    CurveTo(Point, Point, Point),
    Close,
}

/// Iterates the decoded events of a [`PathCommands`] buffer.
pub struct CommandsIter<'l> {
    verbs: core::slice::Iter<'l, Verb>,
    points: &'l [Point],
    point_cursor: usize,
}

impl<'l> CommandsIter<'l> {
    pub fn new(cmds: &'l PathCommands) -> Self {
        CommandsIter {
            verbs: cmds.verbs().iter(),
            points: cmds.points(),
            point_cursor: 0,
        }
    }
}

impl<'l> Iterator for CommandsIter<'l> {
    type Item = PathEvent;

    fn next(&mut self) -> Option<PathEvent> {
        let verb = *self.verbs.next()?;
        let event = match verb {
            Verb::MoveTo => {
                let p = self.points[self.point_cursor];
                self.point_cursor += 1;
                PathEvent::MoveTo(p)
            }
            Verb::LineTo => {
                let p = self.points[self.point_cursor];
                self.point_cursor += 1;
                PathEvent::LineTo(p)
            }
            Verb::CurveTo => {
                let p1 = self.points[self.point_cursor];
                let p2 = self.points[self.point_cursor + 1];
                let p3 = self.points[self.point_cursor + 2];
                self.point_cursor += 3;
                PathEvent::CurveTo(p1, p2, p3)
            }
            Verb::Close => PathEvent::Close,
        };
        Some(event)
    }
}
