//! A thin fluent wrapper over [`Path`]'s append operations.

use crate::path::Path;
use vgcore_geom::error::CoreResult;
use vgcore_geom::{Fixed, Point};

/// Builds a [`Path`] by appending ops one at a time.
#[derive(Clone, Debug, Default)]
pub struct PathBuilder {
    path: Path,
}

impl PathBuilder {
    pub fn new() -> Self {
        PathBuilder { path: Path::new() }
    }

    pub fn move_to(&mut self, p: Point) -> &mut Self {
        self.path.move_to(p);
        self
    }

    pub fn line_to(&mut self, p: Point) -> &mut Self {
        self.path.line_to(p);
        self
    }

    pub fn curve_to(&mut self, p1: Point, p2: Point, p3: Point) -> &mut Self {
        self.path.curve_to(p1, p2, p3);
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.path.close_path();
        self
    }

    pub fn rel_line_to(&mut self, dx: Fixed, dy: Fixed) -> CoreResult<&mut Self> {
        self.path.rel_line_to(dx, dy)?;
        Ok(self)
    }

    pub fn current_point(&self) -> Option<Point> {
        self.path.get_current_point()
    }

    pub fn build(self) -> Path {
        self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_produces_the_appended_ops() {
        let mut b = PathBuilder::new();
        b.move_to(Point::from_f64(0.0, 0.0))
            .line_to(Point::from_f64(10.0, 0.0))
            .close();
        let path = b.build();
        assert_eq!(path.get_current_point(), Some(Point::from_f64(0.0, 0.0)));
    }
}
