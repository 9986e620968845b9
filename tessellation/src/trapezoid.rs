//! The trapezoid array (C9): the common output format both sweep
//! tessellators (C10, C11) emit into.

use alloc::vec::Vec;
use vgcore_geom::{Fixed, Line};

/// A trapezoid spanning `[top, bottom]`, bounded on the sides by two
/// lines evaluated only within that span. `top < bottom` always holds;
/// zero-height trapezoids are never constructed.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Trapezoid {
    pub top: Fixed,
    pub bottom: Fixed,
    pub left: Line,
    pub right: Line,
}

impl Trapezoid {
    pub fn new(top: Fixed, bottom: Fixed, left: Line, right: Line) -> Option<Trapezoid> {
        if top >= bottom {
            return None;
        }
        Some(Trapezoid {
            top,
            bottom,
            left,
            right,
        })
    }

    #[inline]
    pub fn is_rectilinear(&self) -> bool {
        self.left.is_vertical() && self.right.is_vertical()
    }

    #[inline]
    pub fn is_rectangular(&self) -> bool {
        self.is_rectilinear()
            && self.left.p1.y == self.top
            && self.left.p2.y == self.bottom
            && self.right.p1.y == self.top
            && self.right.p2.y == self.bottom
    }
}

/// An append-only vector of trapezoids with monotone shape flags: once
/// cleared by a non-conforming trapezoid, a flag never turns back on.
#[derive(Clone, Debug, Default)]
pub struct TrapezoidArray {
    traps: Vec<Trapezoid>,
    is_rectilinear: bool,
    is_rectangular: bool,
}

impl TrapezoidArray {
    pub fn new() -> Self {
        TrapezoidArray {
            traps: Vec::new(),
            is_rectilinear: true,
            is_rectangular: true,
        }
    }

    pub fn push(&mut self, trap: Trapezoid) {
        self.is_rectilinear &= trap.is_rectilinear();
        self.is_rectangular &= trap.is_rectangular();
        self.traps.push(trap);
    }

    #[inline]
    pub fn as_slice(&self) -> &[Trapezoid] {
        &self.traps
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.traps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.traps.is_empty()
    }

    #[inline]
    pub fn is_rectilinear(&self) -> bool {
        self.is_rectilinear
    }

    #[inline]
    pub fn is_rectangular(&self) -> bool {
        self.is_rectangular
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vgcore_geom::Point;

    fn vline(x: f64, y0: f64, y1: f64) -> Line {
        Line::new(Point::from_f64(x, y0), Point::from_f64(x, y1))
    }

    #[test]
    fn zero_height_trapezoids_are_rejected() {
        let t = Fixed::from_i32(5);
        assert!(Trapezoid::new(t, t, vline(0.0, 5.0, 5.0), vline(1.0, 5.0, 5.0)).is_none());
    }

    #[test]
    fn a_single_slanted_trapezoid_clears_both_flags() {
        let mut array = TrapezoidArray::new();
        let left = Line::new(Point::from_f64(0.0, 0.0), Point::from_f64(1.0, 10.0));
        let right = vline(5.0, 0.0, 10.0);
        array.push(Trapezoid::new(Fixed::ZERO, Fixed::from_i32(10), left, right).unwrap());
        assert!(!array.is_rectilinear());
        assert!(!array.is_rectangular());
    }

    #[test]
    fn axis_aligned_trapezoids_keep_both_flags() {
        let mut array = TrapezoidArray::new();
        let top = Fixed::ZERO;
        let bottom = Fixed::from_i32(10);
        array.push(Trapezoid::new(top, bottom, vline(0.0, 0.0, 10.0), vline(5.0, 0.0, 10.0)).unwrap());
        assert!(array.is_rectilinear());
        assert!(array.is_rectangular());
    }
}
