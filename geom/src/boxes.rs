use crate::fixed::Fixed;
use crate::point::Point;

/// An axis-aligned box in [`Fixed`] coordinates, with `p1 <= p2`
/// componentwise.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct FixedBox {
    pub p1: Point,
    pub p2: Point,
}

impl FixedBox {
    pub const EMPTY: FixedBox = FixedBox {
        p1: Point {
            x: Fixed(i32::MAX),
            y: Fixed(i32::MAX),
        },
        p2: Point {
            x: Fixed(i32::MIN),
            y: Fixed(i32::MIN),
        },
    };

    #[inline]
    pub fn new(p1: Point, p2: Point) -> FixedBox {
        FixedBox {
            p1: Point::new(p1.x.min(p2.x), p1.y.min(p2.y)),
            p2: Point::new(p1.x.max(p2.x), p1.y.max(p2.y)),
        }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.p1.x >= self.p2.x || self.p1.y >= self.p2.y
    }

    pub fn union(self, other: FixedBox) -> FixedBox {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        FixedBox {
            p1: Point::new(self.p1.x.min(other.p1.x), self.p1.y.min(other.p1.y)),
            p2: Point::new(self.p2.x.max(other.p2.x), self.p2.y.max(other.p2.y)),
        }
    }

    pub fn intersect(self, other: FixedBox) -> FixedBox {
        let p1 = Point::new(self.p1.x.max(other.p1.x), self.p1.y.max(other.p1.y));
        let p2 = Point::new(self.p2.x.min(other.p2.x), self.p2.y.min(other.p2.y));
        if p1.x >= p2.x || p1.y >= p2.y {
            FixedBox::EMPTY
        } else {
            FixedBox { p1, p2 }
        }
    }

    pub fn contains_point(self, p: Point) -> bool {
        p.x >= self.p1.x && p.x < self.p2.x && p.y >= self.p1.y && p.y < self.p2.y
    }

    pub fn contains_box(self, other: FixedBox) -> bool {
        other.is_empty()
            || (self.p1.x <= other.p1.x
                && self.p1.y <= other.p1.y
                && self.p2.x >= other.p2.x
                && self.p2.y >= other.p2.y)
    }

    /// Superset integer rectangle: floor on the low corner, ceil on the
    /// high corner, matching how cairo widens fixed-point extents to
    /// integer device-pixel rectangles.
    pub fn to_integer_rect(self) -> IntRect {
        if self.is_empty() {
            return IntRect {
                x: 0,
                y: 0,
                w: 0,
                h: 0,
            };
        }
        let x0 = self.p1.x.floor();
        let y0 = self.p1.y.floor();
        let x1 = self.p2.x.ceil();
        let y1 = self.p2.y.ceil();
        IntRect {
            x: x0,
            y: y0,
            w: (x1 - x0).max(0),
            h: (y1 - y0).max(0),
        }
    }
}

impl Default for FixedBox {
    #[inline]
    fn default() -> FixedBox {
        FixedBox::EMPTY
    }
}

/// An integer-coordinate axis-aligned rectangle; `w`/`h` are always `>= 0`.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct IntRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl IntRect {
    pub const EMPTY: IntRect = IntRect {
        x: 0,
        y: 0,
        w: 0,
        h: 0,
    };

    #[inline]
    pub fn is_empty(self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    #[inline]
    pub fn left(self) -> i32 {
        self.x
    }
    #[inline]
    pub fn top(self) -> i32 {
        self.y
    }
    #[inline]
    pub fn right(self) -> i32 {
        self.x + self.w
    }
    #[inline]
    pub fn bottom(self) -> i32 {
        self.y + self.h
    }

    pub fn intersect(self, other: IntRect) -> IntRect {
        let x0 = self.left().max(other.left());
        let y0 = self.top().max(other.top());
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 <= x0 || y1 <= y0 {
            IntRect::EMPTY
        } else {
            IntRect {
                x: x0,
                y: y0,
                w: x1 - x0,
                h: y1 - y0,
            }
        }
    }

    pub fn union(self, other: IntRect) -> IntRect {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        let x0 = self.left().min(other.left());
        let y0 = self.top().min(other.top());
        let x1 = self.right().max(other.right());
        let y1 = self.bottom().max(other.bottom());
        IntRect {
            x: x0,
            y: y0,
            w: x1 - x0,
            h: y1 - y0,
        }
    }

    pub fn contains_point(self, x: i32, y: i32) -> bool {
        x >= self.left() && x < self.right() && y >= self.top() && y < self.bottom()
    }

    pub fn contains_rect(self, other: IntRect) -> bool {
        other.is_empty()
            || (self.left() <= other.left()
                && self.top() <= other.top()
                && self.right() >= other.right()
                && self.bottom() >= other.bottom())
    }

    pub fn to_fixed_box(self) -> FixedBox {
        FixedBox::new(
            Point::new(Fixed::from_i32(self.x), Fixed::from_i32(self.y)),
            Point::new(Fixed::from_i32(self.right()), Fixed::from_i32(self.bottom())),
        )
    }

    pub fn translated(self, dx: i32, dy: i32) -> IntRect {
        IntRect {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersect_of_disjoint_rects_is_empty() {
        let a = IntRect {
            x: 0,
            y: 0,
            w: 10,
            h: 10,
        };
        let b = IntRect {
            x: 20,
            y: 20,
            w: 10,
            h: 10,
        };
        assert!(a.intersect(b).is_empty());
    }

    #[test]
    fn contains_rect_is_reflexive() {
        let a = IntRect {
            x: 0,
            y: 0,
            w: 10,
            h: 10,
        };
        assert!(a.contains_rect(a));
    }
}
