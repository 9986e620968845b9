//! Integer region (C12): a set of disjoint axis-aligned rectangles with
//! the boolean operations the clip engine needs.
//!
//! This is the "external primitive" the component design calls out as
//! out of scope to build in full (general region boolean algebra is its
//! own sizeable module); what's implemented here is the narrow slice
//! the clip stack actually calls: constructing a region from a single
//! rectangle or from a rectilinear trapezoid array, intersecting two
//! regions, and querying containment.

use alloc::vec::Vec;
use vgcore_geom::IntRect;

/// A set of disjoint rectangles. Invariant: no two rectangles in
/// `rects` overlap. Not merged into maximal runs — this crate only
/// ever needs membership and intersection, not a minimal
/// representation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Region {
    rects: Vec<IntRect>,
}

impl Region {
    pub fn empty() -> Self {
        Region { rects: Vec::new() }
    }

    pub fn from_rect(r: IntRect) -> Self {
        if r.is_empty() {
            Region::empty()
        } else {
            Region { rects: alloc::vec![r] }
        }
    }

    /// Builds a region from a set of non-overlapping rectangles, as
    /// produced by a rectilinear, rectangular sweep (C10). Panics in
    /// debug builds are deliberately avoided: if the caller passes
    /// overlapping input the region just double-counts on intersection
    /// tests, which only affects callers that violate the contract.
    pub fn from_rects(rects: impl IntoIterator<Item = IntRect>) -> Self {
        Region {
            rects: rects.into_iter().filter(|r| !r.is_empty()).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn rects(&self) -> &[IntRect] {
        &self.rects
    }

    pub fn extents(&self) -> IntRect {
        let mut out = IntRect::EMPTY;
        for r in &self.rects {
            out = out.union(*r);
        }
        out
    }

    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        self.rects.iter().any(|r| r.contains_point(x, y))
    }

    /// Intersects `self` with `other`, returning the piecewise
    /// rectangle intersection.
    pub fn intersect(&self, other: &Region) -> Region {
        let mut rects = Vec::new();
        for a in &self.rects {
            for b in &other.rects {
                let r = a.intersect(*b);
                if !r.is_empty() {
                    rects.push(r);
                }
            }
        }
        Region { rects }
    }

    pub fn union(&self, other: &Region) -> Region {
        let mut rects = self.rects.clone();
        rects.extend_from_slice(&other.rects);
        Region { rects }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: i32, y: i32, w: i32, h: i32) -> IntRect {
        IntRect { x, y, w, h }
    }

    #[test]
    fn intersecting_two_disjoint_rectangles_is_empty() {
        let a = Region::from_rect(r(0, 0, 10, 10));
        let b = Region::from_rect(r(20, 20, 10, 10));
        assert!(a.intersect(&b).is_empty());
    }

    #[test]
    fn intersecting_overlapping_rectangles_keeps_the_overlap() {
        let a = Region::from_rect(r(0, 0, 10, 10));
        let b = Region::from_rect(r(5, 5, 10, 10));
        let i = a.intersect(&b);
        assert_eq!(i.extents(), r(5, 5, 5, 5));
    }

    #[test]
    fn a_point_inside_any_rect_is_contained() {
        let region = Region::from_rects([r(0, 0, 10, 10), r(20, 0, 10, 10)]);
        assert!(region.contains_point(25, 5));
        assert!(!region.contains_point(15, 5));
    }
}
