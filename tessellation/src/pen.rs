//! Stroke pen (C5): a convex polygon approximating a circle under the
//! current transform, used by the stroker for round joins and caps.
//!
//! Grounded on `XrPenInit`/`_XrPenVerticesNeeded` from `xrpen.c`: vertex
//! count is derived from the tolerance and the matrix's largest singular
//! value so a round cap stays visually round at any zoom level without
//! wasting vertices when zoomed out.

use alloc::vec::Vec;
use vgcore_geom::{Matrix, Point, Slope};

#[derive(Copy, Clone, Debug)]
pub struct PenVertex {
    pub point: Point,
    /// Slope from the previous vertex into this one.
    pub slope_in: Slope,
    /// Slope from this vertex into the next one.
    pub slope_out: Slope,
}

#[derive(Clone, Debug)]
pub struct Pen {
    pub radius_device: f64,
    pub vertices: Vec<PenVertex>,
}

impl Pen {
    /// Builds a pen of radius `r` (user space) under `ctm`, with enough
    /// vertices that the polygonal approximation stays within
    /// `tolerance` (user space) of a true circle.
    pub fn new(r: f64, ctm: &Matrix, tolerance: f64) -> Pen {
        let n = vertices_needed(r, tolerance, ctm).max(4);
        let mut points = Vec::with_capacity(n);
        for i in 0..n {
            let theta = 2.0 * core::f64::consts::PI * (i as f64) / (n as f64);
            let (dx, dy) = ctm.transform_distance(r * theta.cos(), r * theta.sin());
            points.push(Point::from_f64(dx, dy));
        }

        let mut vertices = Vec::with_capacity(n);
        for i in 0..n {
            let prev = points[(i + n - 1) % n];
            let cur = points[i];
            let next = points[(i + 1) % n];
            vertices.push(PenVertex {
                point: cur,
                slope_in: Slope::new(prev, cur),
                slope_out: Slope::new(cur, next),
            });
        }

        Pen {
            radius_device: r * ctm.max_singular_value(),
            vertices,
        }
    }

    /// Index of the pen vertex whose outward direction is furthest
    /// clockwise from `slope`, i.e. the vertex that should sit on the
    /// outside of a join bending through `slope`.
    pub fn find_active_vertex(&self, slope: Slope) -> usize {
        let mut best = 0;
        for (i, v) in self.vertices.iter().enumerate() {
            if v.slope_in.clockwise(slope) && slope.clockwise(v.slope_out) {
                best = i;
                break;
            }
        }
        best
    }

    /// Vertices from index `start` to `stop`, walking clockwise, used to
    /// fill the outside of a round join or cap.
    pub fn vertices_clockwise(&self, start: usize, stop: usize) -> impl Iterator<Item = Point> + '_ {
        let n = self.vertices.len();
        let count = if stop >= start {
            stop - start + 1
        } else {
            n - start + stop + 1
        };
        (0..count).map(move |k| self.vertices[(start + k) % n].point)
    }
}

/// `n = ceil(pi / theta)`, `theta = acos(1 - tolerance / (r * sigma_max))`,
/// clamped to a minimum of 4 sides.
fn vertices_needed(r: f64, tolerance: f64, ctm: &Matrix) -> usize {
    let sigma_max = ctm.max_singular_value();
    let scaled_radius = r * sigma_max;
    if scaled_radius <= 0.0 {
        return 4;
    }
    let ratio = (1.0 - tolerance / scaled_radius).clamp(-1.0, 1.0);
    let theta = libm_acos(ratio);
    if theta <= 0.0 {
        return 4;
    }
    let n = (core::f64::consts::PI / theta).ceil();
    if n < 4.0 {
        4
    } else {
        n as usize
    }
}

#[inline]
fn libm_acos(x: f64) -> f64 {
    use num_traits::Float;
    x.acos()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pen_has_at_least_four_vertices_even_for_a_tiny_radius() {
        let pen = Pen::new(0.01, &Matrix::IDENTITY, 0.25);
        assert!(pen.vertices.len() >= 4);
    }

    #[test]
    fn larger_radius_needs_more_vertices_at_the_same_tolerance() {
        let small = Pen::new(1.0, &Matrix::IDENTITY, 0.1);
        let large = Pen::new(100.0, &Matrix::IDENTITY, 0.1);
        assert!(large.vertices.len() >= small.vertices.len());
    }

    #[test]
    fn vertices_clockwise_wraps_around_the_vertex_array() {
        let pen = Pen::new(10.0, &Matrix::IDENTITY, 0.1);
        let n = pen.vertices.len();
        let wrapped: Vec<_> = pen.vertices_clockwise(n - 1, 1).collect();
        assert_eq!(wrapped.len(), 3);
    }
}
