//! Rectangular sweep (C10): a specialisation for purely axis-aligned
//! input, where every shape is already a list of rectangles rather than
//! general edges.
//!
//! Grounded on `cairo-bentley-ottmann-rectangular.c`: rectangles are
//! sorted by `top` once up front, then swept row by row, with each
//! row's smallest `bottom` among the active edges driving when an edge
//! leaves the active set. Its doubly linked active list with
//! `insert_left`/`insert_right` hints is flattened here to a single
//! sorted `Vec`, since amortising the insertion point only matters at
//! data sizes this crate doesn't need to optimise for; the event-loop
//! structure and the trapezoid-opening/closing rule are kept.

use crate::trapezoid::{Trapezoid, TrapezoidArray};
use alloc::vec::Vec;
use vgcore_geom::{Fixed, Line, Point};

/// One rectilinear input shape: a vertical strip from `top` to `bottom`
/// between `left` and `right`, in device Fixed coordinates.
#[derive(Copy, Clone, Debug)]
pub struct InputRect {
    pub top: Fixed,
    pub bottom: Fixed,
    pub left: Fixed,
    pub right: Fixed,
}

#[derive(Copy, Clone, Debug)]
struct ActiveEdge {
    x: Fixed,
    dir: i32,
    bottom: Fixed,
}

/// Sweeps a list of rectangles and returns their non-zero-winding union
/// as a trapezoid array; every trapezoid is axis-aligned by
/// construction, so the result is always rectilinear.
pub fn sweep_rectangles(rects: &[InputRect]) -> TrapezoidArray {
    let mut sorted: Vec<InputRect> = rects.to_vec();
    sorted.sort_by(|a, b| a.top.cmp(&b.top));

    let mut output = TrapezoidArray::new();
    if sorted.is_empty() {
        return output;
    }

    let mut active: Vec<ActiveEdge> = Vec::new();
    let mut cursor = 0;
    let mut y = sorted[0].top;

    loop {
        while cursor < sorted.len() && sorted[cursor].top <= y {
            let r = sorted[cursor];
            active.push(ActiveEdge {
                x: r.left,
                dir: 1,
                bottom: r.bottom,
            });
            active.push(ActiveEdge {
                x: r.right,
                dir: -1,
                bottom: r.bottom,
            });
            cursor += 1;
        }

        active.retain(|e| e.bottom > y);
        active.sort_by(|a, b| a.x.cmp(&b.x));

        if active.is_empty() && cursor >= sorted.len() {
            break;
        }

        let next_top = if cursor < sorted.len() {
            Some(sorted[cursor].top)
        } else {
            None
        };
        let next_stop = active.iter().map(|e| e.bottom).min();

        let y_next = match (next_top, next_stop) {
            (Some(a), Some(b)) => a.min(b),
            (Some(a), None) => a,
            (None, Some(b)) => b,
            (None, None) => break,
        };
        if y_next <= y {
            break;
        }

        emit_slab(&active, y, y_next, &mut output);
        y = y_next;
    }

    #[cfg(feature = "std")]
    crate::debug::dump_trapezoids("sweep_rectangles", &output);

    output
}

fn emit_slab(active: &[ActiveEdge], top: Fixed, bottom: Fixed, output: &mut TrapezoidArray) {
    let mut winding = 0;
    let mut open_x: Option<Fixed> = None;
    for edge in active {
        let was_inside = winding != 0;
        winding += edge.dir;
        let is_inside = winding != 0;
        if !was_inside && is_inside {
            open_x = Some(edge.x);
        } else if was_inside && !is_inside {
            if let Some(left_x) = open_x.take() {
                let left = Line::new(Point::new(left_x, top), Point::new(left_x, bottom));
                let right = Line::new(Point::new(edge.x, top), Point::new(edge.x, bottom));
                if let Some(trap) = Trapezoid::new(top, bottom, left, right) {
                    output.push(trap);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(top: f64, bottom: f64, left: f64, right: f64) -> InputRect {
        InputRect {
            top: Fixed::from_f64(top),
            bottom: Fixed::from_f64(bottom),
            left: Fixed::from_f64(left),
            right: Fixed::from_f64(right),
        }
    }

    #[test]
    fn a_single_rectangle_produces_one_trapezoid() {
        let traps = sweep_rectangles(&[r(0.0, 10.0, 0.0, 10.0)]);
        assert_eq!(traps.len(), 1);
        assert!(traps.is_rectangular());
    }

    #[test]
    fn two_stacked_rectangles_of_equal_width_merge_by_staying_separate_rows() {
        let traps = sweep_rectangles(&[r(0.0, 10.0, 0.0, 10.0), r(10.0, 20.0, 0.0, 10.0)]);
        assert_eq!(traps.len(), 2);
    }

    #[test]
    fn two_overlapping_rectangles_union_without_double_counting() {
        let traps = sweep_rectangles(&[r(0.0, 10.0, 0.0, 10.0), r(0.0, 10.0, 5.0, 15.0)]);
        // non-zero winding over [0,15) at this row: a single trapezoid.
        assert_eq!(traps.len(), 1);
    }
}
