//! General polygon sweep (C11): a Bentley-Ottmann sweep over arbitrary
//! (non-axis-aligned) edges, emitting trapezoids slab by slab.
//!
//! Grounded on `cairo_traps.c`'s `_cairo_bentley_ottmann_tessellate_polygon`:
//! edges are split into an inactive list (sorted by top) and an active
//! list (sorted by current x), and the sweep advances to the next event
//! that could change the active list's x-order — a new edge becoming
//! active, an edge going inactive, or two active edges crossing. Within
//! a slab bounded by two consecutive events, the active list's order
//! and membership are invariant, so the whole slab's trapezoids can be
//! emitted in one pass over the sorted active list.

use crate::polygon::{FillRule, Polygon};
use crate::trapezoid::{Trapezoid, TrapezoidArray};
use vgcore_geom::Fixed;

#[derive(Copy, Clone, Debug)]
struct SweepEdge {
    line: vgcore_geom::Line,
    top: Fixed,
    bottom: Fixed,
    dir: i32,
}

impl SweepEdge {
    fn x_at(&self, y: Fixed) -> Fixed {
        if self.line.is_vertical() {
            self.line.p1.x
        } else {
            self.line.x_at_y(y)
        }
    }
}

/// Runs the general sweep over every edge in `polygon`, under `rule`,
/// producing an ordered trapezoid array (top-to-bottom, then
/// left-to-right within a row).
pub fn sweep_polygon(polygon: &Polygon, rule: FillRule) -> TrapezoidArray {
    let mut inactive: alloc::vec::Vec<SweepEdge> = polygon
        .edges()
        .iter()
        .map(|e| SweepEdge {
            line: e.line,
            top: e.top,
            bottom: e.bottom,
            dir: e.dir.value(),
        })
        .collect();
    inactive.sort_by(|a, b| a.top.cmp(&b.top));

    let mut output = TrapezoidArray::new();
    if inactive.is_empty() {
        return output;
    }

    let mut active: alloc::vec::Vec<SweepEdge> = alloc::vec::Vec::new();
    let mut cursor = 0;
    let mut y = inactive[0].top;

    loop {
        while cursor < inactive.len() && inactive[cursor].top <= y {
            active.push(inactive[cursor]);
            cursor += 1;
        }
        active.retain(|e| e.bottom > y);
        // Ties (two edges crossing the same point) are broken by slope,
        // less-clockwise first, so the order stays well-defined at the
        // crossing itself instead of depending on push order.
        active.sort_by(|a, b| {
            a.x_at(y)
                .cmp(&b.x_at(y))
                .then_with(|| a.line.slope().compare(b.line.slope()))
        });

        if active.is_empty() && cursor >= inactive.len() {
            break;
        }

        let mut y_next = active.iter().map(|e| e.bottom).min();
        if cursor < inactive.len() {
            y_next = Some(match y_next {
                Some(v) => v.min(inactive[cursor].top),
                None => inactive[cursor].top,
            });
        }
        for w in active.windows(2) {
            if let Some(cross_y) = intersection_y(&w[0], &w[1], y) {
                y_next = Some(match y_next {
                    Some(v) => v.min(cross_y),
                    None => cross_y,
                });
            }
        }

        let y_next = match y_next {
            Some(v) if v > y => v,
            _ => break,
        };

        emit_slab(&active, y, y_next, rule, &mut output);
        y = y_next;
    }

    #[cfg(feature = "std")]
    crate::debug::dump_trapezoids("sweep_polygon", &output);

    output
}

/// Walks the (x-sorted, membership-stable) active list across
/// `[top, bottom)` and emits one trapezoid per maximal run where the
/// running winding count is inside, per `rule`.
fn emit_slab(
    active: &[SweepEdge],
    top: Fixed,
    bottom: Fixed,
    rule: FillRule,
    output: &mut TrapezoidArray,
) {
    let mut winding = 0;
    let mut open_left: Option<usize> = None;
    for i in 0..active.len() {
        let was_inside = rule.is_inside(winding);
        winding += active[i].dir;
        let is_inside = rule.is_inside(winding);
        if !was_inside && is_inside {
            open_left = Some(i);
        } else if was_inside && !is_inside {
            if let Some(left) = open_left.take() {
                if let Some(trap) = Trapezoid::new(top, bottom, active[left].line, active[i].line)
                {
                    output.push(trap);
                }
            }
        }
    }
}

/// The y at which `a` and `b` cross, strictly after `after`, or `None`
/// if they don't (they're parallel, or the crossing falls outside
/// either edge's own `[top, bottom)` span).
///
/// Computed with the same exact cross products `Slope::compare` uses
/// rather than a float determinant solve, so dense runs of near-parallel
/// edges don't drift the event order out of sync with the active-list
/// comparisons driving the sweep. The final division is widened to
/// 128 bits since the numerator is itself a product of two already
/// widened (64-bit) cross products.
fn intersection_y(a: &SweepEdge, b: &SweepEdge, after: Fixed) -> Option<Fixed> {
    let sa = a.line.slope();
    let sb = b.line.slope();

    let denom = sa.dx.wide_mul(sb.dy) - sa.dy.wide_mul(sb.dx);
    if denom == 0 {
        return None;
    }

    let dbx = b.line.p1.x - a.line.p1.x;
    let dby = b.line.p1.y - a.line.p1.y;
    let t_num = dbx.wide_mul(sb.dy) - dby.wide_mul(sb.dx);

    let y_num = (a.line.p1.y.0 as i128) * (denom as i128) + (t_num as i128) * (sa.dy.0 as i128);
    let y_raw = Fixed((y_num / denom as i128) as i32);

    let limit = a.bottom.min(b.bottom);
    if y_raw > limit {
        return None;
    }

    if y_raw > after {
        return Some(y_raw);
    }
    // The exact crossing lands on or before `after`: promote it by one
    // sub-pixel unit so the event is still guaranteed to lie strictly
    // past the sweep line, unless that promotion would push it beyond
    // where one of the edges has already ended.
    let promoted = after + Fixed::EPSILON;
    if promoted > limit {
        None
    } else {
        Some(promoted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vgcore_geom::Point;

    #[test]
    fn a_simple_rectangle_produces_one_trapezoid() {
        let mut polygon = Polygon::new();
        polygon.add_edge(Point::from_f64(0.0, 0.0), Point::from_f64(0.0, 10.0));
        polygon.add_edge(Point::from_f64(10.0, 0.0), Point::from_f64(10.0, 10.0));
        let traps = sweep_polygon(&polygon, FillRule::NonZero);
        assert_eq!(traps.len(), 1);
        assert!(traps.is_rectangular());
    }

    #[test]
    fn a_triangle_produces_trapezoids_that_narrow_toward_the_apex() {
        let mut polygon = Polygon::new();
        polygon.add_edge(Point::from_f64(0.0, 0.0), Point::from_f64(10.0, 0.0));
        polygon.add_edge(Point::from_f64(10.0, 0.0), Point::from_f64(5.0, 10.0));
        polygon.add_edge(Point::from_f64(5.0, 10.0), Point::from_f64(0.0, 0.0));
        let traps = sweep_polygon(&polygon, FillRule::NonZero);
        assert!(!traps.is_empty());
        assert!(!traps.is_rectangular());
    }
}
