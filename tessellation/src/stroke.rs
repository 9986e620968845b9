//! The stroker (C6): walks a path and emits the polygon outline of its
//! stroked region.
//!
//! The per-segment offset is grounded on `XrStrokerAddEdge` in
//! `xrstroker.c`: the tangent is inverse-transformed by the CTM into
//! user space (where the line width is isotropic), rotated a quarter
//! turn and scaled by half the line width there, then the resulting
//! offset vector is forward-transformed by the CTM back into device
//! space. Doing the rotation in device space directly would only be
//! correct for similarity transforms; an anisotropic CTM (non-uniform
//! scale, skew) needs the round trip to keep the stroke's device-space
//! width consistent with its user-space one. Joins, caps and dashing
//! are not present in that (unfinished) original and are grounded
//! instead on the join/cap/miter semantics described for this stroker
//! and on [`Pen`] for the round variants.

use crate::flatten::flatten_cubic;
use crate::pen::Pen;
use crate::polygon::Polygon;
use alloc::vec::Vec;
use num_traits::Float;
use vgcore_geom::{Matrix, Point};
use vgcore_path::{Direction, Path, PathSink};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum LineJoin {
    Miter,
    Round,
    Bevel,
}

#[derive(Clone, Debug)]
pub struct StrokeStyle {
    pub line_width: f64,
    pub cap: LineCap,
    pub join: LineJoin,
    pub miter_limit: f64,
    pub dash_array: Vec<f64>,
    pub dash_offset: f64,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        StrokeStyle {
            line_width: 1.0,
            cap: LineCap::Butt,
            join: LineJoin::Miter,
            miter_limit: 10.0,
            dash_array: Vec::new(),
            dash_offset: 0.0,
        }
    }
}

/// Strokes `path` under `ctm`, appending the outline to a fresh
/// [`Polygon`] ready for a sweep tessellator.
pub fn stroke_path(path: &Path, style: &StrokeStyle, ctm: &Matrix, tolerance: f64) -> Polygon {
    let mut polygon = Polygon::new();
    let pen = Pen::new(style.line_width / 2.0, ctm, tolerance);

    // One dash cursor for the whole call: it is not reset at sub-path
    // boundaries, so a dash pattern stays in phase across a compound
    // path's sub-paths instead of restarting at every `move_to`.
    let dash_total: f64 = style.dash_array.iter().sum();
    let mut dash_cursor = if style.dash_array.is_empty() || dash_total <= 0.0 {
        None
    } else {
        Some(DashCursor::new(&style.dash_array, style.dash_offset))
    };

    for subpath in flatten_subpaths(path, tolerance) {
        if subpath.points.len() < 2 {
            continue;
        }
        let pieces = match &mut dash_cursor {
            Some(cursor) => dash_subpath(&subpath, &style.dash_array, cursor),
            None => alloc::vec![subpath.clone()],
        };
        for piece in pieces {
            stroke_polyline(&piece, style, &pen, ctm, &mut polygon);
        }
    }

    polygon
}

#[derive(Clone, Debug)]
struct FlatSubpath {
    points: Vec<Point>,
    closed: bool,
}

fn flatten_subpaths(path: &Path, tolerance: f64) -> Vec<FlatSubpath> {
    struct Collector {
        subpaths: Vec<FlatSubpath>,
        last: Option<Point>,
        tolerance: f64,
    }
    impl PathSink for Collector {
        fn move_to(&mut self, p: Point) {
            self.subpaths.push(FlatSubpath {
                points: alloc::vec![p],
                closed: false,
            });
            self.last = Some(p);
        }
        fn line_to(&mut self, p: Point) {
            if let Some(sub) = self.subpaths.last_mut() {
                sub.points.push(p);
            }
            self.last = Some(p);
        }
        fn curve_to(&mut self, p1: Point, p2: Point, p3: Point) {
            let a = match self.last {
                Some(p) => p,
                None => return,
            };
            flatten_cubic(a, p1, p2, p3, self.tolerance, |p| {
                if let Some(sub) = self.subpaths.last_mut() {
                    sub.points.push(p);
                }
            });
            self.last = Some(p3);
        }
        fn close_path(&mut self) {
            if let Some(sub) = self.subpaths.last_mut() {
                sub.closed = true;
            }
        }
    }
    let mut collector = Collector {
        subpaths: Vec::new(),
        last: None,
        tolerance,
    };
    path.interpret(Direction::Forward, &mut collector);
    collector.subpaths
}

/// Offsets `p1 -> p2` by `half_width` (a user-space distance) to its
/// left (`left=true`) or right, in device space under `ctm`.
///
/// Matches `XrStrokerAddEdge`: the device-space tangent is pulled back
/// into user space by `ctm`'s inverse, rotated a quarter turn and
/// scaled there (where `half_width` is isotropic), then the offset
/// vector is pushed back into device space by `ctm` itself. A plain
/// device-space rotation would only be correct when `ctm` is a
/// similarity transform; this keeps anisotropic CTMs (non-uniform
/// scale, skew) producing the right device-space stroke width.
fn device_offset(p1: Point, p2: Point, half_width: f64, left: bool, ctm: &Matrix) -> (Point, Point) {
    let (x1, y1) = p1.to_f64();
    let (x2, y2) = p2.to_f64();
    let dx = x2 - x1;
    let dy = y2 - y1;
    if dx == 0.0 && dy == 0.0 {
        return (p1, p2);
    }

    let inv = ctm.invert().unwrap_or(Matrix::IDENTITY);
    let (udx, udy) = inv.transform_distance(dx, dy);
    let ulen = (udx * udx + udy * udy).sqrt();
    if ulen == 0.0 {
        return (p1, p2);
    }
    let (unx, uny) = (-udy / ulen, udx / ulen);
    let sign = if left { 1.0 } else { -1.0 };
    let (ox, oy) = ctm.transform_distance(unx * half_width * sign, uny * half_width * sign);
    (
        Point::from_f64(x1 + ox, y1 + oy),
        Point::from_f64(x2 + ox, y2 + oy),
    )
}

fn stroke_polyline(sub: &FlatSubpath, style: &StrokeStyle, pen: &Pen, ctm: &Matrix, polygon: &mut Polygon) {
    let half_width = style.line_width / 2.0;
    let n = sub.points.len();
    if n < 2 {
        return;
    }

    // Left side, forward; then right side, backward: together they
    // trace the closed outline of the stroked region with nonzero
    // winding, the same convention the filler uses for an ordinary
    // closed path.
    let mut left_side = Vec::with_capacity(n);
    let mut right_side = Vec::with_capacity(n);
    for w in sub.points.windows(2) {
        let (l1, l2) = device_offset(w[0], w[1], half_width, true, ctm);
        let (r1, r2) = device_offset(w[0], w[1], half_width, false, ctm);
        left_side.push((l1, l2));
        right_side.push((r1, r2));
    }

    let mut outline = Vec::new();
    outline.push(left_side[0].0);
    for i in 0..left_side.len() {
        outline.push(left_side[i].1);
        if i + 1 < left_side.len() {
            add_join(&mut outline, style, pen, sub.points[i + 1], left_side[i].1, left_side[i + 1].0);
        }
    }
    if sub.closed {
        add_join(
            &mut outline,
            style,
            pen,
            sub.points[0],
            left_side.last().unwrap().1,
            left_side[0].0,
        );
    } else {
        add_cap(&mut outline, style, pen, sub.points[n - 1], sub.points[n - 2]);
    }

    outline.push(right_side.last().unwrap().1);
    for i in (0..right_side.len()).rev() {
        outline.push(right_side[i].0);
        if i > 0 {
            add_join(&mut outline, style, pen, sub.points[i], right_side[i].0, right_side[i - 1].1);
        }
    }
    if sub.closed {
        add_join(
            &mut outline,
            style,
            pen,
            sub.points[0],
            right_side[0].0,
            right_side.last().unwrap().1,
        );
    } else {
        add_cap(&mut outline, style, pen, sub.points[0], sub.points[1]);
    }

    for i in 0..outline.len() {
        let a = outline[i];
        let b = outline[(i + 1) % outline.len()];
        polygon.add_edge(a, b);
    }
}

/// Adds the join geometry bending through `at`, from the outer point on
/// the incoming segment (`from`) to the outer point on the outgoing
/// segment (`to`).
fn add_join(outline: &mut Vec<Point>, style: &StrokeStyle, pen: &Pen, at: Point, from: Point, to: Point) {
    match style.join {
        LineJoin::Bevel => {
            outline.push(from);
            outline.push(to);
        }
        LineJoin::Round => {
            let (ax, ay) = at.to_f64();
            let slope_in = vgcore_geom::Slope::new(at, from);
            let slope_out = vgcore_geom::Slope::new(at, to);
            let start = pen.find_active_vertex(slope_in);
            let stop = pen.find_active_vertex(slope_out);
            outline.push(from);
            for v in pen.vertices_clockwise(start, stop) {
                let (vx, vy) = v.to_f64();
                outline.push(Point::from_f64(ax + vx, ay + vy));
            }
            outline.push(to);
        }
        LineJoin::Miter => {
            if let Some(apex) = miter_apex(at, from, to, style.miter_limit) {
                outline.push(from);
                outline.push(apex);
                outline.push(to);
            } else {
                outline.push(from);
                outline.push(to);
            }
        }
    }
}

/// The outer miter point, or `None` if the join exceeds the miter limit
/// and should fall back to a bevel: `2 <= m^2 * (1 - t_in . t_out)`.
fn miter_apex(at: Point, from: Point, to: Point, miter_limit: f64) -> Option<Point> {
    let (ax, ay) = at.to_f64();
    let (fx, fy) = from.to_f64();
    let (tx, ty) = to.to_f64();

    let in_dx = fx - ax;
    let in_dy = fy - ay;
    let out_dx = tx - ax;
    let out_dy = ty - ay;
    let in_len = (in_dx * in_dx + in_dy * in_dy).sqrt();
    let out_len = (out_dx * out_dx + out_dy * out_dy).sqrt();
    if in_len == 0.0 || out_len == 0.0 {
        return None;
    }
    let dot = (in_dx * out_dx + in_dy * out_dy) / (in_len * out_len);
    if miter_limit * miter_limit * (1.0 - dot) < 2.0 {
        return None;
    }

    // Intersection of the two offset lines' directions from `from` and
    // `to`, extended along the join bisector.
    let bisector_x = in_dx / in_len + out_dx / out_len;
    let bisector_y = in_dy / in_len + out_dy / out_len;
    let bisector_len = (bisector_x * bisector_x + bisector_y * bisector_y).sqrt();
    if bisector_len == 0.0 {
        return None;
    }
    let half_width = ((fx - ax).powi(2) + (fy - ay).powi(2)).sqrt();
    let half_angle_cos = (1.0 + dot).max(0.0) / 2.0;
    let half_angle_cos = half_angle_cos.sqrt();
    if half_angle_cos == 0.0 {
        return None;
    }
    let miter_len = half_width / half_angle_cos;
    Some(Point::from_f64(
        ax + bisector_x / bisector_len * miter_len,
        ay + bisector_y / bisector_len * miter_len,
    ))
}

/// Extends `outline`'s last point across the end of the stroke at `at`,
/// facing away from `towards`. A butt cap adds nothing; a square cap
/// pushes the outer point straight out by the pen radius; a round cap
/// fans the pen's vertices across the half turn from the last outline
/// point to the segment's forward normal.
fn add_cap(outline: &mut Vec<Point>, style: &StrokeStyle, pen: &Pen, at: Point, towards: Point) {
    let (ax, ay) = at.to_f64();
    let (tx, ty) = towards.to_f64();
    let dx = ax - tx;
    let dy = ay - ty;
    let len = (dx * dx + dy * dy).sqrt();
    if len == 0.0 {
        return;
    }

    match style.cap {
        LineCap::Butt => {}
        LineCap::Square => {
            let half_width = pen.radius_device;
            let ox = dx / len * half_width;
            let oy = dy / len * half_width;
            let last = *outline.last().unwrap();
            let (lx, ly) = last.to_f64();
            outline.push(Point::from_f64(lx + ox, ly + oy));
        }
        LineCap::Round => {
            let last = *outline.last().unwrap();
            let outward = Point::from_f64(ax + dx / len, ay + dy / len);
            let start = pen.find_active_vertex(vgcore_geom::Slope::new(at, last));
            let stop = pen.find_active_vertex(vgcore_geom::Slope::new(at, outward));
            for v in pen.vertices_clockwise(start, stop) {
                let (vx, vy) = v.to_f64();
                outline.push(Point::from_f64(ax + vx, ay + vy));
            }
        }
    }
}

/// Where a dash pattern currently stands: which entry of `dash_array` is
/// active, whether it's an "on" (ink) or "off" (gap) entry, and how much
/// of it is left to consume. Threaded by `&mut` across every sub-path of
/// one [`stroke_path`] call instead of being re-derived per sub-path, so
/// the pattern stays in phase across a compound path's sub-path breaks.
struct DashCursor {
    index: usize,
    on: bool,
    remaining: f64,
}

impl DashCursor {
    /// `dashes` must be non-empty with a positive total; callers check
    /// this once up front rather than on every sub-path.
    fn new(dashes: &[f64], offset: f64) -> Self {
        let total: f64 = dashes.iter().sum();
        let mut phase = offset.rem_euclid(total);
        let mut index = 0;
        while phase >= dashes[index] {
            phase -= dashes[index];
            index = (index + 1) % dashes.len();
        }
        DashCursor {
            index,
            on: index % 2 == 0,
            remaining: dashes[index] - phase,
        }
    }
}

/// Splits `sub` into its "on" pieces, consuming `cursor` as it walks the
/// polyline so the next call (on the next sub-path) picks up exactly
/// where this one left off.
fn dash_subpath(sub: &FlatSubpath, dashes: &[f64], cursor: &mut DashCursor) -> Vec<FlatSubpath> {
    let mut pieces = Vec::new();

    let mut current: Option<Vec<Point>> = if cursor.on {
        Some(alloc::vec![sub.points[0]])
    } else {
        None
    };

    for w in sub.points.windows(2) {
        let mut seg_start = w[0];
        let seg_end = w[1];
        let (sx, sy) = seg_start.to_f64();
        let (ex, ey) = seg_end.to_f64();
        let mut seg_len = ((ex - sx).powi(2) + (ey - sy).powi(2)).sqrt();

        while seg_len > cursor.remaining {
            let t = cursor.remaining / seg_len;
            let (x0, y0) = seg_start.to_f64();
            let (x1, y1) = seg_end.to_f64();
            let split = Point::from_f64(x0 + (x1 - x0) * t, y0 + (y1 - y0) * t);
            if let Some(mut points) = current.take() {
                points.push(split);
                pieces.push(FlatSubpath {
                    points,
                    closed: false,
                });
            }
            cursor.on = !cursor.on;
            if cursor.on {
                current = Some(alloc::vec![split]);
            }
            seg_len -= cursor.remaining;
            seg_start = split;
            cursor.index = (cursor.index + 1) % dashes.len();
            cursor.remaining = dashes[cursor.index];
        }
        cursor.remaining -= seg_len;
        if let Some(points) = current.as_mut() {
            points.push(seg_end);
        }
    }
    if let Some(points) = current {
        if points.len() >= 2 {
            pieces.push(FlatSubpath {
                points,
                closed: false,
            });
        }
    }
    merge_zero_gap_pieces(pieces)
}

/// Merges adjacent "on" pieces left split by a zero-length gap entry in
/// `dash_array`: without this, such a piece boundary would get a pair
/// of caps facing each other at the same point instead of being treated
/// as the single continuous run it geometrically is.
fn merge_zero_gap_pieces(pieces: Vec<FlatSubpath>) -> Vec<FlatSubpath> {
    let mut merged: Vec<FlatSubpath> = Vec::with_capacity(pieces.len());
    for piece in pieces {
        if let Some(last) = merged.last_mut() {
            if last.points.last() == piece.points.first() {
                last.points.extend(piece.points.into_iter().skip(1));
                continue;
            }
        }
        merged.push(piece);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::from_f64(x, y)
    }

    #[test]
    fn a_straight_segment_strokes_into_a_closed_outline() {
        let mut path = Path::new();
        path.move_to(p(0.0, 0.0));
        path.line_to(p(10.0, 0.0));
        let style = StrokeStyle {
            line_width: 2.0,
            ..StrokeStyle::default()
        };
        let polygon = stroke_path(&path, &style, &Matrix::IDENTITY, 0.1);
        assert!(!polygon.is_empty());
    }

    #[test]
    fn a_tight_bend_falls_back_from_miter_to_bevel() {
        let at = p(0.0, 0.0);
        let from = p(-1.0, 5.0);
        let to = p(1.0, 5.0);
        assert!(miter_apex(at, from, to, 1.0).is_none());
    }

    #[test]
    fn dash_pattern_splits_a_straight_line_into_alternating_pieces() {
        let sub = FlatSubpath {
            points: alloc::vec![p(0.0, 0.0), p(10.0, 0.0)],
            closed: false,
        };
        let dashes = [2.0, 2.0];
        let mut cursor = DashCursor::new(&dashes, 0.0);
        let pieces = dash_subpath(&sub, &dashes, &mut cursor);
        assert!(pieces.len() >= 2);
    }

    #[test]
    fn the_dash_cursor_does_not_reset_across_sub_path_boundaries() {
        let dashes = [5.0, 5.0];
        let mut cursor = DashCursor::new(&dashes, 0.0);
        let first = FlatSubpath {
            points: alloc::vec![p(0.0, 0.0), p(3.0, 0.0)],
            closed: false,
        };
        let _ = dash_subpath(&first, &dashes, &mut cursor);
        // 3 units into a 5-unit "on" dash: 2 units of "on" remain, not 5,
        // proving the cursor carried over instead of restarting fresh.
        assert!(cursor.on);
        assert!((cursor.remaining - 2.0).abs() < 1e-9);
    }

    #[test]
    fn a_ctm_scaled_stroke_offsets_by_the_user_space_half_width() {
        let mut path = Path::new();
        path.move_to(p(0.0, 0.0));
        path.line_to(p(0.0, 10.0));
        let style = StrokeStyle {
            line_width: 2.0,
            ..StrokeStyle::default()
        };
        // A horizontal 4x scale: a vertical segment's device-space
        // stroke width along x must inherit that scale, so the 2-unit
        // user-space line width becomes an 8-unit device-space band.
        let ctm = Matrix::scale(4.0, 1.0);
        let polygon = stroke_path(&path, &style, &ctm, 0.1);
        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        for e in polygon.edges() {
            let (x1, _) = e.line.p1.to_f64();
            let (x2, _) = e.line.p2.to_f64();
            min_x = min_x.min(x1).min(x2);
            max_x = max_x.max(x1).max(x2);
        }
        // Fixed is a 16.16 format, so allow for its quantization error
        // rather than demanding float-exact equality.
        assert!((max_x - min_x - 8.0).abs() < 1e-3, "width was {}", max_x - min_x);
    }
}
