use vgcore::clip::{Antialias, Clip};
use vgcore::geom::{Fixed, IntRect, Matrix, Point};
use vgcore::path::{Direction, Path};
use vgcore::tessellate::{fill_path, stroke_path, sweep_polygon, FillRule, LineCap, LineJoin, StrokeStyle};

fn p(x: f64, y: f64) -> Point {
    Point::from_f64(x, y)
}

/// Scenario A — single rectangle fill, winding.
#[test]
fn single_rectangle_fill_produces_one_rectangular_trapezoid() {
    let mut path = Path::new();
    path.move_to(p(10.0, 20.0));
    path.line_to(p(30.0, 20.0));
    path.line_to(p(30.0, 50.0));
    path.line_to(p(10.0, 50.0));
    path.close_path();

    let polygon = fill_path(&path, 0.5, Direction::Forward);
    let traps = sweep_polygon(&polygon, FillRule::NonZero);

    assert_eq!(traps.len(), 1);
    assert!(traps.is_rectangular());
    let t = &traps.as_slice()[0];
    assert_eq!(t.top, Fixed::from_f64(20.0));
    assert_eq!(t.bottom, Fixed::from_f64(50.0));
    assert_eq!(t.left.p1.x, Fixed::from_f64(10.0));
    assert_eq!(t.right.p1.x, Fixed::from_f64(30.0));
}

/// Scenario B — two overlapping rectangles, even-odd: the overlap
/// carves a hole, leaving four tiles.
#[test]
fn overlapping_rectangles_under_even_odd_leave_a_hole() {
    let mut path = Path::new();
    path.move_to(p(0.0, 0.0));
    path.line_to(p(10.0, 0.0));
    path.line_to(p(10.0, 10.0));
    path.line_to(p(0.0, 10.0));
    path.close_path();
    path.move_to(p(5.0, 5.0));
    path.line_to(p(15.0, 5.0));
    path.line_to(p(15.0, 15.0));
    path.line_to(p(5.0, 15.0));
    path.close_path();

    let polygon = fill_path(&path, 0.5, Direction::Forward);
    let traps = sweep_polygon(&polygon, FillRule::EvenOdd);

    assert_eq!(traps.len(), 4);
}

/// Scenario C — triangle, winding.
#[test]
fn triangle_fill_produces_a_single_converging_trapezoid() {
    let mut path = Path::new();
    path.move_to(p(0.0, 0.0));
    path.line_to(p(10.0, 0.0));
    path.line_to(p(5.0, 10.0));
    path.close_path();

    let polygon = fill_path(&path, 0.5, Direction::Forward);
    let traps = sweep_polygon(&polygon, FillRule::NonZero);

    assert_eq!(traps.len(), 1);
    let t = &traps.as_slice()[0];
    assert_eq!(t.top, Fixed::from_f64(0.0));
    assert_eq!(t.bottom, Fixed::from_f64(10.0));
}

/// Scenario D — stroke of a horizontal line with butt caps: a
/// rectangle `[0,10] x [-1,1]` for width 2.
#[test]
fn stroking_a_horizontal_segment_with_butt_caps_yields_one_rectangle() {
    let mut path = Path::new();
    path.move_to(p(0.0, 0.0));
    path.line_to(p(10.0, 0.0));

    let style = StrokeStyle {
        line_width: 2.0,
        cap: LineCap::Butt,
        join: LineJoin::Miter,
        ..StrokeStyle::default()
    };
    let polygon = stroke_path(&path, &style, &Matrix::IDENTITY, 0.5);
    let traps = sweep_polygon(&polygon, FillRule::NonZero);

    assert_eq!(traps.len(), 1);
    assert!(traps.is_rectangular());
    let t = &traps.as_slice()[0];
    assert_eq!(t.top, Fixed::from_f64(-1.0));
    assert_eq!(t.bottom, Fixed::from_f64(1.0));
}

/// Scenario E — clip then fill: clipping to `rect(0,0,10,10)` and then
/// filling `rect(5,5,20,20)` leaves a single `[5,10] x [5,10]` tile,
/// and the clip's own region collapses to the same rectangle.
#[test]
fn clipping_then_filling_a_larger_rectangle_is_cut_down_to_the_clip() {
    let mut clip = Clip::new();
    clip.init_rect(IntRect { x: 0, y: 0, w: 10, h: 10 });

    let mut fill_rect = Path::new();
    fill_rect.move_to(p(5.0, 5.0));
    fill_rect.line_to(p(25.0, 5.0));
    fill_rect.line_to(p(25.0, 25.0));
    fill_rect.line_to(p(5.0, 25.0));
    fill_rect.close_path();

    let mut polygon = fill_path(&fill_rect, 0.5, Direction::Forward);
    let clip_extents = clip.get_region().unwrap().extents().to_fixed_box();
    polygon.set_limits(&[clip_extents]);
    let traps = sweep_polygon(&polygon, FillRule::NonZero);

    assert_eq!(traps.len(), 1);
    let t = &traps.as_slice()[0];
    assert_eq!(t.top, Fixed::from_f64(5.0));
    assert_eq!(t.bottom, Fixed::from_f64(10.0));

    let region = clip.get_region().unwrap();
    assert_eq!(region.extents(), IntRect { x: 0, y: 0, w: 10, h: 10 });
}

/// Scenario F — a tight acute join with miter limit 4 must degrade to
/// a bevel rather than spike out arbitrarily far.
#[test]
fn acute_join_past_the_miter_limit_falls_back_to_bevel() {
    let mut path = Path::new();
    path.move_to(p(0.0, 0.0));
    path.line_to(p(10.0, 1.0));
    path.line_to(p(0.0, 2.0));

    let style = StrokeStyle {
        line_width: 2.0,
        cap: LineCap::Butt,
        join: LineJoin::Miter,
        miter_limit: 4.0,
        ..StrokeStyle::default()
    };
    let polygon = stroke_path(&path, &style, &Matrix::IDENTITY, 0.5);
    // A runaway miter spike would push the polygon's extents far beyond
    // the path's own bounding box; a bevelled join keeps it close.
    let extents = polygon.extents().to_integer_rect();
    assert!(extents.w < 40);
    assert!(extents.h < 40);
}
