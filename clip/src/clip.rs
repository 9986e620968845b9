//! The clip engine (C13): a stack of clip paths, most-recently-pushed
//! on top, with the `all_clipped` sentinel short-circuiting everything
//! once the intersection is known to be empty.
//!
//! Grounded on `_cairo_clip_init_rectangle`/`_cairo_clip_intersect_path`
//! in `cairo-clip.c`: pushing onto the stack allocates a
//! [`FreedPool`]-backed node whose `prev` link chains to the rest of
//! the stack, so popping (here: dropping a `Clip`) recycles nodes
//! instead of freeing and reallocating them.

use crate::region::Region;
use crate::surface::{Color, Operator, Surface};
use alloc::boxed::Box;
use vgcore_geom::error::Sticky;
use vgcore_geom::{CoreError, CoreResult, FixedBox, IntRect, Matrix};
use vgcore_path::{FreedPool, Path};
use vgcore_tessellate::fill::fill_path;
use vgcore_tessellate::general_sweep::sweep_polygon;
use vgcore_tessellate::polygon::FillRule;
use vgcore_tessellate::trapezoid::TrapezoidArray;

const NODE_POOL_SIZE: usize = 4;

static CLIP_PATH_POOL: FreedPool<ClipPathNode, NODE_POOL_SIZE> = FreedPool::new();

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Antialias {
    Default,
    None,
    Gray,
    Subpixel,
}

/// One entry in the clip stack: a path plus the fill parameters it was
/// clipped with, its approximate extents, and whatever has been cached
/// about it so far.
struct ClipPathNode {
    path: Path,
    fill_rule: FillRule,
    tolerance: f64,
    antialias: Antialias,
    extents: FixedBox,
    prev: Option<Box<ClipPathNode>>,
    /// Sticky so a `ClipNotRepresentable` failure (a non-rectilinear or
    /// non-integer path) stays poisoned across repeated `get_region`
    /// calls instead of re-running the rectilinear sweep every time.
    cached_region: Sticky<Option<Region>>,
}

impl ClipPathNode {
    /// Implements the two ways a new clip path cannot refine the stack
    /// any further: identical under the same fill parameters, or (when
    /// the path is rectilinear, where tolerance and antialiasing cannot
    /// change the result) differing only in tolerance/antialias.
    fn structurally_equal(
        &self,
        path: &Path,
        fill_rule: FillRule,
        tolerance: f64,
        antialias: Antialias,
    ) -> bool {
        if self.fill_rule != fill_rule {
            return false;
        }
        if !Path::equal(&self.path, path) {
            return false;
        }
        if self.tolerance == tolerance && self.antialias == antialias {
            return true;
        }
        path.is_rectilinear() && self.path.is_rectilinear()
    }

    fn region(&mut self) -> CoreResult<Region> {
        let path = &self.path;
        let fill_rule = self.fill_rule;
        let tolerance = self.tolerance;
        self.cached_region.try_with(|slot| {
            if slot.is_none() {
                *slot = Some(compute_region(path, fill_rule, tolerance)?);
            }
            Ok(slot.clone().unwrap())
        })
    }
}

fn compute_region(path: &Path, fill_rule: FillRule, tolerance: f64) -> CoreResult<Region> {
    let polygon = fill_path(path, tolerance, vgcore_path::Direction::Forward);
    if polygon.extents().is_empty() {
        return Ok(Region::empty());
    }
    if !path.is_rectilinear() {
        return Err(CoreError::ClipNotRepresentable);
    }
    let traps = sweep_polygon(&polygon, fill_rule);
    if !traps.is_rectangular() {
        return Err(CoreError::ClipNotRepresentable);
    }
    let rects: alloc::vec::Vec<IntRect> = traps
        .as_slice()
        .iter()
        .map(|t| {
            let top = t.top.floor();
            let bottom = t.bottom.ceil();
            let left = t.left.p1.x.min(t.left.p2.x).floor();
            let right = t.right.p1.x.max(t.right.p2.x).ceil();
            IntRect {
                x: left,
                y: top,
                w: right - left,
                h: bottom - top,
            }
        })
        .collect();
    Ok(Region::from_rects(rects))
}

/// Allocates (or recycles from the freed-node pool) a clip path node.
fn alloc_node(
    path: Path,
    fill_rule: FillRule,
    tolerance: f64,
    antialias: Antialias,
    extents: FixedBox,
    prev: Option<Box<ClipPathNode>>,
) -> Box<ClipPathNode> {
    let mut node = CLIP_PATH_POOL.get().unwrap_or_else(|| {
        Box::new(ClipPathNode {
            path: Path::new(),
            fill_rule: FillRule::NonZero,
            tolerance: 1.0,
            antialias: Antialias::Default,
            extents: FixedBox::EMPTY,
            prev: None,
            cached_region: Sticky::new(None),
        })
    });
    node.path = path;
    node.fill_rule = fill_rule;
    node.tolerance = tolerance;
    node.antialias = antialias;
    node.extents = extents;
    node.prev = prev;
    node.cached_region = Sticky::new(None);
    node
}

/// A clip stack. `UNCLIPPED` is `Clip::new()` with an empty stack;
/// pushing a clip path moves it to `CLIPPED`; any clip that reduces the
/// visible area to nothing moves it to `ALL_CLIPPED`, which is terminal
/// until the `Clip` is replaced outright.
pub struct Clip {
    all_clipped: bool,
    top: Option<Box<ClipPathNode>>,
    cached_surface_extents: Option<IntRect>,
}

impl Default for Clip {
    fn default() -> Self {
        Clip::new()
    }
}

impl Clip {
    pub fn new() -> Self {
        Clip {
            all_clipped: false,
            top: None,
            cached_surface_extents: None,
        }
    }

    pub fn is_all_clipped(&self) -> bool {
        self.all_clipped
    }

    pub fn is_unclipped(&self) -> bool {
        !self.all_clipped && self.top.is_none()
    }

    fn set_all_clipped(&mut self) {
        self.all_clipped = true;
        self.top = None;
        self.drop_cache();
    }

    fn extents(&self) -> Option<FixedBox> {
        self.top.as_ref().map(|n| n.extents)
    }

    /// Pushes an axis-aligned rectangle as the initial clip, matching
    /// `_cairo_clip_init_rectangle`: an empty rectangle clips
    /// everything immediately, without allocating a path node.
    pub fn init_rect(&mut self, r: IntRect) {
        *self = Clip::new();
        if r.is_empty() {
            self.set_all_clipped();
            return;
        }
        let fixed = r.to_fixed_box();
        let mut path = Path::new();
        path.move_to(fixed.p1);
        path.line_to(vgcore_geom::Point::new(fixed.p2.x, fixed.p1.y));
        path.line_to(fixed.p2);
        path.line_to(vgcore_geom::Point::new(fixed.p1.x, fixed.p2.y));
        path.close_path();
        self.top = Some(alloc_node(path, FillRule::NonZero, 1.0, Antialias::None, fixed, None));
    }

    /// Intersects the current clip with `path`. No-op if already
    /// `all_clipped`; sets `all_clipped` if the result is provably
    /// empty; skips pushing a new node when it cannot refine the
    /// current clip.
    pub fn clip(&mut self, path: &Path, fill_rule: FillRule, tolerance: f64, antialias: Antialias) {
        if self.all_clipped {
            return;
        }
        if path.fill_is_empty() {
            self.set_all_clipped();
            return;
        }

        if let Some(top) = &self.top {
            if top.structurally_equal(path, fill_rule, tolerance, antialias) {
                return;
            }
        }

        let new_extents_int = path.approximate_clip_extents();
        let mut new_extents = new_extents_int.to_fixed_box();
        if let Some(prev_extents) = self.extents() {
            new_extents = new_extents.intersect(prev_extents);
            if new_extents.is_empty() {
                self.set_all_clipped();
                return;
            }
            // If the new path is an axis-aligned box that already
            // contains everything the stack currently allows, it
            // cannot refine the clip further.
            if let Some(box_extents) = path.is_box() {
                if box_extents.contains_box(prev_extents) {
                    return;
                }
            }
        }

        self.drop_cache();
        let prev = self.top.take();
        self.top = Some(alloc_node(path.clone(), fill_rule, tolerance, antialias, new_extents, prev));
    }

    /// Replays `other`'s stack, bottom to top, onto `self`.
    pub fn apply_clip(&mut self, other: &Clip) {
        if other.all_clipped {
            self.set_all_clipped();
            return;
        }
        let mut chain = alloc::vec::Vec::new();
        let mut cur = other.top.as_deref();
        while let Some(node) = cur {
            chain.push(node);
            cur = node.prev.as_deref();
        }
        for node in chain.into_iter().rev() {
            self.clip(&node.path, node.fill_rule, node.tolerance, node.antialias);
        }
    }

    /// Deep-clones `other` and re-bases it under `m`. An identity
    /// transform is a pure clone (the cached regions stay valid); an
    /// integer translation keeps the caches but shifts their extents;
    /// anything else discards the caches and re-derives extents from
    /// the transformed path, since a general transform can turn a
    /// rectilinear clip into a non-rectilinear one.
    pub fn init_copy_transformed(other: &Clip, m: &Matrix) -> Clip {
        let mut clip = Clip::new();
        clip.all_clipped = other.all_clipped;
        if other.all_clipped {
            return clip;
        }

        let mut nodes: alloc::vec::Vec<(Path, FillRule, f64, Antialias, FixedBox)> = alloc::vec::Vec::new();
        let mut cur = other.top.as_deref();
        while let Some(node) = cur {
            nodes.push((node.path.clone(), node.fill_rule, node.tolerance, node.antialias, node.extents));
            cur = node.prev.as_deref();
        }

        let mut prev = None;
        for (mut path, fill_rule, tolerance, antialias, mut extents) in nodes.into_iter().rev() {
            if m.is_identity() {
                // fallthrough: extents and path stay as-is.
            } else if m.is_integer_translation() {
                path.translate(
                    vgcore_geom::Fixed::from_f64(m.x0),
                    vgcore_geom::Fixed::from_f64(m.y0),
                );
                extents = path.approximate_clip_extents().to_fixed_box();
            } else {
                path.transform(m);
                extents = path.approximate_clip_extents().to_fixed_box();
            }
            prev = Some(alloc_node(path, fill_rule, tolerance, antialias, extents, prev));
        }
        clip.top = prev;
        clip
    }

    /// Intersects every clip path's region, if every one of them is
    /// losslessly representable as an integer region (rectilinear,
    /// integer coordinates, and a fill rule that keeps it that way).
    pub fn get_region(&mut self) -> CoreResult<Region> {
        if self.all_clipped {
            return Ok(Region::empty());
        }
        let mut result: Option<Region> = None;
        let mut cur = self.top.as_deref_mut();
        while let Some(node) = cur {
            let region = node.region()?;
            result = Some(match result {
                Some(acc) => acc.intersect(&region),
                None => region,
            });
            cur = node.prev.as_deref_mut();
        }
        Ok(result.unwrap_or_else(Region::empty))
    }

    /// Renders (and caches, via the returned value being reusable by
    /// the caller) an alpha mask covering the clip stack's extents: a
    /// white rectangle clipped successively through every clip path
    /// with `Operator::In`.
    pub fn get_surface(&mut self, target: &mut dyn Surface) -> CoreResult<()> {
        if self.all_clipped {
            return target.fill_boxes(Operator::Source, Color::TRANSPARENT, &[target.get_extents()]);
        }
        if let Ok(region) = self.get_region() {
            return target.fill_boxes(Operator::Source, Color::WHITE, region.rects());
        }

        target.fill_boxes(Operator::Source, Color::WHITE, &[target.get_extents()])?;
        let mut cur = self.top.as_deref();
        while let Some(node) = cur {
            let polygon = fill_path(&node.path, node.tolerance, vgcore_path::Direction::Forward);
            let traps: TrapezoidArray = sweep_polygon(&polygon, node.fill_rule);
            target.fill_trapezoids(Operator::In, &traps)?;
            cur = node.prev.as_deref();
        }
        self.cached_surface_extents = Some(target.get_extents());
        Ok(())
    }

    /// Clears every cached region/surface derivation. Called whenever a
    /// mutation invalidates them (any successful `clip()`/`init_rect()`
    /// call already does this).
    pub fn drop_cache(&mut self) {
        self.cached_surface_extents = None;
        let mut cur = self.top.as_deref_mut();
        while let Some(node) = cur {
            node.cached_region = Sticky::new(None);
            cur = node.prev.as_deref_mut();
        }
    }

    /// Drains the freed-node pool, releasing every recycled node it
    /// holds back to the allocator.
    pub fn reset_static_data() {
        CLIP_PATH_POOL.reset();
    }
}

impl Drop for ClipPathNode {
    fn drop(&mut self) {
        // Unlink the rest of the chain and recycle each node into the
        // pool one at a time, severing each node's own `prev` before
        // handing it to the pool. Without that, dropping the returned
        // `Box` (once the pool is full) would recurse into this same
        // `Drop` impl for the whole remaining chain; severing it first
        // keeps release of an arbitrarily deep stack iterative.
        let mut next = self.prev.take();
        while let Some(mut node) = next {
            next = node.prev.take();
            CLIP_PATH_POOL.put(node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vgcore_geom::Point;

    fn rect_path(x0: f64, y0: f64, x1: f64, y1: f64) -> Path {
        let mut p = Path::new();
        p.move_to(Point::from_f64(x0, y0));
        p.line_to(Point::from_f64(x1, y0));
        p.line_to(Point::from_f64(x1, y1));
        p.line_to(Point::from_f64(x0, y1));
        p.close_path();
        p
    }

    #[test]
    fn an_empty_init_rect_goes_straight_to_all_clipped() {
        let mut clip = Clip::new();
        clip.init_rect(IntRect::EMPTY);
        assert!(clip.is_all_clipped());
    }

    #[test]
    fn clipping_to_a_disjoint_rectangle_sets_all_clipped() {
        let mut clip = Clip::new();
        clip.init_rect(IntRect { x: 0, y: 0, w: 10, h: 10 });
        let other = rect_path(20.0, 20.0, 30.0, 30.0);
        clip.clip(&other, FillRule::NonZero, 1.0, Antialias::None);
        assert!(clip.is_all_clipped());
    }

    #[test]
    fn clipping_to_a_containing_box_does_not_push_a_new_node() {
        let mut clip = Clip::new();
        clip.init_rect(IntRect { x: 0, y: 0, w: 10, h: 10 });
        let bigger = rect_path(-5.0, -5.0, 20.0, 20.0);
        clip.clip(&bigger, FillRule::NonZero, 1.0, Antialias::None);
        assert!(!clip.is_all_clipped());
        let region = clip.get_region().unwrap();
        assert_eq!(region.extents(), IntRect { x: 0, y: 0, w: 10, h: 10 });
    }

    #[test]
    fn intersecting_two_overlapping_rectangles_yields_their_overlap_region() {
        let mut clip = Clip::new();
        clip.init_rect(IntRect { x: 0, y: 0, w: 10, h: 10 });
        let other = rect_path(5.0, 5.0, 15.0, 15.0);
        clip.clip(&other, FillRule::NonZero, 1.0, Antialias::None);
        let region = clip.get_region().unwrap();
        assert_eq!(region.extents(), IntRect { x: 5, y: 5, w: 5, h: 5 });
    }
}
