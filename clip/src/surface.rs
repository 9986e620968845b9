//! The narrow surface vtable (§6.3) the clip engine renders through
//! when it needs to materialise an alpha mask. Grounded on the
//! `cairo_surface_t` function-pointer table, narrowed to the handful
//! of entries the clip engine actually calls; every other capability a
//! real surface has is out of scope here.

use vgcore_geom::{CoreError, CoreResult, IntRect};
use vgcore_tessellate::trapezoid::TrapezoidArray;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Operator {
    Over,
    In,
    Source,
    Clear,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };
}

/// A drawable the clip engine can paint trapezoids and boxes onto. All
/// methods but `get_extents` default to `Unsupported`; a backend opts
/// into only the operations it implements.
pub trait Surface {
    fn fill_trapezoids(&mut self, _op: Operator, _traps: &TrapezoidArray) -> CoreResult<()> {
        Err(CoreError::Unsupported)
    }

    fn fill_boxes(&mut self, _op: Operator, _color: Color, _boxes: &[IntRect]) -> CoreResult<()> {
        Err(CoreError::Unsupported)
    }

    fn create_similar_solid(&self, _w: i32, _h: i32, _color: Color) -> CoreResult<alloc::boxed::Box<dyn Surface>> {
        Err(CoreError::Unsupported)
    }

    fn get_extents(&self) -> IntRect;
}
