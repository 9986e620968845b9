#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![no_std]

//! Tessellation: turns paths into the trapezoids and polygons a
//! rasteriser consumes.
//!
//! The pipeline is cairo's, not a scanline-polygon-fill one: curves
//! flatten to tolerance-bounded polylines ([`flatten`]), a path's
//! segments (straight or flattened) become a [`polygon::Polygon`] of
//! directed edges ([`fill`], [`stroke`]), and a sweep ([`general_sweep`]
//! for arbitrary edges, [`rect_sweep`] as a cheaper specialisation for
//! already-rectilinear input) turns the edges into a
//! [`trapezoid::TrapezoidArray`].

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

#[cfg(feature = "std")]
pub mod debug;
pub mod fill;
pub mod flatten;
pub mod general_sweep;
pub mod pen;
pub mod polygon;
pub mod rect_sweep;
pub mod stroke;
pub mod trapezoid;

#[doc(inline)]
pub use crate::fill::fill_path;
#[doc(inline)]
pub use crate::flatten::{flatten_cubic, FlattenStatus};
#[doc(inline)]
pub use crate::general_sweep::sweep_polygon;
#[doc(inline)]
pub use crate::pen::Pen;
#[doc(inline)]
pub use crate::polygon::{FillRule, Polygon, WindingDir};
#[doc(inline)]
pub use crate::rect_sweep::{sweep_rectangles, InputRect};
#[doc(inline)]
pub use crate::stroke::{stroke_path, LineCap, LineJoin, StrokeStyle};
#[doc(inline)]
pub use crate::trapezoid::{Trapezoid, TrapezoidArray};

pub use vgcore_geom as geom;
pub use vgcore_path as path;
