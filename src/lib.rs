#![no_std]

//! The geometric core of a 2D vector graphics library: fixed-point
//! geometry, path storage, curve flattening, a stroker and filler,
//! sweep-line tessellation, and a clip stack, all in the style of
//! cairo's internal rasteriser pipeline.
//!
//! This meta-crate re-exports the four `vgcore-*` crates for
//! convenience.
//!
//! ```ignore
//! use vgcore::path::Path;
//! use vgcore::tessellate::fill_path;
//! ```
//!
//! # Crates
//!
//! * **vgcore-geom** — fixed-point points, lines, slopes, boxes and the
//!   one floating-point exception, the affine transform matrix.
//! * **vgcore-path** — the path store and its dynamic-buffer and
//!   freed-object-pool primitives.
//! * **vgcore-tessellate** — curve flattening, the stroke pen, the
//!   filler and stroker, and the rectangular and general sweep
//!   tessellators.
//! * **vgcore-clip** — the integer region type and the clip stack.
//!
//! # Pipeline
//!
//! ```text
//! Path -> Filler/Stroker -> Polygon -> Sweep -> Trapezoids -> Region (if integer-representable)
//!                                                           -> Alpha mask Surface (otherwise)
//! ```

pub extern crate vgcore_clip;
pub extern crate vgcore_geom;
pub extern crate vgcore_path;
pub extern crate vgcore_tessellate;

pub use vgcore_clip as clip;
pub use vgcore_geom as geom;
pub use vgcore_path as path;
pub use vgcore_tessellate as tessellate;
