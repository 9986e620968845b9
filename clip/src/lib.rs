#![deny(bare_trait_objects)]
#![allow(clippy::float_cmp)]
#![no_std]

//! The clip stack (C12 region + C13 clip engine): each drawing
//! context's clip is a stack of clip paths, most-recently-pushed on
//! top, that can be intersected down to nothing (`all_clipped`),
//! queried as an integer [`Region`] when it happens to be losslessly
//! representable that way, or rendered to an alpha mask on a
//! [`Surface`] otherwise.

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod clip;
pub mod region;
pub mod surface;

#[doc(inline)]
pub use crate::clip::{Antialias, Clip};
#[doc(inline)]
pub use crate::region::Region;
#[doc(inline)]
pub use crate::surface::{Color, Operator, Surface};

pub use vgcore_geom as geom;
pub use vgcore_path as path;
pub use vgcore_tessellate as tessellate;
