#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::many_single_char_names)]
#![no_std]

//! Fixed-point 2D geometry primitives for the tessellation pipeline.
//!
//! This crate is reexported in `vgcore`.
//!
//! # Overview
//!
//! Everything downstream of the path builder works in [`Fixed`] 16.16
//! device-space coordinates rather than floats: flattening, stroking and
//! the sweep-line tessellators all need an exact total order and exact
//! cross products to make correct topological decisions, and floats
//! don't give you that. `Matrix` is the one place floats remain, since a
//! transform is composed and inverted long before its result is ever
//! snapped into fixed point.
//!
//! # Flattening
//!
//! Flattening is the action of approximating a curve with a succession of
//! line segments. The tolerance threshold taken as input by the
//! flattening algorithm corresponds to the maximum distance between the
//! curve and its linear approximation: the smaller the tolerance, the
//! more segments are generated.

#[cfg(any(test, feature = "std"))]
extern crate std;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod boxes;
pub mod error;
pub mod fixed;
pub mod line;
pub mod matrix;
pub mod point;
pub mod slope;

#[doc(inline)]
pub use crate::boxes::{FixedBox, IntRect};
#[doc(inline)]
pub use crate::error::{CoreError, CoreResult, Sticky};
#[doc(inline)]
pub use crate::fixed::Fixed;
#[doc(inline)]
pub use crate::line::Line;
#[doc(inline)]
pub use crate::matrix::Matrix;
#[doc(inline)]
pub use crate::point::Point;
#[doc(inline)]
pub use crate::slope::Slope;
