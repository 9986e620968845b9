#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![no_std]

//! The path store (C3) and its supporting dynamic-buffer primitives (C2).
//!
//! To build a path, see [`builder::PathBuilder`]; to consume one, see
//! [`Path::iter`] or [`Path::interpret`].
//!
//! This crate is reexported in `vgcore`.

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod builder;
pub mod commands;
pub mod freedpool;
pub mod growvec;
pub mod path;

#[doc(inline)]
pub use crate::builder::PathBuilder;
#[doc(inline)]
pub use crate::commands::{PathCommands, PathEvent, Verb};
#[doc(inline)]
pub use crate::freedpool::FreedPool;
#[doc(inline)]
pub use crate::growvec::GrowVec;
#[doc(inline)]
pub use crate::path::{Direction, Path, PathSink};

pub use vgcore_geom as geom;
