//! The error kinds shared by every `vgcore-*` crate.
//!
//! All public entry points in the workspace return [`CoreError`] (or a
//! `Result` wrapping it). Errors are "sticky" at the object level via
//! [`Sticky`]: once an object has failed, further operations on it are
//! no-ops that repeat the stored error instead of re-deriving it.

/// An error produced by the geometric core.
///
/// `Degenerate` is intentionally not part of this enum: per the error
/// propagation policy, degenerate geometric input is handled locally by
/// treating the operation as a no-op and is never surfaced to a caller.
#[non_exhaustive]
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum CoreError {
    /// An allocation failed while growing a buffer or pool.
    #[error("allocation failure")]
    NoMemory,
    /// A transform needed to be inverted but its determinant is zero.
    #[error("matrix is not invertible")]
    InvalidMatrix,
    /// An operation that requires a current point was issued on a path
    /// that does not have one.
    #[error("path operation requires a current point")]
    InvalidPathData,
    /// The clip stack cannot be represented in the form the caller asked
    /// for (typically an integer rectangle list).
    #[error("clip region is not representable in the requested form")]
    ClipNotRepresentable,
    /// The collaborating surface cannot perform the requested operation.
    #[error("operation is not supported by the target surface")]
    Unsupported,
}

pub type CoreResult<T> = Result<T, CoreError>;

/// Wraps a value with a sticky error slot.
///
/// Once [`Sticky::fail`] is called, [`Sticky::try_with`] short-circuits on
/// every later call and returns the stored error, without running the
/// supplied closure. This mirrors the "every subsequent operation is a
/// no-op returning the same error" convenience error handling policy.
#[derive(Clone, Debug, Default)]
pub struct Sticky<T> {
    value: T,
    error: Option<CoreError>,
}

impl<T> Sticky<T> {
    pub fn new(value: T) -> Self {
        Sticky { value, error: None }
    }

    pub fn error(&self) -> Option<CoreError> {
        self.error
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn fail(&mut self, err: CoreError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }

    /// Run `f` against the inner value unless this object is already
    /// poisoned, in which case the stored error is returned unchanged.
    pub fn try_with<R>(&mut self, f: impl FnOnce(&mut T) -> CoreResult<R>) -> CoreResult<R> {
        if let Some(err) = self.error {
            return Err(err);
        }
        match f(&mut self.value) {
            Ok(r) => Ok(r),
            Err(err) => {
                self.error = Some(err);
                Err(err)
            }
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn get_mut(&mut self) -> &mut T {
        &mut self.value
    }
}
