//! Debug trapezoid dump: an opt-in diagnostic for inspecting what a
//! sweep actually emitted, gated behind an environment variable read
//! once per process.
//!
//! Grounded on the `DEBUG_TRAPS`/`getenv("CAIRO_DEBUG_TRAPS")` guard in
//! `cairo-bentley-ottmann-rectangular.c`: reading the variable on every
//! trapezoid would be wasteful, so the result is cached the first time
//! it's asked for.

use std::sync::OnceLock;

use crate::trapezoid::TrapezoidArray;

static DUMP_ENABLED: OnceLock<bool> = OnceLock::new();

/// True if `VGCORE_DEBUG_TRAPS` is set in the environment, cached after
/// the first call so later sweeps don't re-read it.
pub fn dump_enabled() -> bool {
    *DUMP_ENABLED.get_or_init(|| std::env::var_os("VGCORE_DEBUG_TRAPS").is_some())
}

/// Prints one line per trapezoid in `traps` to stderr, tagged with
/// `label` (typically the sweep function that produced them). A no-op
/// unless [`dump_enabled`] is true.
pub fn dump_trapezoids(label: &str, traps: &TrapezoidArray) {
    if !dump_enabled() {
        return;
    }
    for (i, t) in traps.as_slice().iter().enumerate() {
        std::eprintln!(
            "[{label}] trap {i}: top={:.6} bottom={:.6} left=({:.6},{:.6})-({:.6},{:.6}) right=({:.6},{:.6})-({:.6},{:.6})",
            t.top.to_f64(),
            t.bottom.to_f64(),
            t.left.p1.x.to_f64(),
            t.left.p1.y.to_f64(),
            t.left.p2.x.to_f64(),
            t.left.p2.y.to_f64(),
            t.right.p1.x.to_f64(),
            t.right.p1.y.to_f64(),
            t.right.p2.x.to_f64(),
            t.right.p2.y.to_f64(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dump_enabled_is_stable_across_repeated_calls() {
        assert_eq!(dump_enabled(), dump_enabled());
    }

    #[test]
    fn dumping_an_empty_array_never_panics() {
        dump_trapezoids("test", &TrapezoidArray::new());
    }
}
