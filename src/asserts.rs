//! Debug-assertion macros, gated behind the `debug-checks` feature.
//!
//! The solver's correctness rests on invariants I1–I5 (see
//! [`crate::engine::inerts`]) which are comparatively expensive to check on
//! every mutation. Checking them unconditionally would make debug builds of
//! client code using this crate unusably slow; checking them never would
//! leave invariant violations to surface as a confusing panic far from their
//! cause. The three severities below let call sites pick the right balance.

/// Checks that are cheap enough to run unconditionally in any debug build.
#[macro_export]
macro_rules! presburger_assert_simple {
    ($($arg:tt)*) => {
        assert!($($arg)*)
    };
}

/// Checks with a noticeable cost (e.g. walking a whole bound list); enabled
/// only when the `debug-checks` feature is active.
#[macro_export]
macro_rules! presburger_assert_moderate {
    ($($arg:tt)*) => {
        if cfg!(feature = "debug-checks") {
            assert!($($arg)*)
        }
    };
}

/// Checks expensive enough that they would change the asymptotic complexity
/// of the operation they guard (e.g. re-deriving an entire inert store from
/// scratch); enabled only with `debug-checks`.
#[macro_export]
macro_rules! presburger_assert_extreme {
    ($($arg:tt)*) => {
        if cfg!(feature = "debug-checks") {
            assert!($($arg)*)
        }
    };
}
