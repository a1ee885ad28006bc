use thiserror::Error;

/// Internal-only errors: the "should be impossible if invariants hold"
/// branches called out in §7. These are programming errors in this crate,
/// not a solver outcome a caller should ever observe — every public entry
/// point converts one of these into a `panic!` at the single call site that
/// cannot meaningfully continue, rather than threading it through the
/// public `Result` alongside genuine contradictions.
#[derive(Debug, Error)]
pub(crate) enum InternalError {
    #[error(
        "solveIs0 reached its unreachable branch: term {term} had no constant form, no factor, \
         no unit coefficient, and no variable at all"
    )]
    EqualitySolverExhausted { term: String },

    #[error(
        "solveIsNeg reached its unreachable branch: term {term} had no constant form, no \
         factor, and no variable to eliminate"
    )]
    InequalitySolverExhausted { term: String },
}
