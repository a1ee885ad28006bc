//! Shadow generation for the inequality solver (§4.5).

use crate::provenance::Provenance;
use crate::term::Proposition;

/// One alternative of a [`Disjunction`]: a conjunction of sub-goals that
/// would complete the proof if asserted.
pub type SubGoal<L> = Vec<(Provenance<L>, Proposition)>;

/// A deferred shadow disjunction: at least one of `alternatives` must be
/// assertable (sequentially, as a conjunction) for the branch that produced
/// it to be satisfiable (§4.5, "Shadow deferral and branching").
///
/// The solver never explores this itself; [`SolverState::assert`][crate::engine::SolverState::assert]
/// simply returns the list to the caller, who is expected to clone the
/// solver state and try each alternative in turn (an external DPLL-style
/// case splitter, explicitly out of scope of this crate — §1).
#[derive(Clone, Debug)]
pub struct Disjunction<L: crate::literal::Literal> {
    /// The union of the two generating bounds' provenances (the "driving
    /// proposition" is always one of the two, so its provenance is already
    /// included).
    pub provenance: Provenance<L>,
    /// The dark shadow, followed by each gray shadow case `i = 1..b-1`, in
    /// that order.
    pub alternatives: Vec<SubGoal<L>>,
}
