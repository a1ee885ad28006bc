//! The public entry point: [`Solver`].

use std::fmt;

use crate::engine::Disjunction;
use crate::engine::SolverState;
use crate::literal::Literal;
use crate::provenance::Provenance;
use crate::term::Proposition;

/// An online, proof-producing decision procedure for quantifier-free linear
/// integer arithmetic.
///
/// `L` is the caller's own identifier for the assertions it makes —
/// typically a clause or constraint index — used only to report which
/// assertions participated in a contradiction (§1, §4.2). It defaults to
/// `u32`, which is enough for callers that just want a unsat core as a set
/// of indices.
///
/// ```
/// use presburger::Solver;
/// use presburger::Term;
/// use presburger::Proposition;
///
/// let mut solver: Solver<u32> = Solver::default();
/// let x = Term::var(presburger::Name::user(0));
///
/// // 2x - 4 = 0
/// let prop = Proposition::eq(x.clone() * 2, Term::constant(4));
/// solver.assert(0, prop).expect("no contradiction");
///
/// let model = solver.model().expect("quiescent after a clean assert");
/// assert_eq!(model, vec![(0, 2)]);
/// ```
#[derive(Clone, Debug)]
pub struct Solver<L: Literal = u32> {
    state: SolverState<L>,
    /// `true` iff the most recent call to [`Solver::assert`] returned
    /// `Ok(disjunctions)` with `disjunctions` empty — i.e. nothing remains
    /// deferred to an external case splitter. [`Solver::model`] refuses to
    /// answer otherwise (§4.6's precondition, §9's open question on this).
    quiescent: bool,
}

impl<L: Literal> Default for Solver<L> {
    fn default() -> Self {
        Solver {
            state: SolverState::default(),
            // An empty solver has trivially resolved every (nonexistent)
            // disjunction.
            quiescent: true,
        }
    }
}

impl<L: Literal> Solver<L> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Asserts `prop`, blaming `literal` (and transitively, anything already
    /// in the derivation that produced a term `prop` was rewritten against)
    /// for any contradiction it participates in.
    ///
    /// On success, returns the (possibly empty) list of shadow disjunctions
    /// deferred to the caller's case splitter (§4.5). A nonempty list means
    /// the assertion just made is not yet known to be consistent on its
    /// own — completeness requires the caller to explore at least one
    /// alternative of each returned [`Disjunction`] (by cloning this
    /// `Solver` and asserting the alternative's sub-goals) before trusting
    /// [`Solver::model`].
    ///
    /// On failure, returns the provenance — the set of `literal`s — that
    /// together are unsatisfiable. No state from this call is retained.
    pub fn assert(&mut self, literal: L, prop: Proposition) -> Result<Vec<Disjunction<L>>, Provenance<L>> {
        let result = self.state.assert(Provenance::singleton(literal), prop);
        self.quiescent = matches!(&result, Ok(disjunctions) if disjunctions.is_empty());
        result
    }

    /// Extracts a satisfying model, or `None` if the last [`Solver::assert`]
    /// either failed, hasn't been called, or left shadow disjunctions the
    /// caller hasn't resolved (§4.6, §9).
    pub fn model(&self) -> Option<Vec<(u32, i64)>> {
        self.quiescent.then(|| self.state.model())
    }
}

/// Pretty-prints the solver's current inert store (§6).
impl<L: Literal> fmt::Display for Solver<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::Name;
    use crate::term::Term;

    #[test]
    fn a_fresh_solver_is_quiescent_with_the_empty_model() {
        let solver: Solver<u32> = Solver::new();
        assert_eq!(solver.model(), Some(Vec::new()));
    }

    #[test]
    fn an_unresolved_disjunction_withholds_the_model() {
        let mut solver: Solver<u32> = Solver::new();
        // 2 < 3x and 4x < 20: a tight pair, defers a disjunction.
        let lower = Proposition::lt(Term::constant(2), Term::var(Name::user(0)) * 3);
        let upper = Proposition::lt(Term::var(Name::user(0)) * 4, Term::constant(20));
        solver.assert(1, lower).unwrap();
        let disjunctions = solver.assert(2, upper).unwrap();
        assert!(!disjunctions.is_empty());
        assert_eq!(solver.model(), None);
    }

    #[test]
    fn display_renders_the_inert_store() {
        let mut solver: Solver<u32> = Solver::new();
        solver
            .assert(0, Proposition::eq(Term::var(Name::user(0)) * 2, Term::constant(4)))
            .unwrap();
        assert!(solver.to_string().contains("x0 := 2"));
    }

    #[test]
    fn a_direct_contradiction_is_reported_with_its_provenance() {
        let mut solver: Solver<u32> = Solver::new();
        let x = Term::var(Name::user(0));
        solver
            .assert(1, Proposition::eq(x.clone(), Term::constant(0)))
            .unwrap();
        let err = solver
            .assert(2, Proposition::eq(x, Term::constant(1)))
            .unwrap_err();
        assert!(err.contains(&1));
        assert!(err.contains(&2));
    }
}
