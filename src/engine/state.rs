use std::collections::VecDeque;
use std::fmt;

use log::trace;

use crate::engine::inerts::InertStore;
use crate::engine::shadow::Disjunction;
use crate::provenance::Provenance;
use crate::term::Name;
use crate::term::Proposition;

/// The solver state: the inert store, a monotone fresh-name counter for
/// system names, and (transiently, during a single [`SolverState::assert`]
/// call) the deferred shadow disjunctions produced so far (§3, "Solver
/// state").
///
/// `emptyPropSet` is [`SolverState::default`]. State is purely additive:
/// there is no operation to retract an individual assertion. A caller
/// exploring a disjunction's alternatives is expected to `clone` the state
/// before trying one (§5, "Resource discipline").
#[derive(Clone, Debug)]
pub struct SolverState<L: crate::literal::Literal> {
    pub(crate) inerts: InertStore<L>,
    next_system_name: u32,
}

impl<L: crate::literal::Literal> Default for SolverState<L> {
    fn default() -> Self {
        SolverState {
            inerts: InertStore::default(),
            next_system_name: 0,
        }
    }
}

/// The work-queue item processed by [`SolverState::assert`]: either the
/// original user assertion or a kicked-out / real-shadow inequality
/// discovered along the way.
type WorkItem<L> = (Provenance<L>, Proposition);

impl<L: crate::literal::Literal> SolverState<L> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a fresh system [`Name`], used by the equality solver's
    /// modulus trick (§4.4). The counter is monotone and never retired (§3,
    /// "Lifecycles").
    pub(crate) fn fresh_system_name(&mut self) -> Name {
        let name = Name::System(self.next_system_name);
        self.next_system_name += 1;
        name
    }

    /// `assertProp`: asserts `prop` (blamed on `prov` if it contributes to a
    /// contradiction) against the current state.
    ///
    /// Returns `Ok(disjunctions)` — the (possibly empty) list of deferred
    /// dark/gray shadow disjunctions generated along the way — on success,
    /// or `Err(prov)` with the union of the user literals that participated
    /// in the contradicting derivation on failure. On `Err`, no state
    /// mutation from this call is visible: the whole `assert` call is
    /// processed against a clone of the prior state's inerts, which is
    /// swapped in only once the work queue drains without contradiction
    /// (§7, "no partial success").
    pub fn assert(&mut self, prov: Provenance<L>, prop: Proposition) -> Result<Vec<Disjunction<L>>, Provenance<L>> {
        let mut trial = self.clone();

        let mut queue: VecDeque<WorkItem<L>> = VecDeque::new();
        queue.push_back((prov, prop));
        let mut deferred = Vec::new();

        while let Some((prov, prop)) = queue.pop_front() {
            let (prov, t) = trial.inerts.apply_subst(&prov, prop.term());
            trace!("processing {} (after substitution)", prop.with_term(t.clone()));
            match prop {
                Proposition::Eq0(_) => {
                    trial.solve_eq0(prov, t, &mut queue)?;
                }
                Proposition::Lt0(_) => {
                    trial.solve_lt0(prov, t, &mut queue, &mut deferred)?;
                }
            }
        }

        *self = trial;
        Ok(deferred)
    }

    /// Extracts a satisfying integer model (§4.6).
    ///
    /// This is the raw extraction and has no opinion on whether deferred
    /// disjunctions remain outstanding — per §4.6's precondition, the result
    /// is meaningless unless the caller has driven every disjunction
    /// returned by `assert` down to an empty list. [`crate::Solver`], the
    /// public facade, tracks that for the common case and refuses the call
    /// (returning `None`) instead — see §9's "Open question — model when
    /// deferred disjunctions remain".
    pub fn model(&self) -> Vec<(u32, i64)> {
        crate::engine::model::extract(&self.inerts)
    }
}

/// Pretty-prints the current inert store (§6). System names allocated by
/// the modulus trick are shown alongside user names, unlike
/// [`SolverState::model`] which suppresses them — this is a debugging view
/// of internal state, not the exported model.
impl<L: crate::literal::Literal> fmt::Display for SolverState<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inerts)
    }
}
