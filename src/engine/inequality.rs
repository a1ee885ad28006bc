//! The inequality solver (§4.5): `solveIsNeg`, real/dark/gray shadow
//! generation (Omega test, online per Berezin–Ganesh–Dill).

use std::collections::VecDeque;

use log::trace;

use crate::engine::error::InternalError;
use crate::engine::inerts::Bound;
use crate::engine::shadow::Disjunction;
use crate::engine::shadow::SubGoal;
use crate::engine::state::SolverState;
use crate::literal::Literal;
use crate::provenance::Provenance;
use crate::term::Name;
use crate::term::Proposition;
use crate::term::Term;

type WorkItem<L> = (Provenance<L>, Proposition);

impl<L: Literal> SolverState<L> {
    /// Precondition: `t` has already been rewritten by the current
    /// substitution.
    ///
    /// Installs `t < 0` as a bound in the inert store, eagerly queueing the
    /// real shadow of every opposing bound it combines with, and recording a
    /// dark/gray shadow [`Disjunction`] in `deferred` for every combination
    /// where the real shadow alone doesn't decide integer satisfiability.
    pub(crate) fn solve_lt0(
        &mut self,
        prov: Provenance<L>,
        mut t: Term,
        queue: &mut VecDeque<WorkItem<L>>,
        deferred: &mut Vec<Disjunction<L>>,
    ) -> Result<(), Provenance<L>> {
        loop {
            // Case 1: constant.
            if let Some(k) = t.as_const() {
                return if k < 0 { Ok(()) } else { Err(prov) };
            }

            // Case 2: common factor d > 1. Dividing a strict `< 0` by a
            // positive divisor preserves the sign, so `d * t' < 0 <=> t' <
            // 0`.
            if let Some((_, reduced)) = t.factor() {
                t = reduced;
                continue;
            }

            // Case 3: eliminate the least variable (by Name) in t. This,
            // and not any coefficient-based tie-break, is what keeps I1
            // (every bound on x mentions only variables strictly greater
            // than x) true: x is by construction the smallest name in t, so
            // everything left in `rest` is greater than it.
            let Some(x) = t.least_variable() else {
                return Err(Self::unreachable_lt0(&t));
            };
            let (a, rest) = t.split_variable(x);

            if a > 0 {
                // a*x + rest < 0  <=>  a*x < -rest : an upper bound.
                let term = -rest;
                self.install_upper(prov, x, a, term, queue, deferred);
            } else {
                // a*x + rest < 0, a < 0  <=>  rest < (-a)*x : a lower bound.
                self.install_lower(prov, x, -a, rest, queue, deferred);
            }
            return Ok(());
        }
    }

    fn install_upper(
        &mut self,
        prov: Provenance<L>,
        x: Name,
        scale_u: i64,
        term_u: Term,
        queue: &mut VecDeque<WorkItem<L>>,
        deferred: &mut Vec<Disjunction<L>>,
    ) {
        for lower in self.inerts.lowers(x).to_vec() {
            self.emit_shadows(&prov, x, &lower, scale_u, &term_u, queue, deferred);
        }
        trace!("installing upper bound {scale_u}*{x} < {term_u}");
        self.inerts.push_upper(
            x,
            Bound {
                prov,
                scale: scale_u,
                term: term_u,
            },
        );
    }

    fn install_lower(
        &mut self,
        prov: Provenance<L>,
        x: Name,
        scale_l: i64,
        term_l: Term,
        queue: &mut VecDeque<WorkItem<L>>,
        deferred: &mut Vec<Disjunction<L>>,
    ) {
        let lower = Bound {
            prov: prov.clone(),
            scale: scale_l,
            term: term_l.clone(),
        };
        for upper in self.inerts.uppers(x).to_vec() {
            self.emit_shadows(&upper.prov, x, &lower, upper.scale, &upper.term, queue, deferred);
        }
        trace!("installing lower bound {term_l} < {scale_l}*{x}");
        self.inerts.push_lower(x, Bound {
            prov,
            scale: scale_l,
            term: term_l,
        });
    }

    /// Combines one lower bound `term_l < scale_l * x` with one upper bound
    /// `scale_u * x < term_u` on the same variable `x`:
    ///
    /// - The real shadow `scale_u*term_l − scale_l*term_u < 0` is exact and
    ///   necessary whenever `x` is eliminated over the rationals; it is
    ///   always sound, so it is pushed onto the work queue unconditionally.
    /// - The dark shadow `scale_u*term_l − scale_l*term_u + scale_u*scale_l
    ///   < 0` is always sufficient for integer satisfiability of the pair.
    ///   If `min(scale_l, scale_u) == 1` there are no gray residues to
    ///   enumerate (`1..min(scale_l, scale_u)` is empty), so the dark
    ///   shadow is not merely sufficient there but necessary-and-sufficient
    ///   on its own; it is solved immediately rather than deferred, since a
    ///   one-branch disjunction would demand the same outcome at the cost
    ///   of making the external case splitter explore it. (The real shadow
    ///   alone is *not* sufficient in this case — §4.5 never treats it as
    ///   such, only the dark shadow closes the gap.)
    /// - Otherwise the dark shadow may still fail for a rational `x` with no
    ///   integer witness; the remaining possibilities are exactly the
    ///   `min(scale_l, scale_u) − 1` "gray" residues next to the tighter
    ///   bound. Dark shadow plus grays together are deferred as one
    ///   [`Disjunction`] for the external case splitter (§1, §4.5).
    fn emit_shadows(
        &self,
        bound_prov: &Provenance<L>,
        x: Name,
        lower: &Bound<L>,
        scale_u: i64,
        term_u: &Term,
        queue: &mut VecDeque<WorkItem<L>>,
        deferred: &mut Vec<Disjunction<L>>,
    ) {
        let scale_l = lower.scale;
        let term_l = &lower.term;
        let combined = bound_prov.union(&lower.prov);

        let real_term = term_l.clone().scale(scale_u) - term_u.clone().scale(scale_l);
        trace!("real shadow on {x}: {real_term} < 0");
        queue.push_back((combined.clone(), Proposition::lt0(real_term.clone())));

        let dark_term = real_term + Term::constant(scale_l * scale_u);

        if scale_l == 1 || scale_u == 1 {
            trace!("dark shadow on {x} is exact (unit scale): {dark_term} < 0");
            queue.push_back((combined, Proposition::lt0(dark_term)));
            return;
        }

        let mut alternatives: Vec<SubGoal<L>> = vec![vec![(combined.clone(), Proposition::lt0(dark_term))]];

        // Splinter against whichever bound has the smaller scale: that
        // bounds the number of residues that can't already be ruled out by
        // the dark shadow to `min(scale_l, scale_u) - 1` (Omega test).
        if scale_l <= scale_u {
            for i in 1..scale_l {
                let eq = Term::var(x).scale(scale_l) - term_l.clone() - Term::constant(i);
                alternatives.push(vec![(combined.clone(), Proposition::eq0(eq))]);
            }
        } else {
            for i in 1..scale_u {
                let eq = Term::var(x).scale(scale_u) - term_u.clone() + Term::constant(i);
                alternatives.push(vec![(combined.clone(), Proposition::eq0(eq))]);
            }
        }

        deferred.push(Disjunction {
            provenance: combined,
            alternatives,
        });
    }

    fn unreachable_lt0(t: &Term) -> Provenance<L> {
        let err = InternalError::InequalitySolverExhausted {
            term: t.to_string(),
        };
        panic!("{err}");
    }
}
