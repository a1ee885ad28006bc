//! The equality solver (§4.4): `solveIs0`.

use std::collections::VecDeque;

use log::trace;

use crate::engine::error::InternalError;
use crate::engine::state::SolverState;
use crate::literal::Literal;
use crate::provenance::Provenance;
use crate::term::Proposition;
use crate::term::Term;

type WorkItem<L> = (Provenance<L>, Proposition);

/// The symmetric-range modulus `mod*(a, m) = a − m·⌊(2a + m)/(2m)⌋`, mapping
/// into `(−m/2, m/2]`. Uses `div_euclid`, i.e. floor division, not
/// truncation — §9, "Symmetric modulus" is explicit that truncating
/// division breaks the Omega trick on negative constants.
fn mod_star(a: i64, m: i64) -> i64 {
    a - m * floor_div(2 * a + m, 2 * m)
}

/// `⌊(2i + m)/(2m)⌋`, shared between `mod_star` and `upd`.
fn floor_div(numerator: i64, denominator: i64) -> i64 {
    numerator.div_euclid(denominator)
}

/// `upd(i) = ⌊(2i + m)/(2m)⌋ + mod*(i, m)`.
fn upd(i: i64, m: i64) -> i64 {
    floor_div(2 * i + m, 2 * m) + mod_star(i, m)
}

impl<L: Literal> SolverState<L> {
    /// Precondition: `t` has already been rewritten by the current
    /// substitution (the caller, [`SolverState::assert`], guarantees this).
    ///
    /// Installs whatever definitions are implied by `t = 0`, pushing any
    /// inequalities kicked out along the way onto `queue` for later
    /// re-processing. Returns `Err` with the contradicting provenance if `t
    /// = 0` has no integer solution.
    pub(crate) fn solve_eq0(
        &mut self,
        prov: Provenance<L>,
        mut t: Term,
        queue: &mut VecDeque<WorkItem<L>>,
    ) -> Result<(), Provenance<L>> {
        loop {
            // Case 1: constant.
            if let Some(k) = t.as_const() {
                return if k == 0 {
                    Ok(())
                } else {
                    Err(prov)
                };
            }

            // Case 4: common factor d > 1. `d * t' = 0 <=> t' = 0`.
            if let Some((_, reduced)) = t.factor() {
                t = reduced;
                continue;
            }

            // Case 2: exactly one variable, `a + b*x = 0`.
            if let Some((a, b, x)) = t.is_one_var() {
                return if a % b == 0 {
                    let definition = Term::constant(-(a / b));
                    self.install_definition(prov, x, definition, queue);
                    Ok(())
                } else {
                    // No integer solution: b does not divide a.
                    Err(prov)
                };
            }

            // Case 3: some variable has coefficient +-1.
            if let Some((c, x, rest)) = t.get_simple_coeff() {
                debug_assert!(c == 1 || c == -1);
                // c*x + rest = 0  =>  x = -c*rest (c is its own inverse).
                let definition = rest.scale(-c);
                self.install_definition(prov, x, definition, queue);
                return Ok(());
            }

            // Case 5: the Omega modulus trick.
            let Some((a_k, x_k, rest)) = t.least_abs_coeff() else {
                return Err(Self::unreachable_eq0(&t));
            };
            let sign = if a_k < 0 { -1 } else { 1 };
            let m = a_k.abs() + 1;
            let v = self.fresh_system_name();
            trace!("modulus trick: eliminating {x_k} with modulus {m}, introducing {v}");

            let mut names: Vec<crate::term::Name> = rest.names().collect();
            names.sort();

            let mut definition = Term::var(v).scale(-sign * m);
            let mut next = Term::var(v).scale(-a_k.abs());
            for y in names {
                let c_y = rest.coeff_of(y);
                definition = definition + Term::var(y).scale(sign * mod_star(c_y, m));
                next = next + Term::var(y).scale(upd(c_y, m));
            }
            let c0 = rest.const_part();
            definition = definition + Term::constant(sign * mod_star(c0, m));
            next = next + Term::constant(upd(c0, m));

            self.install_definition(prov.clone(), x_k, definition, queue);
            t = next;
        }
    }

    fn install_definition(
        &mut self,
        prov: Provenance<L>,
        x: crate::term::Name,
        definition: Term,
        queue: &mut VecDeque<WorkItem<L>>,
    ) {
        trace!("installing definition {x} := {definition}");
        let kicked_out = self.inerts.insert_definition(prov, x, definition);
        for item in kicked_out {
            queue.push_back(item);
        }
    }

    fn unreachable_eq0(t: &Term) -> Provenance<L> {
        let err = InternalError::EqualitySolverExhausted {
            term: t.to_string(),
        };
        panic!("{err}");
    }
}
