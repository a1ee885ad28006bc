//! The inert store (§4.3): a triangular substitution (`solved`) plus
//! per-variable lower/upper bound lists (`bounds`), maintaining invariants
//! I1–I5.

use std::fmt;

use crate::basic_types::FnvIndexMap;
use crate::provenance::Provenance;
use crate::term::Name;
use crate::term::Proposition;
use crate::term::Term;

/// A recorded bound `t < c·x` (lower) or `c·x < t` (upper), attached to a
/// variable externally by the map it lives in.
#[derive(Clone, Debug)]
pub(crate) struct Bound<L: crate::literal::Literal> {
    pub(crate) prov: Provenance<L>,
    /// `c`, strictly positive (I4).
    pub(crate) scale: i64,
    pub(crate) term: Term,
}

#[derive(Clone, Debug, Default)]
struct BoundLists<L: crate::literal::Literal> {
    lowers: Vec<Bound<L>>,
    uppers: Vec<Bound<L>>,
}

/// The inert store: `bounds` maps a variable to its lower/upper bound
/// lists, `solved` is the idempotent triangular substitution (§3).
#[derive(Clone, Debug)]
pub(crate) struct InertStore<L: crate::literal::Literal> {
    bounds: FnvIndexMap<Name, BoundLists<L>>,
    solved: FnvIndexMap<Name, (Provenance<L>, Term)>,
}

impl<L: crate::literal::Literal> Default for InertStore<L> {
    fn default() -> Self {
        InertStore {
            bounds: FnvIndexMap::default(),
            solved: FnvIndexMap::default(),
        }
    }
}

impl<L: crate::literal::Literal> InertStore<L> {
    pub(crate) fn lowers(&self, x: Name) -> &[Bound<L>] {
        self.bounds.get(&x).map_or(&[], |b| &b.lowers)
    }

    pub(crate) fn uppers(&self, x: Name) -> &[Bound<L>] {
        self.bounds.get(&x).map_or(&[], |b| &b.uppers)
    }

    pub(crate) fn push_lower(&mut self, x: Name, bound: Bound<L>) {
        crate::presburger_assert_simple!(bound.scale >= 1, "I4: bound scale must be positive");
        crate::presburger_assert_moderate!(
            bound.term.names().all(|name| name > x),
            "I1: a bound on {x} must mention only strictly greater variables"
        );
        self.bounds.entry(x).or_default().lowers.push(bound);
    }

    pub(crate) fn push_upper(&mut self, x: Name, bound: Bound<L>) {
        crate::presburger_assert_simple!(bound.scale >= 1, "I4: bound scale must be positive");
        crate::presburger_assert_moderate!(
            bound.term.names().all(|name| name > x),
            "I1: a bound on {x} must mention only strictly greater variables"
        );
        self.bounds.entry(x).or_default().uppers.push(bound);
    }

    /// Every variable with at least one recorded bound, in no particular
    /// order (callers that need an order, e.g. model extraction, sort it
    /// themselves).
    pub(crate) fn bound_names(&self) -> impl Iterator<Item = Name> + '_ {
        self.bounds.keys().copied()
    }

    pub(crate) fn solved_entries(&self) -> impl Iterator<Item = (Name, &(Provenance<L>, Term))> {
        self.solved.iter().map(|(&name, entry)| (name, entry))
    }

    /// `iApSubst`: rewrites `t` by every `(x → s)` in `solved`, accumulating
    /// provenance. `solved` is idempotent (I2), so in principle one pass
    /// suffices; we iterate to a fixpoint regardless, which is correct
    /// whether or not the caller's `t` was already partly substituted.
    pub(crate) fn apply_subst(&self, prov: &Provenance<L>, t: &Term) -> (Provenance<L>, Term) {
        let mut prov = prov.clone();
        let mut t = t.clone();
        loop {
            let Some(x) = t.names().find(|name| self.solved.contains_key(name)) else {
                return (prov, t);
            };
            let (def_prov, def_term) = &self.solved[&x];
            prov = prov.union(def_prov);
            t = t.let_term(x, def_term);
        }
    }

    /// `iSolved`: installs `x := t` (precondition: `t` already substituted).
    /// Returns the inequalities kicked out to preserve triangularity (I1),
    /// each paired with the union of `prov` and the removed bound's own
    /// provenance.
    ///
    /// Note this does *not* assert that `t` mentions only variables greater
    /// than `x`: the Omega modulus trick (§4.4 case 5) installs `x_k := …`
    /// for the least-**absolute-coefficient** variable, not the
    /// least-**named** one, so `t` may legitimately mention smaller-named
    /// user variables at the moment of this call. That reference is
    /// transient — the next definition installed within the same `solveIs0`
    /// recursion rewrites it away via step 3 below — but it is not yet true
    /// *here*, so name-order triangularity cannot be asserted at this
    /// boundary.
    pub(crate) fn insert_definition(
        &mut self,
        prov: Provenance<L>,
        x: Name,
        t: Term,
    ) -> Vec<(Provenance<L>, Proposition)> {
        crate::presburger_assert_simple!(
            !self.solved.contains_key(&x),
            "solved is installed at most once per variable"
        );
        crate::presburger_assert_moderate!(
            !t.names().any(|name| self.solved.contains_key(&name)),
            "{x}'s definition {t} must already be fully substituted against the current solved map"
        );

        let mut kicked_out = Vec::new();

        // 1. x's own bounds would now mention a variable (x itself is gone,
        //    replaced by t) smaller than the terms they were triangular
        //    against; they must be re-derived from scratch.
        if let Some(lists) = self.bounds.remove(&x) {
            for bound in lists.lowers {
                // t < c*x  ==>  t - c*x < 0
                let atom = bound.term.clone() - Term::var(x).scale(bound.scale);
                kicked_out.push((prov.union(&bound.prov), Proposition::lt0(atom)));
            }
            for bound in lists.uppers {
                // c*x < t  ==>  c*x - t < 0
                let atom = Term::var(x).scale(bound.scale) - bound.term.clone();
                kicked_out.push((prov.union(&bound.prov), Proposition::lt0(atom)));
            }
        }

        // 2. Any bound on another variable whose term mentions x would, after
        //    substitution, mention a variable smaller than x's own place in
        //    the order; kick those out too rather than rewrite in place.
        for (&y, lists) in self.bounds.iter_mut() {
            debug_assert_ne!(y, x);
            let mut i = 0;
            while i < lists.lowers.len() {
                if lists.lowers[i].term.coeff_of(x) != 0 {
                    let bound = lists.lowers.remove(i);
                    let atom = bound.term.clone() - Term::var(y).scale(bound.scale);
                    kicked_out.push((prov.union(&bound.prov), Proposition::lt0(atom)));
                } else {
                    i += 1;
                }
            }
            let mut i = 0;
            while i < lists.uppers.len() {
                if lists.uppers[i].term.coeff_of(x) != 0 {
                    let bound = lists.uppers.remove(i);
                    let atom = Term::var(y).scale(bound.scale) - bound.term.clone();
                    kicked_out.push((prov.union(&bound.prov), Proposition::lt0(atom)));
                } else {
                    i += 1;
                }
            }
        }
        self.bounds.retain(|_, lists| !lists.lowers.is_empty() || !lists.uppers.is_empty());

        // 3. Rewrite existing solved entries that mention x.
        for (_, (solved_prov, solved_term)) in self.solved.iter_mut() {
            if solved_term.coeff_of(x) != 0 {
                *solved_term = solved_term.let_term(x, &t);
                *solved_prov = solved_prov.union(&prov);
            }
        }

        // 4. Install the new definition.
        let _ = self.solved.insert(x, (prov, t));

        self.debug_check_invariants();
        kicked_out
    }

    /// Re-derives I1, I3, I4 and the idempotence half of I2 from scratch and
    /// panics on a violation. Gated behind `debug-checks` (§2 item 9):
    /// re-walking every bound and every solved entry after each definition
    /// is installed would change the asymptotic cost of `insert_definition`
    /// in a release build.
    ///
    /// This deliberately does **not** check name-order triangularity of
    /// `solved` (the other half of I2): the Omega modulus trick can leave a
    /// `solved` entry transiently referencing a smaller-named user variable
    /// between one `insert_definition` call and the next within the same
    /// `solveIs0` recursion (see the note on `insert_definition`), so that
    /// property does not hold at every call site this is invoked from. The
    /// idempotence property checked below — no `solved` value mentions
    /// another `solved` key — does hold unconditionally.
    fn debug_check_invariants(&self) {
        if !cfg!(feature = "debug-checks") {
            return;
        }
        for (_, t) in self.solved.values() {
            crate::presburger_assert_extreme!(
                !t.names().any(|name| self.solved.contains_key(&name)),
                "I2 violated: a solved definition {t} mentions another solved variable"
            );
        }
        for (&x, lists) in self.bounds.iter() {
            for bound in lists.lowers.iter().chain(lists.uppers.iter()) {
                crate::presburger_assert_extreme!(bound.scale >= 1, "I4 violated: bound on {x} has scale <= 0");
                crate::presburger_assert_extreme!(
                    bound.term.names().all(|name| name > x),
                    "I1 violated: bound on {x} mentions a variable <= {x}"
                );
            }
        }
    }
}

/// Pretty-prints the inert store (§6, "Pretty-printing for state,
/// proposition, provenance"): every `solved` entry, then every bound,
/// largest-name first — the same order model extraction reads them in.
impl<L: crate::literal::Literal> fmt::Display for InertStore<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<Name> = self
            .solved
            .keys()
            .copied()
            .chain(self.bounds.keys().copied())
            .collect();
        names.sort_by(|a, b| b.cmp(a));
        names.dedup();

        let mut first = true;
        for name in names {
            if let Some((prov, t)) = self.solved.get(&name) {
                if !first {
                    writeln!(f)?;
                }
                write!(f, "{name} := {t}  [{prov}]")?;
                first = false;
            }
            if let Some(lists) = self.bounds.get(&name) {
                for bound in &lists.lowers {
                    if !first {
                        writeln!(f)?;
                    }
                    write!(f, "{} < {}*{name}  [{}]", bound.term, bound.scale, bound.prov)?;
                    first = false;
                }
                for bound in &lists.uppers {
                    if !first {
                        writeln!(f)?;
                    }
                    write!(f, "{}*{name} < {}  [{}]", bound.scale, name, bound.prov)?;
                    first = false;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x(i: u32) -> Name {
        Name::user(i)
    }

    #[test]
    fn display_lists_solved_entries_and_bounds() {
        let mut inerts: InertStore<u32> = InertStore::default();
        inerts.push_lower(
            x(0),
            Bound {
                prov: Provenance::singleton(1),
                scale: 1,
                term: Term::constant(2),
            },
        );
        let _ = inerts.insert_definition(Provenance::singleton(2), x(1), Term::constant(5));
        let rendered = inerts.to_string();
        assert!(rendered.contains("x1 := 5"));
        assert!(rendered.contains("2 < 1*x0"));
    }

    #[test]
    fn installing_a_definition_kicks_out_its_own_bounds() {
        let mut inerts: InertStore<u32> = InertStore::default();
        inerts.push_lower(
            x(0),
            Bound {
                prov: Provenance::singleton(1),
                scale: 1,
                term: Term::constant(2),
            },
        );

        let kicked = inerts.insert_definition(Provenance::singleton(2), x(0), Term::constant(5));
        assert_eq!(kicked.len(), 1);
        assert!(inerts.lowers(x(0)).is_empty());
    }

    #[test]
    fn installing_a_definition_kicks_out_bounds_mentioning_it() {
        let mut inerts: InertStore<u32> = InertStore::default();
        // x(1) has an upper bound in terms of x(0): 1*x(1) < x(0)
        inerts.push_upper(
            x(1),
            Bound {
                prov: Provenance::singleton(1),
                scale: 1,
                term: Term::var(x(0)),
            },
        );

        let kicked = inerts.insert_definition(Provenance::singleton(2), x(0), Term::constant(3));
        assert_eq!(kicked.len(), 1);
        assert!(inerts.uppers(x(1)).is_empty());
    }

    #[test]
    fn apply_subst_accumulates_provenance_through_a_chain() {
        let mut inerts: InertStore<u32> = InertStore::default();
        let _ = inerts.insert_definition(Provenance::singleton(1), x(1), Term::var(x(2)));
        let _ = inerts.insert_definition(Provenance::singleton(2), x(2), Term::constant(9));

        let (prov, t) = inerts.apply_subst(&Provenance::empty(), &Term::var(x(1)));
        assert_eq!(t, Term::constant(9));
        assert!(prov.contains(&1));
        assert!(prov.contains(&2));
    }
}
