//! Model extraction (§4.6): reading a satisfying integer assignment back out
//! of a quiescent inert store.

use crate::basic_types::FnvIndexMap;
use crate::engine::inerts::InertStore;
use crate::term::Name;
use crate::term::Term;

/// Extracts a satisfying assignment for every bound-having or `solved`
/// variable, defaulting every other free variable to `0`.
///
/// Bound-having variables are assigned largest-name first: triangularity
/// (I1) guarantees a bound on `x` mentions only names strictly *greater*
/// than `x`, so by the time we reach `x` every name its bounds could mention
/// already has a value. We then walk `solved` (in whatever order the map
/// yields, since I2 keeps every entry fully applied against every other — no
/// entry's term can mention another entry's name) and default anything
/// still unassigned to `0`.
pub(crate) fn extract<L: crate::literal::Literal>(inerts: &InertStore<L>) -> Vec<(u32, i64)> {
    let mut assignment: FnvIndexMap<Name, i64> = FnvIndexMap::default();

    let mut bound_names: Vec<Name> = inerts.bound_names().collect();
    bound_names.sort_by(|a, b| b.cmp(a));

    for x in bound_names {
        let lowers = inerts.lowers(x);
        let uppers = inerts.uppers(x);

        let value = if !lowers.is_empty() {
            lowers
                .iter()
                .map(|b| minimal_above(eval_term(&b.term, &assignment), b.scale))
                .max()
                .expect("checked non-empty")
        } else if !uppers.is_empty() {
            uppers
                .iter()
                .map(|b| maximal_below(eval_term(&b.term, &assignment), b.scale))
                .min()
                .expect("checked non-empty")
        } else {
            0
        };

        let _ = assignment.insert(x, value);
    }

    for (x, (_, term)) in inerts.solved_entries() {
        if !assignment.contains_key(&x) {
            let value = eval_term(term, &assignment);
            let _ = assignment.insert(x, value);
        }
    }

    // Some names are mentioned only inside another variable's bound term
    // (e.g. `x < y` where `y` was never itself eliminated) and so never
    // became a key of `bounds` or `solved`. They are genuinely
    // unconstrained from the solver's point of view; give them the same `0`
    // every other free variable gets rather than silently dropping them
    // from the model.
    for x in inerts.bound_names() {
        for b in inerts.lowers(x).iter().chain(inerts.uppers(x).iter()) {
            for name in b.term.names() {
                let _ = assignment.entry(name).or_insert(0);
            }
        }
    }
    for (_, (_, term)) in inerts.solved_entries() {
        for name in term.names() {
            let _ = assignment.entry(name).or_insert(0);
        }
    }

    let mut model: Vec<(u32, i64)> = assignment
        .into_iter()
        .filter_map(|(name, value)| name.as_user().map(|index| (index, value)))
        .collect();
    model.sort_by_key(|&(index, _)| index);
    model
}

/// The smallest integer `x` with `bound < scale * x` (`scale > 0`, I4): `x =
/// ⌊bound / scale⌋ + 1`, using floor (not truncating) division so this holds
/// for negative `bound` too.
fn minimal_above(bound: i64, scale: i64) -> i64 {
    bound.div_euclid(scale) + 1
}

/// The largest integer `x` with `scale * x < bound` (`scale > 0`, I4): `x =
/// ⌊(bound − 1) / scale⌋`.
fn maximal_below(bound: i64, scale: i64) -> i64 {
    (bound - 1).div_euclid(scale)
}

fn eval_term(term: &Term, assignment: &FnvIndexMap<Name, i64>) -> i64 {
    let mut value = term.const_part();
    for name in term.names() {
        value += term.coeff_of(name) * assignment.get(&name).copied().unwrap_or(0);
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::inerts::Bound;
    use crate::provenance::Provenance;

    fn x(i: u32) -> Name {
        Name::user(i)
    }

    #[test]
    fn unbounded_variable_defaults_to_zero() {
        let inerts: InertStore<u32> = InertStore::default();
        assert_eq!(extract(&inerts), Vec::<(u32, i64)>::new());
    }

    #[test]
    fn a_single_lower_bound_picks_the_least_satisfying_value() {
        let mut inerts: InertStore<u32> = InertStore::default();
        // 2 < x  =>  x >= 3
        inerts.push_lower(
            x(0),
            Bound {
                prov: Provenance::singleton(1),
                scale: 1,
                term: Term::constant(2),
            },
        );
        assert_eq!(extract(&inerts), vec![(0, 3)]);
    }

    #[test]
    fn solved_entries_are_evaluated_against_the_bound_assignment() {
        let mut inerts: InertStore<u32> = InertStore::default();
        inerts.push_lower(
            x(0),
            Bound {
                prov: Provenance::singleton(1),
                scale: 1,
                term: Term::constant(2),
            },
        );
        // x(1) := x(0) + 10
        let _ = inerts.insert_definition(
            Provenance::singleton(2),
            x(1),
            Term::var(x(0)) + Term::constant(10),
        );

        let model = extract(&inerts);
        let get = |i: u32| model.iter().find(|(n, _)| *n == i).unwrap().1;
        assert_eq!(get(0), 3);
        assert_eq!(get(1), 13);
    }

    #[test]
    fn system_names_never_appear_in_the_model() {
        let mut inerts: InertStore<u32> = InertStore::default();
        inerts.push_lower(
            Name::System(0),
            Bound {
                prov: Provenance::singleton(1),
                scale: 1,
                term: Term::constant(0),
            },
        );
        assert_eq!(extract(&inerts), Vec::<(u32, i64)>::new());
    }

    #[test]
    fn bounds_are_resolved_largest_name_first() {
        // 100 < y (y = x(0)) and y < x (x = x(1)): x's own value is free
        // (only ever appears inside y's bound, never bounded itself), so
        // it must be read as 0 *before* y is computed from it, which in
        // turn requires processing x(1) ahead of x(0).
        let mut inerts: InertStore<u32> = InertStore::default();
        inerts.push_lower(
            x(0),
            Bound {
                prov: Provenance::singleton(1),
                scale: 1,
                term: Term::constant(100),
            },
        );
        inerts.push_upper(
            x(0),
            Bound {
                prov: Provenance::singleton(2),
                scale: 1,
                term: Term::var(x(1)),
            },
        );

        let model = extract(&inerts);
        let get = |i: u32| model.iter().find(|(n, _)| *n == i).unwrap().1;
        assert_eq!(get(0), 101, "lower bound wins per §4.6's priority rule");
        assert_eq!(get(1), 0, "x(1) never got its own bound, so it defaults to 0");
    }

    #[test]
    fn a_name_mentioned_only_inside_another_bound_still_appears_in_the_model() {
        let mut inerts: InertStore<u32> = InertStore::default();
        // x(0) < x(1): a bound keyed on x(0) mentioning the free x(1).
        inerts.push_upper(
            x(0),
            Bound {
                prov: Provenance::singleton(1),
                scale: 1,
                term: Term::var(x(1)),
            },
        );
        let model = extract(&inerts);
        assert!(model.iter().any(|&(n, v)| n == 1 && v == 0));
    }
}
