//! # presburger
//!
//! An online, proof-producing decision procedure for quantifier-free linear
//! integer arithmetic — an Omega-test elimination algorithm augmented with
//! the Berezin–Ganesh–Dill online variant: the real shadow of two combined
//! bounds is handled immediately, and only the dark/gray shadow disjunction
//! (needed when neither bound has a unit coefficient) is deferred to an
//! external case splitter.
//!
//! This crate is the theory solver's core only. It does not include a
//! DPLL-style search procedure to explore the disjunctions [`Solver::assert`]
//! defers, a parser for any concrete surface syntax, or a wire format for
//! persisting proofs — see the glossary entries in the design notes for what
//! "proof-producing" means here: an unsat core over the caller's own literal
//! identifiers, not a replayable certificate.
//!
//! ```
//! use presburger::Name;
//! use presburger::Proposition;
//! use presburger::Solver;
//! use presburger::Term;
//!
//! let mut solver: Solver<u32> = Solver::default();
//! let x = Term::var(Name::user(0));
//! let y = Term::var(Name::user(1));
//!
//! // x + y = 10, x - y = 2
//! solver
//!     .assert(0, Proposition::eq(x.clone() + y.clone(), Term::constant(10)))
//!     .expect("no contradiction");
//! solver
//!     .assert(1, Proposition::eq(x - y, Term::constant(2)))
//!     .expect("no contradiction");
//!
//! let model = solver.model().expect("fully resolved, no deferred disjunctions");
//! let value = |i: u32| model.iter().find(|(n, _)| *n == i).unwrap().1;
//! assert_eq!(value(0), 6);
//! assert_eq!(value(1), 4);
//! ```

pub(crate) mod asserts;
pub(crate) mod basic_types;
pub(crate) mod engine;
pub mod literal;
pub mod provenance;
pub mod term;

mod api;

pub use api::Solver;
pub use literal::Literal;
pub use provenance::Provenance;
pub use term::Name;
pub use term::Proposition;
pub use term::Term;

pub use crate::engine::Disjunction;
pub use crate::engine::SubGoal;
