//! The caller's opaque "user literal" type (§1, §3 "Provenance", glossary
//! "User literal").
//!
//! This crate never names a concrete literal type: every piece of state that
//! carries provenance is generic over `L`. [`Literal`] collects the bounds
//! that every such piece of state actually needs — `Copy` because literal
//! identifiers are meant to be cheap tags, not owned resources; `Ord`
//! because §1 specifies a *totally ordered* opaque type (this is also what
//! lets [`crate::provenance::Provenance`] use a `BTreeSet` for deterministic
//! iteration); `Debug` for the pretty-printing named in §6.
//!
//! Any type satisfying the bounds gets this for free; there is nothing to
//! implement.

pub trait Literal: Copy + Ord + std::fmt::Debug {}

impl<T: Copy + Ord + std::fmt::Debug> Literal for T {}
