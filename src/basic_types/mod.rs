//! Small, crate-wide utility types that do not belong to any single
//! component of the solver.

mod hash_types;

pub(crate) use hash_types::FnvIndexMap;
