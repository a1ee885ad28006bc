//! Type aliases for the hash-based collections used throughout the crate.
//!
//! [`Name`][crate::term::Name] keys are small integers, so the default
//! SipHash-based [`std::collections::HashMap`] is needlessly slow; we use the
//! FNV hasher instead, as is common for integer-keyed maps.

use std::collections::HashMap;
use std::hash::BuildHasherDefault;

use fnv::FnvHasher;

pub(crate) type FnvIndexMap<K, V> = HashMap<K, V, BuildHasherDefault<FnvHasher>>;
