use std::cmp::Ordering;
use std::fmt;

/// An opaque, totally ordered variable identifier.
///
/// `Name` partitions into two disjoint namespaces: [`Name::User`] names,
/// supplied by the caller when building [`Term`][super::Term]s, and
/// [`Name::System`] names, allocated internally by the equality solver's
/// modulus trick (§4.4). Every `System` name sorts strictly larger than
/// every `User` name, which is what lets the inert store use a plain `Name`
/// ordering to maintain triangularity (I1/I2) instead of tracking allocation
/// order separately.
///
/// Within a namespace, names sort by their index. Indices are allocated
/// monotonically and never reused, so the ordering is stable for the
/// lifetime of a [`Solver`][crate::Solver].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Name {
    /// A variable named by the caller.
    User(u32),
    /// A variable allocated internally for the Omega modulus trick (§4.4).
    /// Never exposed in an extracted model.
    System(u32),
}

impl Name {
    /// Constructs the user name with index `index`.
    pub fn user(index: u32) -> Self {
        Name::User(index)
    }

    /// The inverse of [`Name::user`]: returns the user index, or `None` if
    /// this is a system name.
    pub fn as_user(self) -> Option<u32> {
        match self {
            Name::User(index) => Some(index),
            Name::System(_) => None,
        }
    }

    pub(crate) fn is_system(self) -> bool {
        matches!(self, Name::System(_))
    }
}

impl PartialOrd for Name {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Name {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Name::User(a), Name::User(b)) => a.cmp(b),
            (Name::System(a), Name::System(b)) => a.cmp(b),
            (Name::User(_), Name::System(_)) => Ordering::Less,
            (Name::System(_), Name::User(_)) => Ordering::Greater,
        }
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Name::User(index) => write!(f, "x{index}"),
            Name::System(index) => write!(f, "v{index}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_names_sort_above_every_user_name() {
        assert!(Name::System(0) > Name::User(u32::MAX));
    }

    #[test]
    fn ordering_within_a_namespace_follows_the_index() {
        assert!(Name::User(1) < Name::User(2));
        assert!(Name::System(1) < Name::System(2));
    }

    #[test]
    fn as_user_is_the_inverse_of_user() {
        assert_eq!(Name::user(7).as_user(), Some(7));
        assert_eq!(Name::System(7).as_user(), None);
    }
}
