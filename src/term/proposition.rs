use std::fmt;

use crate::term::Term;

/// An atomic proposition over linear terms (§3, "Proposition").
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Proposition {
    /// `t = 0`.
    Eq0(Term),
    /// `t < 0`.
    Lt0(Term),
}

impl Proposition {
    /// `t = 0`.
    pub fn eq0(t: Term) -> Self {
        Proposition::Eq0(t)
    }

    /// `t < 0`.
    pub fn lt0(t: Term) -> Self {
        Proposition::Lt0(t)
    }

    /// `t₁ |=| t₂`, i.e. `PEq0(t₁ − t₂)`.
    pub fn eq(t1: Term, t2: Term) -> Self {
        Proposition::Eq0(t1 - t2)
    }

    /// `t₁ |<| t₂`, i.e. `PLt0(t₁ − t₂)`.
    pub fn lt(t1: Term, t2: Term) -> Self {
        Proposition::Lt0(t1 - t2)
    }

    pub(crate) fn term(&self) -> &Term {
        match self {
            Proposition::Eq0(t) | Proposition::Lt0(t) => t,
        }
    }

    pub(crate) fn with_term(&self, t: Term) -> Proposition {
        match self {
            Proposition::Eq0(_) => Proposition::Eq0(t),
            Proposition::Lt0(_) => Proposition::Lt0(t),
        }
    }
}

impl fmt::Display for Proposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Proposition::Eq0(t) => write!(f, "{t} = 0"),
            Proposition::Lt0(t) => write!(f, "{t} < 0"),
        }
    }
}
