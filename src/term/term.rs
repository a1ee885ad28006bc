use std::fmt;
use std::ops::Add;
use std::ops::Mul;
use std::ops::Neg;
use std::ops::Sub;

use crate::basic_types::FnvIndexMap;
use crate::term::Name;

/// An immutable linear term `k + Σ M[x]·x` over [`Name`]d variables with
/// integer coefficients (§3, "Term").
///
/// The zero-free invariant (I3) is maintained by every constructor below: no
/// entry of the coefficient map is ever `0`. Two terms compare equal iff
/// their constant and coefficient map coincide; because the map is
/// zero-free, this is exactly semantic equality on **linear** terms (it is
/// not equality of the underlying polynomials in general, but linear terms
/// have a unique zero-free representation).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Term {
    constant: i64,
    coeffs: FnvIndexMap<Name, i64>,
}

impl Term {
    /// `tConst(k)`.
    pub fn constant(k: i64) -> Self {
        Term {
            constant: k,
            coeffs: FnvIndexMap::default(),
        }
    }

    /// `tVar(x)`.
    pub fn var(x: Name) -> Self {
        let mut coeffs = FnvIndexMap::default();
        let _ = coeffs.insert(x, 1);
        Term {
            constant: 0,
            coeffs,
        }
    }

    /// The constant part of the term.
    pub(crate) fn const_part(&self) -> i64 {
        self.constant
    }

    /// The coefficient of `x` in this term, `0` if absent.
    pub fn coeff_of(&self, x: Name) -> i64 {
        self.coeffs.get(&x).copied().unwrap_or(0)
    }

    /// `isConst(t)`: the constant, iff the coefficient map is empty.
    pub fn as_const(&self) -> Option<i64> {
        self.coeffs.is_empty().then_some(self.constant)
    }

    /// Names with a nonzero coefficient in this term.
    pub(crate) fn names(&self) -> impl Iterator<Item = Name> + '_ {
        self.coeffs.keys().copied()
    }

    /// Split out the coefficient of `x`: returns `(a, t')` where `a` is the
    /// coefficient of `x` (`0` if absent) and `t'` is `self` with `x`
    /// removed.
    pub fn split_variable(&self, x: Name) -> (i64, Term) {
        let a = self.coeff_of(x);
        if a == 0 {
            return (0, self.clone());
        }
        let mut coeffs = self.coeffs.clone();
        let _ = coeffs.remove(&x);
        (a, Term { constant: self.constant, coeffs })
    }

    /// `tLet(x, s, t)`: substitutes `s` for `x` in `self`.
    pub fn let_term(&self, x: Name, s: &Term) -> Term {
        let (a, rest) = self.split_variable(x);
        if a == 0 {
            return rest;
        }
        s.scale(a) + rest
    }

    /// `tLetNum(x, k, t)`: substitutes the constant `k` for `x` in `self`.
    pub fn let_num(&self, x: Name, k: i64) -> Term {
        let (a, rest) = self.split_variable(x);
        if a == 0 {
            return rest;
        }
        Term::constant(a * k) + rest
    }

    /// Batch variant of [`Term::let_num`]: substitutes every `(x, k)` pair in
    /// `subst` simultaneously.
    pub fn let_many(&self, subst: &FnvIndexMap<Name, i64>) -> Term {
        let mut constant = self.constant;
        let mut coeffs = FnvIndexMap::default();
        for (&x, &a) in self.coeffs.iter() {
            match subst.get(&x) {
                Some(&k) => constant += a * k,
                None => {
                    let _ = coeffs.insert(x, a);
                }
            }
        }
        Term { constant, coeffs }
    }

    /// `tFactor(t)`: the greatest common divisor `d > 1` of the constant and
    /// every coefficient, and `t / d`. `None` if `d = 1` (including the
    /// all-zero / constant-only term, where there is nothing to factor).
    pub fn factor(&self) -> Option<(i64, Term)> {
        if self.coeffs.is_empty() {
            return None;
        }
        let mut d = self.constant.unsigned_abs();
        for &c in self.coeffs.values() {
            d = gcd(d, c.unsigned_abs());
            if d == 1 {
                return None;
            }
        }
        if d <= 1 {
            return None;
        }
        let d = d as i64;
        Some((d, self.map_coeffs(|v| v / d)))
    }

    /// The `(c, x, t \ x)` triple where `|c|` is minimal over the variables
    /// of `t`, ties broken by the lowest [`Name`]. `None` for a constant
    /// term.
    pub fn least_abs_coeff(&self) -> Option<(i64, Name, Term)> {
        let x = self
            .coeffs
            .iter()
            .map(|(&name, &c)| (c.abs(), name))
            .min_by(|(abs_a, name_a), (abs_b, name_b)| {
                abs_a.cmp(abs_b).then_with(|| name_a.cmp(name_b))
            })
            .map(|(_, name)| name)?;
        let (c, rest) = self.split_variable(x);
        Some((c, x, rest))
    }

    /// The lowest [`Name`] with a nonzero coefficient in `t`.
    pub fn least_variable(&self) -> Option<Name> {
        self.coeffs.keys().copied().min()
    }

    /// If exactly one variable appears in `t`, returns `(constant, coeff,
    /// name)`.
    pub fn is_one_var(&self) -> Option<(i64, i64, Name)> {
        if self.coeffs.len() != 1 {
            return None;
        }
        let (&name, &coeff) = self.coeffs.iter().next().expect("checked len == 1");
        Some((self.constant, coeff, name))
    }

    /// If some variable has coefficient `±1`, returns `(coeff, name, rest)`
    /// for the lowest such [`Name`] (the deterministic tie-break required by
    /// §4.1 / §9's "Open question — determinism of tie-breaks").
    pub fn get_simple_coeff(&self) -> Option<(i64, Name, Term)> {
        let x = self
            .coeffs
            .iter()
            .filter(|&(_, &c)| c == 1 || c == -1)
            .map(|(&name, _)| name)
            .min()?;
        let (c, rest) = self.split_variable(x);
        Some((c, x, rest))
    }

    /// Applies `f` to the constant and every coefficient, dropping any
    /// resulting zero coefficients so the zero-free invariant (I3) is
    /// preserved.
    pub fn map_coeffs(&self, f: impl Fn(i64) -> i64) -> Term {
        let constant = f(self.constant);
        let coeffs = self
            .coeffs
            .iter()
            .filter_map(|(&name, &c)| {
                let c = f(c);
                (c != 0).then_some((name, c))
            })
            .collect();
        Term { constant, coeffs }
    }

    /// `k · t`.
    pub fn scale(&self, k: i64) -> Term {
        if k == 0 {
            return Term::constant(0);
        }
        if k == 1 {
            return self.clone();
        }
        // No zero coefficient can be produced: `k != 0` and `self` was
        // zero-free, so every product `k * c` is nonzero.
        Term {
            constant: self.constant * k,
            coeffs: self.coeffs.iter().map(|(&n, &c)| (n, c * k)).collect(),
        }
    }
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

impl Add for Term {
    type Output = Term;

    fn add(self, rhs: Term) -> Term {
        let mut coeffs = self.coeffs;
        for (name, c) in rhs.coeffs {
            match coeffs.get_mut(&name) {
                Some(existing) => {
                    *existing += c;
                    if *existing == 0 {
                        let _ = coeffs.remove(&name);
                    }
                }
                None => {
                    let _ = coeffs.insert(name, c);
                }
            }
        }
        Term {
            constant: self.constant + rhs.constant,
            coeffs,
        }
    }
}

impl Neg for Term {
    type Output = Term;

    fn neg(self) -> Term {
        self.scale(-1)
    }
}

impl Sub for Term {
    type Output = Term;

    fn sub(self, rhs: Term) -> Term {
        self + (-rhs)
    }
}

impl Mul<i64> for Term {
    type Output = Term;

    fn mul(self, k: i64) -> Term {
        self.scale(k)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<Name> = self.coeffs.keys().copied().collect();
        names.sort();
        if names.is_empty() {
            return write!(f, "{}", self.constant);
        }
        let mut first = true;
        for name in names {
            let c = self.coeff_of(name);
            if first {
                match c {
                    1 => write!(f, "{name}")?,
                    -1 => write!(f, "-{name}")?,
                    _ => write!(f, "{c}*{name}")?,
                }
                first = false;
            } else {
                let sign = if c < 0 { "-" } else { "+" };
                match c.abs() {
                    1 => write!(f, " {sign} {name}")?,
                    _ => write!(f, " {sign} {}*{name}", c.abs())?,
                }
            }
        }
        if self.constant != 0 {
            let sign = if self.constant < 0 { "-" } else { "+" };
            write!(f, " {sign} {}", self.constant.abs())?;
        }
        Ok(())
    }
}
