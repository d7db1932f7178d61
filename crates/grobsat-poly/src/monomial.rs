//! Sparse monomials.
//!
//! A monomial is a product of variable powers stored as `(var, exponent)`
//! factors, highest variable first. Variables are created in level order,
//! so the first factor is always the monomial's top variable.

use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;

/// A polynomial variable. Its index is also its level: later variables
/// dominate earlier ones in the term order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Var(pub u32);

impl Var {
    /// The variable's index into per-variable tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

type Factors = SmallVec<[(Var, u32); 4]>;

/// A power product `x_i^a * x_j^b * ...` with positive exponents.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Monomial {
    factors: Factors,
}

impl Monomial {
    /// The unit monomial.
    #[must_use]
    pub fn one() -> Self {
        Self::default()
    }

    /// The monomial `v`.
    #[must_use]
    pub fn var(v: Var) -> Self {
        Self::pow(v, 1)
    }

    /// The monomial `v^exp`; the unit monomial for `exp == 0`.
    #[must_use]
    pub fn pow(v: Var, exp: u32) -> Self {
        let mut factors = Factors::new();
        if exp > 0 {
            factors.push((v, exp));
        }
        Self { factors }
    }

    /// Builds a monomial from arbitrary `(var, exp)` pairs, merging repeats.
    #[must_use]
    pub fn from_powers(powers: &[(Var, u32)]) -> Self {
        powers
            .iter()
            .fold(Self::one(), |acc, &(v, e)| acc.mul(&Self::pow(v, e)))
    }

    /// True for the unit monomial.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.factors.is_empty()
    }

    /// The factors, highest variable first.
    #[must_use]
    pub fn factors(&self) -> &[(Var, u32)] {
        &self.factors
    }

    /// The variables occurring in the monomial, highest first.
    pub fn vars(&self) -> impl Iterator<Item = Var> + '_ {
        self.factors.iter().map(|&(v, _)| v)
    }

    /// The highest variable, if any.
    #[must_use]
    pub fn top_var(&self) -> Option<Var> {
        self.factors.first().map(|&(v, _)| v)
    }

    /// Total degree.
    #[must_use]
    pub fn degree(&self) -> u32 {
        self.factors.iter().map(|&(_, e)| e).sum()
    }

    /// Exponent of `v` (zero if absent).
    #[must_use]
    pub fn degree_of(&self, v: Var) -> u32 {
        self.factors
            .iter()
            .find(|&&(w, _)| w == v)
            .map_or(0, |&(_, e)| e)
    }

    /// True if this monomial is exactly `v`.
    #[must_use]
    pub fn is_var(&self, v: Var) -> bool {
        self.factors.len() == 1 && self.factors[0] == (v, 1)
    }

    /// Merges two factor lists with `f` combining exponents of shared
    /// variables. Zero exponents are dropped.
    fn merge(&self, other: &Self, f: impl Fn(u32, u32) -> u32) -> Self {
        let mut factors = Factors::with_capacity(self.factors.len() + other.factors.len());
        let (mut i, mut j) = (0, 0);
        while i < self.factors.len() || j < other.factors.len() {
            let (v, e) = match (self.factors.get(i), other.factors.get(j)) {
                (Some(&(a, ea)), Some(&(b, eb))) => match a.cmp(&b) {
                    Ordering::Greater => {
                        i += 1;
                        (a, f(ea, 0))
                    }
                    Ordering::Less => {
                        j += 1;
                        (b, f(0, eb))
                    }
                    Ordering::Equal => {
                        i += 1;
                        j += 1;
                        (a, f(ea, eb))
                    }
                },
                (Some(&(a, ea)), None) => {
                    i += 1;
                    (a, f(ea, 0))
                }
                (None, Some(&(b, eb))) => {
                    j += 1;
                    (b, f(0, eb))
                }
                (None, None) => unreachable!(),
            };
            if e > 0 {
                factors.push((v, e));
            }
        }
        Self { factors }
    }

    /// Product of two monomials.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        self.merge(other, |a, b| a + b)
    }

    /// Checks if `other` divides `self`.
    #[must_use]
    pub fn is_divisible_by(&self, other: &Self) -> bool {
        other
            .factors
            .iter()
            .all(|&(v, e)| self.degree_of(v) >= e)
    }

    /// Exact quotient `self / other`, or `None` if `other` does not divide.
    #[must_use]
    pub fn div(&self, other: &Self) -> Option<Self> {
        if !self.is_divisible_by(other) {
            return None;
        }
        Some(self.merge(other, |a, b| a - b))
    }

    /// Least common multiple.
    #[must_use]
    pub fn lcm(&self, other: &Self) -> Self {
        self.merge(other, u32::max)
    }

    /// True if the two monomials share no variable.
    #[must_use]
    pub fn is_coprime(&self, other: &Self) -> bool {
        !self.vars().any(|v| other.degree_of(v) > 0)
    }

    /// Lexicographic comparison with higher variables dominating.
    #[must_use]
    pub fn cmp_lex(&self, other: &Self) -> Ordering {
        for (&(a, ea), &(b, eb)) in self.factors.iter().zip(other.factors.iter()) {
            match a.cmp(&b).then(ea.cmp(&eb)) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        self.factors.len().cmp(&other.factors.len())
    }
}

impl Ord for Monomial {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_lex(other)
    }
}

impl PartialOrd for Monomial {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Monomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_one() {
            return write!(f, "1");
        }
        for (k, &(v, e)) in self.factors.iter().enumerate() {
            if k > 0 {
                write!(f, "*")?;
            }
            if e == 1 {
                write!(f, "{v:?}")?;
            } else {
                write!(f, "{v:?}^{e}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: Var = Var(0);
    const Y: Var = Var(1);
    const Z: Var = Var(2);

    fn mono(powers: &[(Var, u32)]) -> Monomial {
        Monomial::from_powers(powers)
    }

    #[test]
    fn test_mul_div() {
        let xy2 = mono(&[(X, 1), (Y, 2)]);
        let x2z = mono(&[(X, 2), (Z, 1)]);

        let product = xy2.mul(&x2z);
        assert_eq!(product.degree_of(X), 3);
        assert_eq!(product.degree_of(Y), 2);
        assert_eq!(product.degree_of(Z), 1);
        assert_eq!(product.degree(), 6);
        assert_eq!(product.top_var(), Some(Z));

        assert_eq!(product.div(&xy2), Some(x2z));
        assert!(mono(&[(X, 1)]).div(&mono(&[(X, 2)])).is_none());
        assert_eq!(xy2.div(&xy2), Some(Monomial::one()));
    }

    #[test]
    fn test_lcm_coprime() {
        let x2y = mono(&[(X, 2), (Y, 1)]);
        let xy3 = mono(&[(X, 1), (Y, 3)]);

        let lcm = x2y.lcm(&xy3);
        assert_eq!(lcm, mono(&[(X, 2), (Y, 3)]));

        assert!(mono(&[(X, 2)]).is_coprime(&mono(&[(Y, 1)])));
        assert!(!x2y.is_coprime(&xy3));
        assert!(Monomial::one().is_coprime(&x2y));
    }

    #[test]
    fn test_lex_order_higher_var_dominates() {
        let x = Monomial::var(X);
        let y = Monomial::var(Y);
        let x3 = mono(&[(X, 3)]);
        let xy = mono(&[(X, 1), (Y, 1)]);

        assert_eq!(y.cmp(&x3), Ordering::Greater);
        assert_eq!(xy.cmp(&y), Ordering::Greater);
        assert_eq!(x3.cmp(&x), Ordering::Greater);
        assert_eq!(x.cmp(&Monomial::one()), Ordering::Greater);
        assert!(xy.is_divisible_by(&y));
        assert!(Monomial::var(X).is_var(X));
        assert!(!x3.is_var(X));
    }
}
