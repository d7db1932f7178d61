//! Sparse polynomials as sorted term lists.
//!
//! [`Poly`] is the value behind a [`crate::Pdd`] handle. Terms are kept in
//! strictly decreasing monomial order with nonzero coefficients, so two
//! equal polynomials have identical representations and hash alike.

use num_traits::{One, Zero};
use smallvec::SmallVec;
use std::cmp::Ordering;

use crate::monomial::{Monomial, Var};
use crate::rational::Rational;

/// A polynomial over the rationals in canonical form.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Poly {
    terms: Vec<(Monomial, Rational)>,
}

impl Poly {
    /// The zero polynomial.
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }

    /// A constant polynomial.
    #[must_use]
    pub fn constant(c: Rational) -> Self {
        Self::term(Monomial::one(), c)
    }

    /// A single term `c * m`.
    #[must_use]
    pub fn term(m: Monomial, c: Rational) -> Self {
        if c.is_zero() {
            Self::zero()
        } else {
            Self { terms: vec![(m, c)] }
        }
    }

    /// Builds a polynomial from unsorted terms, combining like terms.
    #[must_use]
    pub fn from_terms(mut terms: Vec<(Monomial, Rational)>) -> Self {
        terms.sort_by(|a, b| b.0.cmp(&a.0));
        let mut out: Vec<(Monomial, Rational)> = Vec::with_capacity(terms.len());
        for (m, c) in terms {
            match out.last_mut() {
                Some((last, acc)) if *last == m => *acc = &*acc + &c,
                _ => out.push((m, c)),
            }
            if out.last().is_some_and(|(_, c)| c.is_zero()) {
                out.pop();
            }
        }
        Self { terms: out }
    }

    /// The terms, leading term first.
    #[must_use]
    pub fn terms(&self) -> &[(Monomial, Rational)] {
        &self.terms
    }

    /// Number of terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// True for the zero polynomial.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// True for the zero polynomial.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// The constant value, if the polynomial is a constant (zero included).
    #[must_use]
    pub fn as_val(&self) -> Option<Rational> {
        match self.terms.as_slice() {
            [] => Some(Rational::zero()),
            [(m, c)] if m.is_one() => Some(c.clone()),
            _ => None,
        }
    }

    /// True if the polynomial is a constant (zero included).
    #[must_use]
    pub fn is_val(&self) -> bool {
        match self.terms.as_slice() {
            [] => true,
            [(m, _)] => m.is_one(),
            _ => false,
        }
    }

    /// The leading term.
    #[must_use]
    pub fn leading_term(&self) -> Option<&(Monomial, Rational)> {
        self.terms.first()
    }

    /// The leading monomial.
    #[must_use]
    pub fn leading_monomial(&self) -> Option<&Monomial> {
        self.terms.first().map(|(m, _)| m)
    }

    /// The highest variable occurring in the polynomial.
    #[must_use]
    pub fn top_var(&self) -> Option<Var> {
        self.leading_monomial().and_then(Monomial::top_var)
    }

    /// Maximal total degree of a term.
    #[must_use]
    pub fn degree(&self) -> u32 {
        self.terms.iter().map(|(m, _)| m.degree()).max().unwrap_or(0)
    }

    /// Structural size: one node per term plus one per variable factor.
    #[must_use]
    pub fn tree_size(&self) -> usize {
        self.terms.iter().map(|(m, _)| 1 + m.factors().len()).sum()
    }

    /// The variables occurring in the polynomial, in increasing order.
    #[must_use]
    pub fn free_vars(&self) -> SmallVec<[Var; 8]> {
        let mut vars: SmallVec<[Var; 8]> = self.terms.iter().flat_map(|(m, _)| m.vars()).collect();
        vars.sort_unstable();
        vars.dedup();
        vars
    }

    /// True if the polynomial mentions `v`.
    #[must_use]
    pub fn contains_var(&self, v: Var) -> bool {
        self.terms.iter().any(|(m, _)| m.degree_of(v) > 0)
    }

    /// True if every term has degree at most one.
    #[must_use]
    pub fn is_linear(&self) -> bool {
        self.terms.iter().all(|(m, _)| m.degree() <= 1)
    }

    /// True if the polynomial is linear in at most two variables.
    #[must_use]
    pub fn is_binary(&self) -> bool {
        self.is_linear() && self.terms.iter().filter(|(m, _)| !m.is_one()).count() <= 2
    }

    /// Splits `p = x*hi + lo` for the top variable `x`: `lo` collects the
    /// terms free of `x`, `hi` the remaining terms divided by `x` once.
    #[must_use]
    pub fn split_top(&self) -> (Poly, Poly) {
        let Some(x) = self.top_var() else {
            return (Poly::zero(), self.clone());
        };
        let unit = Monomial::var(x);
        let mut hi = Vec::new();
        let mut lo = Vec::new();
        for (m, c) in &self.terms {
            match m.div(&unit) {
                Some(q) => hi.push((q, c.clone())),
                None => lo.push((m.clone(), c.clone())),
            }
        }
        (Self { terms: hi }, Self { terms: lo })
    }

    /// True if `p = c*x + lo` with `x` the top variable, `c` a nonzero
    /// constant and `lo` free of `x`.
    #[must_use]
    pub fn is_linear_in_top(&self) -> bool {
        match self.top_var() {
            Some(x) => self
                .terms
                .iter()
                .filter(|(m, _)| m.degree_of(x) > 0)
                .all(|(m, _)| m.is_var(x)),
            None => false,
        }
    }

    /// True if `v` occurs only in terms of the form `c*v`.
    #[must_use]
    pub fn var_is_leaf(&self, v: Var) -> bool {
        self.terms
            .iter()
            .filter(|(m, _)| m.degree_of(v) > 0)
            .all(|(m, _)| m.is_var(v))
    }

    /// Coefficient of the monomial `m`.
    #[must_use]
    pub fn coeff_of(&self, m: &Monomial) -> Rational {
        self.terms
            .binary_search_by(|(t, _)| m.cmp(t))
            .map_or_else(|_| Rational::zero(), |i| self.terms[i].1.clone())
    }

    /// Computes `self + c * m * other` by merging the sorted term lists.
    ///
    /// Multiplication by a monomial preserves the term order, so the result
    /// is canonical without re-sorting.
    #[must_use]
    pub fn add_scaled(&self, other: &Poly, m: &Monomial, c: &Rational) -> Poly {
        if c.is_zero() || other.is_zero() {
            return self.clone();
        }
        let mut terms = Vec::with_capacity(self.terms.len() + other.terms.len());
        let mut lhs = self.terms.iter().peekable();
        let mut rhs = other
            .terms
            .iter()
            .map(|(t, d)| (t.mul(m), d * c))
            .peekable();
        loop {
            let ord = match (lhs.peek(), rhs.peek()) {
                (Some((a, _)), Some((b, _))) => a.cmp(b),
                (Some(_), None) => Ordering::Greater,
                (None, Some(_)) => Ordering::Less,
                (None, None) => break,
            };
            match ord {
                Ordering::Greater => {
                    if let Some(t) = lhs.next() {
                        terms.push(t.clone());
                    }
                }
                Ordering::Less => {
                    if let Some(t) = rhs.next() {
                        terms.push(t);
                    }
                }
                Ordering::Equal => {
                    if let (Some((a, x)), Some((_, y))) = (lhs.next(), rhs.next()) {
                        let sum = x + &y;
                        if !sum.is_zero() {
                            terms.push((a.clone(), sum));
                        }
                    }
                }
            }
        }
        Poly { terms }
    }

    /// Sum.
    #[must_use]
    pub fn add(&self, other: &Poly) -> Poly {
        self.add_scaled(other, &Monomial::one(), &Rational::one())
    }

    /// Difference.
    #[must_use]
    pub fn sub(&self, other: &Poly) -> Poly {
        self.add_scaled(other, &Monomial::one(), &-Rational::one())
    }

    /// Product with `c * m`.
    #[must_use]
    pub fn mul_term(&self, m: &Monomial, c: &Rational) -> Poly {
        Poly::zero().add_scaled(self, m, c)
    }

    /// Product.
    #[must_use]
    pub fn mul(&self, other: &Poly) -> Poly {
        other
            .terms
            .iter()
            .fold(Poly::zero(), |acc, (m, c)| acc.add_scaled(self, m, c))
    }

    /// Evaluates at `point`, where `point[v]` is the value of variable `v`.
    /// Variables beyond the slice evaluate to zero.
    #[must_use]
    pub fn eval(&self, point: &[Rational]) -> Rational {
        let zero = Rational::zero();
        self.terms.iter().fold(Rational::zero(), |acc, (m, c)| {
            let value = m.factors().iter().fold(c.clone(), |v, &(x, e)| {
                &v * &point.get(x.index()).unwrap_or(&zero).pow(e)
            });
            acc + value
        })
    }
}
