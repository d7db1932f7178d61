//! The polynomial manager.
//!
//! All polynomials live in one hash-consed table owned by a
//! [`PolyManager`] and are referred to by [`Pdd`] handles. Handle equality
//! is polynomial equality. The table has a node budget; exhausting it makes
//! every constructing operation fail with [`PolyError::MemOut`].

use grobsat_core::InternTable;
use num_traits::One;
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

use crate::monomial::{Monomial, Var};
use crate::poly::Poly;
use crate::rational::Rational;

/// A handle to a polynomial interned in a [`PolyManager`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pdd(u32);

impl Pdd {
    /// The raw table index.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Pdd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pdd({})", self.0)
    }
}

/// Errors raised by polynomial construction.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PolyError {
    /// The node budget is exhausted.
    #[error("polynomial table exhausted its budget of {budget} nodes")]
    MemOut {
        /// The configured budget.
        budget: usize,
    },

    /// A variable that was never created by this manager.
    #[error("unknown variable {0:?}")]
    UnknownVariable(Var),
}

/// Result alias for polynomial operations.
pub type PolyResult<T> = Result<T, PolyError>;

const ZERO: Pdd = Pdd(0);
const ONE: Pdd = Pdd(1);

/// Owner of all polynomials and variables.
#[derive(Debug)]
pub struct PolyManager {
    table: InternTable<Poly>,
    names: Vec<Option<String>>,
}

impl Default for PolyManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PolyManager {
    /// Creates a manager without a node budget.
    #[must_use]
    pub fn new() -> Self {
        let mut table = InternTable::new();
        // zero and one occupy the first two slots and are always available
        let zero = table.try_intern(Poly::zero());
        let one = table.try_intern(Poly::constant(Rational::one()));
        debug_assert_eq!((zero, one), (Some(ZERO.0), Some(ONE.0)));
        Self {
            table,
            names: Vec::new(),
        }
    }

    /// Creates a manager holding at most `budget` distinct polynomials.
    #[must_use]
    pub fn with_node_budget(budget: usize) -> Self {
        let mut m = Self::new();
        m.set_node_budget(budget);
        m
    }

    /// Changes the node budget.
    pub fn set_node_budget(&mut self, budget: usize) {
        self.table.set_budget(budget);
    }

    /// Number of interned polynomials.
    #[must_use]
    pub fn num_nodes(&self) -> usize {
        self.table.len()
    }

    fn intern(&mut self, p: Poly) -> PolyResult<Pdd> {
        self.table.try_intern(p).map(Pdd).ok_or(PolyError::MemOut {
            budget: self.table.budget(),
        })
    }

    /// The polynomial behind a handle.
    ///
    /// # Panics
    ///
    /// Panics if `p` was produced by a different manager.
    #[must_use]
    pub fn poly(&self, p: Pdd) -> &Poly {
        self.table
            .get(p.0)
            .expect("handle does not belong to this manager")
    }

    // === Variables ===

    /// Creates a fresh variable. Later variables have higher levels.
    pub fn mk_var(&mut self) -> Var {
        self.names.push(None);
        Var(self.names.len() as u32 - 1)
    }

    /// Creates a fresh variable with a display name.
    pub fn mk_var_named(&mut self, name: &str) -> Var {
        self.names.push(Some(name.to_string()));
        Var(self.names.len() as u32 - 1)
    }

    /// Number of variables created so far.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.names.len()
    }

    /// The display name of `v`.
    #[must_use]
    pub fn var_name(&self, v: Var) -> String {
        match self.names.get(v.index()) {
            Some(Some(name)) => name.clone(),
            _ => format!("v{}", v.0),
        }
    }

    /// Level of a variable; the top variable of a polynomial has the
    /// highest level among its variables.
    #[must_use]
    pub fn level(&self, v: Var) -> u32 {
        v.0
    }

    /// Variables indexed by level.
    #[must_use]
    pub fn level2var(&self) -> Vec<Var> {
        (0..self.names.len() as u32).map(Var).collect()
    }

    // === Constructors ===

    /// The zero polynomial.
    #[must_use]
    pub fn zero(&self) -> Pdd {
        ZERO
    }

    /// The constant one.
    #[must_use]
    pub fn one(&self) -> Pdd {
        ONE
    }

    /// A constant.
    pub fn val(&mut self, c: impl Into<Rational>) -> PolyResult<Pdd> {
        self.intern(Poly::constant(c.into()))
    }

    /// The polynomial `v`.
    pub fn var(&mut self, v: Var) -> PolyResult<Pdd> {
        if v.index() >= self.names.len() {
            return Err(PolyError::UnknownVariable(v));
        }
        self.intern(Poly::term(Monomial::var(v), Rational::one()))
    }

    /// The polynomial `c * m`.
    pub fn term(&mut self, m: Monomial, c: impl Into<Rational>) -> PolyResult<Pdd> {
        if let Some(v) = m.vars().find(|v| v.index() >= self.names.len()) {
            return Err(PolyError::UnknownVariable(v));
        }
        self.intern(Poly::term(m, c.into()))
    }

    /// Interns an arbitrary polynomial value.
    pub fn mk(&mut self, p: Poly) -> PolyResult<Pdd> {
        self.intern(p)
    }

    // === Arithmetic ===

    /// `a + b`.
    pub fn add(&mut self, a: Pdd, b: Pdd) -> PolyResult<Pdd> {
        let r = self.poly(a).add(self.poly(b));
        self.intern(r)
    }

    /// `a - b`.
    pub fn sub(&mut self, a: Pdd, b: Pdd) -> PolyResult<Pdd> {
        let r = self.poly(a).sub(self.poly(b));
        self.intern(r)
    }

    /// `a * b`.
    pub fn mul(&mut self, a: Pdd, b: Pdd) -> PolyResult<Pdd> {
        let r = self.poly(a).mul(self.poly(b));
        self.intern(r)
    }

    /// `-a`.
    pub fn neg(&mut self, a: Pdd) -> PolyResult<Pdd> {
        self.scale(a, &-Rational::one())
    }

    /// `c * a`.
    pub fn scale(&mut self, a: Pdd, c: &Rational) -> PolyResult<Pdd> {
        let r = self.poly(a).mul_term(&Monomial::one(), c);
        self.intern(r)
    }

    /// `a + c` for a constant `c`.
    pub fn add_val(&mut self, a: Pdd, c: impl Into<Rational>) -> PolyResult<Pdd> {
        let r = self.poly(a).add(&Poly::constant(c.into()));
        self.intern(r)
    }

    /// Reduces `a` by `b`: every term of `a` divisible by the leading
    /// monomial of `b` is cancelled with a multiple of `b`.
    ///
    /// Terms are scanned from the largest down. A cancellation only adds
    /// terms smaller than the cancelled one, so the scan never backtracks.
    pub fn reduce(&mut self, a: Pdd, b: Pdd) -> PolyResult<Pdd> {
        let Some((lm, lc)) = self.poly(b).leading_term().cloned() else {
            return Ok(a);
        };
        let divisor = self.poly(b).clone();
        let inv = lc.checked_recip().unwrap_or_else(Rational::one);
        let mut r = self.poly(a).clone();
        let mut start = 0;
        while let Some(offset) = r.terms()[start..]
            .iter()
            .position(|(m, _)| m.is_divisible_by(&lm))
        {
            let k = start + offset;
            let (m, c) = r.terms()[k].clone();
            let cofactor = m.div(&lm).unwrap_or_default();
            r = r.add_scaled(&divisor, &cofactor, &-(&c * &inv));
            start = k;
        }
        if r == *self.poly(a) {
            return Ok(a);
        }
        self.intern(r)
    }

    /// The S-polynomial of `a` and `b`, or `None` when their leading
    /// monomials are coprime or one of them is constant.
    pub fn try_spoly(&mut self, a: Pdd, b: Pdd) -> PolyResult<Option<Pdd>> {
        let (pa, pb) = (self.poly(a), self.poly(b));
        let (Some((ma, ca)), Some((mb, cb))) = (pa.leading_term(), pb.leading_term()) else {
            return Ok(None);
        };
        if ma.is_one() || mb.is_one() || ma.is_coprime(mb) {
            return Ok(None);
        }
        let lcm = ma.lcm(mb);
        let (Some(fa), Some(fb)) = (lcm.div(ma), lcm.div(mb)) else {
            return Ok(None);
        };
        let (Some(ia), Some(ib)) = (ca.checked_recip(), cb.checked_recip()) else {
            return Ok(None);
        };
        let r = Poly::zero()
            .add_scaled(pa, &fa, &ia)
            .add_scaled(pb, &fb, &-ib);
        self.intern(r).map(Some)
    }

    // === Queries ===

    /// True for the zero polynomial.
    #[must_use]
    pub fn is_zero(&self, p: Pdd) -> bool {
        p == ZERO
    }

    /// True for constants, zero included.
    #[must_use]
    pub fn is_val(&self, p: Pdd) -> bool {
        self.poly(p).is_val()
    }

    /// The constant value of `p`, if it is a constant.
    #[must_use]
    pub fn as_val(&self, p: Pdd) -> Option<Rational> {
        self.poly(p).as_val()
    }

    /// The highest variable occurring in `p`.
    #[must_use]
    pub fn top_var(&self, p: Pdd) -> Option<Var> {
        self.poly(p).top_var()
    }

    /// The leading monomial of `p`.
    #[must_use]
    pub fn leading_monomial(&self, p: Pdd) -> Option<&Monomial> {
        self.poly(p).leading_monomial()
    }

    /// `hi` of `p = x*hi + lo` for the top variable `x`.
    pub fn hi(&mut self, p: Pdd) -> PolyResult<Pdd> {
        let (hi, _) = self.poly(p).split_top();
        self.intern(hi)
    }

    /// `lo` of `p = x*hi + lo` for the top variable `x`.
    pub fn lo(&mut self, p: Pdd) -> PolyResult<Pdd> {
        let (_, lo) = self.poly(p).split_top();
        self.intern(lo)
    }

    /// True if `p = c*x + lo` with constant `c` and `x` the top variable.
    #[must_use]
    pub fn hi_is_val(&self, p: Pdd) -> bool {
        self.poly(p).is_linear_in_top()
    }

    /// True if every term of `p` has degree at most one.
    #[must_use]
    pub fn is_linear(&self, p: Pdd) -> bool {
        self.poly(p).is_linear()
    }

    /// True if `p` is linear in at most two variables.
    #[must_use]
    pub fn is_binary(&self, p: Pdd) -> bool {
        self.poly(p).is_binary()
    }

    /// True if `v` occurs in `p` only in terms `c*v`.
    #[must_use]
    pub fn var_is_leaf(&self, p: Pdd, v: Var) -> bool {
        self.poly(p).var_is_leaf(v)
    }

    /// Total degree.
    #[must_use]
    pub fn degree(&self, p: Pdd) -> u32 {
        self.poly(p).degree()
    }

    /// Structural size.
    #[must_use]
    pub fn tree_size(&self, p: Pdd) -> usize {
        self.poly(p).tree_size()
    }

    /// Variables of `p` in increasing order.
    #[must_use]
    pub fn free_vars(&self, p: Pdd) -> SmallVec<[Var; 8]> {
        self.poly(p).free_vars()
    }

    /// True if `a` and `b` have different leading monomials.
    #[must_use]
    pub fn different_leading_term(&self, a: Pdd, b: Pdd) -> bool {
        self.poly(a).leading_monomial() != self.poly(b).leading_monomial()
    }

    /// Total order on polynomials: term lists compared from the leading
    /// term down, monomials first, then coefficients; a proper prefix is
    /// smaller.
    #[must_use]
    pub fn compare(&self, a: Pdd, b: Pdd) -> Ordering {
        if a == b {
            return Ordering::Equal;
        }
        let (ta, tb) = (self.poly(a).terms(), self.poly(b).terms());
        for ((ma, ca), (mb, cb)) in ta.iter().zip(tb.iter()) {
            match ma.cmp(mb).then_with(|| ca.cmp(cb)) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        ta.len().cmp(&tb.len())
    }

    /// `compare(a, b) == Less`.
    #[must_use]
    pub fn lt(&self, a: Pdd, b: Pdd) -> bool {
        self.compare(a, b) == Ordering::Less
    }

    /// Evaluates `p` at `point` (indexed by variable).
    #[must_use]
    pub fn eval(&self, p: Pdd, point: &[Rational]) -> Rational {
        self.poly(p).eval(point)
    }

    /// A displayable view of `p` using the manager's variable names.
    #[must_use]
    pub fn display(&self, p: Pdd) -> PddDisplay<'_> {
        PddDisplay { m: self, p }
    }
}

/// Formats a polynomial as `3*x*y^2 - z + 1`.
pub struct PddDisplay<'a> {
    m: &'a PolyManager,
    p: Pdd,
}

impl fmt::Display for PddDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let poly = self.m.poly(self.p);
        if poly.is_zero() {
            return write!(f, "0");
        }
        for (k, (mono, c)) in poly.terms().iter().enumerate() {
            let magnitude = c.abs();
            match (k, c.is_negative()) {
                (0, true) => write!(f, "-")?,
                (0, false) => {}
                (_, true) => write!(f, " - ")?,
                (_, false) => write!(f, " + ")?,
            }
            if mono.is_one() {
                write!(f, "{magnitude}")?;
                continue;
            }
            if !magnitude.is_one() {
                write!(f, "{magnitude}*")?;
            }
            for (j, &(v, e)) in mono.factors().iter().rev().enumerate() {
                if j > 0 {
                    write!(f, "*")?;
                }
                write!(f, "{}", self.m.var_name(v))?;
                if e > 1 {
                    write!(f, "^{e}")?;
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for PddDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
