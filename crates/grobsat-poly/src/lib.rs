//! # grobsat-poly
//!
//! Hash-consed multivariate polynomials over the rationals.
//!
//! This crate provides:
//! - Exact rational coefficients backed by `dashu`
//! - Sparse monomials ordered lexicographically by variable level
//! - Canonical polynomial values ([`Poly`])
//! - A manager that interns polynomials behind [`Pdd`] handles and
//!   implements reduction and S-polynomials
//!
//! ## Term Order
//!
//! Monomials are compared by the exponent of the highest variable first.
//! The leading monomial of a polynomial therefore always contains its top
//! variable, and `p = x*hi + lo` splits cleanly on that variable.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod manager;
pub mod monomial;
pub mod poly;
pub mod rational;

#[cfg(test)]
mod proptests;

pub use manager::{Pdd, PddDisplay, PolyError, PolyManager, PolyResult};
pub use monomial::{Monomial, Var};
pub use poly::Poly;
pub use rational::Rational;
