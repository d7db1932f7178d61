//! # grobsat-engine
//!
//! Gröbner-basis saturation of polynomial equalities with justifications.
//!
//! This crate provides:
//! - An equation store with `to_simplify`, `processed` and `solved` queues
//! - Cheap pre-simplification passes (linear, pure, common remainder,
//!   leaf and dual elimination)
//! - A fixpoint loop with two strategies: a basic scan and a tuned search
//!   driven by watch lists over variable levels
//! - Bounding by cancellation, equation count, expression size and the
//!   polynomial manager's node budget
//!
//! ## Example
//!
//! ```
//! use grobsat_core::ResLimit;
//! use grobsat_engine::{Grobner, Outcome};
//! use grobsat_poly::PolyManager;
//!
//! let limit = ResLimit::new();
//! let mut m = PolyManager::new();
//! let x = m.mk_var_named("x");
//! let x = m.var(x).unwrap();
//! let p = m.add_val(x, -1).unwrap();
//! let q = m.add_val(x, -2).unwrap();
//!
//! let mut g = Grobner::new(&limit, &mut m);
//! let d0 = g.dep_mut().leaf(0);
//! let d1 = g.dep_mut().leaf(1);
//! g.add_with(p, d0);
//! g.add_with(q, d1);
//! assert_eq!(g.saturate(), Outcome::Conflict);
//! assert_eq!(g.dep().linearize(g.conflict().unwrap().dep()), vec![0, 1]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod equation;
mod passes;
mod simplify;
pub mod solver;
pub mod stats;
mod store;
mod superpose;
mod tuned;

#[cfg(test)]
mod proptests;

pub use config::{Algorithm, Config, ConfigError};
pub use equation::{EqId, EqState, Equation};
pub use solver::{Grobner, Outcome, PrintDep};
pub use stats::GrobnerStats;
