//! # grobsat
//!
//! Nonlinear equality saturation for arithmetic decision procedures.
//!
//! Callers assert polynomial equalities `p = 0`, each tagged with a fact,
//! and read back either a reduced, equivalent set of equalities or a
//! conflict whose justification names the facts responsible.
//!
//! ## Features
//!
//! - **Hash-consed polynomials**: exact rational coefficients, handles
//!   compared in constant time
//! - **Justifications**: a shared DAG of fact unions, flattened on demand
//! - **Two strategies**: exhaustive basic search or level-driven tuned search
//! - **Bounded runs**: cancellation, equation threshold, size limit and
//!   node budget
//!
//! ## Quick Start
//!
//! ```rust
//! use grobsat::prelude::*;
//!
//! let limit = ResLimit::new();
//! let mut m = PolyManager::new();
//! let x = m.mk_var_named("x");
//! let y = m.mk_var_named("y");
//! let (x, y) = (m.var(x).unwrap(), m.var(y).unwrap());
//! let xy = m.mul(x, y).unwrap();
//! let xy1 = m.add_val(xy, -1).unwrap();
//!
//! let mut g = Grobner::new(&limit, &mut m);
//! let d0 = g.dep_mut().leaf(0);
//! let d1 = g.dep_mut().leaf(1);
//! g.add_with(xy1, d0);
//! g.add_with(x, d1);
//! assert_eq!(g.saturate(), Outcome::Conflict);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use grobsat_core as core;
pub use grobsat_engine as engine;
pub use grobsat_poly as poly;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use grobsat_core::{Dep, DepManager, ResLimit, Statistics};
    pub use grobsat_engine::{Algorithm, Config, EqId, EqState, Equation, Grobner, Outcome};
    pub use grobsat_poly::{Pdd, PolyError, PolyManager, Rational, Var};
}
