//! Equations `p = 0` and their lifecycle state.

use grobsat_core::Dep;
use grobsat_poly::Pdd;
use std::fmt;

/// Stable identifier of an equation within one engine.
///
/// Ids are handed out in creation order and never reused until the
/// engine is reset.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EqId(pub(crate) u32);

impl EqId {
    /// The raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for EqId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Which queue an equation lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EqState {
    /// Pending; not yet used to simplify others.
    ToSimplify,
    /// Inter-reduced and superposed against the other processed equations.
    Processed,
    /// A rewrite rule for its top variable, or the conflict.
    Solved,
}

/// A polynomial equality `poly = 0` with its justification.
#[derive(Clone, Debug)]
pub struct Equation {
    pub(crate) id: EqId,
    pub(crate) poly: Pdd,
    pub(crate) dep: Option<Dep>,
    pub(crate) state: EqState,
    pub(crate) pos: usize,
}

impl Equation {
    /// The equation's id.
    #[must_use]
    pub fn id(&self) -> EqId {
        self.id
    }

    /// The current polynomial.
    #[must_use]
    pub fn poly(&self) -> Pdd {
        self.poly
    }

    /// The justification; `None` when no external fact is involved.
    #[must_use]
    pub fn dep(&self) -> Option<Dep> {
        self.dep
    }

    /// The queue the equation is in.
    #[must_use]
    pub fn state(&self) -> EqState {
        self.state
    }
}
