//! Engine counters.

use grobsat_core::Statistics;

use crate::equation::{EqId, EqState};
use crate::solver::Grobner;

/// Counters maintained while saturating.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GrobnerStats {
    /// Fixpoint steps taken.
    pub steps: u64,
    /// Reduction attempts.
    pub simplified: u64,
    /// S-polynomials added.
    pub superposed: u64,
    /// Largest total degree seen.
    pub max_expr_degree: u32,
    /// Largest tree size seen.
    pub max_expr_size: usize,
}

impl Grobner<'_> {
    /// The raw counters.
    #[must_use]
    pub fn stats(&self) -> &GrobnerStats {
        &self.stats
    }

    /// Adds this engine's counters and queue sizes to `st`.
    pub fn collect_statistics(&self, st: &mut Statistics) {
        st.update("grobner.steps", self.stats.steps);
        st.update("grobner.simplified", self.stats.simplified);
        st.update("grobner.superposed", self.stats.superposed);
        st.update("grobner.processed", self.store.queue(EqState::Processed).len() as u64);
        st.update("grobner.solved", self.store.queue(EqState::Solved).len() as u64);
        st.update(
            "grobner.to-simplify",
            self.store.queue(EqState::ToSimplify).len() as u64,
        );
        st.update("grobner.degree", u64::from(self.stats.max_expr_degree));
        st.update("grobner.size", self.stats.max_expr_size as u64);
    }

    pub(crate) fn update_stats_max_degree_and_size(&mut self, id: EqId) {
        let p = self.store.poly(id);
        self.stats.max_expr_degree = self.stats.max_expr_degree.max(self.m.degree(p));
        self.stats.max_expr_size = self.stats.max_expr_size.max(self.m.tree_size(p));
    }
}
