//! S-polynomials between a new equation and the processed set.

use grobsat_poly::PolyResult;
use tracing::trace;

use crate::equation::{EqId, EqState};
use crate::solver::Grobner;

impl Grobner<'_> {
    /// Superposes `id` with every processed equation, stopping once
    /// saturation is done. Returns `false` if some pair was skipped.
    pub(crate) fn superpose_all(&mut self, id: EqId) -> PolyResult<bool> {
        let targets = self.store.queue(EqState::Processed).to_vec();
        for target in targets {
            if self.done() {
                return Ok(false);
            }
            if self.store.is_in(target, EqState::Processed) {
                self.superpose(id, target)?;
            }
        }
        Ok(true)
    }

    /// Adds the S-polynomial of `a` and `b` unless their leading monomials
    /// are coprime, it is zero, or it is too complex.
    pub(crate) fn superpose(&mut self, a: EqId, b: EqId) -> PolyResult<()> {
        let Some(r) = self.m.try_spoly(self.store.poly(a), self.store.poly(b))? else {
            return Ok(());
        };
        if self.m.is_zero(r) {
            return Ok(());
        }
        if self.is_too_complex(r) {
            trace!(a = ?a, b = ?b, size = self.m.tree_size(r), "grobner superpose dropped");
            self.too_complex = true;
            return Ok(());
        }
        self.stats.superposed += 1;
        let dep = self.dep.join(self.store.dep(a), self.store.dep(b));
        trace!(a = ?a, b = ?b, spoly = %self.m.display(r), "grobner superpose");
        self.add_dep(r, dep);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::equation::EqState;
    use crate::solver::Grobner;
    use grobsat_core::ResLimit;
    use grobsat_poly::PolyManager;

    #[test]
    fn test_superpose_joins_dependencies() {
        let limit = ResLimit::new();
        let mut m = PolyManager::new();
        let x = m.mk_var_named("x");
        let y = m.mk_var_named("y");
        let px = m.var(x).unwrap();
        let py = m.var(y).unwrap();
        let xy = m.mul(px, py).unwrap();
        let p = m.add_val(xy, -1).unwrap();
        let q = m.mul(px, px).unwrap();

        let mut g = Grobner::new(&limit, &mut m);
        let d0 = g.dep_mut().leaf(0);
        let d1 = g.dep_mut().leaf(1);
        let a = g.add_with(p, d0).unwrap();
        let b = g.add_with(q, d1).unwrap();

        g.superpose(a, b).unwrap();
        assert_eq!(g.stats().superposed, 1);
        let pending = g.queue(EqState::ToSimplify);
        assert_eq!(pending.len(), 3);
        let s = g.equation(pending[2]).unwrap();
        assert_eq!(g.manager().display(s.poly()).to_string(), "-x");
        assert_eq!(g.dep().linearize(s.dep()), vec![0, 1]);

        // coprime leading monomials are skipped
        let y2 = g.manager_mut().mul(py, py).unwrap();
        let c = g.add(y2).unwrap();
        g.superpose(b, c).unwrap();
        assert_eq!(g.stats().superposed, 1);
    }

    #[test]
    fn test_superpose_drops_large_results() {
        let limit = ResLimit::new();
        let mut m = PolyManager::new();
        let x = m.mk_var_named("x");
        let y = m.mk_var_named("y");
        let px = m.var(x).unwrap();
        let py = m.var(y).unwrap();
        let xy = m.mul(px, py).unwrap();
        let p = m.add_val(xy, -1).unwrap();
        let q = m.mul(px, px).unwrap();

        let mut g = Grobner::new(&limit, &mut m);
        g.set_config(Config {
            expr_size_limit: 1,
            ..Config::default()
        });
        let a = g.add(p).unwrap();
        let b = g.add(q).unwrap();
        g.superpose(a, b).unwrap();
        assert_eq!(g.stats().superposed, 0);
        assert!(g.too_complex);
        assert_eq!(g.queue(EqState::ToSimplify).len(), 2);
    }
}
