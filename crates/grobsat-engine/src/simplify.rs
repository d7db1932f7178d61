//! Rewriting equations by other equations.

use grobsat_poly::{Pdd, PolyResult};
use tracing::trace;

use crate::equation::{EqId, EqState};
use crate::solver::Grobner;

impl Grobner<'_> {
    /// Reduces `dst` by `src`.
    ///
    /// Returns `None` when nothing was rewritten: `dst` is `src`, the
    /// reduction left the polynomial unchanged, or the result exceeds the
    /// size limit. Otherwise returns whether the leading term of a
    /// processed `dst` changed.
    pub(crate) fn try_simplify_using(&mut self, dst: EqId, src: EqId) -> PolyResult<Option<bool>> {
        if dst == src {
            return Ok(None);
        }
        self.stats.simplified += 1;
        let old = self.store.poly(dst);
        let r = self.m.reduce(old, self.store.poly(src))?;
        if r == old {
            return Ok(None);
        }
        if self.is_too_complex(r) {
            self.too_complex = true;
            return Ok(None);
        }
        Ok(Some(self.apply_rewrite(dst, src, r)))
    }

    /// Reduces `dst` by `src` regardless of the size limit. Returns whether
    /// the leading term of a processed `dst` changed.
    pub(crate) fn simplify_using(&mut self, dst: EqId, src: EqId) -> PolyResult<bool> {
        if dst == src {
            return Ok(false);
        }
        self.stats.simplified += 1;
        let old = self.store.poly(dst);
        let r = self.m.reduce(old, self.store.poly(src))?;
        if r == old {
            return Ok(false);
        }
        Ok(self.apply_rewrite(dst, src, r))
    }

    fn apply_rewrite(&mut self, dst: EqId, src: EqId, r: Pdd) -> bool {
        let old = self.store.poly(dst);
        let changed = self.store.state(dst) == EqState::Processed
            && self.m.different_leading_term(r, old);
        let dep = self.dep.join(self.store.dep(dst), self.store.dep(src));
        trace!(
            dst = ?dst,
            src = ?src,
            from = %self.m.display(old),
            to = %self.m.display(r),
            "grobner rewrite"
        );
        self.rewrite(dst, r, dep);
        self.update_stats_max_degree_and_size(dst);
        changed
    }

    /// Reduces `id` by the equations of `states` until nothing changes or
    /// `id` becomes constant.
    pub(crate) fn simplify_using_set(&mut self, id: EqId, states: &[EqState]) -> PolyResult<()> {
        loop {
            let mut simplified = false;
            for &state in states {
                let srcs = self.store.queue(state).to_vec();
                for src in srcs {
                    if self.try_simplify_using(id, src)?.is_some() {
                        simplified = true;
                    }
                    if self.canceled() || self.m.is_val(self.store.poly(id)) {
                        return Ok(());
                    }
                }
            }
            if !simplified {
                return Ok(());
            }
        }
    }

    /// Reduces every equation of the `state` queue by `id`.
    ///
    /// Trivial results are retired and a constant result becomes the
    /// conflict. Processed equations whose leading term changed go back to
    /// `to_simplify`.
    pub(crate) fn simplify_queue_using(&mut self, state: EqState, id: EqId) -> PolyResult<()> {
        let targets = self.store.queue(state).to_vec();
        for target in targets {
            if self.done() {
                break;
            }
            if !self.store.is_in(target, state) {
                continue;
            }
            let Some(changed) = self.try_simplify_using(target, id)? else {
                continue;
            };
            if self.is_trivial(target) {
                self.del_equation(target);
            } else if self.is_conflict(target) {
                self.pop_equation(target);
                self.set_conflict(target);
            } else if changed {
                self.pop_equation(target);
                self.push_equation(EqState::ToSimplify, target);
            }
        }
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
    fn test_size_limit_blocks_rewrites() {
        let limit = ResLimit::new();
        let mut m = PolyManager::new();
        let y = m.mk_var_named("y");
        let x = m.mk_var_named("x");
        let px = m.var(x).unwrap();
        let py = m.var(y).unwrap();
        // x^2 reduced by x - y^2 gives y^4, which is larger than the limit
        let x2 = m.mul(px, px).unwrap();
        let y2 = m.mul(py, py).unwrap();
        let src = m.sub(px, y2).unwrap();

        let mut g = Grobner::new(&limit, &mut m);
        g.set_config(Config {
            expr_size_limit: 1,
            ..Config::default()
        });
        let a = g.add(x2).unwrap();
        let b = g.add(src).unwrap();
        assert_eq!(g.try_simplify_using(a, b).unwrap(), None);
        assert!(g.too_complex);
        assert_eq!(g.equation(a).unwrap().poly(), x2);

        // the pass form ignores the limit
        g.simplify_using(a, b).unwrap();
        let y4 = g.manager_mut().mul(y2, y2).unwrap();
        assert_eq!(g.equation(a).unwrap().poly(), y4);
        assert_eq!(g.stats().max_expr_degree, 4);
    }

    #[test]
    fn test_queue_simplification_requeues_changed_leading_terms() {
        let limit = ResLimit::new();
        let mut m = PolyManager::new();
        let x = m.mk_var_named("x");
        let y = m.mk_var_named("y");
        let px = m.var(x).unwrap();
        let py = m.var(y).unwrap();
        let xy = m.mul(px, py).unwrap();
        let p = m.add(xy, px).unwrap();
        let q = m.sub(py, px).unwrap();

        let mut g = Grobner::new(&limit, &mut m);
        let d0 = g.dep_mut().leaf(0);
        let d1 = g.dep_mut().leaf(1);
        let a = g.add_with(p, d0).unwrap();
        let b = g.add_with(q, d1).unwrap();
        g.pop_equation(a);
        g.push_equation(EqState::Processed, a);
        g.pop_equation(b);

        // x*y + x reduced by y - x gives x^2 + x: new leading term
        g.simplify_queue_using(EqState::Processed, b).unwrap();
        let e = g.equation(a).unwrap();
        assert_eq!(e.state(), EqState::ToSimplify);
        assert_eq!(g.dep().linearize(e.dep()), vec![0, 1]);
        assert!(g.queue(EqState::Processed).is_empty());
    }
}
