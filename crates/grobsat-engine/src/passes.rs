//! Pre-simplification passes.
//!
//! The passes run before the fixpoint loop and eliminate variables that
//! are cheap to get rid of. Each pass reports whether it changed anything;
//! [`Grobner::simplify`] runs them in a fixed order until none fires.

use grobsat_poly::{Pdd, PolyResult, Var};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::debug;

use crate::equation::{EqId, EqState};
use crate::solver::Grobner;

/// Maps each variable to the pending and processed equations mentioning it.
#[derive(Debug, Default)]
pub(crate) struct UseList {
    uses: Vec<SmallVec<[EqId; 4]>>,
}

impl UseList {
    pub fn get(&self, v: Var) -> &[EqId] {
        self.uses.get(v.index()).map_or(&[][..], SmallVec::as_slice)
    }

    fn add(&mut self, id: EqId, vars: &[Var]) {
        for v in vars {
            if v.index() >= self.uses.len() {
                self.uses.resize_with(v.index() + 1, SmallVec::new);
            }
            self.uses[v.index()].push(id);
        }
    }

    fn remove(&mut self, id: EqId, vars: &[Var]) {
        for v in vars {
            if let Some(list) = self.uses.get_mut(v.index()) {
                list.retain(|e| *e != id);
            }
        }
    }
}

impl Grobner<'_> {
    /// One round of passes; `true` if any of them fired.
    pub(crate) fn simplify_pass(&mut self) -> PolyResult<bool> {
        Ok(self.simplify_linear_step(true)?
            || self.simplify_elim_pure_step()?
            || self.simplify_cc_step()?
            || self.simplify_leaf_step()?
            || self.simplify_linear_step(false)?
            || self.simplify_elim_dual_step()?)
    }

    pub(crate) fn get_use_list(&self) -> UseList {
        let mut uses = UseList::default();
        for state in [EqState::ToSimplify, EqState::Processed] {
            for &id in self.store.queue(state) {
                self.add_to_use(id, &mut uses);
            }
        }
        uses
    }

    pub(crate) fn add_to_use(&self, id: EqId, uses: &mut UseList) {
        uses.add(id, &self.m.free_vars(self.store.poly(id)));
    }

    pub(crate) fn remove_from_use(&self, id: EqId, uses: &mut UseList) {
        uses.remove(id, &self.m.free_vars(self.store.poly(id)));
    }

    fn pending(&self) -> Vec<EqId> {
        self.store.queue(EqState::ToSimplify).to_vec()
    }

    /// Moves an equation to `to_simplify` if it was processed and its
    /// leading term changed.
    fn requeue_if_changed(&mut self, id: EqId, changed: bool) {
        if changed && self.store.state(id) == EqState::Processed {
            self.pop_equation(id);
            self.push_equation(EqState::ToSimplify, id);
        }
    }

    /// Moves `id` to `solved` and rewrites the processed equations with it.
    fn solve(&mut self, id: EqId) -> PolyResult<()> {
        self.pop_equation(id);
        self.push_equation(EqState::Solved, id);
        self.simplify_queue_using(EqState::Processed, id)
    }

    fn top_of(&self, id: EqId) -> Option<Var> {
        self.m.top_var(self.store.poly(id))
    }

    /// True for `c*x + r` with constant `c`, `x` the top variable and `r`
    /// free of `x`.
    fn isolates_top(&self, id: EqId) -> bool {
        self.m.hi_is_val(self.store.poly(id))
    }

    /// Gaussian elimination with linear pending equations.
    ///
    /// Sources are taken in increasing order of their top variable and
    /// substituted into every user of that variable; in the general round
    /// only linear users are touched. Sources that survive move to
    /// `solved` and then rewrite the processed equations, which the general
    /// round skipped if they were non-linear.
    pub(crate) fn simplify_linear_step(&mut self, binary: bool) -> PolyResult<bool> {
        let mut linear: Vec<EqId> = self
            .pending()
            .into_iter()
            .filter(|&id| {
                let p = self.store.poly(id);
                if binary {
                    self.m.is_binary(p)
                } else {
                    self.m.is_linear(p)
                }
            })
            .collect();
        if linear.is_empty() {
            return Ok(false);
        }
        linear.sort_by_key(|&id| self.top_of(id));

        let mut uses = self.get_use_list();
        let mut trivial = Vec::new();
        let mut sources = Vec::new();
        let mut has_conflict = false;
        'sources: for src in linear {
            if !self.store.is_in(src, EqState::ToSimplify) || self.is_trivial(src) {
                continue;
            }
            let Some(v) = self.top_of(src) else {
                continue;
            };
            let users: SmallVec<[EqId; 8]> = uses.get(v).iter().copied().collect();
            for dst in users {
                if dst == src || !self.store.is_live(dst) || self.is_trivial(dst) {
                    continue;
                }
                if !binary && !self.m.is_linear(self.store.poly(dst)) {
                    continue;
                }
                self.remove_from_use(dst, &mut uses);
                let changed = self.simplify_using(dst, src)?;
                if self.is_trivial(dst) {
                    trivial.push(dst);
                    continue;
                }
                if self.is_conflict(dst) {
                    self.pop_equation(dst);
                    self.set_conflict(dst);
                    has_conflict = true;
                    break 'sources;
                }
                self.requeue_if_changed(dst, changed);
                self.add_to_use(dst, &mut uses);
            }
            sources.push(src);
        }
        if !has_conflict {
            for &src in &sources {
                if self.store.is_in(src, EqState::ToSimplify) && !self.is_trivial(src) {
                    self.solve(src)?;
                }
            }
        }
        for id in trivial {
            if self.store.is_live(id) {
                self.del_equation(id);
            }
        }
        let fired = !sources.is_empty() || has_conflict;
        if fired {
            debug!(binary, sources = sources.len(), has_conflict, "grobner linear elimination");
        }
        Ok(fired)
    }

    /// Solves `c*x + r` when `x` occurs in no other equation.
    pub(crate) fn simplify_elim_pure_step(&mut self) -> PolyResult<bool> {
        let mut uses = self.get_use_list();
        let mut fired = 0usize;
        for id in self.pending() {
            let Some(v) = self.top_of(id) else {
                continue;
            };
            if self.isolates_top(id) && uses.get(v).len() == 1 {
                self.remove_from_use(id, &mut uses);
                self.solve(id)?;
                fired += 1;
            }
        }
        if fired > 0 {
            debug!(solved = fired, "grobner pure elimination");
        }
        Ok(fired > 0)
    }

    /// Replaces `r*y + q` by its difference with an earlier `a*x + q`
    /// sharing the non-constant remainder `q`, when one of the two has a
    /// constant top coefficient.
    pub(crate) fn simplify_cc_step(&mut self) -> PolyResult<bool> {
        let mut los: FxHashMap<Pdd, EqId> = FxHashMap::default();
        let mut fired = false;
        for id in self.pending() {
            if self.done() {
                break;
            }
            if !self.store.is_in(id, EqState::ToSimplify) {
                continue;
            }
            let p = self.store.poly(id);
            let lo = self.m.lo(p)?;
            if self.m.is_val(lo) {
                continue;
            }
            let other = *los.entry(lo).or_insert(id);
            if other == id
                || !self.store.is_in(other, EqState::ToSimplify)
                || !(self.isolates_top(id) || self.isolates_top(other))
            {
                continue;
            }
            let q = self.store.poly(other);
            let diff = self.m.sub(p, q)?;
            let dep = self.dep.join(self.store.dep(id), self.store.dep(other));
            self.rewrite(id, diff, dep);
            self.update_stats_max_degree_and_size(id);
            fired = true;
            if self.is_trivial(id) {
                self.del_equation(id);
            } else if self.is_conflict(id) {
                self.pop_equation(id);
                self.set_conflict(id);
            }
        }
        if fired {
            debug!("grobner common remainder");
        }
        Ok(fired)
    }

    /// Eliminates `x` with `c*x + r` from every equation where `x` only
    /// occurs in terms `a*x`.
    pub(crate) fn simplify_leaf_step(&mut self) -> PolyResult<bool> {
        let mut uses = self.get_use_list();
        for id in self.pending() {
            if !self.store.is_in(id, EqState::ToSimplify) || !self.isolates_top(id) {
                continue;
            }
            let Some(v) = self.top_of(id) else {
                continue;
            };
            let leaves: SmallVec<[EqId; 8]> = uses
                .get(v)
                .iter()
                .copied()
                .filter(|&e| e != id && self.m.var_is_leaf(self.store.poly(e), v))
                .collect();
            if leaves.is_empty() {
                continue;
            }
            debug!(eq = ?id, leaves = leaves.len(), "grobner leaf elimination");
            for e in leaves {
                self.remove_from_use(e, &mut uses);
                let changed = self.simplify_using(e, id)?;
                if self.is_trivial(e) {
                    self.del_equation(e);
                } else if self.is_conflict(e) {
                    self.pop_equation(e);
                    self.set_conflict(e);
                    return Ok(true);
                } else {
                    self.requeue_if_changed(e, changed);
                    self.add_to_use(e, &mut uses);
                }
            }
            return Ok(true);
        }
        Ok(false)
    }

    /// Solves `c*x + r` when `x` occurs in exactly one other equation,
    /// after eliminating `x` from that equation.
    pub(crate) fn simplify_elim_dual_step(&mut self) -> PolyResult<bool> {
        let mut uses = self.get_use_list();
        let mut fired = false;
        for id in self.pending() {
            if self.done() {
                break;
            }
            if !self.store.is_in(id, EqState::ToSimplify)
                || self.is_trivial(id)
                || !self.isolates_top(id)
            {
                continue;
            }
            let Some(v) = self.top_of(id) else {
                continue;
            };
            let users = uses.get(v);
            if users.len() != 2 {
                continue;
            }
            let Some(&other) = users.iter().find(|&&e| e != id) else {
                continue;
            };
            self.remove_from_use(other, &mut uses);
            let changed = self.simplify_using(other, id)?;
            if self.is_trivial(other) {
                self.del_equation(other);
            } else if self.is_conflict(other) {
                self.pop_equation(other);
                self.set_conflict(other);
            } else {
                self.requeue_if_changed(other, changed);
                self.add_to_use(other, &mut uses);
            }
            self.remove_from_use(id, &mut uses);
            self.solve(id)?;
            debug!(eq = ?id, other = ?other, "grobner dual elimination");
            fired = true;
        }
        Ok(fired)
    }
}
