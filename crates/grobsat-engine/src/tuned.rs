//! Tuned search: watch lists by top variable and a level frontier.
//!
//! Pending equations are grouped by their top variable. Picking starts at
//! the highest level that may still hold work (`levelp1 - 1`) and walks
//! down, so equations are settled from the top variable of the order
//! towards the bottom. Equations arriving above the frontier raise it.

use grobsat_poly::{PolyResult, Var};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::trace;

use crate::equation::{EqId, EqState};
use crate::solver::{Grobner, Search};

#[derive(Debug, Default)]
pub(crate) struct WatchLists {
    /// `lists[v]` holds the pending equations whose top variable is `v`.
    lists: Vec<SmallVec<[EqId; 4]>>,
    /// Where each watched equation is listed.
    watched: FxHashMap<EqId, Var>,
    level2var: Vec<Var>,
    var2level: Vec<u32>,
    /// One past the highest level that may hold pending equations.
    levelp1: usize,
}

impl WatchLists {
    fn level(&self, v: Var) -> usize {
        self.var2level.get(v.index()).map_or(v.index(), |&l| l as usize)
    }

    fn push(&mut self, id: EqId, v: Var) {
        if v.index() >= self.lists.len() {
            self.lists.resize_with(v.index() + 1, SmallVec::new);
        }
        self.lists[v.index()].push(id);
        self.watched.insert(id, v);
        let level = self.level(v);
        if level >= self.levelp1 {
            self.levelp1 = level + 1;
        }
    }

    fn remove(&mut self, id: EqId) {
        let Some(v) = self.watched.remove(&id) else {
            return;
        };
        let list = &mut self.lists[v.index()];
        if let Some(k) = list.iter().position(|&e| e == id) {
            list.swap_remove(k);
        }
    }

    /// Equations watching `v`.
    pub fn list(&self, v: Var) -> &[EqId] {
        self.lists.get(v.index()).map_or(&[][..], SmallVec::as_slice)
    }

    #[cfg(debug_assertions)]
    pub fn check(&self, g: &Grobner<'_>) {
        for &id in g.store.queue(EqState::ToSimplify) {
            let top = g.m.top_var(g.store.poly(id));
            assert_eq!(self.watched.get(&id).copied(), top, "{id:?} is watched at the wrong variable");
        }
        for (v, list) in self.lists.iter().enumerate() {
            for &id in list {
                assert!(g.store.is_in(id, EqState::ToSimplify), "watched {id:?} is not pending");
                assert_eq!(self.watched[&id].index(), v);
            }
        }
        assert_eq!(
            self.watched.len(),
            self.lists.iter().map(SmallVec::len).sum::<usize>()
        );
    }
}

impl Grobner<'_> {
    /// Switches to tuned search: copies the variable levels from the
    /// manager and watches every pending equation.
    pub(crate) fn tuned_init(&mut self) {
        let level2var = self.m.level2var();
        let mut var2level = vec![0; level2var.len()];
        for (level, v) in level2var.iter().enumerate() {
            var2level[v.index()] = level as u32;
        }
        let mut w = WatchLists {
            lists: vec![SmallVec::new(); level2var.len()],
            watched: FxHashMap::default(),
            levelp1: level2var.len(),
            level2var,
            var2level,
        };
        for &id in self.store.queue(EqState::ToSimplify) {
            if let Some(v) = self.m.top_var(self.store.poly(id)) {
                w.push(id, v);
            }
        }
        self.search = Search::Tuned(w);
    }

    /// Watches a pending equation under its top variable. Does nothing
    /// unless tuned search is active.
    pub(crate) fn add_to_watch(&mut self, id: EqId) {
        let Search::Tuned(w) = &mut self.search else {
            return;
        };
        if let Some(v) = self.m.top_var(self.store.poly(id)) {
            w.push(id, v);
        }
    }

    pub(crate) fn unwatch(&mut self, id: EqId) {
        if let Search::Tuned(w) = &mut self.search {
            w.remove(id);
        }
    }

    /// Pops the simplest equation at the highest unsettled level, lowering
    /// the frontier past empty levels.
    pub(crate) fn tuned_pick_next(&mut self) -> Option<EqId> {
        let Search::Tuned(w) = &mut self.search else {
            return None;
        };
        if w.level2var.len() < self.m.num_vars() {
            w.level2var = self.m.level2var();
        }
        while w.levelp1 > 0 {
            let v = w.level2var[w.levelp1 - 1];
            let mut best: Option<EqId> = None;
            for &id in w.list(v) {
                let simpler = best.map_or(true, |b| {
                    self.m.lt(self.store.poly(id), self.store.poly(b))
                });
                if simpler {
                    best = Some(id);
                }
            }
            if let Some(id) = best {
                self.pop_equation(id);
                return Some(id);
            }
            w.levelp1 -= 1;
        }
        None
    }

    /// Reduces every equation watching `id`'s top variable by `id`.
    pub(crate) fn simplify_watch(&mut self, id: EqId) -> PolyResult<()> {
        let Some(v) = self.m.top_var(self.store.poly(id)) else {
            return Ok(());
        };
        let targets: SmallVec<[EqId; 8]> = match &self.search {
            Search::Tuned(w) => w.list(v).iter().copied().collect(),
            Search::Basic => return Ok(()),
        };
        for target in targets {
            if self.done() {
                break;
            }
            if !self.store.is_in(target, EqState::ToSimplify)
                || self.try_simplify_using(target, id)?.is_none()
            {
                continue;
            }
            if self.is_trivial(target) {
                trace!(eq = ?target, "grobner watch retire");
                self.del_equation(target);
            } else if self.is_conflict(target) {
                self.pop_equation(target);
                self.set_conflict(target);
            }
        }
        Ok(())
    }
}
