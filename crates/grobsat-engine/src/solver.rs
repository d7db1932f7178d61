//! The saturation engine.
//!
//! [`Grobner`] owns the equation store and drives both search strategies
//! through one step control flow: pick an equation, simplify it against
//! the settled equations, check for triviality and conflict, back-simplify,
//! superpose, and reclassify.

use grobsat_core::{Dep, DepManager, ResLimit};
use grobsat_poly::{Pdd, PolyError, PolyManager, PolyResult};
use std::fmt;
use tracing::{debug, info, warn};

use crate::config::{Algorithm, Config};
use crate::equation::{EqId, EqState, Equation};
use crate::stats::GrobnerStats;
use crate::store::EqStore;
use crate::tuned::WatchLists;

/// Renders a justification inside [`Grobner`]'s `Display` output.
pub type PrintDep<'a> = Box<dyn Fn(Dep, &mut dyn fmt::Write) -> fmt::Result + 'a>;

/// How a saturation run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// No pending work is left.
    Saturated,
    /// An equation reduced to a nonzero constant.
    Conflict,
    /// Stopped with pending work left, or after cancellation, a dropped
    /// oversized result or memory exhaustion.
    Bounded,
}

/// Active search strategy. Watch lists only exist once tuned search has
/// been initialised.
#[derive(Debug, Default)]
pub(crate) enum Search {
    #[default]
    Basic,
    Tuned(WatchLists),
}

/// A Gröbner-basis saturation engine over a borrowed polynomial manager.
pub struct Grobner<'a> {
    pub(crate) m: &'a mut PolyManager,
    pub(crate) limit: &'a ResLimit,
    pub(crate) dep: DepManager,
    pub(crate) config: Config,
    pub(crate) store: EqStore,
    pub(crate) search: Search,
    pub(crate) stats: GrobnerStats,
    /// Set when a rewrite or S-polynomial was dropped for exceeding the
    /// size limit.
    pub(crate) too_complex: bool,
    pub(crate) mem_out: bool,
    print_dep: Option<PrintDep<'a>>,
}

impl<'a> Grobner<'a> {
    /// Creates an engine with the default configuration.
    pub fn new(limit: &'a ResLimit, m: &'a mut PolyManager) -> Self {
        Self {
            m,
            limit,
            dep: DepManager::new(),
            config: Config::default(),
            store: EqStore::default(),
            search: Search::Basic,
            stats: GrobnerStats::default(),
            too_complex: false,
            mem_out: false,
            print_dep: None,
        }
    }

    /// The current configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Replaces the configuration.
    pub fn set_config(&mut self, config: Config) {
        self.config = config;
    }

    /// The polynomial manager.
    #[must_use]
    pub fn manager(&self) -> &PolyManager {
        self.m
    }

    /// The polynomial manager, for building new polynomials.
    pub fn manager_mut(&mut self) -> &mut PolyManager {
        self.m
    }

    /// The dependency manager.
    #[must_use]
    pub fn dep(&self) -> &DepManager {
        &self.dep
    }

    /// The dependency manager, for creating fact leaves.
    pub fn dep_mut(&mut self) -> &mut DepManager {
        &mut self.dep
    }

    /// Sets the callback used to render justifications.
    pub fn set_print_dep(&mut self, f: impl Fn(Dep, &mut dyn fmt::Write) -> fmt::Result + 'a) {
        self.print_dep = Some(Box::new(f));
    }

    /// Drops every equation, the conflict, the watch lists and the
    /// counters. Configuration, print callback and dependency manager stay.
    pub fn reset(&mut self) {
        self.store.clear();
        self.search = Search::Basic;
        self.stats = GrobnerStats::default();
        self.too_complex = false;
        self.mem_out = false;
    }

    // === Adding equations ===

    /// Adds `p = 0` without a justification. Returns `None` for the zero
    /// polynomial, which is ignored.
    pub fn add(&mut self, p: Pdd) -> Option<EqId> {
        self.add_dep(p, None)
    }

    /// Adds `p = 0` justified by `dep`.
    pub fn add_with(&mut self, p: Pdd, dep: Dep) -> Option<EqId> {
        self.add_dep(p, Some(dep))
    }

    pub(crate) fn add_dep(&mut self, p: Pdd, dep: Option<Dep>) -> Option<EqId> {
        if self.m.is_zero(p) {
            return None;
        }
        let id = self.store.alloc(p, dep);
        self.update_stats_max_degree_and_size(id);
        if self.m.is_val(p) {
            self.set_conflict(id);
        } else {
            self.push_equation(EqState::ToSimplify, id);
        }
        Some(id)
    }

    // === Queries ===

    /// Live equations: solved first, then pending, then processed.
    pub fn equations(&self) -> impl Iterator<Item = &Equation> + '_ {
        self.store.iter()
    }

    /// The conflict equation, if one was derived.
    #[must_use]
    pub fn conflict(&self) -> Option<&Equation> {
        self.store.conflict.map(|id| self.store.eq(id))
    }

    /// An equation by id, unless it was retired.
    #[must_use]
    pub fn equation(&self, id: EqId) -> Option<&Equation> {
        self.store.get(id)
    }

    /// Ids in one queue, in queue order.
    #[must_use]
    pub fn queue(&self, state: EqState) -> &[EqId] {
        self.store.queue(state)
    }

    /// Classifies the engine's current state.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        if self.store.conflict.is_some() {
            Outcome::Conflict
        } else if self.mem_out
            || self.too_complex
            || self.canceled()
            || !self.store.queue(EqState::ToSimplify).is_empty()
        {
            Outcome::Bounded
        } else {
            Outcome::Saturated
        }
    }

    // === Saturation ===

    /// Runs the pre-simplification passes to a fixpoint.
    pub fn simplify(&mut self) {
        if let Err(e) = self.run_passes() {
            self.abort(&e);
        }
        self.invariant();
    }

    fn run_passes(&mut self) -> PolyResult<()> {
        while !self.done() && self.simplify_pass()? {
            self.invariant();
        }
        Ok(())
    }

    /// Simplifies, then steps until saturated, conflicting or bounded.
    pub fn saturate(&mut self) -> Outcome {
        self.simplify();
        match self.config.algorithm {
            Algorithm::Tuned if !self.mem_out => self.tuned_init(),
            Algorithm::Tuned => {}
            Algorithm::Basic => self.search = Search::Basic,
        }
        if !self.mem_out {
            if let Err(e) = self.run_steps() {
                self.abort(&e);
            }
        }
        self.invariant();
        let outcome = self.outcome();
        info!(
            ?outcome,
            steps = self.stats.steps,
            superposed = self.stats.superposed,
            solved = self.store.queue(EqState::Solved).len(),
            processed = self.store.queue(EqState::Processed).len(),
            "grobner saturate finished"
        );
        outcome
    }

    fn run_steps(&mut self) -> PolyResult<()> {
        while !self.done() && self.step()? {
            self.invariant();
        }
        Ok(())
    }

    fn step(&mut self) -> PolyResult<bool> {
        self.stats.steps += 1;
        if !self.limit.inc() {
            return Ok(false);
        }
        let picked = match self.search {
            Search::Basic => self.pick_next(),
            Search::Tuned(_) => self.tuned_pick_next(),
        };
        let Some(id) = picked else {
            return Ok(false);
        };
        debug!(
            step = self.stats.steps,
            eq = ?id,
            poly = %self.m.display(self.store.poly(id)),
            "grobner step"
        );
        let r = self.process(id);
        if self.store.get(id).is_some_and(|e| e.pos == usize::MAX) {
            self.reclassify(id);
        }
        r
    }

    /// The step body shared by both strategies. `id` is detached on entry;
    /// if it is still detached on exit, the caller reclassifies it.
    fn process(&mut self, id: EqId) -> PolyResult<bool> {
        self.simplify_using_set(id, &[EqState::Processed, EqState::Solved])?;
        if self.is_trivial(id) {
            self.store.retire(id);
            return Ok(true);
        }
        if self.check_conflict(id) {
            return Ok(false);
        }
        self.simplify_queue_using(EqState::Processed, id)?;
        if self.done() || !self.superpose_all(id)? {
            self.requeue_unless_conflict(id);
            return Ok(false);
        }
        match self.search {
            Search::Basic => self.simplify_queue_using(EqState::ToSimplify, id)?,
            Search::Tuned(_) => self.simplify_watch(id)?,
        }
        Ok(!self.done())
    }

    /// Puts an interrupted equation back so a later run superposes it.
    fn requeue_unless_conflict(&mut self, id: EqId) {
        if self.store.conflict.is_none() {
            self.push_equation(EqState::ToSimplify, id);
        }
    }

    /// Settles a detached equation: equations isolating their top variable
    /// become rewrite rules, everything else is processed.
    fn reclassify(&mut self, id: EqId) {
        let state = if self.m.hi_is_val(self.store.poly(id)) {
            EqState::Solved
        } else {
            EqState::Processed
        };
        self.push_equation(state, id);
    }

    fn pick_next(&mut self) -> Option<EqId> {
        let mut best: Option<EqId> = None;
        for &id in self.store.queue(EqState::ToSimplify) {
            if best.map_or(true, |b| self.is_simpler(id, b)) {
                best = Some(id);
            }
        }
        let id = best?;
        self.pop_equation(id);
        Some(id)
    }

    pub(crate) fn is_simpler(&self, a: EqId, b: EqId) -> bool {
        self.m.lt(self.store.poly(a), self.store.poly(b))
    }

    // === Bounds and conflicts ===

    /// True once saturation must stop.
    #[must_use]
    pub fn done(&self) -> bool {
        self.threshold_reached() || self.canceled() || self.store.conflict.is_some()
    }

    fn threshold_reached(&self) -> bool {
        self.store.num_pending() >= self.config.eqs_threshold
    }

    pub(crate) fn canceled(&self) -> bool {
        self.limit.is_canceled()
    }

    pub(crate) fn is_too_complex(&self, p: Pdd) -> bool {
        self.m.tree_size(p) > self.config.expr_size_limit
    }

    pub(crate) fn is_trivial(&self, id: EqId) -> bool {
        self.m.is_zero(self.store.poly(id))
    }

    pub(crate) fn is_conflict(&self, id: EqId) -> bool {
        let p = self.store.poly(id);
        self.m.is_val(p) && !self.m.is_zero(p)
    }

    /// Records a detached constant equation as the conflict.
    pub(crate) fn set_conflict(&mut self, id: EqId) {
        debug!(eq = ?id, "grobner conflict");
        self.store.conflict = Some(id);
        self.push_equation(EqState::Solved, id);
    }

    /// Records a detached equation as the conflict if it is one.
    pub(crate) fn check_conflict(&mut self, id: EqId) -> bool {
        if self.is_conflict(id) {
            self.set_conflict(id);
            true
        } else {
            false
        }
    }

    /// Stops after the polynomial manager failed. Watch lists are dropped
    /// and the live queues are purged of trivial equations.
    fn abort(&mut self, e: &PolyError) {
        match e {
            PolyError::MemOut { .. } => info!(error = %e, "grobner memory out"),
            PolyError::UnknownVariable(_) => warn!(error = %e, "grobner aborted"),
        }
        self.mem_out = true;
        self.search = Search::Basic;
        for state in [EqState::ToSimplify, EqState::Processed] {
            let trivial: Vec<EqId> = self
                .store
                .queue(state)
                .iter()
                .copied()
                .filter(|&id| self.is_trivial(id))
                .collect();
            for id in trivial {
                self.store.del(id);
            }
        }
    }

    // === Queue transitions ===

    /// Appends a detached equation to a queue, watching it if it is pending
    /// and tuned search is active.
    pub(crate) fn push_equation(&mut self, state: EqState, id: EqId) {
        self.store.push(state, id);
        if state == EqState::ToSimplify {
            self.add_to_watch(id);
        }
    }

    /// Detaches an equation from its queue and any watch list.
    pub(crate) fn pop_equation(&mut self, id: EqId) {
        self.unwatch(id);
        self.store.pop(id);
    }

    /// Pops and retires.
    pub(crate) fn del_equation(&mut self, id: EqId) {
        self.pop_equation(id);
        self.store.retire(id);
    }

    /// Replaces an equation's polynomial and justification, moving it to the
    /// right watch list when its top variable changed.
    pub(crate) fn rewrite(&mut self, id: EqId, poly: Pdd, dep: Option<Dep>) {
        let old_top = self.m.top_var(self.store.poly(id));
        self.store.rewrite(id, poly, dep);
        if self.store.is_in(id, EqState::ToSimplify) && self.m.top_var(poly) != old_top {
            self.unwatch(id);
            self.add_to_watch(id);
        }
    }

    // === Debug checks ===

    #[cfg(debug_assertions)]
    pub(crate) fn invariant(&self) {
        for state in [EqState::ToSimplify, EqState::Processed, EqState::Solved] {
            for (pos, &id) in self.store.queue(state).iter().enumerate() {
                let e = self.store.eq(id);
                assert_eq!(e.state, state, "{id:?} is in the wrong queue");
                assert_eq!(e.pos, pos, "{id:?} has a stale position");
                if state != EqState::Solved {
                    assert!(!self.m.is_val(e.poly), "{id:?} is constant but pending");
                }
            }
        }
        for e in self.store.slots() {
            assert_ne!(e.pos, usize::MAX, "{:?} is live but detached", e.id);
        }
        for &id in self.store.queue(EqState::Solved) {
            let p = self.store.poly(id);
            assert!(
                Some(id) == self.store.conflict || self.m.hi_is_val(p),
                "solved {id:?} does not isolate its top variable"
            );
        }
        if let Search::Tuned(w) = &self.search {
            w.check(self);
        }
    }

    #[cfg(not(debug_assertions))]
    pub(crate) fn invariant(&self) {}

    fn fmt_equation(&self, f: &mut fmt::Formatter<'_>, id: EqId) -> fmt::Result {
        let e = self.store.eq(id);
        write!(f, "  {:?}: {}", id, self.m.display(e.poly))?;
        if let Some(d) = e.dep {
            write!(f, " <- ")?;
            match &self.print_dep {
                Some(print) => print(d, &mut *f)?,
                None => write!(f, "{:?}", self.dep.linearize(Some(d)))?,
            }
        }
        writeln!(f)
    }
}

impl fmt::Display for Grobner<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, state) in [
            ("solved", EqState::Solved),
            ("to_simplify", EqState::ToSimplify),
            ("processed", EqState::Processed),
        ] {
            writeln!(f, "{name}")?;
            for &id in self.store.queue(state) {
                self.fmt_equation(f, id)?;
            }
        }
        if let Some(id) = self.store.conflict {
            writeln!(f, "conflict")?;
            self.fmt_equation(f, id)?;
        }
        writeln!(
            f,
            "steps: {} simplified: {} superposed: {} degree: {} size: {}",
            self.stats.steps,
            self.stats.simplified,
            self.stats.superposed,
            self.stats.max_expr_degree,
            self.stats.max_expr_size
        )
    }
}

impl fmt::Debug for Grobner<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grobner")
            .field("config", &self.config)
            .field("store", &self.store)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
