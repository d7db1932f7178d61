//! The equation arena and its three queues.
//!
//! Every live equation is in exactly one queue, the one named by its state,
//! at the position it records. Removal is a swap-remove that patches the
//! position of the moved equation.

use grobsat_core::Dep;
use grobsat_poly::Pdd;

use crate::equation::{EqId, EqState, Equation};

#[derive(Debug, Default)]
pub(crate) struct EqStore {
    slots: Vec<Option<Equation>>,
    to_simplify: Vec<EqId>,
    processed: Vec<EqId>,
    solved: Vec<EqId>,
    pub(crate) conflict: Option<EqId>,
}

impl EqStore {
    /// Allocates a detached equation. It must be pushed onto a queue.
    pub fn alloc(&mut self, poly: Pdd, dep: Option<Dep>) -> EqId {
        let id = EqId(self.slots.len() as u32);
        self.slots.push(Some(Equation {
            id,
            poly,
            dep,
            state: EqState::ToSimplify,
            pos: usize::MAX,
        }));
        id
    }

    pub fn get(&self, id: EqId) -> Option<&Equation> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    /// The equation behind a live id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was retired.
    pub fn eq(&self, id: EqId) -> &Equation {
        self.get(id).expect("equation was retired")
    }

    fn eq_mut(&mut self, id: EqId) -> &mut Equation {
        self.slots[id.index()]
            .as_mut()
            .expect("equation was retired")
    }

    pub fn is_live(&self, id: EqId) -> bool {
        self.get(id).is_some()
    }

    pub fn poly(&self, id: EqId) -> Pdd {
        self.eq(id).poly
    }

    pub fn dep(&self, id: EqId) -> Option<Dep> {
        self.eq(id).dep
    }

    pub fn state(&self, id: EqId) -> EqState {
        self.eq(id).state
    }

    /// True if `id` is live and in `state`'s queue.
    pub fn is_in(&self, id: EqId, state: EqState) -> bool {
        self.get(id).is_some_and(|e| e.state == state && e.pos != usize::MAX)
    }

    pub fn rewrite(&mut self, id: EqId, poly: Pdd, dep: Option<Dep>) {
        let e = self.eq_mut(id);
        e.poly = poly;
        e.dep = dep;
    }

    pub fn queue(&self, state: EqState) -> &[EqId] {
        match state {
            EqState::ToSimplify => &self.to_simplify,
            EqState::Processed => &self.processed,
            EqState::Solved => &self.solved,
        }
    }

    fn queue_mut(&mut self, state: EqState) -> &mut Vec<EqId> {
        match state {
            EqState::ToSimplify => &mut self.to_simplify,
            EqState::Processed => &mut self.processed,
            EqState::Solved => &mut self.solved,
        }
    }

    /// Appends a detached equation to `state`'s queue.
    pub fn push(&mut self, state: EqState, id: EqId) {
        debug_assert_eq!(self.eq(id).pos, usize::MAX, "{id:?} is still queued");
        let queue = self.queue_mut(state);
        let pos = queue.len();
        queue.push(id);
        let e = self.eq_mut(id);
        e.state = state;
        e.pos = pos;
    }

    /// Detaches an equation from its queue.
    pub fn pop(&mut self, id: EqId) {
        let Equation { state, pos, .. } = *self.eq(id);
        debug_assert_ne!(pos, usize::MAX, "{id:?} is not queued");
        let queue = self.queue_mut(state);
        debug_assert_eq!(queue[pos], id);
        queue.swap_remove(pos);
        let moved = queue.get(pos).copied();
        if let Some(moved) = moved {
            self.eq_mut(moved).pos = pos;
        }
        self.eq_mut(id).pos = usize::MAX;
    }

    /// Frees a detached equation's slot. The id stays unused.
    pub fn retire(&mut self, id: EqId) {
        debug_assert_eq!(self.eq(id).pos, usize::MAX, "{id:?} is still queued");
        self.slots[id.index()] = None;
    }

    /// Pops and retires.
    pub fn del(&mut self, id: EqId) {
        self.pop(id);
        self.retire(id);
    }

    pub fn num_pending(&self) -> usize {
        self.to_simplify.len() + self.processed.len()
    }

    /// Live equations, solved first, then to_simplify, then processed.
    pub fn iter(&self) -> impl Iterator<Item = &Equation> + '_ {
        self.solved
            .iter()
            .chain(&self.to_simplify)
            .chain(&self.processed)
            .map(|&id| self.eq(id))
    }

    pub fn slots(&self) -> impl Iterator<Item = &Equation> + '_ {
        self.slots.iter().flatten()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
