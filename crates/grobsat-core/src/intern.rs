//! Hash-consing tables.
//!
//! Every structurally distinct value is stored exactly once and named by a
//! dense `u32` id. Polynomials and justifications are both interned this
//! way, so handle equality is structural equality.

use hashbrown::HashMap;
use rustc_hash::FxHasher;
use std::hash::{BuildHasherDefault, Hash};

type FxBuild = BuildHasherDefault<FxHasher>;

/// An interning table with an optional capacity budget.
#[derive(Debug, Clone)]
pub struct InternTable<T> {
    map: HashMap<T, u32, FxBuild>,
    values: Vec<T>,
    budget: usize,
}

impl<T: Clone + Eq + Hash> Default for InternTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Eq + Hash> InternTable<T> {
    /// Creates an empty table without a budget.
    #[must_use]
    pub fn new() -> Self {
        Self::with_budget(usize::MAX)
    }

    /// Creates an empty table that refuses to grow beyond `budget` entries.
    #[must_use]
    pub fn with_budget(budget: usize) -> Self {
        Self {
            map: HashMap::default(),
            values: Vec::new(),
            budget,
        }
    }

    /// Interns `value`, returning its id.
    ///
    /// Returns `None` only when `value` is new and the budget is exhausted.
    pub fn try_intern(&mut self, value: T) -> Option<u32> {
        if let Some(&id) = self.map.get(&value) {
            return Some(id);
        }
        if self.values.len() >= self.budget || self.values.len() >= u32::MAX as usize {
            return None;
        }
        let id = self.values.len() as u32;
        self.map.insert(value.clone(), id);
        self.values.push(value);
        Some(id)
    }

    /// Interns `value` whether or not the budget allows it. For tables
    /// that are never given a budget.
    ///
    /// # Panics
    ///
    /// Panics if the `u32` id space is exhausted.
    pub fn intern(&mut self, value: T) -> u32 {
        if let Some(&id) = self.map.get(&value) {
            return id;
        }
        let id = u32::try_from(self.values.len()).expect("intern table id space exhausted");
        self.map.insert(value.clone(), id);
        self.values.push(value);
        id
    }

    /// Gets a value by id.
    #[must_use]
    pub fn get(&self, id: u32) -> Option<&T> {
        self.values.get(id as usize)
    }

    /// Returns the id of an already interned value.
    #[must_use]
    pub fn id_of(&self, value: &T) -> Option<u32> {
        self.map.get(value).copied()
    }

    /// Number of interned values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if nothing has been interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The configured budget.
    #[must_use]
    pub fn budget(&self) -> usize {
        self.budget
    }

    /// Changes the budget. Existing entries are kept even if above it.
    pub fn set_budget(&mut self, budget: usize) {
        self.budget = budget;
    }
}
