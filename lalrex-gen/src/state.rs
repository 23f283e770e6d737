//! # Automaton states
//!
//! A [`State`] is a closed set of [`Item`]s. Items are kept unique by their
//! [`Core`]; adding an item whose core is already present merges its
//! lookaheads into the existing one instead. Two states with the same set of
//! cores are the same LALR(1) state, whatever their lookaheads.

use crate::item::{Core, Item};
use lalrex::Symbol;
use std::collections::{BTreeSet, HashMap};

/// Identity of a state: the set of its item cores.
pub type StateKey = BTreeSet<Core>;

#[derive(Debug, Clone, Default)]
pub struct State<'g> {
    items: Vec<Item<'g>>,
    index: HashMap<Core, usize>,
}

impl<'g> State<'g> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `item`, or merges its lookaheads into the item with the same
    /// core.
    ///
    /// # Returns
    /// The position of the affected item when it was inserted or its
    /// lookahead grew, `None` when nothing changed.
    pub fn add_item(&mut self, item: Item<'g>) -> Option<usize> {
        match self.index.get(&item.core()) {
            Some(&pos) => self.items[pos].merge(&item).then_some(pos),
            None => {
                let pos = self.items.len();
                self.index.insert(item.core(), pos);
                self.items.push(item);
                Some(pos)
            }
        }
    }

    pub fn items(&self) -> &[Item<'g>] {
        &self.items
    }

    pub fn item(&self, core: Core) -> Option<&Item<'g>> {
        self.index.get(&core).map(|&pos| &self.items[pos])
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn key(&self) -> StateKey {
        self.index.keys().copied().collect()
    }

    /// Merges the lookaheads of every item of `other` into this state.
    /// Returns whether any lookahead grew.
    pub fn merge(&mut self, other: &State<'g>) -> bool {
        let mut changed = false;
        for item in &other.items {
            changed |= self.add_item(item.clone()).is_some();
        }
        changed
    }

    /// Symbols after a dot, each once, in item order.
    pub fn next_symbols(&self) -> Vec<Symbol> {
        let mut seen = BTreeSet::new();
        self.items
            .iter()
            .filter_map(Item::next_symbol)
            .filter(|sym| seen.insert(*sym))
            .collect()
    }

    /// Kernel of the successor on `symbol`: every item expecting `symbol`,
    /// advanced past it.
    pub fn advance_on(&self, symbol: Symbol) -> Vec<Item<'g>> {
        self.items
            .iter()
            .filter(|item| item.next_symbol() == Some(symbol))
            .filter_map(Item::advance)
            .collect()
    }

    pub fn complete_items(&self) -> impl Iterator<Item = &Item<'g>> + '_ {
        self.items.iter().filter(|item| item.is_complete())
    }
}
