//! # LR(1) items
//!
//! An [`Item`] is a production with a marker (the *dot*) showing how much of
//! its right-hand side has been recognized, plus the set of terminals that
//! may follow once the production is reduced.
//!
//! For example, `E → E • + T  {$, )}` has consumed `E` and still expects
//! `+ T`; it may reduce before `$` or `)`.

use crate::Production;
use lalrex::Symbol;
use std::collections::BTreeSet;

/// Production index and dot position; the identity of an item within a
/// state, ignoring its lookahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Core {
    /// The index of the production in the grammar.
    pub prod: usize,
    /// The position of the dot within the production's right-hand side.
    pub dot: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item<'g> {
    prod: &'g Production,
    dot: usize,
    lookahead: BTreeSet<Symbol>,
}

impl<'g> Item<'g> {
    /// An item with the dot before the first right-hand symbol.
    pub fn new(prod: &'g Production, lookahead: BTreeSet<Symbol>) -> Self {
        Self {
            prod,
            dot: 0,
            lookahead,
        }
    }

    /// An item with an explicit dot position, clamped to the production
    /// length.
    pub fn with_dot(prod: &'g Production, dot: usize, lookahead: BTreeSet<Symbol>) -> Self {
        Self {
            prod,
            dot: dot.min(prod.right.len()),
            lookahead,
        }
    }

    pub fn production(&self) -> &'g Production {
        self.prod
    }

    pub fn left(&self) -> Symbol {
        self.prod.left
    }

    pub fn dot(&self) -> usize {
        self.dot
    }

    /// Right-hand symbols before the dot.
    pub fn consumed(&self) -> &'g [Symbol] {
        &self.prod.right[..self.dot]
    }

    /// Right-hand symbols after the dot.
    pub fn remaining(&self) -> &'g [Symbol] {
        &self.prod.right[self.dot..]
    }

    pub fn lookahead(&self) -> &BTreeSet<Symbol> {
        &self.lookahead
    }

    pub fn core(&self) -> Core {
        Core {
            prod: self.prod.id,
            dot: self.dot,
        }
    }

    #[inline]
    pub fn next_symbol(&self) -> Option<Symbol> {
        self.remaining().first().copied()
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.dot == self.prod.right.len()
    }

    /// Same left side, consumed and remaining symbols; lookaheads may differ.
    pub fn core_equals(&self, other: &Item<'_>) -> bool {
        self.left() == other.left()
            && self.consumed() == other.consumed()
            && self.remaining() == other.remaining()
    }

    /// Adds `other`'s lookaheads to this item's. Returns whether the set
    /// grew; items with different cores are left untouched.
    pub fn merge(&mut self, other: &Item<'_>) -> bool {
        debug_assert!(self.core_equals(other));
        if !self.core_equals(other) {
            return false;
        }
        let before = self.lookahead.len();
        self.lookahead.extend(other.lookahead.iter().copied());
        self.lookahead.len() != before
    }

    /// The item with the dot moved past the next symbol, keeping the
    /// lookahead. `None` for complete items.
    pub fn advance(&self) -> Option<Item<'g>> {
        if self.is_complete() {
            return None;
        }
        Some(Item {
            prod: self.prod,
            dot: self.dot + 1,
            lookahead: self.lookahead.clone(),
        })
    }
}
