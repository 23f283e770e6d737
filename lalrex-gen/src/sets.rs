//! # FIRST and nullable sets
//!
//! [`SetAnalysis`] computes, for every nonterminal, whether it derives the
//! empty string and which terminals can begin its derivations. Both are
//! least fixpoints reached by repeating full passes over all productions
//! until a pass changes nothing.

use crate::Grammar;
use lalrex::Symbol;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetAnalysis {
    nullable: Vec<bool>,
    first: Vec<BTreeSet<Symbol>>,
    passes: usize,
}

impl SetAnalysis {
    /// Runs the analysis to its fixpoint.
    ///
    /// # Parameters
    /// - `grammar`: A validated grammar.
    ///
    /// # Returns
    /// The nullable flags and FIRST sets for every nonterminal of `grammar`.
    pub fn new(grammar: &Grammar) -> Self {
        let n = grammar.symbols().nonterminal_count();
        let mut sets = Self {
            nullable: vec![false; n],
            first: vec![BTreeSet::new(); n],
            passes: 0,
        };
        while sets.pass(grammar) {}
        log::debug!(
            "FIRST/nullable sets settled after {} passes",
            sets.passes
        );
        sets
    }

    /// Performs one pass over every production, returning whether any set
    /// grew. A pass over settled sets returns `false`.
    pub fn pass(&mut self, grammar: &Grammar) -> bool {
        self.passes += 1;
        let mut changed = false;
        for prod in grammar.productions() {
            let Symbol::NonTerm(lhs) = prod.left else {
                continue;
            };
            let mut all_nullable = true;
            for &sym in &prod.right {
                match sym {
                    Symbol::NonTerm(id) => {
                        if id != lhs {
                            // Clone FIRST(sym) to avoid simultaneous borrow
                            let first_sym = self.first[id].clone();
                            for f in first_sym {
                                changed |= self.first[lhs].insert(f);
                            }
                        }
                        if !self.nullable[id] {
                            all_nullable = false;
                            break;
                        }
                    }
                    terminal => {
                        changed |= self.first[lhs].insert(terminal);
                        all_nullable = false;
                        break;
                    }
                }
            }
            if all_nullable && !self.nullable[lhs] {
                self.nullable[lhs] = true;
                changed = true;
            }
        }
        changed
    }

    /// Number of passes run so far, including the final unchanged one.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Terminals are never nullable.
    pub fn is_nullable(&self, symbol: Symbol) -> bool {
        match symbol {
            Symbol::NonTerm(id) => self.nullable.get(id).copied().unwrap_or(false),
            _ => false,
        }
    }

    /// FIRST set of a single symbol; `{t}` for a terminal `t`.
    pub fn first(&self, symbol: Symbol) -> BTreeSet<Symbol> {
        match symbol {
            Symbol::NonTerm(id) => self.first.get(id).cloned().unwrap_or_default(),
            terminal => BTreeSet::from([terminal]),
        }
    }

    /// FIRST of the sequence `symbols` followed by any of `follow`.
    ///
    /// Collects FIRST of each symbol up to and including the first
    /// non-nullable one; when every symbol is nullable (or `symbols` is
    /// empty) `follow` is added as well. This yields the lookahead set of
    /// items derived during closure.
    pub fn first_of(&self, symbols: &[Symbol], follow: &BTreeSet<Symbol>) -> BTreeSet<Symbol> {
        let mut out = BTreeSet::new();
        for &sym in symbols {
            match sym {
                Symbol::NonTerm(id) => {
                    if let Some(first) = self.first.get(id) {
                        out.extend(first.iter().copied());
                    }
                    if !self.is_nullable(sym) {
                        return out;
                    }
                }
                terminal => {
                    out.insert(terminal);
                    return out;
                }
            }
        }
        out.extend(follow.iter().copied());
        out
    }

    /// Every nullable nonterminal.
    pub fn nullable(&self) -> BTreeSet<Symbol> {
        self.nullable
            .iter()
            .enumerate()
            .filter(|(_, n)| **n)
            .map(|(id, _)| Symbol::NonTerm(id))
            .collect()
    }
}
