//! # Table construction
//!
//! Flattens an [`Automaton`] into [`ParserTables`]. Transitions copy over
//! unchanged. Each complete item `A → α •  L` contributes the reduction
//! `(A, |α|)` for every lookahead in `L`; two different reductions on one
//! lookahead in one state are a reduce/reduce conflict and fail the build.
//!
//! A terminal that is both shifted and reduced on in the same state is a
//! shift/reduce overlap. Overlaps are kept and logged: the engine tries
//! reductions before shifts, so the reduction wins at parse time.

use crate::state::State;
use crate::{Automaton, Grammar, GrammarError};
use lalrex::{ParserTables, Reduction, Symbol};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

pub struct TableBuilder<'a, 'g> {
    grammar: &'g Grammar,
    automaton: &'a Automaton<'g>,
}

impl<'a, 'g> TableBuilder<'a, 'g> {
    pub fn new(grammar: &'g Grammar, automaton: &'a Automaton<'g>) -> Self {
        Self { grammar, automaton }
    }

    /// Builds the transition and reduction rows for every state.
    ///
    /// # Errors
    /// [`GrammarError::ReduceReduceConflict`] for the first conflicting
    /// state and lookahead found, scanning states in order.
    pub fn build(&self) -> Result<ParserTables, GrammarError> {
        let n_states = self.automaton.state_count();
        let mut transitions = vec![BTreeMap::new(); n_states];
        for (&(from, symbol), &to) in self.automaton.transitions() {
            transitions[from].insert(symbol, to);
        }

        let mut reductions = Vec::with_capacity(n_states);
        let mut overlaps = 0;
        for (index, state) in self.automaton.states().iter().enumerate() {
            let row = self.reductions(index, state)?;
            for symbol in row.keys() {
                if transitions[index].contains_key(symbol) {
                    overlaps += 1;
                    log::debug!(
                        "Shift/reduce overlap in state {} on {}; reduce is preferred",
                        index,
                        self.grammar.name(*symbol)
                    );
                }
            }
            reductions.push(row);
        }
        log::debug!(
            "Tables: {} states, {} shift/reduce overlaps",
            n_states,
            overlaps
        );

        ParserTables::new(
            self.grammar.symbols().clone(),
            self.grammar.start(),
            transitions,
            reductions,
        )
        .map_err(|e| GrammarError::Tables(e.to_string().into()))
    }

    fn reductions(
        &self,
        index: usize,
        state: &State<'g>,
    ) -> Result<BTreeMap<Symbol, Reduction>, GrammarError> {
        let mut row: BTreeMap<Symbol, (Reduction, usize)> = BTreeMap::new();
        for item in state.complete_items() {
            let reduction = Reduction {
                left: item.left(),
                pop: item.consumed().len(),
            };
            let prod = item.production().id;
            for &lookahead in item.lookahead() {
                match row.entry(lookahead) {
                    Entry::Vacant(entry) => {
                        entry.insert((reduction, prod));
                    }
                    Entry::Occupied(entry) => {
                        let (existing, other) = *entry.get();
                        if existing != reduction {
                            return Err(self.conflict(index, lookahead, other, prod));
                        }
                    }
                }
            }
        }
        Ok(row.into_iter().map(|(sym, (r, _))| (sym, r)).collect())
    }

    fn conflict(&self, state: usize, lookahead: Symbol, first: usize, second: usize) -> GrammarError {
        let err = GrammarError::ReduceReduceConflict {
            state,
            lookahead: self.grammar.name(lookahead),
            first: self.grammar.production_to_string(first),
            second: self.grammar.production_to_string(second),
        };
        log::error!("{}", err);
        err
    }
}
