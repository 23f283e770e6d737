//! # LALR(1) automaton construction
//!
//! [`AutomatonBuilder`] explores states from the start state with a
//! worklist. Every successor kernel is closed and looked up by its core
//! set: unseen cores become a new state, known cores merge their lookaheads
//! into the existing state, which is scheduled again if the merge added
//! anything. Construction stops when the worklist is empty, at which point
//! every lookahead has propagated to every state that can reach it.

use crate::item::Item;
use crate::state::{State, StateKey};
use crate::{Grammar, SetAnalysis};
use indexmap::IndexMap;
use lalrex::Symbol;
use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};

/// Order in which scheduled states are taken off the worklist.
///
/// The resulting automaton is the same for either order up to state
/// numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorklistOrder {
    /// Breadth-first; gives the conventional state numbering.
    #[default]
    Fifo,
    /// Depth-first.
    Lifo,
}

/// The finished state graph. State 0 is the start state.
#[derive(Debug, Clone)]
pub struct Automaton<'g> {
    states: Vec<State<'g>>,
    transitions: BTreeMap<(usize, Symbol), usize>,
}

impl<'g> Automaton<'g> {
    pub fn states(&self) -> &[State<'g>] {
        &self.states
    }

    pub fn state(&self, index: usize) -> Option<&State<'g>> {
        self.states.get(index)
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn transitions(&self) -> &BTreeMap<(usize, Symbol), usize> {
        &self.transitions
    }

    pub fn transition(&self, from: usize, symbol: Symbol) -> Option<usize> {
        self.transitions.get(&(from, symbol)).copied()
    }
}

pub struct AutomatonBuilder<'g> {
    grammar: &'g Grammar,
    sets: &'g SetAnalysis,
    order: WorklistOrder,
    states: IndexMap<StateKey, State<'g>>,
    transitions: BTreeMap<(usize, Symbol), usize>,
    worklist: VecDeque<(usize, Vec<Symbol>)>,
    pending: HashSet<usize>,
    merges: usize,
}

impl<'g> AutomatonBuilder<'g> {
    pub fn new(grammar: &'g Grammar, sets: &'g SetAnalysis) -> Self {
        Self {
            grammar,
            sets,
            order: WorklistOrder::default(),
            states: IndexMap::new(),
            transitions: BTreeMap::new(),
            worklist: VecDeque::new(),
            pending: HashSet::new(),
            merges: 0,
        }
    }

    pub fn with_order(mut self, order: WorklistOrder) -> Self {
        self.order = order;
        self
    }

    /// Computes the LR(1) *closure* of a kernel.
    ///
    /// For each item with a nonterminal `B` right after the dot, adds
    /// `B → • γ` for every production of `B`, with lookahead
    /// FIRST(rest after `B`, item lookahead). An item is expanded again only
    /// when it is new or its lookahead grew, so left-recursive and
    /// self-referencing productions terminate.
    ///
    /// # Parameters
    /// - `kernel`: Items to close over; duplicates merge.
    ///
    /// # Returns
    /// The closed state.
    pub fn closure(&self, kernel: Vec<Item<'g>>) -> State<'g> {
        let mut state = State::new();
        let mut queue: VecDeque<Item<'g>> = kernel.into();
        while let Some(item) = queue.pop_front() {
            let Some(pos) = state.add_item(item) else {
                continue;
            };
            let item = &state.items()[pos];
            let Some(next @ Symbol::NonTerm(_)) = item.next_symbol() else {
                continue;
            };
            let lookahead = self.sets.first_of(&item.remaining()[1..], item.lookahead());
            for prod in self.grammar.productions_of(next) {
                queue.push_back(Item::new(prod, lookahead.clone()));
            }
        }
        state
    }

    /// Kernel items of the successor of `state` on `symbol`; empty when
    /// `state` has no item expecting `symbol`.
    pub fn goto(&self, state: usize, symbol: Symbol) -> Vec<Item<'g>> {
        self.states
            .get_index(state)
            .map(|(_, s)| s.advance_on(symbol))
            .unwrap_or_default()
    }

    /// Builds state 0 from the start symbol's productions, each with
    /// lookahead `{$}`.
    pub fn build_start_state(&mut self) -> usize {
        if !self.states.is_empty() {
            return 0;
        }
        let lookahead = BTreeSet::from([Symbol::End]);
        let kernel = self
            .grammar
            .productions_of(self.grammar.start())
            .map(|prod| Item::new(prod, lookahead.clone()))
            .collect();
        self.build_state(kernel)
    }

    /// Closes `kernel` and registers the result.
    ///
    /// # Returns
    /// The index of the new state, or of the existing state with the same
    /// core set after merging lookaheads into it.
    pub fn build_state(&mut self, kernel: Vec<Item<'g>>) -> usize {
        let state = self.closure(kernel);
        let key = state.key();
        let merged = self
            .states
            .get_full_mut(&key)
            .map(|(index, _, existing)| (index, existing.merge(&state)));
        match merged {
            Some((index, changed)) => {
                if changed {
                    self.merges += 1;
                    log::trace!("State {} gained lookaheads", index);
                    self.enqueue(index);
                }
                index
            }
            None => {
                let (index, _) = self.states.insert_full(key, state);
                log::trace!("New state {}", index);
                self.enqueue(index);
                index
            }
        }
    }

    /// Runs construction to completion.
    pub fn build(mut self) -> Automaton<'g> {
        self.build_start_state();
        while let Some((index, symbols)) = self.next_pending() {
            for symbol in symbols {
                let kernel = self.goto(index, symbol);
                if kernel.is_empty() {
                    continue;
                }
                let target = self.build_state(kernel);
                self.transitions.insert((index, symbol), target);
            }
        }
        log::debug!(
            "Automaton: {} states, {} transitions, {} lookahead merges",
            self.states.len(),
            self.transitions.len(),
            self.merges
        );
        Automaton {
            states: self.states.into_values().collect(),
            transitions: self.transitions,
        }
    }

    fn enqueue(&mut self, index: usize) {
        if !self.pending.insert(index) {
            return;
        }
        let symbols = self
            .states
            .get_index(index)
            .map(|(_, s)| s.next_symbols())
            .unwrap_or_default();
        self.worklist.push_back((index, symbols));
    }

    fn next_pending(&mut self) -> Option<(usize, Vec<Symbol>)> {
        let entry = match self.order {
            WorklistOrder::Fifo => self.worklist.pop_front(),
            WorklistOrder::Lifo => self.worklist.pop_back(),
        }?;
        self.pending.remove(&entry.0);
        Some(entry)
    }
}
