//! # Parser tables
//!
//! [`ParserTables`] is the build artifact handed from the generator to the
//! engine: for every automaton state, a transition row `symbol → state` and a
//! reduction row `lookahead → (left, pop-count)`. Tables are immutable once
//! built and can be shared read-only by any number of concurrent engines.
//!
//! Tables persist as JSON together with their [`SymbolTable`], so a grammar
//! only has to be processed once:
//!
//! ```rust
//! # use lalrex::{ParserTables, Reduction, Symbol, SymbolTable};
//! # use std::collections::BTreeMap;
//! # let mut symbols = SymbolTable::new();
//! # let a = symbols.intern_terminal("a");
//! # let s = symbols.intern_nonterminal("S");
//! # let tables = ParserTables::new(
//! #     symbols, s,
//! #     vec![BTreeMap::from([(a, 1)]), BTreeMap::new()],
//! #     vec![BTreeMap::new(), BTreeMap::from([(Symbol::End, Reduction { left: s, pop: 1 })])],
//! # ).unwrap();
//! let mut buf = Vec::new();
//! tables.to_writer(&mut buf).unwrap();
//! let loaded = ParserTables::from_reader(buf.as_slice()).unwrap();
//! assert_eq!(loaded, tables);
//! ```

use crate::{Symbol, SymbolTable, TableError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// A reduce action: replace the top `pop` stack entries with a `left` node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reduction {
    /// Left-hand side of the production being reduced.
    pub left: Symbol,
    /// Length of the production's right-hand side.
    pub pop: usize,
}

/// Transition and reduction tables for one grammar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserTables {
    symbols: SymbolTable,
    start: Symbol,
    transitions: Vec<BTreeMap<Symbol, usize>>,
    reductions: Vec<BTreeMap<Symbol, Reduction>>,
}

impl ParserTables {
    /// Assembles tables, checking that they are internally consistent.
    ///
    /// Row `i` of `transitions` and `reductions` describes state `i`; state 0
    /// is the start state.
    pub fn new(
        symbols: SymbolTable,
        start: Symbol,
        transitions: Vec<BTreeMap<Symbol, usize>>,
        reductions: Vec<BTreeMap<Symbol, Reduction>>,
    ) -> Result<Self, TableError> {
        let tables = Self {
            symbols,
            start,
            transitions,
            reductions,
        };
        tables.validate()?;
        Ok(tables)
    }

    /// Checks row counts, transition targets, symbol ranges and that every
    /// reduction produces a nonterminal.
    pub fn validate(&self) -> Result<(), TableError> {
        if self.transitions.is_empty() {
            return Err(TableError::Empty);
        }
        if self.transitions.len() != self.reductions.len() {
            return Err(TableError::RowMismatch {
                transitions: self.transitions.len(),
                reductions: self.reductions.len(),
            });
        }
        if !self.start.is_nonterminal() || !self.symbols.contains(self.start) {
            return Err(TableError::BadStart(self.start));
        }
        let n_states = self.transitions.len();
        for (state, row) in self.transitions.iter().enumerate() {
            for (&symbol, &target) in row {
                if !self.symbols.contains(symbol) {
                    return Err(TableError::UnknownSymbol { state, symbol });
                }
                if target >= n_states {
                    return Err(TableError::MissingState {
                        state,
                        symbol,
                        target,
                    });
                }
            }
        }
        for (state, row) in self.reductions.iter().enumerate() {
            for (&symbol, reduction) in row {
                if !symbol.is_terminal() {
                    return Err(TableError::NonTerminalLookahead { state, symbol });
                }
                if !reduction.left.is_nonterminal() {
                    return Err(TableError::TerminalReduction {
                        state,
                        symbol,
                        left: reduction.left,
                    });
                }
                for sym in [symbol, reduction.left] {
                    if !self.symbols.contains(sym) {
                        return Err(TableError::UnknownSymbol { state, symbol: sym });
                    }
                }
            }
        }
        Ok(())
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn start(&self) -> Symbol {
        self.start
    }

    pub fn state_count(&self) -> usize {
        self.transitions.len()
    }

    #[inline]
    pub fn transition(&self, state: usize, symbol: Symbol) -> Option<usize> {
        self.transitions.get(state)?.get(&symbol).copied()
    }

    #[inline]
    pub fn reduction(&self, state: usize, lookahead: Symbol) -> Option<Reduction> {
        self.reductions.get(state)?.get(&lookahead).copied()
    }

    /// Transition row of `state` (empty for unknown states).
    pub fn transitions(&self, state: usize) -> impl Iterator<Item = (Symbol, usize)> + '_ {
        self.transitions
            .get(state)
            .into_iter()
            .flat_map(|row| row.iter().map(|(&s, &t)| (s, t)))
    }

    /// Reduction row of `state` (empty for unknown states).
    pub fn reductions(&self, state: usize) -> impl Iterator<Item = (Symbol, Reduction)> + '_ {
        self.reductions
            .get(state)
            .into_iter()
            .flat_map(|row| row.iter().map(|(&s, &r)| (s, r)))
    }

    /// Every symbol for which `state` has a transition or a reduction.
    pub fn expected(&self, state: usize) -> BTreeSet<Symbol> {
        self.transitions(state)
            .map(|(s, _)| s)
            .chain(self.reductions(state).map(|(s, _)| s))
            .collect()
    }

    /// Terminals that are both shifted and reduced on in some state, as
    /// `(state, terminal)` pairs. The engine resolves these by reducing.
    pub fn shift_reduce_overlaps(&self) -> Vec<(usize, Symbol)> {
        let mut out = Vec::new();
        for (state, row) in self.reductions.iter().enumerate() {
            for symbol in row.keys() {
                if self
                    .transitions
                    .get(state)
                    .is_some_and(|shifts| shifts.contains_key(symbol))
                {
                    out.push((state, *symbol));
                }
            }
        }
        out
    }

    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), TableError> {
        serde_json::to_writer(writer, self)?;
        Ok(())
    }

    /// Reads and validates tables previously written by [`to_writer`](Self::to_writer).
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TableError> {
        let tables: Self = serde_json::from_reader(reader)?;
        tables.validate()?;
        Ok(tables)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), TableError> {
        let mut out = BufWriter::new(File::create(path)?);
        self.to_writer(&mut out)?;
        out.flush()?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        Self::from_reader(BufReader::new(File::open(path)?))
    }
}
