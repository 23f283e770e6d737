//! # Symbols
//!
//! Grammar symbols are a closed set: every terminal and nonterminal declared
//! by a grammar is interned into a [`SymbolTable`] and referred to by a small
//! integer, wrapped in [`Symbol`] to keep the two kinds apart. The reserved
//! [`Symbol::End`] marks end of input.
//!
//! ```rust
//! # use lalrex::{Symbol, SymbolTable};
//! let mut symbols = SymbolTable::new();
//! let a = symbols.intern_terminal("a");
//! let s = symbols.intern_nonterminal("S");
//! assert_eq!(a, Symbol::Term(0));
//! assert_eq!(s, Symbol::NonTerm(0));
//! assert_eq!(symbols.lookup("S"), Some(s));
//! assert_eq!(symbols.name(Symbol::End), "$end");
//! ```

use indexmap::IndexSet;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smartstring::alias::String;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Name under which [`Symbol::End`] is displayed. Grammars may not declare it.
pub const END_NAME: &str = "$end";

/// An interned grammar symbol.
///
/// The ordering puts `End` first, then terminals, then nonterminals, each by
/// id; tables and sets rely on it only for deterministic iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    /// The implicit end-of-input marker appended to every token stream.
    End,
    /// A terminal (token type produced by the lexer).
    Term(usize),
    /// A nonterminal defined by productions.
    NonTerm(usize),
}

impl Symbol {
    /// `true` for terminals and for the end marker.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !self.is_nonterminal()
    }

    #[inline]
    pub fn is_nonterminal(&self) -> bool {
        matches!(self, Symbol::NonTerm(_))
    }
}

/// Compact, name-independent rendering: `$`, `t<id>`, `n<id>`.
///
/// This is the form used for persisted tables; use
/// [`SymbolTable::name`] for diagnostics.
impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::End => f.write_str("$"),
            Symbol::Term(id) => write!(f, "t{}", id),
            Symbol::NonTerm(id) => write!(f, "n{}", id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid symbol code {0:?}")]
pub struct SymbolParseError(pub std::string::String);

impl FromStr for Symbol {
    type Err = SymbolParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SymbolParseError(s.to_owned());
        if s == "$" {
            return Ok(Symbol::End);
        }
        let (kind, id) = s.split_at(s.char_indices().nth(1).map_or(s.len(), |(i, _)| i));
        let id: usize = id.parse().map_err(|_| invalid())?;
        match kind {
            "t" => Ok(Symbol::Term(id)),
            "n" => Ok(Symbol::NonTerm(id)),
            _ => Err(invalid()),
        }
    }
}

// Symbols key the JSON tables, so they serialize as strings.
impl Serialize for Symbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Symbol {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = std::string::String::deserialize(deserializer)?;
        code.parse().map_err(serde::de::Error::custom)
    }
}

/// Interns terminal and nonterminal names, assigning each a stable id in
/// insertion order.
///
/// Re-interning an existing name returns the existing symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolTable {
    terminals: IndexSet<String>,
    nonterminals: IndexSet<String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern_terminal(&mut self, name: &str) -> Symbol {
        let (id, _) = self.terminals.insert_full(String::from(name));
        Symbol::Term(id)
    }

    pub fn intern_nonterminal(&mut self, name: &str) -> Symbol {
        let (id, _) = self.nonterminals.insert_full(String::from(name));
        Symbol::NonTerm(id)
    }

    /// Looks a name up among terminals first, then nonterminals.
    pub fn lookup(&self, name: &str) -> Option<Symbol> {
        if name == END_NAME {
            return Some(Symbol::End);
        }
        self.terminal(name).or_else(|| self.nonterminal(name))
    }

    pub fn terminal(&self, name: &str) -> Option<Symbol> {
        self.terminals.get_index_of(name).map(Symbol::Term)
    }

    pub fn nonterminal(&self, name: &str) -> Option<Symbol> {
        self.nonterminals.get_index_of(name).map(Symbol::NonTerm)
    }

    /// Human-readable name of `symbol`; ids unknown to this table render as
    /// their compact code.
    pub fn name(&self, symbol: Symbol) -> std::borrow::Cow<'_, str> {
        let found = match symbol {
            Symbol::End => Some(END_NAME),
            Symbol::Term(id) => self.terminals.get_index(id).map(|s| s.as_str()),
            Symbol::NonTerm(id) => self.nonterminals.get_index(id).map(|s| s.as_str()),
        };
        match found {
            Some(name) => name.into(),
            None => symbol.to_string().into(),
        }
    }

    /// Whether `symbol` was interned here (`End` is always known).
    pub fn contains(&self, symbol: Symbol) -> bool {
        match symbol {
            Symbol::End => true,
            Symbol::Term(id) => id < self.terminals.len(),
            Symbol::NonTerm(id) => id < self.nonterminals.len(),
        }
    }

    pub fn terminal_count(&self) -> usize {
        self.terminals.len()
    }

    pub fn nonterminal_count(&self) -> usize {
        self.nonterminals.len()
    }

    pub fn terminals(&self) -> impl Iterator<Item = Symbol> + '_ {
        (0..self.terminals.len()).map(Symbol::Term)
    }

    pub fn nonterminals(&self) -> impl Iterator<Item = Symbol> + '_ {
        (0..self.nonterminals.len()).map(Symbol::NonTerm)
    }

    /// Renders a set of symbols as `{a, b, c}` using names.
    pub fn names<'a, I>(&self, symbols: I) -> std::string::String
    where
        I: IntoIterator<Item = &'a Symbol>,
    {
        let names: Vec<_> = symbols.into_iter().map(|s| self.name(*s)).collect();
        format!("{{{}}}", names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_is_empty() {
        let st = SymbolTable::new();
        assert_eq!(st.lookup("anything"), None);
        assert_eq!(st.terminal_count(), 0);
        assert_eq!(st.nonterminal_count(), 0);
    }

    #[test]
    fn intern_and_retrieve() {
        let mut st = SymbolTable::new();
        let foo = st.intern_terminal("foo");
        let bar = st.intern_terminal("bar");
        let expr = st.intern_nonterminal("Expr");
        assert_eq!(foo, Symbol::Term(0));
        assert_eq!(bar, Symbol::Term(1));
        assert_eq!(expr, Symbol::NonTerm(0));
        assert_eq!(st.name(bar), "bar");
        assert_eq!(st.name(expr), "Expr");
        assert_eq!(st.lookup("Expr"), Some(expr));
    }

    #[test]
    fn duplicate_intern_returns_same_symbol() {
        let mut st = SymbolTable::new();
        let first = st.intern_nonterminal("dup");
        let second = st.intern_nonterminal("dup");
        assert_eq!(first, second);
        assert_eq!(st.nonterminal_count(), 1);
    }

    #[test]
    fn unknown_ids_render_as_codes() {
        let st = SymbolTable::new();
        assert_eq!(st.name(Symbol::Term(42)), "t42");
        assert!(!st.contains(Symbol::Term(42)));
        assert!(st.contains(Symbol::End));
    }

    #[test]
    fn codes_round_trip_through_from_str() {
        for sym in [Symbol::End, Symbol::Term(7), Symbol::NonTerm(12)] {
            assert_eq!(sym.to_string().parse::<Symbol>(), Ok(sym));
        }
        assert!("x3".parse::<Symbol>().is_err());
        assert!("t".parse::<Symbol>().is_err());
        assert!("".parse::<Symbol>().is_err());
    }

    #[test]
    fn names_renders_sets() {
        let mut st = SymbolTable::new();
        let a = st.intern_terminal("a");
        let b = st.intern_terminal("b");
        assert_eq!(st.names(&[a, b, Symbol::End]), "{a, b, $end}");
    }
}
