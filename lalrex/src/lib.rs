//! Copyright (c) 2005–2025 IKH Software, Inc.
//!
//! Released under the terms of the GNU Lesser General Public License, version 3.0
//! or (at your option) any later version (LGPL-3.0-or-later).
//!
//! Table-driven shift/reduce parsing runtime.
//!
//! `lalrex` consumes the [`ParserTables`] produced by the `lalrex-gen`
//! generator and drives them over a stream of [`Token`]s supplied by an
//! external lexer. The result is a concrete [`ParseNode`] tree rooted at the
//! grammar's start symbol.
//!
//! * [`symbol`] — interned grammar symbols and their names,
//! * [`position`] — source positions and spans carried by tokens,
//! * [`token`] — the `(terminal, lexeme, span)` triples read by the engine,
//! * [`tables`] — transition/reduction tables and their JSON persistence,
//! * [`tree`] — the parse tree,
//! * [`engine`] — the shift/reduce driver.
//!
//! # Example
//!
//! ```rust
//! use lalrex::{Engine, ParserTables, Reduction, Span, Symbol, SymbolTable, Token};
//! use std::collections::BTreeMap;
//!
//! // S -> a
//! let mut symbols = SymbolTable::new();
//! let a = symbols.intern_terminal("a");
//! let s = symbols.intern_nonterminal("S");
//!
//! let tables = ParserTables::new(
//!     symbols,
//!     s,
//!     vec![BTreeMap::from([(a, 1)]), BTreeMap::new()],
//!     vec![
//!         BTreeMap::new(),
//!         BTreeMap::from([(Symbol::End, Reduction { left: s, pop: 1 })]),
//!     ],
//! )
//! .unwrap();
//!
//! let tree = Engine::new(&tables)
//!     .parse([Token::new(a, "a", Span::default())])
//!     .unwrap();
//! assert_eq!(tree.display(tables.symbols()).to_string(), "S(a)");
//! ```

pub mod engine;
pub mod error;
pub mod position;
pub mod symbol;
pub mod tables;
pub mod token;
pub mod tree;

pub use crate::engine::{parse, parse_many, Engine, EngineStats};
pub use crate::error::{ParseError, TableError};
pub use crate::position::{Position, Span};
pub use crate::symbol::{Symbol, SymbolParseError, SymbolTable};
pub use crate::tables::{ParserTables, Reduction};
pub use crate::token::Token;
pub use crate::tree::{DisplayNode, ParseNode};
