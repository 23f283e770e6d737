//! Copyright (c) 2005–2025 IKH Software, Inc.
//!
//! Released under the terms of the GNU Lesser General Public License, version 3.0
//! or (at your option) any later version (LGPL-3.0-or-later).
//!
//! LALR(1) parser table generator.
//!
//! `lalrex-gen` turns a [`Grammar`] into [`ParserTables`] for the `lalrex`
//! shift/reduce engine:
//!  * [`SetAnalysis`] — nullable and FIRST sets
//!  * [`AutomatonBuilder`] — LR(1) closure and goto, with states merged by
//!    core into an LALR(1) automaton
//!  * [`TableBuilder`] — transition and reduction rows, rejecting
//!    reduce/reduce conflicts
//!
//! ```rust
//! use lalrex::Token;
//! use lalrex_gen::{build_tables, Grammar};
//!
//! let grammar = Grammar::builder()
//!     .terminals(["a", "b"])
//!     .nonterminals(["S", "A", "B"])
//!     .rule("S", &[&["A", "B"]])
//!     .rule("A", &[&["a", "A"], &[]])
//!     .rule("B", &[&["b"]])
//!     .build()
//!     .unwrap();
//! let tables = build_tables(&grammar).unwrap();
//!
//! let sym = |n| tables.symbols().lookup(n).unwrap();
//! let tokens = vec![
//!     Token::new(sym("a"), "a", Default::default()),
//!     Token::new(sym("b"), "b", Default::default()),
//! ];
//! let tree = lalrex::parse(&tables, tokens).unwrap();
//! assert_eq!(tree.display(tables.symbols()).to_string(), "S(A(a, A()), B(b))");
//! ```
//!
//! [`ParserTables`]: lalrex::ParserTables

pub mod automaton;
pub mod error;
pub mod generate;
pub mod grammar;
pub mod item;
pub mod report;
pub mod sets;
pub mod state;
pub mod table;

pub use automaton::{Automaton, AutomatonBuilder, WorklistOrder};
pub use error::GrammarError;
pub use generate::{build_tables, build_tables_with, generate};
pub use grammar::{Grammar, GrammarBuilder, Production};
pub use item::{Core, Item};
pub use sets::SetAnalysis;
pub use state::{State, StateKey};
pub use table::TableBuilder;
