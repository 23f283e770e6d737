//! Runtime error types.
//!
//! [`ParseError`] is returned by the [`Engine`](crate::Engine) and is fatal to
//! a single parse only. [`TableError`] covers loading, saving and validating
//! [`ParserTables`](crate::ParserTables).

use crate::{Symbol, SymbolTable, Token};
use std::collections::BTreeSet;
use thiserror::Error;

/// Errors raised while driving a token stream through the tables.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No shift or reduce action applies to the front input symbol.
    ///
    /// `expected` holds every symbol with a transition or a reduction from
    /// `state`. When the input ended early, `token` is the end marker.
    #[error("unexpected token {:?} ({}) at {} in state {state}", .token.lexeme, .token.symbol, .token.span)]
    UnexpectedToken {
        token: Token,
        state: usize,
        expected: BTreeSet<Symbol>,
    },

    /// A token handed to the engine is not tagged with a terminal.
    #[error("token {:?} at {} is tagged with non-terminal symbol {}", .token.lexeme, .token.span, .token.symbol)]
    NotATerminal { token: Token },

    /// A reduction asked for more nodes than the stack holds.
    #[error("stack underflow reducing {pop} nodes in state {state}")]
    StackUnderflow { state: usize, pop: usize },

    /// The remaining input ran dry before the start symbol was accepted.
    #[error("input exhausted in state {state}")]
    InputExhausted { state: usize },
}

impl ParseError {
    /// Renders the error with symbol names resolved through `symbols`.
    pub fn describe(&self, symbols: &SymbolTable) -> String {
        match self {
            ParseError::UnexpectedToken {
                token, expected, ..
            } => {
                let found = if token.is_end() {
                    "end of input".to_owned()
                } else {
                    format!("{} {:?}", symbols.name(token.symbol), token.lexeme.as_str())
                };
                format!(
                    "unexpected {} at {}; expected one of {}",
                    found,
                    token.span,
                    symbols.names(expected)
                )
            }
            ParseError::NotATerminal { token } => format!(
                "token {:?} at {} is tagged with non-terminal {}",
                token.lexeme.as_str(),
                token.span,
                symbols.name(token.symbol)
            ),
            other => other.to_string(),
        }
    }

    /// The offending token, when there is one.
    pub fn token(&self) -> Option<&Token> {
        match self {
            ParseError::UnexpectedToken { token, .. } | ParseError::NotATerminal { token } => {
                Some(token)
            }
            _ => None,
        }
    }
}

/// Errors raised while loading, saving or validating parser tables.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("tables have no states")]
    Empty,

    #[error("transition table has {transitions} rows but reduction table has {reductions}")]
    RowMismatch {
        transitions: usize,
        reductions: usize,
    },

    #[error("state {state} transitions on {symbol} to missing state {target}")]
    MissingState {
        state: usize,
        symbol: Symbol,
        target: usize,
    },

    #[error("state {state} refers to unknown symbol {symbol}")]
    UnknownSymbol { state: usize, symbol: Symbol },

    #[error("state {state} reduces on non-terminal lookahead {symbol}")]
    NonTerminalLookahead { state: usize, symbol: Symbol },

    #[error("state {state} reduces to terminal {left} on {symbol}")]
    TerminalReduction {
        state: usize,
        symbol: Symbol,
        left: Symbol,
    },

    #[error("start symbol {0} is not a non-terminal")]
    BadStart(Symbol),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{span, Span};

    fn _assert_send_sync_static<T: Send + Sync + 'static>() {}

    #[test]
    fn errors_are_send_sync_static() {
        _assert_send_sync_static::<ParseError>();
        _assert_send_sync_static::<TableError>();
    }

    #[test]
    fn describe_uses_symbol_names() {
        let mut symbols = SymbolTable::new();
        let a = symbols.intern_terminal("a");
        let b = symbols.intern_terminal("b");
        let err = ParseError::UnexpectedToken {
            token: Token::new(b, "b", span!(0, 0, 0, 1)),
            state: 0,
            expected: BTreeSet::from([a]),
        };
        assert_eq!(
            err.describe(&symbols),
            "unexpected b \"b\" at span 0:0 to 0:1; expected one of {a}"
        );
        assert!(err.to_string().contains("state 0"));
        assert_eq!(err.token().map(|t| t.symbol), Some(b));
    }

    #[test]
    fn describe_reports_end_of_input() {
        let mut symbols = SymbolTable::new();
        let a = symbols.intern_terminal("a");
        let err = ParseError::UnexpectedToken {
            token: Token::end(Span::default()),
            state: 1,
            expected: BTreeSet::from([a]),
        };
        assert!(err.describe(&symbols).starts_with("unexpected end of input"));
    }

    #[test]
    fn io_error_maps_to_table_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: TableError = io.into();
        assert!(matches!(err, TableError::Io(_)));
        assert!(err.to_string().contains("io error"));
    }
}
