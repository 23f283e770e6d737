//! # Tokens
//!
//! The engine reads an ordered sequence of [`Token`]s produced by an external
//! lexer. Each token pairs a terminal [`Symbol`] with the matched source text
//! and the [`Span`] it came from.

use crate::{Span, Symbol};
use smartstring::alias::String;

/// A lexical token: `(terminal symbol, lexeme, source span)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Terminal symbol classifying the token.
    pub symbol: Symbol,
    /// Matched source text.
    pub lexeme: String,
    /// Where the token was found.
    pub span: Span,
}

impl Token {
    pub fn new(symbol: Symbol, lexeme: &str, span: Span) -> Self {
        Self {
            symbol,
            lexeme: String::from(lexeme),
            span,
        }
    }

    /// The end-of-input marker the engine appends after the last real token.
    pub fn end(span: Span) -> Self {
        Self {
            symbol: Symbol::End,
            lexeme: String::new(),
            span,
        }
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.symbol == Symbol::End
    }
}
