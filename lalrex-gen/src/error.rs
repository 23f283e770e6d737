//! Generator error types.

use smartstring::alias::String;
use thiserror::Error;

/// Errors raised while validating a grammar or building its tables.
///
/// Two families exist: malformed grammars, rejected by
/// [`GrammarBuilder::build`](crate::GrammarBuilder::build) before any
/// analysis, and reduce/reduce conflicts found by
/// [`TableBuilder`](crate::TableBuilder).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("non-terminal {0} has no productions")]
    NoProductions(String),

    #[error("symbol {symbol} used in rule for {rule} is not declared")]
    UndeclaredSymbol { symbol: String, rule: String },

    #[error("rule defined for terminal {0}")]
    RuleForTerminal(String),

    #[error("symbol {0} is declared more than once")]
    DuplicateSymbol(String),

    #[error("symbol name {0} is reserved")]
    ReservedSymbol(String),

    #[error("start symbol {0} is not a declared non-terminal")]
    BadStart(String),

    #[error("grammar has no rules")]
    MissingStart,

    /// Two complete items in one state reduce differently on the same
    /// lookahead.
    #[error("reduce/reduce conflict in state {state} on {lookahead}: `{first}` vs `{second}`")]
    ReduceReduceConflict {
        state: usize,
        lookahead: String,
        first: String,
        second: String,
    },

    /// The assembled tables failed validation.
    #[error("inconsistent tables: {0}")]
    Tables(String),
}

impl GrammarError {
    /// True for errors in the grammar description itself.
    pub fn is_malformed(&self) -> bool {
        !self.is_conflict() && !matches!(self, GrammarError::Tables(_))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, GrammarError::ReduceReduceConflict { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_errors() {
        let conflict = GrammarError::ReduceReduceConflict {
            state: 3,
            lookahead: "x".into(),
            first: "B ->".into(),
            second: "C ->".into(),
        };
        assert!(conflict.is_conflict());
        assert!(!conflict.is_malformed());
        assert_eq!(
            conflict.to_string(),
            "reduce/reduce conflict in state 3 on x: `B ->` vs `C ->`"
        );
        assert!(GrammarError::MissingStart.is_malformed());
        assert!(!GrammarError::Tables("empty".into()).is_malformed());
    }
}
