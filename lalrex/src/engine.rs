//! # Shift/reduce engine
//!
//! [`Engine`] drives a token stream through a set of [`ParserTables`].
//!
//! The engine keeps a stack of automaton states (starting at state 0), a
//! parallel stack of partially built [`ParseNode`]s, and a deque of remaining
//! input. The input is the lexer's tokens followed by an implicit
//! [`Symbol::End`] marker. On every step, with `t` the symbol at the front of
//! the input and `s` the state on top of the stack:
//!
//! 1. if `s` reduces on `t`, the production's right-hand side is popped off
//!    both stacks and the new node is pushed back onto the *front* of the
//!    input, to be shifted on the next step;
//! 2. otherwise, if `s` has a transition on `t`, the front input element is
//!    shifted;
//! 3. otherwise the parse fails with [`ParseError::UnexpectedToken`].
//!
//! Reductions are consulted before transitions, so a terminal that is both a
//! shift symbol and a reduce lookahead always reduces.
//!
//! The parse is accepted once the stack is back to `[0]` and the input holds
//! exactly a start-symbol node followed by the end marker.

use crate::{ParseError, ParseNode, ParserTables, Reduction, Span, Symbol, Token};
use std::collections::VecDeque;

/// Counters collected during a parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineStats {
    pub tokens: usize,
    pub shifts: usize,
    pub reductions: usize,
}

/// A single-use-at-a-time parser over shared tables.
///
/// The engine owns its stacks; the tables are only borrowed, so any number
/// of engines may share one [`ParserTables`] across threads.
pub struct Engine<'t> {
    tables: &'t ParserTables,
    states: Vec<usize>,
    nodes: Vec<ParseNode>,
    input: VecDeque<ParseNode>,
    stats: EngineStats,
}

impl<'t> Engine<'t> {
    pub fn new(tables: &'t ParserTables) -> Self {
        Self {
            tables,
            states: Vec::new(),
            nodes: Vec::new(),
            input: VecDeque::new(),
            stats: EngineStats::default(),
        }
    }

    pub fn tables(&self) -> &'t ParserTables {
        self.tables
    }

    /// Statistics of the most recent parse.
    pub fn stats(&self) -> EngineStats {
        self.stats.clone()
    }

    /// Parses `tokens` into a tree rooted at the start symbol.
    ///
    /// The engine can be reused; every call starts from a clean state.
    pub fn parse<I>(&mut self, tokens: I) -> Result<ParseNode, ParseError>
    where
        I: IntoIterator<Item = Token>,
    {
        self.reset();
        let mut end = Span::default();
        for token in tokens {
            if !token.symbol.is_terminal() || token.is_end() {
                return Err(ParseError::NotATerminal { token });
            }
            end = Span::at(token.span.end);
            self.stats.tokens += 1;
            self.input.push_back(ParseNode::leaf(token));
        }
        self.input.push_back(ParseNode::leaf(Token::end(end)));
        self.states.push(0);

        loop {
            if log::log_enabled!(log::Level::Trace) {
                self.dump_state();
            }
            if self.accepting() {
                log::trace!("Accept");
                return self.input.pop_front().ok_or(ParseError::InputExhausted { state: 0 });
            }

            let state = self.state();
            let lookahead = match self.input.front() {
                Some(node) => node.symbol(),
                None => return Err(ParseError::InputExhausted { state }),
            };

            if lookahead.is_terminal() {
                if let Some(reduction) = self.tables.reduction(state, lookahead) {
                    self.reduce(state, reduction)?;
                    continue;
                }
            }

            if let Some(target) = self.tables.transition(state, lookahead) {
                self.shift(target);
                continue;
            }

            let token = match self.input.pop_front() {
                Some(ParseNode::Leaf(token)) => token,
                // A reduced node nobody can shift; report the token that
                // triggered the reduction chain.
                Some(node) => {
                    let first = node.leaves().first().map(|t| (*t).clone());
                    first.unwrap_or_else(|| Token::end(Span::default()))
                }
                None => return Err(ParseError::InputExhausted { state }),
            };
            log::debug!("Error in state {} on {:?}", state, token);
            return Err(ParseError::UnexpectedToken {
                token,
                state,
                expected: self.tables.expected(state),
            });
        }
    }

    fn reset(&mut self) {
        self.states.clear();
        self.nodes.clear();
        self.input.clear();
        self.stats = EngineStats::default();
    }

    #[inline]
    fn state(&self) -> usize {
        self.states.last().copied().unwrap_or(0)
    }

    fn accepting(&self) -> bool {
        self.states.len() == 1
            && self.nodes.is_empty()
            && self.input.len() == 2
            && self.input[0].symbol() == self.tables.start()
            && self.input[1].symbol() == Symbol::End
    }

    fn shift(&mut self, target: usize) {
        log::trace!("Shift {}", target);
        if let Some(node) = self.input.pop_front() {
            self.nodes.push(node);
            self.states.push(target);
            self.stats.shifts += 1;
        }
    }

    fn reduce(&mut self, state: usize, reduction: Reduction) -> Result<(), ParseError> {
        let Reduction { left, pop } = reduction;
        log::trace!("Reduce {} <- {}", left, pop);
        if pop > self.nodes.len() {
            return Err(ParseError::StackUnderflow { state, pop });
        }
        let children = self.nodes.split_off(self.nodes.len() - pop);
        self.states.truncate(self.states.len() - pop);
        self.input.push_front(ParseNode::branch(left, children));
        self.stats.reductions += 1;
        Ok(())
    }

    fn dump_state(&self) {
        let symbols = self.tables.symbols();
        let mut output = String::new();
        for (i, state) in self.states.iter().enumerate() {
            output.push_str(&format!("<{}>  ", state));
            if let Some(node) = self.nodes.get(i) {
                output.push_str(&format!("{}  ", symbols.name(node.symbol())));
            }
        }
        output.push_str("<-  ");
        for node in self.input.iter().take(3) {
            output.push_str(&format!("{} ", symbols.name(node.symbol())));
        }
        if self.input.len() > 3 {
            output.push_str("...");
        }
        log::trace!("{}", output);
    }
}

/// Parses one token stream with a fresh engine.
pub fn parse<I>(tables: &ParserTables, tokens: I) -> Result<ParseNode, ParseError>
where
    I: IntoIterator<Item = Token>,
{
    Engine::new(tables).parse(tokens)
}

/// Parses several independent token streams concurrently, one engine per
/// stream on its own scoped thread.
///
/// Results come back in input order; a failed parse does not affect the
/// others.
pub fn parse_many<I>(tables: &ParserTables, inputs: I) -> Vec<Result<ParseNode, ParseError>>
where
    I: IntoIterator<Item = Vec<Token>>,
{
    std::thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .into_iter()
            .map(|tokens| scope.spawn(move || parse(tables, tokens)))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{span, SymbolTable};
    use pretty_assertions::assert_eq;
    use std::collections::{BTreeMap, BTreeSet};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    // Hand-built LALR(1) tables for:
    //   S -> A B
    //   A -> a A | <empty>
    //   B -> b
    fn tables() -> ParserTables {
        let mut st = SymbolTable::new();
        let a = st.intern_terminal("a");
        let b = st.intern_terminal("b");
        let s = st.intern_nonterminal("S");
        let aa = st.intern_nonterminal("A");
        let bb = st.intern_nonterminal("B");
        let red = |left, pop| Reduction { left, pop };
        ParserTables::new(
            st,
            s,
            vec![
                /* 0 */ BTreeMap::from([(a, 1), (aa, 3)]),
                /* 1 */ BTreeMap::from([(a, 1), (aa, 2)]),
                /* 2 */ BTreeMap::new(),
                /* 3 */ BTreeMap::from([(b, 4), (bb, 5)]),
                /* 4 */ BTreeMap::new(),
                /* 5 */ BTreeMap::new(),
            ],
            vec![
                /* 0 */ BTreeMap::from([(b, red(aa, 0))]),
                /* 1 */ BTreeMap::from([(b, red(aa, 0))]),
                /* 2 */ BTreeMap::from([(b, red(aa, 2))]),
                /* 3 */ BTreeMap::new(),
                /* 4 */ BTreeMap::from([(Symbol::End, red(bb, 1))]),
                /* 5 */ BTreeMap::from([(Symbol::End, red(s, 2))]),
            ],
        )
        .unwrap()
    }

    fn tokens(tables: &ParserTables, src: &str) -> Vec<Token> {
        src.split_whitespace()
            .enumerate()
            .map(|(i, lexeme)| {
                let symbol = tables.symbols().terminal(lexeme).unwrap();
                Token::new(symbol, lexeme, span!(0, 2 * i, 0, 2 * i + 1))
            })
            .collect()
    }

    #[test]
    fn parses_nested_epsilon_reductions() {
        init_logger();
        let t = tables();
        let mut engine = Engine::new(&t);
        let tree = engine.parse(tokens(&t, "a a b")).unwrap();
        assert_eq!(
            tree.display(t.symbols()).to_string(),
            "S(A(a, A(a, A())), B(b))"
        );
        assert_eq!(tree.span(), Some(span!(0, 0, 0, 5)));
        assert_eq!(
            engine.stats(),
            EngineStats {
                tokens: 3,
                shifts: 7,
                reductions: 5,
            }
        );
    }

    #[test]
    fn leaves_reproduce_input() {
        let t = tables();
        let input = tokens(&t, "a a a b");
        let tree = parse(&t, input.clone()).unwrap();
        let leaves: Vec<Token> = tree.leaves().into_iter().cloned().collect();
        assert_eq!(leaves, input);
    }

    #[test]
    fn unexpected_token_reports_expected_set() {
        let t = tables();
        let err = parse(&t, tokens(&t, "b b")).unwrap_err();
        let b = t.symbols().terminal("b").unwrap();
        match err {
            ParseError::UnexpectedToken {
                token,
                state,
                expected,
            } => {
                assert_eq!(token.symbol, b);
                assert_eq!(token.span, span!(0, 2, 0, 3));
                assert_eq!(state, 4);
                assert_eq!(expected, BTreeSet::from([Symbol::End]));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn premature_end_is_unexpected_end_marker() {
        let t = tables();
        let err = parse(&t, tokens(&t, "a a")).unwrap_err();
        let ParseError::UnexpectedToken { token, .. } = err else {
            panic!("expected UnexpectedToken");
        };
        assert!(token.is_end());
        assert_eq!(token.span, span!(0, 3, 0, 3));
    }

    #[test]
    fn rejects_non_terminal_tokens() {
        let t = tables();
        let s = t.start();
        let err = parse(&t, vec![Token::new(s, "S", Span::default())]).unwrap_err();
        assert!(matches!(err, ParseError::NotATerminal { .. }));
    }

    #[test]
    fn engine_is_reusable() {
        let t = tables();
        let mut engine = Engine::new(&t);
        assert!(engine.parse(tokens(&t, "b b")).is_err());
        let tree = engine.parse(tokens(&t, "b")).unwrap();
        assert_eq!(tree.display(t.symbols()).to_string(), "S(A(), B(b))");
    }

    #[test]
    fn corrupt_pop_count_underflows() {
        let mut st = SymbolTable::new();
        let a = st.intern_terminal("a");
        let s = st.intern_nonterminal("S");
        let t = ParserTables::new(
            st,
            s,
            vec![BTreeMap::new()],
            vec![BTreeMap::from([(a, Reduction { left: s, pop: 3 })])],
        )
        .unwrap();
        let err = parse(&t, vec![Token::new(a, "a", Span::default())]).unwrap_err();
        assert_eq!(err, ParseError::StackUnderflow { state: 0, pop: 3 });
    }

    #[test]
    fn parse_many_keeps_failures_independent() {
        let t = tables();
        let results = parse_many(
            &t,
            vec![tokens(&t, "a b"), tokens(&t, "a"), tokens(&t, "b")],
        );
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
        assert_eq!(
            results[2].as_ref().unwrap().display(t.symbols()).to_string(),
            "S(A(), B(b))"
        );
    }
}
