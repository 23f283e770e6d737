//! # Grammar
//!
//! An immutable description of terminals, nonterminals, productions and the
//! start symbol. Grammars are assembled with [`GrammarBuilder`], which
//! validates the description before anything is interned:
//!
//! ```rust
//! # use lalrex_gen::Grammar;
//! let grammar = Grammar::builder()
//!     .terminals(["a", "b"])
//!     .nonterminals(["S", "A", "B"])
//!     .rule("S", &[&["A", "B"]])
//!     .rule("A", &[&["a", "A"], &[]])
//!     .rule("B", &[&["b"]])
//!     .start("S")
//!     .build()
//!     .unwrap();
//! assert_eq!(grammar.productions().len(), 4);
//! ```

use crate::GrammarError;
use lalrex::symbol::END_NAME;
use lalrex::{Symbol, SymbolTable};
use smartstring::alias::String;

/// One alternative `left -> right` of a nonterminal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Production {
    /// Position in [`Grammar::productions`].
    pub id: usize,
    pub left: Symbol,
    pub right: Vec<Symbol>,
}

#[derive(Debug, Clone)]
pub struct Grammar {
    symbols: SymbolTable,
    productions: Vec<Production>,
    /// Production ids per nonterminal id, in declaration order.
    rules: Vec<Vec<usize>>,
    start: Symbol,
}

impl Grammar {
    pub fn builder() -> GrammarBuilder {
        GrammarBuilder::default()
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn start(&self) -> Symbol {
        self.start
    }

    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    pub fn production(&self, id: usize) -> Option<&Production> {
        self.productions.get(id)
    }

    /// Alternatives of `nonterminal` (none for terminals).
    pub fn productions_of(&self, nonterminal: Symbol) -> impl Iterator<Item = &Production> + '_ {
        let ids: &[usize] = match nonterminal {
            Symbol::NonTerm(id) => self.rules.get(id).map(Vec::as_slice).unwrap_or_default(),
            _ => &[],
        };
        ids.iter().map(move |&id| &self.productions[id])
    }

    pub fn name(&self, symbol: Symbol) -> String {
        String::from(&*self.symbols.name(symbol))
    }

    /// Renders production `id` as `A -> a B c`.
    pub fn production_to_string(&self, id: usize) -> String {
        let mut out = String::new();
        if let Some(prod) = self.productions.get(id) {
            out.push_str(&self.symbols.name(prod.left));
            out.push_str(" ->");
            for sym in &prod.right {
                out.push(' ');
                out.push_str(&self.symbols.name(*sym));
            }
        }
        out
    }
}

/// Collects a grammar description and validates it in [`build`](Self::build).
///
/// Declaration order fixes symbol ids and production order; it affects only
/// state numbering in the generated tables, never their meaning.
#[derive(Debug, Clone, Default)]
pub struct GrammarBuilder {
    terminals: Vec<String>,
    nonterminals: Vec<String>,
    rules: Vec<(String, Vec<String>)>,
    start: Option<String>,
}

impl GrammarBuilder {
    pub fn terminal(mut self, name: &str) -> Self {
        self.terminals.push(name.into());
        self
    }

    pub fn terminals<'a, I: IntoIterator<Item = &'a str>>(mut self, names: I) -> Self {
        self.terminals.extend(names.into_iter().map(String::from));
        self
    }

    pub fn nonterminal(mut self, name: &str) -> Self {
        self.nonterminals.push(name.into());
        self
    }

    pub fn nonterminals<'a, I: IntoIterator<Item = &'a str>>(mut self, names: I) -> Self {
        self.nonterminals.extend(names.into_iter().map(String::from));
        self
    }

    /// Adds every alternative in `alternatives` for `left`. An empty
    /// alternative is an epsilon production.
    pub fn rule(mut self, left: &str, alternatives: &[&[&str]]) -> Self {
        for rhs in alternatives {
            self = self.alternative(left, rhs);
        }
        self
    }

    /// Adds a single alternative for `left`.
    pub fn alternative(mut self, left: &str, rhs: &[&str]) -> Self {
        self.rules
            .push((left.into(), rhs.iter().copied().map(String::from).collect()));
        self
    }

    /// Sets the start symbol; defaults to the left side of the first rule.
    pub fn start(mut self, name: &str) -> Self {
        self.start = Some(name.into());
        self
    }

    pub fn build(self) -> Result<Grammar, GrammarError> {
        let mut symbols = SymbolTable::new();
        for name in &self.terminals {
            check_fresh(&symbols, name)?;
            symbols.intern_terminal(name);
        }
        for name in &self.nonterminals {
            check_fresh(&symbols, name)?;
            symbols.intern_nonterminal(name);
        }

        let mut rules = vec![Vec::new(); symbols.nonterminal_count()];
        let mut productions: Vec<Production> = Vec::new();
        for (left_name, rhs) in &self.rules {
            let left_id = match symbols.lookup(left_name) {
                Some(Symbol::NonTerm(id)) => id,
                Some(_) => return Err(GrammarError::RuleForTerminal(left_name.clone())),
                None => {
                    return Err(GrammarError::UndeclaredSymbol {
                        symbol: left_name.clone(),
                        rule: left_name.clone(),
                    })
                }
            };
            let mut right = Vec::with_capacity(rhs.len());
            for name in rhs {
                match symbols.lookup(name) {
                    Some(Symbol::End) => return Err(GrammarError::ReservedSymbol(name.clone())),
                    Some(sym) => right.push(sym),
                    None => {
                        return Err(GrammarError::UndeclaredSymbol {
                            symbol: name.clone(),
                            rule: left_name.clone(),
                        })
                    }
                }
            }
            let left = Symbol::NonTerm(left_id);
            if rules[left_id]
                .iter()
                .any(|&id: &usize| productions[id].right == right)
            {
                log::warn!("Ignoring duplicate alternative for {}", left_name);
                continue;
            }
            let id = productions.len();
            rules[left_id].push(id);
            productions.push(Production { id, left, right });
        }

        for nonterminal in symbols.nonterminals() {
            let Symbol::NonTerm(id) = nonterminal else {
                continue;
            };
            if rules[id].is_empty() {
                return Err(GrammarError::NoProductions(String::from(
                    &*symbols.name(nonterminal),
                )));
            }
        }

        let start = match &self.start {
            Some(name) => match symbols.nonterminal(name) {
                Some(sym) => sym,
                None => return Err(GrammarError::BadStart(name.clone())),
            },
            None => productions
                .first()
                .map(|p| p.left)
                .ok_or(GrammarError::MissingStart)?,
        };

        log::debug!(
            "Grammar: {} terminals, {} nonterminals, {} productions",
            symbols.terminal_count(),
            symbols.nonterminal_count(),
            productions.len()
        );

        Ok(Grammar {
            symbols,
            productions,
            rules,
            start,
        })
    }
}

fn check_fresh(symbols: &SymbolTable, name: &str) -> Result<(), GrammarError> {
    if name == END_NAME {
        return Err(GrammarError::ReservedSymbol(name.into()));
    }
    if symbols.lookup(name).is_some() {
        return Err(GrammarError::DuplicateSymbol(name.into()));
    }
    Ok(())
}
