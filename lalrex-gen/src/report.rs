//! Human-readable dumps of a grammar, its FIRST sets, automaton and tables.
//!
//! Every writer emits comma-separated records tagged by a short prefix so
//! the output is easy to grep and diff:
//!
//! ```text
//! PS,<number of productions>
//!
//! P,<index>,<LHS> -> <RHS symbols>
//! ```

use crate::{Automaton, Grammar, SetAnalysis};
use lalrex::ParserTables;
use std::io::{self, Write};

/// Writes the grammar productions.
///
/// # Parameters
/// - `out`: The output writer (e.g., file, buffer, or stdout).
/// - `grammar`: The grammar whose productions are listed in id order.
///
/// # Returns
/// Returns `Ok(())` on success or an [`io::Error`] if writing fails.
pub fn write_prods<W: Write>(out: &mut W, grammar: &Grammar) -> io::Result<()> {
    writeln!(out, "PS,{}\n", grammar.productions().len())?;
    for prod in grammar.productions() {
        writeln!(out, "P,{},{}", prod.id, grammar.production_to_string(prod.id))?;
    }
    Ok(())
}

/// Writes the FIRST set of every nonterminal, with `` `empty' `` marking
/// nullable ones.
pub fn write_first<W: Write>(out: &mut W, grammar: &Grammar, sets: &SetAnalysis) -> io::Result<()> {
    for sym in grammar.symbols().nonterminals() {
        write!(out, "FIRST,{},{{", grammar.name(sym))?;
        if sets.is_nullable(sym) {
            write!(out, "`empty', ")?;
        }
        for t in sets.first(sym) {
            write!(out, "{}, ", grammar.name(t))?;
        }
        writeln!(out, "}}")?;
    }
    Ok(())
}

/// Writes every state's items and outgoing transitions.
///
/// Items are written as `C,<state>,<LHS> -> <consumed> . <remaining> {<lookahead>}`
/// and transitions as `T,<state>,<symbol>,<target>`.
pub fn write_states<W: Write>(
    out: &mut W,
    grammar: &Grammar,
    automaton: &Automaton<'_>,
) -> io::Result<()> {
    writeln!(out, "CS,{}\n", automaton.state_count())?;
    for (i, state) in automaton.states().iter().enumerate() {
        for item in state.items() {
            write!(out, "C,{},{} -> ", i, grammar.name(item.left()))?;
            for sym in item.consumed() {
                write!(out, "{} ", grammar.name(*sym))?;
            }
            write!(out, ".")?;
            for sym in item.remaining() {
                write!(out, " {}", grammar.name(*sym))?;
            }
            writeln!(out, " {}", grammar.symbols().names(item.lookahead()))?;
        }
        for (&(from, sym), to) in automaton.transitions().range((i, lalrex::Symbol::End)..) {
            if from != i {
                break;
            }
            writeln!(out, "T,{},{},{}", i, grammar.name(sym), to)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Writes the reduction rows as `R,<state>,<lookahead>,<LHS>,<pop>`.
pub fn write_reductions<W: Write>(out: &mut W, tables: &ParserTables) -> io::Result<()> {
    let symbols = tables.symbols();
    for state in 0..tables.state_count() {
        for (lookahead, reduction) in tables.reductions(state) {
            writeln!(
                out,
                "R,{},{},{},{}",
                state,
                symbols.name(lookahead),
                symbols.name(reduction.left),
                reduction.pop
            )?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AutomatonBuilder, TableBuilder};

    fn grammar() -> Grammar {
        Grammar::builder()
            .terminals(["a", "b"])
            .nonterminals(["S", "A"])
            .rule("S", &[&["A", "b"]])
            .rule("A", &[&["a", "A"], &[]])
            .build()
            .unwrap()
    }

    fn render<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn productions_and_first_sets() {
        let g = grammar();
        let sets = SetAnalysis::new(&g);
        let prods = render(|out| write_prods(out, &g));
        assert_eq!(prods, "PS,3\n\nP,0,S -> A b\nP,1,A -> a A\nP,2,A ->\n");
        let first = render(|out| write_first(out, &g, &sets));
        assert_eq!(first, "FIRST,S,{a, b, }\nFIRST,A,{`empty', a, }\n");
    }

    #[test]
    fn states_and_reductions() {
        let g = grammar();
        let sets = SetAnalysis::new(&g);
        let automaton = AutomatonBuilder::new(&g, &sets).build();
        let tables = TableBuilder::new(&g, &automaton).build().unwrap();

        let states = render(|out| write_states(out, &g, &automaton));
        assert!(states.starts_with(&format!("CS,{}\n\nC,0,S -> . A b {{$end}}\n", automaton.state_count())));
        assert!(states.contains("C,0,A -> . {b}\n"));
        assert!(states.contains("T,0,a,"));

        let reductions = render(|out| write_reductions(out, &tables));
        assert!(reductions.contains("R,0,b,A,0\n"));
        assert_eq!(reductions.lines().count(), 4);
    }
}
