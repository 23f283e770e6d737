use crate::report;
use crate::{AutomatonBuilder, Grammar, GrammarError, SetAnalysis, TableBuilder, WorklistOrder};
use anyhow::{Context, Result};
use lalrex::ParserTables;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Runs the full pipeline: FIRST/nullable analysis, automaton construction
/// and table building.
pub fn build_tables(grammar: &Grammar) -> Result<ParserTables, GrammarError> {
    build_tables_with(grammar, WorklistOrder::default())
}

/// As [`build_tables`], exploring states in the given worklist order.
pub fn build_tables_with(
    grammar: &Grammar,
    order: WorklistOrder,
) -> Result<ParserTables, GrammarError> {
    let sets = SetAnalysis::new(grammar);
    let automaton = AutomatonBuilder::new(grammar, &sets)
        .with_order(order)
        .build();
    TableBuilder::new(grammar, &automaton).build()
}

/// Generate parser tables for `grammar` into `out_dir`.
///
/// Writes `<name>.json`, loadable with [`ParserTables::load`]. With `debug`
/// set, also writes `<name>.txt` listing productions, FIRST sets, states
/// and reductions.
pub fn generate<P: AsRef<Path>>(
    grammar: &Grammar,
    out_dir: P,
    name: &str,
    debug: bool,
) -> Result<ParserTables> {
    let out_dir = out_dir.as_ref();
    let sets = SetAnalysis::new(grammar);
    let automaton = AutomatonBuilder::new(grammar, &sets).build();
    let tables = TableBuilder::new(grammar, &automaton)
        .build()
        .with_context(|| format!("can't build tables for {}", name))?;

    let path = out_dir.join(format!("{}.json", name));
    tables
        .save(&path)
        .with_context(|| format!("can't write {}", path.display()))?;
    log::info!("Wrote {} states to {}", tables.state_count(), path.display());

    if debug {
        let path = out_dir.join(format!("{}.txt", name));
        let mut out = BufWriter::new(
            File::create(&path).with_context(|| format!("can't create {}", path.display()))?,
        );
        writeln!(out, "Produced by parser generator lalrex-gen\n")?;
        report::write_prods(&mut out, grammar)?;
        writeln!(out)?;
        report::write_first(&mut out, grammar, &sets)?;
        writeln!(out)?;
        report::write_states(&mut out, grammar, &automaton)?;
        report::write_reductions(&mut out, &tables)?;
        out.flush()?;
        log::info!("Wrote report to {}", path.display());
    }

    Ok(tables)
}
