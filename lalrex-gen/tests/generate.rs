use lalrex::{parse, ParserTables, Span, Token};
use lalrex_gen::{build_tables, generate, Grammar};
use pretty_assertions::assert_eq;
use std::path::PathBuf;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn out_dir(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("lalrex-gen-{}-{}", test, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

// L -> L , I | I ; I -> id
fn list() -> Grammar {
    Grammar::builder()
        .terminals([",", "id"])
        .nonterminals(["L", "I"])
        .rule("L", &[&["L", ",", "I"], &["I"]])
        .rule("I", &[&["id"]])
        .build()
        .unwrap()
}

fn ids(tables: &ParserTables, n: usize) -> Vec<Token> {
    let id = tables.symbols().lookup("id").unwrap();
    let comma = tables.symbols().lookup(",").unwrap();
    let mut out = Vec::new();
    for i in 0..n {
        if i > 0 {
            out.push(Token::new(comma, ",", Span::default()));
        }
        out.push(Token::new(id, "x", Span::default()));
    }
    out
}

#[test]
fn generate_writes_loadable_tables_and_report() {
    init();
    let dir = out_dir("list");
    let grammar = list();
    let built = generate(&grammar, &dir, "list", true).unwrap();

    let loaded = ParserTables::load(dir.join("list.json")).unwrap();
    assert_eq!(loaded, built);
    let tree = parse(&loaded, ids(&loaded, 3)).unwrap();
    assert_eq!(
        tree.display(loaded.symbols()).to_string(),
        "L(L(L(I(id)), ,, I(id)), ,, I(id))"
    );

    let report = std::fs::read_to_string(dir.join("list.txt")).unwrap();
    assert!(report.contains("PS,3\n"));
    assert!(report.contains("P,0,L -> L , I\n"));
    assert!(report.contains("FIRST,L,{id, }\n"));
    assert!(report.contains(&format!("CS,{}\n", built.state_count())));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn generate_without_debug_skips_report() {
    let dir = out_dir("quiet");
    generate(&list(), &dir, "quiet", false).unwrap();
    assert!(dir.join("quiet.json").exists());
    assert!(!dir.join("quiet.txt").exists());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn generate_reports_conflicts() {
    let grammar = Grammar::builder()
        .terminals(["c"])
        .nonterminals(["S", "A", "B"])
        .rule("S", &[&["A"], &["B"]])
        .rule("A", &[&["c"]])
        .rule("B", &[&["c"]])
        .build()
        .unwrap();
    let dir = out_dir("conflict");
    let err = generate(&grammar, &dir, "conflict", false).unwrap_err();
    assert!(format!("{:#}", err).contains("reduce/reduce conflict"));
    assert!(!dir.join("conflict.json").exists());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn tables_survive_json_and_threads() {
    let tables = build_tables(&list()).unwrap();
    let json = serde_json::to_string(&tables).unwrap();
    let loaded: ParserTables = serde_json::from_str(&json).unwrap();
    assert_eq!(loaded, tables);

    let inputs: Vec<_> = (1..=8).map(|n| ids(&loaded, n)).collect();
    let results = lalrex::parse_many(&loaded, inputs);
    for (n, result) in results.into_iter().enumerate() {
        let tree = result.unwrap();
        assert_eq!(tree.leaves().len(), 2 * n + 1);
    }
}
