//! # Parse tree
//!
//! [`ParseNode`] is the engine's output: leaves wrap the lexer's tokens and
//! internal nodes are built on every reduction. Reading the leaves left to
//! right reproduces the input token sequence exactly.
//!
//! Children are looked up by symbol with [`ParseNode::child`], which returns
//! the first direct child carrying that label, if any.

use crate::{Span, Symbol, SymbolTable, Token};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseNode {
    /// A shifted terminal.
    Leaf(Token),
    /// A reduced non-terminal with its children in source order.
    Branch {
        symbol: Symbol,
        children: Vec<ParseNode>,
    },
}

impl ParseNode {
    pub fn leaf(token: Token) -> Self {
        ParseNode::Leaf(token)
    }

    pub fn branch(symbol: Symbol, children: Vec<ParseNode>) -> Self {
        ParseNode::Branch { symbol, children }
    }

    /// The grammar symbol labelling this node.
    #[inline]
    pub fn symbol(&self) -> Symbol {
        match self {
            ParseNode::Leaf(token) => token.symbol,
            ParseNode::Branch { symbol, .. } => *symbol,
        }
    }

    /// Children in order; empty for leaves and for empty reductions.
    pub fn children(&self) -> &[ParseNode] {
        match self {
            ParseNode::Leaf(_) => &[],
            ParseNode::Branch { children, .. } => children,
        }
    }

    /// First direct child labelled `symbol`.
    pub fn child(&self, symbol: Symbol) -> Option<&ParseNode> {
        self.children().iter().find(|node| node.symbol() == symbol)
    }

    /// Every direct child labelled `symbol`.
    pub fn children_of(&self, symbol: Symbol) -> impl Iterator<Item = &ParseNode> + '_ {
        self.children()
            .iter()
            .filter(move |node| node.symbol() == symbol)
    }

    pub fn token(&self) -> Option<&Token> {
        match self {
            ParseNode::Leaf(token) => Some(token),
            ParseNode::Branch { .. } => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, ParseNode::Leaf(_))
    }

    /// Source span covered by the node; `None` when it derives no tokens.
    pub fn span(&self) -> Option<Span> {
        match self {
            ParseNode::Leaf(token) => Some(token.span),
            ParseNode::Branch { children, .. } => children
                .iter()
                .filter_map(ParseNode::span)
                .reduce(|acc, s| acc.merge(&s)),
        }
    }

    /// Tokens at the leaves, left to right.
    pub fn leaves(&self) -> Vec<&Token> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Token>) {
        match self {
            ParseNode::Leaf(token) => out.push(token),
            ParseNode::Branch { children, .. } => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }

    /// Depth-first, pre-order walk calling `f(parent, node)` for every node
    /// below `self`.
    pub fn visit<'a, F>(&'a self, f: &mut F)
    where
        F: FnMut(&'a ParseNode, &'a ParseNode),
    {
        for child in self.children() {
            f(self, child);
            child.visit(f);
        }
    }

    /// Renders the tree as `S(A(a), B(b))` using names from `symbols`.
    pub fn display<'a>(&'a self, symbols: &'a SymbolTable) -> DisplayNode<'a> {
        DisplayNode {
            node: self,
            symbols,
        }
    }
}

/// Helper returned by [`ParseNode::display`].
pub struct DisplayNode<'a> {
    node: &'a ParseNode,
    symbols: &'a SymbolTable,
}

impl fmt::Display for DisplayNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbols.name(self.node.symbol()))?;
        if let ParseNode::Branch { children, .. } = self.node {
            f.write_str("(")?;
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", child.display(self.symbols))?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span;

    fn sample() -> (SymbolTable, ParseNode) {
        let mut st = SymbolTable::new();
        let a = st.intern_terminal("a");
        let b = st.intern_terminal("b");
        let s = st.intern_nonterminal("S");
        let x = st.intern_nonterminal("X");
        let tree = ParseNode::branch(
            s,
            vec![
                ParseNode::branch(x, vec![]),
                ParseNode::leaf(Token::new(a, "a", span!(0, 0, 0, 1))),
                ParseNode::branch(x, vec![ParseNode::leaf(Token::new(b, "b", span!(1, 2, 1, 3)))]),
            ],
        );
        (st, tree)
    }

    #[test]
    fn displays_nested_nodes() {
        let (st, tree) = sample();
        assert_eq!(tree.display(&st).to_string(), "S(X(), a, X(b))");
    }

    #[test]
    fn child_returns_first_match() {
        let (st, tree) = sample();
        let x = st.lookup("X").unwrap();
        let a = st.lookup("a").unwrap();
        assert!(tree.child(x).unwrap().children().is_empty());
        assert_eq!(tree.child(a).and_then(|n| n.token()).unwrap().lexeme.as_str(), "a");
        assert_eq!(tree.children_of(x).count(), 2);
        assert!(tree.child(st.lookup("S").unwrap()).is_none());
    }

    #[test]
    fn leaves_and_span() {
        let (_, tree) = sample();
        let lexemes: Vec<_> = tree.leaves().into_iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(lexemes, vec!["a", "b"]);
        assert_eq!(tree.span(), Some(span!(0, 0, 1, 3)));
        assert_eq!(tree.children()[0].span(), None);
    }

    #[test]
    fn visit_walks_depth_first() {
        let (st, tree) = sample();
        let mut seen = Vec::new();
        tree.visit(&mut |parent, node| {
            seen.push(format!(
                "{}>{}",
                st.name(parent.symbol()),
                st.name(node.symbol())
            ))
        });
        assert_eq!(seen, vec!["S>X", "S>a", "S>X", "X>b"]);
    }
}
