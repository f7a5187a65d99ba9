//! Syntax tree nodes
//!
//! A node is either an element built from a production or a leaf wrapping a token.
//! Each element owns its children and there are no parent links; consumers that
//! need to go upward look nodes up by position instead.
//!
//! Left-flattened chains (`a + b + c + ...`) nest to a depth equal to their length,
//! so [`Element`] drops its subtree iteratively rather than through the default
//! recursive drop glue.

use crate::chalk::ast::Position;
use crate::chalk::grammar::ProductionId;
use crate::chalk::lexer::{Token, TokenId};

/// An interior node: the production it was built from and its ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    production: ProductionId,
    children: Vec<AstNode>,
}

impl Element {
    pub fn production(&self) -> ProductionId {
        self.production
    }

    pub fn children(&self) -> &[AstNode] {
        &self.children
    }
}

impl Drop for Element {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            if let AstNode::Element(element) = &mut node {
                pending.append(&mut element.children);
            }
        }
    }
}

/// A node of the syntax tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AstNode {
    Element(Element),
    Token(Token),
}

impl AstNode {
    pub fn element(production: ProductionId, children: Vec<AstNode>) -> Self {
        AstNode::Element(Element {
            production,
            children,
        })
    }

    pub fn leaf(token: Token) -> Self {
        AstNode::Token(token)
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, AstNode::Token(_))
    }

    /// The production this node was built from; `None` for leaves.
    pub fn production(&self) -> Option<ProductionId> {
        match self {
            AstNode::Element(element) => Some(element.production),
            AstNode::Token(_) => None,
        }
    }

    /// The wrapped token; `None` for elements.
    pub fn token(&self) -> Option<&Token> {
        match self {
            AstNode::Token(token) => Some(token),
            AstNode::Element(_) => None,
        }
    }

    /// Token kind of a leaf.
    pub fn token_kind(&self) -> Option<TokenId> {
        self.token().map(|token| token.kind)
    }

    /// Ordered children; empty for leaves.
    pub fn children(&self) -> &[AstNode] {
        match self {
            AstNode::Element(element) => &element.children,
            AstNode::Token(_) => &[],
        }
    }

    pub fn child(&self, index: usize) -> Option<&AstNode> {
        self.children().get(index)
    }

    pub fn child_count(&self) -> usize {
        self.children().len()
    }

    /// Leftmost token under this node.
    pub fn first_token(&self) -> Option<&Token> {
        let mut node = self;
        loop {
            match node {
                AstNode::Token(token) => return Some(token),
                AstNode::Element(element) => node = element.children.first()?,
            }
        }
    }

    /// Rightmost token under this node.
    pub fn last_token(&self) -> Option<&Token> {
        let mut node = self;
        loop {
            match node {
                AstNode::Token(token) => return Some(token),
                AstNode::Element(element) => node = element.children.last()?,
            }
        }
    }

    /// Position of the first token under this node.
    pub fn position(&self) -> Option<Position> {
        self.first_token().map(|token| token.position)
    }

    /// Pre-order traversal of this node and everything below it.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Concatenated token text under this node, separated by single spaces.
    pub fn text(&self) -> String {
        self.descendants()
            .filter_map(AstNode::token)
            .map(|token| token.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Iterator returned by [`AstNode::descendants`].
pub struct Descendants<'a> {
    stack: Vec<&'a AstNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a AstNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(kind: u16, text: &str, column: usize) -> AstNode {
        AstNode::leaf(Token::new(
            TokenId(kind),
            text,
            column - 1..column - 1 + text.len(),
            Position::new(1, column),
        ))
    }

    fn sum() -> AstNode {
        // (a + b)
        AstNode::element(
            ProductionId(1),
            vec![leaf(0, "a", 1), leaf(1, "+", 3), leaf(0, "b", 5)],
        )
    }

    #[test]
    fn test_accessors() {
        let node = sum();
        assert!(!node.is_leaf());
        assert_eq!(node.production(), Some(ProductionId(1)));
        assert_eq!(node.child_count(), 3);
        assert_eq!(node.child(1).and_then(AstNode::token_kind), Some(TokenId(1)));
        assert!(node.child(3).is_none());
        assert_eq!(node.position(), Some(Position::new(1, 1)));
        assert_eq!(node.last_token().map(|t| t.text.as_str()), Some("b"));
    }

    #[test]
    fn test_leaf_has_no_children() {
        let node = leaf(0, "x", 1);
        assert!(node.is_leaf());
        assert_eq!(node.production(), None);
        assert!(node.children().is_empty());
        assert_eq!(node.first_token().map(|t| t.text.as_str()), Some("x"));
    }

    #[test]
    fn test_descendants_pre_order() {
        let node = AstNode::element(ProductionId(2), vec![sum(), leaf(2, ";", 6)]);
        let texts: Vec<String> = node
            .descendants()
            .map(|n| match n.token() {
                Some(token) => token.text.clone(),
                None => format!("@{}", n.production().unwrap().0),
            })
            .collect();
        assert_eq!(texts, vec!["@2", "@1", "a", "+", "b", ";"]);
        assert_eq!(node.text(), "a + b ;");
    }

    #[test]
    fn test_deep_tree_drops_without_overflow() {
        let mut node = leaf(0, "a", 1);
        for _ in 0..200_000 {
            node = AstNode::element(ProductionId(1), vec![node, leaf(1, "+", 1), leaf(0, "a", 1)]);
        }
        assert_eq!(node.first_token().map(|t| t.text.as_str()), Some("a"));
        drop(node);
    }
}
