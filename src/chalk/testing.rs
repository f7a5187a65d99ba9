//! Fluent assertions for syntax trees
//!
//! Tree tests should check the shape and content of the whole tree, not just a
//! node count. `assert_node` walks the tree with closures so a test reads like
//! the tree it expects:
//!
//! ```rust,ignore
//! let root = parse(b"return x + 1;").unwrap();
//! assert_node(&root)
//!     .production("TranslationUnit")
//!     .child(0, |jump| {
//!         jump.production("JumpStatement")
//!             .child_count(3)
//!             .child(1, |sum| {
//!                 sum.production("AdditiveExpression").text("x + 1");
//!             });
//!     });
//! ```
//!
//! Failure messages name the path from the root (`root[0][1]`) and what was found
//! there.

use crate::chalk::ast::AstNode;
use crate::chalk::lang;
use crate::chalk::language::Language;

/// Start assertions on a Chalk tree.
pub fn assert_node(node: &AstNode) -> NodeAssertion<'_> {
    assert_node_in(lang::language(), node)
}

/// Start assertions on a tree of any language.
pub fn assert_node_in<'a>(language: &'a Language, node: &'a AstNode) -> NodeAssertion<'a> {
    NodeAssertion {
        language,
        node,
        context: "root".to_string(),
    }
}

pub struct NodeAssertion<'a> {
    language: &'a Language,
    node: &'a AstNode,
    context: String,
}

impl<'a> NodeAssertion<'a> {
    fn describe(&self) -> String {
        match self.node {
            AstNode::Element(_) => format!(
                "{} element with {} children",
                self.language.node_name(self.node),
                self.node.child_count()
            ),
            AstNode::Token(token) => format!(
                "{} leaf '{}'",
                self.language.node_name(self.node),
                token.text
            ),
        }
    }

    /// Assert this is an element built from the named production.
    pub fn production(self, name: &str) -> Self {
        assert!(
            !self.node.is_leaf() && self.language.node_name(self.node) == name,
            "{}: expected {} element, found {}",
            self.context,
            name,
            self.describe()
        );
        self
    }

    /// Assert this is a leaf of the named token kind with the given text.
    pub fn token(self, name: &str, text: &str) -> Self {
        let matches = self.node.token().is_some_and(|token| {
            token.text == text && self.language.node_name(self.node) == name
        });
        assert!(
            matches,
            "{}: expected {} leaf '{}', found {}",
            self.context,
            name,
            text,
            self.describe()
        );
        self
    }

    pub fn is_leaf(self) -> Self {
        assert!(
            self.node.is_leaf(),
            "{}: expected a leaf, found {}",
            self.context,
            self.describe()
        );
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        assert_eq!(
            self.node.child_count(),
            expected,
            "{}: expected {} children, found {}",
            self.context,
            expected,
            self.describe()
        );
        self
    }

    /// Space-joined token text under this node.
    pub fn text(self, expected: &str) -> Self {
        assert_eq!(self.node.text(), expected, "{}: text mismatch", self.context);
        self
    }

    /// Position of the first token under this node.
    pub fn position(self, line: usize, column: usize) -> Self {
        let actual = self.node.position().map(|p| (p.line, p.column));
        assert_eq!(
            actual,
            Some((line, column)),
            "{}: position mismatch on {}",
            self.context,
            self.describe()
        );
        self
    }

    /// Assert on one child.
    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>),
    {
        let child = self.node.child(index).unwrap_or_else(|| {
            panic!(
                "{}: child index {} out of bounds, found {}",
                self.context,
                index,
                self.describe()
            )
        });
        assertion(NodeAssertion {
            language: self.language,
            node: child,
            context: format!("{}[{}]", self.context, index),
        });
        self
    }

    /// Assert on every child, in order.
    pub fn children<F>(self, mut assertion: F) -> Self
    where
        F: FnMut(usize, NodeAssertion<'a>),
    {
        for (index, child) in self.node.children().iter().enumerate() {
            assertion(
                index,
                NodeAssertion {
                    language: self.language,
                    node: child,
                    context: format!("{}[{}]", self.context, index),
                },
            );
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chalk::driver;

    #[test]
    fn test_fluent_walk() {
        let root = driver::parse(b"return x + 1;").unwrap();
        assert_node(&root)
            .production("TranslationUnit")
            .child_count(1)
            .child(0, |jump| {
                jump.production("JumpStatement")
                    .child_count(3)
                    .child(0, |keyword| {
                        keyword.token("return", "return").position(1, 1);
                    })
                    .child(1, |sum| {
                        sum.production("AdditiveExpression").text("x + 1");
                    })
                    .child(2, |semi| {
                        semi.is_leaf().token(";", ";");
                    });
            });
    }

    #[test]
    #[should_panic(expected = "root[0]: expected SelectionStatement element, found JumpStatement")]
    fn test_failure_names_path() {
        let root = driver::parse(b"break;").unwrap();
        assert_node(&root).child(0, |node| {
            node.production("SelectionStatement");
        });
    }
}
