//! Abstract syntax tree produced by the parser engine
//!
//! The tree shape follows the grammar directly: an [`AstNode::Element`] per
//! production that was not collapsed, an [`AstNode::Token`] per consumed token.
//! For a given production and alternative the child count and order are stable, so
//! an evaluator can match on the production and index children by arity.

pub mod node;
pub mod span;

pub use node::{AstNode, Descendants, Element};
pub use span::Position;
