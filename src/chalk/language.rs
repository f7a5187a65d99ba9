//! A language definition: token rules, grammar, start symbol and filtered kinds
//!
//! Everything here is read-only after construction. A `Language` is `Send + Sync`
//! and is shared by reference between any number of concurrent parses; each parse
//! owns its own lexer and engine state.

use crate::chalk::ast::AstNode;
use crate::chalk::error::GrammarError;
use crate::chalk::grammar::{Grammar, ProductionId};
use crate::chalk::lexer::{Lexer, RuleTable, SignificantTokens, TokenId};

#[derive(Debug, Clone)]
pub struct Language {
    name: &'static str,
    rules: RuleTable,
    grammar: Grammar,
    start: ProductionId,
    filtered: Vec<TokenId>,
}

impl Language {
    /// Bundle validated tables. `filtered` lists token kinds the parser never sees
    /// (comments).
    pub fn new(
        name: &'static str,
        rules: RuleTable,
        grammar: Grammar,
        start: ProductionId,
        filtered: Vec<TokenId>,
    ) -> Result<Self, GrammarError> {
        if grammar.get(start).is_none() {
            return Err(GrammarError::UnknownStart(start.0));
        }
        if let Some(unknown) = filtered.iter().find(|id| !rules.contains(**id)) {
            return Err(GrammarError::UnknownToken {
                production: "<filtered>".to_string(),
                id: unknown.0,
            });
        }
        Ok(Self {
            name,
            rules,
            grammar,
            start,
            filtered,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn start(&self) -> ProductionId {
        self.start
    }

    pub fn filtered(&self) -> &[TokenId] {
        &self.filtered
    }

    /// Raw lexer over `input`, comments included.
    pub fn lexer<'s>(&self, input: &'s [u8]) -> Lexer<'_, 's> {
        Lexer::new(&self.rules, input)
    }

    /// Lexer over `input` with filtered kinds removed, as the parser sees it.
    pub fn significant_tokens<'s>(&self, input: &'s [u8]) -> SignificantTokens<'_, 's> {
        SignificantTokens::new(self.lexer(input), &self.filtered)
    }

    /// Declared name of the production a node was built from.
    ///
    /// Leaves wrap tokens and have no production; asking for their grammar name is
    /// a contract violation reported as [`GrammarError::LeafNode`]. Use
    /// [`token_name`](Self::token_name) for leaves.
    pub fn grammar_name(&self, node: &AstNode) -> Result<&'static str, GrammarError> {
        let id = node.production().ok_or(GrammarError::LeafNode)?;
        self.grammar
            .name(id)
            .ok_or_else(|| GrammarError::UndeclaredProduction {
                production: "<node>".to_string(),
                id: id.0,
            })
    }

    /// Rule name of a token kind.
    pub fn token_name(&self, kind: TokenId) -> Option<&'static str> {
        self.rules.name(kind)
    }

    /// Display name for any node: production name or token rule name.
    pub fn node_name(&self, node: &AstNode) -> &'static str {
        match node {
            AstNode::Element(element) => self.grammar.name(element.production()).unwrap_or("?"),
            AstNode::Token(token) => self.rules.name(token.kind).unwrap_or("?"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chalk::grammar::{Flags, Symbol};

    fn parts() -> (RuleTable, Grammar) {
        let rules = RuleTable::builder()
            .token(TokenId(0), "Comment", r"#[^\n]*")
            .token(TokenId(1), "x", "x")
            .build()
            .unwrap();
        let grammar = Grammar::builder()
            .production(ProductionId(0), "Item", Flags::NONE, &[&[Symbol::Terminal(TokenId(1))]])
            .build(&rules)
            .unwrap();
        (rules, grammar)
    }

    #[test]
    fn test_unknown_start_is_rejected() {
        let (rules, grammar) = parts();
        let result = Language::new("t", rules, grammar, ProductionId(4), vec![]);
        assert_eq!(result.err(), Some(GrammarError::UnknownStart(4)));
    }

    #[test]
    fn test_unknown_filtered_kind_is_rejected() {
        let (rules, grammar) = parts();
        let result = Language::new("t", rules, grammar, ProductionId(0), vec![TokenId(7)]);
        assert!(matches!(result, Err(GrammarError::UnknownToken { id: 7, .. })));
    }

    #[test]
    fn test_grammar_name_of_leaf_is_misuse() {
        let (rules, grammar) = parts();
        let language = Language::new("t", rules, grammar, ProductionId(0), vec![TokenId(0)]).unwrap();
        let token = language.lexer(b"x").next_token().unwrap();
        let leaf = AstNode::leaf(token.clone());
        assert_eq!(language.grammar_name(&leaf), Err(GrammarError::LeafNode));
        assert_eq!(language.node_name(&leaf), "x");

        let element = AstNode::element(ProductionId(0), vec![AstNode::leaf(token)]);
        assert_eq!(language.grammar_name(&element), Ok("Item"));
    }

    #[test]
    fn test_language_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Language>();
    }
}
