//! Backtracking PEG interpreter over a [`Grammar`](crate::chalk::grammar::Grammar)
//!
//! Tokens are pulled from the lexer only when the engine first looks at a position
//! and are kept in a buffer, so trying another alternative is a matter of putting
//! the cursor back. Every inner step returns `Result<Option<_>, ParseError>`:
//! `Ok(None)` is an ordinary mismatch the caller may recover from by trying the
//! next alternative, `Err` ends the parse.

use crate::chalk::ast::AstNode;
use crate::chalk::error::{ErrorCode, ParseError};
use crate::chalk::grammar::{Production, ProductionId, Symbol};
use crate::chalk::language::Language;
use crate::chalk::lexer::{SignificantTokens, Token, TokenId};

/// Knobs of a single parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Report the furthest token any terminal failed to match instead of the
    /// token under the cursor once the start production gave up.
    pub report_furthest_failure: bool,
    /// Maximum nonterminal nesting before the parse is abandoned.
    pub max_depth: usize,
}

impl ParseOptions {
    pub const DEFAULT_MAX_DEPTH: usize = 512;
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            report_furthest_failure: true,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

/// One parse of one buffer.
pub struct Parser<'l, 's> {
    language: &'l Language,
    tokens: SignificantTokens<'l, 's>,
    buffer: Vec<Token>,
    cursor: usize,
    furthest: usize,
    depth: usize,
    options: ParseOptions,
}

impl<'l, 's> Parser<'l, 's> {
    pub fn new(language: &'l Language, input: &'s [u8], options: ParseOptions) -> Self {
        Self {
            language,
            tokens: language.significant_tokens(input),
            buffer: Vec::new(),
            cursor: 0,
            furthest: 0,
            depth: 0,
            options,
        }
    }

    /// Parse the whole buffer as the language's start production.
    pub fn parse(mut self) -> Result<AstNode, ParseError> {
        let start = self.language.start();
        tracing::debug!(language = self.language.name(), "parse started");

        if let Some(root) = self.production(start)? {
            if self.token_at(self.cursor)?.is_end_of_input() {
                tracing::debug!(tokens = self.cursor, "parse finished");
                return Ok(root);
            }
            tracing::debug!(cursor = self.cursor, "start production left trailing input");
            self.furthest = self.furthest.max(self.cursor);
        }
        Err(self.failure(ErrorCode::UnexpectedToken))
    }

    fn production(&mut self, id: ProductionId) -> Result<Option<AstNode>, ParseError> {
        if self.depth >= self.options.max_depth {
            tracing::debug!(depth = self.depth, "nesting limit reached");
            let token = self.token_at(self.cursor)?;
            return Err(ParseError::new(token.line(), token.column(), ErrorCode::NestingTooDeep));
        }
        let language = self.language;
        self.depth += 1;
        let result = self.expand(language.grammar().production(id));
        self.depth -= 1;
        result
    }

    /// Seed with the first matching non-left-recursive alternative, then grow the
    /// seed leftwards-nested for as long as a left-recursive tail matches.
    fn expand(&mut self, production: &'l Production) -> Result<Option<AstNode>, ParseError> {
        let start = self.cursor;
        let mut seed = None;
        for alternative in production.seeds() {
            if let Some(children) = self.sequence(alternative.symbols())? {
                seed = Some(build(production, children));
                break;
            }
            self.cursor = start;
        }
        let Some(mut node) = seed else {
            return Ok(None);
        };
        tracing::trace!(production = production.name(), from = start, to = self.cursor, "seed");

        if !production.is_left_recursive() {
            return Ok(Some(node));
        }
        'extend: loop {
            for tail in production.extensions() {
                let mark = self.cursor;
                if let Some(rest) = self.sequence(tail)? {
                    let mut children = Vec::with_capacity(rest.len() + 1);
                    children.push(node);
                    children.extend(rest);
                    node = AstNode::element(production.id(), children);
                    continue 'extend;
                }
                self.cursor = mark;
            }
            break;
        }
        Ok(Some(node))
    }

    fn sequence(&mut self, symbols: &'l [Symbol]) -> Result<Option<Vec<AstNode>>, ParseError> {
        let mut children = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            let child = match *symbol {
                Symbol::Terminal(kind) => self.terminal(kind)?,
                Symbol::Nonterminal(id) => self.production(id)?,
            };
            match child {
                Some(child) => children.push(child),
                None => return Ok(None),
            }
        }
        Ok(Some(children))
    }

    fn terminal(&mut self, kind: TokenId) -> Result<Option<AstNode>, ParseError> {
        let cursor = self.cursor;
        let token = self.token_at(cursor)?;
        if token.kind != kind {
            self.furthest = self.furthest.max(cursor);
            return Ok(None);
        }
        let leaf = AstNode::leaf(token.clone());
        self.cursor += 1;
        Ok(Some(leaf))
    }

    /// Token at `index`, lexing up to it first. Past the end this is the
    /// end-of-input token.
    fn token_at(&mut self, index: usize) -> Result<&Token, ParseError> {
        while self.buffer.len() <= index {
            if self.buffer.last().is_some_and(Token::is_end_of_input) {
                break;
            }
            let token = self.tokens.next_token()?;
            self.buffer.push(token);
        }
        let last = self.buffer.len() - 1;
        Ok(&self.buffer[index.min(last)])
    }

    fn failure(&mut self, code: ErrorCode) -> ParseError {
        let index = if self.options.report_furthest_failure {
            self.furthest.max(self.cursor)
        } else {
            self.cursor
        };
        match self.token_at(index) {
            Ok(token) => ParseError::new(token.line(), token.column(), code),
            Err(error) => error,
        }
    }
}

fn build(production: &Production, mut children: Vec<AstNode>) -> AstNode {
    if production.flags().collapse() && children.len() == 1 {
        if let Some(only) = children.pop() {
            return only;
        }
    }
    AstNode::element(production.id(), children)
}
