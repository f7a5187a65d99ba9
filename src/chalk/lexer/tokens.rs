//! Token definitions shared by the lexer and the parser engine
//!
//! A token kind is a [`TokenId`]: the position of the rule that produced it in the
//! rule table. Languages usually wrap these ids in an enum of their own (see
//! [`ChalkToken`](crate::chalk::lang::ChalkToken)); the engine only ever compares ids.

use crate::chalk::ast::Position;
use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// Stable offset of a rule in a [`RuleTable`](super::RuleTable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TokenId(pub u16);

impl TokenId {
    /// Sentinel kind of the token returned once the buffer is exhausted.
    pub const END_OF_INPUT: TokenId = TokenId(u16::MAX);

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn is_end_of_input(self) -> bool {
        self == Self::END_OF_INPUT
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_end_of_input() {
            f.write_str("<eof>")
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

/// A classified piece of source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenId,
    pub text: String,
    /// Byte range in the lexed buffer
    pub span: Range<usize>,
    /// Position of the first character
    pub position: Position,
}

impl Token {
    pub fn new(kind: TokenId, text: impl Into<String>, span: Range<usize>, position: Position) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
            position,
        }
    }

    /// The end-of-input token positioned just past the last character.
    pub fn end_of_input(offset: usize, position: Position) -> Self {
        Self::new(TokenId::END_OF_INPUT, "", offset..offset, position)
    }

    pub fn is_end_of_input(&self) -> bool {
        self.kind.is_end_of_input()
    }

    pub fn line(&self) -> usize {
        self.position.line
    }

    pub fn column(&self) -> usize {
        self.position.column
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_of_input_token() {
        let token = Token::end_of_input(10, Position::new(2, 4));
        assert!(token.is_end_of_input());
        assert_eq!(token.span, 10..10);
        assert_eq!(token.text, "");
        assert_eq!((token.line(), token.column()), (2, 4));
    }

    #[test]
    fn test_token_id_display() {
        assert_eq!(TokenId(7).to_string(), "#7");
        assert_eq!(TokenId::END_OF_INPUT.to_string(), "<eof>");
    }
}
