//! Implementation of the table-driven lexer
//!
//! The lexer walks a byte buffer with a cursor. Each call first consumes any run of
//! ignore-rule matches, then classifies the next piece of text with the first token
//! rule that matches it. Line and column are tracked by scanning consumed bytes.

use super::rules::RuleTable;
use super::tokens::{Token, TokenId};
use crate::chalk::ast::Position;
use crate::chalk::error::LexError;

/// Converts a buffer into tokens on demand.
#[derive(Debug, Clone)]
pub struct Lexer<'t, 's> {
    rules: &'t RuleTable,
    input: &'s [u8],
    offset: usize,
    position: Position,
    finished: bool,
}

impl<'t, 's> Lexer<'t, 's> {
    pub fn new(rules: &'t RuleTable, input: &'s [u8]) -> Self {
        Self {
            rules,
            input,
            offset: 0,
            position: Position::start(),
            finished: false,
        }
    }

    pub fn rules(&self) -> &'t RuleTable {
        self.rules
    }

    /// Current byte offset of the cursor
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Current line/column of the cursor
    pub fn position(&self) -> Position {
        self.position
    }

    /// Produce the next token, the end-of-input token, or a malformed-input error.
    ///
    /// Once the end is reached every further call returns the end-of-input token
    /// again. An error does not move the cursor, so it is reported again as well.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_ignored();

        let rest = &self.input[self.offset..];
        if rest.is_empty() {
            return Ok(Token::end_of_input(self.offset, self.position));
        }

        let Some((kind, len)) = self.rules.match_token(rest) else {
            tracing::debug!(
                line = self.position.line,
                column = self.position.column,
                "no token rule matched"
            );
            return Err(LexError::Malformed {
                line: self.position.line,
                column: self.position.column,
            });
        };

        Ok(self.consume(kind, len))
    }

    fn skip_ignored(&mut self) {
        while let Some(len) = self.rules.match_ignore(&self.input[self.offset..]) {
            self.advance(len);
        }
    }

    fn consume(&mut self, kind: TokenId, len: usize) -> Token {
        let start = self.offset;
        let position = self.position;
        self.advance(len);
        let text = String::from_utf8_lossy(&self.input[start..self.offset]);
        Token::new(kind, text, start..self.offset, position)
    }

    fn advance(&mut self, len: usize) {
        let end = self.offset + len;
        self.position.advance(&self.input[self.offset..end]);
        self.offset = end;
    }
}

impl Iterator for Lexer<'_, '_> {
    type Item = Result<Token, LexError>;

    /// Yields every token including comments, then stops at end of input. A lex
    /// error is yielded once and ends the iteration.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_token() {
            Ok(token) if token.is_end_of_input() => {
                self.finished = true;
                None
            }
            Ok(token) => Some(Ok(token)),
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

/// Convenience function to tokenize a buffer and collect all tokens, comments
/// included. Stops at the first malformed position.
pub fn tokenize(rules: &RuleTable, source: &[u8]) -> Result<Vec<Token>, LexError> {
    Lexer::new(rules, source).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> RuleTable {
        RuleTable::builder()
            .token(TokenId(0), "Comment", r"//[^\n]*")
            .token(TokenId(1), "if", r"if\b")
            .token(TokenId(2), "ID", r"[a-z]+")
            .token(TokenId(3), "NUM", r"[0-9]+")
            .token(TokenId(4), "==", r"==")
            .token(TokenId(5), "=", r"=")
            .ignore(r"[ \t\r\n]")
            .build()
            .unwrap()
    }

    fn kinds(tokens: &[Token]) -> Vec<u16> {
        tokens.iter().map(|t| t.kind.0).collect()
    }

    #[test]
    fn test_simple_tokenization() {
        let rules = rules();
        let tokens = tokenize(&rules, b"if x == 10").unwrap();
        assert_eq!(kinds(&tokens), vec![1, 2, 4, 3]);
        assert_eq!(tokens[2].text, "==");
        assert_eq!(tokens[3].span, 8..10);
    }

    #[test]
    fn test_positions_are_one_based() {
        let rules = rules();
        let tokens = tokenize(&rules, b"a\n  bb = 1\n\tc").unwrap();
        let positions: Vec<(usize, usize)> = tokens.iter().map(|t| (t.line(), t.column())).collect();
        assert_eq!(positions, vec![(1, 1), (2, 3), (2, 6), (2, 8), (3, 2)]);
    }

    #[test]
    fn test_comments_are_tokens() {
        let rules = rules();
        let tokens = tokenize(&rules, b"x // note\ny").unwrap();
        assert_eq!(kinds(&tokens), vec![2, 0, 2]);
        assert_eq!(tokens[1].text, "// note");
    }

    #[test]
    fn test_end_of_input_repeats() {
        let rules = rules();
        let mut lexer = Lexer::new(&rules, b"x  \n");
        assert_eq!(lexer.next_token().unwrap().kind, TokenId(2));
        let eof = lexer.next_token().unwrap();
        assert!(eof.is_end_of_input());
        assert_eq!(eof.position, Position::new(2, 1));
        assert_eq!(eof.span, 4..4);
        assert!(lexer.next_token().unwrap().is_end_of_input());
    }

    #[test]
    fn test_malformed_input_reports_position() {
        let rules = rules();
        let mut lexer = Lexer::new(&rules, b"x\n  @");
        assert!(lexer.next_token().is_ok());
        assert_eq!(
            lexer.next_token(),
            Err(LexError::Malformed { line: 2, column: 3 })
        );
        // the cursor does not move past the bad byte
        assert_eq!(lexer.offset(), 4);
    }

    #[test]
    fn test_iterator_stops_after_error() {
        let rules = rules();
        let items: Vec<_> = Lexer::new(&rules, b"x @ y").collect();
        assert_eq!(items.len(), 2);
        assert!(items[1].is_err());
    }

    #[test]
    fn test_empty_input() {
        let rules = rules();
        assert_eq!(tokenize(&rules, b"").unwrap(), vec![]);
        assert_eq!(tokenize(&rules, b" \n\t ").unwrap(), vec![]);
    }
}
