//! Token filtering between the lexer and the parser
//!
//! Comments are real tokens at the lexer layer (so tooling can see them) but the
//! grammar never mentions them. [`SignificantTokens`] pulls tokens until it finds
//! one whose kind is not in the filtered set.

use super::lexer_impl::Lexer;
use super::tokens::{Token, TokenId};
use crate::chalk::error::LexError;

pub struct SignificantTokens<'t, 's> {
    lexer: Lexer<'t, 's>,
    filtered: &'t [TokenId],
}

impl<'t, 's> SignificantTokens<'t, 's> {
    pub fn new(lexer: Lexer<'t, 's>, filtered: &'t [TokenId]) -> Self {
        Self { lexer, filtered }
    }

    /// Next token that is not filtered, or end of input.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        loop {
            let token = self.lexer.next_token()?;
            if !self.filtered.contains(&token.kind) {
                return Ok(token);
            }
            tracing::trace!(line = token.line(), column = token.column(), "skipping comment");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chalk::lexer::RuleTable;

    fn rules() -> RuleTable {
        RuleTable::builder()
            .token(TokenId(0), "MultilineComment", r"(?s)/\*.*?\*/")
            .token(TokenId(1), "Comment", r"//[^\n]*")
            .token(TokenId(2), "ID", r"[a-z]+")
            .ignore(r"[ \n]")
            .build()
            .unwrap()
    }

    const COMMENTS: &[TokenId] = &[TokenId(0), TokenId(1)];

    #[test]
    fn test_comments_are_skipped() {
        let rules = rules();
        let mut tokens = SignificantTokens::new(Lexer::new(&rules, b"a /* x\ny */ b // c\nd"), COMMENTS);
        let texts: Vec<String> = std::iter::from_fn(|| {
            let token = tokens.next_token().ok()?;
            (!token.is_end_of_input()).then_some(token.text)
        })
        .collect();
        assert_eq!(texts, vec!["a", "b", "d"]);
    }

    #[test]
    fn test_only_comments_yield_end_of_input() {
        let rules = rules();
        let mut tokens = SignificantTokens::new(Lexer::new(&rules, b" /* a */ // b\n /**/ "), COMMENTS);
        assert!(tokens.next_token().unwrap().is_end_of_input());
    }

    #[test]
    fn test_errors_pass_through() {
        let rules = rules();
        let mut tokens = SignificantTokens::new(Lexer::new(&rules, b"/* x */ 9"), COMMENTS);
        assert_eq!(tokens.next_token(), Err(LexError::Malformed { line: 1, column: 9 }));
    }
}
