//! Chalk token kinds and the ordered rule table
//!
//! The discriminant of each [`ChalkToken`] is its [`TokenId`]: the row of
//! [`TOKEN_RULES`] that produces it. Row order is the lexer's priority order.

use crate::chalk::error::GrammarError;
use crate::chalk::lexer::{RuleTable, TokenId};
use num_enum::{IntoPrimitive, TryFromPrimitive};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u16)]
pub enum ChalkToken {
    MultilineComment,
    Comment,
    Break,
    Continue,
    Do,
    Else,
    For,
    If,
    Return,
    While,
    Function,
    In,
    Null,
    Identifier,
    HexInteger,
    OctalInteger,
    DecimalInteger,
    StringLiteral,
    RightAssign,
    LeftAssign,
    AddAssign,
    SubtractAssign,
    MultiplyAssign,
    DivideAssign,
    ModuloAssign,
    AndAssign,
    XorAssign,
    OrAssign,
    NullAssign,
    RightShift,
    LeftShift,
    Increment,
    Decrement,
    LogicalAnd,
    LogicalOr,
    LessOrEqual,
    GreaterOrEqual,
    IsEqual,
    IsNotEqual,
    Semicolon,
    OpenBrace,
    CloseBrace,
    Comma,
    Colon,
    Assign,
    OpenParentheses,
    CloseParentheses,
    OpenBracket,
    CloseBracket,
    BitAnd,
    LogicalNot,
    BitNot,
    Minus,
    Plus,
    Asterisk,
    Divide,
    Modulo,
    LessThan,
    GreaterThan,
    Xor,
    BitOr,
    Question,
}

impl ChalkToken {
    pub fn from_id(id: TokenId) -> Option<Self> {
        Self::try_from(id.0).ok()
    }

    pub fn id(self) -> TokenId {
        TokenId(self.into())
    }
}

impl From<ChalkToken> for TokenId {
    fn from(token: ChalkToken) -> Self {
        token.id()
    }
}

/// Kinds hidden from the grammar.
pub const COMMENT_TOKENS: [ChalkToken; 2] = [ChalkToken::MultilineComment, ChalkToken::Comment];

/// Whitespace: each character is consumed by its own match.
pub const IGNORE_RULES: &[&str] = &[r"[ \t\x0B\r\n\x0C]"];

/// (kind, name, pattern) in priority order.
pub const TOKEN_RULES: &[(ChalkToken, &str, &str)] = &[
    (ChalkToken::MultilineComment, "MultilineComment", r"(?s)/\*.*?\*/"),
    (ChalkToken::Comment, "Comment", r"//(\\.|[^\n])*"),
    (ChalkToken::Break, "break", r"break\b"),
    (ChalkToken::Continue, "continue", r"continue\b"),
    (ChalkToken::Do, "do", r"do\b"),
    (ChalkToken::Else, "else", r"else\b"),
    (ChalkToken::For, "for", r"for\b"),
    (ChalkToken::If, "if", r"if\b"),
    (ChalkToken::Return, "return", r"return\b"),
    (ChalkToken::While, "while", r"while\b"),
    (ChalkToken::Function, "function", r"function\b"),
    (ChalkToken::In, "in", r"in\b"),
    (ChalkToken::Null, "null", r"null\b"),
    (ChalkToken::Identifier, "ID", r"[a-zA-Z_][a-zA-Z_0-9]*"),
    (ChalkToken::HexInteger, "HEXINT", r"0[xX][a-fA-F0-9]+"),
    (ChalkToken::OctalInteger, "OCTINT", r"0[0-7]+"),
    (ChalkToken::DecimalInteger, "DECINT", r"[0-9]+"),
    (ChalkToken::StringLiteral, "STRING", r#"L?"(\\.|[^\\"])*""#),
    (ChalkToken::RightAssign, ">>=", r">>="),
    (ChalkToken::LeftAssign, "<<=", r"<<="),
    (ChalkToken::AddAssign, "+=", r"\+="),
    (ChalkToken::SubtractAssign, "-=", r"-="),
    (ChalkToken::MultiplyAssign, "*=", r"\*="),
    (ChalkToken::DivideAssign, "/=", r"/="),
    (ChalkToken::ModuloAssign, "%=", r"%="),
    (ChalkToken::AndAssign, "&=", r"&="),
    (ChalkToken::XorAssign, "^=", r"\^="),
    (ChalkToken::OrAssign, "|=", r"\|="),
    (ChalkToken::NullAssign, "?=", r"\?="),
    (ChalkToken::RightShift, ">>", r">>"),
    (ChalkToken::LeftShift, "<<", r"<<"),
    (ChalkToken::Increment, "++", r"\+\+"),
    (ChalkToken::Decrement, "--", r"--"),
    (ChalkToken::LogicalAnd, "&&", r"&&"),
    (ChalkToken::LogicalOr, "||", r"\|\|"),
    (ChalkToken::LessOrEqual, "<=", r"<="),
    (ChalkToken::GreaterOrEqual, ">=", r">="),
    (ChalkToken::IsEqual, "==", r"=="),
    (ChalkToken::IsNotEqual, "!=", r"!="),
    (ChalkToken::Semicolon, ";", r";"),
    (ChalkToken::OpenBrace, "{", r"\{"),
    (ChalkToken::CloseBrace, "}", r"\}"),
    (ChalkToken::Comma, ",", r","),
    (ChalkToken::Colon, ":", r":"),
    (ChalkToken::Assign, "=", r"="),
    (ChalkToken::OpenParentheses, "(", r"\("),
    (ChalkToken::CloseParentheses, ")", r"\)"),
    (ChalkToken::OpenBracket, "[", r"\["),
    (ChalkToken::CloseBracket, "]", r"\]"),
    (ChalkToken::BitAnd, "&", r"&"),
    (ChalkToken::LogicalNot, "!", r"!"),
    (ChalkToken::BitNot, "~", r"~"),
    (ChalkToken::Minus, "-", r"-"),
    (ChalkToken::Plus, "+", r"\+"),
    (ChalkToken::Asterisk, "*", r"\*"),
    (ChalkToken::Divide, "/", r"/"),
    (ChalkToken::Modulo, "%", r"%"),
    (ChalkToken::LessThan, "<", r"<"),
    (ChalkToken::GreaterThan, ">", r">"),
    (ChalkToken::Xor, "^", r"\^"),
    (ChalkToken::BitOr, "|", r"\|"),
    (ChalkToken::Question, "?", r"\?"),
];

pub fn rule_table() -> Result<RuleTable, GrammarError> {
    let builder = TOKEN_RULES
        .iter()
        .fold(RuleTable::builder(), |builder, &(kind, name, pattern)| {
            builder.token(kind, name, pattern)
        });
    IGNORE_RULES
        .iter()
        .fold(builder, |builder, &pattern| builder.ignore(pattern))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chalk::lexer::tokenize;

    fn lex(source: &str) -> Vec<ChalkToken> {
        let rules = rule_table().unwrap();
        tokenize(&rules, source.as_bytes())
            .unwrap()
            .into_iter()
            .map(|token| ChalkToken::from_id(token.kind).unwrap())
            .collect()
    }

    #[test]
    fn test_table_covers_every_kind_in_order() {
        for (index, (kind, _, _)) in TOKEN_RULES.iter().enumerate() {
            assert_eq!(u16::from(*kind) as usize, index);
        }
        assert_eq!(TOKEN_RULES.len(), ChalkToken::Question as usize + 1);
    }

    #[test]
    fn test_keywords_and_near_misses() {
        assert_eq!(lex("while"), vec![ChalkToken::While]);
        assert_eq!(lex("whilex"), vec![ChalkToken::Identifier]);
        assert_eq!(lex("in int"), vec![ChalkToken::In, ChalkToken::Identifier]);
        assert_eq!(lex("do done"), vec![ChalkToken::Do, ChalkToken::Identifier]);
        assert_eq!(lex("null_"), vec![ChalkToken::Identifier]);
    }

    #[test]
    fn test_compound_operators() {
        assert_eq!(lex("<<="), vec![ChalkToken::LeftAssign]);
        assert_eq!(lex(">>= >> >"), vec![ChalkToken::RightAssign, ChalkToken::RightShift, ChalkToken::GreaterThan]);
        assert_eq!(lex("a--b"), vec![ChalkToken::Identifier, ChalkToken::Decrement, ChalkToken::Identifier]);
        assert_eq!(lex("x ?= y ? z"), vec![
            ChalkToken::Identifier,
            ChalkToken::NullAssign,
            ChalkToken::Identifier,
            ChalkToken::Question,
            ChalkToken::Identifier,
        ]);
    }

    #[test]
    fn test_integer_literals() {
        assert_eq!(lex("0x1F"), vec![ChalkToken::HexInteger]);
        assert_eq!(lex("017"), vec![ChalkToken::OctalInteger]);
        assert_eq!(lex("0"), vec![ChalkToken::DecimalInteger]);
        assert_eq!(lex("42"), vec![ChalkToken::DecimalInteger]);
    }

    #[test]
    fn test_string_literals() {
        assert_eq!(lex(r#""a \"quoted\" word""#), vec![ChalkToken::StringLiteral]);
        assert_eq!(lex(r#"L"wide""#), vec![ChalkToken::StringLiteral]);
    }

    #[test]
    fn test_comments_before_division() {
        assert_eq!(lex("a /= b / c"), vec![
            ChalkToken::Identifier,
            ChalkToken::DivideAssign,
            ChalkToken::Identifier,
            ChalkToken::Divide,
            ChalkToken::Identifier,
        ]);
        assert_eq!(lex("a // b\n/* c\n d */"), vec![
            ChalkToken::Identifier,
            ChalkToken::Comment,
            ChalkToken::MultilineComment,
        ]);
    }
}
