//! Property-based tests for the Chalk lexer and parser
//!
//! These check that arbitrary input never panics and that the rule table
//! classifies generated identifiers, keywords and token streams consistently.

use chalk::chalk::lang::{self, ChalkToken};
use chalk::chalk::lexer::{tokenize, Token};
use chalk::chalk::parse;
use proptest::prelude::*;

const KEYWORDS: &[&str] = &[
    "break", "continue", "do", "else", "for", "if", "return", "while", "function", "in", "null",
];

fn lex(source: &str) -> Vec<Token> {
    tokenize(lang::language().rules(), source.as_bytes()).expect("source lexes")
}

fn kind(token: &Token) -> ChalkToken {
    ChalkToken::from_id(token.kind).expect("chalk token kind")
}

fn identifier_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_]{0,12}".prop_filter("keywords are not identifiers", |s| {
        !KEYWORDS.contains(&s.as_str())
    })
}

fn blank_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just(" ".to_string()),
            Just("\t".to_string()),
            Just("\n".to_string()),
            Just("\r\n".to_string()),
            "// [a-z ]{0,10}\n",
            "/\\* [a-z\n ]{0,10} \\*/",
        ],
        0..8,
    )
    .prop_map(|pieces| pieces.concat())
}

/// Pieces that lex to exactly one token each when separated by a space.
fn piece_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "x", "while", "whilex", "in", "0x1f", "017", "42", "0", "\"s\"", "<<=", ">>", "?=", "?",
        "++", "-", "&&", "|", "(", ")", "{", "}", "[", "]", ";", ",", ":", "=", "==",
    ])
}

proptest! {
    #[test]
    fn identifiers_lex_as_one_token(ident in identifier_strategy()) {
        let tokens = lex(&ident);
        prop_assert_eq!(tokens.len(), 1);
        prop_assert_eq!(kind(&tokens[0]), ChalkToken::Identifier);
        prop_assert_eq!(&tokens[0].text, &ident);
    }

    #[test]
    fn keyword_prefixes_stay_identifiers(
        keyword in prop::sample::select(KEYWORDS.to_vec()),
        suffix in "[a-zA-Z0-9_]{1,6}",
    ) {
        let source = format!("{}{}", keyword, suffix);
        let tokens = lex(&source);
        prop_assert_eq!(tokens.len(), 1);
        prop_assert_eq!(kind(&tokens[0]), ChalkToken::Identifier);
    }

    #[test]
    fn blanks_and_comments_have_no_significant_tokens(source in blank_strategy()) {
        let language = lang::language();
        let mut tokens = language.significant_tokens(source.as_bytes());
        let first = tokens.next_token().expect("blank source lexes");
        prop_assert!(first.is_end_of_input());
    }

    #[test]
    fn spans_cover_token_text(pieces in prop::collection::vec(piece_strategy(), 0..16)) {
        let source = pieces.join(" ");
        let tokens = lex(&source);
        prop_assert_eq!(tokens.len(), pieces.len());
        for (token, piece) in tokens.iter().zip(&pieces) {
            prop_assert_eq!(&source[token.span.clone()], *piece);
            prop_assert_eq!(token.line(), 1);
            prop_assert_eq!(token.column(), token.span.start + 1);
        }
    }

    #[test]
    fn lexing_arbitrary_bytes_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let _ = tokenize(lang::language().rules(), &bytes);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn parsing_token_soup_never_panics(pieces in prop::collection::vec(piece_strategy(), 0..6)) {
        let source = pieces.join(" ");
        let _ = parse(source.as_bytes());
    }
}
