//! Snapshot tests for rendered trees and token streams

use chalk::chalk::config::load_defaults;
use chalk::chalk::formats::{render, OutputFormat};
use chalk::chalk::lang;
use chalk::chalk::lexer::tokenize;
use chalk::chalk::parse;

fn treeviz(source: &str) -> String {
    let config = load_defaults().expect("defaults to deserialize");
    let root = parse(source.as_bytes()).expect("source parses");
    render(lang::language(), &root, OutputFormat::Treeviz, &config.output).expect("render")
}

fn token_lines(source: &str) -> String {
    let language = lang::language();
    tokenize(language.rules(), source.as_bytes())
        .expect("source lexes")
        .iter()
        .map(|token| {
            format!(
                "{} {} {}",
                token.position,
                language.token_name(token.kind).unwrap_or("?"),
                token.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_if_else_treeviz() {
    let output = treeviz("if (a) b = 1; else c();");
    insta::assert_snapshot!(output.trim_end(), @r"
    └─ TranslationUnit: if ( a ) b = 1 ; else c ( ) ;
      └─ SelectionStatement: if ( a ) b = 1 ; else c ( ) ;
        ├─ if: if
        ├─ (: (
        ├─ ID: a
        ├─ ): )
        ├─ ExpressionStatement: b = 1 ;
        │ ├─ AssignmentExpression: b = 1
        │ │ ├─ ID: b
        │ │ ├─ AssignmentOperator: =
        │ │ │ └─ =: =
        │ │ └─ DECINT: 1
        │ └─ ;: ;
        ├─ else: else
        └─ ExpressionStatement: c ( ) ;
          ├─ PostfixExpression: c ( )
          │ ├─ ID: c
          │ ├─ (: (
          │ └─ ): )
          └─ ;: ;
    ");
}

#[test]
fn test_token_stream_keeps_comments() {
    let output = token_lines("x <<= 0x1F; // c\nwhilex");
    insta::assert_snapshot!(output, @r"
    1:1 ID x
    1:3 <<= <<=
    1:7 HEXINT 0x1F
    1:11 ; ;
    1:13 Comment // c
    2:1 ID whilex
    ");
}
