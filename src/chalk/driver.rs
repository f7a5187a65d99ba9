//! Entry points: parse a buffer or a named script
//!
//! [`parse`] and [`parse_with`] return the error to the caller and print nothing.
//! [`parse_script`] is the embedding entry point: it additionally writes the
//! one-line diagnostic for a failed script to the writer it is given.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::chalk::ast::AstNode;
use crate::chalk::error::{GrammarError, ParseError, ScriptError};
use crate::chalk::lang;
use crate::chalk::language::Language;
use crate::chalk::lexer::TokenId;
use crate::chalk::parser::{ParseOptions, Parser};

/// Source text together with the name it is reported under.
#[derive(Debug, Clone, Copy)]
pub struct Script<'a> {
    pub path: &'a Path,
    pub data: &'a [u8],
}

impl<'a> Script<'a> {
    pub fn new(path: &'a Path, data: &'a [u8]) -> Self {
        Self { path, data }
    }
}

/// Parse a Chalk buffer with default options.
pub fn parse(buffer: &[u8]) -> Result<AstNode, ParseError> {
    parse_with(lang::language(), buffer, ParseOptions::default())
}

/// Parse `buffer` as `language`.
pub fn parse_with(
    language: &Language,
    buffer: &[u8],
    options: ParseOptions,
) -> Result<AstNode, ParseError> {
    Parser::new(language, buffer, options).parse()
}

/// Parse a Chalk script, reporting a failure on `diagnostics`.
pub fn parse_script<W: Write>(
    script: Script<'_>,
    options: ParseOptions,
    diagnostics: &mut W,
) -> Result<AstNode, ScriptError> {
    tracing::debug!(path = %script.path.display(), bytes = script.data.len(), "parsing script");
    parse_with(lang::language(), script.data, options).map_err(|source| {
        let error = ScriptError::Parse {
            path: PathBuf::from(script.path),
            source,
        };
        // a closed diagnostics stream must not hide the parse error
        if let Err(io) = writeln!(diagnostics, "{}", error) {
            tracing::debug!(error = %io, "could not write diagnostic");
        }
        error
    })
}

/// Production name of a Chalk element. Leaves have none.
pub fn grammar_name(node: &AstNode) -> Result<&'static str, GrammarError> {
    lang::language().grammar_name(node)
}

/// Rule name of a Chalk token kind.
pub fn token_name(kind: TokenId) -> Option<&'static str> {
    lang::language().token_name(kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chalk::error::ErrorCode;
    use crate::chalk::lang::{ChalkNode, ChalkToken};

    #[test]
    fn test_parse_script_success_is_silent() {
        let mut diagnostics = Vec::new();
        let script = Script::new(Path::new("ok.chalk"), b"x = 1;");
        let root = parse_script(script, ParseOptions::default(), &mut diagnostics).unwrap();
        assert_eq!(grammar_name(&root), Ok("TranslationUnit"));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_parse_script_failure_writes_one_line() {
        let mut diagnostics = Vec::new();
        let script = Script::new(Path::new("scripts/bad.chalk"), b"x = ;");
        let error = parse_script(script, ParseOptions::default(), &mut diagnostics).unwrap_err();
        assert_eq!(
            error.parse_error(),
            &ParseError::new(1, 5, ErrorCode::UnexpectedToken)
        );
        assert_eq!(
            String::from_utf8(diagnostics).unwrap(),
            "Parsing script scripts/bad.chalk failed at line 1:5: unexpected-token\n"
        );
    }

    #[test]
    fn test_malformed_input_diagnostic() {
        let mut diagnostics = Vec::new();
        let script = Script::new(Path::new("at.chalk"), b"a = 1;\nb = @;");
        parse_script(script, ParseOptions::default(), &mut diagnostics).unwrap_err();
        assert_eq!(
            String::from_utf8(diagnostics).unwrap(),
            "Parsing script at.chalk failed at line 2:5: malformed-input\n"
        );
    }

    #[test]
    fn test_names() {
        let root = parse(b"f();").unwrap();
        let call = root.child(0).unwrap().child(0).unwrap();
        assert_eq!(grammar_name(call), Ok("PostfixExpression"));
        assert_eq!(call.production(), Some(ChalkNode::PostfixExpression.id()));

        let callee = call.child(0).unwrap();
        assert_eq!(grammar_name(callee), Err(GrammarError::LeafNode));
        assert_eq!(callee.token_kind().and_then(token_name), Some("ID"));
        assert_eq!(token_name(ChalkToken::OpenParentheses.id()), Some("("));
        assert_eq!(token_name(TokenId::END_OF_INPUT), Some("<eof>"));
    }
}
