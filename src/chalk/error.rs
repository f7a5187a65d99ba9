//! Error types for lexing, parsing and grammar construction
//!
//! Input errors ([`LexError`], [`ParseError`]) carry the 1-based line/column of the
//! offending position. [`GrammarError`] is a developer error: it means a table or a
//! caller broke the contract of the engine, not that the script is malformed.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to classify the text at some position of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LexError {
    /// No ignore rule or token rule matched at this position
    #[error("malformed input at line {line}:{column}")]
    Malformed { line: usize, column: usize },
}

/// Machine-readable reason carried by a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// The lexer could not produce a token
    MalformedInput,
    /// No alternative of the start production consumed the whole input
    UnexpectedToken,
    /// Nonterminal recursion exceeded the configured limit
    NestingTooDeep,
}

impl ErrorCode {
    /// Stable kebab-case name, used in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::MalformedInput => "malformed-input",
            ErrorCode::UnexpectedToken => "unexpected-token",
            ErrorCode::NestingTooDeep => "nesting-too-deep",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed parse. There is never a partial tree alongside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{code} at line {line}:{column}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub code: ErrorCode,
}

impl ParseError {
    pub fn new(line: usize, column: usize, code: ErrorCode) -> Self {
        Self { line, column, code }
    }

    /// The one-line diagnostic reported for a script that failed to parse.
    pub fn diagnostic(&self, path: &str) -> String {
        format!(
            "Parsing script {} failed at line {}:{}: {}",
            path, self.line, self.column, self.code
        )
    }
}

impl From<LexError> for ParseError {
    fn from(error: LexError) -> Self {
        match error {
            LexError::Malformed { line, column } => {
                ParseError::new(line, column, ErrorCode::MalformedInput)
            }
        }
    }
}

/// Contract violations in token tables, grammar tables, or tree introspection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("invalid pattern for rule {name}: {message}")]
    InvalidPattern { name: String, message: String },

    #[error("{what} {name} declared with id {found}, expected {expected}")]
    OutOfOrder {
        what: &'static str,
        name: String,
        found: u16,
        expected: u16,
    },

    #[error("production {production} references undeclared production id {id}")]
    UndeclaredProduction { production: String, id: u16 },

    #[error("production {production} references unknown token id {id}")]
    UnknownToken { production: String, id: u16 },

    #[error("production {0} has no alternatives")]
    EmptyProduction(String),

    #[error("production {production} has an empty alternative at index {index}")]
    EmptyAlternative { production: String, index: usize },

    #[error("production {0} is left recursive but not flagged for flattening")]
    UnflaggedLeftRecursion(String),

    #[error("production {production} alternative {index} is only a self reference")]
    BareLeftRecursion { production: String, index: usize },

    #[error("left recursive production {0} has no seed alternative")]
    MissingSeed(String),

    #[error("indirect left recursion through {}", .0.join(" -> "))]
    IndirectLeftRecursion(Vec<String>),

    #[error("start production id {0} is not declared")]
    UnknownStart(u16),

    #[error("grammar names were requested for a token leaf")]
    LeafNode,
}

/// A script that failed to parse, tagged with its path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("Parsing script {} failed at line {}:{}: {}", .path.display(), .source.line, .source.column, .source.code)]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
}

impl ScriptError {
    pub fn parse_error(&self) -> &ParseError {
        match self {
            ScriptError::Parse { source, .. } => source,
        }
    }
}
