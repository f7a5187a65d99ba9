//! Lexer module for the chalk front end
//!
//! This module contains the table-driven tokenizer: the ordered rule table, the
//! lexer that applies it to a byte buffer, and the filter that hides comments from
//! the parser.
//!
//! Rule Ordering
//!
//! Matching is first-match, not longest-match. A table is correct only if every
//! more specific pattern is listed before the general patterns that would also
//! match a prefix of the same text:
//! - keywords (`while\b`) before identifiers,
//! - `>>=` before `>>` before `>`,
//! - comments before `/=` and `/`.

pub mod filter;
pub mod lexer_impl;
pub mod rules;
pub mod tokens;

pub use filter::SignificantTokens;
pub use lexer_impl::{tokenize, Lexer};
pub use rules::{RuleTable, RuleTableBuilder, TokenRule};
pub use tokens::{Token, TokenId};
