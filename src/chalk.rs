//! Chalk scripting language front end
//!
//! Source bytes go through two stages:
//!
//! 1. [lexer]: an ordered table of anchored regex rules splits the buffer into
//!    tokens. Ignore rules (whitespace) are skipped; comments become tokens that
//!    the [filter](lexer::filter) hides from the parser.
//! 2. [parser]: a backtracking PEG engine interprets a declarative
//!    [grammar] and builds an [ast]. Left-recursive operator levels are run as
//!    loops and single-child wrappers are collapsed.
//!
//! [`language::Language`] bundles the tables for one language; [`lang`] holds the
//! Chalk tables, and [`driver`] is the entry point most callers want.

pub mod ast;
pub mod config;
pub mod driver;
pub mod error;
pub mod formats;
pub mod grammar;
pub mod lang;
pub mod language;
pub mod lexer;
pub mod parser;
pub mod testing;

pub use driver::{grammar_name, parse, parse_script, parse_with, token_name, Script};
