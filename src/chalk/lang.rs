//! The Chalk scripting language
//!
//! C-like statements and expressions with dictionary and list literals, `for in`
//! loops and a null-coalescing assignment (`?=`). The tables are built and
//! validated once, on first use, and shared by every parse afterwards.

pub mod grammar;
pub mod tokens;

pub use grammar::ChalkNode;
pub use tokens::ChalkToken;

use crate::chalk::error::GrammarError;
use crate::chalk::language::Language;
use once_cell::sync::Lazy;

static LANGUAGE: Lazy<Language> =
    Lazy::new(|| build().expect("built-in Chalk tables are valid"));

/// Assemble the Chalk [`Language`] from its tables.
pub fn build() -> Result<Language, GrammarError> {
    let rules = tokens::rule_table()?;
    let grammar = grammar::grammar(&rules)?;
    let filtered = tokens::COMMENT_TOKENS.iter().map(|&kind| kind.id()).collect();
    Language::new(
        "chalk",
        rules,
        grammar,
        ChalkNode::TranslationUnit.id(),
        filtered,
    )
}

/// The shared Chalk language definition.
pub fn language() -> &'static Language {
    &LANGUAGE
}
