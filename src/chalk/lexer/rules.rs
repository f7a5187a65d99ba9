//! Token rule table
//!
//! An ordered list of named patterns plus a list of ignore patterns. Matching is
//! first-match: the earliest rule whose pattern matches a non-empty prefix at the
//! cursor wins, even if a later rule would match more text. Tables therefore list
//! keywords before identifiers and `<<=` before `<<` before `<`.
//!
//! Patterns are compiled as byte regexes with Unicode disabled and anchored at the
//! start of the remaining input, so `\b` and `.` operate on ASCII bytes.

use super::tokens::TokenId;
use crate::chalk::error::GrammarError;
use regex::bytes::{Regex, RegexBuilder};

/// A named lexical pattern.
#[derive(Debug, Clone)]
pub struct TokenRule {
    id: TokenId,
    name: &'static str,
    source: &'static str,
    regex: Regex,
}

impl TokenRule {
    pub fn id(&self) -> TokenId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The pattern as written in the table
    pub fn pattern(&self) -> &'static str {
        self.source
    }

    /// Length of the match anchored at the start of `input`, if non-empty.
    pub fn match_len(&self, input: &[u8]) -> Option<usize> {
        anchored_len(&self.regex, input)
    }
}

/// Ordered token rules and ignore rules. Read-only once built.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<TokenRule>,
    ignore: Vec<Regex>,
}

impl RuleTable {
    pub fn builder() -> RuleTableBuilder {
        RuleTableBuilder::default()
    }

    pub fn rules(&self) -> &[TokenRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn contains(&self, id: TokenId) -> bool {
        id.index() < self.rules.len()
    }

    /// Rule name for a token kind; `"<eof>"` for the end-of-input sentinel.
    pub fn name(&self, id: TokenId) -> Option<&'static str> {
        if id.is_end_of_input() {
            return Some("<eof>");
        }
        self.rules.get(id.index()).map(TokenRule::name)
    }

    /// Look a rule up by name.
    pub fn find(&self, name: &str) -> Option<TokenId> {
        self.rules.iter().find(|rule| rule.name == name).map(|rule| rule.id)
    }

    /// Length of the first ignore-rule match at the start of `input`.
    pub fn match_ignore(&self, input: &[u8]) -> Option<usize> {
        self.ignore.iter().find_map(|regex| anchored_len(regex, input))
    }

    /// First token rule (in table order) matching a non-empty prefix of `input`.
    pub fn match_token(&self, input: &[u8]) -> Option<(TokenId, usize)> {
        self.rules
            .iter()
            .find_map(|rule| rule.match_len(input).map(|len| (rule.id, len)))
    }
}

/// Collects rules in declaration order and compiles them.
#[derive(Debug, Default)]
pub struct RuleTableBuilder {
    rules: Vec<(TokenId, &'static str, &'static str)>,
    ignore: Vec<&'static str>,
}

impl RuleTableBuilder {
    /// Append a token rule. `id` must equal the number of rules declared so far.
    pub fn token(mut self, id: impl Into<TokenId>, name: &'static str, pattern: &'static str) -> Self {
        self.rules.push((id.into(), name, pattern));
        self
    }

    /// Append an ignore rule.
    pub fn ignore(mut self, pattern: &'static str) -> Self {
        self.ignore.push(pattern);
        self
    }

    pub fn build(self) -> Result<RuleTable, GrammarError> {
        let mut rules = Vec::with_capacity(self.rules.len());
        for (index, (id, name, source)) in self.rules.into_iter().enumerate() {
            if id.index() != index {
                return Err(GrammarError::OutOfOrder {
                    what: "token",
                    name: name.to_string(),
                    found: id.0,
                    expected: index as u16,
                });
            }
            rules.push(TokenRule {
                id,
                name,
                source,
                regex: compile(name, source)?,
            });
        }

        let ignore = self
            .ignore
            .into_iter()
            .map(|source| compile("<ignore>", source))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::trace!(rules = rules.len(), ignore = ignore.len(), "compiled rule table");
        Ok(RuleTable { rules, ignore })
    }
}

fn compile(name: &str, source: &str) -> Result<Regex, GrammarError> {
    RegexBuilder::new(&format!(r"\A(?:{})", source))
        .unicode(false)
        .build()
        .map_err(|e| GrammarError::InvalidPattern {
            name: name.to_string(),
            message: e.to_string(),
        })
}

fn anchored_len(regex: &Regex, input: &[u8]) -> Option<usize> {
    regex
        .find(input)
        .map(|m| m.end())
        .filter(|&len| len > 0)
}
