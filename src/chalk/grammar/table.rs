//! Grammar table: named productions with ordered alternatives
//!
//! The table is pure data. A production's alternatives are tried in listed order by
//! the [engine](crate::chalk::parser::engine) and the first success wins, so the
//! order of alternatives is part of the grammar (dangling else is resolved by
//! listing the else-binding alternative first).

use super::symbol::{Flags, ProductionId, Symbol};
use super::validate;
use crate::chalk::error::GrammarError;
use crate::chalk::lexer::RuleTable;

/// One candidate sequence of symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alternative {
    symbols: Vec<Symbol>,
}

impl Alternative {
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Self { symbols }
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Whether the first symbol names `owner` itself.
    pub fn is_left_recursive(&self, owner: ProductionId) -> bool {
        self.symbols.first() == Some(&Symbol::Nonterminal(owner))
    }
}

/// A named nonterminal.
#[derive(Debug, Clone)]
pub struct Production {
    id: ProductionId,
    name: &'static str,
    flags: Flags,
    alternatives: Vec<Alternative>,
}

impl Production {
    pub fn id(&self) -> ProductionId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn alternatives(&self) -> &[Alternative] {
        &self.alternatives
    }

    /// Alternatives that do not start with a self reference, in order.
    pub fn seeds(&self) -> impl Iterator<Item = &Alternative> + '_ {
        self.alternatives
            .iter()
            .filter(move |alt| !alt.is_left_recursive(self.id))
    }

    /// Symbols after the leading self reference of each left-recursive alternative,
    /// in order.
    pub fn extensions(&self) -> impl Iterator<Item = &[Symbol]> + '_ {
        self.alternatives
            .iter()
            .filter(move |alt| alt.is_left_recursive(self.id))
            .map(|alt| &alt.symbols()[1..])
    }

    pub fn is_left_recursive(&self) -> bool {
        self.alternatives.iter().any(|alt| alt.is_left_recursive(self.id))
    }
}

/// Validated, read-only set of productions.
#[derive(Debug, Clone)]
pub struct Grammar {
    productions: Vec<Production>,
}

impl Grammar {
    pub fn builder() -> GrammarBuilder {
        GrammarBuilder::default()
    }

    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    pub fn len(&self) -> usize {
        self.productions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.productions.is_empty()
    }

    pub fn get(&self, id: ProductionId) -> Option<&Production> {
        self.productions.get(id.index())
    }

    /// The production with this id.
    ///
    /// # Panics
    ///
    /// If `id` was not declared in this grammar. Every id reachable from a
    /// validated grammar is declared.
    pub fn production(&self, id: ProductionId) -> &Production {
        &self.productions[id.index()]
    }

    pub fn name(&self, id: ProductionId) -> Option<&'static str> {
        self.get(id).map(Production::name)
    }

    pub fn find(&self, name: &str) -> Option<ProductionId> {
        self.productions
            .iter()
            .find(|production| production.name == name)
            .map(Production::id)
    }
}

/// Collects productions in declaration order.
#[derive(Debug, Default)]
pub struct GrammarBuilder {
    productions: Vec<Production>,
}

impl GrammarBuilder {
    /// Append a production. `id` must equal the number of productions declared so far.
    pub fn production(
        mut self,
        id: impl Into<ProductionId>,
        name: &'static str,
        flags: Flags,
        alternatives: &[&[Symbol]],
    ) -> Self {
        self.productions.push(Production {
            id: id.into(),
            name,
            flags,
            alternatives: alternatives
                .iter()
                .map(|symbols| Alternative::new(symbols.to_vec()))
                .collect(),
        });
        self
    }

    /// Validate against the rule table the terminals refer to.
    pub fn build(self, tokens: &RuleTable) -> Result<Grammar, GrammarError> {
        let grammar = Grammar {
            productions: self.productions,
        };
        validate::validate(&grammar, tokens)?;
        tracing::trace!(productions = grammar.len(), "validated grammar");
        Ok(grammar)
    }
}
