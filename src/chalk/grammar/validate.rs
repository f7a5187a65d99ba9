//! Structural checks run once when a grammar is built
//!
//! The engine relies on these properties instead of checking them while parsing:
//! every referenced symbol exists, every alternative consumes at least one token,
//! and every left-recursive cycle is a direct, flagged self reference that it can
//! turn into a loop.

use super::symbol::{ProductionId, Symbol};
use super::table::Grammar;
use crate::chalk::error::GrammarError;
use crate::chalk::lexer::RuleTable;

pub(super) fn validate(grammar: &Grammar, tokens: &RuleTable) -> Result<(), GrammarError> {
    check_order(grammar)?;
    for production in grammar.productions() {
        let name = production.name().to_string();
        if production.alternatives().is_empty() {
            return Err(GrammarError::EmptyProduction(name));
        }

        for (index, alternative) in production.alternatives().iter().enumerate() {
            if alternative.is_empty() {
                return Err(GrammarError::EmptyAlternative {
                    production: name,
                    index,
                });
            }
            for symbol in alternative.symbols() {
                match *symbol {
                    Symbol::Terminal(id) if !tokens.contains(id) => {
                        return Err(GrammarError::UnknownToken {
                            production: name,
                            id: id.0,
                        });
                    }
                    Symbol::Nonterminal(id) if grammar.get(id).is_none() => {
                        return Err(GrammarError::UndeclaredProduction {
                            production: name,
                            id: id.0,
                        });
                    }
                    _ => {}
                }
            }
            if alternative.is_left_recursive(production.id()) && alternative.len() == 1 {
                return Err(GrammarError::BareLeftRecursion {
                    production: name,
                    index,
                });
            }
        }

        if production.is_left_recursive() {
            if !production.flags().flatten_left_recursion() {
                return Err(GrammarError::UnflaggedLeftRecursion(name));
            }
            if production.seeds().next().is_none() {
                return Err(GrammarError::MissingSeed(name));
            }
        }
    }
    check_indirect_left_recursion(grammar)
}

fn check_order(grammar: &Grammar) -> Result<(), GrammarError> {
    for (index, production) in grammar.productions().iter().enumerate() {
        if production.id().index() != index {
            return Err(GrammarError::OutOfOrder {
                what: "production",
                name: production.name().to_string(),
                found: production.id().0,
                expected: index as u16,
            });
        }
    }
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Reject cycles in the "can start with" graph other than direct self references.
/// Alternatives are never empty, so only the first symbol is a left corner.
fn check_indirect_left_recursion(grammar: &Grammar) -> Result<(), GrammarError> {
    let mut marks = vec![Mark::Unvisited; grammar.len()];
    let mut path = Vec::new();
    for production in grammar.productions() {
        visit(grammar, production.id(), &mut marks, &mut path)?;
    }
    Ok(())
}

fn visit(
    grammar: &Grammar,
    id: ProductionId,
    marks: &mut [Mark],
    path: &mut Vec<ProductionId>,
) -> Result<(), GrammarError> {
    match marks[id.index()] {
        Mark::Done => return Ok(()),
        Mark::InProgress => {
            let start = path.iter().position(|&p| p == id).unwrap_or(0);
            let mut cycle: Vec<String> = path[start..]
                .iter()
                .map(|&p| grammar.production(p).name().to_string())
                .collect();
            cycle.push(grammar.production(id).name().to_string());
            return Err(GrammarError::IndirectLeftRecursion(cycle));
        }
        Mark::Unvisited => {}
    }

    marks[id.index()] = Mark::InProgress;
    path.push(id);
    for alternative in grammar.production(id).alternatives() {
        let corner = alternative.symbols().first().and_then(Symbol::production);
        if let Some(first) = corner.filter(|&first| first != id) {
            visit(grammar, first, marks, path)?;
        }
    }
    path.pop();
    marks[id.index()] = Mark::Done;
    Ok(())
}
