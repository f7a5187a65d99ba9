//! Grammar symbols and production flags

use crate::chalk::lexer::TokenId;
use serde::Serialize;
use std::fmt;
use std::ops::BitOr;

/// Index of a production in its [`Grammar`](super::Grammar).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ProductionId(pub u16);

impl ProductionId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ProductionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// One element of an alternative: a token kind or a production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Terminal(TokenId),
    Nonterminal(ProductionId),
}

impl Symbol {
    /// The production a nonterminal names.
    pub fn production(&self) -> Option<ProductionId> {
        match self {
            Symbol::Nonterminal(id) => Some(*id),
            Symbol::Terminal(_) => None,
        }
    }
}

/// Per-production parse behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Flags(u8);

impl Flags {
    pub const NONE: Flags = Flags(0);
    /// Replace the node with its only child when the chosen alternative yields one.
    pub const COLLAPSE: Flags = Flags(1);
    /// Parse self-referencing leading alternatives by seed-and-extend iteration.
    pub const FLATTEN_LEFT_RECURSION: Flags = Flags(1 << 1);

    pub const fn union(self, other: Flags) -> Flags {
        Flags(self.0 | other.0)
    }

    pub const fn contains(self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn collapse(self) -> bool {
        self.contains(Flags::COLLAPSE)
    }

    pub fn flatten_left_recursion(self) -> bool {
        self.contains(Flags::FLATTEN_LEFT_RECURSION)
    }
}

impl BitOr for Flags {
    type Output = Flags;

    fn bitor(self, rhs: Flags) -> Flags {
        self.union(rhs)
    }
}

impl fmt::Display for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = Vec::new();
        if self.collapse() {
            names.push("collapse");
        }
        if self.flatten_left_recursion() {
            names.push("flatten-left-recursion");
        }
        if names.is_empty() {
            f.write_str("-")
        } else {
            f.write_str(&names.join(","))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_combine() {
        let flags = Flags::COLLAPSE | Flags::FLATTEN_LEFT_RECURSION;
        assert!(flags.collapse());
        assert!(flags.flatten_left_recursion());
        assert!(!Flags::NONE.collapse());
        assert!(Flags::NONE.contains(Flags::NONE));
    }

    #[test]
    fn test_flags_display() {
        assert_eq!(Flags::NONE.to_string(), "-");
        assert_eq!(
            (Flags::COLLAPSE | Flags::FLATTEN_LEFT_RECURSION).to_string(),
            "collapse,flatten-left-recursion"
        );
    }

    #[test]
    fn test_symbol_production() {
        assert_eq!(Symbol::Nonterminal(ProductionId(2)).production(), Some(ProductionId(2)));
        assert_eq!(Symbol::Terminal(TokenId(3)).production(), None);
    }
}
