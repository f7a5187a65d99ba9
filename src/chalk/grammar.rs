//! Grammar module for the chalk front end
//!
//! A grammar is data: productions made of ordered alternatives, each an ordered
//! list of [`Symbol`]s. The [parser engine](crate::chalk::parser) interprets it with
//! PEG semantics (ordered choice with backtracking). Two flags shape the tree:
//!
//! - [`Flags::COLLAPSE`]: a production whose chosen alternative yields a single child
//!   is replaced by that child. Precedence chains stay flat when an operator level
//!   is unused.
//! - [`Flags::FLATTEN_LEFT_RECURSION`]: `A -> A op B` alternatives are run as a loop
//!   over a seed, producing a left-associated tree without recursion.

pub mod symbol;
pub mod table;
mod validate;

pub use symbol::{Flags, ProductionId, Symbol};
pub use table::{Alternative, Grammar, GrammarBuilder, Production};
