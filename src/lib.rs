//! # chalk
//!
//! A grammar-driven lexer and PEG parser for the Chalk scripting language.
//!
//! ## Testing
//!
//! Tree assertions live in the [testing module](chalk::testing); use them in
//! place of hand-written node walks so failures report the path to the node.

pub mod chalk;
