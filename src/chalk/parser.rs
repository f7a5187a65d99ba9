//! Parser module for the chalk front end
//!
//! The [engine](engine) is language-agnostic: it interprets whatever grammar the
//! [`Language`](crate::chalk::language::Language) carries. Chalk itself is just one
//! such table set (see [`lang`](crate::chalk::lang)).

pub mod engine;

pub use engine::{ParseOptions, Parser};

use crate::chalk::config::ParserConfig;

impl From<&ParserConfig> for ParseOptions {
    fn from(config: &ParserConfig) -> Self {
        Self {
            report_furthest_failure: config.report_furthest_failure,
            max_depth: config.max_depth,
        }
    }
}
