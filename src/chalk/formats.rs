//! Output formats for syntax trees
//!
//! Trees only know production and token ids; every format here renders them
//! through a [`Language`] so names show up instead of numbers.
//!
//! - `treeviz`: box-drawing outline, one node per line
//! - `tag`: XML-like nesting
//! - `json` / `yaml`: [`NodeView`] through serde
//!
//! The text formats walk the tree with an explicit stack and handle any depth.
//! Serde recurses once per level, so trees nested deeper than
//! [`SERDE_DEPTH_LIMIT`] are refused with [`FormatError::TooDeep`] instead.

pub mod tag;
pub mod treeviz;

use crate::chalk::ast::AstNode;
use crate::chalk::config::OutputConfig;
use crate::chalk::language::Language;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    Treeviz,
    Tag,
    Json,
    Yaml,
}

impl OutputFormat {
    pub const NAMES: [&'static str; 4] = ["treeviz", "tag", "json", "yaml"];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Treeviz => "treeviz",
            OutputFormat::Tag => "tag",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "treeviz" => Ok(OutputFormat::Treeviz),
            "tag" => Ok(OutputFormat::Tag),
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            other => Err(FormatError::UnknownFormat(other.to_string())),
        }
    }
}

/// Deepest tree the serde-backed formats are handed.
pub const SERDE_DEPTH_LIMIT: usize = 256;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("unknown output format '{0}'")]
    UnknownFormat(String),
    #[error("tree is nested more than {limit} levels deep; use the treeviz or tag format")]
    TooDeep { limit: usize },
    #[error("json serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("yaml serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Serde view of a node with names resolved.
///
/// Elements serialize as `{ production, children }`, leaves as
/// `{ token, text, line, column }`.
pub struct NodeView<'a> {
    language: &'a Language,
    node: &'a AstNode,
}

impl<'a> NodeView<'a> {
    pub fn new(language: &'a Language, node: &'a AstNode) -> Self {
        Self { language, node }
    }
}

impl Serialize for NodeView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.node {
            AstNode::Element(element) => {
                let children: Vec<NodeView<'_>> = element
                    .children()
                    .iter()
                    .map(|child| NodeView::new(self.language, child))
                    .collect();
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("production", self.language.node_name(self.node))?;
                map.serialize_entry("children", &children)?;
                map.end()
            }
            AstNode::Token(token) => {
                let mut map = serializer.serialize_map(Some(4))?;
                map.serialize_entry("token", self.language.node_name(self.node))?;
                map.serialize_entry("text", &token.text)?;
                map.serialize_entry("line", &token.line())?;
                map.serialize_entry("column", &token.column())?;
                map.end()
            }
        }
    }
}

/// Render `node` in the requested format.
pub fn render(
    language: &Language,
    node: &AstNode,
    format: OutputFormat,
    config: &OutputConfig,
) -> Result<String, FormatError> {
    let output = match format {
        OutputFormat::Treeviz => treeviz::to_treeviz_str(language, node, config.truncate),
        OutputFormat::Tag => tag::serialize_node(language, node),
        OutputFormat::Json => {
            check_depth(node, SERDE_DEPTH_LIMIT)?;
            let mut json = serde_json::to_string_pretty(&NodeView::new(language, node))?;
            json.push('\n');
            json
        }
        OutputFormat::Yaml => {
            check_depth(node, SERDE_DEPTH_LIMIT)?;
            serde_yaml::to_string(&NodeView::new(language, node))?
        }
    };
    Ok(output)
}

fn check_depth(root: &AstNode, limit: usize) -> Result<(), FormatError> {
    let mut stack = vec![(root, 1)];
    while let Some((node, level)) = stack.pop() {
        if level > limit {
            tracing::debug!(limit, "tree too deep for serde output");
            return Err(FormatError::TooDeep { limit });
        }
        stack.extend(node.children().iter().map(|child| (child, level + 1)));
    }
    Ok(())
}
