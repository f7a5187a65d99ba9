//! Treeviz formatter for syntax trees
//!
//! One line per node, drawn with box connectors:
//!
//! ```text
//! └─ ExpressionStatement: x = 1 ;
//!   ├─ AssignmentExpression: x = 1
//!   │ ├─ ID: x
//! ```
//!
//! Elements are labelled with their (truncated) source text, leaves with their
//! token text. The walk keeps its own stack so left-flattened chains of any length
//! render without recursion.

use crate::chalk::ast::AstNode;
use crate::chalk::language::Language;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

/// Source text under `node`, collected only as far as the label needs.
fn label(node: &AstNode, max_chars: usize) -> String {
    let mut text = String::new();
    for token in node.descendants().filter_map(AstNode::token) {
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(&token.text);
        if text.chars().count() > max_chars {
            break;
        }
    }
    truncate(&text, max_chars)
}

pub fn to_treeviz_str(language: &Language, root: &AstNode, max_chars: usize) -> String {
    let mut result = String::new();
    // last-child flag of every ancestor of the node being printed
    let mut lasts: Vec<bool> = Vec::new();
    let mut stack = vec![(root, 0usize, true)];

    while let Some((node, depth, is_last)) = stack.pop() {
        lasts.truncate(depth);
        let prefix: String = lasts
            .iter()
            .map(|&last| if last { "  " } else { "│ " })
            .collect();
        let connector = if is_last { "└─" } else { "├─" };
        result.push_str(&format!(
            "{}{} {}: {}\n",
            prefix,
            connector,
            language.node_name(node),
            label(node, max_chars)
        ));

        lasts.push(is_last);
        let children = node.children();
        for (i, child) in children.iter().enumerate().rev() {
            stack.push((child, depth + 1, i == children.len() - 1));
        }
    }
    result
}
