//! XML-like tag serialization
//!
//! Reflects the tree one to one:
//!
//! - Element → tag named after its production, children nested inside
//! - Leaf → `<token name="...">text</token>`
//!
//! ```text
//! <JumpStatement>
//!   <token name="return">return</token>
//!   <token name="ID">x</token>
//!   <token name=";">;</token>
//! </JumpStatement>
//! ```

use crate::chalk::ast::AstNode;
use crate::chalk::language::Language;

enum Step<'a> {
    Open(&'a AstNode, usize),
    Close(&'static str, usize),
}

/// Serialize a tree to tag format.
pub fn serialize_node(language: &Language, root: &AstNode) -> String {
    let mut output = String::new();
    let mut steps = vec![Step::Open(root, 0)];

    while let Some(step) = steps.pop() {
        match step {
            Step::Open(AstNode::Token(token), level) => {
                output.push_str(&format!(
                    "{}<token name=\"{}\">{}</token>\n",
                    "  ".repeat(level),
                    escape_xml(language.token_name(token.kind).unwrap_or("?")),
                    escape_xml(&token.text)
                ));
            }
            Step::Open(node, level) => {
                let name = language.node_name(node);
                let indent = "  ".repeat(level);
                if node.children().is_empty() {
                    output.push_str(&format!("{}<{}/>\n", indent, name));
                    continue;
                }
                output.push_str(&format!("{}<{}>\n", indent, name));
                steps.push(Step::Close(name, level));
                for child in node.children().iter().rev() {
                    steps.push(Step::Open(child, level + 1));
                }
            }
            Step::Close(name, level) => {
                output.push_str(&format!("{}</{}>\n", "  ".repeat(level), name));
            }
        }
    }
    output
}

/// Escape XML special characters
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
