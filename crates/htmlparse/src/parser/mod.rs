//! Tree construction and the parse entry points.

/// Stack-of-open-elements tree construction.
pub mod tree_builder;

pub use tree_builder::TreeBuilder;

use std::fmt::Write;

use htmlparse_dom::{DomTree, NodeId, NodeType};

use crate::document::Document;
use crate::error::ParseError;
use crate::scanner::Scanner;

/// Parse `source` into a tree whose Document node holds the top-level nodes.
///
/// # Errors
///
/// Returns a [`ParseError`] for unterminated tags, mismatched close tags,
/// unclosed elements and malformed attributes.
pub fn parse_fragment(source: &str) -> Result<DomTree, ParseError> {
    TreeBuilder::new(Scanner::new(source)).run()
}

/// Parse a complete document.
///
/// An empty source is not an error: it yields a document whose root has no
/// children.
///
/// # Errors
///
/// See [`parse_fragment`].
pub fn parse_html(source: &str) -> Result<Document, ParseError> {
    parse_fragment(source).map(Document::from_tree)
}

/// Print an indented outline of the subtree at `id` to stdout, starting at
/// `indent` levels.
///
/// Text is quoted with newlines shown as `\n` and spaces as `·` so that
/// whitespace-only nodes stay visible.
pub fn print_tree(tree: &DomTree, id: NodeId, indent: usize) {
    for (depth, label) in outline(tree, id, indent) {
        println!("{}{label}", "  ".repeat(depth));
    }
}

/// `(depth, label)` for every node under `id`, in document order.
fn outline(tree: &DomTree, id: NodeId, indent: usize) -> Vec<(usize, String)> {
    let mut lines = Vec::new();
    let mut pending = vec![(id, indent)];
    while let Some((current, depth)) = pending.pop() {
        let Some(node) = tree.get(current) else {
            continue;
        };
        lines.push((depth, outline_label(&node.node_type)));
        pending.extend(node.children.iter().rev().map(|&child| (child, depth + 1)));
    }
    lines
}

/// One line of [`print_tree`] output, without indentation.
fn outline_label(node_type: &NodeType) -> String {
    match node_type {
        NodeType::Document => "Document".to_string(),
        NodeType::Element(data) => {
            let mut label = format!("<{}", data.tag_name);
            for (name, value) in data.attrs.iter() {
                label.push(' ');
                label.push_str(name);
                if let Some(value) = value {
                    let _ = write!(label, "=\"{value}\"");
                }
            }
            label.push('>');
            label
        }
        NodeType::Text(text) => {
            format!("\"{}\"", text.replace('\n', "\\n").replace(' ', "\u{00B7}"))
        }
    }
}
