//! Rendering trees back to HTML text.
//!
//! Rendering always walks the live tree, so there is no cached markup to
//! invalidate: after any mutation every ancestor renders the new content.

use strum_macros::Display;

use htmlparse_dom::{DomTree, ElementData, NodeId, NodeType};

/// Which view of a node to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RenderMode {
    /// Content only: the node's children, without its own tags.
    Inner,
    /// The node's own tags around its content.
    Outer,
}

/// Render the node at `id`.
///
/// - text renders as its escaped form in either mode (verbatim inside
///   `script`/`style`);
/// - the Document node renders its children in either mode;
/// - an element renders its children (`Inner`) or itself (`Outer`).
///
/// A freed or unknown `id` renders as the empty string. The walk keeps its
/// own stack, so deeply nested trees render without recursion.
#[must_use]
pub fn render(tree: &DomTree, id: NodeId, mode: RenderMode) -> String {
    let mut out = String::new();
    let Some(node) = tree.get(id) else {
        return out;
    };

    let mut stack = Vec::new();
    match (&node.node_type, mode) {
        (NodeType::Document, _) | (NodeType::Element(_), RenderMode::Inner) => {
            push_children(&mut stack, &node.children);
        }
        _ => stack.push(Step::Open(id)),
    }

    while let Some(step) = stack.pop() {
        match step {
            Step::Open(current) => open_node(tree, current, &mut stack, &mut out),
            Step::Close(tag_name) => {
                out.push_str("</");
                out.push_str(tag_name);
                out.push('>');
            }
        }
    }
    out
}

/// Escape text content: `&`, `<` and `>`.
#[must_use]
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    push_text_escaped(&mut out, text);
    out
}

/// Escape an attribute value for use inside double quotes: `&`, `"` and `<`.
#[must_use]
pub fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    push_attribute_escaped(&mut out, value);
    out
}

/// Pending work for [`render`].
enum Step<'a> {
    /// Write a node in outer form, scheduling its content.
    Open(NodeId),
    /// Write the close tag of an element whose content is done.
    Close(&'a str),
}

fn push_children(stack: &mut Vec<Step<'_>>, children: &[NodeId]) {
    stack.extend(children.iter().rev().copied().map(Step::Open));
}

fn open_node<'a>(tree: &'a DomTree, id: NodeId, stack: &mut Vec<Step<'a>>, out: &mut String) {
    let Some(node) = tree.get(id) else {
        return;
    };
    match &node.node_type {
        NodeType::Text(text) => {
            let verbatim = node
                .parent
                .and_then(|p| tree.as_element(p))
                .is_some_and(ElementData::is_raw_text);
            if verbatim {
                out.push_str(text);
            } else {
                push_text_escaped(out, text);
            }
        }
        NodeType::Document => push_children(stack, &node.children),
        NodeType::Element(data) => {
            write_open_tag(data, out);
            if data.is_void() || (data.self_closing && node.children.is_empty()) {
                out.push_str("/>");
            } else {
                out.push('>');
                stack.push(Step::Close(&data.tag_name));
                push_children(stack, &node.children);
            }
        }
    }
}

/// `<tag a="v" b` without the closing `>`.
fn write_open_tag(data: &ElementData, out: &mut String) {
    out.push('<');
    out.push_str(&data.tag_name);
    for (name, value) in data.attrs.iter() {
        out.push(' ');
        out.push_str(name);
        if let Some(value) = value {
            out.push_str("=\"");
            push_attribute_escaped(out, value);
            out.push('"');
        }
    }
}

fn push_text_escaped(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn push_attribute_escaped(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            _ => out.push(c),
        }
    }
}
