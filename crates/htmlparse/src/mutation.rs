//! Assignment to a document: `innerHTML`, `outerHTML`, and wholesale
//! replacement of `children` and `attrs`.
//!
//! Markup assignments parse the new text into a scratch tree first. Only
//! when that succeeds is the old subtree freed and the new one copied in, so
//! a failed assignment leaves the document untouched. Serialization is never
//! cached, so ancestors reflect the change as soon as the call returns.

use std::collections::HashSet;

use htmlparse_dom::{AttributesMap, DomTree, ElementData, NodeId, NodeType};

use crate::document::Document;
use crate::error::MutationError;
use crate::parser::parse_fragment;
use crate::scanner::machine::find_raw_text_end;

impl Document {
    /// Replace the content of `id` with the nodes parsed from `html`.
    ///
    /// Inside `script`/`style` the markup is not parsed; it becomes a single
    /// verbatim text node.
    ///
    /// # Errors
    ///
    /// - [`MutationError::InvalidNode`] if `id` is not live
    /// - [`MutationError::UnsupportedOperation`] for text nodes and void elements
    /// - [`MutationError::Parse`] if `html` does not parse
    pub fn set_inner_html(&mut self, id: NodeId, html: &str) -> Result<(), MutationError> {
        let raw_text = match self.content_target(id)? {
            Some(element) => element.is_raw_text().then(|| element.tag_name.clone()),
            None => None,
        };

        let fragment = match raw_text {
            Some(tag) => verbatim_fragment(&tag, html)?,
            None => parse_fragment(html)?,
        };

        self.tree.clear_children(id);
        self.splice_children(&fragment, id);
        if let Some(element) = self.tree.as_element_mut(id) {
            element.self_closing = false;
        }
        Ok(())
    }

    /// Replace the node at `id` with the single node parsed from `html`,
    /// keeping its position among its siblings.
    ///
    /// Returns the handle of the new node; `id` is freed. When the parent is
    /// `script` or `style`, `html` is taken verbatim as one text node.
    ///
    /// # Errors
    ///
    /// - [`MutationError::InvalidNode`] if `id` is not live
    /// - [`MutationError::UnsupportedOperation`] for the root and detached
    ///   nodes, or raw text that would close its `script`/`style` parent
    /// - [`MutationError::Parse`] if `html` does not parse
    /// - [`MutationError::MalformedFragment`] unless `html` yields exactly one
    ///   top-level node
    pub fn set_outer_html(&mut self, id: NodeId, html: &str) -> Result<NodeId, MutationError> {
        if id == NodeId::ROOT {
            return Err(MutationError::UnsupportedOperation(
                "cannot replace the document root".to_string(),
            ));
        }
        if !self.tree.contains(id) {
            return Err(MutationError::InvalidNode(id));
        }
        let Some(parent) = self.tree.parent(id) else {
            return Err(MutationError::UnsupportedOperation(
                "cannot set outer HTML of a detached node".to_string(),
            ));
        };

        let raw_parent = self
            .tree
            .as_element(parent)
            .filter(|element| element.is_raw_text())
            .map(|element| element.tag_name.clone());
        let fragment = match raw_parent {
            Some(tag) => {
                let fragment = verbatim_fragment(&tag, html)?;
                let joined: String = self
                    .tree
                    .children(parent)
                    .iter()
                    .map(|&sibling| if sibling == id { html } else { self.text_of(sibling) })
                    .collect();
                ensure_open_raw_text(&tag, &joined)?;
                fragment
            }
            None => parse_fragment(html)?,
        };
        let top_level = fragment.children(NodeId::ROOT);
        let &[only] = top_level else {
            return Err(MutationError::MalformedFragment {
                count: top_level.len(),
            });
        };

        let replacement = self
            .tree
            .import_subtree(&fragment, only)
            .ok_or(MutationError::InvalidNode(only))?;
        self.tree.insert_before(parent, replacement, id);
        self.tree.remove_subtree(id);
        Ok(replacement)
    }

    /// Replace the children of `id` wholesale.
    ///
    /// Every new child must be a live, detached node (see
    /// [`create_element`](Self::create_element) and
    /// [`create_text`](Self::create_text)), must not be the root, `id`, or an
    /// ancestor of `id`, and must appear only once. Under `script`/`style`
    /// only text nodes are accepted. The old children are freed.
    ///
    /// # Errors
    ///
    /// - [`MutationError::InvalidNode`] if `id` is not live
    /// - [`MutationError::UnsupportedOperation`] for text nodes and void
    ///   elements, or raw text that would close its `script`/`style` parent
    /// - [`MutationError::InvalidChild`] for the first unacceptable child
    pub fn set_children(&mut self, id: NodeId, children: Vec<NodeId>) -> Result<(), MutationError> {
        let raw_text = self
            .content_target(id)?
            .filter(|element| element.is_raw_text())
            .map(|element| element.tag_name.clone());

        let mut seen = HashSet::with_capacity(children.len());
        for &child in &children {
            let acceptable = child != NodeId::ROOT
                && child != id
                && self.tree.contains(child)
                && self.tree.parent(child).is_none()
                && !self.tree.is_descendant_of(id, child)
                && (raw_text.is_none() || self.tree.as_text(child).is_some())
                && seen.insert(child);
            if !acceptable {
                return Err(MutationError::InvalidChild(child));
            }
        }
        if let Some(tag) = &raw_text {
            let joined: String = children.iter().map(|&child| self.text_of(child)).collect();
            ensure_open_raw_text(tag, &joined)?;
        }

        self.tree.clear_children(id);
        for child in children {
            self.tree.append_child(id, child);
        }
        if let Some(element) = self.tree.as_element_mut(id) {
            element.self_closing = false;
        }
        Ok(())
    }

    /// Replace the attributes of the element at `id` wholesale.
    ///
    /// Names are normalized to lowercase; on a collision the first entry wins.
    ///
    /// # Errors
    ///
    /// - [`MutationError::InvalidNode`] if `id` is not live
    /// - [`MutationError::UnsupportedOperation`] if `id` is not an element
    pub fn set_attrs(&mut self, id: NodeId, attrs: AttributesMap) -> Result<(), MutationError> {
        if !self.tree.contains(id) {
            return Err(MutationError::InvalidNode(id));
        }
        let Some(element) = self.tree.as_element_mut(id) else {
            return Err(MutationError::UnsupportedOperation(
                "only elements have attributes".to_string(),
            ));
        };
        element.attrs = attrs.normalized();
        Ok(())
    }

    /// Allocate a detached element for use with [`set_children`](Self::set_children).
    ///
    /// # Errors
    ///
    /// [`MutationError::UnsupportedOperation`] if `tag_name` is not a valid
    /// tag name (an ASCII letter followed by letters, digits, `-`, `_`, `:`
    /// or `.`).
    pub fn create_element(
        &mut self,
        tag_name: &str,
        attrs: AttributesMap,
    ) -> Result<NodeId, MutationError> {
        if !is_valid_tag_name(tag_name) {
            return Err(MutationError::UnsupportedOperation(format!(
                "invalid tag name '{tag_name}'"
            )));
        }
        let data = ElementData::new(tag_name, attrs.normalized());
        Ok(self.tree.alloc(NodeType::Element(data)))
    }

    /// Allocate a detached text node holding `raw` (unescaped) text.
    pub fn create_text(&mut self, raw: impl Into<String>) -> NodeId {
        self.tree.alloc(NodeType::Text(raw.into()))
    }

    /// Free a detached node and everything below it, such as one from
    /// [`create_element`](Self::create_element) that was never attached.
    ///
    /// # Errors
    ///
    /// - [`MutationError::InvalidNode`] if `id` is not live
    /// - [`MutationError::UnsupportedOperation`] if `id` is the root or still
    ///   has a parent
    pub fn discard(&mut self, id: NodeId) -> Result<(), MutationError> {
        if !self.tree.contains(id) {
            return Err(MutationError::InvalidNode(id));
        }
        if id == NodeId::ROOT || self.tree.parent(id).is_some() {
            return Err(MutationError::UnsupportedOperation(
                "only detached nodes can be discarded".to_string(),
            ));
        }
        self.tree.remove_subtree(id);
        Ok(())
    }

    /// Check that `id` may have its content replaced. Returns its element
    /// data, or `None` for the root.
    fn content_target(&self, id: NodeId) -> Result<Option<&ElementData>, MutationError> {
        let node = self.tree.get(id).ok_or(MutationError::InvalidNode(id))?;
        match &node.node_type {
            NodeType::Document => Ok(None),
            NodeType::Text(_) => Err(MutationError::UnsupportedOperation(
                "text nodes have no content to replace".to_string(),
            )),
            NodeType::Element(element) if element.is_void() => {
                Err(MutationError::UnsupportedOperation(format!(
                    "cannot set content of void element <{}>",
                    element.tag_name
                )))
            }
            NodeType::Element(element) => Ok(Some(element)),
        }
    }

    fn text_of(&self, id: NodeId) -> &str {
        self.tree.as_text(id).unwrap_or_default()
    }

    /// Copy every top-level node of `fragment` under `parent`, in order.
    fn splice_children(&mut self, fragment: &DomTree, parent: NodeId) {
        for &top in fragment.children(NodeId::ROOT) {
            if let Some(copy) = self.tree.import_subtree(fragment, top) {
                self.tree.append_child(parent, copy);
            }
        }
    }
}

/// A one-text-node fragment for `script`/`style` content.
fn verbatim_fragment(tag: &str, text: &str) -> Result<DomTree, MutationError> {
    ensure_open_raw_text(tag, text)?;
    let mut fragment = DomTree::new();
    if !text.is_empty() {
        let id = fragment.alloc(NodeType::Text(text.to_string()));
        fragment.append_child(NodeId::ROOT, id);
    }
    Ok(fragment)
}

/// Reject raw text that the scanner would end early at `</tag`.
fn ensure_open_raw_text(tag: &str, text: &str) -> Result<(), MutationError> {
    match find_raw_text_end(text, tag) {
        Some(_) => Err(MutationError::UnsupportedOperation(format!(
            "<{tag}> content cannot contain its own close tag"
        ))),
        None => Ok(()),
    }
}

fn is_valid_tag_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
}
