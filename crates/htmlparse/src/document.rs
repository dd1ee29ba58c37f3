use htmlparse_dom::{AttributesMap, DomTree, NodeId, NodeType};

use crate::serializer::{RenderMode, render};

/// A parsed document.
///
/// Owns the [`DomTree`] arena and hands out read-only views of it. Nodes are
/// addressed by [`NodeId`]; [`Document::root`] is the implicit root that
/// parsing starts from, and [`Document::document_element`] is the first
/// top-level element (the `div` in `<div>...</div>`).
///
/// Containers are never exposed mutably: children and attributes change only
/// by wholesale replacement (see the [`mutation`](crate::mutation) methods).
///
/// A `Document` is not internally synchronized; mutation requires `&mut`.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub(crate) tree: DomTree,
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already-built tree.
    #[must_use]
    pub const fn from_tree(tree: DomTree) -> Self {
        Self { tree }
    }

    /// Read-only access to the underlying arena.
    #[must_use]
    pub const fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Give up the document and keep the arena.
    #[must_use]
    pub fn into_tree(self) -> DomTree {
        self.tree
    }

    /// The implicit root. Never has a parent, a tag or attributes.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// The first element directly under the root, if any.
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.tree.document_element()
    }

    /// True if `id` refers to a live node of this document.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.tree.contains(id)
    }

    /// Element and text children, in order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.tree.children(id)
    }

    /// The owning node, or `None` for the root and detached nodes.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.tree.parent(id)
    }

    /// Lowercase tag name of an element.
    #[must_use]
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.tree.as_element(id).map(|e| e.tag_name.as_str())
    }

    /// Attributes of an element.
    #[must_use]
    pub fn attrs(&self, id: NodeId) -> Option<&AttributesMap> {
        self.tree.as_element(id).map(|e| &e.attrs)
    }

    /// Raw (unescaped) content of a text node.
    #[must_use]
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.tree.as_text(id)
    }

    /// Serialized form of a text node, e.g. `e&gt;` for raw `e>`. Text inside
    /// `script`/`style` comes back verbatim.
    #[must_use]
    pub fn escaped_text(&self, id: NodeId) -> Option<String> {
        self.text(id)
            .map(|_| render(&self.tree, id, RenderMode::Outer))
    }

    /// True if `id` is an element (not text, not the root).
    #[must_use]
    pub fn is_element(&self, id: NodeId) -> bool {
        self.tree
            .get(id)
            .is_some_and(|n| matches!(n.node_type, NodeType::Element(_)))
    }

    /// Markup of the node's content. Empty for unknown IDs.
    #[must_use]
    pub fn inner_html(&self, id: NodeId) -> String {
        render(&self.tree, id, RenderMode::Inner)
    }

    /// Markup of the node including its own tags. Empty for unknown IDs.
    #[must_use]
    pub fn outer_html(&self, id: NodeId) -> String {
        render(&self.tree, id, RenderMode::Outer)
    }

    /// First element at or below `from` whose `id` attribute is `id`.
    #[must_use]
    pub fn get_element_by_id(&self, from: NodeId, id: &str) -> Option<NodeId> {
        self.tree.get_element_by_id(from, id)
    }

    /// All elements at or below `from` with the given tag name.
    #[must_use]
    pub fn get_elements_by_tag_name(&self, from: NodeId, tag_name: &str) -> Vec<NodeId> {
        self.tree.get_elements_by_tag_name(from, tag_name)
    }

    /// All elements at or below `from` that carry every listed class.
    #[must_use]
    pub fn get_elements_by_class_name(&self, from: NodeId, class_names: &str) -> Vec<NodeId> {
        self.tree.get_elements_by_class_name(from, class_names)
    }

    /// All elements at or below `from` matching every given attribute.
    #[must_use]
    pub fn get_elements_by_attrs(&self, from: NodeId, attrs: &AttributesMap) -> Vec<NodeId> {
        self.tree.get_elements_by_attrs(from, attrs)
    }
}
