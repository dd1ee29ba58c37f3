//! Element/text tree for the htmlparse crates.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues. Parent
//! links are plain indices, so a child never owns its parent; ownership of a
//! subtree is expressed by [`DomTree::remove_subtree`], which frees a node and
//! every descendant.
//!
//! Freed slots go on a free list and are handed out again by
//! [`DomTree::alloc`]. Each slot carries a generation that moves on whenever
//! its node is freed, and a [`NodeId`] remembers the generation it was issued
//! with, so a stale handle resolves to `None` instead of aliasing the newer
//! node in the same slot.

mod attributes;

pub use attributes::{Attribute, AttributesMap};

/// Elements that never have content or a closing tag.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input", "keygen", "link",
    "meta", "param", "source", "track", "wbr",
];

/// Elements whose text content is kept verbatim (no entity decoding or escaping).
pub const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Check if a tag is a void element.
#[must_use]
pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(tag))
}

/// Check if a tag is a raw text element (script, style).
#[must_use]
pub fn is_raw_text_element(tag: &str) -> bool {
    RAW_TEXT_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(tag))
}

/// A handle to a node: slot index plus the slot's generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

impl NodeId {
    /// The implicit document root is always in slot 0 and is never freed.
    pub const ROOT: Self = Self::from_parts(0, 0);

    /// Build a handle from a slot index and generation.
    ///
    /// Handles are normally obtained from [`DomTree::alloc`]; a hand-built
    /// one resolves only if that slot currently holds a node of that
    /// generation.
    #[must_use]
    pub const fn from_parts(index: usize, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index in the arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }

    /// Generation of the slot when this handle was issued.
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.generation == 0 {
            write!(f, "#{}", self.index)
        } else {
            write!(f, "#{}v{}", self.index, self.generation)
        }
    }
}

/// A node in the arena.
///
/// This node stores indices for parent/child/sibling relationships,
/// enabling O(1) traversal in any direction.
#[derive(Debug, Clone)]
pub struct Node {
    /// What kind of node this is.
    pub node_type: NodeType,

    /// Owning node, or `None` for the root and for detached nodes.
    pub parent: Option<NodeId>,

    /// Ordered children.
    pub children: Vec<NodeId>,

    /// The node immediately following this one in its parent's children.
    pub next_sibling: Option<NodeId>,

    /// The node immediately preceding this one in its parent's children.
    pub prev_sibling: Option<NodeId>,
}

/// The kinds of node a tree can hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeType {
    /// The implicit root every parse starts from. Has no tag and no attributes.
    Document,
    /// An element with a tag name and attributes.
    Element(ElementData),
    /// Character data, stored unescaped.
    Text(String),
}

/// Element-specific data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// Lowercase tag name.
    pub tag_name: String,
    /// Attributes in source order.
    pub attrs: AttributesMap,
    /// Written with `/>` in the source.
    pub self_closing: bool,
}

impl ElementData {
    /// Create element data, lowercasing the tag name.
    #[must_use]
    pub fn new(tag_name: &str, attrs: AttributesMap) -> Self {
        Self {
            tag_name: tag_name.to_ascii_lowercase(),
            attrs,
            self_closing: false,
        }
    }

    /// Returns the element's id attribute value if present.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attrs.get("id")
    }

    /// True for elements such as `br` that never take content.
    #[must_use]
    pub fn is_void(&self) -> bool {
        is_void_element(&self.tag_name)
    }

    /// True for `script` and `style`.
    #[must_use]
    pub fn is_raw_text(&self) -> bool {
        is_raw_text_element(&self.tag_name)
    }
}

/// One arena slot. `node` is `None` while the slot is on the free list.
#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Arena-based tree with O(1) node access and traversal.
#[derive(Debug, Clone)]
pub struct DomTree {
    /// All slots, indexed by `NodeId::index`.
    /// The Document node is always in slot 0 (`NodeId::ROOT`).
    slots: Vec<Slot>,

    /// Freed slot indices, reused most recent first.
    free: Vec<usize>,

    /// Number of occupied slots.
    live: usize,
}

impl DomTree {
    /// Create a new tree with just the Document node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: vec![Slot {
                generation: 0,
                node: Some(Self::fresh(NodeType::Document)),
            }],
            free: Vec::new(),
            live: 1,
        }
    }

    const fn fresh(node_type: NodeType) -> Node {
        Node {
            node_type,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        }
    }

    /// Get the root document node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID. Freed nodes resolve to `None`.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    /// True if `id` refers to a node that has not been freed.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live nodes, including the Document node.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.live
    }

    /// Number of slots backing the arena, occupied or free.
    ///
    /// Freed slots are reused, so this stays near the peak number of live
    /// nodes rather than growing with every mutation.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Check if the tree is empty (should always have at least the Document).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Allocate a new node and return its ID, reusing a freed slot if one
    /// is available. The node is not yet attached to the tree.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let node = Some(Self::fresh(node_type));
        self.live += 1;
        if let Some(index) = self.free.pop()
            && let Some(slot) = self.slots.get_mut(index)
        {
            slot.node = node;
            return NodeId::from_parts(index, slot.generation);
        }
        self.slots.push(Slot {
            generation: 0,
            node,
        });
        NodeId::from_parts(self.slots.len() - 1, 0)
    }

    /// Empty one slot and put it on the free list. Returns the freed node's
    /// children, which the caller must free in turn.
    fn release(&mut self, id: NodeId) -> Vec<NodeId> {
        if id == NodeId::ROOT {
            return Vec::new();
        }
        let Some(slot) = self
            .slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
        else {
            return Vec::new();
        };
        let Some(node) = slot.node.take() else {
            return Vec::new();
        };
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.live -= 1;
        node.children
    }

    fn release_all(&mut self, mut pending: Vec<NodeId>) {
        while let Some(current) = pending.pop() {
            pending.extend(self.release(current));
        }
    }

    /// Appends `child` as the last child of `parent`, updating all relationships.
    ///
    /// A `child` that is still attached elsewhere is detached first.
    /// Unknown IDs are ignored.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.contains(child) || !self.contains(parent) {
            return;
        }
        if let Some(old_parent) = self.parent(child) {
            self.remove_child(old_parent, child);
        }
        let Some(parent_node) = self.get_mut(parent) else {
            return;
        };
        let prev_last_child = parent_node.children.last().copied();
        parent_node.children.push(child);

        if let Some(child_node) = self.get_mut(child) {
            child_node.parent = Some(parent);
            child_node.prev_sibling = prev_last_child;
            child_node.next_sibling = None;
        }
        if let Some(prev) = prev_last_child.and_then(|p| self.get_mut(p)) {
            prev.next_sibling = Some(child);
        }
    }

    /// Insert `new_child` into `parent` immediately before `reference`.
    ///
    /// Falls back to appending if `reference` is not a child of `parent`.
    pub fn insert_before(&mut self, parent: NodeId, new_child: NodeId, reference: NodeId) {
        let position = self
            .children(parent)
            .iter()
            .position(|&c| c == reference);
        let Some(index) = position else {
            self.append_child(parent, new_child);
            return;
        };
        if !self.contains(new_child) || new_child == reference {
            return;
        }
        if let Some(old_parent) = self.parent(new_child) {
            self.remove_child(old_parent, new_child);
            // Detaching from the same parent may have shifted the reference.
            if old_parent == parent {
                self.insert_before(parent, new_child, reference);
                return;
            }
        }

        let prev = self.prev_sibling(reference);
        if let Some(parent_node) = self.get_mut(parent) {
            parent_node.children.insert(index, new_child);
        }
        if let Some(node) = self.get_mut(new_child) {
            node.parent = Some(parent);
            node.prev_sibling = prev;
            node.next_sibling = Some(reference);
        }
        if let Some(node) = self.get_mut(reference) {
            node.prev_sibling = Some(new_child);
        }
        if let Some(node) = prev.and_then(|p| self.get_mut(p)) {
            node.next_sibling = Some(new_child);
        }
    }

    /// Detach `child` from `parent`, repairing sibling links.
    ///
    /// The child stays allocated and can be re-attached.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        let Some(parent_node) = self.get_mut(parent) else {
            return;
        };
        let Some(index) = parent_node.children.iter().position(|&c| c == child) else {
            return;
        };
        let _ = parent_node.children.remove(index);

        let (prev, next) = match self.get_mut(child) {
            Some(node) => {
                let links = (node.prev_sibling, node.next_sibling);
                node.parent = None;
                node.prev_sibling = None;
                node.next_sibling = None;
                links
            }
            None => (None, None),
        };
        if let Some(node) = prev.and_then(|p| self.get_mut(p)) {
            node.next_sibling = next;
        }
        if let Some(node) = next.and_then(|n| self.get_mut(n)) {
            node.prev_sibling = prev;
        }
    }

    /// Detach `id` (if attached) and free it together with all descendants.
    ///
    /// The Document node cannot be freed; only its children are.
    pub fn remove_subtree(&mut self, id: NodeId) {
        if id == NodeId::ROOT {
            self.clear_children(id);
            return;
        }
        if let Some(parent) = self.parent(id) {
            self.remove_child(parent, id);
        }
        self.release_all(vec![id]);
    }

    /// Free every child of `id` and everything below them, leaving `id`
    /// empty.
    pub fn clear_children(&mut self, id: NodeId) {
        let Some(node) = self.get_mut(id) else {
            return;
        };
        let children = std::mem::take(&mut node.children);
        self.release_all(children);
    }

    /// Deep-copy the subtree rooted at `id` in `other` into this tree.
    ///
    /// Returns the ID of the detached copy. Copying the other tree's Document
    /// node yields a detached Document node; callers normally import its
    /// children instead. Uses an explicit work stack, so nesting depth is not
    /// limited by the call stack.
    pub fn import_subtree(&mut self, other: &Self, id: NodeId) -> Option<NodeId> {
        let source = other.get(id)?;
        let copy = self.alloc(source.node_type.clone());
        let mut pending = vec![(id, copy)];
        while let Some((from, to)) = pending.pop() {
            for &child in other.children(from) {
                if let Some(node) = other.get(child) {
                    let child_copy = self.alloc(node.node_type.clone());
                    self.append_child(to, child_copy);
                    pending.push((child, child_copy));
                }
            }
        }
        Some(copy)
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.first().copied())
    }

    /// Get the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.last().copied())
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// Check if `descendant` is a descendant of `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Depth-first pre-order walk of `id` and everything below it.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            stack: if self.contains(id) { vec![id] } else { Vec::new() },
        }
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get mutable element data if this node is an element.
    pub fn as_element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(|n| match &mut n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// The first element child of the Document node, if any.
    ///
    /// For a fragment like `<div>...</div>` this is the `div`.
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(NodeId::ROOT)
            .iter()
            .find(|&&id| self.as_element(id).is_some())
            .copied()
    }

    /// First element at or below `from` whose `id` attribute equals `id`.
    ///
    /// Depth-first pre-order; every call walks the tree.
    #[must_use]
    pub fn get_element_by_id(&self, from: NodeId, id: &str) -> Option<NodeId> {
        self.descendants(from)
            .find(|&node| self.as_element(node).and_then(ElementData::id) == Some(id))
    }

    /// All elements at or below `from` with the given tag name.
    #[must_use]
    pub fn get_elements_by_tag_name(&self, from: NodeId, tag_name: &str) -> Vec<NodeId> {
        self.descendants(from)
            .filter(|&node| {
                self.as_element(node)
                    .is_some_and(|e| e.tag_name.eq_ignore_ascii_case(tag_name))
            })
            .collect()
    }

    /// All elements at or below `from` carrying every class in `class_names`
    /// (a whitespace-separated list).
    #[must_use]
    pub fn get_elements_by_class_name(&self, from: NodeId, class_names: &str) -> Vec<NodeId> {
        let wanted: Vec<&str> = class_names.split_ascii_whitespace().collect();
        if wanted.is_empty() {
            return Vec::new();
        }
        self.descendants(from)
            .filter(|&node| {
                self.as_element(node).is_some_and(|e| {
                    let classes = e.attrs.classes();
                    wanted.iter().all(|c| classes.contains(c))
                })
            })
            .collect()
    }

    /// All elements at or below `from` whose attributes include every
    /// `(name, value)` pair of `attrs`.
    #[must_use]
    pub fn get_elements_by_attrs(&self, from: NodeId, attrs: &AttributesMap) -> Vec<NodeId> {
        self.descendants(from)
            .filter(|&node| {
                self.as_element(node).is_some_and(|e| {
                    attrs
                        .iter()
                        .all(|(name, value)| e.attrs.get(name) == Some(value.unwrap_or("")))
                })
            })
            .collect()
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Pre-order iterator over a node and its descendants.
pub struct Descendants<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
