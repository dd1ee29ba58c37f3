use htmlparse_common::warning::warn_once;
use htmlparse_dom::{AttributesMap, DomTree, ElementData, NodeId, NodeType};

use crate::error::ParseError;
use crate::scanner::{Scanner, Token};

/// Builds a [`DomTree`] from a scanner's tokens.
///
/// Keeps a stack of open elements that starts with the implicit Document
/// root. Close tags must match the innermost open element exactly; there is
/// no implied-end-tag or tag-soup recovery.
pub struct TreeBuilder<'a> {
    /// Input tokens.
    scanner: Scanner<'a>,

    /// Tree under construction. `NodeId::ROOT` is the Document node.
    tree: DomTree,

    /// Stack of open elements. Always has the Document node at the bottom.
    stack_of_open_elements: Vec<NodeId>,

    /// The element whose attributes are still arriving.
    pending_element: Option<ElementData>,
}

impl<'a> TreeBuilder<'a> {
    /// Create a tree builder reading from `scanner`.
    #[must_use]
    pub fn new(scanner: Scanner<'a>) -> Self {
        Self {
            scanner,
            tree: DomTree::new(),
            stack_of_open_elements: vec![NodeId::ROOT],
            pending_element: None,
        }
    }

    /// Consume every token and return the finished tree.
    ///
    /// # Errors
    ///
    /// Returns the scanner's error if tokenizing fails,
    /// [`ParseError::StructuralMismatch`] for a close tag that does not match
    /// the innermost open element, and [`ParseError::UnclosedElement`] if
    /// elements remain open at the end of input. No tree is returned on error.
    pub fn run(mut self) -> Result<DomTree, ParseError> {
        while let Some(token) = self.scanner.next() {
            self.process_token(token?)?;
        }

        if let Some(tag) = self.open_tag_name() {
            return Err(ParseError::UnclosedElement {
                tag: tag.to_string(),
            });
        }
        Ok(self.tree)
    }

    fn current_node(&self) -> NodeId {
        self.stack_of_open_elements
            .last()
            .copied()
            .unwrap_or(NodeId::ROOT)
    }

    /// Tag name of the innermost open element, if any element is open.
    fn open_tag_name(&self) -> Option<&str> {
        if self.stack_of_open_elements.len() <= 1 {
            return None;
        }
        self.tree
            .as_element(self.current_node())
            .map(|e| e.tag_name.as_str())
    }

    fn process_token(&mut self, token: Token) -> Result<(), ParseError> {
        match token {
            Token::OpenTagStart { name } => {
                self.pending_element = Some(ElementData::new(&name, AttributesMap::new()));
            }
            Token::Attribute { name, value } => {
                if let Some(element) = self.pending_element.as_mut()
                    && !element.attrs.insert_if_absent(name.as_str(), value)
                {
                    warn_once(
                        "HTML Parser",
                        &format!(
                            "duplicate attribute '{name}' on <{}> ignored",
                            element.tag_name
                        ),
                    );
                }
            }
            Token::OpenTagEnd { self_closing } => self.insert_element(self_closing),
            Token::RawText { content } => self.insert_text(content),
            Token::CloseTag { name } => self.close_element(name)?,
        }
        Ok(())
    }

    /// Attach the pending element to the current node and, unless it cannot
    /// have content, make it the new current node.
    fn insert_element(&mut self, self_closing: bool) {
        let Some(mut element) = self.pending_element.take() else {
            return;
        };
        element.self_closing = self_closing;
        let opens = !self_closing && !element.is_void();

        let id = self.tree.alloc(NodeType::Element(element));
        self.tree.append_child(self.current_node(), id);
        if opens {
            self.stack_of_open_elements.push(id);
        }
    }

    /// Append text to the current node, merging into a trailing text child.
    fn insert_text(&mut self, content: String) {
        if content.is_empty() {
            return;
        }
        let parent = self.current_node();
        if let Some(last) = self.tree.last_child(parent)
            && let Some(node) = self.tree.get_mut(last)
            && let NodeType::Text(existing) = &mut node.node_type
        {
            existing.push_str(&content);
            return;
        }
        let id = self.tree.alloc(NodeType::Text(content));
        self.tree.append_child(parent, id);
    }

    fn close_element(&mut self, name: String) -> Result<(), ParseError> {
        let offset = self.scanner.token_start();
        let expected = self.open_tag_name().map(str::to_string);
        if expected.as_deref() != Some(name.as_str()) {
            return Err(ParseError::StructuralMismatch {
                expected,
                found: name,
                offset,
            });
        }
        let _ = self.stack_of_open_elements.pop();
        Ok(())
    }
}
