use htmlparse_dom::NodeId;
use thiserror::Error;

/// Why a source string could not be turned into a tree.
///
/// Offsets are byte offsets into the scanned source. No partial tree is ever
/// returned alongside an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// End of input inside a tag, quoted attribute value or comment, or a
    /// close tag missing its `>`.
    #[error("unterminated tag starting at byte {offset}")]
    UnterminatedTag {
        /// Position of the `<` that opened the tag.
        offset: usize,
    },

    /// A close tag that does not name the innermost open element.
    #[error("close tag </{found}> at byte {offset} does not match {}", describe_open(.expected.as_deref()))]
    StructuralMismatch {
        /// The innermost open element, or `None` if nothing was open.
        expected: Option<String>,
        /// The tag name the close tag carried.
        found: String,
        /// Position of the close tag's `<`.
        offset: usize,
    },

    /// End of input with elements still open.
    #[error("element <{tag}> was never closed")]
    UnclosedElement {
        /// The innermost element left open.
        tag: String,
    },

    /// An attribute that starts with a character no name can start with.
    #[error("invalid attribute at byte {offset}")]
    InvalidAttribute {
        /// Position of the offending character.
        offset: usize,
    },
}

fn describe_open(expected: Option<&str>) -> String {
    expected.map_or_else(|| "any open element".to_string(), |tag| format!("<{tag}>"))
}

/// Why an assignment to a document was refused.
///
/// A failed mutation leaves the document exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutationError {
    /// The new markup did not parse.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// `outerHTML` markup must produce exactly one top-level node.
    #[error("fragment must contain exactly one top-level node, found {count}")]
    MalformedFragment {
        /// Number of top-level nodes the fragment produced.
        count: usize,
    },

    /// The operation is not defined for this node.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// The handle does not refer to a live node.
    #[error("node {0} does not exist")]
    InvalidNode(NodeId),

    /// The node cannot become a child (attached elsewhere, repeated, the
    /// root, or an ancestor of the target).
    #[error("node {0} cannot be adopted as a child")]
    InvalidChild(NodeId),
}
