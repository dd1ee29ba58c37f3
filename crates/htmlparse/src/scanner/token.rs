use core::fmt;

/// A token produced by the [`Scanner`](super::Scanner).
///
/// An open tag arrives as `OpenTagStart`, zero or more `Attribute`s, then
/// `OpenTagEnd`. Whitespace between attributes is never emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `<name`: the start of an open tag.
    OpenTagStart {
        /// Lowercase tag name.
        name: String,
    },

    /// One attribute of the tag currently being scanned.
    Attribute {
        /// Lowercase attribute name.
        name: String,
        /// Decoded value, or `None` for a bare attribute.
        value: Option<String>,
    },

    /// `>` or `/>`: the end of an open tag.
    OpenTagEnd {
        /// True when the tag ended with `/>`.
        self_closing: bool,
    },

    /// `</name>`.
    CloseTag {
        /// Lowercase tag name.
        name: String,
    },

    /// Character data between tags, with character references decoded.
    /// Inside `script`/`style` the content is verbatim.
    RawText {
        /// The decoded text.
        content: String,
    },
}

impl Token {
    /// Returns true if this token ends an open tag.
    #[must_use]
    pub const fn is_open_tag_end(&self) -> bool {
        matches!(self, Self::OpenTagEnd { .. })
    }

    /// Returns the tag name for open-tag-start and close tokens.
    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Self::OpenTagStart { name } | Self::CloseTag { name } => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenTagStart { name } => write!(f, "OpenTagStart({name})"),
            Self::Attribute { name, value: Some(value) } => {
                write!(f, "Attribute({name}={value:?})")
            }
            Self::Attribute { name, value: None } => write!(f, "Attribute({name})"),
            Self::OpenTagEnd { self_closing } => write!(f, "OpenTagEnd(self_closing={self_closing})"),
            Self::CloseTag { name } => write!(f, "CloseTag({name})"),
            Self::RawText { content } => write!(f, "RawText({content:?})"),
        }
    }
}
