//! HTML scanner, tree builder and serializer with reparse-based mutation.
//!
//! # Scope
//!
//! This crate implements:
//! - **Scanner** - a lazy cursor over the source producing tag-open,
//!   attribute, tag-end, close-tag and text tokens, decoding character
//!   references as it goes
//! - **Tree Builder** - a stack of open elements that turns tokens into a
//!   [`DomTree`](htmlparse_dom::DomTree), rejecting mismatched or unclosed tags
//! - **Serializer** - inner and outer HTML rendering from the live tree
//! - **Mutation** - `innerHTML`/`outerHTML` assignment by reparsing a fragment
//!   and splicing it into the tree, plus wholesale `children`/`attrs` setters
//!
//! # Not Implemented
//!
//! - Error-tolerant (tag-soup) parsing: any structural problem fails the parse
//! - The full named character reference table
//! - Comments and DOCTYPEs in the tree (they are skipped)
//!
//! # Example
//!
//! ```
//! use htmlparse::parse_html;
//!
//! let mut doc = parse_html(r#"<div class="box"><a id="x">old</a></div>"#).unwrap();
//! let a = doc.get_element_by_id(doc.root(), "x").unwrap();
//! doc.set_inner_html(a, "new &amp; improved").unwrap();
//!
//! let div = doc.document_element().unwrap();
//! assert_eq!(
//!     doc.outer_html(div),
//!     r#"<div class="box"><a id="x">new &amp; improved</a></div>"#
//! );
//! ```

/// A parsed document and its accessors.
pub mod document;
/// Error types for parsing and mutation.
pub mod error;
/// innerHTML/outerHTML assignment and wholesale setters.
pub mod mutation;
/// Tree construction from scanner tokens.
pub mod parser;
/// Tokenization of HTML source.
pub mod scanner;
/// Rendering trees back to HTML text.
pub mod serializer;

pub use document::Document;
pub use error::{MutationError, ParseError};
pub use parser::{TreeBuilder, parse_fragment, parse_html, print_tree};
pub use scanner::{Scanner, ScannerState, Token, tokenize};
pub use serializer::{RenderMode, escape_attribute, escape_text, render};
