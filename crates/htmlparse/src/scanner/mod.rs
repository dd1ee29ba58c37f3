//! HTML scanner module.
//!
//! Turns source text into a flat stream of [`Token`]s for the tree builder.

/// Character reference decoding.
pub mod entities;
/// Cursor helpers used by the state machine.
mod helpers;
/// Scanner state machine.
pub mod machine;
/// Token types produced by the scanner.
pub mod token;

pub use machine::{Scanner, ScannerState};
pub use token::Token;

use crate::error::ParseError;

/// Scan `source` to completion, stopping at the first error.
///
/// # Errors
///
/// Returns the first [`ParseError`] the scanner reports.
pub fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    Scanner::new(source).collect()
}
