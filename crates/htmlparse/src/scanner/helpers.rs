//! Cursor helpers for the scanner.
//!
//! Everything here works on byte offsets into the source and only ever
//! advances over whole characters.

use super::machine::Scanner;

impl<'a> Scanner<'a> {
    /// The unconsumed remainder of the input.
    pub(super) fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// The next character without consuming it.
    pub(super) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// The character `offset` characters ahead, without consuming anything.
    pub(super) fn peek_nth(&self, offset: usize) -> Option<char> {
        self.rest().chars().nth(offset)
    }

    /// Consume the next character.
    pub(super) fn consume(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consume characters while `pred` holds and return them as a slice.
    pub(super) fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let end = rest.find(|c: char| !pred(c)).unwrap_or(rest.len());
        self.pos += end;
        &rest[..end]
    }

    /// Skip ASCII whitespace (the separator between attributes).
    pub(super) fn skip_whitespace(&mut self) {
        let _ = self.take_while(|c| c.is_ascii_whitespace());
    }

    /// "If the next few characters are..."
    pub(super) fn next_few_characters_are(&self, target: &str) -> bool {
        self.rest().starts_with(target)
    }
}

/// Characters allowed after the first letter of a tag name.
pub(super) const fn is_tag_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.')
}

/// Characters that end an attribute name.
pub(super) const fn ends_attribute_name(c: char) -> bool {
    c.is_ascii_whitespace() || matches!(c, '=' | '>' | '/' | '"' | '\'' | '<')
}
