use strum_macros::Display;

use htmlparse_common::warning::warn_once;
use htmlparse_dom::is_raw_text_element;

use super::entities::decode_entities;
use super::helpers::{ends_attribute_name, is_tag_name_char};
use super::token::Token;
use crate::error::ParseError;

/// Where the scanner is in the markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ScannerState {
    /// Between tags: character data, comments, and the start of tags.
    Data,
    /// Inside an open tag, after its name: attributes until `>` or `/>`.
    InTag,
    /// Inside `script`/`style`: verbatim text up to the matching close tag.
    RawText,
    /// End of input reached or an error reported. Nothing more is produced.
    Done,
}

/// A lazy, single-pass tokenizer over an HTML source string.
///
/// The scanner is an [`Iterator`] of `Result<Token, ParseError>`. After the
/// first error or the end of input it yields `None` forever. Create a new
/// scanner to scan another source.
///
/// ```
/// use htmlparse::{Scanner, Token};
///
/// let tokens: Vec<Token> = Scanner::new("<br>").collect::<Result<_, _>>().unwrap();
/// assert_eq!(
///     tokens,
///     vec![
///         Token::OpenTagStart { name: "br".into() },
///         Token::OpenTagEnd { self_closing: false },
///     ]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    pub(super) input: &'a str,
    pub(super) pos: usize,
    pub(super) state: ScannerState,
    /// Offset of the `<` of the tag being scanned, for error reporting.
    pub(super) tag_start: usize,
    /// Offset at which the most recent token began.
    pub(super) token_start: usize,
    /// Name of the open tag whose attributes are being scanned.
    pub(super) current_tag: Option<String>,
    /// Name of the raw text element whose content is being scanned.
    pub(super) raw_text_tag: Option<String>,
}

impl<'a> Scanner<'a> {
    /// Create a scanner positioned at the start of `input`.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            state: ScannerState::Data,
            tag_start: 0,
            token_start: 0,
            current_tag: None,
            raw_text_tag: None,
        }
    }

    /// The current state of the state machine.
    #[must_use]
    pub const fn state(&self) -> ScannerState {
        self.state
    }

    /// Byte offset of the next unconsumed character.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Byte offset at which the most recently returned token began.
    #[must_use]
    pub const fn token_start(&self) -> usize {
        self.token_start
    }

    fn scan(&mut self) -> Result<Option<Token>, ParseError> {
        match self.state {
            ScannerState::Data => self.scan_data(),
            ScannerState::InTag => self.scan_in_tag().map(Some),
            ScannerState::RawText => self.scan_raw_text(),
            ScannerState::Done => Ok(None),
        }
    }

    /// Character data up to the next tag, or the next tag itself.
    ///
    /// Comments and declarations are skipped in place, so text on either
    /// side of them comes out as one token.
    fn scan_data(&mut self) -> Result<Option<Token>, ParseError> {
        self.token_start = self.pos;
        let mut text = String::new();

        while let Some(c) = self.peek() {
            if c != '<' {
                let segment = self.take_while(|c| c != '<');
                text.push_str(&decode_entities(segment));
                continue;
            }

            if self.next_few_characters_are("<!--") {
                self.skip_comment()?;
            } else if self.next_few_characters_are("<!") || self.next_few_characters_are("<?") {
                self.skip_declaration()?;
            } else if self.peek_nth(1) == Some('/') {
                if !text.is_empty() {
                    return Ok(Some(Token::RawText { content: text }));
                }
                return self.scan_close_tag().map(Some);
            } else if self.peek_nth(1).is_some_and(|c| c.is_ascii_alphabetic()) {
                if !text.is_empty() {
                    return Ok(Some(Token::RawText { content: text }));
                }
                return Ok(Some(self.scan_open_tag_start()));
            } else {
                // A '<' that cannot start markup is ordinary text.
                let _ = self.consume();
                text.push('<');
            }
        }

        if text.is_empty() {
            Ok(None)
        } else {
            Ok(Some(Token::RawText { content: text }))
        }
    }

    /// `<name`: emits the tag name and switches to attribute scanning.
    fn scan_open_tag_start(&mut self) -> Token {
        self.tag_start = self.pos;
        self.token_start = self.pos;
        let _ = self.consume();
        let name = self.take_while(is_tag_name_char).to_ascii_lowercase();
        self.current_tag = Some(name.clone());
        self.state = ScannerState::InTag;
        Token::OpenTagStart { name }
    }

    /// `</name>` with optional whitespace before the `>`.
    fn scan_close_tag(&mut self) -> Result<Token, ParseError> {
        self.tag_start = self.pos;
        self.token_start = self.pos;
        let unterminated = ParseError::UnterminatedTag {
            offset: self.tag_start,
        };
        self.pos += 2;

        if !self.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
            return Err(unterminated);
        }
        let name = self.take_while(is_tag_name_char).to_ascii_lowercase();
        self.skip_whitespace();
        if self.consume() != Some('>') {
            return Err(unterminated);
        }
        Ok(Token::CloseTag { name })
    }

    /// Attributes, then `>` or `/>`.
    fn scan_in_tag(&mut self) -> Result<Token, ParseError> {
        loop {
            self.skip_whitespace();
            self.token_start = self.pos;
            match self.peek() {
                None => {
                    return Err(ParseError::UnterminatedTag {
                        offset: self.tag_start,
                    });
                }
                Some('>') => {
                    let _ = self.consume();
                    return Ok(self.finish_open_tag(false));
                }
                Some('/') => {
                    let _ = self.consume();
                    if self.peek() == Some('>') {
                        let _ = self.consume();
                        return Ok(self.finish_open_tag(true));
                    }
                    // A stray '/' separates attributes like whitespace does.
                }
                Some('=' | '"' | '\'' | '<') => {
                    return Err(ParseError::InvalidAttribute { offset: self.pos });
                }
                Some(_) => return self.scan_attribute(),
            }
        }
    }

    fn finish_open_tag(&mut self, self_closing: bool) -> Token {
        let tag = self.current_tag.take();
        match tag {
            Some(name) if !self_closing && is_raw_text_element(&name) => {
                self.raw_text_tag = Some(name);
                self.state = ScannerState::RawText;
            }
            _ => self.state = ScannerState::Data,
        }
        Token::OpenTagEnd { self_closing }
    }

    /// `name`, `name=value`, `name='value'` or `name="value"`.
    fn scan_attribute(&mut self) -> Result<Token, ParseError> {
        let name = self.take_while(|c| !ends_attribute_name(c)).to_ascii_lowercase();
        self.skip_whitespace();
        if self.peek() != Some('=') {
            return Ok(Token::Attribute { name, value: None });
        }
        let _ = self.consume();
        self.skip_whitespace();

        let value = match self.peek() {
            None => {
                return Err(ParseError::UnterminatedTag {
                    offset: self.tag_start,
                });
            }
            Some(quote @ ('"' | '\'')) => {
                let _ = self.consume();
                let raw = self.take_while(|c| c != quote);
                if self.consume() != Some(quote) {
                    return Err(ParseError::UnterminatedTag {
                        offset: self.tag_start,
                    });
                }
                raw
            }
            Some(_) => self.take_while(|c| !c.is_ascii_whitespace() && c != '>'),
        };

        Ok(Token::Attribute {
            name,
            value: Some(decode_entities(value)),
        })
    }

    /// Verbatim content of a `script`/`style` element.
    fn scan_raw_text(&mut self) -> Result<Option<Token>, ParseError> {
        self.token_start = self.pos;
        let tag = self.raw_text_tag.take().unwrap_or_default();
        let rest = self.rest();
        let end = find_raw_text_end(rest, &tag).unwrap_or(rest.len());
        self.pos += end;
        self.state = ScannerState::Data;

        if end == 0 {
            return self.scan_data();
        }
        Ok(Some(Token::RawText {
            content: rest[..end].to_string(),
        }))
    }

    /// `<!-- ... -->`
    fn skip_comment(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        let Some(end) = self.rest()[4..].find("-->") else {
            return Err(ParseError::UnterminatedTag { offset: start });
        };
        self.pos += 4 + end + 3;
        warn_once("HTML Scanner", "comments are not kept in the tree");
        Ok(())
    }

    /// `<!DOCTYPE ...>`, `<?...>` and other declarations.
    fn skip_declaration(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        let Some(end) = self.rest().find('>') else {
            return Err(ParseError::UnterminatedTag { offset: start });
        };
        self.pos += end + 1;
        Ok(())
    }
}

/// Offset of the `</tag` that closes a raw text element, matched ASCII
/// case-insensitively and followed by whitespace, `/` or `>`.
pub(crate) fn find_raw_text_end(rest: &str, tag: &str) -> Option<usize> {
    let bytes = rest.as_bytes();
    let mut from = 0;
    while let Some(found) = rest[from..].find("</") {
        let start = from + found;
        let name_start = start + 2;
        let name_end = name_start + tag.len();
        let name_matches = bytes
            .get(name_start..name_end)
            .is_some_and(|name| name.eq_ignore_ascii_case(tag.as_bytes()));
        let boundary = bytes
            .get(name_end)
            .is_some_and(|&b| b.is_ascii_whitespace() || b == b'/' || b == b'>');
        if name_matches && boundary {
            return Some(start);
        }
        from = name_start;
    }
    None
}

impl Iterator for Scanner<'_> {
    type Item = Result<Token, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.scan() {
            Ok(Some(token)) => Some(Ok(token)),
            Ok(None) => {
                self.state = ScannerState::Done;
                None
            }
            Err(error) => {
                self.state = ScannerState::Done;
                Some(Err(error))
            }
        }
    }
}

impl std::iter::FusedIterator for Scanner<'_> {}
