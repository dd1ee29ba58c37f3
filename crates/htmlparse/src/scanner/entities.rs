//! Character reference decoding.
//!
//! Supports `&#NN;`, `&#xHH;` and a small table of named references. The
//! trailing semicolon is required. Anything else is left in the text as a
//! literal `&`, which the serializer later writes back as `&amp;`.

use std::collections::HashMap;
use std::sync::LazyLock;

use htmlparse_common::warning::warn_once;

/// Maps entity names (without `&` and `;`) to their replacement character.
static NAMED_ENTITIES: LazyLock<HashMap<&'static str, char>> = LazyLock::new(|| {
    HashMap::from([
        // Markup-significant characters
        ("amp", '&'),
        ("lt", '<'),
        ("gt", '>'),
        ("quot", '"'),
        ("apos", '\''),
        ("nbsp", '\u{00A0}'),
        // Common punctuation and symbols
        ("copy", '\u{00A9}'),
        ("reg", '\u{00AE}'),
        ("trade", '\u{2122}'),
        ("mdash", '\u{2014}'),
        ("ndash", '\u{2013}'),
        ("hellip", '\u{2026}'),
        ("laquo", '\u{00AB}'),
        ("raquo", '\u{00BB}'),
        ("lsquo", '\u{2018}'),
        ("rsquo", '\u{2019}'),
        ("ldquo", '\u{201C}'),
        ("rdquo", '\u{201D}'),
        ("bull", '\u{2022}'),
        ("middot", '\u{00B7}'),
        ("euro", '\u{20AC}'),
        ("times", '\u{00D7}'),
        ("divide", '\u{00F7}'),
        ("deg", '\u{00B0}'),
    ])
});

/// Longest entity name we bother looking up.
const MAX_NAME_LEN: usize = 32;

/// Look up a named reference such as `"amp"`.
#[must_use]
pub fn lookup_named(name: &str) -> Option<char> {
    NAMED_ENTITIES.get(name).copied()
}

/// Decode the character reference at the start of `input`.
///
/// `input` must begin with `&`. Returns the decoded character and the number
/// of bytes consumed (including `&` and `;`), or `None` if `input` does not
/// start with a supported reference.
///
/// Numeric references to U+0000, surrogates, or values beyond U+10FFFF decode
/// to U+FFFD.
#[must_use]
pub fn decode_reference(input: &str) -> Option<(char, usize)> {
    let rest = input.strip_prefix('&')?;

    if let Some(numeric) = rest.strip_prefix('#') {
        let (digits, radix, prefix_len) = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => (hex, 16, 3),
            None => (numeric, 10, 2),
        };
        let end = digits
            .find(|c: char| !c.is_digit(radix))
            .unwrap_or(digits.len());
        if end == 0 || !digits[end..].starts_with(';') {
            return None;
        }
        let decoded = u32::from_str_radix(&digits[..end], radix)
            .ok()
            .filter(|&value| value != 0)
            .and_then(char::from_u32)
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        return Some((decoded, prefix_len + end + 1));
    }

    let end = rest
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(rest.len());
    if end == 0 || end > MAX_NAME_LEN || !rest[end..].starts_with(';') {
        return None;
    }
    lookup_named(&rest[..end]).map(|c| (c, end + 2))
}

/// Replace every supported character reference in `text`.
///
/// Unsupported references that look like one (`&name;`, `&#...`) are kept
/// verbatim and reported once through [`warn_once`].
#[must_use]
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        if let Some((c, consumed)) = decode_reference(rest) {
            out.push(c);
            rest = &rest[consumed..];
        } else {
            if looks_like_reference(rest) {
                warn_once(
                    "HTML Scanner",
                    &format!("unknown character reference '{}' kept as text", preview(rest)),
                );
            }
            out.push('&');
            rest = &rest[1..];
        }
    }
    out.push_str(rest);
    out
}

fn looks_like_reference(input: &str) -> bool {
    input[1..]
        .chars()
        .next()
        .is_some_and(|c| c == '#' || c.is_ascii_alphanumeric())
}

fn preview(input: &str) -> &str {
    let end = input
        .char_indices()
        .take(MAX_NAME_LEN)
        .find(|&(_, c)| c == ';' || c.is_whitespace())
        .map_or_else(
            || input.char_indices().nth(12).map_or(input.len(), |(i, _)| i),
            |(i, c)| if c == ';' { i + 1 } else { i },
        );
    &input[..end]
}
