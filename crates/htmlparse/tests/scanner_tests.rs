//! Integration tests for the HTML scanner.

use htmlparse::{ParseError, Scanner, ScannerState, Token, tokenize};

/// Helper to tokenize a string that is expected to scan cleanly
fn scan(input: &str) -> Vec<Token> {
    tokenize(input).expect("input should scan")
}

fn open(name: &str) -> Token {
    Token::OpenTagStart {
        name: name.to_string(),
    }
}

fn attr(name: &str, value: Option<&str>) -> Token {
    Token::Attribute {
        name: name.to_string(),
        value: value.map(str::to_string),
    }
}

const fn end(self_closing: bool) -> Token {
    Token::OpenTagEnd { self_closing }
}

fn close(name: &str) -> Token {
    Token::CloseTag {
        name: name.to_string(),
    }
}

fn text(content: &str) -> Token {
    Token::RawText {
        content: content.to_string(),
    }
}

#[test]
fn test_empty_input() {
    assert!(scan("").is_empty());
}

#[test]
fn test_plain_text() {
    assert_eq!(scan("Hello"), vec![text("Hello")]);
}

#[test]
fn test_element_with_attribute() {
    assert_eq!(
        scan(r#"<div class="black blue">hi</div>"#),
        vec![
            open("div"),
            attr("class", Some("black blue")),
            end(false),
            text("hi"),
            close("div"),
        ]
    );
}

#[test]
fn test_attribute_quoting_styles() {
    assert_eq!(
        scan("<a x=1 y='two' z=\"three\" w>"),
        vec![
            open("a"),
            attr("x", Some("1")),
            attr("y", Some("two")),
            attr("z", Some("three")),
            attr("w", None),
            end(false),
        ]
    );
}

#[test]
fn test_whitespace_around_equals_and_newlines() {
    assert_eq!(
        scan("<a\n  href = \"x\"\tid=y >"),
        vec![
            open("a"),
            attr("href", Some("x")),
            attr("id", Some("y")),
            end(false),
        ]
    );
}

#[test]
fn test_empty_unquoted_value() {
    assert_eq!(
        scan("<a title=>"),
        vec![open("a"), attr("title", Some("")), end(false)]
    );
}

#[test]
fn test_names_are_lowercased() {
    assert_eq!(
        scan("<DIV ID=Main></DIV>"),
        vec![open("div"), attr("id", Some("Main")), end(false), close("div")]
    );
}

#[test]
fn test_self_closing_syntax() {
    assert_eq!(
        scan(r#"<img src="a.png" />"#),
        vec![open("img"), attr("src", Some("a.png")), end(true)]
    );
    assert_eq!(scan("<br/>"), vec![open("br"), end(true)]);
}

#[test]
fn test_unquoted_value_keeps_trailing_slash() {
    // An unquoted value runs until whitespace or '>'
    assert_eq!(
        scan("<a href=/x/>"),
        vec![open("a"), attr("href", Some("/x/")), end(false)]
    );
}

#[test]
fn test_close_tag_allows_trailing_whitespace() {
    assert_eq!(scan("</p  >"), vec![close("p")]);
}

#[test]
fn test_entities_in_text() {
    assert_eq!(scan("e&gt;"), vec![text("e>")]);
    assert_eq!(
        scan("&lt;&amp;&quot;&apos;&#65;&#x42;"),
        vec![text("<&\"'AB")]
    );
    assert_eq!(scan("&copy; &mdash;"), vec![text("\u{00A9} \u{2014}")]);
}

#[test]
fn test_unknown_or_malformed_entities_stay_literal() {
    assert_eq!(scan("&bogus; & &amp"), vec![text("&bogus; & &amp")]);
    assert_eq!(scan("&#;&#xZ;"), vec![text("&#;&#xZ;")]);
}

#[test]
fn test_numeric_entities_out_of_range() {
    assert_eq!(scan("&#0;&#x110000;&#xD800;"), vec![text("\u{FFFD}\u{FFFD}\u{FFFD}")]);
}

#[test]
fn test_entities_in_attribute_values() {
    assert_eq!(
        scan(r#"<a title="a &amp; b &quot;c&quot;">"#),
        vec![open("a"), attr("title", Some("a & b \"c\"")), end(false)]
    );
}

#[test]
fn test_literal_less_than() {
    assert_eq!(scan("a < b <3"), vec![text("a < b <3")]);
}

#[test]
fn test_comment_is_skipped_and_text_joins() {
    assert_eq!(scan("a<!-- note -->b"), vec![text("ab")]);
    assert_eq!(scan("<!----><p></p>"), vec![open("p"), end(false), close("p")]);
}

#[test]
fn test_doctype_is_skipped() {
    assert_eq!(
        scan("<!DOCTYPE html><p></p>"),
        vec![open("p"), end(false), close("p")]
    );
}

#[test]
fn test_script_content_is_verbatim() {
    assert_eq!(
        scan("<script>if (a<b && c) { x = '</div>'; }</script>"),
        vec![
            open("script"),
            end(false),
            text("if (a<b && c) { x = '</div>'; }"),
            close("script"),
        ]
    );
}

#[test]
fn test_raw_text_close_tag_is_case_insensitive() {
    assert_eq!(
        scan("<style>p &amp; q</STYLE >"),
        vec![open("style"), end(false), text("p &amp; q"), close("style")]
    );
}

#[test]
fn test_empty_raw_text_element() {
    assert_eq!(
        scan("<script></script>"),
        vec![open("script"), end(false), close("script")]
    );
}

#[test]
fn test_unterminated_raw_text_runs_to_end() {
    assert_eq!(
        scan("<script>never closed"),
        vec![open("script"), end(false), text("never closed")]
    );
}

#[test]
fn test_unterminated_tag() {
    assert_eq!(
        tokenize("<p>ok</p><div class=\"x"),
        Err(ParseError::UnterminatedTag { offset: 9 })
    );
    assert_eq!(tokenize("<div"), Err(ParseError::UnterminatedTag { offset: 0 }));
    assert_eq!(tokenize("</div"), Err(ParseError::UnterminatedTag { offset: 0 }));
    assert_eq!(tokenize("</>"), Err(ParseError::UnterminatedTag { offset: 0 }));
    assert_eq!(tokenize("a<!-- x"), Err(ParseError::UnterminatedTag { offset: 1 }));
}

#[test]
fn test_invalid_attribute() {
    assert_eq!(
        tokenize(r#"<div ="x">"#),
        Err(ParseError::InvalidAttribute { offset: 5 })
    );
}

#[test]
fn test_scanner_is_lazy_and_fused() {
    let mut scanner = Scanner::new("<b>x<");
    assert_eq!(scanner.state(), ScannerState::Data);
    assert_eq!(scanner.next(), Some(Ok(open("b"))));
    assert_eq!(scanner.state(), ScannerState::InTag);
    assert_eq!(scanner.next(), Some(Ok(end(false))));
    assert_eq!(scanner.next(), Some(Ok(text("x<"))));
    assert_eq!(scanner.next(), None);
    assert_eq!(scanner.state(), ScannerState::Done);
    assert_eq!(scanner.next(), None);

    let mut failing = Scanner::new("<a href='x");
    assert_eq!(failing.next(), Some(Ok(open("a"))));
    assert!(matches!(failing.next(), Some(Err(ParseError::UnterminatedTag { .. }))));
    assert_eq!(failing.next(), None);
}

#[test]
fn test_token_display() {
    assert_eq!(open("p").to_string(), "OpenTagStart(p)");
    assert_eq!(attr("id", Some("a")).to_string(), "Attribute(id=\"a\")");
    assert_eq!(attr("hidden", None).to_string(), "Attribute(hidden)");
    assert_eq!(ScannerState::RawText.to_string(), "RawText");
}
