//! Integration tests for tree construction.

use htmlparse::{Document, ParseError, parse_fragment, parse_html};
use htmlparse_dom::{NodeId, NodeType};

/// Helper to parse HTML that is expected to be well-formed
fn parse(html: &str) -> Document {
    parse_html(html).expect("document should parse")
}

/// Helper to get element by tag name (first match, depth-first)
fn find_element(doc: &Document, tag: &str) -> NodeId {
    doc.get_elements_by_tag_name(doc.root(), tag)
        .first()
        .copied()
        .unwrap_or_else(|| panic!("no <{tag}> in document"))
}

#[test]
fn test_empty_document_is_not_a_failure() {
    let doc = parse("");
    assert!(doc.children(doc.root()).is_empty());
    assert_eq!(doc.document_element(), None);
    assert_eq!(doc.outer_html(doc.root()), "");
}

#[test]
fn test_link_scenario() {
    let doc = parse(
        r#"<div class="black blue"><a href="https://github.com/" id="abc"></a></div>"#,
    );

    let div = doc.document_element().unwrap();
    assert_eq!(doc.tag_name(div), Some("div"));
    let div_attrs: Vec<_> = doc.attrs(div).unwrap().iter().collect();
    assert_eq!(div_attrs, vec![("class", Some("black blue"))]);

    let children = doc.children(div);
    assert_eq!(children.len(), 1);
    let a = children[0];
    assert_eq!(doc.tag_name(a), Some("a"));
    let a_attrs: Vec<_> = doc.attrs(a).unwrap().iter().collect();
    assert_eq!(
        a_attrs,
        vec![("href", Some("https://github.com/")), ("id", Some("abc"))]
    );
    assert_eq!(doc.parent(a), Some(div));

    assert_eq!(doc.get_element_by_id(div, "abc"), Some(a));
    assert_eq!(doc.get_element_by_id(doc.root(), "abc"), Some(a));
    assert_eq!(doc.get_element_by_id(div, "nope"), None);
}

#[test]
fn test_unclosed_child_before_parent_close_fails() {
    // No implied end tags: the <a> must be closed before </div>
    let result = parse_html(r#"<div class="black blue"><a href="https://github.com/" id="abc"></div>"#);
    assert!(matches!(
        result,
        Err(ParseError::StructuralMismatch { ref expected, ref found, .. })
            if expected.as_deref() == Some("a") && found == "div"
    ));
}

#[test]
fn test_structural_mismatch() {
    assert_eq!(
        parse_html("<div><span></div>").unwrap_err(),
        ParseError::StructuralMismatch {
            expected: Some("span".to_string()),
            found: "div".to_string(),
            offset: 11,
        }
    );
}

#[test]
fn test_stray_close_tag() {
    assert_eq!(
        parse_html("</p>").unwrap_err(),
        ParseError::StructuralMismatch {
            expected: None,
            found: "p".to_string(),
            offset: 0,
        }
    );
}

#[test]
fn test_unclosed_element() {
    assert_eq!(
        parse_html("<div><p>text").unwrap_err(),
        ParseError::UnclosedElement {
            tag: "p".to_string()
        }
    );
    assert_eq!(
        parse_html("<script>x").unwrap_err(),
        ParseError::UnclosedElement {
            tag: "script".to_string()
        }
    );
}

#[test]
fn test_scanner_errors_fail_the_parse() {
    assert!(matches!(
        parse_html("<p>hi</p><p"),
        Err(ParseError::UnterminatedTag { offset: 9 })
    ));
    assert!(matches!(
        parse_html("<p =x></p>"),
        Err(ParseError::InvalidAttribute { .. })
    ));
}

#[test]
fn test_void_elements() {
    let doc = parse("<p>a<br>b<img src=x.png></p>");
    let p = find_element(&doc, "p");
    let children = doc.children(p);
    assert_eq!(children.len(), 4);
    assert_eq!(doc.text(children[0]), Some("a"));
    assert_eq!(doc.tag_name(children[1]), Some("br"));
    assert!(doc.children(children[1]).is_empty());
    assert_eq!(doc.text(children[2]), Some("b"));
    assert_eq!(doc.tag_name(children[3]), Some("img"));
}

#[test]
fn test_all_void_elements_need_no_close_tag() {
    let doc = parse(
        "<div><area><base><br><col><command><embed><hr><img><input><keygen>\
         <link><meta><param><source><track><wbr></div>",
    );
    let div = doc.document_element().unwrap();
    assert_eq!(doc.children(div).len(), 16);
    assert!(doc.children(div).iter().all(|&c| doc.children(c).is_empty()));
}

#[test]
fn test_void_close_tag_is_a_mismatch() {
    assert!(matches!(
        parse_html("<p><br></br></p>"),
        Err(ParseError::StructuralMismatch { .. })
    ));
}

#[test]
fn test_self_closing_non_void_element() {
    let doc = parse("<div/><span></span>");
    let top = doc.children(doc.root());
    assert_eq!(top.len(), 2);
    let div = doc.tree().as_element(top[0]).unwrap();
    assert_eq!(div.tag_name, "div");
    assert!(div.self_closing);
    assert!(doc.children(top[0]).is_empty());
    assert_eq!(doc.tag_name(top[1]), Some("span"));
}

#[test]
fn test_nested_elements_and_parent_links() {
    let doc = parse("<html><body><div><p>Text</p></div></body></html>");
    let html = doc.document_element().unwrap();
    let body = find_element(&doc, "body");
    let div = find_element(&doc, "div");
    let p = find_element(&doc, "p");

    assert_eq!(doc.parent(html), Some(doc.root()));
    assert_eq!(doc.parent(body), Some(html));
    assert_eq!(doc.parent(div), Some(body));
    assert_eq!(doc.parent(p), Some(div));
    assert_eq!(doc.text(doc.children(p)[0]), Some("Text"));
    assert_eq!(doc.parent(doc.root()), None);
}

#[test]
fn test_whitespace_text_is_preserved() {
    let doc = parse("<ul>\n  <li>a</li>\n</ul>");
    let ul = doc.document_element().unwrap();
    let children = doc.children(ul);
    assert_eq!(children.len(), 3);
    assert_eq!(doc.text(children[0]), Some("\n  "));
    assert_eq!(doc.text(children[2]), Some("\n"));
}

#[test]
fn test_text_around_comment_is_one_node() {
    let doc = parse("<p>before<!-- gone -->after</p>");
    let p = doc.document_element().unwrap();
    assert_eq!(doc.children(p).len(), 1);
    assert_eq!(doc.text(doc.children(p)[0]), Some("beforeafter"));
}

#[test]
fn test_doctype_is_dropped() {
    let doc = parse("<!DOCTYPE html>\n<html></html>");
    let top = doc.children(doc.root());
    assert_eq!(top.len(), 2);
    assert_eq!(doc.text(top[0]), Some("\n"));
    assert_eq!(doc.document_element(), Some(top[1]));
}

#[test]
fn test_script_text_is_raw() {
    let doc = parse("<script>if (a < b && c) { go('</p>'); }</script>");
    let script = doc.document_element().unwrap();
    assert_eq!(
        doc.text(doc.children(script)[0]),
        Some("if (a < b && c) { go('</p>'); }")
    );
}

#[test]
fn test_entity_decoded_text() {
    let doc = parse("<p>e&gt;</p>");
    let p = doc.document_element().unwrap();
    let text = doc.children(p)[0];
    assert_eq!(doc.text(text), Some("e>"));
    assert_eq!(doc.escaped_text(text).as_deref(), Some("e&gt;"));
}

#[test]
fn test_duplicate_attribute_first_wins() {
    let doc = parse(r#"<p id="one" ID="two"></p>"#);
    let p = doc.document_element().unwrap();
    let attrs = doc.attrs(p).unwrap();
    assert_eq!(attrs.len(), 1);
    assert_eq!(attrs.get("id"), Some("one"));
}

#[test]
fn test_names_lowercased() {
    let doc = parse(r#"<SECTION Data-Role="Main"></section>"#);
    let section = doc.document_element().unwrap();
    assert_eq!(doc.tag_name(section), Some("section"));
    assert_eq!(doc.attrs(section).unwrap().get("data-role"), Some("Main"));
}

#[test]
fn test_fragment_with_several_top_level_nodes() {
    let tree = parse_fragment("one<b>two</b>three").unwrap();
    let top = tree.children(NodeId::ROOT);
    assert_eq!(top.len(), 3);
    assert!(matches!(
        tree.get(top[0]).map(|n| &n.node_type),
        Some(NodeType::Text(t)) if t == "one"
    ));
    assert_eq!(tree.as_element(top[1]).unwrap().tag_name, "b");
}

#[test]
fn test_lookups() {
    let doc = parse(
        r#"<div><p class="note warn">a</p><p class="note">b</p><span class="warn" data-x="1"></span></div>"#,
    );
    let root = doc.root();
    assert_eq!(doc.get_elements_by_tag_name(root, "p").len(), 2);
    assert_eq!(doc.get_elements_by_class_name(root, "note").len(), 2);
    assert_eq!(doc.get_elements_by_class_name(root, "warn note").len(), 1);

    let query = [("data-x", "1")].into_iter().collect();
    let found = doc.get_elements_by_attrs(root, &query);
    assert_eq!(found.len(), 1);
    assert_eq!(doc.tag_name(found[0]), Some("span"));
}

#[test]
fn test_error_messages() {
    let err = parse_html("<div><span></div>").unwrap_err();
    assert_eq!(
        err.to_string(),
        "close tag </div> at byte 11 does not match <span>"
    );
    let err = parse_html("</p>").unwrap_err();
    assert_eq!(
        err.to_string(),
        "close tag </p> at byte 0 does not match any open element"
    );
    let err = parse_html("<ul>").unwrap_err();
    assert_eq!(err.to_string(), "element <ul> was never closed");
}

#[test]
fn test_escaped_text_inside_script_is_verbatim() {
    let doc = parse("<script>if (a < b && c) {}</script>");
    let script = doc.document_element().unwrap();
    let text = doc.children(script)[0];
    assert_eq!(
        doc.escaped_text(text).as_deref(),
        Some("if (a < b && c) {}")
    );
    assert_eq!(doc.escaped_text(script), None);
}

#[test]
fn test_deeply_nested_document_parses() {
    let depth = 100_000;
    let source = format!("{}{}", "<div>".repeat(depth), "</div>".repeat(depth));
    let doc = parse(&source);
    let deepest = doc.tree().descendants(doc.root()).last().unwrap();
    assert_eq!(doc.tree().ancestors(deepest).count(), depth);
}
