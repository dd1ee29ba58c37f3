//! htmlparse CLI - parse HTML and inspect the result
//!
//! Usage:
//!   htmlparse <file>...              Print the DOM tree of each file
//!   htmlparse <file> --json          Dump the DOM as JSON
//!   htmlparse <file> --tokens        Show scanner tokens
//!   htmlparse <file> --id ID         Print the outer HTML of one element
//!   htmlparse --html '<p>Hi</p>'     Parse a string instead of a file

use std::fs;
use std::process::ExitCode;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use owo_colors::OwoColorize;
use serde::Serialize;

use htmlparse::{Document, parse_html, print_tree, tokenize};
use htmlparse_common::warning::clear_warnings;
use htmlparse_dom::{NodeId, NodeType};

/// Parse HTML documents and print their tree (the default), tokens, JSON,
/// or a single element
#[derive(Parser, Debug)]
#[command(name = "htmlparse")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the tree of a file
    htmlparse page.html

    # Parse inline HTML and dump it as JSON
    htmlparse --html '<div id="a">Hi</div>' --json

    # Print the content of the element with id "main"
    htmlparse page.html --id main --inner
"#)]
struct Cli {
    /// HTML files to parse
    #[arg(value_name = "FILE", conflicts_with = "html")]
    paths: Vec<String>,

    /// Parse HTML string directly instead of a file
    #[arg(long, value_name = "HTML")]
    html: Option<String>,

    /// Print the tree as pretty JSON
    #[arg(short, long, group = "output")]
    json: bool,

    /// Print scanner tokens instead of building a tree
    #[arg(short, long, group = "output")]
    tokens: bool,

    /// Print the outer HTML of the element with this id
    #[arg(long, value_name = "ID", group = "output")]
    id: Option<String>,

    /// With --id, print the element's inner HTML instead
    #[arg(long, requires = "id")]
    inner: bool,
}

/// One node of the `--json` dump. Nodes are listed in document order and
/// refer to each other by id, so deep trees serialize without nesting.
#[derive(Serialize)]
struct JsonNode<'a> {
    id: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent: Option<usize>,
    #[serde(flatten)]
    kind: JsonKind<'a>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<usize>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum JsonKind<'a> {
    Document,
    Element {
        #[serde(rename = "tagName")]
        tag_name: &'a str,
        attributes: Vec<JsonAttribute<'a>>,
    },
    Text {
        content: &'a str,
    },
}

#[derive(Serialize)]
struct JsonAttribute<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<&'a str>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let sources = load_sources(cli)?;
    let many = sources.len() > 1;

    for (label, html) in &sources {
        // Each document reports its own diagnostics
        clear_warnings();
        if many {
            println!("{}", format!("=== {label} ===").bold());
        }
        process(cli, html).with_context(|| format!("failed to process {label}"))?;
    }
    Ok(())
}

/// Collect `(label, markup)` pairs from `--html` or the FILE arguments.
fn load_sources(cli: &Cli) -> Result<Vec<(String, String)>> {
    if let Some(ref html) = cli.html {
        return Ok(vec![("--html".to_string(), html.clone())]);
    }
    if cli.paths.is_empty() {
        bail!("no input: pass one or more files, or --html");
    }
    cli.paths
        .iter()
        .map(|path| {
            let html = fs::read_to_string(path)
                .with_context(|| format!("failed to read '{path}'"))?;
            Ok((path.clone(), html))
        })
        .collect()
}

fn process(cli: &Cli, html: &str) -> Result<()> {
    if cli.tokens {
        let tokens = tokenize(html)?;
        println!("=== HTML Tokens ({}) ===", tokens.len());
        for (i, token) in tokens.iter().enumerate() {
            println!("  {i:3}: {token}");
        }
        return Ok(());
    }

    let doc = parse_html(html)?;

    if let Some(ref id) = cli.id {
        let element = doc
            .get_element_by_id(doc.root(), id)
            .ok_or_else(|| anyhow!("no element with id '{id}'"))?;
        if cli.inner {
            println!("{}", doc.inner_html(element));
        } else {
            println!("{}", doc.outer_html(element));
        }
    } else if cli.json {
        let json = to_json(&doc, doc.root());
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        print_tree(doc.tree(), doc.root(), 0);
    }
    Ok(())
}

fn to_json(doc: &Document, id: NodeId) -> Vec<JsonNode<'_>> {
    doc.tree()
        .descendants(id)
        .filter_map(|current| {
            let node = doc.tree().get(current)?;
            let kind = match &node.node_type {
                NodeType::Document => JsonKind::Document,
                NodeType::Element(data) => JsonKind::Element {
                    tag_name: &data.tag_name,
                    attributes: data
                        .attrs
                        .iter()
                        .map(|(name, value)| JsonAttribute { name, value })
                        .collect(),
                },
                NodeType::Text(text) => JsonKind::Text { content: text },
            };
            Some(JsonNode {
                id: current.index(),
                parent: node.parent.map(NodeId::index),
                kind,
                children: node.children.iter().copied().map(NodeId::index).collect(),
            })
        })
        .collect()
}
