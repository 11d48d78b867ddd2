//! XPath evaluation over a loaded [`Document`].

use sxd_document::dom;
use sxd_xpath::nodeset::Node;
use sxd_xpath::{Context, Factory, Value, XPath};

use crate::parse::Document;
use crate::{Result, ScrapeError};

/// One item produced by evaluating an expression.
///
/// Element, root and comment nodes keep their place in the tree so they can
/// be serialized or searched further. Everything else (text nodes,
/// attribute values, strings, numbers, booleans) is already a plain string.
#[derive(Clone)]
pub enum Match<'d> {
    Element(dom::Element<'d>),
    Root(dom::Root<'d>),
    Comment(dom::Comment<'d>),
    Value(String),
}

impl<'d> Match<'d> {
    /// Converts an XPath result into matches.
    ///
    /// Node-sets come back in document order. An empty string and `false`
    /// produce no match; any other scalar produces exactly one.
    pub fn from_value(value: Value<'d>) -> Vec<Self> {
        match value {
            Value::Nodeset(nodes) => nodes.document_order().into_iter().map(Self::from_node).collect(),
            Value::String(s) if s.is_empty() => Vec::new(),
            Value::String(s) => vec![Self::Value(s)],
            Value::Number(n) => vec![Self::Value(format_number(n))],
            Value::Boolean(true) => vec![Self::Value("true".to_string())],
            Value::Boolean(false) => Vec::new(),
        }
    }

    fn from_node(node: Node<'d>) -> Self {
        match node {
            Node::Element(element) => Self::Element(element),
            Node::Root(root) => Self::Root(root),
            Node::Comment(comment) => Self::Comment(comment),
            Node::Attribute(attribute) => Self::Value(attribute.value().to_string()),
            Node::Text(text) => Self::Value(text.text().to_string()),
            other => Self::Value(other.string_value()),
        }
    }
}

/// Formats a number the way XPath's `string()` does.
fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() }
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// XPath evaluator for extraction queries
pub struct XPathEvaluator {
    factory: Factory,
}

impl XPathEvaluator {
    /// Create a new XPath evaluator
    pub fn new() -> Self {
        Self { factory: Factory::new() }
    }

    /// Compile an expression, reporting syntax errors
    pub fn compile(&self, xpath: &str) -> Result<XPath> {
        self.factory
            .build(xpath)
            .map_err(|e| ScrapeError::XPath(format!("Invalid XPath '{}': {}", xpath, e)))?
            .ok_or_else(|| ScrapeError::XPath(format!("Invalid XPath: '{}'", xpath)))
    }

    /// Evaluate an expression and return every match.
    ///
    /// The context node is the document element, so relative paths such as
    /// `body/p` start below `<html>`. A document without elements is
    /// searched from its root node instead.
    pub fn evaluate<'d>(&self, document: &'d Document, xpath: &str) -> Result<Vec<Match<'d>>> {
        let compiled = self.compile(xpath)?;
        let context = Context::new();
        let value = compiled.evaluate(&context, context_node(document))?;

        Ok(Match::from_value(value))
    }
}

fn context_node(document: &Document) -> Node<'_> {
    let root = document.dom().root();
    root.children()
        .into_iter()
        .find_map(|child| child.element())
        .map_or_else(|| Node::Root(root), Node::Element)
}

impl Default for XPathEvaluator {
    fn default() -> Self {
        Self::new()
    }
}
