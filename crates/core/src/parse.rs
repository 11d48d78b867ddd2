//! Document loading with charset recovery.
//!
//! This module provides [`Document`], the read-only tree every expression is
//! evaluated against. A document is built once per invocation from raw
//! bytes and then shared by reference.
//!
//! # Example
//!
//! ```rust
//! use scrape_core::{Document, LoadOptions};
//!
//! let bytes = b"<html><head><title>Test</title></head><body><p>Hello</p></body></html>";
//! let doc = Document::load(bytes, &LoadOptions::default()).unwrap();
//! assert_eq!(doc.title(), Some("Test".to_string()));
//! ```

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;
use sxd_document::{Package, dom, parser};
use tracing::debug;

use crate::render;
use crate::xpath::{Match, XPathEvaluator};
use crate::{Result, ScrapeError, dom_tree, encoding};

/// How raw bytes are turned into a tree.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Parse as XML, without HTML error recovery. Useful when the input is
    /// not really HTML, e.g. feeds carrying CDATA sections.
    pub raw: bool,
}

/// A parsed, immutable document.
///
/// The tree is stored as an `sxd_document` package so that it can be
/// queried with full XPath 1.0.
pub struct Document {
    package: Package,
}

impl Document {
    /// Decodes and parses raw bytes.
    ///
    /// A `charset` declared in a meta tag within the first kilobyte is used
    /// when the bytes are valid in it. Otherwise the bytes are read as UTF-8,
    /// and if that fails, once more as windows-1252, which accepts any input.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Parse`] when `options.raw` is set and the text
    /// is not well-formed XML. HTML parsing always recovers.
    pub fn load(bytes: &[u8], options: &LoadOptions) -> Result<Self> {
        let text = decode(bytes);

        if options.raw { Self::parse_xml(&text) } else { Self::parse_html(&text) }
    }

    /// Parses HTML with error recovery.
    ///
    /// Malformed tags, missing end tags and stray text never abort parsing.
    /// Only nesting deeper than [`dom_tree::MAX_DEPTH`] is an error.
    pub fn parse_html(html: &str) -> Result<Self> {
        let html = Html::parse_document(html);
        Ok(Self { package: dom_tree::html_to_package(&html)? })
    }

    /// Parses well-formed XML without any recovery.
    ///
    /// A document type declaration is skipped rather than parsed, so XHTML
    /// pages with a `PUBLIC` identifier load like any other XML.
    pub fn parse_xml(xml: &str) -> Result<Self> {
        let package = parser::parse(&strip_doctype(xml)).map_err(|e| ScrapeError::Parse(e.to_string()))?;
        dom_tree::ensure_depth(&package.as_document())?;
        Ok(Self { package })
    }

    /// Gets the underlying `sxd_document` view of the tree.
    pub fn dom(&self) -> dom::Document<'_> {
        self.package.as_document()
    }

    /// Evaluates an XPath expression with the document element as context.
    pub fn evaluate(&self, xpath: &str) -> Result<Vec<Match<'_>>> {
        XPathEvaluator::new().evaluate(self, xpath)
    }

    /// Gets the title of the document.
    ///
    /// Returns the text of the first `<title>` element if present.
    pub fn title(&self) -> Option<String> {
        self.evaluate("//title")
            .ok()?
            .first()
            .map(|title| render::text_content(title).trim().to_string())
    }

    /// Gets all text content from the document, excluding script and style
    /// elements.
    pub fn text_content(&self) -> String {
        render::text_content(&Match::Root(self.dom().root()))
    }
}

/// Applies the charset policy and returns UTF-8 text.
fn decode(bytes: &[u8]) -> Cow<'_, str> {
    if let Some(label) = encoding::sniff_charset(bytes) {
        match encoding::decode_with_label(bytes, &label) {
            Some(text) => {
                debug!(charset = %label, "decoded input with declared charset");
                return text;
            }
            None => debug!(charset = %label, "declared charset unusable, ignoring it"),
        }
    }

    match encoding::decode_utf8(bytes) {
        Some(text) => Cow::Borrowed(text),
        None => {
            debug!("input is not valid UTF-8, falling back to windows-1252");
            encoding::decode_latin1(bytes)
        }
    }
}

/// Removes a `<!DOCTYPE ...>` declaration from the prolog, internal subset
/// included. Text without one is returned unchanged.
fn strip_doctype(xml: &str) -> Cow<'_, str> {
    let Some(start) = xml.find("<!DOCTYPE") else {
        return Cow::Borrowed(xml);
    };
    if PROLOG_ELEMENT_RE.is_match(&xml[..start]) {
        return Cow::Borrowed(xml);
    }

    let mut quote = None;
    let mut subset = false;
    for (offset, c) in xml[start..].char_indices() {
        match (quote, c) {
            (Some(q), _) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '[') => subset = true,
            (None, ']') => subset = false,
            (None, '>') if !subset => {
                let end = start + offset + 1;
                debug!("skipping document type declaration");
                return Cow::Owned(format!("{}{}", &xml[..start], &xml[end..]));
            }
            _ => {}
        }
    }
    Cow::Borrowed(xml)
}

static PROLOG_ELEMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[A-Za-z_:]").unwrap());
