//! Bridge from the recovered HTML tree to an XPath-capable document.
//!
//! `scraper` (html5ever) does the error-tolerant parsing; `sxd_document`
//! holds the result so `sxd_xpath` can query it. Element and attribute
//! names are copied without namespaces, so `//a` matches HTML anchors the
//! same way it would in an HTML-aware XPath engine.

use scraper::{ElementRef, Html, Node};
use sxd_document::dom::ChildOfElement;
use sxd_document::{Package, dom};

use crate::{Result, ScrapeError};

/// Deepest element nesting a document may have. XPath evaluation and
/// serialization walk the tree recursively, so anything deeper is refused.
pub const MAX_DEPTH: usize = 512;

/// Copy a parsed HTML tree into a new `sxd_document` package.
///
/// Elements, attributes, text and comments are kept. The doctype and
/// anything outside the root `<html>` element are dropped.
///
/// # Errors
///
/// Returns [`ScrapeError::Parse`] when elements nest deeper than
/// [`MAX_DEPTH`].
pub fn html_to_package(html: &Html) -> Result<Package> {
    let package = Package::new();
    {
        let document = package.as_document();
        let source = html.root_element();
        let root = copy_element(&document, source);
        document.root().append_child(root);

        let mut pending = vec![(source, root, 1)];
        while let Some((source, target, depth)) = pending.pop() {
            for child in source.children() {
                match child.value() {
                    Node::Element(_) => {
                        if let Some(child_source) = ElementRef::wrap(child) {
                            if depth >= MAX_DEPTH {
                                return Err(too_deep());
                            }
                            let child_target = copy_element(&document, child_source);
                            target.append_child(child_target);
                            pending.push((child_source, child_target, depth + 1));
                        }
                    }
                    Node::Text(text) => target.append_child(document.create_text(text)),
                    Node::Comment(comment) => target.append_child(document.create_comment(comment)),
                    _ => {}
                }
            }
        }
    }
    Ok(package)
}

/// Check that a document parsed some other way stays within [`MAX_DEPTH`].
pub fn ensure_depth(document: &dom::Document<'_>) -> Result<()> {
    let mut pending: Vec<(dom::Element<'_>, usize)> = document
        .root()
        .children()
        .into_iter()
        .filter_map(|child| child.element())
        .map(|element| (element, 1))
        .collect();

    while let Some((element, depth)) = pending.pop() {
        for child in element.children() {
            if let ChildOfElement::Element(child) = child {
                if depth >= MAX_DEPTH {
                    return Err(too_deep());
                }
                pending.push((child, depth + 1));
            }
        }
    }
    Ok(())
}

fn too_deep() -> ScrapeError {
    ScrapeError::Parse(format!("elements nested deeper than {} levels", MAX_DEPTH))
}

/// Creates an element carrying the source's name and attributes, without
/// children.
fn copy_element<'d>(document: &dom::Document<'d>, source: ElementRef<'_>) -> dom::Element<'d> {
    let element = document.create_element(source.value().name());
    for (name, value) in source.value().attrs() {
        element.set_attribute_value(name, value);
    }
    element
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root_element(package: &Package) -> dom::Element<'_> {
        package
            .as_document()
            .root()
            .children()
            .into_iter()
            .find_map(|child| child.element())
            .unwrap()
    }

    #[test]
    fn test_recovered_structure_is_copied() {
        let html = Html::parse_document("<p>unclosed<div class=x>inner</div>");
        let package = html_to_package(&html).unwrap();
        let root = root_element(&package);

        assert_eq!(root.name().local_part(), "html");

        let names: Vec<String> = root
            .children()
            .into_iter()
            .filter_map(|child| child.element())
            .map(|el| el.name().local_part().to_string())
            .collect();
        assert_eq!(names, vec!["head", "body"]);
    }

    #[test]
    fn test_attributes_and_text_are_copied() {
        let html = Html::parse_document(r#"<a href="x" title="t">link</a><!-- note -->"#);
        let package = html_to_package(&html).unwrap();
        let root = root_element(&package);

        let body = root
            .children()
            .into_iter()
            .filter_map(|child| child.element())
            .find(|el| el.name().local_part() == "body")
            .unwrap();

        let children = body.children();
        let anchor = children[0].element().unwrap();
        assert_eq!(anchor.attribute_value("href"), Some("x"));
        assert_eq!(anchor.attribute_value("title"), Some("t"));
        assert!(matches!(anchor.children()[0], ChildOfElement::Text(t) if t.text() == "link"));
        assert!(matches!(children[1], ChildOfElement::Comment(c) if c.text() == " note "));
    }

    fn nested(depth: usize) -> String {
        format!("{}deep{}", "<span>".repeat(depth), "</span>".repeat(depth))
    }

    #[test]
    fn test_deep_nesting_is_copied_in_order() {
        let html = Html::parse_document(&format!("<div>{}<p>after</p></div>", nested(300)));
        let package = html_to_package(&html).unwrap();
        let document = package.as_document();
        assert!(ensure_depth(&document).is_ok());

        let body = root_element(&package).children()[1].element().unwrap();
        let div = body.children()[0].element().unwrap();
        let names: Vec<String> = div
            .children()
            .into_iter()
            .filter_map(|child| child.element())
            .map(|el| el.name().local_part().to_string())
            .collect();
        assert_eq!(names, vec!["span", "p"]);
    }

    #[test]
    fn test_excessive_nesting_is_rejected() {
        let html = Html::parse_document(&nested(10_000));
        let result = html_to_package(&html);
        assert!(matches!(result, Err(ScrapeError::Parse(message)) if message.contains("nested deeper")));
    }
}
