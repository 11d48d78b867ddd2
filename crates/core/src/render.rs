//! Rendering of matches as markup, text, or attribute values.

use sxd_document::dom::{self, ChildOfElement, ChildOfRoot};

use crate::extract::OutputMode;
use crate::normalize::normalize;
use crate::xpath::Match;

/// Elements serialized without an end tag.
const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source", "track", "wbr",
];

/// Elements whose text is neither escaped when serialized nor included in
/// text output.
const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

/// Renders one match for the given output mode.
///
/// Plain string matches are used as they are (normalized in text mode). In
/// attribute mode, a node without the requested attribute renders to
/// `None` rather than an empty string.
pub fn render(item: &Match<'_>, mode: &OutputMode) -> Option<String> {
    match (item, mode) {
        (Match::Value(value), OutputMode::Text) => Some(normalize(value)),
        (Match::Value(value), _) => Some(value.clone()),
        (node, OutputMode::Text) => Some(normalize(&text_content(node))),
        (Match::Element(element), OutputMode::Attribute(name)) => {
            element.attribute_value(name.as_str()).map(str::to_string)
        }
        (_, OutputMode::Attribute(_)) => None,
        (node, OutputMode::Markup) => Some(to_markup(node)),
    }
}

/// Concatenates the descendant text of a match, skipping `<script>` and
/// `<style>` subtrees.
pub fn text_content(item: &Match<'_>) -> String {
    let mut out = String::new();

    match item {
        Match::Element(element) => collect_text(*element, &mut out),
        Match::Root(root) => {
            for child in root.children() {
                if let ChildOfRoot::Element(element) = child
                    && !is_raw_text(element)
                {
                    collect_text(element, &mut out);
                }
            }
        }
        Match::Comment(comment) => out.push_str(comment.text()),
        Match::Value(value) => out.push_str(value),
    }

    out
}

fn collect_text(element: dom::Element<'_>, out: &mut String) {
    let mut pending: Vec<ChildOfElement<'_>> = element.children().into_iter().rev().collect();
    while let Some(child) = pending.pop() {
        match child {
            ChildOfElement::Element(child) if !is_raw_text(child) => {
                pending.extend(child.children().into_iter().rev());
            }
            ChildOfElement::Text(text) => out.push_str(text.text()),
            _ => {}
        }
    }
}

/// Serializes a match as indented HTML.
///
/// Elements holding only elements and comments (plus whitespace) are laid
/// out one child per line with two-space indentation. Elements with mixed
/// content are written inline, as is everything below them.
pub fn to_markup(item: &Match<'_>) -> String {
    let mut out = String::new();

    match item {
        Match::Element(element) => write_element(&mut out, *element, 0, true),
        Match::Root(root) => {
            for (i, child) in root.children().into_iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                match child {
                    ChildOfRoot::Element(element) => write_element(&mut out, element, 0, true),
                    ChildOfRoot::Comment(comment) => write_comment(&mut out, comment),
                    ChildOfRoot::ProcessingInstruction(_) => {}
                }
            }
        }
        Match::Comment(comment) => write_comment(&mut out, *comment),
        Match::Value(value) => out.push_str(value),
    }

    out
}

fn write_element(out: &mut String, element: dom::Element<'_>, depth: usize, pretty: bool) {
    let name = element.name().local_part();

    out.push('<');
    out.push_str(name);
    for attribute in element.attributes() {
        out.push(' ');
        out.push_str(attribute.name().local_part());
        out.push_str("=\"");
        escape_into(out, attribute.value(), true);
        out.push('"');
    }

    let children = element.children();
    if children.is_empty() {
        if VOID_ELEMENTS.contains(&name) {
            out.push_str("/>");
        } else {
            out.push_str("></");
            out.push_str(name);
            out.push('>');
        }
        return;
    }
    out.push('>');

    let raw_text = RAW_TEXT_ELEMENTS.contains(&name);
    if pretty && is_block_content(&children) {
        for child in children.iter().filter(|child| !is_blank_text(child)) {
            out.push('\n');
            indent(out, depth + 1);
            write_child(out, child, depth + 1, true, raw_text);
        }
        out.push('\n');
        indent(out, depth);
    } else {
        for child in &children {
            write_child(out, child, depth, false, raw_text);
        }
    }

    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

fn write_child(out: &mut String, child: &ChildOfElement<'_>, depth: usize, pretty: bool, raw_text: bool) {
    match child {
        ChildOfElement::Element(element) => write_element(out, *element, depth, pretty),
        ChildOfElement::Text(text) if raw_text => out.push_str(text.text()),
        ChildOfElement::Text(text) => escape_into(out, text.text(), false),
        ChildOfElement::Comment(comment) => write_comment(out, *comment),
        ChildOfElement::ProcessingInstruction(_) => {}
    }
}

fn write_comment(out: &mut String, comment: dom::Comment<'_>) {
    out.push_str("<!--");
    out.push_str(comment.text());
    out.push_str("-->");
}

fn is_raw_text(element: dom::Element<'_>) -> bool {
    RAW_TEXT_ELEMENTS.contains(&element.name().local_part())
}

fn is_blank_text(child: &ChildOfElement<'_>) -> bool {
    matches!(child, ChildOfElement::Text(text) if text.text().trim().is_empty())
}

fn is_block_content(children: &[ChildOfElement<'_>]) -> bool {
    children.iter().all(|child| !matches!(child, ChildOfElement::Text(_)) || is_blank_text(child))
        && children.iter().any(|child| !is_blank_text(child))
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn escape_into(out: &mut String, text: &str, attribute: bool) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}
