use regex::RegexSet;
use std::sync::LazyLock;

/// The dialect an expression is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorKind {
    XPath,
    Css,
}

/// Any hit marks the expression as XPath.
static XPATH_PATTERNS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"^/",
        r"::",
        r"\([^)]*\)",
        r"\[[^\]]*\]",
        r"last\(\)",
        r"position\(\)",
        r"contains\(",
        r"text\(\)",
        r"@",
    ])
    .unwrap()
});

/// Decides whether `expression` is XPath or a CSS selector.
///
/// This is a heuristic over the raw text, not a grammar check. Strings that
/// are valid in both dialects (`a[href]`, `li:nth-child(2)`) are read as
/// XPath.
///
/// # Example
///
/// ```rust
/// use scrape_core::selector::{SelectorKind, classify};
///
/// assert_eq!(classify("//a/@href"), SelectorKind::XPath);
/// assert_eq!(classify("table.wikitable > tbody > tr"), SelectorKind::Css);
/// ```
pub fn classify(expression: &str) -> SelectorKind {
    if XPATH_PATTERNS.is_match(expression) { SelectorKind::XPath } else { SelectorKind::Css }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("//a/@href")]
    #[case("/html/body")]
    #[case("descendant::p")]
    #[case("count(p)")]
    #[case("p[1]")]
    #[case("a[href]")]
    #[case("li:nth-child(2)")]
    #[case("p:last()")]
    #[case("contains(")]
    #[case("@id")]
    #[case("a::before")]
    fn test_classify_xpath(#[case] expression: &str) {
        assert_eq!(classify(expression), SelectorKind::XPath);
    }

    #[rstest]
    #[case("table.wikitable > tbody > tr > td > b > a")]
    #[case("div#main p")]
    #[case("a")]
    #[case("ul li + li ~ li")]
    #[case("p:first-child")]
    #[case("h1, h2")]
    #[case("")]
    #[case("(")]
    fn test_classify_css(#[case] expression: &str) {
        assert_eq!(classify(expression), SelectorKind::Css);
    }

    #[test]
    fn test_classify_is_deterministic() {
        for expression in ["div > p", "//div", "a[href]", "p.note"] {
            assert_eq!(classify(expression), classify(expression));
        }
    }
}
