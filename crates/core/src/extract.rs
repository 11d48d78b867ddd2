use tracing::debug;

use crate::normalize::normalize;
use crate::parse::Document;
use crate::render::render;
use crate::selector::Query;
use crate::Result;

/// Query used in text mode when no expression is given: every visible text
/// node in the body.
pub const DEFAULT_TEXT_XPATH: &str = "//body//text()[not(ancestor::script) and not(ancestor::style)]";

/// How each match is turned into output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Pretty-printed markup of each matched node
    #[default]
    Markup,
    /// Visible text of all matches, merged and normalized
    Text,
    /// Value of the named attribute; nodes without it are skipped
    Attribute(String),
}

/// Configuration for extraction
#[derive(Debug, Clone, Default)]
pub struct ExtractConfig {
    pub mode: OutputMode,
    /// Only report whether the first expression matches anything
    pub check_existence: bool,
}

/// The result of running the queries over a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// Rendered results in query order, then document order
    Results(Vec<String>),
    /// Whether the first query produced any match
    Exists(bool),
}

impl Extraction {
    /// Result strings, empty for an existence check.
    pub fn results(&self) -> &[String] {
        match self {
            Self::Results(results) => results,
            Self::Exists(_) => &[],
        }
    }
}

/// Runs every query against the document and renders the matches.
///
/// This is the main entry point for extraction. It:
/// 1. Falls back to [`DEFAULT_TEXT_XPATH`] in text mode without queries
/// 2. Short-circuits on the first query for existence checks
/// 3. Renders and trims each match; only a missing attribute yields nothing
/// 4. In text mode, merges everything into one normalized block
pub fn extract(doc: &Document, queries: &[Query], config: &ExtractConfig) -> Result<Extraction> {
    let default_query;
    let queries = if queries.is_empty() && config.mode == OutputMode::Text {
        default_query = [Query::from_xpath(DEFAULT_TEXT_XPATH)];
        &default_query[..]
    } else {
        queries
    };

    if config.check_existence {
        let exists = match queries.first() {
            Some(query) => !doc.evaluate(query.xpath())?.is_empty(),
            None => false,
        };
        return Ok(Extraction::Exists(exists));
    }

    let mut results = Vec::new();
    for query in queries {
        let matches = doc.evaluate(query.xpath())?;
        debug!(xpath = query.xpath(), matches = matches.len(), "evaluated query");

        results.extend(
            matches
                .iter()
                .filter_map(|item| render(item, &config.mode))
                .map(|rendered| rendered.trim().to_string()),
        );
    }

    if config.mode == OutputMode::Text {
        let merged = normalize(&results.join("\n"));
        results = if merged.is_empty() { Vec::new() } else { vec![merged] };
    }

    Ok(Extraction::Results(results))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::compile;

    const PAGE: &str = r#"
        <html>
        <head><title>Page</title><style>p { color: red; }</style></head>
        <body>
            <h1>Hello</h1>
            <p class="intro">world   and <a href="/one">one</a></p>
            <a>two</a>
            <script>var ignored = true;</script>
        </body>
        </html>
    "#;

    fn run(expressions: &[&str], config: &ExtractConfig) -> Extraction {
        let doc = Document::parse_html(PAGE).unwrap();
        let queries = compile(expressions).unwrap();
        extract(&doc, &queries, config).unwrap()
    }

    #[test]
    fn test_extract_markup() {
        let extraction = run(&["//h1"], &ExtractConfig::default());
        assert_eq!(extraction, Extraction::Results(vec!["<h1>Hello</h1>".to_string()]));
    }

    #[test]
    fn test_extract_attribute_values() {
        let extraction = run(&["//a/@href"], &ExtractConfig::default());
        assert_eq!(extraction.results(), ["/one"]);
    }

    #[test]
    fn test_extract_attribute_mode_skips_missing() {
        let config = ExtractConfig { mode: OutputMode::Attribute("href".to_string()), ..Default::default() };
        assert_eq!(run(&["a"], &config).results(), ["/one"]);
    }

    #[test]
    fn test_extract_keeps_query_order() {
        let extraction = run(&["//a/text()", "h1"], &ExtractConfig::default());
        assert_eq!(extraction.results(), ["one", "two", "<h1>Hello</h1>"]);
    }

    #[test]
    fn test_extract_text_merges_results() {
        let config = ExtractConfig { mode: OutputMode::Text, ..Default::default() };
        let extraction = run(&["h1", "p.intro"], &config);
        assert_eq!(extraction.results(), ["Hello\nworld and one"]);
    }

    #[test]
    fn test_extract_default_text_query() {
        let config = ExtractConfig { mode: OutputMode::Text, ..Default::default() };
        let extraction = run(&[], &config);
        assert_eq!(extraction.results(), ["Hello\n\nworld and\none\n\ntwo"]);
    }

    #[test]
    fn test_extract_text_without_matches_is_empty() {
        let config = ExtractConfig { mode: OutputMode::Text, ..Default::default() };
        assert!(run(&["//table"], &config).results().is_empty());
    }

    #[test]
    fn test_check_existence_uses_first_query_only() {
        let config = ExtractConfig { check_existence: true, ..Default::default() };
        assert_eq!(run(&["//h1", "//table"], &config), Extraction::Exists(true));
        assert_eq!(run(&["//table", "//h1"], &config), Extraction::Exists(false));
    }

    #[test]
    fn test_check_existence_ignores_attribute_mode() {
        let config = ExtractConfig {
            mode: OutputMode::Attribute("missing".to_string()),
            check_existence: true,
        };
        assert_eq!(run(&["//h1"], &config), Extraction::Exists(true));
    }

    #[test]
    fn test_check_existence_of_scalar() {
        let config = ExtractConfig { check_existence: true, ..Default::default() };
        assert_eq!(run(&["count(//table)"], &config), Extraction::Exists(true));
        assert_eq!(run(&["boolean(//table)"], &config), Extraction::Exists(false));
    }
}
