//! Extract fragments of HTML documents with XPath or CSS selectors.
//!
//! The pipeline is: classify and compile expressions into [`Query`] values,
//! load bytes into a [`Document`] with charset recovery, run [`extract`], and
//! [`assemble`] the rendered results.
//!
//! ```rust
//! use scrape_core::{Document, ExtractConfig, LoadOptions, compile, extract};
//!
//! let doc = Document::load(b"<html><body><a href=\"x\">t</a></body></html>", &LoadOptions::default()).unwrap();
//! let queries = compile(&["//a/@href"]).unwrap();
//! let extraction = extract(&doc, &queries, &ExtractConfig::default()).unwrap();
//! assert_eq!(extraction.results(), ["x"]);
//! ```

pub mod dom_tree;
pub mod encoding;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod normalize;
pub mod output;
pub mod parse;
pub mod render;
pub mod selector;
pub mod xpath;

pub use error::{Result, ScrapeError};
pub use extract::{DEFAULT_TEXT_XPATH, ExtractConfig, Extraction, OutputMode, extract};
pub use fetch::FetchConfig;
#[cfg(feature = "fetch")]
pub use fetch::fetch_url;
pub use fetch::{fetch_file, fetch_stdin, is_url, read_input};
pub use normalize::normalize;
pub use output::assemble;
pub use parse::{Document, LoadOptions};
pub use selector::{Query, SelectorKind, classify, compile, css_to_xpath};
#[doc(hidden)]
pub use xpath::{Match, XPathEvaluator};
