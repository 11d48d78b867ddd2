//! Expression classification and compilation.
//!
//! Every user expression is turned into a [`Query`] before any input is
//! read: XPath passes through unchanged, CSS selectors are translated.

pub mod classify;
pub mod css;

use tracing::debug;

use crate::Result;
use crate::xpath::XPathEvaluator;

pub use classify::{SelectorKind, classify};
pub use css::css_to_xpath;

/// A compiled extraction query, always expressed as XPath.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    kind: SelectorKind,
    xpath: String,
}

impl Query {
    /// Classifies `expression` and translates it when it is CSS.
    ///
    /// The resulting XPath is checked for syntax, so a query that parses here
    /// can only fail at evaluation time for runtime reasons.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ScrapeError::CssConversion`] for untranslatable CSS
    /// and [`crate::ScrapeError::XPath`] for malformed XPath.
    pub fn parse(expression: &str) -> Result<Self> {
        let kind = classify(expression);
        let xpath = match kind {
            SelectorKind::XPath => expression.to_string(),
            SelectorKind::Css => {
                let xpath = css_to_xpath(expression)?;
                debug!(css = expression, xpath = %xpath, "translated CSS selector");
                xpath
            }
        };

        XPathEvaluator::new().compile(&xpath)?;

        Ok(Self { kind, xpath })
    }

    /// Wraps an expression known to be XPath, skipping classification.
    pub fn from_xpath(xpath: impl Into<String>) -> Self {
        Self { kind: SelectorKind::XPath, xpath: xpath.into() }
    }

    pub fn kind(&self) -> SelectorKind {
        self.kind
    }

    pub fn xpath(&self) -> &str {
        &self.xpath
    }
}

/// Compiles expressions in order, stopping at the first failure.
pub fn compile<S: AsRef<str>>(expressions: &[S]) -> Result<Vec<Query>> {
    expressions.iter().map(|expression| Query::parse(expression.as_ref())).collect()
}
