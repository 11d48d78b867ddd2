//! Error types for scrape operations.
//!
//! This module defines the main error type [`ScrapeError`] which represents
//! every way an invocation can fail: reading input, translating a CSS
//! selector, parsing the document, or evaluating an XPath expression.
//!
//! # Example
//!
//! ```rust
//! use scrape_core::{ScrapeError, Result};
//!
//! fn read(bytes: &[u8]) -> Result<&[u8]> {
//!     if bytes.is_empty() {
//!         return Err(ScrapeError::EmptyInput);
//!     }
//!     Ok(bytes)
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

use sxd_xpath::ExecutionError;

/// Main error type for extraction operations.
///
/// Every variant is terminal for an invocation: the pipeline never produces
/// partial output once one of these has been raised.
///
/// # Example
///
/// ```rust
/// use scrape_core::{ScrapeError, css_to_xpath};
///
/// match css_to_xpath("a::before") {
///     Ok(xpath) => println!("{}", xpath),
///     Err(ScrapeError::CssConversion { selector, reason }) => {
///         println!("cannot convert {}: {}", selector, reason);
///     }
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues
    /// and non-success status codes.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// File not found.
    #[error("The file '{}' was not found", .0.display())]
    FileNotFound(PathBuf),

    /// The input source produced no bytes.
    #[error("Input is empty or invalid")]
    EmptyInput,

    /// Read errors on files or standard input.
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    /// A CSS selector could not be translated to XPath.
    ///
    /// Raised for grammar errors and for CSS constructs that have no XPath
    /// counterpart (pseudo-elements, namespace prefixes, unknown
    /// pseudo-classes).
    #[error("Error converting CSS selector '{selector}' to XPath: {reason}")]
    CssConversion { selector: String, reason: String },

    /// The document could not be parsed, even after the charset fallback.
    #[error("Failed to parse document: {0}")]
    Parse(String),

    /// XPath compilation or evaluation errors.
    #[error("XPath error: {0}")]
    XPath(String),
}

impl From<ExecutionError> for ScrapeError {
    fn from(err: ExecutionError) -> Self {
        ScrapeError::XPath(err.to_string())
    }
}

/// Result type alias for ScrapeError.
pub type Result<T> = std::result::Result<T, ScrapeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ScrapeError::InvalidUrl("not a url".to_string());
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_conversion_error_names_selector() {
        let err = ScrapeError::CssConversion {
            selector: "a::before".to_string(),
            reason: "pseudo-elements are not supported".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("a::before"));
        assert!(message.contains("pseudo-elements"));
    }

    #[test]
    fn test_file_not_found_message() {
        let err = ScrapeError::FileNotFound(PathBuf::from("missing.html"));
        assert_eq!(err.to_string(), "The file 'missing.html' was not found");
    }

    #[test]
    fn test_timeout_error() {
        let err = ScrapeError::Timeout { timeout: 30 };
        assert!(err.to_string().contains("30"));
    }
}
