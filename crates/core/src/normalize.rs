//! Whitespace normalization for extracted text.
//!
//! Text pulled out of HTML carries the source document's indentation and
//! line structure. [`normalize`] collapses it into something readable while
//! keeping paragraph breaks as a single blank line.

use regex::Regex;
use std::sync::LazyLock;

static SPACE_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" +").unwrap());

static NEWLINE_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

static BLANK_LINES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n\s*\n+").unwrap());

/// Collapses whitespace in extracted text.
///
/// Rules, in order:
///
/// 1. runs of spaces become one space (tabs and newlines are untouched)
/// 2. three or more newlines become two
/// 3. newlines separated only by whitespace-only lines become two newlines
/// 4. every line is trimmed
/// 5. the whole text is trimmed
///
/// The function is idempotent.
///
/// # Example
///
/// ```rust
/// use scrape_core::normalize;
///
/// assert_eq!(normalize("  Hello   world \n\n\n\n  again "), "Hello world\n\nagain");
/// ```
pub fn normalize(text: &str) -> String {
    let text = SPACE_RUN_RE.replace_all(text, " ");
    let text = NEWLINE_RUN_RE.replace_all(&text, "\n\n");
    let text = BLANK_LINES_RE.replace_all(&text, "\n\n");

    let lines: Vec<&str> = text.split('\n').map(str::trim).collect();

    lines.join("\n").trim().to_string()
}
