//! Content fetching from URLs, files, and stdin.
//!
//! Every source yields the raw bytes of the document. Decoding is left to
//! the loader in [`crate::parse`], which owns the charset policy.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use crate::{Result, ScrapeError};

#[cfg(feature = "fetch")]
use std::time::Duration;

#[cfg(feature = "fetch")]
use reqwest::Client;
#[cfg(feature = "fetch")]
use url::Url;

/// HTTP client configuration for fetching web pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds. `None` keeps the transport default.
    pub timeout: Option<u64>,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: "Mozilla/5.0 (compatible; scrape/1.0; +https://github.com/stormlightlabs/scrape)".to_string(),
        }
    }
}

/// Returns true when `input` names a remote document.
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

fn ensure_not_empty(bytes: Vec<u8>) -> Result<Vec<u8>> {
    if bytes.is_empty() { Err(ScrapeError::EmptyInput) } else { Ok(bytes) }
}

/// Fetches a document from a URL.
///
/// Performs a GET request, follows redirects and turns non-success
/// statuses into errors. The body is returned undecoded.
#[cfg(feature = "fetch")]
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<Vec<u8>> {
    let parsed_url = Url::parse(url).map_err(|e| ScrapeError::InvalidUrl(e.to_string()))?;

    if !matches!(parsed_url.scheme(), "http" | "https") {
        return Err(ScrapeError::InvalidUrl(format!(
            "unsupported scheme '{}' (expected http:// or https://)",
            parsed_url.scheme()
        )));
    }

    let mut builder = Client::builder();
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(Duration::from_secs(timeout));
    }
    let client = builder.build().map_err(ScrapeError::HttpError)?;

    tracing::debug!(url = %parsed_url, "fetching document");

    let response = client
        .get(parsed_url)
        .header("User-Agent", &config.user_agent)
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .send()
        .await
        .map_err(|e| match config.timeout {
            Some(timeout) if e.is_timeout() => ScrapeError::Timeout { timeout },
            _ => ScrapeError::HttpError(e),
        })?
        .error_for_status()?;

    let content = response.bytes().await?;

    ensure_not_empty(content.to_vec())
}

/// Reads a document from a local file.
pub fn fetch_file(path: &str) -> Result<Vec<u8>> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(ScrapeError::FileNotFound(path_buf))
    } else {
        ensure_not_empty(fs::read(&path_buf)?)
    }
}

/// Reads a document from any reader until EOF.
pub fn read_input<R: Read>(mut reader: R) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    ensure_not_empty(buffer)
}

/// Reads a document from standard input.
pub fn fetch_stdin() -> Result<Vec<u8>> {
    read_input(std::io::stdin().lock())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout, None);
        assert!(config.user_agent.contains("scrape"));
    }

    #[test]
    fn test_is_url() {
        assert!(is_url("http://example.com"));
        assert!(is_url("https://example.com/page.html"));
        assert!(!is_url("page.html"));
        assert!(!is_url("ftp://example.com"));
    }

    #[cfg(feature = "fetch")]
    #[test]
    fn test_fetch_url_invalid() {
        let config = FetchConfig::default();
        let result = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(fetch_url("not-a-url", &config));

        assert!(matches!(result, Err(ScrapeError::InvalidUrl(_))));
    }

    #[test]
    fn test_fetch_file_not_found() {
        let result = fetch_file("/nonexistent/path/file.html");
        assert!(matches!(result, Err(ScrapeError::FileNotFound(_))));
    }

    #[test]
    fn test_fetch_file_reads_bytes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"<p>Caf\xe9</p>").unwrap();

        let bytes = fetch_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(bytes, b"<p>Caf\xe9</p>");
    }

    #[test]
    fn test_fetch_file_empty() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let result = fetch_file(file.path().to_str().unwrap());
        assert!(matches!(result, Err(ScrapeError::EmptyInput)));
    }

    #[test]
    fn test_read_input_empty() {
        let result = read_input(&b""[..]);
        assert!(matches!(result, Err(ScrapeError::EmptyInput)));
    }

    #[test]
    fn test_read_input() {
        let bytes = read_input(&b"<html></html>"[..]).unwrap();
        assert_eq!(bytes, b"<html></html>");
    }
}
