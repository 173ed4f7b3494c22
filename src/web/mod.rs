//! Web search fallback for author lookup.
//!
//! When the model is unsure who said something, the quote is searched on the
//! DuckDuckGo HTML endpoint and the first few result snippets are scanned for
//! a `"... by Someone"` attribution. This is a heuristic scrape, not an API.

use crate::models::ANONYMOUS;
use crate::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;

/// Confidence assigned to an attribution found in search results.
pub const WEB_AUTHOR_CONFIDENCE: f32 = 0.65;

/// Confidence when results look quote-related but name nobody.
pub const WEB_CONTEXT_CONFIDENCE: f32 = 0.3;

/// Characters of the quote used in the search query.
const QUERY_PREFIX_CHARS: usize = 50;

/// Result blocks inspected.
const MAX_RESULTS: usize = 3;

/// Longest attribution accepted.
const MAX_AUTHOR_LEN: usize = 100;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

static RESULT_START: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r#"<div[^>]*class="[^"]*\bresult\b[^"]*"[^>]*>"#).ok());

static RESULT_URL: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r#"(?s)class="result__url"[^>]*>(.*?)</a>"#).ok());

static TAG: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"<[^>]*>").ok());

/// Outcome of a web author search.
#[derive(Debug, Clone, PartialEq)]
pub struct WebAuthorResult {
    /// Attributed author, or `Anonymous`.
    pub author: String,
    /// Confidence (0.0 to 1.0).
    pub confidence: f32,
    /// Result URL the attribution came from.
    pub source: String,
    /// Whether an attribution was found.
    pub found: bool,
}

impl WebAuthorResult {
    /// A miss with the given confidence.
    #[must_use]
    pub fn not_found(confidence: f32) -> Self {
        Self {
            author: ANONYMOUS.to_string(),
            confidence,
            source: String::new(),
            found: false,
        }
    }
}

/// Trait for author search backends.
pub trait AuthorSearch: Send + Sync {
    /// Searches the web for who said `quote_text`.
    ///
    /// # Errors
    ///
    /// Returns an error on network or HTTP failures.
    fn search_author(&self, quote_text: &str) -> Result<WebAuthorResult>;
}

/// DuckDuckGo HTML search.
pub struct DuckDuckGoSearch {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl DuckDuckGoSearch {
    /// Default search endpoint.
    pub const DEFAULT_ENDPOINT: &'static str = "https://html.duckduckgo.com/html/";

    /// Request timeout.
    pub const TIMEOUT: Duration = Duration::from_secs(5);

    /// Creates a searcher with the default endpoint.
    #[must_use]
    pub fn new() -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Self::TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|err| {
                tracing::warn!("Failed to build web search client: {err}");
                reqwest::blocking::Client::new()
            });
        Self {
            client,
            endpoint: Self::DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Sets the search endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl Default for DuckDuckGoSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthorSearch for DuckDuckGoSearch {
    fn search_author(&self, quote_text: &str) -> Result<WebAuthorResult> {
        let query = build_query(quote_text);
        tracing::info!(query = %query, "Searching web for author");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query.as_str())])
            .send()
            .map_err(|e| {
                let error_kind = if e.is_timeout() {
                    "timeout"
                } else if e.is_connect() {
                    "connect"
                } else {
                    "request"
                };
                Error::OperationFailed {
                    operation: "web_search".to_string(),
                    cause: format!("{error_kind} error: {e}"),
                }
            })?;

        if !response.status().is_success() {
            return Err(Error::OperationFailed {
                operation: "web_search".to_string(),
                cause: format!("search returned status: {}", response.status()),
            });
        }

        let html = response.text().map_err(|e| Error::OperationFailed {
            operation: "web_search_body".to_string(),
            cause: e.to_string(),
        })?;

        Ok(parse_results(&html))
    }
}

/// Builds the search query from the first characters of the quote.
#[must_use]
pub fn build_query(quote_text: &str) -> String {
    let prefix: String = quote_text.chars().take(QUERY_PREFIX_CHARS).collect();
    format!("{} author", prefix.trim())
}

/// Scans search-result HTML for an attribution.
#[must_use]
pub fn parse_results(html: &str) -> WebAuthorResult {
    let blocks = result_blocks(html);
    if blocks.is_empty() {
        return WebAuthorResult::not_found(0.0);
    }

    let mut context = String::new();
    for block in blocks.iter().take(MAX_RESULTS) {
        let text = strip_tags(block);
        if let Some(author) = attribution(&text) {
            return WebAuthorResult {
                author,
                confidence: WEB_AUTHOR_CONFIDENCE,
                source: result_url(block).unwrap_or_default(),
                found: true,
            };
        }
        context.push_str(&text.to_lowercase());
        context.push(' ');
    }

    if context.contains("quote") || context.contains("said") {
        WebAuthorResult::not_found(WEB_CONTEXT_CONFIDENCE)
    } else {
        WebAuthorResult::not_found(0.0)
    }
}

/// Splits HTML into result blocks, each running to the next result start.
fn result_blocks(html: &str) -> Vec<&str> {
    let Some(re) = RESULT_START.as_ref() else {
        return Vec::new();
    };
    let starts: Vec<usize> = re.find_iter(html).map(|m| m.start()).collect();
    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(html.len());
            &html[start..end]
        })
        .collect()
}

/// Extracts the displayed result URL.
fn result_url(block: &str) -> Option<String> {
    let re = RESULT_URL.as_ref()?;
    let caps = re.captures(block)?;
    let url = strip_tags(caps.get(1)?.as_str());
    let url = url.trim();
    (!url.is_empty()).then(|| url.to_string())
}

/// Removes tags and decodes the common entities.
fn strip_tags(html: &str) -> String {
    let text = TAG
        .as_ref()
        .map_or_else(|| html.to_string(), |re| re.replace_all(html, "").into_owned());
    text.replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ")
}

/// Finds the text after `" by "` up to the end of its line.
fn attribution(text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    let (_, after) = lower.split_once(" by ")?;
    let line = after.lines().next().unwrap_or_default();
    let candidate = line
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let candidate = candidate.trim_end_matches(['.', ',', ';', ':']).trim();
    if candidate.is_empty() || candidate.chars().count() >= MAX_AUTHOR_LEN {
        return None;
    }
    Some(title_case(candidate))
}

/// Capitalizes the first letter after every non-letter.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut capitalize = true;
    for c in s.chars() {
        if capitalize && c.is_alphabetic() {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        capitalize = !c.is_alphabetic();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(results: &[&str]) -> String {
        results
            .iter()
            .map(|body| {
                format!(
                    "<div class=\"result results_links web-result \">\n\
                     <a class=\"result__a\" href=\"#\">Title</a>\n\
                     <a class=\"result__url\" href=\"#\">\n  example.com/page\n</a>\n\
                     <a class=\"result__snippet\">{body}</a>\n</div>\n"
                )
            })
            .collect()
    }

    #[test]
    fn test_build_query_truncates() {
        let text = "a".repeat(80);
        let query = build_query(&text);
        assert_eq!(query, format!("{} author", "a".repeat(50)));
    }

    #[test]
    fn test_build_query_multibyte() {
        let text = "é".repeat(60);
        assert_eq!(build_query(&text).chars().count(), 50 + " author".len());
    }

    #[test]
    fn test_parse_finds_attribution() {
        let html = page(&["Stay hungry, stay foolish. A quote by <b>steve jobs</b>\nmore text"]);
        let result = parse_results(&html);
        assert!(result.found);
        assert_eq!(result.author, "Steve Jobs");
        assert!((result.confidence - WEB_AUTHOR_CONFIDENCE).abs() < f32::EPSILON);
        assert_eq!(result.source, "example.com/page");
    }

    #[test]
    fn test_parse_checks_only_first_three() {
        let html = page(&[
            "nothing here",
            "still nothing",
            "nope",
            "written by Someone Late",
        ]);
        let result = parse_results(&html);
        assert!(!result.found);
        assert!(result.confidence.abs() < f32::EPSILON);
    }

    #[test]
    fn test_parse_quote_context_without_author() {
        let html = page(&["Famous quote about patience"]);
        let result = parse_results(&html);
        assert!(!result.found);
        assert_eq!(result.author, ANONYMOUS);
        assert!((result.confidence - WEB_CONTEXT_CONFIDENCE).abs() < f32::EPSILON);
    }

    #[test]
    fn test_parse_no_results() {
        let result = parse_results("<html><body>No results.</body></html>");
        assert_eq!(result, WebAuthorResult::not_found(0.0));
    }

    #[test]
    fn test_overlong_attribution_rejected() {
        let long = "x".repeat(150);
        let html = page(&[&format!("a speech by {long}")]);
        assert!(!parse_results(&html).found);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("maya angelou"), "Maya Angelou");
        assert_eq!(title_case("o'neil"), "O'Neil");
    }

    #[test]
    fn test_entities_decoded() {
        assert_eq!(strip_tags("<b>Tom &amp; Jerry&#x27;s</b>"), "Tom & Jerry's");
    }
}
