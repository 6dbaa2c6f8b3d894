//! Synchronous client for the **GitHub repository search API**.
//!
//! One call equals one `GET /search/repositories` request. Nothing is retried and
//! the HTTP status is not inspected: the body is decoded as-is and the status plus
//! the `x-ratelimit-*` headers travel with it, so callers can tell a rate-limited
//! response from a usable one.
//!
//! Typical usage:
//! ```no_run
//! # use ghls::{Client, SortKey};
//! let client = Client::new()?;
//! let result = client.fetch_top_repositories("Rust", SortKey::Stars, 5)?;
//! for repo in result.items().unwrap_or_default() {
//!     println!("{} ({} stars)", repo.name, repo.stargazers_count);
//! }
//! # Ok::<(), ghls::FetchError>(())
//! ```
use crate::error::{FetchError, Result};
use crate::models::{LanguageQuery, RateLimit, RawSearchResult, SearchBody, SortKey};
use chrono::{DateTime, Utc};
use log::debug;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::blocking::Client as HttpClient;
use reqwest::blocking::Response;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::redirect::Policy;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Anything that can answer a repository search. The aggregator only talks to
/// this trait.
pub trait RepositorySource {
    fn search(&self, query: &LanguageQuery) -> Result<RawSearchResult>;
}

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: HttpClient,
}

// Allow -, _, . unescaped in language names; `+` and `#` must be encoded.
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

fn enc(part: &str) -> String {
    percent_encoding::utf8_percent_encode(part.trim(), SAFE).to_string()
}

/// Build the query string for a search request, without the leading `?`.
pub fn search_query_string(query: &LanguageQuery) -> String {
    format!(
        "q=language:{}&sort={}&order={}&per_page={}",
        enc(&query.language),
        query.sort.as_str(),
        query.order(),
        query.per_page
    )
}

fn header_num<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

fn rate_limit_from(headers: &HeaderMap) -> RateLimit {
    RateLimit {
        limit: header_num(headers, "x-ratelimit-limit"),
        remaining: header_num(headers, "x-ratelimit-remaining"),
        reset_at: header_num::<i64>(headers, "x-ratelimit-reset")
            .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
    }
}

impl Client {
    /// Client for the public GitHub API.
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Client for any API root serving `/search/repositories` (tests, GitHub Enterprise).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        let http = HttpClient::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10))
            .redirect(Policy::limited(5))
            .user_agent(concat!("ghls/", env!("CARGO_PKG_VERSION"))) // GitHub rejects requests without one
            .build()
            .map_err(|e| FetchError::Http(e.to_string()))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn search_url(&self, query: &LanguageQuery) -> String {
        format!(
            "{}/search/repositories?{}",
            self.base_url,
            search_query_string(query)
        )
    }

    /// Fetch the top repositories for `language`, ordered descending by `sort_by`.
    ///
    /// ### Errors
    /// - Network/transport error
    /// - Body that is not valid JSON of the expected shape
    ///
    /// A non-success status is **not** an error; see
    /// [`RawSearchResult::missing_items`].
    pub fn fetch_top_repositories(
        &self,
        language: &str,
        sort_by: SortKey,
        per_page: u32,
    ) -> Result<RawSearchResult> {
        self.search(&LanguageQuery::new(language, sort_by, per_page))
    }

    fn decode(url: &str, response: Response) -> Result<RawSearchResult> {
        let status = response.status().as_u16();
        let rate_limit = rate_limit_from(response.headers());
        debug!(
            "HTTP {} (rate limit remaining: {:?}/{:?})",
            status, rate_limit.remaining, rate_limit.limit
        );
        let bytes = response.bytes()?;
        let body: SearchBody =
            serde_json::from_slice(&bytes).map_err(|source| FetchError::Decode {
                url: url.to_string(),
                source,
            })?;
        Ok(RawSearchResult {
            status,
            rate_limit,
            body,
        })
    }
}

impl RepositorySource for Client {
    fn search(&self, query: &LanguageQuery) -> Result<RawSearchResult> {
        let url = self.search_url(query);
        debug!("GET {}", url);
        let response = self.http.get(&url).send()?;
        Self::decode(&url, response)
    }
}
