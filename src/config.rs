//! Run settings. There is no config file and no environment lookup; the
//! binaries start from [`Settings::default`] and override fields from flags or
//! widgets.

use crate::api::DEFAULT_BASE_URL;
use crate::cache::DEFAULT_TTL_SECS;
use crate::models::DEFAULT_LANGUAGES;
use crate::stats::{AGGREGATE_PAGE_SIZE, DEFAULT_DELAY};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Number of repositories shown by the per-language browser.
pub const DEFAULT_TOP_COUNT: u32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub base_url: String,
    pub languages: Vec<String>,
    /// Page size of each aggregate request.
    pub per_page: u32,
    /// Page size of the top-N lookup.
    pub top_count: u32,
    /// Pause between two aggregate requests.
    pub delay: Duration,
    /// Freshness window of the cached aggregate, in seconds.
    pub ttl_secs: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            languages: DEFAULT_LANGUAGES.iter().map(|s| s.to_string()).collect(),
            per_page: AGGREGATE_PAGE_SIZE,
            top_count: DEFAULT_TOP_COUNT,
            delay: DEFAULT_DELAY,
            ttl_secs: DEFAULT_TTL_SECS,
        }
    }
}

/// Split a user-supplied list on `,` or `;`, trimming blanks.
pub fn parse_list(s: &str) -> Vec<String> {
    s.split([',', ';'])
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}
