use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Languages tracked by the dashboard, in display order.
pub const DEFAULT_LANGUAGES: [&str; 10] = [
    "JavaScript",
    "Python",
    "Java",
    "TypeScript",
    "C++",
    "C#",
    "PHP",
    "Go",
    "Ruby",
    "Swift",
];

/// Sort keys accepted by the repository search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Stars,
    Forks,
    HelpWantedIssues,
    Updated,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Stars => "stars",
            SortKey::Forks => "forks",
            SortKey::HelpWantedIssues => "help-wanted-issues",
            SortKey::Updated => "updated",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stars" => Ok(SortKey::Stars),
            "forks" => Ok(SortKey::Forks),
            "help-wanted-issues" => Ok(SortKey::HelpWantedIssues),
            "updated" => Ok(SortKey::Updated),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

/// One search request: language, sort key and page size. Results are always
/// ordered descending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageQuery {
    pub language: String,
    pub sort: SortKey,
    pub per_page: u32,
}

impl LanguageQuery {
    pub fn new(language: impl Into<String>, sort: SortKey, per_page: u32) -> Self {
        Self {
            language: language.into(),
            sort,
            per_page,
        }
    }

    /// The sort order is not configurable.
    pub fn order(&self) -> &'static str {
        "desc"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub login: String,
}

/// One item of the `items` array returned by the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub name: String,
    #[serde(default)]
    pub full_name: Option<String>,
    pub owner: Owner,
    pub html_url: String,
    pub stargazers_count: u64,
    pub forks_count: u64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

impl RepositorySummary {
    pub fn owner_login(&self) -> &str {
        &self.owner.login
    }
}

/// Body of a search response. Error and rate-limit payloads carry `message`
/// instead of `items`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchBody {
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub incomplete_results: Option<bool>,
    #[serde(default)]
    pub items: Option<Vec<RepositorySummary>>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub documentation_url: Option<String>,
}

/// Values of the `x-ratelimit-*` response headers, when present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimit {
    pub limit: Option<u32>,
    pub remaining: Option<u32>,
    pub reset_at: Option<DateTime<Utc>>,
}

/// A parsed search response together with its HTTP status and rate-limit headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSearchResult {
    pub status: u16,
    pub rate_limit: RateLimit,
    pub body: SearchBody,
}

impl RawSearchResult {
    pub fn items(&self) -> Option<&[RepositorySummary]> {
        self.body.items.as_deref()
    }

    /// Classify a response that carries no `items`.
    ///
    /// Returns `None` when `items` is present.
    pub fn missing_items(&self) -> Option<Unavailable> {
        if self.body.items.is_some() {
            return None;
        }
        let mentions_limit = self
            .body
            .message
            .as_deref()
            .map(|m| m.to_ascii_lowercase().contains("rate limit"))
            .unwrap_or(false);
        if self.status == 403 || self.status == 429 || mentions_limit {
            Some(Unavailable::RateLimited {
                message: self.body.message.clone(),
                reset_at: self.rate_limit.reset_at,
            })
        } else {
            Some(Unavailable::Failed {
                status: self.status,
                message: self
                    .body
                    .message
                    .clone()
                    .unwrap_or_else(|| "response has no items".to_string()),
            })
        }
    }
}

/// Why a language produced no data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Unavailable {
    RateLimited {
        message: Option<String>,
        reset_at: Option<DateTime<Utc>>,
    },
    Failed {
        status: u16,
        message: String,
    },
}

impl fmt::Display for Unavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unavailable::RateLimited {
                reset_at: Some(at), ..
            } => write!(f, "rate limited (resets at {} UTC)", at.format("%H:%M:%S")),
            Unavailable::RateLimited { .. } => f.write_str("rate limited"),
            Unavailable::Failed { status, message } => {
                write!(f, "failed with HTTP {status}: {message}")
            }
        }
    }
}

/// Aggregated statistics for one language's top repositories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageStats {
    pub language: String,
    pub repository_count: usize,
    pub total_stars: u64,
    pub total_forks: u64,
    pub average_stars: f64,
}

impl LanguageStats {
    pub fn from_items(language: impl Into<String>, items: &[RepositorySummary]) -> Self {
        let total_stars: u64 = items.iter().map(|r| r.stargazers_count).sum();
        let total_forks: u64 = items.iter().map(|r| r.forks_count).sum();
        let repository_count = items.len();
        let average_stars = if repository_count > 0 {
            total_stars as f64 / repository_count as f64
        } else {
            0.0
        };
        Self {
            language: language.into(),
            repository_count,
            total_stars,
            total_forks,
            average_stars,
        }
    }
}

/// Per-language result of one aggregation cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LanguageOutcome {
    Ok(LanguageStats),
    Unavailable(Unavailable),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageReport {
    pub language: String,
    pub outcome: LanguageOutcome,
}

/// Result of one aggregation cycle, in input language order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsTable {
    pub reports: Vec<LanguageReport>,
}

/// Sums over the rows of a `StatsTable`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    pub languages: usize,
    pub repositories: usize,
    pub stars: u64,
    pub forks: u64,
}

impl StatsTable {
    pub fn new(reports: Vec<LanguageReport>) -> Self {
        Self { reports }
    }

    /// Languages that returned data, in input order.
    pub fn rows(&self) -> impl Iterator<Item = &LanguageStats> {
        self.reports.iter().filter_map(|r| match &r.outcome {
            LanguageOutcome::Ok(stats) => Some(stats),
            LanguageOutcome::Unavailable(_) => None,
        })
    }

    /// Languages that returned no data, with the reason.
    pub fn skipped(&self) -> Vec<(&str, &Unavailable)> {
        self.reports
            .iter()
            .filter_map(|r| match &r.outcome {
                LanguageOutcome::Unavailable(why) => Some((r.language.as_str(), why)),
                LanguageOutcome::Ok(_) => None,
            })
            .collect()
    }

    pub fn get(&self, language: &str) -> Option<&LanguageOutcome> {
        self.reports
            .iter()
            .find(|r| r.language == language)
            .map(|r| &r.outcome)
    }

    pub fn totals(&self) -> Totals {
        self.rows().fold(Totals::default(), |acc, s| Totals {
            languages: acc.languages + 1,
            repositories: acc.repositories + s.repository_count,
            stars: acc.stars + s.total_stars,
            forks: acc.forks + s.total_forks,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.rows().next().is_none()
    }
}

/// Result of a direct top-N lookup for one language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LanguageTop {
    Found { repositories: Vec<RepositorySummary> },
    Unavailable(Unavailable),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_key_parses_its_own_rendering() {
        for key in [
            SortKey::Stars,
            SortKey::Forks,
            SortKey::HelpWantedIssues,
            SortKey::Updated,
        ] {
            assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
        }
        assert!("popularity".parse::<SortKey>().is_err());
    }

    #[test]
    fn empty_items_average_is_zero() {
        let s = LanguageStats::from_items("Go", &[]);
        assert_eq!(s.repository_count, 0);
        assert_eq!(s.average_stars, 0.0);
    }
}
