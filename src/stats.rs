use crate::api::RepositorySource;
use crate::error::Result;
use crate::models::{
    LanguageOutcome, LanguageQuery, LanguageReport, LanguageStats, SortKey, StatsTable,
};
use log::{info, warn};
use std::time::Duration;

/// Page size used for the per-language aggregate.
pub const AGGREGATE_PAGE_SIZE: u32 = 100;

/// Pause between two search requests.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(700);

/// Drives a [`RepositorySource`] across a language list, one request at a time.
#[derive(Debug, Clone)]
pub struct Aggregator<S> {
    source: S,
    delay: Duration,
    per_page: u32,
}

impl<S: RepositorySource> Aggregator<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            delay: DEFAULT_DELAY,
            per_page: AGGREGATE_PAGE_SIZE,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Fetch and reduce every language, in order.
    ///
    /// A language whose response has no `items` is kept in the table with the
    /// reason. Any transport or decode error aborts the whole cycle.
    pub fn compute_language_stats<L: AsRef<str>>(&self, languages: &[L]) -> Result<StatsTable> {
        let mut reports = Vec::with_capacity(languages.len());
        for (i, language) in languages.iter().enumerate() {
            if i > 0 && !self.delay.is_zero() {
                std::thread::sleep(self.delay);
            }
            let language = language.as_ref();
            let query = LanguageQuery::new(language, SortKey::Stars, self.per_page);
            let result = self.source.search(&query)?;

            let outcome = match result.missing_items() {
                None => {
                    let items = result.items().unwrap_or_default();
                    let stats = LanguageStats::from_items(language, items);
                    info!(
                        "{}: {} repositories, {} stars, {} forks",
                        language, stats.repository_count, stats.total_stars, stats.total_forks
                    );
                    LanguageOutcome::Ok(stats)
                }
                Some(why) => {
                    warn!("{}: {}", language, why);
                    LanguageOutcome::Unavailable(why)
                }
            };
            reports.push(LanguageReport {
                language: language.to_string(),
                outcome,
            });
        }
        Ok(StatsTable::new(reports))
    }
}
