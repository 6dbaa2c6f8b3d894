//! Composition root: one client, one aggregator and the cached aggregate.
//!
//! ```no_run
//! # use ghls::{Dashboard, Settings};
//! let mut dash = Dashboard::from_settings(&Settings::default())?;
//! let table = dash.cached_language_stats()?;
//! for row in table.rows() {
//!     println!("{}: {} stars", row.language, row.total_stars);
//! }
//! # Ok::<(), ghls::FetchError>(())
//! ```

use crate::api::{Client, RepositorySource};
use crate::cache::{CacheEntry, Clock, SystemClock, TtlCache};
use crate::config::Settings;
use crate::error::Result;
use crate::models::{LanguageQuery, LanguageTop, SortKey, StatsTable};
use crate::stats::Aggregator;
use chrono::{DateTime, Duration, Utc};
use log::info;

pub struct Dashboard<S, C = SystemClock> {
    aggregator: Aggregator<S>,
    languages: Vec<String>,
    cache: TtlCache<StatsTable, C>,
}

impl Dashboard<Client, SystemClock> {
    /// Wire up a live client from `settings`.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let client = Client::with_base_url(settings.base_url.clone())?;
        let aggregator = Aggregator::new(client)
            .with_delay(settings.delay)
            .with_per_page(settings.per_page);
        Ok(Self::new(
            aggregator,
            settings.languages.clone(),
            TtlCache::new(Duration::seconds(settings.ttl_secs)),
        ))
    }
}

impl<S: RepositorySource, C: Clock> Dashboard<S, C> {
    pub fn new(
        aggregator: Aggregator<S>,
        languages: Vec<String>,
        cache: TtlCache<StatsTable, C>,
    ) -> Self {
        Self {
            aggregator,
            languages,
            cache,
        }
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    pub fn source(&self) -> &S {
        self.aggregator.source()
    }

    /// The aggregate over all tracked languages, fetched at most once per
    /// freshness window.
    pub fn cached_language_stats(&mut self) -> Result<&StatsTable> {
        let Self {
            aggregator,
            languages,
            cache,
        } = self;
        cache.get_or_try_compute(|| {
            info!("refreshing statistics for {} languages", languages.len());
            aggregator.compute_language_stats(languages.as_slice())
        })
    }

    /// Refetch now, even within the freshness window. On failure the previous
    /// aggregate is kept.
    pub fn refresh_language_stats(&mut self) -> Result<&StatsTable> {
        let Self {
            aggregator,
            languages,
            cache,
        } = self;
        cache.refresh(|| {
            info!("forced refresh for {} languages", languages.len());
            aggregator.compute_language_stats(languages.as_slice())
        })
    }

    /// Drop the cached aggregate so the next read refetches.
    pub fn invalidate(&mut self) {
        self.cache.invalidate();
    }

    pub fn cache_entry(&self) -> Option<&CacheEntry<StatsTable>> {
        self.cache.entry()
    }

    pub fn computed_at(&self) -> Option<DateTime<Utc>> {
        self.cache.entry().map(|e| e.computed_at)
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.cache.expires_at()
    }

    /// Top `count` repositories for one language by stars. Never cached.
    pub fn top_repositories(&self, language: &str, count: u32) -> Result<LanguageTop> {
        self.top_repositories_by(language, SortKey::Stars, count)
    }

    pub fn top_repositories_by(
        &self,
        language: &str,
        sort: SortKey,
        count: u32,
    ) -> Result<LanguageTop> {
        top_repositories(self.aggregator.source(), language, sort, count)
    }
}

/// Direct top-N lookup against any source.
pub fn top_repositories<S: RepositorySource + ?Sized>(
    source: &S,
    language: &str,
    sort: SortKey,
    count: u32,
) -> Result<LanguageTop> {
    let result = source.search(&LanguageQuery::new(language, sort, count))?;
    Ok(match result.missing_items() {
        None => LanguageTop::Found {
            repositories: result.body.items.unwrap_or_default(),
        },
        Some(why) => LanguageTop::Unavailable(why),
    })
}
