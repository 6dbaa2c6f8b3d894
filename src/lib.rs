//! ghls
//!
//! A small Rust library for ranking programming languages by the popularity of
//! their most-starred GitHub repositories. Pairs with the `ghls` CLI and the
//! `ghls-gui` desktop dashboard.
//!
//! ### Features
//! - Query GitHub's repository search per language (one request, one page)
//! - Aggregate stars, forks and average stars per language, sequentially and throttled
//! - Keep the aggregate for an hour in a single-slot cache
//! - Report rate-limited languages instead of dropping them silently
//! - Render bar charts (SVG/PNG), print tables, export CSV/JSON
//!
//! ### Example
//! ```no_run
//! use ghls::{Dashboard, Settings};
//!
//! let mut dash = Dashboard::from_settings(&Settings::default())?;
//! let table = dash.cached_language_stats()?.clone();
//! print!("{}", ghls::table::render_stats(&table, "en"));
//! ghls::viz::plot_bars(&table, ghls::viz::BarMetric::TotalStars, "stars.svg", 1000, 600)?;
//! ghls::storage::save_stats_csv(&table, "languages.csv")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod cache;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod stats;
pub mod storage;
pub mod table;
pub mod viz;

pub use api::{Client, RepositorySource};
pub use cache::{Clock, SystemClock, TtlCache};
pub use config::Settings;
pub use dashboard::Dashboard;
pub use error::FetchError;
pub use models::{
    LanguageOutcome, LanguageQuery, LanguageStats, LanguageTop, RawSearchResult,
    RepositorySummary, SortKey, StatsTable, Unavailable,
};
pub use stats::Aggregator;
