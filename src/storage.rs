use crate::models::{RepositorySummary, StatsTable};
use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use std::borrow::Cow;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Prefix text cells that a spreadsheet would evaluate as a formula.
fn safe_cell(s: &str) -> Cow<'_, str> {
    match s.chars().next() {
        Some('=' | '+' | '-' | '@' | '\t' | '\r') => Cow::Owned(format!("'{s}")),
        _ => Cow::Borrowed(s),
    }
}

/// Save the per-language rows as CSV with header. Languages without data are left out.
pub fn save_stats_csv<P: AsRef<Path>>(table: &StatsTable, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut wtr = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("create {}", path.display()))?;
    wtr.serialize((
        "language",
        "repositories",
        "total_stars",
        "total_forks",
        "avg_stars",
    ))?;
    for s in table.rows() {
        wtr.serialize((
            safe_cell(&s.language),
            s.repository_count,
            s.total_stars,
            s.total_forks,
            format!("{:.2}", s.average_stars),
        ))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save the full table, including languages without data, as pretty JSON.
pub fn save_stats_json<P: AsRef<Path>>(table: &StatsTable, path: P) -> Result<()> {
    write_json(table, path.as_ref())
}

/// Save a repository list as CSV with header.
pub fn save_repositories_csv<P: AsRef<Path>>(repos: &[RepositorySummary], path: P) -> Result<()> {
    let path = path.as_ref();
    let mut wtr = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("create {}", path.display()))?;
    wtr.serialize((
        "name",
        "owner",
        "html_url",
        "stars",
        "forks",
        "description",
    ))?;
    for r in repos {
        wtr.serialize((
            safe_cell(&r.name),
            safe_cell(r.owner_login()),
            safe_cell(&r.html_url),
            r.stargazers_count,
            r.forks_count,
            r.description.as_deref().map(safe_cell),
        ))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save a repository list as pretty JSON array.
pub fn save_repositories_json<P: AsRef<Path>>(repos: &[RepositorySummary], path: P) -> Result<()> {
    write_json(repos, path.as_ref())
}

fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> Result<()> {
    let mut f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let s = serde_json::to_string_pretty(value)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
