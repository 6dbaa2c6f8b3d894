//! Plain-text rendering of the aggregate and of top-repository lists.

use crate::models::{RepositorySummary, StatsTable};
use crate::viz::util::map_locale;
use num_format::{Locale, ToFormattedString};
use std::fmt::Write;

fn fmt_avg(v: f64, locale: &Locale, dec_sep: char) -> String {
    let whole = v.trunc() as u64;
    let cents = ((v - v.trunc()) * 10.0).round() as u64;
    // 99.96 rounds up to the next whole number
    let (whole, tenths) = if cents >= 10 {
        (whole + 1, 0)
    } else {
        (whole, cents)
    };
    format!("{}{}{}", whole.to_formatted_string(locale), dec_sep, tenths)
}

/// Whole number with the thousands separator of `locale_tag`.
pub fn format_count<N: ToFormattedString>(n: N, locale_tag: &str) -> String {
    n.to_formatted_string(map_locale(locale_tag).0)
}

/// Average with one decimal, grouped and separated per `locale_tag`.
pub fn format_average(v: f64, locale_tag: &str) -> String {
    let (locale, dec_sep) = map_locale(locale_tag);
    fmt_avg(v, locale, dec_sep)
}

/// Render the rows of `table` as a fixed-width table, followed by a totals line
/// and one line per language that produced no data.
pub fn render_stats(table: &StatsTable, locale_tag: &str) -> String {
    let (locale, dec_sep) = map_locale(locale_tag);
    let header = ["Language", "Repos", "Stars", "Forks", "Avg stars"];

    let body: Vec<[String; 5]> = table
        .rows()
        .map(|s| {
            [
                s.language.clone(),
                s.repository_count.to_formatted_string(locale),
                s.total_stars.to_formatted_string(locale),
                s.total_forks.to_formatted_string(locale),
                fmt_avg(s.average_stars, locale, dec_sep),
            ]
        })
        .collect();

    let mut widths = header.map(|h| h.chars().count());
    for row in &body {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let line = |out: &mut String, cells: &[&str]| {
        for (i, (cell, w)) in cells.iter().zip(widths.iter()).enumerate() {
            if i > 0 {
                out.push_str("  ");
            }
            if i == 0 {
                let _ = write!(out, "{:<w$}", cell, w = *w);
            } else {
                let _ = write!(out, "{:>w$}", cell, w = *w);
            }
        }
        out.push('\n');
    };

    line(&mut out, &header);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    line(&mut out, &rule.iter().map(String::as_str).collect::<Vec<_>>());
    for row in &body {
        line(&mut out, &row.iter().map(String::as_str).collect::<Vec<_>>());
    }

    let t = table.totals();
    let _ = writeln!(
        out,
        "\n{} languages, {} repositories, {} stars, {} forks",
        t.languages,
        t.repositories.to_formatted_string(locale),
        t.stars.to_formatted_string(locale),
        t.forks.to_formatted_string(locale)
    );

    for (language, why) in table.skipped() {
        let _ = writeln!(out, "skipped {language}: {why}");
    }
    out
}

/// Render a top-N list, one block per repository.
pub fn render_repositories(language: &str, repos: &[RepositorySummary], locale_tag: &str) -> String {
    let (locale, _) = map_locale(locale_tag);
    let mut out = String::new();
    if repos.is_empty() {
        let _ = writeln!(out, "No {language} repositories found.");
        return out;
    }
    let _ = writeln!(out, "Top {} {} repositories:", repos.len(), language);
    for (i, r) in repos.iter().enumerate() {
        let _ = writeln!(out, "\n{}. {} by {}", i + 1, r.name, r.owner_login());
        let _ = writeln!(out, "   {}", r.html_url);
        let _ = writeln!(
            out,
            "   {} stars, {} forks",
            r.stargazers_count.to_formatted_string(locale),
            r.forks_count.to_formatted_string(locale)
        );
        let description = r
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or("No description");
        let _ = writeln!(out, "   {description}");
    }
    out
}
