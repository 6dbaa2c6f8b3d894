use ghls::models::LanguageReport;
use ghls::viz::{self, BarMetric, ImageFormat};
use ghls::{LanguageOutcome, LanguageStats, StatsTable, Unavailable};
use std::fs;

fn stats(language: &str, count: usize, stars: u64, forks: u64) -> LanguageReport {
    LanguageReport {
        language: language.into(),
        outcome: LanguageOutcome::Ok(LanguageStats {
            language: language.into(),
            repository_count: count,
            total_stars: stars,
            total_forks: forks,
            average_stars: if count > 0 {
                stars as f64 / count as f64
            } else {
                0.0
            },
        }),
    }
}

fn sample_table() -> StatsTable {
    StatsTable::new(vec![
        stats("JavaScript", 100, 9_500_000, 1_200_000),
        stats("Python", 100, 8_100_000, 1_500_000),
        LanguageReport {
            language: "Java".into(),
            outcome: LanguageOutcome::Unavailable(Unavailable::RateLimited {
                message: None,
                reset_at: None,
            }),
        },
        stats("C++", 100, 2_300_000, 600_000),
        stats("Swift", 100, 1_900_000, 250_000),
    ])
}

#[test]
fn svg_chart_per_metric() {
    let dir = tempfile::tempdir().unwrap();
    let table = sample_table();
    for metric in BarMetric::ALL {
        let path = dir.path().join(format!("{}.svg", metric.file_stem()));
        viz::plot_bars(&table, metric, &path, 900, 500).unwrap();
        let svg = fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains(metric.title()));
        assert!(svg.contains("Python"));
        // rate-limited languages get no bar
        assert!(!svg.contains("Java<"));
    }
}

#[test]
fn png_chart_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stars.png");
    viz::plot_bars(&sample_table(), BarMetric::TotalStars, &path, 640, 400).unwrap();
    let bytes = fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"\x89PNG"));
}

#[test]
fn plot_all_writes_three_files() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("charts");
    let paths = viz::plot_all(&sample_table(), &out, ImageFormat::Svg, 800, 450, "de").unwrap();
    let names: Vec<String> = paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["stars.svg", "avg_stars.svg", "forks.svg"]);
    for p in &paths {
        assert!(fs::metadata(p).unwrap().len() > 0);
    }
}

#[test]
fn all_zero_table_still_renders() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("zero.svg");
    let table = StatsTable::new(vec![stats("Zig", 0, 0, 0)]);
    viz::plot_bars(&table, BarMetric::AverageStars, &path, 600, 400).unwrap();
    assert!(fs::read_to_string(&path).unwrap().contains("Zig"));
}

#[test]
fn table_without_rows_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.svg");
    let table = StatsTable::new(vec![LanguageReport {
        language: "Go".into(),
        outcome: LanguageOutcome::Unavailable(Unavailable::Failed {
            status: 500,
            message: "oops".into(),
        }),
    }]);
    let err = viz::plot_bars(&table, BarMetric::TotalStars, &path, 600, 400).unwrap_err();
    assert!(err.to_string().contains("no data"));
    assert!(!path.exists());
}
