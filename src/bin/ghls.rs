use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use ghls::config::parse_list;
use ghls::error::RATE_LIMIT_HINT;
use ghls::viz::ImageFormat;
use ghls::{Dashboard, LanguageTop, Settings, SortKey};
use ghls::{storage, table, viz};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "ghls",
    version,
    about = "Rank programming languages by the popularity of their top GitHub repositories"
)]
struct Cli {
    /// API root serving `/search/repositories`.
    #[arg(long, global = true, default_value = ghls::api::DEFAULT_BASE_URL)]
    api_url: String,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch per-language statistics (and optionally save and chart them).
    Stats(StatsArgs),
    /// List the top repositories of one language.
    Top(TopArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PlotFormat {
    Svg,
    Png,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SortArg {
    Stars,
    Forks,
    HelpWantedIssues,
    Updated,
}

impl From<SortArg> for SortKey {
    fn from(s: SortArg) -> Self {
        match s {
            SortArg::Stars => SortKey::Stars,
            SortArg::Forks => SortKey::Forks,
            SortArg::HelpWantedIssues => SortKey::HelpWantedIssues,
            SortArg::Updated => SortKey::Updated,
        }
    }
}

#[derive(Args, Debug)]
struct StatsArgs {
    /// Languages separated by comma or semicolon (default: ten popular languages)
    #[arg(short, long)]
    languages: Option<String>,
    /// Pause between two requests, in milliseconds.
    #[arg(long, default_value_t = 700)]
    delay_ms: u64,
    /// Repositories fetched per language.
    #[arg(long, default_value_t = 100)]
    per_page: u32,
    /// Save results to file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Write one bar chart per metric into this directory.
    #[arg(long)]
    plot_dir: Option<PathBuf>,
    /// Chart image format.
    #[arg(long, value_enum, default_value = "svg")]
    plot_format: PlotFormat,
    /// Width of the charts (default 1000).
    #[arg(long, default_value_t = 1000)]
    width: u32,
    /// Height of the charts (default 600).
    #[arg(long, default_value_t = 600)]
    height: u32,
    /// Number formatting locale (en, de, fr, es, it, pt, nl).
    #[arg(long, default_value = "en")]
    locale: String,
}

#[derive(Args, Debug)]
struct TopArgs {
    /// Language to browse (e.g., Rust, C++, "Jupyter Notebook").
    language: String,
    /// Number of repositories to list.
    #[arg(short = 'n', long, default_value_t = 5)]
    count: u32,
    /// Ranking key.
    #[arg(long, value_enum, default_value = "stars")]
    sort: SortArg,
    /// Save the list to file (.csv or .json).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Number formatting locale (en, de, fr, es, it, pt, nl).
    #[arg(long, default_value = "en")]
    locale: String,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    let res = match cli.cmd {
        Command::Stats(args) => cmd_stats(&cli.api_url, args),
        Command::Top(args) => cmd_top(&cli.api_url, args),
    };
    match res {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            if err.downcast_ref::<ghls::FetchError>().is_some() {
                eprintln!("{RATE_LIMIT_HINT}");
            }
            ExitCode::FAILURE
        }
    }
}

fn settings_from(api_url: &str, args: &StatsArgs) -> Settings {
    let mut settings = Settings {
        base_url: api_url.to_string(),
        delay: Duration::from_millis(args.delay_ms),
        per_page: args.per_page,
        ..Settings::default()
    };
    if let Some(list) = args.languages.as_deref() {
        let langs = parse_list(list);
        if !langs.is_empty() {
            settings.languages = langs;
        }
    }
    settings
}

fn cmd_stats(api_url: &str, args: StatsArgs) -> Result<()> {
    let settings = settings_from(api_url, &args);
    let mut dash = Dashboard::from_settings(&settings)?;
    eprintln!(
        "Fetching {} languages from GitHub...",
        settings.languages.len()
    );
    let stats = dash.cached_language_stats()?.clone();

    print!("{}", table::render_stats(&stats, &args.locale));

    if let Some(path) = args.out.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_stats_csv(&stats, path)?,
            "json" => storage::save_stats_json(&stats, path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} rows to {}", stats.rows().count(), path.display());
    }

    if let Some(dir) = args.plot_dir.as_ref() {
        if stats.is_empty() {
            eprintln!("No language returned data; skipping charts.");
            return Ok(());
        }
        let format = match args.plot_format {
            PlotFormat::Svg => ImageFormat::Svg,
            PlotFormat::Png => ImageFormat::Png,
        };
        let paths = viz::plot_all(&stats, dir, format, args.width, args.height, &args.locale)?;
        for p in paths {
            eprintln!("Wrote chart to {}", p.display());
        }
    }

    Ok(())
}

fn cmd_top(api_url: &str, args: TopArgs) -> Result<()> {
    let settings = Settings {
        base_url: api_url.to_string(),
        ..Settings::default()
    };
    let dash = Dashboard::from_settings(&settings)?;
    match dash.top_repositories_by(&args.language, args.sort.into(), args.count)? {
        LanguageTop::Found { repositories } => {
            print!(
                "{}",
                table::render_repositories(&args.language, &repositories, &args.locale)
            );
            if let Some(path) = args.out.as_ref() {
                match path.extension().and_then(|e| e.to_str()) {
                    Some(e) if e.eq_ignore_ascii_case("json") => {
                        storage::save_repositories_json(&repositories, path)?
                    }
                    _ => storage::save_repositories_csv(&repositories, path)?,
                }
                eprintln!("Saved {} rows to {}", repositories.len(), path.display());
            }
            Ok(())
        }
        LanguageTop::Unavailable(why) => {
            anyhow::bail!("no results for {}: {}\n{}", args.language, why, RATE_LIMIT_HINT)
        }
    }
}
