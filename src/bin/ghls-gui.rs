/*!
 * Desktop dashboard for ghls - GitHub language popularity statistics
 *
 * A cross-platform desktop application providing:
 * - Per-language star/fork statistics, cached for one hour
 * - Bar views for total and average stars
 * - A per-language browser for the top repositories
 * - Chart and table export
 *
 * Platform support: Windows, macOS, Linux
 */

use chrono::{DateTime, Local, Utc};
use eframe::egui;
use ghls::config::parse_list;
use ghls::error::RATE_LIMIT_HINT;
use ghls::table::{format_average, format_count};
use ghls::viz::ImageFormat;
use ghls::viz::util::LOCALE_CHOICES;
use ghls::{Client, Dashboard, LanguageTop, Settings, StatsTable, storage, viz};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, mpsc};
use std::thread;

type SharedDashboard = Arc<Mutex<Dashboard<Client>>>;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([600.0, 400.0])
            .with_title("GitHub Language Stats - ghls"),
        ..Default::default()
    };

    eframe::run_native(
        "GitHub Language Stats",
        options,
        Box::new(|_cc| {
            let mut app = GhlsApp::new();
            app.load_stats(false);
            Ok(Box::new(app))
        }),
    )
}

/// Main application state
struct GhlsApp {
    dashboard: Option<SharedDashboard>,
    languages: String,

    // Latest aggregate
    stats: Option<StatsTable>,
    computed_at: Option<DateTime<Utc>>,

    // Repository browser
    selected_language: String,
    top: Option<(String, LanguageTop)>,

    // Export options
    output_path: String,
    plot_format: PlotFormat,
    locale: String,

    // UI state
    is_loading: bool,
    status_message: String,
    error_message: String,
    show_hint: bool,

    operation_receiver: Option<mpsc::Receiver<OperationResult>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum PlotFormat {
    Png,
    Svg,
}

#[derive(Debug)]
enum OperationResult {
    Stats {
        table: StatsTable,
        computed_at: Option<DateTime<Utc>>,
    },
    Top {
        language: String,
        result: LanguageTop,
    },
    Exported(String),
    FetchFailed(String),
    Error(String),
}

fn build_dashboard(languages: &str) -> Result<SharedDashboard, String> {
    let mut settings = Settings::default();
    let langs = parse_list(languages);
    if !langs.is_empty() {
        settings.languages = langs;
    }
    Dashboard::from_settings(&settings)
        .map(|d| Arc::new(Mutex::new(d)))
        .map_err(|e| e.to_string())
}

impl GhlsApp {
    fn new() -> Self {
        let home_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .to_string_lossy()
            .to_string();
        let languages = Settings::default().languages.join(", ");
        let (dashboard, error_message) = match build_dashboard(&languages) {
            Ok(d) => (Some(d), String::new()),
            Err(e) => (None, format!("Could not set up the HTTP client: {e}")),
        };

        Self {
            dashboard,
            languages,
            stats: None,
            computed_at: None,
            selected_language: String::new(),
            top: None,
            output_path: home_dir,
            plot_format: PlotFormat::Svg,
            locale: "en".to_string(),
            is_loading: false,
            status_message: String::new(),
            error_message,
            show_hint: false,
            operation_receiver: None,
        }
    }

    fn spawn<F>(&mut self, status: &str, job: F)
    where
        F: FnOnce() -> OperationResult + Send + 'static,
    {
        self.is_loading = true;
        self.error_message.clear();
        self.show_hint = false;
        self.status_message = status.to_string();

        let (sender, receiver) = mpsc::channel();
        self.operation_receiver = Some(receiver);
        thread::spawn(move || {
            let _ = sender.send(job());
        });
    }

    /// Read the cached aggregate; `force` refetches but keeps the old one on failure.
    fn load_stats(&mut self, force: bool) {
        let Some(dashboard) = self.dashboard.clone() else {
            return;
        };
        self.spawn("Fetching data from GitHub...", move || {
            let mut dash = match dashboard.lock() {
                Ok(d) => d,
                Err(poisoned) => poisoned.into_inner(),
            };
            let fetched = if force {
                dash.refresh_language_stats().cloned()
            } else {
                dash.cached_language_stats().cloned()
            };
            match fetched {
                Ok(table) => OperationResult::Stats {
                    table,
                    computed_at: dash.computed_at(),
                },
                Err(err) => OperationResult::FetchFailed(format!("An error occurred: {err}")),
            }
        });
    }

    fn load_top(&mut self, language: String) {
        let Some(dashboard) = self.dashboard.clone() else {
            return;
        };
        let count = Settings::default().top_count;
        self.spawn(&format!("Fetching top {language} repositories..."), move || {
            let dash = match dashboard.lock() {
                Ok(d) => d,
                Err(poisoned) => poisoned.into_inner(),
            };
            match dash.top_repositories(&language, count) {
                Ok(result) => OperationResult::Top { language, result },
                Err(err) => OperationResult::FetchFailed(format!("An error occurred: {err}")),
            }
        });
    }

    fn export(&mut self) {
        let Some(table) = self.stats.clone() else {
            self.error_message = "Nothing to export yet".to_string();
            return;
        };
        if self.output_path.trim().is_empty() {
            self.error_message = "Please specify an output directory".to_string();
            return;
        }
        let dir = PathBuf::from(&self.output_path);
        let format = match self.plot_format {
            PlotFormat::Png => ImageFormat::Png,
            PlotFormat::Svg => ImageFormat::Svg,
        };
        let locale = self.locale.clone();
        self.spawn("Writing charts...", move || {
            let mut files = match viz::plot_all(&table, &dir, format, 1000, 600, &locale) {
                Ok(paths) => paths,
                Err(err) => return OperationResult::Error(format!("Failed to create charts: {err}")),
            };
            let csv_path = dir.join("ghls_languages.csv");
            if let Err(err) = storage::save_stats_csv(&table, &csv_path) {
                return OperationResult::Error(format!("Failed to save CSV: {err}"));
            }
            files.push(csv_path);
            let listing: Vec<String> = files
                .iter()
                .map(|p| p.to_string_lossy().to_string())
                .collect();
            OperationResult::Exported(format!("Files created:\n{}", listing.join("\n")))
        });
    }

    fn apply_languages(&mut self) {
        match build_dashboard(&self.languages) {
            Ok(d) => {
                self.dashboard = Some(d);
                self.stats = None;
                self.computed_at = None;
                self.top = None;
                self.load_stats(false);
            }
            Err(e) => self.error_message = format!("Could not set up the HTTP client: {e}"),
        }
    }

    fn check_operation_result(&mut self) {
        if let Some(receiver) = &self.operation_receiver
            && let Ok(result) = receiver.try_recv()
        {
            self.is_loading = false;
            self.operation_receiver = None;
            self.status_message.clear();

            match result {
                OperationResult::Stats { table, computed_at } => {
                    if self.selected_language.is_empty()
                        && let Some(first) = table.rows().next()
                    {
                        self.selected_language = first.language.clone();
                    }
                    self.stats = Some(table);
                    self.computed_at = computed_at;
                }
                OperationResult::Top { language, result } => {
                    self.top = Some((language, result));
                }
                OperationResult::Exported(message) => {
                    self.status_message = message;
                }
                OperationResult::FetchFailed(error) => {
                    self.error_message = error;
                    self.show_hint = true;
                }
                OperationResult::Error(error) => {
                    self.error_message = error;
                }
            }
        }
    }

    fn stats_section(&self, ui: &mut egui::Ui, table: &StatsTable) {
        ui.group(|ui| {
            ui.label(egui::RichText::new("Language statistics").strong());
            ui.add_space(5.0);
            egui::Grid::new("stats_grid")
                .striped(true)
                .num_columns(5)
                .show(ui, |ui| {
                    for h in ["Language", "Repositories", "Stars", "Forks", "Avg stars"] {
                        ui.label(egui::RichText::new(h).strong());
                    }
                    ui.end_row();
                    for s in table.rows() {
                        ui.label(&s.language);
                        ui.label(format_count(s.repository_count, &self.locale));
                        ui.label(format_count(s.total_stars, &self.locale));
                        ui.label(format_count(s.total_forks, &self.locale));
                        ui.label(format_average(s.average_stars, &self.locale));
                        ui.end_row();
                    }
                });

            for (language, why) in table.skipped() {
                ui.colored_label(
                    egui::Color32::from_rgb(200, 120, 0),
                    format!("{language}: {why}"),
                );
            }
        });

        ui.add_space(10.0);

        ui.columns(2, |cols| {
            bar_view(&mut cols[0], "Stars per language", table, &self.locale, |s| {
                s.total_stars as f64
            });
            bar_view(&mut cols[1], "Average stars per repository", table, &self.locale, |s| {
                s.average_stars
            });
        });
    }

    fn browser_section(&mut self, ui: &mut egui::Ui) {
        let languages: Vec<String> = self
            .stats
            .as_ref()
            .map(|t| t.rows().map(|s| s.language.clone()).collect())
            .unwrap_or_default();
        if languages.is_empty() {
            return;
        }

        ui.group(|ui| {
            ui.label(egui::RichText::new("Top repositories").strong());
            ui.add_space(5.0);
            ui.horizontal(|ui| {
                egui::ComboBox::from_label("Language")
                    .selected_text(&self.selected_language)
                    .show_ui(ui, |ui| {
                        for lang in &languages {
                            ui.selectable_value(&mut self.selected_language, lang.clone(), lang);
                        }
                    });
                if ui
                    .add_enabled(!self.is_loading, egui::Button::new("Show top 5"))
                    .clicked()
                {
                    let lang = self.selected_language.clone();
                    self.load_top(lang);
                }
            });

            match &self.top {
                Some((language, LanguageTop::Found { repositories })) => {
                    ui.label(format!("Top {} {language} repositories:", repositories.len()));
                    for repo in repositories {
                        ui.add_space(4.0);
                        ui.horizontal(|ui| {
                            ui.hyperlink_to(egui::RichText::new(&repo.name).strong(), &repo.html_url);
                            ui.label(format!("by {}", repo.owner_login()));
                        });
                        ui.label(format!(
                            "{} stars, {} forks",
                            format_count(repo.stargazers_count, &self.locale),
                            format_count(repo.forks_count, &self.locale)
                        ));
                        ui.label(
                            repo.description
                                .as_deref()
                                .filter(|d| !d.trim().is_empty())
                                .unwrap_or("No description"),
                        );
                        ui.separator();
                    }
                }
                Some((language, LanguageTop::Unavailable(why))) => {
                    ui.colored_label(egui::Color32::RED, format!("{language}: {why}"));
                }
                None => {}
            }
        });
    }
}

/// Horizontal bars scaled to the largest value.
fn bar_view(
    ui: &mut egui::Ui,
    title: &str,
    table: &StatsTable,
    locale: &str,
    value: impl Fn(&ghls::LanguageStats) -> f64,
) {
    ui.group(|ui| {
        ui.label(egui::RichText::new(title).strong());
        let max = table.rows().map(&value).fold(0.0f64, f64::max);
        for s in table.rows() {
            let v = value(s);
            let frac = if max > 0.0 { (v / max) as f32 } else { 0.0 };
            ui.add(egui::ProgressBar::new(frac).text(format!("{}  {}", s.language, format_count(v.round() as u64, locale))));
        }
    });
}

impl eframe::App for GhlsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_operation_result();

        if self.is_loading {
            ctx.request_repaint();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Popular Programming Languages");
                ui.label("Explore language trends based on GitHub data");
                ui.add_space(10.0);

                ui.horizontal(|ui| {
                    if ui
                        .add_enabled(!self.is_loading, egui::Button::new("Refresh"))
                        .on_hover_text("Reuses the data fetched within the last hour")
                        .clicked()
                    {
                        self.load_stats(false);
                    }
                    if ui
                        .add_enabled(!self.is_loading, egui::Button::new("Force refresh"))
                        .clicked()
                    {
                        self.load_stats(true);
                    }
                    if self.is_loading {
                        ui.spinner();
                        ui.label(&self.status_message);
                    } else if let Some(at) = self.computed_at {
                        ui.label(format!(
                            "Updated {}",
                            at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
                        ));
                    }
                });

                ui.add_space(10.0);

                if let Some(table) = self.stats.clone() {
                    self.stats_section(ui, &table);
                    ui.add_space(10.0);
                    self.browser_section(ui);
                }

                ui.add_space(10.0);

                ui.collapsing("Settings and export", |ui| {
                    ui.horizontal(|ui| {
                        ui.label("Languages:");
                        ui.text_edit_singleline(&mut self.languages)
                            .on_hover_text("Languages separated by commas (e.g., Rust, Go, Zig)");
                        if ui
                            .add_enabled(!self.is_loading, egui::Button::new("Apply"))
                            .clicked()
                        {
                            self.apply_languages();
                        }
                    });

                    ui.horizontal(|ui| {
                        ui.label("Output path:");
                        ui.text_edit_singleline(&mut self.output_path);
                        if ui.button("Browse").clicked()
                            && let Some(path) = rfd::FileDialog::new().pick_folder()
                        {
                            self.output_path = path.to_string_lossy().to_string();
                        }
                    });

                    ui.horizontal(|ui| {
                        ui.label("Chart format:");
                        ui.radio_value(&mut self.plot_format, PlotFormat::Svg, "SVG");
                        ui.radio_value(&mut self.plot_format, PlotFormat::Png, "PNG");
                    });

                    ui.horizontal(|ui| {
                        ui.label("Locale:");
                        egui::ComboBox::from_label("")
                            .selected_text(&self.locale)
                            .show_ui(ui, |ui| {
                                for (tag, name) in LOCALE_CHOICES {
                                    ui.selectable_value(&mut self.locale, tag.to_string(), name);
                                }
                            });
                    });

                    if ui
                        .add_enabled(
                            !self.is_loading && self.stats.is_some(),
                            egui::Button::new("Export charts and table"),
                        )
                        .clicked()
                    {
                        self.export();
                    }
                });

                ui.add_space(10.0);

                if !self.is_loading && !self.status_message.is_empty() {
                    ui.colored_label(egui::Color32::DARK_GREEN, &self.status_message);
                }

                if !self.error_message.is_empty() {
                    ui.colored_label(egui::Color32::RED, &self.error_message);
                    if self.show_hint {
                        ui.label(RATE_LIMIT_HINT);
                    }
                }

                ui.add_space(15.0);
                ui.separator();
                ui.small("Data from the GitHub API. Refreshed at most once per hour.");
            });
        });
    }
}
