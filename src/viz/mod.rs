//! Visualization utilities: render per-language bar charts to **SVG** or **PNG**.
//!
//! One bar per language that returned data, in table order. The y axis is
//! scaled to thousands/millions and long language names are cut to the bar width.

pub mod text;
pub mod util;

use crate::models::{LanguageStats, StatsTable};
use anyhow::{Result, anyhow};

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::path::{Path, PathBuf};
use std::sync::Once;

use text::truncate_to_width;
use util::{AxisScale, fmt_scaled_tick, left_label_area_px, map_locale};

// ab_glyph never looks at system fonts; the bundled face is registered once.
static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    INIT_FONTS.call_once(|| {
        let _ = plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            include_bytes!("../../assets/DejaVuSans.ttf"),
        );
    });
}

/// Which column of the table a chart shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarMetric {
    TotalStars,
    AverageStars,
    TotalForks,
}

impl BarMetric {
    pub const ALL: [BarMetric; 3] = [
        BarMetric::TotalStars,
        BarMetric::AverageStars,
        BarMetric::TotalForks,
    ];

    pub fn value(&self, s: &LanguageStats) -> f64 {
        match self {
            BarMetric::TotalStars => s.total_stars as f64,
            BarMetric::AverageStars => s.average_stars,
            BarMetric::TotalForks => s.total_forks as f64,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            BarMetric::TotalStars => "Stars per language",
            BarMetric::AverageStars => "Average stars per repository",
            BarMetric::TotalForks => "Forks per language",
        }
    }

    fn axis_label(&self) -> &'static str {
        match self {
            BarMetric::TotalStars => "Stars",
            BarMetric::AverageStars => "Average stars",
            BarMetric::TotalForks => "Forks",
        }
    }

    /// File name stem used by [`plot_all`].
    pub fn file_stem(&self) -> &'static str {
        match self {
            BarMetric::TotalStars => "stars",
            BarMetric::AverageStars => "avg_stars",
            BarMetric::TotalForks => "forks",
        }
    }

    fn color(&self) -> RGBColor {
        match self {
            BarMetric::TotalStars => RGBColor(91, 155, 213),
            BarMetric::AverageStars => RGBColor(112, 173, 71),
            BarMetric::TotalForks => RGBColor(237, 125, 49),
        }
    }
}

/// Image format for [`plot_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Svg,
    Png,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Svg => "svg",
            ImageFormat::Png => "png",
        }
    }
}

/// Convenience: bar chart with the metric's default title and English labels.
pub fn plot_bars<P: AsRef<Path>>(
    table: &StatsTable,
    metric: BarMetric,
    out_path: P,
    width: u32,
    height: u32,
) -> Result<()> {
    plot_bars_locale(table, metric, out_path, width, height, "en", metric.title())
}

/// Bar chart for one metric. SVG when the path ends in `.svg`, PNG otherwise.
pub fn plot_bars_locale<P: AsRef<Path>>(
    table: &StatsTable,
    metric: BarMetric,
    out_path: P,
    width: u32,
    height: u32,
    locale_tag: &str,
    title: &str,
) -> Result<()> {
    let rows: Vec<&LanguageStats> = table.rows().collect();
    if rows.is_empty() {
        return Err(anyhow!("no data to plot"));
    }
    ensure_fonts_registered();

    let labels: Vec<String> = rows.iter().map(|s| s.language.clone()).collect();
    let values: Vec<f64> = rows.iter().map(|s| metric.value(s)).collect();

    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_bars(root, &labels, &values, metric, title, locale_tag)?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_bars(root, &labels, &values, metric, title, locale_tag)?;
    }
    Ok(())
}

/// Write one chart per metric into `dir`, returning the created paths.
pub fn plot_all<P: AsRef<Path>>(
    table: &StatsTable,
    dir: P,
    format: ImageFormat,
    width: u32,
    height: u32,
    locale_tag: &str,
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;
    let mut out = Vec::new();
    for metric in BarMetric::ALL {
        let path = dir.join(format!("{}.{}", metric.file_stem(), format.extension()));
        plot_bars_locale(table, metric, &path, width, height, locale_tag, metric.title())?;
        out.push(path);
    }
    Ok(out)
}

/// Helper that draws to any Plotters backend.
fn draw_bars<DB>(
    root: DrawingArea<DB, Shift>,
    labels: &[String],
    values: &[f64],
    metric: BarMetric,
    title: &str,
    locale_tag: &str,
) -> Result<()>
where
    DB: DrawingBackend,
{
    const MARGIN: u32 = 16;
    const TICK_FONT_PX: u32 = 12;

    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;

    let (_, dec_sep) = map_locale(locale_tag);
    let max_val = values.iter().cloned().fold(0.0f64, f64::max);
    let scale = AxisScale::for_max(max_val);
    // an all-zero table still gets a unit axis
    let y_top = if max_val > 0.0 {
        max_val / scale.divisor * 1.08
    } else {
        1.0
    };
    let y_axis_title = scale.title(metric.axis_label());

    let n = values.len() as u32;
    let left_label_width_px = left_label_area_px(y_top, 10, TICK_FONT_PX);
    let (root_w, _) = root.dim_in_pixel();
    let slot_px = root_w.saturating_sub(left_label_width_px + 2 * MARGIN) / n.max(1);
    let tick_labels: Vec<String> = labels
        .iter()
        .map(|l| truncate_to_width(l, TICK_FONT_PX, slot_px.saturating_sub(6)))
        .collect();

    let x_label_fmt = |v: &SegmentValue<u32>| match v {
        SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
            tick_labels.get(*i as usize).cloned().unwrap_or_default()
        }
        SegmentValue::Last => String::new(),
    };
    let y_label_fmt = |v: &f64| fmt_scaled_tick(*v, dec_sep);

    let mut chart = ChartBuilder::on(&root)
        .margin(MARGIN)
        .caption(title, (FontFamily::SansSerif, 20))
        .set_label_area_size(LabelAreaPosition::Left, left_label_width_px)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d((0u32..n).into_segmented(), 0f64..y_top)
        .map_err(|e| anyhow!("{:?}", e))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc(y_axis_title)
        .x_labels(n as usize)
        .y_labels(10)
        .x_label_formatter(&x_label_fmt)
        .y_label_formatter(&y_label_fmt)
        .label_style((FontFamily::SansSerif, TICK_FONT_PX))
        .axis_desc_style((FontFamily::SansSerif, 14))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    let color = metric.color();
    chart
        .draw_series(values.iter().enumerate().map(|(i, v)| {
            let i = i as u32;
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(i), 0.0),
                    (SegmentValue::Exact(i + 1), *v / scale.divisor),
                ],
                color.filled(),
            );
            bar.set_margin(0, 0, 6, 6);
            bar
        }))
        .map_err(|e| anyhow!("{:?}", e))?;

    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}
