//! Axis scaling, locale lookup and label sizing shared by the charts and the text table.

use num_format::Locale;

use super::text::estimate_text_width_px;

/// Divisor applied to bar values so tick labels stay short, and the word shown
/// in the axis title.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisScale {
    pub divisor: f64,
    pub unit: &'static str,
}

const SCALE_STEPS: [(f64, &str); 3] = [(1.0e9, "billions"), (1.0e6, "millions"), (1.0e3, "thousands")];

impl AxisScale {
    /// Largest step not exceeding `max`; unscaled below one thousand.
    pub fn for_max(max: f64) -> Self {
        SCALE_STEPS
            .iter()
            .find(|(step, _)| max.abs() >= *step)
            .map(|&(divisor, unit)| Self { divisor, unit })
            .unwrap_or(Self {
                divisor: 1.0,
                unit: "",
            })
    }

    /// `"Stars (millions)"`, or just the label when unscaled.
    pub fn title(&self, label: &str) -> String {
        if self.unit.is_empty() {
            label.to_string()
        } else {
            format!("{label} ({})", self.unit)
        }
    }
}

/// Tags understood by [`map_locale`], with a display name.
pub const LOCALE_CHOICES: [(&str, &str); 7] = [
    ("en", "English (en)"),
    ("de", "German (de)"),
    ("fr", "French (fr)"),
    ("es", "Spanish (es)"),
    ("it", "Italian (it)"),
    ("pt", "Portuguese (pt)"),
    ("nl", "Dutch (nl)"),
];

/// Number locale and decimal separator for a tag such as `de`, `de_DE` or `pt-BR`.
/// Unknown tags fall back to English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    let lang = tag
        .split(['_', '-'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    let locale = match lang.as_str() {
        "de" | "german" => &Locale::de,
        "fr" => &Locale::fr,
        "es" => &Locale::es,
        "it" => &Locale::it,
        "pt" => &Locale::pt,
        "nl" => &Locale::nl,
        _ => return (&Locale::en, '.'),
    };
    (locale, ',')
}

/// Tick label for an already scaled value; fewer decimals for larger numbers.
pub fn fmt_scaled_tick(v: f64, dec_sep: char) -> String {
    let decimals = match v.abs() {
        a if a >= 100.0 => 0,
        a if a >= 10.0 => 1,
        _ => 2,
    };
    let s = format!("{v:.decimals$}");
    if dec_sep == '.' {
        s
    } else {
        s.replace('.', &dec_sep.to_string())
    }
}

/// Width in pixels of the left label area for a `0..y_top` axis with `ticks` labels.
pub fn left_label_area_px(y_top: f64, ticks: usize, font_px: u32) -> u32 {
    let steps = ticks.max(1);
    let widest = (0..=steps)
        .map(|i| y_top * i as f64 / steps as f64)
        .map(|v| estimate_text_width_px(&fmt_scaled_tick(v, '.'), font_px))
        .max()
        .unwrap_or(0);
    // tick marks plus the rotated axis title
    (widest + 18).clamp(48, 140)
}
