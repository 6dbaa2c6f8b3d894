//! Text measurement and truncation for axis labels.

/// Heuristic: estimate pixel width of text (Plotters has no built-in text measuring).
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    ((text.chars().count() as f32) * (font_px as f32) * 0.60).ceil() as u32
}

/// Truncate to fit `max_px` and add a single ellipsis if needed.
pub fn truncate_to_width(text: &str, font_px: u32, max_px: u32) -> String {
    if estimate_text_width_px(text, font_px) <= max_px {
        return text.to_string();
    }
    let mut out = String::new();
    for ch in text.chars() {
        let candidate = format!("{out}{ch}…");
        if estimate_text_width_px(&candidate, font_px) > max_px {
            break;
        }
        out.push(ch);
    }
    if out.is_empty() {
        // Not even one character fits; keep the first so the bar stays identifiable.
        return text.chars().take(1).collect();
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_labels_are_untouched() {
        assert_eq!(truncate_to_width("Go", 12, 100), "Go");
    }

    #[test]
    fn long_labels_get_one_ellipsis() {
        // 12px font: ~7.2px per char, 40px fits 5 chars including the ellipsis
        let t = truncate_to_width("JavaScript", 12, 40);
        assert!(t.ends_with('…'));
        assert_eq!(t.chars().filter(|c| *c == '…').count(), 1);
        assert!(estimate_text_width_px(&t, 12) <= 40);
        assert_eq!(truncate_to_width("JavaScript", 12, 2), "J");
    }
}
