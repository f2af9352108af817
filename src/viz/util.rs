//! Utility functions for visualization: locale mapping, tick formatting, label density, clipping.

use num_format::{Locale, ToFormattedString};

use super::text::estimate_text_width_px;

/// Map a user-provided locale tag to a `num_format::Locale`.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> &'static Locale {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => &Locale::de,
        "fr" | "fr_fr" => &Locale::fr,
        "es" | "es_es" => &Locale::es,
        "it" | "it_it" => &Locale::it,
        "pt" | "pt_pt" | "pt_br" => &Locale::pt,
        "nl" | "nl_nl" => &Locale::nl,
        _ => &Locale::en, // default
    }
}

/// Count tick label: whole number with locale thousands separators.
pub fn format_count(v: f64, locale: &Locale) -> String {
    (v.round() as i64).to_formatted_string(locale)
}

/// Label text for an x tick: the label at an integral index, nothing between labels.
pub fn label_at<'a>(labels: &'a [String], x: f64) -> &'a str {
    let i = x.round();
    if (x - i).abs() > 1e-6 || i < 0.0 {
        return "";
    }
    labels.get(i as usize).map(String::as_str).unwrap_or("")
}

/// How many x labels fit into `plot_width_px` without overlapping.
pub fn x_label_count(labels: &[String], visible: usize, plot_width_px: u32, font_px: u32) -> usize {
    let widest = labels
        .iter()
        .map(|l| estimate_text_width_px(l, font_px))
        .max()
        .unwrap_or(0);
    let slot = (widest + 16).max(1);
    let fit = (plot_width_px / slot) as usize;
    fit.clamp(2, visible.max(2))
}

/// Compute a tight left label area width for the Y axis (in pixels),
/// based on the formatted tick labels that will appear.
///
/// Returns a width clamped to a sensible range to avoid extremes.
pub fn compute_left_label_area_px(
    ymin: f64,
    ymax: f64,
    ticks: usize,
    font_px: u32,
    locale: &Locale,
) -> u32 {
    let mut max_px = 0u32;
    // Sample the same number of tick positions as requested from Plotters.
    for i in 0..=ticks {
        let t = if ticks == 0 {
            0.0
        } else {
            i as f64 / ticks as f64
        };
        let v = ymin + (ymax - ymin) * t;
        max_px = max_px.max(estimate_text_width_px(&format_count(v, locale), font_px));
    }
    // Padding for tick marks and the axis description.
    max_px.saturating_add(34).clamp(56, 160)
}

/// Cut a polyline (sorted by x) to `[x_min, x_max]`, interpolating the crossing points.
pub fn clip_polyline(points: &[(f64, f64)], x_min: f64, x_max: f64) -> Vec<(f64, f64)> {
    let lerp = |a: (f64, f64), b: (f64, f64), x: f64| {
        let t = (x - a.0) / (b.0 - a.0);
        (x, a.1 + t * (b.1 - a.1))
    };
    let inside = |p: &(f64, f64)| p.0 >= x_min && p.0 <= x_max;

    let mut out = Vec::new();
    for (i, p) in points.iter().enumerate() {
        if inside(p) {
            if let Some(prev) = i.checked_sub(1).map(|j| points[j])
                && prev.0 < x_min
            {
                out.push(lerp(prev, *p, x_min));
            }
            out.push(*p);
            if let Some(next) = points.get(i + 1)
                && next.0 > x_max
            {
                out.push(lerp(*p, *next, x_max));
            }
        } else if let Some(next) = points.get(i + 1)
            && p.0 < x_min
            && next.0 > x_max
        {
            // segment spans the whole window
            out.push(lerp(*p, *next, x_min));
            out.push(lerp(*p, *next, x_max));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_counts_per_locale() {
        assert_eq!(format_count(30000.0, map_locale("en")), "30,000");
        assert_eq!(format_count(30000.0, map_locale("de")), "30.000");
    }

    #[test]
    fn labels_only_on_integral_positions() {
        let labels = vec!["a".to_string(), "b".to_string()];
        assert_eq!(label_at(&labels, 1.0), "b");
        assert_eq!(label_at(&labels, 0.5), "");
        assert_eq!(label_at(&labels, 2.0), "");
        assert_eq!(label_at(&labels, -1.0), "");
    }

    #[test]
    fn clip_interpolates_edges() {
        let pts = vec![(0.0, 0.0), (1.0, 10.0), (2.0, 20.0), (3.0, 30.0)];
        let c = clip_polyline(&pts, 0.5, 2.5);
        assert_eq!(c, vec![(0.5, 5.0), (1.0, 10.0), (2.0, 20.0), (2.5, 25.0)]);

        let spanning = clip_polyline(&pts[..2], 0.25, 0.75);
        assert_eq!(spanning, vec![(0.25, 2.5), (0.75, 7.5)]);
    }
}
