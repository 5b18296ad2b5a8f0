//! Plain-text rendering of a dashboard view

use std::fmt::Write;

use impoll_core::{format_value, BoxPlot, ChartData, DashboardView, DensityOverlay, Histogram};

/// Widest histogram bar, in characters
const BAR_WIDTH: usize = 40;

pub fn render_view(view: &DashboardView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}  (N = {})", view.variable_label, view.total);
    out.push('\n');

    match &view.chart {
        ChartData::Empty => out.push_str("No data yet. Submit a value to get started.\n"),
        ChartData::Histogram { histogram, density } => {
            out.push_str(&render_histogram(histogram));
            if let Some(overlay) = density {
                out.push_str(&render_density(overlay));
            }
        }
        ChartData::Boxplot(plot) => out.push_str(&render_boxplot(plot)),
    }

    out.push('\n');
    out.push_str(&render_stats(view));

    if !view.recent.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "Recent: {}", view.recent.join(", "));
    }
    out
}

fn render_histogram(histogram: &Histogram) -> String {
    let max = histogram.max_count().max(1);
    let bins = histogram.bins();
    let labels: Vec<String> = bins
        .iter()
        .enumerate()
        .map(|(i, bin)| {
            let close = if i + 1 == bins.len() { ']' } else { ')' };
            format!(
                "[{}, {}{}",
                format_value(Some(bin.lower), 2),
                format_value(Some(bin.upper), 2),
                close
            )
        })
        .collect();
    let label_width = labels.iter().map(|l| l.len()).max().unwrap_or(0);

    let mut out = String::new();
    for (label, bin) in labels.iter().zip(&bins) {
        let bar = "#".repeat(bin.count * BAR_WIDTH / max);
        let _ = writeln!(out, "{label:>label_width$} {bar} {}", bin.count);
    }
    out
}

fn render_density(overlay: &DensityOverlay) -> String {
    let peak_at = overlay
        .xs
        .iter()
        .zip(&overlay.ys)
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(&x, _)| x);
    format!(
        "Density peak {} at {}\n",
        format_value(Some(overlay.peak()), 2),
        format_value(peak_at, 2)
    )
}

fn render_boxplot(plot: &BoxPlot) -> String {
    let s = &plot.summary;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "min {} | Q1 {} | median {} | Q3 {} | max {}",
        format_value(Some(s.min), 2),
        format_value(Some(s.q1), 2),
        format_value(Some(s.median), 2),
        format_value(Some(s.q3), 2),
        format_value(Some(s.max), 2),
    );
    let _ = writeln!(
        out,
        "whiskers {} .. {}",
        format_value(Some(plot.whisker_low), 2),
        format_value(Some(plot.whisker_high), 2),
    );
    if plot.has_outliers() {
        let outliers: Vec<String> = plot
            .outliers
            .iter()
            .map(|&v| format_value(Some(v), 2))
            .collect();
        let _ = writeln!(out, "outliers {}", outliers.join(", "));
    }
    out
}

fn render_stats(view: &DashboardView) -> String {
    let width = view
        .stat_rows
        .iter()
        .map(|(stat, _)| stat.label().len())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for (stat, value) in &view.stat_rows {
        let _ = writeln!(out, "{:<width$}  {}", stat.label(), value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use impoll_core::{ChartKind, Dashboard, SqliteValueStore, ViewOptions};

    fn view_of(values: &[f64], options: &ViewOptions) -> DashboardView {
        let dash = Dashboard::new(Arc::new(SqliteValueStore::open_in_memory().unwrap()));
        for &v in values {
            dash.submit_value(v).unwrap();
        }
        dash.view(options).unwrap()
    }

    #[test]
    fn test_empty_view_prompts_for_data() {
        let text = render_view(&view_of(&[], &ViewOptions::default()));
        assert!(text.starts_with("Hours of sleep  (N = 0)"));
        assert!(text.contains("No data yet"));
        assert!(text.contains("—"));
        assert!(!text.contains("Recent:"));
    }

    #[test]
    fn test_histogram_view() {
        let text = render_view(&view_of(&[4.0, 5.0, 6.0, 7.0, 8.0], &ViewOptions::default()));
        assert!(text.contains("[4, 4.27)"));
        assert!(text.contains("[7.73, 8]"));
        assert!(text.contains("SD"));
        assert!(text.contains("1.58"));
        assert!(text.contains("Recent: 8, 7, 6, 5, 4"));
    }

    #[test]
    fn test_density_line_only_when_requested() {
        let data = [1.0, 2.0, 2.0, 3.0];
        let mut options = ViewOptions::default();
        assert!(!render_view(&view_of(&data, &options)).contains("Density peak"));

        options.chart.show_density = true;
        assert!(render_view(&view_of(&data, &options)).contains("Density peak 2 at"));
    }

    #[test]
    fn test_boxplot_view_lists_outliers() {
        let mut options = ViewOptions::default();
        options.chart.kind = ChartKind::Boxplot;
        let text = render_view(&view_of(&[1.0, 2.0, 3.0, 4.0, 100.0], &options));
        assert!(text.contains("min 1 | Q1 2 | median 3 | Q3 4 | max 100"));
        assert!(text.contains("whiskers 1 .. 4"));
        assert!(text.contains("outliers 100"));
    }
}
