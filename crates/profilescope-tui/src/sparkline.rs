// Sparkline rendering utilities
use profilescope_core::ChartSeries;

/// Generate a sparkline visualization using Unicode block characters
/// Characters: ▁ ▂ ▃ ▄ ▅ ▆ ▇ █
pub fn render_sparkline(data: &[f64]) -> String {
    if data.is_empty() {
        return String::new();
    }

    let chars = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
    let max = data.iter().cloned().fold(0.0f64, f64::max);

    if max == 0.0 {
        return "▁".repeat(data.len());
    }

    data.iter()
        .map(|&v| {
            let ratio = (v / max * 7.0).clamp(0.0, 7.0);
            chars[ratio as usize]
        })
        .collect()
}

/// One-line summary of the metrics chart, e.g. `repos █ followers ▅ gists ▁`
pub fn series_sparkline(series: &ChartSeries) -> String {
    let bars: Vec<char> = render_sparkline(&series.values).chars().collect();

    series
        .labels
        .iter()
        .zip(bars)
        .map(|(label, bar)| format!("{} {}", label, bar))
        .collect::<Vec<_>>()
        .join("  ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparkline_rendering() {
        let data = vec![1.0, 2.0, 3.0, 5.0, 8.0, 5.0, 3.0, 2.0];
        let sparkline = render_sparkline(&data);
        assert_eq!(sparkline.chars().count(), 8);
        assert!(sparkline.contains('█'));
    }

    #[test]
    fn test_empty_sparkline() {
        let data: Vec<f64> = vec![];
        assert_eq!(render_sparkline(&data), "");
    }

    #[test]
    fn test_zero_data_sparkline() {
        let data = vec![0.0, 0.0, 0.0];
        assert_eq!(render_sparkline(&data), "▁▁▁");
    }

    #[test]
    fn test_series_sparkline_labels_each_bar() {
        let series = ChartSeries {
            title: "Profile metrics",
            labels: ["Public repos", "Followers", "Public gists"],
            values: [10.0, 0.0, 5.0],
        };
        assert_eq!(
            series_sparkline(&series),
            "Public repos █  Followers ▁  Public gists ▄"
        );
    }
}
