//! Horizontal bar charts for the terminal report.

use unicode_width::UnicodeWidthStr;

/// Configuration controlling visual appearance of a bar chart.
pub struct BarChartConfig {
    /// Width in terminal columns of the bar portion (excluding label and value).
    pub width: usize,
    /// Character used for the filled portion of a bar.
    pub filled_char: char,
    /// Character used for the empty portion of a bar.
    pub empty_char: char,
}

impl Default for BarChartConfig {
    fn default() -> Self {
        Self {
            width: 40,
            filled_char: '\u{2588}', // █  FULL BLOCK
            empty_char: '\u{2591}',  // ░  LIGHT SHADE
        }
    }
}

/// Horizontal bar chart where every bar is scaled against the largest value.
///
/// Renders one line per entry: the label padded to a common width, the bar,
/// then the value formatted by the supplied formatter.
pub struct BarChart<'a> {
    labels: &'a [String],
    values: &'a [f64],
    config: BarChartConfig,
}

impl<'a> BarChart<'a> {
    /// Construct a chart over parallel label/value slices.
    pub fn new(labels: &'a [String], values: &'a [f64]) -> Self {
        Self {
            labels,
            values,
            config: BarChartConfig::default(),
        }
    }

    pub fn with_config(mut self, config: BarChartConfig) -> Self {
        self.config = config;
        self
    }

    /// Render the chart, formatting each value with `format_value`.
    ///
    /// Returns one string per bar; an empty vec when there is no data.
    pub fn to_lines(&self, format_value: impl Fn(f64) -> String) -> Vec<String> {
        let label_width = self
            .labels
            .iter()
            .map(|l| UnicodeWidthStr::width(l.as_str()))
            .max()
            .unwrap_or(0);

        // All bars share one scale so lengths are comparable across rows.
        let max_value = self.values.iter().copied().fold(0.0_f64, f64::max);

        self.labels
            .iter()
            .zip(self.values)
            .map(|(label, value)| {
                let filled = if max_value > 0.0 {
                    ((value / max_value) * self.config.width as f64).round() as usize
                } else {
                    0
                };
                let filled = filled.min(self.config.width);
                let empty = self.config.width - filled;

                let pad = label_width - UnicodeWidthStr::width(label.as_str());
                let mut line = String::new();
                line.push_str(label);
                line.extend(std::iter::repeat(' ').take(pad + 2));
                line.extend(std::iter::repeat(self.config.filled_char).take(filled));
                line.extend(std::iter::repeat(self.config.empty_char).take(empty));
                line.push(' ');
                line.push_str(&format_value(*value));
                line
            })
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_largest_value_fills_the_full_width() {
        let labels = labels(&["A", "B"]);
        let values = [100.0, 50.0];
        let lines = BarChart::new(&labels, &values).to_lines(|v| format!("{v}"));

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].matches('\u{2588}').count(), 40);
        assert_eq!(lines[1].matches('\u{2588}').count(), 20);
        assert_eq!(lines[1].matches('\u{2591}').count(), 20);
    }

    #[test]
    fn test_labels_padded_to_common_width() {
        let labels = labels(&["A", "Mandalay"]);
        let values = [1.0, 1.0];
        let lines = BarChart::new(&labels, &values).to_lines(|v| format!("{v}"));

        let bar_start = |line: &str| line.find('\u{2588}').unwrap();
        assert_eq!(bar_start(&lines[0]), bar_start(&lines[1]));
    }

    #[test]
    fn test_all_zero_values_render_empty_bars() {
        let labels = labels(&["A"]);
        let values = [0.0];
        let lines = BarChart::new(&labels, &values).to_lines(|v| format!("{v}"));

        assert_eq!(lines[0].matches('\u{2588}').count(), 0);
        assert_eq!(lines[0].matches('\u{2591}').count(), 40);
    }

    #[test]
    fn test_no_data_renders_nothing() {
        let labels: Vec<String> = vec![];
        let values: [f64; 0] = [];
        let lines = BarChart::new(&labels, &values).to_lines(|v| format!("{v}"));
        assert!(lines.is_empty());
    }

    #[test]
    fn test_custom_width() {
        let labels = labels(&["A"]);
        let values = [10.0];
        let config = BarChartConfig {
            width: 10,
            ..Default::default()
        };
        let lines = BarChart::new(&labels, &values)
            .with_config(config)
            .to_lines(|v| format!("{v}"));
        assert_eq!(lines[0].matches('\u{2588}').count(), 10);
    }

    #[test]
    fn test_value_formatter_applied() {
        let labels = labels(&["A"]);
        let values = [1234.5];
        let lines = BarChart::new(&labels, &values).to_lines(|v| format!("${v:.2}"));
        assert!(lines[0].ends_with("$1234.50"));
    }
}
