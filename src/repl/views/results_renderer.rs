//! # Results Renderer
//!
//! Pure formatting of a simulation result: the two metric lines, a
//! horizontal bar chart for the terminal and a serializable chart
//! description. Nothing here mutates state or touches the terminal.
//!
//! Missing metrics are shown as `n/a` so a malformed response can never
//! break rendering.

use crate::repl::models::SimulationResult;
use crossterm::style::Color;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

pub const QUEUE_LENGTH_LABEL: &str = "Average Queue Length (L)";
pub const WAIT_TIME_LABEL: &str = "Average Wait Time (W)";
pub const CHART_TITLE: &str = "Queue Simulation Results";
pub const SERIES_LABEL: &str = "Simulation Results";

const MISSING_VALUE: &str = "n/a";
const BAR_GLYPH: char = '█';

/// Format a metric for display, rounded to two decimals
pub fn format_metric(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{v:.2}"),
        None => MISSING_VALUE.to_string(),
    }
}

/// The two summary lines shown above the chart
pub fn metric_lines(result: &SimulationResult) -> [String; 2] {
    [
        format!(
            "{QUEUE_LENGTH_LABEL}: {}",
            format_metric(result.average_queue_length)
        ),
        format!(
            "{WAIT_TIME_LABEL}: {}",
            format_metric(result.average_wait_time)
        ),
    ]
}

/// RGBA color as used by the chart styling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(self) -> Self {
        Self::new(self.r, self.g, self.b, 1.0)
    }

    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }

    pub fn terminal_color(&self) -> Color {
        Color::Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }
}

pub const QUEUE_LENGTH_COLOR: Rgba = Rgba::new(75, 192, 192, 0.6);
pub const WAIT_TIME_COLOR: Rgba = Rgba::new(255, 99, 132, 0.6);

/// One category of the chart
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: &'static str,
    /// Raw, unrounded value
    pub value: Option<f64>,
    pub color: Rgba,
}

/// One rendered chart row, split so the caller can color the bar
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRow {
    pub label: String,
    pub bar: String,
    pub value: String,
    pub color: Rgba,
}

impl ChartRow {
    pub fn to_plain_string(&self) -> String {
        format!("{} │{} {}", self.label, self.bar, self.value)
    }
}

/// Bar chart of the two metrics with a zero-based value axis
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: &'static str,
    pub series_label: &'static str,
    pub bars: Vec<Bar>,
}

impl BarChart {
    pub fn from_result(result: &SimulationResult) -> Self {
        Self {
            title: CHART_TITLE,
            series_label: SERIES_LABEL,
            bars: vec![
                Bar {
                    label: QUEUE_LENGTH_LABEL,
                    value: result.average_queue_length,
                    color: QUEUE_LENGTH_COLOR,
                },
                Bar {
                    label: WAIT_TIME_LABEL,
                    value: result.average_wait_time,
                    color: WAIT_TIME_COLOR,
                },
            ],
        }
    }

    /// Upper end of the value axis; the lower end is always zero
    pub fn axis_max(&self) -> f64 {
        let max = self
            .bars
            .iter()
            .filter_map(|bar| bar.value)
            .filter(|v| v.is_finite())
            .fold(0.0_f64, f64::max);
        if max > 0.0 {
            max
        } else {
            1.0
        }
    }

    /// Number of glyphs for `value` on an axis `span` glyphs long
    pub fn bar_length(&self, value: Option<f64>, span: usize) -> usize {
        match value {
            Some(v) if v.is_finite() && v > 0.0 => {
                ((v / self.axis_max()) * span as f64).round() as usize
            }
            _ => 0,
        }
    }

    fn label_width(&self) -> usize {
        self.bars
            .iter()
            .map(|bar| UnicodeWidthStr::width(bar.label))
            .max()
            .unwrap_or(0)
    }

    fn value_text(value: Option<f64>) -> String {
        value
            .map(|v| v.to_string())
            .unwrap_or_else(|| MISSING_VALUE.to_string())
    }

    /// Width available for bars when the chart is `width` columns wide
    pub fn bar_span(&self, width: usize) -> usize {
        let value_width = self
            .bars
            .iter()
            .map(|bar| Self::value_text(bar.value).len())
            .max()
            .unwrap_or(0);
        // label, " │", bar, " ", value
        width
            .saturating_sub(self.label_width() + 2 + 1 + value_width)
            .max(1)
    }

    /// Rows of the chart body, one per category
    pub fn rows(&self, width: usize) -> Vec<ChartRow> {
        let label_width = self.label_width();
        let span = self.bar_span(width);

        self.bars
            .iter()
            .map(|bar| {
                let padding = label_width - UnicodeWidthStr::width(bar.label);
                ChartRow {
                    label: format!("{}{}", bar.label, " ".repeat(padding)),
                    bar: BAR_GLYPH.to_string().repeat(self.bar_length(bar.value, span)),
                    value: Self::value_text(bar.value),
                    color: bar.color,
                }
            })
            .collect()
    }

    /// Axis line and its zero / max tick labels
    pub fn axis_lines(&self, width: usize) -> [String; 2] {
        let indent = " ".repeat(self.label_width() + 1);
        let span = self.bar_span(width);
        let max_label = self.axis_max().to_string();
        let gap = (span + 1).saturating_sub(1 + max_label.len()).max(1);
        [
            format!("{indent}└{}", "─".repeat(span)),
            format!("{indent}0{}{max_label}", " ".repeat(gap)),
        ]
    }

    /// Plain-text rendering of the whole chart
    pub fn render(&self, width: usize) -> Vec<String> {
        let mut lines = vec![
            self.title.to_string(),
            format!("■ {}", self.series_label),
        ];
        lines.extend(self.rows(width).iter().map(ChartRow::to_plain_string));
        lines.extend(self.axis_lines(width));
        lines
    }
}

/// Serializable chart description for external plotting tools
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub title: String,
    pub labels: Vec<String>,
    pub datasets: Vec<DatasetSpec>,
    pub y_axis: AxisSpec,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSpec {
    pub label: String,
    pub data: Vec<Option<f64>>,
    pub background_color: Vec<String>,
    pub border_color: Vec<String>,
    pub border_width: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisSpec {
    pub begin_at_zero: bool,
}

impl ChartSpec {
    pub fn from_result(result: &SimulationResult) -> Self {
        let chart = BarChart::from_result(result);
        Self {
            title: chart.title.to_string(),
            labels: chart.bars.iter().map(|b| b.label.to_string()).collect(),
            datasets: vec![DatasetSpec {
                label: chart.series_label.to_string(),
                data: chart.bars.iter().map(|b| b.value).collect(),
                background_color: chart.bars.iter().map(|b| b.color.css()).collect(),
                border_color: chart.bars.iter().map(|b| b.color.opaque().css()).collect(),
                border_width: 1,
            }],
            y_axis: AxisSpec {
                begin_at_zero: true,
            },
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn metric_lines_should_round_to_two_decimals() {
        let result = SimulationResult::new(3.456, 1.234);

        assert_eq!(
            metric_lines(&result),
            [
                "Average Queue Length (L): 3.46".to_string(),
                "Average Wait Time (W): 1.23".to_string(),
            ]
        );
    }

    #[test]
    fn metric_lines_should_show_placeholder_for_missing_values() {
        let result = SimulationResult {
            average_queue_length: None,
            average_wait_time: Some(2.0),
        };

        let [queue, wait] = metric_lines(&result);
        assert_eq!(queue, "Average Queue Length (L): n/a");
        assert_eq!(wait, "Average Wait Time (W): 2.00");
    }

    #[test]
    fn chart_should_keep_raw_values() {
        let chart = BarChart::from_result(&SimulationResult::new(3.456, 1.234));

        assert_eq!(chart.bars[0].label, "Average Queue Length (L)");
        assert_eq!(chart.bars[0].value, Some(3.456));
        assert_eq!(chart.bars[1].label, "Average Wait Time (W)");
        assert_eq!(chart.bars[1].value, Some(1.234));
    }

    #[test]
    fn bars_should_scale_from_zero() {
        let chart = BarChart::from_result(&SimulationResult::new(4.0, 1.0));

        assert_eq!(chart.axis_max(), 4.0);
        assert_eq!(chart.bar_length(Some(4.0), 40), 40);
        assert_eq!(chart.bar_length(Some(1.0), 40), 10);
        assert_eq!(chart.bar_length(Some(-2.0), 40), 0);
        assert_eq!(chart.bar_length(None, 40), 0);
    }

    #[test]
    fn chart_of_zeros_should_not_divide_by_zero() {
        let chart = BarChart::from_result(&SimulationResult::new(0.0, 0.0));

        assert_eq!(chart.axis_max(), 1.0);
        assert!(chart.rows(60).iter().all(|row| row.bar.is_empty()));
    }

    #[test]
    fn render_should_produce_title_legend_rows_and_axis() {
        let chart = BarChart::from_result(&SimulationResult::new(2.0, 1.0));

        let lines = chart.render(60);

        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "Queue Simulation Results");
        assert_eq!(lines[1], "■ Simulation Results");
        assert!(lines[2].starts_with("Average Queue Length (L) │█"));
        assert!(lines[2].ends_with(" 2"));
        assert!(lines[3].starts_with("Average Wait Time (W)    │█"));
        assert!(lines[4].contains('└'));
        assert!(lines[5].trim_start().starts_with('0'));
    }

    #[test]
    fn render_should_survive_missing_metric() {
        let chart = BarChart::from_result(&SimulationResult {
            average_queue_length: Some(1.5),
            average_wait_time: None,
        });

        let rows = chart.rows(50);
        assert_eq!(rows[1].bar, "");
        assert_eq!(rows[1].value, "n/a");
    }

    #[test]
    fn chart_spec_should_describe_styling() {
        let spec = ChartSpec::from_result(&SimulationResult::new(3.456, 1.234));

        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(
            value,
            json!({
                "title": "Queue Simulation Results",
                "labels": ["Average Queue Length (L)", "Average Wait Time (W)"],
                "datasets": [{
                    "label": "Simulation Results",
                    "data": [3.456, 1.234],
                    "backgroundColor": ["rgba(75, 192, 192, 0.6)", "rgba(255, 99, 132, 0.6)"],
                    "borderColor": ["rgba(75, 192, 192, 1)", "rgba(255, 99, 132, 1)"],
                    "borderWidth": 1
                }],
                "yAxis": { "beginAtZero": true }
            })
        );
    }
}
