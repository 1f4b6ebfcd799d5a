use crate::calc::{metric_range, MetricRange};
use crate::catalog;
use crate::format::format_value;
use crate::models::Dataset;

/// Relative label positions from the top (max) to the bottom (min) of the color bar.
pub const LABEL_POSITIONS: [f64; 5] = [0.0, 0.275, 0.5, 0.725, 1.0];

/// Vertical nudge applied to every label, in pixels.
const LABEL_LIFT_PX: i32 = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct LegendLabel {
    pub position: f64,
    pub value: f64,
    pub text: String,
}

impl LegendLabel {
    pub fn top_css(&self) -> String {
        format!("{}%", self.position * 100.0)
    }

    /// The top label hangs below its anchor, the bottom one sits above it,
    /// the rest are centred on it.
    pub fn transform_css(&self) -> String {
        let anchor = if self.position == 0.0 {
            "0%"
        } else if self.position == 1.0 {
            "-100%"
        } else {
            "-50%"
        };
        format!("translateY({anchor}) translateY(-{LABEL_LIFT_PX}px)")
    }
}

/// Everything the legend shows apart from the gradient itself.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LegendContent {
    pub metric: String,
    pub offset_px: u32,
    pub labels: Vec<LegendLabel>,
}

impl LegendContent {
    pub fn build(dataset: &Dataset, metric: &str) -> Self {
        Self::from_range(metric, metric_range(dataset, metric))
    }

    pub fn from_range(metric: &str, range: MetricRange) -> Self {
        let labels = LABEL_POSITIONS
            .iter()
            .map(|&position| {
                let value = range.value_at(position);
                LegendLabel {
                    position,
                    value,
                    text: format_value(value),
                }
            })
            .collect();
        Self {
            metric: metric.to_string(),
            offset_px: catalog::legend_offset_px(metric),
            labels,
        }
    }

    pub fn transform_css(&self) -> String {
        format!("translateX({}px)", self.offset_px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Feature;

    fn two_counties() -> Dataset {
        Dataset::new(vec![
            Feature::with_metrics("A", &[("Population", 100.0)]),
            Feature::with_metrics("B", &[("Population", 300.0)]),
        ])
    }

    #[test]
    fn test_labels_run_from_max_to_min() {
        let legend = LegendContent::build(&two_counties(), "Population");
        let values: Vec<f64> = legend.labels.iter().map(|l| l.value).collect();
        let expected = [300.0, 245.0, 200.0, 155.0, 100.0];
        for (v, e) in values.iter().zip(expected) {
            assert!((v - e).abs() < 1e-9, "{v} != {e}");
        }
    }

    #[test]
    fn test_label_text_two_significant_digits() {
        let legend = LegendContent::build(&two_counties(), "Population");
        let texts: Vec<&str> = legend.labels.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["300", "250", "200", "160", "100"]);
    }

    #[test]
    fn test_zero_label_is_plain_zero() {
        let legend = LegendContent::build(&two_counties(), "Shanty");
        assert!(legend.labels.iter().all(|l| l.text == "0"));
    }

    #[test]
    fn test_offset_comes_from_catalog() {
        assert_eq!(LegendContent::build(&two_counties(), "Firewood").offset_px, 8);
        assert_eq!(
            LegendContent::build(&two_counties(), "Firewood").transform_css(),
            "translateX(8px)"
        );
    }

    #[test]
    fn test_label_transforms() {
        let legend = LegendContent::build(&two_counties(), "Population");
        let transforms: Vec<String> = legend.labels.iter().map(|l| l.transform_css()).collect();
        assert_eq!(transforms[0], "translateY(0%) translateY(-2px)");
        assert_eq!(transforms[2], "translateY(-50%) translateY(-2px)");
        assert_eq!(transforms[4], "translateY(-100%) translateY(-2px)");
    }

    #[test]
    fn test_label_tops() {
        let legend = LegendContent::build(&two_counties(), "Population");
        assert_eq!(legend.labels[0].top_css(), "0%");
        assert_eq!(legend.labels[2].top_css(), "50%");
        assert_eq!(legend.labels[4].top_css(), "100%");
    }
}
