use crate::colors::Gradient;
use crate::models::{Dataset, Feature};

/// Alpha channel of every fill color.
pub const FILL_ALPHA: u8 = 255;

/// Observed `[min, max]` of one metric across the dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricRange {
    pub min: f64,
    pub max: f64,
}

impl MetricRange {
    /// Position of `value` within the range: 0 at `min`, 1 at `max`.
    /// A degenerate range (`max == min`) maps everything to 0.
    pub fn normalize(&self, value: f64) -> f64 {
        if self.max == self.min {
            return 0.0;
        }
        (value - self.min) / (self.max - self.min)
    }

    /// Value shown at `position` down the legend (0 = top = max, 1 = bottom = min).
    pub fn value_at(&self, position: f64) -> f64 {
        self.max - (self.max - self.min) * position
    }

    #[cfg(test)]
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Full scan of `metric` over every feature, missing values counted as 0.
/// An empty dataset yields `[0, 0]`.
pub fn metric_range(dataset: &Dataset, metric: &str) -> MetricRange {
    let mut values = dataset.features.iter().map(|f| f.value(metric));
    let Some(first) = values.next() else {
        return MetricRange { min: 0.0, max: 0.0 };
    };
    values.fold(MetricRange { min: first, max: first }, |r, v| MetricRange {
        min: r.min.min(v),
        max: r.max.max(v),
    })
}

/// RGBA fill for one feature.
pub fn fill_color(feature: &Feature, metric: &str, gradient: &Gradient, range: MetricRange) -> [u8; 4] {
    let t = range.normalize(feature.value(metric));
    let [r, g, b] = gradient.sample(t);
    [r, g, b, FILL_ALPHA]
}

/// Fill colors for every feature, in dataset order.
pub fn fill_colors(dataset: &Dataset, metric: &str, gradient: &Gradient) -> Vec<[u8; 4]> {
    let range = metric_range(dataset, metric);
    dataset
        .features
        .iter()
        .map(|f| fill_color(f, metric, gradient, range))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::PaletteName;

    fn two_counties() -> Dataset {
        Dataset::new(vec![
            Feature::with_metrics("A", &[("Population", 100.0), ("Flat", 3.0)]),
            Feature::with_metrics("B", &[("Population", 300.0)]),
        ])
    }

    #[test]
    fn test_range_two_features() {
        let r = metric_range(&two_counties(), "Population");
        assert_eq!(r, MetricRange { min: 100.0, max: 300.0 });
    }

    #[test]
    fn test_range_counts_missing_as_zero() {
        let r = metric_range(&two_counties(), "Flat");
        assert_eq!(r, MetricRange { min: 0.0, max: 3.0 });
    }

    #[test]
    fn test_range_contains_every_value() {
        let ds = Dataset::new(vec![
            Feature::with_metrics("A", &[("Owns", -4.5)]),
            Feature::with_metrics("B", &[("Owns", 12.25)]),
            Feature::with_metrics("C", &[]),
            Feature::with_metrics("D", &[("Owns", 7.0)]),
        ]);
        for metric in ["Owns", "Shanty"] {
            let r = metric_range(&ds, metric);
            assert!(ds.features.iter().all(|f| r.contains(f.value(metric))));
        }
    }

    #[test]
    fn test_range_empty_dataset() {
        let r = metric_range(&Dataset::new(vec![]), "Population");
        assert_eq!(r, MetricRange { min: 0.0, max: 0.0 });
    }

    #[test]
    fn test_normalize_endpoints() {
        let r = MetricRange { min: 100.0, max: 300.0 };
        assert!((r.normalize(100.0) - 0.0).abs() < 1e-9);
        assert!((r.normalize(300.0) - 1.0).abs() < 1e-9);
        assert!((r.normalize(200.0) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_degenerate_range() {
        let r = MetricRange { min: 42.0, max: 42.0 };
        assert_eq!(r.normalize(42.0), 0.0);
    }

    #[test]
    fn test_normalize_within_unit_interval() {
        let r = MetricRange { min: -10.0, max: 30.0 };
        for v in [-10.0, -3.3, 0.0, 12.0, 29.99, 30.0] {
            let n = r.normalize(v);
            assert!((0.0..=1.0).contains(&n), "{v} -> {n}");
        }
    }

    #[test]
    fn test_value_at_positions() {
        let r = MetricRange { min: 100.0, max: 300.0 };
        assert!((r.value_at(0.0) - 300.0).abs() < 1e-9);
        assert!((r.value_at(0.275) - 245.0).abs() < 1e-9);
        assert!((r.value_at(0.5) - 200.0).abs() < 1e-9);
        assert!((r.value_at(0.725) - 155.0).abs() < 1e-9);
        assert!((r.value_at(1.0) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_fill_color_has_opaque_alpha() {
        let ds = two_counties();
        let g = PaletteName::Red.gradient();
        for c in fill_colors(&ds, "Population", &g) {
            assert_eq!(c[3], 255);
        }
    }

    #[test]
    fn test_fill_color_uses_gradient_ends() {
        let ds = two_counties();
        let g = PaletteName::Blue.gradient();
        let colors = fill_colors(&ds, "Population", &g);
        let [r0, g0, b0] = g.sample(0.0);
        let [r1, g1, b1] = g.sample(1.0);
        assert_eq!(colors, vec![[r0, g0, b0, 255], [r1, g1, b1, 255]]);
    }

    #[test]
    fn test_fill_color_deterministic() {
        let ds = two_counties();
        let g = PaletteName::Greyscale.gradient();
        assert_eq!(fill_colors(&ds, "Flat", &g), fill_colors(&ds, "Flat", &g));
    }

    #[test]
    fn test_fill_color_degenerate_range_uses_low_end() {
        let ds = Dataset::new(vec![
            Feature::with_metrics("A", &[("Biogas", 5.0)]),
            Feature::with_metrics("B", &[("Biogas", 5.0)]),
        ]);
        let g = PaletteName::Red.gradient();
        let [r, gr, b] = g.sample(0.0);
        assert!(fill_colors(&ds, "Biogas", &g).iter().all(|c| *c == [r, gr, b, 255]));
    }
}
