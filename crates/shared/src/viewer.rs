//! The viewer controller: owns the view state, turns user intents into
//! render effects and derives everything the map and legend display.

use crate::calc::{self, MetricRange};
use crate::catalog::{self, DEFAULT_METRIC};
use crate::colors::{Gradient, GradientSet, PaletteName};
use crate::format::format_value;
use crate::legend::LegendContent;
use crate::models::Dataset;
use crate::render::{LayerSpec, Tooltip};

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub palette: PaletteName,
    pub metric: String,
    pub dragging: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            palette: PaletteName::default(),
            metric: DEFAULT_METRIC.to_string(),
            dragging: false,
        }
    }
}

/// A render command for the page, in the order it should be started.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Replace the map layer with a freshly colored one.
    RedrawMap,
    /// Crossfade the legend bar to the current palette, labels untouched.
    CrossfadeLegend,
    /// Run the title animation towards this text.
    AnimateTitle(String),
    /// Fade the legend out, rebuild it for the current metric, fade back in.
    RebuildLegend,
    /// Hide the engine's tooltip element.
    HideTooltip,
}

#[derive(Debug, Clone)]
pub struct Viewer {
    dataset: Dataset,
    gradients: GradientSet,
    state: ViewState,
}

impl Viewer {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            gradients: GradientSet::new(),
            state: ViewState::default(),
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn gradient(&self) -> &Gradient {
        self.gradients.get(self.state.palette)
    }

    pub fn range(&self) -> MetricRange {
        calc::metric_range(&self.dataset, &self.state.metric)
    }

    pub fn fill_colors(&self) -> Vec<[u8; 4]> {
        calc::fill_colors(&self.dataset, &self.state.metric, self.gradient())
    }

    pub fn layer(&self) -> LayerSpec {
        LayerSpec::new(&self.state.metric, self.state.palette, self.fill_colors())
    }

    pub fn legend_content(&self) -> LegendContent {
        LegendContent::from_range(&self.state.metric, self.range())
    }

    pub fn legend_background(&self) -> String {
        self.gradient().css_linear_gradient()
    }

    pub fn title(&self) -> String {
        catalog::title_for(&self.state.metric)
    }

    pub fn select_palette(&mut self, palette: PaletteName) -> Vec<Effect> {
        if palette == self.state.palette {
            return Vec::new();
        }
        self.state.palette = palette;
        vec![Effect::RedrawMap, Effect::CrossfadeLegend]
    }

    pub fn select_metric(&mut self, metric: &str) -> Vec<Effect> {
        if metric == self.state.metric {
            return Vec::new();
        }
        self.state.metric = metric.to_string();
        vec![
            Effect::AnimateTitle(self.title()),
            Effect::RedrawMap,
            Effect::RebuildLegend,
        ]
    }

    pub fn pointer_down(&mut self) -> Vec<Effect> {
        self.state.dragging = true;
        vec![Effect::HideTooltip]
    }

    pub fn pointer_up(&mut self) {
        self.state.dragging = false;
    }

    /// Hover card for the picked feature, if any. Nothing while dragging.
    pub fn tooltip(&self, picked: Option<usize>) -> Option<Tooltip> {
        if self.state.dragging {
            return None;
        }
        let feature = self.dataset.feature(picked?)?;
        Some(Tooltip {
            county: feature.county.clone(),
            metric: self.state.metric.clone(),
            value_text: format_value(feature.value(&self.state.metric)),
        })
    }
}
