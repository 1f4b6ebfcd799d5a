//! Props handed to the map engine, as serializable values.
//!
//! Field names follow the engine's camelCase prop names so these can be
//! converted straight to JS objects.

use serde::Serialize;

use crate::colors::PaletteName;

/// Element the engine mounts its canvas into.
pub const MAP_CONTAINER_ID: &str = "map-container";

/// Camera position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
    pub max_zoom: f64,
    pub pitch: f64,
    pub bearing: f64,
}

impl Default for ViewPoint {
    /// Centred on Kenya.
    fn default() -> Self {
        Self {
            latitude: 0.5,
            longitude: 37.5,
            zoom: 5.2,
            max_zoom: 16.0,
            pitch: 0.0,
            bearing: 0.0,
        }
    }
}

/// Constructor props for the engine instance. Callbacks and layers are attached separately.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckProps {
    pub container: &'static str,
    pub initial_view_state: ViewPoint,
    pub controller: bool,
}

impl Default for DeckProps {
    fn default() -> Self {
        Self {
            container: MAP_CONTAINER_ID,
            initial_view_state: ViewPoint::default(),
            controller: true,
        }
    }
}

/// Static styling of the county layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerStyle {
    pub id: &'static str,
    pub pickable: bool,
    pub stroked: bool,
    pub filled: bool,
    pub extruded: bool,
    pub line_width_scale: f64,
    pub line_width_min_pixels: f64,
    pub get_line_color: [u8; 4],
    pub get_line_width: f64,
}

impl Default for LayerStyle {
    fn default() -> Self {
        Self {
            id: "geojson",
            pickable: true,
            stroked: true,
            filled: true,
            extruded: false,
            line_width_scale: 1.0,
            line_width_min_pixels: 1.0,
            get_line_color: [80, 80, 80, 255],
            get_line_width: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTriggers {
    pub get_fill_color: (String, String),
}

/// One full rebuild of the county layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSpec {
    pub style: LayerStyle,
    pub update_triggers: UpdateTriggers,
    /// RGBA per feature, indexed like the dataset.
    pub fill_colors: Vec<[u8; 4]>,
}

impl LayerSpec {
    pub fn new(metric: &str, palette: PaletteName, fill_colors: Vec<[u8; 4]>) -> Self {
        Self {
            style: LayerStyle::default(),
            update_triggers: UpdateTriggers {
                get_fill_color: (metric.to_string(), palette.as_str().to_string()),
            },
            fill_colors,
        }
    }

    /// Fill for the engine's feature `index`; transparent when out of range.
    pub fn fill_color_at(&self, index: usize) -> [u8; 4] {
        self.fill_colors.get(index).copied().unwrap_or([0, 0, 0, 0])
    }

    /// Serializable layer props. `data` and the fill accessor are attached by the caller.
    pub fn props(&self) -> LayerProps<'_> {
        LayerProps {
            style: &self.style,
            update_triggers: &self.update_triggers,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerProps<'a> {
    #[serde(flatten)]
    pub style: &'a LayerStyle,
    pub update_triggers: &'a UpdateTriggers,
}

/// Hover card for one county.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub county: String,
    pub metric: String,
    pub value_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipStyle {
    pub background_color: &'static str,
    pub box_shadow: &'static str,
}

/// What the engine's `getTooltip` callback returns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipPayload {
    pub html: String,
    pub style: TooltipStyle,
}

impl Tooltip {
    pub fn html(&self) -> String {
        format!(
            "<div style=\"background: rgba(255,255,255,0.8); padding: 5px; border-radius: 5px;\">\
             <strong>County:</strong> {}<br/><strong>{}:</strong> {}</div>",
            escape_html(&self.county),
            escape_html(&self.metric),
            escape_html(&self.value_text),
        )
    }

    /// The card draws its own background, so the engine's container stays invisible.
    pub fn payload(&self) -> TooltipPayload {
        TooltipPayload {
            html: self.html(),
            style: TooltipStyle {
                background_color: "transparent",
                box_shadow: "none",
            },
        }
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_view_point_props() {
        let v = serde_json::to_value(ViewPoint::default()).unwrap();
        assert_eq!(
            v,
            json!({
                "latitude": 0.5,
                "longitude": 37.5,
                "zoom": 5.2,
                "maxZoom": 16.0,
                "pitch": 0.0,
                "bearing": 0.0,
            })
        );
    }

    #[test]
    fn test_deck_props() {
        let v = serde_json::to_value(DeckProps::default()).unwrap();
        assert_eq!(v["container"], "map-container");
        assert_eq!(v["controller"], true);
        assert_eq!(v["initialViewState"]["zoom"], 5.2);
    }

    #[test]
    fn test_layer_props_flatten_style() {
        let layer = LayerSpec::new("Flat", PaletteName::Blue, vec![[1, 2, 3, 255]]);
        let v = serde_json::to_value(layer.props()).unwrap();
        assert_eq!(v["id"], "geojson");
        assert_eq!(v["pickable"], true);
        assert_eq!(v["extruded"], false);
        assert_eq!(v["lineWidthMinPixels"], 1.0);
        assert_eq!(v["getLineColor"], json!([80, 80, 80, 255]));
        assert!(v.get("data").is_none());
        assert_eq!(v["updateTriggers"]["getFillColor"], json!(["Flat", "blue"]));
        assert!(v.get("fillColors").is_none());
    }

    #[test]
    fn test_fill_color_at() {
        let layer = LayerSpec::new("Flat", PaletteName::Red, vec![[9, 8, 7, 255]]);
        assert_eq!(layer.fill_color_at(0), [9, 8, 7, 255]);
        assert_eq!(layer.fill_color_at(5), [0, 0, 0, 0]);
    }

    #[test]
    fn test_tooltip_html() {
        let t = Tooltip {
            county: "Nairobi".into(),
            metric: "Population".into(),
            value_text: "4,400,000".into(),
        };
        let html = t.html();
        assert!(html.contains("<strong>County:</strong> Nairobi"));
        assert!(html.contains("<strong>Population:</strong> 4,400,000"));
        assert!(html.contains("border-radius: 5px"));
    }

    #[test]
    fn test_tooltip_escapes_markup() {
        let t = Tooltip {
            county: "<b>Tana & River</b>".into(),
            metric: "Owns".into(),
            value_text: "1".into(),
        };
        assert!(t.html().contains("&lt;b&gt;Tana &amp; River&lt;/b&gt;"));
    }

    #[test]
    fn test_tooltip_payload_style() {
        let t = Tooltip {
            county: "Lamu".into(),
            metric: "Flat".into(),
            value_text: "0".into(),
        };
        let v = serde_json::to_value(t.payload()).unwrap();
        assert_eq!(v["style"], json!({"backgroundColor": "transparent", "boxShadow": "none"}));
    }
}
