use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Property key holding the county name on every feature.
pub const COUNTY_PROPERTY: &str = "county";

/// Why the dataset could not be loaded. Every variant is terminal for the session.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error("invalid map data: {0}")]
    Parse(String),
    #[error("invalid data format: missing geojson data")]
    MissingGeoJson,
}

/// Top-level shape of `county_map_data.json`.
#[derive(Debug, Deserialize)]
struct DataFile {
    #[serde(default)]
    geojson: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawCollection {
    features: Vec<RawFeature>,
}

#[derive(Debug, Deserialize)]
struct RawFeature {
    #[serde(default)]
    geometry: Value,
    #[serde(default)]
    properties: Option<Map<String, Value>>,
}

/// One county: geometry passed through untouched plus its metric values.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub county: String,
    pub geometry: Value,
    properties: Map<String, Value>,
}

impl Feature {
    #[cfg(test)]
    pub fn new(county: impl Into<String>, geometry: Value, properties: Map<String, Value>) -> Self {
        Self {
            county: county.into(),
            geometry,
            properties,
        }
    }

    /// Build a feature with no geometry from `(metric, value)` pairs.
    #[cfg(test)]
    pub fn with_metrics(county: &str, metrics: &[(&str, f64)]) -> Self {
        let properties = metrics
            .iter()
            .map(|(name, value)| (name.to_string(), Value::from(*value)))
            .collect();
        Self::new(county, Value::Null, properties)
    }

    /// Value of `metric`, reading absent, null or non-numeric entries as 0.
    pub fn value(&self, metric: &str) -> f64 {
        self.properties
            .get(metric)
            .and_then(Value::as_f64)
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }
}

impl From<RawFeature> for Feature {
    fn from(raw: RawFeature) -> Self {
        let properties = raw.properties.unwrap_or_default();
        let county = properties
            .get(COUNTY_PROPERTY)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        Self {
            county,
            geometry: raw.geometry,
            properties,
        }
    }
}

/// The immutable feature set loaded at startup.
///
/// `geojson` keeps the raw feature collection so it can be handed to the
/// map engine as-is; `features[i]` describes the engine's picking index `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub features: Vec<Feature>,
    pub geojson: Value,
}

impl Dataset {
    #[cfg(test)]
    pub fn new(features: Vec<Feature>) -> Self {
        let geojson = serde_json::json!({
            "type": "FeatureCollection",
            "features": features
                .iter()
                .map(|f| {
                    let mut properties = f.properties.clone();
                    properties.insert(COUNTY_PROPERTY.to_string(), Value::from(f.county.clone()));
                    serde_json::json!({
                        "type": "Feature",
                        "geometry": f.geometry,
                        "properties": properties,
                    })
                })
                .collect::<Vec<_>>(),
        });
        Self { features, geojson }
    }

    /// Parse the raw body of the data file.
    pub fn from_json_str(body: &str) -> Result<Self, LoadError> {
        let file: DataFile =
            serde_json::from_str(body).map_err(|e| LoadError::Parse(e.to_string()))?;
        Self::from_geojson(file.geojson.ok_or(LoadError::MissingGeoJson)?)
    }

    /// Build from the feature-collection object found under the `geojson` key.
    pub fn from_geojson(geojson: Value) -> Result<Self, LoadError> {
        if geojson.is_null() {
            return Err(LoadError::MissingGeoJson);
        }
        let collection: RawCollection = serde_json::from_value(geojson.clone())
            .map_err(|e| LoadError::Parse(e.to_string()))?;
        Ok(Self {
            features: collection.features.into_iter().map(Feature::from).collect(),
            geojson,
        })
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn feature(&self, index: usize) -> Option<&Feature> {
        self.features.get(index)
    }
}
