//! The subset of GeoJSON the feeds are decoded through.
//!
//! Geometry coordinates are kept as raw JSON and only interpreted on demand, so a feature with
//! an unexpected geometry never fails the whole collection.

use crate::error::QuakeDataError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn from_value(value: &Value) -> Result<Self, QuakeDataError> {
        let collection = FeatureCollection::deserialize(value)?;
        if collection.kind != "FeatureCollection" {
            return Err(QuakeDataError::NotFeatureCollection(collection.kind));
        }
        Ok(collection)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

impl Feature {
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.as_ref().and_then(|props| props.get(key))
    }

    pub fn property_f64(&self, key: &str) -> Option<f64> {
        self.property(key).and_then(Value::as_f64)
    }

    pub fn property_str(&self, key: &str) -> Option<&str> {
        self.property(key).and_then(Value::as_str)
    }

    /// Feature id as text; numeric ids are formatted, anything else is empty
    pub fn id_string(&self) -> String {
        match &self.id {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Value,
}

impl Geometry {
    /// Coordinates of a `Point`; non-numeric entries become `None`
    pub fn point(&self) -> Option<Vec<Option<f64>>> {
        if self.kind != "Point" {
            return None;
        }
        self.coordinates
            .as_array()
            .map(|coords| coords.iter().map(Value::as_f64).collect())
    }

    /// `(x, y)` vertices of each line in a `LineString` or `MultiLineString`
    pub fn lines(&self) -> Option<Vec<Vec<(f64, f64)>>> {
        match self.kind.as_str() {
            "LineString" => Vec::<Vec<f64>>::deserialize(&self.coordinates)
                .ok()
                .map(|line| vec![to_pairs(line)]),
            "MultiLineString" => Vec::<Vec<Vec<f64>>>::deserialize(&self.coordinates)
                .ok()
                .map(|lines| lines.into_iter().map(to_pairs).collect()),
            _ => None,
        }
    }
}

fn to_pairs(line: Vec<Vec<f64>>) -> Vec<(f64, f64)> {
    line.into_iter()
        .filter(|position| position.len() >= 2)
        .map(|position| (position[0], position[1]))
        .collect()
}
