use crate::error::QuakeDataError;
use crate::geojson::FeatureCollection;
use geo_types::LineString;
use log::debug;
use serde_json::Value;

/// One tectonic plate boundary segment
#[derive(Debug, Clone, PartialEq)]
pub struct PlateBoundary {
    pub name: String,
    /// Vertices as `(longitude, latitude)`
    pub line: LineString<f64>,
}

/// Decodes the plate boundary dataset.
///
/// Every line of a `MultiLineString` becomes its own boundary. Lines with fewer than two
/// vertices and non-line geometries are dropped.
pub fn decode_plate_boundaries(value: &Value) -> Result<Vec<PlateBoundary>, QuakeDataError> {
    let collection = FeatureCollection::from_value(value)?;

    let mut boundaries = Vec::new();
    for feature in &collection.features {
        let Some(lines) = feature.geometry.as_ref().and_then(|g| g.lines()) else {
            continue;
        };
        let name = feature
            .property_str("Name")
            .or_else(|| feature.property_str("name"))
            .unwrap_or_default();

        boundaries.extend(
            lines
                .into_iter()
                .filter(|line| line.len() >= 2)
                .map(|line| PlateBoundary {
                    name: name.to_string(),
                    line: LineString::from(line),
                }),
        );
    }

    debug!(
        "Decoded {} plate boundary segments from {} features",
        boundaries.len(),
        collection.features.len()
    );
    Ok(boundaries)
}
