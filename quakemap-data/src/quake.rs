use crate::error::QuakeDataError;
use crate::geojson::{Feature, FeatureCollection};
use geo_types::Point;
use log::{debug, warn};
use quakemap_common::types::QuakeMeasure;
use serde_json::Value;

/// A single event of the earthquake feed.
///
/// Depth and magnitude are not validated; when the feed omits them they are `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct Earthquake {
    pub id: String,
    /// Epicenter as `(longitude, latitude)`
    pub position: Point<f64>,
    /// Kilometers, third coordinate of the point geometry
    pub depth: f64,
    pub magnitude: f64,
    pub title: String,
    pub place: String,
}

impl Earthquake {
    /// Reads an event from a point feature; `None` if the feature has no usable position
    pub fn from_feature(feature: &Feature) -> Option<Self> {
        let coords = feature.geometry.as_ref()?.point()?;
        let (Some(Some(lng)), Some(Some(lat))) = (coords.first(), coords.get(1)) else {
            return None;
        };
        let depth = coords.get(2).copied().flatten().unwrap_or(f64::NAN);

        Some(Self {
            id: feature.id_string(),
            position: Point::new(*lng, *lat),
            depth,
            magnitude: feature.property_f64("mag").unwrap_or(f64::NAN),
            title: feature.property_str("title").unwrap_or_default().to_string(),
            place: feature.property_str("place").unwrap_or_default().to_string(),
        })
    }

    pub fn latitude(&self) -> f64 {
        self.position.y()
    }

    pub fn longitude(&self) -> f64 {
        self.position.x()
    }
}

impl QuakeMeasure for Earthquake {
    fn depth(&self) -> f64 {
        self.depth
    }

    fn magnitude(&self) -> f64 {
        self.magnitude
    }
}

/// Decodes the earthquake feed, skipping features without a point position
pub fn decode_earthquakes(value: &Value) -> Result<Vec<Earthquake>, QuakeDataError> {
    let collection = FeatureCollection::from_value(value)?;
    let total = collection.features.len();
    let quakes: Vec<Earthquake> = collection
        .features
        .iter()
        .filter_map(Earthquake::from_feature)
        .collect();

    if quakes.len() < total {
        warn!(
            "Skipped {} of {} earthquake features without a point position",
            total - quakes.len(),
            total
        );
    }
    debug!("Decoded {} earthquakes", quakes.len());
    Ok(quakes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use serde_json::json;

    #[test]
    fn test_decode_complete_feature() -> Result<(), QuakeDataError> {
        let quakes = decode_earthquakes(&json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "id": "ci40000001",
                "properties": {"mag": 3.2, "place": "10km N of Town, CA", "title": "M 3.2 - 10km N of Town, CA"},
                "geometry": {"type": "Point", "coordinates": [-117.5, 34.25, 8.7]}
            }]
        }))?;

        assert_eq!(quakes.len(), 1);
        let quake = &quakes[0];
        assert_eq!(quake.id, "ci40000001");
        assert_approx_eq!(f64, quake.longitude(), -117.5);
        assert_approx_eq!(f64, quake.latitude(), 34.25);
        assert_approx_eq!(f64, quake.depth(), 8.7);
        assert_approx_eq!(f64, quake.magnitude(), 3.2);
        assert_eq!(quake.place, "10km N of Town, CA");
        Ok(())
    }

    #[test]
    fn test_missing_measurements_are_nan() -> Result<(), QuakeDataError> {
        let quakes = decode_earthquakes(&json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {"mag": null},
                "geometry": {"type": "Point", "coordinates": [10.0, 20.0]}
            }]
        }))?;

        assert!(quakes[0].depth.is_nan());
        assert!(quakes[0].magnitude.is_nan());
        assert_eq!(quakes[0].title, "");
        assert_eq!(quakes[0].id, "");
        Ok(())
    }

    #[test]
    fn test_skip_unusable_features() -> Result<(), QuakeDataError> {
        let quakes = decode_earthquakes(&json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {}, "geometry": null},
                {"type": "Feature", "properties": {}, "geometry": {"type": "Point", "coordinates": [1.0]}},
                {"type": "Feature", "properties": {}, "geometry": {"type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]]}},
                {"type": "Feature", "properties": {"mag": 1.0}, "geometry": {"type": "Point", "coordinates": [1.0, 2.0, 3.0]}}
            ]
        }))?;

        assert_eq!(quakes.len(), 1);
        assert_approx_eq!(f64, quakes[0].magnitude, 1.0);
        Ok(())
    }
}
