use std::collections::HashSet;
use std::path::Path;

use quakemap_common::types::{ControlPosition, HexColor, LatLng};
use quakemap_data::feed::Feed;
use quakemap_guides::legend::swatch::SwatchLegendConfig;
use quakemap_style::{DepthColorTable, FeatureStyler, MarkerStroke, RadiusScaler};
use serde::{Deserialize, Serialize};

use crate::error::QuakeMapError;
use crate::layers::{LineStyle, TileLayer};

pub const STREET_LAYER: &str = "Street";
pub const TOPOGRAPHY_LAYER: &str = "Topography";

const STREET_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const STREET_ATTRIBUTION: &str =
    r#"&copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a> contributors"#;

const TOPOGRAPHY_URL: &str = "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png";
const TOPOGRAPHY_ATTRIBUTION: &str = concat!(
    r#"Map data: &copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a> contributors, "#,
    r#"<a href="http://viewfinderpanoramas.org">SRTM</a> | "#,
    r#"Map style: &copy; <a href="https://opentopomap.org">OpenTopoMap</a> "#,
    r#"(<a href="https://creativecommons.org/licenses/by-sa/3.0/">CC-BY-SA</a>)"#,
);

/// Highest zoom level tile servers commonly provide
const MAX_ZOOM: u8 = 22;

/// Where an overlay's data comes from and the name it is listed under
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedConfig {
    pub name: String,
    /// URL or local path
    pub source: String,
}

impl FeedConfig {
    pub fn for_feed(feed: Feed) -> Self {
        let name = match feed {
            Feed::Earthquakes => "Earthquakes",
            Feed::PlateBoundaries => "Tectonic Plates",
        };
        Self {
            name: name.to_string(),
            source: feed.default_source().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendConfig {
    pub position: ControlPosition,
    pub title: Option<String>,
    /// Depth shown as the lower end of the shallowest entry
    pub origin: f64,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            position: ControlPosition::BottomRight,
            title: None,
            origin: 0.0,
        }
    }
}

impl LegendConfig {
    pub fn swatch_config(&self) -> SwatchLegendConfig {
        SwatchLegendConfig {
            title: self.title.clone(),
            origin: self.origin,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerToggleConfig {
    pub position: ControlPosition,
    pub collapsed: bool,
}

impl Default for LayerToggleConfig {
    fn default() -> Self {
        Self {
            position: ControlPosition::TopRight,
            collapsed: true,
        }
    }
}

/// Everything a render pass needs besides the fetched data.
///
/// Every field has a default, so a JSON config file only needs to list what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub title: String,
    pub center: LatLng,
    pub zoom: u8,
    pub base_layers: Vec<TileLayer>,
    pub default_base_layer: String,
    pub earthquakes: FeedConfig,
    pub plate_boundaries: FeedConfig,
    pub legend: LegendConfig,
    pub layer_toggle: LayerToggleConfig,
    pub depth_colors: DepthColorTable,
    pub radius_factor: f64,
    pub marker_stroke: MarkerStroke,
    pub boundary_style: LineStyle,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            title: "Earthquakes of the Past Week".to_string(),
            // Minneapolis, with the whole continental US in view
            center: LatLng::new(44.977753, -93.265015),
            zoom: 4,
            base_layers: vec![
                TileLayer::new(STREET_LAYER, STREET_URL, STREET_ATTRIBUTION),
                TileLayer::new(TOPOGRAPHY_LAYER, TOPOGRAPHY_URL, TOPOGRAPHY_ATTRIBUTION),
            ],
            default_base_layer: TOPOGRAPHY_LAYER.to_string(),
            earthquakes: FeedConfig::for_feed(Feed::Earthquakes),
            plate_boundaries: FeedConfig::for_feed(Feed::PlateBoundaries),
            legend: LegendConfig::default(),
            layer_toggle: LayerToggleConfig::default(),
            depth_colors: DepthColorTable::default(),
            radius_factor: quakemap_style::radius::DEFAULT_RADIUS_FACTOR,
            marker_stroke: MarkerStroke::default(),
            boundary_style: LineStyle {
                color: HexColor::new(0xFF, 0xA5, 0x00),
                weight: 2.0,
                opacity: 1.0,
            },
        }
    }
}

impl MapConfig {
    pub fn from_json_str(json: &str) -> Result<Self, QuakeMapError> {
        let config: MapConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, QuakeMapError> {
        let json = std::fs::read_to_string(path).map_err(|source| QuakeMapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), QuakeMapError> {
        if !self.center.lat.is_finite()
            || !self.center.lng.is_finite()
            || self.center.lat.abs() > 90.0
            || self.center.lng.abs() > 180.0
        {
            return Err(QuakeMapError::InvalidConfig(format!(
                "center ({}, {}) is not a valid coordinate",
                self.center.lat, self.center.lng
            )));
        }
        if self.zoom > MAX_ZOOM {
            return Err(QuakeMapError::InvalidConfig(format!(
                "zoom {} exceeds the maximum of {MAX_ZOOM}",
                self.zoom
            )));
        }
        if !self
            .base_layers
            .iter()
            .any(|layer| layer.name == self.default_base_layer)
        {
            return Err(QuakeMapError::UnknownBaseLayer(
                self.default_base_layer.clone(),
            ));
        }
        // Base layers and overlays share one namespace in the layer toggle
        let mut names = HashSet::new();
        let layer_names = self
            .base_layers
            .iter()
            .map(|layer| &layer.name)
            .chain([&self.earthquakes.name, &self.plate_boundaries.name]);
        for name in layer_names {
            if !names.insert(name) {
                return Err(QuakeMapError::DuplicateLayer(name.clone()));
            }
        }
        let first_bound = self.depth_colors.thresholds().first().copied();
        if !self.legend.origin.is_finite()
            || first_bound.is_some_and(|bound| self.legend.origin >= bound)
        {
            return Err(QuakeMapError::InvalidConfig(format!(
                "legend origin {} must be finite and below the first depth bound",
                self.legend.origin
            )));
        }
        RadiusScaler::try_new(self.radius_factor)?;
        Ok(())
    }

    pub fn source(&self, feed: Feed) -> &FeedConfig {
        match feed {
            Feed::Earthquakes => &self.earthquakes,
            Feed::PlateBoundaries => &self.plate_boundaries,
        }
    }

    pub fn styler(&self) -> Result<FeatureStyler, QuakeMapError> {
        Ok(FeatureStyler::new(
            self.depth_colors.clone(),
            RadiusScaler::try_new(self.radius_factor)?,
            self.marker_stroke,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() -> Result<(), QuakeMapError> {
        let config = MapConfig::default();
        config.validate()?;
        assert_eq!(config.base_layers.len(), 2);
        assert_eq!(config.default_base_layer, "Topography");
        assert_eq!(config.legend.position, ControlPosition::BottomRight);
        assert_eq!(config.earthquakes.source, quakemap_data::feed::EARTHQUAKES_URL);
        Ok(())
    }

    #[test]
    fn test_partial_json_overrides() -> Result<(), QuakeMapError> {
        let config = MapConfig::from_json_str(
            r##"{
                "zoom": 2,
                "center": {"lat": 0.0, "lng": 150.0},
                "default_base_layer": "Street",
                "plate_boundaries": {"name": "Plates", "source": "data/plates.json"},
                "depth_colors": [{"upper_bound": 70, "color": "green"}, {"color": "red"}]
            }"##,
        )?;
        assert_eq!(config.zoom, 2);
        assert_eq!(config.default_base_layer, "Street");
        assert_eq!(config.plate_boundaries.source, "data/plates.json");
        assert_eq!(config.depth_colors.len(), 2);
        // Untouched fields keep their defaults
        assert_eq!(config.earthquakes, FeedConfig::for_feed(Feed::Earthquakes));
        assert_eq!(config.radius_factor, 4.0);
        assert_eq!(config.legend.swatch_config().origin, 0.0);
        Ok(())
    }

    #[test]
    fn test_legend_origin_override() -> Result<(), QuakeMapError> {
        let config =
            MapConfig::from_json_str(r#"{"legend": {"origin": -10, "title": "Depth"}}"#)?;
        let swatch = config.legend.swatch_config();
        assert_eq!(swatch.origin, -10.0);
        assert_eq!(swatch.title.as_deref(), Some("Depth"));
        assert_eq!(swatch.unit, "km");
        assert_eq!(config.legend.position, ControlPosition::BottomRight);
        Ok(())
    }

    #[test]
    fn test_invalid_configs() {
        let err = MapConfig::from_json_str(r#"{"default_base_layer": "Satellite"}"#).unwrap_err();
        assert!(matches!(err, QuakeMapError::UnknownBaseLayer(name) if name == "Satellite"));

        let err = MapConfig::from_json_str(
            r#"{"earthquakes": {"name": "Street", "source": "quakes.geojson"}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, QuakeMapError::DuplicateLayer(name) if name == "Street"));

        let err = MapConfig::from_json_str(
            r#"{"plate_boundaries": {"name": "Earthquakes", "source": "plates.json"}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, QuakeMapError::DuplicateLayer(name) if name == "Earthquakes"));

        let err = MapConfig::from_json_str(
            r#"{
                "base_layers": [
                    {"name": "Topography", "url_template": "a/{z}/{x}/{y}", "attribution": ""},
                    {"name": "Topography", "url_template": "b/{z}/{x}/{y}", "attribution": ""}
                ]
            }"#,
        )
        .unwrap_err();
        assert!(matches!(err, QuakeMapError::DuplicateLayer(name) if name == "Topography"));

        let err = MapConfig::from_json_str(r#"{"legend": {"origin": 10}}"#).unwrap_err();
        assert!(matches!(err, QuakeMapError::InvalidConfig(_)));

        let err = MapConfig::from_json_str(
            r#"{"legend": {"origin": 0}, "depth_colors": [{"upper_bound": -5, "color": "green"}, {"color": "red"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, QuakeMapError::InvalidConfig(_)));

        let err = MapConfig::from_json_str(r#"{"zoom": 40}"#).unwrap_err();
        assert!(matches!(err, QuakeMapError::InvalidConfig(_)));

        let err = MapConfig::from_json_str(r#"{"center": {"lat": 95.0, "lng": 0.0}}"#).unwrap_err();
        assert!(matches!(err, QuakeMapError::InvalidConfig(_)));

        let err = MapConfig::from_json_str(
            r#"{"depth_colors": [{"upper_bound": 10, "color": "red"}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, QuakeMapError::Json(_)));
    }
}
