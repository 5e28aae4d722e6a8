use geo_types::Point;
use quakemap_common::types::HexColor;
use quakemap_data::{Earthquake, PlateBoundary};
use quakemap_style::{FeatureStyler, StyleRecord};
use serde::{Deserialize, Serialize};

use crate::error::QuakeMapError;
use crate::popup::PopupRenderer;

/// A background tile layer served by a third party
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileLayer {
    pub name: String,
    /// Tile URL with `{s}`, `{z}`, `{x}` and `{y}` placeholders
    pub url_template: String,
    /// Attribution HTML shown in the map corner
    pub attribution: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_zoom: Option<u8>,
}

impl TileLayer {
    pub fn new(name: &str, url_template: &str, attribution: &str) -> Self {
        Self {
            name: name.to_string(),
            url_template: url_template.to_string(),
            attribution: attribution.to_string(),
            max_zoom: None,
        }
    }
}

/// Fixed style of boundary lines
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: HexColor,
    pub weight: f64,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: String,
    /// `(longitude, latitude)`
    pub position: Point<f64>,
    pub style: StyleRecord,
    pub popup: String,
}

/// Circle markers, one per earthquake
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointLayer {
    pub markers: Vec<Marker>,
}

impl PointLayer {
    pub fn from_earthquakes(
        quakes: &[Earthquake],
        styler: &FeatureStyler,
        popups: &PopupRenderer,
    ) -> Result<Self, QuakeMapError> {
        let markers = quakes
            .iter()
            .map(|quake| {
                Ok(Marker {
                    id: quake.id.clone(),
                    position: quake.position,
                    style: styler.style(quake),
                    popup: popups.render(quake)?,
                })
            })
            .collect::<Result<Vec<_>, QuakeMapError>>()?;
        Ok(Self { markers })
    }

    /// Markers whose radius the renderer cannot draw (negative or missing magnitude)
    pub fn unrenderable_count(&self) -> usize {
        self.markers
            .iter()
            .filter(|marker| !marker.style.is_renderable())
            .count()
    }
}

/// Polylines sharing a single style
#[derive(Debug, Clone, PartialEq)]
pub struct LineLayer {
    pub lines: Vec<PlateBoundary>,
    pub style: LineStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OverlayLayer {
    Points(PointLayer),
    Lines(LineLayer),
}

impl OverlayLayer {
    /// Number of drawn features
    pub fn len(&self) -> usize {
        match self {
            OverlayLayer::Points(layer) => layer.markers.len(),
            OverlayLayer::Lines(layer) => layer.lines.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
