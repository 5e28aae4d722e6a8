use crate::depth::DepthColorTable;
use crate::radius::RadiusScaler;
use quakemap_common::types::{HexColor, QuakeMeasure};
use serde::{Deserialize, Serialize};

/// Circle marker style, named after the path options of the map renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleRecord {
    pub fill_color: HexColor,
    pub radius: f64,
    /// Stroke color
    pub color: HexColor,
    /// Stroke width
    pub weight: f64,
    pub fill_opacity: f64,
    /// Stroke opacity
    pub opacity: f64,
}

impl StyleRecord {
    /// Whether the renderer can draw this marker. A negative or `NaN` radius is passed along
    /// unchanged by styling and flagged here.
    pub fn is_renderable(&self) -> bool {
        self.radius.is_finite() && self.radius >= 0.0
    }
}

/// The per-marker constants that do not depend on the feature
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerStroke {
    pub color: HexColor,
    pub weight: f64,
    pub fill_opacity: f64,
    pub opacity: f64,
}

impl Default for MarkerStroke {
    fn default() -> Self {
        Self {
            color: HexColor::BLACK,
            weight: 0.5,
            fill_opacity: 0.8,
            opacity: 1.0,
        }
    }
}

/// Combines depth color, magnitude radius and the fixed stroke constants.
///
/// Styling holds no mutable state, so features can be styled in any order or in parallel.
#[derive(Debug, Clone, Default)]
pub struct FeatureStyler {
    table: DepthColorTable,
    radius: RadiusScaler,
    stroke: MarkerStroke,
}

impl FeatureStyler {
    pub fn new(table: DepthColorTable, radius: RadiusScaler, stroke: MarkerStroke) -> Self {
        Self {
            table,
            radius,
            stroke,
        }
    }

    pub fn table(&self) -> &DepthColorTable {
        &self.table
    }

    pub fn radius_scaler(&self) -> &RadiusScaler {
        &self.radius
    }

    pub fn stroke(&self) -> &MarkerStroke {
        &self.stroke
    }

    pub fn style<F: QuakeMeasure + ?Sized>(&self, feature: &F) -> StyleRecord {
        StyleRecord {
            fill_color: self.table.classifier().classify(feature.depth()),
            radius: self.radius.radius(feature.magnitude()),
            color: self.stroke.color,
            weight: self.stroke.weight,
            fill_opacity: self.stroke.fill_opacity,
            opacity: self.stroke.opacity,
        }
    }

    /// Styles `features`, preserving input order
    pub fn style_all<F: QuakeMeasure>(&self, features: &[F]) -> Vec<StyleRecord> {
        features.iter().map(|feature| self.style(feature)).collect()
    }
}
