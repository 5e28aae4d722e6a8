use quakemap_common::types::ControlPosition;
use quakemap_guides::legend::swatch::SwatchLegend;

/// Static depth key anchored to a map corner
#[derive(Debug, Clone, PartialEq)]
pub struct LegendControl {
    pub position: ControlPosition,
    pub legend: SwatchLegend,
}

/// Switches between base layers and shows or hides overlays.
///
/// It lists whatever base layers and overlays the surface holds when it is written out.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerToggleControl {
    pub position: ControlPosition,
    pub collapsed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapControl {
    Legend(LegendControl),
    LayerToggle(LayerToggleControl),
}
