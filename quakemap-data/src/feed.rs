use strum::Display;

/// USGS summary feed of all events from the past week
pub const EARTHQUAKES_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson";

/// PB2002 plate boundary model
pub const PLATE_BOUNDARIES_URL: &str =
    "https://raw.githubusercontent.com/fraxen/tectonicplates/master/GeoJSON/PB2002_boundaries.json";

/// The two datasets overlaid on the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Feed {
    #[strum(serialize = "earthquakes")]
    Earthquakes,
    #[strum(serialize = "plate boundaries")]
    PlateBoundaries,
}

impl Feed {
    pub fn default_source(&self) -> &'static str {
        match self {
            Feed::Earthquakes => EARTHQUAKES_URL,
            Feed::PlateBoundaries => PLATE_BOUNDARIES_URL,
        }
    }
}
