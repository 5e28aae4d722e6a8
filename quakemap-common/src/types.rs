use crate::error::QuakeCommonError;
use css_color_parser::Color;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use strum::{Display as StrumDisplay, VariantNames};

/// An opaque sRGB color that round-trips through the `#RRGGBB` form used by
/// the map renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor([u8; 3]);

impl HexColor {
    pub const BLACK: HexColor = HexColor::new(0x00, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    pub fn rgb(&self) -> [u8; 3] {
        self.0
    }

    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.0;
        format!("#{r:02X}{g:02X}{b:02X}")
    }
}

impl Display for HexColor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for HexColor {
    type Err = QuakeCommonError;

    /// Accepts any CSS color notation, e.g. `#ff4500`, `orangered` or `rgb(255, 69, 0)`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let color = s
            .trim()
            .parse::<Color>()
            .map_err(|_| QuakeCommonError::InvalidColor(s.to_string()))?;
        if color.a < 1.0 {
            return Err(QuakeCommonError::TranslucentColor(s.to_string()));
        }
        Ok(Self([color.r, color.g, color.b]))
    }
}

impl TryFrom<String> for HexColor {
    type Error = QuakeCommonError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HexColor> for String {
    fn from(value: HexColor) -> Self {
        value.to_hex()
    }
}

/// Geographic coordinate in the latitude-first order the map renderer expects
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn to_array(&self) -> [f64; 2] {
        [self.lat, self.lng]
    }
}

/// Corner of the map a control is anchored to
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, VariantNames, StrumDisplay,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ControlPosition {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
}

/// The two measurements marker styling is derived from.
///
/// Values are passed through unvalidated: a missing measurement is `NaN`.
pub trait QuakeMeasure {
    /// Hypocenter depth in kilometers
    fn depth(&self) -> f64;

    /// Event magnitude
    fn magnitude(&self) -> f64;
}

impl QuakeMeasure for (f64, f64) {
    fn depth(&self) -> f64 {
        self.0
    }

    fn magnitude(&self) -> f64 {
        self.1
    }
}

impl<T: QuakeMeasure + ?Sized> QuakeMeasure for &T {
    fn depth(&self) -> f64 {
        (**self).depth()
    }

    fn magnitude(&self) -> f64 {
        (**self).magnitude()
    }
}
