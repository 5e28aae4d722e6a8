//! Styled GeoJSON export for use outside the generated page.

use quakemap_data::Earthquake;
use quakemap_style::FeatureStyler;
use serde_json::{json, Value};

use crate::error::QuakeMapError;
use crate::popup::PopupRenderer;

/// Earthquakes as a GeoJSON `FeatureCollection` whose features carry their computed marker
/// style and popup HTML next to the original properties.
///
/// Missing depths and magnitudes are written as `null`.
pub fn styled_geojson(
    quakes: &[Earthquake],
    styler: &FeatureStyler,
    popups: &PopupRenderer,
) -> Result<Value, QuakeMapError> {
    let features = quakes
        .iter()
        .map(|quake| {
            Ok(json!({
                "type": "Feature",
                "id": quake.id,
                "geometry": {
                    "type": "Point",
                    "coordinates": [quake.longitude(), quake.latitude(), quake.depth],
                },
                "properties": {
                    "mag": quake.magnitude,
                    "title": quake.title,
                    "place": quake.place,
                    "style": styler.style(quake),
                    "popup": popups.render(quake)?,
                },
            }))
        })
        .collect::<Result<Vec<_>, QuakeMapError>>()?;

    Ok(json!({
        "type": "FeatureCollection",
        "features": features,
    }))
}
