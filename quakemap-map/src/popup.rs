use handlebars::Handlebars;
use quakemap_data::Earthquake;
use serde_json::json;

use crate::error::QuakeMapError;

const POPUP: &str = "popup";

/// Renders the HTML shown when a marker is clicked.
///
/// Title and place come straight from the feed and are HTML-escaped.
pub struct PopupRenderer {
    handlebars: Handlebars<'static>,
}

impl PopupRenderer {
    pub fn try_new() -> Result<Self, QuakeMapError> {
        let mut handlebars = Handlebars::new();
        handlebars.register_template_string(POPUP, include_str!("../templates/popup.hbs"))?;
        Ok(Self { handlebars })
    }

    pub fn render(&self, quake: &Earthquake) -> Result<String, QuakeMapError> {
        Ok(self.handlebars.render(
            POPUP,
            &json!({
                "title": quake.title,
                "magnitude": format_magnitude(quake.magnitude),
                "place": quake.place,
            }),
        )?)
    }
}

fn format_magnitude(magnitude: f64) -> String {
    if magnitude.is_nan() {
        "unknown".to_string()
    } else {
        magnitude.to_string()
    }
}
