//! Writes a [`MapSurface`] as a standalone HTML page.
//!
//! The page loads Leaflet from a CDN; tiles, projection and interaction are all handled there.
//! Everything this crate decided (styles, popups, legend, layer lists) is embedded as JSON.

use handlebars::Handlebars;
use quakemap_common::types::ControlPosition;
use quakemap_guides::legend::swatch::SwatchLegend;
use quakemap_style::StyleRecord;
use serde::Serialize;
use serde_json::json;

use crate::controls::MapControl;
use crate::error::QuakeMapError;
use crate::layers::{LineStyle, OverlayLayer};
use crate::surface::MapSurface;

const PAGE: &str = "page";
const LEGEND: &str = "legend";

pub fn get_handlebars() -> Result<Handlebars<'static>, QuakeMapError> {
    let mut handlebars = Handlebars::new();
    handlebars.register_template_string(PAGE, include_str!("../templates/map.hbs"))?;
    handlebars.register_template_string(LEGEND, include_str!("../templates/legend.hbs"))?;
    Ok(handlebars)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageData<'a> {
    view: PageView<'a>,
    base_layers: Vec<PageBaseLayer<'a>>,
    overlays: Vec<PageOverlay<'a>>,
    controls: Vec<PageControl>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageView<'a> {
    center: [f64; 2],
    zoom: u8,
    default_base_layer: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageBaseLayer<'a> {
    name: &'a str,
    url_template: &'a str,
    attribution: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_zoom: Option<u8>,
}

#[derive(Serialize)]
struct PageMarker<'a> {
    latlng: [f64; 2],
    style: &'a StyleRecord,
    popup: &'a str,
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
enum PageOverlay<'a> {
    Points {
        name: &'a str,
        markers: Vec<PageMarker<'a>>,
    },
    Lines {
        name: &'a str,
        style: &'a LineStyle,
        lines: Vec<Vec<[f64; 2]>>,
    },
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
enum PageControl {
    Legend {
        position: ControlPosition,
        html: String,
    },
    LayerToggle {
        position: ControlPosition,
        collapsed: bool,
    },
}

pub struct PageWriter {
    handlebars: Handlebars<'static>,
}

impl PageWriter {
    pub fn try_new() -> Result<Self, QuakeMapError> {
        Ok(Self {
            handlebars: get_handlebars()?,
        })
    }

    /// The legend's inner HTML: one swatch and label per line
    pub fn render_legend(&self, legend: &SwatchLegend) -> Result<String, QuakeMapError> {
        Ok(self.handlebars.render(
            LEGEND,
            &json!({
                "title": legend.title,
                "rows": legend.rows(),
            }),
        )?)
    }

    pub fn render(&self, surface: &MapSurface) -> Result<String, QuakeMapError> {
        let data = self.page_data(surface)?;
        // Keep popup markup from closing the surrounding <script> element
        let data = serde_json::to_string(&data)?.replace("</", "<\\/");

        Ok(self.handlebars.render(
            PAGE,
            &json!({
                "title": surface.title(),
                "data": data,
            }),
        )?)
    }

    fn page_data<'a>(&self, surface: &'a MapSurface) -> Result<PageData<'a>, QuakeMapError> {
        let view = surface.view();
        let base_layers = surface
            .base_layers()
            .map(|layer| PageBaseLayer {
                name: &layer.name,
                url_template: &layer.url_template,
                attribution: &layer.attribution,
                max_zoom: layer.max_zoom,
            })
            .collect();

        let overlays = surface
            .overlays()
            .map(|(name, layer)| match layer {
                OverlayLayer::Points(points) => PageOverlay::Points {
                    name,
                    markers: points
                        .markers
                        .iter()
                        .map(|marker| PageMarker {
                            latlng: [marker.position.y(), marker.position.x()],
                            style: &marker.style,
                            popup: &marker.popup,
                        })
                        .collect(),
                },
                OverlayLayer::Lines(lines) => PageOverlay::Lines {
                    name,
                    style: &lines.style,
                    lines: lines
                        .lines
                        .iter()
                        .map(|boundary| boundary.line.coords().map(|c| [c.y, c.x]).collect())
                        .collect(),
                },
            })
            .collect();

        let controls = surface
            .controls()
            .iter()
            .map(|control| {
                Ok(match control {
                    MapControl::Legend(legend) => PageControl::Legend {
                        position: legend.position,
                        html: self.render_legend(&legend.legend)?,
                    },
                    MapControl::LayerToggle(toggle) => PageControl::LayerToggle {
                        position: toggle.position,
                        collapsed: toggle.collapsed,
                    },
                })
            })
            .collect::<Result<Vec<_>, QuakeMapError>>()?;

        Ok(PageData {
            view: PageView {
                center: view.center.to_array(),
                zoom: view.zoom,
                default_base_layer: surface.default_base_layer().map(|l| l.name.as_str()),
            },
            base_layers,
            overlays,
            controls,
        })
    }
}

/// Renders `surface` to a complete HTML document
pub fn render_html(surface: &MapSurface) -> Result<String, QuakeMapError> {
    PageWriter::try_new()?.render(surface)
}

/// Renders the legend's inner HTML
pub fn render_legend_html(legend: &SwatchLegend) -> Result<String, QuakeMapError> {
    PageWriter::try_new()?.render_legend(legend)
}
