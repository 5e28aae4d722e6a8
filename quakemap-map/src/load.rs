use futures::stream::{FuturesUnordered, StreamExt};
use log::{info, warn};
use quakemap_data::feed::Feed;
use quakemap_data::{decode_earthquakes, decode_plate_boundaries, Earthquake, GeoJsonFetcher, PlateBoundary};
use quakemap_guides::legend::swatch::make_depth_legend;
use quakemap_style::FeatureStyler;
use serde_json::Value;

use crate::config::MapConfig;
use crate::controls::{LayerToggleControl, LegendControl, MapControl};
use crate::error::QuakeMapError;
use crate::layers::{LineLayer, LineStyle, OverlayLayer, PointLayer};
use crate::popup::PopupRenderer;
use crate::surface::MapSurface;

/// Outcome of loading the overlays: feature counts of the overlays that were added and the
/// feeds that failed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    pub earthquakes: Option<usize>,
    pub plate_boundaries: Option<usize>,
    pub failures: Vec<(Feed, String)>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

pub fn add_earthquake_overlay(
    surface: &mut MapSurface,
    name: &str,
    quakes: &[Earthquake],
    styler: &FeatureStyler,
    popups: &PopupRenderer,
) -> Result<usize, QuakeMapError> {
    let layer = PointLayer::from_earthquakes(quakes, styler, popups)?;
    let unrenderable = layer.unrenderable_count();
    if unrenderable > 0 {
        warn!("{unrenderable} earthquake markers have a negative or missing radius");
    }
    let count = layer.markers.len();
    surface.add_overlay(name, OverlayLayer::Points(layer))?;
    Ok(count)
}

pub fn add_plate_overlay(
    surface: &mut MapSurface,
    name: &str,
    boundaries: Vec<PlateBoundary>,
    style: LineStyle,
) -> Result<usize, QuakeMapError> {
    let count = boundaries.len();
    surface.add_overlay(
        name,
        OverlayLayer::Lines(LineLayer {
            lines: boundaries,
            style,
        }),
    )?;
    Ok(count)
}

/// Adds the depth legend. It depends only on the configured color table, never on fetched data.
pub fn add_legend(surface: &mut MapSurface, config: &MapConfig) {
    let legend = make_depth_legend(&config.depth_colors, &config.legend.swatch_config());
    surface.add_control(MapControl::Legend(LegendControl {
        position: config.legend.position,
        legend,
    }));
}

pub fn add_layer_toggle(surface: &mut MapSurface, config: &MapConfig) {
    surface.add_control(MapControl::LayerToggle(LayerToggleControl {
        position: config.layer_toggle.position,
        collapsed: config.layer_toggle.collapsed,
    }));
}

/// Fetches both feeds and adds an overlay for each.
pub struct OverlayLoader<'a> {
    fetcher: &'a dyn GeoJsonFetcher,
    config: &'a MapConfig,
    styler: &'a FeatureStyler,
    popups: &'a PopupRenderer,
}

impl<'a> OverlayLoader<'a> {
    pub fn new(
        fetcher: &'a dyn GeoJsonFetcher,
        config: &'a MapConfig,
        styler: &'a FeatureStyler,
        popups: &'a PopupRenderer,
    ) -> Self {
        Self {
            fetcher,
            config,
            styler,
            popups,
        }
    }

    /// Requests both feeds at once and adds each overlay as soon as its feed arrives, in
    /// whichever order that happens. A feed that cannot be fetched or decoded is logged and its
    /// overlay left out; the other overlay is unaffected.
    pub async fn load_into(&self, surface: &mut MapSurface) -> Result<LoadReport, QuakeMapError> {
        let mut pending = [Feed::Earthquakes, Feed::PlateBoundaries]
            .into_iter()
            .map(|feed| async move {
                let source = &self.config.source(feed).source;
                (feed, self.fetcher.fetch(source).await)
            })
            .collect::<FuturesUnordered<_>>();

        let mut report = LoadReport::default();
        while let Some((feed, fetched)) = pending.next().await {
            let result = match fetched {
                Ok(value) => self.apply(feed, &value, surface),
                Err(err) => Err(err.into()),
            };
            match result {
                Ok(count) => {
                    info!("Added {count} {feed} to the map");
                    match feed {
                        Feed::Earthquakes => report.earthquakes = Some(count),
                        Feed::PlateBoundaries => report.plate_boundaries = Some(count),
                    }
                }
                Err(QuakeMapError::Data(err)) => {
                    warn!(
                        "Leaving out the {feed} overlay, loading {} failed: {err}",
                        self.config.source(feed).source
                    );
                    report.failures.push((feed, err.to_string()));
                }
                Err(err) => return Err(err),
            }
        }
        Ok(report)
    }

    fn apply(
        &self,
        feed: Feed,
        value: &Value,
        surface: &mut MapSurface,
    ) -> Result<usize, QuakeMapError> {
        let name = &self.config.source(feed).name;
        match feed {
            Feed::Earthquakes => {
                let quakes = decode_earthquakes(value)?;
                add_earthquake_overlay(surface, name, &quakes, self.styler, self.popups)
            }
            Feed::PlateBoundaries => {
                let boundaries = decode_plate_boundaries(value)?;
                add_plate_overlay(surface, name, boundaries, self.config.boundary_style)
            }
        }
    }
}

/// One full render pass: base layers, legend, both overlays and the layer toggle
pub async fn build_map(
    fetcher: &dyn GeoJsonFetcher,
    config: &MapConfig,
) -> Result<(MapSurface, LoadReport), QuakeMapError> {
    config.validate()?;
    let styler = config.styler()?;
    let popups = PopupRenderer::try_new()?;

    let mut surface = MapSurface::from_config(config)?;
    add_legend(&mut surface, config);

    let report = OverlayLoader::new(fetcher, config, &styler, &popups)
        .load_into(&mut surface)
        .await?;

    add_layer_toggle(&mut surface, config);
    Ok((surface, report))
}
