use indexmap::IndexMap;
use log::debug;
use quakemap_common::types::LatLng;

use crate::config::MapConfig;
use crate::controls::MapControl;
use crate::error::QuakeMapError;
use crate::layers::{OverlayLayer, TileLayer};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: u8,
}

/// The map a render pass builds up: base layers, overlays and controls.
///
/// One surface is created per pass and handed to each rendering step in turn. Layer names are
/// unique across base layers and overlays, since the layer toggle lists them by name.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSurface {
    title: String,
    view: MapView,
    base_layers: IndexMap<String, TileLayer>,
    default_base_layer: Option<String>,
    overlays: IndexMap<String, OverlayLayer>,
    controls: Vec<MapControl>,
}

impl MapSurface {
    pub fn new(title: impl Into<String>, view: MapView) -> Self {
        Self {
            title: title.into(),
            view,
            base_layers: IndexMap::new(),
            default_base_layer: None,
            overlays: IndexMap::new(),
            controls: Vec::new(),
        }
    }

    /// A surface with the configured view and base layers
    pub fn from_config(config: &MapConfig) -> Result<Self, QuakeMapError> {
        let mut surface = Self::new(
            config.title.clone(),
            MapView {
                center: config.center,
                zoom: config.zoom,
            },
        );
        for layer in &config.base_layers {
            surface.add_base_layer(layer.clone())?;
        }
        surface.set_default_base_layer(&config.default_base_layer)?;
        Ok(surface)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn view(&self) -> &MapView {
        &self.view
    }

    fn ensure_unique(&self, name: &str) -> Result<(), QuakeMapError> {
        if self.base_layers.contains_key(name) || self.overlays.contains_key(name) {
            return Err(QuakeMapError::DuplicateLayer(name.to_string()));
        }
        Ok(())
    }

    pub fn add_base_layer(&mut self, layer: TileLayer) -> Result<(), QuakeMapError> {
        self.ensure_unique(&layer.name)?;
        debug!("Adding base layer '{}'", layer.name);
        self.base_layers.insert(layer.name.clone(), layer);
        Ok(())
    }

    pub fn set_default_base_layer(&mut self, name: &str) -> Result<(), QuakeMapError> {
        if !self.base_layers.contains_key(name) {
            return Err(QuakeMapError::UnknownBaseLayer(name.to_string()));
        }
        self.default_base_layer = Some(name.to_string());
        Ok(())
    }

    pub fn base_layers(&self) -> impl Iterator<Item = &TileLayer> {
        self.base_layers.values()
    }

    /// The base layer shown on load; the first one added unless set explicitly
    pub fn default_base_layer(&self) -> Option<&TileLayer> {
        match &self.default_base_layer {
            Some(name) => self.base_layers.get(name),
            None => self.base_layers.values().next(),
        }
    }

    pub fn add_overlay(
        &mut self,
        name: impl Into<String>,
        layer: OverlayLayer,
    ) -> Result<(), QuakeMapError> {
        let name = name.into();
        self.ensure_unique(&name)?;
        debug!("Adding overlay '{}' with {} features", name, layer.len());
        self.overlays.insert(name, layer);
        Ok(())
    }

    /// Overlays in the order they were added
    pub fn overlays(&self) -> impl Iterator<Item = (&str, &OverlayLayer)> {
        self.overlays
            .iter()
            .map(|(name, layer)| (name.as_str(), layer))
    }

    pub fn overlay(&self, name: &str) -> Option<&OverlayLayer> {
        self.overlays.get(name)
    }

    pub fn add_control(&mut self, control: MapControl) {
        self.controls.push(control);
    }

    pub fn controls(&self) -> &[MapControl] {
        &self.controls
    }
}
