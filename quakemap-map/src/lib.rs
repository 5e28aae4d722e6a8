pub mod config;
pub mod controls;
pub mod error;
pub mod export;
pub mod html;
pub mod layers;
pub mod load;
pub mod popup;
pub mod surface;

pub use config::MapConfig;
pub use error::QuakeMapError;
pub use load::{build_map, LoadReport, OverlayLoader};
pub use surface::MapSurface;
