pub mod error;
pub mod feed;
pub mod fetcher;
pub mod geojson;
pub mod plates;
pub mod quake;

#[cfg(feature = "http-request")]
pub mod reqwest_fetcher;

pub use fetcher::{make_fetcher, FileFetcher, GeoJsonFetcher, SourceFetcher};
pub use plates::{decode_plate_boundaries, PlateBoundary};
pub use quake::{decode_earthquakes, Earthquake};
