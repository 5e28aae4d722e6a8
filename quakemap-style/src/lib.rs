pub mod depth;
pub mod error;
pub mod radius;
pub mod style;

pub use depth::{ColorClassifier, DepthColorRule, DepthColorTable};
pub use radius::RadiusScaler;
pub use style::{FeatureStyler, MarkerStroke, StyleRecord};
