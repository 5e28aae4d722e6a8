pub mod error;
pub mod linear;
pub mod threshold;
