use quakemap_scales::error::QuakeScaleError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum QuakeStyleError {
    #[error("Depth color table must contain at least one rule")]
    EmptyTable,

    #[error("Only the last depth color rule may be unbounded (rule {0} has no upper bound)")]
    UnboundedRuleNotLast(usize),

    #[error("The last depth color rule must be unbounded")]
    MissingUnboundedRule,

    #[error("Radius factor must be finite, got {0}")]
    InvalidRadiusFactor(f64),

    #[error("Invalid scale: {0}")]
    InvalidScale(#[from] QuakeScaleError),
}
