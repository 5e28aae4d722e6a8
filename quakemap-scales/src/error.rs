#[derive(Debug, PartialEq, thiserror::Error)]
pub enum QuakeScaleError {
    #[error("Empty range")]
    EmptyRange,

    #[error("Thresholds must be finite: {0:?}")]
    NonFiniteThreshold(Vec<f64>),

    #[error("Thresholds must be in strictly ascending order: {0:?}")]
    ThresholdsNotAscending(Vec<f64>),

    #[error(
        "Threshold domain length ({domain_len}) must be one less than range length ({range_len})"
    )]
    ThresholdDomainMismatch { domain_len: usize, range_len: usize },
}
