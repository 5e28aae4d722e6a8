#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QuakeCommonError {
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Color must be opaque: {0}")]
    TranslucentColor(String),
}
