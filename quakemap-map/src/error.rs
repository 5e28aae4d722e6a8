use std::path::PathBuf;

use quakemap_data::error::QuakeDataError;
use quakemap_style::error::QuakeStyleError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuakeMapError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("A layer named '{0}' already exists")]
    DuplicateLayer(String),

    #[error("Unknown base layer '{0}'")]
    UnknownBaseLayer(String),

    #[error("Invalid style: {0}")]
    Style(#[from] QuakeStyleError),

    #[error("Data error: {0}")]
    Data(#[from] QuakeDataError),

    #[error("Template error: {0}")]
    Template(#[from] handlebars::TemplateError),

    #[error("Render error: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to start the async runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
