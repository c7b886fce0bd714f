use thiserror::Error;

use crate::camera::ProjectionError;

#[derive(Debug, Error)]
pub enum StreamError {
    #[error("stream already running")]
    AlreadyRunning,
    #[error("cannot open sample dataset: {0}")]
    SourceUnavailable(#[from] std::io::Error),
    #[error("row {0}: {1}")]
    MalformedSample(usize, String),
    #[error("projection unavailable: {0}")]
    Projection(#[from] ProjectionError),
}
