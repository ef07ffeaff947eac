//! Spatial-subsystem error type.

use thiserror::Error;

use cs_core::SiteId;

/// Errors produced by `cs-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("site {0} registered twice")]
    DuplicateSite(SiteId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("site file parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
