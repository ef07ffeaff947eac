use cs_core::CoreError;
use cs_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("site setup failed: {0}")]
    Spatial(#[from] SpatialError),

    #[error("trace error: {0}")]
    Trace(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<CoreError> for SimError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Config(msg) => SimError::Config(msg),
            CoreError::Parse(msg)  => SimError::Config(format!("invalid value: {msg}")),
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;
