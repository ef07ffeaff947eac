//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` via `From`
//! where a setup step can fail on core validation.

use thiserror::Error;

/// Errors produced while validating core configuration values.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `cs-core`.
pub type CoreResult<T> = Result<T, CoreError>;
