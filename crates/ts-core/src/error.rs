//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `TsError` where they need
//! to surface a core failure.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TsError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for the core types.
pub type TsResult<T> = Result<T, TsError>;
