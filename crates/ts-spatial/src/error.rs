//! Spatial-subsystem error type.

use thiserror::Error;

use ts_core::TileCoord;

/// Errors produced by `ts-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("no path from {from} to {to}")]
    NoPath { from: TileCoord, to: TileCoord },

    #[error("search from {from} to {to} gave up after {expanded} expansions")]
    SearchLimit { from: TileCoord, to: TileCoord, expanded: usize },

    #[error("tile {0} is outside the map")]
    OutOfBounds(TileCoord),

    #[error("map parse error at line {line}: {msg}")]
    Parse { line: usize, msg: String },
}

pub type SpatialResult<T> = Result<T, SpatialError>;
