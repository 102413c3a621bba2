//! `ts-spatial`: tile map, points of interest, and pathfinding.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                |
//! |----------------|---------------------------------------------------------|
//! | [`map`]        | `TileMap` (walkability grid), `MapLayout`, ASCII loader |
//! | [`poi`]        | `Building`, `BuildingKind`, `Fire`, `PointsOfInterest`  |
//! | [`pathfinder`] | `Pathfinder` trait, `Path`, `AStarPathfinder`           |
//! | [`error`]      | `SpatialError`, `SpatialResult<T>`                      |
//!
//! The rest of the framework only asks three things of this crate: is a tile
//! walkable, where is the nearest building of a kind, and what waypoints lead
//! from one tile to another.  Everything behind those questions is swappable.

pub mod error;
pub mod map;
pub mod pathfinder;
pub mod poi;

#[cfg(test)]
mod tests;

pub use error::{SpatialError, SpatialResult};
pub use map::{MapLayout, TileMap};
pub use pathfinder::{AStarPathfinder, Path, Pathfinder};
pub use poi::{Building, BuildingKind, Fire, PointsOfInterest};
