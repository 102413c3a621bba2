//! `ts-core`: foundational types for the `tilesim` agent framework.
//!
//! Every other `ts-*` crate depends on this one.  It has no `ts-*`
//! dependencies and only `rand` and `thiserror` as external ones (plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                        |
//! |-----------|-------------------------------------------------|
//! | [`ids`]   | `AgentId`, `BuildingId`, `FireId`, `Target`     |
//! | [`geo`]   | `Vec2` world positions, `TileCoord` grid cells  |
//! | [`time`]  | `Frame`, `SimClock`, `SimConfig`                |
//! | [`rng`]   | `AgentRng` (per-agent), `SimRng` (world events) |
//! | [`plan`]  | `PlanKind`, `Resource`                          |
//! | [`error`] | `TsError`, `TsResult`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                      |
//! |---------|-------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids, geometry and config. |

pub mod error;
pub mod geo;
pub mod ids;
pub mod plan;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{TsError, TsResult};
pub use geo::{TileCoord, Vec2};
pub use ids::{AgentId, BuildingId, FireId, Target};
pub use plan::{PlanKind, Resource};
pub use rng::{AgentRng, SimRng};
pub use time::{Frame, SimClock, SimConfig};
