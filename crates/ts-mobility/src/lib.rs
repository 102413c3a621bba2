//! `ts-mobility`: agent paths, path following, and path sharing.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                         |
//! |-------------|------------------------------------------------------------------|
//! | [`state`]   | `MovementState`: one agent's waypoints and path index            |
//! | [`store`]   | `MobilityStore`: `Vec<MovementState>` indexed by `AgentId`       |
//! | [`sharing`] | `PathSharing`: reuse a nearby agent's route tail                 |
//! | [`engine`]  | `MobilityEngine<P>`: share-or-search travel + per-frame stepping |
//! | [`error`]   | `MobilityError`, `MobilityResult<T>`                             |
//!
//! # Movement model
//!
//! 1. `MobilityEngine::begin_travel` first asks [`PathSharing`] for a
//!    compatible route already walked by another agent.  Only when none is
//!    found does it call the [`Pathfinder`][ts_spatial::Pathfinder].
//! 2. `MobilityEngine::advance` moves the agent along its waypoints at a
//!    given speed for the frame's `delta_seconds`, updating position and
//!    forward vector in the `AgentStore`.
//! 3. When the last waypoint is reached the state goes inactive and
//!    `advance` reports [`MoveStatus::Arrived`].

pub mod engine;
pub mod error;
pub mod sharing;
pub mod state;
pub mod store;

#[cfg(test)]
mod tests;

pub use engine::{MobilityEngine, MobilityStats, MoveStatus, TravelSource};
pub use error::{MobilityError, MobilityResult};
pub use sharing::{PathSharing, ShareAnchor};
pub use state::MovementState;
pub use store::MobilityStore;
