//! `ts-utility`: per-agent utility planner and the shared memo caches.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`memo`]    | `UtilityMemo`: bucketed cache over a continuous input domain |
//! | [`curve`]   | `Curve`, `Factor`, `UtilityCaches`: memoized response curves |
//! | [`skew`]    | `Skew`: hysteresis bias toward the plan being executed       |
//! | [`scorer`]  | `PlanningView`, `UtilityResult`, one scorer per `PlanKind`   |
//! | [`history`] | `UtilityHistory`: last score per category, for inspection    |
//! | [`planner`] | `UtilityPlanner` state machine, `PlannerStore`               |
//! | [`config`]  | `PlannerConfig`                                              |
//! | [`error`]   | `UtilityError`, `PlanningResult<T>`                          |
//!
//! # Scoring
//!
//! Every scorer reduces its world query to a handful of inputs normalized to
//! `[0, 1]` (distance over the map diagonal, stock fraction, damage fraction,
//! …).  Each input runs through the response curve of its [`Factor`], and the
//! curve output is memoized per factor in a [`UtilityMemo`].  The caches are
//! owned by [`PlannerStore`] and shared by all agents, so after the first
//! miss a bucket costs one array read for everyone.

pub mod config;
pub mod curve;
pub mod error;
pub mod history;
pub mod memo;
pub mod planner;
pub mod scorer;
pub mod skew;

#[cfg(test)]
mod tests;

pub use config::PlannerConfig;
pub use curve::{Curve, Factor, UtilityCaches};
pub use error::{PlanningResult, UtilityError};
pub use history::UtilityHistory;
pub use memo::{MemoLookup, UtilityMemo};
pub use planner::{PlanDecision, PlannerState, PlannerStore, UtilityPlanner};
pub use scorer::{PlanningView, UtilityResult};
pub use skew::Skew;
