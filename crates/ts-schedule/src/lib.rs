//! `ts-schedule`: which agents get a full update this frame.
//!
//! # Crate layout
//!
//! | Module        | Contents                                              |
//! |---------------|-------------------------------------------------------|
//! | [`scheduler`] | `AgentScheduler`, `FrameReport`                       |
//! | [`updater`]   | `AgentUpdater` trait: full and quick update callbacks |
//! | [`clock`]     | `BudgetClock` trait, `WallClock`, `FrozenClock`       |
//! | [`config`]    | `SchedulerConfig`                                     |
//! | [`error`]     | `ScheduleError`, `ScheduleResult<T>`                  |
//!
//! # Frame model (summary)
//!
//! ```text
//! budget = frame_budget_us - overhead measured last frame
//! walk the priority ordering from the cursor:
//!     full update, priority = 1          until budget or cap is spent
//! every other living agent:
//!     quick update, priority += increment
//! every resort_interval frames: resort the three orderings, cursor = 0
//! ```
//!
//! An agent skipped for `k` frames has priority `1 + k * increment`, so after
//! a resort it sorts ahead of every agent serviced more recently.  Between
//! resorts the cursor keeps walking the stale ordering, so nobody is picked
//! twice before everyone ahead of them has been picked once.

pub mod clock;
pub mod config;
pub mod error;
pub mod scheduler;
pub mod updater;

#[cfg(test)]
mod tests;

pub use clock::{BudgetClock, FrozenClock, WallClock};
pub use config::SchedulerConfig;
pub use error::{ScheduleError, ScheduleResult};
pub use scheduler::{AgentScheduler, FrameReport};
pub use updater::AgentUpdater;
