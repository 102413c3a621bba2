//! `ts-sim`: frame loop, world dynamics and builder for the town simulation.
//!
//! # Frame loop
//!
//! ```text
//! for frame in 0..config.total_frames:
//!   ① World    fires ignite, grow, spread and burn buildings; the time
//!               taken is recorded as scheduler overhead.
//!   ② Agents   AgentScheduler::run_frame walks the priority ordering:
//!                 full update   UtilityPlanner::update_plan, queue the
//!                               winning plan, process_action_stack
//!                 quick update  process_action_stack only
//!   ③ Deaths   kills made this frame clear the victims' stacks and are
//!               reported through SimObserver::on_agent_death.
//! ```
//!
//! # Crate map
//!
//! | Module     | Contents                                  |
//! |------------|-------------------------------------------|
//! | `builder`  | [`SimBuilder`]                            |
//! | `dynamics` | [`WorldConfig`], [`step_fires`]           |
//! | `observer` | [`SimObserver`], [`NoopObserver`]         |
//! | `sim`      | [`Sim`], [`AgentSummary`]                 |
//! | `world`    | [`World`], the scheduler's `AgentUpdater` |

pub mod builder;
pub mod dynamics;
pub mod error;
pub mod observer;
pub mod sim;
pub mod world;


pub use builder::SimBuilder;
pub use dynamics::{FireEvents, WorldConfig, step_fires};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{AgentSummary, Sim};
pub use world::World;
