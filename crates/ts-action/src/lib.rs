//! `ts-action`: action stacks and the per-tick behavior executor.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`behavior`] | `Behavior` tagged variants, `ActionStep`, `StepStatus`     |
//! | [`stack`]    | `ActionStack`: LIFO of pending steps for one agent         |
//! | [`context`]  | `ActionContext<'a, P>`: mutable world view for one update  |
//! | [`executor`] | `ActionExecutor`: owns every stack, runs one step per call |
//! | [`config`]   | `ActionConfig`: speeds, ranges, rates, damage              |
//! | [`error`]    | `ActionError`, `ActionFailure`, `ActionResult<T>`          |
//!
//! # Execution model
//!
//! Steps are pushed innermost-last: a plan queues "perform behavior" and then
//! "walk there" on top, so walking runs first.  Each call to
//! [`ActionExecutor::process_action_stack`] runs the top step for one tick.
//! A finished step is popped; a failed step clears the whole stack and the
//! planner picks something new on the agent's next full update.

pub mod behavior;
pub mod config;
pub mod context;
pub mod error;
pub mod executor;
pub mod stack;


pub use behavior::{ActionStep, Behavior, StepStatus};
pub use config::ActionConfig;
pub use context::ActionContext;
pub use error::{ActionError, ActionFailure, ActionResult};
pub use executor::ActionExecutor;
pub use stack::ActionStack;
