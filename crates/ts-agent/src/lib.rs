//! `ts-agent`: Structure-of-Arrays agent storage for the `tilesim` framework.
//!
//! # Crate layout
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`store`]    | `AgentStore` (SoA arrays), `AgentRngs` (per-agent RNG) |
//! | [`traits`]   | `Personality`, `Inventory`                             |
//! | [`builder`]  | `AgentStoreBuilder` (fluent construction)              |
//! | [`ordering`] | `AgentOrderings`: by X, by Y, by priority (descending) |
//! | [`sort`]     | `partition_sort_by`: in-place partition-exchange sort  |
//!
//! Agents are addressed by `AgentId` only.  The orderings hold ids, never
//! references, so resorting them cannot invalidate anything a planner or
//! action stack remembers.

pub mod builder;
pub mod ordering;
pub mod sort;
pub mod store;
pub mod traits;


pub use builder::AgentStoreBuilder;
pub use ordering::{AgentOrderings, OutwardScan};
pub use sort::partition_sort_by;
pub use store::{AgentRngs, AgentStore, OrderSlots, BASELINE_PRIORITY};
pub use traits::{Inventory, Personality};
