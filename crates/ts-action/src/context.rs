//! Mutable world view handed to the executor for a single agent update.

use ts_agent::{AgentOrderings, AgentStore};
use ts_core::AgentId;
use ts_mobility::MobilityEngine;
use ts_spatial::{Pathfinder, PointsOfInterest, TileMap};

/// Everything a behavior may read or change while it runs.
///
/// Built by `ts-sim` around each agent update and dropped straight after, so
/// the borrows never outlive one update.  The orderings and the map are
/// read-only here; they change only during resorts and world dynamics.
pub struct ActionContext<'a, P: Pathfinder> {
    pub agents:    &'a mut AgentStore,
    pub orderings: &'a AgentOrderings,
    pub mobility:  &'a mut MobilityEngine<P>,
    pub poi:       &'a mut PointsOfInterest,
    pub map:       &'a TileMap,
    /// Agents killed by this update, drained by the caller.
    pub kills:     &'a mut Vec<AgentId>,
}

impl<'a, P: Pathfinder> ActionContext<'a, P> {
    #[inline]
    pub fn new(
        agents:    &'a mut AgentStore,
        orderings: &'a AgentOrderings,
        mobility:  &'a mut MobilityEngine<P>,
        poi:       &'a mut PointsOfInterest,
        map:       &'a TileMap,
        kills:     &'a mut Vec<AgentId>,
    ) -> Self {
        Self { agents, orderings, mobility, poi, map, kills }
    }
}
