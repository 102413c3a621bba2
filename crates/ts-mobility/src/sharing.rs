//! Path sharing: reuse the unwalked tail of another agent's route.
//!
//! Candidates come from the x- and y-sorted orderings maintained by
//! `ts-agent`, scanned outward from an anchor point for at most `window`
//! entries per axis.  Because the orderings are only refreshed on resorts the
//! scan may see slightly stale neighbours; that only affects which donor is
//! found, never correctness, since every candidate is re-checked here.
//!
//! A donor's tail is only usable if the requester can walk straight onto its
//! next waypoint; otherwise the copied route would lead through walls.

use ts_agent::{AgentOrderings, AgentStore};
use ts_core::{AgentId, Vec2};
use ts_spatial::TileMap;

use crate::MobilityStore;

/// Which point the neighbour scan is centred on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShareAnchor {
    /// Agents near the destination: their routes are most likely to end there.
    #[default]
    Destination,
    /// Agents near the requester.
    Requester,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSharing {
    /// Candidates examined per axis.  Zero disables sharing.
    pub window: usize,
    /// Max distance between a donor's final waypoint and the requested destination.
    pub radius: f32,
    pub anchor: ShareAnchor,
}

impl Default for PathSharing {
    fn default() -> Self {
        Self { window: 8, radius: 1.0, anchor: ShareAnchor::Destination }
    }
}

impl PathSharing {
    pub fn disabled() -> Self {
        Self { window: 0, ..Self::default() }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.window > 0
    }

    /// Find an agent whose unfinished route ends within `radius` of
    /// `destination` and whose next waypoint is in clear line from the
    /// requester.
    pub fn find_donor(
        &self,
        requester:   AgentId,
        destination: Vec2,
        agents:      &AgentStore,
        orderings:   &AgentOrderings,
        mobility:    &MobilityStore,
        map:         &TileMap,
    ) -> Option<AgentId> {
        if !self.is_enabled() || orderings.is_empty() {
            return None;
        }
        let anchor = match self.anchor {
            ShareAnchor::Destination => destination,
            ShareAnchor::Requester => agents.position[requester.index()],
        };
        let from = agents.position[requester.index()];
        let radius_sq = self.radius * self.radius;
        let compatible = |b: AgentId| {
            if b == requester || !agents.is_alive(b) {
                return false;
            }
            let state = mobility.get(b);
            state.is_active()
                && state
                    .final_waypoint()
                    .is_some_and(|end| end.distance_squared(destination) <= radius_sq)
                && state.next_waypoint().is_some_and(|next| map.line_walkable(from, next))
        };

        orderings
            .window_x(agents, anchor.x, self.window)
            .find(|&b| compatible(b))
            .or_else(|| orderings.window_y(agents, anchor.y, self.window).find(|&b| compatible(b)))
    }

    /// Copy of the donor's remaining waypoints, if a donor exists.
    pub fn share(
        &self,
        requester:   AgentId,
        destination: Vec2,
        agents:      &AgentStore,
        orderings:   &AgentOrderings,
        mobility:    &MobilityStore,
        map:         &TileMap,
    ) -> Option<(AgentId, Vec<Vec2>)> {
        let donor = self.find_donor(requester, destination, agents, orderings, mobility, map)?;
        Some((donor, mobility.get(donor).remaining().to_vec()))
    }
}
