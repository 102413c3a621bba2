//! High-level mobility engine: share-or-search travel and per-frame stepping.

use tracing::{debug, trace};

use ts_agent::{AgentOrderings, AgentStore};
use ts_core::{AgentId, Vec2};
use ts_spatial::{Pathfinder, TileMap};

use crate::{MobilityError, MobilityResult, MobilityStore, PathSharing};

/// How a route was obtained by [`MobilityEngine::begin_travel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelSource {
    /// Start and goal share a tile; the agent walks straight to the goal.
    Direct,
    /// Copied from another agent's route.
    Shared(AgentId),
    /// Computed by the pathfinder.
    Searched,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveStatus {
    /// No active route.
    Stationary,
    Moving,
    /// The final waypoint was reached this call.
    Arrived,
}

/// Counters over the engine's lifetime (cleared by [`MobilityEngine::reset`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MobilityStats {
    pub shared:   u64,
    pub searched: u64,
    pub failed:   u64,
}

/// Wraps a [`Pathfinder`], the [`MobilityStore`], and [`PathSharing`].
///
/// `P` is fixed at compile time; swap in a different search by changing the
/// type parameter.
pub struct MobilityEngine<P: Pathfinder> {
    pub pathfinder: P,
    pub store:      MobilityStore,
    pub sharing:    PathSharing,
    stats:          MobilityStats,
}

impl<P: Pathfinder> MobilityEngine<P> {
    pub fn new(pathfinder: P, agent_count: usize, sharing: PathSharing) -> Self {
        Self {
            pathfinder,
            store: MobilityStore::new(agent_count),
            sharing,
            stats: MobilityStats::default(),
        }
    }

    /// Give `agent` a route to `goal`, replacing any current one.
    ///
    /// A compatible route from a nearby agent is reused when one exists;
    /// otherwise the pathfinder is asked.  On failure the agent is left
    /// without a route.
    pub fn begin_travel(
        &mut self,
        agent:     AgentId,
        goal:      Vec2,
        agents:    &AgentStore,
        orderings: &AgentOrderings,
        map:       &TileMap,
    ) -> MobilityResult<TravelSource> {
        if !agents.is_alive(agent) {
            return Err(MobilityError::Dead(agent));
        }
        let from = agents.position[agent.index()];
        if from.tile() == goal.tile() {
            self.store.assign(agent, vec![goal], goal);
            return Ok(TravelSource::Direct);
        }

        if let Some((donor, tail)) = self.sharing.share(agent, goal, agents, orderings, &self.store, map) {
            trace!(%agent, %donor, waypoints = tail.len(), "sharing path");
            self.store.assign(agent, tail, goal);
            self.stats.shared += 1;
            return Ok(TravelSource::Shared(donor));
        }

        match self.pathfinder.find_path(map, from.tile(), goal.tile()) {
            Ok(path) => {
                self.store.assign(agent, path.waypoints, goal);
                self.stats.searched += 1;
                Ok(TravelSource::Searched)
            }
            Err(source) => {
                self.store.clear(agent);
                self.stats.failed += 1;
                debug!(%agent, goal = %goal.tile(), error = %source, "no route");
                Err(MobilityError::Unreachable { agent, goal: goal.tile(), source })
            }
        }
    }

    /// Walk `agent` along its route for `dt` seconds at `speed` tiles/second.
    ///
    /// Leftover distance after reaching a waypoint carries on toward the next
    /// one, so a fast agent may pass several waypoints in one call.
    pub fn advance(&mut self, agent: AgentId, agents: &mut AgentStore, speed: f32, dt: f32) -> MoveStatus {
        let state = &mut self.store.states[agent.index()];
        if !state.is_active() {
            return MoveStatus::Stationary;
        }
        let i = agent.index();
        let mut budget = (speed * dt).max(0.0);
        let mut pos = agents.position[i];

        while let Some(next) = state.next_waypoint() {
            let to_next = next - pos;
            let dist = to_next.length();
            if dist > 0.0 {
                agents.forward[i] = to_next.normalized();
            }
            if dist > budget {
                pos += to_next.normalized() * budget;
                break;
            }
            budget -= dist;
            pos = next;
            state.index += 1;
        }
        agents.position[i] = pos;

        if state.is_active() { MoveStatus::Moving } else { MoveStatus::Arrived }
    }

    #[inline]
    pub fn stop(&mut self, agent: AgentId) {
        self.store.clear(agent);
    }

    #[inline]
    pub fn stats(&self) -> MobilityStats {
        self.stats
    }

    /// Drop every route and zero the counters.
    pub fn reset(&mut self) {
        self.store.clear_all();
        self.stats = MobilityStats::default();
    }
}
