//! The `MobilityStore`: every agent's route, indexed by `AgentId`.

use ts_core::{AgentId, Vec2};

use crate::MovementState;

pub struct MobilityStore {
    pub states: Vec<MovementState>,
}

impl MobilityStore {
    /// All agents start with no route.
    pub fn new(agent_count: usize) -> Self {
        Self { states: vec![MovementState::default(); agent_count] }
    }

    #[inline]
    pub fn get(&self, agent: AgentId) -> &MovementState {
        &self.states[agent.index()]
    }

    /// Replace the agent's route.
    pub fn assign(&mut self, agent: AgentId, waypoints: Vec<Vec2>, goal: Vec2) {
        self.states[agent.index()] = MovementState::new(waypoints, goal);
    }

    /// Drop the agent's route, keeping the allocation.
    pub fn clear(&mut self, agent: AgentId) {
        let s = &mut self.states[agent.index()];
        s.waypoints.clear();
        s.index = 0;
    }

    #[inline]
    pub fn is_moving(&self, agent: AgentId) -> bool {
        self.states[agent.index()].is_active()
    }

    /// Number of agents currently walking a route.
    pub fn moving_count(&self) -> usize {
        self.states.iter().filter(|s| s.is_active()).count()
    }

    pub fn clear_all(&mut self) {
        for s in &mut self.states {
            s.waypoints.clear();
            s.index = 0;
        }
    }
}
