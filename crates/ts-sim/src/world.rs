//! Everything an agent update touches besides the agent store itself.
//!
//! [`World`] is the scheduler's [`AgentUpdater`]: a full update re-plans and
//! then executes, a quick update only executes.  Each field is borrowed on
//! its own so the planner, the executor and the mobility engine can be handed
//! out side by side.

use tracing::{info, warn};

use ts_action::{ActionContext, ActionExecutor};
use ts_agent::{AgentOrderings, AgentRngs, AgentStore};
use ts_core::AgentId;
use ts_mobility::MobilityEngine;
use ts_schedule::AgentUpdater;
use ts_spatial::{Pathfinder, PointsOfInterest, TileMap};
use ts_utility::{PlannerStore, PlanningView};

use crate::WorldConfig;

pub struct World<P: Pathfinder> {
    pub map:       TileMap,
    pub poi:       PointsOfInterest,
    pub mobility:  MobilityEngine<P>,
    pub executor:  ActionExecutor,
    pub planners:  PlannerStore,
    pub rngs:      AgentRngs,
    pub config:    WorldConfig,
    /// Agents killed since the last [`drain_kills`](Self::drain_kills).
    kills:         Vec<AgentId>,
}

impl<P: Pathfinder> World<P> {
    pub(crate) fn new(
        map:       TileMap,
        poi:       PointsOfInterest,
        mobility:  MobilityEngine<P>,
        executor:  ActionExecutor,
        planners:  PlannerStore,
        rngs:      AgentRngs,
        config:    WorldConfig,
    ) -> Self {
        Self { map, poi, mobility, executor, planners, rngs, config, kills: Vec::new() }
    }

    /// Take the agents killed since the last call and tear down what they
    /// were doing: stack cleared, walk stopped.
    pub fn drain_kills(&mut self) -> Vec<AgentId> {
        let kills = std::mem::take(&mut self.kills);
        for &victim in &kills {
            self.executor.clear_stack(victim);
            self.mobility.stop(victim);
            info!(agent = %victim, "agent died");
        }
        kills
    }

    /// Back to the start state: buildings rebuilt, fires out, every stack,
    /// path, planner and memo emptied.
    pub fn reset(&mut self) {
        self.poi.reset();
        self.mobility.reset();
        self.executor.reset();
        self.planners.reset();
        self.kills.clear();
    }

    fn execute(&mut self, agent: AgentId, dt: f32, agents: &mut AgentStore, orderings: &AgentOrderings) {
        let mut ctx = ActionContext::new(
            agents,
            orderings,
            &mut self.mobility,
            &mut self.poi,
            &self.map,
            &mut self.kills,
        );
        self.executor.process_action_stack(agent, dt, &mut ctx);
    }
}

impl<P: Pathfinder> AgentUpdater for World<P> {
    fn update(&mut self, agent: AgentId, dt: f32, agents: &mut AgentStore, orderings: &AgentOrderings) {
        let executing = !self.executor.is_idle(agent);
        let view = PlanningView {
            agents:    &*agents,
            orderings,
            poi:       &self.poi,
            map:       &self.map,
            actions:   self.executor.config(),
        };
        let decision = self.planners.update_plan(agent, &view, self.rngs.get_mut(agent), executing);

        // A better plan interrupts whatever was queued for the old one.
        if decision.changed && executing {
            self.executor.clear_stack(agent);
            self.mobility.stop(agent);
        }
        if self.executor.is_idle(agent) {
            if let Err(e) = self.planners.queue_actions_from_current_plan(agent, &mut self.executor) {
                warn!(%agent, error = %e, "could not queue plan");
            }
        }
        self.execute(agent, dt, agents, orderings);
    }

    fn quick_update(&mut self, agent: AgentId, dt: f32, agents: &mut AgentStore, orderings: &AgentOrderings) {
        self.execute(agent, dt, agents, orderings);
    }
}
