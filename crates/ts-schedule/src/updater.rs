use ts_agent::{AgentOrderings, AgentStore};
use ts_core::AgentId;

/// The two per-agent frame callbacks the scheduler drives.
///
/// The scheduler owns the orderings and hands them out read-only; the agent
/// store is passed mutably because updates move, damage and heal agents.
/// Priorities are managed by the scheduler and should not be touched here.
pub trait AgentUpdater {
    /// Re-plan and execute.
    fn update(&mut self, agent: AgentId, dt: f32, agents: &mut AgentStore, orderings: &AgentOrderings);

    /// Continue the current action only.
    fn quick_update(&mut self, agent: AgentId, dt: f32, agents: &mut AgentStore, orderings: &AgentOrderings);
}
