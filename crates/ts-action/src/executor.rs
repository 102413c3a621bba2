//! The `ActionExecutor`: every agent's stack plus the behavior dispatch.

use tracing::debug;

use ts_agent::AgentStore;
use ts_core::{AgentId, Resource, Target, Vec2};
use ts_mobility::{MobilityError, MoveStatus};
use ts_spatial::Pathfinder;

use crate::{ActionConfig, ActionContext, ActionFailure, ActionStack, ActionStep, Behavior, StepStatus};

/// Progress of the step currently on top of an agent's stack.  Reset whenever
/// the top changes.
#[derive(Clone, Copy, Debug, Default)]
struct StepProgress {
    /// `MoveTo` has requested its route.
    started: bool,
    /// Fractional work units carried between ticks.
    work: f32,
    /// Whole units applied so far.
    units: u32,
}

pub struct ActionExecutor {
    config: ActionConfig,
    stacks: Vec<ActionStack>,
    progress: Vec<StepProgress>,
}

impl ActionExecutor {
    pub fn new(agent_count: usize, config: ActionConfig) -> Self {
        Self {
            config,
            stacks: vec![ActionStack::new(); agent_count],
            progress: vec![StepProgress::default(); agent_count],
        }
    }

    #[inline]
    pub fn config(&self) -> &ActionConfig {
        &self.config
    }

    #[inline]
    pub fn stack(&self, agent: AgentId) -> &ActionStack {
        &self.stacks[agent.index()]
    }

    #[inline]
    pub fn current(&self, agent: AgentId) -> Option<&ActionStep> {
        self.stacks[agent.index()].top()
    }

    #[inline]
    pub fn depth(&self, agent: AgentId) -> usize {
        self.stacks[agent.index()].len()
    }

    #[inline]
    pub fn is_idle(&self, agent: AgentId) -> bool {
        self.stacks[agent.index()].is_empty()
    }

    /// Push `step`; it runs before everything already on the stack.
    pub fn add_action(&mut self, agent: AgentId, step: ActionStep) {
        self.stacks[agent.index()].push(step);
        self.progress[agent.index()] = StepProgress::default();
    }

    /// Discard all pending steps.  Safe at any point between updates.
    ///
    /// The agent's route is owned by the mobility engine; callers interrupting
    /// a walk should also call `MobilityEngine::stop`.
    pub fn clear_stack(&mut self, agent: AgentId) {
        self.stacks[agent.index()].clear();
        self.progress[agent.index()] = StepProgress::default();
    }

    /// Empty every stack (simulation reset).
    pub fn reset(&mut self) {
        self.stacks.iter_mut().for_each(ActionStack::clear);
        self.progress.fill(StepProgress::default());
    }

    /// Run the top step of `agent`'s stack for `dt` seconds.
    ///
    /// Returns `None` when the stack is empty.  A `Done` step has been popped
    /// by the time this returns; a `Failed` step has cleared the stack and
    /// stopped the agent's walk.
    pub fn process_action_stack<P: Pathfinder>(
        &mut self,
        agent: AgentId,
        dt: f32,
        ctx: &mut ActionContext<'_, P>,
    ) -> Option<StepStatus> {
        let i = agent.index();
        let step = *self.stacks[i].top()?;

        let status = if ctx.agents.is_alive(agent) {
            let cfg = &self.config;
            let prog = &mut self.progress[i];
            match step.behavior {
                Behavior::MoveTo { stop_within } => move_to(cfg, agent, &step, stop_within, dt, prog, ctx),
                Behavior::Gather(resource) => gather(cfg, agent, &step, resource, dt, prog, ctx),
                Behavior::Shoot => shoot(cfg, agent, &step, dt, prog, ctx),
                Behavior::Repair => repair(cfg, agent, &step, dt, prog, ctx),
                Behavior::Heal => heal(cfg, agent, &step, dt, prog, ctx),
                Behavior::Extinguish => extinguish(cfg, agent, &step, dt, prog, ctx),
            }
        } else {
            StepStatus::Failed(ActionFailure::ActorDead)
        };

        match status {
            StepStatus::InProgress => {}
            StepStatus::Done => {
                self.stacks[i].pop();
                self.progress[i] = StepProgress::default();
            }
            StepStatus::Failed(reason) => {
                debug!(%agent, behavior = step.behavior.as_str(), %reason, "step failed");
                self.clear_stack(agent);
                ctx.mobility.stop(agent);
            }
        }
        Some(status)
    }
}

// ── Behaviors ─────────────────────────────────────────────────────────────────

/// Add this tick's work and return the whole units now available.
fn earn(prog: &mut StepProgress, rate: f32, efficiency: f32, dt: f32) -> u32 {
    prog.work += (rate * efficiency * dt).max(0.0);
    prog.work.floor() as u32
}

fn spend(prog: &mut StepProgress, units: u32) {
    prog.work -= units as f32;
    prog.units += units;
}

/// Ran dry: fine if something was already done, a failure if nothing was.
fn exhausted(prog: &StepProgress) -> StepStatus {
    if prog.units > 0 { StepStatus::Done } else { StepStatus::Failed(ActionFailure::OutOfSupply) }
}

#[inline]
fn within(agents: &AgentStore, agent: AgentId, point: Vec2, range: f32) -> bool {
    agents.position[agent.index()].distance(point) <= range
}

fn move_to<P: Pathfinder>(
    cfg: &ActionConfig,
    agent: AgentId,
    step: &ActionStep,
    stop_within: f32,
    dt: f32,
    prog: &mut StepProgress,
    ctx: &mut ActionContext<'_, P>,
) -> StepStatus {
    let reach = stop_within.max(cfg.arrive_radius);
    if within(ctx.agents, agent, step.destination, reach) {
        ctx.mobility.stop(agent);
        return StepStatus::Done;
    }

    if !prog.started {
        prog.started = true;
        if let Err(e) = ctx.mobility.begin_travel(agent, step.destination, ctx.agents, ctx.orderings, ctx.map) {
            return StepStatus::Failed(match e {
                MobilityError::Dead(_) => ActionFailure::ActorDead,
                MobilityError::Unreachable { .. } => ActionFailure::Unreachable,
            });
        }
    }

    match ctx.mobility.advance(agent, ctx.agents, cfg.walk_speed, dt) {
        MoveStatus::Moving if within(ctx.agents, agent, step.destination, reach) => {
            ctx.mobility.stop(agent);
            StepStatus::Done
        }
        MoveStatus::Moving => StepStatus::InProgress,
        MoveStatus::Arrived | MoveStatus::Stationary => StepStatus::Done,
    }
}

fn gather<P: Pathfinder>(
    cfg: &ActionConfig,
    agent: AgentId,
    step: &ActionStep,
    resource: Resource,
    dt: f32,
    prog: &mut StepProgress,
    ctx: &mut ActionContext<'_, P>,
) -> StepStatus {
    let Some(id) = step.target.and_then(Target::building) else {
        return StepStatus::Failed(ActionFailure::MissingTarget);
    };
    let i = agent.index();
    let Some(building) = ctx.poi.building_mut(id).filter(|b| b.is_alive()) else {
        return StepStatus::Failed(ActionFailure::TargetGone);
    };
    if !within(ctx.agents, agent, building.position(), cfg.interact_range) {
        return StepStatus::Failed(ActionFailure::OutOfRange);
    }
    let held = ctx.agents.inventory[i].count(resource);
    if held >= cfg.carry_capacity {
        return StepStatus::Done;
    }
    if building.stock == 0 {
        return exhausted(prog);
    }

    let efficiency = ctx.agents.personality[i].efficiency(resource.gather_plan());
    let n = earn(prog, cfg.gather_rate, efficiency, dt)
        .min(cfg.carry_capacity - held)
        .min(building.stock);
    building.stock -= n;
    ctx.agents.inventory[i].add(resource, n);
    spend(prog, n);

    if ctx.agents.inventory[i].count(resource) >= cfg.carry_capacity || building.stock == 0 {
        StepStatus::Done
    } else {
        StepStatus::InProgress
    }
}

fn shoot<P: Pathfinder>(
    cfg: &ActionConfig,
    agent: AgentId,
    step: &ActionStep,
    dt: f32,
    prog: &mut StepProgress,
    ctx: &mut ActionContext<'_, P>,
) -> StepStatus {
    let Some(victim) = step.target.and_then(Target::agent).filter(|&v| v != agent) else {
        return StepStatus::Failed(ActionFailure::MissingTarget);
    };
    if !ctx.agents.is_alive(victim) {
        return StepStatus::Done;
    }
    let (i, v) = (agent.index(), victim.index());
    let offset = ctx.agents.position[v] - ctx.agents.position[i];
    if offset.length() > cfg.shoot_range {
        return StepStatus::Failed(ActionFailure::OutOfRange);
    }
    if !ctx.agents.inventory[i].has(Resource::Arrows) {
        return exhausted(prog);
    }
    ctx.agents.forward[i] = offset.normalized();

    let efficiency = ctx.agents.personality[i].efficiency(step.behavior.plan());
    let ready = earn(prog, cfg.shoot_rate, efficiency, dt);
    let shots = ctx.agents.inventory[i].take(Resource::Arrows, ready);
    spend(prog, shots);
    for _ in 0..shots {
        if ctx.agents.apply_damage(victim, cfg.shoot_damage) {
            ctx.kills.push(victim);
            return StepStatus::Done;
        }
    }

    if ctx.agents.inventory[i].has(Resource::Arrows) { StepStatus::InProgress } else { StepStatus::Done }
}

fn heal<P: Pathfinder>(
    cfg: &ActionConfig,
    agent: AgentId,
    step: &ActionStep,
    dt: f32,
    prog: &mut StepProgress,
    ctx: &mut ActionContext<'_, P>,
) -> StepStatus {
    let Some(patient) = step.target.and_then(Target::agent) else {
        return StepStatus::Failed(ActionFailure::MissingTarget);
    };
    if !ctx.agents.is_alive(patient) {
        return StepStatus::Failed(ActionFailure::TargetGone);
    }
    if !ctx.agents.is_injured(patient) {
        return StepStatus::Done;
    }
    let i = agent.index();
    if !within(ctx.agents, agent, ctx.agents.position[patient.index()], cfg.heal_range) {
        return StepStatus::Failed(ActionFailure::OutOfRange);
    }
    if !ctx.agents.inventory[i].has(Resource::Bandages) {
        return exhausted(prog);
    }

    let efficiency = ctx.agents.personality[i].efficiency(step.behavior.plan());
    let mut applied = 0;
    for _ in 0..earn(prog, cfg.heal_rate, efficiency, dt) {
        if !ctx.agents.is_injured(patient) || ctx.agents.inventory[i].take(Resource::Bandages, 1) == 0 {
            break;
        }
        ctx.agents.restore_health(patient, cfg.heal_per_bandage);
        applied += 1;
    }
    spend(prog, applied);

    if !ctx.agents.is_injured(patient) || !ctx.agents.inventory[i].has(Resource::Bandages) {
        StepStatus::Done
    } else {
        StepStatus::InProgress
    }
}

fn repair<P: Pathfinder>(
    cfg: &ActionConfig,
    agent: AgentId,
    step: &ActionStep,
    dt: f32,
    prog: &mut StepProgress,
    ctx: &mut ActionContext<'_, P>,
) -> StepStatus {
    let Some(id) = step.target.and_then(Target::building) else {
        return StepStatus::Failed(ActionFailure::MissingTarget);
    };
    let i = agent.index();
    let Some(building) = ctx.poi.building_mut(id).filter(|b| b.is_alive()) else {
        return StepStatus::Failed(ActionFailure::TargetGone);
    };
    if !building.is_damaged() {
        return StepStatus::Done;
    }
    if !within(ctx.agents, agent, building.position(), cfg.interact_range) {
        return StepStatus::Failed(ActionFailure::OutOfRange);
    }
    if !ctx.agents.inventory[i].has(Resource::Lumber) {
        return exhausted(prog);
    }

    let efficiency = ctx.agents.personality[i].efficiency(step.behavior.plan());
    let mut applied = 0;
    for _ in 0..earn(prog, cfg.repair_rate, efficiency, dt) {
        if !building.is_damaged() || ctx.agents.inventory[i].take(Resource::Lumber, 1) == 0 {
            break;
        }
        building.health = (building.health + cfg.repair_per_lumber).min(building.max_health);
        applied += 1;
    }
    spend(prog, applied);

    if !building.is_damaged() || !ctx.agents.inventory[i].has(Resource::Lumber) {
        StepStatus::Done
    } else {
        StepStatus::InProgress
    }
}

fn extinguish<P: Pathfinder>(
    cfg: &ActionConfig,
    agent: AgentId,
    step: &ActionStep,
    dt: f32,
    prog: &mut StepProgress,
    ctx: &mut ActionContext<'_, P>,
) -> StepStatus {
    let Some(id) = step.target.and_then(Target::fire) else {
        return StepStatus::Failed(ActionFailure::MissingTarget);
    };
    let i = agent.index();
    let Some(fire) = ctx.poi.fire_mut(id) else {
        return StepStatus::Failed(ActionFailure::TargetGone);
    };
    // A slot on another tile is a later fire reusing the id; ours is out.
    if !fire.is_burning() || fire.tile != step.destination.tile() {
        return StepStatus::Done;
    }
    if !within(ctx.agents, agent, fire.position(), cfg.interact_range) {
        return StepStatus::Failed(ActionFailure::OutOfRange);
    }
    if !ctx.agents.inventory[i].has(Resource::Water) {
        return exhausted(prog);
    }

    let efficiency = ctx.agents.personality[i].efficiency(step.behavior.plan());
    let mut applied = 0;
    for _ in 0..earn(prog, cfg.extinguish_rate, efficiency, dt) {
        if !fire.is_burning() || ctx.agents.inventory[i].take(Resource::Water, 1) == 0 {
            break;
        }
        fire.intensity = (fire.intensity - cfg.extinguish_per_water).max(0.0);
        applied += 1;
    }
    spend(prog, applied);

    if !fire.is_burning() || !ctx.agents.inventory[i].has(Resource::Water) {
        StepStatus::Done
    } else {
        StepStatus::InProgress
    }
}
