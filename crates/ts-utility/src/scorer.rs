//! One scorer per plan category.
//!
//! A scorer finds the plan's target with a world query, turns what it found
//! into normalized inputs, and multiplies the memoized curve outputs together
//! with the agent's personality bias.  No target means a score of zero.

use ts_action::ActionConfig;
use ts_agent::{AgentOrderings, AgentStore};
use ts_core::{AgentId, AgentRng, PlanKind, Resource, Target, Vec2};
use ts_spatial::{PointsOfInterest, TileMap};

use crate::{Factor, PlannerConfig, UtilityCaches};

/// Read-only world state every scorer queries.
pub struct PlanningView<'a> {
    pub agents:    &'a AgentStore,
    pub orderings: &'a AgentOrderings,
    pub poi:       &'a PointsOfInterest,
    pub map:       &'a TileMap,
    pub actions:   &'a ActionConfig,
}

/// A candidate plan's score and where it would send the agent.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct UtilityResult {
    pub score: f32,
    pub destination: Vec2,
    pub target: Option<Target>,
}

impl UtilityResult {
    /// Nothing to do: zero score, stay put.
    pub fn none(at: Vec2) -> Self {
        Self { score: 0.0, destination: at, target: None }
    }
}

/// Score `plan` for `agent`.
pub fn score(
    plan:   PlanKind,
    agent:  AgentId,
    view:   &PlanningView<'_>,
    caches: &mut UtilityCaches,
    config: &PlannerConfig,
    rng:    &mut AgentRng,
) -> UtilityResult {
    if let Some(resource) = plan.gathered() {
        return gather(resource, agent, view, caches);
    }
    match plan {
        PlanKind::Shoot => shoot(agent, view, caches, config),
        PlanKind::Repair => repair(agent, view, caches),
        PlanKind::Heal => heal(agent, view, caches, config),
        PlanKind::PutOutFire => put_out_fire(agent, view, caches, config),
        _ => idle(agent, view, config, rng),
    }
}

/// Distance from `from` to `to` as a fraction of the map diagonal.
fn proximity(view: &PlanningView<'_>, from: Vec2, to: Vec2) -> f32 {
    let diag = view.map.diagonal();
    if diag > 0.0 { from.distance(to) / diag } else { 0.0 }
}

fn bias(view: &PlanningView<'_>, agent: AgentId, plan: PlanKind) -> f32 {
    view.agents.personality[agent.index()].bias(plan)
}

fn gather(resource: Resource, agent: AgentId, view: &PlanningView<'_>, caches: &mut UtilityCaches) -> UtilityResult {
    let pos = view.agents.position[agent.index()];
    let cap = view.actions.carry_capacity;
    let held = view.agents.inventory[agent.index()].count(resource);
    if held >= cap {
        return UtilityResult::none(pos);
    }
    let Some((id, building)) = view
        .poi
        .nearest_supply(resource, pos)
        .and_then(|id| view.poi.building(id).map(|b| (id, b)))
    else {
        return UtilityResult::none(pos);
    };

    let need = 1.0 - held as f32 / cap as f32;
    let score = bias(view, agent, resource.gather_plan())
        * caches.evaluate(Factor::Need, need)
        * caches.evaluate(Factor::Proximity, proximity(view, pos, building.position()))
        * caches.evaluate(Factor::Stock, building.stock_fraction());
    UtilityResult { score, destination: building.position(), target: Some(Target::Building(id)) }
}

fn shoot(agent: AgentId, view: &PlanningView<'_>, caches: &mut UtilityCaches, config: &PlannerConfig) -> UtilityResult {
    let agents = view.agents;
    let pos = agents.position[agent.index()];
    if !agents.inventory[agent.index()].has(Resource::Arrows) {
        return UtilityResult::none(pos);
    }
    let Some(enemy) =
        view.orderings.nearest_where(agents, pos, config.threat_horizon, |b| agents.are_enemies(agent, b))
    else {
        return UtilityResult::none(pos);
    };

    let at = agents.position[enemy.index()];
    let score = bias(view, agent, PlanKind::Shoot)
        * caches.evaluate(Factor::Threat, pos.distance(at) / config.threat_horizon);
    UtilityResult { score, destination: at, target: Some(Target::Agent(enemy)) }
}

fn heal(agent: AgentId, view: &PlanningView<'_>, caches: &mut UtilityCaches, config: &PlannerConfig) -> UtilityResult {
    let agents = view.agents;
    let pos = agents.position[agent.index()];
    if !agents.inventory[agent.index()].has(Resource::Bandages) {
        return UtilityResult::none(pos);
    }
    let Some(patient) = view.orderings.nearest_where(agents, pos, config.heal_horizon, |b| {
        !agents.are_enemies(agent, b) && agents.is_injured(b)
    }) else {
        return UtilityResult::none(pos);
    };

    let at = agents.position[patient.index()];
    let score = bias(view, agent, PlanKind::Heal)
        * caches.evaluate(Factor::Injury, 1.0 - agents.health_fraction(patient))
        * caches.evaluate(Factor::Proximity, proximity(view, pos, at));
    UtilityResult { score, destination: at, target: Some(Target::Agent(patient)) }
}

fn repair(agent: AgentId, view: &PlanningView<'_>, caches: &mut UtilityCaches) -> UtilityResult {
    let pos = view.agents.position[agent.index()];
    if !view.agents.inventory[agent.index()].has(Resource::Lumber) {
        return UtilityResult::none(pos);
    }
    let Some((id, building)) = view
        .poi
        .nearest_damaged(pos)
        .and_then(|id| view.poi.building(id).map(|b| (id, b)))
    else {
        return UtilityResult::none(pos);
    };

    let score = bias(view, agent, PlanKind::Repair)
        * caches.evaluate(Factor::Damage, building.damage_fraction())
        * caches.evaluate(Factor::Proximity, proximity(view, pos, building.position()));
    UtilityResult { score, destination: building.position(), target: Some(Target::Building(id)) }
}

fn put_out_fire(
    agent:  AgentId,
    view:   &PlanningView<'_>,
    caches: &mut UtilityCaches,
    config: &PlannerConfig,
) -> UtilityResult {
    let pos = view.agents.position[agent.index()];
    if !view.agents.inventory[agent.index()].has(Resource::Water) {
        return UtilityResult::none(pos);
    }
    let Some((id, fire)) = view.poi.nearest_fire(pos).and_then(|id| view.poi.fire(id).map(|f| (id, f))) else {
        return UtilityResult::none(pos);
    };

    let score = bias(view, agent, PlanKind::PutOutFire)
        * caches.evaluate(Factor::Blaze, fire.intensity / config.max_fire_intensity)
        * caches.evaluate(Factor::Proximity, proximity(view, pos, fire.position()));
    UtilityResult { score, destination: fire.position(), target: Some(Target::Fire(id)) }
}

/// The fallback: wander to a random walkable tile at the idle threshold.
fn idle(agent: AgentId, view: &PlanningView<'_>, config: &PlannerConfig, rng: &mut AgentRng) -> UtilityResult {
    let pos = view.agents.position[agent.index()];
    let destination = view.map.random_walkable(rng.inner()).map_or(pos, |t| t.center());
    UtilityResult { score: config.idle_threshold, destination, target: None }
}
