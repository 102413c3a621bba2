//! Fluent builder for constructing a [`Sim`].

use ts_action::{ActionConfig, ActionExecutor};
use ts_agent::{AgentRngs, AgentStore};
use ts_core::{SimConfig, SimRng, Vec2};
use ts_mobility::{MobilityEngine, PathSharing};
use ts_schedule::{AgentScheduler, BudgetClock, SchedulerConfig, WallClock};
use ts_spatial::{MapLayout, Pathfinder, PointsOfInterest, TileMap};
use ts_utility::{PlannerConfig, PlannerStore};

use crate::{Sim, SimError, SimResult, World, WorldConfig};

enum MapSource {
    Layout(MapLayout),
    Ascii(String),
}

/// Fluent builder for [`Sim<P>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: total frames, seed, frame duration
/// - [`AgentStore`] + [`AgentRngs`] from [`ts_agent::AgentStoreBuilder`]
/// - `P: Pathfinder`, e.g. [`ts_spatial::AStarPathfinder`]
/// - a map, via [`.map(..)`](Self::map) or [`.ascii_map(..)`](Self::ascii_map)
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default                         |
/// |---------------------|---------------------------------|
/// | `.positions(v)`     | random walkable tile per agent  |
/// | `.actions(c)`       | `ActionConfig::default()`       |
/// | `.planner(c)`       | `PlannerConfig::default()`      |
/// | `.scheduler(c)`     | `SchedulerConfig::default()`    |
/// | `.sharing(s)`       | `PathSharing::default()`        |
/// | `.world(c)`         | `WorldConfig::default()`        |
/// | `.budget_clock(c)`  | `WallClock`                     |
///
/// # Example
///
/// ```rust
/// use ts_agent::AgentStoreBuilder;
/// use ts_core::SimConfig;
/// use ts_schedule::{FrozenClock, SchedulerConfig};
/// use ts_sim::{NoopObserver, SimBuilder};
/// use ts_spatial::AStarPathfinder;
///
/// let config = SimConfig { total_frames: 20, ..SimConfig::default() };
/// let (agents, rngs) = AgentStoreBuilder::new(12, config.seed).teams(2).build();
/// let mut sim = SimBuilder::new(config, agents, rngs, AStarPathfinder::default())
///     .ascii_map("
///         ..........
///         ..A....L..
///         ..........
///         ..I....W..
///     ")
///     .scheduler(SchedulerConfig::fixed(4))
///     .budget_clock(FrozenClock)
///     .build()?;
/// sim.run(&mut NoopObserver);
/// assert_eq!(sim.scheduler.total_full_updates(), 80);
/// # Ok::<(), ts_sim::SimError>(())
/// ```
pub struct SimBuilder<P: Pathfinder> {
    config:       SimConfig,
    agents:       AgentStore,
    rngs:         AgentRngs,
    pathfinder:   P,
    map:          Option<MapSource>,
    positions:    Option<Vec<Vec2>>,
    actions:      ActionConfig,
    planner:      PlannerConfig,
    scheduler:    SchedulerConfig,
    sharing:      PathSharing,
    world:        WorldConfig,
    budget_clock: Option<Box<dyn BudgetClock>>,
}

impl<P: Pathfinder> SimBuilder<P> {
    /// Create a builder with all required inputs except the map.
    pub fn new(config: SimConfig, agents: AgentStore, rngs: AgentRngs, pathfinder: P) -> Self {
        Self {
            config,
            agents,
            rngs,
            pathfinder,
            map:          None,
            positions:    None,
            actions:      ActionConfig::default(),
            planner:      PlannerConfig::default(),
            scheduler:    SchedulerConfig::default(),
            sharing:      PathSharing::default(),
            world:        WorldConfig::default(),
            budget_clock: None,
        }
    }

    /// Use an already parsed map and its buildings.
    pub fn map(mut self, layout: MapLayout) -> Self {
        self.map = Some(MapSource::Layout(layout));
        self
    }

    /// Parse the map from its ASCII form at build time.
    pub fn ascii_map(mut self, text: &str) -> Self {
        self.map = Some(MapSource::Ascii(text.to_owned()));
        self
    }

    /// Starting position for each agent.  Must be length `agent_count` and
    /// every position must be on a walkable tile.
    pub fn positions(mut self, positions: Vec<Vec2>) -> Self {
        self.positions = Some(positions);
        self
    }

    pub fn actions(mut self, config: ActionConfig) -> Self {
        self.actions = config;
        self
    }

    pub fn planner(mut self, config: PlannerConfig) -> Self {
        self.planner = config;
        self
    }

    pub fn scheduler(mut self, config: SchedulerConfig) -> Self {
        self.scheduler = config;
        self
    }

    pub fn sharing(mut self, sharing: PathSharing) -> Self {
        self.sharing = sharing;
        self
    }

    pub fn world(mut self, config: WorldConfig) -> Self {
        self.world = config;
        self
    }

    /// Time source for the frame budget.  Pass
    /// [`FrozenClock`](ts_schedule::FrozenClock) for runs that depend only on
    /// the seed.
    pub fn budget_clock<C: BudgetClock + 'static>(mut self, clock: C) -> Self {
        self.budget_clock = Some(Box::new(clock));
        self
    }

    /// Validate inputs, place agents, build every subsystem and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<P>> {
        let agent_count = self.agents.count;
        if self.rngs.len() != agent_count {
            return Err(SimError::AgentCountMismatch {
                expected: agent_count,
                got:      self.rngs.len(),
                what:     "agent rngs",
            });
        }
        self.config.validate()?;
        self.world.validate()?;
        self.actions.validate()?;

        // ── Map and points of interest ────────────────────────────────────
        let layout = match self.map {
            Some(MapSource::Layout(layout)) => layout,
            Some(MapSource::Ascii(text)) => TileMap::from_ascii(&text)?,
            None => return Err(SimError::Config("no map supplied".into())),
        };
        let MapLayout { map, buildings } = layout;
        let mut poi = PointsOfInterest::new();
        poi.fire_cap = self.world.max_intensity;
        for (kind, tile) in buildings {
            poi.add_building(kind, tile, self.world.building_health, self.world.building_stock);
        }

        // ── Spawn points ──────────────────────────────────────────────────
        let spawn_points = match self.positions {
            Some(p) => {
                if p.len() != agent_count {
                    return Err(SimError::AgentCountMismatch {
                        expected: agent_count,
                        got:      p.len(),
                        what:     "initial positions",
                    });
                }
                if let Some(bad) = p.iter().find(|pos| !map.is_walkable(pos.tile())) {
                    return Err(SimError::Config(format!(
                        "initial position ({}, {}) is not on a walkable tile",
                        bad.x, bad.y,
                    )));
                }
                p
            }
            None => {
                let mut rng = SimRng::new(self.config.seed);
                (0..agent_count)
                    .map(|_| {
                        map.random_walkable(rng.inner())
                            .map(|tile| tile.center())
                            .ok_or_else(|| SimError::Config("map has no walkable tile".into()))
                    })
                    .collect::<SimResult<Vec<_>>>()?
            }
        };

        let mut agents = self.agents;
        agents.position.copy_from_slice(&spawn_points);

        // ── Subsystems ────────────────────────────────────────────────────
        let executor = ActionExecutor::new(agent_count, self.actions);
        let planners = PlannerStore::new(agent_count, self.planner)?;
        let mobility = MobilityEngine::new(self.pathfinder, agent_count, self.sharing);
        let scheduler = AgentScheduler::new(self.scheduler, &mut agents)?;
        let world = World::new(map, poi, mobility, executor, planners, self.rngs, self.world);
        let budget_clock = self.budget_clock.unwrap_or_else(|| Box::new(WallClock::new()));

        Ok(Sim::new(self.config, agents, world, scheduler, spawn_points, budget_clock))
    }
}
